//! Schema-driven batch validation of request bodies

use serde::Serialize;
use serde_json::{Map, Number, Value};

use super::schema::{FieldRule, SanitizeKind, Schema};
use crate::sanitizers::{
    sanitize_email, sanitize_html, sanitize_number, sanitize_object_id, sanitize_query_tree,
    sanitize_search_query, sanitize_text, sanitize_url, sanitize_url_param, truncate_chars,
};

/// Outcome of validating one request body against a schema.
///
/// `sanitized` holds only the fields that passed every applicable stage;
/// callers should consume it only when `is_valid` is true. A field
/// contributes at most one message to `errors`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SanitizationResult {
    pub is_valid: bool,
    pub sanitized: Map<String, Value>,
    pub errors: Vec<String>,
}

/// Validate and sanitize a raw field map against `schema`.
///
/// Per field, in order: required check, type check, sanitizer dispatch,
/// silent max-length truncation, pattern check. Never panics and never
/// rejects the whole body — the caller decides what an invalid result means.
pub fn sanitize_request_body(body: &Map<String, Value>, schema: &Schema) -> SanitizationResult {
    let mut sanitized = Map::new();
    let mut errors = Vec::new();

    for (field, rule) in schema.iter() {
        let raw = body.get(field);
        let missing = matches!(raw, None | Some(Value::Null));
        let empty = matches!(raw, Some(Value::String(s)) if s.is_empty());

        if rule.required && (missing || empty) {
            errors.push(format!("{field} is required"));
            continue;
        }
        if missing {
            continue;
        }

        // raw is Some past the missing check
        let value = raw.unwrap_or(&Value::Null);

        if let Some(expected) = rule.field_type {
            if !expected.matches(value) {
                errors.push(format!("{field} must be of type {expected}"));
                continue;
            }
        }

        let mut result = match apply_sanitizer(field, rule, value, &mut errors) {
            Some(result) => result,
            None => continue,
        };

        if let (Some(max_length), Value::String(s)) = (rule.max_length, &mut result) {
            if s.chars().count() > max_length {
                *s = truncate_chars(s, max_length);
            }
        }

        if let (Some(pattern), Value::String(s)) = (&rule.pattern, &result) {
            if !pattern.is_match(s) {
                errors.push(format!("{field} does not match the required pattern"));
                continue;
            }
        }

        sanitized.insert(field.to_string(), result);
    }

    SanitizationResult {
        is_valid: errors.is_empty(),
        sanitized,
        errors,
    }
}

/// Dispatch one field to its sanitizer. Returns `None` when the field failed
/// hard (error already recorded) and must be left out of the result.
fn apply_sanitizer(
    field: &str,
    rule: &FieldRule,
    value: &Value,
    errors: &mut Vec<String>,
) -> Option<Value> {
    let kind = match rule.sanitize {
        Some(kind) => kind,
        None => return Some(value.clone()),
    };

    // String sanitizers treat a non-string value as the empty string; the
    // type check stage is the place to surface a mismatch as an error.
    let as_str = || value.as_str().unwrap_or("");

    let result = match kind {
        SanitizeKind::Text => Value::String(sanitize_text(as_str())),
        SanitizeKind::Html => Value::String(sanitize_html(as_str())),
        SanitizeKind::Email => Value::String(sanitize_email(as_str())),
        SanitizeKind::UrlParam => Value::String(sanitize_url_param(as_str())),
        SanitizeKind::Search => Value::String(sanitize_search_query(as_str())),
        // A rejected URL is stored as null rather than erroring; existing
        // callers distinguish "absent" from "present but unusable"
        SanitizeKind::Url => match sanitize_url(as_str()) {
            Some(url) => Value::String(url),
            None => Value::Null,
        },
        SanitizeKind::MongoQuery => sanitize_query_tree(value),
        SanitizeKind::ObjectId => match sanitize_object_id(as_str()) {
            Some(id) => Value::String(id),
            None => {
                errors.push(format!("{field} is not a valid ObjectId"));
                return None;
            }
        },
        SanitizeKind::Number => {
            match sanitize_number(value, None, None).and_then(Number::from_f64) {
                Some(number) => Value::Number(number),
                None => {
                    errors.push(format!("{field} must be a valid number"));
                    return None;
                }
            }
        }
    };
    Some(result)
}
