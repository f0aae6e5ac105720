//! Declarative field rules for request-body validation

use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

/// Errors raised while building a schema. Validation itself never errors.
#[derive(Debug, Error)]
pub enum SchemaError {
    #[error("invalid field pattern: {0}")]
    InvalidPattern(#[from] regex::Error),
}

/// Which sanitizer a field rule dispatches to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SanitizeKind {
    Text,
    Html,
    Email,
    Url,
    UrlParam,
    MongoQuery,
    ObjectId,
    Search,
    Number,
}

/// Expected runtime type of a raw field value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldType {
    String,
    Number,
    Boolean,
    Object,
    Array,
}

impl FieldType {
    /// Check a raw value against this type.
    pub fn matches(&self, value: &Value) -> bool {
        match self {
            FieldType::String => value.is_string(),
            FieldType::Number => value.is_number(),
            FieldType::Boolean => value.is_boolean(),
            FieldType::Object => value.is_object(),
            FieldType::Array => value.is_array(),
        }
    }
}

impl std::fmt::Display for FieldType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            FieldType::String => "string",
            FieldType::Number => "number",
            FieldType::Boolean => "boolean",
            FieldType::Object => "object",
            FieldType::Array => "array",
        };
        f.write_str(name)
    }
}

/// Validation and sanitization rule for one field.
///
/// Built with chained setters:
///
/// ```
/// use scrubber::validation::{FieldRule, FieldType, SanitizeKind};
///
/// let rule = FieldRule::new()
///     .with_type(FieldType::String)
///     .required()
///     .sanitize(SanitizeKind::Email)
///     .with_max_length(254);
/// ```
#[derive(Debug, Clone, Default)]
pub struct FieldRule {
    /// Expected runtime type; mismatches produce a field error.
    pub field_type: Option<FieldType>,
    /// Missing/null/empty-string values produce a field error.
    pub required: bool,
    /// Sanitizer applied after the type check; `None` passes the raw value
    /// through unchanged.
    pub sanitize: Option<SanitizeKind>,
    /// Silent truncation bound for string results.
    pub max_length: Option<usize>,
    /// Pattern the sanitized string result must match.
    pub pattern: Option<Regex>,
}

impl FieldRule {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_type(mut self, field_type: FieldType) -> Self {
        self.field_type = Some(field_type);
        self
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn sanitize(mut self, kind: SanitizeKind) -> Self {
        self.sanitize = Some(kind);
        self
    }

    pub fn with_max_length(mut self, max_length: usize) -> Self {
        self.max_length = Some(max_length);
        self
    }

    /// Require the sanitized value to match `pattern`. Fails if the pattern
    /// is not a valid regex.
    pub fn with_pattern(mut self, pattern: &str) -> Result<Self, SchemaError> {
        self.pattern = Some(Regex::new(pattern)?);
        Ok(self)
    }
}

/// Ordered collection of field rules describing one request shape.
///
/// Fields are validated in insertion order; one schema typically lives as
/// long as the API contract it describes.
#[derive(Debug, Clone, Default)]
pub struct Schema {
    fields: Vec<(String, FieldRule)>,
}

impl Schema {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a field rule, keeping insertion order.
    pub fn field(mut self, name: impl Into<String>, rule: FieldRule) -> Self {
        self.fields.push((name.into(), rule));
        self
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &FieldRule)> {
        self.fields.iter().map(|(name, rule)| (name.as_str(), rule))
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}
