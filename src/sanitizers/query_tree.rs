//! Recursive sanitization of document-store query trees
//!
//! Untrusted filter objects can smuggle operator keys (`$where`),
//! prototype-pollution keys, or boolean-injection strings. Keys are dropped
//! outright; string leaves are defanged in place so a single hostile field
//! does not reject the whole request.

use serde_json::{Map, Value};

use super::truncate_chars;
use crate::diagnostics::{self, SecurityEvent};
use crate::patterns::{is_dangerous_key, INJECTION_PATTERNS, MAX_QUERY_STRING_LENGTH};

/// Produce a copy of `input` that is safe to pass to a query builder.
///
/// Guarantees that no map at any depth of the result contains a key starting
/// with `$` or named `__proto__`, `constructor`, or `prototype`, and that no
/// string leaf carries `$`, `.`, or brace/bracket characters.
pub fn sanitize_query_tree(input: &Value) -> Value {
    match input {
        Value::Null => Value::Null,
        Value::Bool(b) => Value::Bool(*b),
        Value::Number(n) => Value::Number(n.clone()),
        Value::String(s) => Value::String(sanitize_query_string(s)),
        Value::Array(items) => Value::Array(items.iter().map(sanitize_query_tree).collect()),
        Value::Object(entries) => {
            let mut sanitized = Map::new();
            for (key, value) in entries {
                if is_dangerous_key(key) {
                    diagnostics::emit(SecurityEvent::OperatorKeyDropped { key: key.clone() });
                    continue;
                }
                sanitized.insert(key.clone(), sanitize_query_tree(value));
            }
            Value::Object(sanitized)
        }
    }
}

/// Defang a string leaf. An injection-signal match neutralizes the whole
/// value to `""`; otherwise operator and path-traversal characters are
/// removed and the value is capped at 500 chars.
fn sanitize_query_string(input: &str) -> String {
    if INJECTION_PATTERNS.iter().any(|re| re.is_match(input)) {
        diagnostics::emit(SecurityEvent::InjectionDefanged {
            input: input.to_string(),
        });
        return String::new();
    }

    let cleaned: String = input
        .chars()
        .filter_map(|c| match c {
            '$' | '{' | '}' | '[' | ']' => None,
            '.' => Some('_'),
            other => Some(other),
        })
        .collect();
    truncate_chars(&cleaned, MAX_QUERY_STRING_LENGTH)
}
