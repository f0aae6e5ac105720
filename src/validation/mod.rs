//! Schema-driven validation of whole request bodies
//!
//! A [`Schema`] maps field names to declarative [`FieldRule`]s; the batch
//! validator dispatches each field to the right sanitizer and accumulates
//! per-field errors instead of failing fast.

pub mod batch;
pub mod password;
pub mod schema;

pub use batch::{sanitize_request_body, SanitizationResult};
pub use password::{validate_password, PasswordStrength, PasswordValidation};
pub use schema::{FieldRule, FieldType, SanitizeKind, Schema, SchemaError};
