//! # Scrubber - Input Sanitization and Validation Engine
//!
//! Pure, total transformation functions sitting between attacker-controlled
//! request data and the places it must never reach unescorted: document-store
//! query filters, rendered content, and response headers.
//!
//! ## Contracts
//!
//! - Every function accepts arbitrary input and never panics.
//! - Inputs are never mutated; sanitizers return new values.
//! - Free-text sanitizers fail open (dangerous content is defanged in
//!   place); format sanitizers fail closed (`None`/`""` means reject).
//! - Cost is bounded by input size: the percent-decode loop is capped, no
//!   string grows without a length ceiling.
//!
//! ## Example
//!
//! ```
//! use scrubber::validation::{FieldRule, SanitizeKind, Schema};
//! use serde_json::{json, Map};
//!
//! let schema = Schema::new()
//!     .field("id", FieldRule::new().required().sanitize(SanitizeKind::ObjectId))
//!     .field("bio", FieldRule::new().sanitize(SanitizeKind::Text));
//!
//! let mut body = Map::new();
//! body.insert("id".into(), json!("507f1f77bcf86cd799439011"));
//! body.insert("bio".into(), json!("<script>alert(1)</script>hello"));
//!
//! let result = scrubber::sanitize_request_body(&body, &schema);
//! assert!(result.is_valid);
//! assert_eq!(result.sanitized["bio"], json!("hello"));
//! ```

pub mod diagnostics;
pub mod nonce;
pub mod patterns;
pub mod sanitizers;
pub mod validation;

// Re-export the full engine surface at the crate root
pub use diagnostics::{set_diagnostic_sink, SecurityEvent};
pub use nonce::{generate_csp_nonce, generate_csp_nonce_with, RandomSource, ThreadRandom};
pub use sanitizers::{
    sanitize_email, sanitize_filename, sanitize_header_value, sanitize_html, sanitize_number,
    sanitize_object_id, sanitize_query_tree, sanitize_search_query, sanitize_text, sanitize_url,
    sanitize_url_param,
};
pub use validation::{
    sanitize_request_body, validate_password, FieldRule, FieldType, PasswordStrength,
    PasswordValidation, SanitizationResult, SanitizeKind, Schema, SchemaError,
};
