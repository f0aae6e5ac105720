//! Sanitization functions for untrusted scalars and trees
//!
//! Every function here is total: it produces a safe value for any input and
//! never panics. Functions that cannot express safety as a defanged value
//! (URL protocol, document id format) signal rejection with `None` instead.

pub mod query_tree;
pub mod scalar;
pub mod url_param;

pub use query_tree::sanitize_query_tree;
pub use scalar::{
    sanitize_email, sanitize_filename, sanitize_header_value, sanitize_html, sanitize_number,
    sanitize_object_id, sanitize_search_query, sanitize_text, sanitize_url,
};
pub use url_param::sanitize_url_param;

/// Truncate to at most `max` characters, allocation only when needed.
pub(crate) fn truncate_chars(input: &str, max: usize) -> String {
    match input.char_indices().nth(max) {
        Some((idx, _)) => input[..idx].to_string(),
        None => input.to_string(),
    }
}

/// Truncate to at most `max` bytes, snapping down to a char boundary.
pub(crate) fn truncate_bytes(input: &str, max: usize) -> &str {
    if input.len() <= max {
        return input;
    }
    let mut end = max;
    while !input.is_char_boundary(end) {
        end -= 1;
    }
    &input[..end]
}
