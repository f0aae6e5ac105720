//! Scalar sanitizers
//!
//! One pure function per input class. Free-text sanitizers fail open: a
//! dangerous value is neutralized and returned. Format-checked sanitizers
//! (email, URL, document id, number) fail closed with `""` or `None` —
//! callers must treat those as "reject".

use serde_json::Value;
use url::Url;

use super::{truncate_bytes, truncate_chars};
use crate::diagnostics::{self, SecurityEvent};
use crate::patterns::{
    EMAIL_REGEX, EVENT_HANDLER, IFRAME_BLOCK, JS_PROTOCOL, MAX_EMAIL_LENGTH, MAX_FILENAME_LENGTH,
    MAX_HEADER_LENGTH, MAX_SEARCH_LENGTH, MAX_SEARCH_TOKENS, MAX_TEXT_LENGTH, OBJECT_ID_REGEX,
    SCRIPT_BLOCK,
};

/// Remove script/iframe blocks, `javascript:` occurrences, and inline event
/// handlers (including their attribute value). Shared by the text and HTML
/// sanitizers.
///
/// Stripping repeats until the value stops changing, so a payload cannot
/// re-form from the residue of a removed one (`jjavascript:avascript:`,
/// `<scr<script>..</script>ipt>`). Each pass only deletes characters, which
/// bounds the loop by the input length.
fn strip_active_content(input: &str) -> String {
    let mut cleaned = input.to_string();
    loop {
        let next = SCRIPT_BLOCK.replace_all(&cleaned, "");
        let next = IFRAME_BLOCK.replace_all(&next, "");
        let next = JS_PROTOCOL.replace_all(&next, "");
        let next = EVENT_HANDLER.replace_all(&next, "").into_owned();
        if next == cleaned {
            return cleaned;
        }
        cleaned = next;
    }
}

/// Sanitize free text for plain rendering.
///
/// Strips active content, removes remaining tag delimiters, trims, and caps
/// at 10 000 chars. Always returns a value; a fully-hostile input collapses
/// to the empty string.
pub fn sanitize_text(input: &str) -> String {
    let cleaned = strip_active_content(input);
    let cleaned = cleaned.replace(['<', '>'], "");
    // Deleting the delimiters can splice a payload back together
    // (`java<>script:`), so strip once more on the delimiter-free value
    let cleaned = strip_active_content(&cleaned);
    // Trim again after the cap so truncation cannot expose trailing
    // whitespace that a second pass would remove
    let capped = truncate_chars(cleaned.trim(), MAX_TEXT_LENGTH);
    capped.trim_end().to_string()
}

/// Sanitize text that is allowed to keep benign markup.
///
/// Same active-content stripping as [`sanitize_text`] but tag delimiters are
/// preserved, for callers that layer an allow-list filter on top.
pub fn sanitize_html(input: &str) -> String {
    let cleaned = strip_active_content(input);
    let capped = truncate_chars(cleaned.trim(), MAX_TEXT_LENGTH);
    capped.trim_end().to_string()
}

/// Normalize and validate an email address.
///
/// Lowercases, trims, caps at 254 chars (RFC 5321), then applies a
/// conservative format check. Returns `""` on any mismatch.
pub fn sanitize_email(input: &str) -> String {
    let email = truncate_chars(input.trim().to_lowercase().as_str(), MAX_EMAIL_LENGTH);
    if EMAIL_REGEX.is_match(&email) {
        email
    } else {
        String::new()
    }
}

/// Validate a URL, allowing only http/https.
///
/// Returns the canonicalized URL text, or `None` for unparseable URLs,
/// non-web schemes, and anything carrying a literal `javascript:` substring.
pub fn sanitize_url(input: &str) -> Option<String> {
    if input.to_lowercase().contains("javascript:") {
        return None;
    }

    let parsed = Url::parse(input.trim()).ok()?;
    match parsed.scheme() {
        "http" | "https" => Some(parsed.to_string()),
        _ => None,
    }
}

/// Reduce a filename to `[A-Za-z0-9._-]`.
///
/// Other characters become `_`, dot runs collapse to a single dot, leading
/// and trailing dots are stripped, capped at 255 chars. An input that leaves
/// nothing behind yields `"file"`.
pub fn sanitize_filename(input: &str) -> String {
    let mut cleaned = String::with_capacity(input.len());
    let mut previous_dot = false;
    for c in input.chars() {
        let mapped = if c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-') {
            c
        } else {
            '_'
        };
        if mapped == '.' {
            if previous_dot {
                continue;
            }
            previous_dot = true;
        } else {
            previous_dot = false;
        }
        cleaned.push(mapped);
    }

    let result = truncate_chars(cleaned.trim_matches('.'), MAX_FILENAME_LENGTH);
    if result.is_empty() {
        "file".to_string()
    } else {
        result
    }
}

/// Coerce a value to a finite number, optionally clamped into `[min, max]`.
///
/// Accepts numbers and numeric strings; everything else, NaN, and infinities
/// yield `None`.
pub fn sanitize_number(input: &Value, min: Option<f64>, max: Option<f64>) -> Option<f64> {
    let number = match input {
        Value::Number(n) => n.as_f64()?,
        Value::String(s) => s.trim().parse::<f64>().ok()?,
        _ => return None,
    };

    if !number.is_finite() {
        return None;
    }

    let number = match min {
        Some(lower) => number.max(lower),
        None => number,
    };
    let number = match max {
        Some(upper) => number.min(upper),
        None => number,
    };
    Some(number)
}

/// Strip header-injection vectors from a header value.
///
/// Removes CR/LF and all C0 control characters plus DEL, then caps at
/// 8192 bytes.
pub fn sanitize_header_value(input: &str) -> String {
    let cleaned: String = input.chars().filter(|c| !c.is_ascii_control()).collect();
    truncate_bytes(&cleaned, MAX_HEADER_LENGTH).to_string()
}

/// Validate a document identifier: exactly 24 hex digits.
///
/// Returns the lowercased id, or `None` on any mismatch. This sanitizer
/// fails closed; a `None` means the request must be rejected.
pub fn sanitize_object_id(input: &str) -> Option<String> {
    let trimmed = input.trim();
    if OBJECT_ID_REGEX.is_match(trimmed) {
        Some(trimmed.to_lowercase())
    } else {
        diagnostics::emit(SecurityEvent::InvalidObjectId {
            input: input.to_string(),
        });
        None
    }
}

/// Prepare a free-text search term for use in a regex-backed filter.
///
/// Escapes regex metacharacters, drops tag delimiters, trims, caps at 100
/// chars, then keeps at most the first 10 whitespace-separated tokens.
pub fn sanitize_search_query(input: &str) -> String {
    let mut escaped = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '.' | '*' | '+' | '?' | '^' | '$' | '{' | '}' | '(' | ')' | '|' | '[' | ']'
            | '\\' => {
                escaped.push('\\');
                escaped.push(c);
            }
            '<' | '>' => {}
            _ => escaped.push(c),
        }
    }

    let mut capped = truncate_chars(escaped.trim(), MAX_SEARCH_LENGTH);
    // The cap must not split an escape pair and leave a dangling backslash
    if capped.chars().rev().take_while(|&c| c == '\\').count() % 2 == 1 {
        capped.pop();
    }
    capped
        .split_whitespace()
        .take(MAX_SEARCH_TOKENS)
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_text_passes_plain_input_through() {
        let input = "an ordinary comment body";
        assert_eq!(sanitize_text(input), input);
    }

    #[test]
    fn test_text_removes_script_blocks() {
        let result = sanitize_text("<script>alert(\"XSS\")</script>rest");
        assert_eq!(result, "rest");
    }

    #[test]
    fn test_text_removes_event_handlers_with_value() {
        let result = sanitize_text("<img src=x onerror=\"alert(1)\">caption");
        assert!(!result.contains("onerror"));
        assert!(!result.contains("alert"));
        assert!(result.contains("caption"));
    }

    #[test]
    fn test_text_strips_javascript_protocol() {
        let result = sanitize_text("<a href=\"javascript:alert(1)\">link</a>");
        assert!(!result.contains("javascript:"));
    }

    #[test]
    fn test_text_strips_tag_delimiters() {
        assert_eq!(sanitize_text("<div>text</div>"), "divtext/div");
    }

    #[test]
    fn test_text_strips_protocol_reassembled_from_residue() {
        // Removing the inner "javascript:" splices the outer one together
        assert_eq!(sanitize_text("jjavascript:avascript:"), "");
        // Removing the delimiters splices the protocol together
        assert_eq!(sanitize_text("java<>script:alert"), "alert");
        // Same splice for an event handler
        assert_eq!(sanitize_text("o<>nclick=alert(1)"), "");
    }

    #[test]
    fn test_html_strips_script_block_reassembled_from_residue() {
        let result = sanitize_html("<scr<script>x</script>ipt>alert(1)</script>");
        assert_eq!(result, "");
    }

    #[test]
    fn test_sanitization_is_idempotent_on_reassembling_payloads() {
        let payloads = [
            "jjavascript:avascript:",
            "java<>script:x",
            "<scr<script>a</script>ipt>b</script>",
            "o<>nclick=alert(1)",
        ];
        for input in payloads {
            let once = sanitize_text(input);
            assert_eq!(sanitize_text(&once), once, "text not stable for {input:?}");
            let once = sanitize_html(input);
            assert_eq!(sanitize_html(&once), once, "html not stable for {input:?}");
        }
    }

    #[test]
    fn test_text_caps_length() {
        let input = "a".repeat(15_000);
        assert_eq!(sanitize_text(&input).len(), 10_000);
    }

    #[test]
    fn test_html_keeps_benign_markup() {
        let result = sanitize_html("<b>bold</b> and <i>italic</i>");
        assert_eq!(result, "<b>bold</b> and <i>italic</i>");
    }

    #[test]
    fn test_html_still_removes_dangerous_blocks() {
        let result = sanitize_html("<iframe src=\"evil\"></iframe><b>ok</b>");
        assert_eq!(result, "<b>ok</b>");
    }

    #[test]
    fn test_email_normalizes_case_and_whitespace() {
        assert_eq!(sanitize_email("  USER@EXAMPLE.COM "), "user@example.com");
    }

    #[test]
    fn test_email_fails_closed() {
        for input in ["not-an-email", "@example.com", "user@", "user@.com", ""] {
            assert_eq!(sanitize_email(input), "", "should reject: {input}");
        }
    }

    #[test]
    fn test_url_allows_web_schemes_only() {
        assert_eq!(
            sanitize_url("http://example.com"),
            Some("http://example.com/".to_string())
        );
        assert_eq!(
            sanitize_url("https://example.com/path"),
            Some("https://example.com/path".to_string())
        );
        assert_eq!(sanitize_url("ftp://example.com"), None);
        assert_eq!(sanitize_url("javascript:alert(1)"), None);
        assert_eq!(sanitize_url("not-a-url"), None);
    }

    #[test]
    fn test_filename_keeps_safe_chars() {
        assert_eq!(sanitize_filename("test-file_123.txt"), "test-file_123.txt");
    }

    #[test]
    fn test_filename_replaces_special_chars() {
        assert_eq!(sanitize_filename("file@#$%^&*.txt"), "file_______.txt");
    }

    #[test]
    fn test_filename_collapses_dot_runs() {
        assert_eq!(sanitize_filename("file...txt"), "file.txt");
        assert_eq!(sanitize_filename("..hidden.."), "hidden");
    }

    #[test]
    fn test_filename_falls_back_on_empty() {
        assert_eq!(sanitize_filename(""), "file");
        assert_eq!(sanitize_filename("..."), "file");
    }

    #[test]
    fn test_number_coercion() {
        assert_eq!(sanitize_number(&json!("123"), None, None), Some(123.0));
        assert_eq!(sanitize_number(&json!(456), None, None), Some(456.0));
        assert_eq!(sanitize_number(&json!("78.9"), None, None), Some(78.9));
    }

    #[test]
    fn test_number_clamping() {
        assert_eq!(sanitize_number(&json!(5), Some(10.0), Some(100.0)), Some(10.0));
        assert_eq!(
            sanitize_number(&json!(150), Some(10.0), Some(100.0)),
            Some(100.0)
        );
        assert_eq!(
            sanitize_number(&json!(50), Some(10.0), Some(100.0)),
            Some(50.0)
        );
    }

    #[test]
    fn test_number_rejects_non_numeric() {
        assert_eq!(sanitize_number(&json!("abc"), None, None), None);
        assert_eq!(sanitize_number(&json!("inf"), None, None), None);
        assert_eq!(sanitize_number(&json!(null), None, None), None);
        assert_eq!(sanitize_number(&json!(true), None, None), None);
        assert_eq!(sanitize_number(&json!({"a": 1}), None, None), None);
    }

    #[test]
    fn test_header_strips_crlf_and_controls() {
        let result = sanitize_header_value("value\r\nSet-Cookie: evil\x00\x1b");
        assert!(!result.contains('\r'));
        assert!(!result.contains('\n'));
        assert!(!result.contains('\x00'));
        assert!(!result.contains('\x1b'));
        assert!(result.contains("Set-Cookie: evil"));
    }

    #[test]
    fn test_header_caps_length() {
        let input = "h".repeat(10_000);
        assert_eq!(sanitize_header_value(&input).len(), 8192);
    }

    #[test]
    fn test_object_id_round_trip() {
        let id = "507F1F77BCF86CD799439011";
        assert_eq!(
            sanitize_object_id(id),
            Some("507f1f77bcf86cd799439011".to_string())
        );
        assert_eq!(
            sanitize_object_id("  507f1f77bcf86cd799439011  "),
            Some("507f1f77bcf86cd799439011".to_string())
        );
    }

    #[test]
    fn test_object_id_fails_closed() {
        assert_eq!(sanitize_object_id("not-an-id"), None);
        assert_eq!(sanitize_object_id("507f1f77bcf86cd79943901"), None); // 23 chars
        assert_eq!(sanitize_object_id("507f1f77bcf86cd7994390111"), None); // 25 chars
        assert_eq!(sanitize_object_id("507f1f77bcf86cd79943901g"), None); // non-hex
        assert_eq!(sanitize_object_id(""), None);
    }

    #[test]
    fn test_search_query_escapes_metacharacters() {
        assert_eq!(sanitize_search_query("a.b*c?d"), "a\\.b\\*c\\?d");
    }

    #[test]
    fn test_search_query_drops_tag_delimiters() {
        assert_eq!(sanitize_search_query("<b>word</b>"), "bword/b");
    }

    #[test]
    fn test_search_query_token_cap() {
        let query = "one two three four five six seven eight nine ten eleven twelve";
        let result = sanitize_search_query(query);
        assert_eq!(result.split(' ').count(), 10);
        assert!(!result.contains("eleven"));
    }

    #[test]
    fn test_search_query_length_cap_applies_before_tokenizing() {
        let query = format!("a.b*c?d {}", "x".repeat(200));
        let result = sanitize_search_query(&query);
        assert!(result.len() <= 100);
        assert!(result.starts_with("a\\.b\\*c\\?d"));
    }

    #[test]
    fn test_search_query_cap_never_strands_a_backslash() {
        // 99 plain chars plus one escaped metacharacter lands the cap
        // between the backslash and the dot
        let query = format!("{}.", "a".repeat(99));
        let result = sanitize_search_query(&query);
        assert!(!result.ends_with('\\'));
        assert_eq!(result, "a".repeat(99));
    }
}
