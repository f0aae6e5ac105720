//! URL parameter sanitization
//!
//! Parameters echoed into pages are a prime XSS vector, and attackers hide
//! payloads behind double or triple percent-encoding to slip past a single
//! decode pass. The pipeline here is decode-to-fixpoint, strip known payload
//! shapes, then entity-escape whatever survives so residue renders as inert
//! text.

use percent_encoding::percent_decode_str;

use super::truncate_chars;
use crate::patterns::{MAX_DECODE_ATTEMPTS, MAX_URL_PARAM_LENGTH, URL_PARAM_PATTERNS};

/// Sanitize a single query-string value for safe echo or rendering.
///
/// Stages, in order: percent-decode until stable (at most 3 passes), strip
/// the XSS pattern list, HTML-entity-escape `& < > " ' /`, cap at 1000
/// chars. Total for any input.
pub fn sanitize_url_param(input: &str) -> String {
    let decoded = decode_to_fixpoint(input);

    let mut stripped = decoded;
    for pattern in URL_PARAM_PATTERNS.iter() {
        stripped = pattern.replace_all(&stripped, "").into_owned();
    }

    truncate_chars(&escape_entities(&stripped), MAX_URL_PARAM_LENGTH)
}

/// Percent-decode repeatedly until the value stops changing or the attempt
/// cap is reached. A decode producing invalid UTF-8 keeps the last good
/// value.
fn decode_to_fixpoint(input: &str) -> String {
    let mut decoded = input.to_string();
    for _ in 0..MAX_DECODE_ATTEMPTS {
        let next = match percent_decode_str(&decoded).decode_utf8() {
            Ok(cow) => cow.into_owned(),
            Err(_) => break,
        };
        if next == decoded {
            break;
        }
        decoded = next;
    }
    decoded
}

/// Escape characters that could re-form markup. Entities produced here are
/// never re-escaped since the mapping runs in a single pass.
fn escape_entities(input: &str) -> String {
    let mut escaped = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#x27;"),
            '/' => escaped.push_str("&#x2F;"),
            other => escaped.push(other),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_value_is_escaped_only() {
        assert_eq!(sanitize_url_param("hello world"), "hello world");
        assert_eq!(sanitize_url_param("a/b"), "a&#x2F;b");
    }

    #[test]
    fn test_single_encoded_script_is_neutralized() {
        let result = sanitize_url_param("%3Cscript%3Ealert(1)%3C%2Fscript%3E");
        assert!(!result.contains('<'));
        assert!(!result.contains("alert("));
    }

    #[test]
    fn test_double_encoded_script_is_neutralized() {
        // %253C decodes to %3C, which decodes to <
        let result = sanitize_url_param("%253Cscript%253Ealert(1)%253C%2Fscript%253E");
        assert!(!result.contains('<'));
        assert!(!result.contains('>'));
        assert!(!result.contains("alert("));
    }

    #[test]
    fn test_triple_encoded_script_is_neutralized() {
        let result = sanitize_url_param("%25253Cscript%25253E");
        assert!(!result.contains('<'));
        assert!(!result.contains("<script"));
    }

    #[test]
    fn test_decode_stops_at_attempt_cap() {
        // Quadruple-encoded: three passes leave one encoding layer, which
        // cannot render as markup
        let quad = "%2525253Cscript%2525253E";
        assert_eq!(sanitize_url_param(quad), "%3Cscript%3E");
    }

    #[test]
    fn test_malformed_escape_keeps_last_good_value() {
        // %FF is not valid UTF-8 after decoding; the raw value is kept
        let result = sanitize_url_param("abc%FFdef");
        assert_eq!(result, "abc%FFdef");
    }

    #[test]
    fn test_protocol_and_call_patterns_stripped() {
        let result = sanitize_url_param("javascript:alert(1)");
        assert!(!result.contains("javascript:"));
        assert!(!result.contains("alert("));

        let result = sanitize_url_param("vbscript:msgbox(1)");
        assert!(!result.contains("vbscript:"));
    }

    #[test]
    fn test_event_handlers_stripped() {
        let result = sanitize_url_param("x onload=evil y onmouseover = evil");
        assert!(!result.contains("onload"));
        assert!(!result.contains("onmouseover"));
    }

    #[test]
    fn test_img_tag_stripped() {
        let result = sanitize_url_param("<img src=x onerror=alert(1)>");
        assert!(!result.contains("img"));
        assert!(!result.contains("src"));
    }

    #[test]
    fn test_quotes_and_slashes_escaped() {
        assert_eq!(sanitize_url_param("\"quoted\""), "&quot;quoted&quot;");
        assert_eq!(sanitize_url_param("it's"), "it&#x27;s");
    }

    #[test]
    fn test_length_cap() {
        let input = "a".repeat(2000);
        assert_eq!(sanitize_url_param(&input).chars().count(), 1000);
    }
}
