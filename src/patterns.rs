//! Process-wide pattern tables and limits
//!
//! Every regex used by the sanitizers is compiled once on first use and
//! shared across threads. Nothing in this module is mutable at runtime.

use once_cell::sync::Lazy;
use regex::Regex;

/// Maximum length for free-text fields (chars)
pub const MAX_TEXT_LENGTH: usize = 10_000;

/// Maximum email length per RFC 5321 (chars)
pub const MAX_EMAIL_LENGTH: usize = 254;

/// Maximum filename length (chars)
pub const MAX_FILENAME_LENGTH: usize = 255;

/// Maximum HTTP header value length (bytes)
pub const MAX_HEADER_LENGTH: usize = 8192;

/// Maximum search query length before tokenization (chars)
pub const MAX_SEARCH_LENGTH: usize = 100;

/// Maximum number of search tokens kept
pub const MAX_SEARCH_TOKENS: usize = 10;

/// Maximum URL parameter length after sanitization (chars)
pub const MAX_URL_PARAM_LENGTH: usize = 1000;

/// Maximum length for string leaves inside a query tree (chars)
pub const MAX_QUERY_STRING_LENGTH: usize = 500;

/// Percent-decode passes before giving up on multi-encoded payloads
pub const MAX_DECODE_ATTEMPTS: usize = 3;

/// Number of random bytes in a CSP nonce
pub const NONCE_BYTES: usize = 16;

/// Cached regex for `<script>...</script>` blocks (non-greedy, spans newlines)
pub(crate) static SCRIPT_BLOCK: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?is)<script[^>]*>.*?</script>").expect("Invalid script regex"));

/// Cached regex for `<iframe>...</iframe>` blocks
pub(crate) static IFRAME_BLOCK: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?is)<iframe[^>]*>.*?</iframe>").expect("Invalid iframe regex"));

/// Cached regex for inline event handlers together with their value
/// (`onerror="alert(1)"`, `onclick=go()`)
pub(crate) static EVENT_HANDLER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"(?i)\bon\w+\s*=\s*("[^"]*"|'[^']*'|[^\s>]*)"#)
        .expect("Invalid event handler regex")
});

/// Cached regex for `javascript:` protocol occurrences
pub(crate) static JS_PROTOCOL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)javascript:").expect("Invalid protocol regex"));

/// Conservative email format check, applied after lowercasing and trimming
pub(crate) static EMAIL_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$").expect("Invalid email regex")
});

/// Document identifier format: exactly 24 hex digits
pub(crate) static OBJECT_ID_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[0-9a-fA-F]{24}$").expect("Invalid object id regex"));

/// XSS payload patterns stripped from URL parameters, applied in order
/// after percent-decoding
pub(crate) static URL_PARAM_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    [
        r"(?is)<script[^>]*>.*?</script>",
        r"(?is)<iframe[^>]*>.*?</iframe>",
        r"(?is)<object[^>]*>.*?</object>",
        r"(?i)<embed[^>]*>",
        r"(?is)<applet[^>]*>.*?</applet>",
        r"(?i)javascript:",
        r"(?i)vbscript:",
        r"(?i)on\w+\s*=",
        r"(?is)<img[^>]*src[^>]*>",
        r"(?i)eval\s*\(",
        r"(?i)expression\s*\(",
        r"(?i)alert\s*\(",
        r"(?i)confirm\s*\(",
        r"(?i)prompt\s*\(",
    ]
    .iter()
    .map(|p| Regex::new(p).expect("Invalid URL param regex"))
    .collect()
});

/// Boolean-injection and stacked-statement idioms that defang a query
/// string leaf to the empty string
pub(crate) static INJECTION_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    [
        r#"(?i)\b(OR|AND)\b\s+['"]*\d+['"]*\s*=\s*['"]*\d+"#,
        r#"(?i)\b(OR|AND)\b\s+['"]*\w+['"]*\s*=\s*['"]*\w+"#,
        r"(?i);\s*(DROP|DELETE|UPDATE|INSERT|ALTER)\s+",
        r"(?i)(--|/\*|\*/|xp_|sp_|0x)",
    ]
    .iter()
    .map(|p| Regex::new(p).expect("Invalid injection regex"))
    .collect()
});

/// Map keys dropped from query trees regardless of position: document-store
/// operators that execute code or alter matching, plus prototype-pollution
/// key names. Keys starting with `$` are dropped independently of this list.
pub const DANGEROUS_KEYS: &[&str] = &[
    "$where",
    "$regex",
    "$options",
    "$expr",
    "$jsonSchema",
    "$function",
    "__proto__",
    "constructor",
    "prototype",
];

/// Check a map key against the banned set
pub fn is_dangerous_key(key: &str) -> bool {
    key.starts_with('$') || DANGEROUS_KEYS.contains(&key)
}
