//! Password strength validation
//!
//! Pure requirement checks and a coarse strength score. Hashing and storage
//! are the caller's concern; this module only answers "is this password
//! acceptable and roughly how strong is it".

use serde::Serialize;

/// Minimum accepted password length
pub const MIN_PASSWORD_LENGTH: usize = 8;

/// Maximum accepted password length
pub const MAX_PASSWORD_LENGTH: usize = 128;

/// Well-known passwords rejected outright (compared lowercased)
const COMMON_PASSWORDS: &[&str] = &[
    "password",
    "password123",
    "123456",
    "123456789",
    "qwerty",
    "abc123",
    "monkey",
    "1234567",
    "letmein",
    "trustno1",
    "dragon",
    "baseball",
    "iloveyou",
    "master",
    "sunshine",
    "ashley",
    "bailey",
    "passw0rd",
    "shadow",
    "123123",
    "654321",
    "superman",
    "qazwsx",
    "admin",
    "welcome",
];

/// Runs of these (any 3 consecutive chars, case-insensitive) count as a
/// sequential pattern
const SEQUENCES: &[&str] = &[
    "abcdefghijklmnopqrstuvwxyz",
    "0123456789",
    "qwertyuiop",
    "asdfghjkl",
    "zxcvbnm",
];

/// Coarse strength score, ordered weakest to strongest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PasswordStrength {
    VeryWeak,
    Weak,
    Fair,
    Strong,
    VeryStrong,
}

/// Result of validating one password.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PasswordValidation {
    /// True iff no requirement failed and the score is at least `Fair`.
    pub is_valid: bool,
    pub score: PasswordStrength,
    /// One message per failed requirement.
    pub errors: Vec<String>,
}

/// Check a password against the requirement set and score its strength.
pub fn validate_password(password: &str) -> PasswordValidation {
    let mut errors = Vec::new();
    let length = password.chars().count();

    if length < MIN_PASSWORD_LENGTH {
        errors.push(format!(
            "password must be at least {MIN_PASSWORD_LENGTH} characters long"
        ));
    }
    if length > MAX_PASSWORD_LENGTH {
        errors.push(format!(
            "password must be at most {MAX_PASSWORD_LENGTH} characters long"
        ));
    }
    if !password.chars().any(|c| c.is_ascii_uppercase()) {
        errors.push("password must contain an uppercase letter".to_string());
    }
    if !password.chars().any(|c| c.is_ascii_lowercase()) {
        errors.push("password must contain a lowercase letter".to_string());
    }
    if !password.chars().any(|c| c.is_ascii_digit()) {
        errors.push("password must contain a digit".to_string());
    }
    if !password.chars().any(|c| c.is_ascii_punctuation()) {
        errors.push("password must contain a special character".to_string());
    }
    if COMMON_PASSWORDS.contains(&password.to_lowercase().as_str()) {
        errors.push("password is too common".to_string());
    }
    if has_sequential_chars(password) {
        errors.push("password must not contain sequential characters".to_string());
    }
    if has_repeating_chars(password) {
        errors.push("password must not repeat the same character three times".to_string());
    }

    let score = strength_score(password);
    PasswordValidation {
        is_valid: errors.is_empty() && score >= PasswordStrength::Fair,
        score,
        errors,
    }
}

/// Any 3-char window drawn from a known sequence (alphabet, digits,
/// keyboard rows), case-insensitive.
fn has_sequential_chars(password: &str) -> bool {
    let lowered: Vec<char> = password.to_lowercase().chars().collect();
    lowered.windows(3).any(|window| {
        let needle: String = window.iter().collect();
        SEQUENCES.iter().any(|seq| seq.contains(&needle))
    })
}

/// The same character 3+ times in a row.
fn has_repeating_chars(password: &str) -> bool {
    let chars: Vec<char> = password.chars().collect();
    chars
        .windows(3)
        .any(|window| window[0] == window[1] && window[1] == window[2])
}

/// Score from length and character-class coverage, capped at `VeryStrong`.
fn strength_score(password: &str) -> PasswordStrength {
    let length = password.chars().count();
    let mut score = 0u8;

    if length >= 12 {
        score += 1;
    }
    if length >= 16 {
        score += 1;
    }
    if password.chars().any(|c| c.is_ascii_lowercase())
        && password.chars().any(|c| c.is_ascii_uppercase())
    {
        score += 1;
    }
    if password.chars().any(|c| c.is_ascii_digit()) {
        score += 1;
    }
    if password.chars().any(|c| c.is_ascii_punctuation()) {
        score += 1;
    }

    match score {
        0 => PasswordStrength::VeryWeak,
        1 => PasswordStrength::Weak,
        2 => PasswordStrength::Fair,
        3 => PasswordStrength::Strong,
        _ => PasswordStrength::VeryStrong,
    }
}
