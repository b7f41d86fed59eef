//! Short code generation and validation utilities.
//!
//! Generated codes are drawn uniformly from an alphabet with visually
//! ambiguous characters removed, so codes survive being read aloud or
//! retyped from print.

use crate::error::AppError;
use rand::Rng;
use regex::Regex;
use serde_json::json;
use std::sync::LazyLock;

/// ASCII alphanumerics minus the near-homoglyphs 0, O, l, I and 1.
///
/// 57 symbols; at the default length of 6 that is 57^6 ≈ 34 billion
/// combinations.
pub const SAFE_ALPHABET: &[u8] = b"abcdefghijkmnopqrstuvwxyzABCDEFGHJKLMNPQRSTUVWXYZ23456789";

/// Hard ceiling for collision-driven length expansion.
///
/// The generator widens the code by one character after exhausting its
/// attempt budget at the current length; at 12 characters the keyspace is
/// large enough that reaching this ceiling indicates a store problem, not
/// bad luck.
pub const MAX_CODE_LENGTH: usize = 12;

/// Attempts per length before the generator expands the code by one
/// character.
pub const MAX_ATTEMPTS_PER_LENGTH: usize = 10;

/// Compiled pattern for user-supplied custom codes.
static CUSTOM_CODE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9-]{3,20}$").expect("static pattern compiles"));

/// Generates a uniformly random short code of the given length from
/// [`SAFE_ALPHABET`].
pub fn generate_code(length: usize) -> String {
    let mut rng = rand::rng();
    (0..length)
        .map(|_| SAFE_ALPHABET[rng.random_range(0..SAFE_ALPHABET.len())] as char)
        .collect()
}

/// Validates a user-provided custom short code.
///
/// # Rules
///
/// - Length: 3-20 characters
/// - Allowed characters: ASCII letters, digits, hyphens
///
/// Custom codes bypass generation but not validation; uniqueness is checked
/// separately and surfaces as a Conflict, not a Validation error.
///
/// # Errors
///
/// Returns [`AppError::Validation`] if the pattern does not match.
pub fn validate_custom_code(code: &str) -> Result<(), AppError> {
    if !CUSTOM_CODE_REGEX.is_match(code) {
        return Err(AppError::bad_request(
            "Custom code must be 3-20 characters: letters, digits and hyphen only",
            json!({ "code": code }),
        ));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_alphabet_excludes_ambiguous_characters() {
        for forbidden in [b'0', b'O', b'l', b'I', b'1'] {
            assert!(
                !SAFE_ALPHABET.contains(&forbidden),
                "alphabet must not contain {:?}",
                forbidden as char
            );
        }
        assert_eq!(SAFE_ALPHABET.len(), 57);
    }

    #[test]
    fn test_generate_code_has_requested_length() {
        for length in [3, 6, 12] {
            assert_eq!(generate_code(length).len(), length);
        }
    }

    #[test]
    fn test_generate_code_uses_safe_alphabet_only() {
        let code = generate_code(64);
        assert!(code.bytes().all(|b| SAFE_ALPHABET.contains(&b)));
    }

    #[test]
    fn test_generate_code_produces_distinct_codes() {
        let mut codes = HashSet::new();

        for _ in 0..1000 {
            codes.insert(generate_code(6));
        }

        assert_eq!(codes.len(), 1000);
    }

    #[test]
    fn test_validate_accepts_valid_codes() {
        assert!(validate_custom_code("abc").is_ok());
        assert!(validate_custom_code("my-link-2024").is_ok());
        assert!(validate_custom_code("PROMO").is_ok());
        assert!(validate_custom_code("a".repeat(20).as_str()).is_ok());
    }

    #[test]
    fn test_validate_rejects_bad_lengths() {
        assert!(validate_custom_code("ab").is_err());
        assert!(validate_custom_code(&"a".repeat(21)).is_err());
        assert!(validate_custom_code("").is_err());
    }

    #[test]
    fn test_validate_rejects_bad_characters() {
        assert!(validate_custom_code("my code").is_err());
        assert!(validate_custom_code("my_code").is_err());
        assert!(validate_custom_code("code@123").is_err());
        assert!(validate_custom_code("кодъ").is_err());
    }
}
