//! ISBN-13 generation and validation.
//!
//! Generated codes use the `978` registration prefix followed by nine random
//! digits and the EAN-13 weighted check digit. Validation never errors on
//! malformed input; `validate_format` reports the first failing rule so the
//! API layer can surface a single diagnostic.

use rand::Rng;
use thiserror::Error;

/// Fixed registration prefix for all generated codes
pub const ISBN_PREFIX: &str = "978";

/// Total length of an ISBN-13 string
pub const ISBN_LENGTH: usize = 13;

const CHECK_DIGIT_POSITION: usize = 12;

/// Errors from check-digit computation. These indicate a caller bug
/// (the public validation entry points never return them).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum IsbnError {
    #[error("check digit requires exactly {CHECK_DIGIT_POSITION} digits, got {got}")]
    InvalidLength { got: usize },

    #[error("check digit input must be decimal digits, found {0:?}")]
    InvalidDigit(char),
}

/// Outcome of `validate_format`: a validity flag and a user-facing message
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IsbnValidation {
    pub valid: bool,
    pub message: String,
}

impl IsbnValidation {
    fn invalid(message: impl Into<String>) -> Self {
        Self {
            valid: false,
            message: message.into(),
        }
    }
}

/// Generate a syntactically valid ISBN-13: `978` + 9 random digits + check digit.
///
/// Uses the thread-local CSPRNG. The result is not checked for uniqueness
/// against the catalog; see `services::books::issue_unique_isbn`.
pub fn generate() -> String {
    let mut rng = rand::thread_rng();

    let mut isbn12 = String::with_capacity(ISBN_LENGTH);
    isbn12.push_str(ISBN_PREFIX);
    for _ in 0..CHECK_DIGIT_POSITION - ISBN_PREFIX.len() {
        isbn12.push(char::from(b'0' + rng.gen_range(0..10u8)));
    }

    let check_digit =
        compute_check_digit(&isbn12).expect("isbn12 is 12 digits by construction");

    isbn12.push(char::from(b'0' + check_digit));
    isbn12
}

/// Compute the EAN-13 check digit over the first 12 digits.
///
/// Digits at even index weigh 1, odd index weigh 3; the check digit is
/// `(10 - sum % 10) % 10`. The outer modulo folds a raw result of 10 to 0.
pub fn compute_check_digit(isbn12: &str) -> Result<u8, IsbnError> {
    if isbn12.chars().count() != CHECK_DIGIT_POSITION {
        return Err(IsbnError::InvalidLength {
            got: isbn12.chars().count(),
        });
    }

    let mut sum = 0u32;
    for (i, c) in isbn12.chars().enumerate() {
        let digit = c.to_digit(10).ok_or(IsbnError::InvalidDigit(c))?;
        let weight = if i % 2 == 0 { 1 } else { 3 };
        sum += digit * weight;
    }

    Ok(((10 - sum % 10) % 10) as u8)
}

/// Check whether a complete 13-character string carries the correct check digit.
///
/// Total over arbitrary input: anything malformed is simply `false`.
pub fn is_valid(isbn: &str) -> bool {
    if isbn.chars().count() != ISBN_LENGTH || !isbn.chars().all(|c| c.is_ascii_digit()) {
        return false;
    }

    let (isbn12, provided) = isbn.split_at(CHECK_DIGIT_POSITION);
    let provided_digit = provided.chars().next().and_then(|c| c.to_digit(10));

    match (compute_check_digit(isbn12), provided_digit) {
        (Ok(computed), Some(given)) => u32::from(computed) == given,
        _ => false,
    }
}

/// Classify an ISBN string, stopping at the first failing rule.
///
/// Check order is part of the API contract: a blank string reports "blank",
/// never "wrong length". Messages are surfaced verbatim to clients.
pub fn validate_format(isbn: Option<&str>) -> IsbnValidation {
    let Some(s) = isbn else {
        return IsbnValidation::invalid("ISBN cannot be null");
    };
    if s.trim().is_empty() {
        return IsbnValidation::invalid("ISBN cannot be blank");
    }
    let len = s.chars().count();
    if len != ISBN_LENGTH {
        return IsbnValidation::invalid(format!(
            "ISBN must be exactly {ISBN_LENGTH} digits, got {len}"
        ));
    }
    if !s.chars().all(|c| c.is_ascii_digit()) {
        return IsbnValidation::invalid("ISBN must contain only digits");
    }
    if !s.starts_with(ISBN_PREFIX) {
        return IsbnValidation::invalid(format!("ISBN must start with {ISBN_PREFIX}"));
    }
    if !is_valid(s) {
        return IsbnValidation::invalid("Invalid check digit");
    }

    IsbnValidation {
        valid: true,
        message: "Valid ISBN".to_string(),
    }
}
