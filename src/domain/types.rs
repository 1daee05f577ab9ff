//! Strongly-typed value objects shared by domain entities.
//!
//! These wrappers enforce basic invariants (normalized email, E.164 phone,
//! sanitized free text) so that once a value reaches the domain layer it can
//! be treated as trusted.
use std::fmt::{Display, Formatter};

use phonenumber::{Mode, parse};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use validator::ValidateEmail;

/// Errors produced when attempting to construct a constrained value object.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TypeConstraintError {
    /// Provided email failed format validation.
    #[error("invalid email address")]
    InvalidEmail,
    /// Provided string contained no non-whitespace characters.
    #[error("value cannot be empty")]
    EmptyString,
    /// Provided value failed custom validation.
    #[error("invalid value: {0}")]
    InvalidValue(String),
    /// Phone number did not meet expected format.
    #[error("invalid phone number")]
    InvalidPhone,
}

/// Rounds a monetary amount to two decimal places.
///
/// All order math in the system runs on `f64` and rounds at the boundaries,
/// matching how totals are displayed on invoices.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Normalizes and validates an email string.
pub fn normalize_email<S: Into<String>>(email: S) -> Result<String, TypeConstraintError> {
    let normalized = email.into().trim().to_lowercase();
    if normalized.validate_email() {
        Ok(normalized)
    } else {
        Err(TypeConstraintError::InvalidEmail)
    }
}

/// Wrapper for non-empty, trimmed strings.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct NonEmptyString(String);

impl NonEmptyString {
    /// Trims whitespace and rejects empty inputs.
    pub fn new<S: Into<String>>(value: S) -> Result<Self, TypeConstraintError> {
        let trimmed = value.into().trim().to_string();
        if trimmed.is_empty() {
            return Err(TypeConstraintError::EmptyString);
        }
        Ok(Self(trimmed))
    }

    /// Borrow the inner string.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consume the wrapper returning the owned string.
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl Display for NonEmptyString {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<String> for NonEmptyString {
    type Error = TypeConstraintError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl TryFrom<&str> for NonEmptyString {
    type Error = TypeConstraintError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<NonEmptyString> for String {
    fn from(value: NonEmptyString) -> Self {
        value.0
    }
}

/// Normalizes a phone number string to E.164 format.
///
/// Ten-digit numbers are assumed to be Indian and get the 91 country code,
/// matching how customer numbers arrive from the booking desk.
pub fn normalize_phone_to_e164(value: &str) -> Result<String, TypeConstraintError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(TypeConstraintError::EmptyString);
    }
    let digits: String = trimmed.chars().filter(|c| c.is_ascii_digit()).collect();
    let candidate = if digits.len() == 10 {
        format!("+91{digits}")
    } else if trimmed.starts_with('+') {
        trimmed.to_string()
    } else {
        format!("+{digits}")
    };
    let parsed = parse(None, &candidate).map_err(|_| TypeConstraintError::InvalidPhone)?;
    Ok(parsed.format().mode(Mode::E164).to_string())
}

/// Normalized phone number wrapper (E.164).
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct PhoneNumber(String);

impl PhoneNumber {
    /// Constructs a phone number ensuring it is valid and normalized.
    pub fn new<S: Into<String>>(value: S) -> Result<Self, TypeConstraintError> {
        let normalized = normalize_phone_to_e164(&value.into())?;
        Ok(Self(normalized))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }

    /// Digits-only rendering used by the WhatsApp gateway.
    pub fn digits(&self) -> String {
        self.0.chars().filter(|c| c.is_ascii_digit()).collect()
    }
}

impl Display for PhoneNumber {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<String> for PhoneNumber {
    type Error = TypeConstraintError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl TryFrom<&str> for PhoneNumber {
    type Error = TypeConstraintError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<PhoneNumber> for String {
    fn from(value: PhoneNumber) -> Self {
        value.0
    }
}

/// Free-text note sanitized of any markup before it reaches storage.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct SanitizedNote(String);

impl SanitizedNote {
    /// Strips markup, trims, and rejects empty results.
    pub fn new<S: Into<String>>(value: S) -> Result<Self, TypeConstraintError> {
        let cleaned = ammonia::clean(&value.into());
        let inner = NonEmptyString::new(cleaned)?;
        Ok(Self(inner.into_inner()))
    }

    /// Sanitizes an optional note, dropping values that clean down to nothing.
    pub fn from_optional(value: Option<String>) -> Option<Self> {
        value.and_then(|v| Self::new(v).ok())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl Display for SanitizedNote {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<String> for SanitizedNote {
    type Error = TypeConstraintError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round2_rounds_to_cents() {
        assert_eq!(round2(10.006), 10.01);
        assert_eq!(round2(10.004), 10.0);
        assert_eq!(round2(0.1 + 0.2), 0.3);
    }

    #[test]
    fn normalize_email_lowercases_and_trims() {
        assert_eq!(
            normalize_email("  User@Example.COM ").unwrap(),
            "user@example.com"
        );
        assert!(normalize_email("not-an-email").is_err());
    }

    #[test]
    fn phone_assumes_india_for_ten_digits() {
        assert_eq!(PhoneNumber::new("9725295692").unwrap().as_str(), "+919725295692");
        assert_eq!(
            PhoneNumber::new("+91 97252 95692").unwrap().as_str(),
            "+919725295692"
        );
    }

    #[test]
    fn phone_digits_strips_plus() {
        let phone = PhoneNumber::new("9725295692").unwrap();
        assert_eq!(phone.digits(), "919725295692");
    }

    #[test]
    fn sanitized_note_strips_markup() {
        let note = SanitizedNote::new("<script>alert(1)</script>handle with care").unwrap();
        assert_eq!(note.as_str(), "handle with care");
        assert!(SanitizedNote::new("<script>alert(1)</script>").is_err());
    }
}
