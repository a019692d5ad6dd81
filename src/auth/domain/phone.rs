//! Validated phone number used as the sign-in identifier.

use super::AuthDomainError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Phone number in canonical form: optional `+` followed by digits.
///
/// Spaces, dashes, and parentheses are stripped on input.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PhoneNumber(String);

impl PhoneNumber {
    const MIN_DIGITS: usize = 7;
    const MAX_DIGITS: usize = 15;

    /// Creates a validated phone number.
    ///
    /// # Errors
    ///
    /// Returns [`AuthDomainError::InvalidPhoneNumber`] when the value has
    /// characters other than digits and separators, a misplaced `+`, or a
    /// digit count outside 7..=15.
    pub fn new(value: impl Into<String>) -> Result<Self, AuthDomainError> {
        let raw = value.into();
        let compact: String = raw
            .trim()
            .chars()
            .filter(|ch| !matches!(ch, ' ' | '-' | '(' | ')'))
            .collect();
        let digits = compact.strip_prefix('+').unwrap_or(&compact);
        let is_valid = digits.chars().all(|ch| ch.is_ascii_digit())
            && (Self::MIN_DIGITS..=Self::MAX_DIGITS).contains(&digits.len());

        if !is_valid {
            return Err(AuthDomainError::InvalidPhoneNumber(raw));
        }
        Ok(Self(compact))
    }

    /// Returns the phone number as `str`.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for PhoneNumber {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for PhoneNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
