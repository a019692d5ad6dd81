//! Non-negative money amounts with two decimal places.

use super::TaskDomainError;
use serde::{Deserialize, Serialize};
use std::fmt;

const MINOR_PER_MAJOR: u64 = 100;

/// Money amount held as integer minor units (hundredths).
///
/// Text form drops trailing zero decimals, so `1500.00` renders as `1500`
/// and `12.50` as `12.5`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Amount(u64);

impl Amount {
    /// The zero amount.
    pub const ZERO: Self = Self(0);

    /// Creates an amount from minor units.
    #[must_use]
    pub const fn from_minor_units(minor: u64) -> Self {
        Self(minor)
    }

    /// Returns the amount in minor units.
    #[must_use]
    pub const fn minor_units(self) -> u64 {
        self.0
    }

    /// Parses decimal text such as `1500`, `12.5`, or `0.75`.
    ///
    /// Returns `None` for negative values, more than two decimal places,
    /// non-numeric text, or values that overflow.
    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        let trimmed = raw.trim();
        let (whole, fraction) = trimmed.split_once('.').unwrap_or((trimmed, ""));
        let is_digits = |part: &str| part.bytes().all(|byte| byte.is_ascii_digit());
        if whole.is_empty() || !is_digits(whole) || fraction.len() > 2 || !is_digits(fraction) {
            return None;
        }

        let major: u64 = whole.parse().ok()?;
        let minor: u64 = format!("{fraction:0<2}").parse().ok()?;
        major
            .checked_mul(MINOR_PER_MAJOR)
            .and_then(|units| units.checked_add(minor))
            .map(Self)
    }

    /// Adds two amounts.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::AmountOverflow`] when the sum does not fit.
    pub fn checked_add(self, other: Self) -> Result<Self, TaskDomainError> {
        self.0
            .checked_add(other.0)
            .map(Self)
            .ok_or(TaskDomainError::AmountOverflow)
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let major = self.0.div_euclid(MINOR_PER_MAJOR);
        let minor = self.0.rem_euclid(MINOR_PER_MAJOR);
        if minor == 0 {
            write!(f, "{major}")
        } else if minor.rem_euclid(10) == 0 {
            write!(f, "{major}.{}", minor.div_euclid(10))
        } else {
            write!(f, "{major}.{minor:02}")
        }
    }
}
