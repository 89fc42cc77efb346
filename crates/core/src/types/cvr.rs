//! Danish CVR business registration number.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Errors that can occur when parsing a [`Cvr`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum CvrError {
    /// The input is empty after trimming.
    #[error("CVR number cannot be empty")]
    Empty,
    /// The input is not exactly eight digits long.
    #[error("CVR number must be exactly {expected} digits")]
    WrongLength {
        /// Required digit count.
        expected: usize,
    },
    /// The input contains a non-digit character.
    #[error("CVR number may only contain digits")]
    NonDigit,
    /// CVR numbers are never issued with a leading zero.
    #[error("CVR number cannot start with 0")]
    LeadingZero,
}

/// A CVR number from the Danish central business registry.
///
/// Field-level validation only checks the format (eight digits, no leading
/// zero); whether the number is actually registered, and its uniqueness
/// among shops, is enforced by the store on write.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(transparent)]
#[cfg_attr(feature = "postgres", derive(sqlx::Type))]
#[cfg_attr(feature = "postgres", sqlx(transparent))]
pub struct Cvr(String);

impl Cvr {
    /// Number of digits in a CVR number.
    pub const DIGITS: usize = 8;

    /// Parse a `Cvr` from raw input.
    ///
    /// # Errors
    ///
    /// Returns a [`CvrError`] if the input is not eight digits with a
    /// non-zero first digit.
    pub fn parse(raw: &str) -> Result<Self, CvrError> {
        let s = raw.trim();

        if s.is_empty() {
            return Err(CvrError::Empty);
        }
        if !s.bytes().all(|b| b.is_ascii_digit()) {
            return Err(CvrError::NonDigit);
        }
        if s.len() != Self::DIGITS {
            return Err(CvrError::WrongLength {
                expected: Self::DIGITS,
            });
        }
        if s.starts_with('0') {
            return Err(CvrError::LeadingZero);
        }

        Ok(Self(s.to_owned()))
    }

    /// The CVR number as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Cvr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for Cvr {
    type Err = CvrError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_valid() {
        let cvr = Cvr::parse("38071563").unwrap();
        assert_eq!(cvr.as_str(), "38071563");
    }

    #[test]
    fn test_trims_whitespace() {
        assert!(Cvr::parse(" 38071563 ").is_ok());
    }

    #[test]
    fn test_empty() {
        assert_eq!(Cvr::parse(""), Err(CvrError::Empty));
    }

    #[test]
    fn test_wrong_length() {
        assert_eq!(
            Cvr::parse("1234567"),
            Err(CvrError::WrongLength { expected: 8 })
        );
        assert_eq!(
            Cvr::parse("123456789"),
            Err(CvrError::WrongLength { expected: 8 })
        );
    }

    #[test]
    fn test_non_digit() {
        assert_eq!(Cvr::parse("3807156a"), Err(CvrError::NonDigit));
        assert_eq!(Cvr::parse("38 07 15 63"), Err(CvrError::NonDigit));
    }

    #[test]
    fn test_leading_zero() {
        assert_eq!(Cvr::parse("08071563"), Err(CvrError::LeadingZero));
    }
}
