//! Phone number type.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Errors that can occur when parsing a [`Phone`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum PhoneError {
    /// The input is empty after trimming.
    #[error("phone number cannot be empty")]
    Empty,
    /// The input contains a character other than digits, spaces, or a
    /// leading +.
    #[error("phone number contains an invalid character")]
    InvalidCharacter,
    /// The digit count is outside the accepted range.
    #[error("phone number must have between {min} and {max} digits")]
    WrongLength {
        /// Minimum digit count.
        min: usize,
        /// Maximum digit count.
        max: usize,
    },
}

/// A phone number, stored in compact form.
///
/// Spaces are stripped; a single leading `+` with country code is kept.
/// Danish numbers are eight digits, so the minimum accepts a bare national
/// number; the maximum follows E.164.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(transparent)]
#[cfg_attr(feature = "postgres", derive(sqlx::Type))]
#[cfg_attr(feature = "postgres", sqlx(transparent))]
pub struct Phone(String);

impl Phone {
    /// Minimum number of digits (Danish national number).
    pub const MIN_DIGITS: usize = 8;
    /// Maximum number of digits (E.164).
    pub const MAX_DIGITS: usize = 15;

    /// Parse a `Phone` from raw input.
    ///
    /// # Errors
    ///
    /// Returns a [`PhoneError`] if the input has invalid characters or the
    /// wrong number of digits.
    pub fn parse(raw: &str) -> Result<Self, PhoneError> {
        let s: String = raw.chars().filter(|c| !c.is_whitespace()).collect();

        if s.is_empty() {
            return Err(PhoneError::Empty);
        }

        let digits = s.strip_prefix('+').unwrap_or(&s);
        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return Err(PhoneError::InvalidCharacter);
        }
        if digits.len() < Self::MIN_DIGITS || digits.len() > Self::MAX_DIGITS {
            return Err(PhoneError::WrongLength {
                min: Self::MIN_DIGITS,
                max: Self::MAX_DIGITS,
            });
        }

        Ok(Self(s))
    }

    /// The compact phone number as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Phone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for Phone {
    type Err = PhoneError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_national() {
        let phone = Phone::parse("12 34 56 78").unwrap();
        assert_eq!(phone.as_str(), "12345678");
    }

    #[test]
    fn test_parse_international() {
        let phone = Phone::parse("+45 12 34 56 78").unwrap();
        assert_eq!(phone.as_str(), "+4512345678");
    }

    #[test]
    fn test_empty() {
        assert_eq!(Phone::parse("  "), Err(PhoneError::Empty));
    }

    #[test]
    fn test_invalid_character() {
        assert_eq!(Phone::parse("12-34-56-78"), Err(PhoneError::InvalidCharacter));
        assert_eq!(Phone::parse("+"), Err(PhoneError::InvalidCharacter));
        assert_eq!(Phone::parse("12+345678"), Err(PhoneError::InvalidCharacter));
    }

    #[test]
    fn test_wrong_length() {
        assert_eq!(
            Phone::parse("1234567"),
            Err(PhoneError::WrongLength { min: 8, max: 15 })
        );
        assert_eq!(
            Phone::parse("+1234567890123456"),
            Err(PhoneError::WrongLength { min: 8, max: 15 })
        );
    }
}
