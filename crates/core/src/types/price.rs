//! Price type using decimal arithmetic.

use core::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Errors that can occur when parsing a [`Price`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum PriceError {
    /// The input is not a decimal number.
    #[error("price must be a number")]
    NotANumber,
    /// Prices cannot be negative.
    #[error("price cannot be negative")]
    Negative,
    /// More fraction digits than øre allow.
    #[error("price can have at most {max} decimal places")]
    TooManyDecimals {
        /// Maximum fraction digits.
        max: u32,
    },
}

/// A price in Danish kroner.
///
/// Wraps a [`Decimal`] with at most two fraction digits (øre). All amounts
/// are non-negative; discounts are modeled as a separate offer price, never
/// a negative one.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord)]
#[serde(transparent)]
#[cfg_attr(feature = "postgres", derive(sqlx::Type))]
#[cfg_attr(feature = "postgres", sqlx(transparent))]
pub struct Price(Decimal);

impl Price {
    /// Maximum fraction digits (øre).
    pub const MAX_SCALE: u32 = 2;

    /// Create a price from a validated decimal.
    ///
    /// # Errors
    ///
    /// Returns a [`PriceError`] if the amount is negative or has more than
    /// two fraction digits.
    pub fn new(amount: Decimal) -> Result<Self, PriceError> {
        if amount.is_sign_negative() {
            return Err(PriceError::Negative);
        }
        if amount.normalize().scale() > Self::MAX_SCALE {
            return Err(PriceError::TooManyDecimals {
                max: Self::MAX_SCALE,
            });
        }
        Ok(Self(amount))
    }

    /// Coerce raw input to a price.
    ///
    /// # Errors
    ///
    /// Returns a [`PriceError`] if the input is not a non-negative decimal
    /// with at most two fraction digits.
    pub fn parse(raw: &str) -> Result<Self, PriceError> {
        let amount: Decimal = raw.trim().parse().map_err(|_| PriceError::NotANumber)?;
        Self::new(amount)
    }

    /// The amount in kroner.
    #[must_use]
    pub const fn amount(self) -> Decimal {
        self.0
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2} kr.", self.0)
    }
}

impl std::str::FromStr for Price {
    type Err = PriceError;

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
        assert!(Price::parse("49").is_ok());
        assert!(Price::parse("49.50").is_ok());
        assert!(Price::parse("0").is_ok());
        assert!(Price::parse(" 12.5 ").is_ok());
    }

    #[test]
    fn test_not_a_number() {
        assert_eq!(Price::parse("gratis"), Err(PriceError::NotANumber));
        assert_eq!(Price::parse(""), Err(PriceError::NotANumber));
        assert_eq!(Price::parse("12,50"), Err(PriceError::NotANumber));
    }

    #[test]
    fn test_negative() {
        assert_eq!(Price::parse("-1"), Err(PriceError::Negative));
    }

    #[test]
    fn test_too_many_decimals() {
        assert_eq!(
            Price::parse("9.999"),
            Err(PriceError::TooManyDecimals { max: 2 })
        );
        // Trailing zeros beyond two places are fine once normalized.
        assert!(Price::parse("9.990").is_ok());
    }

    #[test]
    fn test_display() {
        let price = Price::parse("49.5").unwrap();
        assert_eq!(price.to_string(), "49.50 kr.");
    }
}
