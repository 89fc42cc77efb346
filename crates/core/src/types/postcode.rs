//! Postcode type.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Error parsing a [`Postcode`].
///
/// There is deliberately only one kind: a postcode that parses but matches
/// no registry entry is a *reference* failure, decided by the store, not a
/// format failure decided here.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("postcode must be a whole number")]
pub struct PostcodeError;

/// A postcode, as submitted.
///
/// Coercion accepts any integer; existence in the postcode registry is a
/// separate lookup. Danish postcodes happen to be four digits, but the
/// registry is the authority on which values are real.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(transparent)]
#[cfg_attr(feature = "postgres", derive(sqlx::Type))]
#[cfg_attr(feature = "postgres", sqlx(transparent))]
pub struct Postcode(i32);

impl Postcode {
    /// Wrap a known-good postcode value.
    #[must_use]
    pub const fn new(value: i32) -> Self {
        Self(value)
    }

    /// Coerce raw input to a postcode.
    ///
    /// # Errors
    ///
    /// Returns [`PostcodeError`] if the input is not an integer.
    pub fn parse(raw: &str) -> Result<Self, PostcodeError> {
        raw.trim().parse::<i32>().map(Self).map_err(|_| PostcodeError)
    }

    /// The numeric postcode value.
    #[must_use]
    pub const fn get(self) -> i32 {
        self.0
    }
}

impl fmt::Display for Postcode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for Postcode {
    type Err = PostcodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}
