//! Postcode registry entry.

use serde::Serialize;
use shoplokalt_core::Postcode;

/// One row of the postcode registry: a code and its city.
///
/// The registry is reference data - seeded once, read for existence
/// checks, never mutated by the application.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, sqlx::FromRow)]
pub struct PostcodeEntry {
    pub postcode: Postcode,
    pub city: String,
}
