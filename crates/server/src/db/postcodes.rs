//! Postcode registry lookups.

use sqlx::PgPool;

use shoplokalt_core::Postcode;

use super::RepositoryError;
use crate::models::PostcodeEntry;

/// Repository over the postcode registry.
pub struct PostcodeRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> PostcodeRepository<'a> {
    /// Create a new postcode repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// The city registered for `postcode`, or `None` when the code does
    /// not exist.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn city_for(&self, postcode: Postcode) -> Result<Option<String>, RepositoryError> {
        let city: Option<String> =
            sqlx::query_scalar("SELECT city FROM postcode WHERE postcode = $1")
                .bind(postcode.get())
                .fetch_optional(self.pool)
                .await?;
        Ok(city)
    }

    /// Insert or refresh one registry entry. Used by the seeder only.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the insert fails.
    pub async fn upsert(&self, entry: &PostcodeEntry) -> Result<(), RepositoryError> {
        sqlx::query(
            r"
            INSERT INTO postcode (postcode, city)
            VALUES ($1, $2)
            ON CONFLICT (postcode) DO UPDATE SET city = EXCLUDED.city
            ",
        )
        .bind(entry.postcode.get())
        .bind(&entry.city)
        .execute(self.pool)
        .await?;
        Ok(())
    }
}
