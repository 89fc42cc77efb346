//! Shop repository.

use sqlx::PgPool;

use shoplokalt_core::{Cvr, ShopId};

use super::RepositoryError;
use crate::forms::ShopRegistration;
use crate::models::Shop;

const SHOP_COLUMNS: &str =
    "id, name, cvr, address, postcode, city, email, phone, created_at, updated_at";

/// Repository for shop database operations.
pub struct ShopRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> ShopRepository<'a> {
    /// Create a new shop repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Persist a cleaned registration.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the insert fails.
    pub async fn create(&self, registration: &ShopRegistration) -> Result<Shop, RepositoryError> {
        let shop = sqlx::query_as::<_, Shop>(&format!(
            r"
            INSERT INTO shop (name, address, postcode, city, email, phone)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING {SHOP_COLUMNS}
            "
        ))
        .bind(&registration.name)
        .bind(&registration.address)
        .bind(registration.postcode)
        .bind(&registration.city)
        .bind(&registration.email)
        .bind(&registration.phone)
        .fetch_one(self.pool)
        .await?;

        Ok(shop)
    }

    /// Get a shop by its ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get(&self, id: ShopId) -> Result<Option<Shop>, RepositoryError> {
        let shop = sqlx::query_as::<_, Shop>(&format!(
            "SELECT {SHOP_COLUMNS} FROM shop WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(self.pool)
        .await?;

        Ok(shop)
    }

    /// Set the shop's CVR number.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the shop does not exist and
    /// `RepositoryError::Conflict` if another shop already registered the
    /// number.
    pub async fn update_cvr(&self, id: ShopId, cvr: &Cvr) -> Result<Shop, RepositoryError> {
        let shop = sqlx::query_as::<_, Shop>(&format!(
            r"
            UPDATE shop
            SET cvr = $2, updated_at = NOW()
            WHERE id = $1
            RETURNING {SHOP_COLUMNS}
            "
        ))
        .bind(id)
        .bind(cvr)
        .fetch_optional(self.pool)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(ref db_err) = e
                && db_err.is_unique_violation()
            {
                return RepositoryError::Conflict("CVR number already registered".to_owned());
            }
            RepositoryError::Database(e)
        })?;

        shop.ok_or(RepositoryError::NotFound)
    }
}
