//! Product repository, including the active-count read the quota rule
//! depends on.

use sqlx::PgPool;

use shoplokalt_core::{ProductId, ShopId};

use super::RepositoryError;
use crate::forms::ProductSubmission;
use crate::models::Product;

const PRODUCT_COLUMNS: &str = "id, shop_id, name, description, image, price, offer_price, \
     color, size, active, delivery_days, start_at, end_at, created_at, updated_at";

/// Repository for product database operations.
pub struct ProductRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> ProductRepository<'a> {
    /// Create a new product repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Count the shop's active products, excluding `exclude` when given.
    ///
    /// This is the read behind the active-listing quota. It always hits
    /// the database so a validation sees the current count, not a stale
    /// one; two overlapping submissions can still both observe a count
    /// below the limit.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn count_active(
        &self,
        shop: ShopId,
        exclude: Option<ProductId>,
    ) -> Result<u64, RepositoryError> {
        let count: i64 = sqlx::query_scalar(
            r"
            SELECT COUNT(*) FROM product
            WHERE shop_id = $1 AND active AND ($2::INT4 IS NULL OR id <> $2)
            ",
        )
        .bind(shop)
        .bind(exclude)
        .fetch_one(self.pool)
        .await?;

        Ok(u64::try_from(count).unwrap_or_default())
    }

    /// Persist a cleaned submission as a new product under `shop`.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the insert fails.
    pub async fn create(
        &self,
        shop: ShopId,
        submission: &ProductSubmission,
    ) -> Result<Product, RepositoryError> {
        let product = sqlx::query_as::<_, Product>(&format!(
            r"
            INSERT INTO product (
                shop_id, name, description, image, price, offer_price,
                color, size, active, delivery_days, start_at, end_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
            RETURNING {PRODUCT_COLUMNS}
            "
        ))
        .bind(shop)
        .bind(&submission.name)
        .bind(&submission.description)
        .bind(&submission.image)
        .bind(submission.price)
        .bind(submission.offer_price)
        .bind(&submission.color)
        .bind(&submission.size)
        .bind(submission.active)
        .bind(submission.delivery_days)
        .bind(submission.start_at)
        .bind(submission.end_at)
        .fetch_one(self.pool)
        .await?;

        Ok(product)
    }

    /// Overwrite an existing product with a cleaned submission.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if `id` does not belong to
    /// `shop`.
    pub async fn update(
        &self,
        shop: ShopId,
        id: ProductId,
        submission: &ProductSubmission,
    ) -> Result<Product, RepositoryError> {
        let product = sqlx::query_as::<_, Product>(&format!(
            r"
            UPDATE product
            SET name = $3, description = $4, image = $5, price = $6,
                offer_price = $7, color = $8, size = $9, active = $10,
                delivery_days = $11, start_at = $12, end_at = $13,
                updated_at = NOW()
            WHERE id = $1 AND shop_id = $2
            RETURNING {PRODUCT_COLUMNS}
            "
        ))
        .bind(id)
        .bind(shop)
        .bind(&submission.name)
        .bind(&submission.description)
        .bind(&submission.image)
        .bind(submission.price)
        .bind(submission.offer_price)
        .bind(&submission.color)
        .bind(&submission.size)
        .bind(submission.active)
        .bind(submission.delivery_days)
        .bind(submission.start_at)
        .bind(submission.end_at)
        .fetch_optional(self.pool)
        .await?;

        product.ok_or(RepositoryError::NotFound)
    }

    /// Get a product by its ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get(&self, id: ProductId) -> Result<Option<Product>, RepositoryError> {
        let product = sqlx::query_as::<_, Product>(&format!(
            "SELECT {PRODUCT_COLUMNS} FROM product WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(self.pool)
        .await?;

        Ok(product)
    }

    /// All products of a shop, newest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_for_shop(&self, shop: ShopId) -> Result<Vec<Product>, RepositoryError> {
        let products = sqlx::query_as::<_, Product>(&format!(
            "SELECT {PRODUCT_COLUMNS} FROM product WHERE shop_id = $1 ORDER BY created_at DESC"
        ))
        .bind(shop)
        .fetch_all(self.pool)
        .await?;

        Ok(products)
    }
}
