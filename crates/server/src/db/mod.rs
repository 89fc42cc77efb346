//! Database operations.
//!
//! # Tables
//!
//! - `postcode` - Postcode registry (reference data, seeded via the CLI)
//! - `shop` - Registered shops
//! - `product` - Product listings, owned by shops
//! - `shop_order` - Orders placed with shops
//!
//! # Migrations
//!
//! Migrations are stored in `crates/server/migrations/` and run via:
//! ```bash
//! cargo run -p shoplokalt-cli -- migrate
//! ```
//!
//! All queries use the runtime query API with explicit binds; row types
//! derive `FromRow` over the core newtypes.

pub mod orders;
pub mod postcodes;
pub mod products;
pub mod shops;

use std::future::Future;
use std::time::Duration;

use secrecy::ExposeSecret;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use thiserror::Error;

use shoplokalt_core::{Postcode, ProductId, ShopId};

use crate::forms::ValidationStore;

pub use orders::OrderRepository;
pub use postcodes::PostcodeRepository;
pub use products::ProductRepository;
pub use shops::ShopRepository;

/// Errors that can occur during repository operations.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// Database error from sqlx.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Requested entity was not found.
    #[error("not found")]
    NotFound,

    /// Constraint violation (e.g., duplicate CVR number).
    #[error("constraint violation: {0}")]
    Conflict(String),
}

/// Create a `PostgreSQL` connection pool with sensible defaults.
///
/// # Errors
///
/// Returns `sqlx::Error` if the connection cannot be established.
pub async fn create_pool(database_url: &secrecy::SecretString) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(10)
        .min_connections(2)
        .acquire_timeout(Duration::from_secs(10))
        .connect(database_url.expose_secret())
        .await
}

// The pool is the store the validators read from. Every call issues a
// fresh query; nothing is cached between submissions.
impl ValidationStore for PgPool {
    type Error = RepositoryError;

    fn count_active_products(
        &self,
        shop: ShopId,
        exclude: Option<ProductId>,
    ) -> impl Future<Output = Result<u64, Self::Error>> + Send {
        async move {
            ProductRepository::new(self)
                .count_active(shop, exclude)
                .await
        }
    }

    fn postcode_city(
        &self,
        postcode: Postcode,
    ) -> impl Future<Output = Result<Option<String>, Self::Error>> + Send {
        async move { PostcodeRepository::new(self).city_for(postcode).await }
    }
}
