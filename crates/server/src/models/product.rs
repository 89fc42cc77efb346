//! Product domain type.

use chrono::{DateTime, Utc};
use serde::Serialize;
use shoplokalt_core::{Price, ProductId, ShopId};

/// A product listed by a shop.
///
/// At most three products per shop are active at any time; the limit is
/// enforced by the product form at validation time, not by the schema.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct Product {
    /// Unique product ID.
    pub id: ProductId,
    /// Owning shop.
    pub shop_id: ShopId,
    /// Display name.
    pub name: String,
    /// Description shown on the product page.
    pub description: String,
    /// Stored media path of the product image, if one was uploaded.
    pub image: Option<String>,
    /// Regular price.
    pub price: Price,
    /// Discounted price, when on offer.
    pub offer_price: Option<Price>,
    /// Color variant label.
    pub color: Option<String>,
    /// Size variant label.
    pub size: Option<String>,
    /// Whether the product is currently listed.
    pub active: bool,
    /// Delivery time in days, when the shop delivers.
    pub delivery_days: Option<i16>,
    /// Availability window start.
    pub start_at: Option<DateTime<Utc>>,
    /// Availability window end.
    pub end_at: Option<DateTime<Utc>>,
    /// When the product was created.
    pub created_at: DateTime<Utc>,
    /// When the product was last updated.
    pub updated_at: DateTime<Utc>,
}
