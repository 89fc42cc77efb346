//! Order domain type.

use chrono::{DateTime, Utc};
use serde::Serialize;
use shoplokalt_core::{OrderId, OrderStatus, ShopId};

/// An order placed with a shop.
///
/// The status is the only field this service updates; order creation
/// happens in the customer-facing flow.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct Order {
    /// Unique order ID.
    pub id: OrderId,
    /// The shop the order was placed with.
    pub shop_id: ShopId,
    /// Current lifecycle status.
    pub status: OrderStatus,
    /// When the order was placed.
    pub created_at: DateTime<Utc>,
    /// When the order was last updated.
    pub updated_at: DateTime<Utc>,
}
