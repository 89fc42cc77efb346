//! Shop domain type.

use chrono::{DateTime, Utc};
use serde::Serialize;
use shoplokalt_core::{Cvr, Email, Phone, Postcode, ShopId};

/// A registered shop.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct Shop {
    /// Unique shop ID.
    pub id: ShopId,
    /// Display name.
    pub name: String,
    /// CVR business registration number; set after registration via the
    /// dedicated update form, unique across shops.
    pub cvr: Option<Cvr>,
    /// Street address.
    pub address: String,
    /// Postcode, referencing the registry.
    pub postcode: Postcode,
    /// City, resolved from the postcode at registration time.
    pub city: String,
    /// Contact address, also the recipient of relayed contact messages.
    pub email: Email,
    /// Contact phone number.
    pub phone: Phone,
    /// When the shop registered.
    pub created_at: DateTime<Utc>,
    /// When the shop was last updated.
    pub updated_at: DateTime<Utc>,
}
