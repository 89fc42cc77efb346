//! Store capability required by the validators.
//!
//! The forms only ever need two reads: the active-product count for a shop
//! and the city behind a postcode. Keeping the capability this narrow lets
//! the validators be tested against an in-memory double and keeps sqlx out
//! of this module; the real implementation lives on the database pool.

use std::future::Future;

use shoplokalt_core::{Postcode, ProductId, ShopId};

/// Read access to current store state, as needed by business rules.
///
/// Implementations must read fresh state on every call - validation results
/// must never come from a cache, since the quota rule is only as good as
/// the count it observes.
pub trait ValidationStore {
    /// Store failure type, distinct from a validation rejection.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Count the shop's active products, excluding `exclude` when the
    /// submission edits an existing record.
    fn count_active_products(
        &self,
        shop: ShopId,
        exclude: Option<ProductId>,
    ) -> impl Future<Output = Result<u64, Self::Error>> + Send;

    /// The city registered for `postcode`, or `None` when the postcode
    /// does not exist.
    fn postcode_city(
        &self,
        postcode: Postcode,
    ) -> impl Future<Output = Result<Option<String>, Self::Error>> + Send;
}
