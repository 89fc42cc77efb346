//! HTTP route handlers.
//!
//! # Route Structure
//!
//! ```text
//! GET  /health                         - Liveness check
//! GET  /health/ready                   - Readiness check (pings the database)
//!
//! # Shops
//! POST /shops                          - Register a shop
//! PUT  /shops/{id}/cvr                 - Update a shop's CVR number
//! POST /shops/{id}/contact             - Relay a contact message to a shop
//!
//! # Products
//! GET  /shops/{id}/products            - List a shop's products
//! POST /shops/{id}/products            - Create a product
//! PUT  /shops/{id}/products/{product}  - Edit a product
//!
//! # Orders
//! PUT  /orders/{id}/status             - Update an order's status
//! ```
//!
//! Handlers are thin: deserialize the submission, run the matching form
//! validator, persist, reply. Rejections come back as HTTP 422 with the
//! ordered, localized error list.

pub mod contact;
pub mod orders;
pub mod products;
pub mod shops;

use axum::{
    Router,
    routing::{get, post, put},
};

use crate::state::AppState;

/// Create the shop routes router.
pub fn shop_routes() -> Router<AppState> {
    Router::new()
        .route("/", post(shops::register))
        .route("/{id}/cvr", put(shops::update_cvr))
        .route("/{id}/contact", post(contact::contact_shop))
        .route(
            "/{id}/products",
            get(products::list).post(products::create),
        )
        .route("/{id}/products/{product_id}", put(products::update))
}

/// Create the order routes router.
pub fn order_routes() -> Router<AppState> {
    Router::new().route("/{id}/status", put(orders::update_status))
}

/// Create all application routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .nest("/shops", shop_routes())
        .nest("/orders", order_routes())
}
