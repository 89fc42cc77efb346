//! Order status handlers.

use axum::{
    Form, Json,
    extract::{Path, State},
};
use tracing::instrument;

use shoplokalt_core::OrderId;

use crate::db::OrderRepository;
use crate::error::{AppError, rejection};
use crate::forms::OrderStatusForm;
use crate::models::Order;
use crate::state::AppState;

/// Update an order's status.
///
/// PUT /orders/{id}/status
#[instrument(skip(state, form), fields(order = %id))]
pub async fn update_status(
    State(state): State<AppState>,
    Path(id): Path<OrderId>,
    Form(form): Form<OrderStatusForm>,
) -> Result<Json<Order>, AppError> {
    let status = form
        .validate()
        .map_err(|errors| rejection(state.messages(), None, &errors))?;

    let order = OrderRepository::new(state.pool()).set_status(id, status).await?;

    tracing::info!(order = %order.id, status = %order.status, "Order status updated");
    Ok(Json(order))
}
