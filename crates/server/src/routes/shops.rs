//! Shop registration and CVR update handlers.

use axum::{
    Form, Json,
    extract::{Path, State},
    http::StatusCode,
};
use tracing::instrument;

use shoplokalt_core::ShopId;

use crate::db::ShopRepository;
use crate::error::{AppError, rejection};
use crate::forms::{FormError, ShopCvrForm, ShopRegisterForm};
use crate::models::Shop;
use crate::state::AppState;

/// Register a new shop.
///
/// POST /shops
#[instrument(skip(state, form))]
pub async fn register(
    State(state): State<AppState>,
    Form(form): Form<ShopRegisterForm>,
) -> Result<(StatusCode, Json<Shop>), AppError> {
    let registration = form.validate(state.pool()).await.map_err(|e| match e {
        FormError::Invalid(errors) => rejection(state.messages(), None, &errors),
        FormError::Store(err) => err.into(),
    })?;

    let shop = ShopRepository::new(state.pool())
        .create(&registration)
        .await?;

    tracing::info!(shop = %shop.id, "Shop registered");
    Ok((StatusCode::CREATED, Json(shop)))
}

/// Update a shop's CVR number.
///
/// PUT /shops/{id}/cvr
#[instrument(skip(state, form))]
pub async fn update_cvr(
    State(state): State<AppState>,
    Path(id): Path<ShopId>,
    Form(form): Form<ShopCvrForm>,
) -> Result<Json<Shop>, AppError> {
    let cvr = form
        .validate()
        .map_err(|errors| rejection(state.messages(), None, &errors))?;

    let shop = ShopRepository::new(state.pool()).update_cvr(id, &cvr).await?;

    tracing::info!(shop = %shop.id, "CVR number updated");
    Ok(Json(shop))
}
