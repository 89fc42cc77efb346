//! Product management handlers.

use axum::{
    Form, Json,
    extract::{Path, State},
    http::StatusCode,
};
use serde::Serialize;
use tracing::instrument;

use shoplokalt_core::{ProductId, ShopId};

use crate::db::{ProductRepository, ShopRepository};
use crate::error::{AppError, rejection};
use crate::forms::{FormContext, FormError, ProductForm};
use crate::models::Product;
use crate::state::AppState;

/// A product with its public image URL resolved from storage config.
#[derive(Debug, Serialize)]
pub struct ProductResponse {
    #[serde(flatten)]
    pub product: Product,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

impl ProductResponse {
    fn new(state: &AppState, product: Product) -> Self {
        let image_url = product
            .image
            .as_ref()
            .map(|path| format!("{}{path}", state.config().storage.media_url()));
        Self { product, image_url }
    }
}

/// List a shop's products, newest first.
///
/// GET /shops/{id}/products
#[instrument(skip(state), fields(shop = %id))]
pub async fn list(
    State(state): State<AppState>,
    Path(id): Path<ShopId>,
) -> Result<Json<Vec<ProductResponse>>, AppError> {
    let shop = ShopRepository::new(state.pool())
        .get(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("shop {id}")))?;

    let products = ProductRepository::new(state.pool())
        .list_for_shop(shop.id)
        .await?;

    Ok(Json(
        products
            .into_iter()
            .map(|p| ProductResponse::new(&state, p))
            .collect(),
    ))
}

/// Create a product.
///
/// POST /shops/{id}/products
#[instrument(skip(state, form), fields(shop = %id))]
pub async fn create(
    State(state): State<AppState>,
    Path(id): Path<ShopId>,
    Form(form): Form<ProductForm>,
) -> Result<(StatusCode, Json<ProductResponse>), AppError> {
    let shop = ShopRepository::new(state.pool())
        .get(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("shop {id}")))?;

    let ctx = FormContext::create(shop.id);
    let submission = validate(&state, &form, &ctx).await?;

    let product = ProductRepository::new(state.pool())
        .create(shop.id, &submission)
        .await?;

    tracing::info!(product = %product.id, "Product created");
    Ok((StatusCode::CREATED, Json(ProductResponse::new(&state, product))))
}

/// Edit a product.
///
/// PUT /shops/{id}/products/{product_id}
///
/// The edited record is excluded from the active-listing count, so saving
/// an already-active product without changes always passes the quota.
#[instrument(skip(state, form), fields(shop = %id, product = %product_id))]
pub async fn update(
    State(state): State<AppState>,
    Path((id, product_id)): Path<(ShopId, ProductId)>,
    Form(form): Form<ProductForm>,
) -> Result<Json<ProductResponse>, AppError> {
    let shop = ShopRepository::new(state.pool())
        .get(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("shop {id}")))?;

    let ctx = FormContext::edit(shop.id, product_id);
    let submission = validate(&state, &form, &ctx).await?;

    let product = ProductRepository::new(state.pool())
        .update(shop.id, product_id, &submission)
        .await?;

    tracing::info!(product = %product.id, "Product updated");
    Ok(Json(ProductResponse::new(&state, product)))
}

async fn validate(
    state: &AppState,
    form: &ProductForm,
    ctx: &FormContext,
) -> Result<crate::forms::ProductSubmission, AppError> {
    form.validate(ctx, state.pool()).await.map_err(|e| match e {
        FormError::Invalid(errors) => rejection(state.messages(), None, &errors),
        FormError::Store(err) => err.into(),
    })
}
