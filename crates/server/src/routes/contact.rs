//! Contact form route handler.
//!
//! Relays validated customer messages to the shop's email address.

use axum::{
    Form, Json,
    extract::{Path, State},
};
use serde::Serialize;
use tracing::instrument;

use shoplokalt_core::ShopId;

use crate::db::ShopRepository;
use crate::error::{AppError, rejection};
use crate::forms::ContactForm;
use crate::state::AppState;

/// Response for a relayed contact message.
#[derive(Debug, Serialize)]
pub struct ContactResponse {
    pub success: bool,
}

/// Send a message to a shop.
///
/// POST /shops/{id}/contact
#[instrument(skip(state, form), fields(shop = %id))]
pub async fn contact_shop(
    State(state): State<AppState>,
    Path(id): Path<ShopId>,
    Form(form): Form<ContactForm>,
) -> Result<Json<ContactResponse>, AppError> {
    let message = form
        .validate()
        .map_err(|errors| rejection(state.messages(), None, &errors))?;

    let shop = ShopRepository::new(state.pool())
        .get(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("shop {id}")))?;

    let Some(mailer) = state.mailer() else {
        tracing::error!("Contact relay requested but SMTP is not configured");
        return Err(AppError::Unavailable("mail relay".to_owned()));
    };

    mailer.send_contact(&shop.email, &message).await?;

    Ok(Json(ContactResponse { success: true }))
}
