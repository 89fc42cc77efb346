//! Unified error handling for the HTTP surface.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;

use crate::db::RepositoryError;
use crate::forms::{ErrorKind, ValidationErrors};
use crate::i18n::Messages;
use crate::services::MailError;

/// Application-level error type.
#[derive(Debug, Error)]
pub enum AppError {
    /// Database operation failed.
    #[error("Database error: {0}")]
    Database(RepositoryError),

    /// Mail delivery failed.
    #[error("Mail error: {0}")]
    Mail(#[from] MailError),

    /// A submission was rejected; entries are already localized.
    #[error("Validation failed")]
    Validation(Vec<ErrorBody>),

    /// Resource not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// A required external service is not configured.
    #[error("Unavailable: {0}")]
    Unavailable(String),
}

impl From<RepositoryError> for AppError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::NotFound => Self::NotFound("record".to_owned()),
            other => Self::Database(other),
        }
    }
}

/// One serialized validation failure.
///
/// `field` is `null` for form-level errors; `kind` is the
/// machine-distinguishable taxonomy entry; `message` is localized text.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorBody {
    pub field: Option<&'static str>,
    pub kind: ErrorKind,
    pub message: String,
}

/// Localize a rejection into an [`AppError::Validation`], preserving the
/// error order.
pub fn rejection(messages: &Messages, locale: Option<&str>, errors: &ValidationErrors) -> AppError {
    AppError::Validation(
        errors
            .iter()
            .map(|entry| ErrorBody {
                field: entry.field,
                kind: entry.error.kind(),
                message: messages.render(locale, &entry.error),
            })
            .collect(),
    )
}

/// Body of a rejection response.
#[derive(Debug, Serialize)]
struct RejectionResponse {
    errors: Vec<ErrorBody>,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        if matches!(self, Self::Database(_) | Self::Mail(_)) {
            tracing::error!(error = %self, "Request error");
        }

        match self {
            Self::Validation(errors) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                Json(RejectionResponse { errors }),
            )
                .into_response(),
            Self::NotFound(what) => {
                (StatusCode::NOT_FOUND, format!("Not found: {what}")).into_response()
            }
            Self::Database(RepositoryError::Conflict(reason)) => {
                (StatusCode::CONFLICT, reason).into_response()
            }
            Self::Unavailable(_) => (
                StatusCode::SERVICE_UNAVAILABLE,
                "Service temporarily unavailable".to_owned(),
            )
                .into_response(),
            // Don't expose internal error details to clients
            Self::Database(_) | Self::Mail(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Internal server error".to_owned(),
            )
                .into_response(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::forms::ValidationError;

    #[test]
    fn test_status_codes() {
        fn status(err: AppError) -> StatusCode {
            err.into_response().status()
        }

        assert_eq!(
            status(AppError::NotFound("shop 9".to_owned())),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            status(AppError::Validation(Vec::new())),
            StatusCode::UNPROCESSABLE_ENTITY
        );
        assert_eq!(
            status(AppError::Database(RepositoryError::Conflict(
                "duplicate".to_owned()
            ))),
            StatusCode::CONFLICT
        );
        assert_eq!(
            status(AppError::Database(RepositoryError::NotFound)),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            status(AppError::Unavailable("mail".to_owned())),
            StatusCode::SERVICE_UNAVAILABLE
        );
    }

    #[test]
    fn test_rejection_preserves_order_and_localizes() {
        let messages = Messages::new("en").expect("bundled messages");
        let mut errors = ValidationErrors::new();
        errors.push_field("email", ValidationError::Format { key: "email-invalid" });
        errors.push_form(ValidationError::BusinessRule {
            key: "product-quota",
            limit: Some(3),
        });

        let AppError::Validation(bodies) = rejection(&messages, None, &errors) else {
            panic!("expected validation error");
        };
        assert_eq!(bodies.len(), 2);
        assert_eq!(bodies[0].field, Some("email"));
        assert_eq!(bodies[0].kind, ErrorKind::Format);
        assert_eq!(bodies[1].field, None);
        assert_eq!(bodies[1].message, "Maximum of 3 products reached!");
    }

    #[test]
    fn test_repository_not_found_maps_to_not_found() {
        let err: AppError = RepositoryError::NotFound.into();
        assert!(matches!(err, AppError::NotFound(_)));
    }
}
