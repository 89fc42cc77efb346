//! Order status update form.

use serde::Deserialize;
use shoplokalt_core::OrderStatus;

use super::{ValidationError, ValidationErrors};

/// Raw status update submission.
///
/// A pass-through form: one field, no cross-field logic.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct OrderStatusForm {
    pub status: Option<String>,
}

impl OrderStatusForm {
    /// Validate the submission.
    ///
    /// # Errors
    ///
    /// Returns the field failure if the status is absent or not a known
    /// status name.
    pub fn validate(&self) -> Result<OrderStatus, ValidationErrors> {
        let mut errors = ValidationErrors::new();
        let raw = self.status.as_deref().map(str::trim).unwrap_or_default();
        if raw.is_empty() {
            errors.push_field("status", ValidationError::Format { key: "status-required" });
            return Err(errors);
        }
        match raw.parse::<OrderStatus>() {
            Ok(status) => Ok(status),
            Err(_) => {
                errors.push_field("status", ValidationError::Format { key: "status-unknown" });
                Err(errors)
            }
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_known_status_accepted() {
        let form = OrderStatusForm {
            status: Some("ready".to_owned()),
        };
        assert_eq!(form.validate().unwrap(), OrderStatus::Ready);
    }

    #[test]
    fn test_unknown_status_rejected() {
        let form = OrderStatusForm {
            status: Some("shipped".to_owned()),
        };
        let errors = form.validate().unwrap_err();
        assert_eq!(errors.iter().next().unwrap().error.key(), "status-unknown");
    }

    #[test]
    fn test_missing_status_rejected() {
        let errors = OrderStatusForm::default().validate().unwrap_err();
        assert_eq!(errors.iter().next().unwrap().error.key(), "status-required");
    }
}
