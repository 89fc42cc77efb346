//! Form validation layer.
//!
//! Every mutating submission passes through a form in this module: raw
//! field values go in, and either a cleaned, typed record comes out or an
//! ordered list of errors does. The flow is always the same:
//!
//! 1. each field is coerced to its typed form, collecting *all* field
//!    errors rather than stopping at the first;
//! 2. only when every field passed, cross-field and store-state business
//!    rules run, attaching their failures at form level.
//!
//! Forms hold no ambient state. The acting shop and (for edits) the record
//! being edited arrive in an explicit [`FormContext`]; store reads go
//! through the [`store::ValidationStore`] capability and are never cached
//! between submissions.

pub mod contact;
pub mod error;
pub mod order;
pub mod product;
pub mod shop;
pub mod store;

pub use contact::{ContactForm, ContactMessage};
pub use error::{ErrorEntry, ErrorKind, FormError, ValidationError, ValidationErrors};
pub use order::OrderStatusForm;
pub use product::{ProductForm, ProductSubmission};
pub use shop::{ShopCvrForm, ShopRegisterForm, ShopRegistration};
pub use store::ValidationStore;

use shoplokalt_core::{Email, EmailError, ProductId, ShopId};

/// Per-submission context: who is acting, and which record (if any) is
/// being edited.
///
/// Constructed fresh for every submission and discarded with it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FormContext {
    /// The shop the submission belongs to.
    pub shop: ShopId,
    /// The record being edited; `None` for a creation.
    pub editing: Option<ProductId>,
}

impl FormContext {
    /// Context for creating a new record under `shop`.
    #[must_use]
    pub const fn create(shop: ShopId) -> Self {
        Self {
            shop,
            editing: None,
        }
    }

    /// Context for editing an existing record under `shop`.
    #[must_use]
    pub const fn edit(shop: ShopId, product: ProductId) -> Self {
        Self {
            shop,
            editing: Some(product),
        }
    }
}

/// Trim and require a text field, enforcing its maximum length in
/// characters.
pub(crate) fn required_text(
    errors: &mut ValidationErrors,
    field: &'static str,
    raw: Option<&str>,
    required_key: &'static str,
    max: usize,
    too_long_key: &'static str,
) -> Option<String> {
    let value = raw.map(str::trim).unwrap_or_default();
    if value.is_empty() {
        errors.push_field(field, ValidationError::Format { key: required_key });
        return None;
    }
    if value.chars().count() > max {
        errors.push_field(
            field,
            ValidationError::Length {
                key: too_long_key,
                max,
            },
        );
        return None;
    }
    Some(value.to_owned())
}

/// Trim an optional text field; absent or blank input cleans to `None`.
///
/// The outer `Option` is `None` when the field had an error.
pub(crate) fn optional_text(
    errors: &mut ValidationErrors,
    field: &'static str,
    raw: Option<&str>,
    max: usize,
    too_long_key: &'static str,
) -> Option<Option<String>> {
    let value = raw.map(str::trim).unwrap_or_default();
    if value.is_empty() {
        return Some(None);
    }
    if value.chars().count() > max {
        errors.push_field(
            field,
            ValidationError::Length {
                key: too_long_key,
                max,
            },
        );
        return None;
    }
    Some(Some(value.to_owned()))
}

/// Coerce a required email field.
pub(crate) fn clean_email(
    errors: &mut ValidationErrors,
    field: &'static str,
    raw: Option<&str>,
) -> Option<Email> {
    match Email::parse(raw.unwrap_or_default()) {
        Ok(email) => Some(email),
        Err(EmailError::Empty) => {
            errors.push_field(field, ValidationError::Format { key: "email-required" });
            None
        }
        Err(_) => {
            errors.push_field(field, ValidationError::Format { key: "email-invalid" });
            None
        }
    }
}
