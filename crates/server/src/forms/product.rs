//! Product create/edit form, with the active-listing quota.

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::Deserialize;
use shoplokalt_core::Price;

use super::{
    FormContext, FormError, ValidationError, ValidationErrors, ValidationStore, optional_text,
    required_text,
};

/// A shop can have at most this many active products at once.
pub const ACTIVE_LIMIT: u32 = 3;

/// The single accepted textual layout for availability timestamps.
pub const DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M";

/// Longest accepted product name, in characters.
pub const NAME_MAX: usize = 100;
/// Longest accepted description, in characters.
pub const DESCRIPTION_MAX: usize = 2000;
/// Longest accepted color/size label, in characters.
pub const LABEL_MAX: usize = 50;

/// Raw product submission.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProductForm {
    pub name: Option<String>,
    pub description: Option<String>,
    pub image: Option<String>,
    pub price: Option<String>,
    pub offer_price: Option<String>,
    pub color: Option<String>,
    pub size: Option<String>,
    pub active: Option<String>,
    pub delivery_days: Option<String>,
    pub start_datetime: Option<String>,
    pub end_datetime: Option<String>,
}

/// A cleaned product submission, ready to persist.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductSubmission {
    pub name: String,
    pub description: String,
    /// Stored media path; the public URL is assembled from storage config.
    pub image: Option<String>,
    pub price: Price,
    pub offer_price: Option<Price>,
    pub color: Option<String>,
    pub size: Option<String>,
    pub active: bool,
    pub delivery_days: Option<i16>,
    pub start_at: Option<DateTime<Utc>>,
    pub end_at: Option<DateTime<Utc>>,
}

impl ProductForm {
    /// Validate the submission against the acting shop's current state.
    ///
    /// Field coercion runs first and collects every failure. Business
    /// rules run only once all fields passed, on the cleaned values, and
    /// both are collected when both fail - the quota first, so its
    /// message surfaces first:
    ///
    /// 1. an activating submission is rejected when the shop already has
    ///    [`ACTIVE_LIMIT`] other active products (the record being edited
    ///    is excluded from the count);
    /// 2. when both availability timestamps are present, the end must not
    ///    precede the start.
    ///
    /// The quota count is read from the store at validation time; two
    /// concurrent submissions can both observe a count below the limit.
    ///
    /// # Errors
    ///
    /// `FormError::Invalid` with the collected failures, or
    /// `FormError::Store` if the product count could not be read.
    pub async fn validate<S: ValidationStore>(
        &self,
        ctx: &FormContext,
        store: &S,
    ) -> Result<ProductSubmission, FormError<S::Error>> {
        let mut errors = ValidationErrors::new();

        let name = required_text(
            &mut errors,
            "name",
            self.name.as_deref(),
            "name-required",
            NAME_MAX,
            "name-too-long",
        );
        let description = required_text(
            &mut errors,
            "description",
            self.description.as_deref(),
            "description-required",
            DESCRIPTION_MAX,
            "description-too-long",
        );
        let image = self
            .image
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_owned);

        let price = clean_required_price(&mut errors, "price", self.price.as_deref());
        let offer_price = clean_optional_price(&mut errors, "offer_price", self.offer_price.as_deref());

        let color = optional_text(&mut errors, "color", self.color.as_deref(), LABEL_MAX, "color-too-long");
        let size = optional_text(&mut errors, "size", self.size.as_deref(), LABEL_MAX, "size-too-long");

        let active = clean_flag(&mut errors, "active", self.active.as_deref());
        let delivery_days = clean_delivery_days(&mut errors, self.delivery_days.as_deref());

        let start_at = clean_datetime(
            &mut errors,
            "start_datetime",
            self.start_datetime.as_deref(),
        );
        let end_at = clean_datetime(&mut errors, "end_datetime", self.end_datetime.as_deref());

        // A field that failed coercion is not evaluated further; with any
        // field error present the business rules do not run at all.
        let (
            Some(name),
            Some(description),
            Some(price),
            Some(offer_price),
            Some(color),
            Some(size),
            Some(active),
            Some(delivery_days),
            Some(start_at),
            Some(end_at),
        ) = (
            name,
            description,
            price,
            offer_price,
            color,
            size,
            active,
            delivery_days,
            start_at,
            end_at,
        )
        else {
            return Err(FormError::Invalid(errors));
        };

        // Business rules, on cleaned values only. Both are evaluated and
        // collected; the quota comes first.
        if active {
            let count = store
                .count_active_products(ctx.shop, ctx.editing)
                .await
                .map_err(FormError::Store)?;
            if count >= u64::from(ACTIVE_LIMIT) {
                errors.push_form(ValidationError::BusinessRule {
                    key: "product-quota",
                    limit: Some(ACTIVE_LIMIT),
                });
            }
        }

        if let (Some(start), Some(end)) = (start_at, end_at)
            && end < start
        {
            errors.push_form(ValidationError::BusinessRule {
                key: "product-dates-inverted",
                limit: None,
            });
        }

        if errors.is_empty() {
            Ok(ProductSubmission {
                name,
                description,
                image,
                price,
                offer_price,
                color,
                size,
                active,
                delivery_days,
                start_at,
                end_at,
            })
        } else {
            Err(FormError::Invalid(errors))
        }
    }
}

/// Coerce the required `price` field.
fn clean_required_price(
    errors: &mut ValidationErrors,
    field: &'static str,
    raw: Option<&str>,
) -> Option<Price> {
    match raw.map(str::trim).unwrap_or_default() {
        "" => {
            errors.push_field(field, ValidationError::Format { key: "price-required" });
            None
        }
        value => match Price::parse(value) {
            Ok(price) => Some(price),
            Err(_) => {
                errors.push_field(field, ValidationError::Format { key: "price-invalid" });
                None
            }
        },
    }
}

/// Coerce the optional `offer_price` field; blank cleans to `None`.
fn clean_optional_price(
    errors: &mut ValidationErrors,
    field: &'static str,
    raw: Option<&str>,
) -> Option<Option<Price>> {
    match raw.map(str::trim).unwrap_or_default() {
        "" => Some(None),
        value => match Price::parse(value) {
            Ok(price) => Some(Some(price)),
            Err(_) => {
                errors.push_field(field, ValidationError::Format { key: "price-invalid" });
                None
            }
        },
    }
}

/// Coerce a checkbox value. Absent means unchecked.
fn clean_flag(
    errors: &mut ValidationErrors,
    field: &'static str,
    raw: Option<&str>,
) -> Option<bool> {
    match raw.map(str::trim).unwrap_or_default() {
        "" | "false" | "off" | "0" => Some(false),
        "true" | "on" | "1" => Some(true),
        _ => {
            errors.push_field(field, ValidationError::Format { key: "flag-invalid" });
            None
        }
    }
}

fn clean_delivery_days(
    errors: &mut ValidationErrors,
    raw: Option<&str>,
) -> Option<Option<i16>> {
    match raw.map(str::trim).unwrap_or_default() {
        "" => Some(None),
        value => match value.parse::<i16>() {
            Ok(days) if days >= 0 => Some(Some(days)),
            _ => {
                errors.push_field(
                    "delivery_days",
                    ValidationError::Format {
                        key: "delivery-days-invalid",
                    },
                );
                None
            }
        },
    }
}

/// Coerce an optional availability timestamp against [`DATETIME_FORMAT`].
///
/// Timestamps are interpreted as UTC.
fn clean_datetime(
    errors: &mut ValidationErrors,
    field: &'static str,
    raw: Option<&str>,
) -> Option<Option<DateTime<Utc>>> {
    match raw.map(str::trim).unwrap_or_default() {
        "" => Some(None),
        value => match NaiveDateTime::parse_from_str(value, DATETIME_FORMAT) {
            Ok(naive) => Some(Some(naive.and_utc())),
            Err(_) => {
                errors.push_field(field, ValidationError::Format { key: "datetime-invalid" });
                None
            }
        },
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::forms::store::testing::MemoryStore;
    use crate::forms::{ErrorKind, FormContext};
    use shoplokalt_core::ShopId;

    const SHOP: ShopId = ShopId::new(1);

    fn valid_form() -> ProductForm {
        ProductForm {
            name: Some("Dagens frokost".to_owned()),
            description: Some("Smørrebrød med tre slags pålæg.".to_owned()),
            price: Some("79.00".to_owned()),
            active: Some("on".to_owned()),
            ..ProductForm::default()
        }
    }

    /// A shop with three active products {11, 12, 13} and one inactive.
    fn full_shop() -> MemoryStore {
        MemoryStore::default()
            .with_product(11, 1, true)
            .with_product(12, 1, true)
            .with_product(13, 1, true)
            .with_product(14, 1, false)
    }

    fn assert_invalid<E: std::fmt::Debug>(result: Result<ProductSubmission, FormError<E>>) -> ValidationErrors {
        match result {
            Err(FormError::Invalid(errors)) => errors,
            other => panic!("expected rejection, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_new_active_product_over_quota_rejected() {
        let errors = assert_invalid(
            valid_form()
                .validate(&FormContext::create(SHOP), &full_shop())
                .await,
        );
        assert_eq!(errors.len(), 1);
        let entry = errors.iter().next().unwrap();
        assert_eq!(entry.field, None);
        assert_eq!(entry.error.kind(), ErrorKind::BusinessRule);
        assert_eq!(entry.error.arg(), Some(("limit", 3)));
    }

    #[tokio::test]
    async fn test_editing_active_product_excludes_itself() {
        use shoplokalt_core::ProductId;

        let result = valid_form()
            .validate(&FormContext::edit(SHOP, ProductId::new(11)), &full_shop())
            .await;
        assert!(result.is_ok(), "self is excluded from the count");
    }

    #[tokio::test]
    async fn test_inactive_submission_skips_quota() {
        let mut form = valid_form();
        form.active = None;
        let cleaned = form
            .validate(&FormContext::create(SHOP), &full_shop())
            .await
            .unwrap();
        assert!(!cleaned.active);
    }

    #[tokio::test]
    async fn test_quota_frees_up_after_deactivation() {
        // Shop X scenario: deactivate one of three, then a fourth activates.
        let store = MemoryStore::default()
            .with_product(11, 1, false)
            .with_product(12, 1, true)
            .with_product(13, 1, true);
        let result = valid_form()
            .validate(&FormContext::create(SHOP), &store)
            .await;
        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_other_shops_products_do_not_count() {
        let store = MemoryStore::default()
            .with_product(21, 2, true)
            .with_product(22, 2, true)
            .with_product(23, 2, true);
        let result = valid_form()
            .validate(&FormContext::create(SHOP), &store)
            .await;
        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_inverted_date_range_rejected() {
        let mut form = valid_form();
        form.active = None;
        form.start_datetime = Some("2026-05-01 12:00".to_owned());
        form.end_datetime = Some("2026-05-01 11:00".to_owned());
        let errors = assert_invalid(
            form.validate(&FormContext::create(SHOP), &MemoryStore::default())
                .await,
        );
        let entry = errors.iter().next().unwrap();
        assert_eq!(entry.field, None);
        assert_eq!(entry.error.key(), "product-dates-inverted");
    }

    #[tokio::test]
    async fn test_equal_start_and_end_accepted() {
        let mut form = valid_form();
        form.active = None;
        form.start_datetime = Some("2026-05-01 12:00".to_owned());
        form.end_datetime = Some("2026-05-01 12:00".to_owned());
        assert!(
            form.validate(&FormContext::create(SHOP), &MemoryStore::default())
                .await
                .is_ok()
        );
    }

    #[tokio::test]
    async fn test_single_datetime_skips_range_check() {
        let mut form = valid_form();
        form.active = None;
        form.end_datetime = Some("2026-05-01 11:00".to_owned());
        assert!(
            form.validate(&FormContext::create(SHOP), &MemoryStore::default())
                .await
                .is_ok()
        );
    }

    #[tokio::test]
    async fn test_both_business_rules_collected_quota_first() {
        let mut form = valid_form();
        form.start_datetime = Some("2026-05-01 12:00".to_owned());
        form.end_datetime = Some("2026-04-30 12:00".to_owned());
        let errors = assert_invalid(
            form.validate(&FormContext::create(SHOP), &full_shop())
                .await,
        );
        let keys: Vec<_> = errors.iter().map(|e| e.error.key()).collect();
        assert_eq!(keys, vec!["product-quota", "product-dates-inverted"]);
    }

    #[tokio::test]
    async fn test_field_error_suppresses_business_rules() {
        // Bad price on a shop already at quota: only the field error is
        // reported, the quota is never consulted.
        let mut form = valid_form();
        form.price = Some("gratis".to_owned());
        let errors = assert_invalid(
            form.validate(&FormContext::create(SHOP), &full_shop())
                .await,
        );
        assert_eq!(errors.len(), 1);
        let entry = errors.iter().next().unwrap();
        assert_eq!(entry.field, Some("price"));
        assert_eq!(entry.error.kind(), ErrorKind::Format);
    }

    #[tokio::test]
    async fn test_all_field_errors_collected() {
        let form = ProductForm {
            price: Some("abc".to_owned()),
            delivery_days: Some("-2".to_owned()),
            start_datetime: Some("01/05/2026".to_owned()),
            ..ProductForm::default()
        };
        let errors = assert_invalid(
            form.validate(&FormContext::create(SHOP), &MemoryStore::default())
                .await,
        );
        let fields: Vec<_> = errors.iter().map(|e| e.field).collect();
        assert_eq!(
            fields,
            vec![
                Some("name"),
                Some("description"),
                Some("price"),
                Some("delivery_days"),
                Some("start_datetime"),
            ]
        );
    }

    #[tokio::test]
    async fn test_datetime_accepts_only_the_documented_layout() {
        let mut form = valid_form();
        form.active = None;
        form.start_datetime = Some("2026-05-01T12:00".to_owned());
        let errors = assert_invalid(
            form.validate(&FormContext::create(SHOP), &MemoryStore::default())
                .await,
        );
        assert_eq!(errors.for_field("start_datetime").len(), 1);

        form.start_datetime = Some("2026-05-01 12:00".to_owned());
        assert!(
            form.validate(&FormContext::create(SHOP), &MemoryStore::default())
                .await
                .is_ok()
        );
    }

    #[tokio::test]
    async fn test_cleaned_values_round_trip() {
        let form = ProductForm {
            name: Some("  Rugbrød  ".to_owned()),
            description: Some("Friskbagt hver morgen.".to_owned()),
            image: Some("products/rugbroed.jpg".to_owned()),
            price: Some("42.50".to_owned()),
            offer_price: Some("35".to_owned()),
            color: None,
            size: Some("800 g".to_owned()),
            active: Some("on".to_owned()),
            delivery_days: Some("2".to_owned()),
            start_datetime: Some("2026-05-01 06:00".to_owned()),
            end_datetime: Some("2026-05-01 18:00".to_owned()),
        };
        let cleaned = form
            .validate(&FormContext::create(SHOP), &MemoryStore::default())
            .await
            .unwrap();

        assert_eq!(cleaned.name, "Rugbrød");
        assert_eq!(cleaned.price, Price::parse("42.50").unwrap());
        assert_eq!(cleaned.offer_price, Some(Price::parse("35").unwrap()));
        assert_eq!(cleaned.size.as_deref(), Some("800 g"));
        assert!(cleaned.active);
        assert_eq!(cleaned.delivery_days, Some(2));
        assert_eq!(
            cleaned.start_at.unwrap().to_rfc3339(),
            "2026-05-01T06:00:00+00:00"
        );
    }
}
