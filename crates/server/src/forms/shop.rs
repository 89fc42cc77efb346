//! Shop registration and CVR update forms.

use serde::Deserialize;
use shoplokalt_core::{Cvr, CvrError, Email, Phone, PhoneError, Postcode};

use super::{
    FormError, ValidationError, ValidationErrors, ValidationStore, clean_email, required_text,
};

/// Longest accepted shop name, in characters.
pub const NAME_MAX: usize = 100;
/// Longest accepted street address, in characters.
pub const ADDRESS_MAX: usize = 199;

/// Raw shop registration submission.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ShopRegisterForm {
    pub name: Option<String>,
    pub address: Option<String>,
    pub postcode: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
}

/// A cleaned registration, with the city resolved from the postcode
/// registry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShopRegistration {
    pub name: String,
    pub address: String,
    pub postcode: Postcode,
    pub city: String,
    pub email: Email,
    pub phone: Phone,
}

impl ShopRegisterForm {
    /// Validate the submission.
    ///
    /// The postcode is coerced to an integer (format failure) and then
    /// checked against the registry (reference failure) - two
    /// distinguishable kinds on the same field. The registry lookup runs
    /// regardless of other fields' errors, so a submission with a bad
    /// email still reports whether its postcode exists.
    ///
    /// # Errors
    ///
    /// `FormError::Invalid` with every field failure found, or
    /// `FormError::Store` if the registry could not be read.
    pub async fn validate<S: ValidationStore>(
        &self,
        store: &S,
    ) -> Result<ShopRegistration, FormError<S::Error>> {
        let mut errors = ValidationErrors::new();

        let name = required_text(
            &mut errors,
            "name",
            self.name.as_deref(),
            "name-required",
            NAME_MAX,
            "name-too-long",
        );
        let address = required_text(
            &mut errors,
            "address",
            self.address.as_deref(),
            "address-required",
            ADDRESS_MAX,
            "address-too-long",
        );

        let located = match self.postcode.as_deref().map(str::trim).unwrap_or_default() {
            "" => {
                errors.push_field(
                    "postcode",
                    ValidationError::Format {
                        key: "postcode-required",
                    },
                );
                None
            }
            raw => match Postcode::parse(raw) {
                Err(_) => {
                    errors.push_field(
                        "postcode",
                        ValidationError::Format {
                            key: "postcode-invalid",
                        },
                    );
                    None
                }
                Ok(postcode) => match store
                    .postcode_city(postcode)
                    .await
                    .map_err(FormError::Store)?
                {
                    Some(city) => Some((postcode, city)),
                    None => {
                        errors.push_field(
                            "postcode",
                            ValidationError::Reference {
                                key: "postcode-unknown",
                            },
                        );
                        None
                    }
                },
            },
        };

        let email = clean_email(&mut errors, "email", self.email.as_deref());
        let phone = clean_phone(&mut errors, self.phone.as_deref());

        match (name, address, located, email, phone) {
            (Some(name), Some(address), Some((postcode, city)), Some(email), Some(phone))
                if errors.is_empty() =>
            {
                Ok(ShopRegistration {
                    name,
                    address,
                    postcode,
                    city,
                    email,
                    phone,
                })
            }
            _ => Err(FormError::Invalid(errors)),
        }
    }
}

fn clean_phone(errors: &mut ValidationErrors, raw: Option<&str>) -> Option<Phone> {
    match Phone::parse(raw.unwrap_or_default()) {
        Ok(phone) => Some(phone),
        Err(PhoneError::Empty) => {
            errors.push_field("phone", ValidationError::Format { key: "phone-required" });
            None
        }
        Err(_) => {
            errors.push_field("phone", ValidationError::Format { key: "phone-invalid" });
            None
        }
    }
}

/// Raw CVR update submission.
///
/// A pass-through form: the single field is coerced and everything else
/// (uniqueness among shops) is the store's concern on write.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ShopCvrForm {
    pub cvr: Option<String>,
}

impl ShopCvrForm {
    /// Validate the submission.
    ///
    /// # Errors
    ///
    /// Returns the field failure if the CVR number is absent or malformed.
    pub fn validate(&self) -> Result<Cvr, ValidationErrors> {
        let mut errors = ValidationErrors::new();
        match Cvr::parse(self.cvr.as_deref().unwrap_or_default()) {
            Ok(cvr) => Ok(cvr),
            Err(CvrError::Empty) => {
                errors.push_field("cvr", ValidationError::Format { key: "cvr-required" });
                Err(errors)
            }
            Err(_) => {
                errors.push_field("cvr", ValidationError::Format { key: "cvr-invalid" });
                Err(errors)
            }
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::forms::ErrorKind;
    use crate::forms::store::testing::MemoryStore;

    fn valid_form() -> ShopRegisterForm {
        ShopRegisterForm {
            name: Some("Slagter Holm".to_owned()),
            address: Some("Vestergade 12".to_owned()),
            postcode: Some("8000".to_owned()),
            email: Some("butik@slagterholm.dk".to_owned()),
            phone: Some("+45 86 12 34 56".to_owned()),
        }
    }

    fn store() -> MemoryStore {
        MemoryStore::default().with_postcode(8000, "Aarhus C")
    }

    #[tokio::test]
    async fn test_valid_registration_resolves_city() {
        let cleaned = valid_form().validate(&store()).await.unwrap();
        assert_eq!(cleaned.postcode, Postcode::new(8000));
        assert_eq!(cleaned.city, "Aarhus C");
        assert_eq!(cleaned.phone.as_str(), "+4586123456");
    }

    #[tokio::test]
    async fn test_unknown_postcode_is_reference_error() {
        let mut form = valid_form();
        form.postcode = Some("9999".to_owned());
        let err = form.validate(&store()).await.unwrap_err();
        let FormError::Invalid(errors) = err else {
            panic!("expected rejection");
        };
        let entry = errors.iter().next().unwrap();
        assert_eq!(entry.field, Some("postcode"));
        assert_eq!(entry.error.kind(), ErrorKind::Reference);
    }

    #[tokio::test]
    async fn test_non_integer_postcode_is_format_error() {
        let mut form = valid_form();
        form.postcode = Some("abc".to_owned());
        let FormError::Invalid(errors) = form.validate(&store()).await.unwrap_err() else {
            panic!("expected rejection");
        };
        let entry = errors.iter().next().unwrap();
        assert_eq!(entry.error.kind(), ErrorKind::Format);
        assert_eq!(entry.error.key(), "postcode-invalid");
    }

    #[tokio::test]
    async fn test_postcode_checked_even_when_email_is_bad() {
        let mut form = valid_form();
        form.email = Some("broken".to_owned());
        form.postcode = Some("9999".to_owned());
        let FormError::Invalid(errors) = form.validate(&store()).await.unwrap_err() else {
            panic!("expected rejection");
        };
        assert_eq!(errors.for_field("postcode").len(), 1);
        assert_eq!(errors.for_field("email").len(), 1);
    }

    #[tokio::test]
    async fn test_missing_fields_all_reported() {
        let FormError::Invalid(errors) =
            ShopRegisterForm::default().validate(&store()).await.unwrap_err()
        else {
            panic!("expected rejection");
        };
        let fields: Vec<_> = errors.iter().map(|e| e.field).collect();
        assert_eq!(
            fields,
            vec![
                Some("name"),
                Some("address"),
                Some("postcode"),
                Some("email"),
                Some("phone"),
            ]
        );
    }

    #[test]
    fn test_cvr_form_valid() {
        let form = ShopCvrForm {
            cvr: Some("38071563".to_owned()),
        };
        assert_eq!(form.validate().unwrap().as_str(), "38071563");
    }

    #[test]
    fn test_cvr_form_rejects_malformed() {
        let form = ShopCvrForm {
            cvr: Some("1234".to_owned()),
        };
        let errors = form.validate().unwrap_err();
        let entry = errors.iter().next().unwrap();
        assert_eq!(entry.field, Some("cvr"));
        assert_eq!(entry.error.key(), "cvr-invalid");
    }

    #[test]
    fn test_cvr_form_rejects_missing() {
        let errors = ShopCvrForm::default().validate().unwrap_err();
        assert_eq!(errors.iter().next().unwrap().error.key(), "cvr-required");
    }
}
