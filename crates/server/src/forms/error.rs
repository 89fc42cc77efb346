//! Validation error taxonomy.
//!
//! Four machine-distinguishable kinds, each carrying a message key for
//! localization and at most one numeric display parameter. Errors are
//! tagged with the field they belong to, or with no field at all for
//! form-level business-rule failures.

use core::fmt;

use serde::Serialize;

/// A single validation failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Raw value cannot be coerced to the field's type (bad email syntax,
    /// non-integer postcode, unparseable datetime, missing required input).
    Format {
        /// Localization key.
        key: &'static str,
    },
    /// String exceeds a declared maximum length.
    Length {
        /// Localization key.
        key: &'static str,
        /// The declared maximum, in characters.
        max: usize,
    },
    /// Coerced value does not resolve to an existing referenced entity.
    Reference {
        /// Localization key.
        key: &'static str,
    },
    /// Cross-field or store-state invariant violated.
    BusinessRule {
        /// Localization key.
        key: &'static str,
        /// The violated limit, when the rule has one.
        limit: Option<u32>,
    },
}

impl ValidationError {
    /// The machine-distinguishable kind.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::Format { .. } => ErrorKind::Format,
            Self::Length { .. } => ErrorKind::Length,
            Self::Reference { .. } => ErrorKind::Reference,
            Self::BusinessRule { .. } => ErrorKind::BusinessRule,
        }
    }

    /// The localization key.
    #[must_use]
    pub const fn key(&self) -> &'static str {
        match self {
            Self::Format { key }
            | Self::Length { key, .. }
            | Self::Reference { key }
            | Self::BusinessRule { key, .. } => key,
        }
    }

    /// The single numeric message parameter, if the message has one.
    #[must_use]
    pub fn arg(&self) -> Option<(&'static str, i64)> {
        match self {
            Self::Length { max, .. } => Some(("max", i64::try_from(*max).unwrap_or(i64::MAX))),
            Self::BusinessRule {
                limit: Some(limit), ..
            } => Some(("limit", i64::from(*limit))),
            Self::Format { .. } | Self::Reference { .. } | Self::BusinessRule { limit: None, .. } => {
                None
            }
        }
    }
}

/// The kind of a [`ValidationError`], as exposed to callers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ErrorKind {
    Format,
    Length,
    Reference,
    BusinessRule,
}

impl ErrorKind {
    /// Stable kebab-case name, matching the serialized form.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Format => "format",
            Self::Length => "length",
            Self::Reference => "reference",
            Self::BusinessRule => "business-rule",
        }
    }
}

/// One entry in a rejection: an error and the field it belongs to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorEntry {
    /// The offending field, or `None` for a form-level error.
    pub field: Option<&'static str>,
    /// The failure itself.
    pub error: ValidationError,
}

/// An ordered collection of validation failures.
///
/// Field errors appear in field-declaration order, form-level errors after
/// them in rule-evaluation order; nothing is deduplicated or reordered, so
/// the first entry is the first message a user should see.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors {
    entries: Vec<ErrorEntry>,
}

impl ValidationErrors {
    /// An empty collection.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Record a field-level error.
    pub fn push_field(&mut self, field: &'static str, error: ValidationError) {
        self.entries.push(ErrorEntry {
            field: Some(field),
            error,
        });
    }

    /// Record a form-level error.
    pub fn push_form(&mut self, error: ValidationError) {
        self.entries.push(ErrorEntry { field: None, error });
    }

    /// Whether no error has been recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of recorded errors.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Iterate the entries in order.
    pub fn iter(&self) -> std::slice::Iter<'_, ErrorEntry> {
        self.entries.iter()
    }

    /// All entries attached to `field`.
    #[must_use]
    pub fn for_field(&self, field: &str) -> Vec<&ErrorEntry> {
        self.entries
            .iter()
            .filter(|e| e.field == Some(field))
            .collect()
    }

    /// All form-level entries.
    #[must_use]
    pub fn form_level(&self) -> Vec<&ErrorEntry> {
        self.entries.iter().filter(|e| e.field.is_none()).collect()
    }
}

impl IntoIterator for ValidationErrors {
    type Item = ErrorEntry;
    type IntoIter = std::vec::IntoIter<ErrorEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

impl<'a> IntoIterator for &'a ValidationErrors {
    type Item = &'a ErrorEntry;
    type IntoIter = std::slice::Iter<'a, ErrorEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for entry in &self.entries {
            if !first {
                write!(f, ", ")?;
            }
            first = false;
            match entry.field {
                Some(field) => write!(f, "{field}: {}", entry.error.key())?,
                None => write!(f, "{}", entry.error.key())?,
            }
        }
        Ok(())
    }
}

/// Outcome of a validation that had to consult the store.
///
/// A rejected submission is a normal, retriable outcome; a store failure
/// is not, and propagates separately.
#[derive(Debug, thiserror::Error)]
pub enum FormError<E> {
    /// The submission was rejected.
    #[error("submission rejected: {0}")]
    Invalid(ValidationErrors),
    /// The data store failed while a rule was being checked.
    #[error("store error during validation")]
    Store(#[source] E),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_order_is_preserved() {
        let mut errors = ValidationErrors::new();
        errors.push_field("email", ValidationError::Format { key: "email-invalid" });
        errors.push_field(
            "subject",
            ValidationError::Length {
                key: "subject-too-long",
                max: 199,
            },
        );
        errors.push_form(ValidationError::BusinessRule {
            key: "product-quota",
            limit: Some(3),
        });

        let kinds: Vec<ErrorKind> = errors.iter().map(|e| e.error.kind()).collect();
        assert_eq!(
            kinds,
            vec![ErrorKind::Format, ErrorKind::Length, ErrorKind::BusinessRule]
        );
        assert_eq!(errors.len(), 3);
        assert_eq!(errors.for_field("subject").len(), 1);
        assert_eq!(errors.form_level().len(), 1);
    }

    #[test]
    fn test_args() {
        let quota = ValidationError::BusinessRule {
            key: "product-quota",
            limit: Some(3),
        };
        assert_eq!(quota.arg(), Some(("limit", 3)));

        let length = ValidationError::Length {
            key: "subject-too-long",
            max: 199,
        };
        assert_eq!(length.arg(), Some(("max", 199)));

        let format = ValidationError::Format { key: "email-invalid" };
        assert_eq!(format.arg(), None);
    }

    #[test]
    fn test_kind_names() {
        assert_eq!(ErrorKind::Format.as_str(), "format");
        assert_eq!(ErrorKind::BusinessRule.as_str(), "business-rule");
    }

    #[test]
    fn test_display_lists_keys() {
        let mut errors = ValidationErrors::new();
        errors.push_field("postcode", ValidationError::Reference { key: "postcode-unknown" });
        errors.push_form(ValidationError::BusinessRule {
            key: "product-dates-inverted",
            limit: None,
        });
        assert_eq!(
            errors.to_string(),
            "postcode: postcode-unknown, product-dates-inverted"
        );
    }
}
