//! Contact form: a customer writes to a shop.

use serde::Deserialize;
use shoplokalt_core::Email;

use super::{ValidationErrors, clean_email, required_text};

/// Longest accepted subject, in characters.
pub const SUBJECT_MAX: usize = 199;
/// Longest accepted message body, in characters.
pub const MESSAGE_MAX: usize = 9999;

/// Raw contact submission.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ContactForm {
    pub email: Option<String>,
    pub subject: Option<String>,
    pub message: Option<String>,
}

/// A cleaned contact submission, ready for relay to the shop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactMessage {
    /// The customer's address, used as reply-to.
    pub email: Email,
    pub subject: String,
    pub message: String,
}

impl ContactForm {
    /// Validate the submission.
    ///
    /// All three fields are required; there are no cross-field rules, so
    /// no store access is needed.
    ///
    /// # Errors
    ///
    /// Returns every field failure found, in field order.
    pub fn validate(&self) -> Result<ContactMessage, ValidationErrors> {
        let mut errors = ValidationErrors::new();

        let email = clean_email(&mut errors, "email", self.email.as_deref());
        let subject = required_text(
            &mut errors,
            "subject",
            self.subject.as_deref(),
            "subject-required",
            SUBJECT_MAX,
            "subject-too-long",
        );
        let message = required_text(
            &mut errors,
            "message",
            self.message.as_deref(),
            "message-required",
            MESSAGE_MAX,
            "message-too-long",
        );

        match (email, subject, message) {
            (Some(email), Some(subject), Some(message)) if errors.is_empty() => Ok(ContactMessage {
                email,
                subject,
                message,
            }),
            _ => Err(errors),
        }
    }
}
