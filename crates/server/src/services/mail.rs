//! Contact relay: delivers validated contact messages to shops.
//!
//! Uses SMTP via lettre. Messages are plain text; the customer's address
//! goes into Reply-To so the shop can answer directly.

use lettre::{
    AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor,
    message::header::ContentType,
    transport::smtp::{Error as SmtpError, authentication::Credentials},
};
use secrecy::ExposeSecret;
use thiserror::Error;

use shoplokalt_core::Email;

use crate::config::SmtpConfig;
use crate::forms::ContactMessage;

/// Errors that can occur when sending email.
#[derive(Debug, Error)]
pub enum MailError {
    /// SMTP transport error.
    #[error("SMTP error: {0}")]
    Smtp(#[from] SmtpError),

    /// Failed to build the email message.
    #[error("failed to build message: {0}")]
    MessageBuild(#[from] lettre::error::Error),

    /// An address did not parse as a mailbox.
    #[error("invalid email address: {0}")]
    InvalidAddress(String),
}

/// Mail service for the contact relay.
#[derive(Clone)]
pub struct Mailer {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    from_address: String,
}

impl Mailer {
    /// Create a mailer from SMTP configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the relay configuration is invalid.
    pub fn new(config: &SmtpConfig) -> Result<Self, SmtpError> {
        let credentials = Credentials::new(
            config.username.clone(),
            config.password.expose_secret().to_owned(),
        );

        let transport = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&config.host)?
            .port(config.port)
            .credentials(credentials)
            .build();

        Ok(Self {
            transport,
            from_address: config.from_address.clone(),
        })
    }

    /// Relay a cleaned contact message to a shop.
    ///
    /// # Errors
    ///
    /// Returns `MailError` if the message cannot be built or handed to the
    /// relay.
    pub async fn send_contact(
        &self,
        shop_email: &Email,
        message: &ContactMessage,
    ) -> Result<(), MailError> {
        let email = Message::builder()
            .from(
                self.from_address
                    .parse()
                    .map_err(|_| MailError::InvalidAddress(self.from_address.clone()))?,
            )
            .reply_to(
                message
                    .email
                    .as_str()
                    .parse()
                    .map_err(|_| MailError::InvalidAddress(message.email.to_string()))?,
            )
            .to(shop_email
                .as_str()
                .parse()
                .map_err(|_| MailError::InvalidAddress(shop_email.to_string()))?)
            .subject(&message.subject)
            .header(ContentType::TEXT_PLAIN)
            .body(message.message.clone())?;

        self.transport.send(email).await?;

        tracing::info!(to = %shop_email, "Contact message relayed");
        Ok(())
    }
}
