//! Application state shared across handlers.

use std::sync::Arc;

use sqlx::PgPool;

use crate::config::ServerConfig;
use crate::i18n::{I18nError, Messages};
use crate::services::Mailer;

/// Application state shared across all handlers.
///
/// Cheaply cloneable via `Arc`.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: ServerConfig,
    pool: PgPool,
    messages: Messages,
    mailer: Option<Mailer>,
}

impl AppState {
    /// Create a new application state.
    ///
    /// The mailer is only constructed when SMTP is configured; without it
    /// the contact relay responds as unavailable.
    ///
    /// # Errors
    ///
    /// Returns an error if the bundled message resources are malformed or
    /// the SMTP relay configuration is invalid.
    pub fn new(config: ServerConfig, pool: PgPool) -> Result<Self, StateError> {
        let messages = Messages::new(&config.locale)?;
        let mailer = config.smtp.as_ref().map(Mailer::new).transpose()?;

        Ok(Self {
            inner: Arc::new(AppStateInner {
                config,
                pool,
                messages,
                mailer,
            }),
        })
    }

    /// Get a reference to the server configuration.
    #[must_use]
    pub fn config(&self) -> &ServerConfig {
        &self.inner.config
    }

    /// Get a reference to the database connection pool.
    #[must_use]
    pub fn pool(&self) -> &PgPool {
        &self.inner.pool
    }

    /// Get a reference to the localized messages.
    #[must_use]
    pub fn messages(&self) -> &Messages {
        &self.inner.messages
    }

    /// Get a reference to the mailer, if SMTP is configured.
    #[must_use]
    pub fn mailer(&self) -> Option<&Mailer> {
        self.inner.mailer.as_ref()
    }
}

/// Error building the application state.
#[derive(Debug, thiserror::Error)]
pub enum StateError {
    #[error("message bundles: {0}")]
    I18n(#[from] I18nError),
    #[error("mail relay: {0}")]
    Mail(#[from] lettre::transport::smtp::Error),
}
