//! Server configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Required
//! - `DATABASE_URL` - `PostgreSQL` connection string
//!
//! ## Optional
//! - `HOST` - Bind address (default: 127.0.0.1)
//! - `PORT` - Listen port (default: 8000)
//! - `LOCALE` - Default message locale, `da` or `en` (default: da)
//! - `ALLOWED_HOSTS_ECS` - When set, resolve allowed hosts from the ECS
//!   task metadata endpoint at startup
//!
//! ## Optional (storage)
//! - `USE_S3` - `TRUE` serves static/media from an S3 bucket
//! - `AWS_STORAGE_BUCKET_NAME` - Bucket name (default: shoplokalt)
//! - `AWS_S3_REGION` - Bucket region (default: eu-north-1)
//! - `STATIC_ROOT` / `MEDIA_ROOT` - Local directories when S3 is off
//!
//! ## Optional (mail - enables the contact relay)
//! - `SMTP_HOST`, `SMTP_USERNAME`, `SMTP_PASSWORD`, `SMTP_FROM`
//! - `SMTP_PORT` - (default: 587)

use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;
use std::time::Duration;

use secrecy::SecretString;
use serde::Deserialize;
use thiserror::Error;

/// ECS task metadata endpoint (fixed link-local address on Fargate/EC2).
const ECS_METADATA_URL: &str = "http://169.254.170.2/v2/metadata";

/// How long to wait for the metadata endpoint before assuming we are not
/// running in ECS.
const ECS_METADATA_TIMEOUT: Duration = Duration::from_millis(100);

/// Public domain served behind the load balancer.
const PUBLIC_DOMAIN: &str = "foodbee.dk";

/// Locales with bundled translations.
const SUPPORTED_LOCALES: &[&str] = &["da", "en"];

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Server application configuration.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// `PostgreSQL` database connection URL (contains password)
    pub database_url: SecretString,
    /// IP address to bind the server to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
    /// Host header values this server answers for
    pub allowed_hosts: Vec<HostPattern>,
    /// Whether to resolve allowed hosts from ECS task metadata at startup
    pub ecs_allowed_hosts: bool,
    /// Static/media file storage
    pub storage: StorageConfig,
    /// SMTP configuration (contact relay disabled when absent)
    pub smtp: Option<SmtpConfig>,
    /// Default locale for validation messages
    pub locale: String,
}

/// A Host header pattern.
///
/// Entries written with a leading dot match any subdomain, mirroring the
/// load-balancer entry `.elb.amazonaws.com`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HostPattern {
    /// Matches the host exactly.
    Exact(String),
    /// Matches the domain itself and any subdomain of it.
    Suffix(String),
}

impl HostPattern {
    /// Parse a configuration entry; a leading dot selects suffix matching.
    #[must_use]
    pub fn new(entry: &str) -> Self {
        entry.strip_prefix('.').map_or_else(
            || Self::Exact(entry.to_owned()),
            |suffix| Self::Suffix(suffix.to_owned()),
        )
    }

    /// Whether `host` (without port) matches this pattern.
    #[must_use]
    pub fn matches(&self, host: &str) -> bool {
        match self {
            Self::Exact(exact) => host.eq_ignore_ascii_case(exact),
            Self::Suffix(suffix) => {
                let host = host.to_ascii_lowercase();
                let suffix = suffix.to_ascii_lowercase();
                host == suffix || host.ends_with(&format!(".{suffix}"))
            }
        }
    }
}

/// Static and media file storage selection.
#[derive(Debug, Clone)]
pub enum StorageConfig {
    /// Files live in an S3 bucket behind a public domain.
    S3 {
        /// Bucket name.
        bucket: String,
        /// Public bucket domain, e.g. `shoplokalt.s3.eu-north-1.amazonaws.com`.
        custom_domain: String,
        /// Base URL for static assets.
        static_url: String,
        /// Base URL for uploaded media.
        media_url: String,
    },
    /// Files live on the local filesystem and are served by this process.
    Local {
        /// Directory with static assets.
        static_dir: PathBuf,
        /// Directory with uploaded media.
        media_dir: PathBuf,
        /// URL prefix for static assets.
        static_url: String,
        /// URL prefix for uploaded media.
        media_url: String,
    },
}

impl StorageConfig {
    fn from_env() -> Self {
        if get_optional_env("USE_S3").as_deref() == Some("TRUE") {
            let bucket = get_env_or_default("AWS_STORAGE_BUCKET_NAME", "shoplokalt");
            let region = get_env_or_default("AWS_S3_REGION", "eu-north-1");
            let custom_domain = format!("{bucket}.s3.{region}.amazonaws.com");
            Self::S3 {
                static_url: format!("https://{custom_domain}/static/"),
                media_url: format!("https://{custom_domain}/media/"),
                bucket,
                custom_domain,
            }
        } else {
            Self::Local {
                static_dir: PathBuf::from(get_env_or_default("STATIC_ROOT", "static")),
                media_dir: PathBuf::from(get_env_or_default("MEDIA_ROOT", "media")),
                static_url: "/static/".to_owned(),
                media_url: "/media/".to_owned(),
            }
        }
    }

    /// Base URL for uploaded media, always with a trailing slash.
    #[must_use]
    pub fn media_url(&self) -> &str {
        match self {
            Self::S3 { media_url, .. } | Self::Local { media_url, .. } => media_url,
        }
    }

    /// Base URL for static assets, always with a trailing slash.
    #[must_use]
    pub fn static_url(&self) -> &str {
        match self {
            Self::S3 { static_url, .. } | Self::Local { static_url, .. } => static_url,
        }
    }
}

/// SMTP configuration for the contact relay.
///
/// Implements `Debug` manually to redact the password.
#[derive(Clone)]
pub struct SmtpConfig {
    /// SMTP server hostname
    pub host: String,
    /// SMTP server port
    pub port: u16,
    /// SMTP authentication username
    pub username: String,
    /// SMTP authentication password
    pub password: SecretString,
    /// Email sender address (From header)
    pub from_address: String,
}

impl std::fmt::Debug for SmtpConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SmtpConfig")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("username", &self.username)
            .field("password", &"[REDACTED]")
            .field("from_address", &self.from_address)
            .finish()
    }
}

impl SmtpConfig {
    /// Load SMTP configuration from environment.
    ///
    /// Returns `None` when `SMTP_HOST` is not set (contact relay disabled);
    /// when it is set, the remaining variables are required.
    fn from_env() -> Result<Option<Self>, ConfigError> {
        let Some(host) = get_optional_env("SMTP_HOST") else {
            return Ok(None);
        };

        let port = get_env_or_default("SMTP_PORT", "587")
            .parse::<u16>()
            .map_err(|e| ConfigError::InvalidEnvVar("SMTP_PORT".to_owned(), e.to_string()))?;

        Ok(Some(Self {
            host,
            port,
            username: get_required_env("SMTP_USERNAME")?,
            password: SecretString::from(get_required_env("SMTP_PASSWORD")?),
            from_address: get_required_env("SMTP_FROM")?,
        }))
    }
}

impl ServerConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present. The
    /// allowed-host list starts from the local defaults; call
    /// [`Self::resolve_ecs_hosts`] afterwards to swap in the ECS-derived
    /// list when `ecs_allowed_hosts` is set.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if required variables are missing or invalid.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let database_url = get_required_env("DATABASE_URL").map(SecretString::from)?;
        let host = get_env_or_default("HOST", "127.0.0.1")
            .parse::<IpAddr>()
            .map_err(|e| ConfigError::InvalidEnvVar("HOST".to_owned(), e.to_string()))?;
        let port = get_env_or_default("PORT", "8000")
            .parse::<u16>()
            .map_err(|e| ConfigError::InvalidEnvVar("PORT".to_owned(), e.to_string()))?;

        let locale = get_env_or_default("LOCALE", "da");
        if !SUPPORTED_LOCALES.contains(&locale.as_str()) {
            return Err(ConfigError::InvalidEnvVar(
                "LOCALE".to_owned(),
                format!("unsupported locale {locale}, expected one of {SUPPORTED_LOCALES:?}"),
            ));
        }

        Ok(Self {
            database_url,
            host,
            port,
            allowed_hosts: default_allowed_hosts(),
            ecs_allowed_hosts: get_optional_env("ALLOWED_HOSTS_ECS").is_some(),
            storage: StorageConfig::from_env(),
            smtp: SmtpConfig::from_env()?,
            locale,
        })
    }

    /// Replace the allowed-host list with the ECS-derived one, if enabled.
    ///
    /// Queries the ECS task metadata endpoint for the container's private
    /// IP. When the endpoint is unreachable (not running in ECS, or the
    /// metadata service is down) the local defaults stay in place - the
    /// original deployment treated that as a soft failure and so do we.
    pub async fn resolve_ecs_hosts(&mut self) {
        if !self.ecs_allowed_hosts {
            return;
        }

        match fetch_ecs_container_ip().await {
            Ok(ip) => {
                tracing::info!(%ip, "Allowed hosts resolved from ECS task metadata");
                self.allowed_hosts = vec![
                    HostPattern::Suffix("elb.amazonaws.com".to_owned()),
                    HostPattern::Exact(ip),
                    HostPattern::Exact(PUBLIC_DOMAIN.to_owned()),
                ];
            }
            Err(e) => {
                tracing::warn!(error = %e, "ECS task metadata unavailable, keeping default allowed hosts");
            }
        }
    }

    /// Returns the socket address for binding the server.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

/// Allowed hosts outside ECS: local development only.
fn default_allowed_hosts() -> Vec<HostPattern> {
    vec![
        HostPattern::Exact("localhost".to_owned()),
        HostPattern::Exact("127.0.0.1".to_owned()),
    ]
}

/// Shape of the `/v2/metadata` response, reduced to the fields we read.
#[derive(Debug, Deserialize)]
struct TaskMetadata {
    #[serde(rename = "Containers", default)]
    containers: Vec<ContainerMetadata>,
}

#[derive(Debug, Deserialize)]
struct ContainerMetadata {
    #[serde(rename = "Networks", default)]
    networks: Vec<NetworkMetadata>,
}

#[derive(Debug, Deserialize)]
struct NetworkMetadata {
    #[serde(rename = "IPv4Addresses", default)]
    ipv4_addresses: Vec<String>,
}

/// Errors resolving the container IP from task metadata.
#[derive(Debug, Error)]
enum EcsMetadataError {
    #[error("metadata request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("metadata response contained no IPv4 address")]
    NoAddress,
}

/// Fetch the first IPv4 address of the first container in the task.
async fn fetch_ecs_container_ip() -> Result<String, EcsMetadataError> {
    let client = reqwest::Client::builder()
        .timeout(ECS_METADATA_TIMEOUT)
        .build()?;

    let metadata: TaskMetadata = client
        .get(ECS_METADATA_URL)
        .send()
        .await?
        .error_for_status()?
        .json()
        .await?;

    metadata
        .containers
        .into_iter()
        .flat_map(|c| c.networks)
        .flat_map(|n| n.ipv4_addresses)
        .next()
        .ok_or(EcsMetadataError::NoAddress)
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Get a required environment variable.
fn get_required_env(key: &str) -> Result<String, ConfigError> {
    std::env::var(key).map_err(|_| ConfigError::MissingEnvVar(key.to_owned()))
}

/// Get an optional environment variable.
fn get_optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok()
}

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_owned())
}
