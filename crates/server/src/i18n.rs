//! Localized validation messages.
//!
//! Message texts live in Fluent resources under `locales/`, one per
//! supported language, embedded at compile time. The validators only ever
//! carry message keys plus at most one numeric argument; this module turns
//! those into user-facing text.

use std::collections::HashMap;

use fluent_bundle::concurrent::FluentBundle;
use fluent_bundle::{FluentArgs, FluentResource};
use unic_langid::LanguageIdentifier;

use crate::forms::ValidationError;

const DA_FTL: &str = include_str!("../locales/da.ftl");
const EN_FTL: &str = include_str!("../locales/en.ftl");

/// Locale used when none is requested and the configured one is missing.
pub const FALLBACK_LOCALE: &str = "da";

/// Errors building the message bundles.
#[derive(Debug, thiserror::Error)]
pub enum I18nError {
    /// A locale tag did not parse.
    #[error("invalid locale tag: {0}")]
    InvalidLocale(String),
    /// A Fluent resource failed to parse or load.
    #[error("invalid message resource for {locale}: {reason}")]
    BadResource {
        /// Locale the resource belongs to.
        locale: &'static str,
        /// Parser or bundle error description.
        reason: String,
    },
}

/// Message lookup over the embedded locales.
///
/// Lives in shared application state; the concurrent bundle flavor makes
/// it usable from every request handler at once.
pub struct Messages {
    default_locale: String,
    bundles: HashMap<&'static str, FluentBundle<FluentResource>>,
}

impl std::fmt::Debug for Messages {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Messages")
            .field("default_locale", &self.default_locale)
            .field("locales", &self.bundles.keys().collect::<Vec<_>>())
            .finish()
    }
}

impl Messages {
    /// Build the bundles for every embedded locale.
    ///
    /// # Errors
    ///
    /// Returns `I18nError` if a bundled resource is malformed - a build
    /// defect, not a runtime condition.
    pub fn new(default_locale: &str) -> Result<Self, I18nError> {
        let mut bundles = HashMap::new();
        for (tag, source) in [("da", DA_FTL), ("en", EN_FTL)] {
            bundles.insert(tag, build_bundle(tag, source)?);
        }
        Ok(Self {
            default_locale: default_locale.to_owned(),
            bundles,
        })
    }

    /// Render one validation error in `locale`, or in the default locale
    /// when `None`.
    #[must_use]
    pub fn render(&self, locale: Option<&str>, error: &ValidationError) -> String {
        self.format(
            locale.unwrap_or(&self.default_locale),
            error.key(),
            error.arg(),
        )
    }

    /// The configured default locale.
    #[must_use]
    pub fn default_locale(&self) -> &str {
        &self.default_locale
    }

    fn format(&self, locale: &str, key: &str, arg: Option<(&'static str, i64)>) -> String {
        let bundle = self
            .bundles
            .get(locale)
            .or_else(|| self.bundles.get(FALLBACK_LOCALE));
        let Some(bundle) = bundle else {
            return key.to_owned();
        };
        let Some(pattern) = bundle.get_message(key).and_then(|m| m.value()) else {
            // Unknown key: surface the key itself rather than nothing.
            tracing::warn!(key, locale, "missing validation message");
            return key.to_owned();
        };

        let mut args = FluentArgs::new();
        if let Some((name, value)) = arg {
            args.set(name, value);
        }

        let mut format_errors = Vec::new();
        let text = bundle
            .format_pattern(pattern, Some(&args), &mut format_errors)
            .into_owned();
        if !format_errors.is_empty() {
            tracing::warn!(key, locale, ?format_errors, "message formatting errors");
        }
        text
    }
}

fn build_bundle(
    tag: &'static str,
    source: &str,
) -> Result<FluentBundle<FluentResource>, I18nError> {
    let langid: LanguageIdentifier = tag
        .parse()
        .map_err(|_| I18nError::InvalidLocale(tag.to_owned()))?;

    let resource = FluentResource::try_new(source.to_owned()).map_err(|(_, errors)| {
        I18nError::BadResource {
            locale: tag,
            reason: errors
                .iter()
                .map(|e| e.to_string())
                .collect::<Vec<_>>()
                .join(", "),
        }
    })?;

    let mut bundle = FluentBundle::new_concurrent(vec![langid]);
    // Plain text output; the Unicode isolation marks are for bidi HTML.
    bundle.set_use_isolating(false);
    bundle
        .add_resource(resource)
        .map_err(|errors| I18nError::BadResource {
            locale: tag,
            reason: errors
                .iter()
                .map(|e| format!("{e:?}"))
                .collect::<Vec<_>>()
                .join(", "),
        })?;

    Ok(bundle)
}
