//! Index configuration: default locale, static fallback chains and the
//! auto-create policy.

use std::{collections::HashMap, fs, path::Path};

use serde::{Deserialize, Serialize};
use unic_langid::LanguageIdentifier;

use crate::{error::Error, types::CACHE_KEY_SEPARATOR};

/// Locale used when a lookup passes an empty locale and as the last fallback.
pub const DEFAULT_LOCALE: &str = "en-US";

/// What the index persists when a key is missing in every candidate locale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MissingPolicy {
    /// Always persist the missing key, with an empty value when no default is set.
    #[default]
    Always,
    /// Persist only when the lookup carries an explicit, non-empty default.
    WithDefaultOnly,
}

/// Options for [`crate::I18n`].
///
/// ```rust
/// use langcache::{IndexOptions, MissingPolicy};
///
/// let options = IndexOptions::from_yaml_str(
///     "default_locale: fr-FR\nfallback_locales:\n  fr-CA: [fr-FR]\n",
/// )?;
/// assert_eq!(options.default_locale, "fr-FR");
/// assert_eq!(options.persist_missing, MissingPolicy::Always);
/// # Ok::<(), langcache::Error>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct IndexOptions {
    /// Process-wide default locale.
    pub default_locale: String,
    /// Static fallback chains keyed by requested locale.
    pub fallback_locales: HashMap<String, Vec<String>>,
    /// Auto-create behaviour on a complete miss.
    pub persist_missing: MissingPolicy,
}

impl Default for IndexOptions {
    fn default() -> Self {
        Self {
            default_locale: DEFAULT_LOCALE.to_string(),
            fallback_locales: HashMap::new(),
            persist_missing: MissingPolicy::default(),
        }
    }
}

impl IndexOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the default locale.
    pub fn with_default_locale(mut self, locale: impl Into<String>) -> Self {
        self.default_locale = locale.into();
        self
    }

    /// Sets the static fallback chain for one locale.
    pub fn with_fallback_locales<I, S>(mut self, locale: impl Into<String>, chain: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.fallback_locales
            .insert(locale.into(), chain.into_iter().map(Into::into).collect());
        self
    }

    /// Sets the auto-create policy.
    pub fn with_persist_missing(mut self, policy: MissingPolicy) -> Self {
        self.persist_missing = policy;
        self
    }

    /// Parses options from YAML. Missing fields keep their defaults.
    pub fn from_yaml_str(content: &str) -> Result<Self, Error> {
        let options: IndexOptions = serde_yaml::from_str(content)?;
        options.validate()?;
        Ok(options)
    }

    /// Reads options from a YAML file.
    pub fn from_yaml_file<P: AsRef<Path>>(path: P) -> Result<Self, Error> {
        let content = fs::read_to_string(path)?;
        Self::from_yaml_str(&content)
    }

    /// Checks every configured locale is a usable cache-key prefix and the
    /// default locale is a well-formed language identifier.
    pub fn validate(&self) -> Result<(), Error> {
        validate_locale(&self.default_locale)?;
        if self.default_locale.parse::<LanguageIdentifier>().is_err() {
            return Err(Error::InvalidLocale(self.default_locale.clone()));
        }
        for (locale, chain) in &self.fallback_locales {
            validate_locale(locale)?;
            for fallback in chain {
                validate_locale(fallback)?;
            }
        }
        Ok(())
    }
}

fn validate_locale(locale: &str) -> Result<(), Error> {
    if locale.is_empty() || locale.contains(CACHE_KEY_SEPARATOR) {
        return Err(Error::InvalidLocale(locale.to_string()));
    }
    Ok(())
}
