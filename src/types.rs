//! Core types shared by backends, cache stores and the index.

use std::fmt::Display;

use serde::{Deserialize, Serialize};

/// Separator between locale and key inside a cache key.
pub const CACHE_KEY_SEPARATOR: char = '/';

/// A single translated text identified by `(locale, key)`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Translation {
    /// The locale identifier (e.g. "en-US").
    pub locale: String,

    /// Dot-scoped key (e.g. "user.profile.name").
    pub key: String,

    /// The translated text. An empty value is treated as missing on lookup.
    #[serde(default)]
    pub value: String,

    /// Name of the backend this translation was loaded from, if any.
    #[serde(skip)]
    pub backend: Option<String>,
}

impl Translation {
    pub fn new(
        locale: impl Into<String>,
        key: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        Translation {
            locale: locale.into(),
            key: key.into(),
            value: value.into(),
            backend: None,
        }
    }

    /// Tags the translation with the name of the backend that produced it.
    pub fn with_backend(mut self, backend: impl Into<String>) -> Self {
        self.backend = Some(backend.into());
        self
    }

    /// The cache key of this translation.
    pub fn cache_key(&self) -> String {
        cache_key(&self.locale, &self.key)
    }

    pub fn is_empty(&self) -> bool {
        self.value.is_empty()
    }
}

impl Display for Translation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Translation {{ locale: {}, key: {}, value: {} }}",
            self.locale, self.key, self.value
        )
    }
}

/// Builds the cache key for a `(locale, key)` pair, e.g. `en-US/user.name`.
pub fn cache_key(locale: &str, key: &str) -> String {
    let mut out = String::with_capacity(locale.len() + key.len() + 1);
    out.push_str(locale);
    out.push(CACHE_KEY_SEPARATOR);
    out.push_str(key);
    out
}
