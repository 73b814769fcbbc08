//! Immutable lookup views over an [`I18n`] index.

use crate::{formatter::Arg, index::I18n};

/// Scope, default text and extra fallback locales applied to lookups.
///
/// Every builder call returns a new view and leaves the receiver untouched;
/// all views share the parent's backends and cache store.
///
/// ```rust
/// use std::sync::Arc;
/// use langcache::{I18n, backends::MemoryBackend};
///
/// let store = Arc::new(MemoryBackend::new());
/// let i18n = I18n::new(vec![store.clone()])?;
///
/// let users = i18n.scope("user");
/// assert_eq!(users.default("Your name").translate("en-US", "name", &[]), "Your name");
/// assert_eq!(store.get("en-US", "user.name").as_deref(), Some("Your name"));
/// # Ok::<(), langcache::Error>(())
/// ```
#[derive(Debug, Clone)]
pub struct View {
    index: I18n,
    scope: String,
    default_value: String,
    fallbacks: Vec<String>,
}

impl View {
    pub fn new(index: I18n) -> Self {
        View {
            index,
            scope: String::new(),
            default_value: String::new(),
            fallbacks: Vec::new(),
        }
    }

    /// Sets the key prefix used when a missing key is auto-created. Lookups
    /// still read the unprefixed key.
    pub fn scope(&self, scope: impl Into<String>) -> View {
        View {
            scope: scope.into(),
            ..self.clone()
        }
    }

    /// Sets the text returned, and persisted, when no locale has the key.
    pub fn default(&self, value: impl Into<String>) -> View {
        View {
            default_value: value.into(),
            ..self.clone()
        }
    }

    /// Sets extra locales probed, in order, before the default locale.
    pub fn fallbacks<I, S>(&self, locales: I) -> View
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        View {
            fallbacks: locales.into_iter().map(Into::into).collect(),
            ..self.clone()
        }
    }

    pub fn scope_name(&self) -> &str {
        &self.scope
    }

    pub fn default_value(&self) -> &str {
        &self.default_value
    }

    pub fn fallback_locales(&self) -> &[String] {
        &self.fallbacks
    }

    pub fn index(&self) -> &I18n {
        &self.index
    }

    /// Translates `key` for `locale`.
    ///
    /// Probes `locale`, then the index's static fallbacks for it, then this
    /// view's fallbacks, then the default locale; empty values count as
    /// missing. When nothing is found the key is created under the scope with
    /// the default text. The result is the found text, else the default text,
    /// else `key` itself, formatted with `args`; a formatting failure returns
    /// the text unformatted.
    pub fn translate(&self, locale: &str, key: &str, args: &[Arg]) -> String {
        self.index.resolve(
            &self.scope,
            &self.default_value,
            &self.fallbacks,
            locale,
            key,
            args,
        )
    }
}
