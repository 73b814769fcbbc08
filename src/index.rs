//! The translation index: merges backends into a cache store and resolves
//! lookups with scoping, fallback locales and auto-creation of missing keys.

use std::{collections::BTreeMap, fmt, iter, sync::Arc};

use tracing::{debug, info, warn};

use crate::{
    cache::MemoryStore,
    error::Error,
    formatter::{Arg, Formatter, MessageFormatter},
    options::{IndexOptions, MissingPolicy},
    traits::{Backend, CacheStore},
    types::{Translation, cache_key},
    view::View,
};

/// Snapshot of every backend's translations, keyed by locale then key.
pub type TranslationMap = BTreeMap<String, BTreeMap<String, Translation>>;

/// Translation index over an ordered list of backends.
///
/// Cloning is cheap: clones share the backends, the cache store, the options
/// and the formatter.
///
/// # Example
///
/// ```rust
/// use std::sync::Arc;
/// use langcache::{I18n, backends::{MemoryBackend, YamlBackend}};
///
/// let overrides = MemoryBackend::new().with_entries([("en-US", "title", "Custom")]);
/// let files = YamlBackend::from_sources(["en-US:\n  title: Default\n  hello: Hello {0}\n"]);
///
/// let i18n = I18n::new(vec![Arc::new(overrides), Arc::new(files)])?;
/// assert_eq!(i18n.translate("en-US", "title", &[]), "Custom");
/// assert_eq!(i18n.translate("en-US", "hello", &["World".into()]), "Hello World");
/// # Ok::<(), langcache::Error>(())
/// ```
#[derive(Clone)]
pub struct I18n {
    backends: Arc<[Arc<dyn Backend>]>,
    cache: Arc<dyn CacheStore>,
    options: Arc<IndexOptions>,
    formatter: Arc<dyn Formatter>,
}

impl fmt::Debug for I18n {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("I18n")
            .field(
                "backends",
                &self.backends.iter().map(|b| b.name()).collect::<Vec<_>>(),
            )
            .field("options", &self.options)
            .finish_non_exhaustive()
    }
}

impl I18n {
    /// Creates an index with default options and loads every backend into a
    /// fresh [`MemoryStore`].
    ///
    /// Backends listed first take precedence. A backend failing to load aborts
    /// construction with its error.
    pub fn new(backends: Vec<Arc<dyn Backend>>) -> Result<Self, Error> {
        Self::with_options(backends, IndexOptions::default())
    }

    /// Creates an index with explicit options.
    pub fn with_options(
        backends: Vec<Arc<dyn Backend>>,
        options: IndexOptions,
    ) -> Result<Self, Error> {
        options.validate()?;
        let i18n = I18n {
            backends: backends.into(),
            cache: Arc::new(MemoryStore::new()),
            options: Arc::new(options),
            formatter: Arc::new(MessageFormatter),
        };
        i18n.load()?;
        Ok(i18n)
    }

    /// Replaces the formatter applied to resolved text.
    pub fn with_formatter<F: Formatter + 'static>(mut self, formatter: F) -> Self {
        self.formatter = Arc::new(formatter);
        self
    }

    /// Swaps the cache store and reloads every backend into it.
    pub fn set_cache_store(&mut self, store: Arc<dyn CacheStore>) -> Result<(), Error> {
        self.cache = store;
        self.load()
    }

    /// Re-runs the merge pass against the current cache store.
    pub fn reload(&self) -> Result<(), Error> {
        self.load()
    }

    pub fn backends(&self) -> &[Arc<dyn Backend>] {
        &self.backends
    }

    pub fn options(&self) -> &IndexOptions {
        &self.options
    }

    pub fn default_locale(&self) -> &str {
        &self.options.default_locale
    }

    /// Sets the static fallback chain probed for `locale`.
    pub fn set_fallback_locales<I, S>(&mut self, locale: impl Into<String>, chain: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Arc::make_mut(&mut self.options)
            .fallback_locales
            .insert(locale.into(), chain.into_iter().map(Into::into).collect());
    }

    /// The static fallback chain for `locale`; empty when none is configured.
    pub fn fallback_locales_for(&self, locale: &str) -> &[String] {
        self.options
            .fallback_locales
            .get(locale)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    // Lowest priority first, so the first backend's entries are written last.
    fn load(&self) -> Result<(), Error> {
        let mut count = 0;
        for backend in self.backends.iter().rev() {
            let translations = backend.load_translations()?;
            count += translations.len();
            for translation in &translations {
                self.add_translation(translation)?;
            }
        }
        info!(
            "loaded {} translations from {} backends",
            count,
            self.backends.len()
        );
        Ok(())
    }

    /// Builds a snapshot of every backend with the same precedence as the
    /// cache. Reads the backends, not the cache store.
    pub fn dump_all(&self) -> Result<TranslationMap, Error> {
        let mut all = TranslationMap::new();
        for backend in self.backends.iter().rev() {
            for translation in backend.load_translations()? {
                all.entry(translation.locale.clone())
                    .or_default()
                    .insert(translation.key.clone(), translation);
            }
        }
        Ok(all)
    }

    /// Writes a translation into the cache store only.
    pub fn add_translation(&self, translation: &Translation) -> Result<(), Error> {
        self.cache.set(&translation.cache_key(), translation)
    }

    /// Saves through the first backend that accepts the write, then mirrors the
    /// translation into the cache store.
    pub fn save(&self, translation: &Translation) -> Result<(), Error> {
        for backend in self.backends.iter() {
            match backend.save_translation(translation) {
                Ok(()) => return self.add_translation(translation),
                Err(e) => debug!(
                    "backend {} rejected {}: {}",
                    backend.name(),
                    translation.cache_key(),
                    e
                ),
            }
        }
        Err(Error::SaveFailed {
            locale: translation.locale.clone(),
            key: translation.key.clone(),
        })
    }

    /// Asks every backend to delete, ignoring their failures, then removes the
    /// cache entry. Only the cache removal's outcome is returned.
    pub fn delete(&self, translation: &Translation) -> Result<(), Error> {
        for backend in self.backends.iter() {
            if let Err(e) = backend.delete_translation(translation) {
                debug!(
                    "backend {} did not delete {}: {}",
                    backend.name(),
                    translation.cache_key(),
                    e
                );
            }
        }
        self.cache.delete(&translation.cache_key())
    }

    /// Reads the cache entry for `(locale, key)`, empty or not.
    pub fn cached(&self, locale: &str, key: &str) -> Option<Translation> {
        match self.cache.get(&cache_key(locale, key)) {
            Ok(found) => found,
            Err(e) => {
                debug!("cache read {}/{} failed: {}", locale, key, e);
                None
            }
        }
    }

    fn non_empty(&self, locale: &str, key: &str) -> Option<Translation> {
        self.cached(locale, key).filter(|t| !t.is_empty())
    }

    /// A view with `scope` set.
    pub fn scope(&self, scope: impl Into<String>) -> View {
        View::new(self.clone()).scope(scope)
    }

    /// A view with the text used (and persisted) for missing keys.
    pub fn default(&self, value: impl Into<String>) -> View {
        View::new(self.clone()).default(value)
    }

    /// A view probing extra locales before the default locale.
    pub fn fallbacks<I, S>(&self, locales: I) -> View
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        View::new(self.clone()).fallbacks(locales)
    }

    /// Translates `key` for `locale`. Never fails; see [`View::translate`].
    pub fn translate(&self, locale: &str, key: &str, args: &[Arg]) -> String {
        self.resolve("", "", &[], locale, key, args)
    }

    pub(crate) fn resolve(
        &self,
        scope: &str,
        default_value: &str,
        fallbacks: &[String],
        locale: &str,
        key: &str,
        args: &[Arg],
    ) -> String {
        let default_locale = self.default_locale();
        let locale = if locale.is_empty() {
            default_locale
        } else {
            locale
        };

        let mut candidates = self
            .fallback_locales_for(locale)
            .iter()
            .chain(fallbacks)
            .map(String::as_str)
            .chain(iter::once(default_locale));

        let found = self.non_empty(locale, key).or_else(|| {
            candidates.find_map(|candidate| {
                let found = self.non_empty(candidate, key)?;
                debug!(
                    "{} resolved from fallback {} (requested {})",
                    key, candidate, locale
                );
                Some(found)
            })
        });

        let value = match found {
            Some(translation) => translation.value,
            None => {
                self.create_missing(locale, scope, key, default_value);
                default_value.to_string()
            }
        };

        let text = if value.is_empty() {
            key.to_string()
        } else {
            value
        };

        match self.formatter.format(locale, &text, args) {
            Ok(formatted) => formatted,
            Err(e) => {
                debug!("formatting {} for {} failed: {}", key, locale, e);
                text
            }
        }
    }

    /// Persists a placeholder for a key missing in every candidate locale.
    fn create_missing(&self, locale: &str, scope: &str, key: &str, default_value: &str) {
        if default_value.is_empty() && self.options.persist_missing == MissingPolicy::WithDefaultOnly
        {
            return;
        }

        let scoped_key = if scope.is_empty() {
            key.to_string()
        } else {
            format!("{}.{}", scope, key)
        };

        if self
            .cached(locale, &scoped_key)
            .is_some_and(|existing| existing.value == default_value)
        {
            return;
        }

        let mut translation = Translation::new(locale, scoped_key, default_value);
        translation.backend = self.backends.first().map(|b| b.name().to_string());

        match self.save(&translation) {
            Ok(()) => debug!("created missing translation {}", translation.cache_key()),
            Err(e) => warn!("could not persist missing translation: {}", e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backends::{MemoryBackend, YamlBackend};

    fn memory(entries: &[(&str, &str, &str)]) -> Arc<dyn Backend> {
        Arc::new(MemoryBackend::new().with_entries(entries.iter().copied()))
    }

    #[test]
    fn test_first_backend_wins() {
        let i18n = I18n::new(vec![
            memory(&[("en", "k", "first")]),
            memory(&[("en", "k", "second"), ("en", "only", "second-only")]),
        ])
        .unwrap();
        assert_eq!(i18n.translate("en", "k", &[]), "first");
        assert_eq!(i18n.translate("en", "only", &[]), "second-only");
    }

    #[test]
    fn test_empty_locale_uses_default() {
        let i18n = I18n::new(vec![memory(&[("en-US", "hello", "Hello")])]).unwrap();
        assert_eq!(i18n.translate("", "hello", &[]), "Hello");
    }

    #[test]
    fn test_load_error_aborts_construction() {
        let broken: Arc<dyn Backend> = Arc::new(YamlBackend::from_sources(["en: [oops"]));
        assert!(matches!(I18n::new(vec![broken]), Err(Error::Yaml(_))));
    }

    #[test]
    fn test_invalid_options_rejected() {
        let options = IndexOptions::new().with_default_locale("en/US");
        assert!(matches!(
            I18n::with_options(vec![], options),
            Err(Error::InvalidLocale(_))
        ));
    }

    #[test]
    fn test_static_fallbacks_precede_view_fallbacks() {
        let mut i18n = I18n::new(vec![memory(&[
            ("pt-PT", "k", "portugal"),
            ("es", "k", "spanish"),
            ("en-US", "k", "english"),
        ])])
        .unwrap();
        i18n.set_fallback_locales("pt-BR", ["pt-PT"]);
        assert_eq!(i18n.fallback_locales_for("pt-BR"), ["pt-PT".to_string()]);
        assert_eq!(i18n.fallbacks(["es"]).translate("pt-BR", "k", &[]), "portugal");
        assert_eq!(i18n.fallbacks(["es"]).translate("pt-AO", "k", &[]), "spanish");
        assert_eq!(i18n.translate("pt-AO", "k", &[]), "english");
    }

    #[test]
    fn test_dump_all_respects_priority() {
        let i18n = I18n::new(vec![
            memory(&[("en", "k", "first")]),
            memory(&[("en", "k", "second"), ("fr", "k", "fr")]),
        ])
        .unwrap();
        let dump = i18n.dump_all().unwrap();
        assert_eq!(dump["en"]["k"].value, "first");
        assert_eq!(dump["fr"]["k"].value, "fr");
    }

    #[test]
    fn test_save_without_writable_backend() {
        let read_only: Arc<dyn Backend> = Arc::new(YamlBackend::from_sources(["en:\n  a: b\n"]));
        let i18n = I18n::new(vec![read_only]).unwrap();
        let t = Translation::new("en", "new", "value");
        assert!(matches!(i18n.save(&t), Err(Error::SaveFailed { .. })));
        assert!(i18n.cached("en", "new").is_none());
    }

    #[test]
    fn test_debug_lists_backend_names() {
        let i18n = I18n::new(vec![memory(&[])]).unwrap();
        let debug = format!("{:?}", i18n);
        assert!(debug.contains("memory"));
        assert!(debug.contains("en-US"));
    }
}
