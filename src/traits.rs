//! Capability traits at the two seams of the index: where translations come
//! from ([`Backend`]) and where they are cached ([`CacheStore`]).

use crate::{error::Error, types::Translation};

/// A source of translations.
///
/// Backends are consulted in priority order: when two backends define the same
/// `(locale, key)`, the one listed first wins.
///
/// # Example
///
/// ```rust
/// use langcache::{Error, Translation, traits::Backend};
///
/// struct Fixed;
///
/// impl Backend for Fixed {
///     fn name(&self) -> &str {
///         "fixed"
///     }
///
///     fn load_translations(&self) -> Result<Vec<Translation>, Error> {
///         Ok(vec![Translation::new("en-US", "greeting", "Hello")])
///     }
/// }
///
/// let i18n = langcache::I18n::new(vec![std::sync::Arc::new(Fixed)])?;
/// assert_eq!(i18n.translate("en-US", "greeting", &[]), "Hello");
/// # Ok::<(), Error>(())
/// ```
pub trait Backend: Send + Sync {
    /// Short name used in logs and as the translation back-reference.
    fn name(&self) -> &str;

    /// Loads every translation this backend holds. Must not mutate state.
    fn load_translations(&self) -> Result<Vec<Translation>, Error>;

    /// Persists a translation. Read-only backends keep the default.
    fn save_translation(&self, _translation: &Translation) -> Result<(), Error> {
        Err(Error::NotImplemented("backend does not support saving"))
    }

    /// Removes a translation. Read-only backends keep the default.
    fn delete_translation(&self, _translation: &Translation) -> Result<(), Error> {
        Err(Error::NotImplemented("backend does not support deleting"))
    }
}

/// Key/value store holding translations under their cache key.
///
/// Implementations must be internally synchronized; the index never locks.
pub trait CacheStore: Send + Sync {
    fn set(&self, key: &str, translation: &Translation) -> Result<(), Error>;

    /// Returns `Ok(None)` on a miss.
    fn get(&self, key: &str) -> Result<Option<Translation>, Error>;

    fn delete(&self, key: &str) -> Result<(), Error>;
}
