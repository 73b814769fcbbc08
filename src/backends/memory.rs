//! Writable in-memory backend.

use std::{collections::BTreeMap, sync::RwLock};

use crate::{error::Error, traits::Backend, types::Translation};

/// Translations held in process memory, keyed by `(locale, key)`.
///
/// Useful as the writable first backend in front of read-only file backends,
/// so that auto-created keys have somewhere to go.
#[derive(Debug)]
pub struct MemoryBackend {
    name: String,
    entries: RwLock<BTreeMap<(String, String), String>>,
}

impl Default for MemoryBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::named("memory")
    }

    /// Creates an empty backend reporting `name` in logs and back-references.
    pub fn named(name: impl Into<String>) -> Self {
        MemoryBackend {
            name: name.into(),
            entries: RwLock::new(BTreeMap::new()),
        }
    }

    /// Seeds the backend; later duplicates replace earlier ones.
    pub fn with_translations<I>(self, translations: I) -> Self
    where
        I: IntoIterator<Item = Translation>,
    {
        if let Ok(mut entries) = self.entries.write() {
            for t in translations {
                entries.insert((t.locale, t.key), t.value);
            }
        }
        self
    }

    /// Convenience for seeding from `(locale, key, value)` triples.
    pub fn with_entries<'a, I>(self, entries: I) -> Self
    where
        I: IntoIterator<Item = (&'a str, &'a str, &'a str)>,
    {
        self.with_translations(
            entries
                .into_iter()
                .map(|(locale, key, value)| Translation::new(locale, key, value)),
        )
    }

    /// Returns the stored value, if any.
    pub fn get(&self, locale: &str, key: &str) -> Option<String> {
        self.entries
            .read()
            .ok()?
            .get(&(locale.to_string(), key.to_string()))
            .cloned()
    }

    pub fn len(&self) -> usize {
        self.entries.read().map(|e| e.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Backend for MemoryBackend {
    fn name(&self) -> &str {
        &self.name
    }

    fn load_translations(&self) -> Result<Vec<Translation>, Error> {
        let entries = self
            .entries
            .read()
            .map_err(|e| Error::invalid_data(e.to_string()))?;
        Ok(entries
            .iter()
            .map(|((locale, key), value)| {
                Translation::new(locale.as_str(), key.as_str(), value.as_str())
                    .with_backend(self.name.as_str())
            })
            .collect())
    }

    fn save_translation(&self, translation: &Translation) -> Result<(), Error> {
        self.entries
            .write()
            .map_err(|e| Error::invalid_data(e.to_string()))?
            .insert(
                (translation.locale.clone(), translation.key.clone()),
                translation.value.clone(),
            );
        Ok(())
    }

    fn delete_translation(&self, translation: &Translation) -> Result<(), Error> {
        self.entries
            .write()
            .map_err(|e| Error::invalid_data(e.to_string()))?
            .remove(&(translation.locale.clone(), translation.key.clone()));
        Ok(())
    }
}
