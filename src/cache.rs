//! The default, in-process cache store.

use std::{collections::HashMap, sync::RwLock};

use crate::{error::Error, traits::CacheStore, types::Translation};

/// In-memory [`CacheStore`].
///
/// Entries are kept serialized as JSON, the same way a distributed store would
/// hold them, so swapping in a remote store does not change what the index sees.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: RwLock<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of cached entries.
    pub fn len(&self) -> usize {
        self.entries.read().map(|entries| entries.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl CacheStore for MemoryStore {
    fn set(&self, key: &str, translation: &Translation) -> Result<(), Error> {
        let encoded = serde_json::to_string(translation)?;
        self.entries
            .write()
            .map_err(|e| Error::Cache(e.to_string()))?
            .insert(key.to_string(), encoded);
        Ok(())
    }

    fn get(&self, key: &str) -> Result<Option<Translation>, Error> {
        let entries = self.entries.read().map_err(|e| Error::Cache(e.to_string()))?;
        match entries.get(key) {
            Some(encoded) => Ok(Some(serde_json::from_str(encoded)?)),
            None => Ok(None),
        }
    }

    fn delete(&self, key: &str) -> Result<(), Error> {
        self.entries
            .write()
            .map_err(|e| Error::Cache(e.to_string()))?
            .remove(key);
        Ok(())
    }
}
