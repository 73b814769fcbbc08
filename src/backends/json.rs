//! Read-only JSON backend, using the same locale-rooted nested layout as
//! [`crate::backends::YamlBackend`].

use std::path::Path;

use serde_json::Value;

use crate::{
    backends::{Source, collect_files, join_scopes, read_sources},
    error::Error,
    traits::Backend,
    types::Translation,
};

/// JSON files loaded into memory at construction.
#[derive(Debug, Clone, Default)]
pub struct JsonBackend {
    sources: Vec<Source>,
}

impl JsonBackend {
    /// Loads the given files, and the `.json` files directly inside the given
    /// directories. Unreadable paths are skipped.
    pub fn new<P: AsRef<Path>>(paths: &[P]) -> Self {
        JsonBackend {
            sources: read_sources(collect_files(paths, &["json"], false)),
        }
    }

    /// Builds a backend from packaged content.
    pub fn from_sources<I, S>(contents: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        JsonBackend {
            sources: contents
                .into_iter()
                .enumerate()
                .map(|(i, content)| Source {
                    origin: format!("<embedded #{}>", i),
                    content: content.into(),
                })
                .collect(),
        }
    }

    /// Parses one JSON document into translations.
    pub fn parse(content: &str) -> Result<Vec<Translation>, Error> {
        let document: Value = serde_json::from_str(content)?;
        let Value::Object(root) = document else {
            return Err(Error::invalid_data(
                "translation file must map locales to translations",
            ));
        };

        let mut translations = Vec::new();
        for (locale, value) in &root {
            let mut scopes = Vec::new();
            flatten(locale, value, &mut scopes, &mut translations);
        }
        Ok(translations)
    }
}

impl Backend for JsonBackend {
    fn name(&self) -> &str {
        "json"
    }

    fn load_translations(&self) -> Result<Vec<Translation>, Error> {
        let mut translations = Vec::new();
        for source in &self.sources {
            let parsed = Self::parse(&source.content).inspect_err(|e| {
                tracing::error!("failed to parse JSON translations {}: {}", source.origin, e)
            })?;
            translations.extend(parsed.into_iter().map(|t| t.with_backend(self.name())));
        }
        Ok(translations)
    }
}

fn flatten(locale: &str, value: &Value, scopes: &mut Vec<String>, out: &mut Vec<Translation>) {
    match value {
        Value::Object(map) => {
            for (key, nested) in map {
                scopes.push(key.clone());
                flatten(locale, nested, scopes, out);
                scopes.pop();
            }
        }
        leaf if scopes.is_empty() => {
            tracing::warn!("ignoring value {} without a key under locale {}", leaf, locale);
        }
        leaf => out.push(Translation::new(locale, join_scopes(scopes), leaf_to_string(leaf))),
    }
}

fn leaf_to_string(value: &Value) -> String {
    match value {
        Value::Null | Value::Object(_) => String::new(),
        Value::String(s) => s.clone(),
        Value::Array(items) => format!(
            "[{}]",
            items.iter().map(leaf_to_string).collect::<Vec<_>>().join(", ")
        ),
        other => other.to_string(),
    }
}
