//! Read-only YAML backend.
//!
//! Each file is a mapping whose top-level keys are locales; nested mappings are
//! flattened into dot-separated keys:
//!
//! ```yaml
//! en-US:
//!   user:
//!     name: Name
//! ```
//!
//! yields the translation `en-US` / `user.name` = `Name`.

use std::path::Path;

use serde_yaml::Value;

use crate::{
    backends::{Source, collect_files, join_scopes, read_sources},
    error::Error,
    traits::Backend,
    types::Translation,
};

const EXTENSIONS: &[&str] = &["yaml", "yml"];

/// YAML files loaded into memory at construction.
#[derive(Debug, Clone, Default)]
pub struct YamlBackend {
    sources: Vec<Source>,
}

impl YamlBackend {
    /// Loads the given files, and the `.yml`/`.yaml` files directly inside the
    /// given directories. Unreadable paths are skipped.
    pub fn new<P: AsRef<Path>>(paths: &[P]) -> Self {
        YamlBackend {
            sources: read_sources(collect_files(paths, EXTENSIONS, false)),
        }
    }

    /// Like [`YamlBackend::new`], but walks directories recursively.
    pub fn walk<P: AsRef<Path>>(paths: &[P]) -> Self {
        YamlBackend {
            sources: read_sources(collect_files(paths, EXTENSIONS, true)),
        }
    }

    /// Builds a backend from content packaged with the binary, e.g. via
    /// `include_str!`.
    pub fn from_sources<I, S>(contents: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        YamlBackend {
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

    /// Number of files (or embedded sources) this backend holds.
    pub fn source_count(&self) -> usize {
        self.sources.len()
    }

    /// Parses one YAML document into translations, in document order.
    pub fn parse(content: &str) -> Result<Vec<Translation>, Error> {
        let document: Value = serde_yaml::from_str(content)?;
        let root = match document {
            Value::Null => return Ok(Vec::new()),
            Value::Mapping(root) => root,
            _ => {
                return Err(Error::invalid_data(
                    "translation file must map locales to translations",
                ));
            }
        };

        let mut translations = Vec::new();
        for (locale, value) in &root {
            let Value::String(locale) = locale else {
                return Err(Error::invalid_data(format!(
                    "locale must be a string, got {:?}",
                    locale
                )));
            };
            let mut scopes = Vec::new();
            flatten(locale, value, &mut scopes, &mut translations)?;
        }
        Ok(translations)
    }
}

impl Backend for YamlBackend {
    fn name(&self) -> &str {
        "yaml"
    }

    fn load_translations(&self) -> Result<Vec<Translation>, Error> {
        let mut translations = Vec::new();
        for source in &self.sources {
            let parsed = Self::parse(&source.content).inspect_err(|e| {
                tracing::error!("failed to parse YAML translations {}: {}", source.origin, e)
            })?;
            translations.extend(parsed.into_iter().map(|t| t.with_backend(self.name())));
        }
        Ok(translations)
    }

    fn save_translation(&self, _translation: &Translation) -> Result<(), Error> {
        Err(Error::NotImplemented("yaml backend is read-only"))
    }

    fn delete_translation(&self, _translation: &Translation) -> Result<(), Error> {
        Err(Error::NotImplemented("yaml backend is read-only"))
    }
}

fn flatten(
    locale: &str,
    value: &Value,
    scopes: &mut Vec<String>,
    out: &mut Vec<Translation>,
) -> Result<(), Error> {
    match value {
        Value::Mapping(map) => {
            for (key, nested) in map {
                scopes.push(key_to_string(key)?);
                flatten(locale, nested, scopes, out)?;
                scopes.pop();
            }
        }
        Value::Tagged(tagged) => flatten(locale, &tagged.value, scopes, out)?,
        leaf => {
            if scopes.is_empty() {
                tracing::warn!("ignoring value without a key under locale {}", locale);
                return Ok(());
            }
            out.push(Translation::new(locale, join_scopes(scopes), leaf_to_string(leaf)));
        }
    }
    Ok(())
}

fn key_to_string(key: &Value) -> Result<String, Error> {
    match key {
        Value::String(s) => Ok(s.clone()),
        Value::Number(n) => Ok(n.to_string()),
        Value::Bool(b) => Ok(b.to_string()),
        other => Err(Error::invalid_data(format!(
            "translation key must be a scalar, got {:?}",
            other
        ))),
    }
}

fn leaf_to_string(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        Value::String(s) => s.clone(),
        Value::Sequence(items) => format!(
            "[{}]",
            items.iter().map(leaf_to_string).collect::<Vec<_>>().join(", ")
        ),
        Value::Tagged(tagged) => leaf_to_string(&tagged.value),
        Value::Mapping(_) => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use indoc::indoc;
    use std::fs;

    fn pairs(translations: &[Translation]) -> Vec<(&str, &str, &str)> {
        translations
            .iter()
            .map(|t| (t.locale.as_str(), t.key.as_str(), t.value.as_str()))
            .collect()
    }

    #[test]
    fn test_parse_flattens_in_document_order() {
        let yaml = indoc! {"
            en-US:
              user:
                name: Name
                age: Age
              title: Title
            zh-CN:
              user:
                name: 名字
        "};
        let translations = YamlBackend::parse(yaml).unwrap();
        assert_eq!(
            pairs(&translations),
            vec![
                ("en-US", "user.name", "Name"),
                ("en-US", "user.age", "Age"),
                ("en-US", "title", "Title"),
                ("zh-CN", "user.name", "名字"),
            ]
        );
    }

    #[test]
    fn test_parse_stringifies_leaves() {
        let yaml = indoc! {"
            en:
              count: 42
              ratio: 1.5
              enabled: true
              empty: ~
              list: [a, b]
              404: Not Found
        "};
        let translations = YamlBackend::parse(yaml).unwrap();
        assert_eq!(
            pairs(&translations),
            vec![
                ("en", "count", "42"),
                ("en", "ratio", "1.5"),
                ("en", "enabled", "true"),
                ("en", "empty", ""),
                ("en", "list", "[a, b]"),
                ("en", "404", "Not Found"),
            ]
        );
    }

    #[test]
    fn test_parse_skips_values_directly_under_a_locale() {
        let yaml = indoc! {"
            en: hello
            fr:
            de:
              a: A
        "};
        let translations = YamlBackend::parse(yaml).unwrap();
        assert_eq!(pairs(&translations), vec![("de", "a", "A")]);
    }

    #[test]
    fn test_parse_empty_document() {
        assert!(YamlBackend::parse("").unwrap().is_empty());
    }

    #[test]
    fn test_parse_rejects_malformed_content() {
        assert!(matches!(YamlBackend::parse("en: [unclosed"), Err(Error::Yaml(_))));
        assert!(matches!(
            YamlBackend::parse("- en\n- fr\n"),
            Err(Error::InvalidData(_))
        ));
        assert!(matches!(
            YamlBackend::parse("1: {a: b}\n"),
            Err(Error::InvalidData(_))
        ));
    }

    #[test]
    fn test_load_from_directory() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("en.yml"), "en:\n  hello: Hello\n").unwrap();
        fs::write(dir.path().join("fr.yaml"), "fr:\n  hello: Bonjour\n").unwrap();
        fs::write(dir.path().join("ignored.txt"), "de:\n  hello: Hallo\n").unwrap();

        let backend = YamlBackend::new(&[dir.path()]);
        assert_eq!(backend.source_count(), 2);

        let translations = backend.load_translations().unwrap();
        assert_eq!(translations.len(), 2);
        assert!(translations.iter().all(|t| t.backend.as_deref() == Some("yaml")));
        assert!(translations.iter().any(|t| t.locale == "fr" && t.value == "Bonjour"));
    }

    #[test]
    fn test_walk_recurses() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("admin");
        fs::create_dir_all(&nested).unwrap();
        fs::write(dir.path().join("en.yml"), "en:\n  hello: Hello\n").unwrap();
        fs::write(nested.join("en.yml"), "en:\n  admin:\n    title: Admin\n").unwrap();

        assert_eq!(YamlBackend::new(&[dir.path()]).source_count(), 1);
        let backend = YamlBackend::walk(&[dir.path()]);
        assert_eq!(backend.source_count(), 2);
        assert_eq!(backend.load_translations().unwrap().len(), 2);
    }

    #[test]
    fn test_malformed_file_fails_the_whole_load() {
        let backend = YamlBackend::from_sources(["en:\n  ok: fine\n", "en: [broken"]);
        assert!(backend.load_translations().is_err());
    }

    #[test]
    fn test_writes_are_not_implemented() {
        let backend = YamlBackend::from_sources(["en:\n  a: b\n"]);
        let t = Translation::new("en", "a", "c");
        assert!(matches!(backend.save_translation(&t), Err(Error::NotImplemented(_))));
        assert!(matches!(backend.delete_translation(&t), Err(Error::NotImplemented(_))));
    }
}
