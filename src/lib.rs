#![forbid(unsafe_code)]
//! Translation lookup for Rust.
//!
//! Translations are loaded from pluggable [`Backend`]s (YAML, JSON, CSV files,
//! or memory), merged into a [`CacheStore`] and resolved through an [`I18n`]
//! index with scoping, fallback locales, default text and argument formatting.
//!
//! # Quick Start
//!
//! ```rust
//! use std::sync::Arc;
//! use langcache::{I18n, IndexOptions, backends::{MemoryBackend, YamlBackend}};
//!
//! let files = YamlBackend::from_sources([r#"
//! en-US:
//!   inbox:
//!     unread: "{0, plural, one {# unread message} other {# unread messages}}"
//! de-DE:
//!   inbox:
//!     unread: "{0, plural, one {# ungelesene Nachricht} other {# ungelesene Nachrichten}}"
//! "#]);
//!
//! let i18n = I18n::with_options(
//!     vec![Arc::new(MemoryBackend::new()), Arc::new(files)],
//!     IndexOptions::new().with_fallback_locales("de-AT", ["de-DE"]),
//! )?;
//!
//! assert_eq!(i18n.translate("de-AT", "inbox.unread", &[2.into()]), "2 ungelesene Nachrichten");
//! assert_eq!(i18n.default("Welcome").translate("en-US", "welcome", &[]), "Welcome");
//! # Ok::<(), langcache::Error>(())
//! ```
//!
//! # Lookup rules
//!
//! - Backends listed first win when several define the same `(locale, key)`.
//! - Empty values count as missing.
//! - A key missing in every candidate locale is created (under the view's
//!   scope, with the view's default text) through the first writable backend.
//! - `translate` never fails: worst case it returns the key.

pub mod backends;
pub mod cache;
pub mod error;
pub mod formatter;
pub mod index;
pub mod options;
pub mod plural_rules;
pub mod traits;
pub mod types;
pub mod view;

// Re-export most used types for easy consumption
pub use crate::{
    cache::MemoryStore,
    error::Error,
    formatter::{Arg, Formatter, MessageFormatter},
    index::{I18n, TranslationMap},
    options::{DEFAULT_LOCALE, IndexOptions, MissingPolicy},
    traits::{Backend, CacheStore},
    types::{Translation, cache_key},
    view::View,
};
