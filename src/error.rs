//! All error types for the langcache crate.
//!
//! These are returned from every fallible operation (loading, saving, deleting,
//! formatting). Lookups through [`crate::I18n::translate`] never surface them.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("unknown format `{0}`")]
    UnknownFormat(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("CSV parse error: {0}")]
    Csv(#[from] csv::Error),

    #[error("invalid data: {0}")]
    InvalidData(String),

    #[error("invalid locale `{0}`")]
    InvalidLocale(String),

    #[error("not implemented: {0}")]
    NotImplemented(&'static str),

    #[error("failed to save translation `{locale}/{key}`")]
    SaveFailed { locale: String, key: String },

    #[error("format error: {0}")]
    Format(String),

    #[error("cache store error: {0}")]
    Cache(String),
}

impl Error {
    /// Creates a new formatting error.
    pub fn format_error(message: impl Into<String>) -> Self {
        Error::Format(message.into())
    }

    /// Creates a new invalid-data error.
    pub fn invalid_data(message: impl Into<String>) -> Self {
        Error::InvalidData(message.into())
    }
}
