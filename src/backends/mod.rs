//! Translation backends shipped with langcache.
//!
//! This module re-exports each backend and provides [`BackendKind`] for picking
//! one from a file extension or a name.

pub mod csv;
pub mod json;
pub mod memory;
pub mod yaml;

use std::{
    fmt::{Display, Formatter},
    fs,
    path::{Path, PathBuf},
    str::FromStr,
    sync::Arc,
};

// Reexporting the backends for easier access
pub use csv::CsvBackend;
pub use json::JsonBackend;
pub use memory::MemoryBackend;
pub use yaml::YamlBackend;

use crate::{error::Error, traits::Backend};

/// File-based backend kinds, for generic handling (e.g. from a CLI).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackendKind {
    Yaml,
    Json,
    Csv,
}

impl Display for BackendKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            BackendKind::Yaml => write!(f, "yaml"),
            BackendKind::Json => write!(f, "json"),
            BackendKind::Csv => write!(f, "csv"),
        }
    }
}

/// Accepts `yaml`/`yml`, `json` and `csv`, case-insensitively.
impl FromStr for BackendKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim().to_ascii_lowercase();
        match s.as_str() {
            "yaml" | "yml" => Ok(BackendKind::Yaml),
            "json" => Ok(BackendKind::Json),
            "csv" => Ok(BackendKind::Csv),
            other => Err(Error::UnknownFormat(other.to_string())),
        }
    }
}

impl BackendKind {
    /// Infers the backend kind from a file extension. Directories yield `None`.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Option<Self> {
        path.as_ref()
            .extension()
            .and_then(|s| s.to_str())
            .and_then(|ext| ext.parse().ok())
    }

    /// Opens a backend of this kind over `paths`.
    ///
    /// CSV backends are single-file; only the first path is used.
    pub fn open<P: AsRef<Path>>(&self, paths: &[P]) -> Result<Arc<dyn Backend>, Error> {
        match self {
            BackendKind::Yaml => Ok(Arc::new(YamlBackend::new(paths))),
            BackendKind::Json => Ok(Arc::new(JsonBackend::new(paths))),
            BackendKind::Csv => {
                let path = paths
                    .first()
                    .ok_or_else(|| Error::invalid_data("csv backend needs a file path"))?;
                Ok(Arc::new(CsvBackend::new(path.as_ref())))
            }
        }
    }
}

/// Raw content of one translation file, with where it came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Source {
    pub origin: String,
    pub content: String,
}

/// Resolves files and directories into the files carrying one of `extensions`.
///
/// Directories are listed with a glob, recursively when `recursive` is set.
/// Explicit files are kept as given, except in recursive mode where they must
/// also carry one of `extensions`. Unreadable paths are skipped with a warning.
pub(crate) fn collect_files<P: AsRef<Path>>(
    paths: &[P],
    extensions: &[&str],
    recursive: bool,
) -> Vec<PathBuf> {
    let mut files = Vec::new();
    for path in paths {
        let path = path.as_ref();
        let metadata = match fs::metadata(path) {
            Ok(metadata) => metadata,
            Err(e) => {
                tracing::warn!("skipping translation path {}: {}", path.display(), e);
                continue;
            }
        };

        if metadata.is_file() {
            if recursive && !has_extension(path, extensions) {
                tracing::debug!("skipping {}: not a translation file", path.display());
            } else {
                files.push(path.to_path_buf());
            }
            continue;
        }
        if !metadata.is_dir() {
            continue;
        }

        let base = glob::Pattern::escape(&path.to_string_lossy());
        for ext in extensions {
            let pattern = if recursive {
                format!("{}/**/*.{}", base, ext)
            } else {
                format!("{}/*.{}", base, ext)
            };
            let entries = match glob::glob(&pattern) {
                Ok(entries) => entries,
                Err(e) => {
                    tracing::warn!("invalid glob pattern {}: {}", pattern, e);
                    continue;
                }
            };
            let mut found: Vec<PathBuf> = entries
                .filter_map(|entry| {
                    entry
                        .inspect_err(|e| tracing::warn!("skipping unreadable entry: {}", e))
                        .ok()
                })
                .filter(|p| p.is_file())
                .collect();
            found.sort();
            files.extend(found);
        }
    }
    files
}

fn has_extension(path: &Path, extensions: &[&str]) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| extensions.contains(&ext))
}

/// Reads every file into memory, skipping the ones that cannot be read.
pub(crate) fn read_sources(files: Vec<PathBuf>) -> Vec<Source> {
    files
        .into_iter()
        .filter_map(|file| {
            let content = fs::read_to_string(&file)
                .inspect_err(|e| {
                    tracing::warn!("failed to read translation file {}: {}", file.display(), e)
                })
                .ok()?;
            Some(Source {
                origin: file.display().to_string(),
                content,
            })
        })
        .collect()
}

/// Joins nested keys the way flattened translation keys are written.
pub(crate) fn join_scopes(scopes: &[String]) -> String {
    scopes.join(".")
}
