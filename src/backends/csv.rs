//! Writable CSV backend: one `locale,key,value` row per translation, no header.

use std::{
    fs::{self, File},
    io::{BufRead, ErrorKind, Write},
    path::{Path, PathBuf},
    sync::Mutex,
};

use serde::{Deserialize, Serialize};
use tempfile::NamedTempFile;

use crate::{error::Error, traits::Backend, types::Translation};

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct CsvRecord {
    pub locale: String,
    pub key: String,
    pub value: String,
}

impl From<CsvRecord> for Translation {
    fn from(record: CsvRecord) -> Self {
        Translation::new(record.locale, record.key, record.value)
    }
}

impl From<&Translation> for CsvRecord {
    fn from(t: &Translation) -> Self {
        CsvRecord {
            locale: t.locale.clone(),
            key: t.key.clone(),
            value: t.value.clone(),
        }
    }
}

/// Reads records from any reader.
pub fn read_records<R: BufRead>(reader: R) -> Result<Vec<CsvRecord>, Error> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(false)
        .from_reader(reader);
    let mut records = Vec::new();
    for result in rdr.deserialize() {
        records.push(result?);
    }
    Ok(records)
}

/// Writes records to any writer.
pub fn write_records<W: Write>(records: &[CsvRecord], writer: W) -> Result<(), Error> {
    let mut wtr = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(writer);
    for record in records {
        wtr.serialize(record)?;
    }
    wtr.flush()?;
    Ok(())
}

/// A CSV file acting as a writable backend.
///
/// Saves upsert the `(locale, key)` row and replace the file atomically. A
/// missing file loads as empty and is created on the first save. A file that
/// exists but cannot be read loads as empty with a warning; writes to it fail.
#[derive(Debug)]
pub struct CsvBackend {
    path: PathBuf,
    // Serializes read-modify-write cycles on the file.
    lock: Mutex<()>,
}

impl CsvBackend {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        CsvBackend {
            path: path.as_ref().to_path_buf(),
            lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_all(&self) -> Result<Vec<CsvRecord>, Error> {
        let content = match fs::read(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };
        read_records(content.as_slice())
    }

    fn write_all(&self, records: &[CsvRecord]) -> Result<(), Error> {
        replace_file(&self.path, |file| write_records(records, file))
    }

    fn update<F>(&self, apply: F) -> Result<(), Error>
    where
        F: FnOnce(&mut Vec<CsvRecord>),
    {
        let _guard = self
            .lock
            .lock()
            .map_err(|e| Error::invalid_data(e.to_string()))?;
        let mut records = self.read_all()?;
        apply(&mut records);
        self.write_all(&records)
    }
}

impl Backend for CsvBackend {
    fn name(&self) -> &str {
        "csv"
    }

    fn load_translations(&self) -> Result<Vec<Translation>, Error> {
        let _guard = self
            .lock
            .lock()
            .map_err(|e| Error::invalid_data(e.to_string()))?;
        let records = match self.read_all() {
            Ok(records) => records,
            Err(Error::Io(e)) => {
                tracing::warn!(
                    "skipping unreadable CSV translations {}: {}",
                    self.path.display(),
                    e
                );
                return Ok(Vec::new());
            }
            Err(e) => {
                tracing::error!("failed to parse CSV translations {}: {}", self.path.display(), e);
                return Err(e);
            }
        };
        Ok(records
            .into_iter()
            .map(|record| Translation::from(record).with_backend(self.name()))
            .collect())
    }

    fn save_translation(&self, translation: &Translation) -> Result<(), Error> {
        let record = CsvRecord::from(translation);
        self.update(|records| {
            match records
                .iter_mut()
                .find(|r| r.locale == record.locale && r.key == record.key)
            {
                Some(existing) => existing.value = record.value,
                None => records.push(record),
            }
        })
    }

    fn delete_translation(&self, translation: &Translation) -> Result<(), Error> {
        self.update(|records| {
            records.retain(|r| !(r.locale == translation.locale && r.key == translation.key))
        })
    }
}

/// Writes `path` through a temporary sibling file that is renamed over it
/// once `write` succeeds. On failure `path` keeps its previous content.
fn replace_file<F>(path: &Path, write: F) -> Result<(), Error>
where
    F: FnOnce(&mut File) -> Result<(), Error>,
{
    let dir = path
        .parent()
        .filter(|dir| !dir.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    let mut tmp = NamedTempFile::new_in(dir)?;
    write(tmp.as_file_mut())?;
    tmp.as_file().sync_all()?;
    tmp.persist(path).map_err(|e| Error::Io(e.error))?;
    Ok(())
}
