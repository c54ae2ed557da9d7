//! File-backed catalog store.
//!
//! The catalog is indexed by a [`MemoryCatalogStore`] and mirrored to a single
//! JSON array on disk. Every mutation rewrites the file through a temporary
//! sibling (`<file name>.tmp`) followed by a rename, so a reader never observes
//! a half-written catalog.

use std::ffi::OsString;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use log::{debug, warn};
use parking_lot::Mutex;

use crate::analysis::compute_properties;
use crate::catalog::memory::MemoryCatalogStore;
use crate::catalog::record::AnalyzedString;
use crate::catalog::store::CatalogStore;
use crate::error::{Result, StrandError};

/// A catalog store persisted to a JSON data file.
#[derive(Debug)]
pub struct FileCatalogStore {
    /// Path of the data file.
    path: PathBuf,
    /// Whether the data file is written pretty-printed.
    pretty: bool,
    /// In-memory index of the catalog.
    index: MemoryCatalogStore,
    /// Serializes mutations so the index and the file change together.
    write_lock: Mutex<()>,
}

impl FileCatalogStore {
    /// Open the catalog stored at `path`.
    ///
    /// A missing or blank file is an empty catalog. The parent directory is
    /// created if needed. Records whose properties do not match their value,
    /// or values stored twice, are rejected as a corrupt catalog.
    pub fn open<P: AsRef<Path>>(path: P, pretty: bool) -> Result<Self> {
        let path = path.as_ref().to_path_buf();

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty())
            && !parent.exists()
        {
            fs::create_dir_all(parent)
                .map_err(|e| StrandError::storage(format!("Failed to create directory: {e}")))?;
        }

        let index = if path.exists() {
            Self::load(&path)?
        } else {
            MemoryCatalogStore::new()
        };
        debug!(
            "Opened catalog {} with {} records",
            path.display(),
            index.len()?
        );

        Ok(FileCatalogStore {
            path,
            pretty,
            index,
            write_lock: Mutex::new(()),
        })
    }

    /// Path of the data file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Path of the temporary file a rewrite goes through.
    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(OsString::from)
            .unwrap_or_else(|| OsString::from("catalog"));
        name.push(".tmp");
        self.path.with_file_name(name)
    }

    fn load(path: &Path) -> Result<MemoryCatalogStore> {
        let content = fs::read_to_string(path)?;
        if content.trim().is_empty() {
            return Ok(MemoryCatalogStore::new());
        }

        let stored: Vec<AnalyzedString> = serde_json::from_str(&content).map_err(|e| {
            StrandError::storage(format!("Invalid catalog file {}: {e}", path.display()))
        })?;

        if let Some(record) = stored
            .iter()
            .find(|record| record.properties != compute_properties(&record.value))
        {
            return Err(StrandError::storage(format!(
                "Corrupt catalog record {}: properties do not match value",
                record.id
            )));
        }

        MemoryCatalogStore::with_records(stored).map_err(|e| match e {
            StrandError::Conflict(_) => StrandError::storage(format!(
                "Corrupt catalog {}: value stored twice",
                path.display()
            )),
            other => other,
        })
    }

    fn persist(&self) -> Result<()> {
        let records = self.index.records()?;
        let temp_path = self.temp_path();

        let result = self.write_file(&temp_path, &records).and_then(|()| {
            fs::rename(&temp_path, &self.path).map_err(|e| {
                StrandError::storage(format!(
                    "Failed to replace catalog file {}: {e}",
                    self.path.display()
                ))
            })
        });

        if result.is_err()
            && temp_path.exists()
            && let Err(e) = fs::remove_file(&temp_path)
        {
            warn!("Failed to remove {}: {e}", temp_path.display());
        }
        result
    }

    fn write_file(&self, path: &Path, records: &[AnalyzedString]) -> Result<()> {
        let file = File::create(path)?;
        let mut writer = BufWriter::new(file);
        if self.pretty {
            serde_json::to_writer_pretty(&mut writer, records)?;
        } else {
            serde_json::to_writer(&mut writer, records)?;
        }
        writer.flush()?;
        writer.get_ref().sync_all()?;
        Ok(())
    }
}

impl CatalogStore for FileCatalogStore {
    fn insert(&self, record: AnalyzedString) -> Result<()> {
        let _guard = self.write_lock.lock();
        let value = record.value.clone();
        self.index.insert(record)?;

        if let Err(e) = self.persist() {
            self.index.remove(&value)?;
            return Err(e);
        }
        Ok(())
    }

    fn get(&self, value: &str) -> Result<Option<AnalyzedString>> {
        self.index.get(value)
    }

    fn remove(&self, value: &str) -> Result<Option<AnalyzedString>> {
        let _guard = self.write_lock.lock();
        let Some(removed) = self.index.remove(value)? else {
            return Ok(None);
        };

        if let Err(e) = self.persist() {
            self.index.insert(removed)?;
            return Err(e);
        }
        Ok(Some(removed))
    }

    fn records(&self) -> Result<Vec<AnalyzedString>> {
        self.index.records()
    }

    fn len(&self) -> Result<usize> {
        self.index.len()
    }

    fn store_type(&self) -> &str {
        "file"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_is_empty_catalog() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let store = FileCatalogStore::open(dir.path().join("nested/catalog.json"), false)?;

        assert!(store.is_empty()?);
        assert!(!store.path().exists());
        Ok(())
    }

    #[test]
    fn test_records_survive_reopen() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("catalog.json");

        {
            let store = FileCatalogStore::open(&path, true)?;
            store.insert(AnalyzedString::new("Racecar"))?;
            store.insert(AnalyzedString::new("hello world"))?;
            store.remove("hello world")?;
        }

        let store = FileCatalogStore::open(&path, false)?;
        assert_eq!(store.len()?, 1);
        let record = store.get("Racecar")?.unwrap();
        assert_eq!(record.properties, compute_properties("Racecar"));
        assert!(!dir.path().join("catalog.json.tmp").exists());
        Ok(())
    }

    #[test]
    fn test_tmp_named_data_file_survives_reopen() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("catalog.tmp");

        {
            let store = FileCatalogStore::open(&path, false)?;
            assert_eq!(store.temp_path(), dir.path().join("catalog.tmp.tmp"));
            store.insert(AnalyzedString::new("level"))?;
            store.insert(AnalyzedString::new("noon"))?;
        }

        let store = FileCatalogStore::open(&path, false)?;
        assert_eq!(store.len()?, 2);
        assert!(store.get("noon")?.is_some());
        assert!(!dir.path().join("catalog.tmp.tmp").exists());
        Ok(())
    }

    #[test]
    fn test_failed_persist_rolls_back_and_cleans_up() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("catalog.json");
        let store = FileCatalogStore::open(&path, false)?;
        store.insert(AnalyzedString::new("kept"))?;

        // A directory in place of the data file makes the rename fail.
        fs::remove_file(&path)?;
        fs::create_dir(&path)?;
        fs::write(path.join("occupied"), "")?;

        let err = store.insert(AnalyzedString::new("dropped")).unwrap_err();
        assert!(matches!(err, StrandError::Storage(_)));
        assert!(store.get("dropped")?.is_none());
        assert_eq!(store.len()?, 1);
        assert!(!store.temp_path().exists());

        assert!(store.remove("kept").is_err());
        assert!(store.get("kept")?.is_some());
        Ok(())
    }

    #[test]
    fn test_duplicate_insert_conflicts() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let store = FileCatalogStore::open(dir.path().join("catalog.json"), false)?;

        store.insert(AnalyzedString::new("level"))?;
        let err = store.insert(AnalyzedString::new("level")).unwrap_err();
        assert!(matches!(err, StrandError::Conflict(_)));
        Ok(())
    }

    #[test]
    fn test_value_stored_twice_is_rejected() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("catalog.json");
        let record = AnalyzedString::new("abc");
        fs::write(&path, serde_json::to_string(&[&record, &record])?)?;

        let err = FileCatalogStore::open(&path, false).unwrap_err();
        assert!(matches!(err, StrandError::Storage(_)));
        Ok(())
    }

    #[test]
    fn test_blank_file_is_empty_catalog() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("catalog.json");
        fs::write(&path, "  \n")?;

        let store = FileCatalogStore::open(&path, false)?;
        assert!(store.is_empty()?);
        Ok(())
    }

    #[test]
    fn test_tampered_record_is_rejected() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("catalog.json");
        {
            let store = FileCatalogStore::open(&path, false)?;
            store.insert(AnalyzedString::new("abc"))?;
        }

        let content = fs::read_to_string(&path)?;
        fs::write(&path, content.replace("\"length\":3", "\"length\":4"))?;

        let err = FileCatalogStore::open(&path, false).unwrap_err();
        assert!(matches!(err, StrandError::Storage(_)));
        Ok(())
    }

    #[test]
    fn test_invalid_json_is_storage_error() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("catalog.json");
        fs::write(&path, "{ not json")?;

        let err = FileCatalogStore::open(&path, false).unwrap_err();
        assert!(matches!(err, StrandError::Storage(_)));
        Ok(())
    }
}
