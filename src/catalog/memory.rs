//! In-memory catalog store.

use std::collections::HashMap;

use log::info;
use parking_lot::RwLock;

use crate::catalog::record::AnalyzedString;
use crate::catalog::store::{CatalogStore, sort_records};
use crate::error::{Result, StrandError};

pub(crate) const DUPLICATE_MESSAGE: &str = "String already exists in the system";

/// A catalog store that keeps every record in memory.
///
/// Useful for tests and for one-shot processes.
#[derive(Debug, Default)]
pub struct MemoryCatalogStore {
    records: RwLock<HashMap<String, AnalyzedString>>,
}

impl MemoryCatalogStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store pre-populated with records.
    ///
    /// Fails with a conflict if two records share a value.
    pub fn with_records<I>(records: I) -> Result<Self>
    where
        I: IntoIterator<Item = AnalyzedString>,
    {
        let store = Self::new();
        for record in records {
            store.insert(record)?;
        }
        Ok(store)
    }

    /// Remove every record.
    pub fn clear(&self) {
        self.records.write().clear();
    }
}

impl CatalogStore for MemoryCatalogStore {
    fn insert(&self, record: AnalyzedString) -> Result<()> {
        let mut records = self.records.write();
        if records.contains_key(&record.value) {
            return Err(StrandError::conflict(DUPLICATE_MESSAGE));
        }

        info!("Cataloged string {}", record.id);
        records.insert(record.value.clone(), record);
        Ok(())
    }

    fn get(&self, value: &str) -> Result<Option<AnalyzedString>> {
        Ok(self.records.read().get(value).cloned())
    }

    fn remove(&self, value: &str) -> Result<Option<AnalyzedString>> {
        let removed = self.records.write().remove(value);
        if let Some(record) = &removed {
            info!("Removed string {}", record.id);
        }
        Ok(removed)
    }

    fn records(&self) -> Result<Vec<AnalyzedString>> {
        let mut records: Vec<AnalyzedString> = self.records.read().values().cloned().collect();
        sort_records(&mut records);
        Ok(records)
    }

    fn len(&self) -> Result<usize> {
        Ok(self.records.read().len())
    }

    fn store_type(&self) -> &str {
        "memory"
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::thread;

    use chrono::{Duration, Utc};

    use super::*;

    #[test]
    fn test_insert_get_remove() -> Result<()> {
        let store = MemoryCatalogStore::new();
        store.insert(AnalyzedString::new("level"))?;

        assert_eq!(store.len()?, 1);
        assert_eq!(store.get("level")?.map(|r| r.value), Some("level".to_string()));
        assert!(store.get("Level")?.is_none());

        let removed = store.remove("level")?;
        assert!(removed.is_some());
        assert!(store.remove("level")?.is_none());
        assert!(store.is_empty()?);
        Ok(())
    }

    #[test]
    fn test_duplicate_insert_conflicts() -> Result<()> {
        let store = MemoryCatalogStore::new();
        store.insert(AnalyzedString::new("level"))?;

        let err = store.insert(AnalyzedString::new("level")).unwrap_err();
        assert!(matches!(err, StrandError::Conflict(_)));
        assert_eq!(store.len()?, 1);
        Ok(())
    }

    #[test]
    fn test_records_are_ordered() -> Result<()> {
        let now = Utc::now();
        let store = MemoryCatalogStore::with_records([
            AnalyzedString::with_timestamp("second", now),
            AnalyzedString::with_timestamp("first", now - Duration::seconds(5)),
            AnalyzedString::with_timestamp("also second", now),
        ])?;

        let values: Vec<String> = store.records()?.into_iter().map(|r| r.value).collect();
        assert_eq!(values, vec!["first", "also second", "second"]);

        store.clear();
        assert!(store.is_empty()?);
        Ok(())
    }

    #[test]
    fn test_concurrent_inserts_keep_one_record() -> Result<()> {
        let store = Arc::new(MemoryCatalogStore::new());

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let store = Arc::clone(&store);
                thread::spawn(move || store.insert(AnalyzedString::new("race")).is_ok())
            })
            .collect();

        let successes = handles
            .into_iter()
            .map(|handle| handle.join().unwrap())
            .filter(|inserted| *inserted)
            .count();

        assert_eq!(successes, 1);
        assert_eq!(store.len()?, 1);
        Ok(())
    }
}
