//! Catalog store abstraction.

use std::cmp::Ordering;
use std::sync::Arc;

use crate::catalog::config::CatalogConfig;
use crate::catalog::file::FileCatalogStore;
use crate::catalog::memory::MemoryCatalogStore;
use crate::catalog::record::AnalyzedString;
use crate::error::Result;

/// A backend holding every cataloged record.
///
/// Implementations must make `insert` atomic with respect to the uniqueness
/// check: concurrent inserts of the same value leave exactly one record and
/// every other caller receives a conflict error.
pub trait CatalogStore: Send + Sync + std::fmt::Debug {
    /// Store a new record. Fails with a conflict if the value is already present.
    fn insert(&self, record: AnalyzedString) -> Result<()>;

    /// Look up a record by value.
    fn get(&self, value: &str) -> Result<Option<AnalyzedString>>;

    /// Remove a record by value, returning it if it existed.
    fn remove(&self, value: &str) -> Result<Option<AnalyzedString>>;

    /// All records, ordered by creation time and then value.
    fn records(&self) -> Result<Vec<AnalyzedString>>;

    /// Number of stored records.
    fn len(&self) -> Result<usize>;

    /// Whether the store holds no records.
    fn is_empty(&self) -> Result<bool> {
        Ok(self.len()? == 0)
    }

    /// Name of this store type.
    fn store_type(&self) -> &str;
}

/// Open the store described by `config`.
pub fn open_store(config: &CatalogConfig) -> Result<Arc<dyn CatalogStore>> {
    match &config.data_file {
        Some(path) => Ok(Arc::new(FileCatalogStore::open(path, config.pretty)?)),
        None => Ok(Arc::new(MemoryCatalogStore::new())),
    }
}

/// Catalog order: creation time, then value.
pub(crate) fn catalog_order(a: &AnalyzedString, b: &AnalyzedString) -> Ordering {
    a.created_at
        .cmp(&b.created_at)
        .then_with(|| a.value.cmp(&b.value))
}

/// Sort records into catalog order.
pub(crate) fn sort_records(records: &mut [AnalyzedString]) {
    records.sort_by(catalog_order);
}
