//! Catalog service: validation, analysis and retrieval over a store.
//!
//! Every operation validates its input before touching the store or running
//! analysis, and a failed validation ends the operation with a single error.

use std::sync::Arc;

use log::{debug, info};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::catalog::config::CatalogConfig;
use crate::catalog::memory::{DUPLICATE_MESSAGE, MemoryCatalogStore};
use crate::catalog::record::AnalyzedString;
use crate::catalog::store::{CatalogStore, open_store};
use crate::error::{Result, StrandError};
use crate::query::{FilterSet, NaturalLanguageParser, build_filter_from_query_params};

const MISSING_VALUE_MESSAGE: &str = "Invalid request body or missing \"value\" field";
const INVALID_TYPE_MESSAGE: &str =
    "Invalid request body or missing data type for \"value\" (must be string)";
const NOT_FOUND_MESSAGE: &str = "String does not exist in the system";

/// Result of a structured listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListResponse {
    pub data: Vec<AnalyzedString>,
    pub count: usize,
    pub filters_applied: FilterSet,
}

/// How a natural-language query was understood.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InterpretedQuery {
    pub original: String,
    pub parsed_filters: FilterSet,
}

/// Result of a natural-language listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NaturalLanguageResponse {
    /// Matching values.
    pub data: Vec<String>,
    pub count: usize,
    pub interpreted_query: InterpretedQuery,
}

/// Entry point for cataloging and querying analyzed strings.
#[derive(Debug)]
pub struct CatalogService {
    store: Arc<dyn CatalogStore>,
    parser: NaturalLanguageParser,
}

impl CatalogService {
    /// Create a service over an existing store.
    pub fn new(store: Arc<dyn CatalogStore>) -> Result<Self> {
        Ok(CatalogService {
            store,
            parser: NaturalLanguageParser::new()?,
        })
    }

    /// Create a service over a fresh in-memory store.
    pub fn in_memory() -> Result<Self> {
        Self::new(Arc::new(MemoryCatalogStore::new()))
    }

    /// Create a service over the store described by `config`.
    pub fn open(config: &CatalogConfig) -> Result<Self> {
        Self::new(open_store(config)?)
    }

    /// The underlying store.
    pub fn store(&self) -> &Arc<dyn CatalogStore> {
        &self.store
    }

    /// Analyze and catalog `value`.
    ///
    /// Empty values are rejected, and a value that is already cataloged is a
    /// conflict. Analysis runs only after both checks pass.
    pub fn analyze(&self, value: &str) -> Result<AnalyzedString> {
        if value.is_empty() {
            return Err(StrandError::validation(MISSING_VALUE_MESSAGE));
        }
        if self.store.get(value)?.is_some() {
            return Err(StrandError::conflict(DUPLICATE_MESSAGE));
        }

        let record = AnalyzedString::new(value);
        self.store.insert(record.clone())?;
        Ok(record)
    }

    /// Analyze and catalog the `value` field of a JSON request body.
    ///
    /// A missing, null or empty `value` is a validation error. Any other
    /// non-string `value` is a type error.
    pub fn analyze_json(&self, body: &Value) -> Result<AnalyzedString> {
        match body.get("value") {
            None | Some(Value::Null) => Err(StrandError::validation(MISSING_VALUE_MESSAGE)),
            Some(Value::String(value)) => self.analyze(value),
            Some(_) => Err(StrandError::invalid_type(INVALID_TYPE_MESSAGE)),
        }
    }

    /// Fetch the record for `value`.
    pub fn get(&self, value: &str) -> Result<AnalyzedString> {
        self.store
            .get(value)?
            .ok_or_else(|| StrandError::not_found(NOT_FOUND_MESSAGE))
    }

    /// Every record matching `filter`, in catalog order.
    pub fn filter(&self, filter: &FilterSet) -> Result<Vec<AnalyzedString>> {
        let records = self.store.records()?;
        if filter.is_empty() {
            return Ok(records);
        }

        let matched: Vec<AnalyzedString> = records
            .into_par_iter()
            .filter(|record| filter.matches(&record.properties))
            .collect();
        debug!("Filter {filter:?} matched {} records", matched.len());
        Ok(matched)
    }

    /// List records matching structured query parameters.
    ///
    /// Unknown parameter keys reject the whole request. No parameters at all
    /// lists every record.
    pub fn list<I, K, V>(&self, params: I) -> Result<ListResponse>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let filters_applied = build_filter_from_query_params(params)?;
        let data = self.filter(&filters_applied)?;

        Ok(ListResponse {
            count: data.len(),
            data,
            filters_applied,
        })
    }

    /// List values matching a natural-language query.
    ///
    /// A phrase that no rule recognizes is rejected rather than treated as
    /// "no constraints".
    pub fn filter_by_natural_language(&self, phrase: &str) -> Result<NaturalLanguageResponse> {
        let parsed_filters = self.parser.parse(phrase);
        if parsed_filters.is_empty() {
            return Err(StrandError::uninterpretable(phrase));
        }
        debug!("Interpreted {phrase:?} as {parsed_filters:?}");

        let data: Vec<String> = self
            .filter(&parsed_filters)?
            .into_iter()
            .map(|record| record.value)
            .collect();

        Ok(NaturalLanguageResponse {
            count: data.len(),
            data,
            interpreted_query: InterpretedQuery {
                original: phrase.to_string(),
                parsed_filters,
            },
        })
    }

    /// Delete the record for `value`, returning it.
    pub fn delete(&self, value: &str) -> Result<AnalyzedString> {
        let removed = self
            .store
            .remove(value)?
            .ok_or_else(|| StrandError::not_found(NOT_FOUND_MESSAGE))?;
        info!("Deleted {}", removed.id);
        Ok(removed)
    }
}
