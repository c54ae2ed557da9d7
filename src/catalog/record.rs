//! Cataloged record type.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::analysis::{PropertySet, compute_properties};

/// One cataloged string together with its derived properties.
///
/// Records are immutable once created; the only lifecycle transition after
/// creation is deletion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalyzedString {
    /// Identifier of the record, equal to the content hash of `value`.
    pub id: String,
    /// The original string. Unique within a catalog.
    pub value: String,
    /// Properties derived from `value` at creation time.
    pub properties: PropertySet,
    /// When the value was first analyzed.
    pub created_at: DateTime<Utc>,
}

impl AnalyzedString {
    /// Analyze `value` and stamp the record with the current time.
    pub fn new<S: Into<String>>(value: S) -> Self {
        Self::with_timestamp(value, Utc::now())
    }

    /// Analyze `value` and stamp the record with `created_at`.
    pub fn with_timestamp<S: Into<String>>(value: S, created_at: DateTime<Utc>) -> Self {
        let value = value.into();
        let properties = compute_properties(&value);

        AnalyzedString {
            id: properties.sha256_hash.clone(),
            value,
            properties,
            created_at,
        }
    }

    /// The content hash of the value.
    pub fn content_hash(&self) -> &str {
        &self.properties.sha256_hash
    }
}
