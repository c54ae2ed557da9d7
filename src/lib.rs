//! # Strand
//!
//! A catalog of analyzed strings with structured and natural-language filtering.
//!
//! ## Features
//!
//! - Deterministic string analysis (length, palindrome, distinct characters,
//!   word count, SHA-256 content hash, character frequencies)
//! - Structured filters built from query parameters
//! - A small natural-language grammar translated into the same filters
//! - Pluggable catalog stores (in-memory or JSON file)

pub mod analysis;
pub mod catalog;
pub mod cli;
pub mod error;
pub mod query;

pub mod prelude {
    pub use crate::analysis::{PropertySet, compute_properties};
    pub use crate::catalog::{AnalyzedString, CatalogConfig, CatalogService, CatalogStore};
    pub use crate::error::{Result, StrandError};
    pub use crate::query::{FilterSet, NaturalLanguageParser, build_filter_from_query_params};
}

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
