//! Catalog of analyzed strings.
//!
//! The catalog owns storage of [`AnalyzedString`] records. Stores enforce that
//! at most one record exists per distinct value; the [`CatalogService`] layers
//! request validation, analysis and filter evaluation on top of a store.

pub mod config;
pub mod file;
pub mod memory;
pub mod record;
pub mod service;
pub mod store;

// Re-export commonly used types
pub use config::*;
pub use file::*;
pub use memory::*;
pub use record::*;
pub use service::*;
pub use store::*;
