//! String analysis module for Strand.
//!
//! This module derives the fixed set of structural properties that the catalog
//! stores for every value: length, palindrome status, distinct characters,
//! word count, content hash and character frequencies. Every function here is
//! pure, so analysis can run on any thread without coordination.

pub mod properties;

// Re-export commonly used types
pub use properties::*;
