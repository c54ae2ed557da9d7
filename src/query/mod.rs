//! Query filter model for Strand.
//!
//! A [`FilterSet`] is the single structured representation of a catalog query.
//! It can be built from raw key/value parameters ([`build_filter_from_query_params`])
//! or from a constrained natural-language phrase ([`NaturalLanguageParser`]), and
//! is evaluated against a [`PropertySet`](crate::analysis::PropertySet).

pub mod filter;
pub mod natural_language;
pub mod params;

// Re-export commonly used types
pub use filter::*;
pub use natural_language::*;
pub use params::*;
