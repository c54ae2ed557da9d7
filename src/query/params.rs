//! Construction of a [`FilterSet`] from raw query parameters.
//!
//! The recognized keys are exactly those in [`SUPPORTED_PARAMS`]. Any other key
//! rejects the whole request before a single value is interpreted, and a
//! malformed value is rejected rather than coerced.

use log::debug;

use crate::error::{Result, StrandError};
use crate::query::filter::FilterSet;

pub const IS_PALINDROME: &str = "is_palindrome";
pub const MIN_LENGTH: &str = "min_length";
pub const MAX_LENGTH: &str = "max_length";
pub const WORD_COUNT: &str = "word_count";
pub const CONTAINS_CHARACTER: &str = "contains_character";

/// Every query parameter key accepted by the structured filter entry point.
pub const SUPPORTED_PARAMS: [&str; 5] = [
    IS_PALINDROME,
    MIN_LENGTH,
    MAX_LENGTH,
    WORD_COUNT,
    CONTAINS_CHARACTER,
];

/// Build a filter from key/value query parameters.
///
/// An empty parameter list yields an empty filter, which is valid here and
/// means "no constraints". When a key appears more than once, the last
/// occurrence wins.
///
/// # Examples
///
/// ```
/// use strand::query::build_filter_from_query_params;
///
/// let filter = build_filter_from_query_params([("min_length", "3"), ("is_palindrome", "true")])?;
/// assert_eq!(filter.min_length, Some(3));
/// assert_eq!(filter.is_palindrome, Some(true));
///
/// assert!(build_filter_from_query_params([("sort", "asc")]).is_err());
/// # Ok::<(), strand::error::StrandError>(())
/// ```
pub fn build_filter_from_query_params<I, K, V>(params: I) -> Result<FilterSet>
where
    I: IntoIterator<Item = (K, V)>,
    K: AsRef<str>,
    V: AsRef<str>,
{
    let params: Vec<(K, V)> = params.into_iter().collect();

    let unsupported: Vec<&str> = params
        .iter()
        .map(|(key, _)| key.as_ref())
        .filter(|key| !SUPPORTED_PARAMS.contains(key))
        .collect();
    if !unsupported.is_empty() {
        return Err(StrandError::unsupported_filter(unsupported));
    }

    let mut filter = FilterSet::new();
    for (key, value) in &params {
        let value = value.as_ref();
        match key.as_ref() {
            IS_PALINDROME => filter.is_palindrome = Some(parse_bool(IS_PALINDROME, value)?),
            MIN_LENGTH => filter.min_length = Some(parse_count(MIN_LENGTH, value)?),
            MAX_LENGTH => filter.max_length = Some(parse_count(MAX_LENGTH, value)?),
            WORD_COUNT => filter.word_count = Some(parse_count(WORD_COUNT, value)?),
            CONTAINS_CHARACTER => {
                filter.contains_character = Some(parse_character(CONTAINS_CHARACTER, value)?)
            }
            other => return Err(StrandError::unsupported_filter([other])),
        }
    }

    debug!("Built filter from query parameters: {filter:?}");
    Ok(filter)
}

fn parse_bool(key: &str, value: &str) -> Result<bool> {
    match value {
        "true" => Ok(true),
        "false" => Ok(false),
        _ => Err(StrandError::validation(format!(
            "{key} must be \"true\" or \"false\", got {value:?}"
        ))),
    }
}

fn parse_count(key: &str, value: &str) -> Result<usize> {
    let invalid = || {
        StrandError::validation(format!(
            "{key} must be a non-negative integer, got {value:?}"
        ))
    };
    // `usize::from_str` also accepts a leading '+'.
    if !value.bytes().all(|b| b.is_ascii_digit()) {
        return Err(invalid());
    }
    value.parse::<usize>().map_err(|_| invalid())
}

fn parse_character(key: &str, value: &str) -> Result<char> {
    let mut chars = value.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => Ok(c),
        _ => Err(StrandError::validation(format!(
            "{key} must be a single character, got {value:?}"
        ))),
    }
}
