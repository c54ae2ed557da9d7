//! Structured filter over derived string properties.

use serde::{Deserialize, Serialize};

use crate::analysis::PropertySet;

/// A partially-specified predicate over a [`PropertySet`].
///
/// Every field is optional; an absent field places no constraint on that
/// dimension, so the default (empty) filter matches every property set.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterSet {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_palindrome: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_length: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_length: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub word_count: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contains_character: Option<char>,
}

impl FilterSet {
    /// Create an empty filter.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_palindrome(mut self, is_palindrome: bool) -> Self {
        self.is_palindrome = Some(is_palindrome);
        self
    }

    pub fn with_min_length(mut self, min_length: usize) -> Self {
        self.min_length = Some(min_length);
        self
    }

    pub fn with_max_length(mut self, max_length: usize) -> Self {
        self.max_length = Some(max_length);
        self
    }

    pub fn with_word_count(mut self, word_count: usize) -> Self {
        self.word_count = Some(word_count);
        self
    }

    pub fn with_character(mut self, c: char) -> Self {
        self.contains_character = Some(c);
        self
    }

    /// Whether no field is constrained.
    pub fn is_empty(&self) -> bool {
        self.is_palindrome.is_none()
            && self.min_length.is_none()
            && self.max_length.is_none()
            && self.word_count.is_none()
            && self.contains_character.is_none()
    }

    /// Test a property set against every present field (logical AND).
    ///
    /// `contains_character` is case-folded internally with the same rule the
    /// analyzer uses, so callers may pass either case.
    pub fn matches(&self, properties: &PropertySet) -> bool {
        self.is_palindrome
            .is_none_or(|expected| properties.is_palindrome == expected)
            && self.min_length.is_none_or(|min| properties.length >= min)
            && self.max_length.is_none_or(|max| properties.length <= max)
            && self
                .word_count
                .is_none_or(|expected| properties.word_count == expected)
            && self
                .contains_character
                .is_none_or(|c| properties.contains_character(c))
    }
}

/// Free-function form of [`FilterSet::matches`].
pub fn matches(properties: &PropertySet, filter: &FilterSet) -> bool {
    filter.matches(properties)
}
