//! Derived property computation.
//!
//! Characters are counted as Unicode scalar values (`char`), never bytes.
//! Case folding lower-cases the whole value with [`str::to_lowercase`], which is
//! context-sensitive (a word-final `Σ` becomes `ς`, elsewhere `σ`). A single
//! input character may expand to several lower-case characters and every count
//! below operates on that lower-cased sequence.
//!
//! # Examples
//!
//! ```
//! use strand::analysis::compute_properties;
//!
//! let properties = compute_properties("Racecar");
//! assert_eq!(properties.length, 7);
//! assert!(properties.is_palindrome);
//! assert_eq!(properties.unique_characters, 4);
//! assert_eq!(properties.word_count, 1);
//! assert_eq!(properties.character_frequency_map.get(&'r'), Some(&2));
//! ```

use std::collections::{BTreeMap, HashSet};

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

/// Mapping from a lower-cased, non-whitespace character to its occurrence count.
pub type CharacterFrequencyMap = BTreeMap<char, usize>;

/// The derived, read-only properties of an analyzed string.
///
/// Invariant: `unique_characters == character_frequency_map.len()`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PropertySet {
    /// Number of characters in the value.
    pub length: usize,
    /// Whether the lower-cased value reads the same reversed.
    pub is_palindrome: bool,
    /// Number of distinct lower-cased, non-whitespace characters.
    pub unique_characters: usize,
    /// Number of whitespace-delimited words.
    pub word_count: usize,
    /// SHA-256 of the exact value, as lowercase hex.
    pub sha256_hash: String,
    /// Occurrences of each lower-cased, non-whitespace character.
    #[serde(default)]
    pub character_frequency_map: CharacterFrequencyMap,
}

impl PropertySet {
    /// Whether the frequency map records the given character.
    ///
    /// The character is folded with the same rule used during analysis, so
    /// `'R'` and `'r'` are equivalent. A character whose lower-case form is
    /// more than one character can never be a single key and never matches.
    pub fn contains_character(&self, c: char) -> bool {
        match fold_char(c) {
            Some(folded) => self.character_frequency_map.contains_key(&folded),
            None => false,
        }
    }
}

/// Compute every derived property of `value`.
pub fn compute_properties(value: &str) -> PropertySet {
    let character_frequency_map = character_frequency_map(value);

    PropertySet {
        length: length(value),
        is_palindrome: is_palindrome(value),
        unique_characters: character_frequency_map.len(),
        word_count: word_count(value),
        sha256_hash: content_hash(value),
        character_frequency_map,
    }
}

/// Character count of `value`.
pub fn length(value: &str) -> usize {
    value.chars().count()
}

/// Case-insensitive, whitespace-sensitive palindrome test.
///
/// The empty string is a palindrome.
pub fn is_palindrome(value: &str) -> bool {
    let lowered: Vec<char> = value.to_lowercase().chars().collect();
    lowered.iter().eq(lowered.iter().rev())
}

/// Number of distinct characters after lower-casing and removing whitespace.
pub fn unique_character_count(value: &str) -> usize {
    folded_chars(&value.to_lowercase())
        .collect::<HashSet<char>>()
        .len()
}

/// Number of whitespace-delimited tokens; zero for empty or blank input.
pub fn word_count(value: &str) -> usize {
    value.split_whitespace().count()
}

/// SHA-256 over the exact, un-normalized bytes of `value`, as lowercase hex.
pub fn content_hash(value: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(value.as_bytes());
    format!("{:x}", hasher.finalize())
}

/// Occurrence count of each lower-cased, non-whitespace character.
pub fn character_frequency_map(value: &str) -> CharacterFrequencyMap {
    let mut frequencies = CharacterFrequencyMap::new();
    for c in folded_chars(&value.to_lowercase()) {
        *frequencies.entry(c).or_insert(0) += 1;
    }
    frequencies
}

/// Fold a single character to the form used as a frequency-map key.
///
/// A lone character has no surrounding word, so it is folded with
/// [`char::to_lowercase`]. Returns `None` for whitespace and for characters
/// whose lower-case form spans several characters.
pub fn fold_char(c: char) -> Option<char> {
    let mut lowered = c.to_lowercase();
    match (lowered.next(), lowered.next()) {
        (Some(folded), None) if !folded.is_whitespace() => Some(folded),
        _ => None,
    }
}

fn folded_chars(lowered: &str) -> impl Iterator<Item = char> + '_ {
    lowered.chars().filter(|c| !c.is_whitespace())
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLES: &[&str] = &[
        "",
        " ",
        "a",
        "Racecar",
        "A man a plan",
        "never odd or even",
        "hello world",
        "  Mixed\tWhitespace\n here ",
        "Ünïcödé ÄÖÜ",
        "naïve café",
        "abcABC",
        "12321",
        "Was it a car or a cat I saw",
    ];

    #[test]
    fn test_racecar_properties() {
        let properties = compute_properties("Racecar");

        assert_eq!(properties.length, 7);
        assert!(properties.is_palindrome);
        assert_eq!(properties.unique_characters, 4);
        assert_eq!(properties.word_count, 1);

        let expected: CharacterFrequencyMap =
            [('r', 2), ('a', 2), ('c', 2), ('e', 1)].into_iter().collect();
        assert_eq!(properties.character_frequency_map, expected);
        assert_eq!(properties.sha256_hash, content_hash("Racecar"));
    }

    #[test]
    fn test_length_counts_chars_not_bytes() {
        assert_eq!(length(""), 0);
        assert_eq!(length("héllo"), 5);
        assert_eq!(length("日本語"), 3);
        assert_eq!(length("a b"), 3);
    }

    #[test]
    fn test_palindrome() {
        assert!(is_palindrome(""));
        assert!(is_palindrome("Aba"));
        assert!(is_palindrome("a b a"));
        // Embedded spaces count.
        assert!(!is_palindrome("ab ba "));
        assert!(!is_palindrome("never odd or even"));
        assert!(!is_palindrome("hello"));
    }

    #[test]
    fn test_palindrome_symmetry() {
        for sample in SAMPLES {
            let reversed: String = sample.chars().rev().collect();
            assert_eq!(
                is_palindrome(sample),
                is_palindrome(&reversed),
                "symmetry failed for {sample:?}"
            );
        }
    }

    #[test]
    fn test_word_count() {
        assert_eq!(word_count(""), 0);
        assert_eq!(word_count("   "), 0);
        assert_eq!(word_count("a  b   c"), 3);
        assert_eq!(word_count("\thello\nworld "), 2);
    }

    #[test]
    fn test_unique_count_matches_frequency_map() {
        for sample in SAMPLES {
            assert_eq!(
                unique_character_count(sample),
                character_frequency_map(sample).len(),
                "invariant failed for {sample:?}"
            );
            let properties = compute_properties(sample);
            assert_eq!(
                properties.unique_characters,
                properties.character_frequency_map.len()
            );
        }
    }

    #[test]
    fn test_frequency_map_ignores_case_and_whitespace() {
        let frequencies = character_frequency_map("Aa B\tb");
        assert_eq!(frequencies.len(), 2);
        assert_eq!(frequencies[&'a'], 2);
        assert_eq!(frequencies[&'b'], 2);
        assert!(character_frequency_map("   ").is_empty());
        assert_eq!(unique_character_count(""), 0);
    }

    #[test]
    fn test_content_hash() {
        assert_eq!(
            content_hash(""),
            "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
        );
        assert_eq!(
            content_hash("abc"),
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
        assert_eq!(content_hash("Racecar"), content_hash("Racecar"));
        assert_ne!(content_hash("Racecar"), content_hash("racecar"));
        assert_eq!(content_hash("anything").len(), 64);
    }

    #[test]
    fn test_contains_character_folds_case() {
        let properties = compute_properties("Hello");
        assert!(properties.contains_character('h'));
        assert!(properties.contains_character('H'));
        assert!(properties.contains_character('L'));
        assert!(!properties.contains_character('z'));
        assert!(!properties.contains_character(' '));
    }

    #[test]
    fn test_fold_char() {
        assert_eq!(fold_char('Q'), Some('q'));
        assert_eq!(fold_char('ß'), Some('ß'));
        assert_eq!(fold_char(' '), None);
        // 'İ' lowercases to "i\u{307}".
        assert_eq!(fold_char('İ'), None);
    }

    #[test]
    fn test_final_sigma_folds_by_context() {
        let properties = compute_properties("ΣΑΣ");

        assert!(!properties.is_palindrome);
        assert_eq!(properties.unique_characters, 3);
        let expected: CharacterFrequencyMap =
            [('σ', 1), ('α', 1), ('ς', 1)].into_iter().collect();
        assert_eq!(properties.character_frequency_map, expected);

        assert!(properties.contains_character('ς'));
        assert_eq!(unique_character_count("ΟΔΟΣ ΣΑΣ"), 5);
    }

    #[test]
    fn test_serialized_field_names() -> crate::error::Result<()> {
        let json = serde_json::to_value(compute_properties("ab"))?;
        let object = json.as_object().unwrap();
        for key in [
            "length",
            "is_palindrome",
            "unique_characters",
            "word_count",
            "sha256_hash",
            "character_frequency_map",
        ] {
            assert!(object.contains_key(key), "missing {key}");
        }
        assert_eq!(json["character_frequency_map"]["a"], 1);
        Ok(())
    }
}
