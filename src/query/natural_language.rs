//! Natural-language filter parsing.
//!
//! A phrase is matched against a fixed, ordered table of [`PhraseRule`]s. Each
//! rule pairs a case-insensitive pattern with a producer that writes its
//! contribution into a [`FilterSet`]. Rules run in table order and a later rule
//! overwrites what an earlier one set, which is how an explicit letter
//! ("containing the letter x") takes precedence over a positional phrase
//! ("contains the first vowel").
//!
//! The positional phrases map to fixed letters (`a`, `u`, `b`, `z`) rather than
//! anything derived from the stored strings.
//!
//! # Examples
//!
//! ```
//! use strand::query::{FilterSet, NaturalLanguageParser};
//!
//! let parser = NaturalLanguageParser::new()?;
//! let filter = parser.parse("Find me all single word palindromic strings");
//! assert_eq!(filter, FilterSet::new().with_word_count(1).with_palindrome(true));
//!
//! assert!(parser.parse("hello world").is_empty());
//! # Ok::<(), strand::error::StrandError>(())
//! ```

use std::fmt;
use std::sync::Arc;

use log::debug;
use regex::{Captures, Regex};

use crate::error::{Result, StrandError};
use crate::query::filter::FilterSet;

/// Writes a rule's contribution into the filter being built.
type Producer = fn(&Captures<'_>, &mut FilterSet);

/// One entry of the phrase grammar.
#[derive(Clone)]
pub struct PhraseRule {
    name: &'static str,
    pattern: Arc<Regex>,
    produce: Producer,
}

impl PhraseRule {
    /// Compile a rule. Patterns are always matched case-insensitively.
    pub fn new(name: &'static str, pattern: &str, produce: Producer) -> Result<Self> {
        let regex = Regex::new(&format!("(?i){pattern}")).map_err(|e| {
            StrandError::other(format!("Invalid phrase pattern for rule {name}: {e}"))
        })?;

        Ok(PhraseRule {
            name,
            pattern: Arc::new(regex),
            produce,
        })
    }

    /// The rule's name.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// The compiled pattern source.
    pub fn pattern(&self) -> &str {
        self.pattern.as_str()
    }

    /// Apply this rule to `phrase`, returning whether it matched.
    pub fn apply(&self, phrase: &str, filter: &mut FilterSet) -> bool {
        match self.pattern.captures(phrase) {
            Some(captures) => {
                (self.produce)(&captures, filter);
                true
            }
            None => false,
        }
    }
}

impl fmt::Debug for PhraseRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PhraseRule")
            .field("name", &self.name)
            .field("pattern", &self.pattern.as_str())
            .finish()
    }
}

fn single_word(_: &Captures<'_>, filter: &mut FilterSet) {
    filter.word_count = Some(1);
}

fn palindromic(_: &Captures<'_>, filter: &mut FilterSet) {
    filter.is_palindrome = Some(true);
}

fn longer_than(captures: &Captures<'_>, filter: &mut FilterSet) {
    let min_length = captures["n"]
        .parse::<usize>()
        .ok()
        .and_then(|n| n.checked_add(1));
    if let Some(min_length) = min_length {
        filter.min_length = Some(min_length);
    }
}

fn letter_position(captures: &Captures<'_>, filter: &mut FilterSet) {
    let first = captures["position"].eq_ignore_ascii_case("first");
    let vowel = captures["class"].eq_ignore_ascii_case("vowel");
    let c = match (first, vowel) {
        (true, true) => 'a',
        (false, true) => 'u',
        (true, false) => 'b',
        (false, false) => 'z',
    };
    filter.contains_character = Some(c);
}

fn explicit_letter(captures: &Captures<'_>, filter: &mut FilterSet) {
    if let Some(c) = captures["letter"].chars().next() {
        filter.contains_character = c.to_lowercase().next();
    }
}

/// Parser for the fixed natural-language filter grammar.
#[derive(Debug, Clone)]
pub struct NaturalLanguageParser {
    rules: Vec<PhraseRule>,
}

impl NaturalLanguageParser {
    /// Create a parser with the standard rule table.
    pub fn new() -> Result<Self> {
        let rules = vec![
            PhraseRule::new("single_word", r"single word", single_word)?,
            PhraseRule::new("palindromic", r"palindromic strings", palindromic)?,
            PhraseRule::new("longer_than", r"longer\s+than\s+(?P<n>[0-9]+)", longer_than)?,
            PhraseRule::new(
                "letter_position",
                r"contains?\s+(?:the\s+)?(?P<position>first|last)\s+(?P<class>vowel|consonant)",
                letter_position,
            )?,
            PhraseRule::new(
                "explicit_letter",
                r"contain(?:s|ing)?\s+(?:the\s+)?letter\s+(?P<letter>[a-z])",
                explicit_letter,
            )?,
        ];

        Ok(NaturalLanguageParser { rules })
    }

    /// The rules in evaluation order.
    pub fn rules(&self) -> &[PhraseRule] {
        &self.rules
    }

    /// Translate `phrase` into a filter.
    ///
    /// Never fails: a phrase no rule recognizes yields an empty filter, and the
    /// caller decides what emptiness means.
    pub fn parse(&self, phrase: &str) -> FilterSet {
        let mut filter = FilterSet::new();
        for rule in &self.rules {
            if rule.apply(phrase, &mut filter) {
                debug!("Phrase rule {} matched {phrase:?}", rule.name);
            }
        }
        filter
    }
}

impl Default for NaturalLanguageParser {
    fn default() -> Self {
        Self::new().expect("Built-in phrase patterns should be valid")
    }
}
