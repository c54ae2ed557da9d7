//! Output formatting for CLI commands.

use std::fmt::Write as _;

use serde::{Deserialize, Serialize};

use crate::analysis::PropertySet;
use crate::catalog::{AnalyzedString, ListResponse, NaturalLanguageResponse};
use crate::cli::args::{OutputFormat, StrandArgs};
use crate::error::Result;

/// Result structure for the inspect command.
#[derive(Debug, Serialize, Deserialize)]
pub struct InspectionResult {
    pub value: String,
    pub properties: PropertySet,
}

/// Result structure for a single failed import line.
#[derive(Debug, Serialize, Deserialize)]
pub struct ImportFailure {
    pub line: usize,
    pub message: String,
}

/// Result structure for the import command.
#[derive(Debug, Serialize, Deserialize)]
pub struct ImportResult {
    pub imported: usize,
    pub failed: usize,
    pub duration_ms: u64,
    pub failures: Vec<ImportFailure>,
}

/// Human-readable rendering of a command result.
pub trait HumanReadable {
    fn render_human(&self) -> String;
}

/// Output a result in the format selected on the command line.
pub fn output_result<T>(message: &str, result: &T, args: &StrandArgs) -> Result<()>
where
    T: Serialize + HumanReadable,
{
    match args.output_format {
        OutputFormat::Human => {
            if args.verbosity() > 0 {
                println!("{message}");
                println!();
            }
            print!("{}", result.render_human());
        }
        OutputFormat::Json => {
            let json = if args.pretty {
                serde_json::to_string_pretty(result)?
            } else {
                serde_json::to_string(result)?
            };
            println!("{json}");
        }
    }
    Ok(())
}

fn render_properties(out: &mut String, properties: &PropertySet) {
    let _ = writeln!(out, "  length:            {}", properties.length);
    let _ = writeln!(out, "  is_palindrome:     {}", properties.is_palindrome);
    let _ = writeln!(out, "  unique_characters: {}", properties.unique_characters);
    let _ = writeln!(out, "  word_count:        {}", properties.word_count);
    let _ = writeln!(out, "  sha256_hash:       {}", properties.sha256_hash);

    let frequencies: Vec<String> = properties
        .character_frequency_map
        .iter()
        .map(|(c, count)| format!("{c:?}: {count}"))
        .collect();
    let _ = writeln!(out, "  frequencies:       {{{}}}", frequencies.join(", "));
}

impl HumanReadable for AnalyzedString {
    fn render_human(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "Value: {:?}", self.value);
        let _ = writeln!(out, "Id:    {}", self.id);
        let _ = writeln!(out, "Created: {}", self.created_at.to_rfc3339());
        render_properties(&mut out, &self.properties);
        out
    }
}

impl HumanReadable for InspectionResult {
    fn render_human(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "Value: {:?}", self.value);
        render_properties(&mut out, &self.properties);
        out
    }
}

impl HumanReadable for ListResponse {
    fn render_human(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "Strings:");
        let _ = writeln!(out, "════════");
        for record in &self.data {
            let _ = writeln!(
                out,
                "{:?} (length {}, words {}, palindrome {})",
                record.value,
                record.properties.length,
                record.properties.word_count,
                record.properties.is_palindrome
            );
        }
        let _ = writeln!(out);
        let _ = writeln!(out, "Count: {}", self.count);
        if let Ok(filters) = serde_json::to_string(&self.filters_applied) {
            let _ = writeln!(out, "Filters applied: {filters}");
        }
        out
    }
}

impl HumanReadable for NaturalLanguageResponse {
    fn render_human(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "Strings:");
        let _ = writeln!(out, "════════");
        for value in &self.data {
            let _ = writeln!(out, "{value:?}");
        }
        let _ = writeln!(out);
        let _ = writeln!(out, "Count: {}", self.count);
        let _ = writeln!(out, "Query: {:?}", self.interpreted_query.original);
        if let Ok(filters) = serde_json::to_string(&self.interpreted_query.parsed_filters) {
            let _ = writeln!(out, "Parsed filters: {filters}");
        }
        out
    }
}

impl HumanReadable for ImportResult {
    fn render_human(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "Imported: {}", self.imported);
        let _ = writeln!(out, "Failed:   {}", self.failed);
        let _ = writeln!(out, "Time:     {}ms", self.duration_ms);
        for failure in &self.failures {
            let _ = writeln!(out, "  line {}: {}", failure.line, failure.message);
        }
        out
    }
}
