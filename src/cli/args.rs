//! Command line argument parsing for Strand CLI using clap.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use serde::{Deserialize, Serialize};

use crate::catalog::CatalogConfig;
use crate::error::{Result, StrandError};

/// Strand - A catalog of analyzed strings
#[derive(Parser, Debug, Clone)]
#[command(name = "strand")]
#[command(about = "Analyze strings and query them with structured or natural-language filters")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(author = "Strand Contributors")]
#[command(long_about = None)]
pub struct StrandArgs {
    /// Verbosity level (0=quiet, 1=normal, 2=verbose, 3=debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Quiet mode (overrides verbose)
    #[arg(short, long)]
    pub quiet: bool,

    /// Output format
    #[arg(short = 'f', long = "format", default_value = "human")]
    pub output_format: OutputFormat,

    /// Pretty-print JSON output
    #[arg(long)]
    pub pretty: bool,

    /// JSON data file backing the catalog (in-memory when omitted)
    #[arg(long, env = "STRAND_DATA_FILE", value_name = "DATA_FILE")]
    pub data_file: Option<PathBuf>,

    /// Write the data file pretty-printed
    #[arg(long)]
    pub pretty_store: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Command,
}

impl StrandArgs {
    /// Get the effective verbosity level
    pub fn verbosity(&self) -> u8 {
        if self.quiet {
            0
        } else {
            match self.verbose {
                0 => 1, // Default to normal
                n => n,
            }
        }
    }

    /// Catalog configuration described by the global options.
    pub fn catalog_config(&self) -> CatalogConfig {
        CatalogConfig {
            data_file: self.data_file.clone(),
            pretty: self.pretty_store,
        }
    }
}

/// Available CLI commands
#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Analyze a string and add it to the catalog
    Analyze(AnalyzeArgs),

    /// Analyze every request body in a JSON Lines file
    Import(ImportArgs),

    /// Show the properties of a string without cataloging it
    Inspect(InspectArgs),

    /// Show a cataloged string
    Get(GetArgs),

    /// List cataloged strings matching structured filters
    List(ListArgs),

    /// List cataloged strings matching a natural-language query
    Search(SearchArgs),

    /// Remove a string from the catalog
    Delete(DeleteArgs),
}

/// Arguments for analyzing a string
#[derive(Parser, Debug, Clone)]
pub struct AnalyzeArgs {
    /// The string to analyze
    #[arg(value_name = "VALUE")]
    pub value: String,
}

/// Arguments for importing request bodies
#[derive(Parser, Debug, Clone)]
pub struct ImportArgs {
    /// JSON Lines file of `{"value": ...}` bodies
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    /// Show progress every N lines
    #[arg(long, default_value = "1000")]
    pub progress_every: usize,
}

/// Arguments for inspecting a string
#[derive(Parser, Debug, Clone)]
pub struct InspectArgs {
    /// The string to inspect
    #[arg(value_name = "VALUE")]
    pub value: String,
}

/// Arguments for fetching a string
#[derive(Parser, Debug, Clone)]
pub struct GetArgs {
    /// The cataloged string
    #[arg(value_name = "VALUE")]
    pub value: String,
}

/// Arguments for structured listing
#[derive(Parser, Debug, Clone)]
pub struct ListArgs {
    /// Filter parameter as key=value (repeatable). Keys: is_palindrome,
    /// min_length, max_length, word_count, contains_character
    #[arg(short = 'p', long = "param", value_name = "KEY=VALUE")]
    pub params: Vec<String>,
}

impl ListArgs {
    /// Split every `key=value` parameter.
    ///
    /// Only the first `=` separates key from value, so `contains_character==`
    /// filters on `=`.
    pub fn parsed_params(&self) -> Result<Vec<(String, String)>> {
        self.params
            .iter()
            .map(|param| {
                param
                    .split_once('=')
                    .map(|(key, value)| (key.to_string(), value.to_string()))
                    .ok_or_else(|| {
                        StrandError::validation(format!(
                            "Filter parameter must be KEY=VALUE, got {param:?}"
                        ))
                    })
            })
            .collect()
    }
}

/// Arguments for natural-language search
#[derive(Parser, Debug, Clone)]
pub struct SearchArgs {
    /// Natural-language query, e.g. "single word palindromic strings"
    #[arg(value_name = "QUERY")]
    pub query: String,
}

/// Arguments for deleting a string
#[derive(Parser, Debug, Clone)]
pub struct DeleteArgs {
    /// The cataloged string
    #[arg(value_name = "VALUE")]
    pub value: String,
}

/// Output formats
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable output
    Human,
    /// JSON output
    Json,
}
