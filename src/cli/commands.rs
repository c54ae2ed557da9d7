//! Command implementations for Strand CLI.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::time::Instant;

use log::{info, warn};
use serde_json::Value;

use crate::analysis::compute_properties;
use crate::catalog::CatalogService;
use crate::cli::args::*;
use crate::cli::output::*;
use crate::error::{Result, StrandError};

/// Execute a CLI command.
pub fn execute_command(args: StrandArgs) -> Result<()> {
    match &args.command {
        Command::Inspect(inspect_args) => inspect_value(inspect_args, &args),
        command => {
            let service = CatalogService::open(&args.catalog_config())?;
            info!(
                "Using {} catalog with {} strings",
                service.store().store_type(),
                service.store().len()?
            );
            run_catalog_command(&service, command, &args)
        }
    }
}

/// Execute a command that needs the catalog.
pub fn run_catalog_command(
    service: &CatalogService,
    command: &Command,
    cli_args: &StrandArgs,
) -> Result<()> {
    match command {
        Command::Analyze(analyze_args) => {
            let record = service.analyze(&analyze_args.value)?;
            output_result("String analyzed", &record, cli_args)
        }
        Command::Import(import_args) => {
            let result = import_file(service, import_args, cli_args)?;
            output_result("Import finished", &result, cli_args)
        }
        Command::Inspect(inspect_args) => inspect_value(inspect_args, cli_args),
        Command::Get(get_args) => {
            let record = service.get(&get_args.value)?;
            output_result("String found", &record, cli_args)
        }
        Command::List(list_args) => {
            let response = service.list(list_args.parsed_params()?)?;
            output_result("Strings matching filters", &response, cli_args)
        }
        Command::Search(search_args) => {
            let response = service.filter_by_natural_language(&search_args.query)?;
            output_result("Strings matching query", &response, cli_args)
        }
        Command::Delete(delete_args) => {
            let record = service.delete(&delete_args.value)?;
            output_result("String deleted", &record, cli_args)
        }
    }
}

/// Show the properties of a value without cataloging it.
fn inspect_value(args: &InspectArgs, cli_args: &StrandArgs) -> Result<()> {
    let result = InspectionResult {
        properties: compute_properties(&args.value),
        value: args.value.clone(),
    };
    output_result("String properties", &result, cli_args)
}

/// Analyze every request body of a JSON Lines file.
///
/// A line that fails to parse or validate is recorded and skipped; only I/O
/// failures abort the import.
pub fn import_file(
    service: &CatalogService,
    args: &ImportArgs,
    cli_args: &StrandArgs,
) -> Result<ImportResult> {
    let start_time = Instant::now();
    let reader = BufReader::new(File::open(&args.file)?);

    let mut imported = 0;
    let mut failures = Vec::new();

    for (line_num, line) in reader.lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }

        let outcome = serde_json::from_str::<Value>(&line)
            .map_err(StrandError::from)
            .and_then(|body| service.analyze_json(&body));

        match outcome {
            Ok(_) => imported += 1,
            Err(e) => {
                warn!("Skipping line {}: {}", line_num + 1, e);
                failures.push(ImportFailure {
                    line: line_num + 1,
                    message: e.to_string(),
                });
            }
        }

        let processed = imported + failures.len();
        if args.progress_every > 0
            && processed % args.progress_every == 0
            && cli_args.verbosity() > 1
        {
            eprintln!("Processed {processed} lines...");
        }
    }

    Ok(ImportResult {
        imported,
        failed: failures.len(),
        duration_ms: start_time.elapsed().as_millis() as u64,
        failures,
    })
}
