//! Handler for the `export` command.

use anyhow::{Context, Result};
use std::path::Path;

use crate::cli::ExportArgs;
use crate::cli::config::Config;
use crate::cli::output::{ExportSummary, Output, OutputFormat};
use crate::export::{ExportOutcome, ExportPackager, ExportService};
use crate::store::JsonContentStore;

/// Handle the `export` command.
pub fn handle_export(args: &ExportArgs, working_dir: &Path, config: &Config) -> Result<()> {
    let outcome = run_export(args, working_dir, config)?;
    let summary = ExportSummary::from(&outcome);

    match args.format {
        OutputFormat::Human => {
            println!("{}", summary.message);
            if let Some(path) = &summary.path {
                println!("  file: {}", path);
            }
            if let Some(url) = &summary.url {
                println!("  url:  {}", url);
            }
            for skipped in &summary.skipped {
                eprintln!(
                    "  skipped: {} (id {}): {}",
                    skipped.filename, skipped.id, skipped.reason
                );
            }
        }
        OutputFormat::Json => {
            let output = Output::new(summary);
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Paths => {
            if let Some(path) = &summary.path {
                println!("{}", path);
            }
        }
    }

    Ok(())
}

/// Loads the record source and runs the export described by `args`.
pub fn run_export(args: &ExportArgs, working_dir: &Path, config: &Config) -> Result<ExportOutcome> {
    let store = JsonContentStore::open(&args.source)
        .with_context(|| format!("failed to load records from {}", args.source.display()))?;
    tracing::debug!(records = store.len(), source = %args.source.display(), "loaded records");

    let mut service = ExportService::new(&store, working_dir)
        .with_statuses(config.statuses())
        .with_packager(ExportPackager::new(config.retention()));
    if let Some(urls) = config.public_urls(working_dir)? {
        service = service.with_public_urls(urls);
    }

    Ok(service.export(&args.request())?)
}
