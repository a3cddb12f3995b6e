//! Output format types for CLI commands.

use clap::ValueEnum;
use serde::Serialize;

use crate::export::{ExportOutcome, SkippedDocument};

/// Output format for command results.
#[derive(Debug, Clone, Copy, Default, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable output (default)
    #[default]
    Human,
    /// JSON output for programmatic consumption
    Json,
    /// Plain file path of the produced file
    Paths,
}

/// Wrapper for serializable command output.
#[derive(Debug, Serialize)]
pub struct Output<T: Serialize> {
    pub data: T,
}

impl<T: Serialize> Output<T> {
    pub fn new(data: T) -> Self {
        Self { data }
    }
}

/// A document left out of the export.
#[derive(Debug, Serialize)]
pub struct SkippedListing {
    pub id: u64,
    pub filename: String,
    pub reason: String,
}

impl From<&SkippedDocument> for SkippedListing {
    fn from(skipped: &SkippedDocument) -> Self {
        Self {
            id: skipped.record_id,
            filename: skipped.filename.clone(),
            reason: skipped.reason.clone(),
        }
    }
}

/// Summary of a finished export.
#[derive(Debug, Serialize)]
pub struct ExportSummary {
    pub message: String,
    pub exported: usize,
    pub path: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    pub archive: bool,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub skipped: Vec<SkippedListing>,
    pub purged: usize,
}

impl From<&ExportOutcome> for ExportSummary {
    fn from(outcome: &ExportOutcome) -> Self {
        Self {
            message: outcome.message.clone(),
            exported: outcome.exported,
            path: outcome.path().map(|p| p.to_string_lossy().to_string()),
            url: outcome.download_url.as_ref().map(|u| u.to_string()),
            archive: matches!(outcome.report.result, crate::domain::ExportResult::Archive(_)),
            skipped: outcome.report.skipped.iter().map(SkippedListing::from).collect(),
            purged: outcome.report.purged.len(),
        }
    }
}
