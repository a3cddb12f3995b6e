//! CLI command definitions and handlers

pub mod config;
pub mod handlers;
pub mod output;

use clap::{ArgAction, ArgGroup, Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;

use crate::domain::ExportRequest;
use output::OutputFormat;

/// mdexport - export content records as Markdown with YAML front matter
#[derive(Parser, Debug)]
#[command(name = "mdexport", version, about, long_about = None)]
pub struct Cli {
    /// Working directory for exported files (overrides config file)
    #[arg(short = 'd', long, global = true)]
    pub dir: Option<PathBuf>,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Export records to Markdown (one file, or a zip archive for several)
    Export(ExportArgs),

    /// Convert an HTML fragment to Markdown
    Convert(ConvertArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

/// Arguments for the `export` command
#[derive(Parser, Debug)]
#[command(group(
    ArgGroup::new("selection")
        .required(true)
        .args(["ids", "taxonomy", "all"])
))]
pub struct ExportArgs {
    /// JSON file holding an array of content records
    #[arg(short, long)]
    pub source: PathBuf,

    /// Record id to export (can be specified multiple times)
    #[arg(long = "id", action = ArgAction::Append)]
    pub ids: Vec<u64>,

    /// Export every record with a term in this taxonomy (requires --term)
    #[arg(long, requires = "term")]
    pub taxonomy: Option<String>,

    /// Term to export within --taxonomy
    #[arg(long, requires = "taxonomy")]
    pub term: Option<String>,

    /// Export every record with an exportable status
    #[arg(long)]
    pub all: bool,

    /// Output format
    #[arg(short = 'f', long, value_enum, default_value_t = OutputFormat::Human)]
    pub format: OutputFormat,
}

impl ExportArgs {
    /// Builds the request described by the selection flags.
    pub fn request(&self) -> ExportRequest {
        match (&self.taxonomy, &self.term) {
            _ if !self.ids.is_empty() => ExportRequest::selected(self.ids.clone()),
            (Some(taxonomy), Some(term)) => ExportRequest::by_term(taxonomy, term),
            _ => ExportRequest::all(),
        }
    }
}

/// Arguments for the `convert` command
#[derive(Parser, Debug)]
pub struct ConvertArgs {
    /// HTML file to convert (reads stdin if omitted)
    pub file: Option<PathBuf>,
}

/// Arguments for the `completions` command
#[derive(Parser, Debug)]
pub struct CompletionsArgs {
    /// Shell to generate completions for (bash, zsh, fish)
    #[arg(value_enum)]
    pub shell: Shell,
}
