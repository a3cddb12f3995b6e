//! mdexport - export content records as Markdown with YAML front matter

pub mod cli;
pub mod domain;
pub mod export;
pub mod infra;
pub mod logging;
pub mod store;

use anyhow::Result;
use clap::Parser;

use cli::{
    Cli, Command,
    config::Config,
    handlers::{handle_completions, handle_convert, handle_export},
};

/// Main entry point for the CLI application.
pub fn run() -> Result<()> {
    let cli = Cli::parse();
    logging::init_logging(cli.verbose);

    match &cli.command {
        Command::Export(args) => {
            let config = Config::load()?;
            let working_dir = config.working_dir(cli.dir.as_ref());
            handle_export(args, &working_dir, &config)
        }
        Command::Convert(args) => handle_convert(args),
        Command::Completions(args) => handle_completions(args),
    }
}
