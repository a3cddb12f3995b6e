//! Command handlers for the CLI.

mod completions;
mod convert;
mod export;

pub use completions::handle_completions;
pub use convert::{convert_stream, handle_convert};
pub use export::{handle_export, run_export};
