//! Export pipeline: HTML bodies to Markdown documents, packaged on disk.
//!
//! [`ExportService`] selects records from a content store, renders each one
//! with front matter and a converted body, then hands the batch to the
//! [`ExportPackager`], which writes a single `.md` file or a zip archive.

mod error;
pub mod links;
mod markdown;
mod packager;
mod service;

pub use error::ExportError;
pub use links::{ALLOWED_SCHEMES, sanitize_url};
pub use markdown::HtmlToMarkdownConverter;
pub use packager::{
    Archiver, DEFAULT_RETENTION, ExportPackager, PackageReport, SkippedDocument, ZipArchiver,
};
pub use service::{
    AccessPolicy, AllowAll, DEFAULT_STATUSES, EXCLUDED_STATUSES, ExportOutcome, ExportService,
};
