//! Core types: ContentRecord, MarkdownDocument, ExportBatch, ExportRequest

mod document;
mod record;
mod request;

pub use document::{BatchEntry, ExportBatch, ExportResult, FrontMatterValue, MarkdownDocument};
pub use record::{ContentRecord, ContentRecordBuilder, CustomField, DATE_FORMAT, Taxonomy};
pub use request::{ExportKind, ExportRequest, ParseExportKindError};
