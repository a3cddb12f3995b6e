//! Errors reported to the caller of an export request.

use thiserror::Error;

use crate::domain::ParseExportKindError;
use crate::store::StoreError;

/// Why an export request produced nothing.
///
/// Per-document write failures are not errors at this level; they show up as
/// skipped documents in the package report.
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("Invalid export type: {0}")]
    InvalidExportKind(#[from] ParseExportKindError),

    #[error("Invalid taxonomy: {0}")]
    InvalidTaxonomy(String),

    #[error("Invalid term '{term}' for taxonomy '{taxonomy}'")]
    InvalidTerm { taxonomy: String, term: String },

    #[error("Please select at least one item to export")]
    MissingSelection,

    #[error("Please select both a taxonomy and term")]
    MissingTaxonomySelector,

    #[error("No posts found to export")]
    NoRecordsFound,

    #[error("You do not have permission to export these posts")]
    PermissionDenied,

    #[error("No posts available for export with your permissions")]
    NoPermittedRecords,

    #[error("Failed to export posts")]
    ExportFailed,

    #[error(transparent)]
    Store(#[from] StoreError),
}

impl ExportError {
    /// Returns true for errors caused by the request itself rather than by
    /// permissions, storage, or packaging.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            ExportError::InvalidExportKind(_)
                | ExportError::InvalidTaxonomy(_)
                | ExportError::InvalidTerm { .. }
                | ExportError::MissingSelection
                | ExportError::MissingTaxonomySelector
                | ExportError::NoRecordsFound
        )
    }

    /// Returns true for authorization failures.
    pub fn is_authorization(&self) -> bool {
        matches!(
            self,
            ExportError::PermissionDenied | ExportError::NoPermittedRecords
        )
    }
}
