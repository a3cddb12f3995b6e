//! ContentStore trait and error type.

use crate::domain::ContentRecord;
use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while loading or querying content.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The content source could not be read.
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The content source is not valid JSON or does not describe records.
    #[error("invalid content source {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Result type for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// Read access to content records.
///
/// Implementations enforce their own visibility rules. Every listing is
/// ordered by title, ascending.
pub trait ContentStore {
    /// Returns the records with the given ids, regardless of status.
    ///
    /// Unknown ids are ignored.
    fn get_by_ids(&self, ids: &[u64]) -> StoreResult<Vec<ContentRecord>>;

    /// Returns records with `term` in `taxonomy` whose status is in `statuses`.
    fn list_by_term(
        &self,
        taxonomy: &str,
        term: &str,
        statuses: &[String],
    ) -> StoreResult<Vec<ContentRecord>>;

    /// Returns every record whose status is in `statuses`.
    fn list_all(&self, statuses: &[String]) -> StoreResult<Vec<ContentRecord>>;

    /// Returns true if any record uses `taxonomy`.
    fn taxonomy_exists(&self, taxonomy: &str) -> bool;

    /// Returns true if `term` is assigned in `taxonomy` on any record.
    fn term_exists(&self, taxonomy: &str, term: &str) -> bool;
}
