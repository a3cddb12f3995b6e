//! Content store backed by a JSON array of records.

use std::path::Path;

use crate::domain::ContentRecord;

use super::repository::{ContentStore, StoreError, StoreResult};

/// In-memory store loaded from a JSON file.
///
/// The file holds an array of records:
///
/// ```json
/// [
///   {
///     "id": 1,
///     "title": "Hello World",
///     "name": "hello-world",
///     "body": "<p>Welcome.</p>",
///     "date": "2024-01-15 10:30:00",
///     "author": "Ada",
///     "kind": "post",
///     "type_label": "Post",
///     "status": "publish",
///     "taxonomies": [{ "name": "category", "terms": ["News"] }],
///     "custom_fields": [{ "key": "subtitle", "value": "First" }]
///   }
/// ]
/// ```
#[derive(Debug, Clone, Default)]
pub struct JsonContentStore {
    records: Vec<ContentRecord>,
}

impl JsonContentStore {
    /// Builds a store from records already in memory.
    pub fn from_records(mut records: Vec<ContentRecord>) -> Self {
        records.sort_by(|a, b| a.title().cmp(b.title()).then(a.id().cmp(&b.id())));
        Self { records }
    }

    /// Loads records from a JSON file.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Io` if the file cannot be read and
    /// `StoreError::Parse` if it is not a JSON array of records.
    pub fn open(path: &Path) -> StoreResult<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| StoreError::Io {
            path: path.into(),
            source: e,
        })?;
        let records: Vec<ContentRecord> =
            serde_json::from_str(&contents).map_err(|e| StoreError::Parse {
                path: path.into(),
                source: e,
            })?;
        tracing::debug!(path = %path.display(), count = records.len(), "loaded content records");
        Ok(Self::from_records(records))
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    fn filtered<F>(&self, predicate: F) -> Vec<ContentRecord>
    where
        F: Fn(&ContentRecord) -> bool,
    {
        self.records.iter().filter(|r| predicate(r)).cloned().collect()
    }
}

fn status_allowed(record: &ContentRecord, statuses: &[String]) -> bool {
    statuses.iter().any(|s| s == record.status())
}

impl ContentStore for JsonContentStore {
    fn get_by_ids(&self, ids: &[u64]) -> StoreResult<Vec<ContentRecord>> {
        Ok(self.filtered(|r| ids.contains(&r.id())))
    }

    fn list_by_term(
        &self,
        taxonomy: &str,
        term: &str,
        statuses: &[String],
    ) -> StoreResult<Vec<ContentRecord>> {
        Ok(self.filtered(|r| r.has_term(taxonomy, term) && status_allowed(r, statuses)))
    }

    fn list_all(&self, statuses: &[String]) -> StoreResult<Vec<ContentRecord>> {
        Ok(self.filtered(|r| status_allowed(r, statuses)))
    }

    fn taxonomy_exists(&self, taxonomy: &str) -> bool {
        self.records
            .iter()
            .any(|r| r.taxonomies().iter().any(|t| t.name == taxonomy))
    }

    fn term_exists(&self, taxonomy: &str, term: &str) -> bool {
        self.records.iter().any(|r| r.has_term(taxonomy, term))
    }
}
