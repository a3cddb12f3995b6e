//! Content sources feeding the export pipeline

mod json;
mod repository;

pub use json::JsonContentStore;
pub use repository::{ContentStore, StoreError, StoreResult};
