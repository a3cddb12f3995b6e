//! Export requests as accepted from the command layer.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Which records an export request targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportKind {
    /// Explicitly selected record ids, regardless of status.
    Selected,
    /// Every record carrying a given taxonomy term.
    Taxonomy,
    /// Every exportable record.
    All,
}

impl ExportKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ExportKind::Selected => "selected",
            ExportKind::Taxonomy => "taxonomy",
            ExportKind::All => "all",
        }
    }
}

impl fmt::Display for ExportKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned for an unknown export kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseExportKindError(String);

impl fmt::Display for ParseExportKindError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "'{}' (expected selected, taxonomy or all)", self.0)
    }
}

impl std::error::Error for ParseExportKindError {}

impl FromStr for ExportKind {
    type Err = ParseExportKindError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "selected" => Ok(ExportKind::Selected),
            "taxonomy" => Ok(ExportKind::Taxonomy),
            "all" => Ok(ExportKind::All),
            other => Err(ParseExportKindError(other.to_string())),
        }
    }
}

/// An export request: the kind plus its selectors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportRequest {
    pub kind: ExportKind,
    pub ids: Vec<u64>,
    pub taxonomy: Option<String>,
    pub term: Option<String>,
}

impl ExportRequest {
    /// Request for explicitly selected records.
    pub fn selected(ids: impl Into<Vec<u64>>) -> Self {
        Self {
            kind: ExportKind::Selected,
            ids: ids.into(),
            taxonomy: None,
            term: None,
        }
    }

    /// Request for every record with `term` in `taxonomy`.
    pub fn by_term(taxonomy: impl Into<String>, term: impl Into<String>) -> Self {
        Self {
            kind: ExportKind::Taxonomy,
            ids: Vec::new(),
            taxonomy: Some(taxonomy.into()),
            term: Some(term.into()),
        }
    }

    /// Request for every exportable record.
    pub fn all() -> Self {
        Self {
            kind: ExportKind::All,
            ids: Vec::new(),
            taxonomy: None,
            term: None,
        }
    }
}
