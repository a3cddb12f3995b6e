//! Rendered Markdown documents and export batches.

use std::fmt;
use std::path::{Path, PathBuf};

/// A front matter value: either an escaped scalar or a list of escaped scalars.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FrontMatterValue {
    Scalar(String),
    List(Vec<String>),
    /// Nested `key: value` pairs, rendered one level deep.
    Map(Vec<(String, String)>),
}

/// A Markdown document: ordered front matter entries plus body text.
///
/// Front matter values are stored already escaped, so rendering is a plain
/// concatenation.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct MarkdownDocument {
    front_matter: Vec<(String, FrontMatterValue)>,
    body: String,
}

impl MarkdownDocument {
    pub fn new(front_matter: Vec<(String, FrontMatterValue)>, body: impl Into<String>) -> Self {
        Self {
            front_matter,
            body: body.into(),
        }
    }

    pub fn front_matter(&self) -> &[(String, FrontMatterValue)] {
        &self.front_matter
    }

    pub fn body(&self) -> &str {
        &self.body
    }

    /// Returns the scalar value stored under `key`, if any.
    pub fn scalar(&self, key: &str) -> Option<&str> {
        self.front_matter.iter().find_map(|(k, v)| match v {
            FrontMatterValue::Scalar(s) if k == key => Some(s.as_str()),
            _ => None,
        })
    }

    /// Renders only the delimited front matter block.
    pub fn render_front_matter(&self) -> String {
        let mut out = String::from("---\n");
        for (key, value) in &self.front_matter {
            match value {
                FrontMatterValue::Scalar(s) => {
                    out.push_str(&format!("{key}: {s}\n"));
                }
                FrontMatterValue::List(items) => {
                    out.push_str(&format!("{key}:\n"));
                    for item in items {
                        out.push_str(&format!("  - {item}\n"));
                    }
                }
                FrontMatterValue::Map(pairs) => {
                    out.push_str(&format!("{key}:\n"));
                    for (k, v) in pairs {
                        out.push_str(&format!("  {k}: {v}\n"));
                    }
                }
            }
        }
        out.push_str("---\n");
        out
    }
}

impl fmt::Display for MarkdownDocument {
    /// Renders the full document: front matter, a blank line, then the body.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}\n{}", self.render_front_matter(), self.body)
    }
}

/// A document paired with the filename it will be written under.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchEntry {
    pub record_id: u64,
    pub filename: String,
    pub document: MarkdownDocument,
}

/// Ordered set of documents produced by one export request.
///
/// Filenames are unique within a batch; `push` disambiguates collisions by
/// appending the record id.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExportBatch {
    entries: Vec<BatchEntry>,
}

impl ExportBatch {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a document, renaming it to `{stem}-{record_id}.md` if the filename is taken.
    pub fn push(&mut self, record_id: u64, filename: String, document: MarkdownDocument) {
        let filename = if self.contains(&filename) {
            let stem = filename.strip_suffix(".md").unwrap_or(&filename);
            let mut candidate = format!("{stem}-{record_id}.md");
            let mut n = 2;
            while self.contains(&candidate) {
                candidate = format!("{stem}-{record_id}-{n}.md");
                n += 1;
            }
            candidate
        } else {
            filename
        };

        self.entries.push(BatchEntry {
            record_id,
            filename,
            document,
        });
    }

    fn contains(&self, filename: &str) -> bool {
        self.entries.iter().any(|e| e.filename == filename)
    }

    pub fn entries(&self) -> &[BatchEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Outcome of packaging a batch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExportResult {
    /// Exactly one document was written; this is its path.
    Single(PathBuf),
    /// Several documents were bundled; this is the archive path.
    Archive(PathBuf),
    /// Nothing was produced.
    Empty,
}

impl ExportResult {
    /// Returns the produced path, if any.
    pub fn path(&self) -> Option<&Path> {
        match self {
            ExportResult::Single(p) | ExportResult::Archive(p) => Some(p),
            ExportResult::Empty => None,
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, ExportResult::Empty)
    }
}
