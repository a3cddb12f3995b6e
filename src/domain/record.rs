//! Content records supplied by the content store.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Format used for record timestamps in front matter and JSON sources.
pub const DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// A taxonomy attached to a record, with the names of its assigned terms.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Taxonomy {
    pub name: String,
    #[serde(default)]
    pub terms: Vec<String>,
}

impl Taxonomy {
    pub fn new<I, S>(name: impl Into<String>, terms: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            name: name.into(),
            terms: terms.into_iter().map(Into::into).collect(),
        }
    }
}

/// A custom field on a record.
///
/// Keys starting with `_` are hidden fields and are never exported.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomField {
    pub key: String,
    pub value: String,
}

impl CustomField {
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }

    /// Returns true if the field is internal and must not be exported.
    pub fn is_hidden(&self) -> bool {
        self.key.starts_with('_')
    }
}

/// A single piece of content (post, page, or any other typed entry).
///
/// Records are read-only inputs: the content store has already applied its
/// own visibility rules before handing them to the export pipeline. The body
/// is HTML and may be malformed.
///
/// # Examples
///
/// ```
/// use mdexport::domain::ContentRecord;
///
/// let record = ContentRecord::builder(7, "Hello World")
///     .name("hello-world")
///     .body("<p>Hi</p>")
///     .build();
/// assert_eq!(record.title(), "Hello World");
/// assert_eq!(record.kind(), "post");
/// ```
#[derive(Clone, PartialEq, Serialize, Deserialize)]
pub struct ContentRecord {
    id: u64,
    title: String,
    #[serde(default)]
    name: String,
    #[serde(default)]
    body: String,
    #[serde(with = "record_date")]
    date: NaiveDateTime,
    #[serde(default)]
    author: String,
    #[serde(default = "default_kind")]
    kind: String,
    #[serde(default)]
    type_label: Option<String>,
    #[serde(default = "default_status")]
    status: String,
    #[serde(default)]
    taxonomies: Vec<Taxonomy>,
    #[serde(default)]
    custom_fields: Vec<CustomField>,
}

fn default_kind() -> String {
    "post".to_string()
}

fn default_status() -> String {
    "publish".to_string()
}

impl ContentRecord {
    /// Creates a builder for a record with the given id and title.
    pub fn builder(id: u64, title: impl Into<String>) -> ContentRecordBuilder {
        ContentRecordBuilder::new(id, title)
    }

    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    /// Returns the canonical machine-safe name. May be empty for drafts.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the HTML body.
    pub fn body(&self) -> &str {
        &self.body
    }

    pub fn date(&self) -> NaiveDateTime {
        self.date
    }

    /// Returns the author's display name.
    pub fn author(&self) -> &str {
        &self.author
    }

    /// Returns the type tag (`post`, `page`, ...).
    pub fn kind(&self) -> &str {
        &self.kind
    }

    /// Returns the human-readable singular label of the type, if known.
    pub fn type_label(&self) -> Option<&str> {
        self.type_label.as_deref()
    }

    /// Returns the status tag (`publish`, `draft`, ...).
    pub fn status(&self) -> &str {
        &self.status
    }

    pub fn taxonomies(&self) -> &[Taxonomy] {
        &self.taxonomies
    }

    pub fn custom_fields(&self) -> &[CustomField] {
        &self.custom_fields
    }

    /// Returns true if the record has `term` assigned in `taxonomy`.
    pub fn has_term(&self, taxonomy: &str, term: &str) -> bool {
        self.taxonomies
            .iter()
            .filter(|t| t.name == taxonomy)
            .any(|t| t.terms.iter().any(|name| name == term))
    }
}

impl fmt::Display for ContentRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} [{}]", self.title, self.id)
    }
}

impl fmt::Debug for ContentRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ContentRecord")
            .field("id", &self.id)
            .field("title", &self.title)
            .field("name", &self.name)
            .field("kind", &self.kind)
            .field("status", &self.status)
            .field("date", &self.date)
            .field("body_len", &self.body.len())
            .finish()
    }
}

/// Builder for constructing a ContentRecord with optional fields.
pub struct ContentRecordBuilder {
    record: ContentRecord,
}

impl ContentRecordBuilder {
    fn new(id: u64, title: impl Into<String>) -> Self {
        Self {
            record: ContentRecord {
                id,
                title: title.into(),
                name: String::new(),
                body: String::new(),
                date: NaiveDateTime::default(),
                author: String::new(),
                kind: default_kind(),
                type_label: None,
                status: default_status(),
                taxonomies: Vec::new(),
                custom_fields: Vec::new(),
            },
        }
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.record.name = name.into();
        self
    }

    pub fn body(mut self, body: impl Into<String>) -> Self {
        self.record.body = body.into();
        self
    }

    pub fn date(mut self, date: NaiveDateTime) -> Self {
        self.record.date = date;
        self
    }

    pub fn author(mut self, author: impl Into<String>) -> Self {
        self.record.author = author.into();
        self
    }

    pub fn kind(mut self, kind: impl Into<String>) -> Self {
        self.record.kind = kind.into();
        self
    }

    /// Sets the type label. Empty or whitespace-only labels are normalized to None.
    pub fn type_label(mut self, label: Option<impl Into<String>>) -> Self {
        self.record.type_label = label
            .map(Into::into)
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty());
        self
    }

    pub fn status(mut self, status: impl Into<String>) -> Self {
        self.record.status = status.into();
        self
    }

    /// Appends a taxonomy with its term names.
    pub fn taxonomy(mut self, taxonomy: Taxonomy) -> Self {
        self.record.taxonomies.push(taxonomy);
        self
    }

    /// Appends a custom field.
    pub fn custom_field(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.record.custom_fields.push(CustomField::new(key, value));
        self
    }

    pub fn build(self) -> ContentRecord {
        self.record
    }
}

/// Serde adapter accepting both `2024-01-15 10:30:00` and `2024-01-15T10:30:00`.
mod record_date {
    use super::DATE_FORMAT;
    use chrono::NaiveDateTime;
    use serde::{Deserialize, Deserializer, Serializer, de::Error};

    pub fn serialize<S: Serializer>(date: &NaiveDateTime, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&date.format(DATE_FORMAT).to_string())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveDateTime, D::Error> {
        let raw = String::deserialize(deserializer)?;
        NaiveDateTime::parse_from_str(&raw, DATE_FORMAT)
            .or_else(|_| NaiveDateTime::parse_from_str(&raw, "%Y-%m-%dT%H:%M:%S"))
            .map_err(|e| D::Error::custom(format!("invalid record date '{raw}': {e}")))
    }
}
