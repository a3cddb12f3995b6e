//! Builder for test records with sensible defaults.

use chrono::NaiveDateTime;
use mdexport::domain::{ContentRecord, DATE_FORMAT, Taxonomy};

/// Builder for content records used by integration tests.
#[derive(Debug, Clone)]
pub struct TestRecord {
    id: u64,
    title: String,
    name: String,
    body: String,
    status: String,
    type_label: Option<String>,
    taxonomies: Vec<Taxonomy>,
    fields: Vec<(String, String)>,
}

impl TestRecord {
    /// Creates a published record whose name is derived from the title.
    pub fn new(id: u64, title: impl Into<String>) -> Self {
        let title = title.into();
        Self {
            id,
            name: title.to_lowercase().replace(' ', "-"),
            title,
            body: String::new(),
            status: "publish".to_string(),
            type_label: None,
            taxonomies: Vec::new(),
            fields: Vec::new(),
        }
    }

    pub fn body(mut self, body: impl Into<String>) -> Self {
        self.body = body.into();
        self
    }

    pub fn status(mut self, status: impl Into<String>) -> Self {
        self.status = status.into();
        self
    }

    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.type_label = Some(label.into());
        self
    }

    /// Assigns `term` in `taxonomy`.
    pub fn term(mut self, taxonomy: &str, term: &str) -> Self {
        match self.taxonomies.iter_mut().find(|t| t.name == taxonomy) {
            Some(existing) => existing.terms.push(term.to_string()),
            None => self.taxonomies.push(Taxonomy::new(taxonomy, [term])),
        }
        self
    }

    pub fn field(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.fields.push((key.into(), value.into()));
        self
    }

    pub fn to_record(&self) -> ContentRecord {
        let date = NaiveDateTime::parse_from_str("2024-01-15 10:30:00", DATE_FORMAT)
            .expect("valid fixture date");
        let mut builder = ContentRecord::builder(self.id, &self.title)
            .name(&self.name)
            .body(&self.body)
            .date(date)
            .author("Test Author")
            .status(&self.status)
            .type_label(self.type_label.as_deref());
        for taxonomy in &self.taxonomies {
            builder = builder.taxonomy(taxonomy.clone());
        }
        for (key, value) in &self.fields {
            builder = builder.custom_field(key, value);
        }
        builder.build()
    }
}
