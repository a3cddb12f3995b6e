//! Front matter rendering for exported records.
//!
//! The block is a restricted, hand-built YAML subset: `key: value` scalars,
//! `key:` followed by `  - item` lists, and one level of nested
//! `  key: value` pairs. Values are escaped but never quoted, so a value
//! containing `: ` or starting with a YAML indicator may not survive a strict
//! YAML parser unchanged.

use crate::domain::{ContentRecord, DATE_FORMAT, FrontMatterValue};
use thiserror::Error;

/// Escapes a scalar for embedding in the front matter block.
///
/// Replacements happen in this order: `\` → `\\`, `"` → `\"`, newline → `\n`,
/// carriage return → `\r`, tab → `\t`. The backslash goes first so escape
/// sequences inserted later are not escaped twice.
///
/// # Examples
///
/// ```
/// use mdexport::infra::escape_yaml;
///
/// assert_eq!(escape_yaml("a\\b"), "a\\\\b");
/// assert_eq!(escape_yaml("say \"hi\"\n"), "say \\\"hi\\\"\\n");
/// ```
pub fn escape_yaml(value: &str) -> String {
    value
        .replace('\\', "\\\\")
        .replace('"', "\\\"")
        .replace('\n', "\\n")
        .replace('\r', "\\r")
        .replace('\t', "\\t")
}

/// Reverses [`escape_yaml`].
///
/// Unknown escape sequences and a trailing lone backslash are kept verbatim.
pub fn unescape_yaml(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    let mut chars = value.chars();

    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('\\') => out.push('\\'),
            Some('"') => out.push('"'),
            Some('n') => out.push('\n'),
            Some('r') => out.push('\r'),
            Some('t') => out.push('\t'),
            Some(other) => {
                out.push('\\');
                out.push(other);
            }
            None => out.push('\\'),
        }
    }

    out
}

/// Builds the ordered front matter entries for a record.
///
/// Order: `title`, `date`, `author`, `post_type`, `status`, optional
/// `post_type_label`, one list per non-empty taxonomy, then `custom_fields`
/// holding the non-hidden fields. The `custom_fields` entry is omitted when
/// every field is hidden.
#[derive(Debug, Clone, Copy, Default)]
pub struct FrontMatterSerializer;

impl FrontMatterSerializer {
    pub fn new() -> Self {
        Self
    }

    /// Returns the escaped entries for `record`.
    pub fn entries(&self, record: &ContentRecord) -> Vec<(String, FrontMatterValue)> {
        let scalar = |key: &str, value: &str| {
            (key.to_string(), FrontMatterValue::Scalar(escape_yaml(value)))
        };

        let mut entries = vec![
            scalar("title", record.title()),
            scalar("date", &record.date().format(DATE_FORMAT).to_string()),
            scalar("author", record.author()),
            scalar("post_type", record.kind()),
            scalar("status", record.status()),
        ];

        if let Some(label) = record.type_label() {
            entries.push(scalar("post_type_label", label));
        }

        for taxonomy in record.taxonomies() {
            if taxonomy.terms.is_empty() {
                continue;
            }
            let terms = taxonomy.terms.iter().map(|t| escape_yaml(t)).collect();
            entries.push((taxonomy.name.clone(), FrontMatterValue::List(terms)));
        }

        let fields: Vec<(String, String)> = record
            .custom_fields()
            .iter()
            .filter(|f| !f.is_hidden())
            .map(|f| (escape_yaml(&f.key), escape_yaml(&f.value)))
            .collect();
        if !fields.is_empty() {
            entries.push(("custom_fields".to_string(), FrontMatterValue::Map(fields)));
        }

        entries
    }

    /// Renders the `---` delimited block for `record`.
    pub fn serialize(&self, record: &ContentRecord) -> String {
        crate::domain::MarkdownDocument::new(self.entries(record), "").render_front_matter()
    }
}

/// Errors when splitting a rendered document.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseError {
    #[error("missing opening frontmatter delimiter '---'")]
    MissingOpeningDelimiter,

    #[error("missing closing frontmatter delimiter '---'")]
    MissingClosingDelimiter,
}

/// Splits rendered Markdown into its front matter block and body.
///
/// The returned front matter excludes both delimiters; the body starts right
/// after the closing delimiter line.
pub fn split(content: &str) -> Result<(&str, &str), ParseError> {
    let after_opening = if content.starts_with("---\r\n") {
        5
    } else if content.starts_with("---\n") {
        4
    } else if content == "---" {
        return Err(ParseError::MissingClosingDelimiter);
    } else {
        return Err(ParseError::MissingOpeningDelimiter);
    };

    let rest = &content[after_opening..];
    let closing = find_closing_delimiter(rest)?;
    let after_closing = &rest[closing..];
    let body_offset = if after_closing.starts_with("---\r\n") {
        5
    } else if after_closing.starts_with("---\n") {
        4
    } else {
        3
    };

    Ok((&rest[..closing], &rest[closing + body_offset..]))
}

/// Finds the position of the closing `---` line.
fn find_closing_delimiter(content: &str) -> Result<usize, ParseError> {
    let mut pos = 0;
    let bytes = content.as_bytes();

    while pos < bytes.len() {
        if content[pos..].starts_with("---") {
            let after = pos + 3;
            if after >= bytes.len()
                || bytes[after] == b'\n'
                || (bytes[after] == b'\r' && bytes.get(after + 1) == Some(&b'\n'))
            {
                return Ok(pos);
            }
        }

        match content[pos..].find('\n') {
            Some(offset) => pos += offset + 1,
            None => break,
        }
    }

    Err(ParseError::MissingClosingDelimiter)
}
