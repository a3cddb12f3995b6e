//! Slug and filename generation for exported documents.

use crate::domain::ContentRecord;

/// Converts a title to a URL-friendly slug.
///
/// - Transliterates to ASCII
/// - Converts to lowercase
/// - Replaces spaces with hyphens
/// - Keeps only alphanumeric characters, hyphens, and underscores
/// - Collapses consecutive hyphens
/// - Trims leading/trailing hyphens
/// - Truncates to 50 characters (at word boundary if possible)
/// - Returns "untitled" for empty results
///
/// # Examples
///
/// ```
/// use mdexport::infra::slugify;
///
/// assert_eq!(slugify("API Design"), "api-design");
/// assert_eq!(slugify("Café Menu!"), "cafe-menu");
/// assert_eq!(slugify(""), "untitled");
/// ```
pub fn slugify(title: &str) -> String {
    const MAX_LENGTH: usize = 50;

    let lower = deunicode::deunicode(title).to_lowercase();

    let mut result = String::new();
    let mut prev_was_hyphen = false;
    for c in lower.chars() {
        let mapped = if c.is_ascii_alphanumeric() || c == '_' {
            Some(c)
        } else if c == ' ' || c == '-' {
            Some('-')
        } else {
            None
        };

        match mapped {
            Some('-') if prev_was_hyphen => {}
            Some(c) => {
                prev_was_hyphen = c == '-';
                result.push(c);
            }
            None => {}
        }
    }

    let trimmed = result.trim_matches('-');
    if trimmed.is_empty() {
        return "untitled".to_string();
    }

    if trimmed.len() <= MAX_LENGTH {
        return trimmed.to_string();
    }

    let truncated = &trimmed[..MAX_LENGTH];
    if let Some(last_hyphen) = truncated.rfind('-')
        && last_hyphen > MAX_LENGTH / 2
    {
        return truncated[..last_hyphen].to_string();
    }

    truncated.trim_end_matches('-').to_string()
}

/// Makes a string safe to use as (part of) a filename.
///
/// Case is preserved. Path separators, shell and URL metacharacters, and
/// control characters are removed; whitespace runs become a single `-`;
/// leading and trailing `.`, `-` and `_` are trimmed.
///
/// # Examples
///
/// ```
/// use mdexport::infra::sanitize_file_name;
///
/// assert_eq!(sanitize_file_name("Blog Post"), "Blog-Post");
/// assert_eq!(sanitize_file_name("../etc/passwd"), "etcpasswd");
/// ```
pub fn sanitize_file_name(value: &str) -> String {
    const SPECIAL: &[char] = &[
        '?', '[', ']', '/', '\\', '=', '<', '>', ':', ';', ',', '\'', '"', '&', '$', '#', '*',
        '(', ')', '|', '~', '`', '!', '{', '}', '%', '+', '’', '«', '»', '”', '“',
    ];

    let transliterated = deunicode::deunicode(value);
    let mut out = String::with_capacity(transliterated.len());
    let mut pending_space = false;

    for c in transliterated.chars() {
        if c.is_whitespace() {
            pending_space = true;
            continue;
        }
        if c.is_control() || SPECIAL.contains(&c) {
            continue;
        }
        if pending_space && !out.is_empty() && !out.ends_with('-') && c != '-' {
            out.push('-');
        }
        pending_space = false;
        if c == '-' && out.ends_with('-') {
            continue;
        }
        out.push(c);
    }

    out.trim_matches(|c| c == '.' || c == '-' || c == '_').to_string()
}

/// Generates the export filename for a record.
///
/// Format: `{type-label}-{slug}.md`, or `{slug}.md` when the record has no
/// type label. The slug comes from the record's canonical name, falling back
/// to its title.
///
/// # Examples
///
/// ```
/// use mdexport::domain::ContentRecord;
/// use mdexport::infra::document_filename;
///
/// let record = ContentRecord::builder(1, "Hello")
///     .name("hello-world")
///     .type_label(Some("Post"))
///     .build();
/// assert_eq!(document_filename(&record), "Post-hello-world.md");
/// ```
pub fn document_filename(record: &ContentRecord) -> String {
    let slug = match sanitize_file_name(record.name()) {
        s if s.is_empty() => slugify(record.title()),
        s => s,
    };

    match record.type_label().map(sanitize_file_name) {
        Some(prefix) if !prefix.is_empty() => format!("{prefix}-{slug}.md"),
        _ => format!("{slug}.md"),
    }
}
