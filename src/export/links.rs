//! URL sanitization for links embedded in exported Markdown.

use url::{ParseError, Url};

/// Schemes a link may carry. Anything else is dropped.
pub const ALLOWED_SCHEMES: &[&str] = &[
    "http", "https", "ftp", "ftps", "mailto", "news", "irc", "gopher", "nntp", "feed", "telnet",
    "mms", "rtsp", "sms", "svn", "tel", "fax", "xmpp", "webcal", "urn",
];

/// Makes an `href` value safe to embed in Markdown link syntax.
///
/// - Trims surrounding whitespace and encodes inner spaces as `%20`
/// - Removes control characters and anything outside the URL-safe set
///   (this also removes `<`, `>`, `"`, backticks and braces)
/// - Drops absolute URLs whose scheme is not in [`ALLOWED_SCHEMES`]
/// - Keeps relative references (`/path`, `#frag`, `?q=1`, `page.html`)
///
/// Returns an empty string when nothing safe remains. The URL is otherwise
/// returned as written, not normalized.
///
/// # Examples
///
/// ```
/// use mdexport::export::sanitize_url;
///
/// assert_eq!(sanitize_url("https://x.test"), "https://x.test");
/// assert_eq!(sanitize_url(" /a b "), "/a%20b");
/// assert_eq!(sanitize_url("javascript:alert(1)"), "");
/// ```
pub fn sanitize_url(raw: &str) -> String {
    let cleaned: String = raw
        .trim()
        .replace(' ', "%20")
        .chars()
        .filter(|c| is_url_safe(*c))
        .collect();

    if cleaned.is_empty() {
        return cleaned;
    }

    match Url::parse(&cleaned) {
        Ok(url) if ALLOWED_SCHEMES.contains(&url.scheme()) => cleaned,
        Ok(url) => {
            tracing::debug!(scheme = url.scheme(), "dropping link with disallowed scheme");
            String::new()
        }
        Err(ParseError::RelativeUrlWithoutBase) => cleaned,
        Err(e) => {
            tracing::debug!(url = %cleaned, error = %e, "dropping unparseable link");
            String::new()
        }
    }
}

fn is_url_safe(c: char) -> bool {
    if c.is_control() {
        return false;
    }
    c.is_ascii_alphanumeric()
        || matches!(
            c,
            '-' | '~' | '+' | '_' | '.' | '?' | '#' | '=' | '!' | '&' | ';' | ',' | '/' | ':'
                | '%' | '@' | '$' | '|' | '*' | '\'' | '(' | ')' | '[' | ']'
        )
        || !c.is_ascii()
}
