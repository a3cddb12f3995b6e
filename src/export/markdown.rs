//! HTML to Markdown conversion for record bodies.
//!
//! This is a best-effort, lossy transform over a bounded set of constructs,
//! not an HTML parser. Headers, paragraphs, line breaks, links and list items
//! become Markdown; everything else (tables, images, inline formatting,
//! nested or overlapping structures) is reduced to its text content.
//! Header and paragraph contents are stripped before links are converted,
//! so a link inside a `<p>` or `<hN>` keeps only its text.

use std::borrow::Cow;

use quick_xml::escape::{resolve_html5_entity, unescape_with};
use regex::{Captures, Regex};

use super::links::sanitize_url;

/// Converts HTML bodies to Markdown.
///
/// The passes run in a fixed order because later passes rely on earlier ones
/// having fired:
///
/// 1. `<br>` variants become newlines
/// 2. `<h1>`..`<h6>` become `#` headers followed by a blank line
/// 3. `<p>` becomes its text followed by a blank line
/// 4. `<a href>` becomes `[text](url)`
/// 5. `<li>` becomes a `- ` bullet line
/// 6. remaining tags are stripped and entities decoded
/// 7. runs of 3+ newlines collapse to 2, the result is trimmed and ends
///    with exactly one newline
///
/// Conversion never fails: unbalanced tags fall through to the strip pass.
///
/// # Example
///
/// ```
/// use mdexport::export::HtmlToMarkdownConverter;
///
/// let converter = HtmlToMarkdownConverter::new();
/// let md = converter.convert("<h2>Title</h2><a href=\"https://x.test\">Read more</a>");
/// assert_eq!(md, "## Title\n\n[Read more](https://x.test)\n");
/// ```
#[derive(Debug, Clone)]
pub struct HtmlToMarkdownConverter {
    line_break: Regex,
    header: Regex,
    paragraph: Regex,
    anchor: Regex,
    list_item: Regex,
    stripper: TagStripper,
    entity: Regex,
    blank_lines: Regex,
}

impl Default for HtmlToMarkdownConverter {
    fn default() -> Self {
        Self::new()
    }
}

impl HtmlToMarkdownConverter {
    pub fn new() -> Self {
        Self {
            line_break: compile(r"(?i)<br\s*/?>"),
            header: compile(r"(?is)<h([1-6])(?:\s[^>]*)?>(.*?)</h[1-6]\s*>"),
            paragraph: compile(r"(?is)<p(?:\s[^>]*)?>(.*?)</p\s*>"),
            anchor: compile(
                r#"(?is)<a\s+(?:[^>]*?\s)?href\s*=\s*(?:"([^"]*)"|'([^']*)')[^>]*>(.*?)</a\s*>"#,
            ),
            list_item: compile(r"(?is)<li(?:\s[^>]*)?>(.*?)</li\s*>"),
            stripper: TagStripper::new(),
            entity: compile(r"&(?:#[0-9]{1,7}|#[xX][0-9a-fA-F]{1,6}|[A-Za-z][A-Za-z0-9]{1,31});"),
            blank_lines: compile(r"\n{3,}"),
        }
    }

    /// Converts an HTML fragment to Markdown.
    pub fn convert(&self, html: &str) -> String {
        let text = html.replace("\r\n", "\n");

        let text = self.line_break.replace_all(&text, "\n");

        let text = self.header.replace_all(&text, |caps: &Captures| {
            let level: usize = caps[1].parse().unwrap_or(1);
            format!("{} {}\n\n", "#".repeat(level), self.stripper.strip(&caps[2]))
        });

        let text = self.paragraph.replace_all(&text, |caps: &Captures| {
            format!("{}\n\n", self.stripper.strip(&caps[1]))
        });

        let text = self.anchor.replace_all(&text, |caps: &Captures| {
            let href = caps.get(1).or_else(|| caps.get(2)).map_or("", |m| m.as_str());
            format!(
                "[{}]({})",
                self.stripper.strip(&caps[3]),
                self.link_destination(href)
            )
        });

        let text = self.list_item.replace_all(&text, |caps: &Captures| {
            format!("- {}\n", self.stripper.strip(&caps[1]))
        });

        let text = self.stripper.strip(&text);
        let text = self.decode_entities(&text);

        let mut out = collapse_blank_lines(&self.blank_lines, &text)
            .trim()
            .to_string();
        out.push('\n');
        out
    }

    /// Turns a raw `href` into a Markdown link destination.
    ///
    /// Entities are decoded until nothing changes and the result is
    /// sanitized. The returned URL is a fixed point of entity decoding, so
    /// the final decode pass emits it exactly as sanitized. Parentheses are
    /// percent-encoded so the destination cannot close the link early.
    fn link_destination(&self, href: &str) -> String {
        const MAX_DECODE_PASSES: usize = 8;

        let mut decoded = href.to_string();
        let mut stable = false;
        for _ in 0..MAX_DECODE_PASSES {
            let next = self.decode_entities(&decoded).into_owned();
            if next == decoded {
                stable = true;
                break;
            }
            decoded = next;
        }
        if !stable {
            tracing::debug!(href, "dropping link with nested entity encoding");
            return String::new();
        }

        let url = sanitize_url(&decoded);
        if *self.decode_entities(&url) != *url {
            tracing::debug!(url = %url, "dropping link that would decode differently");
            return String::new();
        }
        url.replace('(', "%28").replace(')', "%29")
    }

    /// Decodes named HTML5 and numeric character references.
    ///
    /// Unknown or invalid references are left as written.
    pub fn decode_entities<'t>(&self, text: &'t str) -> Cow<'t, str> {
        self.entity.replace_all(text, |caps: &Captures| {
            let raw = &caps[0];
            match unescape_with(raw, resolve_html5_entity) {
                Ok(decoded) => decoded.into_owned(),
                Err(_) => raw.to_string(),
            }
        })
    }

    /// Collapses every run of three or more newlines down to two.
    pub fn collapse_newlines<'t>(&self, text: &'t str) -> Cow<'t, str> {
        collapse_blank_lines(&self.blank_lines, text)
    }
}

fn collapse_blank_lines<'t>(re: &Regex, text: &'t str) -> Cow<'t, str> {
    re.replace_all(text, "\n\n")
}

fn compile(pattern: &str) -> Regex {
    Regex::new(pattern).expect("converter pattern is valid")
}

/// Removes markup, leaving text content.
///
/// `<script>` and `<style>` elements are dropped together with their
/// content, comments are removed, and an unterminated tag at the very end of
/// the input is discarded. Entities are left encoded.
#[derive(Debug, Clone)]
struct TagStripper {
    raw_text: Regex,
    comment: Regex,
    tag: Regex,
    dangling: Regex,
}

impl TagStripper {
    fn new() -> Self {
        Self {
            raw_text: compile(r"(?is)<(?:script|style)\b[^>]*>.*?</(?:script|style)\s*>"),
            comment: compile(r"(?s)<!--.*?-->"),
            tag: compile(r"<[A-Za-z/!?][^>]*>"),
            dangling: compile(r"<[A-Za-z/!][^>]*$"),
        }
    }

    /// Strips markup and trims surrounding whitespace.
    fn strip(&self, html: &str) -> String {
        let text = self.raw_text.replace_all(html, "");
        let text = self.comment.replace_all(&text, "");
        let text = self.tag.replace_all(&text, "");
        let text = self.dangling.replace(&text, "");
        text.trim().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn convert(html: &str) -> String {
        HtmlToMarkdownConverter::new().convert(html)
    }

    // ===========================================
    // Line breaks
    // ===========================================

    #[test]
    fn line_breaks_become_newlines() {
        assert_eq!(convert("a<br>b<br/>c<br />d"), "a\nb\nc\nd\n");
    }

    #[test]
    fn uppercase_line_break() {
        assert_eq!(convert("a<BR>b"), "a\nb\n");
    }

    // ===========================================
    // Headers
    // ===========================================

    #[test]
    fn header_levels_map_to_hashes() {
        let converter = HtmlToMarkdownConverter::new();
        assert_eq!(converter.convert("<h1>One</h1>"), "# One\n");
        assert_eq!(converter.convert("<h2>Title</h2>"), "## Title\n");
        assert_eq!(converter.convert("<h6>Six</h6>"), "###### Six\n");
    }

    #[test]
    fn header_is_followed_by_blank_line() {
        assert_eq!(convert("<h2>Title</h2>Body"), "## Title\n\nBody\n");
    }

    #[test]
    fn header_inner_markup_is_stripped() {
        assert_eq!(convert("<h3><em>Big</em> news</h3>"), "### Big news\n");
    }

    #[test]
    fn header_match_is_case_insensitive_and_allows_attributes() {
        assert_eq!(convert("<H2 id=\"x\">Title</H2>"), "## Title\n");
    }

    #[test]
    fn consecutive_headers_are_not_merged() {
        assert_eq!(convert("<h1>A</h1><h2>B</h2>"), "# A\n\n## B\n");
    }

    // ===========================================
    // Paragraphs
    // ===========================================

    #[test]
    fn paragraphs_are_separated_by_blank_lines() {
        assert_eq!(convert("<p>One</p><p>Two</p>"), "One\n\nTwo\n");
    }

    #[test]
    fn paragraph_spanning_lines_is_converted() {
        assert_eq!(convert("<p>One\ntwo</p><p>Three</p>"), "One\ntwo\n\nThree\n");
    }

    #[test]
    fn pre_is_not_mistaken_for_paragraph() {
        assert_eq!(convert("<pre>code</pre>"), "code\n");
    }

    // ===========================================
    // Links
    // ===========================================

    #[test]
    fn link_becomes_markdown_link() {
        assert_eq!(
            convert(r#"<a href="https://x.test">Click</a>"#),
            "[Click](https://x.test)\n"
        );
    }

    #[test]
    fn link_with_single_quotes_and_extra_attributes() {
        assert_eq!(
            convert(r#"<a class="btn" href='/about' target="_blank">About <b>us</b></a>"#),
            "[About us](/about)\n"
        );
    }

    #[test]
    fn link_with_unsafe_scheme_loses_url() {
        assert_eq!(convert(r#"<a href="javascript:alert(1)">x</a>"#), "[x]()\n");
    }

    #[test]
    fn link_url_entities_are_decoded_before_sanitizing() {
        assert_eq!(
            convert(r#"<a href="/s?a=1&amp;b=2">q</a>"#),
            "[q](/s?a=1&b=2)\n"
        );
    }

    #[test]
    fn double_encoded_scheme_is_rejected() {
        assert_eq!(
            convert(r#"<a href="javascript&amp;colon;alert(document.cookie)">x</a>"#),
            "[x]()\n"
        );
        assert_eq!(
            convert(r#"<a href="javascript&amp;amp;colon;alert(1)">x</a>"#),
            "[x]()\n"
        );
    }

    #[test]
    fn encoded_parenthesis_cannot_close_the_link() {
        assert_eq!(
            convert(r#"<a href="https://x.test/a&amp;#41;[b](evil)">x</a>"#),
            "[x](https://x.test/a%29[b]%28evil%29)\n"
        );
    }

    #[test]
    fn parentheses_in_urls_are_percent_encoded() {
        assert_eq!(
            convert(r#"<a href="https://x.test/wiki/Rust_(language)">Rust</a>"#),
            "[Rust](https://x.test/wiki/Rust_%28language%29)\n"
        );
    }

    #[test]
    fn href_may_contain_the_other_quote_character() {
        assert_eq!(convert(r#"<a href="/it's">x</a>"#), "[x](/it's)\n");
        assert_eq!(convert(r#"<a href='/say"hi"'>x</a>"#), "[x](/sayhi)\n");
    }

    #[test]
    fn anchor_without_href_is_stripped() {
        assert_eq!(convert(r#"<a name="top">Top</a>"#), "Top\n");
    }

    #[test]
    fn link_inside_paragraph() {
        assert_eq!(
            convert(r#"<p>Go <a href="https://x.test">here</a> now</p>"#),
            "Go here now\n"
        );
    }

    // ===========================================
    // Lists
    // ===========================================

    #[test]
    fn list_items_become_bullets() {
        assert_eq!(convert("<li>Item</li><li>Other</li>"), "- Item\n- Other\n");
    }

    #[test]
    fn list_containers_are_stripped() {
        assert_eq!(
            convert("<ul>\n<li>Item</li>\n<li>Other</li>\n</ul>"),
            "- Item\n\n- Other\n"
        );
    }

    #[test]
    fn ordered_list_items_also_become_bullets() {
        assert_eq!(convert("<ol><li>First</li><li>Second</li></ol>"), "- First\n- Second\n");
    }

    // ===========================================
    // Stripping and entities
    // ===========================================

    #[test]
    fn unsupported_markup_is_reduced_to_text() {
        assert_eq!(
            convert("<table><tr><td><strong>Cell</strong></td></tr></table><img src=\"a.png\">"),
            "Cell\n"
        );
    }

    #[test]
    fn script_and_style_content_is_dropped() {
        assert_eq!(
            convert("<style>p{color:red}</style>Text<script>alert(1)</script>"),
            "Text\n"
        );
    }

    #[test]
    fn comments_are_dropped() {
        assert_eq!(convert("<!-- wp:paragraph -->Hi<!-- /wp:paragraph -->"), "Hi\n");
    }

    #[test]
    fn entities_are_decoded() {
        assert_eq!(convert("AT&amp;T &lt;tag&gt; &copy; &#8212; &#x41;"), "AT&T <tag> © — A\n");
    }

    #[test]
    fn unknown_entities_and_bare_ampersands_survive() {
        assert_eq!(convert("Tom & Jerry &bogus; &"), "Tom & Jerry &bogus; &\n");
    }

    #[test]
    fn decoded_markup_is_not_stripped_again() {
        assert_eq!(convert("<p>&lt;b&gt;literal&lt;/b&gt;</p>"), "<b>literal</b>\n");
    }

    // ===========================================
    // Whitespace normalization
    // ===========================================

    #[test]
    fn three_or_more_newlines_collapse_to_two() {
        assert_eq!(convert("a\n\n\n\nb"), "a\n\nb\n");
    }

    #[test]
    fn collapse_is_idempotent() {
        let converter = HtmlToMarkdownConverter::new();
        for input in ["a\n\n\n\n\nb", "\n\n\nx\n\n\n\ny\n\n", "no breaks", "a\n\nb"] {
            let once = converter.collapse_newlines(input).into_owned();
            let twice = converter.collapse_newlines(&once).into_owned();
            assert_eq!(once, twice);
        }
    }

    #[test]
    fn output_ends_with_exactly_one_newline() {
        assert_eq!(convert("<p>End</p>\n\n\n"), "End\n");
        assert_eq!(convert("   padded   "), "padded\n");
    }

    #[test]
    fn crlf_input_is_normalized() {
        assert_eq!(convert("a\r\n\r\n\r\n\r\nb"), "a\n\nb\n");
    }

    #[test]
    fn empty_input_yields_single_newline() {
        assert_eq!(convert(""), "\n");
    }

    // ===========================================
    // Malformed input
    // ===========================================

    #[test]
    fn unterminated_paragraph_strips_to_text() {
        assert_eq!(convert("<p>text without closing"), "text without closing\n");
    }

    #[test]
    fn unterminated_tag_at_end_is_dropped() {
        assert_eq!(convert("text <a href=\"x"), "text\n");
    }

    #[test]
    fn mismatched_header_tags_still_convert() {
        assert_eq!(convert("<h2>Oops</h3>"), "## Oops\n");
    }

    #[test]
    fn stray_closing_tags_are_stripped() {
        assert_eq!(convert("</p></li>text</a>"), "text\n");
    }

    #[test]
    fn less_than_in_text_is_preserved() {
        assert_eq!(convert("5 < 10 and 7 > 3"), "5 < 10 and 7 > 3\n");
    }

    #[test]
    fn full_document_conversion() {
        let html = "<h1>Guide</h1>\n<p>Intro with <a href=\"https://x.test/a\">a link</a>.</p>\n\
                    <ul>\n<li>One</li>\n<li>Two</li>\n</ul>\n<p>Line<br />break</p>";
        assert_eq!(
            convert(html),
            "# Guide\n\nIntro with a link.\n\n- One\n\n- Two\n\nLine\nbreak\n"
        );
    }
}
