//! Handler for the `convert` command.

use anyhow::{Context, Result};
use std::io::{Read, Write};

use crate::cli::ConvertArgs;
use crate::export::HtmlToMarkdownConverter;

pub fn handle_convert(args: &ConvertArgs) -> Result<()> {
    let stdout = std::io::stdout();
    let mut out = stdout.lock();

    match &args.file {
        Some(path) => {
            let file = std::fs::File::open(path)
                .with_context(|| format!("failed to open {}", path.display()))?;
            convert_stream(file, &mut out)
        }
        None => convert_stream(std::io::stdin().lock(), &mut out),
    }
}

/// Reads HTML from `input` and writes the converted Markdown to `output`.
pub fn convert_stream<R: Read, W: Write>(mut input: R, output: &mut W) -> Result<()> {
    let mut html = String::new();
    input
        .read_to_string(&mut html)
        .context("failed to read HTML input")?;

    let markdown = HtmlToMarkdownConverter::new().convert(&html);
    output
        .write_all(markdown.as_bytes())
        .context("failed to write Markdown output")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn converts_stream_to_markdown() {
        let mut out = Vec::new();
        convert_stream("<h1>Hi</h1><ul><li>one</li></ul>".as_bytes(), &mut out).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "# Hi\n\n- one\n");
    }

    #[test]
    fn rejects_non_utf8_input() {
        let mut out = Vec::new();
        let err = convert_stream(&[0xff, 0xfe][..], &mut out).unwrap_err();
        assert!(err.to_string().contains("failed to read HTML input"));
    }
}
