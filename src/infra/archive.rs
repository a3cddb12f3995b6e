//! Zip packaging for multi-document exports.

use std::fs::File;
use std::io::{Read, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::NaiveDateTime;
use tempfile::NamedTempFile;
use zip::{CompressionMethod, write::FileOptions};

use super::fs::persist_unique;

/// Prefix shared by every archive the packager produces.
pub const ARCHIVE_PREFIX: &str = "markdown-export-";

/// Archive filename for an export started at `at`.
///
/// Format: `markdown-export-YYYY-MM-DD-HH-MM-SS.zip`.
pub fn archive_name(at: NaiveDateTime) -> String {
    format!("{}{}.zip", ARCHIVE_PREFIX, at.format("%Y-%m-%d-%H-%M-%S"))
}

/// Bundles `files` into a zip archive at `output`, each stored under its base name.
///
/// The archive is assembled in a temp file next to `output` and only renamed
/// into place once complete. If `output` already exists, a numbered sibling
/// is used instead, so concurrent exports never overwrite each other.
/// Missing input files are skipped. Returns the path written.
pub fn write_archive(output: &Path, files: &[PathBuf]) -> Result<PathBuf> {
    let parent = output
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));

    let temp = NamedTempFile::new_in(parent)
        .with_context(|| format!("Failed to create archive file in {:?}", parent))?;
    let mut zip = zip::ZipWriter::new(temp);
    let options: FileOptions<'_, ()> =
        FileOptions::default().compression_method(CompressionMethod::Deflated);

    let mut buffer = [0u8; 8192];
    for path in files {
        let Some(name) = path.file_name().map(|n| n.to_string_lossy().into_owned()) else {
            continue;
        };
        let mut reader = match File::open(path) {
            Ok(f) => f,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::warn!(path = %path.display(), "file vanished before archiving");
                continue;
            }
            Err(e) => {
                return Err(e).with_context(|| format!("Failed to read {:?}", path));
            }
        };

        zip.start_file(name.as_str(), options)
            .with_context(|| format!("Failed to add file {} to archive", name))?;
        loop {
            let read = reader
                .read(&mut buffer)
                .with_context(|| format!("Failed to read from {:?}", path))?;
            if read == 0 {
                break;
            }
            zip.write_all(&buffer[..read])
                .with_context(|| format!("Failed to write {} into archive", name))?;
        }
    }

    let temp = zip.finish().context("Failed to finalize archive")?;
    let written = persist_unique(temp, output)
        .with_context(|| format!("Failed to move archive into place at {:?}", output))?;
    Ok(written)
}
