//! File I/O for exported documents: atomic writes and retention sweeps.

use std::collections::HashSet;
use std::io::{self, Write as IoWrite};
use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime};
use tempfile::NamedTempFile;
use thiserror::Error;
use walkdir::WalkDir;

/// Errors during file system operations on exported files.
#[derive(Debug, Error)]
pub enum FsError {
    #[error("permission denied: {path}")]
    PermissionDenied { path: PathBuf },

    #[error("I/O error for {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("atomic write failed for {path}: {source}")]
    AtomicWrite {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("path is not a directory: {path}")]
    NotADirectory { path: PathBuf },
}

impl FsError {
    /// Creates an appropriate FsError from an io::Error.
    pub(crate) fn from_io(path: &Path, error: io::Error) -> Self {
        match error.kind() {
            io::ErrorKind::PermissionDenied => FsError::PermissionDenied { path: path.into() },
            _ => FsError::Io {
                path: path.into(),
                source: error,
            },
        }
    }
}

/// Creates `dir` and its parents if missing.
///
/// Succeeds if the directory already exists, including when another process
/// created it concurrently.
///
/// # Errors
///
/// Returns `FsError::NotADirectory` if `dir` exists but is a file.
/// Returns `FsError::PermissionDenied` or `FsError::Io` if creation fails.
pub fn ensure_dir(dir: &Path) -> Result<(), FsError> {
    match std::fs::create_dir_all(dir) {
        Ok(()) => Ok(()),
        Err(_) if dir.is_dir() => Ok(()),
        Err(e) if dir.exists() => {
            tracing::debug!(path = %dir.display(), error = %e, "export path exists but is not a directory");
            Err(FsError::NotADirectory { path: dir.into() })
        }
        Err(e) => Err(FsError::from_io(dir, e)),
    }
}

/// Writes `contents` to `path` atomically.
///
/// Uses a temporary file in the same directory and an atomic rename, so
/// readers never observe a partially written file. The parent directory must
/// exist. An existing file at `path` is replaced.
///
/// # Errors
///
/// Returns `FsError::Io` if the temp file cannot be created or written.
/// Returns `FsError::AtomicWrite` if the rename fails.
pub fn write_atomic(path: &Path, contents: &[u8]) -> Result<(), FsError> {
    let parent = parent_dir(path);
    let mut temp = NamedTempFile::new_in(parent).map_err(|e| FsError::from_io(path, e))?;

    temp.write_all(contents)
        .map_err(|e| FsError::from_io(path, e))?;

    temp.persist(path).map_err(|e| FsError::AtomicWrite {
        path: path.into(),
        source: e.error,
    })?;

    Ok(())
}

/// Persists a finished temp file at `path`, never replacing an existing file.
///
/// If `path` is taken, `{stem}-2.{ext}`, `{stem}-3.{ext}`, ... are tried.
/// Returns the path actually written.
pub fn persist_unique(mut temp: NamedTempFile, path: &Path) -> Result<PathBuf, FsError> {
    const MAX_ATTEMPTS: usize = 100;

    let mut candidate = path.to_path_buf();
    for attempt in 1..=MAX_ATTEMPTS {
        match temp.persist_noclobber(&candidate) {
            Ok(_) => return Ok(candidate),
            Err(e) if e.error.kind() == io::ErrorKind::AlreadyExists => {
                temp = e.file;
                candidate = numbered_path(path, attempt + 1);
            }
            Err(e) => {
                return Err(FsError::AtomicWrite {
                    path: candidate,
                    source: e.error,
                });
            }
        }
    }

    Err(FsError::AtomicWrite {
        path: path.into(),
        source: io::Error::new(io::ErrorKind::AlreadyExists, "no free file name"),
    })
}

fn numbered_path(path: &Path, n: usize) -> PathBuf {
    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    let name = match path.extension() {
        Some(ext) => format!("{stem}-{n}.{}", ext.to_string_lossy()),
        None => format!("{stem}-{n}"),
    };
    path.with_file_name(name)
}

fn parent_dir(path: &Path) -> &Path {
    path.parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."))
}

/// Returns true for files the export pipeline produces: `.md` documents,
/// `.zip` archives, and temp files left behind by interrupted writes.
pub fn is_export_artifact(path: &Path) -> bool {
    let is_temp = path
        .file_name()
        .and_then(|n| n.to_str())
        .is_some_and(|n| n.starts_with(".tmp"));
    let has_export_ext = path
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("md") || e.eq_ignore_ascii_case("zip"));
    is_temp || has_export_ext
}

/// Deletes export artifacts directly inside `dir` last modified more than
/// `max_age` before `now`.
///
/// Subdirectories are not entered. Paths in `keep` are never deleted. Files
/// that disappear or cannot be removed mid-sweep are logged and skipped.
/// Returns the deleted paths.
pub fn purge_stale(
    dir: &Path,
    max_age: Duration,
    now: SystemTime,
    keep: &HashSet<PathBuf>,
) -> Vec<PathBuf> {
    let Some(cutoff) = now.checked_sub(max_age) else {
        return Vec::new();
    };

    let mut purged = Vec::new();
    let entries = WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file());

    for entry in entries {
        let path = entry.path();
        if keep.contains(path) || !is_export_artifact(path) {
            continue;
        }

        let modified = match entry.metadata().ok().and_then(|m| m.modified().ok()) {
            Some(t) => t,
            None => continue,
        };
        if modified >= cutoff {
            continue;
        }

        match std::fs::remove_file(path) {
            Ok(()) => {
                tracing::debug!(path = %path.display(), "purged stale export");
                purged.push(path.to_path_buf());
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => {}
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "failed to purge stale export");
            }
        }
    }

    purged
}
