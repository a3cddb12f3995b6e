//! Writes export batches to disk and decides between a single file and an archive.

use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime};

use anyhow::Result;
use chrono::{Local, NaiveDateTime};

use crate::domain::{ExportBatch, ExportResult};
use crate::infra::{archive_name, ensure_dir, purge_stale, write_archive, write_atomic};

/// Default age after which produced files are purged.
pub const DEFAULT_RETENTION: Duration = Duration::from_secs(60 * 60);

/// Bundles written documents into a single archive (allows mocking in tests).
pub trait Archiver {
    /// Writes an archive of `files` at (or next to) `output` and returns its path.
    fn archive(&self, output: &Path, files: &[PathBuf]) -> Result<PathBuf>;
}

/// Zip archiver used in production.
#[derive(Debug, Clone, Copy, Default)]
pub struct ZipArchiver;

impl Archiver for ZipArchiver {
    fn archive(&self, output: &Path, files: &[PathBuf]) -> Result<PathBuf> {
        write_archive(output, files)
    }
}

/// A document that could not be written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedDocument {
    pub record_id: u64,
    pub filename: String,
    pub reason: String,
}

/// Everything that happened during one packaging call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageReport {
    pub result: ExportResult,
    /// Number of documents successfully written (and archived, if bundled).
    pub written: usize,
    pub skipped: Vec<SkippedDocument>,
    /// Files removed by the retention sweep.
    pub purged: Vec<PathBuf>,
}

impl PackageReport {
    fn empty() -> Self {
        Self {
            result: ExportResult::Empty,
            written: 0,
            skipped: Vec::new(),
            purged: Vec::new(),
        }
    }
}

/// Writes batches into a working directory.
///
/// - One written document: the result references that file.
/// - Several: they are zipped into `markdown-export-YYYY-MM-DD-HH-MM-SS.zip`
///   and the loose files are removed. If the archive cannot be built the
///   result is `Empty` and the loose files stay where they are.
/// - A document that fails to write is skipped; the rest of the batch goes on.
/// - Before returning, files older than the retention window are purged.
#[derive(Debug, Clone)]
pub struct ExportPackager<A = ZipArchiver> {
    retention: Duration,
    archiver: A,
}

impl Default for ExportPackager {
    fn default() -> Self {
        Self::new(DEFAULT_RETENTION)
    }
}

impl ExportPackager {
    pub fn new(retention: Duration) -> Self {
        Self::with_archiver(retention, ZipArchiver)
    }
}

impl<A: Archiver> ExportPackager<A> {
    pub fn with_archiver(retention: Duration, archiver: A) -> Self {
        Self {
            retention,
            archiver,
        }
    }

    pub fn retention(&self) -> Duration {
        self.retention
    }

    /// Packages `batch` into `working_dir`, naming any archive after the current local time.
    pub fn package(&self, batch: &ExportBatch, working_dir: &Path) -> PackageReport {
        self.package_at(batch, working_dir, Local::now().naive_local())
    }

    /// Packages `batch` into `working_dir`, naming any archive after `started`.
    pub fn package_at(
        &self,
        batch: &ExportBatch,
        working_dir: &Path,
        started: NaiveDateTime,
    ) -> PackageReport {
        if let Err(e) = ensure_dir(working_dir) {
            tracing::error!(dir = %working_dir.display(), error = %e, "failed to create export directory");
            return PackageReport::empty();
        }

        let mut report = PackageReport::empty();
        let mut produced = HashSet::new();

        if batch.is_empty() {
            tracing::debug!("nothing to package");
        } else {
            let written = self.write_documents(batch, working_dir, &mut report);
            produced.extend(written.iter().cloned());
            report.written = written.len();
            report.result = self.finish(&written, working_dir, started, &mut produced);
            if report.result.is_empty() {
                report.written = 0;
            }
        }

        report.purged = purge_stale(working_dir, self.retention, SystemTime::now(), &produced);
        if !report.purged.is_empty() {
            tracing::info!(count = report.purged.len(), "purged stale exports");
        }

        report
    }

    fn write_documents(
        &self,
        batch: &ExportBatch,
        working_dir: &Path,
        report: &mut PackageReport,
    ) -> Vec<PathBuf> {
        let mut written = Vec::with_capacity(batch.len());

        for entry in batch.entries() {
            let path = working_dir.join(&entry.filename);
            let content = entry.document.to_string();

            match write_atomic(&path, content.as_bytes()) {
                Ok(()) => {
                    tracing::debug!(
                        record = entry.record_id,
                        path = %path.display(),
                        bytes = content.len(),
                        "wrote document"
                    );
                    written.push(path);
                }
                Err(e) => {
                    tracing::warn!(
                        record = entry.record_id,
                        path = %path.display(),
                        error = %e,
                        "skipping document"
                    );
                    report.skipped.push(SkippedDocument {
                        record_id: entry.record_id,
                        filename: entry.filename.clone(),
                        reason: e.to_string(),
                    });
                }
            }
        }

        written
    }

    fn finish(
        &self,
        written: &[PathBuf],
        working_dir: &Path,
        started: NaiveDateTime,
        produced: &mut HashSet<PathBuf>,
    ) -> ExportResult {
        match written {
            [] => ExportResult::Empty,
            [single] => ExportResult::Single(single.clone()),
            files => {
                let target = working_dir.join(archive_name(started));
                match self.archiver.archive(&target, files) {
                    Ok(archive) => {
                        tracing::info!(
                            path = %archive.display(),
                            entries = files.len(),
                            "created export archive"
                        );
                        for file in files {
                            if let Err(e) = std::fs::remove_file(file) {
                                tracing::warn!(path = %file.display(), error = %e, "failed to remove archived file");
                            }
                        }
                        produced.insert(archive.clone());
                        ExportResult::Archive(archive)
                    }
                    Err(e) => {
                        tracing::error!(error = %format!("{e:#}"), "failed to create export archive");
                        ExportResult::Empty
                    }
                }
            }
        }
    }
}
