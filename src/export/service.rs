//! The export pipeline: select records, render them, package the result.

use std::path::{Path, PathBuf};

use url::Url;

use crate::domain::{ContentRecord, ExportBatch, ExportKind, ExportRequest, MarkdownDocument};
use crate::infra::{FrontMatterSerializer, PublicUrls, document_filename};
use crate::store::ContentStore;

use super::error::ExportError;
use super::markdown::HtmlToMarkdownConverter;
use super::packager::{Archiver, ExportPackager, PackageReport, ZipArchiver};

/// Statuses included by `taxonomy` and `all` exports unless configured otherwise.
pub const DEFAULT_STATUSES: &[&str] = &["publish", "draft", "pending", "private", "future"];

/// Statuses never exported, even when selected by id.
pub const EXCLUDED_STATUSES: &[&str] = &["trash", "auto-draft"];

/// Decides which records the caller may export.
pub trait AccessPolicy {
    fn can_export(&self, record: &ContentRecord) -> bool;

    /// Checked before listing by term or exporting everything.
    fn can_export_any(&self) -> bool {
        true
    }
}

/// Policy that permits every record.
#[derive(Debug, Clone, Copy, Default)]
pub struct AllowAll;

impl AccessPolicy for AllowAll {
    fn can_export(&self, _record: &ContentRecord) -> bool {
        true
    }
}

/// A successful export.
#[derive(Debug, Clone)]
pub struct ExportOutcome {
    pub report: PackageReport,
    /// Number of documents actually written.
    pub exported: usize,
    pub message: String,
    pub download_url: Option<Url>,
}

impl ExportOutcome {
    pub fn path(&self) -> Option<&Path> {
        self.report.result.path()
    }
}

/// Runs export requests against a content store.
pub struct ExportService<'a, S, P = AllowAll, A = ZipArchiver> {
    store: &'a S,
    policy: P,
    working_dir: PathBuf,
    statuses: Vec<String>,
    serializer: FrontMatterSerializer,
    converter: HtmlToMarkdownConverter,
    packager: ExportPackager<A>,
    public_urls: Option<PublicUrls>,
}

impl<'a, S: ContentStore> ExportService<'a, S> {
    pub fn new(store: &'a S, working_dir: impl Into<PathBuf>) -> Self {
        Self {
            store,
            policy: AllowAll,
            working_dir: working_dir.into(),
            statuses: DEFAULT_STATUSES.iter().map(|s| s.to_string()).collect(),
            serializer: FrontMatterSerializer::new(),
            converter: HtmlToMarkdownConverter::new(),
            packager: ExportPackager::default(),
            public_urls: None,
        }
    }
}

impl<'a, S: ContentStore, P: AccessPolicy, A: Archiver> ExportService<'a, S, P, A> {
    pub fn with_policy<Q: AccessPolicy>(self, policy: Q) -> ExportService<'a, S, Q, A> {
        ExportService {
            store: self.store,
            policy,
            working_dir: self.working_dir,
            statuses: self.statuses,
            serializer: self.serializer,
            converter: self.converter,
            packager: self.packager,
            public_urls: self.public_urls,
        }
    }

    pub fn with_packager<B: Archiver>(
        self,
        packager: ExportPackager<B>,
    ) -> ExportService<'a, S, P, B> {
        ExportService {
            store: self.store,
            policy: self.policy,
            working_dir: self.working_dir,
            statuses: self.statuses,
            serializer: self.serializer,
            converter: self.converter,
            packager,
            public_urls: self.public_urls,
        }
    }

    pub fn with_statuses(mut self, statuses: Vec<String>) -> Self {
        self.statuses = statuses;
        self
    }

    pub fn with_public_urls(mut self, urls: PublicUrls) -> Self {
        self.public_urls = Some(urls);
        self
    }

    pub fn working_dir(&self) -> &Path {
        &self.working_dir
    }

    /// Renders one record as a Markdown document.
    pub fn render(&self, record: &ContentRecord) -> MarkdownDocument {
        MarkdownDocument::new(
            self.serializer.entries(record),
            self.converter.convert(record.body()),
        )
    }

    /// Renders records into a batch, in order.
    pub fn build_batch(&self, records: &[ContentRecord]) -> ExportBatch {
        let mut batch = ExportBatch::new();
        for record in records {
            batch.push(record.id(), document_filename(record), self.render(record));
        }
        batch
    }

    /// Runs a full export request.
    pub fn export(&self, request: &ExportRequest) -> Result<ExportOutcome, ExportError> {
        tracing::info!(kind = %request.kind, ids = request.ids.len(), "export requested");

        self.authorize(request)?;
        let records = self.select(request)?;
        if records.is_empty() {
            return Err(ExportError::NoRecordsFound);
        }
        tracing::debug!(count = records.len(), "records found");

        let permitted: Vec<ContentRecord> = records
            .into_iter()
            .filter(|record| self.policy.can_export(record))
            .collect();
        if permitted.is_empty() {
            return Err(ExportError::NoPermittedRecords);
        }

        let batch = self.build_batch(&permitted);
        let report = self.packager.package(&batch, &self.working_dir);
        let Some(path) = report.result.path() else {
            return Err(ExportError::ExportFailed);
        };

        let download_url = self.public_urls.as_ref().and_then(|urls| urls.url_for(path));
        let exported = report.written;
        Ok(ExportOutcome {
            message: success_message(exported),
            exported,
            download_url,
            report,
        })
    }

    fn authorize(&self, request: &ExportRequest) -> Result<(), ExportError> {
        if request.ids.is_empty() {
            if self.policy.can_export_any() {
                return Ok(());
            }
            return Err(ExportError::PermissionDenied);
        }

        let any_permitted = self
            .store
            .get_by_ids(&request.ids)?
            .iter()
            .any(|record| self.policy.can_export(record));
        if any_permitted {
            Ok(())
        } else {
            Err(ExportError::PermissionDenied)
        }
    }

    fn select(&self, request: &ExportRequest) -> Result<Vec<ContentRecord>, ExportError> {
        let records = match request.kind {
            ExportKind::Selected => {
                if request.ids.is_empty() {
                    return Err(ExportError::MissingSelection);
                }
                let mut records = self.store.get_by_ids(&request.ids)?;
                records.retain(|record| !EXCLUDED_STATUSES.contains(&record.status()));
                records
            }
            ExportKind::Taxonomy => {
                let (Some(taxonomy), Some(term)) = (
                    non_blank(request.taxonomy.as_deref()),
                    non_blank(request.term.as_deref()),
                ) else {
                    return Err(ExportError::MissingTaxonomySelector);
                };
                if !self.store.taxonomy_exists(taxonomy) {
                    return Err(ExportError::InvalidTaxonomy(taxonomy.to_string()));
                }
                if !self.store.term_exists(taxonomy, term) {
                    return Err(ExportError::InvalidTerm {
                        taxonomy: taxonomy.to_string(),
                        term: term.to_string(),
                    });
                }
                self.store.list_by_term(taxonomy, term, &self.statuses)?
            }
            ExportKind::All => self.store.list_all(&self.statuses)?,
        };
        Ok(records)
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

fn success_message(count: usize) -> String {
    let noun = if count == 1 { "post" } else { "posts" };
    format!("Successfully exported {count} {noun}")
}
