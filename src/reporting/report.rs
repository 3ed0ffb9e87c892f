//! The run report and its persisted JSON form.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use crate::core::error::{DocLinksError, Result};
use crate::core::types::{Bucket, Outcome, UrlRecord};

/// One classified URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportEntry {
    pub record: UrlRecord,
    pub outcome: Outcome,
}

impl ReportEntry {
    pub fn status_code(&self) -> Option<u16> {
        self.outcome.status_code()
    }

    pub fn detail(&self) -> String {
        self.outcome.detail(self.record.url())
    }
}

/// Read-only view over every outcome of a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Report {
    buckets: BTreeMap<Bucket, Vec<ReportEntry>>,
    unresolved: Vec<UrlRecord>,
}

/// Bucket counts as persisted under `summary`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Summary {
    pub total_urls: usize,
    pub valid: usize,
    pub redirected: usize,
    pub broken: usize,
    #[serde(rename = "exempt-template")]
    pub exempt_template: usize,
    #[serde(rename = "exempt-example")]
    pub exempt_example: usize,
    #[serde(rename = "transportError")]
    pub transport_error: usize,
    pub unresolved: usize,
}

/// One persisted result row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResultEntry {
    pub url: String,
    pub status_code: Option<u16>,
    pub detail: String,
    pub sources: Vec<String>,
}

/// Stable-schema JSON artifact written at the end of a run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportDocument {
    pub summary: Summary,
    pub results: BTreeMap<Bucket, Vec<ResultEntry>>,
    pub partial: bool,
    pub unresolved: Vec<String>,
    pub generated_at: String,
}

impl Report {
    pub(crate) fn new(
        buckets: BTreeMap<Bucket, Vec<ReportEntry>>,
        unresolved: Vec<UrlRecord>,
    ) -> Self {
        Self {
            buckets,
            unresolved,
        }
    }

    pub fn entries(&self, bucket: Bucket) -> &[ReportEntry] {
        self.buckets.get(&bucket).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn count(&self, bucket: Bucket) -> usize {
        self.entries(bucket).len()
    }

    /// Buckets that need attention: broken, then redirected, then
    /// connection errors.
    pub fn actionable(&self) -> impl Iterator<Item = (Bucket, &[ReportEntry])> {
        Bucket::ACTIONABLE
            .into_iter()
            .map(|b| (b, self.entries(b)))
    }

    /// URLs the run stopped before resolving.
    pub fn unresolved(&self) -> &[UrlRecord] {
        &self.unresolved
    }

    pub fn is_partial(&self) -> bool {
        !self.unresolved.is_empty()
    }

    /// Every URL of the run, resolved or not.
    pub fn total(&self) -> usize {
        self.buckets.values().map(Vec::len).sum::<usize>() + self.unresolved.len()
    }

    /// Count of broken plus transport-error URLs, for callers that gate on failures.
    pub fn failure_count(&self) -> usize {
        self.count(Bucket::Broken) + self.count(Bucket::TransportError)
    }

    pub fn summary(&self) -> Summary {
        Summary {
            total_urls: self.total(),
            valid: self.count(Bucket::Valid),
            redirected: self.count(Bucket::Redirected),
            broken: self.count(Bucket::Broken),
            exempt_template: self.count(Bucket::ExemptTemplate),
            exempt_example: self.count(Bucket::ExemptExample),
            transport_error: self.count(Bucket::TransportError),
            unresolved: self.unresolved.len(),
        }
    }

    /// Build the persisted document, stamped with `generated_at`.
    pub fn to_document(&self, generated_at: String) -> ReportDocument {
        let results = Bucket::ALL
            .into_iter()
            .map(|bucket| {
                let rows = self
                    .entries(bucket)
                    .iter()
                    .map(|entry| ResultEntry {
                        url: entry.record.url().to_string(),
                        status_code: entry.status_code(),
                        detail: entry.detail(),
                        sources: entry.record.source_files.iter().cloned().collect(),
                    })
                    .collect();
                (bucket, rows)
            })
            .collect();

        ReportDocument {
            summary: self.summary(),
            results,
            partial: self.is_partial(),
            unresolved: self
                .unresolved
                .iter()
                .map(|r| r.url().to_string())
                .collect(),
            generated_at,
        }
    }

    pub fn to_json_pretty(&self, generated_at: String) -> Result<String> {
        Ok(serde_json::to_string_pretty(
            &self.to_document(generated_at),
        )?)
    }

    /// Persist the report as JSON at `path`, creating parent directories.
    ///
    /// Errors are reported as [`DocLinksError::ReportWrite`].
    pub fn write_json(&self, path: &Path) -> Result<()> {
        let generated_at = chrono::Utc::now().to_rfc3339();
        let json = self.to_json_pretty(generated_at)?;

        let write_error = |source| DocLinksError::ReportWrite {
            path: path.to_path_buf(),
            source,
        };
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent).map_err(write_error)?;
        }
        fs::write(path, json + "\n").map_err(write_error)
    }
}
