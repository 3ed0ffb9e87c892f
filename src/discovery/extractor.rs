use once_cell::sync::Lazy;
use regex::Regex;

use crate::core::types::UrlRecord;
use crate::reporting::logging;

use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::path::Path;

/// Absolute HTTP(S) URL, terminated by whitespace, quotes, `)` or a backtick.
const URL_PATTERN: &str = r#"https?://[^\s)"'`]+"#;

static URL_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(URL_PATTERN).expect("Failed to compile URL regex pattern"));

/// Extract every candidate URL in `text`, deduplicated and lexicographically ordered.
pub fn extract_urls(text: &str) -> BTreeSet<String> {
    URL_REGEX
        .find_iter(text)
        .map(|m| m.as_str().to_string())
        .collect()
}

/// Outcome of scanning one corpus file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileScan {
    /// File was read; `url_count` distinct raw URLs were found in it
    Scanned { path: String, url_count: usize },
    /// File could not be read as text and was skipped
    Failed { path: String, message: String },
}

impl FileScan {
    pub fn path(&self) -> &str {
        match self {
            FileScan::Scanned { path, .. } | FileScan::Failed { path, .. } => path,
        }
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, FileScan::Failed { .. })
    }
}

/// The deduplicated URL working set of one run.
#[derive(Debug, Default)]
pub struct Corpus {
    records: BTreeMap<String, UrlRecord>,
    scans: Vec<FileScan>,
}

impl Corpus {
    /// Read every path and merge the URLs found into one record per normalized URL.
    ///
    /// Unreadable files are logged and recorded as [`FileScan::Failed`]; they
    /// never abort the load.
    pub fn load<P: AsRef<Path>>(paths: &[P]) -> Self {
        let mut corpus = Corpus::default();

        for path in paths {
            let path = path.as_ref();
            let name = path.display().to_string();
            match fs::read_to_string(path) {
                Ok(text) => corpus.add_text(&name, &text),
                Err(err) => {
                    logging::log_file_failure(&name, &err);
                    corpus.scans.push(FileScan::Failed {
                        path: name,
                        message: err.to_string(),
                    });
                }
            }
        }

        logging::log_url_discovery(corpus.records.len(), corpus.files_read());
        corpus
    }

    /// Merge the URLs of one already-read text blob identified by `source`.
    pub fn add_text(&mut self, source: &str, text: &str) {
        let urls = extract_urls(text);
        logging::log_file_scanned(source, urls.len());

        for raw in &urls {
            let record = UrlRecord::new(raw.as_str(), source);
            match self.records.get_mut(&record.normalized) {
                Some(existing) => existing.add_source(source),
                None => {
                    self.records.insert(record.normalized.clone(), record);
                }
            }
        }

        self.scans.push(FileScan::Scanned {
            path: source.to_string(),
            url_count: urls.len(),
        });
    }

    /// Unique records ordered by normalized URL.
    pub fn records(&self) -> impl Iterator<Item = &UrlRecord> {
        self.records.values()
    }

    pub fn into_records(self) -> Vec<UrlRecord> {
        self.records.into_values().collect()
    }

    pub fn scans(&self) -> &[FileScan] {
        &self.scans
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn files_read(&self) -> usize {
        self.scans.iter().filter(|s| !s.is_failed()).count()
    }

    pub fn files_failed(&self) -> usize {
        self.scans.iter().filter(|s| s.is_failed()).count()
    }
}
