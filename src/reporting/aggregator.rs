use std::collections::BTreeMap;

use crate::core::types::{Bucket, Outcome, UrlRecord};
use crate::reporting::report::{Report, ReportEntry};

/// Folds `(UrlRecord, Outcome)` pairs into the fixed bucket taxonomy.
///
/// The fold is order-independent: entries are sorted by normalized URL
/// when the report is built, so completion order never leaks into output.
/// Callers must not record the same normalized URL twice.
#[derive(Debug, Default)]
pub struct Aggregator {
    buckets: BTreeMap<Bucket, Vec<ReportEntry>>,
}

impl Aggregator {
    pub fn record(&mut self, record: UrlRecord, outcome: Outcome) {
        let bucket = outcome.bucket(record.url());
        self.buckets
            .entry(bucket)
            .or_default()
            .push(ReportEntry { record, outcome });
    }

    pub fn len(&self) -> usize {
        self.buckets.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Freeze the fold into a report. A non-empty `unresolved` list marks
    /// the report as partial.
    pub fn into_report(self, mut unresolved: Vec<UrlRecord>) -> Report {
        let mut buckets = self.buckets;
        for bucket in Bucket::ALL {
            buckets
                .entry(bucket)
                .or_default()
                .sort_by(|a, b| a.record.cmp(&b.record));
        }
        unresolved.sort();

        Report::new(buckets, unresolved)
    }
}
