//! Aggregation and reporting
//!
//! This module folds outcomes into buckets, builds the run report,
//! renders it for the console and persists it as JSON. Structured
//! logging helpers live here too.

pub mod aggregator;
pub mod logging;
pub mod report;
pub mod summary;

// Re-export commonly used items
pub use aggregator::Aggregator;
pub use report::{Report, ReportDocument, ReportEntry, ResultEntry, Summary};
pub use summary::render_summary;
