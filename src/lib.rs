// Core modules
pub mod config;
pub mod core;
pub mod discovery;
pub mod reporting;
pub mod ui;
pub mod validation;

// Re-export main types for convenience
pub use config::{CliConfig, Config};
pub use core::{Bucket, DocLinksError, ExemptReason, Outcome, Result, UrlRecord};
pub use discovery::Corpus;
pub use reporting::{Report, render_summary};
pub use validation::{Classifier, FixedDelayLimiter, HttpProber, LinkChecker, RunContext};
