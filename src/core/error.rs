use std::fmt;
use std::path::PathBuf;

/// Error types for doclinks operations.
///
/// Only environment-level failures live here. Per-URL failures are data
/// and are carried by [`crate::core::types::Outcome`] instead.
#[derive(Debug)]
pub enum DocLinksError {
    /// Configuration error
    Config(String),

    /// HTTP client construction error
    Http(reqwest::Error),

    /// JSON serialization error
    Serialization(serde_json::Error),

    /// None of the given corpus files could be read
    NoReadableInput(usize),

    /// The report artifact could not be persisted
    ReportWrite {
        path: PathBuf,
        source: std::io::Error,
    },
}

impl fmt::Display for DocLinksError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DocLinksError::Config(msg) => write!(f, "Configuration error: {msg}"),
            DocLinksError::Http(err) => write!(f, "HTTP error: {err}"),
            DocLinksError::Serialization(err) => write!(f, "Serialization error: {err}"),
            DocLinksError::NoReadableInput(count) => {
                write!(f, "No readable input: none of the {count} file(s) could be read")
            }
            DocLinksError::ReportWrite { path, source } => {
                write!(f, "Report write error: '{}': {source}", path.display())
            }
        }
    }
}

impl std::error::Error for DocLinksError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            DocLinksError::Http(err) => Some(err),
            DocLinksError::Serialization(err) => Some(err),
            DocLinksError::ReportWrite { source, .. } => Some(source),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for DocLinksError {
    fn from(err: reqwest::Error) -> Self {
        DocLinksError::Http(err)
    }
}

impl From<serde_json::Error> for DocLinksError {
    fn from(err: serde_json::Error) -> Self {
        DocLinksError::Serialization(err)
    }
}

/// Type alias for Results using DocLinksError
pub type Result<T> = std::result::Result<T, DocLinksError>;
