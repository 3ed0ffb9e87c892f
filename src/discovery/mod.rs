//! URL discovery
//!
//! This module reads the corpus files and builds the deduplicated set of
//! URL records the rest of the run works on.

pub mod extractor;

// Re-export commonly used items
pub use extractor::{Corpus, FileScan, extract_urls};
