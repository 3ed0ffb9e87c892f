//! User interface and interaction
//!
//! CLI parsing and progress reporting.

pub mod cli;
pub mod progress;

// Re-export commonly used items
pub use cli::{Cli, cli_to_config};
pub use progress::{ProgressReporter, preview_url};
