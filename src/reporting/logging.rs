use crate::config::Config;
use crate::core::types::Outcome;
use crate::reporting::report::Report;
use log::{debug, error, info, warn};
use std::path::Path;

/// Initialize the logger with appropriate level based on verbosity
pub fn init_logger(verbose: bool, quiet: bool) {
    let level = if quiet {
        log::LevelFilter::Off
    } else if verbose {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Warn
    };

    env_logger::Builder::from_default_env()
        .filter_level(level)
        .format_timestamp(None)
        .format_module_path(false)
        .format_target(false)
        .init();

    debug!("Logger initialized with level: {level:?}");
}

/// Log configuration information
pub fn log_config_info(config: &Config, workers: usize) {
    info!(
        "Configuration: workers={workers}, timeout={}s, delay={}ms",
        config.timeout_duration().as_secs(),
        config.rate_limit_delay_duration().as_millis()
    );
    info!(
        "HTTP: head_requests={}, user_agent={}",
        config.use_head_requests.unwrap_or(false),
        config.effective_user_agent()
    );
    if let Some(deadline) = config.run_deadline {
        info!("Run deadline: {deadline}s");
    }
}

/// Log corpus file list
pub fn log_file_info<P: AsRef<Path>>(files: &[P]) {
    info!("Processing {} file(s)", files.len());
    for (i, file) in files.iter().enumerate() {
        debug!("  {}. {}", i + 1, file.as_ref().display());
    }
}

pub fn log_file_scanned(path: &str, url_count: usize) {
    debug!("Extracted {url_count} URL(s) from {path}");
}

/// A corpus file that could not be read is skipped, not fatal
pub fn log_file_failure(path: &str, err: &std::io::Error) {
    warn!("Skipping unreadable file '{path}': {err}");
}

/// Log URL discovery information
pub fn log_url_discovery(unique_urls: usize, files_read: usize) {
    info!("Found {unique_urls} unique URLs in {files_read} file(s)");
}

pub fn log_probe_start(probeable: usize, exempt: usize) {
    info!("Probing {probeable} URL(s), {exempt} exempt");
}

/// Log individual URL outcomes for debugging
pub fn log_url_outcome(url: &str, outcome: &Outcome) {
    match outcome {
        Outcome::Exempt { reason } => debug!("- {url} -> exempt ({reason:?})"),
        Outcome::Live { status_code, .. } => {
            debug!("✓ {url} -> {status_code} ({})", outcome.detail(url))
        }
        Outcome::ClientError {
            status_code,
            reason_phrase,
        }
        | Outcome::ServerError {
            status_code,
            reason_phrase,
        } => debug!("✗ {url} -> {status_code} ({reason_phrase})"),
        Outcome::TransportError { message } => debug!("✗ {url} -> {message}"),
    }
}

/// Log run completion
pub fn log_run_complete(report: &Report, duration_ms: u128) {
    let failures = report.failure_count();
    if report.is_partial() {
        warn!(
            "Run stopped early: {} of {} URLs unresolved ({duration_ms}ms)",
            report.unresolved().len(),
            report.total()
        );
    } else if failures == 0 {
        info!(
            "Verification complete: {} URLs, no failures ({duration_ms}ms)",
            report.total()
        );
    } else {
        info!(
            "Verification complete: {} URLs, {failures} broken or unreachable ({duration_ms}ms)",
            report.total()
        );
    }
}

/// Log error information
pub fn log_error(message: &str, source: Option<&dyn std::error::Error>) {
    match source {
        Some(err) => error!("{message}: {err}"),
        None => error!("{message}"),
    }
}

/// Log warning information
pub fn log_warning(message: &str) {
    warn!("{message}");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::{ExemptReason, UrlRecord};
    use crate::reporting::aggregator::Aggregator;
    use std::io;

    #[test]
    fn test_logger_initialization_verbose() {
        // Logger can only be initialized once per process
        std::panic::catch_unwind(|| init_logger(true, false)).ok();
    }

    #[test]
    fn test_logger_initialization_quiet() {
        std::panic::catch_unwind(|| init_logger(false, true)).ok();
    }

    #[test]
    fn test_log_config_info() {
        log_config_info(&Config::default(), 1);
        log_config_info(
            &Config {
                run_deadline: Some(60),
                use_head_requests: Some(true),
                ..Default::default()
            },
            8,
        );
    }

    #[test]
    fn test_log_file_helpers() {
        log_file_info(&["a.md", "b.md"]);
        log_file_info::<&str>(&[]);
        log_file_scanned("a.md", 3);
        log_file_failure("missing.md", &io::Error::new(io::ErrorKind::NotFound, "gone"));
        log_url_discovery(3, 1);
        log_probe_start(2, 1);
    }

    #[test]
    fn test_log_url_outcome_all_variants() {
        let outcomes = vec![
            Outcome::Exempt {
                reason: ExemptReason::Template,
            },
            Outcome::Live {
                status_code: 200,
                final_url: "https://a.io".to_string(),
            },
            Outcome::ClientError {
                status_code: 404,
                reason_phrase: "Not Found".to_string(),
            },
            Outcome::ServerError {
                status_code: 500,
                reason_phrase: "Internal Server Error".to_string(),
            },
            Outcome::TransportError {
                message: "dns error".to_string(),
            },
        ];

        for outcome in &outcomes {
            log_url_outcome("https://a.io", outcome);
        }
    }

    #[test]
    fn test_log_run_complete() {
        let complete = Aggregator::default().into_report(Vec::new());
        log_run_complete(&complete, 12);

        let partial =
            Aggregator::default().into_report(vec![UrlRecord::new("https://a.io", "a.md")]);
        log_run_complete(&partial, 12);
    }

    #[test]
    fn test_log_error_and_warning() {
        let err = io::Error::other("boom");
        log_error("failed", Some(&err));
        log_error("failed", None);
        log_warning("careful");
    }
}
