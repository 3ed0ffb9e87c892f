use clap::Parser;
use doclinks::config::{CliConfig, Config};
use doclinks::core::DocLinksError;
use doclinks::discovery::{Corpus, FileScan};
use doclinks::reporting::{Report, logging, render_summary};
use doclinks::ui::{Cli, ProgressReporter, cli_to_config};
use doclinks::validation::{
    CancelHandle, Classifier, FixedDelayLimiter, HttpProber, LinkChecker, RunContext,
};

use std::path::Path;
use std::time::Instant;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    match run_doclinks_logic(&cli).await {
        Ok(exit_code) => std::process::exit(exit_code),
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    }
}

/// Main verification logic extracted from main() for testing
pub async fn run_doclinks_logic(cli: &Cli) -> Result<i32, Box<dyn std::error::Error>> {
    let cli_config = cli_to_config(cli);

    let config = load_and_merge_config(&cli_config)?;

    let output_settings = setup_output_settings(&cli_config, &config);
    logging::init_logger(output_settings.verbose, output_settings.quiet);

    let workers = config.effective_concurrency();
    logging::log_config_info(&config, workers);

    // Read the corpus
    let corpus = load_corpus(&cli.files, &output_settings)?;

    // Build the run
    let checker = LinkChecker::new(
        Classifier::from_config(&config),
        HttpProber::from_config(&config)?,
        FixedDelayLimiter::new(config.rate_limit_delay_duration()),
        workers,
    );
    let (ctx, cancel_handle) = RunContext::new(config.run_deadline_duration());
    spawn_interrupt_listener(cancel_handle);

    let mut progress = create_progress_reporter(&output_settings);

    let start_time = Instant::now();
    let report = checker
        .run(corpus.into_records(), &ctx, progress.as_mut())
        .await;
    logging::log_run_complete(&report, start_time.elapsed().as_millis());

    finalize_progress_reporter(progress);

    if !output_settings.quiet {
        println!();
        print!(
            "{}",
            render_summary(&report, config.effective_preview_limit())
        );
    }

    let output_path = config.effective_output_path();
    report.write_json(&output_path).inspect_err(|e| {
        logging::log_error("Could not write the JSON report", Some(e));
    })?;

    if !output_settings.quiet {
        println!("\nDetailed results saved to: {}", output_path.display());
    }

    Ok(determine_exit_code(&report, cli_config.fail_on_broken))
}

/// Load configuration from file or standard locations and merge with CLI config
pub fn load_and_merge_config(
    cli_config: &CliConfig,
) -> Result<Config, Box<dyn std::error::Error>> {
    let mut config = if cli_config.no_config {
        Config::default()
    } else if let Some(ref config_file) = cli_config.config_file {
        Config::load_from_file(config_file).inspect_err(|e| {
            logging::log_error(
                &format!("Could not load config file '{config_file}'"),
                Some(e),
            );
        })?
    } else {
        Config::load_from_standard_locations()
    };

    // Merge CLI arguments with configuration (CLI takes precedence)
    config.merge_with_cli(cli_config);
    config.validate()?;
    Ok(config)
}

/// Settings for output formatting and display
pub struct OutputSettings {
    pub quiet: bool,
    pub verbose: bool,
    pub show_progress: bool,
}

/// Setup output settings based on CLI and config
pub fn setup_output_settings(cli_config: &CliConfig, config: &Config) -> OutputSettings {
    let quiet = cli_config.quiet;
    let verbose = config.verbose.unwrap_or(false);
    let show_progress = !quiet && !cli_config.no_progress;

    OutputSettings {
        quiet,
        verbose,
        show_progress,
    }
}

/// Read every corpus file, reporting per-file results. Fails only when no
/// file could be read at all.
pub fn load_corpus<P: AsRef<Path>>(
    files: &[P],
    output_settings: &OutputSettings,
) -> Result<Corpus, DocLinksError> {
    logging::log_file_info(files);

    let corpus = Corpus::load(files);

    if !output_settings.quiet {
        for scan in corpus.scans() {
            match scan {
                FileScan::Scanned { path, url_count } => {
                    println!("Extracted {url_count} URLs from {path}");
                }
                FileScan::Failed { path, message } => {
                    eprintln!("Error reading {path}: {message}");
                }
            }
        }
    }

    if corpus.files_read() == 0 {
        return Err(DocLinksError::NoReadableInput(corpus.files_failed()));
    }

    if !output_settings.quiet {
        println!("\nFound {} unique URLs to verify\n", corpus.len());
    }

    Ok(corpus)
}

/// Cancel the run on Ctrl-C. In-flight probes are allowed to finish.
pub fn spawn_interrupt_listener(handle: CancelHandle) {
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            logging::log_warning("Interrupted, finishing in-flight probes");
            handle.cancel();
        }
    });
}

/// Create progress reporter if needed
pub fn create_progress_reporter(output_settings: &OutputSettings) -> Option<ProgressReporter> {
    if output_settings.show_progress {
        Some(ProgressReporter::new(true))
    } else {
        None
    }
}

/// Finalize progress reporting
pub fn finalize_progress_reporter(progress: Option<ProgressReporter>) {
    if let Some(ref progress) = progress {
        progress.finish_and_clear();
    }
}

/// A completed run exits 0 regardless of findings unless the caller opted in
/// to failing on broken or unreachable URLs.
pub fn determine_exit_code(report: &Report, fail_on_broken: bool) -> i32 {
    if fail_on_broken && report.failure_count() > 0 {
        1
    } else {
        0
    }
}
