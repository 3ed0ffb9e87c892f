// Command-line interface definitions and parsing for doclinks

use crate::config::CliConfig;
use clap::Parser;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Documentation files to scan (explicit list, directories are not expanded)
    #[arg(required = true)]
    pub files: Vec<String>,

    // Network Options
    /// Per-request timeout in seconds (default: 10)
    #[arg(
        short = 't',
        long,
        value_name = "SECONDS",
        help_heading = "Network Options"
    )]
    pub timeout: Option<u64>,

    /// Minimum delay between probes in ms (default: 100)
    #[arg(long, value_name = "MS", help_heading = "Network Options")]
    pub rate_limit: Option<u64>,

    /// Probes in flight at once, 0 for one per CPU core (default: 1)
    #[arg(long, value_name = "COUNT", help_heading = "Network Options")]
    pub concurrency: Option<usize>,

    /// Custom User-Agent header
    #[arg(long, value_name = "AGENT", help_heading = "Network Options")]
    pub user_agent: Option<String>,

    /// Use HEAD instead of GET requests
    #[arg(long, help_heading = "Network Options")]
    pub head: bool,

    /// Stop the whole run after this many seconds
    #[arg(long, value_name = "SECONDS", help_heading = "Network Options")]
    pub deadline: Option<u64>,

    // Classification
    /// Substring marking a URL as a template placeholder (repeatable, replaces defaults)
    #[arg(long, value_name = "MARKER", help_heading = "Classification")]
    pub template_marker: Vec<String>,

    /// Substring marking a URL as an example domain (repeatable, replaces defaults)
    #[arg(long, value_name = "DOMAIN", help_heading = "Classification")]
    pub example_domain: Vec<String>,

    // Output & Verbosity
    /// Path of the JSON report (default: link_verification_results.json)
    #[arg(short = 'o', long, value_name = "PATH", help_heading = "Output & Verbosity")]
    pub output: Option<String>,

    /// Entries shown per problem category in the summary (default: 10)
    #[arg(long, value_name = "COUNT", help_heading = "Output & Verbosity")]
    pub preview_limit: Option<usize>,

    /// Exit with status 1 when any URL is broken or unreachable
    #[arg(long, help_heading = "Output & Verbosity")]
    pub fail_on_broken: bool,

    /// Suppress progress and summary output
    #[arg(short = 'q', long, help_heading = "Output & Verbosity")]
    pub quiet: bool,

    /// Enable verbose logging
    #[arg(short = 'v', long, help_heading = "Output & Verbosity")]
    pub verbose: bool,

    /// Disable progress bar
    #[arg(long, help_heading = "Output & Verbosity")]
    pub no_progress: bool,

    // Configuration
    /// Use specific config file
    #[arg(long, value_name = "FILE", help_heading = "Configuration")]
    pub config: Option<String>,

    /// Ignore config files
    #[arg(long, help_heading = "Configuration")]
    pub no_config: bool,
}

fn non_empty(values: &[String]) -> Option<Vec<String>> {
    if values.is_empty() {
        None
    } else {
        Some(values.to_vec())
    }
}

/// Convert parsed CLI arguments into the CliConfig merged over file config
pub fn cli_to_config(cli: &Cli) -> CliConfig {
    CliConfig {
        timeout: cli.timeout,
        rate_limit_delay: cli.rate_limit,
        concurrency: cli.concurrency,
        user_agent: cli.user_agent.clone(),
        use_head_requests: cli.head,
        run_deadline: cli.deadline,
        template_markers: non_empty(&cli.template_marker),
        example_domains: non_empty(&cli.example_domain),
        output_path: cli.output.clone(),
        preview_limit: cli.preview_limit,
        quiet: cli.quiet,
        verbose: cli.verbose,
        no_progress: cli.no_progress,
        fail_on_broken: cli.fail_on_broken,
        config_file: cli.config.clone(),
        no_config: cli.no_config,
    }
}
