//! Configuration management
//!
//! This module handles loading and managing configuration from
//! TOML files and CLI arguments.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::core::constants::{defaults, markers, timeouts};
use crate::core::error::{DocLinksError, Result};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Per-request timeout in seconds
    pub timeout: Option<u64>,

    /// Minimum delay between probe dispatches in milliseconds
    pub rate_limit_delay: Option<u64>,

    /// Number of probes in flight (0 = one per CPU core)
    pub concurrency: Option<usize>,

    /// Custom User-Agent header
    pub user_agent: Option<String>,

    /// Use HEAD requests instead of GET
    pub use_head_requests: Option<bool>,

    /// Substrings marking a URL as a template placeholder
    pub template_markers: Option<Vec<String>>,

    /// Substrings marking a URL as an example domain
    pub example_domains: Option<Vec<String>>,

    /// Where the JSON report is written
    pub output_path: Option<String>,

    /// Entries shown per actionable bucket in the console summary
    pub preview_limit: Option<usize>,

    /// Overall run deadline in seconds
    pub run_deadline: Option<u64>,

    /// Enable verbose logging
    pub verbose: Option<bool>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            timeout: Some(timeouts::DEFAULT_TIMEOUT_SECONDS),
            rate_limit_delay: Some(timeouts::DEFAULT_RATE_LIMIT_MS),
            concurrency: Some(defaults::CONCURRENCY),
            user_agent: None,
            use_head_requests: Some(false),
            template_markers: None,
            example_domains: None,
            output_path: None,
            preview_limit: Some(defaults::PREVIEW_LIMIT),
            run_deadline: None,
            verbose: Some(false),
        }
    }
}

impl Config {
    /// Load configuration from file
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| {
            DocLinksError::Config(format!(
                "Could not read config file '{}': {}",
                path.display(),
                e
            ))
        })?;

        let config: Config = toml::from_str(&content).map_err(|e| {
            DocLinksError::Config(format!(
                "Invalid TOML in config file '{}': {}",
                path.display(),
                e
            ))
        })?;

        config.validate()?;
        Ok(config)
    }

    /// Try to find and load a config file in standard locations
    pub fn load_from_standard_locations() -> Self {
        if let Ok(config) = Self::load_from_file(defaults::CONFIG_FILE_NAME) {
            return config;
        }

        // Parent directories, up to 3 levels
        for i in 1..=3 {
            let path = format!("{}{}", "../".repeat(i), defaults::CONFIG_FILE_NAME);
            if let Ok(config) = Self::load_from_file(&path) {
                return config;
            }
        }

        Self::default()
    }

    /// Merge this config with CLI arguments (CLI takes precedence)
    pub fn merge_with_cli(&mut self, cli_config: &CliConfig) {
        // Network
        if let Some(timeout) = cli_config.timeout {
            self.timeout = Some(timeout);
        }
        if let Some(rate_limit_delay) = cli_config.rate_limit_delay {
            self.rate_limit_delay = Some(rate_limit_delay);
        }
        if let Some(concurrency) = cli_config.concurrency {
            self.concurrency = Some(concurrency);
        }
        if let Some(ref user_agent) = cli_config.user_agent {
            self.user_agent = Some(user_agent.clone());
        }
        if cli_config.use_head_requests {
            self.use_head_requests = Some(true);
        }
        if let Some(deadline) = cli_config.run_deadline {
            self.run_deadline = Some(deadline);
        }

        // Classification
        if let Some(ref template_markers) = cli_config.template_markers {
            self.template_markers = Some(template_markers.clone());
        }
        if let Some(ref example_domains) = cli_config.example_domains {
            self.example_domains = Some(example_domains.clone());
        }

        // Output
        if let Some(ref output_path) = cli_config.output_path {
            self.output_path = Some(output_path.clone());
        }
        if let Some(preview_limit) = cli_config.preview_limit {
            self.preview_limit = Some(preview_limit);
        }
        if cli_config.verbose {
            self.verbose = Some(true);
        }
    }

    /// Get timeout as Duration
    pub fn timeout_duration(&self) -> Duration {
        Duration::from_secs(self.timeout.unwrap_or(timeouts::DEFAULT_TIMEOUT_SECONDS))
    }

    /// Get rate limit delay as Duration
    pub fn rate_limit_delay_duration(&self) -> Duration {
        Duration::from_millis(
            self.rate_limit_delay
                .unwrap_or(timeouts::DEFAULT_RATE_LIMIT_MS),
        )
    }

    /// Get the run deadline as Duration, if one is configured
    pub fn run_deadline_duration(&self) -> Option<Duration> {
        self.run_deadline.map(Duration::from_secs)
    }

    /// Number of probe workers, resolving "auto" to the CPU count
    pub fn effective_concurrency(&self) -> usize {
        match self.concurrency.unwrap_or(defaults::CONCURRENCY) {
            defaults::CONCURRENCY_AUTO => num_cpus::get(),
            n => n,
        }
    }

    pub fn effective_user_agent(&self) -> &str {
        self.user_agent.as_deref().unwrap_or(defaults::USER_AGENT)
    }

    pub fn effective_template_markers(&self) -> Vec<String> {
        self.template_markers
            .clone()
            .unwrap_or_else(|| markers::TEMPLATE.iter().map(|m| m.to_string()).collect())
    }

    pub fn effective_example_domains(&self) -> Vec<String> {
        self.example_domains.clone().unwrap_or_else(|| {
            markers::EXAMPLE_DOMAINS
                .iter()
                .map(|m| m.to_string())
                .collect()
        })
    }

    pub fn effective_output_path(&self) -> PathBuf {
        PathBuf::from(
            self.output_path
                .as_deref()
                .unwrap_or(defaults::OUTPUT_PATH),
        )
    }

    pub fn effective_preview_limit(&self) -> usize {
        self.preview_limit.unwrap_or(defaults::PREVIEW_LIMIT)
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        if let Some(timeout) = self.timeout {
            if timeout == 0 {
                return Err(DocLinksError::Config(
                    "Timeout cannot be 0. Expected a positive integer representing seconds."
                        .to_string(),
                ));
            }
            if timeout > timeouts::MAX_TIMEOUT_SECONDS {
                return Err(DocLinksError::Config(format!(
                    "Timeout of {timeout} seconds is extremely large (>24 hours). Consider using a smaller value."
                )));
            }
        }

        if let Some(concurrency) = self.concurrency
            && concurrency > defaults::MAX_CONCURRENCY
        {
            return Err(DocLinksError::Config(format!(
                "Concurrency of {concurrency} is extremely high. Expected at most {}.",
                defaults::MAX_CONCURRENCY
            )));
        }

        if self.run_deadline == Some(0) {
            return Err(DocLinksError::Config(
                "Run deadline cannot be 0. Expected a positive integer representing seconds."
                    .to_string(),
            ));
        }

        for (name, list) in [
            ("template marker", &self.template_markers),
            ("example domain", &self.example_domains),
        ] {
            if let Some(entries) = list
                && entries.iter().any(|e| e.trim().is_empty())
            {
                return Err(DocLinksError::Config(format!(
                    "Empty {name} entry would match every URL."
                )));
            }
        }

        if let Some(ref path) = self.output_path
            && path.trim().is_empty()
        {
            return Err(DocLinksError::Config(
                "Output path cannot be empty.".to_string(),
            ));
        }

        Ok(())
    }
}

/// Configuration options that can come from CLI
#[derive(Debug, Default)]
pub struct CliConfig {
    // Network
    pub timeout: Option<u64>,          // --timeout
    pub rate_limit_delay: Option<u64>, // --rate-limit
    pub concurrency: Option<usize>,    // --concurrency
    pub user_agent: Option<String>,    // --user-agent
    pub use_head_requests: bool,       // --head
    pub run_deadline: Option<u64>,     // --deadline

    // Classification
    pub template_markers: Option<Vec<String>>, // --template-marker
    pub example_domains: Option<Vec<String>>,  // --example-domain

    // Output
    pub output_path: Option<String>,  // --output
    pub preview_limit: Option<usize>, // --preview-limit
    pub quiet: bool,                  // --quiet
    pub verbose: bool,                // --verbose
    pub no_progress: bool,            // --no-progress
    pub fail_on_broken: bool,         // --fail-on-broken

    // Configuration
    pub config_file: Option<String>, // --config
    pub no_config: bool,             // --no-config
}
