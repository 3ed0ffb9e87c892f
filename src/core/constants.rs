/// Application-wide constants to avoid magic values throughout the codebase.
///
/// Defaults for configuration, placeholder markers, and display limits
/// are centralized here so the core logic never hard-codes them.
/// Timeout and duration constants
pub mod timeouts {
    /// Default per-request timeout in seconds
    pub const DEFAULT_TIMEOUT_SECONDS: u64 = 10;
    /// Maximum reasonable timeout in seconds (24 hours)
    pub const MAX_TIMEOUT_SECONDS: u64 = 86_400;
    /// Default delay between successive probe dispatches in milliseconds
    pub const DEFAULT_RATE_LIMIT_MS: u64 = 100;
}

/// Default configuration values
pub mod defaults {
    /// Sequential probing, one request in flight at a time
    pub const CONCURRENCY: usize = 1;
    /// Concurrency value meaning "one worker per CPU core"
    pub const CONCURRENCY_AUTO: usize = 0;
    /// Upper bound on configured workers
    pub const MAX_CONCURRENCY: usize = 256;
    /// Number of example entries shown per actionable bucket
    pub const PREVIEW_LIMIT: usize = 10;
    /// Where the structured report is written
    pub const OUTPUT_PATH: &str = "link_verification_results.json";
    /// Config file looked up in the working directory and its parents
    pub const CONFIG_FILE_NAME: &str = ".doclinks.toml";
    /// Maximum redirect hops followed by the prober
    pub const MAX_REDIRECTS: usize = 10;
    /// Browser-like identification; many documentation hosts reject bot agents
    pub const USER_AGENT: &str =
        "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36";
}

/// Placeholder markers used by the pre-flight classifier
pub mod markers {
    /// Substrings marking a URL as a parameter template
    pub const TEMPLATE: [&str; 9] = [
        "{",
        "}",
        "${",
        "$LOCATION",
        "LOCATION",
        "PROJECT_ID",
        "TEAM_ID",
        "[",
        "]",
    ];

    /// Substrings marking a URL as a conventional stand-in domain
    pub const EXAMPLE_DOMAINS: [&str; 5] = [
        "example.com",
        "example123",
        "xyzcompany",
        "your-server.com",
        "your-company",
    ];
}

/// Error message constants
pub mod error_messages {
    /// Prefix of the transport error produced when a probe times out
    pub const OPERATION_TIMED_OUT: &str = "operation timed out";
    /// Unknown error fallback
    pub const UNKNOWN_ERROR: &str = "Unknown error";
}

/// Display and formatting constants
pub mod display {
    /// Characters of a URL shown next to the progress counter
    pub const URL_PREVIEW_CHARS: usize = 60;
    /// Width of the rule lines in the console summary
    pub const RULE_WIDTH: usize = 80;
}
