//! Configuration: command-line options and process-wide constants.

use std::time::Duration;

use clap::{Parser, ValueEnum};

/// Per-URL header lookup timeout in seconds.
///
/// Covers the whole redirect chain for one URL; a chain that takes longer is
/// cancelled as a unit and reported as a failed lookup.
pub const HEADER_LOOKUP_TIMEOUT_SECS: u64 = 8;

/// Maximum number of redirect hops followed for a single URL.
/// Prevents infinite redirect loops and excessive request chains.
pub const MAX_REDIRECT_HOPS: usize = 10;

/// Title shown on the report page unless overridden on the command line.
pub const DEFAULT_SITE_TITLE: &str = "HTTP Header Checker";

/// Default User-Agent string for HTTP requests.
///
/// Uses a generic Chrome-like string; some sites serve different redirect
/// chains (or block outright) for obviously non-browser agents. Users can
/// override this via the `--user-agent` flag.
pub const DEFAULT_USER_AGENT: &str =
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

/// Logging level for the application.
///
/// Controls the verbosity of log output, from most restrictive (Error) to
/// most verbose (Trace). Used with the `--log-level` CLI option.
#[derive(Clone, Debug, ValueEnum)]
pub enum LogLevel {
    /// Errors only.
    Error,
    /// Warnings and errors.
    Warn,
    /// Informational messages and above.
    Info,
    /// Debug messages and above.
    Debug,
    /// Everything.
    Trace,
}

impl From<LogLevel> for log::LevelFilter {
    fn from(l: LogLevel) -> Self {
        match l {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

/// Log output format.
///
/// - `Plain`: human-readable format with colors (default)
/// - `Json`: structured JSON format for machine parsing
#[derive(Clone, Debug, ValueEnum)]
pub enum LogFormat {
    /// Human-readable, colored.
    Plain,
    /// One JSON object per line.
    Json,
}

/// Command-line options and configuration.
///
/// Generated by `clap` from the field attributes; every option has a default
/// so `header_status` starts with no arguments.
///
/// # Examples
///
/// ```bash
/// # Basic usage
/// header_status
///
/// # Custom port and title
/// header_status --port 9090 --site-title "Header Audit"
///
/// # Faster lookups, more parallelism
/// header_status --timeout-seconds 4 --max-concurrency 50
/// ```
#[derive(Debug, Clone, Parser)]
#[command(
    name = "header_status",
    about = "Checks batches of URLs for their status and redirect chains, grouped by registrable domain."
)]
pub struct Config {
    /// Address to bind the web interface to
    #[arg(long, default_value = "127.0.0.1")]
    pub bind: String,

    /// Port for the web interface
    #[arg(long, default_value_t = 8080)]
    pub port: u16,

    /// Title shown on the report page
    #[arg(long, default_value = DEFAULT_SITE_TITLE)]
    pub site_title: String,

    /// Per-URL header lookup timeout in seconds
    #[arg(long, default_value_t = HEADER_LOOKUP_TIMEOUT_SECS)]
    pub timeout_seconds: u64,

    /// Maximum concurrent header lookups per submission
    #[arg(long, default_value_t = 20)]
    pub max_concurrency: usize,

    /// HTTP User-Agent header value
    #[arg(long, default_value = DEFAULT_USER_AGENT)]
    pub user_agent: String,

    /// Log level: error|warn|info|debug|trace
    #[arg(long, value_enum, default_value_t = LogLevel::Info)]
    pub log_level: LogLevel,

    /// Log format: plain|json
    #[arg(long, value_enum, default_value_t = LogFormat::Plain)]
    pub log_format: LogFormat,
}

impl Default for Config {
    fn default() -> Self {
        Config::parse_from(["header_status"])
    }
}

impl Config {
    /// The configured per-URL lookup timeout as a `Duration`.
    pub fn lookup_timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }
}
