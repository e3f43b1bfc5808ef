//! Shared resource initialization.
//!
//! Sets up the pieces every submission shares: the HTTP client used for
//! header lookups, the Public Suffix List extractor, the concurrency
//! semaphore, and the logger.

use std::io::Write;
use std::sync::Arc;

use colored::Colorize;
use log::LevelFilter;
use reqwest::ClientBuilder;
use tokio::sync::Semaphore;

use crate::config::{Config, LogFormat};
use crate::error_handling::InitializationError;

/// Initializes the HTTP client used for header lookups.
///
/// Automatic redirects are disabled: the inspector follows the chain by hand
/// so that every intermediate response is retained. The per-request timeout
/// and User-Agent come from the configuration.
///
/// # Errors
///
/// Returns `InitializationError::HttpClientError` if client creation fails.
pub fn init_client(config: &Config) -> Result<Arc<reqwest::Client>, InitializationError> {
    let client = ClientBuilder::new()
        .redirect(reqwest::redirect::Policy::none())
        .timeout(config.lookup_timeout())
        .user_agent(config.user_agent.clone())
        .build()?;
    Ok(Arc::new(client))
}

/// Initializes the Public Suffix List extractor.
///
/// `psl::List` carries an embedded snapshot of the suffix list, so lookups
/// work offline and handle multi-part suffixes like `co.uk`.
pub fn init_extractor() -> Arc<psl::List> {
    Arc::new(psl::List)
}

/// Initializes a semaphore for controlling lookup concurrency.
///
/// One permit is held per in-flight header lookup, capping outbound
/// connection fan-out for a submission.
pub fn init_semaphore(count: usize) -> Arc<Semaphore> {
    Arc::new(Semaphore::new(count))
}

/// Initializes the logger with the specified level and format.
///
/// Configures `env_logger` with custom formatting. The logger reads
/// `RUST_LOG` by default, but the provided `level` overrides it, so
/// `--log-level` always wins.
///
/// # Errors
///
/// Returns `InitializationError::LoggerError` if the logger was already
/// installed.
pub fn init_logger_with(level: LevelFilter, format: LogFormat) -> Result<(), InitializationError> {
    let mut builder = env_logger::Builder::from_default_env();

    builder.filter_level(level);
    builder.filter_module("hyper", LevelFilter::Info);
    builder.filter_module("reqwest", LevelFilter::Info);
    builder.filter_module("header_status", level);

    match format {
        LogFormat::Json => {
            builder.format(|buf, record| {
                writeln!(
                    buf,
                    "{{\"ts\":{},\"level\":\"{}\",\"target\":\"{}\",\"msg\":{}}}",
                    chrono::Utc::now().timestamp_millis(),
                    record.level(),
                    record.target(),
                    serde_json::to_string(&record.args().to_string())
                        .unwrap_or_else(|_| "\"\"".into())
                )
            });
        }
        LogFormat::Plain => {
            builder.format(|buf, record| {
                let level = record.level();
                let colored_level = match level {
                    log::Level::Error => level.to_string().red(),
                    log::Level::Warn => level.to_string().yellow(),
                    log::Level::Info => level.to_string().green(),
                    log::Level::Debug => level.to_string().blue(),
                    log::Level::Trace => level.to_string().purple(),
                };
                writeln!(
                    buf,
                    "{} [{}] {}",
                    record.target().cyan(),
                    colored_level,
                    record.args()
                )
            });
        }
    }

    // try_init() instead of init() so tests can call this more than once.
    builder.try_init().map_err(InitializationError::from)?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_client() {
        let config = Config::default();
        let client = init_client(&config);
        assert!(client.is_ok());
    }

    #[test]
    fn test_init_semaphore_permits() {
        let semaphore = init_semaphore(5);
        assert_eq!(semaphore.available_permits(), 5);
    }

    #[test]
    fn test_init_logger_formats() {
        // env_logger can only be installed once per process; the second call
        // returns an error, which is acceptable. What matters is no panic.
        let first = init_logger_with(LevelFilter::Info, LogFormat::Plain);
        let second = init_logger_with(LevelFilter::Debug, LogFormat::Json);
        assert!(first.is_ok() || first.is_err());
        assert!(second.is_err() || second.is_ok());
    }
}
