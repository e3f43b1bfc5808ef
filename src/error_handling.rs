//! Error type definitions.
//!
//! Two boundaries get structured errors: process startup (logger, HTTP
//! client) and per-submission report building. Everything inside the
//! pipeline propagates `anyhow::Error` with context.

use log::SetLoggerError;
use reqwest::Error as ReqwestError;
use thiserror::Error;

/// Error types for initialization failures.
#[derive(Error, Debug)]
pub enum InitializationError {
    /// Error initializing the logger.
    #[error("Logger initialization error: {0}")]
    LoggerError(#[from] SetLoggerError),

    /// Error initializing the HTTP client.
    #[error("HTTP client initialization error: {0}")]
    HttpClientError(#[from] ReqwestError),
}

/// Errors that abort report generation for a whole submission.
///
/// Per-URL transport failures are NOT errors; they degrade to a failure
/// badge for that URL only (see `LookupOutcome::Failed`). A `BatchError`
/// means no partial report is shown.
#[derive(Error, Debug)]
pub enum BatchError {
    /// A host in the batch could not be classified into a registrable
    /// domain, so grouping is impossible.
    #[error("domain classification failed: {0}")]
    Classification(#[from] anyhow::Error),
}
