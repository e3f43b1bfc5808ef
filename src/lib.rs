//! header_status library: URL expansion, domain grouping, and redirect-chain
//! inspection.
//!
//! The pipeline takes a raw blob of URLs and bare domains, expands it into
//! concrete URL candidates, groups the candidates by registrable domain, and
//! resolves every candidate's redirect chain concurrently, producing a
//! [`Report`] ready for rendering.
//!
//! # Example
//!
//! ```no_run
//! use header_status::{build_report, BatchContext, Config};
//! use header_status::initialization::{init_client, init_extractor, init_semaphore};
//! use header_status::Inspector;
//! use std::sync::Arc;
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = Config::default();
//! let client = init_client(&config)?;
//! let ctx = BatchContext {
//!     lookup: Arc::new(Inspector::new(client, config.lookup_timeout())),
//!     extractor: init_extractor(),
//!     semaphore: init_semaphore(config.max_concurrency),
//! };
//!
//! let report = build_report("example.com rust-lang.org", false, &ctx).await?;
//! println!("{} domain groups", report.groups.len());
//! # Ok(())
//! # }
//! ```
//!
//! # Requirements
//!
//! This library requires a Tokio runtime. Use `#[tokio::main]` in your
//! application or ensure you're calling library functions within an async
//! context.

#![warn(missing_docs)]

pub mod config;
mod domain;
mod error_handling;
mod expand;
mod group;
mod inspect;
pub mod initialization;
mod report;
mod server;

// Re-export public API
pub use config::{Config, LogFormat, LogLevel};
pub use error_handling::{BatchError, InitializationError};
pub use expand::{cleaned_input, expand_url_list};
pub use group::{base_domains, group_by_domain, DomainGroup};
pub use inspect::{HeaderLookup, Inspector};
pub use report::{
    assemble_report, Classification, Hop, InspectionResult, LookupOutcome, Report, ReportGroup,
};
pub use run::{build_report, BatchContext};
pub use server::{app_router, run_server, AppState};

// Internal run module (contains the batch pipeline)
mod run {
    use std::collections::HashMap;
    use std::sync::Arc;

    use futures::future::join_all;
    use log::{debug, warn};
    use tokio::sync::Semaphore;

    use crate::error_handling::BatchError;
    use crate::expand::expand_url_list;
    use crate::group::group_by_domain;
    use crate::inspect::HeaderLookup;
    use crate::report::{assemble_report, LookupOutcome, Report};

    /// Shared resources for building one report.
    ///
    /// All fields are cheap to clone handles; a single context is built at
    /// startup and shared by every submission.
    pub struct BatchContext {
        /// The header-lookup capability (reqwest-backed in production,
        /// stubbed in tests).
        pub lookup: Arc<dyn HeaderLookup>,
        /// Public Suffix List extractor for domain classification.
        pub extractor: Arc<psl::List>,
        /// Caps concurrent outbound lookups.
        pub semaphore: Arc<Semaphore>,
    }

    /// Builds the full report for one submission.
    ///
    /// Expands the raw input into URL candidates, groups them by registrable
    /// domain (aborting the whole batch on a classification failure), then
    /// resolves every unique candidate's header chain concurrently and
    /// assembles the results in deterministic order.
    ///
    /// Grouping completes before any lookup starts; lookups are gated by the
    /// context's semaphore and joined in submission order, so concurrency
    /// never reorders the report. A lookup that fails or times out degrades
    /// to a failure marker for that URL alone.
    ///
    /// # Errors
    ///
    /// Returns `BatchError::Classification` when any candidate's host has no
    /// registrable domain; no partial report is produced.
    pub async fn build_report(
        input: &str,
        sort: bool,
        ctx: &BatchContext,
    ) -> Result<Report, BatchError> {
        let candidates = expand_url_list(input);
        debug!("expanded input into {} URL candidates", candidates.len());

        let groups = group_by_domain(&ctx.extractor, &candidates, sort)
            .map_err(BatchError::Classification)?;

        // Each unique candidate is inspected once; groups that share a URL
        // (the path-segment over-match) share its outcome.
        let mut handles = Vec::with_capacity(candidates.len());
        for url in &candidates {
            let semaphore = Arc::clone(&ctx.semaphore);
            let lookup = Arc::clone(&ctx.lookup);
            let url = url.clone();
            handles.push(tokio::spawn(async move {
                let _permit = match semaphore.acquire_owned().await {
                    Ok(permit) => permit,
                    Err(_) => {
                        warn!("semaphore closed, skipping URL: {url}");
                        return (url, LookupOutcome::Failed);
                    }
                };
                let outcome = lookup.lookup(&url).await;
                (url, outcome)
            }));
        }

        let mut outcomes = HashMap::with_capacity(candidates.len());
        for joined in join_all(handles).await {
            match joined {
                Ok((url, outcome)) => {
                    outcomes.insert(url, outcome);
                }
                // A panicked task leaves its URL without an outcome; the
                // assembler degrades it to the failure badge.
                Err(e) => warn!("header lookup task panicked: {e}"),
            }
        }

        Ok(assemble_report(&groups, &outcomes))
    }
}
