//! Header inspection: resolves a URL's redirect chain and records every hop.
//!
//! The client has automatic redirects disabled; the chain is followed by
//! hand so each intermediate response is retained in order. Transport
//! failures never escape as errors; they collapse into
//! `LookupOutcome::Failed` so one bad URL cannot poison its siblings.

use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use async_trait::async_trait;
use log::{debug, warn};
use reqwest::Url;

use crate::config::MAX_REDIRECT_HOPS;
use crate::report::{Hop, LookupOutcome};

/// The header-lookup capability consumed by the report pipeline.
///
/// Implemented by the reqwest-backed [`Inspector`]; tests substitute stubs
/// so the pipeline can run without a network.
#[async_trait]
pub trait HeaderLookup: Send + Sync {
    /// Resolves the redirect chain for one URL.
    async fn lookup(&self, url: &str) -> LookupOutcome;
}

/// Reqwest-backed header inspector.
pub struct Inspector {
    client: Arc<reqwest::Client>,
    timeout: Duration,
}

impl Inspector {
    /// Creates an inspector over a client built with redirects disabled
    /// (see `initialization::init_client`).
    pub fn new(client: Arc<reqwest::Client>, timeout: Duration) -> Self {
        Inspector { client, timeout }
    }

    /// Follows the redirect chain from `start_url`, recording every response
    /// as a hop, up to `MAX_REDIRECT_HOPS`.
    ///
    /// Redirect statuses (301, 302, 303, 307, 308) with a `Location` header
    /// continue the chain; the header value is resolved against the current
    /// URL when relative. Any other response terminates the chain, so the
    /// terminal hop is the last element.
    async fn resolve_chain(&self, start_url: &str) -> Result<Vec<Hop>> {
        let mut hops = Vec::new();
        let mut current = start_url.to_string();

        for _ in 0..MAX_REDIRECT_HOPS {
            let response = self.client.get(&current).send().await?;
            let status = response.status();
            let reason = status
                .canonical_reason()
                .unwrap_or_default()
                .to_uppercase();

            if matches!(status.as_u16(), 301 | 302 | 303 | 307 | 308) {
                let location = response
                    .headers()
                    .get(reqwest::header::LOCATION)
                    .and_then(|value| value.to_str().ok())
                    .map(|value| value.to_string());

                match location {
                    Some(location) => {
                        let next = Url::parse(&location)
                            .or_else(|_| Url::parse(&current).and_then(|base| base.join(&location)))?;
                        hops.push(Hop {
                            status: status.as_u16(),
                            reason,
                            location: Some(location),
                        });
                        current = next.to_string();
                        continue;
                    }
                    None => {
                        // Redirect status but no usable Location header;
                        // nowhere left to go.
                        warn!(
                            "redirect status {} for {} without a Location header",
                            status.as_u16(),
                            current
                        );
                        hops.push(Hop {
                            status: status.as_u16(),
                            reason,
                            location: None,
                        });
                        break;
                    }
                }
            }

            hops.push(Hop {
                status: status.as_u16(),
                reason,
                location: None,
            });
            break;
        }

        Ok(hops)
    }
}

#[async_trait]
impl HeaderLookup for Inspector {
    /// Resolves the chain under the configured timeout. Timeouts, connection
    /// failures, DNS failures and malformed responses all yield
    /// `LookupOutcome::Failed` with no partial hop data.
    async fn lookup(&self, url: &str) -> LookupOutcome {
        debug!("resolving header chain for {url}");
        match tokio::time::timeout(self.timeout, self.resolve_chain(url)).await {
            Ok(Ok(hops)) => LookupOutcome::Completed(hops),
            Ok(Err(e)) => {
                warn!("header lookup failed for {url}: {e:#}");
                LookupOutcome::Failed
            }
            Err(_) => {
                warn!(
                    "header lookup timed out after {}s for {url}",
                    self.timeout.as_secs()
                );
                LookupOutcome::Failed
            }
        }
    }
}
