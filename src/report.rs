//! Report data model and assembly.
//!
//! Everything the renderer needs lives here: classified hops, per-URL
//! outcomes, and the grouped report structure. Assembly is purely
//! structural; no markup is produced at this layer.

use std::collections::HashMap;

use strum_macros::EnumIter;

use crate::group::DomainGroup;

/// Visual classification of a single response status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter)]
pub enum Classification {
    /// 200.
    Success,
    /// 301 or 302 redirects.
    Info,
    /// 404, 500 or 502.
    Failure,
    /// Any other status; rendered uncolored.
    Neutral,
}

impl Classification {
    /// Classifies a status code. Total: every status maps to a variant.
    pub fn from_status(status: u16) -> Self {
        match status {
            200 => Classification::Success,
            301 | 302 => Classification::Info,
            404 | 500 | 502 => Classification::Failure,
            _ => Classification::Neutral,
        }
    }

    /// The badge colour the template uses for this classification.
    pub fn badge_colour(&self) -> &'static str {
        match self {
            Classification::Success => "green",
            Classification::Info => "orange",
            Classification::Failure => "red",
            Classification::Neutral => "yellow",
        }
    }
}

/// One response observed while resolving a URL.
///
/// Hops are ordered oldest first; the terminal response is always the last
/// hop of its chain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Hop {
    /// HTTP status code.
    pub status: u16,
    /// Upper-cased reason phrase; empty for unknown statuses.
    pub reason: String,
    /// `Location` header value for redirect hops.
    pub location: Option<String>,
}

impl Hop {
    /// This hop's classification.
    pub fn classification(&self) -> Classification {
        Classification::from_status(self.status)
    }

    /// Badge colour shorthand for the template.
    pub fn badge_colour(&self) -> &'static str {
        self.classification().badge_colour()
    }

    /// `Location` header text for rendering; empty for non-redirect hops.
    pub fn location_text(&self) -> &str {
        self.location.as_deref().unwrap_or_default()
    }
}

/// Outcome of a header lookup for a single URL.
///
/// A tagged result rather than an error path, so concurrent lookups can be
/// aggregated without teardown hazards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LookupOutcome {
    /// The chain resolved; hops are ordered oldest first, terminal hop last.
    Completed(Vec<Hop>),
    /// The transport failed (timeout, connection, DNS). No partial hop data
    /// is retained.
    Failed,
}

/// A URL candidate together with its lookup outcome.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InspectionResult {
    /// The inspected URL.
    pub url: String,
    /// What the lookup produced.
    pub outcome: LookupOutcome,
}

impl InspectionResult {
    /// True when the lookup failed outright.
    pub fn failed(&self) -> bool {
        matches!(self.outcome, LookupOutcome::Failed)
    }

    /// The recorded hops; empty when the lookup failed.
    pub fn hops(&self) -> &[Hop] {
        match &self.outcome {
            LookupOutcome::Completed(hops) => hops,
            LookupOutcome::Failed => &[],
        }
    }
}

/// One domain heading and its inspected URLs, in render order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportGroup {
    /// The registrable domain heading.
    pub domain: String,
    /// Inspection results for the group's URLs.
    pub results: Vec<InspectionResult>,
}

/// The assembled report: domain groups in order, URLs in order within each.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Report {
    /// The rendered groups.
    pub groups: Vec<ReportGroup>,
}

/// Combines domain groups with per-URL outcomes into a `Report`.
///
/// Group order and per-group URL order are taken from `groups` untouched, so
/// concurrency in the lookup phase can never reorder the report. A URL with
/// no recorded outcome (its lookup task died) degrades to the failure
/// marker for that URL only.
pub fn assemble_report(groups: &[DomainGroup], outcomes: &HashMap<String, LookupOutcome>) -> Report {
    let groups = groups
        .iter()
        .map(|group| ReportGroup {
            domain: group.domain.clone(),
            results: group
                .urls
                .iter()
                .map(|url| InspectionResult {
                    url: url.clone(),
                    outcome: outcomes
                        .get(url)
                        .cloned()
                        .unwrap_or(LookupOutcome::Failed),
                })
                .collect(),
        })
        .collect();

    Report { groups }
}
