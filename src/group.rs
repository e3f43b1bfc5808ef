//! Grouping of URL candidates by registrable domain.

use std::collections::HashSet;

use anyhow::Result;

use crate::domain::classify_domain;

/// A registrable domain together with the URL candidates that match it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DomainGroup {
    /// The registrable domain, rendered as `"domain.suffix"`.
    pub domain: String,
    /// Matching candidates, in candidate order (or sorted, per the flag).
    pub urls: Vec<String>,
}

/// Collects the unique registrable domains of `candidates`.
///
/// Domains appear in first-occurrence order; with `sort` set they are
/// ordered lexicographically instead.
///
/// # Errors
///
/// Fails on the first candidate that cannot be classified; the caller
/// aborts the whole submission (no partial grouping).
pub fn base_domains(list: &psl::List, candidates: &[String], sort: bool) -> Result<Vec<String>> {
    let mut seen = HashSet::new();
    let mut domains = Vec::new();

    for url in candidates {
        let domain = classify_domain(list, url)?;
        if seen.insert(domain.clone()) {
            domains.push(domain);
        }
    }

    if sort {
        domains.sort();
    }
    Ok(domains)
}

/// Groups candidates under each of their registrable domains.
///
/// A candidate belongs to a group when the domain appears in the URL string
/// immediately preceded by `.` or `/`. The boundary character keeps
/// `example.com` from matching `notexample.com` without re-parsing every
/// host. A domain that shows up as a path segment (`/path/example.com`)
/// still matches; that over-match is an accepted approximation.
///
/// With `sort` set, both the group order and the URLs inside each group are
/// lexicographic; otherwise both keep first-occurrence order.
pub fn group_by_domain(
    list: &psl::List,
    candidates: &[String],
    sort: bool,
) -> Result<Vec<DomainGroup>> {
    let domains = base_domains(list, candidates, sort)?;

    let mut ordered: Vec<String> = candidates.to_vec();
    if sort {
        ordered.sort();
    }

    let groups = domains
        .into_iter()
        .map(|domain| {
            let dot = format!(".{domain}");
            let slash = format!("/{domain}");
            let urls = ordered
                .iter()
                .filter(|url| url.contains(&dot) || url.contains(&slash))
                .cloned()
                .collect();
            DomainGroup { domain, urls }
        })
        .collect();

    Ok(groups)
}
