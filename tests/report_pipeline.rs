//! End-to-end pipeline tests driven by a stubbed header-lookup transport.
//!
//! No network: the stub stands in for the HTTP capability so expansion,
//! grouping, concurrency and assembly can be verified deterministically.

use std::sync::Arc;

use async_trait::async_trait;

use header_status::initialization::{init_extractor, init_semaphore};
use header_status::{
    build_report, BatchContext, Classification, HeaderLookup, Hop, LookupOutcome,
};

/// Stub transport returning one fixed-status hop for every URL.
struct FixedStatus(u16);

#[async_trait]
impl HeaderLookup for FixedStatus {
    async fn lookup(&self, _url: &str) -> LookupOutcome {
        LookupOutcome::Completed(vec![Hop {
            status: self.0,
            reason: "OK".to_string(),
            location: None,
        }])
    }
}

/// Stub transport that fails every lookup.
struct AlwaysFails;

#[async_trait]
impl HeaderLookup for AlwaysFails {
    async fn lookup(&self, _url: &str) -> LookupOutcome {
        LookupOutcome::Failed
    }
}

fn test_context(lookup: Arc<dyn HeaderLookup>) -> BatchContext {
    BatchContext {
        lookup,
        extractor: init_extractor(),
        semaphore: init_semaphore(8),
    }
}

#[tokio::test]
async fn test_single_bare_domain_unsorted() {
    let ctx = test_context(Arc::new(FixedStatus(200)));

    let report = build_report("example.com", false, &ctx).await.unwrap();

    assert_eq!(report.groups.len(), 1);
    let group = &report.groups[0];
    assert_eq!(group.domain, "example.com");

    // Four success badges in expansion order.
    let urls: Vec<&str> = group.results.iter().map(|r| r.url.as_str()).collect();
    assert_eq!(
        urls,
        vec![
            "http://example.com",
            "http://www.example.com",
            "https://example.com",
            "https://www.example.com",
        ]
    );
    for result in &group.results {
        let hops = result.hops();
        assert_eq!(hops.len(), 1);
        assert_eq!(hops[0].classification(), Classification::Success);
    }
}

#[tokio::test]
async fn test_mixed_input_sorted() {
    let ctx = test_context(Arc::new(FixedStatus(200)));

    let report = build_report("https://example.com example.org", true, &ctx)
        .await
        .unwrap();

    let domains: Vec<&str> = report.groups.iter().map(|g| g.domain.as_str()).collect();
    assert_eq!(domains, vec!["example.com", "example.org"]);

    // The literal input stays unexpanded.
    let com_urls: Vec<&str> = report.groups[0]
        .results
        .iter()
        .map(|r| r.url.as_str())
        .collect();
    assert_eq!(com_urls, vec!["https://example.com"]);

    // The bare domain expands and sorts.
    let org_urls: Vec<&str> = report.groups[1]
        .results
        .iter()
        .map(|r| r.url.as_str())
        .collect();
    assert_eq!(
        org_urls,
        vec![
            "http://example.org",
            "http://www.example.org",
            "https://example.org",
            "https://www.example.org",
        ]
    );
}

#[tokio::test]
async fn test_unsorted_keeps_first_occurrence_domain_order() {
    let ctx = test_context(Arc::new(FixedStatus(200)));

    let report = build_report("b.org a.com", false, &ctx).await.unwrap();
    let domains: Vec<&str> = report.groups.iter().map(|g| g.domain.as_str()).collect();
    assert_eq!(domains, vec!["b.org", "a.com"]);

    let report = build_report("b.org a.com", true, &ctx).await.unwrap();
    let domains: Vec<&str> = report.groups.iter().map(|g| g.domain.as_str()).collect();
    assert_eq!(domains, vec!["a.com", "b.org"]);
}

#[tokio::test]
async fn test_transport_failure_degrades_per_url_only() {
    let ctx = test_context(Arc::new(AlwaysFails));

    let report = build_report("example.com", false, &ctx).await.unwrap();

    // The batch still completes; every URL carries only the failure marker.
    assert_eq!(report.groups.len(), 1);
    assert_eq!(report.groups[0].results.len(), 4);
    for result in &report.groups[0].results {
        assert!(result.failed());
        assert!(result.hops().is_empty());
    }
}

#[tokio::test]
async fn test_classification_failure_aborts_batch() {
    let ctx = test_context(Arc::new(FixedStatus(200)));

    // "localhost" expands to http://localhost first, which has no
    // registrable domain; the whole batch aborts with no partial report.
    let result = build_report("example.com localhost", false, &ctx).await;
    assert!(result.is_err());
}

#[tokio::test]
async fn test_duplicate_seeds_do_not_duplicate_results() {
    let ctx = test_context(Arc::new(FixedStatus(200)));

    let once = build_report("example.com", false, &ctx).await.unwrap();
    let twice = build_report("example.com example.com", false, &ctx)
        .await
        .unwrap();
    assert_eq!(once, twice);
}

#[tokio::test]
async fn test_every_candidate_appears_in_some_group() {
    let ctx = test_context(Arc::new(FixedStatus(200)));

    let report = build_report("example.com https://sub.other.org/x", false, &ctx)
        .await
        .unwrap();

    let expected = [
        "http://example.com",
        "http://www.example.com",
        "https://example.com",
        "https://www.example.com",
        "https://sub.other.org/x",
    ];
    for url in expected {
        assert!(
            report
                .groups
                .iter()
                .any(|g| g.results.iter().any(|r| r.url == url)),
            "candidate {url} missing from the report"
        );
    }
}

#[tokio::test]
async fn test_empty_input_yields_empty_report() {
    let ctx = test_context(Arc::new(FixedStatus(200)));
    let report = build_report("   \n\t ", false, &ctx).await.unwrap();
    assert!(report.groups.is_empty());
}
