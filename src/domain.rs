//! Registrable-domain classification.
//!
//! Maps a URL's host to its registrable domain (`"domain.suffix"`) using the
//! Public Suffix List, so multi-part suffixes like `co.uk` group correctly.

use anyhow::{Context, Result};
use psl::Psl;

/// Returns the registrable domain for a URL as `"domain.suffix"`.
///
/// Two URLs classify equally iff their hosts share the same registrable
/// domain: `https://www.example.co.uk/x` and `http://example.co.uk` both
/// yield `example.co.uk`.
///
/// # Errors
///
/// Fails when the URL cannot be parsed, has no host, or the host has no
/// registrable domain (single-label hosts like `localhost`). Callers treat
/// this as fatal for the whole submission: grouping is impossible without a
/// domain for every candidate.
pub fn classify_domain(list: &psl::List, url: &str) -> Result<String> {
    let parsed = url::Url::parse(url).with_context(|| format!("failed to parse URL: {url}"))?;

    let host = parsed
        .host_str()
        .ok_or_else(|| anyhow::anyhow!("URL '{url}' has no host component"))?;

    let domain = list
        .domain(host.as_bytes())
        .ok_or_else(|| anyhow::anyhow!("no registrable domain in host '{host}'"))?;

    Ok(String::from_utf8_lossy(domain.as_bytes()).to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_extractor() -> psl::List {
        psl::List
    }

    #[test]
    fn test_classify_basic() {
        let list = test_extractor();
        assert_eq!(
            classify_domain(&list, "https://www.example.com/path").unwrap(),
            "example.com"
        );
        assert_eq!(
            classify_domain(&list, "http://example.com").unwrap(),
            "example.com"
        );
    }

    #[test]
    fn test_classify_strips_subdomains() {
        let list = test_extractor();
        assert_eq!(
            classify_domain(&list, "https://a.b.c.example.com").unwrap(),
            "example.com"
        );
    }

    #[test]
    fn test_classify_multi_part_suffix() {
        let list = test_extractor();
        assert_eq!(
            classify_domain(&list, "https://www.example.co.uk").unwrap(),
            "example.co.uk"
        );
        assert_eq!(
            classify_domain(&list, "https://www.example.com.br").unwrap(),
            "example.com.br"
        );
    }

    #[test]
    fn test_classify_ignores_port_query_fragment() {
        let list = test_extractor();
        assert_eq!(
            classify_domain(&list, "https://example.com:8080/p?q=1#frag").unwrap(),
            "example.com"
        );
    }

    #[test]
    fn test_classify_rejects_invalid_url() {
        let list = test_extractor();
        assert!(classify_domain(&list, "not a url").is_err());
    }

    #[test]
    fn test_classify_rejects_hostless_url() {
        let list = test_extractor();
        assert!(classify_domain(&list, "file:///path/to/file").is_err());
    }

    #[test]
    fn test_classify_rejects_single_label_host() {
        let list = test_extractor();
        assert!(classify_domain(&list, "http://localhost").is_err());
    }
}
