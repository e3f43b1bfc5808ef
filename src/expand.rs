//! URL list expansion.
//!
//! Turns the raw submitted text into a deduplicated list of fully-qualified
//! URL candidates. A bare host expands into its four scheme/www variants; a
//! token that already carries a scheme is taken verbatim, since the user has
//! specified exact intent.

use std::collections::HashSet;

/// Expands whitespace-separated URLs and bare hosts into URL candidates.
///
/// Each token that starts with `http://` or `https://` yields itself as a
/// single candidate. Any other token `s` yields exactly four candidates in
/// this order: `http://s`, `http://www.s`, `https://s`, `https://www.s`.
/// The full expanded sequence is deduplicated preserving first-occurrence
/// order. Empty input yields an empty list.
pub fn expand_url_list(input: &str) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut candidates = Vec::new();

    for seed in input.split_whitespace() {
        let variants = if seed.starts_with("http://") || seed.starts_with("https://") {
            vec![seed.to_string()]
        } else {
            vec![
                format!("http://{seed}"),
                format!("http://www.{seed}"),
                format!("https://{seed}"),
                format!("https://www.{seed}"),
            ]
        };
        for candidate in variants {
            if seen.insert(candidate.clone()) {
                candidates.push(candidate);
            }
        }
    }

    candidates
}

/// Rebuilds the submitted text one token per line for redisplay in the form.
pub fn cleaned_input(input: &str) -> String {
    input.split_whitespace().collect::<Vec<_>>().join("\n")
}
