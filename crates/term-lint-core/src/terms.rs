//! Forbidden-term normalization.

use std::collections::BTreeSet;

/// Normalizes a single forbidden term: lower-cased, then trimmed.
#[must_use]
pub fn normalize_term(term: &str) -> String {
    term.to_lowercase().trim().to_string()
}

/// Normalizes raw terms into a deduplicated set.
///
/// Terms that differ only in case or surrounding whitespace collapse into
/// a single entry.
#[must_use]
pub fn normalize_terms<I, S>(terms: I) -> BTreeSet<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    terms
        .into_iter()
        .map(|t| normalize_term(t.as_ref()))
        .collect()
}
