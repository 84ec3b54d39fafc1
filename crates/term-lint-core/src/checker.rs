//! Case-insensitive forbidden-term matching.

use crate::terms::normalize_terms;
use crate::types::{RuleViolation, TermType};
use std::collections::BTreeSet;

/// Matches candidate names against a set of normalized forbidden terms.
#[derive(Debug, Clone, Default)]
pub struct TermChecker {
    terms: BTreeSet<String>,
}

impl TermChecker {
    /// Creates a checker over terms that are already normalized.
    #[must_use]
    pub fn new(terms: BTreeSet<String>) -> Self {
        Self { terms }
    }

    /// Creates a checker from raw terms, normalizing them first.
    #[must_use]
    pub fn from_raw<I, S>(terms: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self::new(normalize_terms(terms))
    }

    /// Adds already-normalized terms.
    pub(crate) fn extend(&mut self, terms: BTreeSet<String>) {
        self.terms.extend(terms);
    }

    /// Returns the normalized terms.
    #[must_use]
    pub fn terms(&self) -> &BTreeSet<String> {
        &self.terms
    }

    /// Returns the first term contained in `name`, if any.
    ///
    /// `name` is lower-cased but not trimmed.
    #[must_use]
    pub fn find_term(&self, name: &str) -> Option<&str> {
        if self.terms.is_empty() {
            return None;
        }
        let lowered = name.to_lowercase();
        self.terms
            .iter()
            .find(|term| lowered.contains(term.as_str()))
            .map(String::as_str)
    }

    /// Checks a single name.
    ///
    /// # Errors
    ///
    /// Returns a [`RuleViolation`] if the name contains any forbidden term.
    pub fn check_name(&self, kind: TermType, name: &str) -> Result<(), RuleViolation> {
        match self.find_term(name) {
            Some(term) => Err(RuleViolation::blacklisted(kind, name, term)),
            None => Ok(()),
        }
    }
}
