//! The forbidden-term rule and its scan orchestration.

use crate::checker::TermChecker;
use crate::config::Config;
use crate::discovery::Discovery;
use crate::scanner::MemberScanner;
use crate::source::SourceDiscovery;
use crate::terms::normalize_terms;
use crate::types::RuleViolation;

use std::collections::BTreeSet;
use tracing::{debug, error, info, warn};

/// A rule asserting that no declared name contains a forbidden term.
///
/// Built fluently, then run with [`TermRule::check`]:
///
/// ```ignore
/// use term_lint_core::TermRule;
///
/// TermRule::elements()
///     .in_namespaces(["crate::billing"])
///     .must_not_contain_terms(["temp", "test"])
///     .check()?;
/// ```
///
/// Namespaces and terms have set semantics; scan order over namespaces is
/// unspecified.
#[derive(Default)]
pub struct TermRule {
    namespaces: BTreeSet<String>,
    checker: TermChecker,
    discovery: Option<Box<dyn Discovery>>,
}

impl TermRule {
    /// Creates an empty rule: no namespaces, no terms.
    #[must_use]
    pub fn elements() -> Self {
        Self::default()
    }

    /// Creates a rule from the `namespaces` and `terms` of a config file.
    #[must_use]
    pub fn from_config(config: &Config) -> Self {
        Self::elements()
            .in_namespaces(&config.namespaces)
            .must_not_contain_terms(&config.terms)
    }

    /// Adds namespaces to scan.
    #[must_use]
    pub fn in_namespaces<I, S>(mut self, namespaces: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.namespaces
            .extend(namespaces.into_iter().map(|n| n.as_ref().to_string()));
        self
    }

    /// Adds forbidden terms, normalized to lower case without surrounding
    /// whitespace.
    #[must_use]
    pub fn must_not_contain_terms<I, S>(mut self, terms: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.checker.extend(normalize_terms(terms));
        self
    }

    /// Sets the discovery facility used by [`TermRule::check`].
    ///
    /// Without one, `check` reads the sources of the crate under
    /// `CARGO_MANIFEST_DIR`.
    #[must_use]
    pub fn discovery<D: Discovery + 'static>(mut self, discovery: D) -> Self {
        self.discovery = Some(Box::new(discovery));
        self
    }

    /// Returns the configured namespaces.
    #[must_use]
    pub fn namespaces(&self) -> &BTreeSet<String> {
        &self.namespaces
    }

    /// Returns the normalized forbidden terms.
    #[must_use]
    pub fn terms(&self) -> &BTreeSet<String> {
        self.checker.terms()
    }

    /// Scans every configured namespace.
    ///
    /// # Errors
    ///
    /// Returns the first [`RuleViolation`] found, or a discovery failure
    /// wrapped as one.
    pub fn check(&self) -> Result<(), RuleViolation> {
        match &self.discovery {
            Some(discovery) => self.check_with(discovery.as_ref()),
            None => {
                let discovery = SourceDiscovery::from_env()?;
                self.check_with(&discovery)
            }
        }
    }

    /// Scans every configured namespace with an explicit discovery facility.
    ///
    /// # Errors
    ///
    /// Returns the first [`RuleViolation`] found, or a discovery failure
    /// wrapped as one.
    pub fn check_with(&self, discovery: &dyn Discovery) -> Result<(), RuleViolation> {
        if self.terms().contains("") {
            warn!("A blank forbidden term is configured; every name will match it");
        }

        let scanner = MemberScanner::new(&self.checker);
        for namespace in &self.namespaces {
            debug!("Scanning namespace: {}", namespace);
            if let Err(e) = scan_namespace(discovery, &scanner, namespace) {
                error!("Error scanning namespace {}: {}", namespace, e);
                return Err(e);
            }
        }
        Ok(())
    }
}

/// Scans one namespace; the scan handle is dropped on every return path.
fn scan_namespace(
    discovery: &dyn Discovery,
    scanner: &MemberScanner<'_>,
    namespace: &str,
) -> Result<(), RuleViolation> {
    let handle = discovery.scan(namespace)?;
    let types = handle.types();
    if types.is_empty() {
        warn!("No types found in namespace: {}", namespace);
        return Ok(());
    }

    for info in types {
        let ty = handle.load(info)?;
        if ty.is_exempt() {
            info!("Ignoring type and its members: {}", ty.qualified_name());
            continue;
        }
        debug!("Found type: {}", ty.qualified_name());
        scanner.check_all(&ty)?;
    }
    Ok(())
}
