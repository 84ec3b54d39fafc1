//! Core types for member categories and rule violations.

use crate::discovery::DiscoveryError;
use miette::Diagnostic;

/// Boxed error carried as the cause of a [`RuleViolation`].
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Category of a checked name.
///
/// Only used to label violation messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum TermType {
    /// A named type declaration (struct, enum, union or trait).
    Class,
    /// A method declared directly for a type.
    Method,
    /// A field declared directly for a type.
    Field,
}

impl TermType {
    /// Returns the human-readable label used in messages.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Class => "Class",
            Self::Method => "Method",
            Self::Field => "Field",
        }
    }
}

impl std::fmt::Display for TermType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// The name and term that triggered a forbidden-term violation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Offense {
    /// Category of the offending name.
    pub kind: TermType,
    /// The offending name, as declared.
    pub name: String,
    /// The normalized term found inside the name.
    pub term: String,
}

/// The single failure type of a rule check.
///
/// Raised either for the first declared name containing a forbidden term,
/// or for any failure of the discovery facility (wrapped with its original
/// message and kept as [`std::error::Error::source`]).
#[derive(Debug, thiserror::Error, Diagnostic)]
#[error("{message}")]
#[diagnostic(code(term_lint::violation))]
pub struct RuleViolation {
    message: String,
    offense: Option<Offense>,
    #[help]
    help: Option<String>,
    #[source]
    source: Option<BoxError>,
}

impl RuleViolation {
    /// Creates a violation with a message and no cause.
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            offense: None,
            help: None,
            source: None,
        }
    }

    /// Creates a violation wrapping an underlying cause.
    #[must_use]
    pub fn with_source(message: impl Into<String>, source: impl Into<BoxError>) -> Self {
        Self {
            message: message.into(),
            offense: None,
            help: None,
            source: Some(source.into()),
        }
    }

    /// Creates the violation for a name containing a forbidden term.
    #[must_use]
    pub fn blacklisted(kind: TermType, name: impl Into<String>, term: impl Into<String>) -> Self {
        let name = name.into();
        let term = term.into();
        Self {
            message: format!("{kind} name contains blacklisted term: {name}"),
            help: Some(format!(
                "rename `{name}` so it no longer contains `{term}`, or mark it with #[term_lint::ignore]"
            )),
            offense: Some(Offense { kind, name, term }),
            source: None,
        }
    }

    /// Returns the violation message.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Returns the offending name and term, if this is a term match.
    #[must_use]
    pub fn offense(&self) -> Option<&Offense> {
        self.offense.as_ref()
    }

    /// Returns true if this violation wraps a discovery failure.
    #[must_use]
    pub fn is_discovery_failure(&self) -> bool {
        self.source
            .as_deref()
            .is_some_and(|e| e.is::<DiscoveryError>())
    }

    /// Formats the message followed by its cause chain.
    ///
    /// Produces a multi-line report suitable for `panic!()` messages in
    /// `cargo test` integration.
    #[must_use]
    pub fn format_report(&self) -> String {
        use std::fmt::Write;

        let mut report = format!("\n=== term-lint: {} ===\n", self.message);
        let mut cause = std::error::Error::source(self);
        while let Some(err) = cause {
            let _ = writeln!(report, "  caused by: {err}");
            cause = err.source();
        }
        if let Some(help) = &self.help {
            let _ = writeln!(report, "  = help: {help}");
        }
        report
    }
}

impl From<DiscoveryError> for RuleViolation {
    fn from(err: DiscoveryError) -> Self {
        Self::with_source(err.to_string(), err)
    }
}
