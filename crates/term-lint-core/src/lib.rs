//! # term-lint-core
//!
//! Forbidden-term rules over declared names.
//!
//! A [`TermRule`] lists namespaces and forbidden terms. Checking it asks a
//! [`Discovery`] facility for every type declared in each namespace and
//! fails on the first type, method or field name containing a forbidden
//! term (case-insensitive substring match). It includes:
//!
//! - [`TermRule`] for configuring and running the check
//! - [`TermChecker`] and [`MemberScanner`] for the matching itself
//! - [`Discovery`] with [`SourceDiscovery`] (crate sources via `syn`) and
//!   [`InMemoryDiscovery`] (pre-built metadata)
//! - [`RuleViolation`], the single failure type
//!
//! ## Example
//!
//! ```ignore
//! use term_lint_core::TermRule;
//!
//! TermRule::elements()
//!     .in_namespaces(["crate::billing", "crate::shipping"])
//!     .must_not_contain_terms(["temp", "test"])
//!     .check()?;
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod checker;
mod config;
mod rule;
mod scanner;
mod source;
mod terms;
mod types;

/// Discovery facility traits and metadata.
pub mod discovery;

pub use checker::TermChecker;
pub use config::{Config, ConfigError, SourceConfig};
pub use discovery::{
    DeclaredMember, DeclaredType, Discovery, DiscoveryError, InMemoryDiscovery, ScanHandle,
    TypeInfo,
};
pub use rule::TermRule;
pub use scanner::MemberScanner;
pub use source::SourceDiscovery;
pub use terms::{normalize_term, normalize_terms};
pub use types::{BoxError, Offense, RuleViolation, TermType};
