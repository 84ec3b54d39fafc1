//! # term-lint
//!
//! Fails the build when declared type, method or field names contain
//! forbidden terms such as `temp` or `test`.
//!
//! This is the facade crate: it re-exports the core rule engine and the
//! macros.
//!
//! ## Quick Start: `cargo test` Integration
//!
//! ```toml
//! [dev-dependencies]
//! term-lint = "0.1"
//! ```
//!
//! ```toml
//! # term-lint.toml
//! namespaces = ["crate::domain"]
//! terms = ["temp", "test"]
//! ```
//!
//! ```rust,ignore
//! // tests/naming.rs
//! term_lint::check!();
//! ```
//!
//! ## Exemptions
//!
//! ```rust,ignore
//! #[term_lint::ignore(reason = "name fixed by the wire format")]
//! pub struct TempoEvent;
//!
//! pub struct Cache {
//!     // term-lint: ignore
//!     temp_dir: PathBuf,
//! }
//! ```
//!
//! ## Programmatic Usage
//!
//! ```rust,ignore
//! use term_lint::TermRule;
//!
//! TermRule::elements()
//!     .in_namespaces(["crate::billing"])
//!     .must_not_contain_terms(["temp"])
//!     .check()?;
//! ```

#![forbid(unsafe_code)]

pub use term_lint_core::*;

// Re-export the exemption attribute for #[term_lint::ignore]
pub use term_lint_macros::ignore;

// Re-export the check macro for term_lint::check!()
pub use term_lint_macros::check;

mod runner;

#[doc(hidden)]
pub mod __internal {
    pub use crate::runner::run_check;
}
