//! Applies the term checker across a type's declared surface.

use crate::checker::TermChecker;
use crate::discovery::{DeclaredMember, DeclaredType};
use crate::types::{RuleViolation, TermType};
use tracing::info;

/// Checks a loaded type's name, methods and fields.
///
/// Each operation stops at the first violation. Callers run them in the
/// order type, methods, fields.
#[derive(Debug, Clone, Copy)]
pub struct MemberScanner<'a> {
    checker: &'a TermChecker,
}

impl<'a> MemberScanner<'a> {
    /// Creates a scanner over a checker.
    #[must_use]
    pub fn new(checker: &'a TermChecker) -> Self {
        Self { checker }
    }

    /// Checks the type's own simple name.
    ///
    /// # Errors
    ///
    /// Returns a [`RuleViolation`] if the name contains a forbidden term.
    pub fn check_type(&self, ty: &DeclaredType) -> Result<(), RuleViolation> {
        self.checker.check_name(TermType::Class, ty.name())
    }

    /// Checks every method declared directly on the type.
    ///
    /// # Errors
    ///
    /// Returns a [`RuleViolation`] for the first non-exempt method whose
    /// name contains a forbidden term.
    pub fn check_methods(&self, ty: &DeclaredType) -> Result<(), RuleViolation> {
        self.check_members(ty, ty.methods(), TermType::Method)
    }

    /// Checks every field declared directly on the type.
    ///
    /// # Errors
    ///
    /// Returns a [`RuleViolation`] for the first non-exempt field whose
    /// name contains a forbidden term.
    pub fn check_fields(&self, ty: &DeclaredType) -> Result<(), RuleViolation> {
        self.check_members(ty, ty.fields(), TermType::Field)
    }

    /// Runs all three checks in order.
    ///
    /// # Errors
    ///
    /// Returns the first [`RuleViolation`] found.
    pub fn check_all(&self, ty: &DeclaredType) -> Result<(), RuleViolation> {
        self.check_type(ty)?;
        self.check_methods(ty)?;
        self.check_fields(ty)
    }

    fn check_members(
        &self,
        ty: &DeclaredType,
        members: &[DeclaredMember],
        kind: TermType,
    ) -> Result<(), RuleViolation> {
        for member in members {
            if member.is_exempt() {
                info!(
                    "Ignoring the following {}: {}::{}",
                    kind.label().to_lowercase(),
                    ty.qualified_name(),
                    member.name()
                );
                continue;
            }
            self.checker.check_name(kind, member.name())?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_checker() -> TermChecker {
        TermChecker::from_raw(["temp"])
    }

    #[test]
    fn type_name_violation_wins_over_method() {
        let checker = temp_checker();
        let scanner = MemberScanner::new(&checker);
        let ty = DeclaredType::new("TempService")
            .with_method(DeclaredMember::new("computeTempValue"));

        let err = scanner.check_all(&ty).unwrap_err();
        assert_eq!(err.offense().unwrap().kind, TermType::Class);
        assert_eq!(err.offense().unwrap().name, "TempService");
    }

    #[test]
    fn first_violating_method_in_order_is_reported() {
        let checker = temp_checker();
        let scanner = MemberScanner::new(&checker);
        let ty = DeclaredType::new("Service")
            .with_method(DeclaredMember::new("run"))
            .with_method(DeclaredMember::new("tempA"))
            .with_method(DeclaredMember::new("tempB"));

        let err = scanner.check_methods(&ty).unwrap_err();
        assert_eq!(err.offense().unwrap().name, "tempA");
    }

    #[test]
    fn exempt_members_are_skipped() {
        let checker = temp_checker();
        let scanner = MemberScanner::new(&checker);
        let ty = DeclaredType::new("Cache")
            .with_method(DeclaredMember::exempt("computeTempValue"))
            .with_field(DeclaredMember::exempt("tempCache"));

        assert!(scanner.check_all(&ty).is_ok());
    }

    #[test]
    fn fields_are_checked_with_field_category() {
        let checker = temp_checker();
        let scanner = MemberScanner::new(&checker);
        let ty = DeclaredType::new("Cache").with_field(DeclaredMember::new("tempCache"));

        assert!(scanner.check_methods(&ty).is_ok());
        let err = scanner.check_fields(&ty).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Field name contains blacklisted term: tempCache"
        );
    }
}
