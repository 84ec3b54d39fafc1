//! Exemption markers in source: attributes and comment directives.
//!
//! Supported forms:
//! ```text
//! #[term_lint::ignore]
//! #[term_lint::ignore(reason = "kept for wire compatibility")]
//! // term-lint: ignore reason="kept for wire compatibility"
//! ```
//!
//! The comment form is the only one available on fields and enum
//! variants, which cannot carry attribute macros.

use syn::Attribute;

/// Checks if attributes contain `#[term_lint::ignore]`.
pub(crate) fn has_ignore_attr(attrs: &[Attribute]) -> bool {
    attrs.iter().any(|attr| {
        let segments: Vec<String> = attr
            .path()
            .segments
            .iter()
            .map(|seg| seg.ident.to_string())
            .collect();
        segments == ["term_lint", "ignore"]
    })
}

/// Checks if attributes contain a `#[cfg(test)]` attribute.
pub(crate) fn has_cfg_test(attrs: &[Attribute]) -> bool {
    attrs.iter().any(|attr| {
        if !attr.path().is_ident("cfg") {
            return false;
        }
        let attr_str = quote::quote!(#attr).to_string().replace(' ', "");
        attr_str == "#[cfg(test)]"
    })
}

/// Returns the line on which a declaration starts, counting its attributes
/// (doc comments included).
pub(crate) fn start_line(attrs: &[Attribute], name_line: usize) -> usize {
    attrs
        .iter()
        .map(|attr| attr.bracket_token.span.open().start().line)
        .min()
        .map_or(name_line, |line| line.min(name_line))
}

/// Parsed `// term-lint: ignore` directive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct IgnoreDirective {
    /// Optional reason for the exemption.
    pub(crate) reason: Option<String>,
}

/// Looks for an ignore directive for a declaration whose attributes start
/// on `first_line` and whose name sits on `name_line` (both 1-indexed).
///
/// A directive counts when it trails the name's line, or when it is a
/// whole-line comment directly above the first attribute or directly above
/// the name.
pub(crate) fn find_ignore_comment(
    content: &str,
    first_line: usize,
    name_line: usize,
) -> Option<IgnoreDirective> {
    if first_line == 0 || name_line == 0 {
        return None;
    }
    let lines: Vec<&str> = content.lines().collect();

    let whole_line_above = |line: usize| {
        let previous = lines.get(line.checked_sub(2)?)?;
        if previous.trim_start().starts_with("//") {
            parse_ignore_directive(previous)
        } else {
            None
        }
    };

    lines
        .get(name_line - 1)
        .and_then(|l| parse_ignore_directive(l))
        .or_else(|| whole_line_above(first_line))
        .or_else(|| whole_line_above(name_line))
}

/// Parses an ignore directive from a source line.
///
/// Accepts a trailing comment after code on the same line.
fn parse_ignore_directive(line: &str) -> Option<IgnoreDirective> {
    let comment_start = line.find("//")?;
    let comment = line[comment_start..].trim_start_matches('/').trim();

    let directive = comment.strip_prefix("term-lint:")?.trim();
    let rest = directive.strip_prefix("ignore")?;
    if !(rest.is_empty() || rest.starts_with(char::is_whitespace)) {
        return None;
    }

    let reason = rest.trim().strip_prefix("reason=").and_then(|reason_part| {
        let reason_part = reason_part.trim();
        let quoted = reason_part.strip_prefix('"')?;
        let end = quoted.find('"')?;
        Some(quoted[..end].to_string())
    });

    Some(IgnoreDirective { reason })
}
