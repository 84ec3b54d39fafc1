//! Module paths: from file locations and from user-supplied namespaces.

use crate::discovery::DiscoveryError;
use std::path::{Component, Path};

/// Computes the module path of a file relative to the source root.
///
/// `lib.rs` and `main.rs` at the root map to the crate root, `x/mod.rs`
/// to `x`, and `x/y.rs` to `x::y`.
pub(crate) fn module_path_for(relative_path: &Path) -> Vec<String> {
    let mut parts: Vec<String> = relative_path
        .with_extension("")
        .components()
        .filter_map(|c| {
            if let Component::Normal(s) = c {
                s.to_str().map(String::from)
            } else {
                None
            }
        })
        .collect();

    match parts.last().map(String::as_str) {
        Some("mod") => {
            parts.pop();
        }
        Some("lib" | "main") if parts.len() == 1 => {
            parts.pop();
        }
        _ => {}
    }

    parts
}

/// Detects test-only files by path conventions.
pub(crate) fn is_test_file(relative_path: &Path) -> bool {
    let in_test_dir = relative_path.parent().is_some_and(|parent| {
        parent.components().any(|c| {
            matches!(c, Component::Normal(s) if s == "tests" || s == "test" || s == "benches")
        })
    });
    if in_test_dir {
        return true;
    }

    relative_path
        .file_name()
        .and_then(|n| n.to_str())
        .is_some_and(|file_name| {
            file_name.ends_with("_test.rs")
                || file_name.ends_with("_tests.rs")
                || file_name.starts_with("test_")
                || file_name == "tests.rs"
        })
}

/// Parses a namespace such as `crate::billing`, `my_crate::billing` or
/// `billing` into module segments below the crate root.
///
/// A leading `crate` or crate name is dropped; hyphens in the crate name
/// read as underscores.
pub(crate) fn parse_namespace(
    namespace: &str,
    crate_name: Option<&str>,
) -> Result<Vec<String>, DiscoveryError> {
    let invalid = |reason: &str| DiscoveryError::InvalidNamespace {
        namespace: namespace.to_string(),
        reason: reason.to_string(),
    };

    let trimmed = namespace.trim();
    if trimmed.is_empty() {
        return Err(invalid("namespace is empty"));
    }

    let mut segments: Vec<&str> = trimmed.split("::").map(str::trim).collect();
    if let Some(bad) = segments.iter().find(|s| !is_identifier(s)) {
        return Err(invalid(&format!("`{bad}` is not a module name")));
    }

    let crate_ident = crate_name.map(|n| n.replace('-', "_"));
    let first = segments[0];
    if first == "crate" || crate_ident.as_deref() == Some(first) {
        segments.remove(0);
    }

    Ok(segments.into_iter().map(String::from).collect())
}

/// Detects files that belong to other crate targets than the library:
/// anything under `bin/`, and `main.rs` when a `lib.rs` sits beside it.
pub(crate) fn is_separate_target(relative_path: &Path, has_lib: bool) -> bool {
    let mut components = relative_path.components();
    match components.next() {
        Some(Component::Normal(first)) if first == "bin" => true,
        Some(Component::Normal(first)) if first == "main.rs" => {
            has_lib && components.next().is_none()
        }
        _ => false,
    }
}

/// Renders `crate::<module>::<name>`.
pub(crate) fn qualify(module: &[String], name: &str) -> String {
    let mut path = String::from("crate");
    for segment in module {
        path.push_str("::");
        path.push_str(segment);
    }
    path.push_str("::");
    path.push_str(name);
    path
}

fn is_identifier(s: &str) -> bool {
    let s = s.strip_prefix("r#").unwrap_or(s);
    let mut chars = s.chars();
    match chars.next() {
        Some(c) if c == '_' || c.is_alphabetic() => chars.all(|c| c == '_' || c.is_alphanumeric()),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn segs(v: &[&str]) -> Vec<String> {
        v.iter().map(|s| (*s).to_string()).collect()
    }

    #[test]
    fn test_module_path() {
        assert_eq!(module_path_for(Path::new("lib.rs")), segs(&[]));
        assert_eq!(module_path_for(Path::new("main.rs")), segs(&[]));
        assert_eq!(module_path_for(Path::new("foo/mod.rs")), segs(&["foo"]));
        assert_eq!(
            module_path_for(Path::new("foo/bar.rs")),
            segs(&["foo", "bar"])
        );
        assert_eq!(
            module_path_for(Path::new("foo/lib.rs")),
            segs(&["foo", "lib"])
        );
    }

    #[test]
    fn test_detect_test_file() {
        assert!(is_test_file(Path::new("tests/foo.rs")));
        assert!(is_test_file(Path::new("foo/tests.rs")));
        assert!(is_test_file(Path::new("foo_test.rs")));
        assert!(is_test_file(Path::new("test_foo.rs")));
        assert!(!is_test_file(Path::new("foo.rs")));
        assert!(!is_test_file(Path::new("lib.rs")));
        assert!(!is_test_file(Path::new("contest.rs")));
    }

    #[test]
    fn test_parse_namespace_prefixes() {
        assert_eq!(
            parse_namespace("crate::billing", None).unwrap(),
            segs(&["billing"])
        );
        assert_eq!(
            parse_namespace("my_app::billing::tax", Some("my-app")).unwrap(),
            segs(&["billing", "tax"])
        );
        assert_eq!(
            parse_namespace("billing", Some("my-app")).unwrap(),
            segs(&["billing"])
        );
        assert!(parse_namespace("crate", None).unwrap().is_empty());
    }

    #[test]
    fn test_parse_namespace_rejects_garbage() {
        assert!(matches!(
            parse_namespace("com.acme", None),
            Err(DiscoveryError::InvalidNamespace { .. })
        ));
        assert!(parse_namespace("", None).is_err());
        assert!(parse_namespace("crate::", None).is_err());
        assert!(parse_namespace("crate::9lives", None).is_err());
    }

    #[test]
    fn test_separate_targets() {
        assert!(is_separate_target(Path::new("bin/tool.rs"), true));
        assert!(is_separate_target(Path::new("bin/tool/mod.rs"), false));
        assert!(is_separate_target(Path::new("main.rs"), true));
        assert!(!is_separate_target(Path::new("main.rs"), false));
        assert!(!is_separate_target(Path::new("lib.rs"), true));
        assert!(!is_separate_target(Path::new("billing/bin.rs"), true));
        assert!(!is_separate_target(Path::new("billing/main.rs"), true));
    }

    #[test]
    fn test_qualify() {
        assert_eq!(
            qualify(&segs(&["billing"]), "Invoice"),
            "crate::billing::Invoice"
        );
        assert_eq!(qualify(&[], "Root"), "crate::Root");
    }
}
