//! Internal runner for `check!()` macro integration.
//!
//! This module is `#[doc(hidden)]` and not part of the public API.
//! It is called by the generated test function from `term_lint::check!()`.

use std::path::{Path, PathBuf};

use term_lint_core::{Config, ConfigError, SourceDiscovery, TermRule};
use tracing::{debug, warn};
use tracing_subscriber::EnvFilter;

/// Config file names to search for, in priority order.
const CONFIG_CANDIDATES: &[&str] = &["term-lint.toml", ".term-lint.toml"];

/// Runs term-lint on a crate as part of `cargo test`.
///
/// Called by the `check!()` macro-generated test function with the
/// invoking crate's manifest directory and package name.
///
/// # Panics
///
/// Panics with a formatted report if a forbidden term is found, if
/// discovery fails, or if the config file cannot be loaded.
pub fn run_check(manifest_dir: &str, crate_name: &str, config_path: Option<&str>) {
    init_tracing();

    let manifest_dir = Path::new(manifest_dir);
    let config = load_config(manifest_dir, config_path).unwrap_or_else(|e| {
        panic!("term-lint: {e}");
    });
    if config.namespaces.is_empty() {
        warn!("No namespaces configured for {}; nothing to check", crate_name);
    }

    let discovery = SourceDiscovery::from_config(manifest_dir, Some(crate_name), &config.source);
    debug!("Checking {} under {}", crate_name, discovery.root().display());

    let rule = TermRule::from_config(&config).discovery(discovery);
    if let Err(violation) = rule.check() {
        panic!("{}", violation.format_report());
    }
}

/// Installs a test-friendly subscriber; `RUST_LOG` overrides the `warn`
/// default. Later calls are no-ops.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_test_writer()
        .try_init();
}

/// Loads the config: an explicit path (relative to the manifest directory),
/// else the first config candidate present, else defaults.
fn load_config(manifest_dir: &Path, explicit_path: Option<&str>) -> Result<Config, ConfigError> {
    if let Some(path) = explicit_path {
        return Config::from_file(&resolve(manifest_dir, path));
    }

    for candidate in CONFIG_CANDIDATES {
        let path = manifest_dir.join(candidate);
        if path.exists() {
            debug!("Using config {}", path.display());
            return Config::from_file(&path);
        }
    }

    debug!("No config file found in {}", manifest_dir.display());
    Ok(Config::default())
}

fn resolve(manifest_dir: &Path, path: &str) -> PathBuf {
    if Path::new(path).is_absolute() {
        PathBuf::from(path)
    } else {
        manifest_dir.join(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn crate_dir(config: Option<(&str, &str)>, lib: &str) -> TempDir {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir_all(dir.path().join("src")).unwrap();
        fs::write(dir.path().join("src/lib.rs"), lib).unwrap();
        if let Some((name, content)) = config {
            fs::write(dir.path().join(name), content).unwrap();
        }
        dir
    }

    fn path_str(dir: &TempDir) -> &str {
        dir.path().to_str().unwrap()
    }

    // ── Config loading ──

    #[test]
    fn load_config_defaults_without_file() {
        let dir = crate_dir(None, "");
        let config = load_config(dir.path(), None).unwrap();
        assert!(config.namespaces.is_empty());
        assert!(config.terms.is_empty());
    }

    #[test]
    fn load_config_finds_default_name() {
        let dir = crate_dir(Some(("term-lint.toml", "terms = [\"temp\"]")), "");
        let config = load_config(dir.path(), None).unwrap();
        assert_eq!(config.terms, vec!["temp"]);
    }

    #[test]
    fn load_config_finds_hidden_name() {
        let dir = crate_dir(Some((".term-lint.toml", "terms = [\"wip\"]")), "");
        let config = load_config(dir.path(), None).unwrap();
        assert_eq!(config.terms, vec!["wip"]);
    }

    #[test]
    fn load_config_explicit_path_wins() {
        let dir = crate_dir(Some(("term-lint.toml", "terms = [\"temp\"]")), "");
        fs::write(dir.path().join("custom.toml"), "terms = [\"draft\"]").unwrap();

        let config = load_config(dir.path(), Some("custom.toml")).unwrap();
        assert_eq!(config.terms, vec!["draft"]);
    }

    #[test]
    fn load_config_missing_explicit_path_fails() {
        let dir = crate_dir(None, "");
        let err = load_config(dir.path(), Some("missing.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }

    #[test]
    fn load_config_invalid_toml_fails() {
        let dir = crate_dir(Some(("term-lint.toml", "terms = temp")), "");
        let err = load_config(dir.path(), None).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }

    #[test]
    fn resolve_keeps_absolute_paths() {
        let dir = crate_dir(None, "");
        let absolute = dir.path().join("x.toml");
        assert_eq!(
            resolve(Path::new("/elsewhere"), absolute.to_str().unwrap()),
            absolute
        );
        assert_eq!(
            resolve(Path::new("/base"), "x.toml"),
            PathBuf::from("/base/x.toml")
        );
    }

    // ── Running ──

    const CONFIG: &str = r#"
namespaces = ["crate"]
terms = ["temp"]
"#;

    #[test]
    fn run_check_passes_clean_crate() {
        let dir = crate_dir(
            Some(("term-lint.toml", CONFIG)),
            "pub struct Invoice { total: u64 }\n",
        );
        run_check(path_str(&dir), "clean-app", None);
    }

    #[test]
    #[should_panic(expected = "Class name contains blacklisted term: TempInvoice")]
    fn run_check_panics_on_violation() {
        let dir = crate_dir(Some(("term-lint.toml", CONFIG)), "pub struct TempInvoice;\n");
        run_check(path_str(&dir), "dirty-app", None);
    }

    #[test]
    #[should_panic(expected = "caused by")]
    fn run_check_reports_discovery_cause() {
        let dir = crate_dir(Some(("term-lint.toml", CONFIG)), "pub struct Broken {\n");
        run_check(path_str(&dir), "broken-app", None);
    }

    #[test]
    #[should_panic(expected = "term-lint: Failed to read config")]
    fn run_check_panics_on_missing_config() {
        let dir = crate_dir(None, "");
        run_check(path_str(&dir), "app", Some("nope.toml"));
    }

    #[test]
    fn run_check_without_config_passes() {
        let dir = crate_dir(None, "pub struct TempInvoice;\n");
        run_check(path_str(&dir), "app", None);
    }
}
