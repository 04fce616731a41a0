//! Configuration file resolution with global fallback.
//!
//! Resolves the configuration file path using a deterministic priority order:
//!
//! 1. `--config` flag (explicit path)
//! 2. `{project}/lingo.toml` or `.lingo.toml`
//! 3. `$LINGO_CONFIG_DIR/config.toml`, else `~/.lingo/config.toml`
//! 4. No config found → the recommended configuration

use anyhow::{Context, Result};
use lingo_core::{Config, RuleRegistry};
use std::path::{Path, PathBuf};

/// Where the configuration was found.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    /// Explicitly specified via `--config` flag.
    Explicit(PathBuf),
    /// Found in the checked directory.
    Project(PathBuf),
    /// Loaded from the global config directory.
    Global(PathBuf),
    /// No config found; the recommended configuration applies.
    Recommended,
}

impl ConfigSource {
    /// Returns the resolved path, if any.
    #[must_use]
    pub fn path(&self) -> Option<&Path> {
        match self {
            Self::Explicit(p) | Self::Project(p) | Self::Global(p) => Some(p),
            Self::Recommended => None,
        }
    }

    /// Loads the configuration this source points at.
    ///
    /// The recommended configuration enables every checker in `checkers`.
    pub fn load(&self, checkers: &RuleRegistry) -> Result<Config> {
        let Some(path) = self.path() else {
            tracing::debug!("No config file found, using recommended settings");
            return Ok(Config::recommended(checkers.ids()));
        };

        if matches!(self, Self::Global(_)) {
            tracing::info!("Using global config: {}", path.display());
        }
        Config::from_file(path)
            .with_context(|| format!("Failed to load config: {}", path.display()))
    }
}

/// Project-level config file names, checked in order.
const PROJECT_CONFIG_NAMES: &[&str] = &["lingo.toml", ".lingo.toml"];

/// Config file name within the global config directory.
const GLOBAL_CONFIG_NAME: &str = "config.toml";

/// Resolves the configuration file for checking `project_dir`.
#[must_use]
pub fn resolve(project_dir: &Path, explicit: Option<&Path>) -> ConfigSource {
    resolve_in(project_dir, explicit, global_config_dir().as_deref())
}

fn resolve_in(
    project_dir: &Path,
    explicit: Option<&Path>,
    global_dir: Option<&Path>,
) -> ConfigSource {
    if let Some(p) = explicit {
        return ConfigSource::Explicit(p.to_path_buf());
    }

    if let Some(found) = PROJECT_CONFIG_NAMES
        .iter()
        .map(|name| project_dir.join(name))
        .find(|candidate| candidate.is_file())
    {
        tracing::debug!("Found project config: {}", found.display());
        return ConfigSource::Project(found);
    }

    match global_dir.map(|dir| dir.join(GLOBAL_CONFIG_NAME)) {
        Some(candidate) if candidate.is_file() => {
            tracing::debug!("Found global config: {}", candidate.display());
            ConfigSource::Global(candidate)
        }
        _ => ConfigSource::Recommended,
    }
}

/// Returns the global config directory: `$LINGO_CONFIG_DIR`, else
/// `~/.lingo/`.
#[must_use]
pub fn global_config_dir() -> Option<PathBuf> {
    match std::env::var_os("LINGO_CONFIG_DIR") {
        Some(dir) if !dir.is_empty() => Some(PathBuf::from(dir)),
        _ => home::home_dir().map(|h| h.join(".lingo")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn checkers() -> RuleRegistry {
        lingo_checkers::registry().unwrap()
    }

    #[test]
    fn explicit_wins_without_existence_check() {
        let project = TempDir::new().unwrap();
        fs::write(project.path().join("lingo.toml"), "").unwrap();

        let result = resolve_in(project.path(), Some(Path::new("/nonexistent.toml")), None);
        assert_eq!(
            result,
            ConfigSource::Explicit(PathBuf::from("/nonexistent.toml"))
        );
    }

    #[test]
    fn project_names_in_priority_order() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join(".lingo.toml"), "").unwrap();
        assert_eq!(
            resolve_in(tmp.path(), None, None),
            ConfigSource::Project(tmp.path().join(".lingo.toml"))
        );

        fs::write(tmp.path().join("lingo.toml"), "").unwrap();
        assert_eq!(
            resolve_in(tmp.path(), None, None),
            ConfigSource::Project(tmp.path().join("lingo.toml"))
        );
    }

    #[test]
    fn directory_named_like_config_is_ignored() {
        let tmp = TempDir::new().unwrap();
        fs::create_dir(tmp.path().join("lingo.toml")).unwrap();
        assert_eq!(resolve_in(tmp.path(), None, None), ConfigSource::Recommended);
    }

    #[test]
    fn global_is_the_fallback() {
        let project = TempDir::new().unwrap();
        let global = TempDir::new().unwrap();
        assert_eq!(
            resolve_in(project.path(), None, Some(global.path())),
            ConfigSource::Recommended
        );

        fs::write(global.path().join("config.toml"), "").unwrap();
        assert_eq!(
            resolve_in(project.path(), None, Some(global.path())),
            ConfigSource::Global(global.path().join("config.toml"))
        );

        fs::write(project.path().join("lingo.toml"), "").unwrap();
        assert!(matches!(
            resolve_in(project.path(), None, Some(global.path())),
            ConfigSource::Project(_)
        ));
    }

    #[test]
    fn recommended_enables_every_checker() {
        let config = ConfigSource::Recommended.load(&checkers()).unwrap();
        assert!(config.checkers.contains_key("return_error_last"));
        assert_eq!(config.matchers.len(), 2);
    }

    #[test]
    fn load_reads_the_file() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("lingo.toml");
        fs::write(&path, "[analyzer]\nfail_on_parse_error = true\n").unwrap();

        let config = ConfigSource::Project(path).load(&checkers()).unwrap();
        assert!(config.analyzer.fail_on_parse_error);
        assert!(config.checkers.is_empty());
    }

    #[test]
    fn load_reports_missing_explicit_file() {
        let err = ConfigSource::Explicit(PathBuf::from("/nonexistent/lingo.toml"))
            .load(&checkers())
            .unwrap_err();
        assert!(format!("{err:#}").contains("/nonexistent/lingo.toml"));
    }
}
