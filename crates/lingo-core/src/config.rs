//! Configuration types for lingo.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Default number of paths buffered between the directory walk and the
/// checker.
pub const DEFAULT_QUEUE_CAPACITY: usize = 64;

/// Top-level configuration for lingo.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Analyzer configuration.
    #[serde(default)]
    pub analyzer: AnalyzerConfig,

    /// File matchers, all of which must accept a path for it to be checked.
    #[serde(default)]
    pub matchers: Vec<MatcherSpec>,

    /// Checker configurations keyed by checker identifier, in file order.
    #[serde(default)]
    pub checkers: toml::Table,
}

impl Config {
    /// Creates a new empty configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;
        Self::parse(&content)
    }

    /// Parses configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML is invalid.
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|e| ConfigError::Parse {
            message: e.to_string(),
        })
    }

    /// The configuration used when no config file exists: Go files outside
    /// `vendor/` directories, checked by every given checker with default
    /// settings.
    #[must_use]
    pub fn recommended<I, S>(checkers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut extension = toml::Table::new();
        extension.insert(
            "extensions".into(),
            toml::Value::Array(vec![toml::Value::String(".go".into())]),
        );
        let mut exclude = toml::Table::new();
        exclude.insert(
            "patterns".into(),
            toml::Value::Array(vec![toml::Value::String("vendor/".into())]),
        );

        Self {
            analyzer: AnalyzerConfig::default(),
            matchers: vec![
                MatcherSpec::new("extension", PluginConfig::from_table(extension)),
                MatcherSpec::new("exclude", PluginConfig::from_table(exclude)),
            ],
            checkers: checkers
                .into_iter()
                .map(|id| (id.into(), toml::Value::Table(toml::Table::new())))
                .collect(),
        }
    }

    /// Returns the configured checkers in file order.
    ///
    /// # Errors
    ///
    /// Returns an error if a checker's settings are not a table.
    pub fn checker_configs(&self) -> Result<Vec<(String, PluginConfig)>, ConfigError> {
        self.checkers
            .iter()
            .map(|(id, value)| {
                PluginConfig::from_value(value)
                    .map(|config| (id.clone(), config))
                    .map_err(|message| ConfigError::Parse {
                        message: format!("checkers.{id}: {message}"),
                    })
            })
            .collect()
    }
}

/// Analyzer-level configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalyzerConfig {
    /// Abort the whole run on the first file that fails to parse.
    #[serde(default)]
    pub fail_on_parse_error: bool,

    /// Capacity of the queue between the directory walk and the checker.
    #[serde(default = "default_queue_capacity")]
    pub queue_capacity: usize,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            fail_on_parse_error: false,
            queue_capacity: DEFAULT_QUEUE_CAPACITY,
        }
    }
}

fn default_queue_capacity() -> usize {
    DEFAULT_QUEUE_CAPACITY
}

/// A matcher entry: which matcher to build and its settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatcherSpec {
    /// Matcher identifier.
    #[serde(rename = "type")]
    pub kind: String,

    /// Matcher settings.
    #[serde(default)]
    pub config: PluginConfig,
}

impl MatcherSpec {
    /// Creates a new matcher entry.
    #[must_use]
    pub fn new(kind: impl Into<String>, config: PluginConfig) -> Self {
        Self {
            kind: kind.into(),
            config,
        }
    }
}

/// Settings handed to a checker or matcher constructor.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PluginConfig {
    /// Key-value settings.
    pub options: toml::Table,
}

impl PluginConfig {
    /// Creates empty settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Wraps an existing table.
    #[must_use]
    pub fn from_table(options: toml::Table) -> Self {
        Self { options }
    }

    /// Converts a raw config value. Only tables are accepted.
    ///
    /// # Errors
    ///
    /// Returns a description of the value if it is not a table.
    pub fn from_value(value: &toml::Value) -> Result<Self, String> {
        match value {
            toml::Value::Table(table) => Ok(Self::from_table(table.clone())),
            other => Err(format!("expected a table, found {}", other.type_str())),
        }
    }

    /// Adds a setting.
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<toml::Value>) -> Self {
        self.options.insert(key.into(), value.into());
        self
    }

    /// Gets a boolean option with a default value.
    #[must_use]
    pub fn get_bool(&self, key: &str, default: bool) -> bool {
        self.options
            .get(key)
            .and_then(toml::Value::as_bool)
            .unwrap_or(default)
    }

    /// Gets a string option.
    #[must_use]
    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.options.get(key).and_then(toml::Value::as_str)
    }

    /// Gets a list of strings. A single string is read as a one-element
    /// list; a missing key yields `None`.
    #[must_use]
    pub fn get_str_array(&self, key: &str) -> Option<Vec<String>> {
        match self.options.get(key)? {
            toml::Value::String(s) => Some(vec![s.clone()]),
            toml::Value::Array(arr) => Some(
                arr.iter()
                    .filter_map(|v| v.as_str().map(String::from))
                    .collect(),
            ),
            _ => None,
        }
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// IO error reading config file.
    #[error("Failed to read config file {path}: {source}")]
    Io {
        /// Path that failed to read.
        path: PathBuf,
        /// Underlying IO error.
        source: std::io::Error,
    },

    /// Parse error in config file.
    #[error("Failed to parse config: {message}")]
    Parse {
        /// Parse error message.
        message: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert!(!config.analyzer.fail_on_parse_error);
        assert_eq!(config.analyzer.queue_capacity, DEFAULT_QUEUE_CAPACITY);
        assert!(config.matchers.is_empty());
        assert!(config.checkers.is_empty());
    }

    #[test]
    fn test_parse_config() {
        let toml = r#"
[analyzer]
fail_on_parse_error = true
queue_capacity = 8

[[matchers]]
type = "extension"
config = { extensions = [".go"] }

[[matchers]]
type = "exclude"
config = { patterns = ["vendor/"] }

[checkers.zeta]

[checkers.return_error_last]

[checkers.alpha]
strict = true
"#;

        let config = Config::parse(toml).expect("Failed to parse");
        assert!(config.analyzer.fail_on_parse_error);
        assert_eq!(config.analyzer.queue_capacity, 8);

        let kinds: Vec<&str> = config.matchers.iter().map(|m| m.kind.as_str()).collect();
        assert_eq!(kinds, vec!["extension", "exclude"]);
        assert_eq!(
            config.matchers[0].config.get_str_array("extensions"),
            Some(vec![".go".to_string()])
        );

        let checkers = config.checker_configs().expect("tables");
        let ids: Vec<&str> = checkers.iter().map(|(id, _)| id.as_str()).collect();
        assert_eq!(ids, vec!["zeta", "return_error_last", "alpha"]);
        assert!(checkers[2].1.get_bool("strict", false));
    }

    #[test]
    fn test_matcher_without_config() {
        let config = Config::parse("[[matchers]]\ntype = \"glob\"\n").expect("Failed to parse");
        assert_eq!(config.matchers[0].config, PluginConfig::new());
    }

    #[test]
    fn test_non_table_checker_config_is_rejected() {
        let config = Config::parse("[checkers]\nreturn_error_last = 3\n").expect("Failed to parse");
        let err = config.checker_configs().expect_err("integer settings");
        assert!(err.to_string().contains("checkers.return_error_last"));
    }

    #[test]
    fn test_invalid_toml() {
        assert!(matches!(
            Config::parse("[[matchers]\n"),
            Err(ConfigError::Parse { .. })
        ));
    }

    #[test]
    fn test_recommended_config() {
        let config = Config::recommended(["return_error_last"]);
        assert_eq!(config.matchers.len(), 2);
        assert!(config.checkers.contains_key("return_error_last"));
    }

    #[test]
    fn test_str_array_accepts_single_string() {
        let config = PluginConfig::new().with("extensions", ".go");
        assert_eq!(
            config.get_str_array("extensions"),
            Some(vec![".go".to_string()])
        );
        assert_eq!(config.get_str_array("missing"), None);
    }
}
