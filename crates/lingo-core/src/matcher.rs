//! File-selection predicates.
//!
//! A [`Matcher`] decides from a path alone whether a file is a candidate for
//! checking. Paths are relative to the directory being checked. The built-in
//! matchers are registered by [`register_builtin`]:
//!
//! | Id | Settings | Accepts |
//! |----|----------|---------|
//! | `extension` | `extensions = [".go"]` | paths with one of the extensions |
//! | `exclude` | `patterns = ["vendor/"]` | paths containing none of the substrings |
//! | `glob` | `patterns = ["**/*.go"]` | paths matching any of the globs |
//! | `gitignore` | `patterns = [...]`, `root = "."` | paths not ignored by the gitignore rules |

use std::path::{Component, Path, PathBuf};

use ignore::gitignore::{Gitignore, GitignoreBuilder};

use crate::config::PluginConfig;
use crate::registry::{MatcherRegistry, RegistryError};

/// A pure predicate over file paths.
pub trait Matcher: Send + Sync {
    /// Returns true if the file at `path`, relative to the checked
    /// directory, should be checked.
    fn matches(&self, path: &Path) -> bool;
}

/// Type alias for boxed Matcher trait objects.
pub type MatcherBox = Box<dyn Matcher>;

/// Registers the built-in matchers.
///
/// # Errors
///
/// Returns an error if any built-in identifier is already taken.
pub fn register_builtin(registry: &mut MatcherRegistry) -> Result<(), RegistryError> {
    registry.register("extension", ExtensionMatcher::from_config)?;
    registry.register("exclude", ExcludeMatcher::from_config)?;
    registry.register("glob", GlobMatcher::from_config)?;
    registry.register("gitignore", GitignoreMatcher::from_config)?;
    Ok(())
}

/// Creates a registry holding the built-in matchers.
///
/// # Errors
///
/// Returns an error if the built-in identifiers collide.
pub fn registry() -> Result<MatcherRegistry, RegistryError> {
    let mut registry = MatcherRegistry::new("matcher");
    register_builtin(&mut registry)?;
    Ok(registry)
}

fn required_list(config: &PluginConfig, key: &str) -> Result<Vec<String>, String> {
    match config.get_str_array(key) {
        Some(values) if !values.is_empty() => Ok(values),
        _ => Err(format!("`{key}` must list at least one value")),
    }
}

/// Unix-style rendering of a path, so patterns can always use `/`.
fn slash_path(path: &Path) -> String {
    path.to_string_lossy().replace('\\', "/")
}

/// Accepts files whose extension is one of a fixed set.
#[derive(Debug, Clone)]
pub struct ExtensionMatcher {
    extensions: Vec<String>,
}

impl ExtensionMatcher {
    /// Creates a matcher for the given extensions, with or without the
    /// leading dot.
    #[must_use]
    pub fn new<I, S>(extensions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            extensions: extensions
                .into_iter()
                .map(|e| e.as_ref().trim_start_matches('.').to_string())
                .collect(),
        }
    }

    fn from_config(config: &PluginConfig) -> Result<MatcherBox, String> {
        Ok(Box::new(Self::new(required_list(config, "extensions")?)))
    }
}

impl Matcher for ExtensionMatcher {
    fn matches(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|e| e.to_str())
            .is_some_and(|ext| self.extensions.iter().any(|e| e == ext))
    }
}

/// Rejects files whose path contains any of a set of substrings.
#[derive(Debug, Clone)]
pub struct ExcludeMatcher {
    patterns: Vec<String>,
}

impl ExcludeMatcher {
    /// Creates a matcher rejecting paths that contain any of `patterns`.
    #[must_use]
    pub fn new<I, S>(patterns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            patterns: patterns.into_iter().map(Into::into).collect(),
        }
    }

    fn from_config(config: &PluginConfig) -> Result<MatcherBox, String> {
        Ok(Box::new(Self::new(required_list(config, "patterns")?)))
    }
}

impl Matcher for ExcludeMatcher {
    fn matches(&self, path: &Path) -> bool {
        let path = slash_path(path);
        !self.patterns.iter().any(|p| path.contains(p.as_str()))
    }
}

/// Accepts files matching any of a set of glob patterns.
#[derive(Debug, Clone)]
pub struct GlobMatcher {
    patterns: Vec<glob::Pattern>,
}

impl GlobMatcher {
    /// Compiles the given glob patterns.
    ///
    /// # Errors
    ///
    /// Returns the first pattern that fails to compile.
    pub fn new<I, S>(patterns: I) -> Result<Self, glob::PatternError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let patterns = patterns
            .into_iter()
            .map(|p| glob::Pattern::new(p.as_ref()))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { patterns })
    }

    fn from_config(config: &PluginConfig) -> Result<MatcherBox, String> {
        let patterns = required_list(config, "patterns")?;
        let matcher = Self::new(&patterns).map_err(|e| e.to_string())?;
        Ok(Box::new(matcher))
    }
}

impl Matcher for GlobMatcher {
    fn matches(&self, path: &Path) -> bool {
        let path = slash_path(path);
        self.patterns.iter().any(|p| p.matches(&path))
    }
}

/// Rejects files ignored by gitignore-style rules anchored at a
/// subdirectory of the checked directory. Files outside it are accepted.
#[derive(Debug, Clone)]
pub struct GitignoreMatcher {
    root: PathBuf,
    gitignore: Gitignore,
}

impl GitignoreMatcher {
    /// Builds the matcher from gitignore lines anchored at `root`, a path
    /// relative to the checked directory (`.` for the directory itself).
    ///
    /// # Errors
    ///
    /// Returns an error if a line is not a valid gitignore pattern.
    pub fn new<I, S>(root: &Path, lines: I) -> Result<Self, ignore::Error>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let root: PathBuf = root
            .components()
            .filter(|c| !matches!(c, Component::CurDir))
            .collect();
        let anchor = if root.as_os_str().is_empty() {
            Path::new(".")
        } else {
            root.as_path()
        };

        let mut builder = GitignoreBuilder::new(anchor);
        for line in lines {
            builder.add_line(None, line.as_ref())?;
        }
        Ok(Self {
            gitignore: builder.build()?,
            root,
        })
    }

    fn from_config(config: &PluginConfig) -> Result<MatcherBox, String> {
        let lines = required_list(config, "patterns")?;
        let root = Path::new(config.get_str("root").unwrap_or("."));
        if root.is_absolute() {
            return Err("`root` must be relative to the checked directory".into());
        }
        let matcher = Self::new(root, &lines).map_err(|e| e.to_string())?;
        Ok(Box::new(matcher))
    }
}

impl Matcher for GitignoreMatcher {
    fn matches(&self, path: &Path) -> bool {
        if !path.starts_with(&self.root) {
            return true;
        }
        !self
            .gitignore
            .matched_path_or_any_parents(path, false)
            .is_ignore()
    }
}
