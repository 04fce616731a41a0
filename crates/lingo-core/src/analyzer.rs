//! Core analyzer for orchestrating lint execution.

use crate::config::{Config, DEFAULT_QUEUE_CAPACITY};
use crate::feeder::{FeedError, Feeder};
use crate::matcher::{Matcher, MatcherBox};
use crate::parser::{GoParser, ParseError};
use crate::registry::{MatcherRegistry, RegistryError, RuleRegistry};
use crate::rule::{Rule, RuleBox};
use crate::types::{FileReport, LintResult, ParseFailure, Report};
use crate::walker::SyntaxWalker;

use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info, warn};

/// Errors that can occur during analysis.
#[derive(Debug, Error)]
pub enum AnalyzerError {
    /// A candidate file could not be read.
    #[error("Failed to read {path}: {source}")]
    Read {
        /// Path of the file.
        path: PathBuf,
        /// Underlying IO error.
        source: std::io::Error,
    },

    /// A candidate file failed to parse.
    #[error("Parse error in {path}: {source}")]
    Parse {
        /// Path of the file.
        path: PathBuf,
        /// What the parser reported.
        source: ParseError,
    },

    /// The Go parser could not be set up.
    #[error("Parser unavailable: {0}")]
    Parser(ParseError),

    /// File discovery could not start.
    #[error(transparent)]
    Feed(#[from] FeedError),

    /// A configured checker or matcher could not be resolved.
    #[error(transparent)]
    Registry(#[from] RegistryError),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(#[from] crate::config::ConfigError),
}

impl AnalyzerError {
    /// Returns true for errors that concern a single file and may be
    /// isolated instead of aborting the run.
    #[must_use]
    pub fn is_per_file(&self) -> bool {
        matches!(self, Self::Read { .. } | Self::Parse { .. })
    }
}

/// Builder for configuring an [`Analyzer`].
pub struct AnalyzerBuilder {
    root: Option<PathBuf>,
    rules: Vec<RuleBox>,
    matchers: Vec<MatcherBox>,
    queue_capacity: usize,
    fail_on_parse_error: bool,
}

impl Default for AnalyzerBuilder {
    fn default() -> Self {
        Self {
            root: None,
            rules: Vec::new(),
            matchers: Vec::new(),
            queue_capacity: DEFAULT_QUEUE_CAPACITY,
            fail_on_parse_error: false,
        }
    }
}

impl AnalyzerBuilder {
    /// Creates a new builder with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolves every checker and matcher named in `config`.
    ///
    /// Checkers are added in the order the configuration lists them,
    /// matchers likewise.
    ///
    /// # Errors
    ///
    /// Returns the first identifier that is unknown or whose settings are
    /// rejected. Nothing has been read from disk at that point.
    pub fn from_config(
        config: &Config,
        rules: &RuleRegistry,
        matchers: &MatcherRegistry,
    ) -> Result<Self, AnalyzerError> {
        let mut builder = Self::new()
            .queue_capacity(config.analyzer.queue_capacity)
            .fail_on_parse_error(config.analyzer.fail_on_parse_error);

        for spec in &config.matchers {
            builder = builder.matcher_box(matchers.get(&spec.kind, &spec.config)?);
        }
        for (id, settings) in config.checker_configs()? {
            builder = builder.rule_box(rules.get(&id, &settings)?);
        }

        Ok(builder)
    }

    /// Sets the root directory to analyze.
    #[must_use]
    pub fn root(mut self, path: impl Into<PathBuf>) -> Self {
        self.root = Some(path.into());
        self
    }

    /// Adds a rule to the analyzer.
    #[must_use]
    pub fn rule<R: Rule + 'static>(mut self, rule: R) -> Self {
        self.rules.push(Box::new(rule));
        self
    }

    /// Adds a boxed rule to the analyzer.
    #[must_use]
    pub fn rule_box(mut self, rule: RuleBox) -> Self {
        self.rules.push(rule);
        self
    }

    /// Adds a file matcher. A file is checked only if every matcher accepts
    /// it.
    #[must_use]
    pub fn matcher<M: Matcher + 'static>(mut self, matcher: M) -> Self {
        self.matchers.push(Box::new(matcher));
        self
    }

    /// Adds a boxed file matcher.
    #[must_use]
    pub fn matcher_box(mut self, matcher: MatcherBox) -> Self {
        self.matchers.push(matcher);
        self
    }

    /// Sets how many discovered paths may wait for the checker.
    #[must_use]
    pub fn queue_capacity(mut self, capacity: usize) -> Self {
        self.queue_capacity = capacity;
        self
    }

    /// Sets whether to fail on parse errors (default: false).
    #[must_use]
    pub fn fail_on_parse_error(mut self, fail: bool) -> Self {
        self.fail_on_parse_error = fail;
        self
    }

    /// Builds the analyzer.
    ///
    /// Every rule's registration hook runs here.
    #[must_use]
    pub fn build(self) -> Analyzer {
        let walker = self
            .rules
            .into_iter()
            .fold(SyntaxWalker::builder(), |builder, rule| {
                builder.rule_box(rule)
            })
            .build();

        Analyzer {
            root: self.root.unwrap_or_else(|| PathBuf::from(".")),
            walker,
            feeder: Feeder::new(self.matchers).with_capacity(self.queue_capacity),
            fail_on_parse_error: self.fail_on_parse_error,
        }
    }
}

/// The main analyzer that orchestrates lint execution.
///
/// Use [`Analyzer::builder()`] to construct an instance.
pub struct Analyzer {
    root: PathBuf,
    walker: SyntaxWalker,
    feeder: Feeder,
    fail_on_parse_error: bool,
}

impl Analyzer {
    /// Creates a new builder for configuring an analyzer.
    #[must_use]
    pub fn builder() -> AnalyzerBuilder {
        AnalyzerBuilder::new()
    }

    /// Returns the root directory being analyzed.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Returns the number of registered rules.
    #[must_use]
    pub fn rule_count(&self) -> usize {
        self.walker.rules().len()
    }

    /// Returns the active rules in registration order.
    #[must_use]
    pub fn rules(&self) -> &[RuleBox] {
        self.walker.rules()
    }

    /// Analyzes all candidate files under the root.
    ///
    /// Files are checked one at a time in discovery order. A file that
    /// cannot be read or parsed is recorded as a [`ParseFailure`] unless the
    /// analyzer was built with `fail_on_parse_error`, in which case the run
    /// stops and discovery is cancelled.
    ///
    /// # Errors
    ///
    /// Returns an error if the root cannot be read, or on the first
    /// unreadable file when failing on parse errors.
    pub fn analyze(&self) -> Result<LintResult, AnalyzerError> {
        info!("Starting analysis at {}", self.root.display());

        let mut parser = GoParser::new().map_err(AnalyzerError::Parser)?;
        let mut result = LintResult::new();

        for path in self.feeder.feed(&self.root)? {
            match self.analyze_file(&mut parser, &path) {
                Ok(report) => {
                    debug!("{}: {} violations", path.display(), report.len());
                    result.reports.push(FileReport { path, report });
                }
                Err(err) if err.is_per_file() && !self.fail_on_parse_error => {
                    warn!("Skipping {}: {}", path.display(), err);
                    result.parse_failures.push(parse_failure(path, &err));
                }
                Err(err) => return Err(err),
            }
        }

        info!(
            "Analysis complete: {} violations in {} files",
            result.total_violations(),
            result.files_checked()
        );

        Ok(result)
    }

    /// Checks Go source text that did not come from the file system.
    ///
    /// # Errors
    ///
    /// Returns the parse error if `source` is not valid Go.
    pub fn check_source(&self, source: &str) -> Result<Report, ParseError> {
        let mut parser = GoParser::new()?;
        let tree = parser.parse(source)?;
        let mut report = Report::new();
        self.walker.check(tree.root_node(), source, &mut report);
        Ok(report)
    }

    /// Analyzes a single file and returns its report.
    fn analyze_file(&self, parser: &mut GoParser, path: &Path) -> Result<Report, AnalyzerError> {
        debug!("Analyzing: {}", path.display());

        let content = std::fs::read_to_string(path).map_err(|e| AnalyzerError::Read {
            path: path.to_path_buf(),
            source: e,
        })?;
        let tree = parser.parse(&content).map_err(|e| AnalyzerError::Parse {
            path: path.to_path_buf(),
            source: e,
        })?;

        let mut report = Report::new();
        self.walker.check(tree.root_node(), &content, &mut report);
        Ok(report)
    }
}

fn parse_failure(path: PathBuf, err: &AnalyzerError) -> ParseFailure {
    match err {
        AnalyzerError::Parse {
            source:
                ParseError::Syntax {
                    line,
                    column,
                    message,
                },
            ..
        } => ParseFailure {
            path,
            line: *line,
            column: *column,
            message: message.clone(),
        },
        AnalyzerError::Read { source, .. } => ParseFailure {
            path,
            line: 1,
            column: 1,
            message: source.to_string(),
        },
        other => ParseFailure {
            path,
            line: 1,
            column: 1,
            message: other.to_string(),
        },
    }
}
