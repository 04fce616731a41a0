//! Core types for violations, per-file reports and run results.

use serde::Serialize;
use std::path::PathBuf;

/// Source position of a violation.
///
/// Positions always carry the byte offset into the original text; line and
/// column are resolved against that text when the position is created.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct Position {
    /// Byte offset from the start of the file.
    pub offset: usize,
    /// Line number (1-indexed).
    pub line: usize,
    /// Column number (1-indexed, in bytes).
    pub column: usize,
}

impl Position {
    /// Creates a position with explicit values.
    #[must_use]
    pub fn new(offset: usize, line: usize, column: usize) -> Self {
        Self {
            offset,
            line,
            column,
        }
    }

    /// Returns the start position of a syntax node.
    #[must_use]
    pub fn of(node: &tree_sitter::Node<'_>) -> Self {
        let point = node.start_position();
        Self {
            offset: node.start_byte(),
            line: point.row + 1,
            column: point.column + 1,
        }
    }
}

/// A single violation reported by a rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Violation {
    /// Identifier of the rule that produced this violation.
    pub rule: String,
    /// Where the violation was found.
    pub position: Position,
    /// Human-readable message.
    pub message: String,
}

impl Violation {
    /// Creates a new violation.
    #[must_use]
    pub fn new(rule: impl Into<String>, position: Position, message: impl Into<String>) -> Self {
        Self {
            rule: rule.into(),
            position,
            message: message.into(),
        }
    }
}

impl std::fmt::Display for Violation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}:{}: [{}] {}",
            self.position.line, self.position.column, self.rule, self.message
        )
    }
}

/// Ordered violations collected during the traversal of one file.
///
/// A report belongs to exactly one traversal. Rules only ever append to it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Report {
    violations: Vec<Violation>,
}

impl Report {
    /// Creates an empty report.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a violation.
    pub fn push(&mut self, violation: Violation) {
        self.violations.push(violation);
    }

    /// Returns the violations in the order they were reported.
    #[must_use]
    pub fn violations(&self) -> &[Violation] {
        &self.violations
    }

    /// Number of violations.
    #[must_use]
    pub fn len(&self) -> usize {
        self.violations.len()
    }

    /// Returns true if nothing was reported.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.violations.is_empty()
    }
}

/// The report of a single checked file.
#[derive(Debug, Clone, Serialize)]
pub struct FileReport {
    /// Absolute path of the file.
    pub path: PathBuf,
    /// Violations found in the file.
    pub report: Report,
}

/// A file that was fed but could not be parsed.
#[derive(Debug, Clone, Serialize)]
pub struct ParseFailure {
    /// Absolute path of the file.
    pub path: PathBuf,
    /// Line of the first syntax error (1-indexed).
    pub line: usize,
    /// Column of the first syntax error (1-indexed).
    pub column: usize,
    /// Description of the failure.
    pub message: String,
}

/// Result of a complete run.
#[derive(Debug, Default, Serialize)]
pub struct LintResult {
    /// One report per checked file, in feed order.
    pub reports: Vec<FileReport>,
    /// Files skipped because they failed to parse.
    pub parse_failures: Vec<ParseFailure>,
}

impl LintResult {
    /// Creates a new empty result.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of files that were parsed and checked.
    #[must_use]
    pub fn files_checked(&self) -> usize {
        self.reports.len()
    }

    /// Total number of violations across all files.
    #[must_use]
    pub fn total_violations(&self) -> usize {
        self.reports.iter().map(|r| r.report.len()).sum()
    }

    /// Reports that contain at least one violation.
    pub fn files_with_violations(&self) -> impl Iterator<Item = &FileReport> {
        self.reports.iter().filter(|r| !r.report.is_empty())
    }

    /// Returns true if any violation was found.
    #[must_use]
    pub fn has_violations(&self) -> bool {
        self.reports.iter().any(|r| !r.report.is_empty())
    }

    /// Returns true if the run should be reported as failed: any violation or
    /// any file that could not be parsed.
    #[must_use]
    pub fn is_failure(&self) -> bool {
        self.has_violations() || !self.parse_failures.is_empty()
    }
}
