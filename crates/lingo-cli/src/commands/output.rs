//! Shared output formatting for lint results.

use anyhow::Result;
use lingo_core::LintResult;
use std::fmt::Write as _;
use std::io::Write as _;

use crate::OutputFormat;

/// Print lint results in the specified format.
pub fn print(result: &LintResult, format: OutputFormat) -> Result<()> {
    let rendered = match format {
        OutputFormat::Text => render_text(result),
        OutputFormat::Json => serde_json::to_string_pretty(result)? + "\n",
        OutputFormat::Compact => render_compact(result),
    };
    std::io::stdout().lock().write_all(rendered.as_bytes())?;
    Ok(())
}

/// Each offending file followed by its violations, then a summary line
/// counting every checked file.
fn render_text(result: &LintResult) -> String {
    let mut out = String::new();

    for file in result.files_with_violations() {
        let _ = writeln!(out, "{}", file.path.display());
        for violation in file.report.violations() {
            let _ = writeln!(
                out,
                "\t- line {}: {}",
                violation.position.line, violation.message
            );
        }
        out.push('\n');
    }

    for failure in &result.parse_failures {
        let _ = writeln!(out, "{}", failure.path.display());
        let _ = writeln!(
            out,
            "\t- line {}: parse error: {}\n",
            failure.line, failure.message
        );
    }

    let _ = writeln!(
        out,
        "{} violations found in {} files",
        result.total_violations(),
        result.files_checked()
    );
    if !result.parse_failures.is_empty() {
        let _ = writeln!(
            out,
            "{} files could not be parsed",
            result.parse_failures.len()
        );
    }

    out
}

fn render_compact(result: &LintResult) -> String {
    let mut out = String::new();
    for file in &result.reports {
        for violation in file.report.violations() {
            let _ = writeln!(out, "{}:{violation}", file.path.display());
        }
    }
    for failure in &result.parse_failures {
        let _ = writeln!(
            out,
            "{}:{}:{}: [parse] {}",
            failure.path.display(),
            failure.line,
            failure.column,
            failure.message
        );
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use lingo_core::{FileReport, ParseFailure, Position, Report, Violation};
    use std::path::PathBuf;

    fn sample() -> LintResult {
        let mut report = Report::new();
        report.push(Violation::new(
            "return_error_last",
            Position::new(14, 3, 1),
            "func 'Create' should return error as the last value",
        ));
        report.push(Violation::new(
            "return_error_last",
            Position::new(60, 7, 1),
            "func 'Load' should return error as the last value",
        ));

        LintResult {
            reports: vec![
                FileReport {
                    path: PathBuf::from("/src/a.go"),
                    report,
                },
                FileReport {
                    path: PathBuf::from("/src/b.go"),
                    report: Report::new(),
                },
            ],
            parse_failures: vec![ParseFailure {
                path: PathBuf::from("/src/c.go"),
                line: 4,
                column: 9,
                message: "unexpected input".into(),
            }],
        }
    }

    #[test]
    fn text_output() {
        insta::assert_snapshot!(render_text(&sample()), @r"
        /src/a.go
        	- line 3: func 'Create' should return error as the last value
        	- line 7: func 'Load' should return error as the last value

        /src/c.go
        	- line 4: parse error: unexpected input

        2 violations found in 2 files
        1 files could not be parsed
        ");
    }

    #[test]
    fn text_output_clean_run() {
        insta::assert_snapshot!(render_text(&LintResult::new()), @"0 violations found in 0 files");
    }

    #[test]
    fn compact_output() {
        insta::assert_snapshot!(render_compact(&sample()), @r"
        /src/a.go:3:1: [return_error_last] func 'Create' should return error as the last value
        /src/a.go:7:1: [return_error_last] func 'Load' should return error as the last value
        /src/c.go:4:9: [parse] unexpected input
        ");
    }

    #[test]
    fn json_output_is_structured() {
        let json: serde_json::Value =
            serde_json::to_value(sample()).expect("result serializes");
        assert_eq!(json["reports"][0]["report"][1]["position"]["line"], 7);
        assert_eq!(json["parse_failures"][0]["column"], 9);
    }
}
