//! Check command implementation.

use anyhow::{Context, Result};
use lingo_core::{matcher, AnalyzerBuilder, Config};
use std::path::Path;
use std::process::ExitCode;

use crate::config_resolver::ConfigSource;
use crate::OutputFormat;

/// Command-line options of `lingo check`.
pub struct Options {
    /// Output format.
    pub format: OutputFormat,
    /// Comma-separated checker identifiers to run instead of the configured
    /// set.
    pub checkers: Option<String>,
    /// Abort on the first file that fails to parse.
    pub fail_on_parse_error: bool,
}

/// Runs the check command.
///
/// Exits with failure when any violation or unparsable file was found.
pub fn run(path: &Path, source: &ConfigSource, options: &Options) -> Result<ExitCode> {
    let checkers = lingo_checkers::registry().context("Failed to register checkers")?;
    let matchers = matcher::registry().context("Failed to register matchers")?;

    let mut config = source.load(&checkers)?;
    if options.fail_on_parse_error {
        config.analyzer.fail_on_parse_error = true;
    }
    if let Some(filter) = &options.checkers {
        select_checkers(&mut config, filter);
    }

    let analyzer = AnalyzerBuilder::from_config(&config, &checkers, &matchers)
        .context("Invalid configuration")?
        .root(path)
        .build();

    tracing::info!(
        "Checking {} with {} checkers",
        path.display(),
        analyzer.rule_count()
    );

    let result = analyzer.analyze().context("Check failed")?;

    super::output::print(&result, options.format)?;

    Ok(if result.is_failure() {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    })
}

/// Replaces the configured checkers with the comma-separated `filter`,
/// keeping the settings of those already configured.
fn select_checkers(config: &mut Config, filter: &str) {
    let selected = filter
        .split(',')
        .map(str::trim)
        .filter(|id| !id.is_empty())
        .map(|id| {
            let settings = config
                .checkers
                .get(id)
                .cloned()
                .unwrap_or_else(|| toml::Value::Table(toml::Table::new()));
            (id.to_string(), settings)
        })
        .collect();
    config.checkers = selected;
}
