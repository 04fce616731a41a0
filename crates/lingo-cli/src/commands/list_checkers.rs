//! List checkers command implementation.

use anyhow::{Context, Result};
use lingo_core::{PluginConfig, RuleRegistry};

/// Runs the list-checkers command.
pub fn run() -> Result<()> {
    let checkers = lingo_checkers::registry().context("Failed to register checkers")?;
    print!("{}", render(&checkers));
    Ok(())
}

fn render(checkers: &RuleRegistry) -> String {
    let mut out = String::from("Available checkers:\n\n");
    out.push_str(&format!("{:<22} {:<22} Description\n", "Name", "Title"));
    out.push_str(&"-".repeat(80));
    out.push('\n');

    for id in checkers.ids() {
        match checkers.get(id, &PluginConfig::new()) {
            Ok(rule) => out.push_str(&format!(
                "{:<22} {:<22} {}\n",
                id,
                rule.title(),
                rule.description()
            )),
            Err(err) => out.push_str(&format!("{id:<22} ({err})\n")),
        }
    }

    out.push_str("\nEnable checkers in lingo.toml, e.g.:\n");
    out.push_str("  [checkers.return_error_last]\n");
    out
}
