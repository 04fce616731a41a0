//! Init command implementation.

use anyhow::{bail, Context, Result};
use std::path::Path;

const DEFAULT_CONFIG: &str = r#"# lingo configuration

[analyzer]
# Abort the run on the first file that fails to parse, instead of
# reporting it and checking the remaining files.
fail_on_parse_error = false

# How many discovered files may wait for the checker.
# queue_capacity = 64

# A file is checked only if every matcher accepts it.
[[matchers]]
type = "extension"
config = { extensions = [".go"] }

[[matchers]]
type = "exclude"
config = { patterns = ["vendor/", "testdata/"] }

# [[matchers]]
# type = "gitignore"
# config = { patterns = ["*_gen.go"] }

# Checkers run in the order listed here.
[checkers.return_error_last]
"#;

/// Runs the init command.
pub fn run(force: bool) -> Result<()> {
    let config_path = Path::new("lingo.toml");

    if config_path.exists() && !force {
        bail!(
            "Configuration file already exists at {}. Use --force to overwrite.",
            config_path.display()
        );
    }

    std::fs::write(config_path, DEFAULT_CONFIG)
        .with_context(|| format!("Failed to write {}", config_path.display()))?;

    println!("Created lingo.toml");
    println!("\nNext steps:");
    println!("  1. Edit lingo.toml to configure matchers and checkers");
    println!("  2. Run: lingo check");

    Ok(())
}
