//! Guide command implementation.
//!
//! Prints a Markdown document describing each configured checker with its
//! example snippets, titled after the project directory.

use anyhow::{Context, Result};
use lingo_core::{RuleBox, RuleRegistry};
use std::fmt::Write as _;
use std::path::Path;

use crate::config_resolver::ConfigSource;

/// Runs the guide command.
pub fn run(project_dir: &Path, source: &ConfigSource) -> Result<()> {
    let checkers = lingo_checkers::registry().context("Failed to register checkers")?;
    let rules = configured_rules(source, &checkers)?;
    print!("{}", render(&project_name(project_dir, source), &rules));
    Ok(())
}

/// Name of the directory holding the configuration, else of `project_dir`.
fn project_name(project_dir: &Path, source: &ConfigSource) -> String {
    let dir = source
        .path()
        .and_then(Path::parent)
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or(project_dir);
    dir.canonicalize()
        .ok()
        .as_deref()
        .and_then(Path::file_name)
        .map_or_else(|| "Project".to_string(), |n| n.to_string_lossy().into_owned())
}

fn configured_rules(source: &ConfigSource, checkers: &RuleRegistry) -> Result<Vec<RuleBox>> {
    let config = source.load(checkers)?;
    config
        .checker_configs()?
        .iter()
        .map(|(id, settings)| {
            checkers
                .get(id, settings)
                .with_context(|| format!("Invalid configuration for checker `{id}`"))
        })
        .collect()
}

fn render(project: &str, rules: &[RuleBox]) -> String {
    let mut out = format!("# {project} Lingo\n");

    if rules.is_empty() {
        out.push_str("\nNo checkers are configured.\n");
        return out;
    }

    for rule in rules {
        let _ = write!(out, "\n## {}\n\n`{}`\n", rule.title(), rule.name());
        if !rule.description().is_empty() {
            let _ = write!(out, "\n{}\n", rule.description());
        }
        for example in rule.examples() {
            let _ = write!(
                out,
                "\n### Bad\n\n```go\n{}\n```\n\n### Good\n\n```go\n{}\n```\n",
                example.bad, example.good
            );
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use lingo_checkers::ReturnErrorLast;

    #[test]
    fn renders_markdown() {
        let rules: Vec<RuleBox> = vec![Box::new(ReturnErrorLast::new())];
        insta::assert_snapshot!(render("store", &rules), @r"
        # store Lingo

        ## Return Error Last

        `return_error_last`

        When a function returns error it must be its last return value.

        ### Bad

        ```go
        func Create() (error, int) {}
        ```

        ### Good

        ```go
        func Create() (int, error) {}
        ```
        ");
    }

    #[test]
    fn renders_empty_guide() {
        assert!(render("store", &[]).contains("No checkers are configured."));
    }

    #[test]
    fn uses_configured_checkers_only() {
        let tmp = tempfile::TempDir::new().unwrap();
        let path = tmp.path().join("lingo.toml");
        std::fs::write(
            &path,
            "[[matchers]]\ntype = \"extension\"\nconfig = { extensions = [\".go\"] }\n",
        )
        .unwrap();

        let checkers = lingo_checkers::registry().unwrap();
        let rules = configured_rules(&ConfigSource::Project(path), &checkers).unwrap();
        assert!(rules.is_empty());

        let rules = configured_rules(&ConfigSource::Recommended, &checkers).unwrap();
        assert_eq!(rules.len(), 1);
    }

    #[test]
    fn project_name_prefers_config_directory() {
        let tmp = tempfile::TempDir::new().unwrap();
        let project = tmp.path().join("billing");
        let elsewhere = tmp.path().join("shared");
        std::fs::create_dir_all(&project).unwrap();
        std::fs::create_dir_all(&elsewhere).unwrap();

        assert_eq!(project_name(&project, &ConfigSource::Recommended), "billing");
        assert_eq!(
            project_name(&project, &ConfigSource::Explicit(elsewhere.join("lingo.toml"))),
            "shared"
        );
    }
}
