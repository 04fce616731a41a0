//! Command-line tests for the `lingo` binary.

use assert_cmd::cargo::cargo_bin_cmd;
use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

/// A `lingo` command isolated from any global configuration.
fn lingo(global: &TempDir) -> Command {
    let mut cmd = cargo_bin_cmd!("lingo");
    cmd.env("LINGO_CONFIG_DIR", global.path())
        .env_remove("LINGO_CONFIG")
        .env_remove("RUST_LOG");
    cmd
}

fn write(root: &Path, rel: &str, content: &str) {
    let path = root.join(rel);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
}

const BAD: &str = "package bad

func Create() (error, int) { return nil, 0 }

func Load() (int, error) { return 0, nil }

func Swap() (error, string) { return nil, \"\" }
";

const GOOD: &str = "package good

func Create() (int, error) { return 0, nil }
";

#[test]
fn test_check_reports_violations_and_fails() {
    let global = TempDir::new().unwrap();
    let project = TempDir::new().unwrap();
    write(project.path(), "bad.go", BAD);
    write(project.path(), "good.go", GOOD);

    lingo(&global)
        .arg("check")
        .arg(project.path())
        .assert()
        .code(1)
        .stdout(predicate::str::contains("bad.go"))
        .stdout(predicate::str::contains(
            "\t- line 3: func 'Create' should return error as the last value",
        ))
        .stdout(predicate::str::contains(
            "\t- line 7: func 'Swap' should return error as the last value",
        ))
        .stdout(predicate::str::contains("2 violations found in 2 files"))
        .stdout(predicate::str::contains("good.go").not());
}

#[test]
fn test_check_clean_tree_succeeds() {
    let global = TempDir::new().unwrap();
    let project = TempDir::new().unwrap();
    write(project.path(), "good.go", GOOD);
    write(project.path(), "vendor/dep/bad.go", BAD);

    lingo(&global)
        .arg("check")
        .arg(project.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("0 violations found in 1 files"));
}

#[test]
fn test_check_project_inside_vendor_directory() {
    let global = TempDir::new().unwrap();
    let outer = TempDir::new().unwrap();
    write(outer.path(), "vendor/proj/bad.go", BAD);
    write(outer.path(), "vendor/proj/vendor/dep/bad.go", BAD);

    lingo(&global)
        .arg("check")
        .current_dir(outer.path().join("vendor/proj"))
        .assert()
        .code(1)
        .stdout(predicate::str::contains("2 violations found in 1 files"))
        .stdout(predicate::str::contains("/./").not());
}

#[test]
fn test_check_json_output() {
    let global = TempDir::new().unwrap();
    let project = TempDir::new().unwrap();
    write(project.path(), "bad.go", BAD);

    let output = lingo(&global)
        .args(["check", "--format", "json"])
        .arg(project.path())
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(1));
    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["reports"][0]["report"].as_array().unwrap().len(), 2);
    assert_eq!(json["reports"][0]["report"][0]["rule"], "return_error_last");
}

#[test]
fn test_check_compact_output() {
    let global = TempDir::new().unwrap();
    let project = TempDir::new().unwrap();
    write(project.path(), "bad.go", BAD);

    lingo(&global)
        .args(["check", "-f", "compact"])
        .arg(project.path())
        .assert()
        .code(1)
        .stdout(predicate::str::contains(
            "bad.go:3:1: [return_error_last] func 'Create' should return error as the last value",
        ));
}

#[test]
fn test_parse_failure_is_reported() {
    let global = TempDir::new().unwrap();
    let project = TempDir::new().unwrap();
    write(project.path(), "broken.go", "package broken\n\nfunc (\n");
    write(project.path(), "good.go", GOOD);

    lingo(&global)
        .arg("check")
        .arg(project.path())
        .assert()
        .code(1)
        .stdout(predicate::str::contains("1 files could not be parsed"));

    lingo(&global)
        .args(["check", "--fail-on-parse-error"])
        .arg(project.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("broken.go"));
}

#[test]
fn test_missing_directory_is_fatal() {
    let global = TempDir::new().unwrap();
    let project = TempDir::new().unwrap();

    lingo(&global)
        .arg("check")
        .arg(project.path().join("missing"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("cannot read directory"))
        .stdout(predicate::str::contains("violations found").not());
}

#[test]
fn test_unknown_checker_in_config_is_fatal() {
    let global = TempDir::new().unwrap();
    let project = TempDir::new().unwrap();
    write(project.path(), "bad.go", BAD);
    write(project.path(), "lingo.toml", "[checkers.no_such_checker]\n");

    lingo(&global)
        .arg("check")
        .arg(project.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown checker: no_such_checker"))
        .stdout(predicate::str::is_empty());
}

#[test]
fn test_project_config_selects_matchers() {
    let global = TempDir::new().unwrap();
    let project = TempDir::new().unwrap();
    write(project.path(), "cmd/bad.go", BAD);
    write(project.path(), "internal/bad.go", BAD);
    write(
        project.path(),
        "lingo.toml",
        r#"
[[matchers]]
type = "extension"
config = { extensions = [".go"] }

[[matchers]]
type = "exclude"
config = { patterns = ["internal/"] }

[checkers.return_error_last]
"#,
    );

    lingo(&global)
        .arg("check")
        .arg(project.path())
        .assert()
        .code(1)
        .stdout(predicate::str::contains("2 violations found in 1 files"));
}

#[test]
fn test_global_config_is_used_as_fallback() {
    let global = TempDir::new().unwrap();
    let project = TempDir::new().unwrap();
    write(project.path(), "bad.go", BAD);
    write(global.path(), "config.toml", "[analyzer]\n");

    // No checkers configured globally, so nothing is reported.
    lingo(&global)
        .arg("check")
        .arg(project.path())
        .assert()
        .success();
}

#[test]
fn test_list_checkers() {
    let global = TempDir::new().unwrap();
    lingo(&global)
        .arg("list-checkers")
        .assert()
        .success()
        .stdout(predicate::str::contains("return_error_last"))
        .stdout(predicate::str::contains("Return Error Last"));
}

#[test]
fn test_guide() {
    let global = TempDir::new().unwrap();
    let project = TempDir::new().unwrap();
    lingo(&global)
        .arg("guide")
        .arg(project.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("## Return Error Last"))
        .stdout(predicate::str::contains("func Create() (error, int) {}"));
}

#[test]
fn test_init_writes_config_once() {
    let global = TempDir::new().unwrap();
    let project = TempDir::new().unwrap();

    lingo(&global)
        .arg("init")
        .current_dir(project.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Created lingo.toml"));
    assert!(project.path().join("lingo.toml").is_file());

    lingo(&global)
        .arg("init")
        .current_dir(project.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("--force"));

    lingo(&global)
        .args(["init", "--force"])
        .current_dir(project.path())
        .assert()
        .success();
}
