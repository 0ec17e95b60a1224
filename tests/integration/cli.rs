//! Integration tests for the branch-strategies binary

use std::fs;
use std::path::Path;
use std::process::{Command, Output};
use tempfile::TempDir;

const CONFIG: &str = r#"
[[strategies]]
type = "buildAllBranches"

[[strategies.strategies]]
type = "buildRegularBranches"

[[strategies.strategies]]
type = "skipUserCause"

[[strategies]]
type = "buildChangeRequests"
ignore_untrusted_changes = true

[[strategies]]
type = "buildTags"
at_most_days = 3
"#;

fn run(workspace: &Path, args: &[&str]) -> Output {
    let bin = env!("CARGO_BIN_EXE_branch-strategies");
    Command::new(bin)
        .env("XDG_CONFIG_HOME", workspace.join("xdg"))
        .env_remove("BRANCH_STRATEGIES_LOG")
        .env_remove("BRANCH_STRATEGIES_ENV")
        .env_remove("BRANCH_STRATEGIES_LOGGING__LEVEL")
        .arg("--workspace")
        .arg(workspace)
        .args(args)
        .output()
        .unwrap()
}

fn workspace() -> TempDir {
    let temp_dir = TempDir::new().unwrap();
    fs::write(temp_dir.path().join(".branch-strategies.toml"), CONFIG).unwrap();
    temp_dir
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).trim().to_string()
}

#[test]
fn test_evaluate_prints_decision() {
    let ws = workspace();

    let build = run(ws.path(), &["evaluate", "--branch", "master"]);
    assert!(
        build.status.success(),
        "evaluate should succeed: stderr={:?}",
        String::from_utf8_lossy(&build.stderr)
    );
    assert_eq!(stdout(&build), "BUILD");

    let skip = run(ws.path(), &["evaluate", "--branch", "master", "--cause", "user"]);
    assert!(skip.status.success(), "SKIP still exits 0");
    assert_eq!(stdout(&skip), "SKIP");
}

#[test]
fn test_evaluate_tags_and_change_requests() {
    let ws = workspace();
    assert_eq!(
        stdout(&run(ws.path(), &["evaluate", "--tag", "v1", "--tag-age-days", "1"])),
        "BUILD"
    );
    assert_eq!(
        stdout(&run(ws.path(), &["evaluate", "--tag", "v1", "--tag-age-days", "10"])),
        "SKIP"
    );
    assert_eq!(
        stdout(&run(ws.path(), &["evaluate", "--change-request", "42"])),
        "BUILD"
    );
    assert_eq!(
        stdout(&run(
            ws.path(),
            &["evaluate", "--change-request", "42", "--untrusted"]
        )),
        "SKIP"
    );
}

#[test]
fn test_evaluate_explain_shows_listener_lines() {
    let ws = workspace();
    let output = run(
        ws.path(),
        &[
            "evaluate", "--branch", "master", "--cause", "user", "--user", "dave", "--explain",
        ],
    );
    let text = stdout(&output);
    assert!(text.starts_with("SKIP"));
    assert!(text.contains("skip build because of [Started by user dave]"));
}

#[test]
fn test_list_shows_configured_strategies() {
    let ws = workspace();
    let output = run(ws.path(), &["list"]);
    assert!(output.status.success());
    let text = stdout(&output);
    assert!(text.contains("buildAllBranches"));
    assert!(text.contains("skipUserCause"));
    assert!(text.contains("Change requests"));

    let json = run(ws.path(), &["list", "--format", "json"]);
    let value: serde_json::Value = serde_json::from_slice(&json.stdout).unwrap();
    assert_eq!(value["total"], 3);
    assert_eq!(value["strategies"][2]["symbol"], "buildTags");
}

#[test]
fn test_check_regex_exit_status() {
    let ws = workspace();
    let ok = run(ws.path(), &["check-regex", "^release-.*$"]);
    assert!(ok.status.success());

    let bad = run(ws.path(), &["check-regex", "(unclosed"]);
    assert!(!bad.status.success());
    assert!(String::from_utf8_lossy(&bad.stderr).contains("is invalid"));
}

#[test]
fn test_validate_reports_problems() {
    let ws = workspace();
    assert!(run(ws.path(), &["validate"]).status.success());

    let broken = TempDir::new().unwrap();
    fs::write(
        broken.path().join(".branch-strategies.toml"),
        "[[strategies]]\ntype = \"buildAnyBranches\"\n",
    )
    .unwrap();
    let output = run(broken.path(), &["validate"]);
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("never builds"));
}

#[test]
fn test_invalid_config_fails_cleanly() {
    let broken = TempDir::new().unwrap();
    fs::write(
        broken.path().join(".branch-strategies.toml"),
        "[[strategies]]\ntype = \"buildEverything\"\n",
    )
    .unwrap();
    let output = run(broken.path(), &["list"]);
    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("Failed to load configuration"));
}
