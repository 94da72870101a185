//! `botmill` binary tests
//! Run with: cargo test --test cli_test

use std::path::Path;

use assert_cmd::Command;
use botmill::infrastructure::config::properties;
use botmill::CONFIG_PATH;
use predicates::prelude::*;
use tempfile::TempDir;

/// Command isolated from the caller's resource path and working directory
fn botmill_command(cwd: &Path) -> Command {
    let mut cmd = Command::cargo_bin("botmill").unwrap();
    cmd.env_remove("BOTMILL_RESOURCE_PATH");
    cmd.env_remove("RUST_LOG");
    cmd.current_dir(cwd);
    cmd
}

fn resource_dir(content: &str) -> TempDir {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join(CONFIG_PATH), content).unwrap();
    dir
}

#[test]
fn test_show_properties_sorted() {
    let cwd = TempDir::new().unwrap();
    let resources = resource_dir("b=2\na=1\n");

    botmill_command(cwd.path())
        .arg("--resource-dir")
        .arg(resources.path())
        .arg("show")
        .assert()
        .success()
        .stdout("a=1\nb=2\n");
}

#[test]
fn test_show_json() {
    let cwd = TempDir::new().unwrap();
    let resources = resource_dir("bot.name=carik\nbot.prefix=!\n");

    let output = botmill_command(cwd.path())
        .args(["show", "--format", "json", "--resource-dir"])
        .arg(resources.path())
        .output()
        .unwrap();

    assert!(output.status.success());
    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json, serde_json::json!({"bot.name": "carik", "bot.prefix": "!"}));
}

#[test]
fn test_show_missing_resource_fails() {
    let cwd = TempDir::new().unwrap();

    botmill_command(cwd.path())
        .arg("show")
        .assert()
        .code(1)
        .stdout("")
        .stderr(predicate::str::contains("Resource not found on search path: botmill.properties"));
}

#[test]
fn test_resource_dir_order() {
    let cwd = TempDir::new().unwrap();
    let first = resource_dir("source=first\n");
    let second = resource_dir("source=second\n");

    botmill_command(cwd.path())
        .arg("-r")
        .arg(first.path())
        .arg("-r")
        .arg(second.path())
        .arg("show")
        .assert()
        .success()
        .stdout("source=first\n");
}

#[test]
fn test_init_config_output_parses() {
    let cwd = TempDir::new().unwrap();
    let output = botmill_command(cwd.path()).arg("init-config").output().unwrap();
    assert!(output.status.success());

    let text = String::from_utf8(output.stdout).unwrap();
    let config = properties::parse(&text).unwrap();
    assert_eq!(config.len(), 2);
    assert_eq!(config.get("bot.name"), Some("botmill"));
    assert_eq!(config.get("bot.prefix"), Some("/"));
}

#[test]
fn test_check_with_init_config_succeeds() {
    let cwd = TempDir::new().unwrap();
    let output = botmill_command(cwd.path()).arg("init-config").output().unwrap();
    std::fs::write(cwd.path().join(CONFIG_PATH), &output.stdout).unwrap();

    botmill_command(cwd.path())
        .arg("check")
        .assert()
        .success()
        .stdout(predicate::str::contains("configuration: 2 entries, bot definitions: 1 of 1 activated"));
}

#[test]
fn test_check_without_configuration_fails() {
    let cwd = TempDir::new().unwrap();

    botmill_command(cwd.path())
        .arg("check")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Configuration error: failed to activate [console]"))
        .stderr(predicate::str::contains("caused by: missing required property 'bot.name'"));
}

#[test]
fn test_check_collect_all_policy() {
    let cwd = TempDir::new().unwrap();
    let resources = resource_dir("bot.name=carik\nbot.prefix=\n");

    botmill_command(cwd.path())
        .args(["check", "--policy", "collect-all", "--resource-dir"])
        .arg(resources.path())
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Configuration error: 1 bot definitions failed"))
        .stderr(predicate::str::contains("caused by: property 'bot.prefix' must not be empty"));
}

#[test]
fn test_version() {
    let cwd = TempDir::new().unwrap();
    botmill_command(cwd.path())
        .arg("version")
        .assert()
        .success()
        .stdout(format!("botmill v{}\n", env!("CARGO_PKG_VERSION")));
}
