//! CLI integration tests for the teams command-line interface.
//!
//! These tests cover help output, argument parsing, config file handling
//! and token resolution failures. None of them reach the network.

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

/// Get a command for the teams binary with a clean environment.
fn teams() -> Command {
    let mut cmd = Command::cargo_bin("teams").unwrap();
    cmd.env_remove("TEAMS_CONFIG")
        .env_remove("TEAMS_CONFIG_DIR")
        .env_remove("TEAMS_BEARER_TOKEN")
        .env_remove("TEAMS_SKYPE_TOKEN")
        .env_remove("RUST_LOG");
    cmd
}

// ─────────────────────────────────────────────────────────────────────────────
// Help and Version Tests
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_help_displays() {
    teams()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Teams chat"));
}

#[test]
fn test_version_displays() {
    teams()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("teams"));
}

#[test]
fn test_help_lists_subcommands() {
    teams()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("messages"))
        .stdout(predicate::str::contains("send"))
        .stdout(predicate::str::contains("react"))
        .stdout(predicate::str::contains("unreact"))
        .stdout(predicate::str::contains("delete"))
        .stdout(predicate::str::contains("config"));
}

#[test]
fn test_global_flags_accepted() {
    teams()
        .args(["--verbose", "--json", "--strict", "--debug-save", "--help"])
        .assert()
        .success();
}

// ─────────────────────────────────────────────────────────────────────────────
// Argument Validation
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_no_subcommand_fails() {
    teams()
        .assert()
        .failure()
        .stderr(predicate::str::contains("Usage"));
}

#[test]
fn test_send_requires_text() {
    teams()
        .args(["send", "19:abc@thread.v2"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("<TEXT>"));
}

#[test]
fn test_react_requires_emote() {
    teams()
        .args(["react", "19:abc@thread.v2", "1600000000000"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("<EMOTE>"));
}

#[test]
fn test_delete_requires_message_id() {
    teams()
        .args(["delete", "19:abc@thread.v2"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("<MESSAGE_ID>"));
}

#[test]
fn test_messages_limit_must_be_number() {
    teams()
        .args(["messages", "19:abc@thread.v2", "--limit", "lots"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid value"));
}

// ─────────────────────────────────────────────────────────────────────────────
// Config Command
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_config_path_uses_config_dir_env() {
    let tmp = TempDir::new().unwrap();
    teams()
        .env("TEAMS_CONFIG_DIR", tmp.path())
        .args(["config", "path"])
        .assert()
        .success()
        .stdout(predicate::str::contains("config.toml"))
        .stdout(predicate::str::contains(
            tmp.path().to_string_lossy().as_ref(),
        ));
}

#[test]
fn test_config_path_flag_wins() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("custom.toml");
    teams()
        .arg("--config")
        .arg(&path)
        .args(["config", "path"])
        .assert()
        .success()
        .stdout(predicate::str::contains("custom.toml"));
}

#[test]
fn test_config_init_then_show() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("config.toml");

    teams()
        .arg("--config")
        .arg(&path)
        .args(["config", "init"])
        .assert()
        .success();
    assert!(path.exists());

    teams()
        .arg("--config")
        .arg(&path)
        .args(["config", "init"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("already exists"));

    teams()
        .arg("--config")
        .arg(&path)
        .args(["config", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("region = \"emea\""));
}

#[test]
fn test_config_show_applies_overrides() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("config.toml");
    std::fs::write(&path, "region = \"amer\"\ndisplay-name = \"Ada\"\n").unwrap();

    teams()
        .arg("--config")
        .arg(&path)
        .args(["--region", "apac", "--json", "config", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"region\": \"apac\""))
        .stdout(predicate::str::contains("\"display-name\": \"Ada\""));
}

#[test]
fn test_invalid_config_fails() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("config.toml");
    std::fs::write(&path, "region = [").unwrap();

    teams()
        .arg("--config")
        .arg(&path)
        .args(["config", "show"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to parse config"));
}

// ─────────────────────────────────────────────────────────────────────────────
// Token Resolution
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_missing_bearer_token_fails() {
    let tmp = TempDir::new().unwrap();
    teams()
        .env("TEAMS_CONFIG_DIR", tmp.path())
        .args(["messages", "19:abc@thread.v2"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("bearer token not found"))
        .stderr(predicate::str::contains("TEAMS_BEARER_TOKEN"));
}

#[test]
fn test_unknown_region_fails() {
    let tmp = TempDir::new().unwrap();
    teams()
        .env("TEAMS_CONFIG_DIR", tmp.path())
        .env("TEAMS_BEARER_TOKEN", "token")
        .args(["--region", "mars", "delete", "19:abc@thread.v2", "1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown region 'mars'"));
}

#[test]
fn test_unknown_region_in_config_fails_at_load() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("config.toml");
    std::fs::write(&path, "region = \"mars\"\n").unwrap();

    teams()
        .arg("--config")
        .arg(&path)
        .args(["config", "show"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to parse config"))
        .stderr(predicate::str::contains("mars"));
}
