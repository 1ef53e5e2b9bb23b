//! Configuration integration tests.
//!
//! These tests verify config discovery, format parsing, and precedence
//! from an end-to-end perspective using the compiled binary. Tests use
//! `info --json` to assert actual config values, not just process success.

use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::Value;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

/// Returns a Command configured to run our binary, logging into a temp dir.
#[allow(deprecated)]
fn cmd() -> Command {
    let mut cmd = Command::cargo_bin(env!("CARGO_PKG_NAME")).unwrap();
    cmd.env("DIALEX_LOG_DIR", std::env::temp_dir().join("dialex-test-logs"))
        .env_remove("DIALEX_TOP_WORDS")
        .env_remove("DIALEX_ENTRIES_FILE")
        .env_remove("RUST_LOG");
    cmd
}

/// Run `info --json` from a directory and parse the JSON output.
fn info_json(dir: &Path) -> Value {
    let output = cmd()
        .args(["-C", dir.to_str().unwrap(), "info", "--json"])
        .output()
        .expect("failed to run command");
    assert!(
        output.status.success(),
        "command failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    serde_json::from_slice(&output.stdout).expect("invalid JSON output")
}

// =============================================================================
// Config File Discovery
// =============================================================================

#[test]
fn runs_without_config_file() {
    let tmp = TempDir::new().unwrap();
    let json = info_json(tmp.path());

    assert_eq!(json["config"]["log_level"], "info");
    assert_eq!(json["config"]["top_words"], 20);
    assert!(
        json["config"]["config_file"].is_null(),
        "no config file should be reported"
    );
}

#[test]
fn discovers_dotfile_config_in_current_dir() {
    let tmp = TempDir::new().unwrap();
    fs::write(tmp.path().join(".dialex.toml"), "top_words = 5\n").unwrap();

    let json = info_json(tmp.path());

    assert_eq!(json["config"]["top_words"], 5);
    let reported = json["config"]["config_file"].as_str().unwrap();
    assert!(reported.ends_with(".dialex.toml"), "should report dotfile: {reported}");
}

#[test]
fn discovers_config_in_parent_directory() {
    let tmp = TempDir::new().unwrap();
    let sub_dir = tmp.path().join("dumps").join("2024");
    fs::create_dir_all(&sub_dir).unwrap();
    fs::write(tmp.path().join("dialex.toml"), r#"log_level = "debug""#).unwrap();

    let json = info_json(&sub_dir);

    assert_eq!(json["config"]["log_level"], "debug");
    assert!(json["config"]["config_file"].as_str().is_some());
}

#[test]
fn regular_name_overrides_dotfile() {
    let tmp = TempDir::new().unwrap();
    fs::write(tmp.path().join(".dialex.toml"), r#"log_level = "debug""#).unwrap();
    fs::write(tmp.path().join("dialex.toml"), r#"log_level = "error""#).unwrap();

    let json = info_json(tmp.path());
    assert_eq!(json["config"]["log_level"], "error");
}

#[test]
fn git_boundary_stops_config_search() {
    let tmp = TempDir::new().unwrap();
    let parent = tmp.path().join("parent");
    let repo = parent.join("repo");
    let src = repo.join("src");
    fs::create_dir_all(&src).unwrap();
    fs::write(parent.join(".dialex.toml"), r#"log_level = "error""#).unwrap();
    fs::create_dir(repo.join(".git")).unwrap();

    let json = info_json(&src);

    assert_eq!(json["config"]["log_level"], "info");
    assert!(json["config"]["config_file"].is_null());
}

// =============================================================================
// Config Formats and Fields
// =============================================================================

#[test]
fn parses_yaml_language_aliases() {
    let tmp = TempDir::new().unwrap();
    fs::write(
        tmp.path().join(".dialex.yaml"),
        "language_aliases:\n  - pattern: yombe\n    code: H16c\n",
    )
    .unwrap();

    let json = info_json(tmp.path());
    assert_eq!(json["config"]["language_aliases"][0], "yombe -> H16c");
    assert_eq!(json["config"]["language_aliases"].as_array().unwrap().len(), 1);
}

#[test]
fn parses_json_config() {
    let tmp = TempDir::new().unwrap();
    fs::write(
        tmp.path().join(".dialex.json"),
        r#"{"entries_file": "words.json", "max_input_bytes": 2048}"#,
    )
    .unwrap();

    let json = info_json(tmp.path());
    assert_eq!(json["config"]["entries_file"], "words.json");
    assert_eq!(json["config"]["max_input_bytes"], 2048);
}

#[test]
fn disable_input_limit_hides_max_bytes() {
    let tmp = TempDir::new().unwrap();
    fs::write(tmp.path().join(".dialex.toml"), "disable_input_limit = true\n").unwrap();

    let json = info_json(tmp.path());
    assert!(json["config"]["max_input_bytes"].is_null());
}

#[test]
fn env_var_overrides_config_file() {
    let tmp = TempDir::new().unwrap();
    fs::write(tmp.path().join(".dialex.toml"), "top_words = 5\n").unwrap();

    let output = cmd()
        .env("DIALEX_TOP_WORDS", "7")
        .args(["-C", tmp.path().to_str().unwrap(), "info", "--json"])
        .output()
        .expect("failed to run command");
    assert!(output.status.success());

    let json: Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["config"]["top_words"], 7);
}

#[test]
fn explicit_config_overrides_discovered() {
    let tmp = TempDir::new().unwrap();
    fs::write(tmp.path().join(".dialex.toml"), r#"log_level = "debug""#).unwrap();
    let explicit = tmp.path().join("override.toml");
    fs::write(&explicit, r#"log_level = "error""#).unwrap();

    let output = cmd()
        .args([
            "-C",
            tmp.path().to_str().unwrap(),
            "--config",
            explicit.to_str().unwrap(),
            "info",
            "--json",
        ])
        .output()
        .expect("failed to run command");
    assert!(output.status.success());

    let json: Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["config"]["log_level"], "error");
    let reported = json["config"]["config_file"].as_str().unwrap();
    assert!(reported.ends_with("override.toml"), "{reported}");
}

#[test]
fn configured_entries_file_feeds_stats() {
    let tmp = TempDir::new().unwrap();
    fs::write(
        tmp.path().join("words.json"),
        r#"[{"word": "muana", "language": ["H131"], "example": "Muana wu musakana(H131). L'enfant."}]"#,
    )
    .unwrap();
    fs::write(tmp.path().join(".dialex.toml"), "entries_file = \"words.json\"\n").unwrap();

    cmd()
        .args(["-C", tmp.path().to_str().unwrap(), "stats", "--json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"languageCode\": \"H131\""));
}

// =============================================================================
// Error Cases
// =============================================================================

#[test]
fn invalid_toml_config_shows_error() {
    let tmp = TempDir::new().unwrap();
    fs::write(tmp.path().join(".dialex.toml"), "this is not valid toml [[[").unwrap();

    cmd()
        .args(["-C", tmp.path().to_str().unwrap(), "info"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("configuration"));
}

#[test]
fn wrongly_typed_field_shows_error() {
    let tmp = TempDir::new().unwrap();
    fs::write(tmp.path().join(".dialex.toml"), "top_words = \"many\"\n").unwrap();

    cmd()
        .args(["-C", tmp.path().to_str().unwrap(), "info"])
        .assert()
        .failure();
}

#[test]
fn unknown_config_field_is_ignored() {
    let tmp = TempDir::new().unwrap();
    fs::write(
        tmp.path().join(".dialex.toml"),
        "log_level = \"warn\"\nunknown_field = \"ignored\"\n",
    )
    .unwrap();

    let json = info_json(tmp.path());
    assert_eq!(json["config"]["log_level"], "warn");
}
