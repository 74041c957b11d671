//! Integration tests for argument parsing, configuration and version output.

#![allow(clippy::expect_used)]

use predicates::prelude::*;

use crate::fixtures::Sandbox;

// --- Help and version tests ---

#[test]
fn test_cli_help_flag_shows_help() {
    Sandbox::new()
        .bootstrap()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Night's Watch Ranger"))
        .stdout(predicate::str::contains("provision"))
        .stdout(predicate::str::contains("install"));
}

#[test]
fn test_cli_version_flag_shows_version() {
    Sandbox::new()
        .bootstrap()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("ranger-bootstrap"));
}

#[test]
fn test_version_command_shows_version() {
    Sandbox::new()
        .bootstrap()
        .arg("version")
        .assert()
        .success()
        .stdout(predicate::str::contains("ranger-bootstrap 0.1.0"));
}

#[test]
fn test_version_command_json_outputs_valid_json() {
    Sandbox::new()
        .bootstrap()
        .args(["version", "--json"])
        .assert()
        .success()
        .stdout(predicate::str::contains(r#""version":"0.1.0""#));
}

#[test]
fn test_no_color_env_accepts_conventional_values() {
    for value in ["1", "yes", "0", "false"] {
        Sandbox::new()
            .bootstrap()
            .env("NO_COLOR", value)
            .arg("version")
            .assert()
            .success()
            .stdout(predicate::str::contains("ranger-bootstrap 0.1.0"));
    }
}

#[test]
fn test_unknown_subcommand_is_usage_error() {
    Sandbox::new()
        .bootstrap()
        .arg("supervise")
        .assert()
        .code(2);
}

// --- Configuration errors ---

#[test]
fn test_missing_urls_is_config_error() {
    Sandbox::new()
        .bootstrap()
        .assert()
        .code(78)
        .stderr(predicate::str::contains("--credentials-url"));
}

#[test]
fn test_missing_ranger_url_is_config_error() {
    Sandbox::new()
        .bootstrap()
        .args(["install", "--credentials-url", "https://h/credentials.zip"])
        .assert()
        .code(78)
        .stderr(predicate::str::contains("NW_RANGER_PKG_URL"));
}

#[test]
fn test_explicit_config_file_must_exist() {
    let sandbox = Sandbox::new();
    sandbox
        .bootstrap()
        .args(["--config", "/nonexistent/ranger-bootstrap.yaml", "config", "show"])
        .assert()
        .code(78)
        .stderr(predicate::str::contains("Config file not found"));
}

#[test]
fn test_config_with_escaping_path_is_rejected() {
    let sandbox = Sandbox::new();
    let config = sandbox.root().join("bad.yaml");
    std::fs::write(&config, "paths:\n  certs_subdir: ../../etc\n").expect("write");

    sandbox
        .bootstrap()
        .arg("--config")
        .arg(&config)
        .args(["config", "show"])
        .assert()
        .code(78)
        .stderr(predicate::str::contains("paths.certs_subdir"));
}

// --- config show ---

#[test]
fn test_config_show_redacts_presigned_urls() {
    Sandbox::new()
        .bootstrap()
        .args([
            "config",
            "show",
            "--credentials-url",
            "https://bucket.example/credentials.zip?X-Amz-Signature=s3cr3t",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("https://bucket.example/credentials.zip"))
        .stdout(predicate::str::contains("s3cr3t").not())
        .stdout(predicate::str::contains("(not set)"));
}

#[test]
fn test_config_show_json_uses_sandbox_layout() {
    let sandbox = Sandbox::new();
    let output = sandbox
        .bootstrap()
        .args(["--json", "config", "show"])
        .env("NW_RANGER_PKG_URL", "https://bucket.example/ranger.tar.gz")
        .output()
        .expect("run");

    assert!(output.status.success());
    let body: serde_json::Value = serde_json::from_slice(&output.stdout).expect("valid json");
    assert_eq!(body["ranger_url"], "https://bucket.example/ranger.tar.gz");
    assert!(body["credentials_url"].is_null());
    assert_eq!(
        body["layout"]["executable"],
        sandbox.install_root().join("ranger").display().to_string()
    );
}
