use std::fs;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::tempdir;

fn pockyll() -> Command {
    Command::cargo_bin("pockyll").expect("binary exists")
}

#[test]
fn help_flag_prints_usage_and_exits_zero() {
    pockyll()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Usage"))
        .stdout(predicate::str::contains("init"))
        .stdout(predicate::str::contains("auth"))
        .stdout(predicate::str::contains("sync"));
}

#[test]
fn no_arguments_is_a_usage_error() {
    pockyll()
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Usage"));
}

#[test]
fn unknown_command_is_a_usage_error() {
    pockyll()
        .arg("frobnicate")
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Usage"));
}

#[test]
fn init_writes_a_default_config_into_the_working_directory() {
    let dir = tempdir().expect("tempdir");

    pockyll()
        .current_dir(dir.path())
        .arg("init")
        .assert()
        .success();

    let raw = fs::read_to_string(dir.path().join("_pockyll.yml")).expect("config file written");
    assert!(raw.contains("consumer_key"));
    assert!(raw.contains("blog"));
    assert!(raw.contains("_posts/linkposts"));
    assert!(raw.contains("_drafts/linkposts"));
}

#[test]
fn sync_without_init_fails_pointing_at_init() {
    let dir = tempdir().expect("tempdir");

    pockyll()
        .current_dir(dir.path())
        .arg("sync")
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("pockyll init"))
        .stderr(predicate::str::contains("Usage"));
}

#[test]
fn sync_without_an_access_token_fails_asking_for_auth() {
    let dir = tempdir().expect("tempdir");

    pockyll()
        .current_dir(dir.path())
        .arg("init")
        .assert()
        .success();

    // Fails on the auth guard, before any network activity.
    pockyll()
        .current_dir(dir.path())
        .arg("sync")
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("authenticate"));
}

#[test]
fn auth_with_incomplete_credentials_names_the_missing_fields() {
    let dir = tempdir().expect("tempdir");

    pockyll()
        .current_dir(dir.path())
        .arg("init")
        .assert()
        .success();

    pockyll()
        .current_dir(dir.path())
        .arg("auth")
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("consumer_key"))
        .stderr(predicate::str::contains("redirect_uri"));
}

#[test]
fn config_flag_selects_an_explicit_document_path() {
    let dir = tempdir().expect("tempdir");
    let config_path = dir.path().join("elsewhere.yml");

    pockyll()
        .arg("init")
        .arg("--config")
        .arg(&config_path)
        .assert()
        .success();

    assert!(config_path.exists());
}
