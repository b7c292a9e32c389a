//! Integration tests for init, config and the local profile

#![allow(deprecated)]

use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

mod common;
use common::{cmd_in, embedlink_cmd, empty_workspace, read_collection};

#[test]
fn test_init_creates_config() {
    let temp = TempDir::new().unwrap();

    embedlink_cmd()
        .arg("init")
        .arg(temp.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Initialized embedlink workspace"));

    let config_path = temp.path().join(".embedlink/config.toml");
    let content = fs::read_to_string(config_path).unwrap();
    assert!(content.contains("theme = \"light\""));
    assert!(content.contains("created"));
    assert!(!content.contains("github_token"));
}

#[test]
fn test_init_already_initialized_fails() {
    let temp = TempDir::new().unwrap();

    embedlink_cmd().arg("init").arg(temp.path()).assert().success();
    embedlink_cmd()
        .arg("init")
        .arg(temp.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("already initialized"));
}

#[test]
fn test_fresh_workspace_lists_samples() {
    let temp = TempDir::new().unwrap();
    embedlink_cmd().arg("init").arg(temp.path()).assert().success();

    cmd_in(temp.path())
        .arg("stats")
        .assert()
        .success()
        .stdout(predicate::str::contains("bookmarks  5"))
        .stdout(predicate::str::contains("notes      2"));
}

#[test]
fn test_init_empty_skips_samples() {
    let temp = empty_workspace();
    assert!(read_collection(temp.path(), "bookmarks").is_empty());
    assert!(read_collection(temp.path(), "notes").is_empty());

    cmd_in(temp.path())
        .args(["bookmark", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No bookmarks found"));
}

#[test]
fn test_outside_workspace_exits_2() {
    let temp = TempDir::new().unwrap();

    cmd_in(temp.path())
        .args(["note", "list"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Not an embedlink workspace"));
}

#[test]
fn test_workspace_found_from_subdirectory() {
    let temp = empty_workspace();
    let sub = temp.path().join("firmware").join("src");
    fs::create_dir_all(&sub).unwrap();

    cmd_in(&sub).arg("stats").assert().success();
}

#[test]
fn test_embedlink_root_env() {
    let temp = empty_workspace();
    let elsewhere = TempDir::new().unwrap();

    cmd_in(elsewhere.path())
        .env("EMBEDLINK_ROOT", temp.path())
        .args(["project", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No projects found"));
}

#[test]
fn test_config_set_and_get() {
    let temp = empty_workspace();

    cmd_in(temp.path())
        .args(["config", "theme", "dark"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Set theme = dark"));

    cmd_in(temp.path())
        .args(["config", "theme"])
        .assert()
        .success()
        .stdout(predicate::str::contains("dark"));
}

#[test]
fn test_config_list_masks_token() {
    let temp = empty_workspace();

    cmd_in(temp.path())
        .args(["config", "github_token", "ghp_abcdef123456"])
        .assert()
        .success()
        .stdout(predicate::str::contains("ghp_").not());

    cmd_in(temp.path())
        .args(["config", "--list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("github_token = ****3456"))
        .stdout(predicate::str::contains("abcdef").not());
}

#[test]
fn test_config_unknown_key_fails() {
    let temp = empty_workspace();

    cmd_in(temp.path())
        .args(["config", "editor"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown config key: 'editor'"));
}

#[test]
fn test_login_whoami_logout() {
    let temp = empty_workspace();

    cmd_in(temp.path())
        .args(["login", "grace@navy.mil"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Signed in as grace"));

    cmd_in(temp.path())
        .arg("whoami")
        .assert()
        .success()
        .stdout(predicate::str::contains("grace <grace@navy.mil>"));

    cmd_in(temp.path()).arg("logout").assert().success();

    cmd_in(temp.path())
        .arg("whoami")
        .assert()
        .success()
        .stdout(predicate::str::contains("Not signed in"));
}

#[test]
fn test_login_bad_email_exits_3() {
    let temp = empty_workspace();
    cmd_in(temp.path()).args(["login", "nobody"]).assert().code(3);
}
