//! Integration tests for notes and the tag mind map

#![allow(deprecated)]

use predicates::prelude::*;
use tempfile::TempDir;

mod common;
use common::{add, cmd_in, embedlink_cmd, empty_workspace, read_collection};

#[test]
fn test_add_list_show() {
    let temp = empty_workspace();
    let id = add(
        temp.path(),
        &[
            "note",
            "add",
            "I2C timing",
            "--content",
            "## Clock\n\nSCL at **400 kHz**",
            "--tags",
            "i2c, bus",
        ],
    );

    cmd_in(temp.path())
        .args(["note", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("I2C timing"))
        .stdout(predicate::str::contains("Clock SCL at 400 kHz"))
        .stdout(predicate::str::contains("#i2c #bus"));

    cmd_in(temp.path())
        .args(["note", "show", &id])
        .assert()
        .success()
        .stdout(predicate::str::contains("# I2C timing"))
        .stdout(predicate::str::contains("SCL at **400 kHz**"));
}

#[test]
fn test_edit_refreshes_updated_at() {
    let temp = empty_workspace();
    let id = add(temp.path(), &["note", "add", "SPI", "--content", "mode 0"]);
    let before = read_collection(temp.path(), "notes")[0]["updatedAt"].as_i64().unwrap();

    std::thread::sleep(std::time::Duration::from_millis(5));
    cmd_in(temp.path())
        .args(["note", "edit", &id, "--content", "mode 3"])
        .assert()
        .success();

    let note = &read_collection(temp.path(), "notes")[0];
    assert_eq!(note["content"], "mode 3");
    assert_eq!(note["title"], "SPI");
    assert!(note["updatedAt"].as_i64().unwrap() > before);
}

#[cfg(unix)]
#[test]
fn test_add_without_content_uses_editor() {
    let temp = empty_workspace();

    // `true` leaves the seeded file untouched
    cmd_in(temp.path())
        .env("EDITOR", "true")
        .args(["note", "add", "Scratch"])
        .assert()
        .success();

    let notes = read_collection(temp.path(), "notes");
    assert_eq!(notes[0]["content"], "# Scratch\n\n");
    assert!(!temp.path().join(".embedlink/NOTE_EDITMSG.md").exists());
}

#[cfg(unix)]
#[test]
fn test_failing_editor_saves_nothing() {
    let temp = empty_workspace();

    cmd_in(temp.path())
        .env("EDITOR", "false")
        .args(["note", "add", "Scratch"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Editor"));

    assert!(read_collection(temp.path(), "notes").is_empty());
}

#[test]
fn test_delete_unknown_note_exits_4() {
    let temp = empty_workspace();
    cmd_in(temp.path()).args(["note", "delete", "n404"]).assert().code(4);
}

#[test]
fn test_mindmap_groups_by_first_tag() {
    let temp = TempDir::new().unwrap();
    embedlink_cmd().arg("init").arg(temp.path()).assert().success();

    cmd_in(temp.path())
        .arg("mindmap")
        .assert()
        .success()
        .stdout(predicate::str::contains("Linux"));

    cmd_in(temp.path())
        .args(["mindmap", "--tag", "Linux"])
        .assert()
        .success()
        .stdout(predicate::str::contains("n2"));

    cmd_in(temp.path())
        .args(["mindmap", "--tag", "Quantum"])
        .assert()
        .code(4);
}
