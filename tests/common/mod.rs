#![allow(dead_code, deprecated)]

use assert_cmd::Command;
use serde_json::Value;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

pub fn embedlink_cmd() -> Command {
    let mut cmd = Command::cargo_bin("embedlink").unwrap();
    cmd.env_remove("EMBEDLINK_ROOT");
    cmd.env_remove("EMBEDLINK_LOG");
    cmd.env_remove("EDITOR");
    cmd.env_remove("VISUAL");
    cmd.env_remove("GEMINI_API_KEY");
    cmd.env_remove("API_KEY");
    cmd
}

/// `embedlink` run inside `dir`
pub fn cmd_in(dir: &Path) -> Command {
    let mut cmd = embedlink_cmd();
    cmd.current_dir(dir);
    cmd
}

/// Workspace without the sample bookmarks and notes
pub fn empty_workspace() -> TempDir {
    let temp = TempDir::new().unwrap();
    embedlink_cmd()
        .arg("init")
        .arg(temp.path())
        .arg("--empty")
        .assert()
        .success();
    temp
}

pub fn read_collection(dir: &Path, key: &str) -> Vec<Value> {
    let path = dir.join(".embedlink").join(format!("{}.json", key));
    let text = fs::read_to_string(path).unwrap();
    serde_json::from_str(&text).unwrap()
}

/// Id from an "Added <kind> <id>: <title>" line
pub fn added_id(stdout: &[u8]) -> String {
    let text = String::from_utf8_lossy(stdout);
    let line = text
        .lines()
        .find(|l| l.starts_with("Added "))
        .unwrap_or_else(|| panic!("no 'Added' line in output: {}", text));
    line.split_whitespace()
        .nth(2)
        .unwrap()
        .trim_end_matches(':')
        .to_string()
}

/// Run a command that prints an "Added" line and return the new id.
pub fn add(dir: &Path, args: &[&str]) -> String {
    let output = cmd_in(dir).args(args).assert().success().get_output().stdout.clone();
    added_id(&output)
}
