//! Tests for the command-line front end, run against the real binary.

use std::path::Path;
use std::process::{Command, Output};

use tempfile::TempDir;

fn knit(data_dir: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_knit-counter"))
        .arg("--data-dir")
        .arg(data_dir)
        .arg("--config")
        .arg(data_dir.join("config.toml"))
        .args(args)
        .env_remove("KNIT_COUNTER_LOG")
        .output()
        .expect("Failed to execute command")
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

/// First project id as printed by `list` (leading short id column).
fn first_short_id(data_dir: &Path) -> String {
    let out = stdout(&knit(data_dir, &["list"]));
    out.split_whitespace().next().unwrap().to_string()
}

#[test]
fn test_help_lists_subcommands() {
    let dir = TempDir::new().unwrap();
    let output = knit(dir.path(), &["--help"]);
    let text = stdout(&output);
    assert!(output.status.success());
    for sub in ["add", "inc", "dec", "reset", "achievements", "fav"] {
        assert!(text.contains(sub), "help should mention {sub}");
    }
}

#[test]
fn test_empty_list() {
    let dir = TempDir::new().unwrap();
    let output = knit(dir.path(), &[]);
    assert!(output.status.success());
    assert!(stdout(&output).contains("No projects yet"));
}

#[test]
fn test_knit_to_target() {
    let dir = TempDir::new().unwrap();
    assert!(knit(dir.path(), &["add", "Hat", "--target", "3"]).status.success());
    let id = first_short_id(dir.path());

    let output = knit(dir.path(), &["inc", &id, "-n", "3"]);
    assert!(output.status.success());
    let text = stdout(&output);
    assert!(text.contains("Target reached"));
    assert!(text.contains("3/3段"));
    assert!(text.contains("編み物デビュー"));

    let output = knit(dir.path(), &["dec", &id]);
    assert!(stdout(&output).contains("reopened"));

    let output = knit(dir.path(), &["achievements"]);
    assert!(stdout(&output).contains("Total rows: 3"));
}

#[test]
fn test_blank_name_fails() {
    let dir = TempDir::new().unwrap();
    let output = knit(dir.path(), &["add", "  "]);
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("must not be empty"));
}

#[test]
fn test_unknown_project_fails() {
    let dir = TempDir::new().unwrap();
    let output = knit(dir.path(), &["inc", "zzzz"]);
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("No project matches 'zzzz'"));
}

#[test]
fn test_favorite_toggle() {
    let dir = TempDir::new().unwrap();
    assert!(stdout(&knit(dir.path(), &["fav", "k2tog"])).contains("★ k2tog"));
    assert!(stdout(&knit(dir.path(), &["favs"])).contains("k2tog"));
    assert!(stdout(&knit(dir.path(), &["fav", "k2tog"])).contains("☆ k2tog"));
    assert!(stdout(&knit(dir.path(), &["favs"])).contains("No favorites yet"));
}
