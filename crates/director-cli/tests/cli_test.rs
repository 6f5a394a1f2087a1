//! End-to-end tests for the `director` binary.
//!
//! Each test runs the compiled binary with an isolated `XDG_CONFIG_HOME`
//! so a developer's own config file never leaks in.

use std::process::{Command, Output};

use tempfile::TempDir;

fn director(config_home: &TempDir, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_director"))
        .args(args)
        .env("XDG_CONFIG_HOME", config_home.path())
        .env_remove("DIRECTOR_BIND")
        .env_remove("DIRECTOR_PORT")
        .env_remove("DIRECTOR_FORMAT")
        .env("RUST_LOG", "warn")
        .output()
        .expect("failed to run director binary")
}

fn stdout(output: &Output) -> String {
    String::from_utf8(output.stdout.clone()).unwrap()
}

fn stderr(output: &Output) -> String {
    String::from_utf8(output.stderr.clone()).unwrap()
}

#[test]
fn generate_prints_markdown_by_default() {
    let home = TempDir::new().unwrap();
    let out = director(
        &home,
        &["generate", "Create a superhero story where a father saves his family"],
    );
    assert!(out.status.success(), "stderr: {}", stderr(&out));

    let text = stdout(&out);
    assert!(text.starts_with("# Viral Production Plan"));
    assert!(text.contains("`hero`"));
    assert!(text.contains("## 2. 15-Minute Script"));
}

#[test]
fn generate_is_deterministic_across_runs() {
    let home = TempDir::new().unwrap();
    let args = ["generate", "A detective follows a clue", "--format", "json"];
    let first = director(&home, &args);
    let second = director(&home, &args);
    assert!(first.status.success());
    assert_eq!(first.stdout, second.stdout);

    let plan: serde_json::Value = serde_json::from_slice(&first.stdout).unwrap();
    assert_eq!(plan["category"], "mystery");
}

#[test]
fn generate_refuses_blank_idea() {
    let home = TempDir::new().unwrap();
    let out = director(&home, &["generate", "   "]);
    assert!(!out.status.success());
    assert!(stderr(&out).contains("must not be empty"), "stderr: {}", stderr(&out));
    assert!(out.stdout.is_empty());
}

#[test]
fn init_writes_config_that_generate_honors() {
    let home = TempDir::new().unwrap();
    let out = director(&home, &["init"]);
    assert!(out.status.success(), "stderr: {}", stderr(&out));

    let path = home.path().join("director").join("config.toml");
    let written = std::fs::read_to_string(&path).unwrap();
    assert!(written.contains("[server]"));
    assert!(written.contains("format = \"markdown\""));

    let again = director(&home, &["init"]);
    assert!(!again.status.success());
    assert!(stderr(&again).contains("already exists"));

    std::fs::write(&path, "[output]\nformat = \"html\"\n").unwrap();
    let out = director(&home, &["generate", "A girl explores a jungle temple"]);
    assert!(out.status.success(), "stderr: {}", stderr(&out));
    assert!(stdout(&out).starts_with("<!DOCTYPE html>"));
}

#[test]
fn classify_and_themes_report_categories() {
    let home = TempDir::new().unwrap();
    let out = director(&home, &["classify", "Pirates hunt treasure on a lost island"]);
    assert!(out.status.success());
    assert!(stdout(&out).starts_with("Category: adventure"));

    let out = director(&home, &["themes"]);
    assert!(out.status.success());
    let listing = stdout(&out);
    for name in ["hero", "mystery", "adventure", "family", "general"] {
        assert!(listing.contains(name), "themes output lacks {name}");
    }
}
