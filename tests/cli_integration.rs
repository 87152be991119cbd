//! CLI integration tests for kiwi
//!
//! These tests run the real binary against temporary workspaces and
//! verify workspace initialization, project discovery and the grammar's
//! failure modes.

use std::fs;
use std::path::{Path, PathBuf};

use predicates::prelude::*;
use tempfile::TempDir;

/// Help text files shipped with the repository
fn help_dir() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("help")
}

/// Get a command instance for the kiwi binary
fn kiwi_cmd() -> assert_cmd::Command {
    let mut cmd = assert_cmd::Command::new(assert_cmd::cargo::cargo_bin!("kiwi"));
    cmd.env("KIWI_HELP_DIR", help_dir());
    cmd
}

/// Create a temporary directory and initialize a kiwi workspace in it
fn setup_workspace() -> TempDir {
    let dir = TempDir::new().unwrap();
    kiwi_cmd()
        .current_dir(dir.path())
        .arg("init")
        .assert()
        .success();
    dir
}

/// Add a docker-compose project below a workspace
fn add_project(root: &Path, name: &str) {
    let dir = root.join(name);
    fs::create_dir_all(&dir).unwrap();
    fs::write(dir.join("docker-compose.yml"), "services: {}\n").unwrap();
}

// =============================================================================
// Initialization
// =============================================================================

#[test]
fn test_init_creates_config_file() {
    let dir = TempDir::new().unwrap();

    kiwi_cmd()
        .current_dir(dir.path())
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("Initialized kiwi workspace"));

    assert!(dir.path().join("kiwi.yml").is_file());
}

#[test]
fn test_init_refuses_reinit_without_force() {
    let dir = setup_workspace();

    kiwi_cmd()
        .current_dir(dir.path())
        .arg("init")
        .assert()
        .failure()
        .stderr(predicate::str::contains("--force"));
}

#[test]
fn test_init_force_overwrites() {
    let dir = setup_workspace();

    kiwi_cmd()
        .current_dir(dir.path())
        .args(["init", "--force"])
        .assert()
        .success();
}

#[test]
fn test_init_with_explicit_directory() {
    let dir = TempDir::new().unwrap();

    kiwi_cmd()
        .arg("init")
        .arg(dir.path())
        .assert()
        .success();

    assert!(dir.path().join("kiwi.yml").is_file());
}

// =============================================================================
// Workspace overview
// =============================================================================

#[test]
fn test_show_lists_projects() {
    let dir = setup_workspace();
    add_project(dir.path(), "web");
    add_project(dir.path(), "db.down");
    fs::create_dir(dir.path().join("docs")).unwrap();

    kiwi_cmd()
        .current_dir(dir.path())
        .arg("show")
        .assert()
        .success()
        .stdout(predicate::str::contains("web"))
        .stdout(predicate::str::contains("db"))
        .stdout(predicate::str::contains("disabled"))
        .stdout(predicate::str::contains("docs").not());
}

#[test]
fn test_show_reports_uninitialized_directory() {
    let dir = TempDir::new().unwrap();

    kiwi_cmd()
        .current_dir(dir.path())
        .arg("show")
        .assert()
        .success()
        .stdout(predicate::str::contains("not initialized"));
}

// =============================================================================
// Grammar
// =============================================================================

#[test]
fn test_missing_subcommand_is_fatal_usage_error() {
    let dir = TempDir::new().unwrap();

    kiwi_cmd()
        .current_dir(dir.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("Usage"));
}

#[test]
fn test_unknown_subcommand_fails() {
    let dir = TempDir::new().unwrap();

    kiwi_cmd()
        .current_dir(dir.path())
        .arg("frobnicate")
        .assert()
        .failure();
}

#[test]
fn test_repeated_verbosity_flags_accepted() {
    let dir = TempDir::new().unwrap();

    kiwi_cmd()
        .current_dir(dir.path())
        .args(["-v", "-v", "show"])
        .assert()
        .success();
}

#[test]
fn test_undeclared_trailing_args_tolerated() {
    let dir = TempDir::new().unwrap();

    kiwi_cmd()
        .current_dir(dir.path())
        .args(["show", "extra", "--whatever"])
        .assert()
        .success();
}

#[test]
fn test_missing_help_text_is_fatal() {
    let empty = TempDir::new().unwrap();
    let dir = TempDir::new().unwrap();

    kiwi_cmd()
        .env("KIWI_HELP_DIR", empty.path())
        .current_dir(dir.path())
        .arg("show")
        .assert()
        .failure()
        .stderr(predicate::str::contains("help text"));
}

// =============================================================================
// Project commands (failure paths, nothing is spawned)
// =============================================================================

#[test]
fn test_cmd_unknown_project_fails() {
    let dir = setup_workspace();

    kiwi_cmd()
        .current_dir(dir.path())
        .args(["cmd", "ghost", "ps"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("ghost"));
}

#[test]
fn test_cmd_without_compose_args_fails() {
    let dir = setup_workspace();
    add_project(dir.path(), "web");

    kiwi_cmd()
        .current_dir(dir.path())
        .args(["cmd", "web"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("No docker-compose command"));
}

#[test]
fn test_logs_disabled_project_fails() {
    let dir = setup_workspace();
    add_project(dir.path(), "db.down");

    kiwi_cmd()
        .current_dir(dir.path())
        .args(["logs", "db"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("disabled"));
}

#[test]
fn test_logs_requires_project_argument() {
    let dir = setup_workspace();

    kiwi_cmd()
        .current_dir(dir.path())
        .arg("logs")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Usage"));
}

#[test]
fn test_shell_requires_service_argument() {
    let dir = setup_workspace();
    add_project(dir.path(), "web");

    kiwi_cmd()
        .current_dir(dir.path())
        .args(["shell", "web"])
        .assert()
        .failure();
}
