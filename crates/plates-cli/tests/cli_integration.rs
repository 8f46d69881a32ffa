//! Integration tests for CLI behavior
//!
//! These drive the built `plates` binary against a temporary home directory,
//! so nothing touches the user's ~/.plates.

use std::fs;
use std::io::Write;
use std::path::Path;
use std::process::{Command, Output, Stdio};
use tempfile::TempDir;

/// Run plates with PLATES_HOME set to `home`.
fn run_plates(home: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_plates"))
        .args(args)
        .env("PLATES_HOME", home)
        .env_remove("RUST_LOG")
        .current_dir(home)
        .stdin(Stdio::null())
        .output()
        .expect("failed to run plates")
}

/// Run `plates shell` feeding `script` on stdin.
fn run_shell(home: &Path, args: &[&str], script: &str) -> Output {
    let mut child = Command::new(env!("CARGO_BIN_EXE_plates"))
        .arg("shell")
        .args(args)
        .env("PLATES_HOME", home)
        .env_remove("RUST_LOG")
        .current_dir(home)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("failed to run plates shell");
    child
        .stdin
        .take()
        .unwrap()
        .write_all(script.as_bytes())
        .unwrap();
    child.wait_with_output().expect("failed to wait for plates")
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).to_string()
}

fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).to_string()
}

fn working_file(home: &Path) -> String {
    fs::read_to_string(home.join("plates.txt")).expect("working file should exist")
}

// =============================================================================
// Basic flags
// =============================================================================

#[test]
fn integration_help_flag() {
    let output = Command::new(env!("CARGO_BIN_EXE_plates"))
        .arg("--help")
        .output()
        .expect("failed to run plates");
    assert!(output.status.success());
    let out = stdout(&output);
    assert!(out.contains("plates"));
    assert!(out.contains("Usage"));
}

#[test]
fn integration_version_flag() {
    let output = Command::new(env!("CARGO_BIN_EXE_plates"))
        .arg("--version")
        .output()
        .expect("failed to run plates");
    assert!(output.status.success());
    assert!(stdout(&output).contains("plates"));
}

#[test]
fn integration_conflicting_strategies_rejected() {
    let home = TempDir::new().unwrap();
    let output = run_plates(home.path(), &["search", "1ABC-123", "--binary", "--sequential"]);
    assert!(!output.status.success());
}

// =============================================================================
// One-shot commands on the working file
// =============================================================================

#[test]
fn integration_insert_persists_to_working_file() {
    let home = TempDir::new().unwrap();
    let output = run_plates(home.path(), &["insert", "1XYZ-999"]);
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert!(stdout(&output).contains("Added 1XYZ-999"));

    run_plates(home.path(), &["insert", "1ABC-123"]);
    assert_eq!(
        working_file(home.path()),
        "Untagged:\n1ABC-123\n1XYZ-999\nTagged:\n"
    );
}

#[test]
fn integration_invalid_plate_fails() {
    let home = TempDir::new().unwrap();
    let output = run_plates(home.path(), &["insert", "1abc-123"]);
    assert!(!output.status.success());
    assert!(stderr(&output).contains("invalid plate format"));
    assert!(!home.path().join("plates.txt").exists());
}

#[test]
fn integration_duplicate_fails_without_changes() {
    let home = TempDir::new().unwrap();
    run_plates(home.path(), &["insert", "1ABC-123"]);
    run_plates(home.path(), &["tag", "1ABC-123"]);
    let before = working_file(home.path());
    let output = run_plates(home.path(), &["insert", "1ABC-123"]);
    assert!(!output.status.success());
    assert!(stderr(&output).contains("duplicate"));
    assert_eq!(working_file(home.path()), before);
}

#[test]
fn integration_tag_and_search() {
    let home = TempDir::new().unwrap();
    run_plates(home.path(), &["insert", "1AAA-000"]);
    run_plates(home.path(), &["insert", "1BBB-000"]);
    let output = run_plates(home.path(), &["tag", "1BBB-000"]);
    assert!(output.status.success());

    let output = run_plates(home.path(), &["search", "1BBB-000", "--sequential"]);
    assert!(output.status.success());
    assert!(stdout(&output).contains("Found 1BBB-000 in tagged at index 0 (sequential search)"));

    let output = run_plates(home.path(), &["search", "1CCC-000"]);
    assert!(!output.status.success());
    assert!(stderr(&output).contains("no match found"));
}

#[test]
fn integration_list_shows_both_partitions() {
    let home = TempDir::new().unwrap();
    run_plates(home.path(), &["insert", "1AAA-000"]);
    let output = run_plates(home.path(), &["list"]);
    assert!(output.status.success());
    assert_eq!(stdout(&output), "Untagged (1):\n  1AAA-000\nTagged (0):\n");
}

#[test]
fn integration_reset_needs_confirmation() {
    let home = TempDir::new().unwrap();
    run_plates(home.path(), &["insert", "1AAA-000"]);

    // stdin is not a terminal, so the prompt is declined
    let output = run_plates(home.path(), &["reset-all"]);
    assert!(output.status.success());
    assert!(stdout(&output).contains("Aborted reset_all"));
    assert!(working_file(home.path()).contains("1AAA-000"));

    let output = run_plates(home.path(), &["reset-all", "--yes"]);
    assert!(output.status.success());
    assert_eq!(working_file(home.path()), "Untagged:\nTagged:\n");
}

#[test]
fn integration_reset_tagged_on_empty_fails() {
    let home = TempDir::new().unwrap();
    run_plates(home.path(), &["insert", "1AAA-000"]);
    let output = run_plates(home.path(), &["reset-tagged", "-y"]);
    assert!(!output.status.success());
    assert!(stderr(&output).contains("nothing to reset"));
}

#[test]
fn integration_import_reports_skipped_lines() {
    let home = TempDir::new().unwrap();
    let import = home.path().join("in.txt");
    fs::write(&import, "Untagged:\n1AAA-000\nnope\nTagged:\n1BBB-000\n").unwrap();
    let output = run_plates(home.path(), &["import", import.to_str().unwrap()]);
    assert!(output.status.success());
    assert!(stdout(&output).contains("Imported 2 plate(s)"));
    assert!(stderr(&output).contains("line 3: 'nope' (invalid format)"));
    assert_eq!(
        working_file(home.path()),
        "Untagged:\n1AAA-000\nTagged:\n1BBB-000\n"
    );
}

#[test]
fn integration_import_malformed_fails() {
    let home = TempDir::new().unwrap();
    let import = home.path().join("in.txt");
    fs::write(&import, "Tagged:\n1AAA-000\n").unwrap();
    let output = run_plates(home.path(), &["import", import.to_str().unwrap()]);
    assert!(!output.status.success());
    assert!(stderr(&output).contains("not in the correct format"));
}

#[test]
fn integration_export_to_day_files() {
    let home = TempDir::new().unwrap();
    let saves = home.path().join("saves");
    let saves_arg = saves.to_str().unwrap();

    let output = run_plates(home.path(), &["export", "--save-dir", saves_arg]);
    assert!(!output.status.success());
    assert!(stderr(&output).contains("no plates to save"));

    run_plates(home.path(), &["insert", "1AAA-000"]);
    run_plates(home.path(), &["export", "--save-dir", saves_arg]);
    run_plates(home.path(), &["export", "--save-dir", saves_arg]);
    assert!(saves.join("day_01.txt").exists());
    assert!(saves.join("day_02.txt").exists());
}

#[test]
fn integration_config_file_is_honoured() {
    let home = TempDir::new().unwrap();
    fs::write(
        home.path().join("config.toml"),
        "search_strategy = \"sequential\"\nworking_file = \"other.txt\"\n",
    )
    .unwrap();
    run_plates(home.path(), &["insert", "1AAA-000"]);
    assert!(home.path().join("other.txt").exists());
    let output = run_plates(home.path(), &["search", "1AAA-000"]);
    assert!(stdout(&output).contains("(sequential search)"));
}

#[test]
fn integration_bad_config_reports_error() {
    let home = TempDir::new().unwrap();
    fs::write(home.path().join("config.toml"), "search_strategy = 3\n").unwrap();
    let output = run_plates(home.path(), &["list"]);
    assert!(!output.status.success());
    assert!(stderr(&output).contains("config.toml"));
}

// =============================================================================
// Shell sessions
// =============================================================================

#[test]
fn integration_shell_tracks_selection_and_auto_saves() {
    let home = TempDir::new().unwrap();
    let output = run_shell(
        home.path(),
        &[],
        "insert 1AAA-000\ninsert 1BBB-000\ntag\nselect 1AAA-000\nedit 1CCC-000\nquit\n",
    );
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    let out = stdout(&output);
    assert!(out.contains("Tagged 1BBB-000"));
    assert!(out.contains("Changed 1AAA-000 to 1CCC-000"));
    assert_eq!(
        fs::read_to_string(home.path().join("day_01.txt")).unwrap(),
        "Untagged:\n1CCC-000\nTagged:\n1BBB-000\n"
    );
}

#[test]
fn integration_shell_without_auto_save() {
    let home = TempDir::new().unwrap();
    let output = run_shell(home.path(), &["--no-auto-save"], "insert 1AAA-000\n");
    assert!(output.status.success());
    assert!(!home.path().join("day_01.txt").exists());
}

#[test]
fn integration_shell_errors_do_not_end_session() {
    let home = TempDir::new().unwrap();
    let output = run_shell(home.path(), &[], "tag\nfrobnicate\ninsert 1AAA-000\n");
    assert!(output.status.success());
    assert!(stderr(&output).contains("no plate selected"));
    assert!(stdout(&output).contains("Added 1AAA-000"));
    assert!(home.path().join("day_01.txt").exists());
}

#[test]
fn integration_shell_reset_answered_on_next_line() {
    let home = TempDir::new().unwrap();
    let output = run_shell(
        home.path(),
        &[],
        "insert 1AAA-000\nreset-all\ny\nlist\ninsert 1BBB-000\n",
    );
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    let out = stdout(&output);
    assert!(out.contains("Cleared 1 plate(s)"));
    assert!(out.contains("Untagged (0):"));
    assert_eq!(
        fs::read_to_string(home.path().join("day_01.txt")).unwrap(),
        "Untagged:\n1BBB-000\nTagged:\n"
    );
}

#[test]
fn integration_shell_load_merges_file_first() {
    let home = TempDir::new().unwrap();
    let import = home.path().join("yesterday.txt");
    fs::write(&import, "Untagged:\n1AAA-000\nTagged:\n").unwrap();
    let output = run_shell(
        home.path(),
        &["--load", import.to_str().unwrap(), "--no-auto-save"],
        "insert 1AAA-000\nlist\n",
    );
    assert!(output.status.success());
    assert!(stderr(&output).contains("duplicate plate found"));
    assert!(stdout(&output).contains("Untagged (1):\n  1AAA-000"));
}
