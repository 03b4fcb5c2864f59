//! End-to-end tests for the cmdterm binary

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

fn cmdterm(dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("cmdterm").unwrap();
    cmd.current_dir(dir.path()).env_remove("RUST_LOG");
    cmd
}

#[test]
fn test_command_flag_prints_output() {
    let dir = TempDir::new().unwrap();
    cmdterm(&dir)
        .args(["-c", "print a b c", "--color", "never"])
        .assert()
        .success()
        .stdout("a b c\n");
}

#[test]
fn test_failed_command_sets_exit_code() {
    let dir = TempDir::new().unwrap();
    cmdterm(&dir)
        .args(["-c", "unknowncmd", "-c", "print after", "--color", "never"])
        .assert()
        .code(1)
        .stdout("Command not found: UNKNOWNCMD\nafter\n");
}

#[test]
fn test_reads_lines_from_stdin() {
    let dir = TempDir::new().unwrap();
    cmdterm(&dir)
        .arg("--color=never")
        .write_stdin("print one\n\nmodel list\nquit\nprint never\n")
        .assert()
        .success()
        .stdout("one\nListing all models...\n");
}

#[test]
fn test_stdin_errors_do_not_change_exit_code() {
    let dir = TempDir::new().unwrap();
    cmdterm(&dir)
        .arg("--color=never")
        .write_stdin("model bogus\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Unknown mode 'bogus'"));
}

#[test]
fn test_invalid_utf8_line_on_stdin_is_skipped() {
    let dir = TempDir::new().unwrap();
    cmdterm(&dir)
        .arg("--color=never")
        .write_stdin(&b"print before\nprint \xff\nprint after\n"[..])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("before\nInput line is not valid UTF-8"))
        .stdout(predicate::str::ends_with("\nafter\n"));
}

#[test]
fn test_jsonl_output() {
    let dir = TempDir::new().unwrap();
    cmdterm(&dir)
        .args(["--format", "jsonl", "-c", "print hi", "-c", "clear extra"])
        .assert()
        .code(1)
        .stdout(predicate::str::contains(
            r#"{"type":"entry","severity":"message","text":"hi"}"#,
        ))
        .stdout(predicate::str::contains(r#""severity":"error""#))
        .stdout(predicate::str::contains(
            r#"{"type":"status","lines":2,"failed":1,"quit":false}"#,
        ));
}

#[test]
fn test_default_config_file_is_used() {
    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join("cmdterm.toml"),
        "[shell]\necho_input = true\n\n[output]\ncolor = \"never\"\n",
    )
    .unwrap();

    cmdterm(&dir)
        .args(["-c", "print hi"])
        .assert()
        .success()
        .stdout("> print hi\nhi\n");
}

#[test]
fn test_invalid_config_is_startup_error() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("cmdterm.toml"), "[shell]\nbuffer_size = 0\n").unwrap();

    cmdterm(&dir)
        .args(["-c", "print hi"])
        .assert()
        .code(2)
        .stdout("")
        .stderr(predicate::str::contains("shell.buffer_size"));
}

#[test]
fn test_missing_explicit_config_is_startup_error() {
    let dir = TempDir::new().unwrap();
    cmdterm(&dir)
        .args(["--config", "absent.toml", "-c", "help"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("absent.toml"));
}
