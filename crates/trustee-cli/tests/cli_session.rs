//! End-to-end tests for the trustee CLI session workflow.
#![allow(deprecated)] // Command::cargo_bin – macro replacement not yet stable

use std::fs;
use std::path::Path;
use std::time::{Duration, Instant};

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

use trustee_core::{Roster, derange, session_rng};

const NAMES: [&str; 4] = ["Alice", "Bob", "Carol", "Dave"];
const SEED: &str = "1225";

fn trustee() -> Command {
    Command::cargo_bin("trustee").unwrap()
}

/// Recipient of `giver` for the fixed seed, computed the same way the binary does.
fn expected_recipient(giver: usize) -> String {
    let roster = Roster::new(NAMES).unwrap();
    let assignment = derange(&roster, &mut session_rng(Some(SEED.parse().unwrap()))).unwrap();
    assignment.recipient_of(giver).unwrap().to_string()
}

/// A session with the four names, fixed seed, and session file in `dir`.
fn session(dir: &Path, extra: &[&str]) -> Command {
    let mut cmd = trustee();
    cmd.args(["--seed", SEED, "--state-dir", dir.to_str().unwrap()])
        .args(extra)
        .args(NAMES);
    cmd
}

fn is_empty_dir(dir: &Path) -> bool {
    fs::read_dir(dir).unwrap().next().is_none()
}

// ---------------------------------------------------------------------------
// preconditions
// ---------------------------------------------------------------------------

#[test]
fn single_name_fails() {
    trustee()
        .args(["--seed", "1", "Alice"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("at least 2"));
}

#[test]
fn prompted_single_name_fails() {
    trustee()
        .write_stdin("Alice\n")
        .assert()
        .failure()
        .stderr(predicate::str::contains("at least 2"));
}

#[test]
fn case_duplicates_fail() {
    let dir = TempDir::new().unwrap();
    trustee()
        .args(["--state-dir", dir.path().to_str().unwrap(), "Alice", "Bob", "ALICE"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("duplicate"));
    assert!(is_empty_dir(dir.path()));
}

#[test]
fn negative_timeout_fails() {
    trustee()
        .args(["--timeout=-5", "Alice", "Bob"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("timeout"));
}

#[test]
fn no_enter_with_timeout_fails() {
    trustee()
        .args(["--no-enter", "--timeout", "3", "Alice", "Bob"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--no-enter"));
}

#[test]
fn missing_state_dir_fails() {
    let dir = TempDir::new().unwrap();
    let gone = dir.path().join("gone");
    trustee()
        .args(["--state-dir", gone.to_str().unwrap(), "Alice", "Bob"])
        .write_stdin("quit\n")
        .assert()
        .failure()
        .stderr(predicate::str::contains("temporary session file"));
}

// ---------------------------------------------------------------------------
// reveal flow
// ---------------------------------------------------------------------------

#[test]
fn reveals_only_own_recipient() {
    let dir = TempDir::new().unwrap();
    let recipient = expected_recipient(0);

    let output = session(dir.path(), &[])
        .write_stdin("a\nALICE\n\nquit\n")
        .output()
        .unwrap();
    assert!(output.status.success());

    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.contains("Name not found"));
    assert!(stdout.contains("ONLY FOR Alice"));
    assert!(stdout.contains(&recipient));
    for name in NAMES {
        if name != "Alice" && name != recipient {
            assert!(!stdout.contains(name), "output leaks {name}");
        }
    }
}

#[test]
fn second_lookup_refused() {
    let dir = TempDir::new().unwrap();
    trustee_second_lookup(dir.path(), &[])
        .success()
        .stdout(predicate::str::contains("already viewed"))
        .stdout(predicate::function(|s: &str| {
            s.matches("You will gift to").count() == 1
        }));
}

#[test]
fn second_lookup_allowed_with_repeat() {
    let dir = TempDir::new().unwrap();
    let recipient = expected_recipient(0);
    trustee_second_lookup(dir.path(), &["--allow-repeat"])
        .success()
        .stdout(predicate::str::contains("already viewed").not())
        .stdout(predicate::function(move |s: &str| {
            s.matches("You will gift to").count() == 2 && s.contains(&recipient)
        }));
}

fn trustee_second_lookup(dir: &Path, extra: &[&str]) -> assert_cmd::assert::Assert {
    session(dir, extra)
        .write_stdin("alice\n\nAlice\n\nquit\n")
        .assert()
}

#[test]
fn names_can_be_prompted() {
    let dir = TempDir::new().unwrap();
    let recipient = expected_recipient(1);
    trustee()
        .args(["--seed", SEED, "--no-enter", "--state-dir", dir.path().to_str().unwrap()])
        .write_stdin("Alice, Bob, Carol, Dave\nbob\nquit\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("comma-separated"))
        .stdout(predicate::str::contains(recipient));
}

#[test]
fn same_seed_same_output() {
    let dir = TempDir::new().unwrap();
    let run = || {
        let out = session(dir.path(), &["--no-enter"])
            .write_stdin("carol\ndave\nquit\n")
            .output()
            .unwrap();
        String::from_utf8(out.stdout).unwrap()
    };
    assert_eq!(run(), run());
}

#[test]
fn screen_wiped_after_reveal() {
    let dir = TempDir::new().unwrap();
    let output = session(dir.path(), &["--no-enter"])
        .write_stdin("dave\nquit\n")
        .output()
        .unwrap();
    let stdout = String::from_utf8(output.stdout).unwrap();
    let after = stdout.split("You will gift to").nth(1).unwrap();
    assert!(after.contains("\x1b[2J"));
    assert!(after.contains("\x1b[3J"));
}

#[test]
fn timeout_clears_without_keystroke() {
    let dir = TempDir::new().unwrap();
    let started = Instant::now();
    session(dir.path(), &["--timeout", "1"])
        .write_stdin("bob\nquit\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("automatically cleared in 1 second"));
    assert!(started.elapsed() >= Duration::from_secs(1));
}

#[test]
fn menu_selects_clear_mode() {
    let dir = TempDir::new().unwrap();
    session(dir.path(), &["--menu"])
        .write_stdin("0\ncarol\n\nquit\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Screen clearing: Manual"))
        .stdout(predicate::str::contains("Press Enter to clear"));
}

// ---------------------------------------------------------------------------
// session file lifecycle
// ---------------------------------------------------------------------------

#[test]
fn session_file_removed_after_quit() {
    let dir = TempDir::new().unwrap();
    session(dir.path(), &[])
        .write_stdin("alice\n\nquit\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Temporary file cleaned up"));
    assert!(is_empty_dir(dir.path()));
}

#[test]
fn session_file_removed_after_eof() {
    let dir = TempDir::new().unwrap();
    session(dir.path(), &[])
        .write_stdin("alice\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("EOF received"));
    assert!(is_empty_dir(dir.path()));
}

#[cfg(unix)]
fn send_signal(child: &std::process::Child, signal: &str) {
    let status = std::process::Command::new("kill")
        .args([signal, &child.id().to_string()])
        .status()
        .unwrap();
    assert!(status.success());
}

/// Start a session, wait for its file, deliver `signal` and return the exit code.
#[cfg(unix)]
fn exit_code_after_signal(dir: &Path, signal: &str) -> Option<i32> {
    use std::process::{Command as StdCommand, Stdio};
    use std::thread;

    let mut child = StdCommand::new(assert_cmd::cargo::cargo_bin("trustee"))
        .args(["--state-dir", dir.to_str().unwrap()])
        .args(NAMES)
        .stdin(Stdio::piped())
        .stdout(Stdio::null())
        .spawn()
        .unwrap();

    let deadline = Instant::now() + Duration::from_secs(10);
    while is_empty_dir(dir) {
        assert!(Instant::now() < deadline, "session file never appeared");
        thread::sleep(Duration::from_millis(20));
    }
    // The watcher is handed the path just after the file is written.
    thread::sleep(Duration::from_millis(200));

    send_signal(&child, signal);
    child.wait().unwrap().code()
}

#[cfg(unix)]
#[test]
fn session_file_removed_after_interrupt() {
    let dir = TempDir::new().unwrap();
    assert_eq!(exit_code_after_signal(dir.path(), "-INT"), Some(130));
    assert!(is_empty_dir(dir.path()));
}

#[cfg(unix)]
#[test]
fn session_file_removed_after_hangup() {
    let dir = TempDir::new().unwrap();
    assert_eq!(exit_code_after_signal(dir.path(), "-HUP"), Some(129));
    assert!(is_empty_dir(dir.path()));
}

#[cfg(unix)]
#[test]
fn session_file_removed_after_terminate() {
    let dir = TempDir::new().unwrap();
    assert_eq!(exit_code_after_signal(dir.path(), "-TERM"), Some(143));
    assert!(is_empty_dir(dir.path()));
}

#[cfg(unix)]
#[test]
fn interrupt_before_session_file_exits_cleanly() {
    use std::io::{BufRead, BufReader};
    use std::process::{Command as StdCommand, Stdio};

    let dir = TempDir::new().unwrap();
    let mut child = StdCommand::new(assert_cmd::cargo::cargo_bin("trustee"))
        .args(["--menu", "--state-dir", dir.path().to_str().unwrap()])
        .args(NAMES)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .spawn()
        .unwrap();

    // The menu is printed after the watcher is up and before the file exists.
    let mut stdout = BufReader::new(child.stdout.take().unwrap());
    let mut first = String::new();
    stdout.read_line(&mut first).unwrap();
    assert!(first.contains("====="));

    send_signal(&child, "-INT");
    assert_eq!(child.wait().unwrap().code(), Some(130));
    assert!(is_empty_dir(dir.path()));
    drop(stdout);
}
