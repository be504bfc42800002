//! Scripted interactive sessions fed through stdin.

use assert_fs::prelude::*;
use predicates::prelude::*;

mod util;
use util::{make_text_fixture, txk};

#[test]
fn analyze_then_exit() {
    let tmp = make_text_fixture();

    txk(tmp.path())
        .write_stdin("3\nnotes.txt\n13\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("===TEXT TOOLSET==="))
        .stdout(predicate::str::contains("Lines: 3, Words: 4, Characters: 24"))
        .stdout(predicate::str::contains("Exiting..."));
}

#[test]
fn invalid_choice_then_end_of_input() {
    let tmp = make_text_fixture();

    txk(tmp.path())
        .write_stdin("99\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Invalid selection '99'"))
        .stdout(predicate::str::ends_with("Exiting\n"));
}

#[test]
fn errors_do_not_end_the_session() {
    let tmp = make_text_fixture();

    txk(tmp.path())
        .write_stdin("12\nnotes.txt\n3\nmissing.txt\n10\nfive.txt\n2\n13\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Error: cannot undo"))
        .stdout(predicate::str::contains("no backup available"))
        .stdout(predicate::str::contains("file not found"))
        .stdout(predicate::str::contains("How many lines (default 10): 1\n2\n"))
        .stdout(predicate::str::contains("Exiting..."));
}

#[test]
fn write_append_and_undo() {
    let tmp = make_text_fixture();
    let script = concat!(
        // New file: no overwrite/append question
        "2\nlog.txt\nfirst\nsecond\n\n",
        // Existing file: append
        "2\nlog.txt\nthird\n\na\n",
        // Existing file: cancel
        "2\nlog.txt\nnever\n\nc\n",
        "12\nlog.txt\n",
        "13\n",
    );

    txk(tmp.path())
        .write_stdin(script)
        .assert()
        .success()
        .stdout(predicate::str::contains("Wrote 2 line(s)"))
        .stdout(predicate::str::contains("Appended 1 line(s)"))
        .stdout(predicate::str::contains("Cancelled, nothing written."))
        .stdout(predicate::str::contains("Restored from"));

    tmp.child("log.txt")
        .assert("first\nsecond\n");
    tmp.child("log.txt.bak")
        .assert("first\nsecond\n");
}

#[test]
fn advanced_search_prompts_in_order() {
    let tmp = make_text_fixture();

    txk(tmp.path())
        .write_stdin("9\nnotes.txt\nHELLO\nn\nn\ny\n\n13\n")
        .assert()
        .success()
        .stdout(predicate::str::contains(">1: Hello World"))
        .stdout(predicate::str::contains(">2: Hello there"));
}

#[test]
fn blank_preview_count_uses_default() {
    let tmp = make_text_fixture();

    txk(tmp.path())
        .write_stdin("11\nfive.txt\n\n13\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("1\n2\n3\n4\n5\n"));
}

#[cfg(unix)]
#[test]
fn interrupt_at_prompt_ends_session_cleanly() {
    use std::process::{Command, Stdio};
    use std::thread;
    use std::time::Duration;

    let tmp = make_text_fixture();
    let mut child = Command::new(assert_cmd::cargo::cargo_bin("txk"))
        .current_dir(tmp.path())
        .arg("--no-color")
        .env_remove("TEXTKIT_LOG")
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .spawn()
        .expect("spawn txk");

    // Leave stdin open so the menu blocks at the selection prompt
    thread::sleep(Duration::from_millis(500));
    let rc = unsafe { libc::kill(child.id() as libc::pid_t, libc::SIGINT) };
    assert_eq!(rc, 0);

    let out = child
        .wait_with_output()
        .expect("wait txk");
    assert!(out.status.success());
    let stdout = String::from_utf8_lossy(&out.stdout);
    assert!(stdout.contains("Enter your selection (1-13): "));
    assert!(stdout.ends_with("\nExiting\n"));
}
