//! Shared test utilities for integration tests
//!
//! Provides common fixture creation and helper functions
//! used across multiple test files.

use assert_cmd::Command;
use assert_fs::prelude::*;

/// Build a directory with one file per interesting encoding and layout.
pub fn make_text_fixture() -> assert_fs::TempDir
{
    // Initialize the temporary project root
    let tmp = assert_fs::TempDir::new().expect("tempdir");

    // Plain UTF-8 with a final newline
    tmp.child("notes.txt")
        .write_str("Hello World\nHello there\n")
        .expect("write notes");

    // Five numbered lines for head/tail
    tmp.child("five.txt")
        .write_str("1\n2\n3\n4\n5\n")
        .expect("write five");

    // Windows line endings without a final newline
    tmp.child("crlf.txt")
        .write_str("alpha\r\nbeta\r\ngamma")
        .expect("write crlf");

    // Notepad-style UTF-16 LE with BOM
    let mut utf16 = vec![0xFF, 0xFE];
    for unit in "satır bir\r\nsatır iki\r\n".encode_utf16()
    {
        utf16.extend_from_slice(&unit.to_le_bytes());
    }
    tmp.child("utf16.txt")
        .write_binary(&utf16)
        .expect("write utf16");

    // Legacy Turkish code page: "şeker ğ\n" in windows-1254
    tmp.child("legacy.txt")
        .write_binary(b"\xFEeker \xF0\n")
        .expect("write legacy");

    // Return the prepared directory to the caller
    tmp
}

/// The compiled binary, run inside `dir` with colors off.
pub fn txk(dir: &std::path::Path) -> Command
{
    let mut cmd = Command::cargo_bin("txk").expect("txk binary");
    cmd.current_dir(dir)
        .arg("--no-color")
        .env_remove("TEXTKIT_LOG");
    cmd
}
