//! Writing and appending user-typed content.
//!
//! Content is collected line by line until a blank line or end of input and
//! persisted through the safe writer with a backup.

use std::io::{self, BufRead};
use std::path::Path;

use anyhow::{Context, Result};
use tracing::instrument;

use crate::cli::{AppContext, WriteArgs, WriteMode};
use crate::error::TextError;
use crate::infra::config;
use crate::infra::io::{LoadOptions, read_text_smart};
use crate::infra::write::{WriteOptions, WriteReport, safe_write};

/// Lines typed by the user, joined with '\n'.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Collected {
    /// Joined content with a trailing newline (empty when nothing was typed)
    pub text: String,
    pub lines: usize,
}

/// Read lines until a blank line or end of input.
pub fn collect_lines<R: BufRead>(reader: &mut R) -> io::Result<Collected> {
    let mut out = Collected::default();
    let mut buf = String::new();
    loop {
        buf.clear();
        if reader.read_line(&mut buf)? == 0 {
            break;
        }
        let line = buf.trim_end_matches(['\n', '\r']);
        if line.is_empty() {
            break;
        }
        out.text.push_str(line);
        out.text.push('\n');
        out.lines += 1;
    }
    Ok(out)
}

/// Existing text followed by `data`, with one joiner newline when the
/// existing text is non-empty and lacks a final newline.
pub fn compose_append(existing: &str, data: &str) -> String {
    let mut out = String::with_capacity(existing.len() + data.len() + 1);
    out.push_str(existing);
    if !existing.is_empty() && !existing.ends_with('\n') {
        out.push('\n');
    }
    out.push_str(data);
    out
}

/// Overwrite or append `data` to `path`, keeping a backup of any previous
/// content.
#[instrument(skip(data, opts), fields(len = data.len()))]
pub fn write_text(
    path: &Path,
    data: &str,
    mode: WriteMode,
    opts: &LoadOptions,
) -> Result<WriteReport, TextError> {
    let content = match mode {
        WriteMode::Append if path.exists() => {
            let existing = read_text_smart(path, opts)?;
            compose_append(existing.as_str(), data)
        }
        _ => data.to_string(),
    };
    safe_write(path, &content, WriteOptions::BACKUP)
}

#[instrument(skip(ctx))]
pub fn run(args: WriteArgs, ctx: &AppContext) -> Result<()> {
    let opts = config::current().load_options()?;

    if !ctx.quiet {
        eprintln!("Type content (finish with an empty line):");
    }
    let collected = collect_lines(&mut io::stdin().lock()).context("failed to read input")?;

    let report = write_text(&args.path, &collected.text, args.mode, &opts)
        .with_context(|| format!("cannot write {}", args.path.display()))?;
    report_written(&report, args.mode, collected.lines, ctx);
    Ok(())
}

/// Print the confirmation line shared by the subcommand and the menu.
pub fn report_written(report: &WriteReport, mode: WriteMode, lines: usize, ctx: &AppContext) {
    let shown = dunce::canonicalize(&report.target).unwrap_or_else(|_| report.target.clone());
    let verb = match mode {
        WriteMode::Overwrite => "Wrote",
        WriteMode::Append => "Appended",
    };
    println!("{} {verb} {lines} line(s) -> {}", ctx.ok("✓"), shown.display());
    if !ctx.quiet {
        if let Some(bak) = &report.backup {
            println!("  backup: {}", bak.display());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infra::write::backup_path_for;
    use std::fs;
    use std::io::Cursor;
    use tempfile::TempDir;

    #[test]
    fn collect_stops_at_blank_line() {
        let mut input = Cursor::new("first\r\nsecond\n\nignored\n");
        let c = collect_lines(&mut input).unwrap();
        assert_eq!(c.text, "first\nsecond\n");
        assert_eq!(c.lines, 2);
    }

    #[test]
    fn collect_handles_eof_without_newline() {
        let c = collect_lines(&mut Cursor::new("only")).unwrap();
        assert_eq!(c.text, "only\n");
        let empty = collect_lines(&mut Cursor::new("")).unwrap();
        assert_eq!(empty, Collected::default());
    }

    #[test]
    fn append_inserts_single_joiner() {
        assert_eq!(compose_append("a", "b\n"), "a\nb\n");
        assert_eq!(compose_append("a\n", "b\n"), "a\nb\n");
        assert_eq!(compose_append("", "b\n"), "b\n");
    }

    #[test]
    fn append_normalizes_existing_and_backs_up() {
        let tmp = TempDir::new().unwrap();
        let p = tmp.path().join("log.txt");
        fs::write(&p, "one\r\ntwo").unwrap();

        write_text(&p, "three\n", WriteMode::Append, &LoadOptions::default()).unwrap();
        assert_eq!(fs::read_to_string(&p).unwrap(), "one\ntwo\nthree\n");
        assert_eq!(fs::read(backup_path_for(&p)).unwrap(), b"one\r\ntwo");
    }

    #[test]
    fn append_to_missing_file_creates_it() {
        let tmp = TempDir::new().unwrap();
        let p = tmp.path().join("new.txt");
        let report = write_text(&p, "x\n", WriteMode::Append, &LoadOptions::default()).unwrap();
        assert!(report.backup.is_none());
        assert_eq!(fs::read_to_string(&p).unwrap(), "x\n");
    }

    #[test]
    fn overwrite_keeps_previous_in_backup() {
        let tmp = TempDir::new().unwrap();
        let p = tmp.path().join("f.txt");
        fs::write(&p, "old\n").unwrap();

        write_text(&p, "new\n", WriteMode::Overwrite, &LoadOptions::default()).unwrap();
        assert_eq!(fs::read_to_string(&p).unwrap(), "new\n");
        assert_eq!(fs::read_to_string(backup_path_for(&p)).unwrap(), "old\n");
    }
}
