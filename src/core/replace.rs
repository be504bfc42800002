//! Whole-word, case-insensitive find-and-replace persisted through the
//! safe writer with a backup.

use std::path::Path;

use anyhow::{Context, Result};
use regex::NoExpand;
use tracing::{info, instrument};

use crate::cli::{AppContext, ReplaceArgs};
use crate::core::search::whole_word;
use crate::error::TextError;
use crate::infra::config;
use crate::infra::io::{LoadOptions, read_text_smart};
use crate::infra::write::{WriteOptions, WriteReport, safe_write};

/// Result of replacing in memory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Replaced {
    pub text: String,
    pub count: usize,
}

/// Outcome of a replace operation on disk.
#[derive(Debug)]
pub enum ReplaceOutcome {
    /// No occurrence; nothing was written
    NotFound,
    Replaced { count: usize, report: WriteReport },
}

/// Replace every whole-word occurrence of `old` with the literal `new`.
pub fn replace_whole_word(text: &str, old: &str, new: &str) -> Result<Replaced, TextError> {
    let m = whole_word(old)?;
    let count = m.regex().find_iter(text).count();
    if count == 0 {
        return Ok(Replaced {
            text: text.to_string(),
            count,
        });
    }
    let text = m.regex().replace_all(text, NoExpand(new)).into_owned();
    Ok(Replaced { text, count })
}

/// Load, replace and persist (with backup) when anything matched.
#[instrument(skip(opts))]
pub fn find_and_replace(
    path: &Path,
    old: &str,
    new: &str,
    opts: &LoadOptions,
) -> Result<ReplaceOutcome, TextError> {
    let loaded = read_text_smart(path, opts)?;
    let replaced = replace_whole_word(loaded.as_str(), old, new)?;
    if replaced.count == 0 {
        return Ok(ReplaceOutcome::NotFound);
    }

    let report = safe_write(path, &replaced.text, WriteOptions::BACKUP)?;
    info!(count = replaced.count, "replaced occurrences");
    Ok(ReplaceOutcome::Replaced {
        count: replaced.count,
        report,
    })
}

#[instrument(skip(ctx))]
pub fn run(args: ReplaceArgs, ctx: &AppContext) -> Result<()> {
    let opts = config::current().load_options()?;
    let outcome = find_and_replace(&args.path, &args.old, &args.new, &opts)
        .with_context(|| format!("cannot replace in {}", args.path.display()))?;

    match outcome {
        ReplaceOutcome::NotFound => {
            println!("{}", ctx.warn(&format!("Word not found: '{}'", args.old)));
        }
        ReplaceOutcome::Replaced { count, report } => {
            println!(
                "{} {count} occurrence(s) of '{}' replaced with '{}'",
                ctx.ok("✓"),
                args.old,
                args.new
            );
            if !ctx.quiet {
                if let Some(bak) = report.backup {
                    println!("  backup: {}", bak.display());
                }
            }
        }
    }
    Ok(())
}
