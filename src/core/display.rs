//! Viewing operations: full read, numbered listing, head and tail.

use anyhow::{Context, Result};
use tracing::instrument;

use crate::cli::{AppContext, PathArgs, PreviewArgs};
use crate::infra::config;
use crate::infra::io::{EncodedText, read_text_smart};

/// Which end of the file a preview takes lines from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PreviewEnd {
    Head,
    Tail,
}

/// Logical lines rendered as `<n right-aligned>: <line trimmed at end>`.
pub fn numbered_lines(text: &EncodedText) -> Vec<String> {
    let lines = text.lines();
    let width = lines.number_width();
    lines
        .numbered()
        .map(|(n, line)| format!("{n:>width$}: {}", line.trim_end()))
        .collect()
}

/// First or last `n` logical lines. `n == 0` yields nothing.
pub fn preview(text: &EncodedText, end: PreviewEnd, n: usize) -> Vec<&str> {
    let lines = text.lines();
    let slice = match end {
        PreviewEnd::Head => lines.head(n),
        PreviewEnd::Tail => lines.tail(n),
    };
    slice.to_vec()
}

#[instrument(skip(ctx))]
pub fn run_read(args: PathArgs, ctx: &AppContext) -> Result<()> {
    let opts = config::current().load_options()?;
    let text = read_text_smart(&args.path, &opts)
        .with_context(|| format!("cannot read {}", args.path.display()))?;

    if !ctx.quiet {
        let shown = dunce::canonicalize(&args.path).unwrap_or_else(|_| args.path.clone());
        println!("--- {} [encoding={}] ---", shown.display(), text.encoding());
    }
    print!("{}", text.as_str());
    if !text.as_str().is_empty() && !text.ends_with_newline() {
        println!();
    }
    Ok(())
}

#[instrument(skip(_ctx))]
pub fn run_numbered(args: PathArgs, _ctx: &AppContext) -> Result<()> {
    let opts = config::current().load_options()?;
    let text = read_text_smart(&args.path, &opts)
        .with_context(|| format!("cannot number {}", args.path.display()))?;

    for line in numbered_lines(&text) {
        println!("{line}");
    }
    Ok(())
}

#[instrument(skip(_ctx))]
pub fn run_preview(args: PreviewArgs, end: PreviewEnd, _ctx: &AppContext) -> Result<()> {
    let cfg = config::current();
    let opts = cfg.load_options()?;
    let n = args.lines.unwrap_or(cfg.preview.lines);

    let text = read_text_smart(&args.path, &opts)
        .with_context(|| format!("cannot preview {}", args.path.display()))?;

    for line in preview(&text, end, n) {
        println!("{line}");
    }
    Ok(())
}
