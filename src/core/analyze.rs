//! Counting operations: line/word/character analysis and word frequency.
//!
//! A word token is a maximal run of word characters and apostrophes between
//! Unicode word boundaries (`\b[\w']+\b`).

use std::sync::LazyLock;

use anyhow::{Context, Result};
use indexmap::IndexMap;
use itertools::Itertools;
use regex::Regex;
use tracing::instrument;

use crate::cli::{AppContext, FreqArgs, PathArgs};
use crate::infra::config;
use crate::infra::io::{EncodedText, read_text_smart};

static WORD_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b[\w']+\b").expect("word pattern compiles"));

/// Counts reported by `analyze`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Analysis {
    /// Raw segments, including the empty one after a final newline
    pub lines: usize,
    pub words: usize,
    /// Unicode scalar values of the normalized text
    pub chars: usize,
}

/// Iterate word tokens of `text` in order.
pub fn tokens(text: &str) -> impl Iterator<Item = &str> {
    WORD_RE.find_iter(text).map(|m| m.as_str())
}

pub fn analyze(text: &EncodedText) -> Analysis {
    Analysis {
        lines: text.segments().len(),
        words: tokens(text.as_str()).count(),
        chars: text.as_str().chars().count(),
    }
}

/// Top `top` lower-cased tokens by count; ties keep first-seen order.
pub fn word_frequency(text: &str, top: usize) -> Vec<(String, usize)> {
    let lowered = text.to_lowercase();
    let mut counts: IndexMap<&str, usize> = IndexMap::new();
    for tok in tokens(&lowered) {
        *counts.entry(tok).or_insert(0) += 1;
    }

    // sorted_by is stable, so equal counts stay in insertion order
    counts
        .into_iter()
        .sorted_by(|a, b| b.1.cmp(&a.1))
        .take(top)
        .map(|(w, n)| (w.to_string(), n))
        .collect()
}

#[instrument(skip(ctx))]
pub fn run(args: PathArgs, ctx: &AppContext) -> Result<()> {
    let opts = config::current().load_options()?;
    let text = read_text_smart(&args.path, &opts)
        .with_context(|| format!("cannot analyze {}", args.path.display()))?;
    let a = analyze(&text);

    if !ctx.quiet {
        println!("{} [encoding={}]", args.path.display(), text.encoding());
    }
    println!("Lines: {}, Words: {}, Characters: {}", a.lines, a.words, a.chars);
    Ok(())
}

#[instrument(skip(ctx))]
pub fn run_frequency(args: FreqArgs, ctx: &AppContext) -> Result<()> {
    let cfg = config::current();
    let opts = cfg.load_options()?;
    let top = args.top.unwrap_or(cfg.frequency.top);

    let text = read_text_smart(&args.path, &opts)
        .with_context(|| format!("cannot rank words in {}", args.path.display()))?;
    let ranked = word_frequency(text.as_str(), top);

    if !ctx.quiet {
        println!("Most common words:");
    }
    for (word, count) in ranked {
        println!("{word}: {count}");
    }
    Ok(())
}
