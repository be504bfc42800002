//! Line search: plain whole-word lookup and the advanced mode with regex,
//! case sensitivity, whole-word enforcement and context windows.
//!
//! Queries are resolved once into a compiled [`Matcher`]; nothing downstream
//! branches on "is this a regex".

use anyhow::{Context, Result};
use regex::{Regex, RegexBuilder};
use tracing::{debug, instrument};

use crate::cli::{AppContext, GrepArgs, SearchArgs};
use crate::error::TextError;
use crate::infra::config;
use crate::infra::io::{EncodedText, read_text_smart};

/// What the user is looking for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Query {
    Literal(String),
    Regex(String),
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SearchOptions {
    pub case_sensitive: bool,
    /// Only applies to `Query::Literal`
    pub whole_word: bool,
    /// Lines shown before and after each hit
    pub context: usize,
}

/// A compiled query.
#[derive(Debug, Clone)]
pub struct Matcher {
    re: Regex,
}

impl Matcher {
    pub fn is_match(&self, line: &str) -> bool {
        self.re.is_match(line)
    }

    pub fn regex(&self) -> &Regex {
        &self.re
    }
}

impl Query {
    pub fn compile(&self, opts: &SearchOptions) -> Result<Matcher, TextError> {
        let pattern = match self {
            Query::Regex(p) => p.clone(),
            Query::Literal(term) if term.is_empty() => {
                return Err(TextError::InvalidPattern("empty search term".into()));
            }
            Query::Literal(term) if opts.whole_word => format!(r"\b{}\b", regex::escape(term)),
            Query::Literal(term) => regex::escape(term),
        };

        let re = RegexBuilder::new(&pattern)
            .case_insensitive(!opts.case_sensitive)
            .build()?;
        Ok(Matcher { re })
    }

    pub fn as_str(&self) -> &str {
        match self {
            Query::Literal(s) | Query::Regex(s) => s,
        }
    }
}

/// Case-insensitive whole-word matcher for `word`.
pub fn whole_word(word: &str) -> Result<Matcher, TextError> {
    Query::Literal(word.to_string()).compile(&SearchOptions {
        case_sensitive: false,
        whole_word: true,
        context: 0,
    })
}

/// Matching logical lines as `(line number, line trimmed)`, ascending.
pub fn word_search(text: &EncodedText, word: &str) -> Result<Vec<(usize, String)>, TextError> {
    let m = whole_word(word)?;
    Ok(text
        .lines()
        .numbered()
        .filter(|(_, line)| m.is_match(line))
        .map(|(n, line)| (n, line.trim().to_string()))
        .collect())
}

/// One printed line of an advanced-search result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContextLine {
    pub number: usize,
    pub text: String,
    pub is_match: bool,
}

/// A run of adjacent lines around one or more hits.
pub type HitGroup = Vec<ContextLine>;

/// Find hits and group them with their context windows. Windows that
/// overlap or touch are merged into one group.
pub fn search(text: &EncodedText, matcher: &Matcher, context: usize) -> Vec<HitGroup> {
    let lines = text.lines();
    let hits: Vec<usize> = lines
        .numbered()
        .filter(|(_, l)| matcher.is_match(l))
        .map(|(n, _)| n)
        .collect();
    debug!(hits = hits.len(), total = lines.len(), "search complete");

    context_windows(&hits, context, lines.len())
        .into_iter()
        .map(|(s, e)| {
            (s..=e)
                .map(|n| ContextLine {
                    number: n,
                    text: lines[n - 1].to_string(),
                    is_match: hits.binary_search(&n).is_ok(),
                })
                .collect()
        })
        .collect()
}

/// Inclusive 1-based windows of `context` lines around each hit, clamped
/// to `1..=last`. `hits` must be ascending; a window that overlaps or
/// touches the previous one extends it instead of opening a new group.
pub fn context_windows(hits: &[usize], context: usize, last: usize) -> Vec<(usize, usize)> {
    let mut windows: Vec<(usize, usize)> = Vec::new();
    for &hit in hits {
        let lo = hit.saturating_sub(context).max(1);
        let hi = hit.saturating_add(context).min(last);
        match windows.last_mut() {
            Some((_, prev_hi)) if lo <= prev_hi.saturating_add(1) => *prev_hi = hi.max(*prev_hi),
            _ => windows.push((lo, hi)),
        }
    }
    windows
}

/// Render groups as `<marker><n>: <line>`; `>` marks hits, `--` separates
/// disjoint groups.
pub fn render_groups(groups: &[HitGroup], width: usize) -> Vec<String> {
    let mut out = Vec::new();
    for (i, group) in groups.iter().enumerate() {
        if i > 0 {
            out.push("--".to_string());
        }
        for line in group {
            let marker = if line.is_match { '>' } else { ' ' };
            out.push(format!("{marker}{:>width$}: {}", line.number, line.text));
        }
    }
    out
}

#[instrument(skip(ctx))]
pub fn run_word(args: SearchArgs, ctx: &AppContext) -> Result<()> {
    let opts = config::current().load_options()?;
    let text = read_text_smart(&args.path, &opts)
        .with_context(|| format!("cannot search {}", args.path.display()))?;

    let hits = word_search(&text, &args.word)?;
    if hits.is_empty() {
        println!("{}", ctx.warn(&format!("No such word: '{}'", args.word)));
        return Ok(());
    }
    for (n, line) in hits {
        println!("{n}:{line}");
    }
    Ok(())
}

#[instrument(skip(ctx))]
pub fn run_advanced(args: GrepArgs, ctx: &AppContext) -> Result<()> {
    let cfg = config::current();
    let load = cfg.load_options()?;

    let query = if args.regex {
        Query::Regex(args.query.clone())
    } else {
        Query::Literal(args.query.clone())
    };
    let opts = SearchOptions {
        case_sensitive: args.case_sensitive,
        whole_word: args.whole_word,
        context: args.context.unwrap_or(cfg.search.context),
    };
    let matcher = query.compile(&opts)?;

    let text = read_text_smart(&args.path, &load)
        .with_context(|| format!("cannot search {}", args.path.display()))?;

    let groups = search(&text, &matcher, opts.context);
    if groups.is_empty() {
        println!("{}", ctx.warn(&format!("No matches for '{}'", query.as_str())));
        return Ok(());
    }

    for line in render_groups(&groups, text.lines().number_width()) {
        if line.starts_with('>') {
            println!("{}", ctx.strong(&line));
        } else {
            println!("{line}");
        }
    }
    Ok(())
}
