//! Line reversal into a derived `<stem>_reversed<ext>` file.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::instrument;

use crate::cli::{AppContext, ReverseArgs};
use crate::error::TextError;
use crate::infra::config;
use crate::infra::encoding::DetectedEncoding;
use crate::infra::io::{LoadOptions, read_text_smart};
use crate::infra::write::{WriteOptions, safe_write};

/// Result of writing a reversed copy.
#[derive(Debug, Clone)]
pub struct Reversed {
    pub output: PathBuf,
    pub encoding: DetectedEncoding,
    pub lines: usize,
}

/// `dir/notes.txt` → `dir/notes_reversed.txt`; `dir/README` → `dir/README_reversed`.
pub fn reversed_path_for(path: &Path) -> PathBuf {
    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    let name = match path.extension() {
        Some(ext) => format!("{stem}_reversed.{}", ext.to_string_lossy()),
        None => format!("{stem}_reversed"),
    };
    path.with_file_name(name)
}

/// Write the logical lines of `path` in reverse order. The output is a new
/// derived file, so no backup is rotated.
#[instrument(skip(opts))]
pub fn reverse_file(
    path: &Path,
    output: Option<&Path>,
    opts: &LoadOptions,
) -> Result<Reversed, TextError> {
    let text = read_text_smart(path, opts)?;
    let lines = text.lines();
    let body = lines.reversed_text();

    let output = output.map_or_else(|| reversed_path_for(path), Path::to_path_buf);
    safe_write(&output, &body, WriteOptions::NO_BACKUP)?;

    Ok(Reversed {
        output,
        encoding: text.encoding(),
        lines: lines.len(),
    })
}

#[instrument(skip(ctx))]
pub fn run(args: ReverseArgs, ctx: &AppContext) -> Result<()> {
    let opts = config::current().load_options()?;
    let rev = reverse_file(&args.path, args.output.as_deref(), &opts)
        .with_context(|| format!("reverse failed for {}", args.path.display()))?;

    let shown = dunce::canonicalize(&rev.output).unwrap_or_else(|_| rev.output.clone());
    println!(
        "{} reversed {} line(s) (encoding={}) -> {}",
        ctx.ok("[OK]"),
        rev.lines,
        rev.encoding,
        shown.display()
    );
    Ok(())
}
