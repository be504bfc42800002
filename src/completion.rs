//! `txk completions <shell>`: completion scripts rendered from the clap
//! command tree, printed or saved through the safe writer.

use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::CommandFactory;
use clap_complete::{Generator, Shell as CompletionShell, generate};

use crate::cli::{AppContext, Cli, CompletionsArgs, Shell};
use crate::infra::write::{WriteOptions, safe_write};

pub const BIN_NAME: &str = "txk";

impl From<Shell> for CompletionShell {
    fn from(shell: Shell) -> Self {
        match shell {
            Shell::Bash => CompletionShell::Bash,
            Shell::Zsh => CompletionShell::Zsh,
            Shell::Fish => CompletionShell::Fish,
            Shell::PowerShell => CompletionShell::PowerShell,
            Shell::Elvish => CompletionShell::Elvish,
        }
    }
}

/// Completion script for `shell`.
pub fn render(shell: Shell) -> Result<String> {
    let mut buf = Vec::new();
    generate(CompletionShell::from(shell), &mut Cli::command(), BIN_NAME, &mut buf);
    String::from_utf8(buf).context("completion script is not UTF-8")
}

/// Conventional file name for `shell`, e.g. `txk.bash` or `_txk`.
pub fn script_name(shell: Shell) -> String {
    CompletionShell::from(shell).file_name(BIN_NAME)
}

pub fn run(args: CompletionsArgs, ctx: &AppContext) -> Result<()> {
    let script = render(args.shell)?;

    if args.stdout {
        io::stdout()
            .write_all(script.as_bytes())
            .context("write completion to stdout")?;
        return Ok(());
    }

    let dir: PathBuf = args
        .out_dir
        .context("--out-dir is required unless --stdout is set")?;
    fs::create_dir_all(&dir).with_context(|| format!("create {}", dir.display()))?;

    let path = dir.join(script_name(args.shell));
    safe_write(&path, &script, WriteOptions::NO_BACKUP)
        .with_context(|| format!("write completion to {}", path.display()))?;

    if !ctx.quiet {
        eprintln!("Wrote completion to {}", path.display());
    }
    Ok(())
}
