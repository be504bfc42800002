use clap::{Args, Parser, Subcommand, ValueEnum};
use owo_colors::OwoColorize;
use std::path::PathBuf;

/// Shared application context for global flags
#[derive(Clone, Debug, Default)]
pub struct AppContext {
    pub quiet: bool,    // global --quiet
    pub no_color: bool, // global --no-color
    pub verbose: bool,  // global --verbose
}

impl AppContext {
    /// Success marker, green unless --no-color.
    pub fn ok(&self, s: &str) -> String {
        if self.no_color { s.to_string() } else { s.green().to_string() }
    }

    /// Warning marker, yellow unless --no-color.
    pub fn warn(&self, s: &str) -> String {
        if self.no_color { s.to_string() } else { s.yellow().to_string() }
    }

    /// Highlight for matched lines, bold unless --no-color.
    pub fn strong(&self, s: &str) -> String {
        if self.no_color { s.to_string() } else { s.bold().to_string() }
    }
}

#[derive(Parser)]
#[command(name = "txk")]
#[command(
    about = "Safe batch operations on text files: analyze, search, replace, reverse and undo"
)]
#[command(version, long_about = None)]
pub struct Cli {
    /// Operation to run; starts the interactive menu when omitted
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Suppress non-essential output (status lines, headers)
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Emit debug logs on stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Print a file with its detected encoding
    Read(PathArgs),

    /// Write or append lines read from stdin (ends at a blank line)
    Write(WriteArgs),

    /// Count lines, words and characters
    Analyze(PathArgs),

    /// Show a file with line numbers
    Number(PathArgs),

    /// Find lines containing a whole word (case-insensitive)
    Search(SearchArgs),

    /// Advanced search: regex, case sensitivity, whole word, context
    Grep(GrepArgs),

    /// Replace a whole word everywhere (case-insensitive), keeping a backup
    Replace(ReplaceArgs),

    /// Write the file's lines in reverse order to a new file
    Reverse(ReverseArgs),

    /// Rank the most frequent words
    Freq(FreqArgs),

    /// Show the first N lines
    Head(PreviewArgs),

    /// Show the last N lines
    Tail(PreviewArgs),

    /// Restore a file from its .bak backup
    Undo(PathArgs),

    /// Run the interactive menu
    Menu,

    /// Initialize a textkit.toml config file
    Init(InitArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

#[derive(Debug, Clone, Args)]
pub struct PathArgs {
    /// Target file
    pub path: PathBuf,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum WriteMode {
    /// Replace the file content (previous content kept in .bak)
    Overwrite,
    /// Add to the end of the file
    Append,
}

#[derive(Debug, Clone, Args)]
pub struct WriteArgs {
    /// Target file
    pub path: PathBuf,

    /// What to do with existing content
    #[arg(long, value_enum, default_value = "overwrite")]
    pub mode: WriteMode,
}

#[derive(Debug, Clone, Args)]
pub struct SearchArgs {
    /// Target file
    pub path: PathBuf,

    /// Word to look for
    pub word: String,
}

#[derive(Debug, Clone, Args)]
pub struct GrepArgs {
    /// Target file
    pub path: PathBuf,

    /// Literal term, or a regular expression with --regex
    pub query: String,

    /// Treat the query as a regular expression
    #[arg(short = 'e', long)]
    pub regex: bool,

    /// Match case exactly
    #[arg(short = 's', long)]
    pub case_sensitive: bool,

    /// Only match whole words (ignored with --regex)
    #[arg(short, long)]
    pub whole_word: bool,

    /// Lines of context around each match (defaults to config)
    #[arg(short = 'C', long)]
    pub context: Option<usize>,
}

#[derive(Debug, Clone, Args)]
pub struct ReplaceArgs {
    /// Target file
    pub path: PathBuf,

    /// Word to find
    pub old: String,

    /// Replacement text (inserted literally)
    pub new: String,
}

#[derive(Debug, Clone, Args)]
pub struct ReverseArgs {
    /// Source file
    pub path: PathBuf,

    /// Output path (defaults to <stem>_reversed<ext> beside the source)
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

#[derive(Debug, Clone, Args)]
pub struct FreqArgs {
    /// Target file
    pub path: PathBuf,

    /// How many words to list (defaults to config)
    #[arg(short = 'n', long)]
    pub top: Option<usize>,
}

#[derive(Debug, Clone, Args)]
pub struct PreviewArgs {
    /// Target file
    pub path: PathBuf,

    /// Number of lines (defaults to config, 10)
    #[arg(short = 'n', long)]
    pub lines: Option<usize>,
}

#[derive(Debug, Clone, Args)]
pub struct InitArgs {
    /// Directory to create textkit.toml in
    #[arg(default_value = ".")]
    pub path: PathBuf,

    /// Overwrite an existing config file
    #[arg(long)]
    pub force: bool,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    #[value(name = "powershell")]
    PowerShell,
    Elvish,
}

#[derive(Debug, Clone, Args)]
pub struct CompletionsArgs {
    /// Target shell
    #[arg(value_enum)]
    pub shell: Shell,

    /// Write to stdout instead of a file
    #[arg(long)]
    pub stdout: bool,

    /// Output directory for the completion file
    #[arg(long)]
    pub out_dir: Option<PathBuf>,
}
