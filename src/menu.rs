//! Interactive numbered menu over stdin/stdout.
//!
//! Each choice prompts for its parameters one line at a time and then calls
//! the same operation entry points as the subcommands. End of input at any
//! prompt ends the session cleanly; operation errors are printed as one line
//! and the loop continues.

use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use anyhow::Result;
use tracing::debug;

use crate::cli::{
    AppContext, FreqArgs, GrepArgs, PathArgs, PreviewArgs, ReplaceArgs, ReverseArgs, SearchArgs,
    WriteMode,
};
use crate::core::display::PreviewEnd;
use crate::core::{analyze, display, edit, replace, reverse, search, undo};
use crate::infra::config;

const MENU: &str = "
===TEXT TOOLSET===
 1. Read file
 2. Write file (overwrite / append)
 3. Analyze file
 4. Show with line numbers
 5. Search word
 6. Find and replace
 7. Reverse lines
 8. Word frequency
 9. Advanced search (regex, case, context)
10. Head (first N lines)
11. Tail (last N lines)
12. Undo last write (restore from .bak)
13. Exit";

/// Whether the loop keeps going after a choice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flow {
    Continue,
    Exit,
}

/// Run the menu on the process's stdin.
pub fn run(ctx: &AppContext) -> Result<()> {
    exit_on_interrupt();
    let stdin = io::stdin();
    Menu::new(stdin.lock(), ctx.clone()).run()
}

pub struct Menu<R> {
    input: R,
    ctx: AppContext,
}

impl<R: BufRead> Menu<R> {
    pub fn new(input: R, ctx: AppContext) -> Self {
        Self { input, ctx }
    }

    pub fn run(&mut self) -> Result<()> {
        loop {
            println!("{MENU}");
            let Some(choice) = self.ask("Enter your selection (1-13): ")? else {
                println!("\nExiting");
                return Ok(());
            };

            match self.dispatch(choice.trim()) {
                Ok(Flow::Continue) => {}
                Ok(Flow::Exit) => {
                    println!("Exiting...");
                    return Ok(());
                }
                Err(e) => println!("Error: {e:#}"),
            }
        }
    }

    fn dispatch(&mut self, choice: &str) -> Result<Flow> {
        debug!(choice, "menu selection");
        let ctx = self.ctx.clone();
        match choice {
            "1" => {
                let Some(path) = self.ask_path()? else { return Ok(Flow::Exit) };
                display::run_read(PathArgs { path }, &ctx)?;
            }
            "2" => return self.write_flow(),
            "3" => {
                let Some(path) = self.ask_path()? else { return Ok(Flow::Exit) };
                analyze::run(PathArgs { path }, &ctx)?;
            }
            "4" => {
                let Some(path) = self.ask_path()? else { return Ok(Flow::Exit) };
                display::run_numbered(PathArgs { path }, &ctx)?;
            }
            "5" => {
                let Some(path) = self.ask_path()? else { return Ok(Flow::Exit) };
                let Some(word) = self.ask("Enter the word to search: ")? else {
                    return Ok(Flow::Exit);
                };
                search::run_word(SearchArgs { path, word }, &ctx)?;
            }
            "6" => {
                let Some(path) = self.ask_path()? else { return Ok(Flow::Exit) };
                let Some(old) = self.ask("Word to find: ")? else { return Ok(Flow::Exit) };
                let Some(new) = self.ask("Replace with: ")? else { return Ok(Flow::Exit) };
                replace::run(ReplaceArgs { path, old, new }, &ctx)?;
            }
            "7" => {
                let Some(path) = self.ask_path()? else { return Ok(Flow::Exit) };
                reverse::run(ReverseArgs { path, output: None }, &ctx)?;
            }
            "8" => {
                let Some(path) = self.ask_path()? else { return Ok(Flow::Exit) };
                analyze::run_frequency(FreqArgs { path, top: None }, &ctx)?;
            }
            "9" => return self.advanced_search_flow(),
            "10" | "11" => {
                let end = if choice == "10" { PreviewEnd::Head } else { PreviewEnd::Tail };
                let Some(path) = self.ask_path()? else { return Ok(Flow::Exit) };
                let default = config::current().preview.lines;
                let Some(raw) = self.ask(&format!("How many lines (default {default}): "))? else {
                    return Ok(Flow::Exit);
                };
                let lines = Some(parse_count(&raw, default));
                display::run_preview(PreviewArgs { path, lines }, end, &ctx)?;
            }
            "12" => {
                let Some(path) = self.ask_path()? else { return Ok(Flow::Exit) };
                undo::run(PathArgs { path }, &ctx)?;
            }
            "13" => return Ok(Flow::Exit),
            _ => println!("Invalid selection '{choice}', choose 1-13."),
        }
        Ok(Flow::Continue)
    }

    fn write_flow(&mut self) -> Result<Flow> {
        let Some(path) = self.ask_path()? else { return Ok(Flow::Exit) };

        println!("Type content (finish with an empty line):");
        let collected = edit::collect_lines(&mut self.input)?;

        let mode = if path.exists() {
            let shown = dunce::canonicalize(&path).unwrap_or_else(|_| path.clone());
            let Some(ans) = self.ask(&format!(
                "'{}' exists. [O]verwrite / [A]ppend / [C]ancel: ",
                shown.display()
            ))?
            else {
                return Ok(Flow::Exit);
            };
            match ans.trim().to_lowercase().chars().next() {
                Some('o') => WriteMode::Overwrite,
                Some('a') => WriteMode::Append,
                Some('c') => {
                    println!("Cancelled, nothing written.");
                    return Ok(Flow::Continue);
                }
                _ => {
                    println!("Unknown option, nothing written.");
                    return Ok(Flow::Continue);
                }
            }
        } else {
            WriteMode::Overwrite
        };

        let opts = config::current().load_options()?;
        let report = edit::write_text(&path, &collected.text, mode, &opts)?;
        edit::report_written(&report, mode, collected.lines, &self.ctx);
        Ok(Flow::Continue)
    }

    fn advanced_search_flow(&mut self) -> Result<Flow> {
        let Some(path) = self.ask_path()? else { return Ok(Flow::Exit) };
        let Some(query) = self.ask("Search for: ")? else { return Ok(Flow::Exit) };
        let Some(regex) = self.ask_yes_no("Regex? (y/n): ")? else { return Ok(Flow::Exit) };
        let Some(case_sensitive) = self.ask_yes_no("Case sensitive? (y/n): ")? else {
            return Ok(Flow::Exit);
        };
        let Some(whole_word) = self.ask_yes_no("Whole word? (y/n): ")? else {
            return Ok(Flow::Exit);
        };
        let default = config::current().search.context;
        let Some(raw) = self.ask(&format!("Context lines (default {default}): "))? else {
            return Ok(Flow::Exit);
        };

        let args = GrepArgs {
            path,
            query: query.trim().to_string(),
            regex,
            case_sensitive,
            whole_word,
            context: Some(parse_count(&raw, default)),
        };
        search::run_advanced(args, &self.ctx)?;
        Ok(Flow::Continue)
    }

    /// Print `label` and read one line; `None` at end of input.
    fn ask(&mut self, label: &str) -> io::Result<Option<String>> {
        print!("{label}");
        io::stdout().flush()?;

        // Raw bytes so a line of invalid UTF-8 is just unrecognized input
        let mut raw = Vec::new();
        if self.input.read_until(b'\n', &mut raw)? == 0 {
            return Ok(None);
        }
        let line = String::from_utf8_lossy(&raw);
        Ok(Some(line.trim_end_matches(['\n', '\r']).to_string()))
    }

    fn ask_path(&mut self) -> io::Result<Option<PathBuf>> {
        Ok(self.ask("Enter file path: ")?.map(|raw| expand_path(raw.trim())))
    }

    fn ask_yes_no(&mut self, label: &str) -> io::Result<Option<bool>> {
        Ok(self
            .ask(label)?
            .map(|a| a.trim().to_lowercase().starts_with('y')))
    }
}

/// Ctrl-C at a prompt ends the session like end of input does.
#[cfg(unix)]
fn exit_on_interrupt() {
    extern "C" fn on_interrupt(_sig: libc::c_int) {
        const MSG: &[u8] = b"\nExiting\n";
        // Only async-signal-safe calls here
        unsafe {
            libc::write(libc::STDOUT_FILENO, MSG.as_ptr().cast(), MSG.len());
            libc::_exit(0);
        }
    }

    let handler: extern "C" fn(libc::c_int) = on_interrupt;
    unsafe {
        libc::signal(libc::SIGINT, handler as libc::sighandler_t);
    }
}

#[cfg(not(unix))]
fn exit_on_interrupt() {}

/// Expand `~` and `$VAR`; falls back to the raw text on lookup errors.
pub fn expand_path(raw: &str) -> PathBuf {
    shellexpand::full(raw)
        .map(|s| PathBuf::from(s.as_ref()))
        .unwrap_or_else(|_| PathBuf::from(raw))
}

/// Parse a line count; blank, non-numeric or negative input gives `default`.
pub fn parse_count(raw: &str, default: usize) -> usize {
    raw.trim().parse::<usize>().unwrap_or(default)
}
