use anyhow::Result;
use clap::Parser;
use textkit::cli::{AppContext, Cli, Commands};
use textkit::core::display::PreviewEnd;
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Build a context once, pass everywhere
    let ctx = AppContext {
        quiet: cli.quiet,
        no_color: cli.no_color,
        verbose: cli.verbose,
    };
    init_tracing(&ctx);

    match cli.command {
        None | Some(Commands::Menu) => textkit::menu::run(&ctx),
        Some(Commands::Read(args)) => textkit::core::display::run_read(args, &ctx),
        Some(Commands::Write(args)) => textkit::core::edit::run(args, &ctx),
        Some(Commands::Analyze(args)) => textkit::core::analyze::run(args, &ctx),
        Some(Commands::Number(args)) => textkit::core::display::run_numbered(args, &ctx),
        Some(Commands::Search(args)) => textkit::core::search::run_word(args, &ctx),
        Some(Commands::Grep(args)) => textkit::core::search::run_advanced(args, &ctx),
        Some(Commands::Replace(args)) => textkit::core::replace::run(args, &ctx),
        Some(Commands::Reverse(args)) => textkit::core::reverse::run(args, &ctx),
        Some(Commands::Freq(args)) => textkit::core::analyze::run_frequency(args, &ctx),
        Some(Commands::Head(args)) => {
            textkit::core::display::run_preview(args, PreviewEnd::Head, &ctx)
        }
        Some(Commands::Tail(args)) => {
            textkit::core::display::run_preview(args, PreviewEnd::Tail, &ctx)
        }
        Some(Commands::Undo(args)) => textkit::core::undo::run(args, &ctx),
        Some(Commands::Init(args)) => textkit::infra::config::init(args, &ctx),
        Some(Commands::Completions(args)) => textkit::completion::run(args, &ctx),
    }
}

/// Logs go to stderr; TEXTKIT_LOG overrides the --verbose default.
fn init_tracing(ctx: &AppContext) {
    let default = if ctx.verbose { "textkit=debug" } else { "warn" };
    let filter = EnvFilter::try_from_env("TEXTKIT_LOG").unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(!ctx.no_color)
        .with_target(false)
        .init();
}
