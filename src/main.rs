use anyhow::Result;
use clap::Parser;
use scopegrep::cli::{AppContext, Cli, Commands};

fn main() -> Result<()> {
    init_tracing();

    let cli = Cli::parse();

    // Build a context once, pass everywhere
    let ctx = AppContext {
        quiet: cli.quiet,
        no_color: cli.no_color,
    };

    match cli.command {
        Commands::Search(args) => scopegrep::search_run(args, &ctx),
        Commands::Overview(args) => scopegrep::overview_run(args, &ctx),
        Commands::Init(args) => scopegrep::infra::config::init(args, &ctx),
        Commands::Completions(args) => scopegrep::completion::run(args, &ctx),
    }
}

/// `RUST_LOG` wins; otherwise only warnings, always on stderr.
fn init_tracing() {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}
