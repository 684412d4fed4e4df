use clap::Parser;
use miette::Result;
use recolour::cli::{Cli, Commands};
use recolour::output::Printer;
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.debug);

    let printer = Printer::new();

    match cli.command {
        Commands::Run(args) => recolour::cli::run::run(args, &printer)?,
        Commands::Filters(args) => recolour::cli::filters::run(args)?,
        Commands::Palette(args) => recolour::cli::palette::run(args, &printer)?,
        Commands::Completions(args) => recolour::cli::completions::run(args, &printer)?,
    }

    Ok(())
}

/// `--debug` first, then `RUST_LOG`, else warnings only.
fn init_logging(debug: bool) {
    let filter = if debug {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
