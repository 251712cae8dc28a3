use clap::Parser;
use map2tscn::cli::{Cli, Commands};
use map2tscn::output::Printer;
use miette::Result;
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(cli.log_level())),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let printer = Printer::new();

    match cli.command {
        Commands::Convert(args) => map2tscn::cli::convert::run(args, &printer)?,
        Commands::Validate(args) => map2tscn::cli::validate::run(args, &printer)?,
        Commands::Stats(args) => map2tscn::cli::stats::run(args, &printer)?,
        Commands::Init(args) => map2tscn::cli::init::run(args, &printer)?,
        Commands::Completions(args) => map2tscn::cli::completions::run(args)?,
    }

    Ok(())
}
