mod cli;
mod commands;

use cli::{Cli, Commands};
use commands::{classify, config, render};
use tracing_subscriber::EnvFilter;

/// `-v` raises the default level; `RUST_LOG` wins when set.
fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

pub fn run() -> anyhow::Result<()> {
    use clap::Parser;

    let cli = Cli::parse();
    init_tracing(cli.verbose);
    match &cli.command {
        Commands::Render(args) => render::run(&cli, args),
        Commands::Classify(args) => classify::run(&cli, args),
        Commands::Config(args) => config::run(&cli, args),
    }
}

fn main() -> anyhow::Result<()> { run() }
