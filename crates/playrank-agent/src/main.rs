//! Playrank: Play Store game ranking pipeline.
//! Entry point for the `playrank` binary.

mod commands;
mod config;

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

use commands::{IngestArgs, RankArgs, RunArgs};

#[derive(Debug, Parser)]
#[command(name = "playrank", version, about = "Rank Play Store games by quality, freshness and popularity")]
struct Cli {
    /// Config file (TOML, YAML or JSON); falls back to PLAYRANK_CONFIG, then ./playrank.toml
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Debug-level logging unless RUST_LOG says otherwise
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Normalise, filter and deduplicate raw storefront results
    Ingest(IngestArgs),
    /// Score and rank canonical games
    Rank(RankArgs),
    /// Ingest then rank, writing dated run artifacts
    Run(RunArgs),
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Logs go to stderr; stdout carries JSON.
    let default_filter = if cli.verbose { "playrank=debug,info" } else { "playrank=info,warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(default_filter)),
        )
        .with_writer(std::io::stderr)
        .init();

    info!("Version: {}", env!("CARGO_PKG_VERSION"));

    let config = config::load(cli.config.as_deref())?;

    match &cli.command {
        Command::Ingest(args) => {
            commands::ingest::execute(args, &config)?;
        }
        Command::Rank(args) => {
            commands::rank::execute(args, &config)?;
        }
        Command::Run(args) => {
            commands::run::execute(args, &config)?;
        }
    }
    Ok(())
}
