//! `playrank ingest`: normalise, filter and deduplicate raw storefront records.

use anyhow::Context;
use clap::Args;
use std::path::PathBuf;
use tracing::info;

use playrank_common::PlayrankConfig;
use playrank_ingestion::{ingest_file, IngestionOutput};

#[derive(Debug, Args)]
pub struct IngestArgs {
    /// Raw storefront results (JSON array)
    pub input: PathBuf,

    /// Where to write canonical games; stdout when omitted
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Keep non-game apps
    #[arg(long)]
    pub no_filter: bool,
}

pub fn execute(args: &IngestArgs, config: &PlayrankConfig) -> anyhow::Result<IngestionOutput> {
    let mut cfg = config.ingestion.clone();
    if args.no_filter {
        cfg.filter_games = false;
    }

    let out = ingest_file(&args.input, &cfg)
        .with_context(|| format!("Failed to ingest {}", args.input.display()))?;

    let r = &out.report;
    info!(
        fetched = r.fetched,
        normalized = r.normalized,
        failed = r.failed,
        games = r.games,
        unique = r.unique,
        "Ingestion complete"
    );

    super::emit(args.output.as_deref(), &out.games)?;
    Ok(out)
}
