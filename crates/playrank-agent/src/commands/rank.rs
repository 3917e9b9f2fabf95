//! `playrank rank`: score canonical games and keep the top K.

use anyhow::Context;
use chrono::{DateTime, Utc};
use clap::Args;
use std::path::PathBuf;
use tracing::info;

use playrank_common::{GameRecord, PlayrankConfig, ScoredGame};
use playrank_ranker::{io::load_games, score_and_rank, RankSummary};

#[derive(Debug, Args)]
pub struct RankArgs {
    /// Canonical or enriched games (JSON array)
    pub input: PathBuf,

    /// Where to write ranked games; stdout when omitted
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Number of games to keep (overrides output.top_k)
    #[arg(long)]
    pub top_k: Option<usize>,

    /// Reference time for freshness (YYYY-MM-DD or RFC 3339); defaults to now
    #[arg(long, value_parser = super::parse_as_of)]
    pub as_of: Option<DateTime<Utc>>,
}

pub fn execute(args: &RankArgs, config: &PlayrankConfig) -> anyhow::Result<Vec<ScoredGame>> {
    let games = load_games(&args.input)
        .with_context(|| format!("Failed to load games from {}", args.input.display()))?;
    let top_k = args.top_k.unwrap_or(config.output.top_k);
    let now = args.as_of.unwrap_or_else(Utc::now);

    let ranked = rank(games, config, top_k, now);
    super::emit(args.output.as_deref(), &ranked)?;
    Ok(ranked)
}

/// Score, rank, and log the headline numbers.
pub fn rank(
    games: Vec<GameRecord>,
    config: &PlayrankConfig,
    top_k: usize,
    now: DateTime<Utc>,
) -> Vec<ScoredGame> {
    info!(top_k, as_of = %now.to_rfc3339(), "Scoring {} games", games.len());
    let ranked = score_and_rank(games, &config.scoring, top_k, now);

    let summary = RankSummary::from_ranked(&ranked);
    info!(
        total = summary.total_games,
        avg_score = summary.avg_score,
        "Ranking complete; top genres: {:?}",
        summary.top_genres
    );
    ranked
}
