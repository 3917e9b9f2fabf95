//! End-to-end ingestion pipeline.
//!
//! Orchestrates the flow for one batch of raw storefront results:
//!   1. Normalise each raw record (failures are skipped, not fatal)
//!   2. Filter to games
//!   3. Deduplicate by package name
//!
//! Fetching the raw records is the caller's business; this stage only sees
//! the JSON they produced.

use std::path::Path;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{info, warn};

use playrank_common::{GameRecord, IngestionConfig};

use crate::dedup::deduplicate;
use crate::filter::filter_games;
use crate::normalise::normalize_game;

/// Counts recorded at each stage of a run.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct IngestionReport {
    /// Raw records received
    pub fetched: usize,
    /// Records that normalised cleanly
    pub normalized: usize,
    /// Records skipped because normalisation failed
    pub failed: usize,
    /// Records left after game filtering
    pub games: usize,
    /// Records left after deduplication
    pub unique: usize,
}

/// Canonical games plus the stage counts that produced them.
#[derive(Debug, Clone)]
pub struct IngestionOutput {
    pub games: Vec<GameRecord>,
    pub report: IngestionReport,
}

/// Run normalise → filter → dedup over a batch of raw records.
pub fn run_ingestion(raw_items: &[Value], cfg: &IngestionConfig) -> IngestionOutput {
    let mut report = IngestionReport {
        fetched: raw_items.len(),
        ..Default::default()
    };

    info!("Normalizing {} raw items", raw_items.len());
    let mut normalized = Vec::with_capacity(raw_items.len());
    for (idx, item) in raw_items.iter().enumerate() {
        match normalize_game(item) {
            Ok(game) => normalized.push(game),
            Err(e) => {
                warn!("Failed to normalize item #{idx}: {e}");
                report.failed += 1;
            }
        }
    }
    report.normalized = normalized.len();
    info!("Normalized {} items ({} skipped)", report.normalized, report.failed);

    let games = if cfg.filter_games {
        filter_games(normalized, &cfg.game_genres)
    } else {
        normalized
    };
    report.games = games.len();

    let games = deduplicate(games);
    report.unique = games.len();

    IngestionOutput { games, report }
}

/// Read a raw JSON array from `path` and ingest it.
pub fn ingest_file(
    path: impl AsRef<Path>,
    cfg: &IngestionConfig,
) -> playrank_common::Result<IngestionOutput> {
    let raw_items = playrank_common::io::read_json_array_file(path)?;
    Ok(run_ingestion(&raw_items, cfg))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use playrank_test_utils::raw_play_item;
    use serde_json::json;

    #[test]
    fn test_pipeline_counts() {
        let raw = vec![
            raw_play_item("com.a", "Alpha", "Action"),
            raw_play_item("com.calc", "Calculator", "Tools"),
            json!("not a record"),
            raw_play_item("com.a", "Alpha again", "Action"),
            raw_play_item("com.b", "Beta Game", "Tools"),
        ];
        let out = run_ingestion(&raw, &IngestionConfig::default());

        assert_eq!(
            out.report,
            IngestionReport { fetched: 5, normalized: 4, failed: 1, games: 3, unique: 2 }
        );
        let pkgs: Vec<_> = out.games.iter().map(|g| g.package_name.as_str()).collect();
        assert_eq!(pkgs, vec!["com.a", "com.b"]);
        assert_eq!(out.games[0].title, "Alpha");
    }

    #[test]
    fn test_filter_can_be_disabled() {
        let raw = vec![raw_play_item("com.calc", "Calculator", "Tools")];
        let cfg = IngestionConfig { filter_games: false, ..Default::default() };
        assert_eq!(run_ingestion(&raw, &cfg).games.len(), 1);
    }

    #[test]
    fn test_empty_batch() {
        let out = run_ingestion(&[], &IngestionConfig::default());
        assert!(out.games.is_empty());
        assert_eq!(out.report, IngestionReport::default());
    }
}
