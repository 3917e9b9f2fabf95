//! `playrank run`: ingest then rank, writing artifacts under a dated run directory.
//!
//! Layout: `<out_dir>/<YYYYMMDD>/<run_id>/artifacts/{raw_games.json, ranked_games.json}`.
//! A one-line JSON summary is printed to stdout for the caller to pick up.

use anyhow::Context;
use chrono::{DateTime, Local, Utc};
use clap::Args;
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::info;

use playrank_common::PlayrankConfig;
use playrank_ingestion::ingest_file;
use playrank_ranker::io::save_ranked;

pub const RAW_ARTIFACT: &str = "raw_games.json";
pub const RANKED_ARTIFACT: &str = "ranked_games.json";

#[derive(Debug, Args)]
pub struct RunArgs {
    /// Raw storefront results (JSON array)
    pub input: PathBuf,

    /// Number of games to keep (overrides output.top_k)
    #[arg(long)]
    pub top_k: Option<usize>,

    /// Reference time for freshness (YYYY-MM-DD or RFC 3339); defaults to now
    #[arg(long, value_parser = super::parse_as_of)]
    pub as_of: Option<DateTime<Utc>>,

    /// Run identifier; defaults to the local time as HHMMSS
    #[arg(long)]
    pub run_id: Option<String>,

    /// Root output directory (overrides output.dir)
    #[arg(long)]
    pub out_dir: Option<PathBuf>,
}

/// What `run` prints on stdout.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RunSummary {
    pub ranked_items_path: String,
    pub total_items: usize,
    pub run_id: String,
}

pub fn artifacts_dir(root: &Path, day: &str, run_id: &str) -> PathBuf {
    root.join(day).join(run_id).join("artifacts")
}

pub fn execute(args: &RunArgs, config: &PlayrankConfig) -> anyhow::Result<RunSummary> {
    let started = Local::now();
    let run_id = args
        .run_id
        .clone()
        .unwrap_or_else(|| started.format("%H%M%S").to_string());
    let root = args
        .out_dir
        .clone()
        .unwrap_or_else(|| PathBuf::from(&config.output.dir));
    let dir = artifacts_dir(&root, &started.format("%Y%m%d").to_string(), &run_id);
    info!(run_id = %run_id, dir = %dir.display(), "Starting run");

    let ingested = ingest_file(&args.input, &config.ingestion)
        .with_context(|| format!("Failed to ingest {}", args.input.display()))?;
    let raw_path = dir.join(RAW_ARTIFACT);
    playrank_common::io::write_json_file(&raw_path, &ingested.games)
        .with_context(|| format!("Failed to write {}", raw_path.display()))?;
    info!(
        unique = ingested.report.unique,
        failed = ingested.report.failed,
        "Wrote {}",
        raw_path.display()
    );

    let top_k = args.top_k.unwrap_or(config.output.top_k);
    let now = args.as_of.unwrap_or_else(Utc::now);
    let ranked = super::rank::rank(ingested.games, config, top_k, now);

    let ranked_path = dir.join(RANKED_ARTIFACT);
    save_ranked(&ranked_path, &ranked)
        .with_context(|| format!("Failed to write {}", ranked_path.display()))?;

    let ranked_path = std::fs::canonicalize(&ranked_path).unwrap_or(ranked_path);
    let summary = RunSummary {
        ranked_items_path: ranked_path.display().to_string(),
        total_items: ranked.len(),
        run_id,
    };
    println!("{}", serde_json::to_string(&summary)?);
    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use playrank_test_utils::{as_of, raw_play_item};
    use pretty_assertions::assert_eq;
    use serde_json::Value;

    #[test]
    fn test_artifacts_dir_layout() {
        let dir = artifacts_dir(Path::new("outputs"), "20240305", "120000");
        assert_eq!(dir, PathBuf::from("outputs/20240305/120000/artifacts"));
    }

    #[test]
    fn test_run_writes_both_artifacts() {
        let tmp = tempfile::tempdir().unwrap();
        let input = tmp.path().join("raw.json");
        let raw = serde_json::json!([
            raw_play_item("com.a.puzzle", "Puzzle A", "Puzzle"),
            raw_play_item("com.b.tool", "Tool B", "Tools"),
            raw_play_item("com.c.rpg", "RPG C", "Role Playing"),
            raw_play_item("com.a.puzzle", "Puzzle A again", "Puzzle"),
        ]);
        std::fs::write(&input, raw.to_string()).unwrap();

        let args = RunArgs {
            input,
            top_k: Some(1),
            as_of: Some(as_of("2024-04-04")),
            run_id: Some("test-run".into()),
            out_dir: Some(tmp.path().join("out")),
        };
        let summary = execute(&args, &PlayrankConfig::default()).unwrap();

        assert_eq!(summary.run_id, "test-run");
        assert_eq!(summary.total_items, 1);

        let ranked_path = PathBuf::from(&summary.ranked_items_path);
        assert!(ranked_path.is_absolute());
        assert!(ranked_path.ends_with("test-run/artifacts/ranked_games.json"));

        let raw_path = ranked_path.with_file_name(RAW_ARTIFACT);
        let raw_games: Vec<Value> =
            serde_json::from_str(&std::fs::read_to_string(raw_path).unwrap()).unwrap();
        // the tool app is filtered out and the duplicate collapsed
        assert_eq!(raw_games.len(), 2);
        assert_eq!(raw_games[0]["title"], "Puzzle A");

        let ranked: Vec<Value> =
            serde_json::from_str(&std::fs::read_to_string(&ranked_path).unwrap()).unwrap();
        assert_eq!(ranked.len(), 1);
        assert_eq!(ranked[0]["rank"], 1);
        assert!(ranked[0]["scores"]["freshness"].is_number());
    }

    #[test]
    fn test_run_fails_on_missing_input() {
        let tmp = tempfile::tempdir().unwrap();
        let args = RunArgs {
            input: tmp.path().join("absent.json"),
            top_k: None,
            as_of: None,
            run_id: Some("x".into()),
            out_dir: Some(tmp.path().to_path_buf()),
        };
        assert!(execute(&args, &PlayrankConfig::default()).is_err());
    }
}
