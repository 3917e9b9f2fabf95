//! CLI subcommands. Each one wraps a pipeline stage:
//!   - `ingest`: raw storefront JSON → canonical games
//!   - `rank`:   canonical games → scored top-K
//!   - `run`:    both, writing dated run artifacts

pub mod ingest;
pub mod rank;
pub mod run;

pub use ingest::IngestArgs;
pub use rank::RankArgs;
pub use run::RunArgs;

use anyhow::Context;
use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;
use std::path::Path;

/// Parse `--as-of`: a `YYYY-MM-DD` day (midnight UTC) or an RFC 3339 timestamp.
pub fn parse_as_of(s: &str) -> Result<DateTime<Utc>, String> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Ok(dt.with_timezone(&Utc));
    }
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|dt| dt.and_utc())
        .ok_or_else(|| format!("expected YYYY-MM-DD or RFC 3339 timestamp, got {s:?}"))
}

/// Write JSON to `path`, or to stdout when no path is given.
pub fn emit<T: Serialize + ?Sized>(output: Option<&Path>, value: &T) -> anyhow::Result<()> {
    match output {
        Some(path) => playrank_common::io::write_json_file(path, value)
            .with_context(|| format!("Failed to write {}", path.display())),
        None => playrank_common::io::write_json(std::io::stdout().lock(), value)
            .context("Failed to write to stdout"),
    }
}
