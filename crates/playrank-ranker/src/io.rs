//! Loading games for scoring and writing ranked output.
//!
//! Input is a JSON array of objects, canonical or partially enriched. A
//! non-array file or a non-object element fails the whole load; missing or
//! mistyped fields inside an object only fall back to defaults.

use std::path::Path;

use serde_json::Value;

use playrank_common::io::{json_kind, read_json_array_file, write_json_file};
use playrank_common::{GameRecord, PlayrankError, Result, ScoredGame};

/// Decode already-parsed array elements into games.
pub fn parse_games(items: Vec<Value>) -> Result<Vec<GameRecord>> {
    items
        .into_iter()
        .enumerate()
        .map(|(idx, item)| {
            if !item.is_object() {
                return Err(PlayrankError::Structure(format!(
                    "record #{idx} is {}, expected an object",
                    json_kind(&item)
                )));
            }
            serde_json::from_value(item).map_err(|e| {
                PlayrankError::Structure(format!("record #{idx} could not be decoded: {e}"))
            })
        })
        .collect()
}

/// Load games from a JSON array file.
pub fn load_games(path: impl AsRef<Path>) -> Result<Vec<GameRecord>> {
    let path = path.as_ref();
    let games = parse_games(read_json_array_file(path)?)?;
    tracing::info!("Loaded {} games from {}", games.len(), path.display());
    Ok(games)
}

/// Write ranked games as an indented JSON array.
pub fn save_ranked(path: impl AsRef<Path>, games: &[ScoredGame]) -> Result<()> {
    write_json_file(path, games)
}
