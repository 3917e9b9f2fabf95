//! Game record types shared by the ingestion and ranking stages.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::lenient;

/// Genre used when the storefront gives none.
pub const UNKNOWN_GENRE: &str = "Unknown";

/// Keys written by the ranker. Stripped from carried-through fields so a
/// re-ranked file never ends up with two `scores` entries.
pub const SCORE_KEYS: [&str; 3] = ["scores", "final_score", "rank"];

/// A game normalised to the canonical schema.
///
/// Fields serialize in declaration order; any extra keys found on the input
/// (enrichment tags and the like) follow after `updated`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameRecord {
    /// Storefront identifier, e.g. `com.example.game`. Identity key.
    #[serde(default, deserialize_with = "lenient::string")]
    pub package_name: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub title: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub developer: String,
    #[serde(default = "default_genre", deserialize_with = "lenient::genre")]
    pub genre: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub description: String,
    /// Average star rating, 0–5.
    #[serde(default, deserialize_with = "lenient::opt_f64")]
    pub rating: Option<f64>,
    #[serde(default, deserialize_with = "lenient::u64_or_zero")]
    pub ratings_count: u64,
    /// Lower bound of the storefront install bucket. `None` means unknown, not zero.
    #[serde(default, deserialize_with = "lenient::opt_u64")]
    pub installs: Option<u64>,
    /// `YYYY-MM-DD`
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub release_date: Option<String>,
    #[serde(default, deserialize_with = "lenient::string")]
    pub icon_url: String,
    #[serde(default, deserialize_with = "lenient::string_list")]
    pub screenshots: Vec<String>,
    #[serde(default, deserialize_with = "lenient::string")]
    pub store_url: String,
    #[serde(default, deserialize_with = "lenient::f64_or_zero")]
    pub price: f64,
    #[serde(default = "default_free", deserialize_with = "lenient::bool_or_true")]
    pub free: bool,
    #[serde(default, deserialize_with = "lenient::string")]
    pub content_rating: String,
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub updated: Option<String>,
    /// Fields outside the canonical schema, carried through untouched.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

fn default_genre() -> String { UNKNOWN_GENRE.to_string() }
fn default_free() -> bool { true }

impl Default for GameRecord {
    fn default() -> Self {
        Self {
            package_name: String::new(),
            title: String::new(),
            developer: String::new(),
            genre: default_genre(),
            description: String::new(),
            rating: None,
            ratings_count: 0,
            installs: None,
            release_date: None,
            icon_url: String::new(),
            screenshots: Vec::new(),
            store_url: String::new(),
            price: 0.0,
            free: default_free(),
            content_rating: String::new(),
            updated: None,
            extra: Map::new(),
        }
    }
}

impl GameRecord {
    /// Drop ranker output left over from a previous run.
    pub fn strip_score_keys(&mut self) {
        for key in SCORE_KEYS {
            self.extra.remove(key);
        }
    }
}

/// Resolve a storefront genre value: a list yields its first entry, a missing
/// value or empty list yields [`UNKNOWN_GENRE`]. A genre string given by the
/// source is kept as is, even when empty.
pub fn genre_from_value(value: Option<&Value>) -> String {
    match value {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Array(items)) => items
            .first()
            .and_then(Value::as_str)
            .map_or_else(default_genre, str::to_string),
        _ => default_genre(),
    }
}

/// The three sub-scores, each in [0, 1].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SubScores {
    pub freshness: f64,
    pub quality: f64,
    pub popularity: f64,
}

/// A canonical record annotated with its scores.
///
/// `rank` stays `None` until the record survives top-K selection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredGame {
    #[serde(flatten)]
    pub game: GameRecord,
    pub scores: SubScores,
    pub final_score: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rank: Option<u32>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_absent_fields_take_defaults() {
        let game: GameRecord = serde_json::from_value(json!({"package_name": "com.a"})).unwrap();
        assert_eq!(game.genre, "Unknown");
        assert_eq!(game.rating, None);
        assert_eq!(game.ratings_count, 0);
        assert_eq!(game.installs, None);
        assert!(game.free);
        assert!(game.extra.is_empty());
    }

    #[test]
    fn test_unknown_keys_are_carried_through() {
        let game: GameRecord = serde_json::from_value(json!({
            "package_name": "com.a",
            "tags": ["roguelike"],
            "summary_ko": "로그라이크 게임",
        }))
        .unwrap();
        assert_eq!(game.extra.get("tags"), Some(&json!(["roguelike"])));

        let out = serde_json::to_string(&game).unwrap();
        assert!(out.contains("로그라이크 게임"), "non-ASCII must not be escaped: {out}");
    }

    #[test]
    fn test_wrong_typed_numbers_do_not_fail_the_record() {
        let game: GameRecord = serde_json::from_value(json!({
            "package_name": "com.a",
            "rating": "n/a",
            "ratings_count": null,
            "installs": "1000",
        }))
        .unwrap();
        assert_eq!(game.rating, None);
        assert_eq!(game.ratings_count, 0);
        assert_eq!(game.installs, Some(1000));
    }

    #[test]
    fn test_canonical_key_order_is_stable() {
        let game = GameRecord { package_name: "com.a".into(), ..Default::default() };
        let value = serde_json::to_value(&game).unwrap();
        let text = serde_json::to_string(&game).unwrap();
        assert!(value.get("release_date").is_some());
        let pkg = text.find("\"package_name\"").unwrap();
        let updated = text.find("\"updated\"").unwrap();
        assert!(pkg < updated);
    }

    #[test]
    fn test_genre_from_value() {
        assert_eq!(genre_from_value(Some(&json!(["Puzzle", "Casual"]))), "Puzzle");
        assert_eq!(genre_from_value(Some(&json!([]))), "Unknown");
        assert_eq!(genre_from_value(Some(&json!(null))), "Unknown");
        assert_eq!(genre_from_value(None), "Unknown");
        assert_eq!(genre_from_value(Some(&json!("Racing"))), "Racing");
        assert_eq!(genre_from_value(Some(&json!(""))), "");
    }

    #[test]
    fn test_unranked_game_omits_rank() {
        let scored = ScoredGame {
            game: GameRecord { package_name: "com.a".into(), ..Default::default() },
            scores: SubScores { freshness: 0.1, quality: 0.8, popularity: 0.5 },
            final_score: 0.5,
            rank: None,
        };
        let value = serde_json::to_value(&scored).unwrap();
        assert!(value.get("rank").is_none());
        assert_eq!(value["scores"]["quality"], json!(0.8));
    }
}
