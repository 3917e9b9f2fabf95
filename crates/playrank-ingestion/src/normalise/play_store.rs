//! Google Play record normalisation.
//!
//! Maps one google-play-scraper result (keys `appId`, `score`, `ratings`,
//! `released`, ...) onto the canonical [`GameRecord`] schema.

use chrono::DateTime;
use serde_json::{Map, Value};
use thiserror::Error;

use playrank_common::io::json_kind;
use playrank_common::models::genre_from_value;
use playrank_common::GameRecord;

use super::dates::{format_date, parse_release_date};
use super::installs::parse_installs;

const STORE_DETAILS_URL: &str = "https://play.google.com/store/apps/details?id=";

/// A raw record that could not be mapped at all. The caller skips it.
#[derive(Debug, Error)]
pub enum NormalizationError {
    #[error("raw record is {0}, expected an object")]
    NotAnObject(&'static str),

    #[error("{app_id}: field '{field}' is not numeric: {value}")]
    InvalidField {
        app_id: String,
        field: &'static str,
        value: String,
    },
}

/// Normalise a single raw storefront record.
///
/// Bad dates and install strings degrade to absent values with a warning; only
/// a non-object record or a non-numeric `score`/`ratings`/`price` is an error.
pub fn normalize_game(raw: &Value) -> Result<GameRecord, NormalizationError> {
    let obj = raw
        .as_object()
        .ok_or_else(|| NormalizationError::NotAnObject(json_kind(raw)))?;

    let package_name = text(obj, "appId");

    let release_date = match obj.get("released") {
        Some(Value::String(s)) if !s.trim().is_empty() => match parse_release_date(s) {
            Some(date) => Some(format_date(date)),
            None => {
                tracing::warn!("Failed to parse date {s:?} for {package_name}");
                None
            }
        },
        _ => None,
    };

    let installs = match obj.get("installs") {
        Some(Value::String(s)) => parse_installs(Some(s.as_str())),
        Some(Value::Number(n)) => n.as_u64(),
        _ => None,
    };

    // A zero score means "no ratings yet" on the storefront.
    let rating = number(obj, "score", &package_name)?.filter(|r| *r != 0.0);
    let ratings_count = number(obj, "ratings", &package_name)?
        .map(|n| n.max(0.0) as u64)
        .unwrap_or(0);
    let price = number(obj, "price", &package_name)?.unwrap_or(0.0);

    let screenshots = match obj.get("screenshots") {
        Some(Value::Array(items)) => items
            .iter()
            .filter_map(Value::as_str)
            .map(str::to_string)
            .collect(),
        _ => Vec::new(),
    };

    Ok(GameRecord {
        store_url: store_url(&package_name),
        title: text(obj, "title"),
        developer: text(obj, "developer"),
        genre: genre_from_value(obj.get("genre")),
        description: text(obj, "description"),
        rating,
        ratings_count,
        installs,
        release_date,
        icon_url: text(obj, "icon"),
        screenshots,
        price,
        free: obj.get("free").and_then(Value::as_bool).unwrap_or(true),
        content_rating: text(obj, "contentRating"),
        updated: updated(obj.get("updated")),
        extra: Map::new(),
        package_name,
    })
}

/// Storefront details page for a package; empty when there is no identifier.
pub fn store_url(package_name: &str) -> String {
    if package_name.is_empty() {
        String::new()
    } else {
        format!("{STORE_DETAILS_URL}{package_name}")
    }
}

fn text(obj: &Map<String, Value>, key: &str) -> String {
    obj.get(key)
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string()
}

fn number(
    obj: &Map<String, Value>,
    field: &'static str,
    app_id: &str,
) -> Result<Option<f64>, NormalizationError> {
    let invalid = |value: &Value| NormalizationError::InvalidField {
        app_id: app_id.to_string(),
        field,
        value: value.to_string(),
    };
    let Some(value) = obj.get(field) else {
        return Ok(None);
    };
    match value {
        Value::Null => Ok(None),
        Value::Number(n) => Ok(n.as_f64()),
        Value::String(s) if s.trim().is_empty() => Ok(None),
        Value::String(s) => s
            .trim()
            .parse::<f64>()
            .ok()
            .filter(|f| f.is_finite())
            .map(Some)
            .ok_or_else(|| invalid(value)),
        _ => Err(invalid(value)),
    }
}

/// `updated` is either already text or epoch seconds.
fn updated(value: Option<&Value>) -> Option<String> {
    match value? {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) => n
            .as_i64()
            .and_then(|secs| DateTime::from_timestamp(secs, 0))
            .map(|dt| dt.to_rfc3339()),
        _ => None,
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn raw() -> Value {
        json!({
            "appId": "com.example.game",
            "title": "Test Game",
            "developer": "Test Studio",
            "genre": "Action",
            "description": "A test game",
            "score": 4.5,
            "ratings": 1000,
            "installs": "10,000+",
            "icon": "https://example.com/icon.png",
            "screenshots": ["https://example.com/1.png"],
            "free": true,
            "price": 0
        })
    }

    #[test]
    fn test_normalize_basic() {
        let game = normalize_game(&raw()).unwrap();
        assert_eq!(game.package_name, "com.example.game");
        assert_eq!(game.title, "Test Game");
        assert_eq!(game.developer, "Test Studio");
        assert_eq!(game.genre, "Action");
        assert_eq!(game.rating, Some(4.5));
        assert_eq!(game.ratings_count, 1000);
        assert_eq!(game.installs, Some(10_000));
        assert_eq!(game.screenshots, vec!["https://example.com/1.png".to_string()]);
        assert_eq!(
            game.store_url,
            "https://play.google.com/store/apps/details?id=com.example.game"
        );
        assert_eq!(game.release_date, None);
    }

    #[test]
    fn test_genre_list_takes_first() {
        let mut r = raw();
        r["genre"] = json!(["Puzzle", "Casual"]);
        assert_eq!(normalize_game(&r).unwrap().genre, "Puzzle");

        r.as_object_mut().unwrap().remove("genre");
        assert_eq!(normalize_game(&r).unwrap().genre, "Unknown");
    }

    #[test]
    fn test_empty_genre_string_is_kept() {
        let mut r = raw();
        r["genre"] = json!("");
        assert_eq!(normalize_game(&r).unwrap().genre, "");
    }

    #[test]
    fn test_bad_release_date_is_soft() {
        let mut r = raw();
        r["released"] = json!("sometime next year");
        let game = normalize_game(&r).unwrap();
        assert_eq!(game.release_date, None);

        r["released"] = json!("Mar 5, 2024");
        assert_eq!(normalize_game(&r).unwrap().release_date.as_deref(), Some("2024-03-05"));
    }

    #[test]
    fn test_missing_identifier_gives_empty_store_url() {
        let game = normalize_game(&json!({"title": "Nameless"})).unwrap();
        assert_eq!(game.package_name, "");
        assert_eq!(game.store_url, "");
        assert_eq!(game.rating, None);
        assert_eq!(game.ratings_count, 0);
        assert!(game.free);
    }

    #[test]
    fn test_zero_score_means_unrated() {
        let mut r = raw();
        r["score"] = json!(0);
        assert_eq!(normalize_game(&r).unwrap().rating, None);
    }

    #[test]
    fn test_non_numeric_score_is_an_error() {
        let mut r = raw();
        r["score"] = json!("excellent");
        let err = normalize_game(&r).unwrap_err();
        assert!(matches!(err, NormalizationError::InvalidField { field: "score", .. }));
    }

    #[test]
    fn test_non_object_is_an_error() {
        let err = normalize_game(&json!(["com.example.game"])).unwrap_err();
        assert!(matches!(err, NormalizationError::NotAnObject("an array")));
    }

    #[test]
    fn test_epoch_updated_becomes_rfc3339() {
        let mut r = raw();
        r["updated"] = json!(1709596800);
        let game = normalize_game(&r).unwrap();
        assert_eq!(game.updated.as_deref(), Some("2024-03-05T00:00:00+00:00"));
    }
}
