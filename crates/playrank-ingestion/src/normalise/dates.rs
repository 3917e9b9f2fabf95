//! Release-date parsing.
//!
//! Storefront dates come in whatever the locale renders: `Mar 5, 2024`,
//! `2024. 3. 5.`, `2024년 3월 5일`, or plain ISO. Everything recognisable is
//! reduced to a calendar date.

use chrono::{DateTime, NaiveDate, NaiveDateTime};

/// Date-only layouts, tried in order.
const DATE_FORMATS: &[&str] = &[
    "%Y-%m-%d",
    "%Y/%m/%d",
    "%Y.%m.%d",
    "%b %d, %Y",
    "%B %d, %Y",
    "%d %b %Y",
    "%d %B %Y",
    "%b %d %Y",
    "%m/%d/%Y",
    "%Y년 %m월 %d일",
];

/// Timestamp layouts without an offset.
const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S%.f",
];

/// Parse a free-form release date. Returns `None` when nothing matches.
pub fn parse_release_date(raw: &str) -> Option<NaiveDate> {
    let s = raw.trim();
    if s.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.date_naive());
    }
    for fmt in DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(dt.date());
        }
    }
    if let Some(date) = parse_with_formats(s) {
        return Some(date);
    }

    // "2024. 3. 5." → "2024.3.5"
    let dotted = s.trim_end_matches('.').replace(". ", ".");
    if dotted != s {
        return parse_with_formats(&dotted);
    }
    None
}

fn parse_with_formats(s: &str) -> Option<NaiveDate> {
    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(s, fmt).ok())
}

/// Render as `YYYY-MM-DD`.
pub fn format_date(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}
