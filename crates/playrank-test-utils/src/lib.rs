//! Fixture builders shared by the playrank test suites.

use chrono::{DateTime, NaiveDate, Utc};
use playrank_common::GameRecord;
use serde_json::{json, Value};

/// A canonical game with just an identity key and a title.
pub fn game(package_name: &str) -> GameRecord {
    GameRecord {
        package_name: package_name.to_string(),
        title: format!("{package_name} title"),
        store_url: format!("https://play.google.com/store/apps/details?id={package_name}"),
        ..Default::default()
    }
}

/// Builder-style tweaks on top of [`game`].
pub trait GameFixture {
    fn rated(self, rating: f64, count: u64) -> Self;
    fn installs(self, installs: u64) -> Self;
    fn released(self, date: &str) -> Self;
    fn genre(self, genre: &str) -> Self;
    fn titled(self, title: &str) -> Self;
}

impl GameFixture for GameRecord {
    fn rated(mut self, rating: f64, count: u64) -> Self {
        self.rating = Some(rating);
        self.ratings_count = count;
        self
    }

    fn installs(mut self, installs: u64) -> Self {
        self.installs = Some(installs);
        self
    }

    fn released(mut self, date: &str) -> Self {
        self.release_date = Some(date.to_string());
        self
    }

    fn genre(mut self, genre: &str) -> Self {
        self.genre = genre.to_string();
        self
    }

    fn titled(mut self, title: &str) -> Self {
        self.title = title.to_string();
        self
    }
}

/// A raw storefront record shaped like google-play-scraper output.
pub fn raw_play_item(app_id: &str, title: &str, genre: &str) -> Value {
    json!({
        "appId": app_id,
        "title": title,
        "developer": "Test Studio",
        "genre": genre,
        "description": "A test game",
        "score": 4.5,
        "ratings": 1000,
        "installs": "10,000+",
        "released": "Mar 5, 2024",
        "icon": "https://example.com/icon.png",
        "screenshots": ["https://example.com/1.png"],
        "free": true,
        "price": 0,
        "contentRating": "Everyone",
        "updated": 1709596800,
    })
}

/// Fixed reference time (midnight UTC) for freshness-sensitive tests.
pub fn as_of(date: &str) -> DateTime<Utc> {
    NaiveDate::parse_from_str(date, "%Y-%m-%d")
        .expect("fixture date must be YYYY-MM-DD")
        .and_hms_opt(0, 0, 0)
        .expect("midnight is valid")
        .and_utc()
}
