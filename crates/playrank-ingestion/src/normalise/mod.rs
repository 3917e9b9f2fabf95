//! Storefront record normalisation.
//!
//! - `play_store`: maps a raw google-play-scraper record → canonical [`GameRecord`]
//! - `dates`: free-form release dates → `YYYY-MM-DD`
//! - `installs`: install buckets such as `"10,000+"` → integer lower bound
//!
//! [`GameRecord`]: playrank_common::GameRecord

pub mod dates;
pub mod installs;
pub mod play_store;

pub use dates::parse_release_date;
pub use installs::parse_installs;
pub use play_store::{normalize_game, store_url, NormalizationError};
