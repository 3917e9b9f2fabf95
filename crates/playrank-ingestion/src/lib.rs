//! playrank-ingestion: Storefront record normalisation.
//! Turns raw scraped listings into canonical game records:
//! - Field normalisation (dates, install buckets, genres)
//! - Game-only filtering
//! - Deduplication by package name

pub mod normalise;
pub mod filter;
pub mod dedup;
pub mod pipeline;

pub use dedup::deduplicate;
pub use filter::filter_games;
pub use normalise::{normalize_game, parse_installs, NormalizationError};
pub use pipeline::{ingest_file, run_ingestion, IngestionOutput, IngestionReport};
