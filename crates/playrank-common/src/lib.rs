//! playrank-common: Shared types, errors, and configuration used across all playrank crates.

pub mod error;
pub mod models;
pub mod config;
pub mod io;
mod lenient;

// Re-export commonly used types
pub use config::{IngestionConfig, OutputConfig, PlayrankConfig, ScoringConfig};
pub use error::{PlayrankError, Result};
pub use models::{GameRecord, ScoredGame, SubScores};
