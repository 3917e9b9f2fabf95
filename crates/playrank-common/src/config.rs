//! Run configuration for the playrank pipeline.
//!
//! Every field has a default, so an empty file (or no file at all) yields the
//! stock scoring model. Loadable from TOML, YAML, or JSON.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::{PlayrankError, Result};

/// Complete pipeline configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PlayrankConfig {
    /// Scoring weights and model parameters
    #[serde(default)]
    pub scoring: ScoringConfig,

    /// Normalisation and filtering options
    #[serde(default)]
    pub ingestion: IngestionConfig,

    /// Output options
    #[serde(default)]
    pub output: OutputConfig,
}

// ── Scoring Configuration ─────────────────────────────────────────────────────

/// Weights and parameters of the scoring model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoringConfig {
    /// Weight for the Bayesian-averaged rating
    #[serde(default = "default_quality_weight")]
    pub quality_weight: f64,

    /// Weight for release-date decay
    #[serde(default = "default_freshness_weight")]
    pub freshness_weight: f64,

    /// Weight for batch-relative install count
    #[serde(default = "default_popularity_weight")]
    pub popularity_weight: f64,

    /// Decay constant τ of the freshness curve, in days
    #[serde(default = "default_tau")]
    pub freshness_tau_days: f64,

    /// Prior mean m of the Bayesian average
    #[serde(default = "default_prior_rating")]
    pub prior_rating: f64,

    /// Prior weight C of the Bayesian average, in ratings
    #[serde(default = "default_prior_count")]
    pub prior_count: f64,

    /// Release date assumed when a record has none
    #[serde(default = "default_fallback_release_date")]
    pub fallback_release_date: NaiveDate,
}

fn default_quality_weight() -> f64 { 0.45 }
fn default_freshness_weight() -> f64 { 0.35 }
fn default_popularity_weight() -> f64 { 0.20 }
fn default_tau() -> f64 { 30.0 }
fn default_prior_rating() -> f64 { 4.0 }
fn default_prior_count() -> f64 { 10.0 }
fn default_fallback_release_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2020, 1, 1).unwrap_or_default()
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            quality_weight: default_quality_weight(),
            freshness_weight: default_freshness_weight(),
            popularity_weight: default_popularity_weight(),
            freshness_tau_days: default_tau(),
            prior_rating: default_prior_rating(),
            prior_count: default_prior_count(),
            fallback_release_date: default_fallback_release_date(),
        }
    }
}

impl ScoringConfig {
    /// Validate weights sum to 1.0
    pub fn validate(&self) -> bool {
        let sum = self.quality_weight + self.freshness_weight + self.popularity_weight;
        (sum - 1.0).abs() < 1e-6
    }

    /// Reject parameter values the scoring model cannot use.
    pub fn check(&self) -> Result<()> {
        let weights = [self.quality_weight, self.freshness_weight, self.popularity_weight];
        if weights.iter().any(|w| !w.is_finite() || *w < 0.0) {
            return Err(PlayrankError::Config("scoring weights must be non-negative".into()));
        }
        let sum: f64 = weights.iter().sum();
        if !(sum.is_finite() && sum > 0.0) {
            return Err(PlayrankError::Config(format!(
                "scoring weights must have a positive sum, got {sum}"
            )));
        }
        if !(self.freshness_tau_days.is_finite() && self.freshness_tau_days > 0.0) {
            return Err(PlayrankError::Config("freshness_tau_days must be positive".into()));
        }
        if !(self.prior_count.is_finite() && self.prior_count >= 0.0) {
            return Err(PlayrankError::Config("prior_count must be non-negative".into()));
        }
        if !(0.0..=5.0).contains(&self.prior_rating) {
            return Err(PlayrankError::Config("prior_rating must lie in 0..=5".into()));
        }
        Ok(())
    }
}

// ── Ingestion Configuration ───────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IngestionConfig {
    /// Genre substrings that mark an item as a game (case-insensitive)
    #[serde(default = "default_game_genres")]
    pub game_genres: Vec<String>,

    /// Drop non-game apps before deduplication
    #[serde(default = "default_true")]
    pub filter_games: bool,
}

fn default_true() -> bool { true }

/// Play Store game categories.
pub fn default_game_genres() -> Vec<String> {
    [
        "Action", "Adventure", "Arcade", "Board", "Card", "Casino",
        "Casual", "Educational", "Music", "Puzzle", "Racing",
        "Role Playing", "Simulation", "Sports", "Strategy", "Trivia", "Word",
    ]
    .iter()
    .map(|g| g.to_string())
    .collect()
}

impl Default for IngestionConfig {
    fn default() -> Self {
        Self {
            game_genres: default_game_genres(),
            filter_games: true,
        }
    }
}

// ── Output Configuration ──────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Number of top results to keep
    #[serde(default = "default_top_k")]
    pub top_k: usize,

    /// Root directory for run artifacts
    #[serde(default = "default_output_dir")]
    pub dir: String,
}

fn default_top_k() -> usize { 50 }
fn default_output_dir() -> String { "outputs".to_string() }

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            top_k: default_top_k(),
            dir: default_output_dir(),
        }
    }
}

// ── Helper Methods ─────────────────────────────────────────────────────────────

impl PlayrankConfig {
    /// Load from TOML file
    pub fn from_toml(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content).map_err(|e| PlayrankError::Config(e.to_string()))
    }

    /// Load from YAML file
    pub fn from_yaml(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        serde_yaml::from_str(&content).map_err(|e| PlayrankError::Config(e.to_string()))
    }

    /// Load from JSON file
    pub fn from_json(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }

    /// Load by file extension; anything that is not YAML or JSON is read as TOML.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let config = match path.extension().and_then(|e| e.to_str()) {
            Some("yaml") | Some("yml") => Self::from_yaml(path)?,
            Some("json") => Self::from_json(path)?,
            _ => Self::from_toml(path)?,
        };
        config.scoring.check()?;
        if !config.scoring.validate() {
            tracing::warn!(
                "Scoring weights in {} do not sum to 1.0; they will be renormalised",
                path.display()
            );
        }
        Ok(config)
    }

    /// Save to TOML file
    pub fn to_toml(&self, path: impl AsRef<Path>) -> Result<()> {
        let content = toml::to_string_pretty(self).map_err(|e| PlayrankError::Config(e.to_string()))?;
        std::fs::write(path, content)?;
        Ok(())
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
