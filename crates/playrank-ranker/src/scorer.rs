//! Per-game score computation.
//!
//! final = w_q × quality + w_f × freshness + w_p × popularity
//!
//! - quality: Bayesian average of the star rating, shrunk toward a prior
//! - freshness: exponential decay on days since release
//! - popularity: min-max position of the install count within the batch
//!
//! A component that fails to produce a finite number falls back to
//! [`NEUTRAL_SCORE`] for that game only; the batch always completes.

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use thiserror::Error;
use tracing::{debug, info, warn};

use playrank_common::{GameRecord, ScoredGame, ScoringConfig, SubScores};

use crate::normalise::{round_to, InstallRange};
use crate::weights::ScoreWeights;

/// Substitute for a component that could not be computed.
pub const NEUTRAL_SCORE: f64 = 0.5;

/// Star rating assumed for a game without one.
pub const DEFAULT_RATING: f64 = 4.0;

/// Decimal places kept on emitted scores.
const SCORE_DIGITS: i32 = 4;

#[derive(Debug, Error, PartialEq)]
pub enum ScoreError {
    #[error("{component} score is not finite ({value})")]
    NonFinite { component: &'static str, value: f64 },
}

/// Scoring parameters, resolved once per run.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoringModel {
    pub weights: ScoreWeights,
    /// Freshness decay constant τ, in days
    pub tau_days: f64,
    /// Prior mean m of the Bayesian average
    pub prior_rating: f64,
    /// Prior weight C of the Bayesian average
    pub prior_count: f64,
    /// Release date assumed when a game has none
    pub fallback_release_date: NaiveDate,
}

impl Default for ScoringModel {
    fn default() -> Self {
        Self::from_config(&ScoringConfig::default())
    }
}

impl ScoringModel {
    /// Build from config, renormalising weights that do not sum to 1.0.
    pub fn from_config(cfg: &ScoringConfig) -> Self {
        let mut weights = ScoreWeights::from(cfg);
        let sum: f64 = weights.as_array().iter().sum();
        if !(sum.is_finite() && sum > 0.0) {
            warn!("Scoring weights {:?} cannot be normalised; using defaults", weights.as_array());
            weights = ScoreWeights::default();
        } else if !weights.validate() {
            warn!("Scoring weights {:?} do not sum to 1.0; renormalising", weights.as_array());
            weights.normalise();
        }
        Self {
            weights,
            tau_days: cfg.freshness_tau_days,
            prior_rating: cfg.prior_rating,
            prior_count: cfg.prior_count,
            fallback_release_date: cfg.fallback_release_date,
        }
    }

    /// freshness = exp(−days_since_release / τ)
    ///
    /// `release_date` is `YYYY-MM-DD`; a missing or unparseable date is read
    /// as the fallback release date. Days are counted up to `now`.
    pub fn freshness(&self, release_date: Option<&str>, now: DateTime<Utc>) -> Result<f64, ScoreError> {
        let released = match release_date {
            Some(s) => NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d").unwrap_or_else(|_| {
                warn!("Unparseable release date {s:?}; using {}", self.fallback_release_date);
                self.fallback_release_date
            }),
            None => self.fallback_release_date,
        };
        let released = released.and_time(NaiveTime::MIN).and_utc();
        let days = (now - released).num_days() as f64;
        checked("freshness", (-days / self.tau_days).exp())
    }

    /// quality = ((C·m + n·R) / (C + n)) / 5
    ///
    /// With few ratings the prior mean m dominates, so one 5★ review cannot
    /// outrank a game with thousands of 4.5★ reviews.
    pub fn quality(&self, rating: Option<f64>, ratings_count: u64) -> Result<f64, ScoreError> {
        let r = rating.unwrap_or(DEFAULT_RATING);
        let n = ratings_count as f64;
        let c = self.prior_count;
        let bayesian = (c * self.prior_rating + n * r) / (c + n);
        checked("quality", bayesian / 5.0)
    }

    /// Score one game. `range` must come from the batch the game belongs to.
    /// Returns rounded sub-scores and the rounded final score.
    pub fn score_game(
        &self,
        game: &GameRecord,
        range: Option<InstallRange>,
        now: DateTime<Utc>,
    ) -> (SubScores, f64) {
        let pkg = game.package_name.as_str();
        let freshness = resolve(pkg, self.freshness(game.release_date.as_deref(), now));
        let quality = resolve(pkg, self.quality(game.rating, game.ratings_count));
        let popularity = resolve(
            pkg,
            checked(
                "popularity",
                range.map_or(NEUTRAL_SCORE, |r| r.popularity(game.installs)),
            ),
        );

        let final_score = self.weights.combine(quality, freshness, popularity).clamp(0.0, 1.0);

        let scores = SubScores {
            freshness: round_to(freshness, SCORE_DIGITS),
            quality: round_to(quality, SCORE_DIGITS),
            popularity: round_to(popularity, SCORE_DIGITS),
        };
        (scores, round_to(final_score, SCORE_DIGITS))
    }

    /// Score every game in the batch against `now`.
    ///
    /// Install extrema are taken over the whole batch before any game is
    /// scored, so popularity is relative to exactly these games. Input order
    /// is preserved and nothing is ranked yet.
    pub fn score_batch(&self, games: Vec<GameRecord>, now: DateTime<Utc>) -> Vec<ScoredGame> {
        let range = InstallRange::from_games(&games);
        match range {
            Some(r) if !r.is_degenerate() => {
                debug!("Install range for batch: {}..={}", r.min, r.max)
            }
            _ => info!("No install-count spread in batch; popularity is neutral for all games"),
        }

        let scored: Vec<ScoredGame> = games
            .into_iter()
            .map(|mut game| {
                game.strip_score_keys();
                let (scores, final_score) = self.score_game(&game, range, now);
                ScoredGame { game, scores, final_score, rank: None }
            })
            .collect();

        info!("Scored {} games", scored.len());
        scored
    }
}

fn checked(component: &'static str, value: f64) -> Result<f64, ScoreError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(ScoreError::NonFinite { component, value })
    }
}

/// Clamp a component to [0, 1], or substitute the neutral score on failure.
fn resolve(package_name: &str, result: Result<f64, ScoreError>) -> f64 {
    match result {
        Ok(v) => v.clamp(0.0, 1.0),
        Err(e) => {
            warn!(package = package_name, "{e}; using neutral {NEUTRAL_SCORE}");
            NEUTRAL_SCORE
        }
    }
}
