//! Score normalisation functions.
//!
//! Popularity is min-max normalised against the whole batch, so it is computed
//! in two passes: [`InstallRange::from_games`] first, then
//! [`InstallRange::popularity`] per record.

use playrank_common::GameRecord;

use crate::scorer::NEUTRAL_SCORE;

/// Min-max normalisation within a given range [min_val, max_val].
/// A zero-width range is degenerate and maps to the neutral 0.5.
pub fn minmax_normalise(value: f64, min_val: f64, max_val: f64) -> f64 {
    if (max_val - min_val).abs() < 1e-10 {
        return NEUTRAL_SCORE; // degenerate case
    }
    ((value - min_val) / (max_val - min_val)).clamp(0.0, 1.0)
}

/// Round half away from zero to `digits` decimal places.
pub fn round_to(value: f64, digits: i32) -> f64 {
    let factor = 10f64.powi(digits);
    (value * factor).round() / factor
}

/// Observed install-count extrema of one batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InstallRange {
    pub min: u64,
    pub max: u64,
}

impl InstallRange {
    /// Extrema over the known install counts in `games`.
    /// `None` when no record in the batch has a known count.
    pub fn from_games(games: &[GameRecord]) -> Option<Self> {
        games
            .iter()
            .filter_map(|g| g.installs)
            .fold(None, |range, n| match range {
                None => Some(Self { min: n, max: n }),
                Some(r) => Some(Self { min: r.min.min(n), max: r.max.max(n) }),
            })
    }

    /// Whether every known count in the batch is the same.
    pub fn is_degenerate(&self) -> bool {
        self.min == self.max
    }

    /// Popularity of a single record relative to this batch.
    /// Unknown counts and zero-variance batches get the neutral 0.5.
    pub fn popularity(&self, installs: Option<u64>) -> f64 {
        match installs {
            Some(n) if !self.is_degenerate() => {
                minmax_normalise(n as f64, self.min as f64, self.max as f64)
            }
            _ => NEUTRAL_SCORE,
        }
    }
}
