//! Weight vector for the final score.

use serde::{Deserialize, Serialize};

use playrank_common::ScoringConfig;

/// The 3-component weight vector W.
/// Weights sum to 1.0.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoreWeights {
    /// Bayesian-averaged rating
    pub quality: f64,
    /// Release-date decay
    pub freshness: f64,
    /// Batch-relative install count
    pub popularity: f64,
}

impl Default for ScoreWeights {
    fn default() -> Self {
        Self {
            quality:    0.45,
            freshness:  0.35,
            popularity: 0.20,
        }
    }
}

impl From<&ScoringConfig> for ScoreWeights {
    fn from(cfg: &ScoringConfig) -> Self {
        Self {
            quality:    cfg.quality_weight,
            freshness:  cfg.freshness_weight,
            popularity: cfg.popularity_weight,
        }
    }
}

impl ScoreWeights {
    /// Validate that all weights sum to ~1.0
    pub fn validate(&self) -> bool {
        (self.sum() - 1.0).abs() < 1e-6
    }

    /// Renormalise weights so they sum to 1.0
    pub fn normalise(&mut self) {
        let sum = self.sum();
        if sum > 0.0 {
            self.quality    /= sum;
            self.freshness  /= sum;
            self.popularity /= sum;
        }
    }

    /// Order matches [`Self::combine`]: quality, freshness, popularity.
    pub fn as_array(&self) -> [f64; 3] {
        [self.quality, self.freshness, self.popularity]
    }

    /// Weighted sum Σ(w_i × s_i) of (quality, freshness, popularity).
    pub fn combine(&self, quality: f64, freshness: f64, popularity: f64) -> f64 {
        self.as_array()
            .iter()
            .zip([quality, freshness, popularity])
            .map(|(w, s)| w * s)
            .sum()
    }

    fn sum(&self) -> f64 {
        self.quality + self.freshness + self.popularity
    }
}
