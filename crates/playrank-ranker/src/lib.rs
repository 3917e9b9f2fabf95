//! playrank-ranker: Game scoring and ranking engine.
//! Scores canonical games on freshness, quality and popularity, combines the
//! three into a weighted final score, and keeps the top K.

pub mod scorer;
pub mod normalise;
pub mod weights;
pub mod rank;
pub mod io;

pub use rank::{rank_games, RankSummary};
pub use scorer::{ScoreError, ScoringModel, NEUTRAL_SCORE};
pub use weights::ScoreWeights;

use chrono::{DateTime, Utc};
use playrank_common::{GameRecord, ScoredGame, ScoringConfig};

/// Score a whole batch against `now` and keep the best `top_k`.
pub fn score_and_rank(
    games: Vec<GameRecord>,
    cfg: &ScoringConfig,
    top_k: usize,
    now: DateTime<Utc>,
) -> Vec<ScoredGame> {
    let model = ScoringModel::from_config(cfg);
    let scored = model.score_batch(games, now);
    rank_games(scored, top_k)
}
