//! Top-K selection and rank assignment.

use serde::{Deserialize, Serialize};

use playrank_common::ScoredGame;

use crate::normalise::round_to;

/// Sort by final score (descending), keep the first `top_k`, and number them
/// 1..=K. The sort is stable, so equal scores keep their input order.
/// `top_k == 0` yields an empty list.
pub fn rank_games(mut scored: Vec<ScoredGame>, top_k: usize) -> Vec<ScoredGame> {
    scored.sort_by(|a, b| b.final_score.total_cmp(&a.final_score));
    scored.truncate(top_k);

    for (i, game) in scored.iter_mut().enumerate() {
        game.rank = Some(i as u32 + 1);
    }

    tracing::info!("Selected top {} games", scored.len());
    scored
}

/// Headline figures for a ranked list, as shown at the top of a report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankSummary {
    pub total_games: usize,
    /// Mean final score, 0 for an empty list
    pub avg_score: f64,
    /// Up to five most frequent genres with counts, most frequent first.
    /// Ties keep the order in which the genre first appears.
    pub top_genres: Vec<(String, usize)>,
}

impl RankSummary {
    pub fn from_ranked(games: &[ScoredGame]) -> Self {
        let total_games = games.len();
        let avg_score = if total_games == 0 {
            0.0
        } else {
            games.iter().map(|g| g.final_score).sum::<f64>() / total_games as f64
        };

        let mut counts: Vec<(String, usize)> = Vec::new();
        for g in games {
            match counts.iter_mut().find(|(genre, _)| *genre == g.game.genre) {
                Some((_, n)) => *n += 1,
                None => counts.push((g.game.genre.clone(), 1)),
            }
        }
        counts.sort_by(|a, b| b.1.cmp(&a.1));
        counts.truncate(5);

        Self {
            total_games,
            avg_score: round_to(avg_score, 4),
            top_genres: counts,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use playrank_common::SubScores;
    use pretty_assertions::assert_eq;
    use playrank_test_utils::{game, GameFixture};

    fn scored(pkg: &str, final_score: f64) -> ScoredGame {
        ScoredGame {
            game: game(pkg),
            scores: SubScores { freshness: 0.5, quality: 0.5, popularity: 0.5 },
            final_score,
            rank: None,
        }
    }

    fn pkgs(games: &[ScoredGame]) -> Vec<&str> {
        games.iter().map(|g| g.game.package_name.as_str()).collect()
    }

    #[test]
    fn test_sorted_descending_with_consecutive_ranks() {
        let ranked = rank_games(
            vec![scored("low", 0.2), scored("high", 0.9), scored("mid", 0.5)],
            10,
        );
        assert_eq!(pkgs(&ranked), vec!["high", "mid", "low"]);
        let ranks: Vec<_> = ranked.iter().map(|g| g.rank).collect();
        assert_eq!(ranks, vec![Some(1), Some(2), Some(3)]);
    }

    #[test]
    fn test_ties_keep_input_order() {
        let ranked = rank_games(
            vec![scored("first", 0.7), scored("other", 0.1), scored("second", 0.7), scored("third", 0.7)],
            4,
        );
        assert_eq!(pkgs(&ranked), vec!["first", "second", "third", "other"]);
    }

    #[test]
    fn test_top_k_truncation() {
        let input = vec![
            scored("a", 0.30),
            scored("b", 0.81),
            scored("c", 0.55),
            scored("d", 0.81),
            scored("e", 0.10),
        ];
        let ranked = rank_games(input, 2);
        assert_eq!(ranked.len(), 2);
        assert_eq!(pkgs(&ranked), vec!["b", "d"]);
        assert_eq!(ranked[1].rank, Some(2));
    }

    #[test]
    fn test_zero_k_is_empty() {
        assert!(rank_games(vec![scored("a", 0.5)], 0).is_empty());
    }

    #[test]
    fn test_k_larger_than_batch() {
        assert_eq!(rank_games(vec![scored("a", 0.5)], 50).len(), 1);
    }

    #[test]
    fn test_summary() {
        let mut games = vec![scored("a", 0.8), scored("b", 0.6), scored("c", 0.4)];
        games[0].game = game("a").genre("Puzzle");
        games[1].game = game("b").genre("Action");
        games[2].game = game("c").genre("Action");

        let summary = RankSummary::from_ranked(&games);
        assert_eq!(summary.total_games, 3);
        assert!((summary.avg_score - 0.6).abs() < 1e-9);
        assert_eq!(
            summary.top_genres,
            vec![("Action".to_string(), 2), ("Puzzle".to_string(), 1)]
        );
    }

    #[test]
    fn test_summary_empty() {
        let summary = RankSummary::from_ranked(&[]);
        assert_eq!(summary.total_games, 0);
        assert_eq!(summary.avg_score, 0.0);
        assert!(summary.top_genres.is_empty());
    }
}
