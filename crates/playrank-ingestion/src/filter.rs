//! Game-only filtering.
//!
//! Storefront searches for "new games" also return tools, launchers and
//! companion apps. An item is kept when its genre names a game category or its
//! title says "game".

use playrank_common::GameRecord;

/// Whether `game` looks like a game rather than another kind of app.
/// Genre match is a case-insensitive substring match against `game_genres`.
pub fn is_game(game: &GameRecord, game_genres: &[String]) -> bool {
    let genre = game.genre.to_lowercase();
    let genre_match = game_genres
        .iter()
        .map(|g| g.trim())
        .filter(|g| !g.is_empty())
        .any(|g| genre.contains(&g.to_lowercase()));

    genre_match || game.title.to_lowercase().contains("game")
}

/// Keep only games, preserving input order. No deduplication happens here.
pub fn filter_games(records: Vec<GameRecord>, game_genres: &[String]) -> Vec<GameRecord> {
    let total = records.len();
    let games: Vec<GameRecord> = records
        .into_iter()
        .filter(|g| is_game(g, game_genres))
        .collect();
    tracing::info!("Filtered to {} games from {} items", games.len(), total);
    games
}
