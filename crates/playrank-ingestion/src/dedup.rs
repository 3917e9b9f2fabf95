//! Deduplication of normalised games by package name.

use std::collections::HashSet;

use playrank_common::GameRecord;

/// Result of a deduplication check.
#[derive(Debug, PartialEq)]
pub enum DedupResult {
    /// First time this package is seen; keep it.
    New,
    /// Package already kept earlier in the batch.
    Duplicate(String),
    /// Record has no package name and cannot be identified.
    MissingKey,
}

/// Check `incoming` against the package names kept so far.
pub fn check_duplicate(incoming: &GameRecord, seen: &HashSet<String>) -> DedupResult {
    if incoming.package_name.is_empty() {
        return DedupResult::MissingKey;
    }
    if seen.contains(&incoming.package_name) {
        return DedupResult::Duplicate(incoming.package_name.clone());
    }
    DedupResult::New
}

/// Keep the first occurrence of each package name, in input order.
/// Records without a package name are dropped.
pub fn deduplicate(records: Vec<GameRecord>) -> Vec<GameRecord> {
    let total = records.len();
    let mut seen: HashSet<String> = HashSet::with_capacity(total);
    let mut unique = Vec::with_capacity(total);

    for game in records {
        match check_duplicate(&game, &seen) {
            DedupResult::New => {
                seen.insert(game.package_name.clone());
                unique.push(game);
            }
            DedupResult::Duplicate(pkg) => tracing::debug!("Duplicate found: {pkg}"),
            DedupResult::MissingKey => {
                tracing::warn!("Game without package_name: {:?}", game.title)
            }
        }
    }

    tracing::info!("Deduplication: {} -> {} games", total, unique.len());
    unique
}

#[cfg(test)]
mod tests {
    use super::*;
    use playrank_test_utils::{game, GameFixture};

    #[test]
    fn test_deduplicate_basic() {
        let games = vec![
            game("com.game1").titled("Game 1"),
            game("com.game2").titled("Game 2"),
            game("com.game1").titled("Game 1 Duplicate"),
        ];
        let result = deduplicate(games);
        assert_eq!(result.len(), 2);
        assert_eq!(result[0].package_name, "com.game1");
        assert_eq!(result[0].title, "Game 1");
        assert_eq!(result[1].package_name, "com.game2");
    }

    #[test]
    fn test_missing_package_name_is_dropped() {
        let games = vec![game("").titled("Ghost"), game(""), game("com.a")];
        let result = deduplicate(games);
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].package_name, "com.a");
    }

    #[test]
    fn test_order_follows_first_sighting() {
        let games = vec![game("c"), game("a"), game("c"), game("b"), game("a")];
        let order: Vec<_> = deduplicate(games).into_iter().map(|g| g.package_name).collect();
        assert_eq!(order, vec!["c", "a", "b"]);
    }

    #[test]
    fn test_check_duplicate() {
        let mut seen = HashSet::new();
        assert_eq!(check_duplicate(&game("com.a"), &seen), DedupResult::New);
        seen.insert("com.a".to_string());
        assert_eq!(
            check_duplicate(&game("com.a"), &seen),
            DedupResult::Duplicate("com.a".to_string())
        );
        assert_eq!(check_duplicate(&game(""), &seen), DedupResult::MissingKey);
    }
}
