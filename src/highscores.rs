//! Leaderboard snapshot for the results screen
//!
//! Read once at startup from the record store and never mutated while the
//! game runs.

use crate::persistence::Record;

/// A single leaderboard row
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LeaderboardEntry {
    pub nickname: String,
    pub score: u64,
}

/// Top-N scores, sorted descending
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Leaderboard {
    pub entries: Vec<LeaderboardEntry>,
}

impl Leaderboard {
    /// Build from store records in any order, keeping at most `capacity` rows
    pub fn from_records(records: impl IntoIterator<Item = Record>, capacity: usize) -> Self {
        let mut entries: Vec<LeaderboardEntry> = records
            .into_iter()
            .map(|r| LeaderboardEntry {
                nickname: r.nickname,
                score: r.record,
            })
            .collect();
        // Stable sort keeps store order among equal scores
        entries.sort_by(|a, b| b.score.cmp(&a.score));
        entries.truncate(capacity);
        Self { entries }
    }

    /// `nickname: score` lines in rank order
    pub fn lines(&self) -> impl Iterator<Item = String> + '_ {
        self.entries
            .iter()
            .map(|e| format!("{}: {}", e.nickname, e.score))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(nickname: &str, score: u64) -> Record {
        Record {
            nickname: nickname.to_string(),
            record: score,
        }
    }

    fn board() -> Leaderboard {
        Leaderboard::from_records(
            vec![
                record("ann", 5),
                record("bob", 12),
                record("cid", 1),
                record("dee", 8),
            ],
            3,
        )
    }

    #[test]
    fn test_sorted_and_truncated() {
        let board = board();
        let names: Vec<&str> = board.entries.iter().map(|e| e.nickname.as_str()).collect();
        assert_eq!(names, vec!["bob", "dee", "ann"]);
    }

    #[test]
    fn test_lines_format() {
        let lines: Vec<String> = board().lines().collect();
        assert_eq!(lines, vec!["bob: 12", "dee: 8", "ann: 5"]);
    }

    #[test]
    fn test_zero_capacity_is_empty() {
        let board = Leaderboard::from_records(vec![record("ann", 5)], 0);
        assert!(board.entries.is_empty());
        assert_eq!(board.lines().count(), 0);
    }

    #[test]
    fn test_ties_keep_store_order() {
        let board = Leaderboard::from_records(vec![record("x", 3), record("y", 3)], 3);
        assert_eq!(board.entries[0].nickname, "x");
        assert_eq!(board.entries[1].nickname, "y");
    }
}
