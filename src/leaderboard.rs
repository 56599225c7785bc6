//! Score leaderboard
//!
//! Persisted through the profile store, keeps the top 100 finalized runs
//! sorted by score (highest first).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::consts::MAX_LEADERBOARD_ENTRIES;

/// A single leaderboard entry, snapshotting the profile at record time
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeaderboardEntry {
    pub player_name: String,
    pub score: u64,
    /// Games played including this run
    pub games_played: u32,
    pub average_score: f64,
    pub challenges_completed: u32,
    pub recorded_at: DateTime<Utc>,
}

impl LeaderboardEntry {
    /// Title earned by the average score at record time
    pub fn performance_rating(&self) -> &'static str {
        if self.average_score >= 2000.0 {
            "Cosmic Legend"
        } else if self.average_score >= 1000.0 {
            "Star Navigator"
        } else if self.average_score >= 500.0 {
            "Space Explorer"
        } else {
            "Nebula Cadet"
        }
    }
}

/// Capped leaderboard
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Leaderboard {
    entries: Vec<LeaderboardEntry>,
}

impl Leaderboard {
    /// Create empty leaderboard
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from persisted entries, restoring order and cap
    pub fn from_entries(mut entries: Vec<LeaderboardEntry>) -> Self {
        entries.sort_by(|a, b| b.score.cmp(&a.score));
        entries.truncate(MAX_LEADERBOARD_ENTRIES);
        Self { entries }
    }

    pub fn entries(&self) -> &[LeaderboardEntry] {
        &self.entries
    }

    pub fn into_entries(self) -> Vec<LeaderboardEntry> {
        self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the leaderboard is empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Get the top score (if any)
    pub fn top_score(&self) -> Option<u64> {
        self.entries.first().map(|e| e.score)
    }

    /// Insert an entry, keeping descending order and the cap.
    ///
    /// Returns the rank achieved (1-indexed) or None if it fell off the end.
    pub fn insert(&mut self, entry: LeaderboardEntry) -> Option<usize> {
        // Ties go after existing entries
        let pos = self
            .entries
            .iter()
            .position(|e| entry.score > e.score)
            .unwrap_or(self.entries.len());
        self.entries.insert(pos, entry);

        // Trim to max size, dropping the lowest scores
        self.entries.truncate(MAX_LEADERBOARD_ENTRIES);

        (pos < MAX_LEADERBOARD_ENTRIES).then_some(pos + 1)
    }

    /// First `limit` entries
    pub fn top(&self, limit: usize) -> &[LeaderboardEntry] {
        &self.entries[..limit.min(self.entries.len())]
    }

    /// Rank (1-indexed) of the entry for `player_name` with exactly `score`
    pub fn rank_of(&self, player_name: &str, score: u64) -> Option<usize> {
        self.entries
            .iter()
            .position(|e| e.player_name == player_name && e.score == score)
            .map(|i| i + 1)
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(score: u64) -> LeaderboardEntry {
        LeaderboardEntry {
            player_name: "Space Explorer".to_string(),
            score,
            games_played: 1,
            average_score: score as f64,
            challenges_completed: 0,
            recorded_at: Utc::now(),
        }
    }

    #[test]
    fn test_insert_keeps_descending_order() {
        let mut board = Leaderboard::new();
        assert_eq!(board.insert(entry(100)), Some(1));
        assert_eq!(board.insert(entry(300)), Some(1));
        assert_eq!(board.insert(entry(200)), Some(2));
        let scores: Vec<u64> = board.entries().iter().map(|e| e.score).collect();
        assert_eq!(scores, vec![300, 200, 100]);
        assert_eq!(board.top_score(), Some(300));
    }

    #[test]
    fn test_cap_discards_lowest() {
        let mut board = Leaderboard::new();
        for score in 1..=MAX_LEADERBOARD_ENTRIES as u64 {
            board.insert(entry(score));
        }
        assert_eq!(board.len(), MAX_LEADERBOARD_ENTRIES);

        // Too low to stay
        assert_eq!(board.insert(entry(1)), None);
        assert_eq!(board.len(), MAX_LEADERBOARD_ENTRIES);

        assert_eq!(board.insert(entry(1000)), Some(1));
        assert_eq!(board.len(), MAX_LEADERBOARD_ENTRIES);
        assert_eq!(board.entries().last().map(|e| e.score), Some(2));
    }

    #[test]
    fn test_from_entries_sorts_and_caps() {
        let entries: Vec<_> = (0..150).map(entry).collect();
        let board = Leaderboard::from_entries(entries);
        assert_eq!(board.len(), MAX_LEADERBOARD_ENTRIES);
        assert_eq!(board.top_score(), Some(149));
        assert!(board.entries().windows(2).all(|w| w[0].score >= w[1].score));
    }

    #[test]
    fn test_rank_and_top() {
        let mut board = Leaderboard::new();
        for score in [50, 70, 60] {
            board.insert(entry(score));
        }
        assert_eq!(board.rank_of("Space Explorer", 60), Some(2));
        assert_eq!(board.rank_of("Someone Else", 60), None);
        assert_eq!(board.top(2).len(), 2);
        assert_eq!(board.top(10).len(), 3);
    }

    #[test]
    fn test_performance_rating() {
        let mut e = entry(0);
        assert_eq!(e.performance_rating(), "Nebula Cadet");
        e.average_score = 500.0;
        assert_eq!(e.performance_rating(), "Space Explorer");
        e.average_score = 1500.0;
        assert_eq!(e.performance_rating(), "Star Navigator");
        e.average_score = 2000.0;
        assert_eq!(e.performance_rating(), "Cosmic Legend");
    }
}
