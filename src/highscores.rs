//! High score leaderboard system
//!
//! Kept in memory for the life of the process; tracks top 10 scores.
//! Saving through `persistence` is optional.

use serde::{Deserialize, Serialize};

use crate::persistence::{JsonStore, PersistError};

/// Maximum number of high scores to keep
pub const MAX_HIGH_SCORES: usize = 10;

/// A single high score entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HighScoreEntry {
    /// Player's score
    pub score: u64,
    /// Tower height reached, in blocks (base included)
    pub tower_len: usize,
    /// Unix timestamp (ms) when achieved
    pub timestamp: u64,
}

/// High score leaderboard
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct HighScores {
    pub entries: Vec<HighScoreEntry>,
}

impl HighScores {
    /// Storage key
    const STORAGE_KEY: &'static str = "highscores";

    /// Create empty leaderboard
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Check if a score qualifies for the leaderboard
    pub fn qualifies(&self, score: u64) -> bool {
        if score == 0 {
            return false;
        }
        if self.entries.len() < MAX_HIGH_SCORES {
            return true;
        }
        // Check if score beats the lowest entry
        self.entries.last().map(|e| score > e.score).unwrap_or(true)
    }

    /// Add a new score to the leaderboard (if it qualifies)
    /// Returns the rank achieved (1-indexed) or None if didn't qualify
    pub fn add_score(&mut self, score: u64, tower_len: usize, timestamp: u64) -> Option<usize> {
        if !self.qualifies(score) {
            return None;
        }

        let entry = HighScoreEntry {
            score,
            tower_len,
            timestamp,
        };

        // Sorted descending by score; ties keep the earlier run ahead
        let pos = self.entries.iter().position(|e| score > e.score);
        let rank = match pos {
            Some(i) => {
                self.entries.insert(i, entry);
                i + 1
            }
            None => {
                self.entries.push(entry);
                self.entries.len()
            }
        };

        self.entries.truncate(MAX_HIGH_SCORES);

        Some(rank)
    }

    /// Check if the leaderboard is empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Get the top score (if any)
    pub fn top_score(&self) -> Option<u64> {
        self.entries.first().map(|e| e.score)
    }

    /// Best score so far, 0 when nothing has been recorded
    pub fn best(&self) -> u64 {
        self.top_score().unwrap_or(0)
    }

    /// Load high scores, starting fresh on any failure
    pub fn load(store: &JsonStore) -> Self {
        let scores: HighScores = store.load_or_default(Self::STORAGE_KEY);
        log::info!("Loaded {} high scores", scores.entries.len());
        scores
    }

    pub fn save(&self, store: &JsonStore) -> Result<(), PersistError> {
        store.save(Self::STORAGE_KEY, self)?;
        log::info!("High scores saved ({} entries)", self.entries.len());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_never_qualifies() {
        let scores = HighScores::new();
        assert!(!scores.qualifies(0));
        assert_eq!(scores.best(), 0);
    }

    #[test]
    fn test_sorted_descending() {
        let mut scores = HighScores::new();
        assert_eq!(scores.add_score(50, 4, 1), Some(1));
        assert_eq!(scores.add_score(90, 5, 2), Some(1));
        assert_eq!(scores.add_score(70, 4, 3), Some(2));
        let order: Vec<u64> = scores.entries.iter().map(|e| e.score).collect();
        assert_eq!(order, vec![90, 70, 50]);
        assert_eq!(scores.best(), 90);
    }

    #[test]
    fn test_truncates_to_max() {
        let mut scores = HighScores::new();
        for i in 1..=15u64 {
            scores.add_score(i * 10, 2, i);
        }
        assert_eq!(scores.entries.len(), MAX_HIGH_SCORES);
        assert_eq!(scores.top_score(), Some(150));
        assert!(!scores.qualifies(50));
    }

    #[test]
    fn test_persist_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonStore::new(dir.path());
        let mut scores = HighScores::new();
        scores.add_score(140, 5, 1_700_000_000_000);
        scores.save(&store).unwrap();
        let loaded = HighScores::load(&store);
        assert_eq!(loaded.entries, scores.entries);
    }
}
