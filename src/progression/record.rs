//! Persisted session record
//!
//! Pure data plus the arithmetic that updates it; persistence is the
//! caller's job.

use std::collections::BTreeSet;
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::difficulty::{DifficultyTier, tier_for};
use crate::error::{Error, Result};

/// Cosmetic every profile owns
pub const DEFAULT_COSMETIC: &str = "default";
/// Display name used until the player picks one
pub const DEFAULT_PLAYER_NAME: &str = "Space Explorer";

/// Cumulative progression across runs
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionRecord {
    pub player_name: String,
    /// Score of the most recently finalized run
    pub last_score: u64,
    pub best_score: u64,
    pub games_played: u32,
    pub total_play_time: Duration,
    /// Arithmetic mean of every finalized score
    pub average_score: f64,
    pub currency: u64,
    pub challenges_completed: u32,
    pub challenge_streak: u32,
    pub unlocked_cosmetics: BTreeSet<String>,
    pub selected_cosmetic: String,
    pub tier: DifficultyTier,
    pub last_played: Option<DateTime<Utc>>,
}

impl Default for SessionRecord {
    fn default() -> Self {
        Self {
            player_name: DEFAULT_PLAYER_NAME.to_string(),
            last_score: 0,
            best_score: 0,
            games_played: 0,
            total_play_time: Duration::ZERO,
            average_score: 0.0,
            currency: 0,
            challenges_completed: 0,
            challenge_streak: 0,
            unlocked_cosmetics: BTreeSet::from([DEFAULT_COSMETIC.to_string()]),
            selected_cosmetic: DEFAULT_COSMETIC.to_string(),
            tier: DifficultyTier::Easy,
            last_played: None,
        }
    }
}

impl SessionRecord {
    /// Repair invariants on a record read from storage
    pub fn sanitized(mut self) -> Self {
        self.unlocked_cosmetics.insert(DEFAULT_COSMETIC.to_string());
        if !self.unlocked_cosmetics.contains(&self.selected_cosmetic) {
            self.selected_cosmetic = DEFAULT_COSMETIC.to_string();
        }
        if self.player_name.trim().is_empty() {
            self.player_name = DEFAULT_PLAYER_NAME.to_string();
        }
        if !self.average_score.is_finite() || self.average_score < 0.0 {
            self.average_score = 0.0;
        }
        self
    }

    /// Fold a finalized run into the record
    pub fn apply_run(&mut self, final_score: u64, elapsed: Duration, now: DateTime<Utc>) {
        self.games_played += 1;
        self.total_play_time += elapsed;
        self.last_played = Some(now);
        self.last_score = final_score;
        self.best_score = self.best_score.max(final_score);

        let n = self.games_played as f64;
        self.average_score = (self.average_score * (n - 1.0) + final_score as f64) / n;

        self.tier = tier_for(self.average_score, self.tier);
    }

    pub fn apply_challenge(&mut self, reward: u64) {
        self.challenges_completed += 1;
        self.challenge_streak += 1;
        self.currency = self.currency.saturating_add(reward);
    }

    pub fn credit(&mut self, amount: u64) {
        self.currency = self.currency.saturating_add(amount);
    }

    /// Debit `amount`, leaving the balance untouched on failure
    pub fn debit(&mut self, amount: u64) -> Result<()> {
        if self.currency < amount {
            return Err(Error::InsufficientFunds {
                requested: amount,
                available: self.currency,
            });
        }
        self.currency -= amount;
        Ok(())
    }

    /// Returns false if already unlocked
    pub fn unlock(&mut self, cosmetic_id: &str) -> bool {
        self.unlocked_cosmetics.insert(cosmetic_id.to_string())
    }

    pub fn is_unlocked(&self, cosmetic_id: &str) -> bool {
        self.unlocked_cosmetics.contains(cosmetic_id)
    }
}
