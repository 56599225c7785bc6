//! Persistent progression
//!
//! `Progression` is the single owner of the session record, leaderboard and
//! settings for a process. It is created once, passed by reference to
//! whatever needs it, and writes through its `ProfileStore` at every
//! transition (run finalized, challenge completed, currency or settings
//! changed). Store failures are logged and otherwise ignored: the in-memory
//! state stays authoritative and the next successful save catches up.

pub mod cosmetics;
pub mod record;

pub use cosmetics::{CATALOG, Cosmetic};
pub use record::{DEFAULT_COSMETIC, DEFAULT_PLAYER_NAME, SessionRecord};

use std::fmt::Write as _;
use std::time::Duration;

use chrono::Utc;

use crate::difficulty::DifficultyTier;
use crate::error::{Error, Result};
use crate::leaderboard::{Leaderboard, LeaderboardEntry};
use crate::persistence::ProfileStore;
use crate::settings::{SettingEffect, SettingOption, Settings};

/// What a finalized run changed
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RunSummary {
    pub final_score: u64,
    pub tier_before: DifficultyTier,
    pub tier_after: DifficultyTier,
    pub new_best: bool,
    /// Leaderboard rank, if the run was recorded
    pub rank: Option<usize>,
}

impl RunSummary {
    pub fn tier_changed(&self) -> bool {
        self.tier_after != self.tier_before
    }
}

/// Which stored values are older than memory
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct Dirty {
    record: bool,
    leaderboard: bool,
    settings: bool,
}

impl Dirty {
    fn any(&self) -> bool {
        self.record || self.leaderboard || self.settings
    }
}

pub struct Progression<S: ProfileStore> {
    record: SessionRecord,
    leaderboard: Leaderboard,
    settings: Settings,
    store: S,
    dirty: Dirty,
}

impl<S: ProfileStore> Progression<S> {
    /// Load everything from `store`, falling back to defaults on failure
    pub fn load(store: S) -> Self {
        let record = match store.load() {
            Ok(Some(record)) => record.sanitized(),
            Ok(None) => {
                log::info!("No saved profile, starting fresh");
                SessionRecord::default()
            }
            Err(err) => {
                log::warn!("Profile unavailable, using defaults: {err}");
                SessionRecord::default()
            }
        };
        let leaderboard = match store.load_leaderboard() {
            Ok(entries) => Leaderboard::from_entries(entries),
            Err(err) => {
                log::warn!("Leaderboard unavailable, starting empty: {err}");
                Leaderboard::new()
            }
        };
        let settings = match store.load_settings() {
            Ok(settings) => settings.unwrap_or_default(),
            Err(err) => {
                log::warn!("Settings unavailable, using defaults: {err}");
                Settings::default()
            }
        };
        log::info!(
            "Loaded profile: {} games, best {}, tier {}, {} leaderboard entries",
            record.games_played,
            record.best_score,
            record.tier.as_str(),
            leaderboard.len()
        );

        Self {
            record,
            leaderboard,
            settings,
            store,
            dirty: Dirty::default(),
        }
    }

    pub fn record(&self) -> &SessionRecord {
        &self.record
    }

    pub fn leaderboard(&self) -> &Leaderboard {
        &self.leaderboard
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }

    pub fn tier(&self) -> DifficultyTier {
        self.record.tier
    }

    pub fn currency(&self) -> u64 {
        self.record.currency
    }

    /// True while any stored value is older than memory
    pub fn is_out_of_sync(&self) -> bool {
        self.dirty.any()
    }

    /// Write every stale value; returns true once the store is current
    pub fn sync(&mut self) -> bool {
        if self.dirty.record {
            match self.store.save(&self.record) {
                Ok(()) => self.dirty.record = false,
                Err(err) => log::warn!("Could not save profile: {err}"),
            }
        }
        if self.dirty.leaderboard {
            match self.store.save_leaderboard(self.leaderboard.entries()) {
                Ok(()) => self.dirty.leaderboard = false,
                Err(err) => log::warn!("Could not save leaderboard: {err}"),
            }
        }
        if self.dirty.settings {
            match self.store.save_settings(&self.settings) {
                Ok(()) => self.dirty.settings = false,
                Err(err) => log::warn!("Could not save settings: {err}"),
            }
        }
        !self.dirty.any()
    }

    fn persist_record(&mut self) {
        self.dirty.record = true;
        self.sync();
    }

    fn persist_settings(&mut self) {
        self.dirty.settings = true;
        self.sync();
    }

    /// Commit a terminated run
    pub fn finalize_run(&mut self, final_score: u64, elapsed: Duration) -> RunSummary {
        let tier_before = self.record.tier;
        let new_best = final_score > self.record.best_score;

        self.record.apply_run(final_score, elapsed, Utc::now());
        let tier_after = self.record.tier;
        if tier_after != tier_before {
            log::info!(
                "Difficulty up: {} -> {} (average {:.1})",
                tier_before.as_str(),
                tier_after.as_str(),
                self.record.average_score
            );
        }
        self.dirty.record = true;

        let rank = if final_score > 0 {
            let entry = LeaderboardEntry {
                player_name: self.record.player_name.clone(),
                score: final_score,
                games_played: self.record.games_played,
                average_score: self.record.average_score,
                challenges_completed: self.record.challenges_completed,
                recorded_at: self.record.last_played.unwrap_or_else(Utc::now),
            };
            let rank = self.leaderboard.insert(entry);
            self.dirty.leaderboard = true;
            rank
        } else {
            None
        };
        self.sync();

        log::info!(
            "Run finalized: score {final_score}, games {}, average {:.1}, rank {rank:?}",
            self.record.games_played,
            self.record.average_score
        );

        RunSummary {
            final_score,
            tier_before,
            tier_after,
            new_best,
            rank,
        }
    }

    /// Record a completed side-challenge and pay its reward as currency
    pub fn complete_challenge(&mut self, reward: u64) {
        self.record.apply_challenge(reward);
        self.persist_record();
    }

    /// Credit currency earned during play
    pub fn credit_currency(&mut self, amount: u64) {
        if amount == 0 {
            return;
        }
        self.record.credit(amount);
        self.persist_record();
    }

    pub fn spend_currency(&mut self, amount: u64) -> Result<()> {
        self.record.debit(amount)?;
        self.persist_record();
        Ok(())
    }

    /// Buy a catalog cosmetic. `Ok(false)` if it was already owned.
    pub fn purchase_cosmetic(&mut self, id: &str) -> Result<bool> {
        let cosmetic =
            cosmetics::find(id).ok_or_else(|| Error::UnknownCosmetic(id.to_string()))?;
        if self.record.is_unlocked(id) {
            return Ok(false);
        }
        self.record.debit(cosmetic.cost)?;
        self.record.unlock(id);
        self.persist_record();
        log::info!("Purchased {} for {}", cosmetic.name, cosmetic.cost);
        Ok(true)
    }

    pub fn select_cosmetic(&mut self, id: &str) -> Result<()> {
        if cosmetics::find(id).is_none() {
            return Err(Error::UnknownCosmetic(id.to_string()));
        }
        if !self.record.is_unlocked(id) {
            return Err(Error::CosmeticLocked(id.to_string()));
        }
        self.record.selected_cosmetic = id.to_string();
        self.persist_record();
        Ok(())
    }

    pub fn set_player_name(&mut self, name: &str) {
        let name = name.trim();
        self.record.player_name = if name.is_empty() {
            DEFAULT_PLAYER_NAME.to_string()
        } else {
            name.to_string()
        };
        self.persist_record();
    }

    /// Apply a settings change, persist it, and return the host action
    pub fn set_option(&mut self, option: SettingOption) -> SettingEffect {
        let effect = self.settings.set_option(option);
        self.persist_settings();
        effect
    }

    /// Wipe the record and leaderboard (irreversible)
    pub fn reset_progress(&mut self) {
        let name = std::mem::take(&mut self.record.player_name);
        self.record = SessionRecord {
            player_name: name,
            ..SessionRecord::default()
        }
        .sanitized();
        self.leaderboard.clear();
        self.dirty.record = true;
        self.dirty.leaderboard = true;
        self.sync();
        log::info!("Progress reset");
    }

    /// Rank of the player's best score on the leaderboard
    pub fn player_rank(&self) -> Option<usize> {
        self.leaderboard
            .rank_of(&self.record.player_name, self.record.best_score)
    }

    pub fn top_entries(&self, limit: usize) -> &[LeaderboardEntry] {
        self.leaderboard.top(limit)
    }

    /// One-line read on how the average compares to the best run
    pub fn performance_insight(&self) -> String {
        let best = self.record.best_score;
        let ratio = if best > 0 {
            self.record.average_score / best as f64 * 100.0
        } else {
            0.0
        };
        let pct = ratio as u32;

        if ratio >= 80.0 {
            format!("Consistent Excellence! You're performing at {pct}% of your best.")
        } else if ratio >= 60.0 {
            format!("Strong Progress! You're at {pct}% of your peak performance.")
        } else if ratio >= 40.0 {
            "Room to Grow! Focus on avoiding obstacles to boost your average.".to_string()
        } else {
            "Keep Practicing! Every game makes you better.".to_string()
        }
    }

    /// Total play time as "Hh Mm" or "Mm"
    pub fn playtime_formatted(&self) -> String {
        let secs = self.record.total_play_time.as_secs();
        let hours = secs / 3600;
        let minutes = (secs % 3600) / 60;
        if hours > 0 {
            format!("{hours}h {minutes}m")
        } else {
            format!("{minutes}m")
        }
    }

    /// Plain-text dump of the profile for data export
    pub fn export_summary(&self) -> String {
        let r = &self.record;
        let mut out = String::from("Nebula Sprint Game Data Export\n");
        let _ = writeln!(out, "Generated: {}\n", Utc::now().to_rfc3339());
        let _ = writeln!(out, "Player: {}", r.player_name);
        let _ = writeln!(out, "High Score: {}", r.best_score);
        let _ = writeln!(out, "Games Played: {}", r.games_played);
        let _ = writeln!(out, "Average Score: {:.1}", r.average_score);
        let _ = writeln!(out, "Cosmic Currency: {}", r.currency);
        let _ = writeln!(out, "Lifestyle Challenges: {}", r.challenges_completed);
        let _ = writeln!(out, "Current Streak: {}", r.challenge_streak);
        let _ = writeln!(out, "Difficulty: {}", r.tier.as_str());
        let unlocked: Vec<&str> = r.unlocked_cosmetics.iter().map(String::as_str).collect();
        let _ = writeln!(out, "Unlocked Themes: {}", unlocked.join(", "));
        out
    }
}
