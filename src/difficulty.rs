//! Adaptive difficulty tiers
//!
//! The tier only moves up, one step per finalized run, driven by the
//! lifetime average score.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Difficulty tier (ordered, never downgraded automatically)
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum DifficultyTier {
    #[default]
    Easy,
    Medium,
    Hard,
    Cosmic,
}

impl DifficultyTier {
    pub const ALL: [DifficultyTier; 4] = [
        DifficultyTier::Easy,
        DifficultyTier::Medium,
        DifficultyTier::Hard,
        DifficultyTier::Cosmic,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            DifficultyTier::Easy => "Easy",
            DifficultyTier::Medium => "Medium",
            DifficultyTier::Hard => "Hard",
            DifficultyTier::Cosmic => "Cosmic",
        }
    }

    /// Multiplier applied to fall speed and distance gain
    pub fn speed_multiplier(&self) -> f32 {
        match self {
            DifficultyTier::Easy => 1.0,
            DifficultyTier::Medium => 1.3,
            DifficultyTier::Hard => 1.6,
            DifficultyTier::Cosmic => 2.0,
        }
    }

    /// Mean time between spawns
    pub fn obstacle_interval(&self) -> Duration {
        match self {
            DifficultyTier::Easy => Duration::from_millis(3500),
            DifficultyTier::Medium => Duration::from_millis(2500),
            DifficultyTier::Hard => Duration::from_millis(2000),
            DifficultyTier::Cosmic => Duration::from_millis(1500),
        }
    }

    /// Average score that must be exceeded to leave this tier
    fn promotion_threshold(&self) -> Option<f64> {
        match self {
            DifficultyTier::Easy => Some(500.0),
            DifficultyTier::Medium => Some(1000.0),
            DifficultyTier::Hard => Some(2000.0),
            DifficultyTier::Cosmic => None,
        }
    }

    fn next(&self) -> Self {
        match self {
            DifficultyTier::Easy => DifficultyTier::Medium,
            DifficultyTier::Medium => DifficultyTier::Hard,
            DifficultyTier::Hard | DifficultyTier::Cosmic => DifficultyTier::Cosmic,
        }
    }
}

/// Tier after a finalized run with the given lifetime average.
///
/// Escalates at most one step and never regresses.
pub fn tier_for(average_score: f64, current: DifficultyTier) -> DifficultyTier {
    match current.promotion_threshold() {
        Some(threshold) if average_score > threshold => current.next(),
        _ => current,
    }
}
