//! Side-challenges: optional real-world tasks that interrupt a run
//!
//! The scheduler only decides *when*; pausing the engine and paying out
//! rewards is done by `Game`.

use rand::Rng;
use rand::seq::IndexedRandom;
use serde::Serialize;

use crate::consts::{CHALLENGE_INTERVAL, CHALLENGE_SCORE_STEP};

/// Challenge categories
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ChallengeCategory {
    Hydration,
    Movement,
    Mindfulness,
    Rest,
    Nutrition,
}

/// A bonus task offered mid-run
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SideChallenge {
    pub id: &'static str,
    pub title: &'static str,
    pub description: &'static str,
    pub category: ChallengeCategory,
    /// Paid as score and as currency on completion
    pub reward: u64,
}

const fn challenge(
    id: &'static str,
    title: &'static str,
    description: &'static str,
    category: ChallengeCategory,
    reward: u64,
) -> SideChallenge {
    SideChallenge {
        id,
        title,
        description,
        category,
        reward,
    }
}

/// The fixed daily set
pub const DAILY_CHALLENGES: [SideChallenge; 8] = [
    challenge("water1", "Hydration Boost", "Drink a glass of water", ChallengeCategory::Hydration, 25),
    challenge("stretch1", "Quick Stretch", "Do a 2-minute stretch break", ChallengeCategory::Movement, 30),
    challenge("breathe1", "Deep Breathing", "Take 5 deep breaths", ChallengeCategory::Mindfulness, 20),
    challenge("walk1", "Short Walk", "Walk for 5 minutes", ChallengeCategory::Movement, 40),
    challenge("posture1", "Posture Check", "Adjust your sitting posture", ChallengeCategory::Movement, 15),
    challenge("eyes1", "Eye Rest", "Look away from screen for 20 seconds", ChallengeCategory::Rest, 20),
    challenge("snack1", "Healthy Snack", "Eat a fruit or vegetable", ChallengeCategory::Nutrition, 35),
    challenge("mindful1", "Mindful Moment", "Take a 1-minute mindfulness pause", ChallengeCategory::Mindfulness, 25),
];

/// Decides when a run should be interrupted by a side-challenge
#[derive(Debug, Clone)]
pub struct ChallengeScheduler {
    enabled: bool,
    /// Running seconds since the last trigger or run start
    since_last: f32,
    /// Score milestone that already produced a challenge
    last_milestone: u64,
    pending: Option<SideChallenge>,
}

impl Default for ChallengeScheduler {
    fn default() -> Self {
        Self::new(true)
    }
}

impl ChallengeScheduler {
    pub fn new(enabled: bool) -> Self {
        Self {
            enabled,
            since_last: 0.0,
            last_milestone: 0,
            pending: None,
        }
    }

    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Forget timers, milestones and any pending challenge
    pub fn reset(&mut self) {
        self.since_last = 0.0;
        self.last_milestone = 0;
        self.pending = None;
    }

    pub fn pending(&self) -> Option<&SideChallenge> {
        self.pending.as_ref()
    }

    /// Account for `dt` seconds of Running time at `score`.
    ///
    /// Returns true when a challenge is due now.
    pub fn observe(&mut self, dt: f32, score: u64) -> bool {
        if !self.enabled || self.pending.is_some() {
            return false;
        }
        self.since_last += dt;

        let time_due = self.since_last >= CHALLENGE_INTERVAL;
        let milestone_due =
            score > 0 && score % CHALLENGE_SCORE_STEP == 0 && score != self.last_milestone;
        time_due || milestone_due
    }

    /// Draw a challenge from the daily set and mark it pending
    pub fn trigger<R: Rng + ?Sized>(&mut self, rng: &mut R, score: u64) -> &SideChallenge {
        let drawn = DAILY_CHALLENGES
            .choose(rng)
            .cloned()
            .unwrap_or_else(|| DAILY_CHALLENGES[0].clone());
        self.since_last = 0.0;
        if score > 0 && score % CHALLENGE_SCORE_STEP == 0 {
            self.last_milestone = score;
        }
        log::info!("Side-challenge offered: {} (+{})", drawn.title, drawn.reward);
        self.pending.insert(drawn)
    }

    /// Resolve the pending challenge (completed or skipped)
    pub fn take_pending(&mut self) -> Option<SideChallenge> {
        self.pending.take()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_time_trigger_after_interval() {
        let mut scheduler = ChallengeScheduler::default();
        assert!(!scheduler.observe(CHALLENGE_INTERVAL - 1.0, 10));
        assert!(scheduler.observe(1.0, 10));
    }

    #[test]
    fn test_score_milestone_triggers_once() {
        let mut rng = Pcg32::seed_from_u64(1);
        let mut scheduler = ChallengeScheduler::default();
        assert!(!scheduler.observe(0.1, 490));
        assert!(scheduler.observe(0.1, 500));

        scheduler.trigger(&mut rng, 500);
        // Pending blocks further triggers
        assert!(!scheduler.observe(200.0, 1000));
        assert!(scheduler.take_pending().is_some());

        // Same milestone doesn't re-fire after resolution
        assert!(!scheduler.observe(0.1, 500));
        assert!(scheduler.observe(0.1, 1000));
    }

    #[test]
    fn test_zero_score_is_not_a_milestone() {
        let mut scheduler = ChallengeScheduler::default();
        assert!(!scheduler.observe(1.0, 0));
    }

    #[test]
    fn test_trigger_resets_timer() {
        let mut rng = Pcg32::seed_from_u64(2);
        let mut scheduler = ChallengeScheduler::default();
        assert!(scheduler.observe(CHALLENGE_INTERVAL, 3));
        let drawn = scheduler.trigger(&mut rng, 3).clone();
        assert!(DAILY_CHALLENGES.contains(&drawn));
        scheduler.take_pending();

        assert!(!scheduler.observe(CHALLENGE_INTERVAL / 2.0, 3));
    }

    #[test]
    fn test_disabled_never_triggers() {
        let mut scheduler = ChallengeScheduler::new(false);
        assert!(!scheduler.observe(CHALLENGE_INTERVAL * 2.0, 500));
        scheduler.set_enabled(true);
        assert!(scheduler.observe(0.0, 500));
    }

    #[test]
    fn test_draw_covers_catalog() {
        let mut rng = Pcg32::seed_from_u64(3);
        let mut scheduler = ChallengeScheduler::default();
        let mut seen = std::collections::HashSet::new();
        for _ in 0..400 {
            seen.insert(scheduler.trigger(&mut rng, 1).id);
            scheduler.take_pending();
        }
        assert_eq!(seen.len(), DAILY_CHALLENGES.len());
    }
}
