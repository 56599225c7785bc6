//! Run state machine
//!
//! `Engine` owns one `SimState` and the random source. It advances only in
//! whole `SIM_DT` steps through `step()`; turning host frame time into steps
//! is the session's job (`Game::advance`).

use std::time::Duration;

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::collision::clamp_to_bounds;
use super::state::{Actor, FallingEntity, SimPhase, SimState};
use super::tick::{SimEvent, tick};
use crate::consts::SIM_DT;
use crate::difficulty::DifficultyTier;
use crate::error::{Error, Result};

/// Outcome of a terminated run, handed to progression exactly once
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RunOutcome {
    pub final_score: u64,
    pub elapsed: Duration,
    pub distance: f64,
}

/// Simulation engine with an injectable random source
#[derive(Debug, Clone)]
pub struct Engine<R = Pcg32> {
    state: SimState,
    rng: R,
    outcome: Option<RunOutcome>,
}

impl Engine<Pcg32> {
    /// Engine with a seeded PCG generator
    pub fn with_seed(seed: u64) -> Self {
        Self::new(Pcg32::seed_from_u64(seed))
    }
}

impl<R: Rng> Engine<R> {
    pub fn new(rng: R) -> Self {
        Self {
            state: SimState::default(),
            rng,
            outcome: None,
        }
    }

    pub fn state(&self) -> &SimState {
        &self.state
    }

    pub fn phase(&self) -> SimPhase {
        self.state.phase
    }

    pub fn score(&self) -> u64 {
        self.state.score
    }

    pub fn distance(&self) -> f64 {
        self.state.distance
    }

    pub fn actor(&self) -> &Actor {
        &self.state.actor
    }

    pub fn entities(&self) -> &[FallingEntity] {
        &self.state.entities
    }

    /// Seconds spent Running in the current run
    pub fn run_time(&self) -> f32 {
        self.state.run_time
    }

    /// Shared random source, so session-level draws stay on the same seed
    pub(crate) fn rng_mut(&mut self) -> &mut R {
        &mut self.rng
    }

    #[cfg(test)]
    pub(crate) fn state_mut(&mut self) -> &mut SimState {
        &mut self.state
    }

    fn invalid(&self, operation: &'static str) -> Error {
        Error::InvalidTransition {
            operation,
            phase: self.state.phase,
        }
    }

    /// Begin a fresh run at `tier` (from Idle or Terminated)
    pub fn start(&mut self, tier: DifficultyTier) -> Result<()> {
        match self.state.phase {
            SimPhase::Idle | SimPhase::Terminated => {}
            _ => return Err(self.invalid("start")),
        }
        self.outcome = None;
        self.state = SimState::new(tier);
        self.state.phase = SimPhase::Running;
        log::info!(
            "Run started at {} ({}x, spawn every {:.1}s)",
            tier.as_str(),
            tier.speed_multiplier(),
            tier.obstacle_interval().as_secs_f32()
        );
        Ok(())
    }

    pub fn pause(&mut self) -> Result<()> {
        if self.state.phase != SimPhase::Running {
            return Err(self.invalid("pause"));
        }
        self.state.phase = SimPhase::Paused;
        log::debug!("Run paused at score {}", self.state.score);
        Ok(())
    }

    pub fn resume(&mut self) -> Result<()> {
        if self.state.phase != SimPhase::Paused {
            return Err(self.invalid("resume"));
        }
        self.state.phase = SimPhase::Running;
        log::debug!("Run resumed");
        Ok(())
    }

    /// Abandon any run and return to Idle with cleared transient state
    pub fn return_to_menu(&mut self) {
        // Leave Running before clearing so nothing ticks against reset state
        self.state.phase = SimPhase::Idle;
        self.outcome = None;
        self.state = SimState::new(self.state.tier);
    }

    /// Move the actor toward `target`, clamped to the movement bounds
    pub fn move_actor(&mut self, target: Vec2) -> Result<()> {
        if self.state.phase != SimPhase::Running {
            return Err(self.invalid("move actor"));
        }
        self.state.actor.pos = clamp_to_bounds(target);
        Ok(())
    }

    /// Run exactly one fixed tick
    pub fn step(&mut self) -> Vec<SimEvent> {
        let events = tick(&mut self.state, &mut self.rng, SIM_DT);
        self.record_outcome(&events);
        events
    }

    fn record_outcome(&mut self, events: &[SimEvent]) {
        for event in events {
            if let SimEvent::Terminated {
                final_score,
                elapsed,
            } = *event
            {
                self.outcome = Some(RunOutcome {
                    final_score,
                    elapsed,
                    distance: self.state.distance,
                });
            }
        }
    }

    /// Take the outcome of a terminated run; `None` otherwise or if taken
    pub fn finalize_if_terminated(&mut self) -> Option<RunOutcome> {
        if self.state.phase != SimPhase::Terminated {
            return None;
        }
        self.outcome.take()
    }

    /// Add a score bonus outside of collisions (side-challenge rewards)
    pub fn award_score(&mut self, points: u64) {
        self.state.score = self.state.score.saturating_add(points);
    }

    /// Heal the actor outside of collisions; returns the health gained
    pub fn heal_actor(&mut self, amount: u32) -> u32 {
        self.state.actor.heal(amount)
    }

    pub fn grant_shield(&mut self) {
        self.state.actor.grant_shield();
    }

    /// Take currency collected during the run so far
    pub fn take_currency(&mut self) -> u64 {
        self.state.take_currency()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::*;
    use crate::sim::state::EntityKind;

    #[test]
    fn test_state_machine_transitions() {
        let mut engine = Engine::with_seed(1);
        assert_eq!(engine.phase(), SimPhase::Idle);

        assert!(engine.pause().is_err());
        assert!(engine.resume().is_err());

        engine.start(DifficultyTier::Easy).unwrap();
        assert_eq!(engine.phase(), SimPhase::Running);
        assert!(engine.start(DifficultyTier::Easy).is_err());

        engine.pause().unwrap();
        assert_eq!(engine.phase(), SimPhase::Paused);
        assert!(engine.pause().is_err());

        engine.resume().unwrap();
        assert_eq!(engine.phase(), SimPhase::Running);
    }

    #[test]
    fn test_paused_engine_does_not_tick() {
        let mut engine = Engine::with_seed(1);
        engine.start(DifficultyTier::Easy).unwrap();
        engine.step();
        let ticks = engine.state().time_ticks;
        assert_eq!(ticks, 1);

        engine.pause().unwrap();
        assert!(engine.step().is_empty());
        assert_eq!(engine.state().time_ticks, ticks);
    }

    #[test]
    fn test_move_actor_clamps_and_requires_running() {
        let mut engine = Engine::with_seed(1);
        let err = engine.move_actor(Vec2::new(0.0, 0.0)).unwrap_err();
        assert!(matches!(
            err,
            Error::InvalidTransition {
                phase: SimPhase::Idle,
                ..
            }
        ));
        assert_eq!(engine.actor().pos, Vec2::new(ACTOR_START_X, ACTOR_START_Y));

        engine.start(DifficultyTier::Easy).unwrap();
        engine.move_actor(Vec2::new(1000.0, -5.0)).unwrap();
        assert_eq!(engine.actor().pos, Vec2::new(ACTOR_MAX_X, ACTOR_MIN_Y));

        engine.pause().unwrap();
        assert!(engine.move_actor(Vec2::new(200.0, 200.0)).is_err());
        assert_eq!(engine.actor().pos, Vec2::new(ACTOR_MAX_X, ACTOR_MIN_Y));
    }

    #[test]
    fn test_start_resets_transient_state() {
        let mut engine = Engine::with_seed(5);
        engine.start(DifficultyTier::Easy).unwrap();
        for _ in 0..600 {
            engine.step();
        }
        engine.award_score(123);
        engine.state.actor.health = 0;
        engine.step();
        assert_eq!(engine.phase(), SimPhase::Terminated);

        engine.start(DifficultyTier::Medium).unwrap();
        assert_eq!(engine.score(), 0);
        assert_eq!(engine.distance(), 0.0);
        assert!(engine.entities().is_empty());
        assert_eq!(engine.actor().health, ACTOR_MAX_HEALTH);
        assert_eq!(engine.state().tier, DifficultyTier::Medium);
        assert!(engine.finalize_if_terminated().is_none());
    }

    #[test]
    fn test_finalize_yields_outcome_once() {
        let mut engine = Engine::with_seed(2);
        assert!(engine.finalize_if_terminated().is_none());

        engine.start(DifficultyTier::Easy).unwrap();
        engine.award_score(77);
        engine.state.actor.health = 0;
        engine.step();

        let outcome = engine.finalize_if_terminated().expect("terminated run");
        assert_eq!(outcome.final_score, 77);
        assert!(outcome.elapsed > Duration::ZERO);
        assert!(engine.finalize_if_terminated().is_none());
    }

    #[test]
    fn test_return_to_menu_clears_run() {
        let mut engine = Engine::with_seed(3);
        engine.start(DifficultyTier::Hard).unwrap();
        for _ in 0..400 {
            engine.step();
        }
        engine.return_to_menu();
        assert_eq!(engine.phase(), SimPhase::Idle);
        assert!(engine.entities().is_empty());
        assert_eq!(engine.score(), 0);
        assert!(engine.step().is_empty());
    }

    #[test]
    fn test_spawned_entities_fall_faster_on_higher_tier() {
        let mut slow = Engine::with_seed(4);
        let mut fast = Engine::with_seed(4);
        slow.start(DifficultyTier::Easy).unwrap();
        fast.start(DifficultyTier::Cosmic).unwrap();
        // Keep the actor clear of the spawn column
        slow.move_actor(Vec2::new(ACTOR_MIN_X, ACTOR_MAX_Y)).unwrap();
        fast.move_actor(Vec2::new(ACTOR_MIN_X, ACTOR_MAX_Y)).unwrap();

        let grace_ticks = (SPAWN_GRACE / SIM_DT) as usize + 2;
        for _ in 0..grace_ticks + 30 {
            slow.step();
            fast.step();
        }
        let slow_y = slow.entities()[0].pos.y;
        let fast_y = fast.entities()[0].pos.y;
        assert!(fast_y > slow_y);
        assert!(slow.entities().iter().all(|e| EntityKind::ALL.contains(&e.kind)));
    }
}
