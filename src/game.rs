//! Play session
//!
//! `Game` ties one `Engine` to the player's `Progression` for the length of
//! a session. Everything that mutates a run goes through `advance`, which
//! consumes host time in fixed steps and lets the challenge scheduler look
//! at the run between steps, so ticks, spawns and challenge pauses never
//! interleave.

use std::time::Duration;

use glam::Vec2;
use rand::Rng;
use rand_pcg::Pcg32;
use serde::Serialize;

use crate::challenge::{ChallengeScheduler, SideChallenge};
use crate::consts::{CHALLENGE_HEAL, SIM_DT};
use crate::difficulty::DifficultyTier;
use crate::error::Result;
use crate::feedback::{Cue, Feedback, FeedbackRouter, ImpactStrength};
use crate::persistence::ProfileStore;
use crate::progression::{Progression, RunSummary};
use crate::settings::{SettingEffect, SettingOption};
use crate::sim::{Actor, Engine, FallingEntity, FixedClock, SimEvent, SimPhase};

/// Read-only view of the session for presentation
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Snapshot {
    pub phase: SimPhase,
    pub tier: DifficultyTier,
    pub score: u64,
    pub distance: f64,
    pub actor: Actor,
    pub entities: Vec<FallingEntity>,
    pub pending_challenge: Option<SideChallenge>,
}

pub struct Game<'p, S: ProfileStore, R = Pcg32> {
    progression: &'p mut Progression<S>,
    engine: Engine<R>,
    scheduler: ChallengeScheduler,
    clock: FixedClock,
    feedback: FeedbackRouter,
    /// Host seconds spent Paused this run (pauses and challenge prompts)
    paused_time: f64,
    last_summary: Option<RunSummary>,
}

impl<'p, S: ProfileStore> Game<'p, S, Pcg32> {
    pub fn with_seed(progression: &'p mut Progression<S>, seed: u64) -> Self {
        Self::new(progression, Engine::with_seed(seed))
    }
}

impl<'p, S: ProfileStore, R: Rng> Game<'p, S, R> {
    pub fn new(progression: &'p mut Progression<S>, engine: Engine<R>) -> Self {
        let settings = progression.settings();
        let scheduler = ChallengeScheduler::new(settings.challenges_enabled);
        let feedback = FeedbackRouter::new(settings);
        Self {
            progression,
            engine,
            scheduler,
            clock: FixedClock::new(),
            feedback,
            paused_time: 0.0,
            last_summary: None,
        }
    }

    pub fn progression(&self) -> &Progression<S> {
        self.progression
    }

    pub fn engine(&self) -> &Engine<R> {
        &self.engine
    }

    pub fn phase(&self) -> SimPhase {
        self.engine.phase()
    }

    pub fn pending_challenge(&self) -> Option<&SideChallenge> {
        self.scheduler.pending()
    }

    /// Summary of the most recently finalized run
    pub fn last_summary(&self) -> Option<&RunSummary> {
        self.last_summary.as_ref()
    }

    pub fn snapshot(&self) -> Snapshot {
        let state = self.engine.state();
        Snapshot {
            phase: state.phase,
            tier: state.tier,
            score: state.score,
            distance: state.distance,
            actor: state.actor.clone(),
            entities: state.entities.clone(),
            pending_challenge: self.scheduler.pending().cloned(),
        }
    }

    /// Take queued feedback cues
    pub fn drain_feedback(&mut self) -> Vec<Cue> {
        self.feedback.drain()
    }

    /// Start a run at the player's current tier
    pub fn start(&mut self) -> Result<()> {
        self.engine.start(self.progression.tier())?;
        self.clock.reset();
        self.scheduler.reset();
        self.scheduler
            .set_enabled(self.progression.settings().challenges_enabled);
        self.paused_time = 0.0;
        self.last_summary = None;
        Ok(())
    }

    pub fn pause(&mut self) {
        if let Err(err) = self.engine.pause() {
            log::debug!("Ignored: {err}");
            return;
        }
        self.clock.reset();
        self.bank_currency();
    }

    /// Resume a paused run; a pending challenge must be resolved first
    pub fn resume(&mut self) {
        if self.scheduler.pending().is_some() {
            log::debug!("Ignored resume: side-challenge pending");
            return;
        }
        if let Err(err) = self.engine.resume() {
            log::debug!("Ignored: {err}");
        }
        self.clock.reset();
    }

    pub fn move_actor(&mut self, target: Vec2) {
        if let Err(err) = self.engine.move_actor(target) {
            log::trace!("Ignored: {err}");
        }
    }

    /// Feed a host frame delta; returns the simulation events it produced
    ///
    /// While Paused the delta only counts toward the run's play time.
    pub fn advance(&mut self, frame_dt: f32) -> Vec<SimEvent> {
        let mut events = Vec::new();
        match self.engine.phase() {
            SimPhase::Running => {}
            SimPhase::Paused => {
                self.paused_time += f64::from(frame_dt.max(0.0));
                return events;
            }
            SimPhase::Idle | SimPhase::Terminated => return events,
        }

        let steps = self.clock.advance(frame_dt);
        for _ in 0..steps {
            let step_events = self.engine.step();
            for event in &step_events {
                match event {
                    SimEvent::Contact { kind, .. } => self
                        .feedback
                        .emit(Feedback::Impact(ImpactStrength::for_kind(*kind))),
                    SimEvent::Terminated { .. } => self.feedback.emit(Feedback::GameOver),
                }
            }
            events.extend(step_events);

            if self.engine.phase() == SimPhase::Terminated {
                self.finalize_if_terminated();
                break;
            }

            let score = self.engine.score();
            if self.scheduler.observe(SIM_DT, score) {
                self.scheduler.trigger(self.engine.rng_mut(), score);
                self.pause();
                break;
            }
        }
        events
    }

    /// Commit a terminated run to progression (once per run)
    pub fn finalize_if_terminated(&mut self) -> Option<RunSummary> {
        let outcome = self.engine.finalize_if_terminated()?;
        self.scheduler.reset();
        self.bank_currency();

        // Wall-clock play time: ticks spent Running plus time spent Paused
        let elapsed = outcome.elapsed + Duration::from_secs_f64(self.paused_time);
        self.paused_time = 0.0;
        let summary = self.progression.finalize_run(outcome.final_score, elapsed);
        if summary.new_best {
            self.feedback.emit(Feedback::NewBest);
        }
        self.last_summary = Some(summary);
        Some(summary)
    }

    /// Complete the pending challenge: score, heal, currency, then resume.
    ///
    /// Returns the reward paid, or `None` when nothing was pending.
    pub fn complete_challenge(&mut self) -> Option<u64> {
        let challenge = self.scheduler.take_pending()?;
        self.engine.award_score(challenge.reward);
        self.engine.heal_actor(CHALLENGE_HEAL);
        self.progression.complete_challenge(challenge.reward);
        self.feedback.emit(Feedback::ChallengeCompleted);
        log::info!("Side-challenge completed: {}", challenge.title);
        self.resume();
        Some(challenge.reward)
    }

    /// Dismiss the pending challenge without reward and resume
    pub fn skip_challenge(&mut self) -> bool {
        let Some(challenge) = self.scheduler.take_pending() else {
            return false;
        };
        log::info!("Side-challenge skipped: {}", challenge.title);
        self.resume();
        true
    }

    /// Abandon the current run; collected currency is kept
    pub fn return_to_menu(&mut self) {
        self.bank_currency();
        self.engine.return_to_menu();
        self.clock.reset();
        self.paused_time = 0.0;
        self.scheduler.reset();
    }

    /// Change a setting mid-session
    pub fn set_option(&mut self, option: SettingOption) -> SettingEffect {
        let effect = self.progression.set_option(option);
        let settings = self.progression.settings();
        self.scheduler.set_enabled(settings.challenges_enabled);
        self.feedback.apply(settings);
        effect
    }

    fn bank_currency(&mut self) {
        let earned = self.engine.take_currency();
        self.progression.credit_currency(earned);
    }
}
