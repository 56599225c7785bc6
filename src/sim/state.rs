//! Simulation state and core types
//!
//! Everything a run needs lives in `SimState`; it is plain data and can be
//! serialized for snapshots.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::difficulty::DifficultyTier;

/// Current phase of a run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SimPhase {
    /// No run in progress (menu)
    #[default]
    Idle,
    /// Active gameplay
    Running,
    /// Run suspended (player or side-challenge)
    Paused,
    /// Actor destroyed, waiting for finalization
    Terminated,
}

/// The player's craft
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Actor {
    pub pos: Vec2,
    /// Health in `0..=ACTOR_MAX_HEALTH`
    pub health: u32,
    /// Absorbs the next damage event
    pub shield: bool,
    pub speed: f32,
}

impl Default for Actor {
    fn default() -> Self {
        Self {
            pos: Vec2::new(ACTOR_START_X, ACTOR_START_Y),
            health: ACTOR_MAX_HEALTH,
            shield: false,
            speed: 1.0,
        }
    }
}

impl Actor {
    /// Apply a damage event. Returns the health actually lost.
    ///
    /// A shield absorbs the whole event and is consumed.
    pub fn take_damage(&mut self, amount: u32) -> u32 {
        if self.shield {
            self.shield = false;
            return 0;
        }
        let lost = amount.min(self.health);
        self.health -= lost;
        lost
    }

    /// Restore health, capped at the maximum. Returns the health gained.
    pub fn heal(&mut self, amount: u32) -> u32 {
        let healed = self.health.saturating_add(amount).min(ACTOR_MAX_HEALTH);
        let gained = healed - self.health;
        self.health = healed;
        gained
    }

    pub fn grant_shield(&mut self) {
        self.shield = true;
    }

    pub fn is_destroyed(&self) -> bool {
        self.health == 0
    }
}

/// Falling entity types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntityKind {
    Obstacle,
    Bonus,
    CosmicBonus,
    HealthBonus,
}

impl EntityKind {
    pub const ALL: [EntityKind; 4] = [
        EntityKind::Obstacle,
        EntityKind::Bonus,
        EntityKind::CosmicBonus,
        EntityKind::HealthBonus,
    ];

    /// Score delta applied on contact
    pub fn points(&self) -> i64 {
        match self {
            EntityKind::Obstacle => -10,
            EntityKind::Bonus => 10,
            EntityKind::CosmicBonus => 50,
            EntityKind::HealthBonus => 25,
        }
    }

    /// Center distance below which the actor touches this kind
    pub fn collision_radius(&self) -> f32 {
        COLLISION_RADIUS
    }

    /// Spawn weight out of 100
    pub fn spawn_weight(&self) -> u32 {
        match self {
            EntityKind::Obstacle => 25,
            EntityKind::Bonus => 50,
            EntityKind::CosmicBonus => 20,
            EntityKind::HealthBonus => 5,
        }
    }

    pub fn is_hazard(&self) -> bool {
        matches!(self, EntityKind::Obstacle)
    }
}

/// An object falling through the field
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FallingEntity {
    pub id: u32,
    pub kind: EntityKind,
    pub pos: Vec2,
    /// Velocity at 1.0x speed (units per second)
    pub vel: Vec2,
    pub collected: bool,
}

impl FallingEntity {
    pub fn new(id: u32, kind: EntityKind, x: f32) -> Self {
        Self {
            id,
            kind,
            pos: Vec2::new(x, SPAWN_Y),
            vel: Vec2::new(0.0, FALL_SPEED),
            collected: false,
        }
    }

    /// Advance along velocity scaled by the tier multiplier
    pub fn advance(&mut self, speed_multiplier: f32, dt: f32) {
        self.pos += self.vel * speed_multiplier * dt;
    }

    /// Past the bottom of the field
    pub fn is_out_of_field(&self) -> bool {
        self.pos.y > FIELD_BOTTOM
    }
}

/// Apply a score delta, flooring the result at zero
pub fn apply_score_delta(score: u64, delta: i64) -> u64 {
    if delta >= 0 {
        score.saturating_add(delta as u64)
    } else {
        score.saturating_sub(delta.unsigned_abs())
    }
}

/// Complete run state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimState {
    pub phase: SimPhase,
    /// Tier captured at `start`; fixed for the whole run
    pub tier: DifficultyTier,
    pub actor: Actor,
    /// Live entities (sorted by id)
    pub entities: Vec<FallingEntity>,
    pub score: u64,
    pub distance: f64,
    /// Seconds spent Running this run
    pub run_time: f32,
    /// Simulation tick counter
    pub time_ticks: u64,
    /// Seconds until the spawner fires
    pub spawn_countdown: f32,
    /// Currency collected this run, not yet credited to the profile
    pub currency_earned: u64,
    next_id: u32,
}

impl Default for SimState {
    fn default() -> Self {
        Self {
            phase: SimPhase::Idle,
            tier: DifficultyTier::Easy,
            actor: Actor::default(),
            entities: Vec::new(),
            score: 0,
            distance: 0.0,
            run_time: 0.0,
            time_ticks: 0,
            spawn_countdown: SPAWN_GRACE,
            currency_earned: 0,
            next_id: 1,
        }
    }
}

impl SimState {
    /// Fresh run state at the given tier (phase stays Idle)
    pub fn new(tier: DifficultyTier) -> Self {
        Self {
            tier,
            ..Self::default()
        }
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    pub fn add_score(&mut self, delta: i64) {
        self.score = apply_score_delta(self.score, delta);
    }

    /// Take the currency collected since the last call
    pub fn take_currency(&mut self) -> u64 {
        std::mem::take(&mut self.currency_earned)
    }
}
