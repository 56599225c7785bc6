//! Nebula Sprint - a falling-object arcade runner
//!
//! Core modules:
//! - `sim`: Fixed-tick simulation (actor, spawner, collisions, scoring)
//! - `difficulty`: Adaptive difficulty tiers
//! - `progression`: Persistent session record, currency and cosmetics
//! - `leaderboard`: Capped, sorted score history
//! - `challenge`: Side-challenge catalog and scheduler
//! - `persistence`: Profile store backends (memory, JSON files, LocalStorage)
//! - `game`: Session object that wires the engine to progression

pub mod challenge;
pub mod difficulty;
pub mod error;
pub mod feedback;
pub mod game;
pub mod leaderboard;
pub mod persistence;
pub mod progression;
pub mod settings;
pub mod sim;

pub use challenge::{ChallengeCategory, ChallengeScheduler, SideChallenge};
pub use difficulty::DifficultyTier;
pub use error::{Error, Result};
pub use feedback::{Feedback, FeedbackRouter, ImpactStrength};
pub use game::{Game, Snapshot};
pub use leaderboard::{Leaderboard, LeaderboardEntry};
pub use persistence::{JsonFileStore, MemoryStore, ProfileStore};
pub use progression::{Progression, SessionRecord};
pub use settings::{ReminderTime, SettingEffect, SettingOption, Settings};

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (60 Hz)
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Maximum substeps per host frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;
    /// Largest host frame delta accepted by the clock (seconds)
    pub const MAX_FRAME_DT: f32 = 0.25;

    /// Play field dimensions (y grows downward)
    pub const FIELD_WIDTH: f32 = 400.0;
    /// Entities below this line are discarded
    pub const FIELD_BOTTOM: f32 = 900.0;
    /// Spawn line above the visible field
    pub const SPAWN_Y: f32 = -50.0;
    /// Horizontal margin kept free of spawns on both sides
    pub const SPAWN_MARGIN: f32 = 50.0;

    /// Actor movement bounds
    pub const ACTOR_MIN_X: f32 = 20.0;
    pub const ACTOR_MAX_X: f32 = 380.0;
    pub const ACTOR_MIN_Y: f32 = 100.0;
    pub const ACTOR_MAX_Y: f32 = 800.0;
    /// Actor position at the start of every run
    pub const ACTOR_START_X: f32 = 200.0;
    pub const ACTOR_START_Y: f32 = 400.0;
    /// Actor health cap
    pub const ACTOR_MAX_HEALTH: u32 = 150;

    /// Center distance below which the actor touches an entity
    pub const COLLISION_RADIUS: f32 = 25.0;

    /// Damage dealt by an obstacle
    pub const OBSTACLE_DAMAGE: u32 = 15;
    /// Heal granted by a health bonus
    pub const HEALTH_BONUS_HEAL: u32 = 25;
    /// Currency granted by a cosmic bonus
    pub const COSMIC_BONUS_CURRENCY: u64 = 5;

    /// Entity fall speed at 1.0x (units per second, 2 units per tick)
    pub const FALL_SPEED: f32 = 120.0;
    /// Distance gained per tick at 1.0x
    pub const DISTANCE_PER_TICK: f64 = 0.1;

    /// Delay before the spawner starts after `start` (seconds)
    pub const SPAWN_GRACE: f32 = 2.0;
    /// Spawn interval jitter as a fraction of the tier mean
    pub const SPAWN_JITTER: f32 = 0.2;

    /// Running time between side-challenges (seconds)
    pub const CHALLENGE_INTERVAL: f32 = 120.0;
    /// Score milestone step that triggers a side-challenge
    pub const CHALLENGE_SCORE_STEP: u64 = 500;
    /// Heal granted on completing a side-challenge
    pub const CHALLENGE_HEAL: u32 = 15;

    /// Leaderboard capacity
    pub const MAX_LEADERBOARD_ENTRIES: usize = 100;
}

/// Browser entry point: route `log` to the console and panics to `console.error`
#[cfg(target_arch = "wasm32")]
#[wasm_bindgen::prelude::wasm_bindgen(start)]
pub fn wasm_start() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);
    log::info!("Nebula Sprint core loaded");
}
