//! Deterministic simulation module
//!
//! All run logic lives here. This module must stay pure and deterministic:
//! - Fixed timestep only
//! - Injected, seedable RNG only
//! - Stable iteration order (by entity ID)
//! - No rendering, storage or platform dependencies

pub mod autopilot;
pub mod clock;
pub mod collision;
pub mod engine;
pub mod spawn;
pub mod state;
pub mod tick;

pub use clock::FixedClock;
pub use collision::{actor_hits, circles_overlap, clamp_to_bounds};
pub use engine::{Engine, RunOutcome};
pub use state::{Actor, EntityKind, FallingEntity, SimPhase, SimState, apply_score_delta};
pub use tick::{SimEvent, tick};
