//! Entity spawner
//!
//! Kind selection is a weighted draw; the interval between spawns is the
//! tier mean with symmetric uniform jitter, so the long-run mean matches the
//! tier exactly.

use rand::Rng;

use super::state::{EntityKind, FallingEntity, SimState};
use crate::consts::*;
use crate::difficulty::DifficultyTier;

/// Weighted draw over the four kinds (25/50/20/5)
pub fn draw_kind<R: Rng + ?Sized>(rng: &mut R) -> EntityKind {
    let mut roll = rng.random_range(0..100u32);
    for kind in EntityKind::ALL {
        let weight = kind.spawn_weight();
        if roll < weight {
            return kind;
        }
        roll -= weight;
    }
    EntityKind::Bonus
}

/// Uniform spawn column inside the side margins
pub fn draw_x<R: Rng + ?Sized>(rng: &mut R) -> f32 {
    rng.random_range(SPAWN_MARGIN..=FIELD_WIDTH - SPAWN_MARGIN)
}

/// Seconds until the next spawn for this tier
pub fn draw_interval<R: Rng + ?Sized>(rng: &mut R, tier: DifficultyTier) -> f32 {
    let mean = tier.obstacle_interval().as_secs_f32();
    let jitter = rng.random_range(-SPAWN_JITTER..=SPAWN_JITTER);
    mean * (1.0 + jitter)
}

/// Spawn one random entity at the top of the field
pub fn spawn_entity<R: Rng + ?Sized>(state: &mut SimState, rng: &mut R) -> u32 {
    let kind = draw_kind(rng);
    let x = draw_x(rng);
    let id = state.next_entity_id();
    state.entities.push(FallingEntity::new(id, kind, x));
    log::trace!("Spawned {:?} #{} at x={:.1}", kind, id, x);
    id
}

/// Advance the spawn countdown by `dt`; spawns when it expires.
///
/// Returns the number of entities spawned (at most one per call at 60 Hz).
pub fn advance_spawner<R: Rng + ?Sized>(state: &mut SimState, rng: &mut R, dt: f32) -> u32 {
    state.spawn_countdown -= dt;
    let mut spawned = 0;
    while state.spawn_countdown <= 0.0 {
        spawn_entity(state, rng);
        state.spawn_countdown += draw_interval(rng, state.tier);
        spawned += 1;
    }
    spawned
}
