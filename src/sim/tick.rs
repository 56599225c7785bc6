//! Fixed timestep simulation tick
//!
//! Core game loop that advances a run by one step. Motion, collisions,
//! scoring and the spawner all run inside this one function, so they can
//! never interleave.

use std::time::Duration;

use rand::Rng;

use super::collision::actor_hits;
use super::spawn::advance_spawner;
use super::state::{EntityKind, SimPhase, SimState};
use crate::consts::*;

/// Something that happened during a tick
#[derive(Debug, Clone, PartialEq)]
pub enum SimEvent {
    /// The actor touched an entity
    Contact {
        id: u32,
        kind: EntityKind,
        /// Health lost (obstacle) or gained (health bonus)
        health_change: i32,
        /// A shield soaked the hit
        shield_absorbed: bool,
        score: u64,
    },
    /// Health reached zero
    Terminated { final_score: u64, elapsed: Duration },
}

/// Resolve contact with an entity kind against actor and score
fn apply_contact(state: &mut SimState, kind: EntityKind) -> (i32, bool) {
    let mut health_change = 0i32;
    let mut shield_absorbed = false;

    match kind {
        EntityKind::Obstacle => {
            let had_shield = state.actor.shield;
            let lost = state.actor.take_damage(OBSTACLE_DAMAGE);
            shield_absorbed = had_shield;
            health_change = -(lost as i32);
        }
        EntityKind::Bonus => {}
        EntityKind::CosmicBonus => {
            state.currency_earned += COSMIC_BONUS_CURRENCY;
        }
        EntityKind::HealthBonus => {
            health_change = state.actor.heal(HEALTH_BONUS_HEAL) as i32;
        }
    }
    state.add_score(kind.points());

    (health_change, shield_absorbed)
}

/// Advance the run by one fixed timestep
pub fn tick<R: Rng + ?Sized>(state: &mut SimState, rng: &mut R, dt: f32) -> Vec<SimEvent> {
    let mut events = Vec::new();
    if state.phase != SimPhase::Running {
        return events;
    }

    state.time_ticks += 1;
    state.run_time += dt;
    let speed = state.tier.speed_multiplier();

    state.distance += DISTANCE_PER_TICK * speed as f64;

    for entity in &mut state.entities {
        entity.advance(speed, dt);
    }

    for i in 0..state.entities.len() {
        if !actor_hits(&state.actor, &state.entities[i]) {
            continue;
        }
        let kind = state.entities[i].kind;
        let (health_change, shield_absorbed) = apply_contact(state, kind);
        state.entities[i].collected = true;

        log::debug!(
            "Contact {:?} #{}: health {} ({:+}), score {}",
            kind,
            state.entities[i].id,
            state.actor.health,
            health_change,
            state.score
        );
        events.push(SimEvent::Contact {
            id: state.entities[i].id,
            kind,
            health_change,
            shield_absorbed,
            score: state.score,
        });
    }

    state
        .entities
        .retain(|e| !e.collected && !e.is_out_of_field());

    if state.actor.is_destroyed() {
        state.phase = SimPhase::Terminated;
        let elapsed = Duration::from_secs_f32(state.run_time);
        log::info!(
            "Run over: score {}, distance {:.1}, {:.1}s",
            state.score,
            state.distance,
            state.run_time
        );
        events.push(SimEvent::Terminated {
            final_score: state.score,
            elapsed,
        });
        return events;
    }

    advance_spawner(state, rng, dt);

    events
}
