//! Idle/demo mode steering
//!
//! Produces `move_actor` targets from the current state: dodge the most
//! urgent obstacle, otherwise chase the closest collectible, otherwise
//! wander around the middle of the field.

use glam::Vec2;

use super::state::{EntityKind, FallingEntity, SimState};
use crate::consts::*;

/// How far above the actor an obstacle counts as a threat
const THREAT_LOOKAHEAD: f32 = 220.0;
/// Horizontal clearance the autopilot keeps from obstacles
const DODGE_CLEARANCE: f32 = COLLISION_RADIUS * 2.0;
/// Horizontal distance covered per decision
const STEP: f32 = 6.0;

/// Entities still above (or level with) the actor, within `lookahead`
fn incoming<'a>(
    state: &'a SimState,
    lookahead: f32,
) -> impl Iterator<Item = &'a FallingEntity> + 'a {
    let actor_y = state.actor.pos.y;
    state.entities.iter().filter(move |e| {
        !e.collected && e.pos.y <= actor_y + COLLISION_RADIUS && actor_y - e.pos.y < lookahead
    })
}

/// Next target for the actor, or `None` when it should stay put
pub fn steer(state: &SimState) -> Option<Vec2> {
    let actor = state.actor.pos;

    // Most urgent threat: the lowest obstacle in our column
    let threat = incoming(state, THREAT_LOOKAHEAD)
        .filter(|e| e.kind.is_hazard() && (e.pos.x - actor.x).abs() < DODGE_CLEARANCE)
        .max_by(|a, b| a.pos.y.total_cmp(&b.pos.y));

    if let Some(obstacle) = threat {
        // Step away, toward the roomier side when pinned against a wall
        let away: f32 = if obstacle.pos.x > actor.x { -1.0 } else { 1.0 };
        let dir = if (actor.x <= ACTOR_MIN_X + STEP && away < 0.0)
            || (actor.x >= ACTOR_MAX_X - STEP && away > 0.0)
        {
            -away
        } else {
            away
        };
        return Some(Vec2::new(actor.x + dir * STEP, actor.y));
    }

    // Closest collectible, health first when hurt
    let hurt = state.actor.health < ACTOR_MAX_HEALTH / 2;
    let prize = incoming(state, FIELD_BOTTOM)
        .filter(|e| !e.kind.is_hazard())
        .min_by(|a, b| {
            let rank = |e: &FallingEntity| -> (f32, f32) {
                let priority = if hurt && e.kind == EntityKind::HealthBonus { 0.0 } else { 1.0 };
                (priority, (e.pos.x - actor.x).abs() + (actor.y - e.pos.y) * 0.25)
            };
            let (pa, da) = rank(a);
            let (pb, db) = rank(b);
            pa.total_cmp(&pb).then(da.total_cmp(&db))
        });

    if let Some(entity) = prize {
        let dx = (entity.pos.x - actor.x).clamp(-STEP, STEP);
        if dx.abs() < f32::EPSILON {
            return None;
        }
        return Some(Vec2::new(actor.x + dx, actor.y));
    }

    // Nothing to do: wander near the center so spawns stay reachable
    let time_factor = state.time_ticks as f32 * 0.01;
    let offset = time_factor.sin() * 60.0 + (time_factor * 0.7).sin() * 30.0;
    let target_x = FIELD_WIDTH / 2.0 + offset;
    let dx = (target_x - actor.x).clamp(-STEP, STEP);
    Some(Vec2::new(actor.x + dx, actor.y))
}
