//! Collision detection and actor bounds
//!
//! Contact between the actor and a falling entity is a plain circular
//! overlap on center distance.

use glam::Vec2;

use super::state::{Actor, FallingEntity};
use crate::consts::*;

/// Whether two centers are closer than `radius`
#[inline]
pub fn circles_overlap(a: Vec2, b: Vec2, radius: f32) -> bool {
    a.distance_squared(b) < radius * radius
}

/// Whether the actor touches a live entity
pub fn actor_hits(actor: &Actor, entity: &FallingEntity) -> bool {
    !entity.collected && circles_overlap(actor.pos, entity.pos, entity.kind.collision_radius())
}

/// Clamp a requested actor position into the movement rectangle
pub fn clamp_to_bounds(target: Vec2) -> Vec2 {
    target.clamp(
        Vec2::new(ACTOR_MIN_X, ACTOR_MIN_Y),
        Vec2::new(ACTOR_MAX_X, ACTOR_MAX_Y),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::EntityKind;

    #[test]
    fn test_overlap_is_strict() {
        let a = Vec2::new(0.0, 0.0);
        assert!(circles_overlap(a, Vec2::new(24.9, 0.0), 25.0));
        assert!(!circles_overlap(a, Vec2::new(25.0, 0.0), 25.0));
        assert!(circles_overlap(a, Vec2::new(15.0, 15.0), 25.0)); // ~21.2
        assert!(!circles_overlap(a, Vec2::new(20.0, 20.0), 25.0)); // ~28.3
    }

    #[test]
    fn test_collected_entities_never_hit() {
        let actor = Actor::default();
        let mut entity = FallingEntity::new(1, EntityKind::Obstacle, actor.pos.x);
        entity.pos = actor.pos;
        assert!(actor_hits(&actor, &entity));

        entity.collected = true;
        assert!(!actor_hits(&actor, &entity));
    }

    #[test]
    fn test_clamp_to_bounds() {
        assert_eq!(
            clamp_to_bounds(Vec2::new(-100.0, 2000.0)),
            Vec2::new(ACTOR_MIN_X, ACTOR_MAX_Y)
        );
        assert_eq!(
            clamp_to_bounds(Vec2::new(500.0, 0.0)),
            Vec2::new(ACTOR_MAX_X, ACTOR_MIN_Y)
        );
        let inside = Vec2::new(200.0, 300.0);
        assert_eq!(clamp_to_bounds(inside), inside);
    }
}
