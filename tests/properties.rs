//! Invariants that must hold for any input sequence

use std::time::Duration;

use chrono::Utc;
use glam::Vec2;
use proptest::prelude::*;

use nebula_sprint::consts::*;
use nebula_sprint::sim::{Engine, FixedClock, SimPhase};
use nebula_sprint::{DifficultyTier, Leaderboard, LeaderboardEntry, MemoryStore, Progression};

fn tier_strategy() -> impl Strategy<Value = DifficultyTier> {
    prop::sample::select(DifficultyTier::ALL.to_vec())
}

/// (target x, target y, ticks to run afterwards)
fn moves_strategy() -> impl Strategy<Value = Vec<(f32, f32, u16)>> {
    prop::collection::vec((-100.0f32..500.0, -100.0f32..1000.0, 1u16..240), 1..40)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn health_stays_in_range(seed in any::<u64>(), tier in tier_strategy(), moves in moves_strategy()) {
        let mut engine = Engine::with_seed(seed);
        engine.start(tier).unwrap();

        for (x, y, ticks) in moves {
            let _ = engine.move_actor(Vec2::new(x, y));
            let pos = engine.actor().pos;
            prop_assert!((ACTOR_MIN_X..=ACTOR_MAX_X).contains(&pos.x));
            prop_assert!((ACTOR_MIN_Y..=ACTOR_MAX_Y).contains(&pos.y));

            for _ in 0..ticks {
                engine.step();
                prop_assert!(engine.actor().health <= ACTOR_MAX_HEALTH);
            }
            if engine.phase() == SimPhase::Terminated {
                prop_assert_eq!(engine.actor().health, 0);
                break;
            }
        }
    }

    #[test]
    fn frame_deltas_never_exceed_substep_cap(frames in prop::collection::vec(-1.0f32..5.0, 1..60)) {
        let mut clock = FixedClock::new();
        for dt in frames {
            prop_assert!(clock.advance(dt) <= MAX_SUBSTEPS);
            prop_assert!(clock.pending() >= 0.0);
            prop_assert!(clock.pending() <= MAX_FRAME_DT + SIM_DT);
        }
    }

    #[test]
    fn average_is_mean_and_tier_never_drops(scores in prop::collection::vec(0u64..5000, 1..40)) {
        let mut progression = Progression::load(MemoryStore::new());
        let mut previous = progression.tier();

        for &score in &scores {
            let summary = progression.finalize_run(score, Duration::from_secs(30));
            prop_assert!(summary.tier_after >= previous);
            prop_assert_eq!(summary.tier_before, previous);
            previous = summary.tier_after;
        }

        let mean = scores.iter().sum::<u64>() as f64 / scores.len() as f64;
        let record = progression.record();
        prop_assert!((record.average_score - mean).abs() < 1e-6 * mean.max(1.0));
        prop_assert_eq!(record.games_played as usize, scores.len());
        prop_assert_eq!(record.best_score, scores.iter().copied().max().unwrap_or(0));
    }

    #[test]
    fn leaderboard_is_capped_and_sorted(scores in prop::collection::vec(0u64..10_000, 0..250)) {
        let mut board = Leaderboard::new();
        for (i, score) in scores.into_iter().enumerate() {
            board.insert(LeaderboardEntry {
                player_name: format!("p{i}"),
                score,
                games_played: i as u32 + 1,
                average_score: score as f64,
                challenges_completed: 0,
                recorded_at: Utc::now(),
            });
            prop_assert!(board.len() <= MAX_LEADERBOARD_ENTRIES);
            prop_assert!(board.entries().windows(2).all(|w| w[0].score >= w[1].score));
        }
    }
}
