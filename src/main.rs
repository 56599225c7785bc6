//! Nebula Sprint demo entry point
//!
//! Plays a few autopilot runs headless against the on-disk profile and logs
//! how progression moved. The browser build is driven through the library.

#[cfg(not(target_arch = "wasm32"))]
mod demo {
    use nebula_sprint::consts::SIM_DT;
    use nebula_sprint::sim::{SimPhase, autopilot};
    use nebula_sprint::{Game, JsonFileStore, Progression};

    /// Sim seconds after which the autopilot lets go of the controls
    const AUTOPILOT_LIMIT: f32 = 300.0;
    /// Hard stop for a run that still refuses to end
    const RUN_LIMIT: f32 = 1800.0;
    /// Challenges at or above this reward get completed, the rest skipped
    const COMPLETE_REWARD_AT_LEAST: u64 = 25;

    fn env_or<T: std::str::FromStr>(name: &str, default: T) -> T {
        match std::env::var(name) {
            Ok(raw) => raw.parse().unwrap_or_else(|_| {
                log::warn!("Ignoring unparsable {name}={raw:?}");
                default
            }),
            Err(_) => default,
        }
    }

    pub fn run() {
        let seed: u64 = env_or("NEBULA_SPRINT_SEED", 42);
        let runs: u32 = env_or("NEBULA_SPRINT_RUNS", 3);

        let store = JsonFileStore::from_env();
        log::info!("Profile directory: {}", store.dir().display());
        let mut progression = Progression::load(store);

        {
            let mut game = Game::with_seed(&mut progression, seed);
            for run in 1..=runs {
                play_one(&mut game, run);
            }
        }

        let record = progression.record();
        log::info!(
            "{}: {} games, best {}, average {:.1}, tier {}, {} currency, played {}",
            record.player_name,
            record.games_played,
            record.best_score,
            record.average_score,
            record.tier.as_str(),
            record.currency,
            progression.playtime_formatted()
        );
        log::info!("{}", progression.performance_insight());
        for (i, entry) in progression.top_entries(5).iter().enumerate() {
            log::info!(
                "#{} {} {} ({})",
                i + 1,
                entry.player_name,
                entry.score,
                entry.performance_rating()
            );
        }
        if progression.is_out_of_sync() {
            log::warn!("Profile could not be saved; progress is only in memory");
        }
    }

    fn play_one(game: &mut Game<'_, JsonFileStore>, run: u32) {
        if let Err(err) = game.start() {
            log::warn!("Run {run} could not start: {err}");
            return;
        }

        loop {
            let run_time = game.engine().run_time();
            if run_time < AUTOPILOT_LIMIT {
                if let Some(target) = autopilot::steer(game.engine().state()) {
                    game.move_actor(target);
                }
            }
            game.advance(SIM_DT);

            if let Some(reward) = game.pending_challenge().map(|c| c.reward) {
                if reward >= COMPLETE_REWARD_AT_LEAST {
                    game.complete_challenge();
                } else {
                    game.skip_challenge();
                }
            }

            // Hosts would render these; the demo only counts them
            let cues = game.drain_feedback();
            if !cues.is_empty() {
                log::trace!("{} feedback cues", cues.len());
            }

            match game.phase() {
                SimPhase::Terminated => break,
                SimPhase::Running if run_time > RUN_LIMIT => {
                    log::warn!("Run {run} abandoned after {RUN_LIMIT}s");
                    game.return_to_menu();
                    return;
                }
                _ => {}
            }
        }

        if let Some(summary) = game.last_summary() {
            log::info!(
                "Run {run}: score {}, tier {} -> {}{}{}",
                summary.final_score,
                summary.tier_before.as_str(),
                summary.tier_after.as_str(),
                if summary.new_best { ", new best" } else { "" },
                summary
                    .rank
                    .map(|r| format!(", rank #{r}"))
                    .unwrap_or_default()
            );
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    log::info!("Nebula Sprint (native demo) starting...");
    demo::run();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is `nebula_sprint::wasm_start`, this is just to satisfy the compiler
}
