//! Merge Lane headless demo
//!
//! Runs the simulation at a fixed 60 Hz with a scripted driver: hold the
//! throttle, merge left once past the midpoint of the merge lane, straighten
//! out on the main road and run for the goal line. Logs the HUD once per
//! simulated second and stops after a bounded number of rounds.

use merge_lane::levels::LevelProvider;
use merge_lane::persistence::{JsonFileStore, ProgressStore};
use merge_lane::progress::ProgressState;
use merge_lane::sim::{GameState, RoundOutcome, TickInput, tick};

const DT: f32 = 1.0 / 60.0;
const MAX_ROUNDS: u32 = 12;
const MAX_SIM_SECONDS: f32 = 600.0;

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let provider = LevelProvider::new();
    let mut store = JsonFileStore::open("merge-lane-progress.json");
    let totals = store.load();

    let level = match provider.get(1) {
        Ok(level) => level,
        Err(err) => {
            log::error!("{err}");
            std::process::exit(1);
        }
    };

    let progress = ProgressState::with_totals(1, totals.total_wins, totals.total_fails);
    let mut state = GameState::new(level, progress, 0xC0FFEE);
    log::info!(
        "Starting on level 1 (lifetime {} wins / {} fails)",
        totals.total_wins,
        totals.total_fails
    );

    let mut rounds = 0u32;
    let mut elapsed = 0.0f32;
    let mut next_report = 1.0f32;

    while rounds < MAX_ROUNDS && elapsed < MAX_SIM_SECONDS {
        let input = scripted_input(&state);
        let outcome = tick(&mut state, &provider, &mut store, &input, DT);
        elapsed += DT;

        if elapsed >= next_report {
            let hud = state.hud();
            log::info!(
                "t={elapsed:.0}s level {} round {}/{} speed {:.0} km/h x={:.0}",
                hud.level,
                hud.round,
                hud.needed,
                hud.speed_kmh,
                state.player.pos.x
            );
            next_report += 1.0;
        }

        if outcome != RoundOutcome::Continuing {
            rounds += 1;
        }
    }

    let hud = state.hud();
    log::info!(
        "Demo finished after {rounds} rounds: level {}, {} lifetime wins, {} lifetime fails",
        hud.level,
        state.progress.total_wins,
        state.progress.total_fails
    );
}

/// Naive scripted driver, good enough to demonstrate merges and the
/// occasional crash into dense traffic on later levels.
fn scripted_input(state: &GameState) -> TickInput {
    let road = &state.road;
    let player = &state.player;
    let merge_midpoint = road.merge_start + road.merge_length * 0.5;
    let target_z = road.main_road_center;

    let mut input = TickInput {
        accelerate: true,
        ..TickInput::default()
    };

    if player.pos.x > merge_midpoint && player.pos.y > target_z + 0.3 {
        // Drift left toward the main-road lane center
        input.steer_left = player.heading < 0.08;
    } else if player.heading > 0.005 {
        // Straighten out
        input.steer_right = true;
    }

    input
}
