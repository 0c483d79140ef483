//! Per-frame simulation tick
//!
//! One tick = one synchronous compute step over the current state snapshot,
//! driven by an external animation loop that supplies the elapsed time.
//! Ordering inside a tick is fixed: traffic first, then the player, then the
//! outcome evaluation, then the progression transition. Evaluating against
//! stale positions would let vehicles pass through each other between frames.

use super::collision::{self, RoundOutcome};
use super::dynamics;
use super::state::GameState;
use crate::consts::MAX_TICK_DT;
use crate::levels::LevelProvider;
use crate::persistence::ProgressStore;

/// Driver intents sampled once per tick. Absent left/right is center
/// steering; absent accelerate/brake is coasting (drag still acts).
#[derive(Debug, Clone, Copy, Default)]
pub struct TickInput {
    pub accelerate: bool,
    pub brake: bool,
    pub steer_left: bool,
    pub steer_right: bool,
}

impl TickInput {
    /// Steering input in [-1, 1]; left is positive, opposite keys cancel
    fn steer(&self) -> f32 {
        match (self.steer_left, self.steer_right) {
            (true, false) => 1.0,
            (false, true) => -1.0,
            _ => 0.0,
        }
    }
}

/// Advance the whole simulation by one frame and fold the round outcome
/// into the progression counters.
pub fn tick(
    state: &mut GameState,
    provider: &LevelProvider,
    store: &mut dyn ProgressStore,
    input: &TickInput,
    dt: f32,
) -> RoundOutcome {
    let dt = dt.clamp(0.0, MAX_TICK_DT);

    let limit_x = state.road.wrap_limit_x();
    let wrap = state.road.wrap_reset_distance();
    for agent in &mut state.traffic {
        agent.advance(dt, limit_x, wrap);
    }

    // Brake wins when both pedals are held
    let brake = if input.brake { 1.0 } else { 0.0 };
    let throttle = if input.accelerate && !input.brake {
        1.0
    } else {
        0.0
    };
    dynamics::advance(
        &mut state.player,
        &state.level.tuning,
        throttle,
        brake,
        input.steer(),
        dt,
    );

    let outcome = collision::evaluate(&state.player.aabb(), &state.traffic, &state.road);
    apply_outcome(state, provider, store, outcome);
    outcome
}

/// Fold a round outcome into the progression counters and reset/advance
/// as required. Deterministic; the store is the only fallible collaborator
/// and its failures are its own problem.
pub fn apply_outcome(
    state: &mut GameState,
    provider: &LevelProvider,
    store: &mut dyn ProgressStore,
    outcome: RoundOutcome,
) {
    match outcome {
        RoundOutcome::Continuing => {}

        RoundOutcome::BoundaryViolation | RoundOutcome::TrafficCollision => {
            log::info!(
                "Round failed ({outcome:?}) on level {}, resetting",
                state.level.number
            );
            store.record_failure();
            state.progress.total_fails += 1;
            state.progress.round = 0;
            state.reset_player();
        }

        RoundOutcome::GoalReached => {
            store.record_win();
            state.progress.total_wins += 1;
            state.progress.round += 1;
            log::info!(
                "Round won on level {} ({}/{})",
                state.level.number,
                state.progress.round,
                state.level.suc_to_pass
            );

            if state.progress.round >= state.level.suc_to_pass {
                if state.level.number < provider.max_level() {
                    let next = state.level.number + 1;
                    state.progress.level = next;
                    state.progress.round = 0;
                    // Level table is static; the number is in range by construction
                    if let Ok(level) = provider.get(next) {
                        log::info!("Level cleared, advancing to level {next}");
                        state.load_level(level);
                    }
                } else {
                    state.progress.round = 0;
                }
            }
            state.reset_player();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persistence::{LifetimeTotals, MemoryStore};
    use crate::progress::ProgressState;

    const DT: f32 = 1.0 / 60.0;

    fn game_on_level(n: u32) -> (GameState, LevelProvider, MemoryStore) {
        let provider = LevelProvider::new();
        let level = provider.get(n).unwrap();
        let state = GameState::new(level, ProgressState::starting_at(n), 123);
        (state, provider, MemoryStore::default())
    }

    #[test]
    fn test_continuing_changes_nothing() {
        let (mut state, provider, mut store) = game_on_level(1);
        let before = state.progress;
        apply_outcome(&mut state, &provider, &mut store, RoundOutcome::Continuing);
        assert_eq!(state.progress, before);
        assert_eq!(store.load(), LifetimeTotals::default());
    }

    #[test]
    fn test_failure_resets_round_and_player() {
        let (mut state, provider, mut store) = game_on_level(1);
        state.progress.round = 2;
        state.player.pos.x += 100.0;
        state.player.speed = 30.0;

        apply_outcome(
            &mut state,
            &provider,
            &mut store,
            RoundOutcome::TrafficCollision,
        );

        assert_eq!(state.progress.round, 0);
        assert_eq!(state.progress.total_fails, 1);
        assert_eq!(state.level.number, 1);
        assert_eq!(state.player.pos.x, state.road.merge_start);
        assert_eq!(state.player.speed, state.level.starting_speed);
        assert_eq!(store.load().total_fails, 1);
    }

    #[test]
    fn test_boundary_and_collision_are_equivalent_failures() {
        let (mut state, provider, mut store) = game_on_level(1);
        apply_outcome(
            &mut state,
            &provider,
            &mut store,
            RoundOutcome::BoundaryViolation,
        );
        assert_eq!(state.progress.total_fails, 1);
        assert_eq!(store.load().total_fails, 1);
    }

    #[test]
    fn test_three_wins_advance_exactly_one_level() {
        let (mut state, provider, mut store) = game_on_level(1);
        assert_eq!(state.level.suc_to_pass, 3);

        for expected_round in [1, 2] {
            apply_outcome(&mut state, &provider, &mut store, RoundOutcome::GoalReached);
            assert_eq!(state.progress.round, expected_round);
            assert_eq!(state.level.number, 1);
        }

        apply_outcome(&mut state, &provider, &mut store, RoundOutcome::GoalReached);
        assert_eq!(state.level.number, 2);
        assert_eq!(state.progress.level, 2);
        assert_eq!(state.progress.round, 0);
        assert_eq!(state.progress.total_wins, 3);
        assert_eq!(store.load().total_wins, 3);
    }

    #[test]
    fn test_failure_restarts_success_count_from_one() {
        let (mut state, provider, mut store) = game_on_level(1);
        apply_outcome(&mut state, &provider, &mut store, RoundOutcome::GoalReached);
        apply_outcome(&mut state, &provider, &mut store, RoundOutcome::GoalReached);
        assert_eq!(state.progress.round, 2);

        apply_outcome(
            &mut state,
            &provider,
            &mut store,
            RoundOutcome::TrafficCollision,
        );
        assert_eq!(state.progress.round, 0);

        apply_outcome(&mut state, &provider, &mut store, RoundOutcome::GoalReached);
        assert_eq!(state.progress.round, 1);
        assert_eq!(state.level.number, 1);
    }

    #[test]
    fn test_final_level_loops_forever() {
        let (mut state, provider, mut store) = game_on_level(10);
        for _ in 0..50 {
            apply_outcome(&mut state, &provider, &mut store, RoundOutcome::GoalReached);
            assert_eq!(state.level.number, 10);
        }
        // Threshold 999 was never reached, round keeps counting
        assert_eq!(state.progress.round, 50);
    }

    #[test]
    fn test_win_resets_player_pose() {
        let (mut state, provider, mut store) = game_on_level(1);
        state.player.pos.x = state.road.goal_line_x + 1.0;
        state.player.heading = 0.2;
        apply_outcome(&mut state, &provider, &mut store, RoundOutcome::GoalReached);
        assert_eq!(state.player.pos.x, state.road.merge_start);
        assert_eq!(state.player.heading, 0.0);
    }

    #[test]
    fn test_tick_ordering_traffic_then_player_then_evaluate() {
        let (mut state, provider, mut store) = game_on_level(1);
        let traffic_before: Vec<f32> = state.traffic.iter().map(|a| a.pos.x).collect();
        let player_before = state.player.pos.x;

        let outcome = tick(
            &mut state,
            &provider,
            &mut store,
            &TickInput {
                accelerate: true,
                ..TickInput::default()
            },
            DT,
        );

        assert_eq!(outcome, RoundOutcome::Continuing);
        assert!(state.player.pos.x > player_before);
        for (agent, before) in state.traffic.iter().zip(traffic_before) {
            assert!(agent.pos.x != before);
        }
    }

    #[test]
    fn test_tick_clamps_frame_hitches() {
        let (mut state, provider, mut store) = game_on_level(1);
        let mut reference = state.clone();

        // A five-second hitch advances no further than the clamp allows
        tick(&mut state, &provider, &mut store, &TickInput::default(), 5.0);
        tick(
            &mut reference,
            &provider,
            &mut store,
            &TickInput::default(),
            crate::consts::MAX_TICK_DT,
        );
        assert_eq!(state.player.pos, reference.player.pos);
    }

    #[test]
    fn test_brake_wins_over_throttle() {
        let (mut state, provider, mut store) = game_on_level(1);
        let speed_before = state.player.speed;
        tick(
            &mut state,
            &provider,
            &mut store,
            &TickInput {
                accelerate: true,
                brake: true,
                ..TickInput::default()
            },
            DT,
        );
        assert!(state.player.speed < speed_before);
    }

    #[test]
    fn test_store_failures_do_not_block_progression() {
        struct PanicFreeFailingStore;
        impl ProgressStore for PanicFreeFailingStore {
            fn load(&self) -> LifetimeTotals {
                LifetimeTotals::default()
            }
            // A real store logs and swallows its IO error; from the
            // simulation's point of view the call simply has no effect
            fn record_win(&mut self) {}
            fn record_failure(&mut self) {}
        }

        let (mut state, provider, _) = game_on_level(1);
        let mut store = PanicFreeFailingStore;
        apply_outcome(&mut state, &provider, &mut store, RoundOutcome::GoalReached);
        assert_eq!(state.progress.total_wins, 1);
        assert_eq!(state.progress.round, 1);
    }
}
