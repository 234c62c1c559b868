//! Per-frame simulation step
//!
//! Advances the run by one rendered frame: scroll, steer, spawn, score.

use super::spawn::{spawn_charm, spawn_obstacles};
use super::state::{GameEvent, GamePhase, GameState};
use crate::consts::DEFAULT_DT;

/// Input for a single frame
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Monotonic timestamp of this frame (seconds)
    pub now: f64,
    /// Hold state; `None` keeps the last value set on the state
    pub control_held: Option<bool>,
    /// Explicit frame delta; derived from `now` when absent
    pub elapsed: Option<f64>,
}

impl TickInput {
    pub fn at(now: f64) -> Self {
        Self {
            now,
            ..Default::default()
        }
    }

    pub fn held(mut self, held: bool) -> Self {
        self.control_held = Some(held);
        self
    }
}

/// Frame delta for this input, updating the last-frame timestamp
fn frame_dt(state: &mut GameState, input: &TickInput) -> f64 {
    let dt = match (input.elapsed, state.last_update) {
        (Some(elapsed), _) => elapsed,
        (None, Some(prev)) => input.now - prev,
        (None, None) => DEFAULT_DT,
    };
    state.last_update = Some(input.now);
    dt.max(0.0)
}

/// Move birds and charms left, retiring anything past the left edge
fn scroll(state: &mut GameState, dt: f64, events: &mut Vec<GameEvent>) {
    let dx = state.tuning.scroll_speed * dt;
    let retire_x = state.tuning.retire_x;

    for obstacle in &mut state.obstacles {
        obstacle.pos.x -= dx;
    }
    for charm in &mut state.charms {
        charm.pos.x -= dx;
    }

    state.obstacles.retain(|o| {
        let keep = o.pos.x >= retire_x;
        if !keep {
            events.push(GameEvent::ObstacleRetired { id: o.id });
        }
        keep
    });
    state.charms.retain(|c| {
        let keep = c.pos.x >= retire_x;
        if !keep {
            events.push(GameEvent::CharmRetired { id: c.id });
        }
        keep
    });
}

/// Integrate kite height from the hold state and clamp it to the playfield
fn steer_kite(state: &mut GameState, dt: f64) {
    let velocity = state.tuning.kite_velocity(state.control_held);
    let (min_y, max_y) = state.kite_bounds();
    let y = state.kite.pos.y + velocity * dt;
    // max/min rather than clamp: a tiny playfield can invert the bounds
    state.kite.pos.y = y.min(max_y).max(min_y);
    state.kite.pos.x = state.boat.pos.x;
}

/// Advance the game state by one frame
///
/// Returns what happened this frame. Does nothing once the run is over.
pub fn tick(state: &mut GameState, input: &TickInput) -> Vec<GameEvent> {
    let mut events = Vec::new();
    if state.phase == GamePhase::GameOver {
        return events;
    }

    if let Some(held) = input.control_held {
        state.control_held = held;
    }
    let dt = frame_dt(state, input);

    scroll(state, dt, &mut events);
    steer_kite(state, dt);

    if input.now - state.last_obstacle_spawn > state.tuning.obstacle_interval {
        events.push(spawn_obstacles(state));
        state.last_obstacle_spawn = input.now;
    }
    if input.now - state.last_charm_spawn > state.tuning.charm_interval {
        events.push(spawn_charm(state));
        state.last_charm_spawn = input.now;
    }

    state.score += state.tuning.scroll_speed * dt / state.tuning.score_divisor;

    events
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::{Charm, Obstacle};
    use crate::tuning::Tuning;
    use glam::DVec2;
    use proptest::prelude::*;

    fn state() -> GameState {
        GameState::new(12345, Tuning::default())
    }

    #[test]
    fn test_first_frame_uses_default_dt() {
        let mut state = state();
        tick(&mut state, &TickInput::at(0.5));
        // 200 * (1/60) / 100
        assert!((state.score - 2.0 / 60.0).abs() < 1e-12);
        assert_eq!(state.last_update, Some(0.5));
    }

    #[test]
    fn test_dt_from_timestamps() {
        let mut state = state();
        tick(&mut state, &TickInput::at(0.1));
        let before = state.score;
        tick(&mut state, &TickInput::at(0.6));
        assert!((state.score - before - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_backwards_clock_is_zero_dt() {
        let mut state = state();
        tick(&mut state, &TickInput::at(0.5));
        let score = state.score;
        let kite = state.kite.pos;
        tick(&mut state, &TickInput::at(0.4));
        assert_eq!(state.score, score);
        assert_eq!(state.kite.pos, kite);
    }

    #[test]
    fn test_entities_scroll_by_speed_times_dt() {
        let mut state = state();
        state.obstacles.push(Obstacle {
            id: 100,
            pos: DVec2::new(500.0, 200.0),
            size: 40.0,
        });
        state.charms.push(Charm {
            id: 101,
            pos: DVec2::new(400.0, 200.0),
            size: 24.0,
        });
        let input = TickInput {
            now: 0.25,
            elapsed: Some(0.25),
            ..Default::default()
        };
        tick(&mut state, &input);
        assert_eq!(state.obstacles[0].pos.x, 450.0);
        assert_eq!(state.charms[0].pos.x, 350.0);
    }

    #[test]
    fn test_entities_retire_once_past_left_edge() {
        let mut state = state();
        state.obstacles.push(Obstacle {
            id: 100,
            pos: DVec2::new(-55.0, 200.0),
            size: 40.0,
        });
        state.charms.push(Charm {
            id: 101,
            pos: DVec2::new(-50.0, 200.0),
            size: 24.0,
        });
        let input = TickInput {
            now: 0.05,
            elapsed: Some(0.05),
            ..Default::default()
        };
        let events = tick(&mut state, &input);
        // obstacle moved to -65, charm to -60 (not yet below threshold)
        assert!(state.obstacles.is_empty());
        assert_eq!(state.charms.len(), 1);
        assert_eq!(
            events.iter().filter(|e| matches!(e, GameEvent::ObstacleRetired { id: 100 })).count(),
            1
        );

        let events = tick(&mut state, &TickInput { now: 0.1, ..input });
        assert!(state.charms.is_empty());
        assert!(events.contains(&GameEvent::CharmRetired { id: 101 }));
    }

    #[test]
    fn test_kite_descends_when_held_and_rises_slower() {
        let mut state = state();
        let start = state.kite.pos.y;
        let step = |now| TickInput {
            now,
            elapsed: Some(0.1),
            ..Default::default()
        };

        tick(&mut state, &step(0.1).held(true));
        assert!((state.kite.pos.y - (start - 30.0)).abs() < 1e-9);

        tick(&mut state, &step(0.2).held(false));
        assert!((state.kite.pos.y - (start - 30.0 + 24.0)).abs() < 1e-9);
    }

    #[test]
    fn test_hold_state_persists_between_inputs() {
        let mut state = state();
        tick(&mut state, &TickInput::at(0.0).held(true));
        assert!(state.control_held);
        tick(&mut state, &TickInput::at(0.1));
        assert!(state.control_held);
    }

    #[test]
    fn test_kite_clamped_and_pinned() {
        let mut state = state();
        let (min_y, max_y) = state.kite_bounds();

        tick(&mut state, &TickInput { now: 10.0, elapsed: Some(10.0), control_held: Some(true) });
        assert_eq!(state.kite.pos.y, min_y);

        tick(&mut state, &TickInput { now: 20.0, elapsed: Some(10.0), control_held: Some(false) });
        assert_eq!(state.kite.pos.y, max_y);
        assert_eq!(state.kite.pos.x, state.boat.pos.x);
    }

    #[test]
    fn test_spawn_intervals() {
        let mut state = state();
        // First frame at t=1.0: no obstacle yet (1.0 < 1.2)
        tick(&mut state, &TickInput::at(1.0));
        assert!(state.obstacles.is_empty());

        tick(&mut state, &TickInput::at(1.3));
        assert!(!state.obstacles.is_empty());
        assert_eq!(state.last_obstacle_spawn, 1.3);
        assert!(state.charms.is_empty());

        tick(&mut state, &TickInput::at(2.6));
        assert_eq!(state.last_charm_spawn, 2.6);
        assert_eq!(state.last_obstacle_spawn, 2.6);
    }

    #[test]
    fn test_game_over_freezes() {
        let mut state = state();
        tick(&mut state, &TickInput::at(0.1));
        state.phase = GamePhase::GameOver;
        let score = state.score;
        let events = tick(&mut state, &TickInput::at(5.0));
        assert!(events.is_empty());
        assert_eq!(state.score, score);
        assert_eq!(state.last_update, Some(0.1));
    }

    #[test]
    fn test_determinism() {
        let mut state1 = state();
        let mut state2 = state();
        for i in 1..=600 {
            let input = TickInput::at(i as f64 / 60.0).held(i % 90 < 40);
            tick(&mut state1, &input);
            tick(&mut state2, &input);
        }
        assert_eq!(state1.obstacles.len(), state2.obstacles.len());
        assert_eq!(state1.charms.len(), state2.charms.len());
        for (a, b) in state1.obstacles.iter().zip(&state2.obstacles) {
            assert_eq!(a.pos, b.pos);
        }
        assert_eq!(state1.kite.pos, state2.kite.pos);
    }

    proptest! {
        #[test]
        fn prop_kite_stays_in_bounds(
            frames in proptest::collection::vec((0.0f64..0.5, any::<bool>()), 1..200)
        ) {
            let mut state = state();
            let (min_y, max_y) = state.kite_bounds();
            let mut now = 0.0;
            for (dt, held) in frames {
                now += dt;
                tick(&mut state, &TickInput { now, elapsed: Some(dt), control_held: Some(held) });
                prop_assert!(state.kite.pos.y >= min_y && state.kite.pos.y <= max_y);
            }
        }

        #[test]
        fn prop_score_is_frame_rate_independent(total in 0.1f64..30.0, steps in 1usize..500) {
            let mut fine = state();
            let dt = total / steps as f64;
            let mut prev = 0.0;
            for i in 1..=steps {
                tick(&mut fine, &TickInput { now: i as f64 * dt, elapsed: Some(dt), control_held: None });
                prop_assert!(fine.score >= prev);
                prev = fine.score;
            }

            let mut coarse = state();
            tick(&mut coarse, &TickInput { now: total, elapsed: Some(total), control_held: None });

            prop_assert!((fine.score - coarse.score).abs() < 1e-6);
        }
    }
}
