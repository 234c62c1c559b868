//! Obstacle and charm spawners
//!
//! Obstacles arrive singly or as a formation; charms are placed by rejection
//! sampling so they never start inside a bird.

use glam::DVec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::collision::{Aabb, overlaps_any_obstacle};
use super::state::{Charm, GameEvent, GameState, Obstacle};

/// Formation layout
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Formation {
    /// Chevron: members step away from the middle, sign flips past it
    V,
    /// Straight run: members step evenly from below to above the base
    Line,
}

/// Per-member y offsets from the formation's base y
pub fn formation_offsets(formation: Formation, count: usize, spacing: f64) -> Vec<f64> {
    let mid = (count / 2) as f64;
    (0..count)
        .map(|i| {
            let i = i as f64;
            match formation {
                Formation::V => {
                    let offset = (i - mid).abs() * spacing;
                    if i > mid { -offset } else { offset }
                }
                Formation::Line => (i - mid) * spacing,
            }
        })
        .collect()
}

/// Uniform sample in [min, max]; a degenerate band collapses to its midpoint
fn sample_band<R: Rng>(rng: &mut R, min: f64, max: f64) -> f64 {
    if min < max {
        rng.random_range(min..=max)
    } else {
        (min + max) / 2.0
    }
}

fn push_obstacle(state: &mut GameState, y: f64) -> u32 {
    let id = state.next_entity_id();
    state.obstacles.push(Obstacle {
        id,
        pos: DVec2::new(state.tuning.spawn_x(), y),
        size: state.tuning.obstacle_size,
    });
    id
}

/// Spawn a formation of `count` birds around `base_y`
pub fn spawn_formation(state: &mut GameState, formation: Formation, count: usize, base_y: f64) {
    let offsets = formation_offsets(formation, count, state.tuning.formation_spacing);
    for offset in offsets {
        push_obstacle(state, base_y + offset);
    }
    log::debug!("Spawned {:?} formation of {} at y={:.0}", formation, count, base_y);
}

/// Run the obstacle spawner once
pub fn spawn_obstacles(state: &mut GameState) -> GameEvent {
    let (min_y, max_y) = state.obstacle_band();
    let chance = state.tuning.formation_chance.clamp(0.0, 1.0);

    if state.rng.random_bool(chance) {
        let lo = state.tuning.formation_min.min(state.tuning.formation_max);
        let hi = state.tuning.formation_min.max(state.tuning.formation_max);
        let count = state.rng.random_range(lo..=hi);
        let formation = if state.rng.random_bool(0.5) {
            Formation::V
        } else {
            Formation::Line
        };
        let inset = state.tuning.formation_inset;
        let base_y = sample_band(&mut state.rng, min_y + inset, max_y - inset);
        spawn_formation(state, formation, count, base_y);
        GameEvent::FormationSpawned { count }
    } else {
        let y = sample_band(&mut state.rng, min_y, max_y);
        let id = push_obstacle(state, y);
        log::debug!("Spawned obstacle {} at y={:.0}", id, y);
        GameEvent::ObstacleSpawned { id }
    }
}

/// Run the charm spawner once
///
/// Draws up to `charm_max_tries` positions and keeps the first whose box is
/// clear of every live obstacle. If none is clear the cycle is skipped.
pub fn spawn_charm(state: &mut GameState) -> GameEvent {
    let (min_y, max_y) = state.charm_band();
    let x = state.tuning.spawn_x();
    let size = state.tuning.charm_size;

    for _ in 0..state.tuning.charm_max_tries {
        let y = sample_band(&mut state.rng, min_y, max_y);
        let pos = DVec2::new(x, y);
        if overlaps_any_obstacle(state, &Aabb::square(pos, size)) {
            continue;
        }
        let id = state.next_entity_id();
        state.charms.push(Charm { id, pos, size });
        log::debug!("Spawned charm {} at y={:.0}", id, y);
        return GameEvent::CharmSpawned { id };
    }

    log::debug!("No clear spot for a charm, skipping this cycle");
    GameEvent::CharmSkipped
}
