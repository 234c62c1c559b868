//! Idle/demo mode controller
//!
//! Picks a hold/release decision each frame: dodge the nearest bird in the
//! kite's lane, otherwise chase the nearest charm, otherwise hover mid-field.

use super::state::GameState;

/// How far ahead of the kite birds and charms are considered (points)
const LOOK_AHEAD: f64 = 280.0;
/// Extra vertical gap kept between kite and bird edges
const CLEARANCE: f64 = 16.0;
/// Vertical slack before correcting toward a target
const DEADBAND: f64 = 4.0;

/// Target height for the kite this frame
pub fn target_y(state: &GameState) -> f64 {
    let kite = &state.kite;
    let (min_y, max_y) = state.kite_bounds();
    let behind = kite.pos.x - kite.size / 2.0;
    let ahead = |x: f64, size: f64| x + size / 2.0 > behind && x - kite.pos.x < LOOK_AHEAD;

    let threat = state
        .obstacles
        .iter()
        .filter(|o| ahead(o.pos.x, o.size))
        .filter(|o| (o.pos.y - kite.pos.y).abs() < (o.size + kite.size) / 2.0 + CLEARANCE)
        .min_by(|a, b| a.pos.x.total_cmp(&b.pos.x));

    if let Some(bird) = threat {
        let gap = (bird.size + kite.size) / 2.0 + CLEARANCE;
        let below = bird.pos.y - gap;
        let above = bird.pos.y + gap;
        // Dodge to the near side unless it is off the playfield
        let prefer_below = kite.pos.y <= bird.pos.y;
        return match (prefer_below, below >= min_y, above <= max_y) {
            (true, true, _) | (false, true, false) => below,
            _ => above.min(max_y),
        };
    }

    let charm = state
        .charms
        .iter()
        .filter(|c| ahead(c.pos.x, c.size))
        .min_by(|a, b| a.pos.x.total_cmp(&b.pos.x));

    match charm {
        Some(charm) => charm.pos.y.clamp(min_y.min(max_y), max_y.max(min_y)),
        None => (min_y + max_y) / 2.0,
    }
}

/// Whether to hold (descend) this frame
pub fn decide(state: &GameState) -> bool {
    state.kite.pos.y > target_y(state) + DEADBAND
}
