//! Contact geometry and classification
//!
//! Hosts with a physics engine report overlapping pairs and the core only
//! classifies them. Hosts without one can use `detect_contacts`, a plain AABB
//! sweep of the kite against every live obstacle and charm.

use glam::DVec2;
use serde::{Deserialize, Serialize};

use super::state::GameState;

/// Axis-aligned bounding box
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Aabb {
    pub min: DVec2,
    pub max: DVec2,
}

impl Aabb {
    /// Square box of side `size` centered on `center`
    pub fn square(center: DVec2, size: f64) -> Self {
        let half = DVec2::splat(size / 2.0);
        Self {
            min: center - half,
            max: center + half,
        }
    }

    /// Strict overlap (touching edges do not count)
    #[inline]
    pub fn intersects(&self, other: &Aabb) -> bool {
        self.min.x < other.max.x
            && self.max.x > other.min.x
            && self.min.y < other.max.y
            && self.max.y > other.min.y
    }
}

/// Contact category of a body
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    Kite,
    Obstacle,
    Charm,
}

/// A body taking part in a contact
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Body {
    Kite,
    Obstacle(u32),
    Charm(u32),
}

impl Body {
    pub fn category(&self) -> Category {
        match self {
            Body::Kite => Category::Kite,
            Body::Obstacle(_) => Category::Obstacle,
            Body::Charm(_) => Category::Charm,
        }
    }
}

/// What a contact between two categories means for the run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContactOutcome {
    /// Kite hit a bird
    GameOver,
    /// Kite picked up a charm
    CollectCharm,
    Ignored,
}

/// Classify a reported pair (order-independent)
pub fn classify(a: Category, b: Category) -> ContactOutcome {
    match (a, b) {
        (Category::Kite, Category::Obstacle) | (Category::Obstacle, Category::Kite) => {
            ContactOutcome::GameOver
        }
        (Category::Kite, Category::Charm) | (Category::Charm, Category::Kite) => {
            ContactOutcome::CollectCharm
        }
        _ => ContactOutcome::Ignored,
    }
}

/// Charm ID from a kite-charm pair, whichever side it is on
pub fn charm_in_pair(a: Body, b: Body) -> Option<u32> {
    match (a, b) {
        (Body::Charm(id), _) | (_, Body::Charm(id)) => Some(id),
        _ => None,
    }
}

/// Check whether a box overlaps any live obstacle
pub fn overlaps_any_obstacle(state: &GameState, bounds: &Aabb) -> bool {
    state.obstacles.iter().any(|o| o.bounds().intersects(bounds))
}

/// Every kite contact in the current state, obstacles first
pub fn detect_contacts(state: &GameState) -> Vec<(Body, Body)> {
    let kite = state.kite.bounds();
    let hits_obstacle = state
        .obstacles
        .iter()
        .filter(|o| o.bounds().intersects(&kite))
        .map(|o| (Body::Kite, Body::Obstacle(o.id)));
    let hits_charm = state
        .charms
        .iter()
        .filter(|c| c.bounds().intersects(&kite))
        .map(|c| (Body::Kite, Body::Charm(c.id)));
    hits_obstacle.chain(hits_charm).collect()
}
