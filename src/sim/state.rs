//! Game state and core simulation types
//!
//! Everything a run needs lives in `GameState`; nothing here touches storage.

use glam::DVec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::collision::Aabb;
use crate::tuning::Tuning;

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Active gameplay
    Playing,
    /// Run ended, waiting for restart
    GameOver,
}

/// Something that happened during a tick or contact
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    ObstacleSpawned { id: u32 },
    FormationSpawned { count: usize },
    CharmSpawned { id: u32 },
    /// Charm placement failed every attempt this cycle
    CharmSkipped,
    ObstacleRetired { id: u32 },
    CharmRetired { id: u32 },
    CharmCollected { id: u32 },
    /// Kite hit an obstacle
    GameOver,
}

/// The anchor boat (never moves)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Boat {
    pub pos: DVec2,
    pub size: DVec2,
}

impl Boat {
    pub fn new(tuning: &Tuning) -> Self {
        Self {
            pos: tuning.boat_center(),
            size: tuning.boat_size,
        }
    }

    /// y of the boat's top edge
    #[inline]
    pub fn top(&self) -> f64 {
        self.pos.y + self.size.y / 2.0
    }
}

/// The player's kite
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Kite {
    pub pos: DVec2,
    pub size: f64,
}

impl Kite {
    /// Kite above the boat at its start height
    pub fn new(boat: &Boat, tuning: &Tuning) -> Self {
        Self {
            pos: DVec2::new(boat.pos.x, boat.pos.y + tuning.kite_start_offset),
            size: tuning.kite_size,
        }
    }

    pub fn bounds(&self) -> Aabb {
        Aabb::square(self.pos, self.size)
    }
}

/// A bird hazard
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Obstacle {
    pub id: u32,
    pub pos: DVec2,
    /// Diameter (bounding box is size x size)
    pub size: f64,
}

impl Obstacle {
    pub fn bounds(&self) -> Aabb {
        Aabb::square(self.pos, self.size)
    }
}

/// A bonus pickup
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Charm {
    pub id: u32,
    pub pos: DVec2,
    /// Diameter
    pub size: f64,
}

impl Charm {
    pub fn bounds(&self) -> Aabb {
        Aabb::square(self.pos, self.size)
    }
}

/// Complete game state (deterministic, serializable)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    /// Spawn RNG (continues across restarts)
    pub rng: Pcg32,
    /// Gameplay constants
    pub tuning: Tuning,
    /// Current phase
    pub phase: GamePhase,
    /// Distance-based score
    pub score: f64,
    /// Charms collected this run
    pub charm_count: u32,
    pub boat: Boat,
    pub kite: Kite,
    /// Live obstacles in spawn order
    pub obstacles: Vec<Obstacle>,
    /// Live charms in spawn order
    pub charms: Vec<Charm>,
    /// Timestamp of the previous frame (None before the first frame)
    pub last_update: Option<f64>,
    pub last_obstacle_spawn: f64,
    pub last_charm_spawn: f64,
    /// Hold state used when a tick input does not override it
    pub control_held: bool,
    /// Next entity ID
    next_id: u32,
}

impl GameState {
    /// Create a new game state with the given seed
    pub fn new(seed: u64, tuning: Tuning) -> Self {
        let boat = Boat::new(&tuning);
        let kite = Kite::new(&boat, &tuning);
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            tuning,
            phase: GamePhase::Playing,
            score: 0.0,
            charm_count: 0,
            boat,
            kite,
            obstacles: Vec::new(),
            charms: Vec::new(),
            last_update: None,
            last_obstacle_spawn: 0.0,
            last_charm_spawn: 0.0,
            control_held: false,
            next_id: 1,
        }
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    pub fn is_game_over(&self) -> bool {
        self.phase == GamePhase::GameOver
    }

    /// Lowest and highest y the kite may occupy
    pub fn kite_bounds(&self) -> (f64, f64) {
        let t = &self.tuning;
        let min_y = self.boat.top() + t.kite_size / 2.0 + t.kite_bottom_margin;
        let max_y = t.playfield.y - t.kite_size / 2.0 - t.top_margin;
        (min_y, max_y)
    }

    /// Vertical band single obstacles are drawn from
    pub fn obstacle_band(&self) -> (f64, f64) {
        let t = &self.tuning;
        let min_y = self.boat.top() + t.obstacle_size / 2.0;
        let max_y = t.playfield.y - t.obstacle_size / 2.0 - t.top_margin;
        (min_y, max_y)
    }

    /// Vertical band charms are drawn from
    pub fn charm_band(&self) -> (f64, f64) {
        let t = &self.tuning;
        (
            self.boat.pos.y + t.charm_bottom_offset,
            t.playfield.y - t.charm_top_margin,
        )
    }

    /// Remove a charm by ID, returning whether it was live
    pub fn remove_charm(&mut self, id: u32) -> bool {
        match self.charms.iter().position(|c| c.id == id) {
            Some(idx) => {
                self.charms.remove(idx);
                true
            }
            None => false,
        }
    }

    /// Reset everything except the RNG and tuning for a new run
    pub fn reset(&mut self) {
        self.boat = Boat::new(&self.tuning);
        self.kite = Kite::new(&self.boat, &self.tuning);
        self.phase = GamePhase::Playing;
        self.score = 0.0;
        self.charm_count = 0;
        self.obstacles.clear();
        self.charms.clear();
        self.last_update = None;
        self.last_obstacle_spawn = 0.0;
        self.last_charm_spawn = 0.0;
        self.control_held = false;
    }
}
