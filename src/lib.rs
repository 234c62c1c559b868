//! Kite Drift - A side-scrolling kite-and-boat arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (motion, spawning, contacts)
//! - `session`: Host-facing facade (frame output, game over, restart)
//! - `persistence`: High score and charm totals storage
//! - `tuning`: Data-driven game balance

pub mod persistence;
pub mod session;
pub mod sim;
pub mod tuning;

pub use persistence::{MemoryStore, RecordStore, Records, StoreError};
pub use session::{Frame, GameOverSummary, RenderShape, Session, ShapeKind};
pub use tuning::Tuning;

/// Game configuration constants
pub mod consts {
    /// Frame delta used when there is no previous timestamp
    pub const DEFAULT_DT: f64 = 1.0 / 60.0;

    /// Playfield defaults (landscape phone, points)
    pub const PLAYFIELD_WIDTH: f64 = 844.0;
    pub const PLAYFIELD_HEIGHT: f64 = 390.0;

    /// Boat sits in the bottom-left corner
    pub const BOAT_WIDTH: f64 = 80.0;
    pub const BOAT_HEIGHT: f64 = 30.0;
    pub const BOAT_MARGIN_X: f64 = 48.0;
    pub const BOAT_MARGIN_Y: f64 = 24.0;

    /// Kite
    pub const KITE_SIZE: f64 = 30.0;
    pub const KITE_SPEED: f64 = 300.0;
    /// Rise speed as a fraction of descent speed
    pub const KITE_RISE_FACTOR: f64 = 0.8;
    /// Initial height above the boat
    pub const KITE_START_OFFSET: f64 = 120.0;
    /// Gap between kite and boat at the lowest position
    pub const KITE_BOTTOM_MARGIN: f64 = 8.0;
    /// Gap between kite and the top edge
    pub const TOP_MARGIN: f64 = 24.0;

    /// Obstacles (birds)
    pub const OBSTACLE_SIZE: f64 = 40.0;
    pub const OBSTACLE_INTERVAL: f64 = 1.2;
    pub const FORMATION_CHANCE: f64 = 0.4;
    pub const FORMATION_MIN: usize = 3;
    pub const FORMATION_MAX: usize = 5;
    pub const FORMATION_SPACING: f64 = 50.0;
    /// Formation base y is kept this far inside the obstacle band
    pub const FORMATION_INSET: f64 = 60.0;

    /// Charms
    pub const CHARM_SIZE: f64 = 24.0;
    pub const CHARM_INTERVAL: f64 = 2.5;
    pub const CHARM_MAX_TRIES: u32 = 10;
    /// Charm band starts this far above the boat
    pub const CHARM_BOTTOM_OFFSET: f64 = 100.0;
    /// Charm band ends this far below the top edge
    pub const CHARM_TOP_MARGIN: f64 = 60.0;

    /// Horizontal scroll speed (points/s)
    pub const SCROLL_SPEED: f64 = 200.0;
    /// Score units per point travelled
    pub const SCORE_DIVISOR: f64 = 100.0;

    /// New entities appear this far past the right edge
    pub const SPAWN_OFFSET: f64 = 60.0;
    /// Entities are retired once x drops below this
    pub const RETIRE_X: f64 = -60.0;
}
