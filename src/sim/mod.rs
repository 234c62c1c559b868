//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Seeded RNG only
//! - Stable iteration order (spawn order)
//! - No rendering, storage or platform dependencies

pub mod autopilot;
pub mod collision;
pub mod spawn;
pub mod state;
pub mod tick;

pub use collision::{Aabb, Body, Category, ContactOutcome, classify, detect_contacts};
pub use spawn::{Formation, formation_offsets, spawn_charm, spawn_obstacles};
pub use state::{Boat, Charm, GameEvent, GamePhase, GameState, Kite, Obstacle};
pub use tick::{TickInput, tick};
