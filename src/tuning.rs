//! Data-driven game balance
//!
//! Every gameplay constant lives here so a run can be re-tuned from JSON
//! without touching the simulation. Missing fields fall back to `consts`.

use std::path::Path;

use glam::DVec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Gameplay tuning values
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    /// Playfield size (width, height)
    pub playfield: DVec2,

    // === Boat ===
    pub boat_size: DVec2,
    /// Distance of the boat's bottom-left corner from the playfield corner
    pub boat_margin: DVec2,

    // === Kite ===
    pub kite_size: f64,
    /// Descent speed while held
    pub kite_speed: f64,
    /// Rise speed multiplier while released
    pub kite_rise_factor: f64,
    pub kite_start_offset: f64,
    pub kite_bottom_margin: f64,
    pub top_margin: f64,

    // === Obstacles ===
    pub obstacle_size: f64,
    /// Seconds between obstacle spawns
    pub obstacle_interval: f64,
    /// Probability a spawn is a formation instead of a single bird
    pub formation_chance: f64,
    pub formation_min: usize,
    pub formation_max: usize,
    pub formation_spacing: f64,
    pub formation_inset: f64,

    // === Charms ===
    pub charm_size: f64,
    /// Seconds between charm spawns
    pub charm_interval: f64,
    /// Placement attempts before a charm spawn is skipped
    pub charm_max_tries: u32,
    pub charm_bottom_offset: f64,
    pub charm_top_margin: f64,

    // === Scrolling ===
    pub scroll_speed: f64,
    pub score_divisor: f64,
    pub spawn_offset: f64,
    pub retire_x: f64,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            playfield: DVec2::new(PLAYFIELD_WIDTH, PLAYFIELD_HEIGHT),

            boat_size: DVec2::new(BOAT_WIDTH, BOAT_HEIGHT),
            boat_margin: DVec2::new(BOAT_MARGIN_X, BOAT_MARGIN_Y),

            kite_size: KITE_SIZE,
            kite_speed: KITE_SPEED,
            kite_rise_factor: KITE_RISE_FACTOR,
            kite_start_offset: KITE_START_OFFSET,
            kite_bottom_margin: KITE_BOTTOM_MARGIN,
            top_margin: TOP_MARGIN,

            obstacle_size: OBSTACLE_SIZE,
            obstacle_interval: OBSTACLE_INTERVAL,
            formation_chance: FORMATION_CHANCE,
            formation_min: FORMATION_MIN,
            formation_max: FORMATION_MAX,
            formation_spacing: FORMATION_SPACING,
            formation_inset: FORMATION_INSET,

            charm_size: CHARM_SIZE,
            charm_interval: CHARM_INTERVAL,
            charm_max_tries: CHARM_MAX_TRIES,
            charm_bottom_offset: CHARM_BOTTOM_OFFSET,
            charm_top_margin: CHARM_TOP_MARGIN,

            scroll_speed: SCROLL_SPEED,
            score_divisor: SCORE_DIVISOR,
            spawn_offset: SPAWN_OFFSET,
            retire_x: RETIRE_X,
        }
    }
}

impl Tuning {
    /// Default tuning on a playfield of the given size
    pub fn with_playfield(width: f64, height: f64) -> Self {
        Self {
            playfield: DVec2::new(width, height),
            ..Self::default()
        }
    }

    /// Parse tuning from JSON (missing fields use defaults)
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Load tuning from a JSON file, falling back to defaults
    pub fn load_or_default(path: &Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(json) => match Self::from_json(&json) {
                Ok(tuning) => {
                    log::info!("Loaded tuning from {}", path.display());
                    tuning
                }
                Err(e) => {
                    log::warn!("Invalid tuning in {}: {} - using defaults", path.display(), e);
                    Self::default()
                }
            },
            Err(e) => {
                log::warn!("Could not read {}: {} - using defaults", path.display(), e);
                Self::default()
            }
        }
    }

    /// Center of the boat at its default position
    pub fn boat_center(&self) -> DVec2 {
        self.boat_margin + self.boat_size / 2.0
    }

    /// Spawn x for new obstacles and charms
    pub fn spawn_x(&self) -> f64 {
        self.playfield.x + self.spawn_offset
    }

    /// Descent speed while held, rise speed while released (signed)
    pub fn kite_velocity(&self, held: bool) -> f64 {
        if held {
            -self.kite_speed
        } else {
            self.kite_speed * self.kite_rise_factor
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_boat_position() {
        let tuning = Tuning::default();
        let boat = tuning.boat_center();
        assert_eq!(boat, DVec2::new(88.0, 39.0));
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let tuning = Tuning::from_json(r#"{ "scroll_speed": 250.0, "playfield": [1000.0, 500.0] }"#)
            .expect("valid json");
        assert_eq!(tuning.scroll_speed, 250.0);
        assert_eq!(tuning.playfield, DVec2::new(1000.0, 500.0));
        assert_eq!(tuning.kite_speed, KITE_SPEED);
        assert_eq!(tuning.charm_max_tries, CHARM_MAX_TRIES);
    }

    #[test]
    fn test_invalid_json_is_error() {
        assert!(Tuning::from_json("{ scroll_speed: }").is_err());
    }

    #[test]
    fn test_missing_file_uses_defaults() {
        let tuning = Tuning::load_or_default(Path::new("/nonexistent/kite_tuning_12345.json"));
        assert_eq!(tuning, Tuning::default());
    }

    #[test]
    fn test_kite_velocity_rises_slower() {
        let tuning = Tuning::default();
        assert_eq!(tuning.kite_velocity(true), -300.0);
        assert_eq!(tuning.kite_velocity(false), 240.0);
    }
}
