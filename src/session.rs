//! Host-facing game session
//!
//! Wraps `GameState` with the pieces a host needs: a per-frame update that
//! returns a render list, contact handling, game-over bookkeeping against a
//! `RecordStore`, and restart.

use glam::DVec2;
use serde::Serialize;

use crate::persistence::{RecordStore, Records};
use crate::sim::collision::{Body, ContactOutcome, charm_in_pair, classify, detect_contacts};
use crate::sim::{GameEvent, GamePhase, GameState, TickInput, tick};
use crate::tuning::Tuning;

/// Kind of a renderable shape
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ShapeKind {
    /// Rounded rect
    Boat,
    /// Square
    Kite,
    /// Circle
    Obstacle,
    /// Circle
    Charm,
}

/// One positioned shape for the renderer
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RenderShape {
    pub kind: ShapeKind,
    /// Center
    pub pos: DVec2,
    /// Full width and height (diameter for circles)
    pub size: DVec2,
}

impl RenderShape {
    /// Radius for circle kinds
    pub fn radius(&self) -> f64 {
        self.size.x / 2.0
    }
}

/// Results shown on the game-over screen
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GameOverSummary {
    pub final_score: f64,
    pub high_score: f64,
    pub total_charms: u32,
    /// This run set a new high score
    pub new_high_score: bool,
}

/// Everything the host needs to draw a frame
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Frame {
    /// Boat, kite, obstacles, charms (in that order)
    pub shapes: Vec<RenderShape>,
    pub score: f64,
    pub charm_count: u32,
    pub is_game_over: bool,
    /// Present once the run has ended
    pub summary: Option<GameOverSummary>,
}

/// A single-player session over a record store
pub struct Session<S: RecordStore> {
    state: GameState,
    store: S,
    summary: Option<GameOverSummary>,
    /// Events not yet drained by the host
    events: Vec<GameEvent>,
}

impl<S: RecordStore> Session<S> {
    pub fn new(seed: u64, tuning: Tuning, store: S) -> Self {
        log::info!("Session started with seed: {}", seed);
        Self {
            state: GameState::new(seed, tuning),
            store,
            summary: None,
            events: Vec::new(),
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn is_game_over(&self) -> bool {
        self.state.is_game_over()
    }

    /// Hold (descend) or release (rise)
    pub fn set_control_held(&mut self, held: bool) {
        self.state.control_held = held && !self.state.is_game_over();
    }

    /// Advance one frame and return what to draw
    pub fn update(&mut self, input: &TickInput) -> Frame {
        let events = tick(&mut self.state, input);
        self.events.extend(events);
        self.frame()
    }

    /// Take every event since the last drain (spawns, retirements, pickups, game over)
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Handle a reported overlap between two bodies
    pub fn contact(&mut self, a: Body, b: Body) -> ContactOutcome {
        if self.state.phase == GamePhase::GameOver {
            return ContactOutcome::Ignored;
        }

        match classify(a.category(), b.category()) {
            ContactOutcome::GameOver => {
                self.game_over();
                ContactOutcome::GameOver
            }
            ContactOutcome::CollectCharm => {
                match charm_in_pair(a, b).filter(|&id| self.state.remove_charm(id)) {
                    Some(id) => {
                        self.state.charm_count += 1;
                        self.events.push(GameEvent::CharmCollected { id });
                        ContactOutcome::CollectCharm
                    }
                    None => ContactOutcome::Ignored,
                }
            }
            ContactOutcome::Ignored => ContactOutcome::Ignored,
        }
    }

    /// Run the built-in AABB sweep and apply every contact it finds
    pub fn resolve_contacts(&mut self) -> Vec<ContactOutcome> {
        detect_contacts(&self.state)
            .into_iter()
            .map(|(a, b)| self.contact(a, b))
            .filter(|outcome| *outcome != ContactOutcome::Ignored)
            .collect()
    }

    /// Start a new run after a game over; records are left alone
    ///
    /// Returns false (and changes nothing) while a run is still in progress.
    pub fn restart(&mut self) -> bool {
        if !self.state.is_game_over() {
            return false;
        }
        self.state.reset();
        self.summary = None;
        log::info!("Game restarted (seed {})", self.state.seed);
        true
    }

    /// Change the playfield size
    pub fn resize(&mut self, width: f64, height: f64) {
        self.state.tuning.playfield = DVec2::new(width, height);
    }

    /// Current frame without advancing
    pub fn frame(&self) -> Frame {
        let state = &self.state;
        let mut shapes = Vec::with_capacity(2 + state.obstacles.len() + state.charms.len());
        shapes.push(RenderShape {
            kind: ShapeKind::Boat,
            pos: state.boat.pos,
            size: state.boat.size,
        });
        shapes.push(RenderShape {
            kind: ShapeKind::Kite,
            pos: state.kite.pos,
            size: DVec2::splat(state.kite.size),
        });
        shapes.extend(state.obstacles.iter().map(|o| RenderShape {
            kind: ShapeKind::Obstacle,
            pos: o.pos,
            size: DVec2::splat(o.size),
        }));
        shapes.extend(state.charms.iter().map(|c| RenderShape {
            kind: ShapeKind::Charm,
            pos: c.pos,
            size: DVec2::splat(c.size),
        }));

        Frame {
            shapes,
            score: state.score,
            charm_count: state.charm_count,
            is_game_over: state.is_game_over(),
            summary: self.summary,
        }
    }

    /// Freeze the run and fold it into the persisted records
    fn game_over(&mut self) {
        self.state.phase = GamePhase::GameOver;
        self.state.control_held = false;
        self.events.push(GameEvent::GameOver);

        let score = self.state.score;
        let charms = self.state.charm_count;
        let mut records: Records = self.store.load();
        let previous_best = records.high_score;

        if records.apply_run(score, charms) {
            if let Err(e) = self.store.save(&records) {
                log::warn!("Failed to save records: {}", e);
            }
        }

        self.summary = Some(GameOverSummary {
            final_score: score,
            high_score: records.high_score,
            total_charms: records.total_charms,
            new_high_score: score > previous_best,
        });
        log::info!(
            "Game over: score {:.0}, charms {}, best {:.0}",
            score,
            charms,
            records.high_score
        );
    }
}
