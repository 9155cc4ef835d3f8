//! Match driver
//!
//! Owns the simulation context (state, RNG, tuning) and runs fixed ticks
//! from variable frame times. Front ends talk to the game only through this.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;

use crate::consts::{DEFAULT_HEIGHT, DEFAULT_WIDTH, MAX_SUBSTEPS, SIM_DT};
use crate::render::{AssetStatus, DrawCommand, build_scene};
use crate::sim::{self, GameEvent, GamePhase, GameState, Outcome, ShotLaunch};
use crate::tuning::{Field, Tuning};

/// Pointer or touch input in surface coordinates
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerEvent {
    Down(Vec2),
    Move(Vec2),
    Up,
}

/// Which view the page should show
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Menu,
    Playfield,
    EndScreen(Outcome),
}

/// A running game: one match at a time, restartable
pub struct Session {
    state: GameState,
    rng: Pcg32,
    tuning: Tuning,
    size: (f32, f32),
    accumulator: f32,
}

impl Session {
    /// New session sitting in the menu
    pub fn new(tuning: Tuning, seed: u64) -> Self {
        let field = Field::new(DEFAULT_WIDTH, DEFAULT_HEIGHT, &tuning);
        Self {
            state: GameState::new(field, &tuning),
            rng: Pcg32::seed_from_u64(seed),
            tuning,
            size: (DEFAULT_WIDTH, DEFAULT_HEIGHT),
            accumulator: 0.0,
        }
    }

    /// Begin a fresh match: counters, ball and keeper all reinitialised
    pub fn start(&mut self, seed: u64) {
        let field = Field::new(self.size.0, self.size.1, &self.tuning);
        self.state = GameState::new_match(field, &self.tuning);
        self.rng = Pcg32::seed_from_u64(seed);
        self.accumulator = 0.0;
        log::info!("Match started with seed: {}", seed);
    }

    /// Play again from the end screen
    pub fn retry(&mut self, seed: u64) {
        self.start(seed);
    }

    /// Change the surface size; takes effect at the next match start
    pub fn resize(&mut self, width: f32, height: f32) {
        self.size = (width, height);
        if self.state.phase == GamePhase::Menu {
            self.state = GameState::new(Field::new(width, height, &self.tuning), &self.tuning);
        }
    }

    /// Feed one pointer event. Returns the launch if this event fired a shot.
    pub fn pointer(&mut self, event: PointerEvent) -> Option<ShotLaunch> {
        match event {
            PointerEvent::Down(pos) => {
                sim::begin_drag(&mut self.state, pos, &self.tuning);
                None
            }
            PointerEvent::Move(pos) => {
                sim::update_drag(&mut self.state, pos, &self.tuning);
                None
            }
            PointerEvent::Up => sim::end_drag(&mut self.state, &self.tuning, &mut self.rng),
        }
    }

    /// Advance by wall-clock `dt` seconds, running as many fixed ticks as fit.
    ///
    /// Returns the events of every tick that ran.
    pub fn advance(&mut self, dt: f32) -> Vec<GameEvent> {
        let dt = dt.clamp(0.0, 0.1);
        self.accumulator += dt;

        let mut events = Vec::new();
        let mut substeps = 0;
        while self.accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
            events.extend(self.step());
            self.accumulator -= SIM_DT;
            substeps += 1;
        }
        // Drop backlog we could not catch up on
        if substeps == MAX_SUBSTEPS {
            self.accumulator = self.accumulator.min(SIM_DT);
        }
        events
    }

    /// Run exactly one tick
    pub fn step(&mut self) -> Vec<GameEvent> {
        sim::tick(&mut self.state, &self.tuning, &mut self.rng)
    }

    /// Draw list for the current frame
    pub fn scene(&self, assets: &AssetStatus) -> Vec<DrawCommand> {
        build_scene(&self.state, &self.tuning, assets)
    }

    pub fn screen(&self) -> Screen {
        match self.state.phase {
            GamePhase::Menu => Screen::Menu,
            GamePhase::Playing | GamePhase::Finishing { .. } => Screen::Playfield,
            GamePhase::Over(outcome) => Screen::EndScreen(outcome),
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn tuning(&self) -> &Tuning {
        &self.tuning
    }

    /// JSON dump of the match state for debugging and replay checks
    pub fn snapshot(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(&self.state)
    }
}
