//! Game state and core simulation types
//!
//! Everything a tick reads or writes lives here; the session owns it and
//! lends it to each component by `&mut`.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::tuning::{Field, Tuning};

/// Current phase of the match
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Pre-match menu, nothing simulates
    Menu,
    /// Shots are being taken
    Playing,
    /// All shots used, waiting a moment before showing the result
    Finishing { at_tick: u64 },
    /// Match decided
    Over(Outcome),
}

/// Final result of a match
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    Win,
    Loss,
}

impl Outcome {
    pub fn from_goals(goals: u32, threshold: u32) -> Self {
        if goals >= threshold {
            Outcome::Win
        } else {
            Outcome::Loss
        }
    }

    /// Text shown on the end screen
    pub fn label(&self) -> &'static str {
        match self {
            Outcome::Win => "YOU WON",
            Outcome::Loss => "GAME OVER",
        }
    }
}

/// How a flight ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ShotResult {
    Saved,
    Scored,
    Missed,
}

/// Notable things that happened during a tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    /// A flight was settled
    ShotEnded(ShotResult),
    /// The ball went back to the spot
    BallReset,
    MatchOver(Outcome),
}

/// Ball lifecycle. Terminal states carry the tick at which the ball returns to rest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BallState {
    /// Pinned to the penalty spot
    Resting,
    /// Launched, integrating under gravity
    InFlight,
    /// Bounced off the keeper
    Saved { reset_at: u64 },
    /// Crossed the goal line between the posts
    Scored { reset_at: u64 },
    /// Left the field
    Out { reset_at: u64 },
}

impl BallState {
    /// Tick at which a terminal ball goes back to the spot
    pub fn reset_at(&self) -> Option<u64> {
        match *self {
            BallState::Saved { reset_at }
            | BallState::Scored { reset_at }
            | BallState::Out { reset_at } => Some(reset_at),
            BallState::Resting | BallState::InFlight => None,
        }
    }
}

/// Drag gesture lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Gesture {
    #[default]
    Idle,
    Dragging,
}

/// The ball
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ball {
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
    /// Penalty spot
    pub rest: Vec2,
    /// Drag distance below the spot (0..=max_pull)
    pub pull: f32,
    pub state: BallState,
}

impl Ball {
    pub fn new(rest: Vec2, radius: f32) -> Self {
        Self {
            pos: rest,
            vel: Vec2::ZERO,
            radius,
            rest,
            pull: 0.0,
            state: BallState::Resting,
        }
    }

    /// Put the ball back on the spot
    pub fn reset(&mut self) {
        self.pos = self.rest;
        self.vel = Vec2::ZERO;
        self.pull = 0.0;
        self.state = BallState::Resting;
    }

    pub fn in_flight(&self) -> bool {
        self.state == BallState::InFlight
    }
}

/// Aim marker
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Target {
    pub pos: Vec2,
}

/// What the keeper is doing this tick (animation only)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum KeeperMode {
    #[default]
    Idle,
    Tracking,
    Diving,
}

/// The goalkeeper, an axis-aligned box
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Keeper {
    /// Top-left corner
    pub pos: Vec2,
    pub size: Vec2,
    /// Horizontal speed cap for the current shot
    pub speed: f32,
    pub mode: KeeperMode,
}

impl Keeper {
    pub fn center_x(&self) -> f32 {
        self.pos.x + self.size.x / 2.0
    }

    /// Bounding box as (min, max) corners
    pub fn bounds(&self) -> (Vec2, Vec2) {
        (self.pos, self.pos + self.size)
    }
}

/// Complete match state (deterministic, serializable)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameState {
    pub field: Field,
    pub phase: GamePhase,
    /// Shots released this match
    pub shots: u32,
    pub goals: u32,
    pub shot_limit: u32,
    pub win_threshold: u32,
    pub gesture: Gesture,
    /// Simulation tick counter
    pub time_ticks: u64,
    /// Result of the most recent flight
    pub last_result: Option<ShotResult>,
    pub ball: Ball,
    pub target: Target,
    pub keeper: Keeper,
}

impl GameState {
    /// Fresh state sitting in the menu
    pub fn new(field: Field, tuning: &Tuning) -> Self {
        let keeper_x = field.goal_center_x() - tuning.keeper_width / 2.0;
        Self {
            field,
            phase: GamePhase::Menu,
            shots: 0,
            goals: 0,
            shot_limit: tuning.shot_limit,
            win_threshold: tuning.win_threshold,
            gesture: Gesture::Idle,
            time_ticks: 0,
            last_result: None,
            ball: Ball::new(field.ball_rest, tuning.ball_radius),
            target: Target {
                pos: Vec2::new(field.ball_rest.x, field.aim_y),
            },
            keeper: Keeper {
                pos: Vec2::new(keeper_x, field.keeper_y),
                size: Vec2::new(tuning.keeper_width, tuning.keeper_height),
                speed: tuning.keeper_fast_speed,
                mode: KeeperMode::Idle,
            },
        }
    }

    /// Fresh state with the match already running
    pub fn new_match(field: Field, tuning: &Tuning) -> Self {
        let mut state = Self::new(field, tuning);
        state.phase = GamePhase::Playing;
        state
    }

    pub fn is_playing(&self) -> bool {
        self.phase == GamePhase::Playing
    }

    pub fn shots_remaining(&self) -> u32 {
        self.shot_limit.saturating_sub(self.shots)
    }

    pub fn outcome(&self) -> Option<Outcome> {
        match self.phase {
            GamePhase::Over(outcome) => Some(outcome),
            _ => None,
        }
    }
}
