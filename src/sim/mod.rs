//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - One tick per call, no wall-clock time
//! - Randomness only through the `Rng` handed in by the caller
//! - No rendering or platform dependencies

pub mod collision;
pub mod input;
pub mod keeper;
pub mod shot;
pub mod state;
pub mod tick;

pub use collision::{CollisionResult, circle_rect_collision, circle_rect_overlap};
pub use input::{begin_drag, end_drag, update_drag};
pub use keeper::update_keeper;
pub use shot::{ShotLaunch, launch_velocity, resolve_shot, roll_keeper_speed, shot_power};
pub use state::{
    Ball, BallState, GameEvent, GamePhase, GameState, Gesture, Keeper, KeeperMode, Outcome,
    ShotResult, Target,
};
pub use tick::{integrate, tick};
