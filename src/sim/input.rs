//! Drag gesture tracking
//!
//! Pointer handlers call these between ticks; each applies its effect in
//! one go so the next tick sees a consistent pull and aim.

use glam::Vec2;
use rand::Rng;

use super::shot::{ShotLaunch, resolve_shot};
use super::state::{GameState, Gesture};
use crate::tuning::Tuning;
use crate::{clamp_span, distance};

/// Start a drag if the pointer went down on the ball.
///
/// Returns whether a drag was armed.
pub fn begin_drag(state: &mut GameState, pointer: Vec2, tuning: &Tuning) -> bool {
    if !state.is_playing() || state.shots_remaining() == 0 || state.ball.in_flight() {
        return false;
    }

    let grab_radius = state.ball.radius + tuning.grab_tolerance;
    if distance(pointer, state.ball.rest) > grab_radius {
        return false;
    }

    state.gesture = Gesture::Dragging;
    true
}

/// Update pull and aim from the current pointer position
pub fn update_drag(state: &mut GameState, pointer: Vec2, tuning: &Tuning) {
    if state.gesture != Gesture::Dragging {
        return;
    }

    state.ball.pull = clamp_span(pointer.y - state.ball.rest.y, 0.0, tuning.max_pull);
    state.target.pos.x = clamp_span(pointer.x, state.field.aim_min_x, state.field.aim_max_x);
}

/// Finish the gesture, shooting if a drag was in progress
pub fn end_drag<R: Rng + ?Sized>(
    state: &mut GameState,
    tuning: &Tuning,
    rng: &mut R,
) -> Option<ShotLaunch> {
    let was_dragging = state.gesture == Gesture::Dragging;
    state.gesture = Gesture::Idle;

    if was_dragging {
        resolve_shot(state, tuning, rng)
    } else {
        None
    }
}
