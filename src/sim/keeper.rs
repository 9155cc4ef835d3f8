//! Goalkeeper AI: proportional tracking with a speed cap, plus idle sway

use rand::Rng;

use super::state::{GameState, KeeperMode};
use crate::clamp_span;
use crate::tuning::Tuning;

/// Move the keeper for one tick
pub fn update_keeper<R: Rng + ?Sized>(state: &mut GameState, tuning: &Tuning, rng: &mut R) {
    let keeper = &mut state.keeper;

    if state.ball.in_flight() {
        let error = state.target.pos.x - keeper.center_x();
        let step = (error * tuning.tracking_gain).clamp(-keeper.speed, keeper.speed);
        keeper.pos.x += step;
        keeper.mode = KeeperMode::Tracking;

        // Late lunge when almost there
        let remaining = state.target.pos.x - keeper.center_x();
        if remaining.abs() < tuning.dive_window && rng.random_bool(tuning.dive_chance) {
            let direction = if remaining != 0.0 {
                remaining.signum()
            } else {
                step.signum()
            };
            keeper.pos.x += direction * tuning.dive_nudge;
            keeper.mode = KeeperMode::Diving;
        }
    } else {
        let t = state.time_ticks as f32 * tuning.sway_frequency;
        keeper.pos.x += t.sin() * tuning.sway_amplitude;
        keeper.mode = KeeperMode::Idle;
    }

    keeper.pos.x = clamp_span(keeper.pos.x, state.field.keeper_min_x, state.field.keeper_max_x);
}
