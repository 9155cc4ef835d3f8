//! Fixed timestep simulation tick
//!
//! Core game loop that advances simulation deterministically: pending
//! resets first, then the keeper, then the ball, then the match clock.

use rand::Rng;

use super::collision::circle_rect_collision;
use super::keeper::update_keeper;
use super::state::{
    Ball, BallState, GameEvent, GamePhase, GameState, Gesture, Outcome, ShotResult,
};
use crate::tuning::{Field, Tuning};

/// Advance the game state by one tick
///
/// Returns what happened during the tick, in order.
pub fn tick<R: Rng + ?Sized>(state: &mut GameState, tuning: &Tuning, rng: &mut R) -> Vec<GameEvent> {
    let mut events = Vec::new();

    // Nothing moves outside a match
    match state.phase {
        GamePhase::Menu | GamePhase::Over(_) => return events,
        GamePhase::Playing | GamePhase::Finishing { .. } => {}
    }

    state.time_ticks += 1;
    let now = state.time_ticks;

    // Delayed reset from the previous flight. A drag already under way
    // keeps its pull.
    if let Some(reset_at) = state.ball.state.reset_at() {
        if now >= reset_at {
            let pull = state.ball.pull;
            state.ball.reset();
            if state.gesture == Gesture::Dragging {
                state.ball.pull = pull;
            }
            events.push(GameEvent::BallReset);
        }
    }

    update_keeper(state, tuning, rng);

    if let Some(result) = step_ball(state, tuning) {
        state.last_result = Some(result);
        if result == ShotResult::Scored {
            state.goals += 1;
        }
        log::info!(
            "Shot {}/{}: {:?} (goals: {})",
            state.shots,
            state.shot_limit,
            result,
            state.goals
        );
        events.push(GameEvent::ShotEnded(result));
    }

    match state.phase {
        GamePhase::Playing => {
            if state.shots >= state.shot_limit && !state.ball.in_flight() {
                state.phase = GamePhase::Finishing {
                    at_tick: now + tuning.finish_delay,
                };
            }
        }
        GamePhase::Finishing { at_tick } if now >= at_tick => {
            let outcome = Outcome::from_goals(state.goals, state.win_threshold);
            log::info!(
                "Match over: {} ({} of {})",
                outcome.label(),
                state.goals,
                state.shot_limit
            );
            state.phase = GamePhase::Over(outcome);
            events.push(GameEvent::MatchOver(outcome));
        }
        _ => {}
    }

    events
}

/// One step of discrete projectile motion: move, then apply gravity
#[inline]
pub fn integrate(ball: &mut Ball, gravity: f32) {
    ball.pos += ball.vel;
    ball.vel.y += gravity;
}

/// Advance the ball and detect the end of a flight
fn step_ball(state: &mut GameState, tuning: &Tuning) -> Option<ShotResult> {
    let now = state.time_ticks;
    let ball = &mut state.ball;

    match ball.state {
        BallState::Resting => {
            ball.pos = ball.rest;
            None
        }

        BallState::Saved { .. } | BallState::Scored { .. } | BallState::Out { .. } => {
            // Follow-through only, the outcome is already settled
            integrate(ball, tuning.gravity);
            None
        }

        BallState::InFlight => {
            integrate(ball, tuning.gravity);

            let (min, max) = state.keeper.bounds();
            let contact = circle_rect_collision(ball.pos, ball.radius, min, max);
            if contact.hit {
                // Out of the keeper before bouncing away
                ball.pos += contact.normal * contact.penetration;
                ball.vel.y = ball.vel.y.abs() * tuning.save_damping + tuning.save_kick;
                ball.vel.x = -ball.vel.x * tuning.save_damping_x;
                ball.state = BallState::Saved {
                    reset_at: now + tuning.save_reset_delay,
                };
                return Some(ShotResult::Saved);
            }

            let field = &state.field;
            if ball.pos.y < field.goal_line_y && field.in_goal_span(ball.pos.x) {
                ball.state = BallState::Scored {
                    reset_at: now + tuning.score_reset_delay,
                };
                return Some(ShotResult::Scored);
            }

            if ball.pos.y < field.goal_line_y || out_of_field(field, ball) {
                ball.state = BallState::Out {
                    reset_at: now + tuning.miss_reset_delay,
                };
                return Some(ShotResult::Missed);
            }

            None
        }
    }
}

/// Whether the ball has left the playing area
fn out_of_field(field: &Field, ball: &Ball) -> bool {
    let margin = field.out_margin;
    ball.pos.y > field.height + margin
        || ball.pos.y < -margin
        || ball.pos.x < -margin
        || ball.pos.x > field.width + margin
}
