//! Turning a released drag into a launched ball

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::state::{BallState, GameState};
use crate::tuning::Tuning;

/// What a shot was launched with
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ShotLaunch {
    pub power: f32,
    pub velocity: Vec2,
    pub keeper_speed: f32,
    pub wrong_footed: bool,
}

/// Map pull distance to launch power (monotone, saturating)
pub fn shot_power(pull: f32, tuning: &Tuning) -> f32 {
    (pull / tuning.pull_per_power + tuning.min_power).clamp(tuning.min_power, tuning.max_power)
}

/// Launch velocity for a shot from `ball_x` toward `aim_x`
///
/// Horizontal speed grows with both the aim offset and the power.
pub fn launch_velocity(power: f32, aim_x: f32, ball_x: f32, tuning: &Tuning) -> Vec2 {
    let vx = (aim_x - ball_x) * tuning.horizontal_gain * (power / tuning.power_normalizer);
    Vec2::new(vx, -power)
}

/// Pick the keeper's speed cap for the coming shot.
///
/// Returns the speed and whether the keeper was wrong-footed.
pub fn roll_keeper_speed<R: Rng + ?Sized>(tuning: &Tuning, rng: &mut R) -> (f32, bool) {
    if rng.random_bool(tuning.wrong_foot_chance) {
        (tuning.keeper_slow_speed, true)
    } else {
        (tuning.keeper_fast_speed, false)
    }
}

/// Launch the ball from the current pull and aim.
///
/// Refuses while a shot is already in flight. A ball still waiting for its
/// delayed reset is put back on the spot first so the pending reset cannot
/// fire into the new flight.
pub fn resolve_shot<R: Rng + ?Sized>(
    state: &mut GameState,
    tuning: &Tuning,
    rng: &mut R,
) -> Option<ShotLaunch> {
    if state.ball.in_flight() || state.shots_remaining() == 0 {
        return None;
    }

    let pull = state.ball.pull;
    if state.ball.state != BallState::Resting {
        state.ball.reset();
    }

    state.shots += 1;

    let power = shot_power(pull, tuning);
    let velocity = launch_velocity(power, state.target.pos.x, state.ball.pos.x, tuning);
    state.ball.vel = velocity;
    state.ball.pull = 0.0;
    state.ball.state = BallState::InFlight;

    let (keeper_speed, wrong_footed) = roll_keeper_speed(tuning, rng);
    state.keeper.speed = keeper_speed;

    log::debug!(
        "Shot {} launched: power {:.1}, vel ({:.2}, {:.2}), keeper speed {}{}",
        state.shots,
        power,
        velocity.x,
        velocity.y,
        keeper_speed,
        if wrong_footed { " (wrong-footed)" } else { "" }
    );

    Some(ShotLaunch {
        power,
        velocity,
        keeper_speed,
        wrong_footed,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::test_rng::FixedRng;
    use crate::tuning::Field;
    use proptest::prelude::*;

    #[test]
    fn test_power_endpoints() {
        let tuning = Tuning::default();
        assert_eq!(shot_power(0.0, &tuning), 6.0);
        assert_eq!(shot_power(220.0, &tuning), 33.5);
        assert_eq!(shot_power(224.0, &tuning), 34.0);
        assert_eq!(shot_power(tuning.max_pull, &tuning), 34.0);
        assert_eq!(shot_power(10_000.0, &tuning), 34.0);
        assert_eq!(shot_power(-50.0, &tuning), 6.0);
    }

    #[test]
    fn test_straight_shot_has_no_horizontal_speed() {
        let tuning = Tuning::default();
        let vel = launch_velocity(34.0, 450.0, 450.0, &tuning);
        assert_eq!(vel.x, 0.0);
        assert_eq!(vel.y, -34.0);
    }

    #[test]
    fn test_harder_shots_curl_further() {
        let tuning = Tuning::default();
        let soft = launch_velocity(10.0, 600.0, 450.0, &tuning);
        let hard = launch_velocity(30.0, 600.0, 450.0, &tuning);
        assert!(hard.x > soft.x);
    }

    #[test]
    fn test_resolve_shot_launches_and_counts() {
        let tuning = Tuning::default();
        let mut state = GameState::new_match(Field::default(), &tuning);
        state.ball.pull = 224.0;
        state.target.pos.x = 600.0;

        let launch = resolve_shot(&mut state, &tuning, &mut FixedRng::never()).unwrap();
        assert_eq!(state.shots, 1);
        assert_eq!(state.ball.state, BallState::InFlight);
        assert_eq!(state.ball.pull, 0.0);
        assert_eq!(launch.power, 34.0);
        assert_eq!(state.ball.vel, launch.velocity);
        assert!(launch.velocity.x > 0.0);
        assert!(!launch.wrong_footed);
        assert_eq!(state.keeper.speed, tuning.keeper_fast_speed);
    }

    #[test]
    fn test_resolve_shot_refused_in_flight() {
        let tuning = Tuning::default();
        let mut state = GameState::new_match(Field::default(), &tuning);
        let mut rng = FixedRng::never();
        resolve_shot(&mut state, &tuning, &mut rng).unwrap();
        let vel = state.ball.vel;

        assert!(resolve_shot(&mut state, &tuning, &mut rng).is_none());
        assert_eq!(state.shots, 1);
        assert_eq!(state.ball.vel, vel);
    }

    #[test]
    fn test_resolve_shot_consumes_pending_reset() {
        let tuning = Tuning::default();
        let mut state = GameState::new_match(Field::default(), &tuning);
        state.ball.pos = Vec2::new(300.0, 400.0);
        state.ball.vel = Vec2::new(-4.0, 12.0);
        state.ball.pull = 100.0;
        state.ball.state = BallState::Saved { reset_at: 500 };

        let launch = resolve_shot(&mut state, &tuning, &mut FixedRng::never()).unwrap();
        // Launched from the spot, not from where the saved ball was lying
        assert_eq!(state.ball.pos, state.ball.rest);
        assert_eq!(state.ball.state, BallState::InFlight);
        assert_eq!(launch.power, shot_power(100.0, &tuning));
    }

    #[test]
    fn test_wrong_footed_keeper_is_slower() {
        let tuning = Tuning::default();
        let (speed, wrong_footed) = roll_keeper_speed(&tuning, &mut FixedRng::always());
        assert!(wrong_footed);
        assert_eq!(speed, tuning.keeper_slow_speed);

        let (speed, wrong_footed) = roll_keeper_speed(&tuning, &mut FixedRng::never());
        assert!(!wrong_footed);
        assert_eq!(speed, tuning.keeper_fast_speed);
    }

    #[test]
    fn test_no_shots_after_limit() {
        let tuning = Tuning::default();
        let mut state = GameState::new_match(Field::default(), &tuning);
        state.shots = tuning.shot_limit;
        assert!(resolve_shot(&mut state, &tuning, &mut FixedRng::never()).is_none());
        assert_eq!(state.shots, tuning.shot_limit);
    }

    proptest! {
        #[test]
        fn prop_power_is_monotone(a in 0.0f32..400.0, b in 0.0f32..400.0) {
            let tuning = Tuning::default();
            let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
            prop_assert!(shot_power(lo, &tuning) <= shot_power(hi, &tuning));
        }

        #[test]
        fn prop_power_stays_in_range(pull in -1000.0f32..1000.0) {
            let tuning = Tuning::default();
            let power = shot_power(pull, &tuning);
            prop_assert!((6.0..=34.0).contains(&power));
        }

        #[test]
        fn prop_horizontal_sign_follows_aim(
            aim in 240.0f32..660.0,
            power in 6.0f32..34.0,
        ) {
            let tuning = Tuning::default();
            let ball_x = 450.0;
            let vel = launch_velocity(power, aim, ball_x, &tuning);
            let offset = aim - ball_x;
            if offset > 0.0 {
                prop_assert!(vel.x > 0.0);
            } else if offset < 0.0 {
                prop_assert!(vel.x < 0.0);
            } else {
                prop_assert_eq!(vel.x, 0.0);
            }
        }
    }
}
