//! Game balance and layout
//!
//! Persisted in LocalStorage so a tweaked balance survives reloads. Every
//! field has a default, so partial JSON overrides are accepted.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::{DEFAULT_HEIGHT, DEFAULT_WIDTH};

/// Tunable gameplay constants
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Match ===
    /// Shots per match
    pub shot_limit: u32,
    /// Goals needed to win
    pub win_threshold: u32,

    // === Ball ===
    pub ball_radius: f32,
    /// Resting spot, measured up from the bottom edge
    pub ball_rest_offset: f32,
    /// Extra grab radius around the ball for starting a drag
    pub grab_tolerance: f32,
    /// Maximum drag distance (pixels)
    pub max_pull: f32,

    // === Shot ===
    /// Pull pixels per unit of power
    pub pull_per_power: f32,
    pub min_power: f32,
    pub max_power: f32,
    /// Horizontal velocity per pixel of aim offset
    pub horizontal_gain: f32,
    /// Power at which the horizontal gain applies unscaled
    pub power_normalizer: f32,
    /// Downward acceleration per tick
    pub gravity: f32,

    // === Goal ===
    /// Half width of the goal mouth around the field centre
    pub goal_half_width: f32,
    /// Goal line distance from the top edge
    pub goal_line_y: f32,
    /// Aim marker inset from each post
    pub aim_margin: f32,
    /// How far past the field edge a ball may travel before it is out
    pub out_margin: f32,

    // === Keeper ===
    pub keeper_width: f32,
    pub keeper_height: f32,
    /// Gap between goal line and the keeper's top edge
    pub keeper_depth: f32,
    /// How far the keeper may step outside each post
    pub keeper_overhang: f32,
    /// Fraction of the aim error closed per tick
    pub tracking_gain: f32,
    /// Speed cap when the keeper reads the shot
    pub keeper_fast_speed: f32,
    /// Speed cap when wrong-footed
    pub keeper_slow_speed: f32,
    /// Chance per shot that the keeper is wrong-footed
    pub wrong_foot_chance: f64,
    /// Chance per tick of a dive when close to the aim
    pub dive_chance: f64,
    /// Aim error below which the keeper may dive
    pub dive_window: f32,
    pub dive_nudge: f32,
    pub sway_amplitude: f32,
    pub sway_frequency: f32,

    // === Save bounce ===
    pub save_damping: f32,
    pub save_kick: f32,
    pub save_damping_x: f32,

    // === Pacing (ticks) ===
    pub save_reset_delay: u64,
    pub score_reset_delay: u64,
    pub miss_reset_delay: u64,
    pub finish_delay: u64,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            shot_limit: 5,
            win_threshold: 3,

            ball_radius: 24.0,
            ball_rest_offset: 80.0,
            grab_tolerance: 20.0,
            max_pull: 224.0,

            pull_per_power: 8.0,
            min_power: 6.0,
            max_power: 34.0,
            horizontal_gain: 0.045,
            power_normalizer: 20.0,
            gravity: 0.45,

            goal_half_width: 230.0,
            goal_line_y: 140.0,
            aim_margin: 20.0,
            out_margin: 100.0,

            keeper_width: 100.0,
            keeper_height: 120.0,
            keeper_depth: 10.0,
            keeper_overhang: 20.0,
            tracking_gain: 0.12,
            keeper_fast_speed: 5.0,
            keeper_slow_speed: 2.0,
            wrong_foot_chance: 0.15,
            dive_chance: 0.02,
            dive_window: 30.0,
            dive_nudge: 6.0,
            sway_amplitude: 0.6,
            sway_frequency: 0.05,

            save_damping: 0.6,
            save_kick: 2.0,
            save_damping_x: 0.5,

            save_reset_delay: 36,
            score_reset_delay: 48,
            miss_reset_delay: 18,
            finish_delay: 60,
        }
    }
}

impl Tuning {
    /// Parse tuning overrides from JSON (missing fields keep their defaults)
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str::<Tuning>(json).map(Tuning::sanitized)
    }

    /// Replace values the simulation cannot work with by their defaults
    pub fn sanitized(mut self) -> Self {
        let defaults = Tuning::default();

        if self.shot_limit == 0 {
            log::warn!("shot_limit must be positive, using {}", defaults.shot_limit);
            self.shot_limit = defaults.shot_limit;
        }
        if self.win_threshold > self.shot_limit {
            log::warn!(
                "win_threshold {} exceeds shot_limit {}, clamping",
                self.win_threshold,
                self.shot_limit
            );
            self.win_threshold = self.shot_limit;
        }
        if !(self.pull_per_power > 0.0) {
            log::warn!("pull_per_power must be positive, using default");
            self.pull_per_power = defaults.pull_per_power;
        }
        if !(self.power_normalizer > 0.0) {
            log::warn!("power_normalizer must be positive, using default");
            self.power_normalizer = defaults.power_normalizer;
        }
        if self.min_power > self.max_power {
            log::warn!("min_power exceeds max_power, using default power range");
            self.min_power = defaults.min_power;
            self.max_power = defaults.max_power;
        }
        if self.max_pull < 0.0 {
            self.max_pull = defaults.max_pull;
        }
        self.wrong_foot_chance = self.wrong_foot_chance.clamp(0.0, 1.0);
        self.dive_chance = self.dive_chance.clamp(0.0, 1.0);
        self.keeper_slow_speed = self.keeper_slow_speed.max(0.0);
        self.keeper_fast_speed = self.keeper_fast_speed.max(0.0);

        self
    }

    /// LocalStorage key
    #[allow(dead_code)]
    const STORAGE_KEY: &'static str = "spot_kick_tuning";

    /// Load tuning from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                match Self::from_json(&json) {
                    Ok(tuning) => {
                        log::info!("Loaded tuning from LocalStorage");
                        return tuning;
                    }
                    Err(e) => log::warn!("Ignoring stored tuning: {}", e),
                }
            }
        }

        log::info!("Using default tuning");
        Self::default()
    }

    /// Save tuning to LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn save(&self) {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(json) = serde_json::to_string(self) {
                let _ = storage.set_item(Self::STORAGE_KEY, &json);
                log::info!("Tuning saved");
            }
        }
    }

    /// Native stubs
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        Self::default()
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn save(&self) {
        // No-op for native
    }
}

/// Playfield geometry derived from the surface size
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Field {
    pub width: f32,
    pub height: f32,
    pub goal_left: f32,
    pub goal_right: f32,
    pub goal_line_y: f32,
    pub ball_rest: Vec2,
    /// Height of the aim marker, just inside the goal mouth
    pub aim_y: f32,
    /// Keeper top edge
    pub keeper_y: f32,
    pub keeper_min_x: f32,
    pub keeper_max_x: f32,
    pub aim_min_x: f32,
    pub aim_max_x: f32,
    pub out_margin: f32,
}

impl Field {
    pub fn new(width: f32, height: f32, tuning: &Tuning) -> Self {
        let center_x = width / 2.0;
        let goal_left = center_x - tuning.goal_half_width;
        let goal_right = center_x + tuning.goal_half_width;
        Self {
            width,
            height,
            goal_left,
            goal_right,
            goal_line_y: tuning.goal_line_y,
            ball_rest: Vec2::new(center_x, height - tuning.ball_rest_offset),
            aim_y: tuning.goal_line_y - tuning.aim_margin,
            keeper_y: tuning.goal_line_y + tuning.keeper_depth,
            keeper_min_x: goal_left - tuning.keeper_overhang,
            keeper_max_x: goal_right - tuning.keeper_width + tuning.keeper_overhang,
            aim_min_x: goal_left + tuning.aim_margin,
            aim_max_x: goal_right - tuning.aim_margin,
            out_margin: tuning.out_margin,
        }
    }

    /// Whether an x coordinate lies between the posts
    pub fn in_goal_span(&self, x: f32) -> bool {
        x >= self.goal_left && x <= self.goal_right
    }

    pub fn goal_center_x(&self) -> f32 {
        (self.goal_left + self.goal_right) / 2.0
    }
}

impl Default for Field {
    fn default() -> Self {
        Self::new(DEFAULT_WIDTH, DEFAULT_HEIGHT, &Tuning::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_field_layout() {
        let field = Field::default();
        assert_eq!(field.goal_left, 220.0);
        assert_eq!(field.goal_right, 680.0);
        assert_eq!(field.ball_rest, Vec2::new(450.0, 520.0));
        assert_eq!(field.keeper_y, 150.0);
        assert_eq!(field.keeper_min_x, 200.0);
        assert_eq!(field.keeper_max_x, 600.0);
        assert!(field.in_goal_span(220.0));
        assert!(!field.in_goal_span(681.0));
    }

    #[test]
    fn test_field_scales_with_surface() {
        let tuning = Tuning::default();
        let field = Field::new(1200.0, 800.0, &tuning);
        assert_eq!(field.goal_center_x(), 600.0);
        assert_eq!(field.ball_rest.y, 720.0);
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let tuning = Tuning::from_json(r#"{ "shot_limit": 7, "gravity": 0.5 }"#).unwrap();
        assert_eq!(tuning.shot_limit, 7);
        assert_eq!(tuning.gravity, 0.5);
        assert_eq!(tuning.win_threshold, 3);
        assert_eq!(tuning.max_pull, 224.0);
    }

    #[test]
    fn test_invalid_json_is_an_error() {
        assert!(Tuning::from_json("{ not json").is_err());
    }

    #[test]
    fn test_sanitize_rejects_nonsense() {
        let tuning = Tuning {
            shot_limit: 0,
            win_threshold: 9,
            pull_per_power: 0.0,
            wrong_foot_chance: 3.0,
            ..Tuning::default()
        }
        .sanitized();
        assert_eq!(tuning.shot_limit, 5);
        assert_eq!(tuning.win_threshold, 5);
        assert_eq!(tuning.pull_per_power, 8.0);
        assert_eq!(tuning.wrong_foot_chance, 1.0);
    }
}
