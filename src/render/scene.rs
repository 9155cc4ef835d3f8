//! Scene building: game state in, draw commands out
//!
//! Read-only. Every sprite has a flat-colour fallback so a frame can be
//! drawn before any image has finished loading.

use glam::Vec2;

use crate::sim::{BallState, GameState, Gesture, KeeperMode, shot_power};
use crate::tuning::Tuning;

/// RGBA colour, components in 0..=1
pub type Color = [f32; 4];

/// Colors for game elements
pub mod colors {
    use super::Color;

    pub const GRASS: Color = [0.18, 0.55, 0.24, 1.0];
    pub const GRASS_STRIPE: Color = [0.16, 0.50, 0.22, 1.0];
    pub const LINE: Color = [1.0, 1.0, 1.0, 0.9];
    pub const NET_BACKDROP: Color = [0.05, 0.08, 0.06, 0.55];
    pub const NET: Color = [1.0, 1.0, 1.0, 0.25];
    pub const POSTS: Color = [1.0, 1.0, 1.0, 1.0];
    pub const KEEPER: Color = [0.95, 0.45, 0.1, 1.0];
    pub const KEEPER_DIVING: Color = [1.0, 0.65, 0.2, 1.0];
    pub const BALL: Color = [1.0, 1.0, 1.0, 1.0];
    pub const BALL_OUTLINE: Color = [0.1, 0.1, 0.1, 1.0];
    pub const AIM: Color = [1.0, 0.9, 0.2, 0.9];
    pub const METER_FRAME: Color = [1.0, 1.0, 1.0, 0.8];
    pub const METER_FILL: Color = [1.0, 0.3, 0.2, 0.9];
    pub const HUD_TEXT: Color = [1.0, 1.0, 1.0, 1.0];
    pub const BANNER_TEXT: Color = [1.0, 0.95, 0.4, 1.0];
}

/// Image assets the scene may use
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sprite {
    Ball,
    Keeper,
    Goal,
}

/// Which sprites have finished loading
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AssetStatus {
    pub ball: bool,
    pub keeper: bool,
    pub goal: bool,
}

impl AssetStatus {
    pub fn all_loaded() -> Self {
        Self {
            ball: true,
            keeper: true,
            goal: true,
        }
    }

    pub fn is_ready(&self, sprite: Sprite) -> bool {
        match sprite {
            Sprite::Ball => self.ball,
            Sprite::Keeper => self.keeper,
            Sprite::Goal => self.goal,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextAlign {
    Left,
    Center,
}

/// One primitive for the painter
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    FillRect {
        min: Vec2,
        size: Vec2,
        color: Color,
    },
    StrokeRect {
        min: Vec2,
        size: Vec2,
        color: Color,
        width: f32,
    },
    FillCircle {
        center: Vec2,
        radius: f32,
        color: Color,
    },
    StrokeCircle {
        center: Vec2,
        radius: f32,
        color: Color,
        width: f32,
    },
    Line {
        from: Vec2,
        to: Vec2,
        color: Color,
        width: f32,
    },
    Sprite {
        sprite: Sprite,
        min: Vec2,
        size: Vec2,
    },
    Text {
        pos: Vec2,
        text: String,
        size: f32,
        color: Color,
        align: TextAlign,
    },
}

/// Height of the goal frame above the goal line
const GOAL_HEIGHT: f32 = 110.0;
/// Spacing of the fallback net mesh
const NET_SPACING: f32 = 20.0;
const STRIPE_HEIGHT: f32 = 60.0;

/// Build the draw list for one frame
pub fn build_scene(state: &GameState, tuning: &Tuning, assets: &AssetStatus) -> Vec<DrawCommand> {
    let mut cmds = Vec::with_capacity(64);

    draw_field(state, &mut cmds);
    draw_goal(state, assets, &mut cmds);
    draw_keeper(state, assets, &mut cmds);
    draw_aim_marker(state, &mut cmds);
    draw_ball(state, tuning, assets, &mut cmds);
    draw_hud(state, &mut cmds);

    cmds
}

fn draw_field(state: &GameState, cmds: &mut Vec<DrawCommand>) {
    let field = &state.field;
    cmds.push(DrawCommand::FillRect {
        min: Vec2::ZERO,
        size: Vec2::new(field.width, field.height),
        color: colors::GRASS,
    });

    // Mowing stripes
    let mut y = 0.0;
    while y < field.height {
        cmds.push(DrawCommand::FillRect {
            min: Vec2::new(0.0, y),
            size: Vec2::new(field.width, STRIPE_HEIGHT / 2.0),
            color: colors::GRASS_STRIPE,
        });
        y += STRIPE_HEIGHT;
    }

    cmds.push(DrawCommand::Line {
        from: Vec2::new(0.0, field.goal_line_y),
        to: Vec2::new(field.width, field.goal_line_y),
        color: colors::LINE,
        width: 3.0,
    });
    cmds.push(DrawCommand::FillCircle {
        center: state.ball.rest,
        radius: 4.0,
        color: colors::LINE,
    });
}

fn draw_goal(state: &GameState, assets: &AssetStatus, cmds: &mut Vec<DrawCommand>) {
    let field = &state.field;
    let min = Vec2::new(field.goal_left, field.goal_line_y - GOAL_HEIGHT);
    let size = Vec2::new(field.goal_right - field.goal_left, GOAL_HEIGHT);

    if assets.is_ready(Sprite::Goal) {
        cmds.push(DrawCommand::Sprite {
            sprite: Sprite::Goal,
            min,
            size,
        });
    } else {
        cmds.push(DrawCommand::FillRect {
            min,
            size,
            color: colors::NET_BACKDROP,
        });
        let mut x = min.x + NET_SPACING;
        while x < min.x + size.x {
            cmds.push(DrawCommand::Line {
                from: Vec2::new(x, min.y),
                to: Vec2::new(x, min.y + size.y),
                color: colors::NET,
                width: 1.0,
            });
            x += NET_SPACING;
        }
        let mut y = min.y + NET_SPACING;
        while y < min.y + size.y {
            cmds.push(DrawCommand::Line {
                from: Vec2::new(min.x, y),
                to: Vec2::new(min.x + size.x, y),
                color: colors::NET,
                width: 1.0,
            });
            y += NET_SPACING;
        }
    }

    // Posts and crossbar always drawn on top
    cmds.push(DrawCommand::StrokeRect {
        min,
        size,
        color: colors::POSTS,
        width: 6.0,
    });
}

fn draw_keeper(state: &GameState, assets: &AssetStatus, cmds: &mut Vec<DrawCommand>) {
    let keeper = &state.keeper;
    if assets.is_ready(Sprite::Keeper) {
        cmds.push(DrawCommand::Sprite {
            sprite: Sprite::Keeper,
            min: keeper.pos,
            size: keeper.size,
        });
    } else {
        let color = if keeper.mode == KeeperMode::Diving {
            colors::KEEPER_DIVING
        } else {
            colors::KEEPER
        };
        cmds.push(DrawCommand::FillRect {
            min: keeper.pos,
            size: keeper.size,
            color,
        });
    }
}

fn draw_aim_marker(state: &GameState, cmds: &mut Vec<DrawCommand>) {
    cmds.push(DrawCommand::StrokeCircle {
        center: state.target.pos,
        radius: 12.0,
        color: colors::AIM,
        width: 3.0,
    });
}

/// Where the ball is drawn: back on the spot, held by the pull, while aiming
fn ball_draw_pos(state: &GameState) -> Vec2 {
    let ball = &state.ball;
    if state.gesture == Gesture::Dragging {
        ball.rest + Vec2::new(0.0, ball.pull)
    } else {
        ball.pos
    }
}

fn draw_ball(state: &GameState, tuning: &Tuning, assets: &AssetStatus, cmds: &mut Vec<DrawCommand>) {
    let ball = &state.ball;
    let pos = ball_draw_pos(state);

    if state.gesture == Gesture::Dragging {
        cmds.push(DrawCommand::Line {
            from: pos,
            to: state.target.pos,
            color: colors::AIM,
            width: 2.0,
        });
        draw_power_meter(state, tuning, cmds);
    }

    if assets.is_ready(Sprite::Ball) {
        cmds.push(DrawCommand::Sprite {
            sprite: Sprite::Ball,
            min: pos - Vec2::splat(ball.radius),
            size: Vec2::splat(ball.radius * 2.0),
        });
    } else {
        cmds.push(DrawCommand::FillCircle {
            center: pos,
            radius: ball.radius,
            color: colors::BALL,
        });
        cmds.push(DrawCommand::StrokeCircle {
            center: pos,
            radius: ball.radius,
            color: colors::BALL_OUTLINE,
            width: 2.0,
        });
    }
}

fn draw_power_meter(state: &GameState, tuning: &Tuning, cmds: &mut Vec<DrawCommand>) {
    let field = &state.field;
    let power = shot_power(state.ball.pull, tuning);
    let span = (tuning.max_power - tuning.min_power).max(f32::EPSILON);
    let fill = ((power - tuning.min_power) / span).clamp(0.0, 1.0);

    let size = Vec2::new(18.0, 160.0);
    let min = Vec2::new(field.width - 40.0, field.height - 200.0);
    cmds.push(DrawCommand::StrokeRect {
        min,
        size,
        color: colors::METER_FRAME,
        width: 2.0,
    });
    let filled = size.y * fill;
    cmds.push(DrawCommand::FillRect {
        min: Vec2::new(min.x, min.y + size.y - filled),
        size: Vec2::new(size.x, filled),
        color: colors::METER_FILL,
    });
}

fn draw_hud(state: &GameState, cmds: &mut Vec<DrawCommand>) {
    cmds.push(DrawCommand::Text {
        pos: Vec2::new(20.0, 32.0),
        text: format!("Shots: {} / {}", state.shots, state.shot_limit),
        size: 22.0,
        color: colors::HUD_TEXT,
        align: TextAlign::Left,
    });
    cmds.push(DrawCommand::Text {
        pos: Vec2::new(20.0, 60.0),
        text: format!("Goals: {}", state.goals),
        size: 22.0,
        color: colors::HUD_TEXT,
        align: TextAlign::Left,
    });

    let banner = match state.ball.state {
        BallState::Scored { .. } => Some("GOAL!"),
        BallState::Saved { .. } => Some("SAVED!"),
        BallState::Out { .. } => Some("MISS"),
        BallState::Resting | BallState::InFlight => None,
    };
    if let Some(text) = banner {
        cmds.push(DrawCommand::Text {
            pos: Vec2::new(state.field.width / 2.0, state.field.height / 2.0),
            text: text.to_string(),
            size: 48.0,
            color: colors::BANNER_TEXT,
            align: TextAlign::Center,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tuning::Field;

    fn state() -> (GameState, Tuning) {
        let tuning = Tuning::default();
        (GameState::new_match(Field::default(), &tuning), tuning)
    }

    fn sprites(cmds: &[DrawCommand]) -> Vec<Sprite> {
        cmds.iter()
            .filter_map(|c| match c {
                DrawCommand::Sprite { sprite, .. } => Some(*sprite),
                _ => None,
            })
            .collect()
    }

    fn texts(cmds: &[DrawCommand]) -> Vec<String> {
        cmds.iter()
            .filter_map(|c| match c {
                DrawCommand::Text { text, .. } => Some(text.clone()),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn test_falls_back_to_primitives_without_images() {
        let (state, tuning) = state();
        let cmds = build_scene(&state, &tuning, &AssetStatus::default());
        assert!(sprites(&cmds).is_empty());
        assert!(cmds.contains(&DrawCommand::FillRect {
            min: state.keeper.pos,
            size: state.keeper.size,
            color: colors::KEEPER,
        }));
        assert!(cmds.contains(&DrawCommand::FillCircle {
            center: state.ball.pos,
            radius: state.ball.radius,
            color: colors::BALL,
        }));
    }

    #[test]
    fn test_uses_sprites_once_loaded() {
        let (state, tuning) = state();
        let cmds = build_scene(&state, &tuning, &AssetStatus::all_loaded());
        assert_eq!(sprites(&cmds), vec![Sprite::Goal, Sprite::Keeper, Sprite::Ball]);

        let partial = AssetStatus {
            keeper: true,
            ..AssetStatus::default()
        };
        let cmds = build_scene(&state, &tuning, &partial);
        assert_eq!(sprites(&cmds), vec![Sprite::Keeper]);
    }

    #[test]
    fn test_hud_shows_shots_and_goals() {
        let (mut state, tuning) = state();
        state.shots = 2;
        state.goals = 1;
        let cmds = build_scene(&state, &tuning, &AssetStatus::default());
        let texts = texts(&cmds);
        assert!(texts.contains(&"Shots: 2 / 5".to_string()));
        assert!(texts.contains(&"Goals: 1".to_string()));
    }

    #[test]
    fn test_dragging_offsets_ball_and_shows_meter() {
        let (mut state, tuning) = state();
        let idle = build_scene(&state, &tuning, &AssetStatus::default());

        state.gesture = Gesture::Dragging;
        state.ball.pull = 100.0;
        let dragging = build_scene(&state, &tuning, &AssetStatus::default());

        let pulled = state.ball.rest + Vec2::new(0.0, 100.0);
        assert!(dragging.iter().any(|c| matches!(
            c,
            DrawCommand::FillCircle { center, radius, .. } if *center == pulled && *radius == 24.0
        )));
        let meter_fills = |cmds: &[DrawCommand]| {
            cmds.iter()
                .filter(|c| matches!(c, DrawCommand::FillRect { color, .. } if *color == colors::METER_FILL))
                .count()
        };
        assert_eq!(meter_fills(&idle), 0);
        assert_eq!(meter_fills(&dragging), 1);
        // The resting ball itself has not moved
        assert_eq!(state.ball.pos, state.ball.rest);
    }

    #[test]
    fn test_drag_during_pending_reset_draws_ball_on_spot() {
        let (mut state, tuning) = state();
        state.ball.pos = Vec2::new(300.0, 900.0);
        state.ball.state = BallState::Saved { reset_at: 40 };
        state.gesture = Gesture::Dragging;
        state.ball.pull = 100.0;
        let cmds = build_scene(&state, &tuning, &AssetStatus::default());

        let pulled = state.ball.rest + Vec2::new(0.0, 100.0);
        assert_eq!(pulled, Vec2::new(450.0, 620.0));
        assert!(cmds.iter().any(|c| matches!(
            c,
            DrawCommand::FillCircle { center, radius, .. } if *center == pulled && *radius == 24.0
        )));
        // The aim line starts from the held ball, not the follow-through
        assert!(cmds.iter().any(|c| matches!(
            c,
            DrawCommand::Line { from, color, .. } if *from == pulled && *color == colors::AIM
        )));
        assert!(!cmds.iter().any(|c| matches!(
            c,
            DrawCommand::FillCircle { center, .. } if *center == Vec2::new(300.0, 900.0)
        )));
    }

    #[test]
    fn test_banner_after_goal() {
        let (mut state, tuning) = state();
        state.ball.state = BallState::Scored { reset_at: 10 };
        let cmds = build_scene(&state, &tuning, &AssetStatus::default());
        assert!(texts(&cmds).contains(&"GOAL!".to_string()));
    }
}
