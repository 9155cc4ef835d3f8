//! Collision detection between the round ball and the boxy keeper

use glam::Vec2;

/// Result of a collision check
#[derive(Debug, Clone)]
pub struct CollisionResult {
    /// Whether a collision occurred
    pub hit: bool,
    /// Surface normal at the contact (pointing toward the ball centre)
    pub normal: Vec2,
    /// Distance to move the ball along `normal` to clear the rectangle
    pub penetration: f32,
}

impl CollisionResult {
    pub fn miss() -> Self {
        Self {
            hit: false,
            normal: Vec2::ZERO,
            penetration: 0.0,
        }
    }
}

/// Check a circle against an axis-aligned rectangle given by its min/max corners
///
/// Touching counts as a hit: a circle whose edge lies exactly on a corner
/// collides.
pub fn circle_rect_collision(center: Vec2, radius: f32, min: Vec2, max: Vec2) -> CollisionResult {
    let closest = center.clamp(min, max);
    let offset = center - closest;
    let dist_sq = offset.length_squared();

    if dist_sq > radius * radius {
        return CollisionResult::miss();
    }

    let dist = dist_sq.sqrt();
    if dist > f32::EPSILON {
        return CollisionResult {
            hit: true,
            normal: offset / dist,
            penetration: radius - dist,
        };
    }

    // Centre inside the box: push out through the nearest face
    let to_min = center - min;
    let to_max = max - center;
    let faces = [
        (to_min.x, Vec2::NEG_X),
        (to_max.x, Vec2::X),
        (to_min.y, Vec2::NEG_Y),
        (to_max.y, Vec2::Y),
    ];
    let (depth, normal) = faces
        .iter()
        .copied()
        .min_by(|a, b| a.0.partial_cmp(&b.0).unwrap_or(std::cmp::Ordering::Equal))
        .unwrap_or((0.0, Vec2::Y));

    CollisionResult {
        hit: true,
        normal,
        penetration: radius + depth,
    }
}

/// Boolean overlap test
#[inline]
pub fn circle_rect_overlap(center: Vec2, radius: f32, min: Vec2, max: Vec2) -> bool {
    circle_rect_collision(center, radius, min, max).hit
}
