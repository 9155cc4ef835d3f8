//! Spot Kick - a drag-to-shoot penalty shootout
//!
//! Core modules:
//! - `sim`: Deterministic simulation (input, shot, keeper AI, physics, outcomes)
//! - `render`: Read-only projection of game state into draw commands
//! - `session`: Fixed timestep driver owning the simulation context
//! - `tuning`: Data-driven game balance

pub mod render;
pub mod session;
pub mod sim;
pub mod tuning;

pub use session::{PointerEvent, Screen, Session};
pub use tuning::{Field, Tuning};

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (one tick per display frame at 60 Hz)
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 4;

    /// Default render surface size
    pub const DEFAULT_WIDTH: f32 = 900.0;
    pub const DEFAULT_HEIGHT: f32 = 600.0;
}

/// Clamp that tolerates an inverted range (tiny surfaces), collapsing to its midpoint
#[inline]
pub fn clamp_span(value: f32, lo: f32, hi: f32) -> f32 {
    if lo > hi {
        return (lo + hi) * 0.5;
    }
    value.clamp(lo, hi)
}

/// Euclidean distance between two points
#[inline]
pub fn distance(a: Vec2, b: Vec2) -> f32 {
    a.distance(b)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clamp_span() {
        assert_eq!(clamp_span(5.0, 0.0, 10.0), 5.0);
        assert_eq!(clamp_span(-3.0, 0.0, 10.0), 0.0);
        assert_eq!(clamp_span(42.0, 0.0, 10.0), 10.0);
        // Inverted range collapses instead of panicking
        assert_eq!(clamp_span(42.0, 10.0, 0.0), 5.0);
    }

    #[test]
    fn test_distance() {
        assert!((distance(Vec2::new(0.0, 0.0), Vec2::new(3.0, 4.0)) - 5.0).abs() < 1e-6);
    }
}
