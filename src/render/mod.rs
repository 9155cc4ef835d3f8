//! Rendering module
//!
//! `scene` turns game state into a flat list of draw commands; `canvas`
//! paints that list in the browser.

#[cfg(target_arch = "wasm32")]
pub mod canvas;
pub mod scene;

#[cfg(target_arch = "wasm32")]
pub use canvas::CanvasPainter;
pub use scene::{AssetStatus, Color, DrawCommand, Sprite, TextAlign, build_scene, colors};
