//! Coordinate and geometry types shared by renderers and game logic.
//!
//! World space matches clip space on the Y axis:
//! - +X right, +Y up
//! - y in [-1, 1] spans the screen height
//! - X is shifted by the camera and scaled by the aspect ratio in the shader

pub mod collision;
mod color;
mod vec2;
mod viewport;

pub use color::ColorRgba;
pub use vec2::Vec2;
pub use viewport::Viewport;
