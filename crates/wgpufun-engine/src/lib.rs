//! wgpufun engine crate.
//!
//! Owns the platform + GPU runtime pieces, the triangle shader program and
//! the mesh renderer used by the game binaries.

pub mod device;
pub mod window;
pub mod input;
pub mod time;
pub mod core;

pub mod logging;
pub mod coords;
pub mod mesh;
pub mod render;
pub mod triangle;
