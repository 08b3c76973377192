//! Time subsystem.
//!
//! - `FrameClock`: one per window, ticked once per presented frame
//! - `FixedStep`: paces a fixed-rate loop (the game simulation thread)

mod fixed_step;
mod frame_clock;

pub use fixed_step::FixedStep;
pub use frame_clock::{FrameClock, FrameTime};
