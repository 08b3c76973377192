//! The paddle game: entities, the fixed-step simulation, and the thread that
//! runs it.

mod ball;
mod controls;
mod lose_zone;
mod paddle;
mod simulation;
mod thread;

pub use ball::Ball;
pub use controls::{ControlTracker, Controls, GameEvent};
pub use lose_zone::LoseZone;
pub use paddle::Paddle;
pub use simulation::{Simulation, Snapshot};
pub use thread::SimulationHandle;
