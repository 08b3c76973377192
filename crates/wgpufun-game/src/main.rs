mod app;
mod game;

use anyhow::Result;

use wgpufun_engine::device::GpuInit;
use wgpufun_engine::logging::{init_logging, LoggingConfig};
use wgpufun_engine::window::{Runtime, RuntimeConfig};

use crate::app::GameApp;
use crate::game::{Simulation, SimulationHandle};

fn main() -> Result<()> {
    init_logging(LoggingConfig::default());

    let sim = SimulationHandle::spawn(Simulation::new())?;
    log::info!("starting; steer with Left/Right or A/D, Space resets, Escape quits");

    Runtime::run(RuntimeConfig::default(), GpuInit::default(), GameApp::new(sim))
}
