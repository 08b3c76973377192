use std::sync::{Arc, Mutex, PoisonError};
use std::thread::JoinHandle;
use std::time::Duration;

use anyhow::{Context, Result};
use crossbeam_channel::{Receiver, Sender, TryRecvError};

use wgpufun_engine::time::FixedStep;

use super::{GameEvent, Simulation, Snapshot};

/// Owns the simulation thread.
///
/// Events go in over a channel; the latest [`Snapshot`] comes back through a
/// shared slot. Dropping the handle closes the channel and joins the thread.
pub struct SimulationHandle {
    events: Option<Sender<GameEvent>>,
    snapshot: Arc<Mutex<Snapshot>>,
    join: Option<JoinHandle<()>>,
}

impl SimulationHandle {
    /// Simulation tick length.
    pub const TICK: Duration = Duration::from_millis(10);

    /// Starts ticking `sim` on a background thread.
    pub fn spawn(sim: Simulation) -> Result<Self> {
        let (tx, rx) = crossbeam_channel::unbounded();
        let snapshot = Arc::new(Mutex::new(sim.snapshot()));

        let join = std::thread::Builder::new()
            .name("simulation".into())
            .spawn({
                let snapshot = Arc::clone(&snapshot);
                move || run(sim, rx, snapshot)
            })
            .context("failed to spawn simulation thread")?;

        Ok(Self {
            events: Some(tx),
            snapshot,
            join: Some(join),
        })
    }

    /// Queues an event for the next tick.
    pub fn send(&self, event: GameEvent) {
        let Some(tx) = self.events.as_ref() else { return };
        if tx.send(event).is_err() {
            log::warn!("simulation thread is gone; dropping {event:?}");
        }
    }

    /// Copy of the most recent tick's output.
    pub fn latest(&self) -> Snapshot {
        self.snapshot
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl Drop for SimulationHandle {
    fn drop(&mut self) {
        // Disconnecting the channel is the stop signal.
        self.events = None;
        if let Some(join) = self.join.take() {
            if join.join().is_err() {
                log::error!("simulation thread panicked");
            }
        }
    }
}

fn run(mut sim: Simulation, events: Receiver<GameEvent>, snapshot: Arc<Mutex<Snapshot>>) {
    log::debug!("simulation thread started ({:?} ticks)", SimulationHandle::TICK);

    let mut rng = rand::rng();
    let mut step = FixedStep::new(SimulationHandle::TICK);
    let mut pending = Vec::new();

    loop {
        loop {
            match events.try_recv() {
                Ok(event) => pending.push(event),
                Err(TryRecvError::Empty) => break,
                Err(TryRecvError::Disconnected) => {
                    log::debug!("simulation thread stopping");
                    return;
                }
            }
        }

        sim.step(pending.drain(..), &mut rng);

        let next = sim.snapshot();
        *snapshot.lock().unwrap_or_else(PoisonError::into_inner) = next;

        step.wait();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Instant;

    #[test]
    fn ticks_until_dropped() {
        let handle = SimulationHandle::spawn(Simulation::new()).unwrap();
        let start = handle.latest();

        let deadline = Instant::now() + Duration::from_secs(5);
        while handle.latest() == start {
            assert!(Instant::now() < deadline, "simulation never ticked");
            std::thread::sleep(Duration::from_millis(5));
        }

        // Drop joins; a hang here would fail the test by timeout.
        drop(handle);
    }

    #[test]
    fn events_reach_the_simulation() {
        let handle = SimulationHandle::spawn(Simulation::new()).unwrap();
        handle.send(GameEvent::Right(wgpufun_engine::input::KeyState::Pressed));

        let deadline = Instant::now() + Duration::from_secs(5);
        while handle.latest().camera_x <= 0.0 {
            assert!(Instant::now() < deadline, "paddle never moved");
            std::thread::sleep(Duration::from_millis(5));
        }
    }
}
