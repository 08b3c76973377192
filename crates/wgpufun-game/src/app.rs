use wgpufun_engine::coords::ColorRgba;
use wgpufun_engine::core::{App, AppControl, FrameCtx};
use wgpufun_engine::input::Key;
use wgpufun_engine::render::MeshRenderer;

use crate::game::{ControlTracker, GameEvent, SimulationHandle};

const LEFT_KEYS: [Key; 2] = [Key::ArrowLeft, Key::A];
const RIGHT_KEYS: [Key; 2] = [Key::ArrowRight, Key::D];

/// Render-thread side of the game: forwards input to the simulation and
/// draws its latest snapshot.
pub struct GameApp {
    sim: SimulationHandle,
    controls: ControlTracker,
    renderer: MeshRenderer,
}

impl GameApp {
    pub fn new(sim: SimulationHandle) -> Self {
        Self {
            sim,
            controls: ControlTracker::default(),
            renderer: MeshRenderer::new(),
        }
    }
}

impl App for GameApp {
    fn on_frame(&mut self, ctx: &mut FrameCtx<'_, '_>) -> AppControl {
        if ctx.input_frame.pressed(Key::Escape) {
            log::info!("escape pressed; exiting");
            return AppControl::Exit;
        }

        let left = ctx.input.any_down(&LEFT_KEYS);
        let right = ctx.input.any_down(&RIGHT_KEYS);
        for event in self.controls.update(left, right) {
            self.sim.send(event);
        }

        if ctx.input_frame.pressed(Key::Space) {
            self.sim.send(GameEvent::Reset);
        }

        if ctx.time.frame_index % 600 == 0 {
            log::debug!("frame {} ({:.2} ms)", ctx.time.frame_index, ctx.time.dt * 1000.0);
        }

        let snapshot = self.sim.latest();
        let renderer = &mut self.renderer;
        ctx.render(ColorRgba::black(), |rctx, target| {
            renderer.render(rctx, target, &snapshot.mesh, snapshot.camera_x);
        })
    }
}
