//! Opens a window and draws the hard-coded triangle program.

use anyhow::Result;

use wgpufun_engine::coords::ColorRgba;
use wgpufun_engine::core::{App, AppControl, FrameCtx};
use wgpufun_engine::device::GpuInit;
use wgpufun_engine::input::Key;
use wgpufun_engine::logging::{init_logging, LoggingConfig};
use wgpufun_engine::render::TriangleRenderer;
use wgpufun_engine::window::{Runtime, RuntimeConfig};

#[derive(Default)]
struct TriangleApp {
    renderer: TriangleRenderer,
}

impl App for TriangleApp {
    fn on_frame(&mut self, ctx: &mut FrameCtx<'_, '_>) -> AppControl {
        if ctx.input_frame.pressed(Key::Escape) {
            return AppControl::Exit;
        }

        let renderer = &mut self.renderer;
        ctx.render(ColorRgba::black(), |rctx, target| renderer.render(rctx, target))
    }
}

fn main() -> Result<()> {
    init_logging(LoggingConfig::default());

    let config = RuntimeConfig {
        title: "WGPU fun: triangle".to_string(),
        ..RuntimeConfig::default()
    };

    Runtime::run(config, GpuInit::default(), TriangleApp::default())
}
