//! GPU rendering subsystem.
//!
//! Each renderer owns its GPU resources (pipelines, buffers) and records one
//! render pass into the frame's encoder. Pipelines are created lazily and
//! rebuilt when the surface format changes.
//!
//! Convention:
//! - geometry is in world units (+Y up, y in [-1, 1] spans the screen)
//! - the frame is cleared by `core::FrameCtx::render` before renderers run

mod ctx;
mod mesh;
mod triangle;

pub use ctx::{RenderCtx, RenderTarget};
pub use mesh::{CameraUniform, MeshRenderer};
pub use triangle::TriangleRenderer;

fn load_pass<'e>(
    target: &'e mut RenderTarget<'_>,
    label: &'static str,
) -> wgpu::RenderPass<'e> {
    target.encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
        label: Some(label),
        color_attachments: &[Some(wgpu::RenderPassColorAttachment {
            view: target.color_view,
            resolve_target: None,
            ops: wgpu::Operations {
                load: wgpu::LoadOp::Load,
                store: wgpu::StoreOp::Store,
            },
            depth_slice: None,
        })],
        depth_stencil_attachment: None,
        timestamp_writes: None,
        occlusion_query_set: None,
        multiview_mask: None,
    })
}

fn triangle_list_primitive() -> wgpu::PrimitiveState {
    wgpu::PrimitiveState {
        topology: wgpu::PrimitiveTopology::TriangleList,
        strip_index_format: None,
        front_face: wgpu::FrontFace::Ccw,
        cull_mode: None,
        polygon_mode: wgpu::PolygonMode::Fill,
        unclipped_depth: false,
        conservative: false,
    }
}
