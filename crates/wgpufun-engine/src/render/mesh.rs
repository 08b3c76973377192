use bytemuck::{Pod, Zeroable};

use crate::mesh::{MeshBuilder, Vertex};
use crate::render::{RenderCtx, RenderTarget};

use super::{load_pass, triangle_list_primitive};

const MIN_VERTEX_CAPACITY: usize = 64;
const MIN_INDEX_CAPACITY: usize = 256;

/// Camera uniform consumed by `mesh.wgsl`.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub struct CameraUniform {
    /// World x at the screen center.
    pub x: f32,
    /// Viewport height / width.
    pub aspect: f32,
    pub _pad: [f32; 2], // 16-byte alignment
}

impl CameraUniform {
    pub fn new(x: f32, aspect: f32) -> Self {
        Self {
            x,
            aspect,
            _pad: [0.0; 2],
        }
    }

    /// CPU mirror of the vertex shader's world → clip transform.
    pub fn to_clip(&self, position: [f32; 2]) -> [f32; 2] {
        [(position[0] - self.x) * self.aspect, position[1]]
    }
}

/// Draws a `MeshBuilder` of colored world-space triangles.
///
/// Vertex and index buffers are reused across frames and only reallocated
/// when a mesh outgrows them.
#[derive(Default)]
pub struct MeshRenderer {
    pipeline_format: Option<wgpu::TextureFormat>,
    pipeline: Option<wgpu::RenderPipeline>,

    bind_group_layout: Option<wgpu::BindGroupLayout>,
    bind_group: Option<wgpu::BindGroup>,
    camera_ubo: Option<wgpu::Buffer>,

    vbo: Option<wgpu::Buffer>,
    vertex_capacity: usize,
    ibo: Option<wgpu::Buffer>,
    index_capacity: usize,

    /// Scratch copy of the indices, padded to the copy alignment.
    index_scratch: Vec<u16>,
}

impl MeshRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Renders `mesh` as seen from a camera centered on `camera_x`.
    ///
    /// Empty meshes record nothing.
    pub fn render(
        &mut self,
        ctx: &RenderCtx<'_>,
        target: &mut RenderTarget<'_>,
        mesh: &MeshBuilder,
        camera_x: f32,
    ) {
        if mesh.is_empty() {
            return;
        }

        self.ensure_pipeline(ctx);
        self.ensure_bindings(ctx);
        self.ensure_capacity(ctx, mesh.vertices().len(), mesh.indices().len());

        // Mutating methods must happen before borrowing pipeline/buffers immutably.
        self.write_camera_uniform(ctx, camera_x);
        pad_indices(mesh.indices(), &mut self.index_scratch);

        let Some(vbo) = self.vbo.as_ref() else { return };
        let Some(ibo) = self.ibo.as_ref() else { return };
        ctx.queue.write_buffer(vbo, 0, bytemuck::cast_slice(mesh.vertices()));
        ctx.queue.write_buffer(ibo, 0, bytemuck::cast_slice(&self.index_scratch));

        let Some(pipeline) = self.pipeline.as_ref() else { return };
        let Some(bind_group) = self.bind_group.as_ref() else { return };

        let mut rpass = load_pass(target, "wgpufun mesh pass");
        rpass.set_pipeline(pipeline);
        rpass.set_bind_group(0, bind_group, &[]);
        rpass.set_vertex_buffer(0, vbo.slice(..));
        rpass.set_index_buffer(ibo.slice(..), wgpu::IndexFormat::Uint16);
        rpass.draw_indexed(0..mesh.index_count(), 0, 0..1);
    }

    fn ensure_pipeline(&mut self, ctx: &RenderCtx<'_>) {
        if self.pipeline_format == Some(ctx.surface_format) && self.pipeline.is_some() {
            return;
        }

        log::debug!("building mesh pipeline for {:?}", ctx.surface_format);

        let shader = ctx.device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("wgpufun mesh shader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("shaders/mesh.wgsl").into()),
        });

        let bind_group_layout =
            ctx.device
                .create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                    label: Some("wgpufun mesh bgl"),
                    entries: &[wgpu::BindGroupLayoutEntry {
                        binding: 0,
                        visibility: wgpu::ShaderStages::VERTEX,
                        ty: wgpu::BindingType::Buffer {
                            ty: wgpu::BufferBindingType::Uniform,
                            has_dynamic_offset: false,
                            min_binding_size: wgpu::BufferSize::new(
                                std::mem::size_of::<CameraUniform>() as u64,
                            ),
                        },
                        count: None,
                    }],
                });

        let pipeline_layout =
            ctx.device
                .create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
                    label: Some("wgpufun mesh pipeline layout"),
                    bind_group_layouts: &[&bind_group_layout],
                    immediate_size: 0,
                });

        let pipeline = ctx.device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("wgpufun mesh pipeline"),
            layout: Some(&pipeline_layout),

            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some("vs_main"),
                compilation_options: Default::default(),
                buffers: &[Vertex::layout()],
            },

            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: Some("fs_main"),
                compilation_options: Default::default(),
                targets: &[Some(wgpu::ColorTargetState {
                    format: ctx.surface_format,
                    blend: Some(wgpu::BlendState::REPLACE),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
            }),

            primitive: triangle_list_primitive(),
            depth_stencil: None,
            multisample: wgpu::MultisampleState::default(),
            multiview_mask: None,
            cache: None,
        });

        self.pipeline_format = Some(ctx.surface_format);
        self.pipeline = Some(pipeline);
        self.bind_group_layout = Some(bind_group_layout);

        // Bindings belong to the old layout.
        self.bind_group = None;
        self.camera_ubo = None;
    }

    fn ensure_bindings(&mut self, ctx: &RenderCtx<'_>) {
        if self.bind_group.is_some() && self.camera_ubo.is_some() {
            return;
        }
        let Some(bgl) = self.bind_group_layout.as_ref() else { return };

        let camera_ubo = ctx.device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("wgpufun camera ubo"),
            size: std::mem::size_of::<CameraUniform>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let bind_group = ctx.device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("wgpufun mesh bind group"),
            layout: bgl,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: camera_ubo.as_entire_binding(),
            }],
        });

        self.camera_ubo = Some(camera_ubo);
        self.bind_group = Some(bind_group);
    }

    fn ensure_capacity(&mut self, ctx: &RenderCtx<'_>, vertices: usize, indices: usize) {
        if let Some(cap) = grown_capacity(vertices, self.vertex_capacity, MIN_VERTEX_CAPACITY) {
            log::debug!("mesh vertex buffer -> {cap} vertices");
            self.vbo = Some(ctx.device.create_buffer(&wgpu::BufferDescriptor {
                label: Some("wgpufun mesh vbo"),
                size: (cap * std::mem::size_of::<Vertex>()) as u64,
                usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
                mapped_at_creation: false,
            }));
            self.vertex_capacity = cap;
        }

        if let Some(cap) = grown_capacity(indices, self.index_capacity, MIN_INDEX_CAPACITY) {
            log::debug!("mesh index buffer -> {cap} indices");
            self.ibo = Some(ctx.device.create_buffer(&wgpu::BufferDescriptor {
                label: Some("wgpufun mesh ibo"),
                size: (cap * std::mem::size_of::<u16>()) as u64,
                usage: wgpu::BufferUsages::INDEX | wgpu::BufferUsages::COPY_DST,
                mapped_at_creation: false,
            }));
            self.index_capacity = cap;
        }
    }

    fn write_camera_uniform(&mut self, ctx: &RenderCtx<'_>, camera_x: f32) {
        let Some(ubo) = self.camera_ubo.as_ref() else { return };
        let u = CameraUniform::new(camera_x, ctx.aspect_ratio());
        ctx.queue.write_buffer(ubo, 0, bytemuck::bytes_of(&u));
    }
}

/// New capacity when `required` no longer fits in `current`, else `None`.
///
/// Capacities are powers of two, never below `min`.
fn grown_capacity(required: usize, current: usize, min: usize) -> Option<usize> {
    if required <= current {
        return None;
    }
    Some(required.next_power_of_two().max(min))
}

/// Copies `indices` into `out`, appending a zero when needed so the byte
/// length is a multiple of `wgpu::COPY_BUFFER_ALIGNMENT`.
fn pad_indices(indices: &[u16], out: &mut Vec<u16>) {
    out.clear();
    out.extend_from_slice(indices);
    if out.len() % 2 == 1 {
        out.push(0);
    }
}
