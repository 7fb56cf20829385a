use bytemuck::{Pod, Zeroable};
use glam::Mat4;

use crate::batch::{DrawSubmission, MaterialRef};
use crate::mesh::MeshVertex;

use super::{pack_primitive_params, GpuPrimitiveParams, RenderCtx, RenderTarget};

/// Draws panel batches with the rounded-rect SDF program.
///
/// GPU resources are created lazily on the first draw and grown on demand; the
/// pipeline is recreated when the surface format changes.
///
/// Buffers are written through the queue, so one renderer serves one batch per
/// frame; draw several batches with several renderers.
pub struct PanelRenderer {
    pipeline_format: Option<wgpu::TextureFormat>,
    pipeline: Option<wgpu::RenderPipeline>,

    bind_group_layout: Option<wgpu::BindGroupLayout>,
    bind_group: Option<wgpu::BindGroup>,
    scene_ubo: Option<wgpu::Buffer>,

    params_sbo: Option<wgpu::Buffer>,
    params_capacity: usize,
    params_uploaded: Option<(u64, usize)>,

    vbo: Option<wgpu::Buffer>,
    vbo_capacity: usize,
    ibo: Option<wgpu::Buffer>,
    ibo_capacity: usize,

    /// Draws whose layer mask shares no bit with this are ignored.
    visible_layers: u32,
    warned_material: bool,
}

impl Default for PanelRenderer {
    fn default() -> Self {
        Self {
            pipeline_format: None,
            pipeline: None,
            bind_group_layout: None,
            bind_group: None,
            scene_ubo: None,
            params_sbo: None,
            params_capacity: 0,
            params_uploaded: None,
            vbo: None,
            vbo_capacity: 0,
            ibo: None,
            ibo_capacity: 0,
            visible_layers: u32::MAX,
            warned_material: false,
        }
    }
}

impl PanelRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_visible_layers(mut self, layers: u32) -> Self {
        self.visible_layers = layers;
        self
    }

    /// Whether a draw tagged with `layer_mask` is visible to this renderer.
    #[inline]
    pub fn accepts_layer(&self, layer_mask: u32) -> bool {
        layer_mask & self.visible_layers != 0
    }

    /// Records one draw call for `draw` into `target`.
    pub fn draw(
        &mut self,
        ctx: &RenderCtx<'_>,
        target: &mut RenderTarget<'_>,
        view_projection: Mat4,
        draw: &DrawSubmission<'_>,
    ) {
        if !self.accepts_layer(draw.layer_mask) || draw.mesh.is_empty() {
            return;
        }
        if draw.material != MaterialRef::SDF_PANEL && !self.warned_material {
            log::warn!("PanelRenderer: unknown material {:?}, drawing with the SDF panel program", draw.material);
            self.warned_material = true;
        }

        let primitives = draw.mesh.primitive_count();

        self.ensure_pipeline(ctx);
        self.ensure_mesh_capacity(ctx, draw.mesh.vertex_count(), draw.mesh.index_count());
        self.ensure_params_capacity(ctx, primitives);
        self.ensure_bindings(ctx);

        self.write_scene_uniform(ctx, view_projection * draw.transform);
        self.write_params(ctx, draw, primitives);

        let Some(vbo) = self.vbo.as_ref() else { return; };
        let Some(ibo) = self.ibo.as_ref() else { return; };
        ctx.queue.write_buffer(vbo, 0, draw.mesh.vertex_bytes());
        ctx.queue.write_buffer(ibo, 0, draw.mesh.index_bytes());

        let Some(pipeline)   = self.pipeline.as_ref()   else { return; };
        let Some(bind_group) = self.bind_group.as_ref() else { return; };

        let mut rpass = target.encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("tensha panel pass"),
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
        });

        rpass.set_pipeline(pipeline);
        rpass.set_bind_group(0, bind_group, &[]);
        rpass.set_vertex_buffer(0, vbo.slice(..draw.mesh.vertex_bytes().len() as u64));
        rpass.set_index_buffer(ibo.slice(..draw.mesh.index_bytes().len() as u64), wgpu::IndexFormat::Uint32);
        rpass.draw_indexed(0..draw.mesh.index_count() as u32, 0, 0..1);
    }

    // ── private helpers ────────────────────────────────────────────────────

    fn ensure_pipeline(&mut self, ctx: &RenderCtx<'_>) {
        if self.pipeline_format == Some(ctx.surface_format) && self.pipeline.is_some() {
            return;
        }

        let shader = ctx.device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("tensha panel shader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("shaders/panel.wgsl").into()),
        });

        let bind_group_layout = ctx.device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("tensha panel bgl"),
            entries: &[
                wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::VERTEX,
                    ty: wgpu::BindingType::Buffer {
                        ty: wgpu::BufferBindingType::Uniform,
                        has_dynamic_offset: false,
                        min_binding_size: wgpu::BufferSize::new(std::mem::size_of::<SceneUniform>() as u64),
                    },
                    count: None,
                },
                wgpu::BindGroupLayoutEntry {
                    binding: 1,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Buffer {
                        ty: wgpu::BufferBindingType::Storage { read_only: true },
                        has_dynamic_offset: false,
                        min_binding_size: wgpu::BufferSize::new(std::mem::size_of::<GpuPrimitiveParams>() as u64),
                    },
                    count: None,
                },
            ],
        });

        let pipeline_layout = ctx.device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("tensha panel pipeline layout"),
            bind_group_layouts: &[&bind_group_layout],
            immediate_size: 0,
        });

        let pipeline = ctx.device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("tensha panel pipeline"),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some("vs_main"),
                compilation_options: Default::default(),
                buffers: &[MeshVertex::layout()],
            },
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: Some("fs_main"),
                compilation_options: Default::default(),
                targets: &[Some(wgpu::ColorTargetState {
                    format: ctx.surface_format,
                    blend: Some(premul_alpha_blend()),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
            }),
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                strip_index_format: None,
                // QUAD_INDEX_PATTERN winds clockwise in world space.
                front_face: wgpu::FrontFace::Cw,
                cull_mode: None,
                polygon_mode: wgpu::PolygonMode::Fill,
                unclipped_depth: false,
                conservative: false,
            },
            depth_stencil: None,
            multisample: wgpu::MultisampleState::default(),
            multiview_mask: None,
            cache: None,
        });

        self.pipeline_format = Some(ctx.surface_format);
        self.pipeline = Some(pipeline);
        self.bind_group_layout = Some(bind_group_layout);
        self.bind_group = None;
    }

    fn ensure_bindings(&mut self, ctx: &RenderCtx<'_>) {
        if self.scene_ubo.is_none() {
            self.scene_ubo = Some(ctx.device.create_buffer(&wgpu::BufferDescriptor {
                label: Some("tensha panel scene ubo"),
                size: std::mem::size_of::<SceneUniform>() as u64,
                usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
                mapped_at_creation: false,
            }));
            self.bind_group = None;
        }
        if self.bind_group.is_some() {
            return;
        }

        let Some(bgl) = self.bind_group_layout.as_ref() else { return; };
        let Some(ubo) = self.scene_ubo.as_ref() else { return; };
        let Some(sbo) = self.params_sbo.as_ref() else { return; };

        self.bind_group = Some(ctx.device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("tensha panel bind group"),
            layout: bgl,
            entries: &[
                wgpu::BindGroupEntry { binding: 0, resource: ubo.as_entire_binding() },
                wgpu::BindGroupEntry { binding: 1, resource: sbo.as_entire_binding() },
            ],
        }));
    }

    fn ensure_mesh_capacity(&mut self, ctx: &RenderCtx<'_>, vertices: usize, indices: usize) {
        if vertices > self.vbo_capacity || self.vbo.is_none() {
            let cap = vertices.next_power_of_two().max(256);
            self.vbo = Some(ctx.device.create_buffer(&wgpu::BufferDescriptor {
                label: Some("tensha panel vbo"),
                size: (cap * std::mem::size_of::<MeshVertex>()) as u64,
                usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
                mapped_at_creation: false,
            }));
            self.vbo_capacity = cap;
        }
        if indices > self.ibo_capacity || self.ibo.is_none() {
            let cap = indices.next_power_of_two().max(384);
            self.ibo = Some(ctx.device.create_buffer(&wgpu::BufferDescriptor {
                label: Some("tensha panel ibo"),
                size: (cap * std::mem::size_of::<u32>()) as u64,
                usage: wgpu::BufferUsages::INDEX | wgpu::BufferUsages::COPY_DST,
                mapped_at_creation: false,
            }));
            self.ibo_capacity = cap;
        }
    }

    fn ensure_params_capacity(&mut self, ctx: &RenderCtx<'_>, required: usize) {
        if required <= self.params_capacity && self.params_sbo.is_some() {
            return;
        }
        let new_cap = required.next_power_of_two().max(64);
        self.params_sbo = Some(ctx.device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("tensha panel params sbo"),
            size: (new_cap * std::mem::size_of::<GpuPrimitiveParams>()) as u64,
            usage: wgpu::BufferUsages::STORAGE | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        }));
        self.params_capacity = new_cap;
        self.params_uploaded = None;
        self.bind_group = None;
    }

    fn write_scene_uniform(&mut self, ctx: &RenderCtx<'_>, clip_from_local: Mat4) {
        let Some(ubo) = self.scene_ubo.as_ref() else { return; };
        let uniform = SceneUniform { clip_from_local: clip_from_local.to_cols_array_2d() };
        ctx.queue.write_buffer(ubo, 0, bytemuck::bytes_of(&uniform));
    }

    fn write_params(&mut self, ctx: &RenderCtx<'_>, draw: &DrawSubmission<'_>, primitives: usize) {
        let key = (draw.properties.revision(), primitives);
        if self.params_uploaded == Some(key) {
            return;
        }
        let Some(sbo) = self.params_sbo.as_ref() else { return; };

        let packed = pack_primitive_params(draw.properties, primitives);
        ctx.queue.write_buffer(sbo, 0, bytemuck::cast_slice(&packed));
        self.params_uploaded = Some(key);
        log::trace!("uploaded {primitives} panel parameter blocks");
    }
}

// ── blend state ───────────────────────────────────────────────────────────

fn premul_alpha_blend() -> wgpu::BlendState {
    wgpu::BlendState {
        color: wgpu::BlendComponent {
            src_factor: wgpu::BlendFactor::One,
            dst_factor: wgpu::BlendFactor::OneMinusSrcAlpha,
            operation: wgpu::BlendOperation::Add,
        },
        alpha: wgpu::BlendComponent {
            src_factor: wgpu::BlendFactor::One,
            dst_factor: wgpu::BlendFactor::OneMinusSrcAlpha,
            operation: wgpu::BlendOperation::Add,
        },
    }
}

// ── GPU types ─────────────────────────────────────────────────────────────

#[repr(C)]
#[derive(Debug, Copy, Clone, Pod, Zeroable)]
struct SceneUniform {
    clip_from_local: [[f32; 4]; 4],
}
