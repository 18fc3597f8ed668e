use glam::Vec2;

use crate::error::FatalInitError;
use crate::gpu_buffer::GpuBuffer;
use crate::texture::SpriteTexture;
use crate::wgpu_context::WgpuContext;

/// Draws the shared position/color buffers as additively blended, textured
/// point sprites. The particle buffers themselves are fed in per draw call so
/// the drawer never holds a second handle to the shared memory.
pub struct ParticleDrawer {
    render_pipeline: wgpu::RenderPipeline,
    sprite: SpriteTexture,
    vertices: GpuBuffer<Vec2>,
    indices: GpuBuffer<u32>,
}

impl ParticleDrawer {
    pub fn new(wgpu_context: &WgpuContext, sprite: SpriteTexture) -> Result<Self, FatalInitError> {
        let shader = wgpu_context
            .get_device()
            .create_shader_module(wgpu::include_wgsl!("particle_drawer.wgsl"));
        let render_pipeline_layout =
            wgpu_context
                .get_device()
                .create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
                    label: Some("Particle Render Pipeline Layout"),
                    bind_group_layouts: &[sprite.bind_group_layout()],
                    push_constant_ranges: &[],
                });

        // Additive blending: overlapping sprites sum up, like the original
        // point cloud.
        let additive = wgpu::BlendState {
            color: wgpu::BlendComponent {
                src_factor: wgpu::BlendFactor::One,
                dst_factor: wgpu::BlendFactor::One,
                operation: wgpu::BlendOperation::Add,
            },
            alpha: wgpu::BlendComponent {
                src_factor: wgpu::BlendFactor::One,
                dst_factor: wgpu::BlendFactor::One,
                operation: wgpu::BlendOperation::Add,
            },
        };

        let render_pipeline =
            wgpu_context
                .get_device()
                .create_render_pipeline(&wgpu::RenderPipelineDescriptor {
                    label: Some("Particle Render Pipeline"),
                    layout: Some(&render_pipeline_layout),
                    vertex: wgpu::VertexState {
                        module: &shader,
                        entry_point: Some("vs_main"),
                        buffers: &[
                            // Per-instance: particle position from the shared buffer
                            wgpu::VertexBufferLayout {
                                array_stride: std::mem::size_of::<Vec2>() as wgpu::BufferAddress,
                                step_mode: wgpu::VertexStepMode::Instance,
                                attributes: &wgpu::vertex_attr_array![0 => Float32x2],
                            },
                            // Per-instance: particle color
                            wgpu::VertexBufferLayout {
                                array_stride: std::mem::size_of::<glam::Vec3>()
                                    as wgpu::BufferAddress,
                                step_mode: wgpu::VertexStepMode::Instance,
                                attributes: &wgpu::vertex_attr_array![1 => Float32x3],
                            },
                            // Per-vertex: quad corner
                            wgpu::VertexBufferLayout {
                                array_stride: std::mem::size_of::<Vec2>() as wgpu::BufferAddress,
                                step_mode: wgpu::VertexStepMode::Vertex,
                                attributes: &wgpu::vertex_attr_array![2 => Float32x2],
                            },
                        ],
                        compilation_options: wgpu::PipelineCompilationOptions::default(),
                    },
                    fragment: Some(wgpu::FragmentState {
                        module: &shader,
                        entry_point: Some("fs_main"),
                        targets: &[Some(wgpu::ColorTargetState {
                            format: wgpu_context.get_surface_config().format,
                            blend: Some(additive),
                            write_mask: wgpu::ColorWrites::ALL,
                        })],
                        compilation_options: wgpu::PipelineCompilationOptions::default(),
                    }),
                    primitive: wgpu::PrimitiveState {
                        topology: wgpu::PrimitiveTopology::TriangleList,
                        strip_index_format: None,
                        front_face: wgpu::FrontFace::Ccw,
                        cull_mode: None,
                        polygon_mode: wgpu::PolygonMode::Fill,
                        unclipped_depth: false,
                        conservative: false,
                    },
                    depth_stencil: None,
                    multisample: wgpu::MultisampleState {
                        count: 1,
                        mask: !0,
                        alpha_to_coverage_enabled: false,
                    },
                    multiview: None,
                    cache: None,
                });

        let vertices = Self::create_quad_vertices(wgpu_context)?;
        let indices = Self::create_quad_indices(wgpu_context)?;

        Ok(Self {
            render_pipeline,
            sprite,
            vertices,
            indices,
        })
    }

    fn create_quad_vertices(wgpu_context: &WgpuContext) -> Result<GpuBuffer<Vec2>, FatalInitError> {
        GpuBuffer::new(
            wgpu_context,
            vec![
                Vec2::new(-0.5, 0.5),
                Vec2::new(0.5, 0.5),
                Vec2::new(0.5, -0.5),
                Vec2::new(-0.5, -0.5),
            ],
            wgpu::BufferUsages::VERTEX,
            "Sprite Quad Vertices",
        )
    }

    fn create_quad_indices(wgpu_context: &WgpuContext) -> Result<GpuBuffer<u32>, FatalInitError> {
        GpuBuffer::new(
            wgpu_context,
            vec![0, 3, 2, 2, 1, 0],
            wgpu::BufferUsages::INDEX,
            "Sprite Quad Indices",
        )
    }

    pub fn draw(
        &self,
        render_pass: &mut wgpu::RenderPass,
        positions: &wgpu::Buffer,
        colors: &wgpu::Buffer,
        num_particles: u32,
    ) {
        render_pass.set_pipeline(&self.render_pipeline);
        render_pass.set_vertex_buffer(0, positions.slice(..));
        render_pass.set_vertex_buffer(1, colors.slice(..));
        render_pass.set_vertex_buffer(2, self.vertices.buffer().slice(..));
        render_pass.set_index_buffer(self.indices.buffer().slice(..), wgpu::IndexFormat::Uint32);
        render_pass.set_bind_group(0, self.sprite.bind_group(), &[]);
        render_pass.draw_indexed(0..self.indices.len() as u32, 0, 0..num_particles);
    }
}
