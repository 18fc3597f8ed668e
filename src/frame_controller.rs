use glam::Vec2;
use wgpu::wgt::PollType::WaitForSubmissionIndex;
use wgpu_profiler::{GpuProfiler, GpuProfilerSettings};

use crate::error::FatalInitError;
use crate::force_field::ForceField;
use crate::particles::particle_drawer::ParticleDrawer;
use crate::particles::particle_store::{ParticleStore, SeedPolicy};
use crate::particles::physics_kernel::{
    PhysicsKernel, SLOT_MASSES, SLOT_POSITIONS, SLOT_VELOCITIES,
};
use crate::render_timer::RenderTimer;
use crate::wgpu_context::WgpuContext;

/// Longest timestep handed to the kernel; keeps the simulation stable across
/// window drags and debugger pauses.
const MAX_DELTA_TIME: f32 = 0.1;

/// Orchestrates one frame: rasterizer barrier, compute acquire, kernel
/// dispatch, compute release, clear, draw, present. Errors during setup are
/// fatal; the frame path itself has a single branch-free sequence.
pub struct FrameController {
    store: ParticleStore,
    kernel: PhysicsKernel,
    drawer: Option<ParticleDrawer>,
    force_field: ForceField,
    profiler: GpuProfiler,
    render_timer: RenderTimer,
    frame_num: u64,
    last_draw_submission: Option<wgpu::SubmissionIndex>,
}

impl FrameController {
    pub fn new(
        wgpu_context: &WgpuContext,
        count: usize,
        policy: SeedPolicy,
        viewport: Vec2,
        drawer: Option<ParticleDrawer>,
    ) -> Result<Self, FatalInitError> {
        let columns = ParticleStore::initialize(count, &policy);
        let store = ParticleStore::upload(wgpu_context, columns)?;

        let mut kernel = PhysicsKernel::load(wgpu_context)?;
        kernel.bind(SLOT_POSITIONS, store.positions().handle().buffer());
        kernel.bind(SLOT_VELOCITIES, store.velocities().buffer());
        kernel.bind(SLOT_MASSES, store.masses().buffer());

        let profiler = GpuProfiler::new(wgpu_context.get_device(), GpuProfilerSettings::default())
            .expect("failed to create GPU profiler");

        log::info!("simulating {count} particles");

        Ok(Self {
            store,
            kernel,
            drawer,
            force_field: ForceField::new(viewport.x, viewport.y),
            profiler,
            render_timer: RenderTimer::new(),
            frame_num: 0,
            last_draw_submission: None,
        })
    }

    /// A controller without a drawer or surface, for tests that only
    /// exercise the compute half of the frame.
    pub fn new_headless(
        wgpu_context: &WgpuContext,
        count: usize,
        policy: SeedPolicy,
    ) -> Result<Self, FatalInitError> {
        Self::new(wgpu_context, count, policy, Vec2::new(800.0, 600.0), None)
    }

    /// Runs the compute half of the frame: waits out the previous draw,
    /// snapshots the force field, and dispatches the kernel inside the
    /// ownership bracket. When this returns the rasterizer may read the
    /// shared buffer again.
    pub fn step_physics(&mut self, wgpu_context: &WgpuContext, delta_time: f32) {
        let device = wgpu_context.get_device();

        // The compute side must never observe a partially drawn frame.
        if let Some(idx) = self.last_draw_submission.take() {
            device
                .poll(WaitForSubmissionIndex(idx))
                .expect("device lost while waiting for the rasterizer");
        }

        let params = self
            .force_field
            .snapshot(self.store.count(), delta_time.min(MAX_DELTA_TIME));
        self.kernel.set_field(wgpu_context, &params);

        let access = self.store.positions_mut().begin_compute_access();

        let mut encoder = device.create_command_encoder(&wgpu::CommandEncoderDescriptor {
            label: Some("Compute Encoder"),
        });
        {
            let mut scope = self.profiler.scope("particle physics", &mut encoder);
            self.kernel
                .dispatch(wgpu_context, &access, &mut scope, self.store.count());
        }
        self.profiler.resolve_queries(&mut encoder);

        let idx = wgpu_context
            .get_queue()
            .submit(std::iter::once(encoder.finish()));
        device
            .poll(WaitForSubmissionIndex(idx))
            .expect("device lost while waiting for the physics kernel");

        // Everything submitted inside the bracket has completed; hand the
        // buffer back.
        self.store.positions_mut().end_compute_access(access);
    }

    /// Draws the current particle state and presents it.
    pub fn render(&mut self, wgpu_context: &WgpuContext) -> Result<(), wgpu::SurfaceError> {
        wgpu_context.get_window().request_redraw();

        if !wgpu_context.is_surface_configured() {
            return Ok(());
        }

        let output = wgpu_context.get_surface().get_current_texture()?;
        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let mut encoder =
            wgpu_context
                .get_device()
                .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                    label: Some("Render Encoder"),
                });
        {
            let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Particle Render Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    depth_slice: None,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color::BLACK),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: None,
                occlusion_query_set: None,
                timestamp_writes: None,
            });

            if let Some(drawer) = &self.drawer {
                drawer.draw(
                    &mut render_pass,
                    self.store.positions().graphics_view().buffer(),
                    self.store.colors().buffer(),
                    self.store.count(),
                );
            }
        }

        let idx = wgpu_context
            .get_queue()
            .submit(std::iter::once(encoder.finish()));
        self.last_draw_submission = Some(idx);
        output.present();
        self.frame_num += 1;

        Ok(())
    }

    /// One full frame: physics then draw.
    pub fn render_frame(&mut self, wgpu_context: &WgpuContext) -> Result<(), wgpu::SurfaceError> {
        let delta_time = self.render_timer.get_delta().as_secs_f32();
        self.step_physics(wgpu_context, delta_time);
        self.render(wgpu_context)
    }

    /// Updates the pointer-mapping denominators. Takes effect on the next
    /// pointer event.
    pub fn reshape(&mut self, width: u32, height: u32) {
        self.force_field.reshape(width as f32, height as f32);
    }

    pub fn force_field_mut(&mut self) -> &mut ForceField {
        &mut self.force_field
    }

    pub fn store(&self) -> &ParticleStore {
        &self.store
    }

    pub fn frame_num(&self) -> u64 {
        self.frame_num
    }
}
