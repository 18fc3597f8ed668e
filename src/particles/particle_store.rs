use std::ops::Range;

use glam::{Vec2, Vec3};
use rand::Rng;

use crate::error::FatalInitError;
use crate::gpu_buffer::GpuBuffer;
use crate::interop::Interop;
use crate::wgpu_context::WgpuContext;

/// How the initial particle population is generated.
#[derive(Debug, Clone)]
pub struct SeedPolicy {
    /// Side length of the square the positions are drawn from, centered at
    /// the origin in device coordinates.
    pub spread: f32,
    pub mass_range: Range<f32>,
    pub color: Vec3,
}

impl Default for SeedPolicy {
    fn default() -> Self {
        Self {
            spread: 1.99,
            mass_range: 1.0..3.0,
            color: Vec3::new(20.0 / 255.0, 1.0, 5.0 / 255.0),
        }
    }
}

/// Host-side seed arrays, column-wise. Index `i` in every column refers to
/// the same particle. These only exist between `initialize` and `upload`.
#[derive(Debug)]
pub struct ParticleColumns {
    pub positions: Vec<Vec2>,
    pub colors: Vec<Vec3>,
    pub velocities: Vec<Vec2>,
    pub masses: Vec<f32>,
}

/// The canonical per-particle state, GPU-resident. Positions are the shared
/// buffer the compute kernel writes and the rasterizer reads, so they sit
/// behind the ownership bracket; colors are only ever read by the rasterizer,
/// velocities and masses only ever touched by the kernel.
pub struct ParticleStore {
    positions: Interop<GpuBuffer<Vec2>>,
    colors: GpuBuffer<Vec3>,
    velocities: GpuBuffer<Vec2>,
    masses: GpuBuffer<f32>,
    count: u32,
}

impl ParticleStore {
    /// Generates the seed columns: positions uniform in the policy square,
    /// velocities zero, masses uniform in the policy range, colors a fixed
    /// tint.
    pub fn initialize(count: usize, policy: &SeedPolicy) -> ParticleColumns {
        let mut rng = rand::rng();
        let half = policy.spread / 2.0;

        let mut positions = Vec::with_capacity(count);
        let mut masses = Vec::with_capacity(count);
        for _ in 0..count {
            positions.push(Vec2::new(
                rng.random_range(-half..=half),
                rng.random_range(-half..=half),
            ));
            masses.push(rng.random_range(policy.mass_range.start..policy.mass_range.end));
        }

        ParticleColumns {
            positions,
            colors: vec![policy.color; count],
            velocities: vec![Vec2::ZERO; count],
            masses,
        }
    }

    /// Transfers the columns to device memory, consuming (and thereby
    /// freeing) the host arrays. The position buffer doubles as a vertex
    /// buffer for the rasterizer and a storage buffer for the kernel, and is
    /// registered for shared access, graphics-owned.
    pub fn upload(
        wgpu_context: &WgpuContext,
        columns: ParticleColumns,
    ) -> Result<Self, FatalInitError> {
        let count = columns.positions.len() as u32;

        let positions = GpuBuffer::new(
            wgpu_context,
            columns.positions,
            wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::STORAGE,
            "Particle Positions",
        )?;
        let colors = GpuBuffer::new(
            wgpu_context,
            columns.colors,
            wgpu::BufferUsages::VERTEX,
            "Particle Colors",
        )?;
        let velocities = GpuBuffer::new(
            wgpu_context,
            columns.velocities,
            wgpu::BufferUsages::STORAGE,
            "Particle Velocities",
        )?;
        let masses = GpuBuffer::new(
            wgpu_context,
            columns.masses,
            wgpu::BufferUsages::STORAGE,
            "Particle Masses",
        )?;

        Ok(Self {
            positions: Interop::register(positions),
            colors,
            velocities,
            masses,
            count,
        })
    }

    pub fn count(&self) -> u32 {
        self.count
    }

    pub fn positions(&self) -> &Interop<GpuBuffer<Vec2>> {
        &self.positions
    }

    pub fn positions_mut(&mut self) -> &mut Interop<GpuBuffer<Vec2>> {
        &mut self.positions
    }

    pub fn colors(&self) -> &GpuBuffer<Vec3> {
        &self.colors
    }

    pub fn velocities(&self) -> &GpuBuffer<Vec2> {
        &self.velocities
    }

    pub fn masses(&self) -> &GpuBuffer<f32> {
        &self.masses
    }
}
