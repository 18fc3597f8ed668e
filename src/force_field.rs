use glam::Vec2;

/// Upper bound on simultaneously active force sources. Slot
/// [`POINTER_SOURCE`] is driven by the mouse; the rest are free for callers.
pub const MAX_FORCE_SOURCES: usize = 4;

/// Index of the pointer-driven force source.
pub const POINTER_SOURCE: usize = 0;

/// Power applied while a mouse button is held.
const POINTER_POWER: f32 = 1.0;

/// One force source as the kernel sees it. 16-byte stride to satisfy the
/// uniform address space layout rules.
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct ForceSourceRaw {
    pub location: [f32; 2],
    pub power: f32,
    pub _pad: f32,
}

/// The uniform block bound at the kernel's force-field slot. Snapshotted from
/// host state and uploaded before every compute acquire, never mid-dispatch.
#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub struct FieldParams {
    pub num_particles: u32,
    pub num_sources: u32,
    pub delta_time: f32,
    pub _pad: f32,
    pub sources: [ForceSourceRaw; MAX_FORCE_SOURCES],
}

#[derive(Debug, Clone, Copy)]
struct ForceSource {
    location: Vec2,
    power: f32,
}

/// Host-side force field state, mutated by pointer input between frames and
/// pushed into the kernel's argument slot as one uniform upload per frame.
#[derive(Debug)]
pub struct ForceField {
    sources: [ForceSource; MAX_FORCE_SOURCES],
    viewport: Vec2,
}

impl ForceField {
    pub fn new(viewport_width: f32, viewport_height: f32) -> Self {
        Self {
            sources: [ForceSource {
                location: Vec2::ZERO,
                power: 0.0,
            }; MAX_FORCE_SOURCES],
            viewport: Vec2::new(viewport_width, viewport_height),
        }
    }

    /// Maps pixel coordinates (origin top-left, y-down) to device coordinates
    /// (origin center, y-up, `[-1, 1]`). This must exactly match where a
    /// particle at that device coordinate is drawn, otherwise clicks pull
    /// particles toward the wrong spot.
    pub fn map_to_device(&self, px: f32, py: f32) -> Vec2 {
        Vec2::new(
            -1.0 + 2.0 * (px / self.viewport.x),
            -(-1.0 + 2.0 * (py / self.viewport.y)),
        )
    }

    /// Updates the mapping denominators. Takes effect on the next pointer
    /// event; already-stored device-space locations are not remapped.
    pub fn reshape(&mut self, viewport_width: f32, viewport_height: f32) {
        self.viewport = Vec2::new(viewport_width, viewport_height);
    }

    pub fn set_location(&mut self, index: usize, x: f32, y: f32) {
        self.sources[index].location = Vec2::new(x, y);
    }

    pub fn set_power(&mut self, index: usize, power: f32) {
        self.sources[index].power = power;
    }

    pub fn location(&self, index: usize) -> Vec2 {
        self.sources[index].location
    }

    pub fn power(&self, index: usize) -> f32 {
        self.sources[index].power
    }

    pub fn on_pointer_move(&mut self, px: f32, py: f32) {
        let device = self.map_to_device(px, py);
        self.sources[POINTER_SOURCE].location = device;
    }

    pub fn on_pointer_button(&mut self, pressed: bool) {
        self.sources[POINTER_SOURCE].power = if pressed { POINTER_POWER } else { 0.0 };
    }

    /// Freezes the current field state into the uniform block for one
    /// dispatch. Mutations after this call affect the next frame only.
    pub fn snapshot(&self, num_particles: u32, delta_time: f32) -> FieldParams {
        let mut sources = [ForceSourceRaw {
            location: [0.0, 0.0],
            power: 0.0,
            _pad: 0.0,
        }; MAX_FORCE_SOURCES];
        for (raw, source) in sources.iter_mut().zip(self.sources.iter()) {
            raw.location = source.location.to_array();
            raw.power = source.power;
        }
        FieldParams {
            num_particles,
            num_sources: MAX_FORCE_SOURCES as u32,
            delta_time,
            _pad: 0.0,
            sources,
        }
    }
}
