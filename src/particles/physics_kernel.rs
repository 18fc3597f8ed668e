use bytemuck::Zeroable;

use crate::error::FatalInitError;
use crate::force_field::FieldParams;
use crate::gpu_buffer::GpuBuffer;
use crate::interop::ComputeAccess;
use crate::wgpu_context::WgpuContext;

/// Argument slot indices. Stable for the lifetime of the kernel object:
/// re-binding one slot never disturbs the others, which is what makes
/// per-frame force updates cheap.
pub const SLOT_POSITIONS: usize = 0;
pub const SLOT_VELOCITIES: usize = 1;
pub const SLOT_FORCE_FIELD: usize = 2;
pub const SLOT_MASSES: usize = 3;
pub const KERNEL_SLOTS: usize = 4;

const WORKGROUP_SIZE: u32 = 64;

/// Ordered argument slots for a kernel. Setting a slot is cheap and
/// side-effect-free until the next dispatch; a dispatch reads whatever was
/// last bound.
#[derive(Debug)]
pub struct SlotTable<T> {
    slots: Vec<Option<T>>,
    dirty: bool,
}

impl<T> SlotTable<T> {
    pub fn new(len: usize) -> Self {
        Self {
            slots: (0..len).map(|_| None).collect(),
            dirty: false,
        }
    }

    /// Replaces exactly one slot, leaving every other slot untouched.
    pub fn bind(&mut self, slot: usize, value: T) {
        assert!(slot < self.slots.len(), "kernel argument slot {slot} out of range");
        self.slots[slot] = Some(value);
        self.dirty = true;
    }

    pub fn get(&self, slot: usize) -> Option<&T> {
        self.slots.get(slot).and_then(|s| s.as_ref())
    }

    pub fn is_complete(&self) -> bool {
        self.slots.iter().all(|s| s.is_some())
    }

    pub fn dirty(&self) -> bool {
        self.dirty
    }

    pub fn clear_dirty(&mut self) {
        self.dirty = false;
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }
}

/// The compiled physics kernel plus its bound arguments.
///
/// The kernel program is an opaque contract: invocation `i` reads position,
/// velocity, mass and the force field for index `i` and writes next-frame
/// position and velocity for index `i`, touching no other index. Its exact
/// arithmetic can be swapped without affecting the rest of the system.
pub struct PhysicsKernel {
    pipeline: wgpu::ComputePipeline,
    bind_group_layout: wgpu::BindGroupLayout,
    slots: SlotTable<wgpu::Buffer>,
    bind_group: Option<wgpu::BindGroup>,
    field_buffer: GpuBuffer<FieldParams>,
}

impl PhysicsKernel {
    /// Compiles `particle_physics.wgsl` and builds the pipeline. A build
    /// failure carries the compiler's diagnostic text; there is no fallback
    /// kernel, so the caller terminates startup with it.
    pub fn load(wgpu_context: &WgpuContext) -> Result<Self, FatalInitError> {
        let device = wgpu_context.get_device();

        let bind_group_layout = Self::create_bind_group_layout(wgpu_context);
        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("Particle Physics Pipeline Layout"),
            bind_group_layouts: &[&bind_group_layout],
            push_constant_ranges: &[],
        });

        device.push_error_scope(wgpu::ErrorFilter::Validation);
        let module = device.create_shader_module(wgpu::include_wgsl!("particle_physics.wgsl"));
        let pipeline = device.create_compute_pipeline(&wgpu::ComputePipelineDescriptor {
            label: Some("Particle Physics Pipeline"),
            layout: Some(&pipeline_layout),
            module: &module,
            entry_point: Some("particle_physics"),
            compilation_options: wgpu::PipelineCompilationOptions::default(),
            cache: None,
        });
        if let Some(error) = pollster::block_on(device.pop_error_scope()) {
            return Err(FatalInitError::KernelBuild {
                diagnostic: error.to_string(),
            });
        }

        let field_buffer = GpuBuffer::new(
            wgpu_context,
            vec![FieldParams::zeroed()],
            wgpu::BufferUsages::UNIFORM,
            "Force Field Params",
        )?;

        let mut slots = SlotTable::new(KERNEL_SLOTS);
        slots.bind(SLOT_FORCE_FIELD, field_buffer.buffer().clone());

        Ok(Self {
            pipeline,
            bind_group_layout,
            slots,
            bind_group: None,
            field_buffer,
        })
    }

    fn create_bind_group_layout(wgpu_context: &WgpuContext) -> wgpu::BindGroupLayout {
        let storage = |binding: u32, read_only: bool| wgpu::BindGroupLayoutEntry {
            binding,
            visibility: wgpu::ShaderStages::COMPUTE,
            ty: wgpu::BindingType::Buffer {
                ty: wgpu::BufferBindingType::Storage { read_only },
                has_dynamic_offset: false,
                min_binding_size: None,
            },
            count: None,
        };

        wgpu_context
            .get_device()
            .create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                label: Some("Particle Physics Bind Group Layout"),
                entries: &[
                    // Slot 0: shared position buffer, written in place
                    storage(SLOT_POSITIONS as u32, false),
                    // Slot 1: velocities, written in place
                    storage(SLOT_VELOCITIES as u32, false),
                    // Slot 2: force field uniform
                    wgpu::BindGroupLayoutEntry {
                        binding: SLOT_FORCE_FIELD as u32,
                        visibility: wgpu::ShaderStages::COMPUTE,
                        ty: wgpu::BindingType::Buffer {
                            ty: wgpu::BufferBindingType::Uniform,
                            has_dynamic_offset: false,
                            min_binding_size: wgpu::BufferSize::new(
                                std::mem::size_of::<FieldParams>() as u64,
                            ),
                        },
                        count: None,
                    },
                    // Slot 3: masses, read only
                    storage(SLOT_MASSES as u32, true),
                ],
            })
    }

    /// Binds one argument slot. Recording the handle queues no device work;
    /// the bind group is rebuilt lazily at the next dispatch.
    pub fn bind(&mut self, slot: usize, buffer: &wgpu::Buffer) {
        self.slots.bind(slot, buffer.clone());
        self.bind_group = None;
    }

    /// Uploads the per-frame force field snapshot into the already-bound
    /// field slot. Takes effect on the next dispatch only.
    pub fn set_field(&self, wgpu_context: &WgpuContext, params: &FieldParams) {
        wgpu_context.get_queue().write_buffer(
            self.field_buffer.buffer(),
            0,
            bytemuck::bytes_of(params),
        );
    }

    /// Enqueues one kernel invocation per particle index in `[0, count)`.
    /// Requires the live compute-access token for the shared buffer, so it
    /// cannot be called outside the ownership bracket. `count = 0` is a
    /// no-op.
    pub fn dispatch(
        &mut self,
        wgpu_context: &WgpuContext,
        _access: &ComputeAccess,
        encoder: &mut wgpu::CommandEncoder,
        count: u32,
    ) {
        assert!(
            self.slots.is_complete(),
            "kernel dispatched with unbound argument slots"
        );
        if count == 0 {
            return;
        }

        if self.bind_group.is_none() {
            let entries: Vec<wgpu::BindGroupEntry> = (0..KERNEL_SLOTS)
                .map(|slot| wgpu::BindGroupEntry {
                    binding: slot as u32,
                    resource: self
                        .slots
                        .get(slot)
                        .expect("slot checked above")
                        .as_entire_binding(),
                })
                .collect();
            self.bind_group = Some(wgpu_context.get_device().create_bind_group(
                &wgpu::BindGroupDescriptor {
                    label: Some("Particle Physics Bind Group"),
                    layout: &self.bind_group_layout,
                    entries: &entries,
                },
            ));
            self.slots.clear_dirty();
        }
        let bind_group = self.bind_group.as_ref().expect("bind group built above");

        let mut compute_pass = encoder.begin_compute_pass(&wgpu::ComputePassDescriptor {
            label: Some("Particle Physics Pass"),
            timestamp_writes: None,
        });
        compute_pass.set_pipeline(&self.pipeline);
        compute_pass.set_bind_group(0, bind_group, &[]);
        compute_pass.dispatch_workgroups(Self::workgroups_for(count), 1, 1);
    }

    /// Workgroups needed so every index in `[0, count)` gets an invocation;
    /// the kernel guards indices past `count`.
    pub fn workgroups_for(count: u32) -> u32 {
        count.div_ceil(WORKGROUP_SIZE)
    }
}
