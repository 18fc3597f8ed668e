use std::marker::PhantomData;
use std::mem;

use wgpu::wgt::PollType::Wait;

use crate::error::FatalInitError;
use crate::wgpu_context::WgpuContext;

/// A typed device buffer. The host-side `Vec` is consumed at creation and
/// dropped right after the upload is queued; the simulation never reads the
/// seed data again, so no CPU copy is kept alive.
#[derive(Debug)]
pub struct GpuBuffer<T> {
    buffer: wgpu::Buffer,
    len: usize,
    _marker: PhantomData<T>,
}

impl<T: bytemuck::Pod> GpuBuffer<T> {
    pub fn new(
        wgpu_context: &WgpuContext,
        data: Vec<T>,
        usage: wgpu::BufferUsages,
        label: &str,
    ) -> Result<Self, FatalInitError> {
        let size = (data.len() * mem::size_of::<T>().max(1)) as u64;
        let limit = wgpu_context.get_device().limits().max_buffer_size;
        if size > limit {
            return Err(FatalInitError::BufferAllocation {
                requested: size,
                limit,
            });
        }

        let usage = usage | wgpu::BufferUsages::COPY_DST | wgpu::BufferUsages::COPY_SRC;
        let buffer = wgpu_context
            .get_device()
            .create_buffer(&wgpu::BufferDescriptor {
                label: Some(label),
                size: size.max(mem::size_of::<T>() as u64),
                usage,
                mapped_at_creation: false,
            });
        wgpu_context
            .get_queue()
            .write_buffer(&buffer, 0, bytemuck::cast_slice(&data));

        let len = data.len();
        drop(data);

        Ok(Self {
            buffer,
            len,
            _marker: PhantomData,
        })
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn buffer(&self) -> &wgpu::Buffer {
        &self.buffer
    }

    /// Reads the buffer back through a staging copy. Blocks until the GPU has
    /// drained the queue. Only the tests need this path.
    pub fn download(&self, wgpu_context: &WgpuContext) -> Result<Vec<T>, wgpu::BufferAsyncError> {
        let device = wgpu_context.get_device();
        let queue = wgpu_context.get_queue();

        let size = (self.len * mem::size_of::<T>()) as u64;
        if size == 0 {
            return Ok(Vec::new());
        }

        let staging_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("Staging Buffer (Download)"),
            size,
            usage: wgpu::BufferUsages::MAP_READ | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let mut encoder = device.create_command_encoder(&wgpu::CommandEncoderDescriptor {
            label: Some("Download Encoder"),
        });
        encoder.copy_buffer_to_buffer(&self.buffer, 0, &staging_buffer, 0, size);
        queue.submit(Some(encoder.finish()));

        let buffer_slice = staging_buffer.slice(..);
        let (sender, receiver) = std::sync::mpsc::channel();
        buffer_slice.map_async(wgpu::MapMode::Read, move |result| {
            sender.send(result).unwrap();
        });

        device.poll(Wait).unwrap();

        match receiver.recv().unwrap() {
            Ok(()) => {
                let mapped_range = buffer_slice.get_mapped_range();
                let downloaded: Vec<T> = bytemuck::cast_slice(&mapped_range).to_vec();
                drop(mapped_range);
                Ok(downloaded)
            }
            Err(e) => Err(e),
        }
    }
}
