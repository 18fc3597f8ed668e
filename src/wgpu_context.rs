use std::sync::Arc;
use glam::Vec2;
use wgpu::Adapter;
use winit::window::Window;

use crate::error::FatalInitError;
use crate::surface_manager::SurfaceManager;

/// One `Device`/`Queue` pair serving both the compute kernel and the
/// rasterizer. Sharing a single device is what lets the particle buffer move
/// between the two sides without a host round trip.
pub struct WgpuContext {
    device: wgpu::Device,
    queue: wgpu::Queue,
    surface_manager: Option<SurfaceManager>,
    adapter: Adapter,
}

impl WgpuContext {
    pub async fn new(window: Arc<Window>) -> Result<Self, FatalInitError> {
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::PRIMARY,
            ..Default::default()
        });

        let surface = instance
            .create_surface(window.clone())
            .expect("failed to create surface for the particle window");

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await?;

        let surface_manager = Some(SurfaceManager::new(window, surface, &adapter));

        let (device, queue) = adapter
            .request_device(&wgpu::DeviceDescriptor {
                label: None,
                required_features: wgpu::Features::TIMESTAMP_QUERY
                    | wgpu::Features::TIMESTAMP_QUERY_INSIDE_ENCODERS,
                required_limits: adapter.limits(),
                memory_hints: Default::default(),
                trace: wgpu::Trace::Off,
            })
            .await?;

        log::info!("using adapter: {}", adapter.get_info().name);

        Ok(Self {
            device,
            queue,
            surface_manager,
            adapter,
        })
    }

    /// A surface-less context for tests. No timestamp features so it also
    /// works on fallback adapters.
    pub async fn new_for_test() -> Result<Self, FatalInitError> {
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor::default());
        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: None,
                force_fallback_adapter: false,
            })
            .await?;

        let (device, queue) = adapter
            .request_device(&wgpu::DeviceDescriptor {
                label: Some("Test Device"),
                required_features: wgpu::Features::empty(),
                required_limits: adapter.limits(),
                ..Default::default()
            })
            .await?;

        Ok(Self {
            device,
            queue,
            surface_manager: None,
            adapter,
        })
    }

    pub fn window_size(&self) -> Vec2 {
        match &self.surface_manager {
            Some(surface_manager) => {
                let size = surface_manager.window_size();
                Vec2::new(size.width as f32, size.height as f32)
            }
            None => Vec2::ZERO,
        }
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        self.surface_manager
            .as_mut()
            .expect("No surface in this context")
            .resize(width, height, &self.device);
    }

    pub fn get_window(&self) -> &Arc<Window> {
        self.surface_manager
            .as_ref()
            .expect("No surface in this context")
            .get_window()
    }

    pub fn get_surface(&self) -> &wgpu::Surface<'static> {
        self.surface_manager
            .as_ref()
            .expect("No surface in this context")
            .get_surface()
    }

    pub fn is_surface_configured(&self) -> bool {
        self.surface_manager
            .as_ref()
            .expect("No surface in this context")
            .is_surface_configured()
    }

    pub fn get_device(&self) -> &wgpu::Device {
        &self.device
    }

    pub fn get_queue(&self) -> &wgpu::Queue {
        &self.queue
    }

    pub fn get_adapter(&self) -> &Adapter {
        &self.adapter
    }

    pub fn get_surface_config(&self) -> &wgpu::SurfaceConfiguration {
        self.surface_manager
            .as_ref()
            .expect("No surface in this context")
            .get_config()
    }
}
