use std::path::PathBuf;
use thiserror::Error;

/// Startup failures. None of these have a degraded mode: a GPU-resident
/// particle simulation without its buffers, kernel or sprite is meaningless,
/// so the process terminates after reporting the diagnostic.
#[derive(Debug, Error)]
pub enum FatalInitError {
    #[error("no suitable GPU adapter found: {0}")]
    NoAdapter(#[from] wgpu::RequestAdapterError),

    #[error("failed to request GPU device: {0}")]
    DeviceRequest(#[from] wgpu::RequestDeviceError),

    #[error("failed to load texture {path:?}: {source}")]
    TextureLoad {
        path: PathBuf,
        source: image::ImageError,
    },

    #[error("compute kernel build failed:\n{diagnostic}")]
    KernelBuild { diagnostic: String },

    #[error("device buffer allocation of {requested} bytes exceeds the device limit of {limit} bytes")]
    BufferAllocation { requested: u64, limit: u64 },
}
