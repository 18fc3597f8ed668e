// Not every test file will use every function.
#![allow(dead_code)]

use particle_engine::wgpu_context::WgpuContext;

// A struct to hold all the common objects for a GPU test.
pub struct TestSetup {
    pub wgpu_context: WgpuContext,
}

// The main setup function. Returns `None` on machines without a usable GPU
// adapter so the GPU tests skip themselves instead of failing.
pub async fn setup() -> Option<TestSetup> {
    match WgpuContext::new_for_test().await {
        Ok(wgpu_context) => Some(TestSetup { wgpu_context }),
        Err(e) => {
            eprintln!("skipping GPU test, no usable adapter: {e}");
            None
        }
    }
}
