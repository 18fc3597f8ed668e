use std::time::{Duration, Instant};

/// Wall-clock delta between frames, fed to the physics kernel as its
/// timestep.
pub struct RenderTimer {
    last_frame_time: Instant,
}

impl RenderTimer {
    pub fn new() -> Self {
        Self {
            last_frame_time: Instant::now(),
        }
    }

    pub fn get_delta(&mut self) -> Duration {
        let now = Instant::now();
        let delta_time = now - self.last_frame_time;
        self.last_frame_time = now;
        delta_time
    }
}

impl Default for RenderTimer {
    fn default() -> Self {
        Self::new()
    }
}
