use std::path::Path;
use std::sync::Arc;

use winit::event::{KeyEvent, WindowEvent};
use winit::event_loop::ActiveEventLoop;
use winit::keyboard::PhysicalKey;
use winit::window::Window;

use crate::frame_controller::FrameController;
use crate::input_manager::InputManager;
use crate::particles::particle_drawer::ParticleDrawer;
use crate::particles::particle_store::SeedPolicy;
use crate::texture::SpriteTexture;
use crate::wgpu_context::WgpuContext;

const NUM_PARTICLES: usize = 1_000_000;
const SPRITE_PATH: &str = "media/textures/particle.png";

// This will store the state of the engine
pub struct State {
    wgpu_context: WgpuContext,
    frame_controller: FrameController,
}

impl State {
    pub async fn new(window: Arc<Window>) -> anyhow::Result<Self> {
        let wgpu_context = WgpuContext::new(window).await?;

        let sprite = SpriteTexture::load(&wgpu_context, Path::new(SPRITE_PATH), true)?;
        let drawer = ParticleDrawer::new(&wgpu_context, sprite)?;

        let viewport = wgpu_context.window_size();
        let frame_controller = FrameController::new(
            &wgpu_context,
            NUM_PARTICLES,
            SeedPolicy::default(),
            viewport,
            Some(drawer),
        )?;

        Ok(Self {
            wgpu_context,
            frame_controller,
        })
    }

    pub fn render_loop(&mut self, event: &WindowEvent, event_loop: &ActiveEventLoop) {
        match event {
            WindowEvent::Resized(size) => {
                self.wgpu_context.resize(size.width, size.height);
                self.frame_controller.reshape(size.width, size.height);
            }
            WindowEvent::RedrawRequested => {
                match self.frame_controller.render_frame(&self.wgpu_context) {
                    Ok(_) => {}
                    Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                        let size = self.wgpu_context.window_size();
                        self.wgpu_context.resize(size.x as u32, size.y as u32);
                    }
                    Err(e) => {
                        log::error!("Unable to render: {:?}", e);
                    }
                }
            }
            WindowEvent::CursorMoved { position, .. } => {
                InputManager::process_cursor_moved(&mut self.frame_controller, position);
            }
            WindowEvent::MouseInput { state, button, .. } => {
                InputManager::process_mouse_input(&mut self.frame_controller, state, button);
            }
            WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        physical_key: PhysicalKey::Code(code),
                        state: key_state,
                        ..
                    },
                ..
            } => {
                InputManager::process_keyboard_input(event_loop, code, key_state);
            }
            WindowEvent::CloseRequested => event_loop.exit(),
            _ => {}
        }
    }
}
