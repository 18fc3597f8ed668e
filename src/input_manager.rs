use winit::dpi::PhysicalPosition;
use winit::event::{ElementState, MouseButton};
use winit::event_loop::ActiveEventLoop;
use winit::keyboard::KeyCode;

use crate::frame_controller::FrameController;

/// Routes winit events into the force field. Events arrive on the control
/// thread between frames; they are mapped and stored here, and the kernel
/// picks them up at the next dispatch.
pub struct InputManager {}

impl InputManager {
    /// Manages keyboard inputs from the user
    pub fn process_keyboard_input(
        event_loop: &ActiveEventLoop,
        code: &KeyCode,
        key_state: &ElementState,
    ) {
        if let (KeyCode::Escape, true) = (code, key_state.is_pressed()) {
            event_loop.exit();
        }
    }

    /// Manages mouse movement: pixel coordinates become the pointer force
    /// source's device-space location.
    pub fn process_cursor_moved(
        frame_controller: &mut FrameController,
        position: &PhysicalPosition<f64>,
    ) {
        frame_controller
            .force_field_mut()
            .on_pointer_move(position.x as f32, position.y as f32);
    }

    /// Manages mouse button inputs: holding any button powers the pointer
    /// force source, releasing it cuts the power to zero.
    pub fn process_mouse_input(
        frame_controller: &mut FrameController,
        mouse_state: &ElementState,
        _button: &MouseButton,
    ) {
        frame_controller
            .force_field_mut()
            .on_pointer_button(mouse_state.is_pressed());
    }
}
