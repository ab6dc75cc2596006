//! Keyboard state for walking the camera around

use linalg::Vec3;
use winit::event::ElementState;
use winit::keyboard::KeyCode;

use crate::camera::Camera;

/// Held movement keys plus one-shot requests, refreshed from window events
/// once per frame.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct InputState {
    pub left: bool,
    pub right: bool,
    pub up: bool,
    pub down: bool,
    pub quit: bool,
    pub snapshot: bool,
}

fn axis(positive: bool, negative: bool) -> f32 {
    f32::from(u8::from(positive)) - f32::from(u8::from(negative))
}

impl InputState {
    /// Arrows or WASD move and turn, Escape quits, P asks for a snapshot.
    pub fn process_keyboard(&mut self, key: KeyCode, state: ElementState) {
        let is_pressed = state == ElementState::Pressed;
        match key {
            KeyCode::ArrowLeft | KeyCode::KeyA => self.left = is_pressed,
            KeyCode::ArrowRight | KeyCode::KeyD => self.right = is_pressed,
            KeyCode::ArrowUp | KeyCode::KeyW => self.up = is_pressed,
            KeyCode::ArrowDown | KeyCode::KeyS => self.down = is_pressed,
            KeyCode::Escape if is_pressed => self.quit = true,
            KeyCode::KeyP if is_pressed => self.snapshot = true,
            _ => (),
        }
    }

    /// Returns and clears a pending snapshot request.
    pub fn take_snapshot(&mut self) -> bool {
        std::mem::take(&mut self.snapshot)
    }

    /// Turns and walks `camera` by the held keys. Returns whether it moved.
    pub fn apply(&self, camera: &mut Camera, turn_speed: f32, walk_speed: f32) -> bool {
        let turn = axis(self.left, self.right) * turn_speed;
        let walk = axis(self.down, self.up) * walk_speed;
        if turn != 0.0 {
            camera.turn(turn);
        }
        if walk != 0.0 {
            camera.move_forward(Vec3::new(0.0, 0.0, walk));
        }
        turn != 0.0 || walk != 0.0
    }
}
