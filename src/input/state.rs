use std::sync::{Arc, Mutex, PoisonError};

use cgmath::Vector2;

/// Player and camera scalars written by input handlers and read once per frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct InputState {
    /// Movement request in `[-1, 1]` on both axes.
    pub player_movement: Vector2<f32>,
    /// Rotation rate from the triggers, `right - left`.
    pub player_rotation_y: f32,
    /// Yaw of the camera.
    pub camera_rotation_y: f32,
    /// Sideways and vertical camera offset for peeking around.
    pub camera_translation: Vector2<f32>,
    /// Moves the camera back and forth without touching the projection.
    pub camera_dolly: f32,
}

impl InputState {
    pub const INITIAL_CAMERA_DOLLY: f32 = -1.0;

    pub fn new() -> Self {
        Self {
            player_movement: Vector2::new(0.0, 0.0),
            player_rotation_y: 0.0,
            camera_rotation_y: 0.0,
            camera_translation: Vector2::new(0.0, 0.0),
            camera_dolly: Self::INITIAL_CAMERA_DOLLY,
        }
    }
}

impl Default for InputState {
    fn default() -> Self {
        Self::new()
    }
}

/// Lock-guarded [`InputState`] shared between event producers and the frame update.
///
/// Writers mutate through [`SharedInput::update`]; the renderer takes one
/// [`SharedInput::snapshot`] per frame so it never sees a half-applied event.
#[derive(Clone, Debug, Default)]
pub struct SharedInput(Arc<Mutex<InputState>>);

impl SharedInput {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn update<R>(&self, f: impl FnOnce(&mut InputState) -> R) -> R {
        let mut state = self.0.lock().unwrap_or_else(PoisonError::into_inner);
        f(&mut state)
    }

    pub fn snapshot(&self) -> InputState {
        *self.0.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
