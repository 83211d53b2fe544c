//! Fixed key table for the camera.

use winit::keyboard::{KeyCode, PhysicalKey};

use super::state::{InputState, SharedInput};

pub const DOLLY_STEP: f32 = 0.05;
pub const YAW_STEP: f32 = 0.1;
pub const PAN_STEP: f32 = 0.05;

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum KeyAction {
    Dolly(f32),
    Yaw(f32),
    PanX(f32),
    PanY(f32),
}

impl KeyAction {
    pub fn apply(self, state: &mut InputState) {
        match self {
            KeyAction::Dolly(step) => state.camera_dolly += step,
            KeyAction::Yaw(step) => state.camera_rotation_y += step,
            KeyAction::PanX(step) => state.camera_translation.x += step,
            KeyAction::PanY(step) => state.camera_translation.y += step,
        }
    }
}

pub fn key_action(code: KeyCode) -> Option<KeyAction> {
    let action = match code {
        KeyCode::KeyW => KeyAction::Dolly(DOLLY_STEP),
        KeyCode::KeyS => KeyAction::Dolly(-DOLLY_STEP),
        KeyCode::KeyA => KeyAction::Yaw(YAW_STEP),
        KeyCode::KeyD => KeyAction::Yaw(-YAW_STEP),
        KeyCode::ArrowUp => KeyAction::PanY(PAN_STEP),
        KeyCode::ArrowDown => KeyAction::PanY(-PAN_STEP),
        KeyCode::ArrowLeft => KeyAction::PanX(-PAN_STEP),
        KeyCode::ArrowRight => KeyAction::PanX(PAN_STEP),
        _ => return None,
    };
    Some(action)
}

/// Applies a key-down from the table. Key-ups and unmapped keys pass through.
///
/// Returns the applied action, if any.
pub fn handle_key(input: &SharedInput, key: PhysicalKey, pressed: bool) -> Option<KeyAction> {
    let PhysicalKey::Code(code) = key else {
        return None;
    };
    if !pressed {
        return None;
    }
    let action = key_action(code)?;
    input.update(|state| action.apply(state));
    log::trace!("{:?} -> {:?}", code, action);
    Some(action)
}
