use cgmath::Vector2;
use weld::input::{
    Gamepads, InputState, SharedInput,
    gamepad::{
        self, Axis, Button, Control, ControllerEvent, Motion, MotionFilter, PlayerIndex,
        STANDARD_GRAVITY, SensorReading,
    },
    keyboard::{self, KeyAction},
};
use winit::keyboard::{KeyCode, NativeKeyCode, PhysicalKey};

use crate::common::test_utils::assert_close;

mod common;

fn connected(gamepads: &mut Gamepads, input: &SharedInput, id: u32) {
    gamepads.handle(ControllerEvent::Connected { id, extended: true }, input);
}

#[test]
fn key_table() {
    assert_eq!(keyboard::key_action(KeyCode::KeyW), Some(KeyAction::Dolly(0.05)));
    assert_eq!(keyboard::key_action(KeyCode::KeyS), Some(KeyAction::Dolly(-0.05)));
    assert_eq!(keyboard::key_action(KeyCode::KeyA), Some(KeyAction::Yaw(0.1)));
    assert_eq!(keyboard::key_action(KeyCode::KeyD), Some(KeyAction::Yaw(-0.1)));
    assert_eq!(keyboard::key_action(KeyCode::ArrowUp), Some(KeyAction::PanY(0.05)));
    assert_eq!(keyboard::key_action(KeyCode::ArrowDown), Some(KeyAction::PanY(-0.05)));
    assert_eq!(keyboard::key_action(KeyCode::ArrowLeft), Some(KeyAction::PanX(-0.05)));
    assert_eq!(keyboard::key_action(KeyCode::ArrowRight), Some(KeyAction::PanX(0.05)));
    assert_eq!(keyboard::key_action(KeyCode::Space), None);
}

#[test]
fn key_down_adjusts_the_camera() {
    let input = SharedInput::new();
    keyboard::handle_key(&input, PhysicalKey::Code(KeyCode::KeyW), true);
    keyboard::handle_key(&input, PhysicalKey::Code(KeyCode::KeyW), true);
    keyboard::handle_key(&input, PhysicalKey::Code(KeyCode::KeyA), true);
    keyboard::handle_key(&input, PhysicalKey::Code(KeyCode::ArrowRight), true);

    let state = input.snapshot();
    assert_close(state.camera_dolly, InputState::INITIAL_CAMERA_DOLLY + 0.1);
    assert_close(state.camera_rotation_y, 0.1);
    assert_close(state.camera_translation.x, 0.05);
    assert_close(state.camera_translation.y, 0.0);
}

#[test]
fn key_up_and_unmapped_keys_are_ignored() {
    let input = SharedInput::new();
    assert_eq!(
        keyboard::handle_key(&input, PhysicalKey::Code(KeyCode::KeyW), false),
        None
    );
    assert_eq!(
        keyboard::handle_key(&input, PhysicalKey::Code(KeyCode::KeyQ), true),
        None
    );
    assert_eq!(
        keyboard::handle_key(&input, PhysicalKey::Unidentified(NativeKeyCode::Unidentified), true),
        None
    );
    assert_eq!(input.snapshot(), InputState::new());
}

#[test]
fn shared_input_clones_see_the_same_state() {
    let input = SharedInput::new();
    let writer = input.clone();
    writer.update(|state| state.player_rotation_y = 0.75);
    assert_close(input.snapshot().player_rotation_y, 0.75);
}

#[test]
fn players_are_numbered_in_connection_id_order() {
    let input = SharedInput::new();
    let mut gamepads = Gamepads::new();
    connected(&mut gamepads, &input, 7);
    connected(&mut gamepads, &input, 3);

    assert_eq!(gamepads.len(), 2);
    assert_eq!(gamepads.player_index(3), Some(PlayerIndex(0)));
    assert_eq!(gamepads.player_index(7), Some(PlayerIndex(1)));
}

#[test]
fn non_extended_controllers_are_ignored() {
    let input = SharedInput::new();
    let mut gamepads = Gamepads::new();
    gamepads.handle(ControllerEvent::Connected { id: 1, extended: false }, &input);
    connected(&mut gamepads, &input, 2);

    assert_eq!(gamepads.player_index(1), None);
    assert_eq!(gamepads.player_index(2), Some(PlayerIndex(0)));

    gamepads.handle(
        ControllerEvent::AxisMoved { id: 1, axis: Axis::LeftX, value: 1.0 },
        &input,
    );
    assert_eq!(input.snapshot().player_movement, Vector2::new(0.0, 0.0));
}

#[test]
fn disconnect_forgets_the_controller_but_keeps_the_input() {
    let input = SharedInput::new();
    let mut gamepads = Gamepads::new();
    connected(&mut gamepads, &input, 4);
    gamepads.handle(
        ControllerEvent::AxisMoved { id: 4, axis: Axis::LeftY, value: 0.5 },
        &input,
    );
    gamepads.handle(ControllerEvent::Disconnected { id: 4 }, &input);

    assert!(gamepads.is_empty());
    assert_close(input.snapshot().player_movement.y, 0.5);

    // Late events from the removed controller change nothing.
    gamepads.handle(
        ControllerEvent::AxisMoved { id: 4, axis: Axis::LeftY, value: -1.0 },
        &input,
    );
    assert_close(input.snapshot().player_movement.y, 0.5);
}

#[test]
fn stick_and_dpad_combine_and_clamp() {
    let input = SharedInput::new();
    let mut gamepads = Gamepads::new();
    connected(&mut gamepads, &input, 0);

    gamepads.handle(
        ControllerEvent::AxisMoved { id: 0, axis: Axis::LeftX, value: 0.6 },
        &input,
    );
    assert_close(input.snapshot().player_movement.x, 0.6);

    gamepads.handle(
        ControllerEvent::Pressed { id: 0, control: Control::DpadRight, value: 1.0 },
        &input,
    );
    assert_close(input.snapshot().player_movement.x, 1.0);

    gamepads.handle(
        ControllerEvent::Pressed { id: 0, control: Control::DpadRight, value: 0.0 },
        &input,
    );
    gamepads.handle(
        ControllerEvent::Pressed { id: 0, control: Control::DpadDown, value: 1.0 },
        &input,
    );
    let movement = input.snapshot().player_movement;
    assert_close(movement.x, 0.6);
    assert_close(movement.y, -1.0);
}

#[test]
fn combine_axes_clamps_both_ways() {
    assert_close(gamepad::combine_axes(0.6, 0.6), 1.0);
    assert_close(gamepad::combine_axes(-0.6, -1.0), -1.0);
    assert_close(gamepad::combine_axes(0.25, -0.5), -0.25);
}

#[test]
fn right_stick_pans_the_camera() {
    let input = SharedInput::new();
    let mut gamepads = Gamepads::new();
    connected(&mut gamepads, &input, 0);
    gamepads.handle(
        ControllerEvent::AxisMoved { id: 0, axis: Axis::RightX, value: 0.5 },
        &input,
    );
    gamepads.handle(
        ControllerEvent::AxisMoved { id: 0, axis: Axis::RightY, value: -0.25 },
        &input,
    );

    let pan = input.snapshot().camera_translation;
    assert_close(pan.x, 5.0);
    assert_close(pan.y, -2.5);
}

#[test]
fn triggers_set_the_rotation_rate() {
    let input = SharedInput::new();
    let mut gamepads = Gamepads::new();
    connected(&mut gamepads, &input, 0);
    gamepads.handle(
        ControllerEvent::AxisMoved { id: 0, axis: Axis::RightTrigger, value: 0.8 },
        &input,
    );
    gamepads.handle(
        ControllerEvent::AxisMoved { id: 0, axis: Axis::LeftTrigger, value: 0.3 },
        &input,
    );
    assert_close(input.snapshot().player_rotation_y, 0.5);
}

#[test]
fn buttons_and_motion_leave_the_input_alone() {
    let input = SharedInput::new();
    let mut gamepads = Gamepads::new();
    connected(&mut gamepads, &input, 0);
    gamepads.handle(
        ControllerEvent::Pressed { id: 0, control: Control::Button(Button::A), value: 1.0 },
        &input,
    );
    gamepads.handle(
        ControllerEvent::Motion { id: 0, motion: Motion::default() },
        &input,
    );

    assert_eq!(input.snapshot(), InputState::new());
    assert_close(gamepads.state(0).unwrap().button(Button::A), 1.0);
    assert_close(gamepads.state(0).unwrap().button(Button::B), 0.0);
}

#[test]
fn gyroscope_sets_the_rotation_rate() {
    let mut filter = MotionFilter::new();
    let motion = filter.apply(SensorReading::Gyroscope([0.5, -1.0, 2.0]));

    assert_eq!(motion.rotation_rate, [0.5, -1.0, 2.0]);
    assert_eq!(motion.attitude, [0.0, 0.0, 0.0, 1.0]);
    assert_eq!(motion.gravity, [0.0; 3]);
}

#[test]
fn first_accelerometer_sample_is_all_gravity() {
    let mut filter = MotionFilter::new();
    let motion = filter.apply(SensorReading::Accelerometer([0.0, -STANDARD_GRAVITY, 0.0]));

    assert_close(motion.gravity[1], -1.0);
    assert_eq!(motion.user_acceleration, [0.0; 3]);
}

#[test]
fn a_jolt_shows_up_as_user_acceleration() {
    let mut filter = MotionFilter::new();
    filter.apply(SensorReading::Accelerometer([0.0, -STANDARD_GRAVITY, 0.0]));
    let motion = filter.apply(SensorReading::Accelerometer([STANDARD_GRAVITY, -STANDARD_GRAVITY, 0.0]));

    // Gravity only drifts towards the jolt by the smoothing factor.
    assert_close(motion.gravity[0], MotionFilter::GRAVITY_SMOOTHING);
    assert_close(motion.user_acceleration[0], 1.0 - MotionFilter::GRAVITY_SMOOTHING);
    assert_close(motion.user_acceleration[1], 0.0);
    assert_eq!(filter.motion(), motion);
}

#[test]
fn filtered_motion_reaches_the_handler_without_touching_the_input() {
    let input = SharedInput::new();
    let mut gamepads = Gamepads::new();
    connected(&mut gamepads, &input, 0);

    let mut filter = MotionFilter::new();
    filter.apply(SensorReading::Gyroscope([0.1, 0.2, 0.3]));
    let motion = filter.apply(SensorReading::Accelerometer([0.0, 0.0, -STANDARD_GRAVITY]));
    gamepads.handle(ControllerEvent::Motion { id: 0, motion }, &input);

    assert_eq!(input.snapshot(), InputState::new());
}
