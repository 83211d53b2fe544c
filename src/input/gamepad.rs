//! Game controller registry and the per-element input handler.
//!
//! Platform backends translate their native events into [`ControllerEvent`]s.
//! [`Gamepads`] keeps the latest state of every connected controller, hands out
//! player indices and forwards each change as a tagged [`Element`] to
//! [`apply_element`], which is the only place controller data reaches the
//! shared [`InputState`](super::state::InputState).

use std::collections::BTreeMap;
use std::fmt;

use cgmath::Vector2;

use super::state::SharedInput;

/// Right stick deflection is multiplied by this to get the camera pan.
pub const CAMERA_PAN_FACTOR: f32 = 10.0;

/// Backend identifier of a controller (e.g. the SDL joystick instance id).
pub type ControllerId = u32;

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PlayerIndex(pub usize);

impl fmt::Display for PlayerIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Axis {
    LeftX,
    LeftY,
    RightX,
    RightY,
    LeftTrigger,
    RightTrigger,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Button {
    A,
    B,
    X,
    Y,
    LeftShoulder,
    RightShoulder,
    LeftThumbstick,
    RightThumbstick,
    /// Share / view / back.
    Options,
    /// Options / menu / start.
    Menu,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Control {
    Button(Button),
    DpadUp,
    DpadDown,
    DpadLeft,
    DpadRight,
}

/// One sample of a controller's motion sensors.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Motion {
    pub gravity: [f32; 3],
    pub user_acceleration: [f32; 3],
    pub rotation_rate: [f32; 3],
    /// Quaternion `x, y, z, w`.
    pub attitude: [f32; 4],
}

impl Motion {
    /// Identity attitude and no movement.
    pub fn at_rest() -> Self {
        Self {
            attitude: [0.0, 0.0, 0.0, 1.0],
            ..Self::default()
        }
    }
}

/// Earth gravity in m/s², the unit backends report accelerometers in.
pub const STANDARD_GRAVITY: f32 = 9.80665;

/// One raw sample from a controller sensor.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum SensorReading {
    /// Angular velocity in rad/s.
    Gyroscope([f32; 3]),
    /// Acceleration in m/s², gravity included.
    Accelerometer([f32; 3]),
}

/// Folds raw sensor samples into a [`Motion`].
///
/// Gravity is tracked with a low-pass filter over the accelerometer and
/// subtracted to get the user acceleration; both are reported in g. No sensor
/// reports attitude, so it stays at identity.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MotionFilter {
    motion: Motion,
    has_gravity: bool,
}

impl MotionFilter {
    /// Weight of the newest accelerometer sample in the gravity estimate.
    pub const GRAVITY_SMOOTHING: f32 = 0.1;

    pub fn new() -> Self {
        Self {
            motion: Motion::at_rest(),
            has_gravity: false,
        }
    }

    pub fn motion(&self) -> Motion {
        self.motion
    }

    pub fn apply(&mut self, reading: SensorReading) -> Motion {
        match reading {
            SensorReading::Gyroscope(rate) => self.motion.rotation_rate = rate,
            SensorReading::Accelerometer(raw) => {
                let sample = raw.map(|a| a / STANDARD_GRAVITY);
                if self.has_gravity {
                    for (g, s) in self.motion.gravity.iter_mut().zip(sample) {
                        *g += (s - *g) * Self::GRAVITY_SMOOTHING;
                    }
                } else {
                    self.motion.gravity = sample;
                    self.has_gravity = true;
                }
                let gravity = self.motion.gravity;
                self.motion.user_acceleration = [
                    sample[0] - gravity[0],
                    sample[1] - gravity[1],
                    sample[2] - gravity[2],
                ];
            }
        }
        self.motion
    }
}

impl Default for MotionFilter {
    fn default() -> Self {
        Self::new()
    }
}

/// Backend-neutral controller event.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ControllerEvent {
    /// `extended` is false for controllers without a full gamepad profile.
    Connected { id: ControllerId, extended: bool },
    Disconnected { id: ControllerId },
    /// Sticks are in `[-1, 1]` with up as positive Y, triggers in `[0, 1]`.
    AxisMoved { id: ControllerId, axis: Axis, value: f32 },
    Pressed { id: ControllerId, control: Control, value: f32 },
    Motion { id: ControllerId, motion: Motion },
}

/// The control that changed, passed to [`apply_element`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Element {
    LeftThumbstick,
    RightThumbstick,
    Dpad,
    LeftTrigger,
    RightTrigger,
    Button(Button),
    Motion(Motion),
}

/// Latest values of every element of an extended gamepad.
#[derive(Clone, Debug, PartialEq)]
pub struct GamepadState {
    pub left_thumbstick: Vector2<f32>,
    pub right_thumbstick: Vector2<f32>,
    pub dpad: Vector2<f32>,
    pub left_trigger: f32,
    pub right_trigger: f32,
    dpad_pressed: [bool; 4],
    buttons: BTreeMap<Button, f32>,
}

impl GamepadState {
    pub fn new() -> Self {
        Self {
            left_thumbstick: Vector2::new(0.0, 0.0),
            right_thumbstick: Vector2::new(0.0, 0.0),
            dpad: Vector2::new(0.0, 0.0),
            left_trigger: 0.0,
            right_trigger: 0.0,
            dpad_pressed: [false; 4],
            buttons: BTreeMap::new(),
        }
    }

    pub fn button(&self, button: Button) -> f32 {
        self.buttons.get(&button).copied().unwrap_or(0.0)
    }

    fn apply_axis(&mut self, axis: Axis, value: f32) -> Element {
        match axis {
            Axis::LeftX => {
                self.left_thumbstick.x = value;
                Element::LeftThumbstick
            }
            Axis::LeftY => {
                self.left_thumbstick.y = value;
                Element::LeftThumbstick
            }
            Axis::RightX => {
                self.right_thumbstick.x = value;
                Element::RightThumbstick
            }
            Axis::RightY => {
                self.right_thumbstick.y = value;
                Element::RightThumbstick
            }
            Axis::LeftTrigger => {
                self.left_trigger = value;
                Element::LeftTrigger
            }
            Axis::RightTrigger => {
                self.right_trigger = value;
                Element::RightTrigger
            }
        }
    }

    fn apply_control(&mut self, control: Control, value: f32) -> Element {
        let pressed = value > 0.0;
        let slot = match control {
            Control::Button(button) => {
                self.buttons.insert(button, value);
                return Element::Button(button);
            }
            Control::DpadUp => 0,
            Control::DpadDown => 1,
            Control::DpadLeft => 2,
            Control::DpadRight => 3,
        };
        self.dpad_pressed[slot] = pressed;
        let [up, down, left, right] = self.dpad_pressed.map(|p| if p { 1.0 } else { 0.0 });
        self.dpad = Vector2::new(right - left, up - down);
        Element::Dpad
    }
}

impl Default for GamepadState {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Clone, Debug)]
struct Controller {
    extended: bool,
    player: Option<PlayerIndex>,
    state: GamepadState,
}

/// Connected controllers, keyed by backend id.
#[derive(Clone, Debug, Default)]
pub struct Gamepads {
    controllers: BTreeMap<ControllerId, Controller>,
}

impl Gamepads {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.controllers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.controllers.is_empty()
    }

    pub fn player_index(&self, id: ControllerId) -> Option<PlayerIndex> {
        self.controllers.get(&id).and_then(|c| c.player)
    }

    pub fn state(&self, id: ControllerId) -> Option<&GamepadState> {
        self.controllers.get(&id).map(|c| &c.state)
    }

    pub fn handle(&mut self, event: ControllerEvent, input: &SharedInput) {
        match event {
            ControllerEvent::Connected { id, extended } => {
                self.controllers.entry(id).or_insert(Controller {
                    extended,
                    player: None,
                    state: GamepadState::default(),
                });
                self.assign_player_indices();
            }
            ControllerEvent::Disconnected { id } => {
                if let Some(controller) = self.controllers.remove(&id) {
                    log::info!(
                        "Controller {} disconnected (player {:?})",
                        id,
                        controller.player.map(|p| p.0)
                    );
                }
            }
            ControllerEvent::AxisMoved { id, axis, value } => {
                self.dispatch(id, input, |state| state.apply_axis(axis, value));
            }
            ControllerEvent::Pressed { id, control, value } => {
                self.dispatch(id, input, |state| state.apply_control(control, value));
            }
            ControllerEvent::Motion { id, motion } => {
                self.dispatch(id, input, |_| Element::Motion(motion));
            }
        }
    }

    /// Every connected extended gamepad gets the next index in id order.
    fn assign_player_indices(&mut self) {
        let mut next = 0;
        for (id, controller) in self.controllers.iter_mut() {
            if controller.extended {
                controller.player = Some(PlayerIndex(next));
                log::info!("Controller {} is player {}", id, next);
                next += 1;
            } else {
                controller.player = None;
                log::debug!("Controller {} has no extended gamepad profile, ignoring it", id);
            }
        }
    }

    fn dispatch(
        &mut self,
        id: ControllerId,
        input: &SharedInput,
        change: impl FnOnce(&mut GamepadState) -> Element,
    ) {
        let Some(controller) = self.controllers.get_mut(&id) else {
            log::trace!("Event for unknown controller {}", id);
            return;
        };
        let Some(player) = controller.player else {
            return;
        };
        let element = change(&mut controller.state);
        apply_element(&controller.state, element, player, input);
    }
}

/// Stick and d-pad deflections are added and clamped so they never exceed full speed.
pub fn combine_axes(stick: f32, dpad: f32) -> f32 {
    (stick + dpad).clamp(-1.0, 1.0)
}

/// Maps a changed element of `gamepad` onto the shared player and camera state.
pub fn apply_element(gamepad: &GamepadState, element: Element, player: PlayerIndex, input: &SharedInput) {
    match element {
        Element::LeftThumbstick | Element::Dpad => {
            let movement = Vector2::new(
                combine_axes(gamepad.left_thumbstick.x, gamepad.dpad.x),
                combine_axes(gamepad.left_thumbstick.y, gamepad.dpad.y),
            );
            input.update(|state| state.player_movement = movement);
            let source = if element == Element::Dpad {
                gamepad.dpad
            } else {
                gamepad.left_thumbstick
            };
            if source.x != 0.0 {
                log::debug!("Controller: {}, {:?} X: {}", player, element, source.x);
            }
            if source.y != 0.0 {
                log::debug!("Controller: {}, {:?} Y: {}", player, element, source.y);
            }
        }
        Element::RightThumbstick => {
            let pan = gamepad.right_thumbstick * CAMERA_PAN_FACTOR;
            input.update(|state| state.camera_translation = pan);
            if gamepad.right_thumbstick != Vector2::new(0.0, 0.0) {
                log::debug!(
                    "Controller: {}, right thumbstick: {}, {}",
                    player,
                    gamepad.right_thumbstick.x,
                    gamepad.right_thumbstick.y
                );
            }
        }
        Element::LeftTrigger | Element::RightTrigger => {
            let rate = gamepad.right_trigger - gamepad.left_trigger;
            input.update(|state| state.player_rotation_y = rate);
            log::debug!(
                "Controller: {}, triggers left {} right {}",
                player,
                gamepad.left_trigger,
                gamepad.right_trigger
            );
        }
        Element::Button(button) => {
            log::info!("Controller: {}, {:?}: {}", player, button, gamepad.button(button));
        }
        Element::Motion(motion) => {
            let [gx, gy, gz] = motion.gravity;
            let [ax, ay, az] = motion.user_acceleration;
            let [rx, ry, rz] = motion.rotation_rate;
            let [qx, qy, qz, qw] = motion.attitude;
            log::debug!("Controller: {}, gravity: {}, {}, {}", player, gx, gy, gz);
            log::debug!("Controller: {}, userAcc: {}, {}, {}", player, ax, ay, az);
            log::debug!("Controller: {}, rotationRate: {}, {}, {}", player, rx, ry, rz);
            log::debug!("Controller: {}, attitude: {}, {}, {}, {}", player, qx, qy, qz, qw);
        }
    }
}

/// Source of controller events, polled once per frame.
pub trait ControllerSource {
    fn poll(&mut self) -> Vec<ControllerEvent>;
}

/// Used when no controller backend is available.
#[derive(Debug, Default)]
pub struct NoControllers;

impl ControllerSource for NoControllers {
    fn poll(&mut self) -> Vec<ControllerEvent> {
        Vec::new()
    }
}
