//! SDL2 game controller backend.

use std::collections::HashMap;

use anyhow::Context;
use sdl2::controller::{self, GameController};
use sdl2::event::Event;
use sdl2::sensor::SensorType;

use super::gamepad::{
    Axis, Button, Control, ControllerEvent, ControllerSource, MotionFilter, SensorReading,
};

/// Open SDL game controllers and the event pump they report through.
///
/// SDL only reports devices with a game controller mapping here, which is the
/// set of extended gamepads.
pub struct SdlControllers {
    _sdl: sdl2::Sdl,
    subsystem: sdl2::GameControllerSubsystem,
    event_pump: sdl2::EventPump,
    open: HashMap<u32, GameController>,
    motion: HashMap<u32, MotionFilter>,
}

impl SdlControllers {
    pub fn new() -> anyhow::Result<Self> {
        let sdl = sdl2::init()
            .map_err(anyhow::Error::msg)
            .context("could not initialise SDL")?;
        let subsystem = sdl
            .game_controller()
            .map_err(anyhow::Error::msg)
            .context("could not initialise the SDL game controller subsystem")?;
        let event_pump = sdl
            .event_pump()
            .map_err(anyhow::Error::msg)
            .context("could not create the SDL event pump")?;
        Ok(Self {
            _sdl: sdl,
            subsystem,
            event_pump,
            open: HashMap::new(),
            motion: HashMap::new(),
        })
    }

    fn open_device(&mut self, device_index: u32) -> Option<ControllerEvent> {
        match self.subsystem.open(device_index) {
            Ok(controller) => {
                let id = controller.instance_id();
                log::info!("Opened controller {} ({})", id, controller.name());
                enable_motion_sensors(id, &controller);
                self.open.insert(id, controller);
                self.motion.insert(id, MotionFilter::new());
                Some(ControllerEvent::Connected { id, extended: true })
            }
            Err(e) => {
                log::warn!("Could not open controller at index {}: {}", device_index, e);
                None
            }
        }
    }
}

impl ControllerSource for SdlControllers {
    fn poll(&mut self) -> Vec<ControllerEvent> {
        let events: Vec<Event> = self.event_pump.poll_iter().collect();
        let mut out = Vec::with_capacity(events.len());
        for event in events {
            match event {
                Event::ControllerDeviceAdded { which, .. } => {
                    out.extend(self.open_device(which));
                }
                Event::ControllerDeviceRemoved { which, .. } => {
                    self.open.remove(&which);
                    self.motion.remove(&which);
                    out.push(ControllerEvent::Disconnected { id: which });
                }
                Event::ControllerAxisMotion {
                    which, axis, value, ..
                } => {
                    let (axis, value) = map_axis(axis, value);
                    out.push(ControllerEvent::AxisMoved {
                        id: which,
                        axis,
                        value,
                    });
                }
                Event::ControllerButtonDown { which, button, .. } => {
                    out.extend(map_button(button).map(|control| ControllerEvent::Pressed {
                        id: which,
                        control,
                        value: 1.0,
                    }));
                }
                Event::ControllerButtonUp { which, button, .. } => {
                    out.extend(map_button(button).map(|control| ControllerEvent::Pressed {
                        id: which,
                        control,
                        value: 0.0,
                    }));
                }
                Event::ControllerSensorUpdated {
                    which, sensor, data, ..
                } => {
                    let Some(reading) = map_sensor(sensor, data) else {
                        continue;
                    };
                    if let Some(filter) = self.motion.get_mut(&which) {
                        out.push(ControllerEvent::Motion {
                            id: which,
                            motion: filter.apply(reading),
                        });
                    }
                }
                _ => {}
            }
        }
        out
    }
}

fn enable_motion_sensors(id: u32, controller: &GameController) {
    let mut enabled = 0;
    for sensor in [SensorType::Gyroscope, SensorType::Accelerometer] {
        if !controller.has_sensor(sensor) {
            continue;
        }
        match controller.sensor_set_enabled(sensor, true) {
            Ok(()) => enabled += 1,
            Err(e) => log::warn!("Controller {}: could not enable {:?}: {}", id, sensor, e),
        }
    }
    if enabled == 0 {
        log::warn!("Controller {} has no motion sensors", id);
    }
}

fn map_sensor(sensor: SensorType, data: [f32; 3]) -> Option<SensorReading> {
    match sensor {
        SensorType::Gyroscope => Some(SensorReading::Gyroscope(data)),
        SensorType::Accelerometer => Some(SensorReading::Accelerometer(data)),
        _ => None,
    }
}

/// SDL reports sticks as `i16` with down as positive Y and triggers in `0..=i16::MAX`.
fn map_axis(axis: controller::Axis, raw: i16) -> (Axis, f32) {
    let value = (raw as f32 / i16::MAX as f32).clamp(-1.0, 1.0);
    match axis {
        controller::Axis::LeftX => (Axis::LeftX, value),
        controller::Axis::LeftY => (Axis::LeftY, -value),
        controller::Axis::RightX => (Axis::RightX, value),
        controller::Axis::RightY => (Axis::RightY, -value),
        controller::Axis::TriggerLeft => (Axis::LeftTrigger, value.max(0.0)),
        controller::Axis::TriggerRight => (Axis::RightTrigger, value.max(0.0)),
    }
}

fn map_button(button: controller::Button) -> Option<Control> {
    let control = match button {
        controller::Button::A => Control::Button(Button::A),
        controller::Button::B => Control::Button(Button::B),
        controller::Button::X => Control::Button(Button::X),
        controller::Button::Y => Control::Button(Button::Y),
        controller::Button::LeftShoulder => Control::Button(Button::LeftShoulder),
        controller::Button::RightShoulder => Control::Button(Button::RightShoulder),
        controller::Button::LeftStick => Control::Button(Button::LeftThumbstick),
        controller::Button::RightStick => Control::Button(Button::RightThumbstick),
        controller::Button::Back => Control::Button(Button::Options),
        controller::Button::Start => Control::Button(Button::Menu),
        controller::Button::DPadUp => Control::DpadUp,
        controller::Button::DPadDown => Control::DpadDown,
        controller::Button::DPadLeft => Control::DpadLeft,
        controller::Button::DPadRight => Control::DpadRight,
        _ => return None,
    };
    Some(control)
}
