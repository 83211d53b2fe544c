//! Keyboard and game controller input.
//!
//! Both producers write into a [`SharedInput`]; the renderer reads one
//! snapshot of it per frame.

pub mod gamepad;
pub mod keyboard;
#[cfg(feature = "gamepad")]
pub mod sdl;
pub mod state;

pub use gamepad::{ControllerSource, Gamepads, NoControllers};
pub use state::{InputState, SharedInput};

/// Opens the native controller backend, falling back to no controllers.
pub fn controller_source(enabled: bool) -> Box<dyn ControllerSource> {
    if !enabled {
        return Box::new(NoControllers);
    }
    #[cfg(feature = "gamepad")]
    {
        match sdl::SdlControllers::new() {
            Ok(controllers) => return Box::new(controllers),
            Err(e) => log::warn!("Game controllers unavailable: {:#}", e),
        }
    }
    #[cfg(not(feature = "gamepad"))]
    log::warn!("Built without the `gamepad` feature, game controllers are ignored");
    Box::new(NoControllers)
}
