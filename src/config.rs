//! Startup settings of the demo.
//!
//! Everything has a sensible default; the `with_*` setters exist for embedding
//! the renderer in other binaries or tests.

/// Settings read once at startup.
#[derive(Clone, Debug)]
pub struct Config {
    pub window_title: String,
    /// OBJ file name inside the `assets/` directory.
    pub asset: String,
    /// Label of the debug group wrapping the model's draw calls.
    pub debug_group: String,
    pub fov_y_degrees: f32,
    pub near_z: f32,
    pub far_z: f32,
    /// Upper bound of frames whose GPU work may be pending at once.
    pub max_frames_in_flight: usize,
    pub clear_colour: wgpu::Color,
    /// Open native game controllers (needs the `gamepad` feature).
    pub gamepads: bool,
}

impl Config {
    pub const DEFAULT_FOV_Y_DEGREES: f32 = 65.0;
    pub const DEFAULT_NEAR_Z: f32 = 0.1;
    pub const DEFAULT_FAR_Z: f32 = 100.0;
    pub const DEFAULT_MAX_FRAMES_IN_FLIGHT: usize = 3;

    pub fn with_asset(mut self, asset: impl Into<String>) -> Self {
        self.asset = asset.into();
        self
    }

    pub fn with_window_title(mut self, title: impl Into<String>) -> Self {
        self.window_title = title.into();
        self
    }

    pub fn with_clear_colour(mut self, clear_colour: wgpu::Color) -> Self {
        self.clear_colour = clear_colour;
        self
    }

    /// A zero bound would block the first frame forever, so it is raised to one.
    pub fn with_max_frames_in_flight(mut self, frames: usize) -> Self {
        self.max_frames_in_flight = frames.max(1);
        self
    }

    pub fn with_gamepads(mut self, enabled: bool) -> Self {
        self.gamepads = enabled;
        self
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            window_title: "Weld".to_string(),
            asset: "cube.obj".to_string(),
            debug_group: "model debug group".to_string(),
            fov_y_degrees: Self::DEFAULT_FOV_Y_DEGREES,
            near_z: Self::DEFAULT_NEAR_Z,
            far_z: Self::DEFAULT_FAR_Z,
            max_frames_in_flight: Self::DEFAULT_MAX_FRAMES_IN_FLIGHT,
            clear_colour: wgpu::Color {
                r: 0.1,
                g: 0.1,
                b: 0.12,
                a: 1.0,
            },
            gamepads: true,
        }
    }
}
