//! weld
//!
//! A minimal 3D demo: one OBJ mesh drawn every frame with a fixed
//! vertex/fragment pipeline, moved around by the keyboard and game
//! controllers. At most a fixed number of frames are in flight on the GPU.
//!
//! High-level modules
//! - `app`: window creation and the winit event loop
//! - `config`: startup settings
//! - `context`: GPU device, queue and window surface
//! - `data_structures`: vertices, uniforms, models and the depth texture
//! - `frame`: the in-flight limiter and the per-frame algorithm
//! - `input`: keyboard table, controller registry and the shared input state
//! - `math`: the matrix builders used for model, view and projection
//! - `pipelines`: render pipelines keyed by primitive topology
//! - `renderer`: setup and the per-frame update and draw
//! - `resources`: asset loading and GPU buffer creation
//!

pub mod app;
pub mod config;
pub mod context;
pub mod data_structures;
pub mod frame;
pub mod input;
pub mod math;
pub mod pipelines;
pub mod renderer;
pub mod resources;

pub use cgmath;
pub use wgpu;
