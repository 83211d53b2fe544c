//! GPU-side data of the demo.
//!
//! - `model` holds vertices, meshes, the model entity and its transform
//! - `texture` holds the depth-stencil attachment

pub mod model;
pub mod texture;
