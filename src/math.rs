//! Matrix helpers for the transform pipeline.
//!
//! All matrices are column-major `cgmath::Matrix4<f32>`, indexed as
//! `m[column][row]`. The functions are total over well-formed input; the
//! caller is responsible for avoiding degenerate arguments such as a zero
//! rotation axis or `near == far` in [`perspective`].

use cgmath::{InnerSpace, Matrix4, Vector3, Vector4};

/// Diagonal scale matrix.
pub fn scale(sx: f32, sy: f32, sz: f32) -> Matrix4<f32> {
    Matrix4::from_cols(
        Vector4::new(sx, 0.0, 0.0, 0.0),
        Vector4::new(0.0, sy, 0.0, 0.0),
        Vector4::new(0.0, 0.0, sz, 0.0),
        Vector4::new(0.0, 0.0, 0.0, 1.0),
    )
}

/// Axis-angle rotation (Rodrigues). The axis does not need to be normalized.
pub fn rotation(radians: f32, axis: Vector3<f32>) -> Matrix4<f32> {
    let unit = axis.normalize();
    let (st, ct) = radians.sin_cos();
    let ci = 1.0 - ct;
    let (x, y, z) = (unit.x, unit.y, unit.z);
    Matrix4::from_cols(
        Vector4::new(ct + x * x * ci, y * x * ci + z * st, z * x * ci - y * st, 0.0),
        Vector4::new(x * y * ci - z * st, ct + y * y * ci, z * y * ci + x * st, 0.0),
        Vector4::new(x * z * ci + y * st, y * z * ci - x * st, ct + z * z * ci, 0.0),
        Vector4::new(0.0, 0.0, 0.0, 1.0),
    )
}

/// Translation matrix with the offset stored in the last column.
pub fn translation(tx: f32, ty: f32, tz: f32) -> Matrix4<f32> {
    Matrix4::from_cols(
        Vector4::new(1.0, 0.0, 0.0, 0.0),
        Vector4::new(0.0, 1.0, 0.0, 0.0),
        Vector4::new(0.0, 0.0, 1.0, 0.0),
        Vector4::new(tx, ty, tz, 1.0),
    )
}

/// Right-handed perspective projection mapping depth into `[0, 1]`.
///
/// `aspect_ratio` must be positive and `near_z != far_z`, otherwise the
/// result contains infinities or NaNs.
pub fn perspective(fov_y_radians: f32, aspect_ratio: f32, near_z: f32, far_z: f32) -> Matrix4<f32> {
    let ys = 1.0 / (fov_y_radians * 0.5).tan();
    let xs = ys / aspect_ratio;
    let zs = far_z / (near_z - far_z);
    Matrix4::from_cols(
        Vector4::new(xs, 0.0, 0.0, 0.0),
        Vector4::new(0.0, ys, 0.0, 0.0),
        Vector4::new(0.0, 0.0, zs, -1.0),
        Vector4::new(0.0, 0.0, zs * near_z, 0.0),
    )
}

pub fn degrees_to_radians(degrees: f32) -> f32 {
    (degrees / 180.0) * std::f32::consts::PI
}
