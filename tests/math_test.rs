use std::f32::consts::{FRAC_PI_2, PI};

use cgmath::{Matrix4, SquareMatrix, Vector3, Vector4};
use weld::math;

use crate::common::test_utils::{assert_close, assert_matrix_close, assert_vec4_close};

mod common;

#[test]
fn zero_rotation_is_identity() {
    let m = math::rotation(0.0, Vector3::new(0.3, 1.0, -2.0));
    assert_matrix_close(m, Matrix4::identity());
}

#[test]
fn quarter_turn_about_z_maps_x_to_y() {
    let m = math::rotation(FRAC_PI_2, Vector3::unit_z());
    assert_vec4_close(m * Vector4::new(1.0, 0.0, 0.0, 1.0), Vector4::new(0.0, 1.0, 0.0, 1.0));
}

#[test]
fn rotation_axis_is_normalized() {
    let unit = math::rotation(1.2, Vector3::unit_y());
    let long = math::rotation(1.2, Vector3::new(0.0, 7.5, 0.0));
    assert_matrix_close(long, unit);
}

#[test]
fn rotation_is_orthonormal() {
    let m = math::rotation(0.7, Vector3::new(1.0, 2.0, 3.0));
    let transposed = Matrix4::from_cols(
        Vector4::new(m[0][0], m[1][0], m[2][0], m[3][0]),
        Vector4::new(m[0][1], m[1][1], m[2][1], m[3][1]),
        Vector4::new(m[0][2], m[1][2], m[2][2], m[3][2]),
        Vector4::new(m[0][3], m[1][3], m[2][3], m[3][3]),
    );
    assert_matrix_close(m * transposed, Matrix4::identity());
}

#[test]
fn translation_moves_points_but_not_directions() {
    let m = math::translation(1.0, -2.0, 3.0);
    assert_vec4_close(m * Vector4::new(0.0, 0.0, 0.0, 1.0), Vector4::new(1.0, -2.0, 3.0, 1.0));
    assert_vec4_close(m * Vector4::new(1.0, 0.0, 0.0, 0.0), Vector4::new(1.0, 0.0, 0.0, 0.0));
}

#[test]
fn scale_is_undone_by_its_reciprocal() {
    let m = math::scale(2.0, 4.0, 0.5) * math::scale(0.5, 0.25, 2.0);
    assert_matrix_close(m, Matrix4::identity());
}

#[test]
fn degrees_convert_to_radians() {
    assert_close(math::degrees_to_radians(180.0), PI);
    assert_close(math::degrees_to_radians(90.0), FRAC_PI_2);
    assert_close(math::degrees_to_radians(0.0), 0.0);
}

#[test]
fn perspective_layout() {
    let (near, far) = (0.1, 100.0);
    let m = math::perspective(FRAC_PI_2, 2.0, near, far);

    assert_close(m[1][1], 1.0);
    assert_close(m[0][0], 0.5);
    assert_close(m[2][2], far / (near - far));
    assert_close(m[2][3], -1.0);
    assert_close(m[3][2], far * near / (near - far));
    assert_close(m[3][3], 0.0);
}

#[test]
fn perspective_maps_near_and_far_to_unit_depth() {
    let (near, far) = (0.1, 100.0);
    let m = math::perspective(math::degrees_to_radians(65.0), 1.5, near, far);

    let at_near = m * Vector4::new(0.0, 0.0, -near, 1.0);
    assert_close(at_near.z / at_near.w, 0.0);

    let at_far = m * Vector4::new(0.0, 0.0, -far, 1.0);
    assert!((at_far.z / at_far.w - 1.0).abs() < 1e-4);
}

#[test]
fn perspective_at_the_demo_settings() {
    let (near, far) = (0.1, 100.0);
    let fov = math::degrees_to_radians(65.0);
    let m = math::perspective(fov, 16.0 / 9.0, near, far);

    let ys = 1.0 / (fov / 2.0).tan();
    assert_close(m[1][1], ys);
    assert_close(m[0][0], ys * 9.0 / 16.0);
    assert_close(m[2][2], -100.0 / 99.9);
    assert_close(m[3][2], -10.0 / 99.9);
}
