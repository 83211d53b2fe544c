#![allow(dead_code)]

use cgmath::{Matrix4, Vector4};
use weld::frame::FrameHandler;

pub const EPSILON: f32 = 1e-5;

pub fn assert_close(actual: f32, expected: f32) {
    assert!(
        (actual - expected).abs() <= EPSILON,
        "expected {expected}, got {actual}"
    );
}

pub fn assert_vec4_close(actual: Vector4<f32>, expected: Vector4<f32>) {
    for i in 0..4 {
        assert!(
            (actual[i] - expected[i]).abs() <= EPSILON,
            "component {i}: expected {expected:?}, got {actual:?}"
        );
    }
}

pub fn assert_matrix_close(actual: Matrix4<f32>, expected: Matrix4<f32>) {
    for col in 0..4 {
        for row in 0..4 {
            assert!(
                (actual[col][row] - expected[col][row]).abs() <= EPSILON,
                "m[{col}][{row}]: expected {expected:?}, got {actual:?}"
            );
        }
    }
}

/// Stand-in for the renderer that records what the frame loop asked of it.
///
/// Submitted frames stay "on the GPU" until [`FakeFrames::complete_all`] runs
/// their completion callbacks; `wait_for_gpu` does the same, so a full limiter
/// always makes progress.
#[derive(Default)]
pub struct FakeFrames {
    pub drawable_available: bool,
    pub updates: u32,
    pub gpu_waits: u32,
    pub submitted: u32,
    pending: Vec<Box<dyn FnOnce() + Send + 'static>>,
}

impl FakeFrames {
    pub fn with_drawable() -> Self {
        Self {
            drawable_available: true,
            ..Default::default()
        }
    }

    pub fn without_drawable() -> Self {
        Self::default()
    }

    pub fn in_flight(&self) -> usize {
        self.pending.len()
    }

    pub fn complete_all(&mut self) {
        for on_complete in self.pending.drain(..) {
            on_complete();
        }
    }
}

impl FrameHandler for FakeFrames {
    type Drawable = u32;

    fn wait_for_gpu(&mut self) {
        self.gpu_waits += 1;
        self.complete_all();
    }

    fn update(&mut self) {
        self.updates += 1;
    }

    fn next_drawable(&mut self) -> Option<u32> {
        self.drawable_available.then_some(self.submitted)
    }

    fn submit(&mut self, _drawable: u32, on_complete: Box<dyn FnOnce() + Send + 'static>) {
        self.submitted += 1;
        self.pending.push(on_complete);
    }
}
