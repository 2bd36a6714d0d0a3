#![allow(dead_code)]

use terrain_ngin::{
    camera::Camera,
    math::Mat4,
    overlay::{CursorState, FreeCursor, Viewport},
};

pub const EPS: f32 = 1e-5;

pub fn assert_close(actual: f32, expected: f32, eps: f32) {
    assert!(
        (actual - expected).abs() <= eps,
        "expected {} but got {} (tolerance {})",
        expected,
        actual,
        eps
    );
}

pub fn assert_all_close(actual: &[f32], expected: &[f32], eps: f32) {
    assert_eq!(actual.len(), expected.len(), "length mismatch");
    for (i, (a, e)) in actual.iter().zip(expected).enumerate() {
        assert!(
            (a - e).abs() <= eps,
            "element {}: expected {} but got {} (tolerance {})\n  actual:   {:?}\n  expected: {:?}",
            i,
            e,
            a,
            eps,
            actual,
            expected
        );
    }
}

pub fn assert_mat_close(actual: &Mat4, expected: &Mat4, eps: f32) {
    assert_all_close(&actual.0, &expected.0, eps);
}

/// The startup pose: slightly above the ground, two units down -Z.
pub fn start_camera() -> Camera {
    Camera::new([0.0, 0.5, -2.0], cgmath::Rad(0.0), cgmath::Rad(0.0), 0.02)
}

/// Two units in front of the origin, looking straight at it.
pub fn facing_origin_camera() -> Camera {
    Camera::new([0.0, 0.0, 2.0], cgmath::Rad(0.0), cgmath::Rad(0.0), 0.02)
}

pub fn free_cursor(x: f64, y: f64, window: [u32; 2], framebuffer: [u32; 2]) -> CursorState {
    CursorState::Free(FreeCursor {
        position: [x, y],
        window_size: window,
        framebuffer_size: framebuffer,
    })
}

pub fn viewport_800x600() -> Viewport {
    Viewport::full(800, 600)
}
