use terrain_ngin::{
    camera::CameraUniform,
    frame::FrameContext,
    math::Mat4,
    overlay::{CursorState, OVERLAY_COLOR, Viewport},
    render::{DRAWS_PER_FRAME, Pass, Render, TERRAIN_TINT, compose},
};

mod common;
use common::test_utils::*;

fn frame() -> FrameContext {
    FrameContext {
        camera: start_camera(),
        color: [1.0, 0.5, 0.0],
        viewport: viewport_800x600(),
        cursor: free_cursor(200.0, 150.0, [800, 600], [800, 600]),
    }
}

#[test]
fn draws_come_in_a_fixed_order() {
    let draws = compose(&frame());
    assert_eq!(draws.len(), DRAWS_PER_FRAME);
    assert!(matches!(draws[0], Render::Terrain(_)));
    assert!(matches!(draws[1], Render::Cube(_)));
    assert!(matches!(draws[2], Render::Tracer { .. }));
    assert!(matches!(draws[3], Render::Crosshair { .. }));

    let passes: Vec<Pass> = draws.iter().map(Render::pass).collect();
    assert_eq!(
        passes,
        vec![Pass::Scene, Pass::Scene, Pass::Overlay, Pass::Overlay]
    );
}

#[test]
fn scene_draws_share_the_frame_matrices() {
    let frame = frame();
    let (view, proj) = frame.matrices();
    let draws = compose(&frame);

    let terrain = draws[0].uniform();
    assert_eq!(*terrain, CameraUniform::new(&view, &proj, TERRAIN_TINT));

    let cube = draws[1].uniform();
    assert_eq!(cube.view, terrain.view);
    assert_eq!(cube.projection, terrain.projection);
    assert_eq!(cube.color, [1.0, 0.5, 0.0]);
}

#[test]
fn overlays_use_identity_matrices() {
    let draws = compose(&frame());
    let identity = Mat4::IDENTITY.to_cols();
    for draw in &draws[2..] {
        let uniform = draw.uniform();
        assert_eq!(uniform.view, identity);
        assert_eq!(uniform.projection, identity);
        assert_eq!(uniform.color, OVERLAY_COLOR);
    }
    // The scene draws are untouched by the overlay's identity matrices.
    assert_ne!(draws[0].uniform().view, identity);
}

#[test]
fn only_overlays_carry_vertices() {
    let frame = frame();
    let draws = compose(&frame);
    assert!(draws[0].dynamic_vertices().is_none());
    assert!(draws[1].dynamic_vertices().is_none());

    let overlay = frame.overlay();
    let tracer = draws[2].dynamic_vertices().unwrap();
    assert_eq!(tracer, overlay.tracer_vertices().as_slice());
    let crosshair = draws[3].dynamic_vertices().unwrap();
    assert_eq!(crosshair.len(), 4);
    assert_eq!(crosshair, overlay.crosshair_vertices().as_slice());
}

#[test]
fn tracer_starts_under_the_cursor() {
    let draws = compose(&frame());
    let tracer = draws[2].dynamic_vertices().unwrap();
    assert_all_close(&tracer[0].position, &[-0.5, 0.5, 0.0], EPS);
}

#[test]
fn captured_frames_start_at_the_centre() {
    let frame = FrameContext {
        cursor: CursorState::Captured,
        ..frame()
    };
    let draws = compose(&frame);
    let tracer = draws[2].dynamic_vertices().unwrap();
    assert_eq!(tracer[0].position, [0.0, 0.0, 0.0]);
}

#[test]
fn minimised_window_still_composes() {
    let frame = FrameContext {
        viewport: Viewport::full(0, 0),
        ..frame()
    };
    let draws = compose(&frame);
    for draw in &draws {
        let u = draw.uniform();
        assert!(u.view.iter().flatten().all(|v| v.is_finite()));
        assert!(u.projection.iter().flatten().all(|v| v.is_finite()));
    }
}
