use cgmath::{Deg, Matrix4, Rad, SquareMatrix, Vector3};
use terrain_ngin::{
    camera::{
        self, Camera, CameraController, CameraUniform, FOV_Y, Projection, Z_FAR, Z_NEAR,
        aspect_ratio, perspective,
    },
    math::Mat4,
};
use winit::{
    event::{ElementState, WindowEvent},
    keyboard::KeyCode,
};

mod common;
use common::test_utils::*;

#[test]
fn view_is_pitch_times_yaw_times_translation() {
    let camera = Camera::new([1.5, -0.25, 3.0], Rad(0.7), Rad(-0.3), 0.02);
    let expected =
        Mat4::rotation_x(-0.3) * Mat4::rotation_y(0.7) * Mat4::translation(-1.5, 0.25, -3.0);
    assert_mat_close(&camera.view_matrix(), &expected, EPS);
}

#[test]
fn view_matches_cgmath_rotations() {
    let camera = Camera::new([-4.0, 2.0, 0.5], Rad(-1.2), Rad(0.9), 0.02);
    let expected: Matrix4<f32> = Matrix4::from_angle_x(Rad(0.9))
        * Matrix4::from_angle_y(Rad(-1.2))
        * Matrix4::from_translation(Vector3::new(4.0, -2.0, -0.5));
    assert_mat_close(&camera.view_matrix(), &expected.into(), EPS);
}

#[test]
fn view_moves_the_eye_to_the_origin() {
    let camera = Camera::new([3.0, 1.0, -7.0], Rad(2.1), Rad(0.4), 0.02);
    let eye = camera.view_matrix().transform([3.0, 1.0, -7.0, 1.0]);
    assert_all_close(&eye, &[0.0, 0.0, 0.0, 1.0], 1e-5);
}

#[test]
fn projection_matches_cgmath_perspective() {
    let aspect = 800.0 / 600.0;
    let ours = perspective(aspect, FOV_Y, Z_NEAR, Z_FAR);
    let theirs: Mat4 = cgmath::perspective(Deg(60.0), aspect, 0.1, 100.0).into();
    assert_mat_close(&ours, &theirs, 1e-5);
    assert_eq!(ours.get(3, 2), -1.0);
    assert_eq!(ours.get(3, 3), 0.0);
}

#[test]
fn aspect_falls_back_for_zero_height() {
    assert_eq!(aspect_ratio(800, 0), 1.0);
    assert_eq!(aspect_ratio(0, 0), 1.0);
    assert_close(aspect_ratio(800, 600), 4.0 / 3.0, EPS);

    let mut projection = Projection::new(800, 600, FOV_Y, Z_NEAR, Z_FAR);
    projection.resize(1024, 0);
    assert_eq!(projection.aspect(), 1.0);
    assert_eq!(Projection::default().aspect(), 1.0);
}

#[test]
fn point_in_front_lands_inside_the_depth_range() {
    let camera = facing_origin_camera();
    let (view, proj) = camera::frame_matrices(&camera, 800, 600);
    let ndc = camera::project_to_ndc(&view, &proj, [0.0, 0.0, 0.0]).unwrap();
    assert_close(ndc[0], 0.0, EPS);
    assert_close(ndc[1], 0.0, EPS);
    assert!((-1.0..=1.0).contains(&ndc[2]));

    // One unit ahead of the eye.
    let near = camera::project_to_ndc(&view, &proj, [0.0, 0.0, 1.0]).unwrap();
    assert!((-1.0..=1.0).contains(&near[2]));
    assert!(near[2] < ndc[2]);
}

#[test]
fn clip_w_is_negated_view_depth() {
    let camera = facing_origin_camera();
    let (view, proj) = camera::frame_matrices(&camera, 800, 600);
    let clip = camera::project_to_clip(&view, &proj, [0.0, 0.0, 0.0]);
    assert_close(clip[3], 2.0, EPS);
}

#[test]
fn points_on_the_camera_plane_have_no_ndc() {
    assert_eq!(camera::clip_to_ndc([1.0, 1.0, 1.0, 0.0]), None);
    assert_eq!(camera::clip_to_ndc([2.0, 4.0, 1.0, 2.0]), Some([1.0, 2.0, 0.5]));
}

#[test]
fn uniform_carries_matrices_and_color() {
    let camera = start_camera();
    let (view, proj) = camera::frame_matrices(&camera, 800, 600);
    let uniform = CameraUniform::new(&view, &proj, [1.0, 0.5, 0.0]);
    assert_eq!(uniform.view, view.to_cols());
    assert_eq!(uniform.projection, proj.to_cols());
    assert_eq!(uniform.color, [1.0, 0.5, 0.0]);
    assert_eq!(std::mem::size_of::<CameraUniform>(), 144);

    let screen = CameraUniform::screen_space([1.0; 3]);
    let identity: [[f32; 4]; 4] = Matrix4::<f32>::identity().into();
    assert_eq!(screen.view, identity);
    assert_eq!(screen.projection, identity);
}

#[test]
fn forward_key_moves_along_the_view_direction() {
    let mut camera = start_camera();
    let mut controller = CameraController::new(0.002, 1.5);
    assert!(controller.process_keyboard(KeyCode::KeyW, ElementState::Pressed));
    controller.update_camera(&mut camera);
    assert_all_close(
        &[camera.position.x, camera.position.y, camera.position.z],
        &[0.0, 0.5, -2.02],
        EPS,
    );

    controller.process_keyboard(KeyCode::KeyW, ElementState::Released);
    controller.update_camera(&mut camera);
    assert_close(camera.position.z, -2.02, EPS);
}

#[test]
fn strafe_and_vertical_keys() {
    let mut camera = start_camera();
    let mut controller = CameraController::new(0.002, 1.5);
    controller.process_keyboard(KeyCode::KeyD, ElementState::Pressed);
    controller.process_keyboard(KeyCode::Space, ElementState::Pressed);
    controller.update_camera(&mut camera);
    assert_all_close(
        &[camera.position.x, camera.position.y, camera.position.z],
        &[0.02, 0.52, -2.0],
        EPS,
    );

    let mut camera = start_camera();
    let mut controller = CameraController::new(0.002, 1.5);
    controller.process_keyboard(KeyCode::KeyA, ElementState::Pressed);
    controller.process_keyboard(KeyCode::ShiftLeft, ElementState::Pressed);
    controller.update_camera(&mut camera);
    assert_all_close(
        &[camera.position.x, camera.position.y, camera.position.z],
        &[-0.02, 0.48, -2.0],
        EPS,
    );
}

#[test]
fn strafe_shrinks_with_pitch() {
    let camera = Camera::new([0.0, 0.0, 0.0], Rad(0.0), Rad(1.0), 0.02);
    assert_close(camera.strafe_xz().x, 1.0f32.cos(), EPS);
    // Forward ignores pitch.
    assert_close(camera.forward_xz().z, -1.0, EPS);
}

#[test]
fn mouse_rotates_and_pitch_is_clamped() {
    let mut camera = start_camera();
    let mut controller = CameraController::new(0.002, 1.5);
    controller.handle_mouse(100.0, 0.0);
    controller.update_camera(&mut camera);
    assert_close(camera.yaw.0, 0.2, EPS);
    assert_eq!(camera.pitch.0, 0.0);

    controller.handle_mouse(0.0, 10_000.0);
    controller.update_camera(&mut camera);
    assert_eq!(camera.pitch.0, 1.5);

    controller.handle_mouse(0.0, -100_000.0);
    controller.update_camera(&mut camera);
    assert_eq!(camera.pitch.0, -1.5);

    // Motion is consumed once applied.
    controller.update_camera(&mut camera);
    assert_eq!(camera.pitch.0, -1.5);
    assert_close(camera.yaw.0, 0.2, EPS);
}

#[test]
fn losing_focus_releases_held_keys() {
    let mut camera = start_camera();
    let mut controller = CameraController::new(0.002, 1.5);
    controller.process_keyboard(KeyCode::KeyW, ElementState::Pressed);
    assert!(!controller.handle_window_events(&WindowEvent::Focused(false)));
    controller.update_camera(&mut camera);
    assert_eq!(camera, start_camera());
}

#[test]
fn other_keys_are_not_consumed() {
    let mut controller = CameraController::new(0.002, 1.5);
    assert!(!controller.process_keyboard(KeyCode::Escape, ElementState::Pressed));
    assert!(!controller.process_keyboard(KeyCode::KeyQ, ElementState::Pressed));
}
