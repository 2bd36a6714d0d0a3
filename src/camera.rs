//! Camera state, view/projection matrices and the input controller.
//!
//! The matrices are assembled by hand into [`Mat4`]s: a right-handed, Y-up view
//! built from yaw/pitch, and a GL-style perspective projection that maps view
//! depth into `[-1, 1]` with `w' = -z`. [`project_to_ndc`] is the single
//! world-to-screen chain used both for drawing and for placing overlays, so the
//! two can never disagree.

use cgmath::{Point3, Rad, Vector3};
use winit::{
    event::{ElementState, KeyEvent, WindowEvent},
    keyboard::{KeyCode, PhysicalKey},
};

use crate::math::{Mat4, Vec4};

pub const FOV_Y: cgmath::Deg<f32> = cgmath::Deg(60.0);
pub const Z_NEAR: f32 = 0.1;
pub const Z_FAR: f32 = 100.0;

/// Snapshot of the free-flying camera.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    pub position: Point3<f32>,
    /// Rotation about +Y.
    pub yaw: Rad<f32>,
    /// Rotation about +X, applied after yaw. Positive looks down.
    pub pitch: Rad<f32>,
    /// World units moved per frame while a movement key is held.
    pub speed: f32,
}

impl Camera {
    pub fn new<V: Into<Point3<f32>>, Y: Into<Rad<f32>>, P: Into<Rad<f32>>>(
        position: V,
        yaw: Y,
        pitch: P,
        speed: f32,
    ) -> Self {
        Self {
            position: position.into(),
            yaw: yaw.into(),
            pitch: pitch.into(),
            speed,
        }
    }

    /// World-to-camera matrix, `Rx(pitch) · Ry(yaw) · T(-position)`, written out
    /// element by element.
    pub fn view_matrix(&self) -> Mat4 {
        let (sy, cy) = self.yaw.0.sin_cos();
        let (sp, cp) = self.pitch.0.sin_cos();
        let Point3 { x, y, z } = self.position;

        Mat4([
            cy,
            sp * sy,
            -cp * sy,
            0.0,
            0.0,
            cp,
            sp,
            0.0,
            sy,
            -sp * cy,
            cp * cy,
            0.0,
            -x * cy - z * sy,
            -x * sp * sy - y * cp + z * sp * cy,
            x * cp * sy - y * sp - z * cp * cy,
            1.0,
        ])
    }

    /// Horizontal direction the camera faces at zero pitch.
    pub fn forward_xz(&self) -> Vector3<f32> {
        let (sy, cy) = self.yaw.0.sin_cos();
        Vector3::new(sy, 0.0, -cy)
    }

    /// Horizontal strafe direction (to the right), shortened by the pitch cosine.
    pub fn strafe_xz(&self) -> Vector3<f32> {
        let (sy, cy) = self.yaw.0.sin_cos();
        let cp = self.pitch.0.cos();
        Vector3::new(cy * cp, 0.0, sy * cp)
    }
}

/// Viewport aspect ratio; a zero height (minimised window) falls back to `1.0`.
pub fn aspect_ratio(width: u32, height: u32) -> f32 {
    if height == 0 {
        1.0
    } else {
        width as f32 / height as f32
    }
}

/// Right-handed perspective projection with clip `w = -z_view`.
pub fn perspective<F: Into<Rad<f32>>>(aspect: f32, fovy: F, znear: f32, zfar: f32) -> Mat4 {
    let fovy: Rad<f32> = fovy.into();
    let f = 1.0 / (fovy.0 * 0.5).tan();
    let a = (zfar + znear) / (znear - zfar);
    let b = (2.0 * zfar * znear) / (znear - zfar);
    Mat4([
        f / aspect,
        0.0,
        0.0,
        0.0,
        0.0,
        f,
        0.0,
        0.0,
        0.0,
        0.0,
        a,
        -1.0,
        0.0,
        0.0,
        b,
        0.0,
    ])
}

/// Perspective parameters, with the aspect ratio kept in sync with the viewport.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projection {
    aspect: f32,
    fovy: Rad<f32>,
    znear: f32,
    zfar: f32,
}

impl Projection {
    pub fn new<F: Into<Rad<f32>>>(width: u32, height: u32, fovy: F, znear: f32, zfar: f32) -> Self {
        Self {
            aspect: aspect_ratio(width, height),
            fovy: fovy.into(),
            znear,
            zfar,
        }
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        self.aspect = aspect_ratio(width, height);
    }

    pub fn aspect(&self) -> f32 {
        self.aspect
    }

    pub fn calc_matrix(&self) -> Mat4 {
        perspective(self.aspect, self.fovy, self.znear, self.zfar)
    }
}

impl Default for Projection {
    fn default() -> Self {
        Self::new(1, 1, FOV_Y, Z_NEAR, Z_FAR)
    }
}

/// View and projection for one frame through a `width × height` viewport.
pub fn frame_matrices(camera: &Camera, width: u32, height: u32) -> (Mat4, Mat4) {
    let projection = Projection::new(width, height, FOV_Y, Z_NEAR, Z_FAR);
    (camera.view_matrix(), projection.calc_matrix())
}

/// `projection · view · (world, 1)`.
pub fn project_to_clip(view: &Mat4, projection: &Mat4, world: [f32; 3]) -> Vec4 {
    let eye = view.transform([world[0], world[1], world[2], 1.0]);
    projection.transform(eye)
}

/// Perspective divide. `None` when the point lies on the camera plane (`w == 0`).
pub fn clip_to_ndc(clip: Vec4) -> Option<[f32; 3]> {
    let w = clip[3];
    if w.abs() <= f32::EPSILON {
        return None;
    }
    Some([clip[0] / w, clip[1] / w, clip[2] / w])
}

pub fn project_to_ndc(view: &Mat4, projection: &Mat4, world: [f32; 3]) -> Option<[f32; 3]> {
    clip_to_ndc(project_to_clip(view, projection, world))
}

/// GPU layout of the per-draw uniform block (`uView`, `uProjection`, `uColor`).
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct CameraUniform {
    pub view: [[f32; 4]; 4],
    pub projection: [[f32; 4]; 4],
    pub color: [f32; 3],
    // Uniforms require 16 byte (4 float) spacing
    _padding: u32,
}

impl CameraUniform {
    pub fn new(view: &Mat4, projection: &Mat4, color: [f32; 3]) -> Self {
        Self {
            view: view.to_cols(),
            projection: projection.to_cols(),
            color,
            _padding: 0,
        }
    }

    /// Identity matrices: vertices are already in NDC.
    pub fn screen_space(color: [f32; 3]) -> Self {
        Self::new(&Mat4::IDENTITY, &Mat4::IDENTITY, color)
    }
}

/// Keyboard/mouse state that moves a [`Camera`] once per frame.
#[derive(Debug, Clone)]
pub struct CameraController {
    forward: bool,
    backward: bool,
    left: bool,
    right: bool,
    up: bool,
    down: bool,
    rotate_horizontal: f32,
    rotate_vertical: f32,
    sensitivity: f32,
    pitch_limit: f32,
}

impl CameraController {
    pub fn new(sensitivity: f32, pitch_limit: f32) -> Self {
        Self {
            forward: false,
            backward: false,
            left: false,
            right: false,
            up: false,
            down: false,
            rotate_horizontal: 0.0,
            rotate_vertical: 0.0,
            sensitivity,
            pitch_limit,
        }
    }

    /// Record a key transition. Returns whether the key is a movement key.
    pub fn process_keyboard(&mut self, key: KeyCode, state: ElementState) -> bool {
        let pressed = state.is_pressed();
        match key {
            KeyCode::KeyW => self.forward = pressed,
            KeyCode::KeyS => self.backward = pressed,
            KeyCode::KeyA => self.left = pressed,
            KeyCode::KeyD => self.right = pressed,
            KeyCode::Space => self.up = pressed,
            KeyCode::ShiftLeft | KeyCode::ShiftRight => self.down = pressed,
            _ => return false,
        }
        true
    }

    pub fn handle_window_events(&mut self, event: &WindowEvent) -> bool {
        match event {
            WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        physical_key: PhysicalKey::Code(key),
                        state,
                        ..
                    },
                ..
            } => self.process_keyboard(*key, *state),
            // Keys held while the window lost focus would otherwise stay stuck.
            WindowEvent::Focused(false) => {
                self.release_all();
                false
            }
            _ => false,
        }
    }

    /// Accumulate raw mouse motion (pixels) until the next [`update_camera`](Self::update_camera).
    pub fn handle_mouse(&mut self, dx: f64, dy: f64) {
        self.rotate_horizontal += dx as f32;
        self.rotate_vertical += dy as f32;
    }

    pub fn release_all(&mut self) {
        self.forward = false;
        self.backward = false;
        self.left = false;
        self.right = false;
        self.up = false;
        self.down = false;
    }

    /// Apply pending rotation, then movement, to `camera`.
    pub fn update_camera(&mut self, camera: &mut Camera) {
        camera.yaw.0 += self.rotate_horizontal * self.sensitivity;
        camera.pitch.0 += self.rotate_vertical * self.sensitivity;
        camera.pitch.0 = camera.pitch.0.clamp(-self.pitch_limit, self.pitch_limit);
        self.rotate_horizontal = 0.0;
        self.rotate_vertical = 0.0;

        let speed = camera.speed;
        let forward = camera.forward_xz();
        let strafe = camera.strafe_xz();
        if self.forward {
            camera.position += forward * speed;
        }
        if self.backward {
            camera.position -= forward * speed;
        }
        if self.left {
            camera.position -= strafe * speed;
        }
        if self.right {
            camera.position += strafe * speed;
        }
        if self.up {
            camera.position.y += speed;
        }
        if self.down {
            camera.position.y -= speed;
        }
    }
}
