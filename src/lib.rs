//! terrain-ngin
//!
//! A procedurally generated terrain viewer: a fractal-noise height field
//! rendered with a free-flying camera, a reference cube at the origin, and two
//! screen-space overlays (a tracer from the cursor to the cube and a
//! crosshair). The math behind the terrain, the camera and the overlays lives
//! in plain, GPU-free modules; the window and wgpu plumbing sit on top.
//!
//! High-level modules
//! - `math`: column-major `Mat4` and the handful of operations the frame needs
//! - `terrain`: value noise and the terrain mesh built from it
//! - `camera`: camera pose, view/projection matrices, controller and uniforms
//! - `overlay`: cursor/viewport mapping, tracer and crosshair geometry
//! - `frame`: the immutable per-frame snapshot
//! - `render`: composition of one frame into an ordered list of draws
//! - `data_structures`: vertex layout, cube geometry and the depth texture
//! - `pipelines`: scene and overlay render pipelines
//! - `resources`: GPU buffers for meshes, line overlays and uniforms
//! - `context`: window, surface, device and queue
//! - `flow`: the winit event loop
//! - `config`, `logging`: startup configuration and logger setup
//!

pub mod camera;
pub mod config;
pub mod context;
pub mod data_structures;
pub mod flow;
pub mod frame;
pub mod logging;
pub mod math;
pub mod overlay;
pub mod pipelines;
pub mod render;
pub mod resources;
pub mod terrain;
