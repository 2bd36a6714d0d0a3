//! Frame composition.
//!
//! [`compose`] turns a [`FrameContext`] into the ordered list of draws for one
//! frame. Each [`Render`] carries its own uniform block and, for overlays, the
//! vertices to upload, so the GPU side only has to copy and submit.
//!
//! Draw order matters: the scene meshes go first with depth testing, then the
//! overlays on top of them with identity matrices and no depth test.

use crate::{
    camera::CameraUniform,
    data_structures::vertex::ColorVertex,
    frame::FrameContext,
    overlay::OVERLAY_COLOR,
};

/// Color multiplier for the terrain; its vertex colors are used as-is.
pub const TERRAIN_TINT: [f32; 3] = [1.0, 1.0, 1.0];

/// Which pipeline a draw needs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pass {
    /// Depth-tested triangle lists in world space.
    Scene,
    /// Lines in NDC, drawn over everything.
    Overlay,
}

/// One draw of the frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Render {
    Terrain(CameraUniform),
    Cube(CameraUniform),
    Tracer {
        vertices: [ColorVertex; 2],
        uniform: CameraUniform,
    },
    Crosshair {
        vertices: [ColorVertex; 4],
        uniform: CameraUniform,
    },
}

impl Render {
    pub fn uniform(&self) -> &CameraUniform {
        match self {
            Render::Terrain(uniform) | Render::Cube(uniform) => uniform,
            Render::Tracer { uniform, .. } | Render::Crosshair { uniform, .. } => uniform,
        }
    }

    pub fn pass(&self) -> Pass {
        match self {
            Render::Terrain(_) | Render::Cube(_) => Pass::Scene,
            Render::Tracer { .. } | Render::Crosshair { .. } => Pass::Overlay,
        }
    }

    /// Per-frame vertices for overlay draws; scene meshes are static.
    pub fn dynamic_vertices(&self) -> Option<&[ColorVertex]> {
        match self {
            Render::Tracer { vertices, .. } => Some(vertices.as_slice()),
            Render::Crosshair { vertices, .. } => Some(vertices.as_slice()),
            Render::Terrain(_) | Render::Cube(_) => None,
        }
    }
}

/// Number of draws [`compose`] emits every frame.
pub const DRAWS_PER_FRAME: usize = 4;

/// Terrain, cube, tracer, crosshair, in that order.
pub fn compose(frame: &FrameContext) -> [Render; DRAWS_PER_FRAME] {
    let (view, projection) = frame.matrices();
    let overlay = frame.overlay();
    let screen = CameraUniform::screen_space(OVERLAY_COLOR);

    [
        Render::Terrain(CameraUniform::new(&view, &projection, TERRAIN_TINT)),
        Render::Cube(CameraUniform::new(&view, &projection, frame.color)),
        Render::Tracer {
            vertices: overlay.tracer_vertices(),
            uniform: screen,
        },
        Render::Crosshair {
            vertices: overlay.crosshair_vertices(),
            uniform: screen,
        },
    ]
}
