//! Screen-space overlays: the tracer from the cursor (or screen centre) to the
//! reference cube, and a fixed-pixel-size crosshair.
//!
//! Everything here produces normalized device coordinates and is meant to be
//! drawn with identity view/projection and no depth test.

use crate::{
    camera::{self, Camera},
    data_structures::vertex::ColorVertex,
};

/// Crosshair arm length in pixels.
pub const CROSSHAIR_HALF_LENGTH_PX: f32 = 8.0;
/// Crosshair arm length in NDC when the viewport has no extent on an axis.
pub const DEGENERATE_HALF_SIZE: f32 = 0.02;
/// World position the tracer points at (centre of the reference cube).
pub const CUBE_ANCHOR: [f32; 3] = [0.0, 0.0, 0.0];
pub const OVERLAY_COLOR: [f32; 3] = [1.0, 1.0, 1.0];

/// 2 vertices × (3 position + 3 color).
pub const TRACER_FLOATS: usize = 12;
/// 4 vertices × (3 position + 3 color).
pub const CROSSHAIR_FLOATS: usize = 24;

pub type NdcPoint = [f32; 2];

/// Drawable region of the framebuffer in physical pixels, origin bottom-left.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Viewport {
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
}

impl Viewport {
    /// A viewport covering a whole `width × height` framebuffer.
    pub fn full(width: u32, height: u32) -> Self {
        Self {
            x: 0,
            y: 0,
            width,
            height,
        }
    }

    pub fn aspect(&self) -> f32 {
        camera::aspect_ratio(self.width, self.height)
    }

    pub fn is_degenerate(&self) -> bool {
        self.width == 0 || self.height == 0
    }
}

/// Where the pointer is, as seen by the overlay.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CursorState {
    /// Hidden and pinned by the window; the tracer starts at the screen centre.
    Captured,
    Free(FreeCursor),
}

/// A visible cursor in window-client coordinates (logical pixels, origin top-left).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FreeCursor {
    pub position: [f64; 2],
    /// Window client size in logical pixels.
    pub window_size: [u32; 2],
    /// Framebuffer size in physical pixels.
    pub framebuffer_size: [u32; 2],
}

impl FreeCursor {
    /// Logical-to-physical scale per axis; `1.0` for an empty window.
    pub fn scale(&self) -> [f64; 2] {
        let axis = |window: u32, framebuffer: u32| {
            if window > 0 {
                framebuffer as f64 / window as f64
            } else {
                1.0
            }
        };
        [
            axis(self.window_size[0], self.framebuffer_size[0]),
            axis(self.window_size[1], self.framebuffer_size[1]),
        ]
    }

    /// Map the cursor into the viewport's NDC square, clamping at the edges.
    pub fn to_ndc(&self, viewport: &Viewport) -> NdcPoint {
        let [sx, sy] = self.scale();
        let px = self.position[0] * sx;
        let py = self.position[1] * sy;

        // Bottom-left origin, relative to the viewport.
        let gl_x = (px - viewport.x as f64).clamp(0.0, viewport.width as f64);
        let gl_y = ((self.framebuffer_size[1] as f64 - py) - viewport.y as f64)
            .clamp(0.0, viewport.height as f64);

        let axis = |p: f64, extent: u32| {
            if extent == 0 {
                0.0
            } else {
                (p / extent as f64 * 2.0 - 1.0) as f32
            }
        };
        [axis(gl_x, viewport.width), axis(gl_y, viewport.height)]
    }
}

impl CursorState {
    /// Tracer origin in NDC.
    pub fn ndc(&self, viewport: &Viewport) -> NdcPoint {
        match self {
            CursorState::Captured => [0.0, 0.0],
            CursorState::Free(cursor) => cursor.to_ndc(viewport),
        }
    }
}

/// Line segment from the cursor to the projected cube anchor.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tracer {
    pub start: NdcPoint,
    pub end: NdcPoint,
}

/// Two orthogonal segments centred on the NDC origin:
/// `[left, right, bottom, top]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Crosshair {
    pub points: [NdcPoint; 4],
}

impl Crosshair {
    /// Half-lengths `(dx, dy)` in NDC for a fixed pixel size, per axis.
    pub fn half_extents(viewport: &Viewport) -> (f32, f32) {
        let axis = |extent: u32| {
            if extent > 0 {
                CROSSHAIR_HALF_LENGTH_PX / extent as f32 * 2.0
            } else {
                DEGENERATE_HALF_SIZE
            }
        };
        (axis(viewport.width), axis(viewport.height))
    }

    pub fn for_viewport(viewport: &Viewport) -> Self {
        let (dx, dy) = Self::half_extents(viewport);
        Self {
            points: [[-dx, 0.0], [dx, 0.0], [0.0, -dy], [0.0, dy]],
        }
    }
}

/// Both overlays for one frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OverlayGeometry {
    pub tracer: Tracer,
    pub crosshair: Crosshair,
}

impl OverlayGeometry {
    pub fn tracer_vertices(&self) -> [ColorVertex; 2] {
        [
            ndc_vertex(self.tracer.start),
            ndc_vertex(self.tracer.end),
        ]
    }

    pub fn crosshair_vertices(&self) -> [ColorVertex; 4] {
        self.crosshair.points.map(ndc_vertex)
    }
}

fn ndc_vertex(p: NdcPoint) -> ColorVertex {
    ColorVertex::new([p[0], p[1], 0.0], OVERLAY_COLOR)
}

/// Compute the overlay geometry for `camera` looking through `viewport`.
///
/// When the anchor sits exactly on the camera plane it has no screen position;
/// the tracer then collapses onto its start point.
pub fn compute_overlay(camera: &Camera, cursor: &CursorState, viewport: &Viewport) -> OverlayGeometry {
    let (view, proj) = camera::frame_matrices(camera, viewport.width, viewport.height);
    let start = cursor.ndc(viewport);
    let end = camera::project_to_ndc(&view, &proj, CUBE_ANCHOR)
        .map(|ndc| [ndc[0], ndc[1]])
        .unwrap_or(start);

    OverlayGeometry {
        tracer: Tracer { start, end },
        crosshair: Crosshair::for_viewport(viewport),
    }
}
