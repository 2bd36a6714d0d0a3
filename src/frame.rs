//! The per-frame snapshot every core computation reads from.

use crate::{
    camera::{self, Camera},
    math::Mat4,
    overlay::{self, CursorState, OverlayGeometry, Viewport},
};

/// Everything one frame needs, captured after input handling and treated as
/// immutable until the frame is submitted.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameContext {
    pub camera: Camera,
    /// Tint of the reference cube.
    pub color: [f32; 3],
    pub viewport: Viewport,
    pub cursor: CursorState,
}

impl FrameContext {
    /// View and projection matrices for this frame.
    pub fn matrices(&self) -> (Mat4, Mat4) {
        camera::frame_matrices(&self.camera, self.viewport.width, self.viewport.height)
    }

    pub fn overlay(&self) -> OverlayGeometry {
        overlay::compute_overlay(&self.camera, &self.cursor, &self.viewport)
    }
}
