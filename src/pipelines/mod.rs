//! Render pipelines: one for depth-tested scene meshes, one for screen-space
//! overlay lines. Both share the same shader and uniform layout.

pub mod basic;
