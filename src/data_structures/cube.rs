use crate::data_structures::vertex::ColorVertex;

/// Half the edge length of the reference cube.
pub const CUBE_HALF_EXTENT: f32 = 0.1;

const WHITE: [f32; 3] = [1.0, 1.0, 1.0];
const H: f32 = CUBE_HALF_EXTENT;

/// Corners of the reference cube centred on the world origin. The vertex color
/// is white so the per-draw `uColor` decides the final tint.
pub const CUBE_VERTICES: [ColorVertex; 8] = [
    ColorVertex::new([-H, -H, -H], WHITE),
    ColorVertex::new([H, -H, -H], WHITE),
    ColorVertex::new([H, H, -H], WHITE),
    ColorVertex::new([-H, H, -H], WHITE),
    ColorVertex::new([-H, -H, H], WHITE),
    ColorVertex::new([H, -H, H], WHITE),
    ColorVertex::new([H, H, H], WHITE),
    ColorVertex::new([-H, H, H], WHITE),
];

/// Two triangles per face, six faces.
pub const CUBE_INDICES: [u32; 36] = [
    0, 1, 2, 2, 3, 0, // back
    4, 5, 6, 6, 7, 4, // front
    0, 1, 5, 5, 4, 0, // bottom
    2, 3, 7, 7, 6, 2, // top
    0, 3, 7, 7, 4, 0, // left
    1, 2, 6, 6, 5, 1, // right
];
