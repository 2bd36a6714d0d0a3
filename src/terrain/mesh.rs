//! Heightmap terrain built from layered value noise.

use crate::{data_structures::vertex::ColorVertex, terrain::noise::NoiseField};

/// Below this height a vertex is water.
pub const WATER_LEVEL: f32 = -0.5;
/// At or above this height a vertex is rock.
pub const ROCK_LEVEL: f32 = 0.3;

pub const WATER_COLOR: [f32; 3] = [0.1, 0.2, 0.6];
pub const GRASS_COLOR: [f32; 3] = [0.1, 0.6, 0.2];
pub const ROCK_COLOR: [f32; 3] = [0.5, 0.35, 0.2];

/// Fixed generation constants for the terrain grid.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TerrainParams {
    /// Vertices per side.
    pub resolution: u32,
    /// World distance between neighbouring vertices.
    pub cell_size: f32,
    pub octaves: u32,
    /// Noise frequency per grid step for the first octave.
    pub frequency: f32,
    /// Total height span; normalized noise `n` maps to `(n - 0.5) * height_scale`.
    pub height_scale: f32,
}

impl Default for TerrainParams {
    fn default() -> Self {
        Self {
            resolution: 256,
            cell_size: 0.2,
            octaves: 4,
            frequency: 0.08,
            height_scale: 4.0,
        }
    }
}

impl TerrainParams {
    pub fn vertex_count(&self) -> usize {
        let r = self.resolution as usize;
        r * r
    }

    pub fn index_count(&self) -> usize {
        let quads = self.resolution.saturating_sub(1) as usize;
        quads * quads * 6
    }

    /// Distance from the grid centre to its first row/column.
    pub fn half_extent(&self) -> f32 {
        self.resolution.saturating_sub(1) as f32 * self.cell_size * 0.5
    }
}

/// Height and color of one grid vertex.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HeightSample {
    pub height: f32,
    pub color: [f32; 3],
}

/// Hard-cutoff color bands, no blending.
pub fn band_color(height: f32) -> [f32; 3] {
    if height < WATER_LEVEL {
        WATER_COLOR
    } else if height < ROCK_LEVEL {
        GRASS_COLOR
    } else {
        ROCK_COLOR
    }
}

/// Fractal sum of `octaves` noise layers, frequency doubling and amplitude
/// halving per layer, normalized by the total amplitude back into `[0, 1]`.
pub fn fbm(noise: &NoiseField, x: f32, y: f32, octaves: u32) -> f32 {
    let mut n = 0.0;
    let mut amp = 1.0;
    let mut freq = 1.0;
    let mut total = 0.0;
    for _ in 0..octaves {
        n += noise.sample(x * freq, y * freq) * amp;
        total += amp;
        freq *= 2.0;
        amp *= 0.5;
    }
    if total > 0.0 { n / total } else { 0.0 }
}

/// Sample the grid vertex at column `x`, row `z`.
pub fn height_sample(noise: &NoiseField, params: &TerrainParams, x: u32, z: u32) -> HeightSample {
    let fx = x as f32 * params.frequency;
    let fz = z as f32 * params.frequency;
    let n = fbm(noise, fx, fz, params.octaves);
    let height = (n - 0.5) * params.height_scale;
    HeightSample {
        height,
        color: band_color(height),
    }
}

/// The static terrain: `resolution²` vertices on the XZ plane, heights on Y,
/// and a triangle list covering every grid cell with two triangles.
///
/// Triangles wind counter-clockwise seen from +Y, so face normals point up.
#[derive(Clone, Debug, PartialEq)]
pub struct TerrainMesh {
    pub vertices: Vec<ColorVertex>,
    pub indices: Vec<u32>,
}

impl TerrainMesh {
    /// Build the terrain with the default 256×256 parameters.
    pub fn build() -> Self {
        Self::build_with(&TerrainParams::default())
    }

    pub fn build_with(params: &TerrainParams) -> Self {
        let noise = NoiseField::new();
        let side = params.resolution;
        let half = params.half_extent();

        let mut vertices = Vec::with_capacity(params.vertex_count());
        for z in 0..side {
            for x in 0..side {
                let world_x = -half + x as f32 * params.cell_size;
                let world_z = -half + z as f32 * params.cell_size;
                let sample = height_sample(&noise, params, x, z);
                vertices.push(ColorVertex::new(
                    [world_x, sample.height, world_z],
                    sample.color,
                ));
            }
        }

        let mut indices = Vec::with_capacity(params.index_count());
        for z in 0..side.saturating_sub(1) {
            for x in 0..side.saturating_sub(1) {
                let i0 = z * side + x;
                let i1 = i0 + 1;
                let i2 = i0 + side;
                let i3 = i2 + 1;
                indices.extend_from_slice(&[i0, i2, i1, i1, i2, i3]);
            }
        }

        Self { vertices, indices }
    }

    /// Interleaved `[x, y, z, r, g, b]` floats, ready for a vertex buffer.
    pub fn vertex_floats(&self) -> &[f32] {
        bytemuck::cast_slice(&self.vertices)
    }
}
