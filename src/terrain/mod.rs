//! Procedural terrain: the noise field and the heightmap mesh built from it.

pub mod mesh;
pub mod noise;

pub use mesh::{TerrainMesh, TerrainParams};
pub use noise::NoiseField;
