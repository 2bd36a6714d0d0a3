//! Plain data shared between the generators and the GPU side:
//!
//! - `vertex` is the position + color vertex every mesh and overlay uses
//! - `cube` holds the reference cube geometry
//! - `texture` wraps the depth buffer

pub mod cube;
pub mod texture;
pub mod vertex;
