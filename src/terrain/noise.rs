//! Deterministic 2D value noise.

/// Lattice period of the hash. Every sample repeats after this many units on
/// either axis.
pub const PERIOD: i32 = 256;

/// Value noise over an integer lattice with smoothstep interpolation.
///
/// Each lattice corner gets a pseudo-random value from a fixed integer hash, so
/// the field is identical across runs and machines. Samples are always in
/// `[0, 1]`.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoiseField;

impl NoiseField {
    pub fn new() -> Self {
        Self
    }

    /// Hash of the lattice corner `(ix, iy)`, already reduced to `0..=255`.
    pub fn hash(ix: i32, iy: i32) -> i32 {
        (ix.wrapping_add(iy.wrapping_mul(57))).wrapping_mul(131) & 255
    }

    /// Sample the field at `(x, y)`.
    ///
    /// The containing cell is found with `floor`. For non-negative input this
    /// is the same as truncating toward zero, which is all the terrain ever
    /// feeds in; for negative input `floor` keeps the fractional part in
    /// `[0, 1)` so the interpolation never overshoots.
    pub fn sample(&self, x: f32, y: f32) -> f32 {
        let x0 = x.floor();
        let y0 = y.floor();
        let xi = (x0 as i32) & (PERIOD - 1);
        let yi = (y0 as i32) & (PERIOD - 1);
        let xf = x - x0;
        let yf = y - y0;

        let corner = |dx: i32, dy: i32| Self::hash(xi + dx, yi + dy) as f32 / 255.0;
        let n00 = corner(0, 0);
        let n10 = corner(1, 0);
        let n01 = corner(0, 1);
        let n11 = corner(1, 1);

        let u = smoothstep(xf);
        let v = smoothstep(yf);

        let bottom = n00 * (1.0 - u) + n10 * u;
        let top = n01 * (1.0 - u) + n11 * u;
        bottom * (1.0 - v) + top * v
    }
}

/// Hermite ease curve `3t² - 2t³`.
pub fn smoothstep(t: f32) -> f32 {
    t * t * (3.0 - 2.0 * t)
}
