//! # Lattice Value Noise
//!
//! Deterministic noise built from a scalar hash over integer lattice points.
//!
//! ## Why value noise over simplex?
//!
//! - The maze only needs one octave of blobby regions plus per-cell speckle
//! - The hash is a closed-form expression of its inputs, so any
//!   implementation using the same formula reproduces the same maze
//!
//! ## Determinism Guarantee
//!
//! Given the same `WorldSeed`, every sample is a pure function of its
//! coordinates. Negative coordinates go through `floor`, never truncation.

/// Lattice offsets wrap at this period.
const LATTICE_PERIOD: u64 = 8192;

/// World seed for deterministic generation.
///
/// The seed shifts the lattice the hash is evaluated on. Seed 0 is the classic
/// maze with an unshifted lattice.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct WorldSeed(u64);

impl WorldSeed {
    /// The classic, unshifted maze.
    pub const CLASSIC: Self = Self(0);

    /// Creates a new world seed.
    #[inline]
    #[must_use]
    pub const fn new(seed: u64) -> Self {
        Self(seed)
    }

    /// Returns the raw seed value.
    #[inline]
    #[must_use]
    pub const fn value(self) -> u64 {
        self.0
    }

    /// Lattice shift applied on the X and Z axes.
    #[inline]
    #[must_use]
    pub const fn lattice_offset(self) -> (i64, i64) {
        (
            (self.0 % LATTICE_PERIOD) as i64,
            ((self.0 / LATTICE_PERIOD) % LATTICE_PERIOD) as i64,
        )
    }
}

/// 2D value noise over a hashed integer lattice.
///
/// # Example
///
/// ```rust
/// use delve_procedural::noise::{LatticeNoise, WorldSeed};
///
/// let noise = LatticeNoise::new(WorldSeed::CLASSIC);
/// let value = noise.sample(12.3, -4.5);
/// assert!((0.0..1.0).contains(&value));
/// ```
#[derive(Clone, Copy, Debug)]
pub struct LatticeNoise {
    offset_x: i64,
    offset_z: i64,
}

impl LatticeNoise {
    /// Creates a noise field for the given seed.
    #[must_use]
    pub const fn new(seed: WorldSeed) -> Self {
        let (offset_x, offset_z) = seed.lattice_offset();
        Self { offset_x, offset_z }
    }

    /// Hash of one lattice point, in `[0, 1)`.
    #[inline]
    #[must_use]
    pub fn hash(&self, ix: i64, iz: i64) -> f64 {
        let x = (ix + self.offset_x) as f64;
        let z = (iz + self.offset_z) as f64;
        ((x * 12.9898 + z * 78.233).sin() * 43758.5453).abs().fract()
    }

    /// Bilinear interpolation of the lattice hash at a continuous point.
    ///
    /// # Returns
    ///
    /// A value in the range [0, 1).
    #[must_use]
    pub fn sample(&self, x: f64, z: f64) -> f64 {
        let x0 = fast_floor(x);
        let z0 = fast_floor(z);

        let s = self.hash(x0, z0);
        let t = self.hash(x0 + 1, z0);
        let u = self.hash(x0, z0 + 1);
        let v = self.hash(x0 + 1, z0 + 1);

        let fx = x - x0 as f64;
        let fz = z - z0 as f64;

        let near = s + (t - s) * fx;
        let far = u + (v - u) * fx;
        near + (far - near) * fz
    }
}

/// Floor to a lattice index.
///
/// Truncation would put -0.5 on lattice 0 instead of -1.
#[inline]
fn fast_floor(x: f64) -> i64 {
    let xi = x as i64;
    if x < xi as f64 { xi - 1 } else { xi }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_determinism() {
        let noise1 = LatticeNoise::new(WorldSeed::new(12345));
        let noise2 = LatticeNoise::new(WorldSeed::new(12345));

        for i in 0..100 {
            let x = f64::from(i) * 0.1 - 5.0;
            let z = f64::from(i) * 0.17 - 8.0;
            assert_eq!(noise1.sample(x, z), noise2.sample(x, z));
        }
    }

    #[test]
    fn test_different_seeds_shift_the_lattice() {
        let a = LatticeNoise::new(WorldSeed::new(1));
        let b = LatticeNoise::new(WorldSeed::new(2));
        assert_eq!(a.hash(1, 0), b.hash(0, 0));
        assert_ne!(a.hash(0, 0), b.hash(0, 0));
    }

    #[test]
    fn test_range() {
        let noise = LatticeNoise::new(WorldSeed::CLASSIC);

        for i in -5000..5000 {
            let x = f64::from(i) * 0.13;
            let z = f64::from(i) * -0.29;
            let value = noise.sample(x, z);
            assert!((0.0..1.0).contains(&value), "Value {value} out of range at ({x}, {z})");
        }
    }

    #[test]
    fn test_sample_matches_hash_on_lattice_points() {
        let noise = LatticeNoise::new(WorldSeed::CLASSIC);
        for (ix, iz) in [(0, 0), (3, -7), (-12, -1), (40, 9)] {
            let sampled = noise.sample(ix as f64, iz as f64);
            assert!((sampled - noise.hash(ix, iz)).abs() < 1e-12);
        }
    }

    #[test]
    fn test_continuity() {
        let noise = LatticeNoise::new(WorldSeed::CLASSIC);
        let delta = 0.001;
        for (x, z) in [(1.5, 2.5), (-3.25, 0.75), (-0.0005, -0.0005)] {
            let v1 = noise.sample(x, z);
            let v2 = noise.sample(x + delta, z);
            let v3 = noise.sample(x, z + delta);
            assert!((v1 - v2).abs() < 0.01, "Noise should be continuous at ({x}, {z})");
            assert!((v1 - v3).abs() < 0.01, "Noise should be continuous at ({x}, {z})");
        }
    }

    #[test]
    fn test_fast_floor_negative() {
        assert_eq!(fast_floor(-0.5), -1);
        assert_eq!(fast_floor(-1.0), -1);
        assert_eq!(fast_floor(0.0), 0);
        assert_eq!(fast_floor(2.9), 2);
    }

    #[test]
    fn test_classic_seed_has_no_offset() {
        assert_eq!(WorldSeed::CLASSIC.lattice_offset(), (0, 0));
        assert_eq!(WorldSeed::new(8192 + 5).lattice_offset(), (5, 1));
    }
}
