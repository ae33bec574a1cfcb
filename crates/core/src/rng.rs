//! RNG module - weighted shape selection
//!
//! The engine only needs uniform draws in `[0, 1)`; [`RandomSource`] is the seam
//! where a hardware or OS randomness source plugs in.
//! [`SimpleRng`] is a small LCG used by tests and by the terminal binary.

use crate::types::ShapeKind;

/// Uniform randomness consumed by the engine
pub trait RandomSource {
    /// Next uniform draw in `[0, 1)`
    fn next_f64(&mut self) -> f64;
}

/// Simple LCG (Linear Congruential Generator) RNG
/// Uses constants from Numerical Recipes
#[derive(Debug, Clone)]
pub struct SimpleRng {
    state: u32,
    seed: u32,
}

impl SimpleRng {
    /// Create a new RNG with the given seed
    pub fn new(seed: u32) -> Self {
        // Avoid 0 seed which would produce all zeros
        let seed = if seed == 0 { 1 } else { seed };
        Self { state: seed, seed }
    }

    pub fn seed(&self) -> u32 {
        self.seed
    }

    /// Generate next random u32
    pub fn next_u32(&mut self) -> u32 {
        // LCG formula: (a * state + c) mod m
        // Using Numerical Recipes constants: a=1664525, c=1013904223, m=2^32
        self.state = self.state.wrapping_mul(1664525).wrapping_add(1013904223);
        self.state
    }
}

impl RandomSource for SimpleRng {
    fn next_f64(&mut self) -> f64 {
        // Low LCG bits have short periods; keep the top 24.
        (self.next_u32() >> 8) as f64 / (1u32 << 24) as f64
    }
}

impl<R: RandomSource + ?Sized> RandomSource for &mut R {
    fn next_f64(&mut self) -> f64 {
        (**self).next_f64()
    }
}

/// Draw a shape kind with the fixed spawn weights
pub fn draw_shape(rng: &mut impl RandomSource) -> ShapeKind {
    ShapeKind::from_draw(rng.next_f64())
}
