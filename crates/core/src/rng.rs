//! RNG module - weighted random piece generation
//!
//! Pieces are drawn from a fixed population of 100 slots in which every kind
//! appears as many times as its weight (I15 O15 T15 L15 J15 S12 Z10 X3).
//! Each draw picks one slot uniformly, so draws are independent.
//!
//! Also provides a simple LCG so a seed reproduces a whole game.

use crate::types::{PieceKind, TOTAL_WEIGHT};

/// Simple LCG (Linear Congruential Generator) RNG
/// Uses constants from Numerical Recipes
#[derive(Debug, Clone)]
pub struct SimpleRng {
    state: u32,
}

impl SimpleRng {
    /// Create a new RNG with the given seed
    pub fn new(seed: u32) -> Self {
        // Avoid 0 seed which would produce all zeros
        let state = if seed == 0 { 1 } else { seed };
        Self { state }
    }

    /// Generate next random u32
    pub fn next_u32(&mut self) -> u32 {
        // LCG formula: (a * state + c) mod m
        // Using Numerical Recipes constants: a=1664525, c=1013904223, m=2^32
        self.state = self.state.wrapping_mul(1664525).wrapping_add(1013904223);
        self.state
    }

    /// Generate random value in range [0, max)
    ///
    /// Scales by the high bits; the low bits of an LCG cycle with short periods.
    pub fn next_range(&mut self, max: u32) -> u32 {
        ((self.next_u32() as u64 * max as u64) >> 32) as u32
    }

    /// Current internal state
    pub fn state(&self) -> u32 {
        self.state
    }
}

/// Weighted piece generator
#[derive(Debug, Clone)]
pub struct PieceGenerator {
    population: [PieceKind; TOTAL_WEIGHT as usize],
    rng: SimpleRng,
    seed: u32,
}

impl PieceGenerator {
    /// Create a new generator with the given seed
    pub fn new(seed: u32) -> Self {
        Self {
            population: build_population(),
            rng: SimpleRng::new(seed),
            seed,
        }
    }

    /// Draw the next piece kind
    pub fn next_kind(&mut self) -> PieceKind {
        let slot = self.rng.next_range(self.population.len() as u32) as usize;
        self.population[slot]
    }

    /// The weighted population, in weight-table order
    pub fn population(&self) -> &[PieceKind] {
        &self.population
    }

    /// The seed this generator was created with
    pub fn seed(&self) -> u32 {
        self.seed
    }
}

impl Default for PieceGenerator {
    fn default() -> Self {
        Self::new(1)
    }
}

/// Every kind repeated `weight` times, in [`PieceKind::ALL`] order.
fn build_population() -> [PieceKind; TOTAL_WEIGHT as usize] {
    let mut out = [PieceKind::I; TOTAL_WEIGHT as usize];
    let mut i = 0usize;
    for kind in PieceKind::ALL {
        for _ in 0..kind.weight() {
            out[i] = kind;
            i += 1;
        }
    }
    debug_assert_eq!(i, out.len());
    out
}
