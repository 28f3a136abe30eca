//! RNG module - deterministic random number generation
//!
//! A simple LCG keeps sessions reproducible: the same seed produces the same
//! board, refills, and power-up grants. Constants from Numerical Recipes.

/// Simple LCG (Linear Congruential Generator) RNG
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
        // a=1664525, c=1013904223, m=2^32
        self.state = self.state.wrapping_mul(1664525).wrapping_add(1013904223);
        self.state
    }

    /// Generate random value in range [0, max)
    pub fn next_range(&mut self, max: u32) -> u32 {
        self.next_u32() % max
    }

    /// Pick a random element from a non-empty slice
    pub fn pick<'a, T>(&mut self, slice: &'a [T]) -> &'a T {
        debug_assert!(!slice.is_empty());
        &slice[self.next_range(slice.len() as u32) as usize]
    }

    /// Current internal state (for restarting with the same sequence)
    pub fn state(&self) -> u32 {
        self.state
    }
}
