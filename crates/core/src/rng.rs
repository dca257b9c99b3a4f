//! RNG module - the injected random piece source
//!
//! The board draws catalog indices through the [`PieceRng`] capability it
//! receives at construction. Each draw is uniform over the seven shapes
//! (there is no bag). The default source is a small LCG, so a seed
//! reproduces a full game; tests inject a [`SequenceRng`] to script exact
//! piece orders.

use crate::types::PieceKind;

/// Source of catalog indices for piece creation.
pub trait PieceRng {
    /// Next catalog index, uniform over 0..7
    fn next_index(&mut self) -> usize;
}

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
    pub fn next_range(&mut self, max: u32) -> u32 {
        self.next_u32() % max
    }
}

impl PieceRng for SimpleRng {
    fn next_index(&mut self) -> usize {
        self.next_range(PieceKind::ALL.len() as u32) as usize
    }
}

/// Scripted index source: yields a fixed list of indices, cycling.
///
/// Lets tests decide exactly which pieces spawn and in what order.
#[derive(Debug, Clone)]
pub struct SequenceRng {
    indices: Vec<usize>,
    pos: usize,
}

impl SequenceRng {
    /// New source cycling over the given catalog indices
    pub fn new(indices: Vec<usize>) -> Self {
        Self { indices, pos: 0 }
    }

    /// New source cycling over the given kinds
    pub fn from_kinds(kinds: &[PieceKind]) -> Self {
        Self::new(kinds.iter().map(|k| k.index()).collect())
    }
}

impl PieceRng for SequenceRng {
    fn next_index(&mut self) -> usize {
        if self.indices.is_empty() {
            return 0;
        }
        let index = self.indices[self.pos % self.indices.len()];
        self.pos += 1;
        index
    }
}
