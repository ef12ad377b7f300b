//! RNG module - uniform random piece generation
//!
//! Every new piece is drawn uniformly over the seven kinds (no bag). The same
//! generator supplies the random colours of the game-over sweep.
//!
//! Backed by a small seeded LCG so that a seed fully determines a game.

use crate::pieces::Piece;
use crate::types::PieceKind;

/// Simple LCG (Linear Congruential Generator) RNG
/// Uses constants from Numerical Recipes
#[derive(Debug, Clone)]
pub struct SimpleRng {
    state: u32,
}

impl SimpleRng {
    /// Create a new RNG with the given seed
    pub fn new(seed: u32) -> Self {
        // A zero state is a fixed point of the multiply step, nudge it.
        let state = if seed == 0 { 1 } else { seed };
        Self { state }
    }

    /// Generate next random u32
    pub fn next_u32(&mut self) -> u32 {
        self.state = self.state.wrapping_mul(1664525).wrapping_add(1013904223);
        self.state
    }

    /// Generate random value in range [0, max)
    ///
    /// Multiply-shift keeps the high bits, which are the well mixed ones in an
    /// LCG.
    pub fn next_range(&mut self, max: u32) -> u32 {
        ((self.next_u32() as u64 * max as u64) >> 32) as u32
    }

    pub fn state(&self) -> u32 {
        self.state
    }
}

/// Uniform piece generator
#[derive(Debug, Clone)]
pub struct PieceGenerator {
    rng: SimpleRng,
    seed: u32,
}

impl PieceGenerator {
    pub fn new(seed: u32) -> Self {
        Self {
            rng: SimpleRng::new(seed),
            seed,
        }
    }

    /// Draw a piece kind uniformly over all seven
    pub fn next_kind(&mut self) -> PieceKind {
        let idx = self.rng.next_range(PieceKind::COUNT as u32) as usize;
        PieceKind::ALL[idx]
    }

    /// Draw a new piece at its spawn position
    pub fn spawn(&mut self) -> Piece {
        Piece::spawn(self.next_kind())
    }

    /// Seed this generator was created with
    pub fn seed(&self) -> u32 {
        self.seed
    }
}

impl Default for PieceGenerator {
    fn default() -> Self {
        Self::new(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rng_deterministic() {
        let mut rng1 = SimpleRng::new(12345);
        let mut rng2 = SimpleRng::new(12345);

        for _ in 0..100 {
            assert_eq!(rng1.next_u32(), rng2.next_u32());
        }
    }

    #[test]
    fn test_rng_zero_seed() {
        let mut rng = SimpleRng::new(0);
        assert_eq!(rng.state(), 1);
        assert_ne!(rng.next_u32(), 0);
    }

    #[test]
    fn test_next_range_bounds() {
        let mut rng = SimpleRng::new(7);
        for _ in 0..1000 {
            assert!(rng.next_range(7) < 7);
        }
    }

    #[test]
    fn test_generator_covers_all_kinds() {
        let mut generator = PieceGenerator::new(42);
        let mut seen = [0u32; PieceKind::COUNT];
        for _ in 0..7000 {
            seen[generator.next_kind().index()] += 1;
        }
        // Roughly uniform: every kind within 30% of the expected 1000.
        for (i, count) in seen.iter().enumerate() {
            assert!((700..=1300).contains(count), "kind {i} drawn {count} times");
        }
    }

    #[test]
    fn test_generator_same_seed_same_sequence() {
        let mut a = PieceGenerator::new(99);
        let mut b = PieceGenerator::new(99);
        for _ in 0..50 {
            assert_eq!(a.spawn(), b.spawn());
        }
        assert_eq!(a.seed(), 99);
    }
}
