//! Candidate generation command
//!
//! Lists the puzzles a mode would produce from the current pool.

use crate::core::{Difficulty, DifficultyMode, Puzzle};
use crate::pool::PuzzlePool;
use crate::selector::generate_candidates;
use rand::Rng;

/// Result of generating candidates
pub struct GenerateResult {
    pub mode: DifficultyMode,
    pub tier_counts: [(Difficulty, usize); 4],
    pub candidates: Vec<Puzzle>,
}

impl GenerateResult {
    /// No candidate could be built; play would fall back to the placeholder
    #[must_use]
    pub fn is_fallback(&self) -> bool {
        self.candidates.is_empty()
    }
}

/// Generate candidates for `mode` without substituting the placeholder
pub fn generate<R: Rng + ?Sized>(
    pool: &PuzzlePool,
    mode: DifficultyMode,
    rng: &mut R,
) -> GenerateResult {
    GenerateResult {
        mode,
        tier_counts: pool.tier_counts(),
        candidates: generate_candidates(pool, mode, rng),
    }
}
