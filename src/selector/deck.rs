//! Candidate list with a cursor
//!
//! A deck is either a generated list of candidates browsed with prev/next, or
//! a single custom puzzle that disables navigation.

use super::generator::candidates_or_fallback;
use crate::core::{DifficultyMode, Puzzle};
use crate::pool::PuzzlePool;
use rand::Rng;

/// Direction for [`PuzzleDeck::navigate`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Prev,
    Next,
}

/// The puzzles a session can move between
///
/// Built only through [`generate`](Self::generate),
/// [`from_candidates`](Self::from_candidates) or [`custom`](Self::custom), so
/// a generated deck always holds at least one candidate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PuzzleDeck {
    source: DeckSource,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum DeckSource {
    Generated {
        /// Never empty: generation substitutes the placeholder puzzle
        candidates: Vec<Puzzle>,
        cursor: usize,
        mode: DifficultyMode,
    },
    Custom(Puzzle),
}

impl PuzzleDeck {
    /// Generate a fresh deck for `mode`, cursor at the first candidate
    pub fn generate<R: Rng + ?Sized>(pool: &PuzzlePool, mode: DifficultyMode, rng: &mut R) -> Self {
        Self::from_candidates(candidates_or_fallback(pool, mode, rng), mode)
    }

    /// Build a deck from an existing candidate list
    ///
    /// An empty list is replaced by the placeholder puzzle.
    #[must_use]
    pub fn from_candidates(mut candidates: Vec<Puzzle>, mode: DifficultyMode) -> Self {
        if candidates.is_empty() {
            candidates.push(Puzzle::fallback());
        }
        Self {
            source: DeckSource::Generated {
                candidates,
                cursor: 0,
                mode,
            },
        }
    }

    #[must_use]
    pub const fn custom(puzzle: Puzzle) -> Self {
        Self {
            source: DeckSource::Custom(puzzle),
        }
    }

    /// The puzzle under the cursor
    #[must_use]
    pub fn current(&self) -> &Puzzle {
        match &self.source {
            DeckSource::Generated {
                candidates, cursor, ..
            } => &candidates[*cursor],
            DeckSource::Custom(puzzle) => puzzle,
        }
    }

    #[must_use]
    pub const fn is_custom(&self) -> bool {
        matches!(self.source, DeckSource::Custom(_))
    }

    /// Mode the deck was generated for; `None` for a custom puzzle
    #[must_use]
    pub const fn mode(&self) -> Option<DifficultyMode> {
        match &self.source {
            DeckSource::Generated { mode, .. } => Some(*mode),
            DeckSource::Custom(_) => None,
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        match &self.source {
            DeckSource::Generated { candidates, .. } => candidates.len(),
            DeckSource::Custom(_) => 1,
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Zero-based position of the cursor
    #[must_use]
    pub const fn position(&self) -> usize {
        match &self.source {
            DeckSource::Generated { cursor, .. } => *cursor,
            DeckSource::Custom(_) => 0,
        }
    }

    #[must_use]
    pub fn can_navigate(&self) -> bool {
        !self.is_custom() && self.len() > 1
    }

    #[must_use]
    pub fn has_prev(&self) -> bool {
        self.can_navigate()
    }

    #[must_use]
    pub fn has_next(&self) -> bool {
        self.can_navigate()
    }

    /// Move the cursor one step with wraparound
    ///
    /// Returns `false` without moving for a custom puzzle or a single
    /// candidate.
    pub fn navigate(&mut self, direction: Direction) -> bool {
        if !self.can_navigate() {
            return false;
        }
        if let DeckSource::Generated {
            candidates, cursor, ..
        } = &mut self.source
        {
            let n = candidates.len();
            *cursor = match direction {
                Direction::Next => (*cursor + 1) % n,
                Direction::Prev => (*cursor + n - 1) % n,
            };
        }
        true
    }
}
