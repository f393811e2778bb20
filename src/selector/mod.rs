//! Puzzle selection
//!
//! Turns a [`PuzzlePool`](crate::pool::PuzzlePool) into a deck of candidate
//! puzzles the player can browse.

mod deck;
mod generator;

pub use deck::{Direction, PuzzleDeck};
pub use generator::{
    MAX_MIXED_CANDIDATES, MAX_TIER_CANDIDATES, candidates_or_fallback, generate_candidates,
};
