//! Core domain types for the puzzle
//!
//! Groups, puzzles and difficulty tiers. Every constructor validates, so the
//! rest of the crate can rely on the word-uniqueness invariants.

pub mod bundle;
mod difficulty;
mod group;
mod puzzle;

pub use difficulty::{Difficulty, DifficultyMode, ParseDifficultyError};
pub use group::{GROUP_SIZE, Group, GroupError, word_key};
pub use puzzle::{BOARD_SIZE, FALLBACK_PUZZLE_ID, PUZZLE_GROUPS, Puzzle, PuzzleError};

#[cfg(test)]
pub(crate) use puzzle::fixtures;
