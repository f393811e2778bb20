//! Puzzle representation
//!
//! A Puzzle is four groups forming one playable round.

use super::group::word_key;
use super::{Difficulty, GROUP_SIZE, Group};
use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Number of groups in every puzzle
pub const PUZZLE_GROUPS: usize = 4;

/// Total words on a puzzle board
pub const BOARD_SIZE: usize = PUZZLE_GROUPS * GROUP_SIZE;

/// Id of the placeholder puzzle used when nothing can be generated
pub const FALLBACK_PUZZLE_ID: &str = "fallback-1";

/// Four groups with sixteen globally distinct words
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawPuzzle")]
pub struct Puzzle {
    id: String,
    groups: [Group; PUZZLE_GROUPS],
}

/// Error type for invalid puzzles
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PuzzleError {
    #[error("puzzle must have exactly 4 groups, got {0}")]
    GroupCount(usize),
    #[error("word '{0}' appears in more than one place in the puzzle")]
    DuplicateWord(String),
}

#[derive(Deserialize)]
struct RawPuzzle {
    id: String,
    groups: Vec<Group>,
}

impl TryFrom<RawPuzzle> for Puzzle {
    type Error = PuzzleError;

    fn try_from(raw: RawPuzzle) -> Result<Self, Self::Error> {
        Self::new(raw.id, raw.groups)
    }
}

impl Puzzle {
    /// Create a new validated puzzle
    ///
    /// # Errors
    /// Returns `PuzzleError` if there are not exactly four groups or if any
    /// word repeats (ignoring case) across the groups.
    pub fn new(id: impl Into<String>, groups: Vec<Group>) -> Result<Self, PuzzleError> {
        let count = groups.len();
        let groups: [Group; PUZZLE_GROUPS] = groups
            .try_into()
            .map_err(|_| PuzzleError::GroupCount(count))?;

        let mut seen = FxHashSet::default();
        for word in groups.iter().flat_map(|g| g.words().iter()) {
            if !seen.insert(word_key(word)) {
                return Err(PuzzleError::DuplicateWord(word.clone()));
            }
        }

        Ok(Self {
            id: id.into(),
            groups,
        })
    }

    /// The fixed placeholder puzzle: one sample group per tier
    #[must_use]
    pub fn fallback() -> Self {
        Self {
            id: FALLBACK_PUZZLE_ID.to_string(),
            groups: Difficulty::ALL.map(Group::placeholder),
        }
    }

    #[must_use]
    pub fn is_fallback(&self) -> bool {
        self.id == FALLBACK_PUZZLE_ID
    }

    #[inline]
    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Groups in their authored order
    #[inline]
    #[must_use]
    pub const fn groups(&self) -> &[Group; PUZZLE_GROUPS] {
        &self.groups
    }

    /// All sixteen words, group by group
    pub fn words(&self) -> impl Iterator<Item = &str> {
        self.groups
            .iter()
            .flat_map(|g| g.words().iter().map(String::as_str))
    }
}
