//! Category group pools
//!
//! A pool holds the approved groups, filed by difficulty tier. It is loaded
//! once when a session starts and never mutated by gameplay.

mod embedded;
pub mod loader;

pub use embedded::{EMBEDDED_GROUPS, EMBEDDED_GROUPS_COUNT};

use crate::core::{Difficulty, Group};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Groups filed by difficulty tier
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "BTreeMap<Difficulty, Vec<Group>>", into = "BTreeMap<Difficulty, Vec<Group>>")]
pub struct PuzzlePool {
    tiers: BTreeMap<Difficulty, Vec<Group>>,
}

impl PuzzlePool {
    /// An empty pool; generation from it always falls back
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Build a pool, filing each group under its own difficulty
    pub fn from_groups(groups: impl IntoIterator<Item = Group>) -> Self {
        let mut tiers: BTreeMap<Difficulty, Vec<Group>> = BTreeMap::new();
        for group in groups {
            tiers.entry(group.difficulty()).or_default().push(group);
        }
        Self { tiers }
    }

    /// The pool compiled into the binary
    #[must_use]
    pub fn embedded() -> Self {
        Self::from_groups(loader::groups_from_rows(EMBEDDED_GROUPS))
    }

    /// Groups of a single tier
    #[must_use]
    pub fn tier(&self, difficulty: Difficulty) -> &[Group] {
        self.tiers.get(&difficulty).map_or(&[], Vec::as_slice)
    }

    /// Every group, easiest tier first
    pub fn groups(&self) -> impl Iterator<Item = &Group> {
        self.tiers.values().flatten()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.tiers.values().map(Vec::len).sum()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Group count per tier, including empty tiers
    #[must_use]
    pub fn tier_counts(&self) -> [(Difficulty, usize); 4] {
        Difficulty::ALL.map(|d| (d, self.tier(d).len()))
    }
}

impl From<BTreeMap<Difficulty, Vec<Group>>> for PuzzlePool {
    fn from(tiers: BTreeMap<Difficulty, Vec<Group>>) -> Self {
        // Re-file by each group's own difficulty so tier lookups and
        // mixed-mode tier matching always agree.
        Self::from_groups(tiers.into_values().flatten())
    }
}

impl From<PuzzlePool> for BTreeMap<Difficulty, Vec<Group>> {
    fn from(pool: PuzzlePool) -> Self {
        pool.tiers
    }
}
