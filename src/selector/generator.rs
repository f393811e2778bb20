//! Candidate puzzle generation
//!
//! Builds playable rounds by sampling groups from a pool. Generation never
//! fails: when the pool cannot support a single candidate the caller gets the
//! fixed placeholder puzzle instead.

use crate::core::{Difficulty, DifficultyMode, Group, PUZZLE_GROUPS, Puzzle};
use crate::pool::PuzzlePool;
use rand::Rng;
use rand::seq::SliceRandom;
use rustc_hash::FxHashSet;

/// Attempt limit for mixed-difficulty generation
pub const MAX_MIXED_CANDIDATES: usize = 20;

/// Attempt limit for single-tier generation
pub const MAX_TIER_CANDIDATES: usize = 10;

/// Generate candidate puzzles for a mode
///
/// May return an empty list; see [`candidates_or_fallback`] for the variant
/// that always yields something playable.
///
/// # Examples
/// ```
/// use connections_puzzle::core::DifficultyMode;
/// use connections_puzzle::pool::PuzzlePool;
/// use connections_puzzle::selector::generate_candidates;
///
/// let pool = PuzzlePool::embedded();
/// let candidates = generate_candidates(&pool, DifficultyMode::Mixed, &mut rand::rng());
/// assert!(!candidates.is_empty());
/// ```
pub fn generate_candidates<R: Rng + ?Sized>(
    pool: &PuzzlePool,
    mode: DifficultyMode,
    rng: &mut R,
) -> Vec<Puzzle> {
    let candidates = match mode {
        DifficultyMode::Mixed => mixed_candidates(pool, rng),
        DifficultyMode::Tier(tier) => tier_candidates(pool, tier, rng),
    };
    tracing::debug!(%mode, count = candidates.len(), "Generated candidates");
    candidates
}

/// Generate candidates, substituting the placeholder puzzle for an empty list
pub fn candidates_or_fallback<R: Rng + ?Sized>(
    pool: &PuzzlePool,
    mode: DifficultyMode,
    rng: &mut R,
) -> Vec<Puzzle> {
    let candidates = generate_candidates(pool, mode, rng);
    if candidates.is_empty() {
        tracing::warn!(%mode, groups = pool.len(), "Not enough groups, using placeholder puzzle");
        vec![Puzzle::fallback()]
    } else {
        candidates
    }
}

/// One group per tier where possible, topped up with a single filler
fn mixed_candidates<R: Rng + ?Sized>(pool: &PuzzlePool, rng: &mut R) -> Vec<Puzzle> {
    let mut groups: Vec<&Group> = pool.groups().collect();
    if groups.len() < PUZZLE_GROUPS {
        return Vec::new();
    }

    let attempts = MAX_MIXED_CANDIDATES.min(groups.len() / PUZZLE_GROUPS);
    let mut candidates = Vec::with_capacity(attempts);

    for attempt in 0..attempts {
        groups.shuffle(rng);

        let mut picked: Vec<&Group> = Difficulty::ALL
            .iter()
            .filter_map(|&tier| groups.iter().copied().find(|g| g.difficulty() == tier))
            .collect();

        if picked.len() < PUZZLE_GROUPS {
            let filler = groups
                .iter()
                .copied()
                .find(|g| !picked.iter().any(|p| std::ptr::eq(*p, *g)));
            picked.extend(filler);
        }

        if picked.len() != PUZZLE_GROUPS {
            tracing::debug!(attempt, picked = picked.len(), "Skipping short mixed candidate");
            continue;
        }

        let id = format!("mixed-{}", attempt + 1);
        match Puzzle::new(id, picked.into_iter().cloned().collect()) {
            Ok(puzzle) => candidates.push(puzzle),
            Err(err) => tracing::debug!(attempt, "Rejected mixed candidate: {err}"),
        }
    }

    candidates
}

/// Four groups of one tier, skipping repeats of the same category set
fn tier_candidates<R: Rng + ?Sized>(
    pool: &PuzzlePool,
    tier: Difficulty,
    rng: &mut R,
) -> Vec<Puzzle> {
    let mut groups: Vec<&Group> = pool.tier(tier).iter().collect();
    if groups.len() < PUZZLE_GROUPS {
        return Vec::new();
    }

    let attempts = MAX_TIER_CANDIDATES.min(groups.len() / PUZZLE_GROUPS);
    let mut candidates = Vec::with_capacity(attempts);
    let mut seen: FxHashSet<Vec<&str>> = FxHashSet::default();

    for attempt in 0..attempts {
        groups.shuffle(rng);
        let chosen = &groups[..PUZZLE_GROUPS];

        let mut categories: Vec<&str> = chosen.iter().map(|&g| g.category()).collect();
        categories.sort_unstable();
        if seen.contains(&categories) {
            tracing::debug!(attempt, "Skipping repeated category set");
            continue;
        }

        let id = format!("{tier}-{}", attempt + 1);
        match Puzzle::new(id, chosen.iter().map(|&g| g.clone()).collect()) {
            Ok(puzzle) => {
                seen.insert(categories);
                candidates.push(puzzle);
            }
            Err(err) => tracing::debug!(attempt, "Rejected {tier} candidate: {err}"),
        }
    }

    candidates
}
