//! Pool loading utilities
//!
//! Provides functions to load pools from files, the embedded table, or the
//! backend. Loading from the backend never fails: errors degrade to an empty
//! pool so generation falls back to the placeholder puzzle.

use super::PuzzlePool;
use crate::backend::PuzzleBackend;
use crate::core::{Difficulty, Group};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::Path;
use thiserror::Error;

/// Error type for pool files
#[derive(Debug, Error)]
pub enum PoolError {
    #[error("failed to read pool file: {0}")]
    Io(#[from] io::Error),
    #[error("failed to parse pool file: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Accepted pool file layouts
#[derive(Deserialize)]
#[serde(untagged)]
enum PoolFile {
    /// `{"easy": [...], "medium": [...]}`, the shape the backend returns
    Tiers(BTreeMap<Difficulty, Vec<Group>>),
    /// `[{"category": ..., "words": [...], "difficulty": ...}, ...]`
    Flat(Vec<Group>),
}

/// Load a pool from a JSON file
///
/// The file may be either a map from tier to groups or a flat array of
/// groups. Any invalid group makes the whole file invalid.
///
/// # Errors
///
/// Returns `PoolError` if the file cannot be read or parsed.
///
/// # Examples
/// ```no_run
/// use connections_puzzle::pool::loader::load_from_file;
///
/// let pool = load_from_file("data/pool.json").unwrap();
/// println!("Loaded {} groups", pool.len());
/// ```
pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<PuzzlePool, PoolError> {
    let content = fs::read_to_string(path)?;
    let pool = match serde_json::from_str::<PoolFile>(&content)? {
        PoolFile::Tiers(tiers) => PuzzlePool::from(tiers),
        PoolFile::Flat(groups) => PuzzlePool::from_groups(groups),
    };
    Ok(pool)
}

/// Convert embedded rows to groups
///
/// Rows with an unknown difficulty or an invalid group are skipped.
///
/// # Examples
/// ```
/// use connections_puzzle::pool::loader::groups_from_rows;
///
/// let groups = groups_from_rows(&[("easy", "Pets", ["CAT", "DOG", "FISH", "BIRD"])]);
/// assert_eq!(groups.len(), 1);
/// ```
#[must_use]
pub fn groups_from_rows(rows: &[(&str, &str, [&str; 4])]) -> Vec<Group> {
    rows.iter()
        .filter_map(|&(difficulty, category, words)| {
            let difficulty = difficulty.parse::<Difficulty>().ok()?;
            Group::new(category, words, difficulty).ok()
        })
        .collect()
}

/// Fetch the approved pool from the backend, degrading to an empty pool
///
/// The session never sees a fetch error; it simply gets the fallback puzzle.
pub fn load_from_backend<B: PuzzleBackend + ?Sized>(backend: &B) -> PuzzlePool {
    match backend.fetch_approved_groups() {
        Ok(pool) => {
            tracing::info!(groups = pool.len(), "Loaded approved groups");
            pool
        }
        Err(err) => {
            tracing::warn!("Failed to load approved groups, using empty pool: {err}");
            PuzzlePool::empty()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::{BackendError, MemoryBackend};
    use std::io::Write;

    #[test]
    fn groups_from_rows_converts_valid_rows() {
        let rows = &[
            ("easy", "Pets", ["CAT", "DOG", "FISH", "BIRD"]),
            ("expert", "Palindromes", ["LEVEL", "RADAR", "KAYAK", "CIVIC"]),
        ];
        let groups = groups_from_rows(rows);

        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].category(), "Pets");
        assert_eq!(groups[1].difficulty(), Difficulty::Expert);
    }

    #[test]
    fn groups_from_rows_skips_invalid() {
        let rows = &[
            ("easy", "Pets", ["CAT", "DOG", "FISH", "BIRD"]),
            ("legendary", "Bad tier", ["A", "B", "C", "D"]),
            ("easy", "Dupes", ["A", "A", "C", "D"]),
            ("hard", "", ["E", "F", "G", "H"]),
        ];
        let groups = groups_from_rows(rows);

        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].category(), "Pets");
    }

    #[test]
    fn groups_from_rows_empty() {
        let rows: &[(&str, &str, [&str; 4])] = &[];
        assert!(groups_from_rows(rows).is_empty());
    }

    #[test]
    fn load_from_file_flat_layout() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"[{{"category":"Pets","words":["CAT","DOG","FISH","BIRD"],"difficulty":"easy"}}]"#
        )
        .unwrap();

        let pool = load_from_file(file.path()).unwrap();
        assert_eq!(pool.tier(Difficulty::Easy).len(), 1);
    }

    #[test]
    fn load_from_file_tier_layout() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{"hard":[{{"category":"Greek","words":["ALPHA","BETA","GAMMA","DELTA"],"difficulty":"hard"}}]}}"#
        )
        .unwrap();

        let pool = load_from_file(file.path()).unwrap();
        assert_eq!(pool.tier(Difficulty::Hard).len(), 1);
    }

    #[test]
    fn load_from_file_reports_parse_errors() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "not json").unwrap();
        assert!(matches!(load_from_file(file.path()), Err(PoolError::Parse(_))));
    }

    #[test]
    fn load_from_file_missing() {
        assert!(matches!(
            load_from_file("/definitely/not/here.json"),
            Err(PoolError::Io(_))
        ));
    }

    #[test]
    fn load_from_backend_degrades_to_empty_pool() {
        let backend = MemoryBackend::default();
        backend.fail_next_with(BackendError::Unavailable("offline".to_string()));
        assert!(load_from_backend(&backend).is_empty());
    }

    #[test]
    fn load_from_backend_returns_approved_groups() {
        let backend = MemoryBackend::with_pool(PuzzlePool::embedded());
        assert_eq!(load_from_backend(&backend).len(), PuzzlePool::embedded().len());
    }
}
