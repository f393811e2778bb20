//! Guess evaluation

use crate::core::{Group, Puzzle};

/// Find the group containing every selected word
///
/// Comparison ignores case. Because a puzzle's sixteen words are distinct, at
/// most one group can match a four-word selection.
///
/// # Examples
/// ```
/// use connections_puzzle::core::Puzzle;
/// use connections_puzzle::game::evaluate;
///
/// let puzzle = Puzzle::fallback();
/// let guess = ["sample1", "SAMPLE2", "SAMPLE3", "SAMPLE4"];
/// assert_eq!(evaluate(&puzzle, &guess).map(|g| g.words()[0].as_str()), Some("SAMPLE1"));
///
/// let wrong = ["SAMPLE1", "SAMPLE2", "SAMPLE3", "SAMPLE5"];
/// assert!(evaluate(&puzzle, &wrong).is_none());
/// ```
#[must_use]
pub fn evaluate<'p, S: AsRef<str>>(puzzle: &'p Puzzle, selected: &[S]) -> Option<&'p Group> {
    if selected.is_empty() {
        return None;
    }
    puzzle
        .groups()
        .iter()
        .find(|group| selected.iter().all(|word| group.contains(word.as_ref())))
}
