//! Draft validation
//!
//! Validation is pure and reports every rule a draft breaks, so the creator
//! can show all problems at once.

use super::{DraftGroup, PuzzleDraft};
use crate::core::{GROUP_SIZE, PUZZLE_GROUPS, word_key};
use rustc_hash::FxHashMap;
use std::fmt;

/// One broken rule; group numbers are 1-based
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Violation {
    /// Group has words but no category
    MissingCategory { group: usize },
    /// Group has between one and three words
    IncompleteGroup { group: usize, filled: usize },
    /// An empty slot is followed by a filled one
    GapInGroup { group: usize },
    /// Some, but not all, groups are complete
    IncompleteGroups { complete: usize },
    /// Words used more than once, ignoring case
    DuplicateWords { words: Vec<String> },
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingCategory { group } => write!(f, "Group {group} needs a category."),
            Self::IncompleteGroup { group, filled } => {
                write!(f, "Group {group} needs {GROUP_SIZE} words ({filled} filled).")
            }
            Self::GapInGroup { group } => write!(f, "Group {group} has missing words."),
            Self::IncompleteGroups { complete } => write!(
                f,
                "Complete all {PUZZLE_GROUPS} groups ({complete}/{PUZZLE_GROUPS} complete)."
            ),
            Self::DuplicateWords { words } => {
                write!(f, "All words must be unique (repeated: {}).", words.join(", "))
            }
        }
    }
}

/// Outcome of validating a draft
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationReport {
    pub violations: Vec<Violation>,
    /// Groups with a category and four words
    pub complete_groups: usize,
}

impl ValidationReport {
    /// Valid means no violations and every group complete
    ///
    /// A blank draft has no violations but is still not valid.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.violations.is_empty() && self.complete_groups == PUZZLE_GROUPS
    }
}

impl fmt::Display for ValidationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.violations.is_empty() && !self.is_valid() {
            return f.write_str("The puzzle is empty.");
        }
        for (i, violation) in self.violations.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{violation}")?;
        }
        Ok(())
    }
}

/// An empty slot followed by a filled one
fn has_gap(group: &DraftGroup) -> bool {
    let words = group.words();
    words.iter().enumerate().any(|(i, word)| {
        word.trim().is_empty() && words[i + 1..].iter().any(|w| !w.trim().is_empty())
    })
}

/// Check a draft against every creator rule
#[must_use]
pub fn validate(draft: &PuzzleDraft) -> ValidationReport {
    let mut violations = Vec::new();
    let mut complete_groups = 0;

    for (index, group) in draft.groups().iter().enumerate() {
        let number = index + 1;
        let filled = group.filled_count();
        let has_category = !group.category().trim().is_empty();

        if !has_category && group.has_content() {
            violations.push(Violation::MissingCategory { group: number });
        }
        if (1..GROUP_SIZE).contains(&filled) {
            violations.push(Violation::IncompleteGroup {
                group: number,
                filled,
            });
        }
        let gap = has_gap(group);
        if gap {
            violations.push(Violation::GapInGroup { group: number });
        }

        if has_category && filled == GROUP_SIZE && !gap {
            complete_groups += 1;
        }
    }

    if (1..PUZZLE_GROUPS).contains(&complete_groups) {
        violations.push(Violation::IncompleteGroups {
            complete: complete_groups,
        });
    }

    let duplicates = duplicate_words(draft);
    if !duplicates.is_empty() {
        violations.push(Violation::DuplicateWords { words: duplicates });
    }

    ValidationReport {
        violations,
        complete_groups,
    }
}

/// Repeated words in first-seen order, each listed once
fn duplicate_words(draft: &PuzzleDraft) -> Vec<String> {
    let mut counts: FxHashMap<String, usize> = FxHashMap::default();
    let mut repeated: Vec<&str> = Vec::new();

    for word in draft
        .groups()
        .iter()
        .flat_map(|g| g.words().iter())
        .map(|w| w.trim())
        .filter(|w| !w.is_empty())
    {
        let count = counts.entry(word_key(word)).or_insert(0);
        *count += 1;
        if *count == 2 {
            repeated.push(word);
        }
    }

    repeated.into_iter().map(str::to_string).collect()
}
