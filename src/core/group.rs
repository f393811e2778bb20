//! Category group representation
//!
//! A Group is one category of exactly four related words.

use super::Difficulty;
use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Number of words in every group
pub const GROUP_SIZE: usize = 4;

/// Normalize a word for comparison
///
/// Words compare trimmed and case-insensitively everywhere in the crate.
#[inline]
#[must_use]
pub fn word_key(word: &str) -> String {
    word.trim().to_lowercase()
}

/// One category of four related words
///
/// Construction validates the group, so every `Group` in the program has a
/// non-empty category and four non-empty, case-insensitively distinct words.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawGroup")]
pub struct Group {
    category: String,
    words: [String; GROUP_SIZE],
    difficulty: Difficulty,
}

/// Error type for invalid groups
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GroupError {
    #[error("group category must not be empty")]
    EmptyCategory,
    #[error("group must have exactly 4 words, got {0}")]
    WordCount(usize),
    #[error("word {0} of the group is empty")]
    EmptyWord(usize),
    #[error("word '{0}' appears more than once in the group")]
    DuplicateWord(String),
}

/// Unvalidated wire shape of a group
#[derive(Deserialize)]
struct RawGroup {
    category: String,
    words: Vec<String>,
    difficulty: Difficulty,
}

impl TryFrom<RawGroup> for Group {
    type Error = GroupError;

    fn try_from(raw: RawGroup) -> Result<Self, Self::Error> {
        Self::new(raw.category, raw.words, raw.difficulty)
    }
}

impl Group {
    /// Create a new validated group
    ///
    /// Category and words are trimmed; the original casing is kept.
    ///
    /// # Errors
    /// Returns `GroupError` if the category is blank, the word count is not 4,
    /// a word is blank, or two words are equal ignoring case.
    ///
    /// # Examples
    /// ```
    /// use connections_puzzle::core::{Difficulty, Group};
    ///
    /// let group = Group::new("Pets", ["CAT", "DOG", "FISH", "BIRD"], Difficulty::Easy).unwrap();
    /// assert_eq!(group.category(), "Pets");
    /// assert!(group.contains("cat"));
    ///
    /// assert!(Group::new("Pets", ["CAT", "DOG", "cat", "BIRD"], Difficulty::Easy).is_err());
    /// ```
    pub fn new<C, I, W>(category: C, words: I, difficulty: Difficulty) -> Result<Self, GroupError>
    where
        C: Into<String>,
        I: IntoIterator<Item = W>,
        W: Into<String>,
    {
        let category = category.into().trim().to_string();
        if category.is_empty() {
            return Err(GroupError::EmptyCategory);
        }

        let words: Vec<String> = words
            .into_iter()
            .map(|w| w.into().trim().to_string())
            .collect();
        let count = words.len();
        let words: [String; GROUP_SIZE] = words
            .try_into()
            .map_err(|_| GroupError::WordCount(count))?;

        let mut seen = FxHashSet::default();
        for (i, word) in words.iter().enumerate() {
            if word.is_empty() {
                return Err(GroupError::EmptyWord(i + 1));
            }
            if !seen.insert(word_key(word)) {
                return Err(GroupError::DuplicateWord(word.clone()));
            }
        }

        Ok(Self {
            category,
            words,
            difficulty,
        })
    }

    /// Numbered placeholder group, `SAMPLE{n}` words counted across tiers
    ///
    /// The easy tier gets `SAMPLE1`..`SAMPLE4`, medium `SAMPLE5`..`SAMPLE8`,
    /// and so on, so one placeholder per tier never repeats a word.
    #[must_use]
    pub fn placeholder(difficulty: Difficulty) -> Self {
        let first = difficulty as usize * GROUP_SIZE + 1;
        Self {
            category: "Sample".to_string(),
            words: std::array::from_fn(|i| format!("SAMPLE{}", first + i)),
            difficulty,
        }
    }

    #[inline]
    #[must_use]
    pub fn category(&self) -> &str {
        &self.category
    }

    /// The four words in their authored order
    #[inline]
    #[must_use]
    pub const fn words(&self) -> &[String; GROUP_SIZE] {
        &self.words
    }

    #[inline]
    #[must_use]
    pub const fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    /// Check whether the group holds `word`, ignoring case
    #[must_use]
    pub fn contains(&self, word: &str) -> bool {
        let key = word_key(word);
        self.words.iter().any(|w| word_key(w) == key)
    }

    /// Words joined for display, e.g. `CAT, DOG, FISH, BIRD`
    #[must_use]
    pub fn words_label(&self) -> String {
        self.words.join(", ")
    }
}
