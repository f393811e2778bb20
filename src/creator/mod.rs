//! Puzzle creator
//!
//! A [`PuzzleDraft`] is the editable form of a puzzle: four groups whose
//! fields may be blank or partly filled. Drafts are validated with
//! [`validate`], turned into a [`Puzzle`] for sharing, or submitted for
//! review.

mod validation;

pub use validation::{ValidationReport, Violation, validate};

use crate::backend::{AuthorInfo, BackendError, PuzzleBackend, SubmissionId};
use crate::core::bundle::{self, BundleError};
use crate::core::{
    BOARD_SIZE, Difficulty, GROUP_SIZE, Group, GroupError, PUZZLE_GROUPS, Puzzle, PuzzleError,
};
use rand::Rng;
use rand::seq::SliceRandom;
use serde::Deserialize;
use std::fs;
use std::path::Path;
use thiserror::Error;

/// Placeholder shown in preview slots without a word
pub const PREVIEW_PLACEHOLDER: &str = "?";

/// Error type for creator operations
#[derive(Debug, Error)]
pub enum CreatorError {
    #[error("{0}")]
    Invalid(ValidationReport),
    #[error(transparent)]
    Group(#[from] GroupError),
    #[error(transparent)]
    Puzzle(#[from] PuzzleError),
    #[error("failed to encode puzzle: {0}")]
    Bundle(#[from] BundleError),
    #[error("submission failed: {0}")]
    Backend(#[from] BackendError),
    #[error("failed to read draft: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid JSON draft: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid TOML draft: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("draft must have at most {PUZZLE_GROUPS} groups, got {0}")]
    TooManyGroups(usize),
    #[error("group {group} has {count} words; at most {GROUP_SIZE} are allowed")]
    TooManyWords { group: usize, count: usize },
}

/// One editable group
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DraftGroup {
    category: String,
    words: [String; GROUP_SIZE],
    difficulty: Difficulty,
}

impl Default for DraftGroup {
    fn default() -> Self {
        Self {
            category: String::new(),
            words: Default::default(),
            difficulty: Difficulty::Medium,
        }
    }
}

impl DraftGroup {
    #[must_use]
    pub fn category(&self) -> &str {
        &self.category
    }

    #[must_use]
    pub const fn words(&self) -> &[String; GROUP_SIZE] {
        &self.words
    }

    #[must_use]
    pub const fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    /// Number of non-blank word slots
    #[must_use]
    pub fn filled_count(&self) -> usize {
        self.filled_words().count()
    }

    /// Non-blank words, trimmed, in slot order
    pub fn filled_words(&self) -> impl Iterator<Item = &str> {
        self.words.iter().map(|w| w.trim()).filter(|w| !w.is_empty())
    }

    /// Anything typed into the category or a word slot
    #[must_use]
    pub fn has_content(&self) -> bool {
        !self.category.trim().is_empty() || self.filled_count() > 0
    }
}

/// Wire shape of a draft group; `words` may be short
#[derive(Deserialize)]
struct RawDraftGroup {
    #[serde(default)]
    category: String,
    #[serde(default)]
    words: Vec<String>,
    #[serde(default = "default_difficulty")]
    difficulty: Difficulty,
}

const fn default_difficulty() -> Difficulty {
    Difficulty::Medium
}

#[derive(Deserialize)]
struct RawDraft {
    #[serde(default)]
    groups: Vec<RawDraftGroup>,
}

/// Four editable groups
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PuzzleDraft {
    groups: [DraftGroup; PUZZLE_GROUPS],
}

impl PuzzleDraft {
    /// Four blank groups at medium difficulty
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Read a draft from a `.toml` or JSON file
    ///
    /// Missing groups and word slots are left blank; words are uppercased as
    /// if typed into the editor.
    ///
    /// # Errors
    /// Returns `CreatorError` if the file cannot be read or parsed, or has
    /// more groups or words than a puzzle holds.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, CreatorError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)?;
        if path.extension().is_some_and(|ext| ext == "toml") {
            Self::from_raw(toml::from_str(&content)?)
        } else {
            Self::from_json(&content)
        }
    }

    /// Parse a JSON draft document
    ///
    /// # Errors
    /// Returns `CreatorError` on malformed JSON or oversized groups.
    pub fn from_json(json: &str) -> Result<Self, CreatorError> {
        Self::from_raw(serde_json::from_str(json)?)
    }

    fn from_raw(raw: RawDraft) -> Result<Self, CreatorError> {
        if raw.groups.len() > PUZZLE_GROUPS {
            return Err(CreatorError::TooManyGroups(raw.groups.len()));
        }

        let mut draft = Self::new();
        for (index, group) in raw.groups.into_iter().enumerate() {
            if group.words.len() > GROUP_SIZE {
                return Err(CreatorError::TooManyWords {
                    group: index + 1,
                    count: group.words.len(),
                });
            }
            draft.set_category(index, &group.category);
            draft.set_difficulty(index, group.difficulty);
            for (slot, word) in group.words.iter().enumerate() {
                draft.set_word(index, slot, word);
            }
        }
        Ok(draft)
    }

    #[must_use]
    pub const fn groups(&self) -> &[DraftGroup; PUZZLE_GROUPS] {
        &self.groups
    }

    /// Set a group's category; out-of-range groups are ignored
    pub fn set_category(&mut self, group: usize, category: &str) {
        if let Some(g) = self.groups.get_mut(group) {
            g.category = category.to_string();
        }
    }

    /// Set one word slot, uppercasing it; out-of-range slots are ignored
    pub fn set_word(&mut self, group: usize, slot: usize, word: &str) {
        if let Some(w) = self.groups.get_mut(group).and_then(|g| g.words.get_mut(slot)) {
            *w = word.to_uppercase();
        }
    }

    pub fn set_difficulty(&mut self, group: usize, difficulty: Difficulty) {
        if let Some(g) = self.groups.get_mut(group) {
            g.difficulty = difficulty;
        }
    }

    /// Reset to four blank medium groups
    pub fn clear(&mut self) {
        *self = Self::new();
    }

    #[must_use]
    pub fn validate(&self) -> ValidationReport {
        validate(self)
    }

    /// Build a puzzle from a valid draft
    ///
    /// # Errors
    /// Returns `CreatorError::Invalid` with the full report if the draft
    /// breaks any rule.
    pub fn to_puzzle(&self, id: impl Into<String>) -> Result<Puzzle, CreatorError> {
        let report = self.validate();
        if !report.is_valid() {
            return Err(CreatorError::Invalid(report));
        }

        let groups = self
            .groups
            .iter()
            .map(|g| Group::new(g.category.as_str(), g.filled_words(), g.difficulty))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Puzzle::new(id, groups)?)
    }

    /// Build a puzzle with a fresh `custom-{millis}` id
    ///
    /// # Errors
    /// See [`PuzzleDraft::to_puzzle`].
    pub fn to_custom_puzzle(&self) -> Result<Puzzle, CreatorError> {
        self.to_puzzle(format!("custom-{}", chrono::Utc::now().timestamp_millis()))
    }

    /// Share link for a valid draft
    ///
    /// # Errors
    /// Returns `CreatorError` if the draft is invalid or cannot be encoded.
    pub fn share_link(&self, base_url: &str) -> Result<String, CreatorError> {
        let puzzle = self.to_custom_puzzle()?;
        Ok(bundle::share_link(base_url, &puzzle)?)
    }

    /// Validate, then send the puzzle for moderator review
    ///
    /// Nothing reaches the backend unless the draft is valid.
    ///
    /// # Errors
    /// Returns `CreatorError::Invalid` for an invalid draft, or
    /// `CreatorError::Backend` if the submission fails.
    pub fn submit<B: PuzzleBackend + ?Sized>(
        &self,
        backend: &mut B,
        author: &AuthorInfo,
    ) -> Result<SubmissionId, CreatorError> {
        let puzzle = self.to_custom_puzzle()?;
        let id = backend.submit_puzzle(&puzzle, author)?;
        tracing::info!(%id, puzzle = puzzle.id(), "Draft submitted");
        Ok(id)
    }

    /// Board preview: filled words shuffled, padded to sixteen tiles
    pub fn preview<R: Rng + ?Sized>(&self, rng: &mut R) -> Vec<PreviewTile> {
        let mut tiles: Vec<PreviewTile> = self
            .groups
            .iter()
            .flat_map(|g| {
                g.filled_words().map(|word| PreviewTile {
                    text: word.to_string(),
                    difficulty: Some(g.difficulty),
                })
            })
            .collect();
        tiles.shuffle(rng);
        tiles.resize(
            BOARD_SIZE.max(tiles.len()),
            PreviewTile {
                text: PREVIEW_PLACEHOLDER.to_string(),
                difficulty: None,
            },
        );
        tiles
    }
}

/// One preview tile; placeholders have no difficulty
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreviewTile {
    pub text: String,
    pub difficulty: Option<Difficulty>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::{MemoryBackend, SubmissionStatus};
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    const DRAFT_JSON: &str = r#"{
        "groups": [
            {"category": "Pets", "words": ["cat", "dog", "fish", "bird"], "difficulty": "easy"},
            {"category": "Colours", "words": ["red", "blue", "green", "pink"]},
            {"category": "Planets", "words": ["mars", "venus", "earth", "pluto"], "difficulty": "hard"},
            {"category": "Trees", "words": ["oak", "elm", "ash", "pine"], "difficulty": "expert"}
        ]
    }"#;

    #[test]
    fn new_draft_is_blank_medium() {
        let draft = PuzzleDraft::new();
        assert!(draft.groups().iter().all(|g| !g.has_content()));
        assert!(draft.groups().iter().all(|g| g.difficulty() == Difficulty::Medium));
    }

    #[test]
    fn words_are_uppercased_on_entry() {
        let mut draft = PuzzleDraft::new();
        draft.set_word(0, 1, "kayak");
        assert_eq!(draft.groups()[0].words()[1], "KAYAK");
    }

    #[test]
    fn out_of_range_edits_are_ignored() {
        let mut draft = PuzzleDraft::new();
        draft.set_word(4, 0, "X");
        draft.set_word(0, 4, "X");
        draft.set_category(9, "X");
        assert_eq!(draft, PuzzleDraft::new());
    }

    #[test]
    fn json_draft_defaults_difficulty_and_uppercases() {
        let draft = PuzzleDraft::from_json(DRAFT_JSON).unwrap();
        assert_eq!(draft.groups()[0].words()[0], "CAT");
        assert_eq!(draft.groups()[1].difficulty(), Difficulty::Medium);
        assert!(draft.validate().is_valid());
    }

    #[test]
    fn json_draft_file_loads_like_from_json() {
        let mut file = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
        std::io::Write::write_all(&mut file, DRAFT_JSON.as_bytes()).unwrap();

        let draft = PuzzleDraft::load(file.path()).unwrap();
        assert_eq!(draft, PuzzleDraft::from_json(DRAFT_JSON).unwrap());
        assert!(matches!(
            PuzzleDraft::from_json(r#"{"groups": 3}"#),
            Err(CreatorError::Json(_))
        ));
    }

    #[test]
    fn toml_draft_loads_partial_groups() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        std::io::Write::write_all(
            &mut file,
            br#"
[[groups]]
category = "Pets"
words = ["cat", "dog"]
difficulty = "easy"
"#,
        )
        .unwrap();

        let draft = PuzzleDraft::load(file.path()).unwrap();
        assert_eq!(draft.groups()[0].filled_count(), 2);
        assert!(!draft.groups()[1].has_content());
        assert!(
            draft
                .validate()
                .violations
                .contains(&Violation::IncompleteGroup { group: 1, filled: 2 })
        );
    }

    #[test]
    fn oversized_group_is_rejected() {
        let json = r#"{"groups":[{"category":"X","words":["A","B","C","D","E"]}]}"#;
        assert!(matches!(
            PuzzleDraft::from_json(json),
            Err(CreatorError::TooManyWords { group: 1, count: 5 })
        ));
    }

    #[test]
    fn valid_draft_becomes_puzzle() {
        let draft = PuzzleDraft::from_json(DRAFT_JSON).unwrap();
        let puzzle = draft.to_custom_puzzle().unwrap();

        assert!(puzzle.id().starts_with("custom-"));
        assert_eq!(puzzle.groups()[2].category(), "Planets");
        assert_eq!(puzzle.groups()[3].difficulty(), Difficulty::Expert);
    }

    #[test]
    fn invalid_draft_refuses_puzzle() {
        let mut draft = PuzzleDraft::from_json(DRAFT_JSON).unwrap();
        draft.set_word(1, 0, "CAT");
        assert!(matches!(draft.to_puzzle("x"), Err(CreatorError::Invalid(_))));
    }

    #[test]
    fn share_link_decodes_back_to_puzzle() {
        let draft = PuzzleDraft::from_json(DRAFT_JSON).unwrap();
        let link = draft.share_link("https://example.org/play").unwrap();

        assert!(link.starts_with("https://example.org/play?custom="));
        let decoded = bundle::decode(bundle::extract(&link)).unwrap();
        assert_eq!(decoded.groups()[0].words()[0], "CAT");
    }

    #[test]
    fn submit_requires_valid_draft() {
        let mut backend = MemoryBackend::default();
        let result = PuzzleDraft::new().submit(&mut backend, &AuthorInfo::default());

        assert!(matches!(result, Err(CreatorError::Invalid(_))));
        assert!(backend.store().submissions.is_empty());
    }

    #[test]
    fn submit_creates_pending_submission() {
        let mut backend = MemoryBackend::default();
        let draft = PuzzleDraft::from_json(DRAFT_JSON).unwrap();
        let author = AuthorInfo {
            display_name: Some("Ana".to_string()),
            ..AuthorInfo::default()
        };

        let id = draft.submit(&mut backend, &author).unwrap();
        let submission = &backend.store().submissions[0];
        assert_eq!(submission.id, id);
        assert_eq!(submission.status, SubmissionStatus::Pending);
        assert_eq!(submission.submitted_by, "Ana");
    }

    #[test]
    fn submit_reports_backend_failure() {
        let mut backend = MemoryBackend::default();
        backend.fail_next_with(BackendError::Unavailable("offline".to_string()));
        let draft = PuzzleDraft::from_json(DRAFT_JSON).unwrap();

        let result = draft.submit(&mut backend, &AuthorInfo::default());
        assert!(matches!(result, Err(CreatorError::Backend(_))));
    }

    #[test]
    fn preview_pads_to_board_size() {
        let mut draft = PuzzleDraft::new();
        draft.set_word(0, 0, "ONE");
        draft.set_word(2, 3, "TWO");

        let tiles = draft.preview(&mut StdRng::seed_from_u64(8));
        assert_eq!(tiles.len(), BOARD_SIZE);
        let words = tiles.iter().filter(|t| t.difficulty.is_some()).count();
        assert_eq!(words, 2);
        assert_eq!(tiles[15].text, PREVIEW_PLACEHOLDER);
    }

    #[test]
    fn clear_resets_everything() {
        let mut draft = PuzzleDraft::from_json(DRAFT_JSON).unwrap();
        draft.clear();
        assert_eq!(draft, PuzzleDraft::new());
    }
}
