//! Creator commands
//!
//! Validate, share or submit a puzzle draft read from a JSON or TOML file.

use crate::backend::{AuthorInfo, PuzzleBackend, SubmissionId};
use crate::creator::{PreviewTile, PuzzleDraft, ValidationReport};
use anyhow::{Context, Result};
use rand::Rng;
use std::path::Path;

/// Result of checking a draft file
pub struct DraftCheck {
    pub draft: PuzzleDraft,
    pub report: ValidationReport,
    pub preview: Vec<PreviewTile>,
}

fn load_draft(path: &Path) -> Result<PuzzleDraft> {
    PuzzleDraft::load(path).with_context(|| format!("Failed to load draft {}", path.display()))
}

/// Load and validate a draft, with a shuffled board preview
///
/// # Errors
///
/// Returns an error if the draft file cannot be read or parsed. An invalid
/// draft is not an error; see [`DraftCheck::report`].
pub fn validate_draft<R: Rng + ?Sized>(path: &Path, rng: &mut R) -> Result<DraftCheck> {
    let draft = load_draft(path)?;
    let report = draft.validate();
    let preview = draft.preview(rng);
    Ok(DraftCheck {
        draft,
        report,
        preview,
    })
}

/// Build a share link for a draft
///
/// # Errors
///
/// Returns an error if the draft cannot be loaded or is invalid.
pub fn share_draft(path: &Path, base_url: &str) -> Result<String> {
    let draft = load_draft(path)?;
    draft
        .share_link(base_url)
        .context("Cannot share this draft")
}

/// Submit a draft for review
///
/// # Errors
///
/// Returns an error if the draft cannot be loaded, is invalid, or the
/// backend rejects the submission.
pub fn submit_draft<B: PuzzleBackend + ?Sized>(
    backend: &mut B,
    path: &Path,
    author: &AuthorInfo,
) -> Result<SubmissionId> {
    let draft = load_draft(path)?;
    draft
        .submit(backend, author)
        .context("Cannot submit this draft")
}
