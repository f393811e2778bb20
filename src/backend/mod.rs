//! Data and authentication collaborator
//!
//! The game core only talks to persistence through [`PuzzleBackend`]. Two
//! implementations ship with the crate: [`FileBackend`], a JSON document on
//! disk used by the CLI, and [`MemoryBackend`] for tests and embedding.

mod admin;
mod file;
mod memory;
mod store;

pub use admin::AdminConsole;
pub use file::FileBackend;
pub use memory::MemoryBackend;
pub use store::{Account, AdminUser, ApprovedGroup, Store, password_digest};

use crate::core::Puzzle;
use crate::pool::PuzzlePool;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Identifier assigned to a submission by the backend
pub type SubmissionId = String;

/// Label stored when an author gives neither email nor name
pub const ANONYMOUS_AUTHOR: &str = "Anonymous";

/// Optional author details sent with a submission
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthorInfo {
    pub display_name: Option<String>,
    pub contact_email: Option<String>,
    pub title: Option<String>,
    pub description: Option<String>,
}

impl AuthorInfo {
    /// Who the submission is attributed to: email, else name, else anonymous
    #[must_use]
    pub fn submitted_by(&self) -> String {
        non_blank(self.contact_email.as_deref())
            .or_else(|| non_blank(self.display_name.as_deref()))
            .unwrap_or(ANONYMOUS_AUTHOR)
            .to_string()
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

/// Review state of a submission
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SubmissionStatus {
    Pending,
    Approved,
    Rejected,
}

impl SubmissionStatus {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Approved => "approved",
            Self::Rejected => "rejected",
        }
    }
}

impl fmt::Display for SubmissionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SubmissionStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pending" => Ok(Self::Pending),
            "approved" => Ok(Self::Approved),
            "rejected" => Ok(Self::Rejected),
            other => Err(format!(
                "unknown status '{other}'; expected pending, approved or rejected"
            )),
        }
    }
}

/// Moderator verdict on a submission
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReviewDecision {
    Approve,
    Reject,
}

impl From<ReviewDecision> for SubmissionStatus {
    fn from(decision: ReviewDecision) -> Self {
        match decision {
            ReviewDecision::Approve => Self::Approved,
            ReviewDecision::Reject => Self::Rejected,
        }
    }
}

/// A puzzle waiting for, or having received, moderator review
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Submission {
    pub id: SubmissionId,
    pub puzzle: Puzzle,
    pub submitted_by: String,
    pub title: Option<String>,
    pub description: Option<String>,
    pub status: SubmissionStatus,
    pub admin_notes: Option<String>,
    /// RFC 3339 timestamp
    pub created_at: String,
    /// RFC 3339 timestamp of the last review
    pub reviewed_at: Option<String>,
}

/// Submission counts by status
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SubmissionStats {
    pub total: usize,
    pub pending: usize,
    pub approved: usize,
    pub rejected: usize,
}

impl SubmissionStats {
    #[must_use]
    pub fn from_submissions(submissions: &[Submission]) -> Self {
        submissions.iter().fold(Self::default(), |mut stats, s| {
            stats.total += 1;
            match s.status {
                SubmissionStatus::Pending => stats.pending += 1,
                SubmissionStatus::Approved => stats.approved += 1,
                SubmissionStatus::Rejected => stats.rejected += 1,
            }
            stats
        })
    }
}

/// An authenticated account
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub email: String,
    /// Opaque session token issued at login
    pub token: String,
}

/// Why a login failed
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthError {
    #[error("invalid email or password")]
    InvalidCredentials,
    #[error("this account is not authorized as an administrator")]
    NotAdmin,
    #[error("authentication service error: {0}")]
    Service(String),
}

/// Error type for backend calls other than login
#[derive(Debug, Error)]
pub enum BackendError {
    #[error("backend unavailable: {0}")]
    Unavailable(String),
    #[error("submission '{0}' not found")]
    NotFound(String),
    #[error("administrator access required")]
    Unauthorized,
    #[error("storage I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("storage data is corrupt: {0}")]
    Corrupt(#[from] serde_json::Error),
}

/// The request/response contract the core consumes
///
/// Reads take `&self`; anything that changes stored data takes `&mut self`.
/// A failed write must leave the stored data unchanged.
pub trait PuzzleBackend {
    /// Every active approved group, filed by tier
    fn fetch_approved_groups(&self) -> Result<PuzzlePool, BackendError>;

    /// Queue a puzzle for moderator review
    fn submit_puzzle(
        &mut self,
        puzzle: &Puzzle,
        author: &AuthorInfo,
    ) -> Result<SubmissionId, BackendError>;

    /// Log in with email and password
    ///
    /// Succeeds only for accounts that are also active administrators.
    fn authenticate(&self, email: &str, password: &str) -> Result<User, AuthError>;

    /// Capability check: may `user` moderate submissions?
    fn is_admin(&self, user: &User) -> bool;

    /// All submissions, in any order
    fn list_submissions(&self) -> Result<Vec<Submission>, BackendError>;

    /// Record a moderator verdict
    fn update_submission_status(
        &mut self,
        id: &str,
        decision: ReviewDecision,
        note: &str,
    ) -> Result<(), BackendError>;

    /// Submission counts by status
    fn submission_stats(&self) -> Result<SubmissionStats, BackendError> {
        Ok(SubmissionStats::from_submissions(&self.list_submissions()?))
    }
}
