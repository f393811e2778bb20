//! Backend data document
//!
//! `Store` holds everything a backend persists and implements the contract's
//! rules once, so the file and memory backends only differ in where the
//! document lives.

use super::{
    AuthError, AuthorInfo, BackendError, ReviewDecision, Submission, SubmissionId,
    SubmissionStatus, User,
};
use crate::core::{Group, Puzzle};
use crate::pool::PuzzlePool;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

/// A group published to the playable pool
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApprovedGroup {
    pub group: Group,
    pub source_submission: Option<SubmissionId>,
    pub created_by: Option<String>,
    pub active: bool,
}

/// Login credentials
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    pub email: String,
    /// Hex SHA-256 of `email:password`, see [`password_digest`]
    pub password_sha256: String,
}

/// Administrator roster entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdminUser {
    pub email: String,
    pub active: bool,
}

/// Everything a backend persists
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Store {
    pub approved: Vec<ApprovedGroup>,
    pub submissions: Vec<Submission>,
    pub accounts: Vec<Account>,
    pub admins: Vec<AdminUser>,
}

/// Digest stored for an account password
///
/// The lowercased email salts the hash so equal passwords differ per account.
#[must_use]
pub fn password_digest(email: &str, password: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(email.trim().to_lowercase().as_bytes());
    hasher.update(b":");
    hasher.update(password.as_bytes());
    hex::encode(hasher.finalize())
}

fn same_email(a: &str, b: &str) -> bool {
    a.trim().eq_ignore_ascii_case(b.trim())
}

fn now_rfc3339() -> String {
    chrono::Utc::now().to_rfc3339()
}

impl Store {
    /// Seed the approved list with a pool, e.g. the embedded one
    #[must_use]
    pub fn with_pool(pool: &PuzzlePool) -> Self {
        Self {
            approved: pool
                .groups()
                .map(|group| ApprovedGroup {
                    group: group.clone(),
                    source_submission: None,
                    created_by: None,
                    active: true,
                })
                .collect(),
            ..Self::default()
        }
    }

    /// Active approved groups as a pool
    #[must_use]
    pub fn approved_pool(&self) -> PuzzlePool {
        PuzzlePool::from_groups(
            self.approved
                .iter()
                .filter(|a| a.active)
                .map(|a| a.group.clone()),
        )
    }

    /// Append a pending submission and return its id
    pub fn submit(&mut self, puzzle: &Puzzle, author: &AuthorInfo) -> SubmissionId {
        let id = uuid::Uuid::new_v4().to_string();
        self.submissions.push(Submission {
            id: id.clone(),
            puzzle: puzzle.clone(),
            submitted_by: author.submitted_by(),
            title: author.title.clone(),
            description: author.description.clone(),
            status: SubmissionStatus::Pending,
            admin_notes: None,
            created_at: now_rfc3339(),
            reviewed_at: None,
        });
        id
    }

    /// Create or replace an account and make it an active administrator
    pub fn add_admin(&mut self, email: &str, password: &str) {
        let email = email.trim().to_string();
        let digest = password_digest(&email, password);

        match self.accounts.iter_mut().find(|a| same_email(&a.email, &email)) {
            Some(account) => account.password_sha256 = digest,
            None => self.accounts.push(Account {
                email: email.clone(),
                password_sha256: digest,
            }),
        }

        match self.admins.iter_mut().find(|a| same_email(&a.email, &email)) {
            Some(admin) => admin.active = true,
            None => self.admins.push(AdminUser {
                email,
                active: true,
            }),
        }
    }

    /// Check credentials, then the admin roster
    ///
    /// # Errors
    /// `InvalidCredentials` for an unknown email or wrong password, `NotAdmin`
    /// for a valid account without an active roster entry.
    pub fn authenticate(&self, email: &str, password: &str) -> Result<User, AuthError> {
        let account = self
            .accounts
            .iter()
            .find(|a| same_email(&a.email, email))
            .ok_or(AuthError::InvalidCredentials)?;

        if account.password_sha256 != password_digest(&account.email, password) {
            return Err(AuthError::InvalidCredentials);
        }

        let user = User {
            email: account.email.clone(),
            token: uuid::Uuid::new_v4().to_string(),
        };

        if !self.is_admin(&user) {
            return Err(AuthError::NotAdmin);
        }

        Ok(user)
    }

    #[must_use]
    pub fn is_admin(&self, user: &User) -> bool {
        self.admins
            .iter()
            .any(|a| a.active && same_email(&a.email, &user.email))
    }

    /// Apply a moderator verdict
    ///
    /// Approving publishes the submission's groups to the pool; rejecting a
    /// previously approved submission withdraws them again.
    ///
    /// # Errors
    /// `NotFound` if no submission has this id; the store is unchanged.
    pub fn review(
        &mut self,
        id: &str,
        decision: ReviewDecision,
        note: &str,
    ) -> Result<(), BackendError> {
        let submission = self
            .submissions
            .iter_mut()
            .find(|s| s.id == id)
            .ok_or_else(|| BackendError::NotFound(id.to_string()))?;

        let previous = submission.status;
        submission.status = decision.into();
        submission.admin_notes = Some(note.to_string()).filter(|n| !n.trim().is_empty());
        submission.reviewed_at = Some(now_rfc3339());

        match decision {
            ReviewDecision::Approve if previous != SubmissionStatus::Approved => {
                let from_submission =
                    |a: &ApprovedGroup| a.source_submission.as_deref() == Some(id);

                if self.approved.iter().any(from_submission) {
                    for approved in self.approved.iter_mut().filter(|a| from_submission(a)) {
                        approved.active = true;
                    }
                } else {
                    let created_by = submission.submitted_by.clone();
                    let groups = submission.puzzle.groups().clone();
                    self.approved
                        .extend(groups.into_iter().map(|group| ApprovedGroup {
                            group,
                            source_submission: Some(id.to_string()),
                            created_by: Some(created_by.clone()),
                            active: true,
                        }));
                }
            }
            ReviewDecision::Reject => {
                for approved in &mut self.approved {
                    if approved.source_submission.as_deref() == Some(id) {
                        approved.active = false;
                    }
                }
            }
            ReviewDecision::Approve => {}
        }

        tracing::info!(id, status = %SubmissionStatus::from(decision), "Submission reviewed");
        Ok(())
    }
}
