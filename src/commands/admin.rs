//! Moderation commands

use crate::backend::{
    AdminConsole, FileBackend, PuzzleBackend, Submission, SubmissionStats, SubmissionStatus,
};
use crate::pool::PuzzlePool;
use anyhow::{Context, Result};

/// What a moderator asked for
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AdminAction {
    List(Option<SubmissionStatus>),
    Stats,
    Approve { id: String, note: String },
    Reject { id: String, note: String },
}

/// Outcome of an admin action, ready for display
pub enum AdminOutcome {
    Submissions(Vec<Submission>),
    Stats(SubmissionStats),
    Reviewed { id: String, status: SubmissionStatus },
}

/// Log in and run one moderator action
///
/// # Errors
///
/// Returns an error if login fails or the backend call fails.
pub fn run_admin<B: PuzzleBackend + ?Sized>(
    backend: &mut B,
    email: &str,
    password: &str,
    action: AdminAction,
) -> Result<AdminOutcome> {
    let mut console = AdminConsole::login(backend, email, password).context("Login failed")?;

    let outcome = match action {
        AdminAction::List(filter) => AdminOutcome::Submissions(console.submissions(filter)?),
        AdminAction::Stats => AdminOutcome::Stats(console.stats()?),
        AdminAction::Approve { id, note } => {
            console.approve(&id, &note)?;
            AdminOutcome::Reviewed {
                id,
                status: SubmissionStatus::Approved,
            }
        }
        AdminAction::Reject { id, note } => {
            console.reject(&id, &note)?;
            AdminOutcome::Reviewed {
                id,
                status: SubmissionStatus::Rejected,
            }
        }
    };
    Ok(outcome)
}

/// Create the store if needed and add an administrator
///
/// A new store is seeded with `pool`. Returns whether the store was created.
///
/// # Errors
///
/// Returns an error if the store cannot be read or written.
pub fn seed_admin(
    backend: &FileBackend,
    pool: &PuzzlePool,
    email: &str,
    password: &str,
) -> Result<bool> {
    anyhow::ensure!(!email.trim().is_empty(), "Admin email must not be empty");
    anyhow::ensure!(!password.is_empty(), "Admin password must not be empty");

    let created = backend
        .initialize(pool)
        .with_context(|| format!("Failed to initialize {}", backend.path().display()))?;
    backend
        .add_admin(email, password)
        .context("Failed to save administrator")?;
    tracing::info!(email, "Administrator added");
    Ok(created)
}
