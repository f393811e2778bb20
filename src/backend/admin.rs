//! Moderator console

use super::{
    AuthError, BackendError, PuzzleBackend, ReviewDecision, Submission, SubmissionStats,
    SubmissionStatus, User,
};

/// Logged-in moderator session over a backend
///
/// Every operation rechecks [`PuzzleBackend::is_admin`], so an account
/// deactivated mid-session loses access on its next call.
pub struct AdminConsole<'a, B: PuzzleBackend + ?Sized> {
    backend: &'a mut B,
    user: User,
}

impl<'a, B: PuzzleBackend + ?Sized> AdminConsole<'a, B> {
    /// Authenticate and open a console
    ///
    /// # Errors
    /// Returns the backend's `AuthError`, or `NotAdmin` if the account lacks
    /// the administrator capability.
    pub fn login(backend: &'a mut B, email: &str, password: &str) -> Result<Self, AuthError> {
        let user = backend.authenticate(email, password)?;
        if !backend.is_admin(&user) {
            tracing::warn!(email = %user.email, "Login refused: not an administrator");
            return Err(AuthError::NotAdmin);
        }
        tracing::info!(email = %user.email, "Administrator logged in");
        Ok(Self { backend, user })
    }

    #[must_use]
    pub const fn user(&self) -> &User {
        &self.user
    }

    fn ensure_admin(&self) -> Result<(), BackendError> {
        if self.backend.is_admin(&self.user) {
            Ok(())
        } else {
            Err(BackendError::Unauthorized)
        }
    }

    /// Submissions, newest first, optionally limited to one status
    ///
    /// # Errors
    /// Returns `Unauthorized` if the account lost admin rights, or the
    /// backend's error.
    pub fn submissions(
        &self,
        status: Option<SubmissionStatus>,
    ) -> Result<Vec<Submission>, BackendError> {
        self.ensure_admin()?;
        let mut submissions = self.backend.list_submissions()?;
        submissions.retain(|s| status.is_none_or(|wanted| s.status == wanted));
        // RFC 3339 timestamps in UTC sort lexicographically
        submissions.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(submissions)
    }

    /// # Errors
    /// Returns `Unauthorized` if the account lost admin rights, or the
    /// backend's error.
    pub fn stats(&self) -> Result<SubmissionStats, BackendError> {
        self.ensure_admin()?;
        self.backend.submission_stats()
    }

    /// Approve a submission, publishing its groups
    ///
    /// # Errors
    /// Returns `Unauthorized`, `NotFound`, or the backend's error.
    pub fn approve(&mut self, id: &str, note: &str) -> Result<(), BackendError> {
        self.review(id, ReviewDecision::Approve, note)
    }

    /// Reject a submission
    ///
    /// # Errors
    /// Returns `Unauthorized`, `NotFound`, or the backend's error.
    pub fn reject(&mut self, id: &str, note: &str) -> Result<(), BackendError> {
        self.review(id, ReviewDecision::Reject, note)
    }

    fn review(&mut self, id: &str, decision: ReviewDecision, note: &str) -> Result<(), BackendError> {
        self.ensure_admin()?;
        self.backend.update_submission_status(id, decision, note)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::{AuthorInfo, MemoryBackend};
    use crate::core::fixtures::sample_puzzle;

    fn backend_with_admin() -> MemoryBackend {
        let mut backend = MemoryBackend::default();
        backend.store_mut().add_admin("mod@example.org", "pw");
        backend
    }

    #[test]
    fn login_rejects_bad_password() {
        let mut backend = backend_with_admin();
        let result = AdminConsole::login(&mut backend, "mod@example.org", "nope");
        assert!(matches!(result, Err(AuthError::InvalidCredentials)));
    }

    #[test]
    fn approve_then_stats() {
        let mut backend = backend_with_admin();
        let id = backend
            .submit_puzzle(&sample_puzzle(), &AuthorInfo::default())
            .unwrap();

        let mut console = AdminConsole::login(&mut backend, "mod@example.org", "pw").unwrap();
        assert_eq!(console.user().email, "mod@example.org");
        console.approve(&id, "great").unwrap();

        let stats = console.stats().unwrap();
        assert_eq!(stats.approved, 1);
        assert_eq!(stats.pending, 0);
        assert_eq!(backend.store().approved_pool().len(), 4);
    }

    #[test]
    fn reject_unknown_submission() {
        let mut backend = backend_with_admin();
        let mut console = AdminConsole::login(&mut backend, "mod@example.org", "pw").unwrap();
        assert!(matches!(
            console.reject("missing", ""),
            Err(BackendError::NotFound(_))
        ));
    }

    #[test]
    fn submissions_filter_by_status() {
        let mut backend = backend_with_admin();
        let first = backend
            .submit_puzzle(&sample_puzzle(), &AuthorInfo::default())
            .unwrap();
        backend
            .submit_puzzle(&sample_puzzle(), &AuthorInfo::default())
            .unwrap();

        let mut console = AdminConsole::login(&mut backend, "mod@example.org", "pw").unwrap();
        console.reject(&first, "too easy").unwrap();

        assert_eq!(console.submissions(None).unwrap().len(), 2);
        let pending = console.submissions(Some(SubmissionStatus::Pending)).unwrap();
        assert_eq!(pending.len(), 1);
        assert_ne!(pending[0].id, first);
        let rejected = console.submissions(Some(SubmissionStatus::Rejected)).unwrap();
        assert_eq!(rejected[0].admin_notes.as_deref(), Some("too easy"));
    }

    #[test]
    fn deactivated_admin_loses_access() {
        let mut backend = backend_with_admin();
        let user = {
            let console = AdminConsole::login(&mut backend, "mod@example.org", "pw").unwrap();
            console.user().clone()
        };
        backend.store_mut().admins[0].active = false;

        let mut console = AdminConsole {
            backend: &mut backend,
            user,
        };
        assert!(matches!(console.stats(), Err(BackendError::Unauthorized)));
        assert!(matches!(
            console.approve("any", ""),
            Err(BackendError::Unauthorized)
        ));
    }
}
