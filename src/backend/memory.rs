//! In-memory backend

use super::{
    AuthError, AuthorInfo, BackendError, PuzzleBackend, ReviewDecision, Store, Submission,
    SubmissionId, User,
};
use crate::core::Puzzle;
use crate::pool::PuzzlePool;
use std::cell::RefCell;

/// Backend holding its [`Store`] in memory
///
/// Useful for tests and for embedding the engine without persistence. A
/// failure can be queued with [`MemoryBackend::fail_next_with`] to exercise
/// error paths.
#[derive(Debug, Default)]
pub struct MemoryBackend {
    store: Store,
    queued_failure: RefCell<Option<BackendError>>,
}

impl MemoryBackend {
    #[must_use]
    pub fn new(store: Store) -> Self {
        Self {
            store,
            queued_failure: RefCell::new(None),
        }
    }

    /// Backend whose approved list is seeded from `pool`
    #[must_use]
    pub fn with_pool(pool: PuzzlePool) -> Self {
        Self::new(Store::with_pool(&pool))
    }

    #[must_use]
    pub const fn store(&self) -> &Store {
        &self.store
    }

    pub const fn store_mut(&mut self) -> &mut Store {
        &mut self.store
    }

    /// Make the next fallible call fail with `error`
    pub fn fail_next_with(&self, error: BackendError) {
        *self.queued_failure.borrow_mut() = Some(error);
    }

    fn take_failure(&self) -> Result<(), BackendError> {
        self.queued_failure.borrow_mut().take().map_or(Ok(()), Err)
    }
}

impl PuzzleBackend for MemoryBackend {
    fn fetch_approved_groups(&self) -> Result<PuzzlePool, BackendError> {
        self.take_failure()?;
        Ok(self.store.approved_pool())
    }

    fn submit_puzzle(
        &mut self,
        puzzle: &Puzzle,
        author: &AuthorInfo,
    ) -> Result<SubmissionId, BackendError> {
        self.take_failure()?;
        Ok(self.store.submit(puzzle, author))
    }

    fn authenticate(&self, email: &str, password: &str) -> Result<User, AuthError> {
        self.take_failure()
            .map_err(|err| AuthError::Service(err.to_string()))?;
        self.store.authenticate(email, password)
    }

    fn is_admin(&self, user: &User) -> bool {
        self.store.is_admin(user)
    }

    fn list_submissions(&self) -> Result<Vec<Submission>, BackendError> {
        self.take_failure()?;
        Ok(self.store.submissions.clone())
    }

    fn update_submission_status(
        &mut self,
        id: &str,
        decision: ReviewDecision,
        note: &str,
    ) -> Result<(), BackendError> {
        self.take_failure()?;
        self.store.review(id, decision, note)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::fixtures::sample_puzzle;

    #[test]
    fn queued_failure_applies_once() {
        let backend = MemoryBackend::with_pool(PuzzlePool::embedded());
        backend.fail_next_with(BackendError::Unavailable("down".to_string()));

        assert!(backend.fetch_approved_groups().is_err());
        assert!(backend.fetch_approved_groups().is_ok());
    }

    #[test]
    fn failed_submit_leaves_store_unchanged() {
        let mut backend = MemoryBackend::default();
        backend.fail_next_with(BackendError::Unavailable("down".to_string()));

        assert!(backend.submit_puzzle(&sample_puzzle(), &AuthorInfo::default()).is_err());
        assert!(backend.store().submissions.is_empty());
    }

    #[test]
    fn service_failure_during_login_is_classified() {
        let mut backend = MemoryBackend::default();
        backend.store_mut().add_admin("mod@example.org", "pw");
        backend.fail_next_with(BackendError::Unavailable("down".to_string()));

        assert!(matches!(
            backend.authenticate("mod@example.org", "pw"),
            Err(AuthError::Service(_))
        ));
        assert!(backend.authenticate("mod@example.org", "pw").is_ok());
    }

    #[test]
    fn default_stats_count_by_status() {
        let mut backend = MemoryBackend::default();
        let first = backend
            .submit_puzzle(&sample_puzzle(), &AuthorInfo::default())
            .unwrap();
        backend
            .submit_puzzle(&sample_puzzle(), &AuthorInfo::default())
            .unwrap();
        backend
            .update_submission_status(&first, ReviewDecision::Reject, "")
            .unwrap();

        let stats = backend.submission_stats().unwrap();
        assert_eq!(stats.total, 2);
        assert_eq!(stats.pending, 1);
        assert_eq!(stats.rejected, 1);
        assert_eq!(stats.approved, 0);
    }
}
