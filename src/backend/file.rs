//! JSON file backend
//!
//! Every call reads the document from disk; writes go to a temporary sibling
//! file that is renamed over the original, so a failed write never leaves a
//! half-written store behind.

use super::{
    AuthError, AuthorInfo, BackendError, PuzzleBackend, ReviewDecision, Store, Submission,
    SubmissionId, User,
};
use crate::core::Puzzle;
use crate::pool::PuzzlePool;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// Backend persisting its [`Store`] as a JSON document
#[derive(Debug, Clone)]
pub struct FileBackend {
    path: PathBuf,
}

impl FileBackend {
    /// Use the document at `path`; a missing file reads as an empty store
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the whole document
    ///
    /// # Errors
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load(&self) -> Result<Store, BackendError> {
        match fs::read_to_string(&self.path) {
            Ok(content) => Ok(serde_json::from_str(&content)?),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(Store::default()),
            Err(err) => Err(err.into()),
        }
    }

    /// Replace the whole document
    ///
    /// # Errors
    /// Returns an error if the document cannot be written.
    pub fn save(&self, store: &Store) -> Result<(), BackendError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }

        let json = serde_json::to_string_pretty(store)?;
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, json)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }

    /// Load, mutate and save in one step
    ///
    /// Nothing is written if `apply` fails.
    fn update<T>(
        &self,
        apply: impl FnOnce(&mut Store) -> Result<T, BackendError>,
    ) -> Result<T, BackendError> {
        let mut store = self.load()?;
        let value = apply(&mut store)?;
        self.save(&store)?;
        Ok(value)
    }

    /// Create the document seeded with `pool` unless it already exists
    ///
    /// # Errors
    /// Returns an error if the document cannot be read or written.
    pub fn initialize(&self, pool: &PuzzlePool) -> Result<bool, BackendError> {
        if self.path.exists() {
            return Ok(false);
        }
        self.save(&Store::with_pool(pool))?;
        tracing::info!(path = %self.path.display(), groups = pool.len(), "Initialized store");
        Ok(true)
    }

    /// Create or update an administrator account
    ///
    /// # Errors
    /// Returns an error if the document cannot be read or written.
    pub fn add_admin(&self, email: &str, password: &str) -> Result<(), BackendError> {
        self.update(|store| {
            store.add_admin(email, password);
            Ok(())
        })
    }
}

impl PuzzleBackend for FileBackend {
    fn fetch_approved_groups(&self) -> Result<PuzzlePool, BackendError> {
        Ok(self.load()?.approved_pool())
    }

    fn submit_puzzle(
        &mut self,
        puzzle: &Puzzle,
        author: &AuthorInfo,
    ) -> Result<SubmissionId, BackendError> {
        let id = self.update(|store| Ok(store.submit(puzzle, author)))?;
        tracing::info!(%id, by = %author.submitted_by(), "Puzzle submitted for review");
        Ok(id)
    }

    fn authenticate(&self, email: &str, password: &str) -> Result<User, AuthError> {
        let store = self
            .load()
            .map_err(|err| AuthError::Service(err.to_string()))?;
        store.authenticate(email, password)
    }

    fn is_admin(&self, user: &User) -> bool {
        match self.load() {
            Ok(store) => store.is_admin(user),
            Err(err) => {
                tracing::warn!("Admin check failed, denying access: {err}");
                false
            }
        }
    }

    fn list_submissions(&self) -> Result<Vec<Submission>, BackendError> {
        Ok(self.load()?.submissions)
    }

    fn update_submission_status(
        &mut self,
        id: &str,
        decision: ReviewDecision,
        note: &str,
    ) -> Result<(), BackendError> {
        self.update(|store| store.review(id, decision, note))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::SubmissionStatus;
    use crate::core::fixtures::sample_puzzle;

    fn temp_backend() -> (tempfile::TempDir, FileBackend) {
        let dir = tempfile::tempdir().unwrap();
        let backend = FileBackend::new(dir.path().join("store.json"));
        (dir, backend)
    }

    #[test]
    fn missing_file_reads_as_empty_store() {
        let (_dir, backend) = temp_backend();
        assert_eq!(backend.load().unwrap(), Store::default());
        assert!(backend.fetch_approved_groups().unwrap().is_empty());
    }

    #[test]
    fn initialize_seeds_pool_once() {
        let (_dir, backend) = temp_backend();
        let pool = PuzzlePool::embedded();

        assert!(backend.initialize(&pool).unwrap());
        assert!(!backend.initialize(&PuzzlePool::empty()).unwrap());
        assert_eq!(backend.fetch_approved_groups().unwrap(), pool);
    }

    #[test]
    fn submissions_persist_between_instances() {
        let (_dir, mut backend) = temp_backend();
        let id = backend
            .submit_puzzle(&sample_puzzle(), &AuthorInfo::default())
            .unwrap();

        let reopened = FileBackend::new(backend.path());
        let submissions = reopened.list_submissions().unwrap();
        assert_eq!(submissions.len(), 1);
        assert_eq!(submissions[0].id, id);
        assert_eq!(submissions[0].puzzle, sample_puzzle());
    }

    #[test]
    fn approve_publishes_to_pool_on_disk() {
        let (_dir, mut backend) = temp_backend();
        let id = backend
            .submit_puzzle(&sample_puzzle(), &AuthorInfo::default())
            .unwrap();
        backend
            .update_submission_status(&id, ReviewDecision::Approve, "ok")
            .unwrap();

        let reopened = FileBackend::new(backend.path());
        assert_eq!(reopened.fetch_approved_groups().unwrap().len(), 4);
        assert_eq!(
            reopened.list_submissions().unwrap()[0].status,
            SubmissionStatus::Approved
        );
    }

    #[test]
    fn failed_update_writes_nothing() {
        let (_dir, mut backend) = temp_backend();
        backend
            .submit_puzzle(&sample_puzzle(), &AuthorInfo::default())
            .unwrap();
        let before = fs::read_to_string(backend.path()).unwrap();

        let result = backend.update_submission_status("nope", ReviewDecision::Reject, "");
        assert!(matches!(result, Err(BackendError::NotFound(_))));
        assert_eq!(fs::read_to_string(backend.path()).unwrap(), before);
    }

    #[test]
    fn admin_login_round_trip() {
        let (_dir, backend) = temp_backend();
        backend.add_admin("mod@example.org", "pw").unwrap();

        let user = backend.authenticate("mod@example.org", "pw").unwrap();
        assert!(backend.is_admin(&user));
        assert_eq!(
            backend.authenticate("mod@example.org", "nope"),
            Err(AuthError::InvalidCredentials)
        );
    }

    #[test]
    fn corrupt_file_is_reported() {
        let (_dir, backend) = temp_backend();
        fs::write(backend.path(), "{ not json").unwrap();

        assert!(matches!(backend.load(), Err(BackendError::Corrupt(_))));
        assert!(matches!(
            backend.authenticate("a@example.org", "pw"),
            Err(AuthError::Service(_))
        ));
    }
}
