//! Repository backend abstraction.
//!
//! The status reader only needs three answers from a repository. Keeping them
//! behind a trait lets the on-disk format stay somebody else's problem.

use promptline_core::AppResult;
use std::path::Path;

/// Read-only access to a located repository.
pub trait RepositoryBackend {
    /// Check that `root` can be opened as a repository.
    fn open(&self, root: &Path) -> AppResult<()>;

    /// Full name of the current head reference (e.g. `refs/heads/main`).
    ///
    /// Returns `Ok(None)` when the head cannot be resolved, as in a
    /// repository without commits. A detached head yields the commit id.
    fn head(&self, root: &Path) -> AppResult<Option<String>>;

    /// Whether the working tree has no uncommitted or untracked changes.
    fn is_clean(&self, root: &Path) -> AppResult<bool>;
}
