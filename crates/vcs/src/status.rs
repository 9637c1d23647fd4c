//! Branch and working-tree state of a located repository.

use crate::backend::RepositoryBackend;
use crate::locate::locate_repository;
use promptline_core::AppResult;
use std::path::{Path, PathBuf};

/// Prefix stripped from the head reference to get a branch name.
pub const BRANCH_REF_PREFIX: &str = "refs/heads/";

/// Branch text shown when the head cannot be resolved.
pub const EMPTY_HEAD: &str = "empty";

/// Why the head could not be described.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeadError {
    /// No commit behind HEAD (fresh repository, broken ref)
    Unresolvable,
}

/// Repository state for one render. Never cached.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepositoryState {
    /// A repository root was found above the working directory
    pub located: bool,

    /// The root that was found
    pub root: Option<PathBuf>,

    /// Branch name, commit id when detached, or [`EMPTY_HEAD`]
    pub branch: String,

    /// Working tree has no changes
    pub clean: bool,

    pub error_state: Option<HeadError>,
}

impl RepositoryState {
    /// State for a directory outside any repository.
    pub fn not_located() -> Self {
        Self {
            located: false,
            root: None,
            branch: String::new(),
            clean: false,
            error_state: None,
        }
    }
}

/// Turn a full reference name into the text shown in the prompt.
///
/// Anything without the `refs/heads/` prefix passes through untouched.
pub fn branch_name(reference: &str) -> &str {
    reference
        .strip_prefix(BRANCH_REF_PREFIX)
        .unwrap_or(reference)
}

/// Read branch and cleanliness of the repository rooted at `root`.
///
/// Fails only if the root cannot be opened or the head lookup itself errors.
/// A failed cleanliness check is reported as dirty.
pub fn read_status<B>(root: &Path, backend: &B) -> AppResult<RepositoryState>
where
    B: RepositoryBackend + ?Sized,
{
    backend.open(root)?;

    let Some(reference) = backend.head(root)? else {
        return Ok(RepositoryState {
            located: true,
            root: Some(root.to_path_buf()),
            branch: EMPTY_HEAD.to_string(),
            clean: false,
            error_state: Some(HeadError::Unresolvable),
        });
    };

    let clean = backend.is_clean(root).unwrap_or_else(|e| {
        tracing::debug!("Status check failed in {:?}, assuming dirty: {}", root, e);
        false
    });

    Ok(RepositoryState {
        located: true,
        root: Some(root.to_path_buf()),
        branch: branch_name(&reference).to_string(),
        clean,
        error_state: None,
    })
}

/// Locate the repository containing `cwd` and read its status.
pub fn inspect<B>(cwd: &Path, backend: &B) -> AppResult<RepositoryState>
where
    B: RepositoryBackend + ?Sized,
{
    match locate_repository(cwd) {
        Some(root) => read_status(&root, backend),
        None => Ok(RepositoryState::not_located()),
    }
}
