//! Repository location by ancestor walk.
//!
//! The walk starts at the filesystem root and descends towards the starting
//! directory, so with nested repositories the *outermost* one is found.

use std::path::{Path, PathBuf};

/// Entry name that marks a directory as a repository root.
pub const REPOSITORY_MARKER: &str = ".git";

/// List `path` and all of its ancestors, root first.
///
/// `/home/alice/project` yields `/`, `/home`, `/home/alice`, `/home/alice/project`.
pub fn ancestors_root_first(path: &Path) -> Vec<PathBuf> {
    let mut chain: Vec<PathBuf> = path
        .ancestors()
        .filter(|p| !p.as_os_str().is_empty())
        .map(Path::to_path_buf)
        .collect();
    chain.reverse();
    chain
}

/// Check whether `dir` directly contains a [`REPOSITORY_MARKER`] entry.
///
/// Listing failures count as "no marker here".
pub fn contains_marker(dir: &Path) -> bool {
    walkdir::WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .into_iter()
        .filter_map(|entry| match entry {
            Ok(entry) => Some(entry),
            Err(e) => {
                tracing::debug!("Skipping unreadable entry under {:?}: {}", dir, e);
                None
            }
        })
        .any(|entry| entry.file_name() == REPOSITORY_MARKER)
}

/// Find the outermost ancestor of `start` (inclusive) that is a repository root.
pub fn locate_repository(start: &Path) -> Option<PathBuf> {
    let found = ancestors_root_first(start)
        .into_iter()
        .find(|dir| contains_marker(dir));

    match &found {
        Some(root) => tracing::debug!("Located repository root {:?}", root),
        None => tracing::debug!("No repository above {:?}", start),
    }

    found
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_ancestors_root_first() {
        let chain = ancestors_root_first(Path::new("/home/alice/project"));
        assert_eq!(
            chain,
            vec![
                PathBuf::from("/"),
                PathBuf::from("/home"),
                PathBuf::from("/home/alice"),
                PathBuf::from("/home/alice/project"),
            ]
        );
    }

    #[test]
    fn test_ancestors_of_root() {
        assert_eq!(ancestors_root_first(Path::new("/")), vec![PathBuf::from("/")]);
    }

    #[test]
    fn test_locate_from_subdirectory() {
        let temp = TempDir::new().unwrap();
        let repo = temp.path().join("repo");
        let deep = repo.join("src/bin");
        fs::create_dir_all(repo.join(".git")).unwrap();
        fs::create_dir_all(&deep).unwrap();

        assert_eq!(locate_repository(&deep), Some(repo.clone()));
        assert_eq!(locate_repository(&repo), Some(repo));
    }

    #[test]
    fn test_nested_repositories_resolve_to_outermost() {
        let temp = TempDir::new().unwrap();
        let outer = temp.path().join("outer");
        let inner = outer.join("vendor/inner");
        fs::create_dir_all(outer.join(".git")).unwrap();
        fs::create_dir_all(inner.join(".git")).unwrap();
        fs::create_dir_all(inner.join("src")).unwrap();

        assert_eq!(locate_repository(&inner.join("src")), Some(outer));
    }

    #[test]
    fn test_marker_file_counts() {
        // Worktrees and submodules use a `.git` file instead of a directory
        let temp = TempDir::new().unwrap();
        let worktree = temp.path().join("wt");
        fs::create_dir_all(&worktree).unwrap();
        fs::write(worktree.join(".git"), "gitdir: /elsewhere\n").unwrap();

        assert!(contains_marker(&worktree));
    }

    #[test]
    fn test_not_located() {
        let temp = TempDir::new().unwrap();
        let plain = temp.path().join("plain/dir");
        fs::create_dir_all(&plain).unwrap();

        assert!(!contains_marker(&plain));
        assert_eq!(locate_repository(&plain), None);
    }

    #[test]
    fn test_missing_directory_is_tolerated() {
        let temp = TempDir::new().unwrap();
        let repo = temp.path().join("repo");
        fs::create_dir_all(repo.join(".git")).unwrap();

        // Levels below the repository do not exist; the walk still succeeds
        let gone = repo.join("deleted/after/cd");
        assert!(!contains_marker(&gone));
        assert_eq!(locate_repository(&gone), Some(repo));
    }
}
