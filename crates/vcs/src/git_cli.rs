//! [`RepositoryBackend`] implemented by running the `git` executable.

use crate::backend::RepositoryBackend;
use promptline_core::{AppError, AppResult};
use std::path::{Path, PathBuf};
use std::process::{Command, Output};

/// Backend that shells out to `git` with the repository root as working directory.
#[derive(Debug, Clone)]
pub struct GitCli {
    program: PathBuf,
}

impl Default for GitCli {
    fn default() -> Self {
        Self::new()
    }
}

impl GitCli {
    /// Use the `git` found on `PATH`.
    pub fn new() -> Self {
        Self {
            program: PathBuf::from("git"),
        }
    }

    /// Use a specific git executable.
    pub fn with_program(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
        }
    }

    /// Run git in `root` and return the raw output, whatever the exit status.
    fn run(&self, root: &Path, args: &[&str]) -> AppResult<Output> {
        tracing::trace!("git {} (in {:?})", args.join(" "), root);

        Command::new(&self.program)
            .args(args)
            .current_dir(root)
            .output()
            .map_err(|e| AppError::Repository(format!("Failed to run {:?}: {}", self.program, e)))
    }

    /// Run git in `root` and return stdout, failing on a non-zero exit.
    fn run_stdout(&self, root: &Path, args: &[&str]) -> AppResult<String> {
        let output = self.run(root, args)?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(AppError::Repository(format!(
                "git {} failed: {}",
                args.join(" "),
                stderr.trim()
            )));
        }

        Ok(String::from_utf8_lossy(&output.stdout).to_string())
    }
}

impl RepositoryBackend for GitCli {
    fn open(&self, root: &Path) -> AppResult<()> {
        self.run_stdout(root, &["rev-parse", "--git-dir"])
            .map(|_| ())
    }

    fn head(&self, root: &Path) -> AppResult<Option<String>> {
        let verified = self.run(root, &["rev-parse", "--verify", "--quiet", "HEAD"])?;
        if !verified.status.success() {
            return Ok(None);
        }
        let commit = String::from_utf8_lossy(&verified.stdout).trim().to_string();

        let symbolic = self.run(root, &["symbolic-ref", "--quiet", "HEAD"])?;
        if symbolic.status.success() {
            let name = String::from_utf8_lossy(&symbolic.stdout).trim().to_string();
            return Ok(Some(name));
        }

        // Detached
        Ok(Some(commit))
    }

    fn is_clean(&self, root: &Path) -> AppResult<bool> {
        let stdout = self.run_stdout(root, &["--no-optional-locks", "status", "--porcelain"])?;
        Ok(stdout.trim().is_empty())
    }
}
