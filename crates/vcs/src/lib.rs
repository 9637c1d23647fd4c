//! Version-control state for promptline.
//!
//! This crate answers two questions about the working directory:
//! - Is it inside a repository, and where is the root? ([`locate`])
//! - Which branch is checked out, and is the tree clean? ([`status`])
//!
//! Repository access goes through [`RepositoryBackend`]; [`GitCli`] is the
//! shipped implementation.
//!
//! # Example
//! ```no_run
//! use promptline_vcs::{inspect, GitCli};
//! use std::path::Path;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let state = inspect(Path::new("/home/alice/project"), &GitCli::new())?;
//! if state.located {
//!     println!("{} ({})", state.branch, if state.clean { "clean" } else { "dirty" });
//! }
//! # Ok(())
//! # }
//! ```

pub mod backend;
pub mod git_cli;
pub mod locate;
pub mod status;

// Re-export main types
pub use backend::RepositoryBackend;
pub use git_cli::GitCli;
pub use locate::{ancestors_root_first, locate_repository, REPOSITORY_MARKER};
pub use status::{branch_name, inspect, read_status, HeadError, RepositoryState, EMPTY_HEAD};
