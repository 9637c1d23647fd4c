//! Prompt rendering for promptline.
//!
//! This crate turns the invocation context into one prompt line:
//! - Segment types and the built-in layouts ([`types`])
//! - Declarative layouts loaded from YAML ([`loader`])
//! - Home-relative, depth-bounded paths ([`path`])
//! - Cluster context from a kube config ([`cluster`])
//! - Composition of all segments ([`builder`])

pub mod builder;
pub mod cluster;
pub mod loader;
pub mod path;
pub mod types;

// Re-export main types
pub use builder::{degrade, exit_formatting, render_segment, PromptComposer, PromptContext};
pub use cluster::{read_cluster_context, ClusterContextState, KubeConfig};
pub use loader::{load_layout, resolve_layout, validate_layout};
pub use path::{summarize, PathDisplay};
pub use types::{Block, Layout, Segment, SegmentKind, SegmentSpec, AFFIRMATIVE, ALERT, TERMINATOR};
