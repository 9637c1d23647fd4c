//! Prompt composition.
//!
//! Each segment in the layout is rendered on its own, placed at its rank, and
//! the slots are concatenated. A segment whose collaborator fails contributes
//! an empty slot; composition itself never fails.

use crate::cluster::read_cluster_context;
use crate::path::summarize;
use crate::types::{Layout, Segment, SegmentKind, SegmentSpec, AFFIRMATIVE, ALERT, TERMINATOR};
use promptline_core::{AppConfig, AppError, AppResult};
use promptline_vcs::{inspect, RepositoryBackend};
use std::path::PathBuf;

/// Bash escape for the user name.
pub const USER_ESCAPE: &str = r"\u";

/// Bash escape for `user@host`.
pub const USER_HOST_ESCAPE: &str = r"\u@\h";

/// Everything a segment may need to know about this invocation.
#[derive(Debug, Clone)]
pub struct PromptContext {
    /// Working directory being rendered
    pub cwd: PathBuf,

    pub home: Option<PathBuf>,

    /// Exit code of the previous command, compared as a string
    pub exit_code: String,

    pub show_host: bool,

    /// Path-truncation depth unless the layout overrides it
    pub pwd_depth: i64,

    pub active_profile: String,

    /// Kube config to read; `None` leaves the context segment empty
    pub kubeconfig: Option<PathBuf>,

    pub profile_exempt: Vec<String>,
}

impl PromptContext {
    /// Build the context from loaded configuration.
    pub fn from_config(config: &AppConfig, cwd: PathBuf, exit_code: impl Into<String>) -> Self {
        Self {
            cwd,
            home: config.home.clone(),
            exit_code: exit_code.into(),
            show_host: config.show_host,
            pwd_depth: config.effective_pwd_depth(),
            active_profile: config.active_profile.clone(),
            kubeconfig: config.kubeconfig_path(),
            profile_exempt: config.profile_exempt.clone(),
        }
    }
}

/// Formatting for the delimiter: affirmative only for the literal `"0"`.
pub fn exit_formatting(exit_code: &str) -> &'static str {
    if exit_code == "0" {
        AFFIRMATIVE
    } else {
        ALERT
    }
}

/// Render one segment.
///
/// Returns an error only when an optional collaborator (repository backend,
/// kube config) fails. A working directory outside any repository is not an
/// error; it renders as an empty segment.
pub fn render_segment(
    kind: SegmentKind,
    spec: &SegmentSpec,
    ctx: &PromptContext,
    backend: &dyn RepositoryBackend,
) -> AppResult<Segment> {
    let mut block = spec.block.clone();

    match kind {
        SegmentKind::User => {
            let host = spec.host.unwrap_or(false) || ctx.show_host;
            block.content = if host { USER_HOST_ESCAPE } else { USER_ESCAPE }.to_string();
        }
        SegmentKind::Pwd => {
            let depth = spec.max_depth.unwrap_or(ctx.pwd_depth);
            let cwd = ctx.cwd.to_string_lossy();
            let home = ctx.home.as_ref().map(|h| h.to_string_lossy());
            block.content = summarize(&cwd, home.as_deref(), depth).to_string();
        }
        SegmentKind::Git => {
            let state = inspect(&ctx.cwd, backend)?;
            if !state.located {
                return Ok(Segment::empty(kind, spec.order));
            }
            block.formatting = if state.clean { AFFIRMATIVE } else { ALERT }.to_string();
            block.content = state.branch;
        }
        SegmentKind::Context => {
            let path = ctx
                .kubeconfig
                .as_ref()
                .ok_or_else(|| AppError::Cluster("No kube config location".to_string()))?;
            let state = read_cluster_context(path, &ctx.active_profile)?;
            block.content = state.token(&ctx.profile_exempt);
        }
        SegmentKind::Prompt => {
            block.formatting = exit_formatting(&ctx.exit_code).to_string();
        }
        SegmentKind::TopBracket
        | SegmentKind::Line
        | SegmentKind::NewLine
        | SegmentKind::BottomBracket
        | SegmentKind::Time
        | SegmentKind::Space => {}
    }

    Ok(Segment::new(kind, spec.order, block))
}

/// Turn a failed segment into an empty one at the same rank.
pub fn degrade(kind: SegmentKind, order: usize, result: AppResult<Segment>) -> Segment {
    result.unwrap_or_else(|e| {
        tracing::debug!("Segment '{}' left empty: {}", kind.name(), e);
        Segment::empty(kind, order)
    })
}

/// Composes the prompt line from a layout.
pub struct PromptComposer<'a> {
    layout: &'a Layout,
    backend: &'a dyn RepositoryBackend,
}

impl<'a> PromptComposer<'a> {
    pub fn new(layout: &'a Layout, backend: &'a dyn RepositoryBackend) -> Self {
        Self { layout, backend }
    }

    /// Render every segment into its slot.
    pub fn segments(&self, ctx: &PromptContext) -> Vec<Segment> {
        self.layout
            .ordered()
            .into_iter()
            .map(|(kind, spec)| {
                degrade(kind, spec.order, render_segment(kind, spec, ctx, self.backend))
            })
            .collect()
    }

    /// The full prompt line, ending with [`TERMINATOR`].
    ///
    /// # Example
    /// ```no_run
    /// use promptline_prompt::{Layout, PromptComposer, PromptContext};
    /// use promptline_core::AppConfig;
    /// use promptline_vcs::GitCli;
    /// use std::path::PathBuf;
    ///
    /// let layout = Layout::full();
    /// let backend = GitCli::new();
    /// let ctx = PromptContext::from_config(&AppConfig::default(), PathBuf::from("/tmp"), "0");
    /// println!("{}", PromptComposer::new(&layout, &backend).compose(&ctx));
    /// ```
    pub fn compose(&self, ctx: &PromptContext) -> String {
        let mut slots = vec![String::new(); self.layout.max_rank()];

        for segment in self.segments(ctx) {
            match segment
                .order
                .checked_sub(1)
                .and_then(|index| slots.get_mut(index))
            {
                Some(slot) => *slot = segment.render(),
                None => tracing::warn!(
                    "Segment '{}' has unusable order {}",
                    segment.kind.name(),
                    segment.order
                ),
            }
        }

        let mut out = slots.concat();
        out.push_str(TERMINATOR);
        out
    }
}
