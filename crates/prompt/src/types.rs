//! Segment types for promptline.
//!
//! A prompt is a fixed, closed set of segment kinds. Each kind has a rank
//! (`order`) and a [`Block`] of text. The [`Layout`] says which kinds appear
//! and where.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Formatting used for a clean tree and a zero exit code.
pub const AFFIRMATIVE: &str = r"\[\033[0;32m\]";

/// Formatting used for a dirty tree and a non-zero exit code.
pub const ALERT: &str = r"\[\033[0;31m\]";

/// Appended after the last segment: reset attributes, then one space.
pub const TERMINATOR: &str = r"\[\033[00m\] ";

const GREY: &str = r"\[\033[0;37m\]";
const BLUE: &str = r"\[\033[1;34m\]";
const YELLOW: &str = r"\[\033[0;33m\]";
const CYAN: &str = r"\[\033[0;36m\]";

/// Largest rank a layout may use; ranks index the output buffer.
pub const MAX_ORDER: usize = 64;

/// The text parts of one segment.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Block {
    /// Escape sequence emitted first
    #[serde(skip_serializing_if = "String::is_empty")]
    pub formatting: String,

    #[serde(skip_serializing_if = "String::is_empty")]
    pub prefix: String,

    /// Dynamic text; computed at render time for dynamic kinds
    #[serde(skip_serializing_if = "String::is_empty")]
    pub content: String,

    #[serde(skip_serializing_if = "String::is_empty")]
    pub suffix: String,
}

impl Block {
    /// Create a block from its four parts.
    pub fn new(
        formatting: impl Into<String>,
        prefix: impl Into<String>,
        content: impl Into<String>,
        suffix: impl Into<String>,
    ) -> Self {
        Self {
            formatting: formatting.into(),
            prefix: prefix.into(),
            content: content.into(),
            suffix: suffix.into(),
        }
    }

    /// Formatting, prefix, content and suffix, in that order.
    pub fn render(&self) -> String {
        let mut rendered = String::with_capacity(
            self.formatting.len() + self.prefix.len() + self.content.len() + self.suffix.len(),
        );
        rendered.push_str(&self.formatting);
        rendered.push_str(&self.prefix);
        rendered.push_str(&self.content);
        rendered.push_str(&self.suffix);
        rendered
    }
}

/// Every segment promptline knows how to render.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SegmentKind {
    TopBracket,
    User,
    Line,
    Pwd,
    Git,
    NewLine,
    BottomBracket,
    Context,
    Time,
    Space,
    Prompt,
}

impl SegmentKind {
    /// All kinds, in declaration order.
    pub const ALL: [SegmentKind; 11] = [
        SegmentKind::TopBracket,
        SegmentKind::User,
        SegmentKind::Line,
        SegmentKind::Pwd,
        SegmentKind::Git,
        SegmentKind::NewLine,
        SegmentKind::BottomBracket,
        SegmentKind::Context,
        SegmentKind::Time,
        SegmentKind::Space,
        SegmentKind::Prompt,
    ];

    /// Name used in layout files.
    pub fn name(&self) -> &'static str {
        match self {
            SegmentKind::TopBracket => "topBracket",
            SegmentKind::User => "user",
            SegmentKind::Line => "line",
            SegmentKind::Pwd => "pwd",
            SegmentKind::Git => "git",
            SegmentKind::NewLine => "newLine",
            SegmentKind::BottomBracket => "bottomBracket",
            SegmentKind::Context => "context",
            SegmentKind::Time => "time",
            SegmentKind::Space => "space",
            SegmentKind::Prompt => "prompt",
        }
    }
}

/// One layout entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SegmentSpec {
    /// 1-based rank in the output
    pub order: usize,

    /// `user` only: show the host name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub host: Option<bool>,

    /// `pwd` only: truncation depth
    #[serde(rename = "maxDepth", default, skip_serializing_if = "Option::is_none")]
    pub max_depth: Option<i64>,

    #[serde(default)]
    pub block: Block,
}

impl SegmentSpec {
    /// Create a spec with no per-kind options.
    pub fn new(order: usize, block: Block) -> Self {
        Self {
            order,
            host: None,
            max_depth: None,
            block,
        }
    }
}

/// Which segments appear, and at which rank.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Layout {
    segments: BTreeMap<SegmentKind, SegmentSpec>,
}

impl Layout {
    /// Empty layout.
    pub fn new() -> Self {
        Self::default()
    }

    /// Two-line layout used when no layout is configured.
    pub fn full() -> Self {
        Self::from_entries([
            (SegmentKind::TopBracket, SegmentSpec::new(1, Block::new(GREY, "", "┌─", ""))),
            (SegmentKind::User, SegmentSpec::new(2, Block::new(BLUE, "[", "", "]"))),
            (SegmentKind::Line, SegmentSpec::new(3, Block::new(GREY, "", "─", ""))),
            (SegmentKind::Pwd, SegmentSpec::new(4, Block::new(YELLOW, "(", "", ")"))),
            (SegmentKind::Git, SegmentSpec::new(5, Block::new("", "(", "", ")"))),
            (SegmentKind::NewLine, SegmentSpec::new(6, Block::new("", "", r"\n", ""))),
            (SegmentKind::BottomBracket, SegmentSpec::new(7, Block::new(GREY, "", "└─", ""))),
            (SegmentKind::Context, SegmentSpec::new(8, Block::new(CYAN, "(", "", ")"))),
            (SegmentKind::Time, SegmentSpec::new(9, Block::new(GREY, "[", r"\A", "]"))),
            (SegmentKind::Prompt, SegmentSpec::new(10, Block::new("", "", "$", ""))),
        ])
    }

    /// Single-line layout: path, branch, delimiter.
    pub fn minimal() -> Self {
        Self::from_entries([
            (SegmentKind::Pwd, SegmentSpec::new(1, Block::new(YELLOW, "(", "", ")"))),
            (SegmentKind::Git, SegmentSpec::new(2, Block::new("", "(", "", ")"))),
            (SegmentKind::Space, SegmentSpec::new(3, Block::new("", "", " ", ""))),
            (SegmentKind::Prompt, SegmentSpec::new(4, Block::new("", "", "$", ""))),
        ])
    }

    fn from_entries<I>(entries: I) -> Self
    where
        I: IntoIterator<Item = (SegmentKind, SegmentSpec)>,
    {
        Self {
            segments: entries.into_iter().collect(),
        }
    }

    /// Add or replace the entry for `kind`.
    pub fn insert(&mut self, kind: SegmentKind, spec: SegmentSpec) {
        self.segments.insert(kind, spec);
    }

    pub fn get(&self, kind: SegmentKind) -> Option<&SegmentSpec> {
        self.segments.get(&kind)
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Entries sorted by rank.
    pub fn ordered(&self) -> Vec<(SegmentKind, &SegmentSpec)> {
        let mut entries: Vec<_> = self.segments.iter().map(|(k, s)| (*k, s)).collect();
        entries.sort_by_key(|(_, spec)| spec.order);
        entries
    }

    /// Size of the output buffer: the highest rank in use.
    pub fn max_rank(&self) -> usize {
        self.segments.values().map(|s| s.order).max().unwrap_or(0)
    }
}

/// One rendered slot of the prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segment {
    pub kind: SegmentKind,
    pub order: usize,
    pub block: Block,
}

impl Segment {
    pub fn new(kind: SegmentKind, order: usize, block: Block) -> Self {
        Self { kind, order, block }
    }

    /// A slot that contributes nothing to the output.
    pub fn empty(kind: SegmentKind, order: usize) -> Self {
        Self::new(kind, order, Block::default())
    }

    pub fn render(&self) -> String {
        self.block.render()
    }
}
