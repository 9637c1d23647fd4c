//! Layout loader for the declarative segment layout.

use crate::types::{Layout, MAX_ORDER};
use promptline_core::{AppConfig, AppError, AppResult};
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;

/// The part of the config file this crate cares about.
#[derive(Debug, Default, Deserialize)]
struct LayoutFile {
    layout: Option<Layout>,
}

/// Load the `layout` section of a config file.
///
/// Returns `Ok(None)` when the file has no `layout` key. Reading, parsing and
/// validation failures are errors: the file was asked for explicitly.
///
/// # Example
/// ```no_run
/// use promptline_prompt::load_layout;
/// use std::path::Path;
///
/// # fn example() -> Result<(), Box<dyn std::error::Error>> {
/// if let Some(layout) = load_layout(Path::new("/home/alice/.config/promptline/config.yaml"))? {
///     println!("{} segments", layout.len());
/// }
/// # Ok(())
/// # }
/// ```
pub fn load_layout(path: &Path) -> AppResult<Option<Layout>> {
    tracing::debug!("Loading layout from: {:?}", path);

    let contents = std::fs::read_to_string(path).map_err(|e| {
        AppError::Layout(format!("Failed to read layout file {:?}: {}", path, e))
    })?;

    if contents.trim().is_empty() {
        return Ok(None);
    }

    let file: LayoutFile = serde_yaml::from_str(&contents).map_err(|e| {
        AppError::Layout(format!("Failed to parse layout in {:?}: {}", path, e))
    })?;

    match file.layout {
        Some(layout) => {
            validate_layout(&layout)?;
            tracing::debug!("Loaded layout with {} segments", layout.len());
            Ok(Some(layout))
        }
        None => Ok(None),
    }
}

/// Pick the layout for this render.
///
/// Minimal mode always uses [`Layout::minimal`]. Otherwise a `layout` section
/// in the loaded config file replaces [`Layout::full`].
pub fn resolve_layout(config: &AppConfig) -> AppResult<Layout> {
    if config.minimal {
        return Ok(Layout::minimal());
    }

    if let Some(path) = &config.config_file {
        if let Some(layout) = load_layout(path)? {
            return Ok(layout);
        }
    }

    Ok(Layout::full())
}

/// Validate a layout.
///
/// Ranks start at 1, stay within [`MAX_ORDER`], and are unique.
pub fn validate_layout(layout: &Layout) -> AppResult<()> {
    let mut seen = HashMap::new();

    for (kind, spec) in layout.ordered() {
        if spec.order == 0 {
            return Err(AppError::Layout(format!(
                "Segment '{}' has order 0; orders start at 1",
                kind.name()
            )));
        }

        if spec.order > MAX_ORDER {
            return Err(AppError::Layout(format!(
                "Segment '{}' has order {}; the maximum is {}",
                kind.name(),
                spec.order,
                MAX_ORDER
            )));
        }

        if let Some(other) = seen.insert(spec.order, kind) {
            return Err(AppError::Layout(format!(
                "Segments '{}' and '{}' share order {}",
                other.name(),
                kind.name(),
                spec.order
            )));
        }
    }

    Ok(())
}
