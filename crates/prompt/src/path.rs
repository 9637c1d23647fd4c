//! Working-directory summarisation.

use std::fmt;

/// Marker that replaces the home directory.
pub const HOME_MARKER: &str = "~";

/// Marker inserted where components were dropped.
pub const ELLIPSIS: &str = "...";

/// A path ready for display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathDisplay {
    /// Components, including an empty root component for absolute paths
    pub segments: Vec<String>,

    /// Components were dropped
    pub truncated: bool,
}

impl fmt::Display for PathDisplay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.segments.join("/"))
    }
}

/// Replace a leading `home` with [`HOME_MARKER`].
///
/// Only whole components match: `/home/al` does not prefix `/home/alice`.
pub fn substitute_home(cwd: &str, home: Option<&str>) -> String {
    let Some(home) = home else {
        return cwd.to_string();
    };

    let home = if home.len() > 1 {
        home.trim_end_matches('/')
    } else {
        home
    };

    if home.is_empty() {
        return cwd.to_string();
    }

    if cwd == home {
        return HOME_MARKER.to_string();
    }

    match cwd.strip_prefix(home) {
        Some(rest) if rest.starts_with('/') && home != "/" => format!("{}{}", HOME_MARKER, rest),
        _ => cwd.to_string(),
    }
}

/// Summarise `cwd` to at most `max_depth` components plus an ellipsis.
///
/// The first component (root or `~`) is always kept. A `max_depth` of zero
/// or less disables truncation.
pub fn summarize(cwd: &str, home: Option<&str>, max_depth: i64) -> PathDisplay {
    let substituted = substitute_home(cwd, home);
    let segments: Vec<String> = substituted.split('/').map(str::to_string).collect();

    let limit = match usize::try_from(max_depth) {
        Ok(limit) if limit > 0 => limit,
        _ => {
            return PathDisplay {
                segments,
                truncated: false,
            }
        }
    };

    if segments.len() <= limit {
        return PathDisplay {
            segments,
            truncated: false,
        };
    }

    // first, ellipsis, then the last (limit - 1) components
    let tail_start = segments.len() - (limit - 1);
    let mut kept = Vec::with_capacity(limit + 1);
    kept.push(segments[0].clone());
    kept.push(ELLIPSIS.to_string());
    kept.extend(segments[tail_start..].iter().cloned());

    PathDisplay {
        segments: kept,
        truncated: true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_home_substitution() {
        assert_eq!(substitute_home("/home/alice/project", Some("/home/alice")), "~/project");
        assert_eq!(substitute_home("/home/alice", Some("/home/alice/")), "~");
        assert_eq!(substitute_home("/home/alice2/x", Some("/home/alice")), "/home/alice2/x");
        assert_eq!(substitute_home("/srv/home/alice", Some("/home/alice")), "/srv/home/alice");
        assert_eq!(substitute_home("/etc", None), "/etc");
        assert_eq!(substitute_home("/etc", Some("")), "/etc");
    }

    #[test]
    fn test_root_home() {
        assert_eq!(substitute_home("/", Some("/")), "~");
        assert_eq!(substitute_home("/usr/bin", Some("/")), "/usr/bin");
    }

    #[test]
    fn test_short_path_unchanged() {
        let display = summarize("/home/alice/project", Some("/home/alice"), 20);
        assert_eq!(display.to_string(), "~/project");
        assert!(!display.truncated);

        let display = summarize("/usr/local/bin", None, 4);
        assert_eq!(display.to_string(), "/usr/local/bin");
    }

    #[test]
    fn test_truncates_many_components() {
        let display = summarize("/home/alice/a/b/c/d/e", Some("/home/alice"), 3);
        assert_eq!(display.to_string(), "~/.../d/e");
        assert!(display.truncated);
    }

    #[test]
    fn test_truncates_single_component() {
        // ~/a/b/c/d has five components; one must go
        let display = summarize("/home/alice/a/b/c/d", Some("/home/alice"), 4);
        assert_eq!(display.to_string(), "~/.../b/c/d");
    }

    #[test]
    fn test_absolute_path_keeps_root() {
        let display = summarize("/var/lib/docker/volumes/data", None, 3);
        assert_eq!(display.to_string(), "/.../volumes/data");
        assert_eq!(display.segments[0], "");
    }

    #[test]
    fn test_depth_one() {
        assert_eq!(summarize("/home/alice/a/b", Some("/home/alice"), 1).to_string(), "~/...");
        assert_eq!(summarize("/home/alice/a", Some("/home/alice"), 1).to_string(), "~/...");
    }

    #[test]
    fn test_non_positive_depth_disables_truncation() {
        let deep = "/home/alice/a/b/c/d/e/f";
        for depth in [0, -1, -50] {
            let display = summarize(deep, Some("/home/alice"), depth);
            assert_eq!(display.to_string(), "~/a/b/c/d/e/f");
            assert!(!display.truncated);
        }
    }

    #[test]
    fn test_truncated_form_has_one_ellipsis_and_first_component() {
        let deep = "/opt/one/two/three/four/five/six/seven";
        for depth in 1..8 {
            let display = summarize(deep, None, depth);
            assert!(display.truncated, "depth {depth}");
            assert_eq!(display.segments[0], "");
            assert_eq!(
                display.segments.iter().filter(|s| s.as_str() == ELLIPSIS).count(),
                1
            );
            assert_eq!(display.segments.len(), depth as usize + 1);
        }
    }

    #[test]
    fn test_reapplying_short_output_is_stable() {
        let once = summarize("/home/alice/a/b", Some("/home/alice"), 5).to_string();
        let twice = summarize(&once, Some("/home/alice"), 5).to_string();
        assert_eq!(once, twice);
    }
}
