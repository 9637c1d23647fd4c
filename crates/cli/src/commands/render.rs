//! Render command handler.
//!
//! Prints the prompt line. This is what runs when no subcommand is given.

use promptline_core::{config::AppConfig, AppResult};
use promptline_prompt::{resolve_layout, PromptComposer, PromptContext};
use promptline_vcs::GitCli;
use std::path::PathBuf;

/// Exit code assumed when none is passed.
pub const DEFAULT_EXIT_CODE: &str = "0";

/// Render the prompt for the current directory
#[derive(Debug)]
pub struct RenderCommand {
    /// Exit code of the previous command, used verbatim
    pub exit_code: Option<String>,
}

impl RenderCommand {
    pub fn execute(&self, config: &AppConfig) -> AppResult<()> {
        let line = self.render(config, working_directory())?;
        println!("{}", line);
        Ok(())
    }

    /// Build the prompt line for `cwd`.
    ///
    /// Fails only when the configured layout cannot be loaded.
    pub fn render(&self, config: &AppConfig, cwd: PathBuf) -> AppResult<String> {
        let exit_code = self.exit_code.as_deref().unwrap_or(DEFAULT_EXIT_CODE);
        tracing::debug!("Rendering prompt for {:?} (exit code {:?})", cwd, exit_code);

        let layout = resolve_layout(config)?;
        let ctx = PromptContext::from_config(config, cwd, exit_code);
        let backend = GitCli::new();

        Ok(PromptComposer::new(&layout, &backend).compose(&ctx))
    }
}

/// Current directory, falling back to `$PWD` when it has been removed.
fn working_directory() -> PathBuf {
    std::env::current_dir().unwrap_or_else(|e| {
        tracing::debug!("current_dir failed: {}", e);
        std::env::var_os("PWD")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("/"))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use promptline_prompt::{ALERT, TERMINATOR};

    fn plain_config() -> AppConfig {
        AppConfig {
            home: Some(PathBuf::from("/nonexistent/home/alice")),
            ..AppConfig::default()
        }
    }

    #[test]
    fn test_missing_exit_code_defaults_to_zero() {
        let cmd = RenderCommand { exit_code: None };
        let line = cmd
            .render(&plain_config(), PathBuf::from("/nonexistent/home/alice/project"))
            .unwrap();

        assert!(line.contains(r"\[\033[0;32m\]$"));
        assert!(line.contains("(~/project)"));
        assert!(line.ends_with(TERMINATOR));
    }

    #[test]
    fn test_empty_exit_code_is_an_alert() {
        let cmd = RenderCommand {
            exit_code: Some(String::new()),
        };
        let line = cmd
            .render(&plain_config(), PathBuf::from("/nonexistent/home/alice"))
            .unwrap();

        assert!(line.contains(&format!("{}$", ALERT)));
    }

    #[test]
    fn test_minimal_mode_is_one_line() {
        let config = AppConfig {
            minimal: true,
            ..plain_config()
        };
        let cmd = RenderCommand {
            exit_code: Some("127".to_string()),
        };
        let line = cmd
            .render(&config, PathBuf::from("/nonexistent/home/alice/src"))
            .unwrap();

        assert_eq!(
            line,
            format!(r"\[\033[0;33m\](~/src) {}${}", ALERT, TERMINATOR)
        );
    }
}
