//! promptline CLI
//!
//! Main entry point. Prints a decorated bash prompt line built from the
//! working directory, repository state, cluster context and the previous
//! command's exit code.

mod commands;

use anyhow::Context;
use clap::{Parser, Subcommand};
use commands::{InitCommand, LayoutCommand, RenderCommand};
use promptline_core::{config::AppConfig, logging};
use std::path::PathBuf;

/// promptline - a bash prompt with path, git and cluster context
#[derive(Parser, Debug)]
#[command(name = "promptline")]
#[command(about = "Render a bash prompt with path, git and cluster context", long_about = None)]
#[command(version)]
#[command(args_conflicts_with_subcommands = true)]
struct Cli {
    /// Exit code of the previous command (default: 0)
    exit_code: Option<String>,

    /// Path to config file (or PROMPTLINE_CONFIG)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Log level (error, warn, info, debug, trace; or PROMPTLINE_LOG)
    #[arg(long, global = true)]
    log_level: Option<String>,

    /// Enable verbose output (sets log level to debug)
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Disable colored log output (also set by NO_COLOR)
    #[arg(long, global = true)]
    no_color: bool,

    /// Render the minimal single-line layout
    #[arg(long, global = true)]
    minimal: bool,

    /// Show user@host instead of user
    #[arg(long, global = true)]
    host: bool,

    /// Maximum number of path components to display (0 disables truncation)
    #[arg(long, global = true, allow_negative_numbers = true)]
    max_depth: Option<i64>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Print the shell integration snippet
    Init(InitCommand),

    /// Print the effective segment layout
    Layout(LayoutCommand),
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Load base configuration from file and environment
    let config = AppConfig::load(cli.config.clone()).context("Failed to load configuration")?;

    // Apply CLI overrides
    let config = config.with_overrides(
        cli.log_level,
        cli.verbose,
        cli.no_color,
        cli.minimal,
        cli.host,
        cli.max_depth,
    );

    logging::init_logging(config.log_level.as_deref(), config.no_color)?;

    tracing::debug!("Config file: {:?}", config.config_file);
    tracing::debug!("Home: {:?}", config.home);

    let command_name = match &cli.command {
        None => "render",
        Some(Commands::Init(_)) => "init",
        Some(Commands::Layout(_)) => "layout",
    };
    let _span = tracing::debug_span!("command", name = command_name).entered();

    let result = match cli.command {
        None => RenderCommand {
            exit_code: cli.exit_code,
        }
        .execute(&config),
        Some(Commands::Init(cmd)) => cmd.execute(),
        Some(Commands::Layout(cmd)) => cmd.execute(&config),
    };

    if let Err(e) = &result {
        tracing::error!("Command failed: {}", e);
    }

    result.context("promptline failed")
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_positional_exit_code() {
        let cli = Cli::try_parse_from(["promptline", "127"]).unwrap();
        assert_eq!(cli.exit_code.as_deref(), Some("127"));
        assert!(cli.command.is_none());
    }

    #[test]
    fn test_no_arguments() {
        let cli = Cli::try_parse_from(["promptline"]).unwrap();
        assert_eq!(cli.exit_code, None);
        assert!(cli.command.is_none());
    }

    #[test]
    fn test_flags_with_exit_code() {
        let cli =
            Cli::try_parse_from(["promptline", "--minimal", "--max-depth", "3", "1"]).unwrap();
        assert!(cli.minimal);
        assert_eq!(cli.max_depth, Some(3));
        assert_eq!(cli.exit_code.as_deref(), Some("1"));
    }

    #[test]
    fn test_flags_do_not_read_environment() {
        let cmd = Cli::command();
        for arg in cmd.get_arguments() {
            assert!(
                arg.get_env().is_none(),
                "--{} reads the environment; AppConfig owns env handling",
                arg.get_id()
            );
        }
    }

    #[test]
    fn test_no_color_env_accepts_any_value() {
        std::env::set_var("NO_COLOR", "1");
        let parsed = Cli::try_parse_from(["promptline", "0"]);
        std::env::remove_var("NO_COLOR");

        let cli = parsed.unwrap();
        assert!(!cli.no_color);
        assert_eq!(cli.exit_code.as_deref(), Some("0"));
    }

    #[test]
    fn test_init_subcommand() {
        let cli = Cli::try_parse_from(["promptline", "init", "bash"]).unwrap();
        assert!(matches!(cli.command, Some(Commands::Init(_))));
    }

    #[test]
    fn test_layout_subcommand() {
        let cli = Cli::try_parse_from(["promptline", "layout", "--json"]).unwrap();
        match cli.command {
            Some(Commands::Layout(cmd)) => assert!(cmd.json),
            other => panic!("unexpected command: {:?}", other),
        }
    }
}
