//! Logging infrastructure for promptline.
//!
//! All logs go to stderr. Stdout carries nothing but the rendered prompt line,
//! which the shell captures verbatim.

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::error::{AppError, AppResult};

/// Filter used when nothing else is configured.
pub const DEFAULT_LOG_LEVEL: &str = "warn";

/// Initialize the tracing subscriber with stderr output.
///
/// An unparseable filter falls back to [`DEFAULT_LOG_LEVEL`]; a broken
/// `PROMPTLINE_LOG` must not break the shell prompt.
///
/// # Arguments
/// * `log_level` - Optional filter override (e.g., "debug", "promptline_vcs=trace")
/// * `no_color` - Disable ANSI colors in log lines
///
/// # Example
/// ```no_run
/// use promptline_core::logging::init_logging;
///
/// init_logging(Some("debug"), false).expect("Failed to initialize logging");
/// ```
pub fn init_logging(log_level: Option<&str>, no_color: bool) -> AppResult<()> {
    let (env_filter, rejected) = build_filter(log_level);

    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_level(true)
        .with_ansi(!no_color && supports_color());

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .try_init()
        .map_err(|e| AppError::Config(format!("Failed to init logging: {}", e)))?;

    if let Some(filter) = rejected {
        tracing::warn!("Invalid log filter {:?}, using {}", filter, DEFAULT_LOG_LEVEL);
    }

    Ok(())
}

/// Build the env filter, returning the rejected input when it had to fall back.
fn build_filter(log_level: Option<&str>) -> (EnvFilter, Option<String>) {
    let requested = log_level.unwrap_or(DEFAULT_LOG_LEVEL);

    match EnvFilter::try_new(requested) {
        Ok(filter) => (filter, None),
        Err(_) => (
            EnvFilter::new(DEFAULT_LOG_LEVEL),
            Some(requested.to_string()),
        ),
    }
}

/// Check if log output may use color.
fn supports_color() -> bool {
    std::env::var_os("NO_COLOR").is_none()
}
