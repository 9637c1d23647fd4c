//! Layout command handler.
//!
//! Shows the layout a render would use, after config and minimal mode.

use clap::Args;
use promptline_core::{config::AppConfig, AppResult};
use promptline_prompt::{resolve_layout, Layout};

/// Print the effective segment layout
#[derive(Args, Debug)]
pub struct LayoutCommand {
    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

impl LayoutCommand {
    pub fn execute(&self, config: &AppConfig) -> AppResult<()> {
        let layout = resolve_layout(config)?;
        print!("{}", self.format(&layout)?);
        Ok(())
    }

    fn format(&self, layout: &Layout) -> AppResult<String> {
        if self.json {
            let mut out = serde_json::to_string_pretty(layout)?;
            out.push('\n');
            Ok(out)
        } else {
            Ok(serde_yaml::to_string(layout)?)
        }
    }
}
