//! Init command handler.
//!
//! Prints the shell snippet that wires promptline into the prompt.

use clap::{Args, ValueEnum};
use promptline_core::AppResult;

/// Shells promptline can emit escapes for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Shell {
    Bash,
}

/// Print the shell integration snippet
#[derive(Args, Debug)]
pub struct InitCommand {
    /// Target shell
    #[arg(value_enum)]
    pub shell: Shell,

    /// Command used to invoke promptline from the hook
    #[arg(long, default_value = "promptline")]
    pub binary: String,
}

impl InitCommand {
    pub fn execute(&self) -> AppResult<()> {
        tracing::debug!("Emitting init snippet for {:?}", self.shell);
        print!("{}", hook_script(self.shell, &self.binary));
        Ok(())
    }
}

/// Shell code that sets `PS1` from the previous exit code before each prompt.
pub fn hook_script(shell: Shell, binary: &str) -> String {
    match shell {
        Shell::Bash => format!(
            r#"__promptline_prompt() {{
    local code=$?
    PS1="$({binary} "$code")"
    return $code
}}
case ";${{PROMPT_COMMAND}};" in
    *";__promptline_prompt;"*) ;;
    *) PROMPT_COMMAND="__promptline_prompt${{PROMPT_COMMAND:+;$PROMPT_COMMAND}}" ;;
esac
"#
        ),
    }
}
