//! Input prompts for the interactive session.

use anyhow::Result;
use console::style;
use dialoguer::Input;

/// Read one command line. An empty line is allowed.
pub fn command_line(prompt: &str) -> Result<String> {
    let line: String = Input::new()
        .with_prompt(format!("{} {prompt}", style("»").bold()))
        .allow_empty(true)
        .interact_text()?;
    Ok(line.trim().to_string())
}

/// Prompt for confirmation (yes/no).
pub fn confirm(message: &str) -> Result<bool> {
    let result = dialoguer::Confirm::new()
        .with_prompt(format!("{} {}", style("»").bold(), message))
        .default(false)
        .interact()?;
    Ok(result)
}
