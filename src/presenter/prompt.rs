use dialoguer::{Confirm, Input};
use snafu::{ResultExt, Snafu};
use tracing::debug;

/// Asks the user for a name. `None` means the prompt was cancelled.
pub trait NameProvider {
    fn request_name(&mut self, prompt: &str) -> Result<Option<String>, PromptError>;
}

/// Asks the user to approve a destructive action.
pub trait Confirmation {
    fn confirm(&mut self, prompt: &str) -> Result<bool, PromptError>;
}

#[derive(Debug, Snafu)]
#[snafu(display("Failed to read user input"))]
pub struct PromptError {
    source: dialoguer::Error,
}

/// Prompts on the controlling terminal.
///
/// A blank answer cancels a name prompt; confirmations default to "no".
#[derive(Debug, Default)]
pub struct TerminalPrompter;

impl TerminalPrompter {
    /// Reads one line of shell input.
    pub fn read_command(&mut self, prompt: &str) -> Result<String, PromptError> {
        Input::<String>::new()
            .with_prompt(prompt)
            .allow_empty(true)
            .interact_text()
            .context(PromptSnafu)
    }
}

impl NameProvider for TerminalPrompter {
    fn request_name(&mut self, prompt: &str) -> Result<Option<String>, PromptError> {
        let answer = Input::<String>::new()
            .with_prompt(prompt)
            .allow_empty(true)
            .interact_text()
            .context(PromptSnafu)?;

        if answer.trim().is_empty() {
            debug!("Blank answer to '{}', treating as cancelled", prompt);
            return Ok(None);
        }
        Ok(Some(answer))
    }
}

impl Confirmation for TerminalPrompter {
    fn confirm(&mut self, prompt: &str) -> Result<bool, PromptError> {
        Confirm::new()
            .with_prompt(prompt)
            .default(false)
            .interact()
            .context(PromptSnafu)
    }
}
