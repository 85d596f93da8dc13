use tracing::debug;

use crate::application::command::{Command, CommandParseError, HELP};
use crate::presenter::{Confirmation, Intent, IntentOutcome, NameProvider, Presenter, PromptError};

/// What the shell wants shown after a line of input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    Output(String),
    Quit,
}

/// Line-oriented front end over a [`Presenter`].
pub struct Shell<P> {
    presenter: Presenter,
    prompts: P,
}

impl<P> Shell<P>
where
    P: NameProvider + Confirmation,
{
    pub fn new(presenter: Presenter, prompts: P) -> Self {
        Self { presenter, prompts }
    }

    pub fn presenter(&self) -> &Presenter {
        &self.presenter
    }

    pub fn prompts_mut(&mut self) -> &mut P {
        &mut self.prompts
    }

    pub fn execute(&mut self, line: &str) -> Result<Reply, PromptError> {
        let command = match line.parse::<Command>() {
            Ok(command) => command,
            Err(CommandParseError::Empty) => return Ok(Reply::Output(String::new())),
            Err(error) => {
                debug!("Rejected input {:?}: {}", line, error);
                return Ok(Reply::Output(format!(
                    "{error}. Type 'help' for the list of commands.\n"
                )));
            }
        };

        let Command::Act { action, row } = command else {
            return Ok(match command {
                Command::Help => Reply::Output(format!("{HELP}\n")),
                Command::Quit => Reply::Quit,
                _ => Reply::Output(self.presenter.outline().to_string()),
            });
        };

        let outline = self.presenter.outline();
        let Some(selected) = outline.row(row) else {
            return Ok(Reply::Output(format!(
                "There is no row {row}, the tree shows {} rows.\n",
                outline.rows().len()
            )));
        };
        if !selected.affords(action) {
            return Ok(Reply::Output(format!("Files cannot {action}.\n{outline}")));
        }

        let outcome = self
            .presenter
            .handle(Intent::new(action, selected.id), &mut self.prompts)?;
        debug!(
            "{} on row {}: {:?}, {} folders open",
            action,
            row,
            outcome,
            self.presenter.expansion().open_count()
        );

        let note = match outcome {
            IntentOutcome::Toggled { .. } | IntentOutcome::Edited => "",
            IntentOutcome::Abandoned => "Cancelled.\n",
            IntentOutcome::Unchanged => "Nothing changed.\n",
            IntentOutcome::Stale => "That entry no longer exists.\n",
            IntentOutcome::Ignored => "That action is not available here.\n",
        };
        Ok(Reply::Output(format!("{note}{}", self.presenter.outline())))
    }
}
