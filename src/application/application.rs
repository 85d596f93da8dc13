use snafu::Snafu;
use snafu::prelude::*;
use tracing::{debug, info};

use crate::application::RuntimeConfig;
use crate::application::shell::{Reply, Shell};
use crate::expansion::ExpansionState;
use crate::fixture::{Fixture, FixtureError};
use crate::presenter::{Presenter, PromptError, TerminalPrompter};

const SHELL_PROMPT: &str = "arbor";

pub struct Application;

impl Application {
    pub async fn run(app_config: impl Into<RuntimeConfig>) -> Result<(), ApplicationError> {
        let app_config: RuntimeConfig = app_config.into();
        debug!("Runtime config: {:?}", app_config);

        let fixture = match &app_config.fixture {
            Some(path) => Fixture::from_path(path).await,
            None => Fixture::builtin(),
        }
        .context(FixtureSnafu)?;
        debug!("Fixture root is '{}'", fixture.root().name());
        let root = fixture.into_root();
        info!("Loaded tree '{}' with {} entries", root.name(), root.size());

        let presenter = if app_config.expand_all {
            let expansion = ExpansionState::all_open(&root);
            Presenter::with_expansion(root, expansion)
        } else {
            Presenter::new(root)
        };

        if app_config.print_only {
            print!("{}", presenter.outline());
            return Ok(());
        }

        Self::interact(Shell::new(presenter, TerminalPrompter)).context(PromptSnafu)
    }

    fn interact(mut shell: Shell<TerminalPrompter>) -> Result<(), PromptError> {
        print!("{}", shell.presenter().outline());
        loop {
            let line = shell.prompts_mut().read_command(SHELL_PROMPT)?;
            match shell.execute(&line)? {
                Reply::Output(text) => print!("{text}"),
                Reply::Quit => {
                    info!(
                        "Leaving the explorer with {} entries",
                        shell.presenter().root().size()
                    );
                    return Ok(());
                }
            }
        }
    }
}

#[derive(Debug, Snafu)]
pub enum ApplicationError {
    #[snafu(display("Critical failure encountered while loading the initial tree"))]
    FixtureError { source: FixtureError },
    #[snafu(display("Critical failure encountered while talking to the terminal"))]
    PromptError { source: PromptError },
}
