use std::path::PathBuf;

use crate::cli::Cli;

#[derive(Debug, Clone, Default)]
pub struct RuntimeConfig {
    pub fixture: Option<PathBuf>,
    pub print_only: bool,
    pub expand_all: bool,
}

impl From<Cli> for RuntimeConfig {
    fn from(cli: Cli) -> Self {
        Self {
            fixture: cli.fixture,
            print_only: cli.print,
            expand_all: cli.expand,
        }
    }
}
