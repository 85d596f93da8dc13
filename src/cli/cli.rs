use std::path::PathBuf;

use clap::Parser;

use crate::application::data::LogLevel;

/// Browse and edit an in-memory folder tree.
#[derive(Parser, Debug, Clone)]
#[command(version)]
pub struct Cli {
    /// YAML file with the initial tree. The built-in sample tree is used when omitted
    #[clap(long, short)]
    pub fixture: Option<PathBuf>,

    #[clap(long, short, default_value = "warn", value_enum)]
    pub log_level: LogLevel,

    /// Print the outline once and exit
    #[clap(long, short)]
    pub print: bool,

    /// Start with every folder open
    #[clap(long, short)]
    pub expand: bool,
}
