#![allow(clippy::enum_variant_names)]

use clap::Parser as _;
use supports_color::Stream;
use tracing::debug;

use crate::{
    application::{Application, ApplicationError},
    cli::Cli,
};

mod application;
mod cli;
mod expansion;
mod fixture;
mod presenter;
mod tree;

#[compio::main]
#[snafu::report]
async fn main() -> Result<(), ApplicationError> {
    let cli_args = Cli::parse();
    setup_terminal(&cli_args);
    debug!("Parsed CLI arguments: {cli_args:?}");

    Application::run(cli_args).await?;

    Ok(())
}

/// Diagnostics go to stderr so the outline on stdout stays clean; colour follows stdout's capabilities.
fn setup_terminal(cli_args: &Cli) {
    let stdout_colors = supports_color::on(Stream::Stdout).is_some();
    colored::control::set_override(stdout_colors);

    let Some(level) = cli_args.log_level.to_tracing_level() else {
        return;
    };
    let stderr_colors = supports_color::on(Stream::Stderr).is_some();
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .with_ansi(stderr_colors)
        .without_time()
        .compact()
        .init();
}
