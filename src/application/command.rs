use std::num::ParseIntError;
use std::str::FromStr;

use clap::ValueEnum;
use snafu::prelude::*;

use crate::presenter::Action;

pub const HELP: &str = "\
Commands:
  t, toggle <row>   open or close a folder
  r, rename <row>   rename an entry
  d, delete <row>   delete an entry
  n, new <row>      create a file inside a folder
  p, print          show the tree again
  h, help           show this help
  q, quit           leave";

/// One line typed into the interactive shell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Act { action: Action, row: usize },
    Print,
    Help,
    Quit,
}

impl FromStr for Command {
    type Err = CommandParseError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let mut words = line.split_whitespace();
        let word = words.next().context(EmptySnafu)?;

        match word.to_lowercase().as_str() {
            "p" | "print" => return Ok(Command::Print),
            "h" | "help" | "?" => return Ok(Command::Help),
            "q" | "quit" | "exit" => return Ok(Command::Quit),
            _ => {}
        }

        let action = <Action as ValueEnum>::from_str(word, true)
            .ok()
            .context(UnknownCommandSnafu { word })?;
        let row = words
            .next()
            .context(MissingRowSnafu { action })?
            .parse::<usize>()
            .context(InvalidRowSnafu)?;

        if let Some(extra) = words.next() {
            return UnexpectedArgumentSnafu { argument: extra }.fail();
        }
        Ok(Command::Act { action, row })
    }
}

#[derive(Debug, Snafu)]
pub enum CommandParseError {
    #[snafu(display("Nothing to do"))]
    Empty,
    #[snafu(display("Unknown command '{}'", word))]
    UnknownCommand { word: String },
    #[snafu(display("'{}' needs a row number", action))]
    MissingRow { action: Action },
    #[snafu(display("Row should be a positive number"))]
    InvalidRow { source: ParseIntError },
    #[snafu(display("Unexpected argument '{}'", argument))]
    UnexpectedArgument { argument: String },
}
