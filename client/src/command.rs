//! Terminal shell: one command per input line, the rendered page after each.

use std::io::Write;
use std::str::FromStr;

use tasklist_core::todo::{ParseTodoIdError, TodoId};
use tasklist_runtime::StoreError;
use thiserror::Error;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};

use crate::controller::TodoListController;

/// Printed for `help` and after a malformed line
pub const USAGE: &str = "\
Commands:
  add <text>     set the input and submit it
  add            submit the current input
  input <text>   set the input without submitting
  toggle <id>    mark an item complete or incomplete
  delete <id>    delete an item
  reload         fetch the list again
  help           show this help
  quit           leave";

/// A parsed shell line
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Command {
    /// `add [text]`; without text the current input is submitted
    Add(Option<String>),
    /// `input <text>`
    Input(String),
    /// `toggle <id>`
    Toggle(TodoId),
    /// `delete <id>`
    Delete(TodoId),
    /// `reload`
    Reload,
    /// `help`
    Help,
    /// `quit`
    Quit,
}

/// Why a line is not a [`Command`]
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CommandError {
    /// Nothing but whitespace
    #[error("Empty line")]
    Empty,

    /// First word is not a command
    #[error("Unknown command: {0}")]
    Unknown(String),

    /// A command that needs an argument got none
    #[error("Missing argument for {0}")]
    MissingArgument(&'static str),

    /// The id argument is not a number
    #[error(transparent)]
    InvalidId(#[from] ParseTodoIdError),
}

impl FromStr for Command {
    type Err = CommandError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let line = line.trim_start().trim_end_matches(['\r', '\n']);
        let (word, rest) = line.split_once(char::is_whitespace).unwrap_or((line, ""));

        match word {
            "" => Err(CommandError::Empty),
            "add" => Ok(Self::Add((!rest.is_empty()).then(|| rest.to_string()))),
            "input" => Ok(Self::Input(rest.to_string())),
            "toggle" => Ok(Self::Toggle(parse_id("toggle", rest)?)),
            "delete" => Ok(Self::Delete(parse_id("delete", rest)?)),
            "reload" => Ok(Self::Reload),
            "help" => Ok(Self::Help),
            "quit" | "exit" => Ok(Self::Quit),
            other => Err(CommandError::Unknown(other.to_string())),
        }
    }
}

fn parse_id(command: &'static str, arg: &str) -> Result<TodoId, CommandError> {
    let arg = arg.trim();
    if arg.is_empty() {
        return Err(CommandError::MissingArgument(command));
    }
    Ok(arg.trim_start_matches('#').parse()?)
}

/// Errors that end the shell
#[derive(Error, Debug)]
pub enum ShellError {
    /// Reading input or writing output failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The controller no longer accepts operations
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Run one command against the controller
///
/// # Errors
///
/// [`StoreError`] if the controller has been unmounted.
pub async fn execute(controller: &TodoListController, command: Command) -> Result<(), StoreError> {
    match command {
        Command::Add(Some(text)) => {
            controller.set_input(text).await?;
            controller.submit().await
        },
        Command::Add(None) => controller.submit().await,
        Command::Input(text) => controller.set_input(text).await,
        Command::Toggle(id) => controller.toggle(id).await,
        Command::Delete(id) => controller.remove(id).await,
        Command::Reload => controller.load().await,
        Command::Help | Command::Quit => Ok(()),
    }
}

/// Read commands from `input` until `quit` or end of input, writing the page
/// to `output` after every command
///
/// # Errors
///
/// [`ShellError`] on I/O failure or if the controller was unmounted.
pub async fn run_shell<R, W>(
    controller: &mut TodoListController,
    input: R,
    output: &mut W,
) -> Result<(), ShellError>
where
    R: AsyncBufRead + Unpin,
    W: Write,
{
    write!(output, "{}", controller.render().await)?;
    output.flush()?;

    let mut lines = input.lines();
    while let Some(line) = lines.next_line().await? {
        match line.parse::<Command>() {
            Ok(Command::Quit) => break,
            Ok(Command::Help) => writeln!(output, "{USAGE}")?,
            Ok(command) => {
                execute(controller, command).await?;
                write!(output, "{}", controller.render().await)?;
            },
            Err(CommandError::Empty) => {},
            Err(error) => writeln!(output, "{error}\n{USAGE}")?,
        }
        output.flush()?;
    }
    Ok(())
}
