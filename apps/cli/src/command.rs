//! Parsing of shell commands and recall answers.

use std::path::PathBuf;

use thiserror::Error;

/// Word that leaves the shell, or ends a study session early.
pub const QUIT_WORD: &str = "quit";

/// Review quality for each recall choice, best first.
pub const QUALITY_MAP: [i32; 4] = [5, 3, 1, 0];

pub const HELP: &str = "\
    help                : Outputs all information about commands
    quit                : Exits the program
    stats               : Outputs information about the current deck
    load (filePath)     : Loads a deck file from filePath
    save (filePath?)    : Saves the deck to the file at filePath
    create              : Starts a dialog to create a flashcard
    clear               : Clears all flashcards and empties the deck
    start               : Starts a study session (use \"quit\" to end)";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Help,
    Quit,
    Stats,
    Load(PathBuf),
    Save(Option<PathBuf>),
    Create,
    Clear,
    Start,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CommandError {
    #[error("Invalid command.")]
    Unknown(String),

    #[error("`{command}` expects {expected}")]
    Arguments {
        command: &'static str,
        expected: &'static str,
    },

    #[error("recall quality must be a number from 1 to {}", QUALITY_MAP.len())]
    Recall(String),
}

impl Command {
    /// Parse one line of shell input. Blank lines yield `None`.
    pub fn parse(line: &str) -> Result<Option<Self>, CommandError> {
        let mut parts = line.split_whitespace();
        let Some(name) = parts.next() else {
            return Ok(None);
        };
        let args: Vec<&str> = parts.collect();

        let no_args = |command, cmd: Command| {
            if args.is_empty() {
                Ok(cmd)
            } else {
                Err(CommandError::Arguments {
                    command,
                    expected: "no arguments",
                })
            }
        };

        let command = match name {
            "help" => no_args("help", Command::Help)?,
            QUIT_WORD => no_args("quit", Command::Quit)?,
            "stats" => no_args("stats", Command::Stats)?,
            "create" => no_args("create", Command::Create)?,
            "clear" => no_args("clear", Command::Clear)?,
            "start" => no_args("start", Command::Start)?,
            "load" => match args.as_slice() {
                [path] => Command::Load(PathBuf::from(path)),
                _ => {
                    return Err(CommandError::Arguments {
                        command: "load",
                        expected: "exactly one file path",
                    })
                }
            },
            "save" => match args.as_slice() {
                [] => Command::Save(None),
                [path] => Command::Save(Some(PathBuf::from(path))),
                _ => {
                    return Err(CommandError::Arguments {
                        command: "save",
                        expected: "at most one file path",
                    })
                }
            },
            other => return Err(CommandError::Unknown(other.to_string())),
        };

        Ok(Some(command))
    }
}

/// Map a recall choice (1 = perfect ... 4 = forgotten) to a review quality.
pub fn parse_recall(input: &str) -> Result<i32, CommandError> {
    let invalid = || CommandError::Recall(input.to_string());
    let choice: usize = input.trim().parse().map_err(|_| invalid())?;

    choice
        .checked_sub(1)
        .and_then(|index| QUALITY_MAP.get(index))
        .copied()
        .ok_or_else(invalid)
}
