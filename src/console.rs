//! Line-oriented console protocol.
//!
//! Two kinds of input are read:
//!
//! - the startup command, `start <player-x> <player-o>` or `exit`, where each
//!   player is one of `easy`, `medium`, `hard`, `user`
//! - human moves, `<row> <col>` with 1-based coordinates
//!
//! Malformed input is reported on the output and re-prompted; it never
//! leaves this module as an error.
//!
//! ## Example
//!
//! ```
//! use std::io::Cursor;
//! use tictactoe_rust::console::{Command, Console};
//! use tictactoe_rust::player::Difficulty;
//!
//! let mut console = Console::new(Cursor::new("start hard user\n"), Vec::new());
//! let command = console.read_command().unwrap();
//! assert_eq!(command, Command::Start(Difficulty::Hard, Difficulty::User));
//! ```

use std::fmt;
use std::io::{self, BufRead, Write};

use anyhow::{Result, bail};
use tracing::debug;

use crate::board::{Board, index_of};
use crate::constants::{BAD_PARAMETERS, COMMAND_PROMPT, MOVE_PROMPT, N};
use crate::player::{Difficulty, ParseDifficultyError};

/// A parsed startup command.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Command {
    /// Start a game: X's player, then O's player
    Start(Difficulty, Difficulty),
    /// Leave without playing
    Exit,
}

/// Why a startup command was rejected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandError {
    /// Not of the form `start <a> <b>`
    Syntax,
    /// Unknown player label
    Difficulty(ParseDifficultyError),
}

impl fmt::Display for CommandError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CommandError::Syntax => write!(f, "expected 'start <player> <player>' or 'exit'"),
            CommandError::Difficulty(err) => write!(f, "{err}"),
        }
    }
}

impl std::error::Error for CommandError {}

impl From<ParseDifficultyError> for CommandError {
    fn from(err: ParseDifficultyError) -> Self {
        CommandError::Difficulty(err)
    }
}

/// Parse a startup command line. Case and surrounding whitespace are ignored.
pub fn parse_command(line: &str) -> Result<Command, CommandError> {
    let line = line.trim().to_lowercase();
    if line == "exit" {
        return Ok(Command::Exit);
    }

    let parts: Vec<&str> = line.split_whitespace().collect();
    match parts.as_slice() {
        ["start", x, o] => Ok(Command::Start(x.parse()?, o.parse()?)),
        _ => Err(CommandError::Syntax),
    }
}

/// A rejected move entry. `Display` gives the message shown to the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputError {
    /// Missing or non-numeric coordinates
    NotNumbers,
    /// Coordinates outside `1..=N`
    OutOfRange,
    /// Target cell already taken
    Occupied,
}

impl fmt::Display for InputError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InputError::NotNumbers => write!(f, "You should enter numbers!"),
            InputError::OutOfRange => write!(f, "Coordinates should be from 1 to {N}!"),
            InputError::Occupied => write!(f, "This cell is occupied! Choose another one!"),
        }
    }
}

impl std::error::Error for InputError {}

/// Parse `row col` into an empty cell index on `board`.
pub fn parse_coordinates(line: &str, board: &Board) -> Result<usize, InputError> {
    let mut parts = line.split_whitespace();
    let (Some(row), Some(col)) = (parts.next(), parts.next()) else {
        return Err(InputError::NotNumbers);
    };
    let (Ok(row), Ok(col)) = (row.parse::<i64>(), col.parse::<i64>()) else {
        return Err(InputError::NotNumbers);
    };

    let idx = usize::try_from(row)
        .ok()
        .zip(usize::try_from(col).ok())
        .and_then(|(row, col)| index_of(row, col))
        .ok_or(InputError::OutOfRange)?;

    if !board.is_empty(idx) {
        return Err(InputError::Occupied);
    }
    Ok(idx)
}

/// Console I/O over any reader and writer.
pub struct Console<R, W> {
    input: R,
    output: W,
}

impl Console<io::StdinLock<'static>, io::Stdout> {
    /// Console bound to the process's standard input and output.
    pub fn stdio() -> Self {
        Self::new(io::stdin().lock(), io::stdout())
    }
}

impl<R: BufRead, W: Write> Console<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Write one line of output.
    pub fn say(&mut self, message: &str) -> io::Result<()> {
        writeln!(self.output, "{message}")?;
        self.output.flush()
    }

    pub fn show_board(&mut self, board: &Board) -> io::Result<()> {
        self.say(&board.to_string())
    }

    /// Print `prompt` and read one line. Returns `None` at end of input.
    ///
    /// Invalid UTF-8 is replaced rather than rejected, so it reaches the
    /// parsers as ordinary bad input.
    fn prompt(&mut self, prompt: &str) -> io::Result<Option<String>> {
        write!(self.output, "{prompt}")?;
        self.output.flush()?;

        let mut buf = Vec::new();
        if self.input.read_until(b'\n', &mut buf)? == 0 {
            return Ok(None);
        }
        Ok(Some(String::from_utf8_lossy(&buf).into_owned()))
    }

    /// Read startup commands until a valid one arrives.
    ///
    /// End of input counts as `exit`.
    pub fn read_command(&mut self) -> Result<Command> {
        loop {
            let Some(line) = self.prompt(COMMAND_PROMPT)? else {
                return Ok(Command::Exit);
            };
            match parse_command(&line) {
                Ok(command) => return Ok(command),
                Err(err) => {
                    debug!(input = line.trim(), %err, "rejected command");
                    self.say(BAD_PARAMETERS)?;
                }
            }
        }
    }

    /// Read coordinates until they name an empty cell on `board`.
    pub fn read_move(&mut self, board: &Board) -> Result<usize> {
        loop {
            let Some(line) = self.prompt(MOVE_PROMPT)? else {
                bail!("input closed while waiting for a move");
            };
            match parse_coordinates(&line, board) {
                Ok(idx) => return Ok(idx),
                Err(err) => {
                    debug!(input = line.trim(), ?err, "rejected move");
                    self.say(&err.to_string())?;
                }
            }
        }
    }
}

impl<R> Console<R, Vec<u8>> {
    /// Everything written so far, for in-memory consoles.
    pub fn output_text(&self) -> String {
        String::from_utf8_lossy(&self.output).into_owned()
    }
}
