//! Tic-tac-toe board representation, move application, and win detection.

use std::fmt;
use std::str::FromStr;

use crate::constants::{BORDER, CELLS, EMPTY_CELL, N, WIN_LINES};

/// A player's marker.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Marker {
    X,
    O,
}

impl Marker {
    /// Returns the other player's marker.
    pub fn opponent(self) -> Self {
        match self {
            Marker::X => Marker::O,
            Marker::O => Marker::X,
        }
    }

    pub fn as_char(self) -> char {
        match self {
            Marker::X => 'X',
            Marker::O => 'O',
        }
    }
}

impl fmt::Display for Marker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

/// State of the game as seen from a single board snapshot.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Outcome {
    InProgress,
    Won(Marker),
    Draw,
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::InProgress => write!(f, "Game not finished"),
            Outcome::Won(marker) => write!(f, "{marker} wins"),
            Outcome::Draw => write!(f, "Draw"),
        }
    }
}

/// Reason a move could not be applied. The board is left unchanged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MoveError {
    /// Index is not on the board
    OutOfRange(usize),
    /// Cell already holds a marker
    Occupied(usize),
}

impl fmt::Display for MoveError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MoveError::OutOfRange(idx) => write!(f, "Illegal move: cell {idx} is off the board"),
            MoveError::Occupied(idx) => write!(f, "Illegal move: cell {idx} is occupied"),
        }
    }
}

impl std::error::Error for MoveError {}

/// Error returned when a cell string cannot be read as a board.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseBoardError {
    /// Wrong number of cells
    Length(usize),
    /// Character that is neither a marker nor an empty cell
    InvalidCell(char),
}

impl fmt::Display for ParseBoardError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseBoardError::Length(len) => {
                write!(f, "expected {CELLS} cells, got {len}")
            }
            ParseBoardError::InvalidCell(c) => {
                write!(f, "invalid cell '{c}', expected X, O or {EMPTY_CELL}")
            }
        }
    }
}

impl std::error::Error for ParseBoardError {}

/// A 3x3 board stored row-major.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Board {
    cells: [Option<Marker>; CELLS],
}

impl Board {
    pub fn new() -> Self {
        Self::default()
    }

    /// Marker at `idx`, or `None` for an empty or off-board cell.
    pub fn get(&self, idx: usize) -> Option<Marker> {
        self.cells.get(idx).copied().flatten()
    }

    pub fn is_empty(&self, idx: usize) -> bool {
        idx < CELLS && self.cells[idx].is_none()
    }

    /// Indices of all empty cells in ascending order.
    ///
    /// The order is relied upon for tie-breaking by the heuristic and
    /// minimax strategies.
    pub fn available_moves(&self) -> Vec<usize> {
        (0..CELLS)
            .filter(|&idx| self.cells[idx].is_none())
            .collect()
    }

    /// Number of markers placed so far.
    pub fn moves_made(&self) -> usize {
        self.cells.iter().filter(|c| c.is_some()).count()
    }

    /// Places `marker` at `idx`. Rejects off-board and occupied cells.
    pub fn apply_move(&mut self, idx: usize, marker: Marker) -> Result<(), MoveError> {
        match self.cells.get(idx) {
            None => Err(MoveError::OutOfRange(idx)),
            Some(Some(_)) => Err(MoveError::Occupied(idx)),
            Some(None) => {
                self.cells[idx] = Some(marker);
                Ok(())
            }
        }
    }

    /// Copy of the board with `marker` placed at the empty cell `idx`.
    pub(crate) fn with_move(&self, idx: usize, marker: Marker) -> Board {
        debug_assert!(self.cells[idx].is_none());
        let mut next = *self;
        next.cells[idx] = Some(marker);
        next
    }

    /// True iff `marker` fills one of the win lines.
    pub fn check_win(&self, marker: Marker) -> bool {
        WIN_LINES
            .iter()
            .any(|line| line.iter().all(|&idx| self.cells[idx] == Some(marker)))
    }

    /// True iff the board is full and nobody has won.
    pub fn check_draw(&self) -> bool {
        !self.check_win(Marker::X) && !self.check_win(Marker::O) && self.is_full()
    }

    pub fn is_full(&self) -> bool {
        self.cells.iter().all(|c| c.is_some())
    }

    pub fn outcome(&self) -> Outcome {
        if self.check_win(Marker::X) {
            Outcome::Won(Marker::X)
        } else if self.check_win(Marker::O) {
            Outcome::Won(Marker::O)
        } else if self.is_full() {
            Outcome::Draw
        } else {
            Outcome::InProgress
        }
    }

    /// Whose turn it is, inferred from marker counts. X moves first.
    pub fn next_marker(&self) -> Marker {
        if self.count(Marker::X) <= self.count(Marker::O) {
            Marker::X
        } else {
            Marker::O
        }
    }

    fn count(&self, marker: Marker) -> usize {
        self.cells.iter().filter(|&&c| c == Some(marker)).count()
    }
}

/// Converts 1-based `(row, col)` to a cell index, or `None` when off the board.
pub fn index_of(row: usize, col: usize) -> Option<usize> {
    if (1..=N).contains(&row) && (1..=N).contains(&col) {
        Some((row - 1) * N + (col - 1))
    } else {
        None
    }
}

/// Converts a cell index to 1-based `(row, col)`.
pub fn coords_of(idx: usize) -> (usize, usize) {
    (idx / N + 1, idx % N + 1)
}

impl FromStr for Board {
    type Err = ParseBoardError;

    /// Reads a row-major cell string such as `_XXOO_OX_`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let chars: Vec<char> = s.chars().collect();
        if chars.len() != CELLS {
            return Err(ParseBoardError::Length(chars.len()));
        }
        let mut board = Board::new();
        for (idx, &ch) in chars.iter().enumerate() {
            board.cells[idx] = match ch.to_ascii_uppercase() {
                'X' => Some(Marker::X),
                'O' => Some(Marker::O),
                EMPTY_CELL | ' ' => None,
                other => return Err(ParseBoardError::InvalidCell(other)),
            };
        }
        Ok(board)
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{BORDER}")?;
        for row in self.cells.chunks(N) {
            write!(f, "| ")?;
            for cell in row {
                let ch = cell.map_or(' ', Marker::as_char);
                write!(f, "{ch} ")?;
            }
            writeln!(f, "|")?;
        }
        write!(f, "{BORDER}")
    }
}
