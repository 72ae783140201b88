//! Constants for board geometry, search scoring, and console messages.
//!
//! The board is a 1D row-major array of `N * N` cells. Index `0` is the
//! top-left cell and index `CELLS - 1` the bottom-right one.

// =============================================================================
// Board Geometry
// =============================================================================

/// Board size (NxN).
pub const N: usize = 3;

/// Total number of cells on the board.
pub const CELLS: usize = N * N;

/// Every line that wins the game when one marker fills it.
/// Order: three rows, three columns, two diagonals.
pub const WIN_LINES: [[usize; 3]; 8] = [
    [0, 1, 2],
    [3, 4, 5],
    [6, 7, 8],
    [0, 3, 6],
    [1, 4, 7],
    [2, 5, 8],
    [0, 4, 8],
    [2, 4, 6],
];

// =============================================================================
// Minimax Scoring
// =============================================================================

/// Score of a win found at depth 0. Deeper wins score `WIN_SCORE - depth`.
pub const WIN_SCORE: i32 = 10;

// =============================================================================
// Console Text
// =============================================================================

/// Prompt for the startup command.
pub const COMMAND_PROMPT: &str = "Input command: ";

/// Prompt for a human move.
pub const MOVE_PROMPT: &str = "Enter the coordinates: ";

/// Reply to a malformed startup command.
pub const BAD_PARAMETERS: &str = "Bad parameters!";

/// Horizontal border drawn above and below the board.
pub const BORDER: &str = "---------";

/// Cell character used in board strings for an empty cell.
pub const EMPTY_CELL: char = '_';
