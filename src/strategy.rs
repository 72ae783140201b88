//! Move-selection strategies for computer players.
//!
//! A [`Strategy`] maps a board and the marker it plays to a cell index.
//! Seeds are injectable so games between computer players are reproducible.

use tracing::trace;

use crate::board::{Board, Marker};
use crate::player::Difficulty;

/// Anything that can choose a move for a computer player.
pub trait Strategy {
    /// Picks a cell for `marker`. Returns `None` only when the board is full.
    fn generate_move(&mut self, board: &Board, marker: Marker) -> Option<usize>;

    /// The difficulty level this strategy implements.
    fn level(&self) -> Difficulty;
}

/// Uniformly random choice among the empty cells ("easy").
pub struct RandomStrategy {
    rng: fastrand::Rng,
}

impl Default for RandomStrategy {
    fn default() -> Self {
        Self::new()
    }
}

impl RandomStrategy {
    /// Create a strategy seeded from the thread-local generator.
    pub fn new() -> Self {
        Self {
            rng: fastrand::Rng::new(),
        }
    }

    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: fastrand::Rng::with_seed(seed),
        }
    }
}

impl Strategy for RandomStrategy {
    fn generate_move(&mut self, board: &Board, _marker: Marker) -> Option<usize> {
        let moves = board.available_moves();
        if moves.is_empty() {
            return None;
        }
        Some(moves[self.rng.usize(..moves.len())])
    }

    fn level(&self) -> Difficulty {
        Difficulty::Easy
    }
}

/// One-ply lookahead ("medium").
///
/// Takes an immediate win, otherwise blocks the opponent's immediate win,
/// otherwise plays randomly.
pub struct HeuristicStrategy {
    fallback: RandomStrategy,
}

impl Default for HeuristicStrategy {
    fn default() -> Self {
        Self::new()
    }
}

impl HeuristicStrategy {
    pub fn new() -> Self {
        Self {
            fallback: RandomStrategy::new(),
        }
    }

    /// Seed used for the random fallback move.
    pub fn with_seed(seed: u64) -> Self {
        Self {
            fallback: RandomStrategy::with_seed(seed),
        }
    }
}

impl Strategy for HeuristicStrategy {
    fn generate_move(&mut self, board: &Board, marker: Marker) -> Option<usize> {
        if let Some(idx) = find_winning_move(board, marker) {
            trace!(idx, %marker, "heuristic takes win");
            return Some(idx);
        }
        if let Some(idx) = find_winning_move(board, marker.opponent()) {
            trace!(idx, %marker, "heuristic blocks");
            return Some(idx);
        }
        self.fallback.generate_move(board, marker)
    }

    fn level(&self) -> Difficulty {
        Difficulty::Medium
    }
}

/// First empty cell (in ascending order) that completes a line for `marker`.
pub fn find_winning_move(board: &Board, marker: Marker) -> Option<usize> {
    board
        .available_moves()
        .into_iter()
        .find(|&idx| board.with_move(idx, marker).check_win(marker))
}
