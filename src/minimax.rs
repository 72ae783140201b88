//! Exhaustive minimax search ("hard").
//!
//! The tree is searched to terminal positions. A win for the searching
//! player scores `WIN_SCORE - depth` and a loss `depth - WIN_SCORE`, so the
//! fastest win and the slowest loss are preferred. Draws score 0.
//!
//! Each root move is searched with a full alpha-beta window, which makes its
//! score exact and the chosen move identical to a plain minimax search.

use tracing::debug;

use crate::board::{Board, Marker};
use crate::constants::WIN_SCORE;
use crate::player::Difficulty;
use crate::strategy::Strategy;

/// Optimal play via [`best_move`].
#[derive(Default)]
pub struct MinimaxStrategy;

impl MinimaxStrategy {
    pub fn new() -> Self {
        Self
    }
}

impl Strategy for MinimaxStrategy {
    fn generate_move(&mut self, board: &Board, marker: Marker) -> Option<usize> {
        best_move(board, marker)
    }

    fn level(&self) -> Difficulty {
        Difficulty::Hard
    }
}

/// Scores every available move for `me` and returns the best one.
///
/// Ties go to the lowest index. Returns `None` on a full board.
pub fn best_move(board: &Board, me: Marker) -> Option<usize> {
    let mut best: Option<(usize, i32)> = None;

    for idx in board.available_moves() {
        let child = board.with_move(idx, me);
        let score = minimax(&child, me, false, 0, i32::MIN, i32::MAX);
        debug!(idx, score, "minimax root move");

        if best.is_none_or(|(_, best_score)| score > best_score) {
            best = Some((idx, score));
        }
    }

    best.map(|(idx, _)| idx)
}

/// Returns the score of `board` from `me`'s point of view.
///
/// `maximizing` is true when `me` is to move. `depth` counts plies played
/// since the root move.
pub fn minimax(
    board: &Board,
    me: Marker,
    maximizing: bool,
    depth: i32,
    mut alpha: i32,
    mut beta: i32,
) -> i32 {
    if board.check_win(me) {
        return WIN_SCORE - depth;
    }
    if board.check_win(me.opponent()) {
        return depth - WIN_SCORE;
    }
    let moves = board.available_moves();
    if moves.is_empty() {
        return 0;
    }

    if maximizing {
        let mut value = i32::MIN;
        for idx in moves {
            let child = board.with_move(idx, me);
            value = value.max(minimax(&child, me, false, depth + 1, alpha, beta));
            alpha = alpha.max(value);
            if alpha >= beta {
                break;
            }
        }
        value
    } else {
        let mut value = i32::MAX;
        for idx in moves {
            let child = board.with_move(idx, me.opponent());
            value = value.min(minimax(&child, me, true, depth + 1, alpha, beta));
            beta = beta.min(value);
            if alpha >= beta {
                break;
            }
        }
        value
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::strategy::{HeuristicStrategy, RandomStrategy};

    fn board(cells: &str) -> Board {
        cells.parse().unwrap()
    }

    /// Plain minimax without pruning.
    fn reference(board: &Board, me: Marker, maximizing: bool, depth: i32) -> i32 {
        if board.check_win(me) {
            return WIN_SCORE - depth;
        }
        if board.check_win(me.opponent()) {
            return depth - WIN_SCORE;
        }
        let moves = board.available_moves();
        if moves.is_empty() {
            return 0;
        }
        let scores = moves.into_iter().map(|idx| {
            let mover = if maximizing { me } else { me.opponent() };
            reference(&board.with_move(idx, mover), me, !maximizing, depth + 1)
        });
        if maximizing {
            scores.max().unwrap_or(0)
        } else {
            scores.min().unwrap_or(0)
        }
    }

    fn reference_best(board: &Board, me: Marker) -> Option<usize> {
        let mut best: Option<(usize, i32)> = None;
        for idx in board.available_moves() {
            let score = reference(&board.with_move(idx, me), me, false, 0);
            if best.is_none_or(|(_, s)| score > s) {
                best = Some((idx, score));
            }
        }
        best.map(|(idx, _)| idx)
    }

    /// Plays `x` against `o` from `start` and returns the final board.
    fn play_out(start: Board, x: &mut dyn Strategy, o: &mut dyn Strategy) -> Board {
        let mut b = start;
        let mut marker = b.next_marker();
        while !b.check_win(Marker::X) && !b.check_win(Marker::O) && !b.is_full() {
            let player: &mut dyn Strategy = match marker {
                Marker::X => &mut *x,
                Marker::O => &mut *o,
            };
            let idx = player.generate_move(&b, marker).unwrap();
            b.apply_move(idx, marker).unwrap();
            marker = marker.opponent();
        }
        b
    }

    #[test]
    fn test_takes_immediate_win() {
        let b = board("XX_OO____");
        assert_eq!(best_move(&b, Marker::X), Some(2));
        assert_eq!(best_move(&b, Marker::O), Some(5));
    }

    #[test]
    fn test_blocks_immediate_loss() {
        let b = board("XO__O___X");
        assert_eq!(best_move(&b, Marker::X), Some(7));
    }

    #[test]
    fn test_prefers_fastest_win() {
        // X wins now at 2; other moves also lead to forced wins later
        let b = board("XX_O_O___");
        assert_eq!(best_move(&b, Marker::X), Some(2));
    }

    #[test]
    fn test_empty_board_picks_corner() {
        // Every opening draws with best play; the first is index 0
        assert_eq!(best_move(&Board::new(), Marker::X), Some(0));
    }

    #[test]
    fn test_full_board() {
        assert_eq!(best_move(&board("XOXXOOOXX"), Marker::X), None);
    }

    #[test]
    fn test_terminal_scores() {
        assert_eq!(
            minimax(&board("XXXOO____"), Marker::X, false, 0, i32::MIN, i32::MAX),
            10
        );
        assert_eq!(
            minimax(&board("XXXOO____"), Marker::O, true, 3, i32::MIN, i32::MAX),
            -7
        );
        assert_eq!(
            minimax(&board("XXOOOXXXO"), Marker::X, true, 4, i32::MIN, i32::MAX),
            0
        );
    }

    #[test]
    fn test_pruning_matches_reference() {
        let positions = [
            "_________",
            "X________",
            "____X____",
            "X___O____",
            "XO_______",
            "_XXOO_OX_",
            "X_O_X_O__",
            "XO__O___X",
            "O___X___X",
            "_X_O_X_O_",
        ];
        for cells in positions {
            let b = board(cells);
            for me in [Marker::X, Marker::O] {
                assert_eq!(best_move(&b, me), reference_best(&b, me), "{cells} {me}");
            }
        }
    }

    #[test]
    fn test_minimax_self_play_draws() {
        let end = play_out(Board::new(), &mut MinimaxStrategy, &mut MinimaxStrategy);
        assert!(end.check_draw(), "\n{end}");
    }

    #[test]
    fn test_minimax_never_loses_to_random() {
        for seed in 0..40 {
            let mut random = RandomStrategy::with_seed(seed);
            let end = play_out(Board::new(), &mut MinimaxStrategy, &mut random);
            assert!(!end.check_win(Marker::O), "seed {seed}\n{end}");

            let mut random = RandomStrategy::with_seed(seed);
            let end = play_out(Board::new(), &mut random, &mut MinimaxStrategy);
            assert!(!end.check_win(Marker::X), "seed {seed}\n{end}");
        }
    }

    #[test]
    fn test_minimax_never_loses_to_heuristic() {
        for seed in 0..20 {
            let mut medium = HeuristicStrategy::with_seed(seed);
            let end = play_out(Board::new(), &mut MinimaxStrategy, &mut medium);
            assert!(!end.check_win(Marker::O), "seed {seed}\n{end}");

            let mut medium = HeuristicStrategy::with_seed(seed);
            let end = play_out(Board::new(), &mut medium, &mut MinimaxStrategy);
            assert!(!end.check_win(Marker::X), "seed {seed}\n{end}");
        }
    }
}
