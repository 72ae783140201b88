//! Turn coordinator.
//!
//! A game moves through `AwaitingMove(marker)` states until it reaches
//! `Won(marker)` or `Draw`. Each turn asks the active player for a move,
//! applies it, prints the board and evaluates the result. Every turn fills a
//! cell, so a game ends after at most nine turns.

use std::io::{BufRead, Write};

use anyhow::{Result, bail};
use tracing::{info, trace};

use crate::board::{Board, Marker, Outcome};
use crate::console::{Command, Console};
use crate::player::{Difficulty, Player};

/// Who plays each side and how randomness is seeded.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct GameConfig {
    pub x: Difficulty,
    pub o: Difficulty,
    /// Seed for X's strategy; O uses `seed + 1`
    pub seed: Option<u64>,
}

impl GameConfig {
    pub fn new(x: Difficulty, o: Difficulty) -> Self {
        Self { x, o, seed: None }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn has_human(&self) -> bool {
        self.x == Difficulty::User || self.o == Difficulty::User
    }
}

/// Coordinator state.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum GameState {
    AwaitingMove(Marker),
    Won(Marker),
    Draw,
}

impl GameState {
    pub fn is_terminal(self) -> bool {
        !matches!(self, GameState::AwaitingMove(_))
    }

    fn from_board(board: &Board) -> Self {
        match board.outcome() {
            Outcome::InProgress => GameState::AwaitingMove(board.next_marker()),
            Outcome::Won(marker) => GameState::Won(marker),
            Outcome::Draw => GameState::Draw,
        }
    }
}

/// A single game between two players.
pub struct Game {
    board: Board,
    x: Player,
    o: Player,
    state: GameState,
}

impl Game {
    /// New game on an empty board; X moves first.
    pub fn new(config: GameConfig) -> Self {
        Self::with_board(config, Board::new())
    }

    /// Game continuing from `board`. The side to move is inferred from the
    /// marker counts; a finished board starts in its terminal state.
    pub fn with_board(config: GameConfig, board: Board) -> Self {
        let o_seed = config.seed.map(|s| s.wrapping_add(1));
        Self::with_players(
            Player::from_difficulty(config.x, config.seed),
            Player::from_difficulty(config.o, o_seed),
            board,
        )
    }

    pub fn with_players(x: Player, o: Player, board: Board) -> Self {
        let state = GameState::from_board(&board);
        Self { board, x, o, state }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn state(&self) -> GameState {
        self.state
    }

    /// Plays one turn and returns the new state. No-op once terminal.
    pub fn step<R: BufRead, W: Write>(
        &mut self,
        console: &mut Console<R, W>,
    ) -> Result<GameState> {
        let GameState::AwaitingMove(marker) = self.state else {
            return Ok(self.state);
        };

        let player = match marker {
            Marker::X => &mut self.x,
            Marker::O => &mut self.o,
        };
        let idx = player.pick_move(&self.board, marker, console)?;
        self.board.apply_move(idx, marker)?;
        trace!(idx, %marker, "move applied");
        console.show_board(&self.board)?;

        self.state = if self.board.check_win(marker) {
            GameState::Won(marker)
        } else if self.board.check_draw() {
            GameState::Draw
        } else {
            GameState::AwaitingMove(marker.opponent())
        };
        Ok(self.state)
    }

    /// Plays to the end, printing the board after each move and the result
    /// once at the end.
    pub fn run<R: BufRead, W: Write>(&mut self, console: &mut Console<R, W>) -> Result<Outcome> {
        info!(x = %self.x.difficulty(), o = %self.o.difficulty(), "game started");
        console.show_board(&self.board)?;

        while !self.state.is_terminal() {
            self.step(console)?;
        }

        let outcome = match self.state {
            GameState::Won(marker) => Outcome::Won(marker),
            GameState::Draw => Outcome::Draw,
            GameState::AwaitingMove(_) => bail!("game loop ended before a result"),
        };
        info!(%outcome, moves = self.board.moves_made(), "game finished");
        console.say(&outcome.to_string())?;
        Ok(outcome)
    }
}

/// Reads the startup command and plays one game.
///
/// Returns `None` when the user exits before a game starts.
pub fn play_session<R: BufRead, W: Write>(
    console: &mut Console<R, W>,
    seed: Option<u64>,
) -> Result<Option<Outcome>> {
    let (x, o) = match console.read_command()? {
        Command::Start(x, o) => (x, o),
        Command::Exit => {
            info!("exit before game start");
            return Ok(None);
        }
    };

    let mut config = GameConfig::new(x, o);
    if let Some(seed) = seed {
        config = config.with_seed(seed);
    }
    Game::new(config).run(console).map(Some)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::strategy::Strategy;
    use std::io::Cursor;

    /// Plays a fixed list of cells, in order.
    struct Scripted(Vec<usize>);

    impl Strategy for Scripted {
        fn generate_move(&mut self, _board: &Board, _marker: Marker) -> Option<usize> {
            (!self.0.is_empty()).then(|| self.0.remove(0))
        }

        fn level(&self) -> Difficulty {
            Difficulty::Easy
        }
    }

    fn scripted_game(x: &[usize], o: &[usize]) -> Game {
        Game::with_players(
            Player::Ai(Box::new(Scripted(x.to_vec()))),
            Player::Ai(Box::new(Scripted(o.to_vec()))),
            Board::new(),
        )
    }

    fn silent() -> Console<Cursor<&'static str>, Vec<u8>> {
        Console::new(Cursor::new(""), Vec::new())
    }

    #[test]
    fn test_initial_state() {
        let game = Game::new(GameConfig::new(Difficulty::Easy, Difficulty::Hard));
        assert_eq!(game.state(), GameState::AwaitingMove(Marker::X));
        assert_eq!(*game.board(), Board::new());
    }

    #[test]
    fn test_step_alternates_players() {
        let mut game = scripted_game(&[0, 4], &[1]);
        let mut console = silent();
        assert_eq!(
            game.step(&mut console).unwrap(),
            GameState::AwaitingMove(Marker::O)
        );
        assert_eq!(
            game.step(&mut console).unwrap(),
            GameState::AwaitingMove(Marker::X)
        );
        assert_eq!(game.board().get(0), Some(Marker::X));
        assert_eq!(game.board().get(1), Some(Marker::O));
    }

    #[test]
    fn test_diagonal_win() {
        let mut game = scripted_game(&[0, 4, 8], &[1, 7]);
        let outcome = game.run(&mut silent()).unwrap();
        assert_eq!(outcome, Outcome::Won(Marker::X));
        assert_eq!(game.state(), GameState::Won(Marker::X));
        assert_eq!(game.board().moves_made(), 5);
    }

    #[test]
    fn test_draw() {
        // X O X / X O O / O X X
        let mut game = scripted_game(&[0, 2, 3, 7, 8], &[1, 4, 5, 6]);
        let outcome = game.run(&mut silent()).unwrap();
        assert_eq!(outcome, Outcome::Draw);
        assert!(game.board().is_full());
    }

    #[test]
    fn test_win_on_last_cell_is_not_draw() {
        // X fills the last cell completing column 2-5-8
        let mut game = scripted_game(&[2, 5, 3, 7, 8], &[0, 1, 4, 6]);
        assert_eq!(game.run(&mut silent()).unwrap(), Outcome::Won(Marker::X));
    }

    #[test]
    fn test_step_after_end_is_noop() {
        let mut game = scripted_game(&[0, 1, 2], &[3, 4]);
        let mut console = silent();
        game.run(&mut console).unwrap();
        let board = *game.board();
        assert_eq!(game.step(&mut console).unwrap(), GameState::Won(Marker::X));
        assert_eq!(*game.board(), board);
    }

    #[test]
    fn test_illegal_ai_move_is_error() {
        let mut game = scripted_game(&[4], &[4]);
        let mut console = silent();
        game.step(&mut console).unwrap();
        assert!(game.step(&mut console).is_err());
        assert_eq!(game.state(), GameState::AwaitingMove(Marker::O));
    }

    #[test]
    fn test_resume_from_board() {
        let board: Board = "XX_OO____".parse().unwrap();
        let mut game = Game::with_board(GameConfig::new(Difficulty::Hard, Difficulty::Hard), board);
        assert_eq!(game.state(), GameState::AwaitingMove(Marker::X));
        assert_eq!(game.run(&mut silent()).unwrap(), Outcome::Won(Marker::X));
        assert_eq!(game.board().get(2), Some(Marker::X));
    }

    #[test]
    fn test_finished_board_is_terminal() {
        let board: Board = "XXXOO____".parse().unwrap();
        let game = Game::with_board(GameConfig::new(Difficulty::Easy, Difficulty::Easy), board);
        assert_eq!(game.state(), GameState::Won(Marker::X));
    }

    #[test]
    fn test_output_transcript() {
        let mut game = scripted_game(&[0, 4, 8], &[1, 7]);
        let mut console = silent();
        game.run(&mut console).unwrap();
        let text = console.output_text();
        assert_eq!(text.matches("Making move level \"easy\"").count(), 5);
        assert_eq!(text.matches("---------\n| ").count(), 6);
        assert!(text.ends_with(
            "| X O   |\n|   X   |\n|   O X |\n---------\nX wins\n"
        ));
    }
}
