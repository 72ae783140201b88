//! Tictactoe-Rust: console tic-tac-toe with computer opponents.
//!
//! Each side is played by a human at the console or by one of three
//! strategies: random ("easy"), win-or-block ("medium") and minimax ("hard").
//!
//! ## Modules
//!
//! - [`constants`] - Board geometry, win lines, console text
//! - [`board`] - Board state, move application, win and draw detection
//! - [`strategy`] - Strategy trait with random and heuristic players
//! - [`minimax`] - Exhaustive minimax search
//! - [`player`] - Difficulty labels and the human/computer player
//! - [`console`] - Command and coordinate parsing over any reader/writer
//! - [`game`] - Turn coordinator
//!
//! ## Example
//!
//! ```
//! use std::io;
//! use tictactoe_rust::board::{Marker, Outcome};
//! use tictactoe_rust::console::Console;
//! use tictactoe_rust::game::{Game, GameConfig};
//! use tictactoe_rust::player::Difficulty;
//!
//! // Two minimax players always draw
//! let mut console = Console::new(io::empty(), io::sink());
//! let mut game = Game::new(GameConfig::new(Difficulty::Hard, Difficulty::Hard));
//! assert_eq!(game.run(&mut console).unwrap(), Outcome::Draw);
//! ```

pub mod board;
pub mod console;
pub mod constants;
pub mod game;
pub mod minimax;
pub mod player;
pub mod strategy;
