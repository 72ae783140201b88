//! Players: a human at the console or a computer strategy.

use std::fmt;
use std::io::{BufRead, Write};
use std::str::FromStr;

use anyhow::{Context, Result};
use clap::ValueEnum;

use crate::board::{Board, Marker};
use crate::console::Console;
use crate::minimax::MinimaxStrategy;
use crate::strategy::{HeuristicStrategy, RandomStrategy, Strategy};

/// Player kind requested at startup.
#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum Difficulty {
    /// Random moves
    Easy,
    /// Wins or blocks when it can, otherwise random
    Medium,
    /// Full minimax search, never loses
    Hard,
    /// Human entering coordinates
    User,
}

impl Difficulty {
    pub fn label(self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
            Difficulty::User => "user",
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Unrecognized difficulty label.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseDifficultyError(pub String);

impl fmt::Display for ParseDifficultyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let labels: Vec<&str> = Difficulty::value_variants()
            .iter()
            .map(|d| d.label())
            .collect();
        write!(
            f,
            "unknown difficulty '{}', expected one of: {}",
            self.0,
            labels.join(", ")
        )
    }
}

impl std::error::Error for ParseDifficultyError {}

impl FromStr for Difficulty {
    type Err = ParseDifficultyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Difficulty::value_variants()
            .iter()
            .copied()
            .find(|d| d.label().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| ParseDifficultyError(s.to_string()))
    }
}

/// A participant that chooses moves.
pub enum Player {
    /// Reads validated coordinates from the console
    Human,
    /// Delegates to a strategy
    Ai(Box<dyn Strategy>),
}

impl fmt::Debug for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Player::Human => write!(f, "Human"),
            Player::Ai(strategy) => write!(f, "Ai({})", strategy.level()),
        }
    }
}

impl Player {
    /// Build a player for `difficulty`. `seed` drives any randomness.
    pub fn from_difficulty(difficulty: Difficulty, seed: Option<u64>) -> Self {
        match difficulty {
            Difficulty::Easy => Player::Ai(Box::new(
                seed.map_or_else(RandomStrategy::new, RandomStrategy::with_seed),
            )),
            Difficulty::Medium => Player::Ai(Box::new(
                seed.map_or_else(HeuristicStrategy::new, HeuristicStrategy::with_seed),
            )),
            Difficulty::Hard => Player::Ai(Box::new(MinimaxStrategy::new())),
            Difficulty::User => Player::Human,
        }
    }

    pub fn difficulty(&self) -> Difficulty {
        match self {
            Player::Human => Difficulty::User,
            Player::Ai(strategy) => strategy.level(),
        }
    }

    /// Choose an empty cell for `marker` on `board`.
    pub fn pick_move<R: BufRead, W: Write>(
        &mut self,
        board: &Board,
        marker: Marker,
        console: &mut Console<R, W>,
    ) -> Result<usize> {
        match self {
            Player::Human => console.read_move(board),
            Player::Ai(strategy) => {
                console.say(&format!("Making move level \"{}\"", strategy.level()))?;
                strategy
                    .generate_move(board, marker)
                    .with_context(|| format!("no move available for {marker}"))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_parse_difficulty() {
        assert_eq!("easy".parse(), Ok(Difficulty::Easy));
        assert_eq!("MEDIUM".parse(), Ok(Difficulty::Medium));
        assert_eq!(" hard ".parse(), Ok(Difficulty::Hard));
        assert_eq!("user".parse(), Ok(Difficulty::User));
        assert_eq!(
            "expert".parse::<Difficulty>(),
            Err(ParseDifficultyError("expert".to_string()))
        );
    }

    #[test]
    fn test_labels_roundtrip() {
        for &d in Difficulty::value_variants() {
            assert_eq!(d.label().parse(), Ok(d));
            assert_eq!(d.label().to_uppercase().parse(), Ok(d));
        }
    }

    #[test]
    fn test_parse_error_lists_every_label() {
        let message = "expert".parse::<Difficulty>().unwrap_err().to_string();
        assert_eq!(
            message,
            "unknown difficulty 'expert', expected one of: easy, medium, hard, user"
        );
    }

    #[test]
    fn test_factory() {
        for &d in Difficulty::value_variants() {
            let player = Player::from_difficulty(d, Some(5));
            assert_eq!(player.difficulty(), d);
            assert_eq!(matches!(player, Player::Human), d == Difficulty::User);
        }
    }

    #[test]
    fn test_ai_announces_level() {
        let mut console = Console::new(Cursor::new(""), Vec::new());
        let mut player = Player::from_difficulty(Difficulty::Hard, None);
        let board: Board = "XX_OO____".parse().unwrap();

        let idx = player.pick_move(&board, Marker::X, &mut console).unwrap();
        assert_eq!(idx, 2);
        assert_eq!(console.output_text(), "Making move level \"hard\"\n");
    }

    #[test]
    fn test_human_reads_console() {
        let mut console = Console::new(Cursor::new("2 2\n"), Vec::new());
        let mut player = Player::Human;
        let idx = player.pick_move(&Board::new(), Marker::O, &mut console).unwrap();
        assert_eq!(idx, 4);
    }
}
