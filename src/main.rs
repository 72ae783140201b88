//! Tictactoe-Rust: console tic-tac-toe.
//!
//! ## Usage
//!
//! - `tictactoe-rust` - Interactive game, players chosen at the prompt
//! - `tictactoe-rust play --x hard --o user` - Interactive game, prompt skipped
//! - `tictactoe-rust analyze _XXOO_OX_` - Evaluate a position
//! - `tictactoe-rust selfplay --x hard --o easy --games 100` - Computer-only games

use std::io;

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use tictactoe_rust::board::{Board, Marker, Outcome, coords_of};
use tictactoe_rust::console::Console;
use tictactoe_rust::game::{Game, GameConfig, play_session};
use tictactoe_rust::minimax::best_move;
use tictactoe_rust::player::Difficulty;

/// Tictactoe-Rust: tic-tac-toe against random, heuristic and minimax players
#[derive(Parser)]
#[command(name = "tictactoe-rust")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Log decisions to stderr (overridden by RUST_LOG)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Play a game at the console
    Play {
        /// Player for X; skips the startup prompt
        #[arg(long, value_enum, requires = "o")]
        x: Option<Difficulty>,
        /// Player for O; skips the startup prompt
        #[arg(long, value_enum, requires = "x")]
        o: Option<Difficulty>,
        /// Seed for the computer players
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Print the status of a position and the best move for the side to play
    Analyze {
        /// Nine cells, row-major, using X, O and _ (e.g. _XXOO_OX_)
        cells: String,
    },
    /// Run games between two computer players and print the tally
    Selfplay {
        #[arg(long, value_enum)]
        x: Difficulty,
        #[arg(long, value_enum)]
        o: Difficulty,
        /// Number of games
        #[arg(long, default_value_t = 100)]
        games: u32,
        /// Base seed; game i uses seed + 2i
        #[arg(long)]
        seed: Option<u64>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Some(Commands::Play { x, o, seed }) => run_play(x.zip(o), seed),
        Some(Commands::Analyze { cells }) => run_analyze(&cells),
        Some(Commands::Selfplay { x, o, games, seed }) => run_selfplay(x, o, games, seed),
        None => run_play(None, None),
    }
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn run_play(players: Option<(Difficulty, Difficulty)>, seed: Option<u64>) -> Result<()> {
    let mut console = Console::stdio();

    let Some((x, o)) = players else {
        play_session(&mut console, seed)?;
        return Ok(());
    };

    let mut config = GameConfig::new(x, o);
    if let Some(seed) = seed {
        config = config.with_seed(seed);
    }
    Game::new(config).run(&mut console)?;
    Ok(())
}

fn run_analyze(cells: &str) -> Result<()> {
    let board: Board = cells
        .parse()
        .with_context(|| format!("cannot read board '{cells}'"))?;

    println!("{board}");
    let outcome = board.outcome();
    println!("{outcome}");

    if outcome == Outcome::InProgress {
        let marker = board.next_marker();
        println!("{marker} to move");
        if let Some(idx) = best_move(&board, marker) {
            let (row, col) = coords_of(idx);
            println!("Best move: {row} {col}");
        }
    }
    Ok(())
}

fn run_selfplay(x: Difficulty, o: Difficulty, games: u32, seed: Option<u64>) -> Result<()> {
    let config = GameConfig::new(x, o);
    if config.has_human() {
        bail!("selfplay needs two computer players, got x={x} o={o}");
    }

    let mut console = Console::new(io::empty(), io::sink());
    let (mut x_wins, mut o_wins, mut draws) = (0u32, 0u32, 0u32);

    for i in 0..games {
        let config = match seed {
            Some(base) => config.with_seed(base.wrapping_add(2 * u64::from(i))),
            None => config,
        };
        match Game::new(config).run(&mut console)? {
            Outcome::Won(Marker::X) => x_wins += 1,
            Outcome::Won(Marker::O) => o_wins += 1,
            Outcome::Draw => draws += 1,
            Outcome::InProgress => bail!("game {i} ended unfinished"),
        }
    }

    println!("{x} (X) vs {o} (O), {games} games");
    println!("X wins: {x_wins}");
    println!("O wins: {o_wins}");
    println!("Draws: {draws}");
    Ok(())
}
