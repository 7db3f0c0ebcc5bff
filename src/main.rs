//! Reversi-Rust: play Reversi against Minimax or MCTS.
//!
//! ## Usage
//!
//! - `reversi-rust` - Show a demo
//! - `reversi-rust play` - Play against an engine on the terminal
//! - `reversi-rust selfplay` - Watch two engines play each other
//! - `reversi-rust demo` - Run the demo

use std::io;

use anyhow::Result;
use clap::{Args, Parser, Subcommand, ValueEnum};
use flexi_logger::Logger;

use reversi_rust::board::{Board, Player, str_coord};
use reversi_rust::constants::{DEFAULT_DEPTH, DEFAULT_ITERATIONS, DEFAULT_SIZE, MAX_SIZE, MIN_SIZE};
use reversi_rust::engine::Engine;
use reversi_rust::game::{Game, Seat, play_out};
use reversi_rust::mcts::MctsEngine;
use reversi_rust::minimax::MinimaxEngine;

/// Reversi-Rust: Reversi with Minimax and MCTS engines
#[derive(Parser)]
#[command(name = "reversi-rust")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Play against an engine, entering moves like D3
    Play {
        /// Your colour
        #[arg(long, value_enum, default_value_t = Color::Black)]
        color: Color,
        /// Engine to play against
        #[arg(long, value_enum, default_value_t = EngineKind::Minimax)]
        engine: EngineKind,
        #[command(flatten)]
        search: SearchArgs,
    },
    /// Let two engines play each other
    Selfplay {
        #[arg(long, value_enum, default_value_t = EngineKind::Minimax)]
        black: EngineKind,
        #[arg(long, value_enum, default_value_t = EngineKind::Mcts)]
        white: EngineKind,
        #[command(flatten)]
        search: SearchArgs,
    },
    /// Run a short demo of both engines
    Demo,
}

#[derive(Args)]
struct SearchArgs {
    /// Minimax search depth
    #[arg(long, default_value_t = DEFAULT_DEPTH)]
    depth: u32,
    /// MCTS iterations per move
    #[arg(long, default_value_t = DEFAULT_ITERATIONS)]
    iterations: usize,
    /// Seed for MCTS (random if omitted)
    #[arg(long)]
    seed: Option<u64>,
    /// Board size (even, 4 to 26)
    #[arg(long, default_value_t = DEFAULT_SIZE)]
    size: usize,
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
enum Color {
    Black,
    White,
}

impl From<Color> for Player {
    fn from(color: Color) -> Self {
        match color {
            Color::Black => Player::Black,
            Color::White => Player::White,
        }
    }
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
enum EngineKind {
    Minimax,
    Mcts,
}

impl SearchArgs {
    fn engine(&self, kind: EngineKind, player: Player) -> Result<Box<dyn Engine>> {
        let engine: Box<dyn Engine> = match kind {
            EngineKind::Minimax => Box::new(MinimaxEngine::new(player, self.depth)),
            EngineKind::Mcts => {
                anyhow::ensure!(self.iterations > 0, "MCTS needs at least one iteration");
                let rng = match self.seed {
                    Some(seed) => fastrand::Rng::with_seed(seed),
                    None => fastrand::Rng::new(),
                };
                Box::new(MctsEngine::new(player, self.iterations, rng))
            }
        };
        Ok(engine)
    }

    fn board(&self) -> Result<Board> {
        anyhow::ensure!(
            (MIN_SIZE..=MAX_SIZE).contains(&self.size) && self.size % 2 == 0,
            "board size must be even and between {MIN_SIZE} and {MAX_SIZE}, got {}",
            self.size
        );
        Ok(Board::new(self.size))
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    Logger::try_with_env_or_str("warn")?.start()?;

    match cli.command {
        Some(Commands::Play {
            color,
            engine,
            search,
        }) => {
            let human = Player::from(color);
            let opponent = Seat::Engine(search.engine(engine, human.opponent())?);
            let (black, white) = match human {
                Player::Black => (Seat::Human, opponent),
                Player::White => (opponent, Seat::Human),
            };
            let mut game = Game::new(search.board()?, black, white)?;
            println!("Welcome to Reversi! X is Black, O is White.");
            game.run(io::stdin().lock(), io::stdout())?;
        }
        Some(Commands::Selfplay {
            black,
            white,
            search,
        }) => {
            let mut game = Game::new(
                search.board()?,
                Seat::Engine(search.engine(black, Player::Black)?),
                Seat::Engine(search.engine(white, Player::White)?),
            )?;
            game.run(io::empty(), io::stdout())?;
        }
        Some(Commands::Demo) | None => run_demo(),
    }

    Ok(())
}

fn run_demo() {
    println!("Reversi-Rust: Minimax and MCTS Reversi engines\n");

    // Demo 1: Opening move
    println!("=== Opening ===");
    let mut board = Board::default();
    println!("{board}");
    board.make_move(2, 3, Player::Black);
    println!("Black plays D3:\n{board}");

    // Demo 2: Both engines answer
    println!("=== Engine replies ===");
    let mut minimax = MinimaxEngine::new(Player::White, 3);
    if let Some(mv) = minimax.get_move(&board) {
        println!(
            "Minimax (depth {}): {} after {} evaluations",
            minimax.depth(),
            str_coord(mv),
            minimax.evaluations()
        );
    }
    let mut mcts = MctsEngine::with_seed(Player::White, 200, 1);
    let tree = mcts.search(&board);
    if let Some(mv) = tree.best_move() {
        println!(
            "MCTS ({} iterations, {} nodes): {} root winrate {:.1}%",
            mcts.iterations(),
            tree.node_count(),
            str_coord(mv),
            tree.root().winrate() * 100.0
        );
    }

    // Demo 3: A quick game on a small board
    println!("\n=== 6x6 game: Minimax vs MCTS ===");
    let mut black = MinimaxEngine::new(Player::Black, 2);
    let mut white = MctsEngine::with_seed(Player::White, 100, 2);
    let end = play_out(Board::new(6), &mut black, &mut white);
    let (b, w) = end.count_pieces();
    println!("{end}Black {b} - White {w}: {}", end.winner());
}
