//! Turn-by-turn game runner.
//!
//! A [`Game`] alternates two seats, each either a human reading moves from a
//! line-based input or an [`Engine`]. A side without a legal move passes
//! automatically. Output goes to any writer, so the runner is used both by
//! the binary (stdin/stdout) and by tests (in-memory buffers).

use std::io::{self, BufRead, Write};

use anyhow::{Result, bail, ensure};
use log::info;

use crate::board::{Board, Move, Outcome, Player, parse_coord, str_coord};
use crate::engine::Engine;

/// Who plays one colour.
pub enum Seat {
    /// Moves are read from the input, one algebraic coordinate per line
    Human,
    Engine(Box<dyn Engine>),
}

impl Seat {
    fn check(&self, color: Player) -> Result<()> {
        if let Seat::Engine(engine) = self {
            ensure!(
                engine.player() == color,
                "{} plays {} but was seated as {color}",
                engine.name(),
                engine.player()
            );
        }
        Ok(())
    }
}

/// A game in progress.
pub struct Game {
    board: Board,
    black: Seat,
    white: Seat,
}

impl Game {
    /// Seat `black` and `white` at `board`. Engines must play the colour of
    /// their seat.
    pub fn new(board: Board, black: Seat, white: Seat) -> Result<Self> {
        black.check(Player::Black)?;
        white.check(Player::White)?;
        Ok(Self {
            board,
            black,
            white,
        })
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Play until the game is over.
    ///
    /// Returns `Ok(None)` if a human quits or the input ends first.
    pub fn run<R: BufRead, W: Write>(&mut self, input: R, mut out: W) -> Result<Option<Outcome>> {
        let mut lines = input.lines();

        while !self.board.is_game_over() {
            let player = self.board.current_player();
            let moves = self.board.valid_moves(player);

            if moves.is_empty() {
                writeln!(out, "{player} has no valid moves. Passing...")?;
                self.board.pass_turn(player);
                continue;
            }

            let seat = match player {
                Player::Black => &mut self.black,
                Player::White => &mut self.white,
            };

            let mv = match seat {
                Seat::Human => {
                    let (black, white) = self.board.count_pieces();
                    writeln!(out, "\n{}", self.board)?;
                    writeln!(out, "Black: {black}, White: {white}")?;
                    let size = self.board.size();
                    match read_human_move(player, size, &moves, &mut lines, &mut out)? {
                        Some(mv) => mv,
                        None => {
                            writeln!(out, "Exiting game...")?;
                            return Ok(None);
                        }
                    }
                }
                Seat::Engine(engine) => {
                    let Some(mv) = engine.get_move(&self.board) else {
                        bail!("{} returned no move for {player}", engine.name());
                    };
                    writeln!(out, "{} ({player}) plays {}", engine.name(), str_coord(mv))?;
                    mv
                }
            };

            if !self.board.make_move(mv.0, mv.1, player) {
                bail!("{} is not a legal move for {player}", str_coord(mv));
            }
        }

        let (black, white) = self.board.count_pieces();
        let outcome = self.board.winner();
        writeln!(out, "\n{}", self.board)?;
        writeln!(out, "Game over!")?;
        writeln!(out, "Final score - Black: {black}, White: {white}")?;
        writeln!(out, "Result: {outcome}")?;
        info!("game finished: {outcome} ({black}-{white})");

        Ok(Some(outcome))
    }
}

/// Prompt until the human enters one of `moves`, quits, or the input ends.
fn read_human_move<I, W>(
    player: Player,
    size: usize,
    moves: &[Move],
    lines: &mut I,
    out: &mut W,
) -> Result<Option<Move>>
where
    I: Iterator<Item = io::Result<String>>,
    W: Write,
{
    let listed: Vec<String> = moves.iter().map(|&mv| str_coord(mv)).collect();
    loop {
        write!(
            out,
            "Your turn ({player}). Valid moves: {}. Enter a move or 'quit': ",
            listed.join(" ")
        )?;
        out.flush()?;

        let Some(line) = lines.next() else {
            return Ok(None);
        };
        let line = line?;
        let text = line.trim();
        if text.is_empty() {
            continue;
        }
        if text.eq_ignore_ascii_case("quit") || text.eq_ignore_ascii_case("q") {
            return Ok(None);
        }

        match parse_coord(text, size) {
            Ok(mv) if moves.contains(&mv) => return Ok(Some(mv)),
            Ok(mv) => writeln!(out, "{} is not a valid move.", str_coord(mv))?,
            Err(e) => writeln!(out, "{e}")?,
        }
    }
}

/// Play two engines against each other without any output.
///
/// # Panics
/// If `black` or `white` is not playing its own colour.
pub fn play_out<'a>(
    mut board: Board,
    black: &mut (dyn Engine + 'a),
    white: &mut (dyn Engine + 'a),
) -> Board {
    assert_eq!(black.player(), Player::Black, "black seat needs a Black engine");
    assert_eq!(white.player(), Player::White, "white seat needs a White engine");

    while !board.is_game_over() {
        let player = board.current_player();
        let engine = match player {
            Player::Black => &mut *black,
            Player::White => &mut *white,
        };
        match engine.get_move(&board) {
            Some((row, col)) => {
                board.make_move(row, col, player);
            }
            None => board.pass_turn(player),
        }
    }
    board
}
