//! The move-selection interface shared by the search engines.

use crate::board::{Board, Move, Player};

/// A strategy that picks a move for a fixed player.
pub trait Engine {
    /// Short name used in game output.
    fn name(&self) -> &str;

    /// The side this engine plays.
    fn player(&self) -> Player;

    /// Choose a move for [`Engine::player`] on `board`.
    ///
    /// Returns `None` when that player has no legal move; the caller is then
    /// responsible for passing the turn.
    fn get_move(&mut self, board: &Board) -> Option<Move>;
}
