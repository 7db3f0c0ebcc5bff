//! Depth-limited Minimax search with Alpha-Beta pruning.
//!
//! The search is always scored from the engine's own point of view: the
//! engine's plies maximise, the opponent's plies minimise, and the horizon is
//! scored by [`evaluate`]. A side without a legal move passes, which costs a
//! ply like any other move.

use log::debug;

use crate::board::{Board, Move, Player, str_coord};
use crate::engine::Engine;
use crate::evaluate::evaluate;

/// Alpha-Beta Minimax player.
pub struct MinimaxEngine {
    player: Player,
    depth: u32,
    /// Static evaluations performed since construction
    evaluations: u64,
}

impl MinimaxEngine {
    pub fn new(player: Player, depth: u32) -> Self {
        Self {
            player,
            depth,
            evaluations: 0,
        }
    }

    pub fn depth(&self) -> u32 {
        self.depth
    }

    /// Number of static evaluations performed so far.
    pub fn evaluations(&self) -> u64 {
        self.evaluations
    }

    /// Alpha-Beta search below the root.
    ///
    /// `maximizing` is true on the engine's plies.
    pub fn minimax(
        &mut self,
        board: &Board,
        depth: u32,
        mut alpha: i32,
        mut beta: i32,
        maximizing: bool,
    ) -> i32 {
        if depth == 0 || board.is_game_over() {
            self.evaluations += 1;
            return evaluate(board, self.player);
        }

        let actor = if maximizing {
            self.player
        } else {
            self.player.opponent()
        };
        let moves = board.valid_moves(actor);

        if moves.is_empty() {
            let mut passed = board.clone();
            passed.pass_turn(actor);
            return self.minimax(&passed, depth - 1, alpha, beta, !maximizing);
        }

        if maximizing {
            let mut max_eval = i32::MIN;
            for (row, col) in moves {
                let mut child = board.clone();
                child.make_move(row, col, actor);
                let eval = self.minimax(&child, depth - 1, alpha, beta, false);
                max_eval = max_eval.max(eval);
                alpha = alpha.max(eval);
                if beta <= alpha {
                    break;
                }
            }
            max_eval
        } else {
            let mut min_eval = i32::MAX;
            for (row, col) in moves {
                let mut child = board.clone();
                child.make_move(row, col, actor);
                let eval = self.minimax(&child, depth - 1, alpha, beta, true);
                min_eval = min_eval.min(eval);
                beta = beta.min(eval);
                if beta <= alpha {
                    break;
                }
            }
            min_eval
        }
    }
}

impl Engine for MinimaxEngine {
    fn name(&self) -> &str {
        "Minimax"
    }

    fn player(&self) -> Player {
        self.player
    }

    fn get_move(&mut self, board: &Board) -> Option<Move> {
        let moves = board.valid_moves(self.player);
        if moves.len() <= 1 {
            return moves.first().copied();
        }

        let evaluations_before = self.evaluations;
        let mut best: Option<(i32, Move)> = None;
        let mut alpha = i32::MIN;
        let beta = i32::MAX;
        // A depth of 0 still looks one ply ahead.
        let child_depth = self.depth.saturating_sub(1);

        for mv in moves {
            let mut child = board.clone();
            child.make_move(mv.0, mv.1, self.player);
            let value = self.minimax(&child, child_depth, alpha, beta, false);

            // Strictly greater: the first move keeps ties.
            if best.is_none_or(|(best_value, _)| value > best_value) {
                best = Some((value, mv));
            }
            if let Some((best_value, _)) = best {
                alpha = alpha.max(best_value);
            }
        }

        let (value, mv) = best?;
        debug!(
            "minimax {} depth {}: {} value={} evaluations={}",
            self.player,
            self.depth,
            str_coord(mv),
            value,
            self.evaluations - evaluations_before
        );
        Some(mv)
    }
}
