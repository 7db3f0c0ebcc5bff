//! Monte Carlo playouts (random game simulation).
//!
//! A playout plays uniformly random legal moves until neither side can move,
//! passing whenever the side to move is stuck, and reports the final outcome.

use fastrand::Rng;

use crate::board::{Board, Move, Outcome, Player};

/// Play random moves on `board` until the game is over.
pub fn random_playout(board: &mut Board, rng: &mut Rng) -> Outcome {
    while !board.is_game_over() {
        let player = board.current_player();
        match choose_random_move(board, player, rng) {
            Some((row, col)) => {
                board.make_move(row, col, player);
            }
            None => board.pass_turn(player),
        }
    }
    board.winner()
}

/// Pick a uniformly random legal move for `player`, if there is one.
pub fn choose_random_move(board: &Board, player: Player, rng: &mut Rng) -> Option<Move> {
    let moves = board.valid_moves(player);
    if moves.is_empty() {
        return None;
    }
    Some(moves[rng.usize(..moves.len())])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_playout_reaches_the_end() {
        let mut rng = Rng::with_seed(1);
        let mut board = Board::new(6);
        let outcome = random_playout(&mut board, &mut rng);
        assert!(board.is_game_over());
        assert_eq!(outcome, board.winner());
    }

    #[test]
    fn test_playout_is_reproducible() {
        let mut a = Board::new(8);
        let mut b = Board::new(8);
        random_playout(&mut a, &mut Rng::with_seed(42));
        random_playout(&mut b, &mut Rng::with_seed(42));
        assert_eq!(a, b);
    }

    #[test]
    fn test_playout_on_finished_board_is_a_no_op() {
        let mut board = Board::parse(&["XX..", "XX..", "....", "..OO"], Player::White).unwrap();
        let before = board.clone();
        let outcome = random_playout(&mut board, &mut Rng::with_seed(3));
        assert_eq!(outcome, Outcome::Win(Player::Black));
        assert_eq!(board, before);
    }

    #[test]
    fn test_playout_passes_for_stuck_side() {
        // White to move but only Black can play; Black then wins outright.
        let mut board = Board::parse(&["XO..", "....", "....", "...."], Player::White).unwrap();
        let outcome = random_playout(&mut board, &mut Rng::with_seed(9));
        assert_eq!(outcome, Outcome::Win(Player::Black));
        assert_eq!(board.count_pieces(), (3, 0));
    }

    #[test]
    fn test_choose_random_move_is_legal() {
        let board = Board::new(8);
        let mut rng = Rng::with_seed(5);
        for _ in 0..20 {
            let mv = choose_random_move(&board, Player::Black, &mut rng).unwrap();
            assert!(board.valid_moves(Player::Black).contains(&mv));
        }
        let stuck = Board::parse(&["X...", "....", "....", "...O"], Player::Black).unwrap();
        assert_eq!(choose_random_move(&stuck, Player::Black, &mut rng), None);
    }
}
