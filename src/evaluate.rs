//! Static evaluation used by the Minimax engine at its horizon.
//!
//! A position is scored as `10 * positional + 5 * mobility` from one side's
//! point of view, where positional is the weight-table difference and
//! mobility the legal move count difference. Finished games score
//! `±WIN_SCORE`, which no heuristic value can reach.

use crate::board::{Board, Outcome, Player};
use crate::constants::{MOBILITY_WEIGHT, POSITIONAL_WEIGHT, WEIGHTS, WEIGHTS_SIZE, WIN_SCORE};

/// Score `board` for `perspective`. Higher is better for `perspective`.
pub fn evaluate(board: &Board, perspective: Player) -> i32 {
    if board.is_game_over() {
        return match board.winner() {
            Outcome::Win(player) if player == perspective => WIN_SCORE,
            Outcome::Win(_) => -WIN_SCORE,
            Outcome::Draw => 0,
        };
    }

    let positional = positional_score(board, perspective);
    let mobility = board.valid_moves(perspective).len() as i32
        - board.valid_moves(perspective.opponent()).len() as i32;

    POSITIONAL_WEIGHT * positional + MOBILITY_WEIGHT * mobility
}

/// Sum of weights under `perspective`'s pieces minus the opponent's.
pub fn positional_score(board: &Board, perspective: Player) -> i32 {
    let size = board.size();
    let mut score = 0;
    for row in 0..size {
        for col in 0..size {
            match board.get(row, col).owner() {
                Some(owner) if owner == perspective => score += weight(size, row, col),
                Some(_) => score -= weight(size, row, col),
                None => {}
            }
        }
    }
    score
}

/// Positional weight of a cell on a `size` board.
///
/// On 8x8 this is the table entry. Other sizes look up the table cell at the
/// same distance from the nearest edges, capped at the table's centre.
pub fn weight(size: usize, row: usize, col: usize) -> i32 {
    WEIGHTS[fold(size, row)][fold(size, col)]
}

fn fold(size: usize, i: usize) -> usize {
    let half = WEIGHTS_SIZE / 2;
    if i < size / 2 {
        i.min(half - 1)
    } else {
        WEIGHTS_SIZE - 1 - (size - 1 - i).min(half - 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_weight_table_on_8x8() {
        for row in 0..8 {
            for col in 0..8 {
                assert_eq!(weight(8, row, col), WEIGHTS[row][col]);
            }
        }
    }

    #[test]
    fn test_weight_folding_on_small_boards() {
        // Every corner stays a corner and every X-square stays an X-square
        for (r, c) in [(0, 0), (0, 3), (3, 0), (3, 3)] {
            assert_eq!(weight(4, r, c), 120);
        }
        assert_eq!(weight(4, 1, 1), -40);
        assert_eq!(weight(4, 2, 2), -40);
        assert_eq!(weight(4, 0, 1), -20);
        assert_eq!(weight(10, 4, 5), 3);
        assert_eq!(weight(10, 0, 9), 120);
    }

    #[test]
    fn test_initial_position_is_balanced() {
        let board = Board::new(8);
        assert_eq!(evaluate(&board, Player::Black), 0);
        assert_eq!(evaluate(&board, Player::White), 0);
    }

    #[test]
    fn test_after_opening_move() {
        let mut board = Board::new(8);
        assert!(board.make_move(2, 3, Player::Black));
        // positional 4 * 3 - 3 = 9, mobility 3 - 3 = 0
        assert_eq!(positional_score(&board, Player::Black), 9);
        assert_eq!(evaluate(&board, Player::Black), 90);
        assert_eq!(evaluate(&board, Player::White), -90);
    }

    #[test]
    fn test_terminal_scores() {
        let won = Board::parse(&["XX..", "XX..", "....", "..OO"], Player::Black).unwrap();
        assert_eq!(evaluate(&won, Player::Black), WIN_SCORE);
        assert_eq!(evaluate(&won, Player::White), -WIN_SCORE);

        let drawn = Board::parse(&["X...", "....", "....", "...O"], Player::Black).unwrap();
        assert_eq!(evaluate(&drawn, Player::Black), 0);
    }
}
