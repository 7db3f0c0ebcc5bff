//! Reversi board representation and move rules.
//!
//! The board is a plain value type: a flat grid of cells plus the side to
//! move. Search code copies it freely with `clone()`, so nothing here is
//! shared between copies.
//!
//! Coordinates are `(row, col)`, 0-indexed, row 0 at the top and column 0 on
//! the left. [`str_coord`] and [`parse_coord`] convert to and from the usual
//! algebraic form (`"D3"` is row 2, column 3).

use std::fmt;

use crate::constants::{
    CHAR_BLACK, CHAR_EMPTY, CHAR_WHITE, DEFAULT_SIZE, DIRECTIONS, MAX_SIZE, MIN_SIZE,
};

/// One of the two sides. Black moves first.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Player {
    Black,
    White,
}

impl Player {
    /// The other side.
    #[inline]
    pub fn opponent(self) -> Player {
        match self {
            Player::Black => Player::White,
            Player::White => Player::Black,
        }
    }

    #[inline]
    fn cell(self) -> Cell {
        match self {
            Player::Black => Cell::Black,
            Player::White => Cell::White,
        }
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Player::Black => write!(f, "Black"),
            Player::White => write!(f, "White"),
        }
    }
}

/// Content of a single cell.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Cell {
    Empty,
    Black,
    White,
}

impl Cell {
    /// The player owning this cell, if any.
    pub fn owner(self) -> Option<Player> {
        match self {
            Cell::Empty => None,
            Cell::Black => Some(Player::Black),
            Cell::White => Some(Player::White),
        }
    }
}

/// A move as a `(row, col)` pair.
pub type Move = (usize, usize);

/// Result of a finished game.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Outcome {
    Win(Player),
    Draw,
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Win(player) => write!(f, "{player} wins"),
            Outcome::Draw => write!(f, "draw"),
        }
    }
}

/// Errors reported by the `Result`-returning board API and the text parsers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BoardError {
    /// Coordinate outside the board
    OutOfBounds { row: usize, col: usize, size: usize },
    /// Cell is occupied or the move flips nothing
    IllegalMove { row: usize, col: usize },
    /// Text is not an algebraic coordinate on this board
    BadCoord(String),
    /// Board text has an unsupported number of rows
    BadSize(usize),
    /// Board text row has the wrong length
    BadRow { row: usize, len: usize, size: usize },
    /// Board text contains an unknown character
    BadCell(char),
}

impl fmt::Display for BoardError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BoardError::OutOfBounds { row, col, size } => {
                write!(f, "({row}, {col}) is off the {size}x{size} board")
            }
            BoardError::IllegalMove { row, col } => {
                write!(f, "illegal move at {}", str_coord((*row, *col)))
            }
            BoardError::BadCoord(text) => write!(f, "cannot parse coordinate '{text}'"),
            BoardError::BadSize(size) => {
                write!(f, "board size must be between 1 and {MAX_SIZE}, got {size}")
            }
            BoardError::BadRow { row, len, size } => {
                write!(f, "row {row} has {len} cells, expected {size}")
            }
            BoardError::BadCell(ch) => write!(f, "unknown cell character '{ch}'"),
        }
    }
}

impl std::error::Error for BoardError {}

/// A Reversi position: the grid and the side to move.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Board {
    size: usize,
    cells: Vec<Cell>,
    current_player: Player,
}

impl Default for Board {
    fn default() -> Self {
        Self::new(DEFAULT_SIZE)
    }
}

impl Board {
    /// Create a board with the standard starting position: the four centre
    /// cells filled diagonally, Black to move.
    ///
    /// # Panics
    /// If `size` is odd or outside `MIN_SIZE..=MAX_SIZE`.
    pub fn new(size: usize) -> Self {
        assert!(
            (MIN_SIZE..=MAX_SIZE).contains(&size) && size % 2 == 0,
            "board size must be even and between {MIN_SIZE} and {MAX_SIZE}, got {size}"
        );
        let mut board = Self {
            size,
            cells: vec![Cell::Empty; size * size],
            current_player: Player::Black,
        };
        let mid = size / 2;
        board.put(mid - 1, mid - 1, Cell::White);
        board.put(mid, mid, Cell::White);
        board.put(mid - 1, mid, Cell::Black);
        board.put(mid, mid - 1, Cell::Black);
        board
    }

    /// Build a position from text rows: `X` Black, `O` White, `.` empty.
    /// Whitespace inside a row is ignored.
    pub fn parse(rows: &[&str], to_move: Player) -> Result<Self, BoardError> {
        let size = rows.len();
        if size == 0 || size > MAX_SIZE {
            return Err(BoardError::BadSize(size));
        }

        let mut cells = Vec::with_capacity(size * size);
        for (row, line) in rows.iter().enumerate() {
            let len = line.chars().filter(|c| !c.is_whitespace()).count();
            if len != size {
                return Err(BoardError::BadRow { row, len, size });
            }
            for ch in line.chars().filter(|c| !c.is_whitespace()) {
                cells.push(match ch {
                    CHAR_BLACK => Cell::Black,
                    CHAR_WHITE => Cell::White,
                    CHAR_EMPTY => Cell::Empty,
                    other => return Err(BoardError::BadCell(other)),
                });
            }
        }

        Ok(Self {
            size,
            cells,
            current_player: to_move,
        })
    }

    /// Board dimension.
    #[inline]
    pub fn size(&self) -> usize {
        self.size
    }

    /// The side to move.
    #[inline]
    pub fn current_player(&self) -> Player {
        self.current_player
    }

    pub fn set_current_player(&mut self, player: Player) {
        self.current_player = player;
    }

    /// Whether a (possibly negative) coordinate lies on the board.
    #[inline]
    pub fn is_on_board(&self, row: isize, col: isize) -> bool {
        row >= 0 && col >= 0 && (row as usize) < self.size && (col as usize) < self.size
    }

    /// Content of a cell.
    ///
    /// # Panics
    /// If the coordinate is off the board.
    pub fn get(&self, row: usize, col: usize) -> Cell {
        self.cells[self.idx(row, col)]
    }

    /// Number of (black, white) pieces.
    pub fn count_pieces(&self) -> (usize, usize) {
        self.cells.iter().fold((0, 0), |(black, white), cell| match cell {
            Cell::Black => (black + 1, white),
            Cell::White => (black, white + 1),
            Cell::Empty => (black, white),
        })
    }

    /// All legal moves for `player`, in row-major order.
    pub fn valid_moves(&self, player: Player) -> Vec<Move> {
        let mut moves = Vec::new();
        for row in 0..self.size {
            for col in 0..self.size {
                if self.is_valid_move(row, col, player) {
                    moves.push((row, col));
                }
            }
        }
        moves
    }

    /// Whether `player` may place a piece at `(row, col)`: the cell must be
    /// empty and at least one direction must bracket a run of opponent pieces.
    ///
    /// # Panics
    /// If the coordinate is off the board.
    pub fn is_valid_move(&self, row: usize, col: usize, player: Player) -> bool {
        if self.get(row, col) != Cell::Empty {
            return false;
        }
        DIRECTIONS
            .iter()
            .any(|&dir| self.bracketed_run(row, col, dir, player) > 0)
    }

    /// Play `player`'s piece at `(row, col)`, flipping every bracketed run.
    ///
    /// Returns false and leaves the board untouched if the move is illegal.
    /// On success the turn goes to `player`'s opponent.
    ///
    /// # Panics
    /// If the coordinate is off the board.
    pub fn make_move(&mut self, row: usize, col: usize, player: Player) -> bool {
        self.check_bounds(row, col);
        self.try_make_move(row, col, player).is_ok()
    }

    /// Like [`Board::make_move`], but reports failures as errors and returns
    /// the number of flipped pieces.
    pub fn try_make_move(
        &mut self,
        row: usize,
        col: usize,
        player: Player,
    ) -> Result<usize, BoardError> {
        if row >= self.size || col >= self.size {
            return Err(BoardError::OutOfBounds {
                row,
                col,
                size: self.size,
            });
        }
        if self.get(row, col) != Cell::Empty {
            return Err(BoardError::IllegalMove { row, col });
        }

        // The whole flip set is collected before anything changes.
        let flips = self.flips(row, col, player);
        if flips.is_empty() {
            return Err(BoardError::IllegalMove { row, col });
        }

        let piece = player.cell();
        self.put(row, col, piece);
        for &(r, c) in &flips {
            self.put(r, c, piece);
        }
        self.current_player = player.opponent();
        Ok(flips.len())
    }

    /// Hand the turn to `player`'s opponent without placing a piece.
    ///
    /// This is the forced pass used whenever a side has no legal move.
    pub fn pass_turn(&mut self, player: Player) {
        self.current_player = player.opponent();
    }

    /// Whether `player` has at least one legal move.
    pub fn has_valid_moves(&self, player: Player) -> bool {
        (0..self.size).any(|row| (0..self.size).any(|col| self.is_valid_move(row, col, player)))
    }

    /// The game is over when neither side can move, full board or not.
    pub fn is_game_over(&self) -> bool {
        !self.has_valid_moves(Player::Black) && !self.has_valid_moves(Player::White)
    }

    /// Outcome by piece count. Equal counts are a draw.
    pub fn winner(&self) -> Outcome {
        let (black, white) = self.count_pieces();
        match black.cmp(&white) {
            std::cmp::Ordering::Greater => Outcome::Win(Player::Black),
            std::cmp::Ordering::Less => Outcome::Win(Player::White),
            std::cmp::Ordering::Equal => Outcome::Draw,
        }
    }

    /// Cells flipped by `player` playing at `(row, col)`, grouped by direction.
    fn flips(&self, row: usize, col: usize, player: Player) -> Vec<Move> {
        let mut out = Vec::new();
        for &(dr, dc) in &DIRECTIONS {
            let run = self.bracketed_run(row, col, (dr, dc), player) as isize;
            for step in 1..=run {
                out.push((
                    (row as isize + dr * step) as usize,
                    (col as isize + dc * step) as usize,
                ));
            }
        }
        out
    }

    /// Length of the opponent run starting next to `(row, col)` in direction
    /// `dir`, or 0 unless the run is closed by one of `player`'s pieces.
    fn bracketed_run(&self, row: usize, col: usize, dir: (isize, isize), player: Player) -> usize {
        let (dr, dc) = dir;
        let own = player.cell();
        let opp = player.opponent().cell();

        let mut r = row as isize + dr;
        let mut c = col as isize + dc;
        let mut run = 0;
        while self.is_on_board(r, c) && self.at(r, c) == opp {
            run += 1;
            r += dr;
            c += dc;
        }

        if run > 0 && self.is_on_board(r, c) && self.at(r, c) == own {
            run
        } else {
            0
        }
    }

    /// Cell lookup for coordinates already known to be on the board.
    #[inline]
    fn at(&self, row: isize, col: isize) -> Cell {
        self.cells[row as usize * self.size + col as usize]
    }

    #[inline]
    fn put(&mut self, row: usize, col: usize, cell: Cell) {
        let i = self.idx(row, col);
        self.cells[i] = cell;
    }

    #[inline]
    fn idx(&self, row: usize, col: usize) -> usize {
        self.check_bounds(row, col);
        row * self.size + col
    }

    fn check_bounds(&self, row: usize, col: usize) {
        assert!(
            row < self.size && col < self.size,
            "coordinate ({row}, {col}) is off the {size}x{size} board",
            size = self.size
        );
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "  ")?;
        for col in 0..self.size {
            write!(f, " {}", (b'A' + col as u8) as char)?;
        }
        writeln!(f)?;
        for row in 0..self.size {
            write!(f, "{:>2}", row + 1)?;
            for col in 0..self.size {
                let ch = match self.get(row, col) {
                    Cell::Black => CHAR_BLACK,
                    Cell::White => CHAR_WHITE,
                    Cell::Empty => CHAR_EMPTY,
                };
                write!(f, " {ch}")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

/// Convert a move to algebraic notation (e.g., `(2, 3)` -> `"D3"`).
pub fn str_coord(mv: Move) -> String {
    let (row, col) = mv;
    format!("{}{}", (b'A' + col as u8) as char, row + 1)
}

/// Parse algebraic notation (e.g., `"d3"`) into a move on a `size` board.
pub fn parse_coord(text: &str, size: usize) -> Result<Move, BoardError> {
    let bad = || BoardError::BadCoord(text.to_string());

    let trimmed = text.trim();
    let mut chars = trimmed.chars();
    let letter = chars.next().filter(char::is_ascii_alphabetic).ok_or_else(bad)?;
    let col = (letter.to_ascii_uppercase() as u8 - b'A') as usize;
    let number: usize = chars.as_str().parse().map_err(|_| bad())?;

    if number == 0 || number > size || col >= size {
        return Err(bad());
    }
    Ok((number - 1, col))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_position() {
        let board = Board::new(8);
        assert_eq!(board.get(3, 3), Cell::White);
        assert_eq!(board.get(4, 4), Cell::White);
        assert_eq!(board.get(3, 4), Cell::Black);
        assert_eq!(board.get(4, 3), Cell::Black);
        assert_eq!(board.count_pieces(), (2, 2));
        assert_eq!(board.current_player(), Player::Black);
        assert_eq!(Board::default(), board);
    }

    #[test]
    fn test_initial_valid_moves_row_major() {
        let board = Board::new(8);
        assert_eq!(
            board.valid_moves(Player::Black),
            vec![(2, 3), (3, 2), (4, 5), (5, 4)]
        );
        assert_eq!(
            board.valid_moves(Player::White),
            vec![(2, 4), (3, 5), (4, 2), (5, 3)]
        );
    }

    #[test]
    fn test_opponent() {
        assert_eq!(Player::Black.opponent(), Player::White);
        assert_eq!(Player::White.opponent(), Player::Black);
    }

    #[test]
    fn test_is_on_board() {
        let board = Board::new(8);
        assert!(board.is_on_board(0, 0));
        assert!(board.is_on_board(7, 7));
        assert!(!board.is_on_board(-1, 0));
        assert!(!board.is_on_board(0, 8));
    }

    #[test]
    fn test_opening_move_flips_one() {
        let mut board = Board::new(8);
        assert!(board.make_move(2, 3, Player::Black));
        assert_eq!(board.get(2, 3), Cell::Black);
        assert_eq!(board.get(3, 3), Cell::Black);
        assert_eq!(board.get(4, 4), Cell::White);
        assert_eq!(board.count_pieces(), (4, 1));
        assert_eq!(board.current_player(), Player::White);
    }

    #[test]
    fn test_illegal_move_leaves_board_unchanged() {
        let mut board = Board::new(8);
        let before = board.clone();
        // Empty but brackets nothing
        assert!(!board.make_move(0, 0, Player::Black));
        // Occupied
        assert!(!board.make_move(3, 3, Player::Black));
        assert_eq!(board, before);
    }

    #[test]
    fn test_flip_stops_at_own_piece() {
        let mut board = Board::parse(
            &[
                ".OOOXO..", "........", "........", "........", "........", "........",
                "........", "........",
            ],
            Player::Black,
        )
        .unwrap();
        assert_eq!(board.try_make_move(0, 0, Player::Black), Ok(3));
        for col in 0..5 {
            assert_eq!(board.get(0, col), Cell::Black, "col {col}");
        }
        assert_eq!(board.get(0, 5), Cell::White);
    }

    #[test]
    fn test_flips_in_several_directions() {
        let mut board = Board::parse(
            &[
                "X.......", ".OO.....", "XO......", "........", "........", "........",
                "........", "........",
            ],
            Player::Black,
        )
        .unwrap();
        assert_eq!(board.try_make_move(2, 2, Player::Black), Ok(2));
        assert_eq!(board.get(2, 1), Cell::Black);
        assert_eq!(board.get(1, 1), Cell::Black);
        // Run toward an empty cell is not bracketed
        assert_eq!(board.get(1, 2), Cell::White);
        assert_eq!(board.count_pieces(), (5, 1));
    }

    #[test]
    fn test_run_ending_at_edge_is_not_a_capture() {
        let board = Board::parse(&["..OO", "....", "....", "...."], Player::Black).unwrap();
        assert!(!board.is_valid_move(0, 1, Player::Black));
        assert!(board.valid_moves(Player::Black).is_empty());
    }

    #[test]
    fn test_game_over_with_empty_cells() {
        let board = Board::parse(&["XX..", "XX..", "....", "..OO"], Player::Black).unwrap();
        assert!(!board.has_valid_moves(Player::Black));
        assert!(!board.has_valid_moves(Player::White));
        assert!(board.is_game_over());
        assert_eq!(board.winner(), Outcome::Win(Player::Black));
    }

    #[test]
    fn test_draw() {
        let board = Board::parse(&["X...", "....", "....", "...O"], Player::White).unwrap();
        assert!(board.is_game_over());
        assert_eq!(board.winner(), Outcome::Draw);
    }

    #[test]
    fn test_pass_turn() {
        let mut board = Board::new(8);
        board.pass_turn(Player::Black);
        assert_eq!(board.current_player(), Player::White);
        board.pass_turn(Player::White);
        assert_eq!(board.current_player(), Player::Black);
    }

    #[test]
    fn test_clone_is_independent() {
        let board = Board::new(8);
        let mut copy = board.clone();
        assert!(copy.make_move(2, 3, Player::Black));
        assert_eq!(board.get(3, 3), Cell::White);
        assert_ne!(board, copy);
    }

    #[test]
    #[should_panic(expected = "off the 8x8 board")]
    fn test_out_of_bounds_panics() {
        let board = Board::new(8);
        board.is_valid_move(8, 0, Player::Black);
    }

    #[test]
    fn test_try_make_move_errors() {
        let mut board = Board::new(8);
        assert_eq!(
            board.try_make_move(0, 9, Player::Black),
            Err(BoardError::OutOfBounds {
                row: 0,
                col: 9,
                size: 8
            })
        );
        assert_eq!(
            board.try_make_move(0, 0, Player::Black),
            Err(BoardError::IllegalMove { row: 0, col: 0 })
        );
    }

    #[test]
    fn test_parse_errors() {
        assert_eq!(
            Board::parse(&["X..", "..."], Player::Black),
            Err(BoardError::BadRow {
                row: 0,
                len: 3,
                size: 2
            })
        );
        assert_eq!(
            Board::parse(&["X?", ".."], Player::Black),
            Err(BoardError::BadCell('?'))
        );
        assert_eq!(Board::parse(&[], Player::Black), Err(BoardError::BadSize(0)));
    }

    #[test]
    fn test_coords() {
        assert_eq!(str_coord((2, 3)), "D3");
        assert_eq!(str_coord((0, 0)), "A1");
        assert_eq!(str_coord((7, 7)), "H8");
        assert_eq!(parse_coord("D3", 8), Ok((2, 3)));
        assert_eq!(parse_coord(" h8 ", 8), Ok((7, 7)));
        assert!(parse_coord("I1", 8).is_err());
        assert!(parse_coord("A9", 8).is_err());
        assert!(parse_coord("A0", 8).is_err());
        assert!(parse_coord("3D", 8).is_err());
        assert!(parse_coord("", 8).is_err());
    }

    #[test]
    fn test_display() {
        let board = Board::new(4);
        let text = board.to_string();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "   A B C D");
        assert_eq!(lines[2], " 2 . O X .");
        assert_eq!(lines[3], " 3 . X O .");
    }
}
