//! Constants for board geometry, evaluation and search parameters.
//!
//! Everything the engines treat as fixed configuration lives here. Runtime
//! choices (depth, iterations, seed, board size) come from the command line
//! and fall back to the defaults below.

// =============================================================================
// Board Geometry
// =============================================================================

/// Standard Reversi board size (NxN).
pub const DEFAULT_SIZE: usize = 8;

/// Smallest board the rules make sense on (the four starting pieces plus a ring).
pub const MIN_SIZE: usize = 4;

/// Largest board with a letter for every column (A-Z).
pub const MAX_SIZE: usize = 26;

/// Offsets to the 8 neighbouring cells as (row, col) deltas.
/// Order: E, SE, S, SW, W, NW, N, NE
pub const DIRECTIONS: [(isize, isize); 8] = [
    (0, 1),
    (1, 1),
    (1, 0),
    (1, -1),
    (0, -1),
    (-1, -1),
    (-1, 0),
    (-1, 1),
];

// =============================================================================
// Static Evaluation
// =============================================================================

/// Side length of the positional weight table.
pub const WEIGHTS_SIZE: usize = 8;

/// Positional weights: corners are worth a lot, the cells next to them are
/// dangerous because they give the corner away.
pub const WEIGHTS: [[i32; WEIGHTS_SIZE]; WEIGHTS_SIZE] = [
    [120, -20, 20, 5, 5, 20, -20, 120],
    [-20, -40, -5, -5, -5, -5, -40, -20],
    [20, -5, 15, 3, 3, 15, -5, 20],
    [5, -5, 3, 3, 3, 3, -5, 5],
    [5, -5, 3, 3, 3, 3, -5, 5],
    [20, -5, 15, 3, 3, 15, -5, 20],
    [-20, -40, -5, -5, -5, -5, -40, -20],
    [120, -20, 20, 5, 5, 20, -20, 120],
];

/// Score of a finished game won by the evaluating side. Must dominate any
/// heuristic value.
pub const WIN_SCORE: i32 = 10_000;

/// Multiplier applied to the positional (weight table) difference.
pub const POSITIONAL_WEIGHT: i32 = 10;

/// Multiplier applied to the mobility (legal move count) difference.
pub const MOBILITY_WEIGHT: i32 = 5;

// =============================================================================
// Search Parameters
// =============================================================================

/// Default Minimax search depth in plies.
pub const DEFAULT_DEPTH: u32 = 4;

/// Default number of MCTS iterations per move.
pub const DEFAULT_ITERATIONS: usize = 1000;

/// UCB1 exploration constant.
pub const UCB_C: f64 = 1.41;

/// Reward for a won playout.
pub const REWARD_WIN: f64 = 1.0;

/// Reward for a drawn playout.
pub const REWARD_DRAW: f64 = 0.5;

/// Reward for a lost playout.
pub const REWARD_LOSS: f64 = 0.0;

// =============================================================================
// Display Characters
// =============================================================================

/// Black piece.
pub const CHAR_BLACK: char = 'X';

/// White piece.
pub const CHAR_WHITE: char = 'O';

/// Empty cell.
pub const CHAR_EMPTY: char = '.';
