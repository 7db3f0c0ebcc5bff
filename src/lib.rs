//! Reversi-Rust: a Reversi (Othello) engine with two search strategies.
//!
//! This crate provides exact Reversi rules and two interchangeable move
//! pickers: Alpha-Beta Minimax over a static evaluator, and Monte Carlo Tree
//! Search with UCB1 and random playouts.
//!
//! ## Modules
//!
//! - [`constants`] - Board geometry, evaluation weights and search parameters
//! - [`board`] - Core game logic (cells, legality, flips, game end)
//! - [`evaluate`] - Positional + mobility heuristic
//! - [`minimax`] - Alpha-Beta Minimax engine
//! - [`playout`] - Random game simulation
//! - [`mcts`] - Monte Carlo Tree Search engine
//! - [`engine`] - The `Engine` trait both searchers implement
//! - [`game`] - Turn-by-turn runner for humans and engines
//!
//! ## Example
//!
//! ```
//! use reversi_rust::board::{Board, Player, str_coord};
//! use reversi_rust::engine::Engine;
//! use reversi_rust::mcts::MctsEngine;
//! use reversi_rust::minimax::MinimaxEngine;
//!
//! // Create a new game and play the classic opening
//! let mut board = Board::new(8);
//! assert!(board.make_move(2, 3, Player::Black));
//!
//! // Ask both engines for White's reply
//! let mut minimax = MinimaxEngine::new(Player::White, 3);
//! let mut mcts = MctsEngine::with_seed(Player::White, 100, 7);
//! let a = minimax.get_move(&board).unwrap();
//! let b = mcts.get_move(&board).unwrap();
//! println!("Minimax: {}, MCTS: {}", str_coord(a), str_coord(b));
//! ```

pub mod board;
pub mod constants;
pub mod engine;
pub mod evaluate;
pub mod game;
pub mod mcts;
pub mod minimax;
pub mod playout;
