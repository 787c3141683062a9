//! Exhaustive minimax search for two-player, zero-sum games.
//!
//! This crate provides a generic minimax implementation that can be used with
//! any game implementing the `gametree_core::Game` trait, plus the N×N
//! marking game family it was built for.
//!
//! # Features
//!
//! - **Generic**: Works with any `Game` implementation
//! - **Exact**: Full-depth search, no pruning or heuristics
//! - **Deterministic**: Ties resolve to the smallest action in `Ord` order
//! - **Root Parallelism**: Optional rayon fan-out over root actions
//!
//! When several root actions share the best value, `Minimax::search` returns
//! the smallest in `Ord` order; for grid games that is the lowest row, then
//! the lowest column.
//!
//! # Example
//!
//! ```
//! use gametree_core::Utility;
//! use gametree_minimax::{games::{GridAction, TicTacToe}, Minimax, MinimaxConfig};
//!
//! let game = TicTacToe::default();
//! let state: gametree_minimax::games::TicTacToeState = "XX./OO./...".parse().unwrap();
//!
//! let minimax = Minimax::new(MinimaxConfig::default());
//! let result = minimax.search(&game, &state).unwrap();
//!
//! assert_eq!(result.best_action, GridAction::new(0, 2));
//! assert_eq!(result.root_value, Utility::WIN);
//! ```

pub mod config;
pub mod games;
pub mod search;

pub use config::MinimaxConfig;
pub use search::{Minimax, SearchResult};
