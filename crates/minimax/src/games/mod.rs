//! Game implementations searched by the engine.
//!
//! The grid family covers tic-tac-toe (`TicTacToe`, a 3×3 grid) and its
//! N×N generalisations.

pub mod grid;

pub use grid::{Cell, GridAction, GridState, MarkingGame, TicTacToe, TicTacToeState};
