//! N-in-a-row marking game on an N×N grid.
//!
//! Two players alternately mark empty cells; the first to own a full row,
//! column or diagonal wins, and a full grid without a line is a draw.
//! With N = 3 this is tic-tac-toe, which is a draw under perfect play.
//!
//! ```text
//! (0,0) | (0,1) | (0,2)
//! ---------------------
//! (1,0) | (1,1) | (1,2)
//! ---------------------
//! (2,0) | (2,1) | (2,2)
//! ```

pub mod outcome;
mod state;

use gametree_core::{Game, GameError, Player, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

pub use outcome::Line;
pub use state::{Cell, GridState};

/// A grid coordinate, 0-indexed.
///
/// Ordering is row-major (row first, then column), which makes the engine
/// prefer the lowest row, then the lowest column, among equally good moves.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Serialize, Deserialize)]
pub struct GridAction {
    pub row: usize,
    pub col: usize,
}

impl GridAction {
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }
}

impl fmt::Display for GridAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// Marking game rules for an N×N grid.
#[derive(Clone, Copy, Debug, Default)]
pub struct MarkingGame<const N: usize>;

/// The 3×3 reference game.
pub type TicTacToe = MarkingGame<3>;

/// State of a 3×3 game.
pub type TicTacToeState = GridState<3>;

impl<const N: usize> MarkingGame<N> {
    /// Cells of the first complete line in check order, if any.
    pub fn winning_cells(&self, state: &GridState<N>) -> Option<[GridAction; N]> {
        outcome::winning_line(state).map(|(line, _)| line.cells::<N>())
    }
}

impl<const N: usize> Game for MarkingGame<N> {
    type State = GridState<N>;
    type Action = GridAction;

    fn initial_state(&self) -> Self::State {
        GridState::new()
    }

    fn to_move(&self, state: &Self::State) -> Result<Player> {
        state.to_move()
    }

    fn legal_actions(&self, state: &Self::State) -> Vec<Self::Action> {
        state
            .rows()
            .enumerate()
            .flat_map(|(row, cells)| {
                cells
                    .iter()
                    .enumerate()
                    .filter(|(_, cell)| cell.is_empty())
                    .map(move |(col, _)| GridAction::new(row, col))
            })
            .collect()
    }

    fn apply(&self, state: &Self::State, action: Self::Action) -> Result<Self::State> {
        match state.cell(action.row, action.col) {
            None => Err(GameError::InvalidAction {
                action: action.to_string(),
                reason: format!("outside the {}x{} grid", N, N),
            }),
            Some(Cell::Mark(owner)) => Err(GameError::InvalidAction {
                action: action.to_string(),
                reason: format!("cell already marked by {}", owner),
            }),
            Some(Cell::Empty) => {
                let player = state.to_move()?;
                Ok(state.with_cell(action.row, action.col, Cell::Mark(player)))
            }
        }
    }

    fn winner(&self, state: &Self::State) -> Option<Player> {
        outcome::winner(state)
    }

    fn is_terminal(&self, state: &Self::State) -> bool {
        outcome::is_terminal(state)
    }
}
