//! Line detection and terminality for N×N grids.
//!
//! Lines are checked in a fixed order: every row top to bottom, every
//! column left to right, then the anti-diagonal, then the main diagonal.
//! The first complete line found decides the winner.

use gametree_core::Player;

use super::{Cell, GridAction, GridState};

/// A straight line of N cells that wins when one player owns all of them.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash)]
pub enum Line {
    Row(usize),
    Column(usize),
    /// (i, N-1-i): top-right to bottom-left.
    AntiDiagonal,
    /// (i, i): top-left to bottom-right.
    MainDiagonal,
}

impl Line {
    /// Cells of this line on an N×N grid, in increasing row order.
    pub fn cells<const N: usize>(self) -> [GridAction; N] {
        std::array::from_fn(|i| match self {
            Line::Row(row) => GridAction::new(row, i),
            Line::Column(col) => GridAction::new(i, col),
            Line::AntiDiagonal => GridAction::new(i, N - 1 - i),
            Line::MainDiagonal => GridAction::new(i, i),
        })
    }
}

/// All lines of an N×N grid in check order.
pub fn lines<const N: usize>() -> impl Iterator<Item = Line> {
    (0..N)
        .map(Line::Row)
        .chain((0..N).map(Line::Column))
        .chain([Line::AntiDiagonal, Line::MainDiagonal])
}

/// The player owning every cell of `line`, if any.
pub fn line_owner<const N: usize>(state: &GridState<N>, line: Line) -> Option<Player> {
    let cells = line.cells::<N>();
    let start = cells.first()?;
    let owner = state.cell(start.row, start.col)?.owner()?;
    cells
        .iter()
        .all(|a| state.cell(a.row, a.col) == Some(Cell::Mark(owner)))
        .then_some(owner)
}

/// First complete line in check order, with its owner.
pub fn winning_line<const N: usize>(state: &GridState<N>) -> Option<(Line, Player)> {
    lines::<N>().find_map(|line| line_owner(state, line).map(|player| (line, player)))
}

pub fn winner<const N: usize>(state: &GridState<N>) -> Option<Player> {
    winning_line(state).map(|(_, player)| player)
}

/// A game ends on a completed line or a full grid.
pub fn is_terminal<const N: usize>(state: &GridState<N>) -> bool {
    winner(state).is_some() || state.is_full()
}

/// True when complete lines are owned by both players at once.
///
/// Alternating play can never produce this; `winner` still answers with the
/// first line in check order.
pub fn has_rival_lines<const N: usize>(state: &GridState<N>) -> bool {
    let mut owners = lines::<N>().filter_map(|line| line_owner(state, line));
    match owners.next() {
        Some(first) => owners.any(|other| other != first),
        None => false,
    }
}
