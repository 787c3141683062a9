//! Immutable N×N grid state.

use gametree_core::{GameError, Player, Result};
use std::fmt;
use std::str::FromStr;

use super::outcome;

/// Contents of a single grid cell.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash, Default)]
pub enum Cell {
    #[default]
    Empty,
    Mark(Player),
}

impl Cell {
    pub fn is_empty(self) -> bool {
        self == Cell::Empty
    }

    /// The player owning this cell, if any.
    pub fn owner(self) -> Option<Player> {
        match self {
            Cell::Empty => None,
            Cell::Mark(player) => Some(player),
        }
    }

    fn symbol(self) -> char {
        match self {
            Cell::Empty => '.',
            Cell::Mark(player) => player.symbol(),
        }
    }
}

/// Snapshot of an N×N grid.
///
/// States are never mutated after construction; transitions build a new
/// value. The player to move is not stored: it is derived from how many
/// marks each side has placed.
#[derive(Clone, PartialEq, Eq, Debug, Hash)]
pub struct GridState<const N: usize> {
    /// Row-major cells, `cells[row][col]`.
    cells: [[Cell; N]; N],
}

impl<const N: usize> GridState<N> {
    /// Create the all-empty grid.
    pub fn new() -> Self {
        Self {
            cells: [[Cell::Empty; N]; N],
        }
    }

    /// Build a state from raw cells without checking turn consistency.
    ///
    /// Use `FromStr` for validated construction. States built here can fail
    /// `to_move` with `GameError::CorruptState`.
    pub fn from_cells(cells: [[Cell; N]; N]) -> Self {
        Self { cells }
    }

    /// Get the cell at (row, col), or `None` when out of bounds.
    pub fn cell(&self, row: usize, col: usize) -> Option<Cell> {
        self.cells.get(row).and_then(|r| r.get(col)).copied()
    }

    /// Iterate over rows of cells.
    pub fn rows(&self) -> impl Iterator<Item = &[Cell; N]> {
        self.cells.iter()
    }

    /// Number of cells marked by `player`.
    pub fn count(&self, player: Player) -> usize {
        self.cells
            .iter()
            .flatten()
            .filter(|&&cell| cell == Cell::Mark(player))
            .count()
    }

    /// Number of non-empty cells.
    pub fn occupied(&self) -> usize {
        self.cells.iter().flatten().filter(|c| !c.is_empty()).count()
    }

    pub fn is_full(&self) -> bool {
        self.cells.iter().flatten().all(|c| !c.is_empty())
    }

    /// Player to move, derived from occupancy.
    ///
    /// `First` moves when both sides have the same number of marks,
    /// `Second` when `First` is exactly one ahead.
    ///
    /// # Errors
    /// Returns `GameError::CorruptState` for any other difference.
    pub fn to_move(&self) -> Result<Player> {
        let first = self.count(Player::First);
        let second = self.count(Player::Second);
        match first.checked_sub(second) {
            Some(0) => Ok(Player::First),
            Some(1) => Ok(Player::Second),
            _ => Err(GameError::CorruptState { first, second }),
        }
    }

    /// Copy of this state with one cell replaced.
    ///
    /// Callers check bounds and emptiness first.
    pub(crate) fn with_cell(&self, row: usize, col: usize, cell: Cell) -> Self {
        let mut cells = self.cells;
        cells[row][col] = cell;
        Self { cells }
    }
}

impl<const N: usize> Default for GridState<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const N: usize> fmt::Display for GridState<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (r, row) in self.cells.iter().enumerate() {
            if r > 0 {
                writeln!(f)?;
            }
            for (c, cell) in row.iter().enumerate() {
                if c > 0 {
                    write!(f, " ")?;
                }
                write!(f, "{}", cell.symbol())?;
            }
        }
        Ok(())
    }
}

/// Parses `X`, `O` and `.`/`_`/`-` cells in row-major order.
///
/// Whitespace, `/` and `|` are separators and ignored, so both `"XX./OO./..."`
/// and the `Display` output parse. The result is checked for turn
/// consistency and for lines owned by both players.
impl<const N: usize> FromStr for GridState<N> {
    type Err = GameError;

    fn from_str(s: &str) -> Result<Self> {
        let symbols: Vec<char> = s
            .chars()
            .filter(|c| !c.is_whitespace() && *c != '/' && *c != '|')
            .collect();
        if symbols.len() != N * N {
            return Err(GameError::InvalidBoard(format!(
                "expected {} cells, got {}",
                N * N,
                symbols.len()
            )));
        }

        let mut cells = [[Cell::Empty; N]; N];
        for (i, &symbol) in symbols.iter().enumerate() {
            cells[i / N][i % N] = match symbol {
                '.' | '_' | '-' => Cell::Empty,
                other => match Player::from_symbol(other) {
                    Some(player) => Cell::Mark(player),
                    None => {
                        return Err(GameError::InvalidBoard(format!(
                            "unexpected character '{}' at cell {}",
                            other, i
                        )))
                    }
                },
            };
        }

        let state = Self::from_cells(cells);
        state.to_move()?;
        if outcome::has_rival_lines(&state) {
            return Err(GameError::CorruptState {
                first: state.count(Player::First),
                second: state.count(Player::Second),
            });
        }
        Ok(state)
    }
}
