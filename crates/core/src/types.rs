//! Domain types with enforced invariants.
//!
//! - Player: the two sides of a zero-sum game
//! - Utility: terminal payoff restricted to {-1, 0, 1}

use serde::{Deserialize, Serialize};

use crate::{GameError, Result};

/// One of the two players. `First` always opens the game.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Debug, Hash, Serialize, Deserialize)]
pub enum Player {
    First,
    Second,
}

impl Player {
    /// Get the opposing player.
    pub fn opponent(self) -> Self {
        match self {
            Player::First => Player::Second,
            Player::Second => Player::First,
        }
    }

    /// Conventional mark for this player on a grid.
    pub fn symbol(self) -> char {
        match self {
            Player::First => 'X',
            Player::Second => 'O',
        }
    }

    /// Parse a player from its mark, case-insensitively.
    pub fn from_symbol(symbol: char) -> Option<Self> {
        match symbol.to_ascii_uppercase() {
            'X' => Some(Player::First),
            'O' => Some(Player::Second),
            _ => None,
        }
    }
}

impl std::fmt::Display for Player {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

/// Signed value of a terminal state from one player's perspective.
///
/// Invariant: the value is one of:
/// - +1 when the perspective player won
/// - -1 when the perspective player lost
/// - 0 for a draw
///
/// Ordering follows the signed value, so `max`/`min` combine utilities
/// directly during search.
///
/// # Example
/// ```
/// use gametree_core::Utility;
///
/// let utility = Utility::new(1).unwrap();
/// assert_eq!(utility, Utility::WIN);
/// assert_eq!(utility.negate(), Utility::LOSS);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "i8", into = "i8")]
pub struct Utility(i8);

impl Utility {
    /// Utility for a win.
    pub const WIN: Self = Self(1);

    /// Utility for a loss.
    pub const LOSS: Self = Self(-1);

    /// Utility for a draw.
    pub const DRAW: Self = Self(0);

    /// Create a new utility.
    ///
    /// # Errors
    /// Returns `GameError::InvalidUtility` if the value is outside {-1, 0, 1}.
    pub fn new(value: i8) -> Result<Self> {
        if !(-1..=1).contains(&value) {
            return Err(GameError::InvalidUtility(value));
        }
        Ok(Self(value))
    }

    /// Negate the utility (for the opponent's perspective).
    pub fn negate(self) -> Self {
        Self(-self.0)
    }

    pub fn is_win(self) -> bool {
        self == Self::WIN
    }

    pub fn is_loss(self) -> bool {
        self == Self::LOSS
    }

    pub fn is_draw(self) -> bool {
        self == Self::DRAW
    }
}

impl std::fmt::Display for Utility {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.0 {
            0 => write!(f, "0"),
            v => write!(f, "{:+}", v),
        }
    }
}

impl From<Utility> for i8 {
    fn from(u: Utility) -> i8 {
        u.0
    }
}

impl TryFrom<i8> for Utility {
    type Error = GameError;

    fn try_from(value: i8) -> Result<Self> {
        Self::new(value)
    }
}
