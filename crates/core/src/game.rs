use std::fmt::Debug;
use std::hash::Hash;

use crate::{GameError, Player, Result, Utility};

/// A finite, two-player, zero-sum game with perfect information.
///
/// This trait defines the interface a game must implement to be searched by
/// the minimax engine. States are immutable values: `apply` returns a fresh
/// successor and never touches its input, so a state can be shared freely
/// between recursive frames and threads.
///
/// Whose turn it is must be derivable from the state itself. Implementations
/// do not keep a side-channel turn tracker.
pub trait Game: Clone + Send + Sync {
    /// The game state (e.g., a grid of marks)
    type State: Clone + Debug + Eq + Hash + Send + Sync;

    /// A game action. The `Ord` impl is the tie-break order used by search.
    type Action: Clone + Copy + Debug + Eq + Ord + Hash + Send + Sync;

    /// Returns the initial game state
    fn initial_state(&self) -> Self::State;

    /// Returns the player who moves next.
    ///
    /// # Errors
    /// Returns `GameError::CorruptState` if the state could not have been
    /// reached by alternating play.
    fn to_move(&self, state: &Self::State) -> Result<Player>;

    /// Returns all legal actions from the given state.
    ///
    /// Order carries no meaning for callers. Empty when no move remains.
    fn legal_actions(&self, state: &Self::State) -> Vec<Self::Action>;

    /// Applies an action for the player to move, returning a new state.
    ///
    /// # Errors
    /// Returns `GameError::InvalidAction` if the action is not legal in `state`.
    fn apply(&self, state: &Self::State, action: Self::Action) -> Result<Self::State>;

    /// Returns the player owning a completed winning configuration, if any.
    fn winner(&self, state: &Self::State) -> Option<Player>;

    /// Returns true if the game has ended (won or drawn).
    fn is_terminal(&self, state: &Self::State) -> bool;

    /// Returns the terminal utility from `perspective`'s point of view:
    /// `WIN` if they won, `LOSS` if the opponent won, `DRAW` otherwise.
    ///
    /// # Errors
    /// Returns `GameError::NotTerminal` if the game is still in progress.
    fn utility(&self, state: &Self::State, perspective: Player) -> Result<Utility> {
        if !self.is_terminal(state) {
            return Err(GameError::NotTerminal);
        }
        Ok(match self.winner(state) {
            Some(player) if player == perspective => Utility::WIN,
            Some(_) => Utility::LOSS,
            None => Utility::DRAW,
        })
    }

    /// Returns the outcome of the game so far.
    fn outcome(&self, state: &Self::State) -> Outcome {
        match self.winner(state) {
            Some(player) => Outcome::Win(player),
            None if self.is_terminal(state) => Outcome::Draw,
            None => Outcome::InProgress,
        }
    }
}

/// Result of a game, recomputed from a state on demand.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Outcome {
    InProgress,
    Win(Player),
    Draw,
}

impl Outcome {
    pub fn is_over(self) -> bool {
        !matches!(self, Outcome::InProgress)
    }
}

impl std::fmt::Display for Outcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Outcome::InProgress => write!(f, "in progress"),
            Outcome::Win(player) => write!(f, "{} wins", player),
            Outcome::Draw => write!(f, "draw"),
        }
    }
}
