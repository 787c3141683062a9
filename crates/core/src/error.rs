use thiserror::Error;

/// Errors reported by game rules and the search engine.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GameError {
    /// The action is out of bounds or targets an occupied cell.
    #[error("invalid action {action}: {reason}")]
    InvalidAction { action: String, reason: String },

    /// Occupancy counts cannot arise from alternating play.
    #[error("corrupt state: first player has {first} marks, second player has {second}")]
    CorruptState { first: usize, second: usize },

    /// Utility was requested for a state that is still in progress.
    #[error("utility is only defined for terminal states")]
    NotTerminal,

    /// A move was requested for a finished game.
    #[error("game is over, no action to recommend")]
    GameOver,

    /// A non-terminal state offered no legal action.
    #[error("no legal actions available")]
    NoLegalActions,

    #[error("invalid board: {0}")]
    InvalidBoard(String),

    #[error("utility {0} is outside {{-1, 0, 1}}")]
    InvalidUtility(i8),
}

impl GameError {
    /// Returns true when a caller can recover by retrying with different input.
    ///
    /// The remaining kinds indicate a programming error upstream.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            GameError::InvalidAction { .. } | GameError::GameOver | GameError::InvalidBoard(_)
        )
    }
}

/// Convenience Result type for game operations
pub type Result<T> = std::result::Result<T, GameError>;
