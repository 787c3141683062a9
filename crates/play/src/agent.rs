//! Automatic players for self-play.
//!
//! The engine plays perfectly; the random agent is a seeded baseline that
//! picks uniformly among legal moves.

use gametree_core::{Game, GameError, Result};
use gametree_minimax::games::{GridAction, TicTacToe, TicTacToeState};
use gametree_minimax::Minimax;
use rand::Rng;
use rand_chacha::ChaCha8Rng;

/// An automatic player.
pub enum Agent {
    Engine(Minimax),
    Random(ChaCha8Rng),
}

impl Agent {
    /// Short label used in summaries and game records.
    pub fn name(&self) -> &'static str {
        match self {
            Agent::Engine(_) => "minimax",
            Agent::Random(_) => "random",
        }
    }

    /// Choose a move for the player to move.
    ///
    /// # Errors
    /// Returns `GameError::GameOver` if the game has already ended.
    pub fn choose(&mut self, game: &TicTacToe, state: &TicTacToeState) -> Result<GridAction> {
        match self {
            Agent::Engine(minimax) => minimax.best_action(game, state),
            Agent::Random(rng) => {
                if game.is_terminal(state) {
                    return Err(GameError::GameOver);
                }
                let actions = game.legal_actions(state);
                if actions.is_empty() {
                    return Err(GameError::GameOver);
                }
                Ok(actions[rng.gen_range(0..actions.len())])
            }
        }
    }
}
