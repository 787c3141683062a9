//! Exhaustive minimax search.
//!
//! Values are always expressed from the first player's perspective: the
//! first player maximizes, the second minimizes the same signed utility.
//! There is no depth limit, pruning or caching; every reachable state below
//! the root is expanded.

use crate::config::MinimaxConfig;
use gametree_core::{Game, GameError, Player, Result, Utility};
use rayon::prelude::*;
use tracing::{debug, trace_span};

/// Result of a minimax search.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SearchResult<A> {
    /// Optimal action for the player to move.
    /// Ties go to the smallest action in `Ord` order.
    pub best_action: A,

    /// Minimax value of the root (first player's perspective).
    pub root_value: Utility,

    /// Every legal root action with its minimax value, in ascending action order.
    pub action_values: Vec<(A, Utility)>,

    /// States visited, root included.
    pub nodes: u64,
}

impl<A: Copy + Eq> SearchResult<A> {
    /// All root actions that achieve the root value.
    pub fn optimal_actions(&self) -> Vec<A> {
        self.action_values
            .iter()
            .filter(|(_, value)| *value == self.root_value)
            .map(|(action, _)| *action)
            .collect()
    }

    /// Minimax value of a root action, if it was legal.
    pub fn value_of(&self, action: A) -> Option<Utility> {
        self.action_values
            .iter()
            .find(|(a, _)| *a == action)
            .map(|(_, value)| *value)
    }
}

/// Value of a subtree together with the number of states it contains.
#[derive(Clone, Copy, Debug)]
struct Evaluation {
    value: Utility,
    nodes: u64,
}

/// Exhaustive minimax searcher.
///
/// Holds no per-search state, so one instance can serve any number of
/// concurrent searches.
#[derive(Clone, Debug, Default)]
pub struct Minimax {
    config: MinimaxConfig,
}

impl Minimax {
    /// Create a new searcher.
    pub fn new(config: MinimaxConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &MinimaxConfig {
        &self.config
    }

    /// Value of `state` when the first player (maximizer) is to choose.
    pub fn max_value<G: Game>(&self, game: &G, state: &G::State) -> Result<Utility> {
        Ok(self.evaluate(game, state, true)?.value)
    }

    /// Value of `state` when the second player (minimizer) is to choose.
    pub fn min_value<G: Game>(&self, game: &G, state: &G::State) -> Result<Utility> {
        Ok(self.evaluate(game, state, false)?.value)
    }

    /// Minimax value of `state`, choosing max or min by the player to move.
    ///
    /// # Errors
    /// Returns `GameError::CorruptState` if the player to move cannot be derived.
    pub fn value<G: Game>(&self, game: &G, state: &G::State) -> Result<Utility> {
        if game.is_terminal(state) {
            return game.utility(state, Player::First);
        }
        match game.to_move(state)? {
            Player::First => self.max_value(game, state),
            Player::Second => self.min_value(game, state),
        }
    }

    /// Optimal action for the player to move.
    ///
    /// # Errors
    /// Returns `GameError::GameOver` if `state` is terminal.
    pub fn best_action<G: Game>(&self, game: &G, state: &G::State) -> Result<G::Action> {
        Ok(self.search(game, state)?.best_action)
    }

    /// Evaluate every legal action at the root and pick the optimal one.
    ///
    /// Actions are considered in ascending order and only a strictly better
    /// value replaces the incumbent, so ties resolve to the smallest action.
    ///
    /// # Errors
    /// Returns `GameError::GameOver` if `state` is terminal, or
    /// `GameError::CorruptState` if the player to move cannot be derived.
    pub fn search<G: Game>(&self, game: &G, state: &G::State) -> Result<SearchResult<G::Action>> {
        if game.is_terminal(state) {
            return Err(GameError::GameOver);
        }
        let player = game.to_move(state)?;

        let mut actions = game.legal_actions(state);
        actions.sort_unstable();

        let evaluate_root = |action: G::Action| -> Result<(G::Action, Evaluation)> {
            let _span = trace_span!("root_action", ?action).entered();
            let child = game.apply(state, action)?;
            // The opponent chooses next.
            let eval = self.evaluate(game, &child, player == Player::Second)?;
            Ok((action, eval))
        };

        let evaluated: Vec<(G::Action, Evaluation)> = if self.config.parallel_root {
            actions
                .par_iter()
                .map(|&action| evaluate_root(action))
                .collect::<Result<_>>()?
        } else {
            actions
                .iter()
                .map(|&action| evaluate_root(action))
                .collect::<Result<_>>()?
        };

        let mut best: Option<(G::Action, Utility)> = None;
        for &(action, eval) in &evaluated {
            let improves = match best {
                None => true,
                Some((_, incumbent)) => match player {
                    Player::First => eval.value > incumbent,
                    Player::Second => eval.value < incumbent,
                },
            };
            if improves {
                best = Some((action, eval.value));
            }
        }
        let (best_action, root_value) = best.ok_or(GameError::NoLegalActions)?;
        let nodes = 1 + evaluated.iter().map(|(_, eval)| eval.nodes).sum::<u64>();

        debug!(
            ?player,
            ?best_action,
            %root_value,
            candidates = evaluated.len(),
            nodes,
            "minimax search complete"
        );

        Ok(SearchResult {
            best_action,
            root_value,
            action_values: evaluated
                .into_iter()
                .map(|(action, eval)| (action, eval.value))
                .collect(),
            nodes,
        })
    }

    /// Recursive minimax: terminal states score from the first player's
    /// perspective; otherwise the maximizer takes the largest child value
    /// and the minimizer the smallest, alternating at every level.
    fn evaluate<G: Game>(&self, game: &G, state: &G::State, maximizing: bool) -> Result<Evaluation> {
        if game.is_terminal(state) {
            return Ok(Evaluation {
                value: game.utility(state, Player::First)?,
                nodes: 1,
            });
        }

        let mut best: Option<Utility> = None;
        let mut nodes = 1;
        for action in game.legal_actions(state) {
            let child = game.apply(state, action)?;
            let eval = self.evaluate(game, &child, !maximizing)?;
            nodes += eval.nodes;
            best = Some(match best {
                None => eval.value,
                Some(v) if maximizing => v.max(eval.value),
                Some(v) => v.min(eval.value),
            });
        }

        Ok(Evaluation {
            value: best.ok_or(GameError::NoLegalActions)?,
            nodes,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::games::{Cell, GridAction, GridState, MarkingGame, TicTacToe};

    /// Take one or two stones; whoever takes the last stone wins.
    /// The first player wins exactly when the pile is not a multiple of 3.
    #[derive(Clone)]
    struct Subtraction;

    #[derive(Clone, Debug, PartialEq, Eq, Hash)]
    struct Pile {
        stones: u8,
        moves: u8,
    }

    impl Pile {
        fn fresh(stones: u8) -> Self {
            Self { stones, moves: 0 }
        }
    }

    impl Game for Subtraction {
        type State = Pile;
        type Action = u8;

        fn initial_state(&self) -> Pile {
            Pile::fresh(7)
        }

        fn to_move(&self, state: &Pile) -> Result<Player> {
            Ok(if state.moves % 2 == 0 {
                Player::First
            } else {
                Player::Second
            })
        }

        fn legal_actions(&self, state: &Pile) -> Vec<u8> {
            (1..=2).filter(|&take| take <= state.stones).collect()
        }

        fn apply(&self, state: &Pile, take: u8) -> Result<Pile> {
            if take == 0 || take > 2 || take > state.stones {
                return Err(GameError::InvalidAction {
                    action: take.to_string(),
                    reason: format!("cannot take from {} stones", state.stones),
                });
            }
            Ok(Pile {
                stones: state.stones - take,
                moves: state.moves + 1,
            })
        }

        fn winner(&self, state: &Pile) -> Option<Player> {
            match (state.stones, state.moves) {
                (0, 0) => None,
                (0, moves) if moves % 2 == 1 => Some(Player::First),
                (0, _) => Some(Player::Second),
                _ => None,
            }
        }

        fn is_terminal(&self, state: &Pile) -> bool {
            state.stones == 0
        }
    }

    #[test]
    fn test_subtraction_values() {
        let minimax = Minimax::default();
        for stones in 1..=9u8 {
            let expected = if stones % 3 == 0 {
                Utility::LOSS
            } else {
                Utility::WIN
            };
            let value = minimax.max_value(&Subtraction, &Pile::fresh(stones)).unwrap();
            assert_eq!(value, expected, "pile of {}", stones);
        }
    }

    #[test]
    fn test_subtraction_best_actions() {
        let minimax = Minimax::default();
        assert_eq!(minimax.best_action(&Subtraction, &Pile::fresh(7)), Ok(1));
        assert_eq!(minimax.best_action(&Subtraction, &Pile::fresh(8)), Ok(2));
        // Both moves lose: tie resolves to the smaller action.
        assert_eq!(minimax.best_action(&Subtraction, &Pile::fresh(6)), Ok(1));
    }

    #[test]
    fn test_subtraction_second_player_minimizes() {
        let minimax = Minimax::default();
        let state = Pile { stones: 4, moves: 1 };

        assert_eq!(minimax.value(&Subtraction, &state), Ok(Utility::LOSS));
        let result = minimax.search(&Subtraction, &state).unwrap();
        assert_eq!(result.best_action, 1);
        assert_eq!(result.root_value, Utility::LOSS);
        assert_eq!(result.value_of(2), Some(Utility::WIN));
    }

    #[test]
    fn test_node_count() {
        // root -> take 1 -> take 1, and root -> take 2
        let result = Minimax::default()
            .search(&Subtraction, &Pile::fresh(2))
            .unwrap();
        assert_eq!(result.nodes, 4);
        assert_eq!(result.action_values, vec![(1, Utility::LOSS), (2, Utility::WIN)]);
    }

    #[test]
    fn test_terminal_state_is_game_over() {
        let minimax = Minimax::default();
        let done = Pile { stones: 0, moves: 3 };
        assert_eq!(minimax.search(&Subtraction, &done), Err(GameError::GameOver));
        assert_eq!(minimax.best_action(&Subtraction, &done), Err(GameError::GameOver));
        assert_eq!(minimax.value(&Subtraction, &done), Ok(Utility::WIN));
    }

    #[test]
    fn test_single_cell_grid() {
        let game = MarkingGame::<1>;
        let result = Minimax::default().search(&game, &game.initial_state()).unwrap();
        assert_eq!(result.best_action, GridAction::new(0, 0));
        assert_eq!(result.root_value, Utility::WIN);
        assert_eq!(result.nodes, 2);
    }

    #[test]
    fn test_two_by_two_first_player_wins() {
        // Any two cells of a 2×2 grid share a line, so X wins on its second mark.
        let game = MarkingGame::<2>;
        let minimax = Minimax::default();
        assert_eq!(minimax.value(&game, &game.initial_state()), Ok(Utility::WIN));
    }

    #[test]
    fn test_tie_break_prefers_lowest_row_then_column() {
        let game = TicTacToe::default();
        let result = Minimax::default().search(&game, &game.initial_state()).unwrap();

        assert_eq!(result.root_value, Utility::DRAW);
        // Every opening draws under perfect play.
        assert_eq!(result.optimal_actions().len(), 9);
        assert_eq!(result.best_action, GridAction::new(0, 0));
    }

    #[test]
    fn test_corrupt_root_is_reported() {
        let x = Cell::Mark(Player::First);
        let state = GridState::from_cells([[x, x, Cell::Empty], [Cell::Empty; 3], [Cell::Empty; 3]]);
        let game = TicTacToe::default();
        assert_eq!(
            Minimax::default().search(&game, &state),
            Err(GameError::CorruptState { first: 2, second: 0 })
        );
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let game = TicTacToe::default();
        let state = game.apply(&game.initial_state(), GridAction::new(1, 1)).unwrap();

        let parallel_engine = Minimax::new(MinimaxConfig::parallel());
        assert!(parallel_engine.config().parallel_root);

        let sequential = Minimax::new(MinimaxConfig::sequential())
            .search(&game, &state)
            .unwrap();
        let parallel = parallel_engine.search(&game, &state).unwrap();
        assert_eq!(sequential, parallel);
    }
}
