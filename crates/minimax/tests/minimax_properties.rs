//! Property-based tests for the grid game and minimax search.
//!
//! These tests verify, over positions reached by random legal play:
//! - Turn consistency: first player count minus second player count is 0 or 1
//! - Legal action count equals the number of empty cells
//! - Transitions are deterministic and never reuse a cell
//! - Minimax values satisfy the one-ply recurrence

use gametree_core::{Game, GameError, Player, Utility};
use gametree_minimax::games::{Cell, TicTacToe, TicTacToeState};
use gametree_minimax::Minimax;
use proptest::prelude::*;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

// =============================================================================
// Strategies for generating test inputs
// =============================================================================

/// Generate a random number of moves to play (0-9 for tic-tac-toe)
fn arb_move_count() -> impl Strategy<Value = usize> {
    0usize..=9
}

/// Generate a position by making random legal moves until the count is
/// reached or the game ends.
fn arb_position_with(moves: impl Strategy<Value = usize>) -> impl Strategy<Value = TicTacToeState> {
    (moves, any::<u64>()).prop_map(|(num_moves, seed)| {
        let game = TicTacToe::default();
        let mut state = game.initial_state();
        let mut rng = ChaCha8Rng::seed_from_u64(seed);

        for _ in 0..num_moves {
            if game.is_terminal(&state) {
                break;
            }
            let actions = game.legal_actions(&state);
            let idx = rand::Rng::gen_range(&mut rng, 0..actions.len());
            state = game.apply(&state, actions[idx]).unwrap();
        }
        state
    })
}

fn arb_position() -> impl Strategy<Value = TicTacToeState> {
    arb_position_with(arb_move_count())
}

/// Positions deep enough that a full search stays fast.
fn arb_midgame_position() -> impl Strategy<Value = TicTacToeState> {
    arb_position_with(3usize..=9)
}

// =============================================================================
// State model
// =============================================================================

proptest! {
    /// Reachable states never violate turn consistency.
    #[test]
    fn prop_turn_consistency(state in arb_position()) {
        let first = state.count(Player::First);
        let second = state.count(Player::Second);
        prop_assert!(first == second || first == second + 1, "X={} O={}", first, second);

        let expected = if first == second { Player::First } else { Player::Second };
        prop_assert_eq!(state.to_move(), Ok(expected));
    }

    /// Legal actions are exactly the empty cells.
    #[test]
    fn prop_legal_action_count(state in arb_position()) {
        let game = TicTacToe::default();
        let actions = game.legal_actions(&state);

        prop_assert_eq!(actions.len(), 9 - state.occupied());
        for action in actions {
            prop_assert!(state.cell(action.row, action.col).unwrap().is_empty());
        }
    }

    /// The Display form parses back to the same state.
    #[test]
    fn prop_display_parses_back(state in arb_position()) {
        let parsed: TicTacToeState = state.to_string().parse().unwrap();
        prop_assert_eq!(parsed, state);
    }
}

// =============================================================================
// Transitions
// =============================================================================

proptest! {
    /// Same (state, action) gives the same successor; repeating the action fails.
    #[test]
    fn prop_apply_deterministic(state in arb_position(), pick in any::<prop::sample::Index>()) {
        let game = TicTacToe::default();
        let actions = game.legal_actions(&state);
        prop_assume!(!actions.is_empty());
        let action = actions[pick.index(actions.len())];

        let a = game.apply(&state, action).unwrap();
        let b = game.apply(&state, action).unwrap();
        prop_assert_eq!(&a, &b);
        prop_assert_eq!(a.occupied(), state.occupied() + 1);

        let again = game.apply(&a, action);
        prop_assert!(
            matches!(again, Err(GameError::InvalidAction { .. })),
            "expected InvalidAction, got {:?}",
            again
        );
    }

    /// The player to move flips after every move that does not end the game.
    #[test]
    fn prop_turn_alternates(state in arb_position(), pick in any::<prop::sample::Index>()) {
        let game = TicTacToe::default();
        prop_assume!(!game.is_terminal(&state));

        let actions = game.legal_actions(&state);
        let action = actions[pick.index(actions.len())];
        let mover = game.to_move(&state).unwrap();
        let next = game.apply(&state, action).unwrap();

        prop_assert_eq!(next.cell(action.row, action.col), Some(Cell::Mark(mover)));
        if !game.is_terminal(&next) {
            prop_assert_eq!(game.to_move(&next), Ok(mover.opponent()));
        }
    }

    /// Utility is defined exactly on terminal states and is antisymmetric.
    #[test]
    fn prop_utility_only_when_terminal(state in arb_position()) {
        let game = TicTacToe::default();

        if game.is_terminal(&state) {
            let first = game.utility(&state, Player::First).unwrap();
            let second = game.utility(&state, Player::Second).unwrap();
            prop_assert_eq!(first, second.negate());
        } else {
            prop_assert_eq!(game.utility(&state, Player::First), Err(GameError::NotTerminal));
        }
    }
}

// =============================================================================
// Search
// =============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    /// The value of a state is the best child value for the player to move.
    #[test]
    fn prop_value_recurrence(state in arb_midgame_position()) {
        let game = TicTacToe::default();
        let minimax = Minimax::default();
        prop_assume!(!game.is_terminal(&state));

        let value = minimax.value(&game, &state).unwrap();
        let children: Vec<Utility> = game
            .legal_actions(&state)
            .into_iter()
            .map(|a| minimax.value(&game, &game.apply(&state, a).unwrap()).unwrap())
            .collect();
        let expected = match game.to_move(&state).unwrap() {
            Player::First => children.iter().copied().max(),
            Player::Second => children.iter().copied().min(),
        };
        prop_assert_eq!(Some(value), expected);
    }

    /// The chosen action achieves the root value and is the smallest that does.
    #[test]
    fn prop_best_action_is_first_optimal(state in arb_midgame_position()) {
        let game = TicTacToe::default();
        let minimax = Minimax::default();
        prop_assume!(!game.is_terminal(&state));

        let result = minimax.search(&game, &state).unwrap();
        let optimal = result.optimal_actions();

        prop_assert_eq!(result.root_value, minimax.value(&game, &state).unwrap());
        prop_assert_eq!(result.value_of(result.best_action), Some(result.root_value));
        prop_assert_eq!(optimal.first().copied(), Some(result.best_action));
        prop_assert_eq!(result.action_values.len(), game.legal_actions(&state).len());
    }

    /// Searching a finished game is refused.
    #[test]
    fn prop_terminal_search_is_game_over(state in arb_position_with(5usize..=9)) {
        let game = TicTacToe::default();
        prop_assume!(game.is_terminal(&state));

        prop_assert_eq!(Minimax::default().search(&game, &state), Err(GameError::GameOver));
    }
}
