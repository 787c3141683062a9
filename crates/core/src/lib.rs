//! gametree core - game abstractions and common types
//!
//! This crate provides the `Game` trait that any finite, two-player,
//! zero-sum, perfect-information game implements to be searched by
//! `gametree_minimax`.
//!
//! # Types
//!
//! - [`Game`] - Trait for game implementations
//! - [`Player`] - The two sides, `First` moves first
//! - [`Utility`] - Terminal payoff in {-1, 0, 1}
//! - [`Outcome`] - In progress, won, or drawn

mod error;
mod game;
mod types;

pub use error::{GameError, Result};
pub use game::{Game, Outcome};
pub use types::{Player, Utility};
