//! Deterministic game-tree search.
//!
//! - [`AlphaBetaSearch`]: depth-limited minimax with alpha-beta pruning and a
//!   window-independent [`TranspositionCache`]
//! - [`IterativeDeepening`]: anytime driver that deepens one ply at a time
//! - [`ExpectimaxSearch`]: expectation over opponent models and chance nodes
//!
//! # Usage
//!
//! ```rust
//! use alphabeta::{AlphaBetaConfig, AlphaBetaSearch};
//! use engine_core::WIN_SCORE;
//! use games_tictactoe::{LineEvaluator, State};
//!
//! // X to move with two in a row on top
//! let state = State::from_board([1, 1, 0, 2, 2, 0, 0, 0, 0]);
//! let mut search = AlphaBetaSearch::new(LineEvaluator, AlphaBetaConfig::for_testing());
//! let result = search.search(&state).unwrap();
//!
//! assert_eq!(result.action, Some(2));
//! assert_eq!(result.value, WIN_SCORE);
//! ```

pub mod config;
pub mod expectimax;
pub mod iterative;
pub mod search;
pub mod tt;

pub use config::{AlphaBetaConfig, TieBreak};
pub use expectimax::ExpectimaxSearch;
pub use iterative::IterativeDeepening;
pub use search::{alpha_beta, AlphaBetaSearch};
pub use tt::{Bound, CacheEntry, CacheStats, TranspositionCache, TranspositionKey};
