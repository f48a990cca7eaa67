//! One entry point over every search engine.
//!
//! [`choose_action`] takes a state and a [`SearchConfig`] and dispatches to
//! alpha-beta, iterative deepening, expectimax, MCTS or flat Monte-Carlo.
//! [`SearchEngine`] is the long-lived form: it keeps the strategy objects
//! (evaluator, move ordering, rollout, opponent model) and, when
//! `persist_cache` is set, the transposition cache between calls.
//!
//! # Example
//!
//! ```rust
//! use engine_search::{choose_action, Algorithm, SearchConfig};
//! use games_tictactoe::{LineEvaluator, State};
//!
//! // X at 0 and 1, O at 3 and 4: X wins at 2
//! let state = State::from_board([1, 1, 0, 2, 2, 0, 0, 0, 0]);
//!
//! for algorithm in [Algorithm::AlphaBeta, Algorithm::Mcts] {
//!     let config = SearchConfig::new(algorithm).with_max_depth(3).with_seed(1);
//!     let result = choose_action(&state, LineEvaluator, &config).unwrap();
//!     assert_eq!(result.action, Some(2));
//! }
//! ```

pub mod algorithm;
pub mod config;
pub mod engine;

pub use algorithm::Algorithm;
pub use config::SearchConfig;
pub use engine::{choose_action, SearchEngine};
