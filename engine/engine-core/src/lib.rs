//! Core traits and types shared by the game-tree search engines
//!
//! This crate provides the abstractions every engine is written against:
//! - `GameState`: the state contract a game implements
//! - `Evaluator`, `MoveOrdering`, `RolloutPolicy`, `OpponentModel`: pluggable
//!   strategy objects
//! - `SearchResult` / `SearchStats`: what an engine returns
//! - `SearchError`: the error taxonomy
//! - `Cancellation`: cooperative time/stop-flag checks

pub mod cancel;
pub mod error;
pub mod evaluator;
pub mod game_utils;
pub mod opponent;
pub mod ordering;
pub mod result;
pub mod rollout;
pub mod state;

// Re-export main types for convenience
pub use cancel::Cancellation;
pub use error::SearchError;
pub use evaluator::{
    bounded_score, is_proven, terminal_score, Evaluator, ZeroEvaluator, DRAW_SCORE, EVAL_BOUND,
    LOSS_SCORE, WIN_SCORE,
};
pub use opponent::{FrequencyOpponentModel, OpponentModel, UniformOpponent};
pub use ordering::{order_actions, EvaluatorOrdering, MoveOrdering, NoOrdering};
pub use result::{SearchResult, SearchStats};
pub use rollout::{playout_reward, RolloutPolicy};
pub use state::{GameState, Outcome};
