//! Rollout policy contract.
//!
//! A rollout plays a position forward with a cheap policy to estimate its
//! value. Concrete policies live in the `mcts` crate; this trait is shared so
//! other engines and games can supply their own.

use rand_chacha::ChaCha20Rng;

use crate::error::SearchError;
use crate::state::GameState;

/// Plays a state forward, usually until it is terminal.
pub trait RolloutPolicy<S: GameState> {
    /// Consume `state` and return the final state of the playout.
    ///
    /// The returned state is terminal unless the policy truncates long games;
    /// callers score a non-terminal result as neutral.
    fn play_out(&self, state: S, rng: &mut ChaCha20Rng) -> Result<S, SearchError>;
}

/// Reward of a playout's final state for `participant`.
///
/// Non-terminal (truncated) playouts count as neutral.
pub fn playout_reward<S: GameState>(final_state: &S, participant: S::Participant) -> f64 {
    final_state
        .outcome(participant)
        .map(|outcome| outcome.reward())
        .unwrap_or(0.0)
}
