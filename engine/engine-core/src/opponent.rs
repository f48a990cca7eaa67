//! Opponent modelling.
//!
//! An [`OpponentModel`] assigns relative weights to the actions another
//! participant may take. Expectimax turns those weights into probabilities at
//! opponent nodes; rollouts sample opponent moves from them.

use std::collections::HashMap;

use crate::state::GameState;

/// Relative likelihood of each action an opponent may choose.
pub trait OpponentModel<S: GameState> {
    /// Non-negative weight of `action` being played from `state`.
    fn weight(&self, state: &S, action: &S::Action) -> f64;

    /// Record an action the opponent actually played. The default ignores it.
    fn observe(&mut self, _state: &S, _action: &S::Action) {}

    /// Normalised probabilities over `actions`, in the same order.
    ///
    /// Falls back to a uniform distribution when every weight is zero or the
    /// model returns something unusable.
    fn distribution(&self, state: &S, actions: &[S::Action]) -> Vec<f64> {
        if actions.is_empty() {
            return Vec::new();
        }
        let weights: Vec<f64> = actions
            .iter()
            .map(|action| {
                let w = self.weight(state, action);
                if w.is_finite() && w > 0.0 {
                    w
                } else {
                    0.0
                }
            })
            .collect();
        let total: f64 = weights.iter().sum();
        if total <= 0.0 {
            let p = 1.0 / actions.len() as f64;
            return vec![p; actions.len()];
        }
        weights.into_iter().map(|w| w / total).collect()
    }
}

/// Every legal action is equally likely.
#[derive(Debug, Clone, Copy, Default)]
pub struct UniformOpponent;

impl<S: GameState> OpponentModel<S> for UniformOpponent {
    fn weight(&self, _state: &S, _action: &S::Action) -> f64 {
        1.0
    }
}

/// Frequency model built from the opponent's observed actions.
///
/// Weights are Laplace-smoothed counts, so an action never seen before still
/// gets `smoothing` pseudo-observations.
#[derive(Debug, Clone)]
pub struct FrequencyOpponentModel<A> {
    counts: HashMap<A, u64>,
    observations: u64,
    smoothing: f64,
}

impl<A: std::hash::Hash + Eq + Clone> FrequencyOpponentModel<A> {
    pub fn new() -> Self {
        Self::with_smoothing(1.0)
    }

    pub fn with_smoothing(smoothing: f64) -> Self {
        Self {
            counts: HashMap::new(),
            observations: 0,
            smoothing: smoothing.max(0.0),
        }
    }

    /// Record one observed action.
    pub fn record(&mut self, action: &A) {
        *self.counts.entry(action.clone()).or_insert(0) += 1;
        self.observations += 1;
    }

    pub fn count(&self, action: &A) -> u64 {
        self.counts.get(action).copied().unwrap_or(0)
    }

    pub fn observations(&self) -> u64 {
        self.observations
    }
}

impl<A: std::hash::Hash + Eq + Clone> Default for FrequencyOpponentModel<A> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: GameState> OpponentModel<S> for FrequencyOpponentModel<S::Action> {
    fn weight(&self, _state: &S, action: &S::Action) -> f64 {
        self.count(action) as f64 + self.smoothing
    }

    fn observe(&mut self, _state: &S, action: &S::Action) {
        self.record(action);
    }
}
