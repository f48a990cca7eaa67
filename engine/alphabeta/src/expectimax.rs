//! Depth-limited expectimax.
//!
//! For games where the other side is better modelled as a distribution than
//! as a perfect adversary, or where nature moves. Nodes of the searching
//! participant take the maximum over their children, opponent nodes the
//! expectation under an [`OpponentModel`], and chance nodes the expectation
//! under the state's own chance distribution. Every node, chance nodes
//! included, consumes one ply of depth.

use std::marker::PhantomData;

use engine_core::{
    bounded_score, Evaluator, GameState, OpponentModel, SearchError, SearchResult, SearchStats,
    UniformOpponent,
};
use tracing::debug;

use crate::search::terminal_value;

pub struct ExpectimaxSearch<S: GameState, E, O = UniformOpponent> {
    evaluator: E,
    opponent: O,
    max_depth: u32,
    _state: PhantomData<fn(&S)>,
}

impl<S, E> ExpectimaxSearch<S, E, UniformOpponent>
where
    S: GameState,
    E: Evaluator<S>,
{
    pub fn new(evaluator: E, max_depth: u32) -> Self {
        Self {
            evaluator,
            opponent: UniformOpponent,
            max_depth,
            _state: PhantomData,
        }
    }
}

impl<S, E, O> ExpectimaxSearch<S, E, O>
where
    S: GameState,
    E: Evaluator<S>,
    O: OpponentModel<S>,
{
    /// Replace the opponent model.
    pub fn with_opponent_model<O2: OpponentModel<S>>(
        self,
        opponent: O2,
    ) -> ExpectimaxSearch<S, E, O2> {
        ExpectimaxSearch {
            evaluator: self.evaluator,
            opponent,
            max_depth: self.max_depth,
            _state: PhantomData,
        }
    }

    pub fn opponent_model(&self) -> &O {
        &self.opponent
    }

    /// Mutable access, e.g. to record the opponent's observed moves.
    pub fn opponent_model_mut(&mut self) -> &mut O {
        &mut self.opponent
    }

    pub fn search(&self, root: &S) -> Result<SearchResult<S::Action>, SearchError> {
        if root.is_terminal() {
            return Err(SearchError::NoLegalActions);
        }
        if root.chance_distribution().is_some() {
            return Err(SearchError::contract(
                "expectimax must be started from a decision node",
            ));
        }
        let actions = root.legal_actions();
        if actions.is_empty() {
            return Err(SearchError::contract(format!(
                "non-terminal state has no legal actions: {root:?}"
            )));
        }

        let perspective = root.acting_participant();
        let depth = self.max_depth.max(1);
        let mut nodes = 1;

        let mut best: Option<(usize, f64)> = None;
        for (idx, action) in actions.iter().enumerate() {
            let child = root.successor(action);
            // A lone action is scored at the leaf, like alpha-beta does.
            let child_depth = if actions.len() == 1 { 0 } else { depth - 1 };
            let value = self.value(&child, child_depth, perspective, &mut nodes)?;
            if best.map_or(true, |(_, v)| value > v) {
                best = Some((idx, value));
            }
        }

        let (idx, value) = best.ok_or(SearchError::NoLegalActions)?;
        debug!(depth, value, nodes, "expectimax search complete");
        Ok(SearchResult::new(
            Some(actions[idx].clone()),
            value,
            SearchStats {
                nodes,
                completed_depth: if actions.len() == 1 { 1 } else { depth },
                ..SearchStats::default()
            },
        ))
    }

    fn value(
        &self,
        state: &S,
        depth: u32,
        perspective: S::Participant,
        nodes: &mut u64,
    ) -> Result<f64, SearchError> {
        *nodes += 1;

        if state.is_terminal() {
            return terminal_value(state, perspective);
        }
        if depth == 0 {
            return bounded_score(&self.evaluator, state, perspective);
        }

        if let Some(distribution) = state.chance_distribution() {
            let total: f64 = distribution.iter().map(|(_, p)| p.max(0.0)).sum();
            if distribution.is_empty() || total.is_nan() || total <= 0.0 {
                return Err(SearchError::contract(format!(
                    "chance node has no outcome with positive probability: {state:?}"
                )));
            }
            let mut expected = 0.0;
            for (outcome, p) in &distribution {
                if p.is_nan() || *p <= 0.0 {
                    continue;
                }
                let child = state.successor(outcome);
                expected += p / total * self.value(&child, depth - 1, perspective, nodes)?;
            }
            return Ok(expected);
        }

        let actions = state.legal_actions();
        if actions.is_empty() {
            return Err(SearchError::contract(format!(
                "non-terminal state has no legal actions: {state:?}"
            )));
        }

        if state.acting_participant() == perspective {
            let mut best = f64::NEG_INFINITY;
            for action in &actions {
                let child = state.successor(action);
                best = best.max(self.value(&child, depth - 1, perspective, nodes)?);
            }
            Ok(best)
        } else {
            let probabilities = self.opponent.distribution(state, &actions);
            let mut expected = 0.0;
            for (action, p) in actions.iter().zip(probabilities) {
                if p == 0.0 {
                    continue;
                }
                let child = state.successor(action);
                expected += p * self.value(&child, depth - 1, perspective, nodes)?;
            }
            Ok(expected)
        }
    }
}
