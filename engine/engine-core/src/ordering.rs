//! Move ordering for the deterministic searches.
//!
//! Alpha-beta prunes more when strong moves are tried first. A
//! [`MoveOrdering`] assigns each action a priority from the searching
//! participant's point of view; [`order_actions`] sorts best-first for the
//! side to move. Ordering never changes the value a search returns, only how
//! much of the tree it visits and which of several equal actions wins ties.

use std::cmp::Ordering;

use crate::evaluator::{terminal_score, Evaluator};
use crate::state::GameState;

/// Priority of trying `action` from `state`.
///
/// Higher means better for `perspective`. Closures of the form
/// `Fn(&S, &S::Action, S::Participant) -> f64` implement the trait directly.
pub trait MoveOrdering<S: GameState> {
    fn priority(&self, state: &S, action: &S::Action, perspective: S::Participant) -> f64;
}

impl<S, F> MoveOrdering<S> for F
where
    S: GameState,
    F: Fn(&S, &S::Action, S::Participant) -> f64,
{
    fn priority(&self, state: &S, action: &S::Action, perspective: S::Participant) -> f64 {
        self(state, action, perspective)
    }
}

/// Keeps the game's own action order.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoOrdering;

impl<S: GameState> MoveOrdering<S> for NoOrdering {
    fn priority(&self, _state: &S, _action: &S::Action, _perspective: S::Participant) -> f64 {
        0.0
    }
}

/// Orders by a one-ply lookahead with an evaluator.
///
/// Terminal successors use the sentinel scale, so immediate wins are tried
/// first and immediate losses last.
#[derive(Debug, Clone, Copy, Default)]
pub struct EvaluatorOrdering<E> {
    evaluator: E,
}

impl<E> EvaluatorOrdering<E> {
    pub fn new(evaluator: E) -> Self {
        Self { evaluator }
    }
}

impl<S, E> MoveOrdering<S> for EvaluatorOrdering<E>
where
    S: GameState,
    E: Evaluator<S>,
{
    fn priority(&self, state: &S, action: &S::Action, perspective: S::Participant) -> f64 {
        let next = state.successor(action);
        match next.outcome(perspective) {
            Some(outcome) => terminal_score(outcome),
            None => self.evaluator.score(&next, perspective),
        }
    }
}

/// Sort `actions` best-first for the side to move.
///
/// At a maximizing node the highest priority comes first, at a minimizing node
/// the lowest. The sort is stable: equal priorities keep the game's order.
pub fn order_actions<S, M>(
    ordering: &M,
    state: &S,
    actions: &mut [S::Action],
    perspective: S::Participant,
    maximizing: bool,
) where
    S: GameState,
    M: MoveOrdering<S> + ?Sized,
{
    if actions.len() < 2 {
        return;
    }
    let mut keyed: Vec<(f64, S::Action)> = actions
        .iter()
        .map(|a| (ordering.priority(state, a, perspective), a.clone()))
        .collect();
    keyed.sort_by(|(pa, _), (pb, _)| {
        let ord = pa.partial_cmp(pb).unwrap_or(Ordering::Equal);
        if maximizing {
            ord.reverse()
        } else {
            ord
        }
    });
    for (slot, (_, action)) in actions.iter_mut().zip(keyed) {
        *slot = action;
    }
}
