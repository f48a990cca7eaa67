//! Heuristic evaluation and the terminal score scale.
//!
//! The deterministic engines score positions on a single axis:
//!
//! ```text
//!  LOSS_SCORE  <  -EVAL_BOUND ..= 0 ..= EVAL_BOUND  <  WIN_SCORE
//! ```
//!
//! Heuristic scores are clamped into `[-EVAL_BOUND, EVAL_BOUND]`, so a heuristic
//! can never be mistaken for, or exceed, a proven result.

use crate::error::SearchError;
use crate::state::{GameState, Outcome};

/// Score of a proven win for the searching participant.
pub const WIN_SCORE: f64 = 1.0e9;

/// Score of a proven loss for the searching participant.
pub const LOSS_SCORE: f64 = -WIN_SCORE;

/// Score of a drawn terminal position.
pub const DRAW_SCORE: f64 = 0.0;

/// Largest magnitude a heuristic or continuous terminal score may take.
pub const EVAL_BOUND: f64 = 1.0e8;

/// Heuristic scoring function used when a search stops before a terminal state.
///
/// Implementations must be side-effect free and total. Closures of the form
/// `Fn(&S, S::Participant) -> f64` implement the trait directly.
pub trait Evaluator<S: GameState> {
    /// Score a non-terminal `state` from `participant`'s point of view.
    /// Higher is better for `participant`.
    fn score(&self, state: &S, participant: S::Participant) -> f64;
}

impl<S, F> Evaluator<S> for F
where
    S: GameState,
    F: Fn(&S, S::Participant) -> f64,
{
    fn score(&self, state: &S, participant: S::Participant) -> f64 {
        self(state, participant)
    }
}

/// Scores every position as even. Useful when only terminal results matter.
#[derive(Debug, Clone, Copy, Default)]
pub struct ZeroEvaluator;

impl<S: GameState> Evaluator<S> for ZeroEvaluator {
    fn score(&self, _state: &S, _participant: S::Participant) -> f64 {
        0.0
    }
}

/// Map a terminal outcome onto the sentinel scale.
pub fn terminal_score(outcome: Outcome) -> f64 {
    match outcome {
        Outcome::Win => WIN_SCORE,
        Outcome::Loss => LOSS_SCORE,
        Outcome::Draw => DRAW_SCORE,
        Outcome::Score(score) => score.clamp(-EVAL_BOUND, EVAL_BOUND),
    }
}

/// Run `evaluator` and clamp its output into the heuristic band.
///
/// A NaN score is reported as a contract violation instead of being allowed
/// to poison every comparison above it.
pub fn bounded_score<S, E>(
    evaluator: &E,
    state: &S,
    participant: S::Participant,
) -> Result<f64, SearchError>
where
    S: GameState,
    E: Evaluator<S> + ?Sized,
{
    let raw = evaluator.score(state, participant);
    if raw.is_nan() {
        return Err(SearchError::contract(format!(
            "evaluator returned NaN for {state:?}"
        )));
    }
    Ok(raw.clamp(-EVAL_BOUND, EVAL_BOUND))
}

/// Whether `score` is a proven win or loss rather than a heuristic value.
#[inline]
pub fn is_proven(score: f64) -> bool {
    score.abs() > EVAL_BOUND
}
