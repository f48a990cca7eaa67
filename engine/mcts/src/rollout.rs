//! Rollout policies.
//!
//! Every policy resolves chance nodes by sampling the state's own
//! distribution and only differs in how it picks moves at decision nodes.

use rand::distributions::{Distribution, WeightedIndex};
use rand::Rng;
use rand_chacha::ChaCha20Rng;

use engine_core::{GameState, OpponentModel, RolloutPolicy, SearchError};

/// Index drawn with probability proportional to `weights`.
///
/// Returns `None` when no weight is positive and finite.
pub(crate) fn sample_weighted(weights: &[f64], rng: &mut ChaCha20Rng) -> Option<usize> {
    let cleaned: Vec<f64> = weights
        .iter()
        .map(|w| if w.is_finite() && *w > 0.0 { *w } else { 0.0 })
        .collect();
    WeightedIndex::new(&cleaned).ok().map(|dist| dist.sample(rng))
}

/// Sample nature's move at a chance node.
pub(crate) fn sample_chance<S: GameState>(
    state: &S,
    distribution: &[(S::Action, f64)],
    rng: &mut ChaCha20Rng,
) -> Result<S::Action, SearchError> {
    let weights: Vec<f64> = distribution.iter().map(|(_, p)| *p).collect();
    let idx = sample_weighted(&weights, rng).ok_or_else(|| {
        SearchError::contract(format!(
            "chance node has no outcome with positive probability: {state:?}"
        ))
    })?;
    Ok(distribution[idx].0.clone())
}

/// Shared playout loop: resolve chance nodes, let `pick` choose everything
/// else, stop at a terminal state or after `max_steps` moves.
fn play<S, F>(
    mut state: S,
    max_steps: Option<u32>,
    rng: &mut ChaCha20Rng,
    mut pick: F,
) -> Result<S, SearchError>
where
    S: GameState,
    F: FnMut(&S, Vec<S::Action>, &mut ChaCha20Rng) -> S::Action,
{
    let mut steps = 0u32;
    while !state.is_terminal() {
        if max_steps.is_some_and(|max| steps >= max) {
            break;
        }
        let action = if let Some(distribution) = state.chance_distribution() {
            sample_chance(&state, &distribution, rng)?
        } else {
            let actions = state.legal_actions();
            if actions.is_empty() {
                return Err(SearchError::contract(format!(
                    "non-terminal state has no legal actions: {state:?}"
                )));
            }
            pick(&state, actions, rng)
        };
        state.apply(&action);
        steps += 1;
    }
    Ok(state)
}

fn uniform<A>(mut actions: Vec<A>, rng: &mut ChaCha20Rng) -> A {
    let idx = rng.gen_range(0..actions.len());
    actions.swap_remove(idx)
}

/// Uniformly random legal moves.
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomRollout {
    max_steps: Option<u32>,
}

impl RandomRollout {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stop after `max_steps` moves; a truncated playout counts as neutral.
    pub fn with_max_steps(mut self, max_steps: Option<u32>) -> Self {
        self.max_steps = max_steps;
        self
    }
}

impl<S: GameState> RolloutPolicy<S> for RandomRollout {
    fn play_out(&self, state: S, rng: &mut ChaCha20Rng) -> Result<S, SearchError> {
        play(state, self.max_steps, rng, |_, actions, rng| uniform(actions, rng))
    }
}

/// Moves drawn with probability proportional to a weight function.
///
/// Useful for biasing playouts towards safe or promising moves. If every
/// weight is zero the move is uniform.
#[derive(Debug, Clone, Copy)]
pub struct WeightedRollout<F> {
    weight: F,
    max_steps: Option<u32>,
}

impl<F> WeightedRollout<F> {
    pub fn new(weight: F) -> Self {
        Self {
            weight,
            max_steps: None,
        }
    }

    pub fn with_max_steps(mut self, max_steps: Option<u32>) -> Self {
        self.max_steps = max_steps;
        self
    }
}

impl<S, F> RolloutPolicy<S> for WeightedRollout<F>
where
    S: GameState,
    F: Fn(&S, &S::Action) -> f64,
{
    fn play_out(&self, state: S, rng: &mut ChaCha20Rng) -> Result<S, SearchError> {
        play(state, self.max_steps, rng, |state, mut actions, rng| {
            let weights: Vec<f64> = actions.iter().map(|a| (self.weight)(state, a)).collect();
            match sample_weighted(&weights, rng) {
                Some(idx) => actions.swap_remove(idx),
                None => uniform(actions, rng),
            }
        })
    }
}

/// Other participants move according to an opponent model; `me` moves
/// uniformly.
#[derive(Debug, Clone)]
pub struct OpponentModelRollout<P, O> {
    me: P,
    model: O,
    max_steps: Option<u32>,
}

impl<P, O> OpponentModelRollout<P, O> {
    pub fn new(me: P, model: O) -> Self {
        Self {
            me,
            model,
            max_steps: None,
        }
    }

    pub fn with_max_steps(mut self, max_steps: Option<u32>) -> Self {
        self.max_steps = max_steps;
        self
    }

    pub fn model(&self) -> &O {
        &self.model
    }

    pub fn model_mut(&mut self) -> &mut O {
        &mut self.model
    }
}

impl<S, O> RolloutPolicy<S> for OpponentModelRollout<S::Participant, O>
where
    S: GameState,
    O: OpponentModel<S>,
{
    fn play_out(&self, state: S, rng: &mut ChaCha20Rng) -> Result<S, SearchError> {
        play(state, self.max_steps, rng, |state, mut actions, rng| {
            if state.acting_participant() == self.me {
                return uniform(actions, rng);
            }
            let probabilities = self.model.distribution(state, &actions);
            match sample_weighted(&probabilities, rng) {
                Some(idx) => actions.swap_remove(idx),
                None => uniform(actions, rng),
            }
        })
    }
}
