//! Flat Monte-Carlo sampling.
//!
//! No tree: every root action gets an equal share of the playouts, handed out
//! round-robin, and the action with the best mean reward wins.

use engine_core::{
    playout_reward, Cancellation, GameState, RolloutPolicy, SearchError, SearchResult,
    SearchStats,
};
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;
use tracing::{debug, trace};

/// Round-robin playout sampler over the root actions.
#[derive(Debug, Clone)]
pub struct FlatMonteCarlo {
    simulation_budget: u32,
    rng_seed: u64,
}

impl FlatMonteCarlo {
    pub fn new(simulation_budget: u32) -> Self {
        Self {
            simulation_budget,
            rng_seed: 0,
        }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng_seed = seed;
        self
    }

    pub fn simulation_budget(&self) -> u32 {
        self.simulation_budget
    }

    /// Sample `root` and return the action with the highest mean reward.
    ///
    /// Ties go to the earlier action in legal order. Cancellation is checked
    /// between playouts, after the first one.
    pub fn search<S, R>(
        &self,
        root: &S,
        rollout: &R,
        cancel: &Cancellation,
    ) -> Result<SearchResult<S::Action>, SearchError>
    where
        S: GameState,
        R: RolloutPolicy<S> + ?Sized,
    {
        if self.simulation_budget == 0 {
            return Err(SearchError::invalid_config(
                "simulation budget must be positive",
            ));
        }
        if root.is_terminal() {
            return Err(SearchError::NoLegalActions);
        }
        if root.chance_distribution().is_some() {
            return Err(SearchError::contract(
                "cannot choose an action for nature at a chance node",
            ));
        }
        let actions = root.legal_actions();
        if actions.is_empty() {
            return Err(SearchError::contract(format!(
                "non-terminal state has no legal actions: {root:?}"
            )));
        }

        let me = root.acting_participant();

        if actions.len() == 1 {
            let next = root.successor(&actions[0]);
            let value = if next.is_terminal() {
                playout_reward(&next, me)
            } else {
                0.0
            };
            let stats = SearchStats {
                nodes: 1,
                ..Default::default()
            };
            return Ok(SearchResult::new(actions.into_iter().next(), value, stats));
        }

        let mut rng = ChaCha20Rng::seed_from_u64(self.rng_seed);
        let mut sums = vec![0.0f64; actions.len()];
        let mut counts = vec![0u32; actions.len()];
        let mut stats = SearchStats::default();

        for i in 0..self.simulation_budget {
            if i > 0 && cancel.should_stop() {
                stats.cancelled = true;
                break;
            }
            let idx = i as usize % actions.len();
            let final_state = rollout.play_out(root.successor(&actions[idx]), &mut rng)?;
            let reward = playout_reward(&final_state, me);
            sums[idx] += reward;
            counts[idx] += 1;
            stats.simulations += 1;
            trace!(action = ?actions[idx], reward, "flat playout complete");
        }

        let mut best: Option<(usize, f64)> = None;
        for (idx, (&sum, &count)) in sums.iter().zip(&counts).enumerate() {
            if count == 0 {
                continue;
            }
            let mean = sum / count as f64;
            match best {
                Some((_, best_mean)) if mean <= best_mean => {}
                _ => best = Some((idx, mean)),
            }
        }
        let (idx, value) =
            best.ok_or_else(|| SearchError::contract("no root action was sampled"))?;
        stats.nodes = stats.simulations as u64;

        debug!(
            simulations = stats.simulations,
            action = ?actions[idx],
            value,
            cancelled = stats.cancelled,
            "flat Monte-Carlo search complete"
        );

        Ok(SearchResult::new(Some(actions[idx].clone()), value, stats))
    }
}
