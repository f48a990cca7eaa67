//! Configuration for a `choose_action` call.

use std::time::Duration;

use alphabeta::{AlphaBetaConfig, TieBreak};
use engine_core::{Cancellation, SearchError};
use mcts::{ExpansionOrder, FinalSelection, MctsConfig, RandomRollout, ValuePerspective};

use crate::algorithm::Algorithm;

/// Every knob of every engine in one place.
///
/// Fields an algorithm does not use are ignored by it, but still validated.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchConfig {
    pub algorithm: Algorithm,

    /// Depth bound for the deterministic searches, in plies.
    pub max_depth: u32,

    /// Simulations per call for the Monte-Carlo engines.
    pub simulation_budget: u32,

    /// UCB1 exploration constant.
    pub exploration_weight: f64,

    /// Seed for tie-breaking, expansion and rollouts.
    pub rng_seed: u64,

    /// Wall-clock cap, checked between deepening iterations and between
    /// simulations.
    pub time_budget: Option<Duration>,

    pub use_cache: bool,

    /// Transposition cache size limit; `None` is unlimited.
    pub cache_capacity: Option<usize>,

    /// Keep the transposition cache between calls on the same engine.
    pub persist_cache: bool,

    pub tie_break: TieBreak,

    pub final_selection: FinalSelection,

    pub value_perspective: ValuePerspective,

    pub expansion_order: ExpansionOrder,

    /// Truncate rollouts after this many moves; `None` plays to the end.
    pub rollout_max_steps: Option<u32>,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            algorithm: Algorithm::AlphaBeta,
            max_depth: 6,
            simulation_budget: 1000,
            exploration_weight: 1.0,
            rng_seed: 0,
            time_budget: None,
            use_cache: true,
            cache_capacity: None,
            persist_cache: false,
            tie_break: TieBreak::First,
            final_selection: FinalSelection::MostVisited,
            value_perspective: ValuePerspective::Root,
            expansion_order: ExpansionOrder::Random,
            rollout_max_steps: None,
        }
    }
}

impl SearchConfig {
    pub fn new(algorithm: Algorithm) -> Self {
        Self {
            algorithm,
            ..Self::default()
        }
    }

    pub fn with_algorithm(mut self, algorithm: Algorithm) -> Self {
        self.algorithm = algorithm;
        self
    }

    pub fn with_max_depth(mut self, depth: u32) -> Self {
        self.max_depth = depth;
        self
    }

    pub fn with_simulations(mut self, n: u32) -> Self {
        self.simulation_budget = n;
        self
    }

    pub fn with_exploration_weight(mut self, c: f64) -> Self {
        self.exploration_weight = c;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng_seed = seed;
        self
    }

    pub fn with_time_budget(mut self, budget: Option<Duration>) -> Self {
        self.time_budget = budget;
        self
    }

    pub fn with_cache(mut self, enabled: bool) -> Self {
        self.use_cache = enabled;
        self
    }

    pub fn with_cache_capacity(mut self, capacity: Option<usize>) -> Self {
        self.cache_capacity = capacity;
        self
    }

    pub fn with_persist_cache(mut self, persist: bool) -> Self {
        self.persist_cache = persist;
        self
    }

    pub fn with_tie_break(mut self, tie_break: TieBreak) -> Self {
        self.tie_break = tie_break;
        self
    }

    pub fn with_final_selection(mut self, selection: FinalSelection) -> Self {
        self.final_selection = selection;
        self
    }

    pub fn with_value_perspective(mut self, perspective: ValuePerspective) -> Self {
        self.value_perspective = perspective;
        self
    }

    pub fn with_expansion_order(mut self, order: ExpansionOrder) -> Self {
        self.expansion_order = order;
        self
    }

    pub fn with_rollout_max_steps(mut self, max_steps: Option<u32>) -> Self {
        self.rollout_max_steps = max_steps;
        self
    }

    /// Reject settings no search can run with, before any work starts.
    pub fn validate(&self) -> Result<(), SearchError> {
        if self.max_depth == 0 {
            return Err(SearchError::invalid_config("max depth must be positive"));
        }
        if self.simulation_budget == 0 {
            return Err(SearchError::invalid_config(
                "simulation budget must be positive",
            ));
        }
        if !self.exploration_weight.is_finite() || self.exploration_weight < 0.0 {
            return Err(SearchError::invalid_config(format!(
                "exploration weight must be finite and non-negative, got {}",
                self.exploration_weight
            )));
        }
        if self.time_budget == Some(Duration::ZERO) {
            return Err(SearchError::invalid_config("time budget must be positive"));
        }
        if self.cache_capacity == Some(0) {
            return Err(SearchError::invalid_config(
                "cache capacity must be positive or unlimited",
            ));
        }
        if self.rollout_max_steps == Some(0) {
            return Err(SearchError::invalid_config(
                "rollout step limit must be positive or unlimited",
            ));
        }
        Ok(())
    }

    /// Settings for the alpha-beta family.
    pub fn alpha_beta(&self) -> AlphaBetaConfig {
        AlphaBetaConfig::default()
            .with_max_depth(self.max_depth)
            .with_tie_break(self.tie_break)
            .with_seed(self.rng_seed)
            .with_cache(self.use_cache)
            .with_cache_capacity(self.cache_capacity)
            .with_persist_cache(self.persist_cache)
    }

    /// Settings for tree search.
    pub fn mcts(&self) -> MctsConfig {
        MctsConfig::default()
            .with_simulations(self.simulation_budget)
            .with_exploration_weight(self.exploration_weight)
            .with_seed(self.rng_seed)
            .with_final_selection(self.final_selection)
            .with_value_perspective(self.value_perspective)
            .with_expansion_order(self.expansion_order)
    }

    /// The default rollout policy for the Monte-Carlo engines.
    pub fn rollout(&self) -> RandomRollout {
        RandomRollout::new().with_max_steps(self.rollout_max_steps)
    }

    /// Cancellation starting now, from the time budget.
    pub fn cancellation(&self) -> Cancellation {
        Cancellation::from_budget(self.time_budget)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = SearchConfig::default();
        assert_eq!(config.algorithm, Algorithm::AlphaBeta);
        assert_eq!(config.max_depth, 6);
        assert_eq!(config.simulation_budget, 1000);
        assert!(config.time_budget.is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_builder_pattern() {
        let config = SearchConfig::new(Algorithm::Mcts)
            .with_simulations(64)
            .with_exploration_weight(0.7)
            .with_seed(9)
            .with_final_selection(FinalSelection::HighestMean);

        let mcts = config.mcts();
        assert_eq!(mcts.simulation_budget, 64);
        assert!((mcts.exploration_weight - 0.7).abs() < 1e-12);
        assert_eq!(mcts.rng_seed, 9);
        assert_eq!(mcts.final_selection, FinalSelection::HighestMean);
    }

    #[test]
    fn test_alpha_beta_projection() {
        let config = SearchConfig::default()
            .with_max_depth(4)
            .with_tie_break(TieBreak::Random)
            .with_cache_capacity(Some(128))
            .with_persist_cache(true);

        let ab = config.alpha_beta();
        assert_eq!(ab.max_depth, 4);
        assert_eq!(ab.tie_break, TieBreak::Random);
        assert_eq!(ab.cache_capacity, Some(128));
        assert!(ab.persist_cache);
        assert!(ab.use_cache);
    }

    #[test]
    fn test_invalid_configs() {
        for config in [
            SearchConfig::default().with_max_depth(0),
            SearchConfig::default().with_simulations(0),
            SearchConfig::default().with_exploration_weight(-1.0),
            SearchConfig::default().with_exploration_weight(f64::NAN),
            SearchConfig::default().with_time_budget(Some(Duration::ZERO)),
            SearchConfig::default().with_cache_capacity(Some(0)),
            SearchConfig::default().with_rollout_max_steps(Some(0)),
        ] {
            assert!(
                matches!(config.validate(), Err(SearchError::InvalidConfig(_))),
                "{config:?} should be rejected"
            );
        }
    }
}
