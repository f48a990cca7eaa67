//! MCTS configuration parameters.

use engine_core::SearchError;

/// How the final move is picked from the root's children.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FinalSelection {
    /// Robust child: the most visited root child.
    #[default]
    MostVisited,
    /// The root child with the highest mean reward.
    HighestMean,
}

/// Whose point of view node values are stored from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ValuePerspective {
    /// Every node accumulates rewards of the searching participant.
    #[default]
    Root,
    /// Each node accumulates rewards of the participant who moved into it,
    /// so every side picks the child that is best for itself.
    Mover,
}

/// Which untried action a node expands next.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExpansionOrder {
    /// Uniformly random among the untried actions.
    #[default]
    Random,
    /// The game's legal-action order.
    InOrder,
}

macro_rules! impl_from_str {
    ($ty:ident, $what:literal, { $($name:literal => $variant:ident),+ $(,)? }) => {
        impl std::str::FromStr for $ty {
            type Err = SearchError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s.trim().to_ascii_lowercase().as_str() {
                    $($name => Ok($ty::$variant),)+
                    other => Err(SearchError::invalid_config(format!(
                        concat!("unknown ", $what, " '{}', expected one of: ", $($name, " "),+),
                        other
                    ))),
                }
            }
        }
    };
}

impl_from_str!(FinalSelection, "final selection", {
    "most-visited" => MostVisited,
    "highest-mean" => HighestMean,
});

impl_from_str!(ValuePerspective, "value perspective", {
    "root" => Root,
    "mover" => Mover,
});

impl_from_str!(ExpansionOrder, "expansion order", {
    "random" => Random,
    "in-order" => InOrder,
});

/// Configuration for Monte Carlo Tree Search.
#[derive(Debug, Clone)]
pub struct MctsConfig {
    /// Number of simulations to run per search.
    pub simulation_budget: u32,

    /// Exploration constant `c` in UCB1 = Q + c * sqrt(2 ln N / n).
    /// Higher values encourage exploration, 0 is pure exploitation.
    pub exploration_weight: f64,

    /// Seed for expansion, chance sampling and rollouts.
    pub rng_seed: u64,

    pub final_selection: FinalSelection,

    pub value_perspective: ValuePerspective,

    pub expansion_order: ExpansionOrder,
}

impl Default for MctsConfig {
    fn default() -> Self {
        Self {
            simulation_budget: 1000,
            exploration_weight: 1.0,
            rng_seed: 0,
            final_selection: FinalSelection::MostVisited,
            value_perspective: ValuePerspective::Root,
            expansion_order: ExpansionOrder::Random,
        }
    }
}

impl MctsConfig {
    /// Create a fast config for testing.
    pub fn for_testing() -> Self {
        Self {
            simulation_budget: 200,
            ..Self::default()
        }
    }

    /// Builder pattern: set number of simulations.
    pub fn with_simulations(mut self, n: u32) -> Self {
        self.simulation_budget = n;
        self
    }

    /// Builder pattern: set UCB1 exploration constant.
    pub fn with_exploration_weight(mut self, c: f64) -> Self {
        self.exploration_weight = c;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng_seed = seed;
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

    /// Reject settings no search can run with.
    pub fn validate(&self) -> Result<(), SearchError> {
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
        Ok(())
    }
}
