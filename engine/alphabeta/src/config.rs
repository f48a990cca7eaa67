//! Alpha-beta configuration parameters.

use engine_core::SearchError;

/// How the root chooses between actions of equal value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TieBreak {
    /// First action after move ordering wins.
    #[default]
    First,
    /// Uniform choice among the tied root actions, drawn from the seeded RNG.
    Random,
}

impl std::str::FromStr for TieBreak {
    type Err = SearchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "first" => Ok(TieBreak::First),
            "random" => Ok(TieBreak::Random),
            other => Err(SearchError::invalid_config(format!(
                "unknown tie-break '{other}', expected first or random"
            ))),
        }
    }
}

/// Configuration for the deterministic searches.
#[derive(Debug, Clone)]
pub struct AlphaBetaConfig {
    /// Search depth in plies. A depth of 0 is searched as depth 1.
    pub max_depth: u32,

    /// Root tie-break rule.
    pub tie_break: TieBreak,

    /// Seed for the tie-break RNG.
    pub rng_seed: u64,

    /// Whether to memoize subtree values at all.
    pub use_cache: bool,

    /// Maximum number of cache entries; `None` is unlimited.
    pub cache_capacity: Option<usize>,

    /// Keep the cache between calls while the searching participant is
    /// unchanged.
    pub persist_cache: bool,
}

impl Default for AlphaBetaConfig {
    fn default() -> Self {
        Self {
            max_depth: 6,
            tie_break: TieBreak::First,
            rng_seed: 0,
            use_cache: true,
            cache_capacity: None,
            persist_cache: false,
        }
    }
}

impl AlphaBetaConfig {
    /// Create a shallow config for testing.
    pub fn for_testing() -> Self {
        Self {
            max_depth: 3,
            ..Self::default()
        }
    }

    /// Builder pattern: set search depth.
    pub fn with_max_depth(mut self, depth: u32) -> Self {
        self.max_depth = depth;
        self
    }

    pub fn with_tie_break(mut self, tie_break: TieBreak) -> Self {
        self.tie_break = tie_break;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng_seed = seed;
        self
    }

    /// Builder pattern: enable or disable the transposition cache.
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

    /// Reject settings no search can run with.
    pub fn validate(&self) -> Result<(), SearchError> {
        if self.cache_capacity == Some(0) {
            return Err(SearchError::invalid_config(
                "cache capacity must be positive when set",
            ));
        }
        Ok(())
    }
}
