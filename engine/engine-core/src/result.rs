//! Search results and statistics.

/// Decision returned by every engine.
///
/// `action` is `None` only when the root had no legal action to choose from.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchResult<A> {
    /// Chosen action
    pub action: Option<A>,

    /// Value of the chosen action from the searching participant's perspective.
    /// Alpha-beta and expectimax report sentinel-scaled scores, the Monte-Carlo
    /// engines report mean rewards.
    pub value: f64,

    /// Work counters for this call
    pub stats: SearchStats,
}

impl<A> SearchResult<A> {
    pub fn new(action: Option<A>, value: f64, stats: SearchStats) -> Self {
        Self {
            action,
            value,
            stats,
        }
    }

    /// Map the action type, keeping value and stats.
    pub fn map_action<B>(self, f: impl FnOnce(A) -> B) -> SearchResult<B> {
        SearchResult {
            action: self.action.map(f),
            value: self.value,
            stats: self.stats,
        }
    }
}

/// Counters describing how much work a search call did.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SearchStats {
    /// States visited by the deterministic searches
    pub nodes: u64,

    /// Deepest fully completed iteration (alpha-beta / expectimax)
    pub completed_depth: u32,

    /// Completed simulations (Monte-Carlo engines)
    pub simulations: u32,

    /// Transposition cache lookups that resolved a node without recursion
    pub cache_hits: u64,

    /// Search stopped at a cancellation point before its configured limit
    pub cancelled: bool,
}

impl SearchStats {
    /// Accumulate counters from a later iteration of the same search.
    pub fn absorb(&mut self, other: &SearchStats) {
        self.nodes += other.nodes;
        self.cache_hits += other.cache_hits;
        self.simulations += other.simulations;
        self.completed_depth = self.completed_depth.max(other.completed_depth);
        self.cancelled |= other.cancelled;
    }
}
