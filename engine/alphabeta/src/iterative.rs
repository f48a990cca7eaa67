//! Iterative deepening over [`AlphaBetaSearch`].
//!
//! Searches depth 1, 2, ... up to the configured depth, keeping the
//! transposition cache between iterations. Cancellation is checked only
//! between iterations and the first iteration always completes, so the
//! result is always a fully searched depth.

use engine_core::{
    Cancellation, Evaluator, GameState, MoveOrdering, NoOrdering, SearchError, SearchResult,
    SearchStats, WIN_SCORE,
};
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;
use tracing::debug;

use crate::search::AlphaBetaSearch;

/// Anytime driver around an alpha-beta searcher.
pub struct IterativeDeepening<S: GameState, E, M = NoOrdering> {
    search: AlphaBetaSearch<S, E, M>,
}

impl<S, E, M> IterativeDeepening<S, E, M>
where
    S: GameState,
    E: Evaluator<S>,
    M: MoveOrdering<S>,
{
    pub fn new(search: AlphaBetaSearch<S, E, M>) -> Self {
        Self { search }
    }

    pub fn inner(&self) -> &AlphaBetaSearch<S, E, M> {
        &self.search
    }

    pub fn into_inner(self) -> AlphaBetaSearch<S, E, M> {
        self.search
    }

    /// Deepen until the configured depth, a proven win, or cancellation.
    pub fn search(
        &mut self,
        root: &S,
        cancel: &Cancellation,
    ) -> Result<SearchResult<S::Action>, SearchError> {
        let config = self.search.config().clone();
        config.validate()?;
        self.search.prepare_cache(root.acting_participant());
        let mut rng = ChaCha20Rng::seed_from_u64(config.rng_seed);

        let single_action = root.legal_actions().len() == 1;
        let max_depth = config.max_depth.max(1);
        let mut stats = SearchStats::default();
        let mut best: Option<(S::Action, f64)> = None;

        for depth in 1..=max_depth {
            if depth > 1 && cancel.should_stop() {
                stats.cancelled = true;
                debug!(depth, "iterative deepening cancelled");
                break;
            }

            let result = self.search.search_root(root, depth, &mut rng)?;
            stats.absorb(&result.stats);

            let Some(action) = result.action else {
                debug!(depth, "iteration produced no action, keeping previous best");
                break;
            };
            debug!(
                depth,
                value = result.value,
                nodes = result.stats.nodes,
                action = ?action,
                "completed depth"
            );
            best = Some((action, result.value));

            if result.value >= WIN_SCORE || single_action {
                break;
            }
        }

        let (action, value) = best.ok_or_else(|| {
            SearchError::contract("iterative deepening finished without an action")
        })?;
        Ok(SearchResult::new(Some(action), value, stats))
    }
}
