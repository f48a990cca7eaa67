//! Depth-limited alpha-beta search.
//!
//! Values are always measured from the searching (root) participant's point
//! of view: nodes where that participant acts maximize, every other node
//! minimizes. Terminal states map onto the sentinel scale and horizon states
//! onto the clamped evaluator band, so a proven result always dominates a
//! heuristic one.

use std::marker::PhantomData;

use engine_core::{
    bounded_score, order_actions, terminal_score, Evaluator, GameState, MoveOrdering,
    NoOrdering, SearchError, SearchResult, SearchStats,
};
use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;
use tracing::debug;

use crate::config::{AlphaBetaConfig, TieBreak};
use crate::tt::{CacheStats, TranspositionCache, TranspositionKey};

/// Per-call bookkeeping threaded through the recursion.
struct Frame<P> {
    perspective: P,
    nodes: u64,
    cache_hits: u64,
}

/// Alpha-beta searcher with a transposition cache.
///
/// The cache lives in the searcher. It is cleared at the start of every
/// [`search`](Self::search) call unless `persist_cache` is set, in which case
/// it is only cleared when the searching participant changes.
pub struct AlphaBetaSearch<S: GameState, E, M = NoOrdering> {
    evaluator: E,
    ordering: M,
    config: AlphaBetaConfig,
    cache: TranspositionCache,
    cache_perspective: Option<S::Participant>,
    _state: PhantomData<fn(&S)>,
}

impl<S, E> AlphaBetaSearch<S, E, NoOrdering>
where
    S: GameState,
    E: Evaluator<S>,
{
    pub fn new(evaluator: E, config: AlphaBetaConfig) -> Self {
        Self {
            evaluator,
            ordering: NoOrdering,
            cache: TranspositionCache::with_capacity(config.cache_capacity),
            config,
            cache_perspective: None,
            _state: PhantomData,
        }
    }
}

impl<S, E, M> AlphaBetaSearch<S, E, M>
where
    S: GameState,
    E: Evaluator<S>,
    M: MoveOrdering<S>,
{
    /// Replace the move ordering policy.
    pub fn with_ordering<M2: MoveOrdering<S>>(self, ordering: M2) -> AlphaBetaSearch<S, E, M2> {
        AlphaBetaSearch {
            evaluator: self.evaluator,
            ordering,
            config: self.config,
            cache: self.cache,
            cache_perspective: self.cache_perspective,
            _state: PhantomData,
        }
    }

    pub fn config(&self) -> &AlphaBetaConfig {
        &self.config
    }

    pub fn cache(&self) -> &TranspositionCache {
        &self.cache
    }

    pub fn cache_stats(&self) -> CacheStats {
        self.cache.stats()
    }

    /// Search `root` to the configured depth.
    pub fn search(&mut self, root: &S) -> Result<SearchResult<S::Action>, SearchError> {
        self.config.validate()?;
        self.prepare_cache(root.acting_participant());
        let mut rng = ChaCha20Rng::seed_from_u64(self.config.rng_seed);
        let result = self.search_root(root, self.config.max_depth, &mut rng)?;

        debug!(
            depth = result.stats.completed_depth,
            value = result.value,
            nodes = result.stats.nodes,
            cache_hits = result.stats.cache_hits,
            "alpha-beta search complete"
        );
        Ok(result)
    }

    /// Clear the cache for a new call, honouring persistence.
    pub(crate) fn prepare_cache(&mut self, perspective: S::Participant) {
        if !self.config.persist_cache || self.cache_perspective != Some(perspective) {
            self.cache.clear();
        }
        self.cache_perspective = Some(perspective);
    }

    /// One complete search of `root` at `depth`, without touching the cache
    /// lifecycle.
    pub(crate) fn search_root(
        &mut self,
        root: &S,
        depth: u32,
        rng: &mut ChaCha20Rng,
    ) -> Result<SearchResult<S::Action>, SearchError> {
        if root.is_terminal() {
            return Err(SearchError::NoLegalActions);
        }
        if root.chance_distribution().is_some() {
            return Err(SearchError::contract(
                "alpha-beta cannot search from a chance node, use expectimax",
            ));
        }
        let mut actions = root.legal_actions();
        if actions.is_empty() {
            return Err(SearchError::contract(format!(
                "non-terminal state has no legal actions: {root:?}"
            )));
        }

        let depth = depth.max(1);
        let mut frame = Frame {
            perspective: root.acting_participant(),
            nodes: 1,
            cache_hits: 0,
        };

        if actions.len() == 1 {
            let child = root.successor(&actions[0]);
            frame.nodes += 1;
            let value = self.leaf_value(&child, frame.perspective)?;
            return Ok(SearchResult::new(
                actions.pop(),
                value,
                SearchStats {
                    nodes: frame.nodes,
                    completed_depth: 1,
                    ..SearchStats::default()
                },
            ));
        }

        order_actions(&self.ordering, root, &mut actions, frame.perspective, true);

        let random_ties = self.config.tie_break == TieBreak::Random;
        let beta = f64::INFINITY;
        let mut alpha = f64::NEG_INFINITY;
        let mut best_value = f64::NEG_INFINITY;
        let mut best: Vec<usize> = Vec::new();

        for (idx, action) in actions.iter().enumerate() {
            let child = root.successor(action);
            // Random tie-breaking needs exact values for every root child, so
            // the window is only narrowed when the first action wins ties.
            let window_alpha = if random_ties { f64::NEG_INFINITY } else { alpha };
            let value = self.value(&child, depth - 1, window_alpha, beta, &mut frame)?;

            if value > best_value {
                best_value = value;
                best.clear();
                best.push(idx);
            } else if random_ties && value == best_value {
                best.push(idx);
            }
            alpha = alpha.max(best_value);
        }

        let chosen = if random_ties {
            best.choose(rng).copied()
        } else {
            best.first().copied()
        };
        let action = chosen.map(|idx| actions[idx].clone());

        Ok(SearchResult::new(
            action,
            best_value,
            SearchStats {
                nodes: frame.nodes,
                completed_depth: depth,
                cache_hits: frame.cache_hits,
                ..SearchStats::default()
            },
        ))
    }

    /// Terminal sentinel or clamped evaluator score of `state`.
    fn leaf_value(&self, state: &S, perspective: S::Participant) -> Result<f64, SearchError> {
        if state.is_terminal() {
            terminal_value(state, perspective)
        } else {
            bounded_score(&self.evaluator, state, perspective)
        }
    }

    /// Fail-soft minimax value of `state` with `depth` plies remaining.
    fn value(
        &mut self,
        state: &S,
        depth: u32,
        mut alpha: f64,
        mut beta: f64,
        frame: &mut Frame<S::Participant>,
    ) -> Result<f64, SearchError> {
        frame.nodes += 1;

        if state.is_terminal() {
            return terminal_value(state, frame.perspective);
        }
        if depth == 0 {
            return bounded_score(&self.evaluator, state, frame.perspective);
        }
        if state.chance_distribution().is_some() {
            return Err(SearchError::contract(
                "alpha-beta reached a chance node, use expectimax",
            ));
        }

        let maximizing = state.acting_participant() == frame.perspective;
        let key = TranspositionKey::new(state, depth, maximizing);
        if self.config.use_cache {
            if let Some(value) = self.cache.lookup(&key, alpha, beta) {
                frame.cache_hits += 1;
                return Ok(value);
            }
        }

        let mut actions = state.legal_actions();
        if actions.is_empty() {
            return Err(SearchError::contract(format!(
                "non-terminal state has no legal actions: {state:?}"
            )));
        }
        order_actions(&self.ordering, state, &mut actions, frame.perspective, maximizing);

        let (orig_alpha, orig_beta) = (alpha, beta);
        let mut best = if maximizing {
            f64::NEG_INFINITY
        } else {
            f64::INFINITY
        };

        for action in &actions {
            let child = state.successor(action);
            let value = self.value(&child, depth - 1, alpha, beta, frame)?;
            if maximizing {
                best = best.max(value);
                alpha = alpha.max(best);
            } else {
                best = best.min(value);
                beta = beta.min(best);
            }
            if alpha >= beta {
                break;
            }
        }

        if self.config.use_cache {
            self.cache.store(key, best, orig_alpha, orig_beta);
        }
        Ok(best)
    }
}

/// Sentinel value of a terminal state, or a contract error if it has no
/// outcome.
pub(crate) fn terminal_value<S: GameState>(
    state: &S,
    perspective: S::Participant,
) -> Result<f64, SearchError> {
    state
        .outcome(perspective)
        .map(terminal_score)
        .ok_or_else(|| SearchError::contract(format!("terminal state has no outcome: {state:?}")))
}

/// Convenience wrapper: search `root` once with a fresh searcher.
pub fn alpha_beta<S, E>(
    root: &S,
    evaluator: E,
    config: AlphaBetaConfig,
) -> Result<SearchResult<S::Action>, SearchError>
where
    S: GameState,
    E: Evaluator<S>,
{
    AlphaBetaSearch::new(evaluator, config).search(root)
}
