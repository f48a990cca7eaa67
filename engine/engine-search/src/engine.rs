//! The `choose_action` facade.

use alphabeta::{AlphaBetaSearch, CacheStats, ExpectimaxSearch, IterativeDeepening};
use engine_core::{
    Evaluator, GameState, MoveOrdering, NoOrdering, OpponentModel, RolloutPolicy, SearchError,
    SearchResult, UniformOpponent,
};
use mcts::{run_mcts, FlatMonteCarlo};
use tracing::debug;

use crate::algorithm::Algorithm;
use crate::config::SearchConfig;

type BoxedRollout<S> = Box<dyn RolloutPolicy<S> + Send + Sync>;

/// A configured engine for one game type.
///
/// Holds the strategy objects every algorithm draws from and, for the
/// alpha-beta family, the searcher whose transposition cache may persist
/// between calls.
pub struct SearchEngine<S: GameState, E, M = NoOrdering, O = UniformOpponent> {
    config: SearchConfig,
    evaluator: E,
    ordering: M,
    opponent: O,
    rollout: Option<BoxedRollout<S>>,
    searcher: Option<AlphaBetaSearch<S, E, M>>,
}

impl<S, E> SearchEngine<S, E>
where
    S: GameState,
    E: Evaluator<S> + Clone,
{
    /// Create an engine after validating `config`.
    pub fn new(evaluator: E, config: SearchConfig) -> Result<Self, SearchError> {
        config.validate()?;
        Ok(Self {
            config,
            evaluator,
            ordering: NoOrdering,
            opponent: UniformOpponent,
            rollout: None,
            searcher: None,
        })
    }
}

impl<S, E, M, O> SearchEngine<S, E, M, O>
where
    S: GameState,
    E: Evaluator<S> + Clone,
    M: MoveOrdering<S> + Clone,
    O: OpponentModel<S> + Clone,
{
    /// Replace the move ordering used by the alpha-beta family.
    pub fn with_ordering<M2>(self, ordering: M2) -> SearchEngine<S, E, M2, O>
    where
        M2: MoveOrdering<S> + Clone,
    {
        SearchEngine {
            config: self.config,
            evaluator: self.evaluator,
            ordering,
            opponent: self.opponent,
            rollout: self.rollout,
            searcher: None,
        }
    }

    /// Replace the opponent model used by expectimax.
    pub fn with_opponent_model<O2>(self, opponent: O2) -> SearchEngine<S, E, M, O2>
    where
        O2: OpponentModel<S> + Clone,
    {
        SearchEngine {
            config: self.config,
            evaluator: self.evaluator,
            ordering: self.ordering,
            opponent,
            rollout: self.rollout,
            searcher: self.searcher,
        }
    }

    /// Replace the random rollout of the Monte-Carlo engines.
    pub fn with_rollout<R>(mut self, rollout: R) -> Self
    where
        R: RolloutPolicy<S> + Send + Sync + 'static,
    {
        self.rollout = Some(Box::new(rollout));
        self
    }

    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    /// Swap in a new configuration. Drops any persisted cache.
    pub fn set_config(&mut self, config: SearchConfig) -> Result<(), SearchError> {
        config.validate()?;
        self.config = config;
        self.searcher = None;
        Ok(())
    }

    pub fn opponent_model(&self) -> &O {
        &self.opponent
    }

    /// Mutable access, e.g. to record observed opponent moves.
    pub fn opponent_model_mut(&mut self) -> &mut O {
        &mut self.opponent
    }

    /// Transposition cache counters, once an alpha-beta search has run.
    pub fn cache_stats(&self) -> Option<CacheStats> {
        self.searcher.as_ref().map(|searcher| searcher.cache_stats())
    }

    /// Pick an action for the participant to move in `state`.
    ///
    /// `state` is never mutated; calling this twice on equal states with the
    /// same configuration returns the same result.
    pub fn choose_action(&mut self, state: &S) -> Result<SearchResult<S::Action>, SearchError> {
        let cancel = self.config.cancellation();

        let result = match self.config.algorithm {
            Algorithm::AlphaBeta => self.searcher().search(state),
            Algorithm::IterativeDeepening => {
                let mut driver = IterativeDeepening::new(self.take_searcher());
                let result = driver.search(state, &cancel);
                self.searcher = Some(driver.into_inner());
                result
            }
            Algorithm::Expectimax => ExpectimaxSearch::new(self.evaluator.clone(), self.config.max_depth)
                .with_opponent_model(self.opponent.clone())
                .search(state),
            Algorithm::Mcts => match &self.rollout {
                Some(rollout) => run_mcts(state, rollout.as_ref(), self.config.mcts(), &cancel),
                None => run_mcts(state, &self.config.rollout(), self.config.mcts(), &cancel),
            },
            Algorithm::FlatMonteCarlo => {
                let flat = FlatMonteCarlo::new(self.config.simulation_budget)
                    .with_seed(self.config.rng_seed);
                match &self.rollout {
                    Some(rollout) => flat.search(state, rollout.as_ref(), &cancel),
                    None => flat.search(state, &self.config.rollout(), &cancel),
                }
            }
        }?;

        debug!(
            algorithm = %self.config.algorithm,
            action = ?result.action,
            value = result.value,
            nodes = result.stats.nodes,
            simulations = result.stats.simulations,
            cancelled = result.stats.cancelled,
            "action chosen"
        );
        Ok(result)
    }

    fn searcher(&mut self) -> &mut AlphaBetaSearch<S, E, M> {
        let config = &self.config;
        let evaluator = &self.evaluator;
        let ordering = &self.ordering;
        self.searcher.get_or_insert_with(|| {
            AlphaBetaSearch::new(evaluator.clone(), config.alpha_beta())
                .with_ordering(ordering.clone())
        })
    }

    fn take_searcher(&mut self) -> AlphaBetaSearch<S, E, M> {
        match self.searcher.take() {
            Some(searcher) => searcher,
            None => AlphaBetaSearch::new(self.evaluator.clone(), self.config.alpha_beta())
                .with_ordering(self.ordering.clone()),
        }
    }
}

/// One-shot search: build an engine for `config` and choose an action.
///
/// Use [`SearchEngine`] directly to keep a transposition cache between calls
/// or to plug in move ordering, rollout and opponent models.
pub fn choose_action<S, E>(
    state: &S,
    evaluator: E,
    config: &SearchConfig,
) -> Result<SearchResult<S::Action>, SearchError>
where
    S: GameState,
    E: Evaluator<S> + Clone,
{
    SearchEngine::new(evaluator, config.clone())?.choose_action(state)
}
