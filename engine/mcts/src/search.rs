//! MCTS search implementation.
//!
//! Each simulation runs four phases:
//! 1. Selection: descend through fully expanded nodes by UCB1, sampling
//!    nature's move at chance nodes
//! 2. Expansion: add one child for an untried action
//! 3. Rollout: play the new node out with the rollout policy
//! 4. Backpropagation: credit the playout reward along the path

use engine_core::{
    playout_reward, Cancellation, GameState, RolloutPolicy, SearchError, SearchResult,
    SearchStats,
};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha20Rng;
use tracing::{debug, trace};

use crate::config::{ExpansionOrder, MctsConfig, ValuePerspective};
use crate::node::NodeId;
use crate::rollout::sample_chance;
use crate::tree::MctsTree;

/// MCTS search state for one decision.
///
/// The tree lives as long as the search; calling [`MctsSearch::run`] again
/// keeps growing the same tree.
pub struct MctsSearch<'a, S: GameState, R: RolloutPolicy<S> + ?Sized> {
    tree: MctsTree<S>,
    rollout: &'a R,
    config: MctsConfig,
    root_participant: S::Participant,
}

impl<'a, S: GameState, R: RolloutPolicy<S> + ?Sized> MctsSearch<'a, S, R> {
    /// Create a new MCTS search from the given game state.
    pub fn new(root: &S, rollout: &'a R, config: MctsConfig) -> Result<Self, SearchError> {
        config.validate()?;
        if root.is_terminal() {
            return Err(SearchError::NoLegalActions);
        }
        if root.chance_distribution().is_some() {
            return Err(SearchError::contract(
                "cannot choose an action for nature at a chance node",
            ));
        }

        Ok(Self {
            tree: MctsTree::new(root.clone())?,
            rollout,
            config,
            root_participant: root.acting_participant(),
        })
    }

    /// Run simulations until the budget is spent or `cancel` fires.
    ///
    /// The first simulation always completes, so a cancelled search still
    /// returns a visited root child.
    pub fn run(
        &mut self,
        rng: &mut ChaCha20Rng,
        cancel: &Cancellation,
    ) -> Result<SearchResult<S::Action>, SearchError> {
        let root_id = self.tree.root();

        // Only one move: play it without searching
        let root = self.tree.get(root_id);
        if root.children.is_empty() && root.untried.len() == 1 {
            let action = root.untried[0].clone();
            let next = root.state.successor(&action);
            let value = if next.is_terminal() {
                playout_reward(&next, self.root_participant)
            } else {
                0.0
            };
            return Ok(SearchResult::new(
                Some(action),
                value,
                SearchStats {
                    nodes: 1,
                    ..Default::default()
                },
            ));
        }

        let mut stats = SearchStats::default();
        for i in 0..self.config.simulation_budget {
            if i > 0 && cancel.should_stop() {
                stats.cancelled = true;
                break;
            }
            self.simulate(rng)?;
            stats.simulations += 1;
        }

        let best = self
            .tree
            .best_child(self.config.final_selection)
            .ok_or_else(|| SearchError::contract("no root child was visited"))?;
        let best_node = self.tree.get(best);
        stats.nodes = self.tree.len() as u64;

        debug!(
            simulations = stats.simulations,
            nodes = stats.nodes,
            visits = best_node.visit_count,
            value = best_node.mean_value(),
            cancelled = stats.cancelled,
            "MCTS search complete"
        );

        Ok(SearchResult::new(
            best_node.action.clone(),
            best_node.mean_value(),
            stats,
        ))
    }

    /// Run a single simulation (select -> expand -> rollout -> backpropagate).
    fn simulate(&mut self, rng: &mut ChaCha20Rng) -> Result<(), SearchError> {
        let leaf_id = self.select_and_expand(rng)?;

        let leaf_state = self.tree.get(leaf_id).state.clone();
        let final_state = self.rollout.play_out(leaf_state, rng)?;

        let root_participant = self.root_participant;
        let reward = match self.config.value_perspective {
            ValuePerspective::Root => {
                let reward = playout_reward(&final_state, root_participant);
                self.tree.backpropagate(leaf_id, reward);
                reward
            }
            ValuePerspective::Mover => {
                self.tree.backpropagate_with(leaf_id, |node| {
                    playout_reward(&final_state, node.mover.unwrap_or(root_participant))
                });
                playout_reward(&final_state, root_participant)
            }
        };

        trace!(
            leaf = leaf_id.0,
            terminal = final_state.is_terminal(),
            reward,
            "MCTS simulation complete"
        );

        Ok(())
    }

    /// Walk down from the root and return the node the rollout starts from:
    /// a freshly expanded child or a terminal node.
    fn select_and_expand(&mut self, rng: &mut ChaCha20Rng) -> Result<NodeId, SearchError> {
        let mut current = self.tree.root();

        loop {
            let node = self.tree.get(current);
            if node.is_terminal {
                return Ok(current);
            }

            // Chance node: nature picks, the seeded rng decides
            if let Some(distribution) = &node.chance {
                let action = sample_chance(&node.state, distribution, rng)?;
                match self.tree.find_child(current, &action) {
                    Some(child) => {
                        current = child;
                        continue;
                    }
                    None => {
                        let mover = node.state.acting_participant();
                        let state = node.state.successor(&action);
                        return self.tree.add_child(current, action, mover, state);
                    }
                }
            }

            if !node.is_fully_expanded() {
                return self.expand(current, rng);
            }

            match self.tree.select_child(current, self.config.exploration_weight) {
                Some(child) => current = child,
                None => return Ok(current),
            }
        }
    }

    /// Expand one untried action of `node_id`.
    fn expand(&mut self, node_id: NodeId, rng: &mut ChaCha20Rng) -> Result<NodeId, SearchError> {
        let node = self.tree.get_mut(node_id);
        let action = match self.config.expansion_order {
            ExpansionOrder::Random => {
                let idx = rng.gen_range(0..node.untried.len());
                node.untried.swap_remove(idx)
            }
            ExpansionOrder::InOrder => node.untried.remove(0),
        };
        let mover = node.state.acting_participant();
        let state = node.state.successor(&action);
        self.tree.add_child(node_id, action, mover, state)
    }

    /// Get the search tree (for inspection/debugging).
    pub fn tree(&self) -> &MctsTree<S> {
        &self.tree
    }

    pub fn config(&self) -> &MctsConfig {
        &self.config
    }
}

/// Convenience function to run a single MCTS search seeded from the config.
pub fn run_mcts<S, R>(
    root: &S,
    rollout: &R,
    config: MctsConfig,
    cancel: &Cancellation,
) -> Result<SearchResult<S::Action>, SearchError>
where
    S: GameState,
    R: RolloutPolicy<S> + ?Sized,
{
    let mut rng = ChaCha20Rng::seed_from_u64(config.rng_seed);
    let mut search = MctsSearch::new(root, rollout, config)?;
    search.run(&mut rng, cancel)
}
