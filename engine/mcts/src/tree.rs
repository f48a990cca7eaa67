//! MCTS tree structure with arena allocation.
//!
//! The tree uses arena allocation for efficient node storage and
//! cache-friendly traversal. Nodes are stored in a contiguous Vec
//! and referenced by NodeId indices. Parent links are indices too, so
//! backpropagation walks up the arena without any shared ownership.

use engine_core::{GameState, SearchError};

use crate::config::FinalSelection;
use crate::node::{MctsNode, NodeId};

/// MCTS tree with arena-based node storage.
#[derive(Debug)]
pub struct MctsTree<S: GameState> {
    /// Arena storing all nodes
    nodes: Vec<MctsNode<S>>,

    /// Root node index (always 0 after initialization)
    root: NodeId,
}

impl<S: GameState> MctsTree<S> {
    /// Create a new tree rooted at `root_state`.
    pub fn new(root_state: S) -> Result<Self, SearchError> {
        let root_node = MctsNode::new_root(root_state)?;
        Ok(Self {
            nodes: vec![root_node],
            root: NodeId(0),
        })
    }

    /// Get the root node ID.
    #[inline]
    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Get a reference to a node by ID.
    #[inline]
    pub fn get(&self, id: NodeId) -> &MctsNode<S> {
        &self.nodes[id.0 as usize]
    }

    /// Get a mutable reference to a node by ID.
    #[inline]
    pub fn get_mut(&mut self, id: NodeId) -> &mut MctsNode<S> {
        &mut self.nodes[id.0 as usize]
    }

    /// Allocate a new node and return its ID.
    ///
    /// Fails once the arena would need an index that does not fit a `NodeId`.
    pub fn allocate(&mut self, node: MctsNode<S>) -> Result<NodeId, SearchError> {
        let id = NodeId::from_index(self.nodes.len())?;
        self.nodes.push(node);
        Ok(id)
    }

    /// Get the total number of nodes in the tree.
    #[inline]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Check if tree is empty (should never be true after construction).
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Get the arena slice for read access.
    #[inline]
    pub fn arena(&self) -> &[MctsNode<S>] {
        &self.nodes
    }

    /// Select the child of a node with the highest UCB1 score.
    ///
    /// Ties go to the earliest expanded child, so the first unvisited child
    /// is always taken before any other.
    pub fn select_child(&self, node_id: NodeId, exploration_weight: f64) -> Option<NodeId> {
        let node = self.get(node_id);
        // Pre-compute ln once instead of per-child comparison
        let parent_visits_ln = (node.visit_count.max(1) as f64).ln();

        first_max_by(&node.children, |id| {
            self.get(*id).ucb_score(parent_visits_ln, exploration_weight)
        })
    }

    /// Child of `parent_id` reached by `action`, if it has been expanded.
    pub fn find_child(&self, parent_id: NodeId, action: &S::Action) -> Option<NodeId> {
        self.get(parent_id)
            .children
            .iter()
            .copied()
            .find(|id| self.get(*id).action.as_ref() == Some(action))
    }

    /// Add a child to a parent node.
    /// Returns the new child's NodeId.
    pub fn add_child(
        &mut self,
        parent_id: NodeId,
        action: S::Action,
        mover: S::Participant,
        state: S,
    ) -> Result<NodeId, SearchError> {
        let child = MctsNode::new_child(parent_id, action, mover, state)?;
        let child_id = self.allocate(child)?;

        // Add to parent's children
        self.get_mut(parent_id).children.push(child_id);

        Ok(child_id)
    }

    /// Backpropagate the same value from a leaf to the root.
    pub fn backpropagate(&mut self, leaf_id: NodeId, value: f64) {
        self.backpropagate_with(leaf_id, |_| value);
    }

    /// Backpropagate from a leaf to the root, asking `value_for` how much each
    /// node on the path should be credited.
    pub fn backpropagate_with(
        &mut self,
        leaf_id: NodeId,
        mut value_for: impl FnMut(&MctsNode<S>) -> f64,
    ) {
        let mut current_id = leaf_id;

        while current_id.is_some() {
            let node = self.get_mut(current_id);
            let value = value_for(&*node);
            node.visit_count += 1;
            node.value_sum += value;
            current_id = node.parent;
        }
    }

    /// Pick the root child to play.
    ///
    /// Only visited children are candidates; ties go to the earliest expanded
    /// child.
    pub fn best_child(&self, selection: FinalSelection) -> Option<NodeId> {
        let visited: Vec<NodeId> = self
            .get(self.root)
            .children
            .iter()
            .copied()
            .filter(|id| self.get(*id).visit_count > 0)
            .collect();

        match selection {
            FinalSelection::MostVisited => {
                first_max_by(&visited, |id| self.get(*id).visit_count as f64)
            }
            FinalSelection::HighestMean => first_max_by(&visited, |id| self.get(*id).mean_value()),
        }
    }

    /// (action, visits, mean value) of every root child, in expansion order.
    pub fn root_summary(&self) -> Vec<(S::Action, u32, f64)> {
        self.get(self.root)
            .children
            .iter()
            .filter_map(|id| {
                let child = self.get(*id);
                child
                    .action
                    .clone()
                    .map(|action| (action, child.visit_count, child.mean_value()))
            })
            .collect()
    }

    /// Get statistics about the tree for debugging.
    pub fn stats(&self) -> TreeStats {
        let root = self.get(self.root);
        TreeStats {
            total_nodes: self.nodes.len(),
            root_visits: root.visit_count,
            root_value: root.mean_value(),
            max_depth: self.compute_max_depth(self.root, 0),
        }
    }

    fn compute_max_depth(&self, node_id: NodeId, current_depth: u32) -> u32 {
        let node = self.get(node_id);
        if node.children.is_empty() {
            return current_depth;
        }

        node.children
            .iter()
            .map(|id| self.compute_max_depth(*id, current_depth + 1))
            .max()
            .unwrap_or(current_depth)
    }
}

/// First element with the strictly greatest key.
///
/// `Iterator::max_by` keeps the last of several equal maxima; selection here
/// must keep the first.
fn first_max_by(ids: &[NodeId], key: impl Fn(&NodeId) -> f64) -> Option<NodeId> {
    let mut best: Option<(NodeId, f64)> = None;
    for id in ids {
        let score = key(id);
        match best {
            Some((_, best_score)) if score <= best_score => {}
            _ => best = Some((*id, score)),
        }
    }
    best.map(|(id, _)| id)
}

/// Statistics about an MCTS tree.
#[derive(Debug, Clone)]
pub struct TreeStats {
    pub total_nodes: usize,
    pub root_visits: u32,
    pub root_value: f64,
    pub max_depth: u32,
}
