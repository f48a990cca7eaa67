//! MCTS tree node representation.
//!
//! Each node represents a game state reached by taking an action from the parent.
//! Nodes store visit statistics used for UCB1 selection and final move choice.

use engine_core::{GameState, SearchError};

/// Index into the node arena. Using a newtype for type safety.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(pub u32);

impl NodeId {
    pub const NONE: NodeId = NodeId(u32::MAX);

    /// Id for arena slot `index`. `u32::MAX` is reserved for [`NodeId::NONE`].
    pub fn from_index(index: usize) -> Result<Self, SearchError> {
        match u32::try_from(index) {
            Ok(raw) if raw != u32::MAX => Ok(NodeId(raw)),
            _ => Err(SearchError::contract(format!(
                "tree arena is full: node index {index} does not fit a NodeId"
            ))),
        }
    }

    pub fn is_none(self) -> bool {
        self == Self::NONE
    }

    pub fn is_some(self) -> bool {
        !self.is_none()
    }
}

/// A node in the MCTS tree.
#[derive(Debug, Clone)]
pub struct MctsNode<S: GameState> {
    /// Parent node index (NONE for root)
    pub parent: NodeId,

    /// Action that led to this node from parent (None for root)
    pub action: Option<S::Action>,

    /// Participant who chose `action` (None for root)
    pub mover: Option<S::Participant>,

    /// Game state at this node
    pub state: S,

    /// Number of times this node has been visited
    pub visit_count: u32,

    /// Sum of rewards backpropagated through this node.
    /// Q = value_sum / visit_count
    pub value_sum: f64,

    /// Whether this is a terminal state (game over)
    pub is_terminal: bool,

    /// Nature's move distribution when this is a chance node
    pub chance: Option<Vec<(S::Action, f64)>>,

    /// Legal actions without a child yet. Always empty at chance nodes.
    pub untried: Vec<S::Action>,

    /// Expanded children, in expansion order.
    pub children: Vec<NodeId>,
}

impl<S: GameState> MctsNode<S> {
    /// Create a new root node.
    pub fn new_root(state: S) -> Result<Self, SearchError> {
        Self::build(NodeId::NONE, None, None, state)
    }

    /// Create a new child node.
    pub fn new_child(
        parent: NodeId,
        action: S::Action,
        mover: S::Participant,
        state: S,
    ) -> Result<Self, SearchError> {
        Self::build(parent, Some(action), Some(mover), state)
    }

    fn build(
        parent: NodeId,
        action: Option<S::Action>,
        mover: Option<S::Participant>,
        state: S,
    ) -> Result<Self, SearchError> {
        let is_terminal = state.is_terminal();
        let chance = if is_terminal {
            None
        } else {
            state.chance_distribution()
        };
        let untried = if is_terminal || chance.is_some() {
            Vec::new()
        } else {
            let legal = state.legal_actions();
            if legal.is_empty() {
                return Err(SearchError::contract(format!(
                    "non-terminal state has no legal actions: {state:?}"
                )));
            }
            legal
        };

        Ok(Self {
            parent,
            action,
            mover,
            state,
            visit_count: 0,
            value_sum: 0.0,
            is_terminal,
            chance,
            untried,
            children: Vec::new(),
        })
    }

    /// Calculate mean value Q = value_sum / visit_count.
    /// Returns 0.0 if never visited.
    #[inline]
    pub fn mean_value(&self) -> f64 {
        if self.visit_count == 0 {
            0.0
        } else {
            self.value_sum / self.visit_count as f64
        }
    }

    /// UCB1 score for child selection.
    /// UCB1 = Q + c * sqrt(2 * ln(N_parent) / N)
    ///
    /// An unvisited node scores +inf so it is tried before any visited sibling.
    ///
    /// Note: Takes pre-computed ln(parent_visits) to avoid redundant ln calls
    /// when comparing multiple children.
    #[inline]
    pub fn ucb_score(&self, parent_visits_ln: f64, exploration_weight: f64) -> f64 {
        if self.visit_count == 0 {
            return f64::INFINITY;
        }
        let n = self.visit_count as f64;
        self.mean_value() + exploration_weight * (2.0 * parent_visits_ln / n).sqrt()
    }

    #[inline]
    pub fn is_chance(&self) -> bool {
        self.chance.is_some()
    }

    /// Every legal action already has a child.
    #[inline]
    pub fn is_fully_expanded(&self) -> bool {
        self.untried.is_empty()
    }
}
