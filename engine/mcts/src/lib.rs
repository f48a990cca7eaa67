//! Monte Carlo Tree Search (MCTS) over any `engine-core` game.
//!
//! # Overview
//!
//! MCTS builds a search tree by running simulations. Each simulation
//! consists of four phases:
//!
//! 1. **Selection**: descend through fully expanded nodes by UCB1
//!    (Upper Confidence Bound) to balance exploration and exploitation
//! 2. **Expansion**: add one child for one untried action
//! 3. **Rollout**: play the new state out with a [`RolloutPolicy`]
//! 4. **Backpropagation**: add the playout reward to every node on the path
//!    back to the root
//!
//! Chance nodes are never expanded by choice: selection samples nature's move
//! from the state's distribution with the seeded rng.
//!
//! # Usage
//!
//! ```rust
//! use engine_core::game_utils::play_sequence;
//! use engine_core::Cancellation;
//! use mcts::{run_mcts, MctsConfig, RandomRollout};
//!
//! // X at 0 and 1, O at 3 and 4: X wins at 2
//! let state = play_sequence(&games_tictactoe::State::new(), &[0, 3, 1, 4]).unwrap();
//!
//! let config = MctsConfig::default().with_simulations(1000).with_seed(42);
//! let result = run_mcts(&state, &RandomRollout::new(), config, &Cancellation::none()).unwrap();
//!
//! assert_eq!(result.action, Some(2));
//! assert_eq!(result.stats.simulations, 1000);
//! ```
//!
//! # Configuration
//!
//! The [`MctsConfig`] struct controls search behavior:
//!
//! - `simulation_budget`: simulations per search (default: 1000)
//! - `exploration_weight`: UCB1 constant `c` (default: 1.0)
//! - `final_selection`: most visited (default) or highest mean root child
//! - `value_perspective`: credit rewards to the searching participant
//!   (default) or to whoever moved into each node
//! - `expansion_order`: random (default) or legal order
//!
//! # Architecture
//!
//! ```text
//! +-------------------------------------------------------------+
//! |                         MctsSearch                          |
//! +-------------------------------------------------------------+
//! |  +-------------+  +-------------+  +---------------------+  |
//! |  |  MctsTree   |  |  GameState  |  |   RolloutPolicy     |  |
//! |  |  (arena)    |  | (successor) |  | (random / weighted) |  |
//! |  +------+------+  +------+------+  +----------+----------+  |
//! |         |                |                    |             |
//! |         v                v                    v             |
//! |  +------------------------------------------------------+   |
//! |  |        select -> expand -> rollout ->                |   |
//! |  |                  backpropagate                       |   |
//! |  +------------------------------------------------------+   |
//! +-------------------------------------------------------------+
//! ```

pub mod config;
pub mod flat;
pub mod node;
pub mod rollout;
pub mod search;
pub mod tree;

// Re-export main types
pub use config::{ExpansionOrder, FinalSelection, MctsConfig, ValuePerspective};
pub use engine_core::RolloutPolicy;
pub use flat::FlatMonteCarlo;
pub use node::{MctsNode, NodeId};
pub use rollout::{OpponentModelRollout, RandomRollout, WeightedRollout};
pub use search::{run_mcts, MctsSearch};
pub use tree::{MctsTree, TreeStats};

#[cfg(test)]
mod tests;
