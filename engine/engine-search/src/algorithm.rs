//! Search algorithm selection.

use std::fmt;
use std::str::FromStr;

use engine_core::SearchError;

/// Which engine answers a `choose_action` call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Algorithm {
    /// Fixed-depth alpha-beta with a transposition cache.
    #[default]
    AlphaBeta,
    /// Alpha-beta deepened one ply at a time until the depth limit, a proven
    /// win or the time budget.
    IterativeDeepening,
    /// UCB1 tree search with rollouts.
    Mcts,
    /// Expectation over opponent models and chance nodes.
    Expectimax,
    /// Round-robin rollouts per root action, no tree.
    FlatMonteCarlo,
}

impl Algorithm {
    pub const ALL: [Algorithm; 5] = [
        Algorithm::AlphaBeta,
        Algorithm::IterativeDeepening,
        Algorithm::Mcts,
        Algorithm::Expectimax,
        Algorithm::FlatMonteCarlo,
    ];

    /// Canonical name, as accepted by [`FromStr`].
    pub fn as_str(self) -> &'static str {
        match self {
            Algorithm::AlphaBeta => "alphabeta",
            Algorithm::IterativeDeepening => "iterative",
            Algorithm::Mcts => "mcts",
            Algorithm::Expectimax => "expectimax",
            Algorithm::FlatMonteCarlo => "flat-mc",
        }
    }

    /// Whether the algorithm looks ahead to a fixed depth (as opposed to
    /// spending a simulation budget).
    pub fn is_depth_limited(self) -> bool {
        matches!(
            self,
            Algorithm::AlphaBeta | Algorithm::IterativeDeepening | Algorithm::Expectimax
        )
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Algorithm {
    type Err = SearchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "alphabeta" | "alpha-beta" | "minimax" => Ok(Algorithm::AlphaBeta),
            "iterative" | "iterative-deepening" | "id" => Ok(Algorithm::IterativeDeepening),
            "mcts" | "uct" => Ok(Algorithm::Mcts),
            "expectimax" => Ok(Algorithm::Expectimax),
            "flat-mc" | "flat" | "monte-carlo" => Ok(Algorithm::FlatMonteCarlo),
            other => Err(SearchError::invalid_config(format!(
                "unknown algorithm '{other}', expected one of: alphabeta, iterative, mcts, expectimax, flat-mc"
            ))),
        }
    }
}
