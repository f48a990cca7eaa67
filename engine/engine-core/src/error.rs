//! Error taxonomy shared by all search engines.

use thiserror::Error;

/// Errors surfaced by a search call.
///
/// Running out of time is not an error: a cancelled search still
/// returns the best result of its last completed iteration and flags it in
/// [`SearchStats::cancelled`](crate::SearchStats::cancelled).
#[derive(Debug, Error, Clone, PartialEq)]
pub enum SearchError {
    /// The root state has no legal action. Check terminality before searching.
    #[error("No legal actions available")]
    NoLegalActions,

    /// Rejected before any search work starts.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// The game implementation broke the state contract.
    #[error("Game state contract violated: {0}")]
    ContractViolation(String),
}

impl SearchError {
    pub fn invalid_config(msg: impl Into<String>) -> Self {
        SearchError::InvalidConfig(msg.into())
    }

    pub fn contract(msg: impl Into<String>) -> Self {
        SearchError::ContractViolation(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        assert_eq!(
            SearchError::NoLegalActions.to_string(),
            "No legal actions available"
        );
        assert_eq!(
            SearchError::invalid_config("max_depth must be positive").to_string(),
            "Invalid configuration: max_depth must be positive"
        );
        assert_eq!(
            SearchError::contract("empty action list").to_string(),
            "Game state contract violated: empty action list"
        );
    }
}
