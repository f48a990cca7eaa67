//! Command-line configuration for the `gametree` binary
//!
//! Defaults come from config.toml (with `GAMETREE_*` environment overrides);
//! command-line arguments take priority over both.

use anyhow::{anyhow, Result};
use clap::{ArgAction, Parser};
use engine_config::{load_config, CentralConfig};
use engine_search::{Algorithm, SearchConfig};
use once_cell::sync::Lazy;
use std::time::Duration;
use tracing::level_filters::LevelFilter;

use crate::game::Game;

// Load central config once at startup
static CENTRAL_CONFIG: Lazy<CentralConfig> = Lazy::new(load_config);

fn default_game() -> String {
    CENTRAL_CONFIG.common.game.clone()
}

fn default_log_level() -> String {
    CENTRAL_CONFIG.common.log_level.clone()
}

fn default_algorithm() -> String {
    CENTRAL_CONFIG.search.algorithm.clone()
}

fn default_max_depth() -> u32 {
    CENTRAL_CONFIG.search.max_depth
}

fn default_seed() -> u64 {
    CENTRAL_CONFIG.search.rng_seed
}

fn default_time_budget_ms() -> u64 {
    CENTRAL_CONFIG.search.time_budget_ms
}

fn default_tie_break() -> String {
    CENTRAL_CONFIG.search.tie_break.clone()
}

fn default_use_cache() -> bool {
    CENTRAL_CONFIG.search.use_cache
}

fn default_cache_capacity() -> usize {
    CENTRAL_CONFIG.search.cache_capacity
}

fn default_persist_cache() -> bool {
    CENTRAL_CONFIG.search.persist_cache
}

fn default_simulations() -> u32 {
    CENTRAL_CONFIG.mcts.simulation_budget
}

fn default_exploration_weight() -> f64 {
    CENTRAL_CONFIG.mcts.exploration_weight
}

fn default_final_selection() -> String {
    CENTRAL_CONFIG.mcts.final_selection.clone()
}

fn default_value_perspective() -> String {
    CENTRAL_CONFIG.mcts.value_perspective.clone()
}

fn default_expansion_order() -> String {
    CENTRAL_CONFIG.mcts.expansion_order.clone()
}

fn default_rollout_max_steps() -> u32 {
    CENTRAL_CONFIG.mcts.rollout_max_steps
}

#[derive(Parser, Debug, Clone)]
#[command(name = "gametree")]
#[command(about = "Choose a move with alpha-beta, expectimax or Monte-Carlo search")]
#[command(
    long_about = "Builds a position by playing --moves from the start of --game, then asks the
configured search engine for the best action and prints it with the search statistics.

Configuration is loaded from config.toml with GAMETREE_<SECTION>_<KEY> environment
overrides. CLI arguments take highest priority."
)]
pub struct Config {
    /// Game to play (tictactoe, connect4)
    #[arg(long, default_value_t = default_game())]
    pub game: String,

    /// Comma-separated actions played from the start position, e.g. 3,3,4
    #[arg(long, value_delimiter = ',')]
    pub moves: Vec<u8>,

    /// Search algorithm (alphabeta, iterative, mcts, expectimax, flat-mc)
    #[arg(long, default_value_t = default_algorithm())]
    pub algorithm: String,

    /// Depth limit in plies for alpha-beta, iterative deepening and expectimax
    #[arg(long, default_value_t = default_max_depth())]
    pub max_depth: u32,

    /// Simulations per move for the Monte-Carlo engines
    #[arg(long, default_value_t = default_simulations())]
    pub simulations: u32,

    /// UCB1 exploration constant
    #[arg(long, default_value_t = default_exploration_weight())]
    pub exploration_weight: f64,

    /// Seed for every random choice the engines make
    #[arg(long, default_value_t = default_seed())]
    pub seed: u64,

    /// Wall-clock budget per move in milliseconds (0 for none)
    #[arg(long, default_value_t = default_time_budget_ms())]
    pub time_budget_ms: u64,

    /// Root tie-break for alpha-beta (first, random)
    #[arg(long, default_value_t = default_tie_break())]
    pub tie_break: String,

    /// Memoize subtree values in a transposition cache
    #[arg(long, default_value_t = default_use_cache(), action = ArgAction::Set)]
    pub use_cache: bool,

    /// Transposition cache entry limit (0 for unlimited)
    #[arg(long, default_value_t = default_cache_capacity())]
    pub cache_capacity: usize,

    /// Keep the transposition cache between moves of --play-out
    #[arg(long, default_value_t = default_persist_cache(), action = ArgAction::Set)]
    pub persist_cache: bool,

    /// How MCTS picks its final move (most-visited, highest-mean)
    #[arg(long, default_value_t = default_final_selection())]
    pub final_selection: String,

    /// Whose perspective MCTS stores node values from (root, mover)
    #[arg(long, default_value_t = default_value_perspective())]
    pub value_perspective: String,

    /// Which untried action MCTS expands next (random, in-order)
    #[arg(long, default_value_t = default_expansion_order())]
    pub expansion_order: String,

    /// Truncate rollouts after this many moves (0 plays to the end)
    #[arg(long, default_value_t = default_rollout_max_steps())]
    pub rollout_max_steps: u32,

    /// Keep choosing moves for both sides until the game ends
    #[arg(long)]
    pub play_out: bool,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value_t = default_log_level())]
    pub log_level: String,
}

impl Config {
    pub fn validate(&self) -> Result<()> {
        self.game()?;

        if self.log_level.parse::<LevelFilter>().is_err() {
            return Err(anyhow!(
                "invalid log level '{}', expected one of trace, debug, info, warn, error",
                self.log_level
            ));
        }

        self.search_config()?;
        Ok(())
    }

    pub fn game(&self) -> Result<Game> {
        self.game.parse()
    }

    pub fn time_budget(&self) -> Option<Duration> {
        (self.time_budget_ms > 0).then(|| Duration::from_millis(self.time_budget_ms))
    }

    /// Translate the arguments into a validated engine configuration.
    pub fn search_config(&self) -> Result<SearchConfig> {
        let config = SearchConfig::new(self.algorithm.parse::<Algorithm>()?)
            .with_max_depth(self.max_depth)
            .with_simulations(self.simulations)
            .with_exploration_weight(self.exploration_weight)
            .with_seed(self.seed)
            .with_time_budget(self.time_budget())
            .with_tie_break(self.tie_break.parse()?)
            .with_cache(self.use_cache)
            .with_cache_capacity((self.cache_capacity > 0).then_some(self.cache_capacity))
            .with_persist_cache(self.persist_cache)
            .with_final_selection(self.final_selection.parse()?)
            .with_value_perspective(self.value_perspective.parse()?)
            .with_expansion_order(self.expansion_order.parse()?)
            .with_rollout_max_steps((self.rollout_max_steps > 0).then_some(self.rollout_max_steps));
        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alphabeta::TieBreak;
    use mcts::{ExpansionOrder, FinalSelection, ValuePerspective};

    fn base_config() -> Config {
        Config {
            game: "tictactoe".into(),
            moves: vec![],
            algorithm: "alphabeta".into(),
            max_depth: 6,
            simulations: 1000,
            exploration_weight: 1.0,
            seed: 0,
            time_budget_ms: 0,
            tie_break: "first".into(),
            use_cache: true,
            cache_capacity: 0,
            persist_cache: false,
            final_selection: "most-visited".into(),
            value_perspective: "root".into(),
            expansion_order: "random".into(),
            rollout_max_steps: 0,
            play_out: false,
            log_level: "info".into(),
        }
    }

    #[test]
    fn validate_accepts_defaults() {
        assert!(base_config().validate().is_ok());
    }

    #[test]
    fn validate_rejects_unknown_game() {
        let mut config = base_config();
        config.game = "chess".into();
        assert!(config.validate().is_err());
    }

    #[test]
    fn validate_rejects_invalid_log_level() {
        let mut config = base_config();
        config.log_level = "verbose".into();
        assert!(config.validate().is_err());
    }

    #[test]
    fn validate_rejects_unknown_algorithm() {
        let mut config = base_config();
        config.algorithm = "negamax".into();
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("negamax"));
    }

    #[test]
    fn validate_rejects_zero_depth() {
        let mut config = base_config();
        config.max_depth = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn zero_means_unlimited() {
        let search = base_config().search_config().unwrap();
        assert_eq!(search.time_budget, None);
        assert_eq!(search.cache_capacity, None);
        assert_eq!(search.rollout_max_steps, None);
    }

    #[test]
    fn search_config_carries_every_argument() {
        let mut config = base_config();
        config.algorithm = "mcts".into();
        config.simulations = 321;
        config.exploration_weight = 0.25;
        config.seed = 17;
        config.time_budget_ms = 50;
        config.tie_break = "random".into();
        config.cache_capacity = 64;
        config.final_selection = "highest-mean".into();
        config.value_perspective = "mover".into();
        config.expansion_order = "in-order".into();
        config.rollout_max_steps = 30;

        let search = config.search_config().unwrap();
        assert_eq!(search.algorithm, Algorithm::Mcts);
        assert_eq!(search.simulation_budget, 321);
        assert!((search.exploration_weight - 0.25).abs() < f64::EPSILON);
        assert_eq!(search.rng_seed, 17);
        assert_eq!(search.time_budget, Some(Duration::from_millis(50)));
        assert_eq!(search.tie_break, TieBreak::Random);
        assert_eq!(search.cache_capacity, Some(64));
        assert_eq!(search.final_selection, FinalSelection::HighestMean);
        assert_eq!(search.value_perspective, ValuePerspective::Mover);
        assert_eq!(search.expansion_order, ExpansionOrder::InOrder);
        assert_eq!(search.rollout_max_steps, Some(30));
    }

    #[test]
    fn moves_are_comma_separated() {
        let config = Config::try_parse_from([
            "gametree",
            "--game",
            "connect4",
            "--moves",
            "3,3,4",
            "--algorithm",
            "iterative",
        ])
        .unwrap();
        assert_eq!(config.moves, vec![3, 3, 4]);
        assert_eq!(config.game().unwrap(), Game::Connect4);
    }
}
