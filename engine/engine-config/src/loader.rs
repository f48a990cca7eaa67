//! Configuration loading logic.
//!
//! Reads config.toml, falls back to built-in defaults, then applies
//! environment variable overrides.

use crate::CentralConfig;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Environment variable naming an explicit config file.
pub const CONFIG_PATH_ENV: &str = "GAMETREE_CONFIG";

/// Standard locations to search for config.toml
pub const CONFIG_SEARCH_PATHS: &[&str] = &[
    "config.toml",    // Current directory
    "../config.toml", // Parent directory (when running from a crate directory)
];

/// Load the central configuration.
///
/// Search order:
/// 1. Path named by `GAMETREE_CONFIG`
/// 2. `config.toml` in the current directory
/// 3. `../config.toml`
///
/// Without a file the built-in defaults are used. Environment overrides are
/// applied last in every case.
pub fn load_config() -> CentralConfig {
    if let Ok(path) = std::env::var(CONFIG_PATH_ENV) {
        let path = PathBuf::from(&path);
        if path.exists() {
            info!("Loading config from {}: {}", CONFIG_PATH_ENV, path.display());
            return load_from_path(&path);
        }
        warn!(
            "{}={} not found, searching defaults",
            CONFIG_PATH_ENV,
            path.display()
        );
    }

    for path_str in CONFIG_SEARCH_PATHS {
        let path = Path::new(path_str);
        if path.exists() {
            info!("Loading config from {}", path.display());
            return load_from_path(path);
        }
    }

    debug!("No config.toml found, using built-in defaults");
    apply_env_overrides(CentralConfig::default())
}

/// Load configuration from a specific path.
///
/// A file that cannot be read or parsed is logged and replaced by defaults.
pub fn load_from_path(path: &Path) -> CentralConfig {
    match std::fs::read_to_string(path) {
        Ok(content) => match parse_config(&content) {
            Ok(config) => apply_env_overrides(config),
            Err(e) => {
                warn!("Failed to parse {}: {}, using defaults", path.display(), e);
                apply_env_overrides(CentralConfig::default())
            }
        },
        Err(e) => {
            warn!("Failed to read {}: {}, using defaults", path.display(), e);
            apply_env_overrides(CentralConfig::default())
        }
    }
}

/// Parse config.toml content without touching the environment.
pub fn parse_config(content: &str) -> Result<CentralConfig, toml::de::Error> {
    toml::from_str(content)
}

macro_rules! env_override {
    // String field
    ($config:expr, $section:ident . $field:ident, $key:expr) => {
        if let Ok(v) = std::env::var($key) {
            $config.$section.$field = v;
        }
    };
    // Parseable field; unparseable values are logged and ignored
    ($config:expr, $section:ident . $field:ident, $key:expr, parse) => {
        if let Ok(raw) = std::env::var($key) {
            match raw.parse() {
                Ok(v) => $config.$section.$field = v,
                Err(_) => warn!("Ignoring {}={}: not a valid value", $key, raw),
            }
        }
    };
}

/// Apply environment variable overrides to a configuration.
///
/// Variables follow the pattern `GAMETREE_<SECTION>_<KEY>`.
pub fn apply_env_overrides(mut config: CentralConfig) -> CentralConfig {
    // Common
    env_override!(config, common.game, "GAMETREE_COMMON_GAME");
    env_override!(config, common.log_level, "GAMETREE_COMMON_LOG_LEVEL");

    // Search
    env_override!(config, search.algorithm, "GAMETREE_SEARCH_ALGORITHM");
    env_override!(
        config,
        search.max_depth,
        "GAMETREE_SEARCH_MAX_DEPTH",
        parse
    );
    env_override!(config, search.rng_seed, "GAMETREE_SEARCH_RNG_SEED", parse);
    env_override!(
        config,
        search.time_budget_ms,
        "GAMETREE_SEARCH_TIME_BUDGET_MS",
        parse
    );
    env_override!(config, search.tie_break, "GAMETREE_SEARCH_TIE_BREAK");
    env_override!(
        config,
        search.use_cache,
        "GAMETREE_SEARCH_USE_CACHE",
        parse
    );
    env_override!(
        config,
        search.cache_capacity,
        "GAMETREE_SEARCH_CACHE_CAPACITY",
        parse
    );
    env_override!(
        config,
        search.persist_cache,
        "GAMETREE_SEARCH_PERSIST_CACHE",
        parse
    );

    // MCTS
    env_override!(
        config,
        mcts.simulation_budget,
        "GAMETREE_MCTS_SIMULATION_BUDGET",
        parse
    );
    env_override!(
        config,
        mcts.exploration_weight,
        "GAMETREE_MCTS_EXPLORATION_WEIGHT",
        parse
    );
    env_override!(
        config,
        mcts.final_selection,
        "GAMETREE_MCTS_FINAL_SELECTION"
    );
    env_override!(
        config,
        mcts.value_perspective,
        "GAMETREE_MCTS_VALUE_PERSPECTIVE"
    );
    env_override!(
        config,
        mcts.expansion_order,
        "GAMETREE_MCTS_EXPANSION_ORDER"
    );
    env_override!(
        config,
        mcts.rollout_max_steps,
        "GAMETREE_MCTS_ROLLOUT_MAX_STEPS",
        parse
    );

    config
}
