//! Centralized configuration loading from config.toml.
//!
//! Provides the settings the `gametree` binary turns into a search
//! configuration: which game, which algorithm, and every search knob.
//!
//! # Configuration Priority
//!
//! Settings are loaded with the following priority (highest to lowest):
//! 1. Environment variables (`GAMETREE_<SECTION>_<KEY>`)
//! 2. config.toml file
//! 3. Built-in defaults (config.defaults.toml, embedded at compile time)
//!
//! # Environment Variable Override Pattern
//!
//! ```text
//! GAMETREE_<SECTION>_<KEY>=value
//!
//! Examples:
//!     GAMETREE_COMMON_GAME=connect4
//!     GAMETREE_SEARCH_ALGORITHM=mcts
//!     GAMETREE_SEARCH_MAX_DEPTH=8
//!     GAMETREE_MCTS_SIMULATION_BUDGET=5000
//! ```

mod defaults;
mod loader;
mod structs;

pub use defaults::*;
pub use loader::{
    apply_env_overrides, load_config, load_from_path, parse_config, CONFIG_PATH_ENV,
    CONFIG_SEARCH_PATHS,
};
pub use structs::*;

#[cfg(test)]
mod tests;
