//! Default configuration values loaded from config.defaults.toml.
//!
//! The file is embedded at compile time so the binary and any documentation
//! generated from it agree on every default.

use once_cell::sync::Lazy;
use serde::Deserialize;

const DEFAULTS_TOML: &str = include_str!("../../../config.defaults.toml");

static DEFAULTS: Lazy<DefaultsConfig> = Lazy::new(|| {
    toml::from_str(DEFAULTS_TOML).expect("config.defaults.toml should be valid TOML")
});

// ============================================================================
// Internal structs for parsing config.defaults.toml
// ============================================================================

#[derive(Debug, Deserialize)]
struct DefaultsConfig {
    common: CommonDefaults,
    search: SearchDefaults,
    mcts: MctsDefaults,
}

#[derive(Debug, Deserialize)]
struct CommonDefaults {
    game: String,
    log_level: String,
}

#[derive(Debug, Deserialize)]
struct SearchDefaults {
    algorithm: String,
    max_depth: u32,
    rng_seed: u64,
    time_budget_ms: u64,
    tie_break: String,
    use_cache: bool,
    cache_capacity: usize,
    persist_cache: bool,
}

#[derive(Debug, Deserialize)]
struct MctsDefaults {
    simulation_budget: u32,
    exploration_weight: f64,
    final_selection: String,
    value_perspective: String,
    expansion_order: String,
    rollout_max_steps: u32,
}

// ============================================================================
// Public accessor functions
// ============================================================================

// Common
pub fn game() -> &'static str {
    &DEFAULTS.common.game
}
pub fn log_level() -> &'static str {
    &DEFAULTS.common.log_level
}

// Search
pub fn algorithm() -> &'static str {
    &DEFAULTS.search.algorithm
}
pub fn max_depth() -> u32 {
    DEFAULTS.search.max_depth
}
pub fn rng_seed() -> u64 {
    DEFAULTS.search.rng_seed
}
pub fn time_budget_ms() -> u64 {
    DEFAULTS.search.time_budget_ms
}
pub fn tie_break() -> &'static str {
    &DEFAULTS.search.tie_break
}
pub fn use_cache() -> bool {
    DEFAULTS.search.use_cache
}
pub fn cache_capacity() -> usize {
    DEFAULTS.search.cache_capacity
}
pub fn persist_cache() -> bool {
    DEFAULTS.search.persist_cache
}

// MCTS
pub fn simulation_budget() -> u32 {
    DEFAULTS.mcts.simulation_budget
}
pub fn exploration_weight() -> f64 {
    DEFAULTS.mcts.exploration_weight
}
pub fn final_selection() -> &'static str {
    &DEFAULTS.mcts.final_selection
}
pub fn value_perspective() -> &'static str {
    &DEFAULTS.mcts.value_perspective
}
pub fn expansion_order() -> &'static str {
    &DEFAULTS.mcts.expansion_order
}
pub fn rollout_max_steps() -> u32 {
    DEFAULTS.mcts.rollout_max_steps
}
