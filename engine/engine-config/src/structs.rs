//! Configuration struct definitions.
//!
//! Every field falls back to config.defaults.toml when missing from
//! config.toml, so partial files are valid.

use std::time::Duration;

use crate::defaults;
use serde::Deserialize;

// ============================================================================
// Serde default functions
// ============================================================================

fn d_game() -> String {
    defaults::game().into()
}
fn d_log_level() -> String {
    defaults::log_level().into()
}
fn d_algorithm() -> String {
    defaults::algorithm().into()
}
fn d_max_depth() -> u32 {
    defaults::max_depth()
}
fn d_rng_seed() -> u64 {
    defaults::rng_seed()
}
fn d_time_budget_ms() -> u64 {
    defaults::time_budget_ms()
}
fn d_tie_break() -> String {
    defaults::tie_break().into()
}
fn d_use_cache() -> bool {
    defaults::use_cache()
}
fn d_cache_capacity() -> usize {
    defaults::cache_capacity()
}
fn d_persist_cache() -> bool {
    defaults::persist_cache()
}
fn d_simulation_budget() -> u32 {
    defaults::simulation_budget()
}
fn d_exploration_weight() -> f64 {
    defaults::exploration_weight()
}
fn d_final_selection() -> String {
    defaults::final_selection().into()
}
fn d_value_perspective() -> String {
    defaults::value_perspective().into()
}
fn d_expansion_order() -> String {
    defaults::expansion_order().into()
}
fn d_rollout_max_steps() -> u32 {
    defaults::rollout_max_steps()
}

// ============================================================================
// Main config struct
// ============================================================================

/// Root configuration, one field per `[section]` of config.toml.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct CentralConfig {
    #[serde(default)]
    pub common: CommonConfig,
    #[serde(default)]
    pub search: SearchSection,
    #[serde(default)]
    pub mcts: MctsSection,
}

// ============================================================================
// Section structs
// ============================================================================

#[derive(Debug, Clone, Deserialize)]
pub struct CommonConfig {
    #[serde(default = "d_game")]
    pub game: String,
    #[serde(default = "d_log_level")]
    pub log_level: String,
}

impl Default for CommonConfig {
    fn default() -> Self {
        Self {
            game: d_game(),
            log_level: d_log_level(),
        }
    }
}

/// Settings shared by the depth-limited searches.
///
/// Names are kept as strings here; the binary parses them into the search
/// crate's enums so a typo is reported with the list of accepted values.
#[derive(Debug, Clone, Deserialize)]
pub struct SearchSection {
    #[serde(default = "d_algorithm")]
    pub algorithm: String,
    #[serde(default = "d_max_depth")]
    pub max_depth: u32,
    #[serde(default = "d_rng_seed")]
    pub rng_seed: u64,
    /// 0 means no time budget.
    #[serde(default = "d_time_budget_ms")]
    pub time_budget_ms: u64,
    #[serde(default = "d_tie_break")]
    pub tie_break: String,
    #[serde(default = "d_use_cache")]
    pub use_cache: bool,
    /// 0 means unbounded.
    #[serde(default = "d_cache_capacity")]
    pub cache_capacity: usize,
    #[serde(default = "d_persist_cache")]
    pub persist_cache: bool,
}

impl Default for SearchSection {
    fn default() -> Self {
        Self {
            algorithm: d_algorithm(),
            max_depth: d_max_depth(),
            rng_seed: d_rng_seed(),
            time_budget_ms: d_time_budget_ms(),
            tie_break: d_tie_break(),
            use_cache: d_use_cache(),
            cache_capacity: d_cache_capacity(),
            persist_cache: d_persist_cache(),
        }
    }
}

impl SearchSection {
    pub fn time_budget(&self) -> Option<Duration> {
        (self.time_budget_ms > 0).then(|| Duration::from_millis(self.time_budget_ms))
    }

    pub fn cache_capacity(&self) -> Option<usize> {
        (self.cache_capacity > 0).then_some(self.cache_capacity)
    }
}

/// Settings for the Monte-Carlo engines.
#[derive(Debug, Clone, Deserialize)]
pub struct MctsSection {
    #[serde(default = "d_simulation_budget")]
    pub simulation_budget: u32,
    #[serde(default = "d_exploration_weight")]
    pub exploration_weight: f64,
    #[serde(default = "d_final_selection")]
    pub final_selection: String,
    #[serde(default = "d_value_perspective")]
    pub value_perspective: String,
    #[serde(default = "d_expansion_order")]
    pub expansion_order: String,
    /// 0 plays rollouts to the end.
    #[serde(default = "d_rollout_max_steps")]
    pub rollout_max_steps: u32,
}

impl Default for MctsSection {
    fn default() -> Self {
        Self {
            simulation_budget: d_simulation_budget(),
            exploration_weight: d_exploration_weight(),
            final_selection: d_final_selection(),
            value_perspective: d_value_perspective(),
            expansion_order: d_expansion_order(),
            rollout_max_steps: d_rollout_max_steps(),
        }
    }
}

impl MctsSection {
    pub fn rollout_max_steps(&self) -> Option<u32> {
        (self.rollout_max_steps > 0).then_some(self.rollout_max_steps)
    }
}
