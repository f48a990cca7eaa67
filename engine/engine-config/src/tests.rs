//! Tests for the configuration module.
//!
//! Tests that touch the environment use variables no other test reads, since
//! the test harness runs them in parallel.

use std::time::Duration;

use super::*;

#[test]
fn test_default_config() {
    let config = CentralConfig::default();
    assert_eq!(config.common.game, "tictactoe");
    assert_eq!(config.common.log_level, "info");
    assert_eq!(config.search.algorithm, "alphabeta");
    assert_eq!(config.search.max_depth, 6);
    assert_eq!(config.search.tie_break, "first");
    assert!(config.search.use_cache);
    assert!(!config.search.persist_cache);
}

#[test]
fn test_mcts_defaults() {
    let config = CentralConfig::default();
    assert_eq!(config.mcts.simulation_budget, 1000);
    assert!((config.mcts.exploration_weight - 1.0).abs() < f64::EPSILON);
    assert_eq!(config.mcts.final_selection, "most-visited");
    // The shipped games are adversarial
    assert_eq!(config.mcts.value_perspective, "mover");
    assert_eq!(config.mcts.expansion_order, "random");
}

#[test]
fn test_zero_means_unlimited() {
    let config = CentralConfig::default();
    assert_eq!(config.search.time_budget(), None);
    assert_eq!(config.search.cache_capacity(), None);
    assert_eq!(config.mcts.rollout_max_steps(), None);

    let config = parse_config(
        r#"
[search]
time_budget_ms = 250
cache_capacity = 4096

[mcts]
rollout_max_steps = 40
"#,
    )
    .unwrap();
    assert_eq!(config.search.time_budget(), Some(Duration::from_millis(250)));
    assert_eq!(config.search.cache_capacity(), Some(4096));
    assert_eq!(config.mcts.rollout_max_steps(), Some(40));
}

#[test]
fn test_toml_parsing() {
    let toml_str = r#"
[common]
game = "connect4"
log_level = "debug"

[search]
algorithm = "iterative"
max_depth = 9
rng_seed = 7
tie_break = "random"
persist_cache = true

[mcts]
simulation_budget = 2500
exploration_weight = 1.4
final_selection = "highest-mean"
value_perspective = "root"
expansion_order = "in-order"
"#;

    let config = parse_config(toml_str).unwrap();
    assert_eq!(config.common.game, "connect4");
    assert_eq!(config.common.log_level, "debug");
    assert_eq!(config.search.algorithm, "iterative");
    assert_eq!(config.search.max_depth, 9);
    assert_eq!(config.search.rng_seed, 7);
    assert_eq!(config.search.tie_break, "random");
    assert!(config.search.persist_cache);
    assert_eq!(config.mcts.simulation_budget, 2500);
    assert!((config.mcts.exploration_weight - 1.4).abs() < f64::EPSILON);
    assert_eq!(config.mcts.final_selection, "highest-mean");
    assert_eq!(config.mcts.value_perspective, "root");
    assert_eq!(config.mcts.expansion_order, "in-order");
}

#[test]
fn test_partial_config() {
    // Only some fields specified, rest should use defaults
    let toml_str = r#"
[search]
max_depth = 3
"#;

    let config = parse_config(toml_str).unwrap();
    assert_eq!(config.search.max_depth, 3);
    assert_eq!(config.search.algorithm, "alphabeta");
    assert_eq!(config.common.game, "tictactoe");
    assert_eq!(config.mcts.simulation_budget, 1000);
}

#[test]
fn test_invalid_toml_is_an_error() {
    assert!(parse_config("[search]\nmax_depth = \"deep\"").is_err());
}

#[test]
fn test_load_from_missing_path_falls_back() {
    let config = load_from_path(std::path::Path::new("/nonexistent/gametree/config.toml"));
    assert_eq!(config.mcts.expansion_order, "random");
}

#[test]
fn test_load_from_file() {
    let path = std::env::temp_dir().join(format!("gametree-config-{}.toml", std::process::id()));
    std::fs::write(&path, "[mcts]\nfinal_selection = \"highest-mean\"\n").unwrap();

    let config = load_from_path(&path);
    assert_eq!(config.mcts.final_selection, "highest-mean");

    std::fs::remove_file(&path).unwrap();
}

#[test]
fn test_env_overrides() {
    std::env::set_var("GAMETREE_COMMON_GAME", "connect4");
    std::env::set_var("GAMETREE_SEARCH_PERSIST_CACHE", "true");
    std::env::set_var("GAMETREE_MCTS_EXPLORATION_WEIGHT", "0.5");

    let config = apply_env_overrides(CentralConfig::default());
    assert_eq!(config.common.game, "connect4");
    assert!(config.search.persist_cache);
    assert!((config.mcts.exploration_weight - 0.5).abs() < f64::EPSILON);

    std::env::remove_var("GAMETREE_COMMON_GAME");
    std::env::remove_var("GAMETREE_SEARCH_PERSIST_CACHE");
    std::env::remove_var("GAMETREE_MCTS_EXPLORATION_WEIGHT");
}

#[test]
fn test_unparseable_env_override_is_ignored() {
    std::env::set_var("GAMETREE_SEARCH_RNG_SEED", "not-a-number");

    let config = apply_env_overrides(CentralConfig::default());
    assert_eq!(config.search.rng_seed, 0);

    std::env::remove_var("GAMETREE_SEARCH_RNG_SEED");
}

#[test]
fn test_env_overrides_beat_the_file() {
    std::env::set_var("GAMETREE_MCTS_SIMULATION_BUDGET", "77");

    let from_file = parse_config("[mcts]\nsimulation_budget = 5000\n").unwrap();
    let config = apply_env_overrides(from_file);
    assert_eq!(config.mcts.simulation_budget, 77);

    std::env::remove_var("GAMETREE_MCTS_SIMULATION_BUDGET");
}
