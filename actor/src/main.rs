//! gametree - choose a move with any of the search engines
//!
//! A one-shot process that:
//! 1. Loads config.toml and applies `GAMETREE_*` environment overrides
//! 2. Builds a position by replaying `--moves` from the start of `--game`
//! 3. Runs the configured engine (`--algorithm`) and prints its decision
//! 4. With `--play-out`, keeps playing both sides until the game ends

use anyhow::Result;
use clap::Parser;
use tracing::{error, info};

mod config;
mod game;

use crate::config::Config;
use crate::game::{Decision, Report};

fn init_tracing(level: &str) -> Result<()> {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();

    Ok(())
}

fn print_decision(decision: &Decision) {
    let result = &decision.result;
    let action = result
        .action
        .map_or_else(|| "-".to_string(), |a| a.to_string());
    println!(
        "ply {:>2}  player {}  action {:>2}  value {:>12.4}  nodes {:>9}  depth {:>2}  sims {:>7}  cache hits {:>7}{}",
        decision.ply,
        decision.participant,
        action,
        result.value,
        result.stats.nodes,
        result.stats.completed_depth,
        result.stats.simulations,
        result.stats.cache_hits,
        if result.stats.cancelled { "  (time budget hit)" } else { "" },
    );
}

fn print_report(report: &Report) {
    for decision in &report.decisions {
        print_decision(decision);
    }
    println!();
    println!("{}", report.board);
    match report.winner {
        0 => {}
        3 => println!("Result: draw"),
        w => println!("Result: player {w} wins"),
    }
}

fn main() -> Result<()> {
    let config = Config::parse();
    config.validate()?;

    init_tracing(&config.log_level)?;
    info!(log_level = %config.log_level, "Tracing initialized");

    let game = config.game()?;
    let search = config.search_config()?;
    info!(
        game = %game,
        algorithm = %search.algorithm,
        moves = ?config.moves,
        play_out = config.play_out,
        "Starting search"
    );

    match game::run(game, &config.moves, search, config.play_out) {
        Ok(report) => {
            print_report(&report);
            Ok(())
        }
        Err(e) => {
            error!("Search failed: {}", e);
            Err(e)
        }
    }
}
