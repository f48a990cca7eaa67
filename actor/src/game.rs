//! Game registry for the binary
//!
//! Maps a game name onto its state type, evaluator and move ordering, and
//! drives the search engine over a position.

use anyhow::{anyhow, Result};
use engine_core::game_utils::play_sequence;
use engine_core::{Evaluator, GameState, MoveOrdering, SearchResult};
use engine_search::{SearchConfig, SearchEngine};
use games_connect4::{CenterOrdering, Connect4Evaluator};
use games_tictactoe::LineEvaluator;
use std::fmt;
use std::str::FromStr;
use tracing::info;

/// Games the binary can search.
///
/// Both are two-player zero-sum, so MCTS is meant to run with the `mover`
/// value perspective that config.defaults.toml ships.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Game {
    TicTacToe,
    Connect4,
}

impl Game {
    pub fn as_str(self) -> &'static str {
        match self {
            Game::TicTacToe => "tictactoe",
            Game::Connect4 => "connect4",
        }
    }
}

impl fmt::Display for Game {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Game {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "tictactoe" | "tic-tac-toe" => Ok(Game::TicTacToe),
            "connect4" | "connect-four" => Ok(Game::Connect4),
            other => Err(anyhow!(
                "unknown game '{other}', expected tictactoe or connect4"
            )),
        }
    }
}

/// What the binary needs from a board beyond the search contract.
pub trait Board: GameState<Action = u8, Participant = u8> {
    /// 0 while the game runs, then 1 or 2 for a winner and 3 for a draw.
    fn winner_code(&self) -> u8;

    fn render(&self) -> String;
}

impl Board for games_tictactoe::State {
    fn winner_code(&self) -> u8 {
        self.winner()
    }

    fn render(&self) -> String {
        self.board()
            .chunks(3)
            .map(|row| row.iter().map(|&c| cell_char(c)).collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }
}

impl Board for games_connect4::State {
    fn winner_code(&self) -> u8 {
        self.winner()
    }

    fn render(&self) -> String {
        let mut rows = Vec::with_capacity(games_connect4::ROWS + 1);
        for row in (0..games_connect4::ROWS).rev() {
            rows.push(
                (0..games_connect4::COLS)
                    .map(|col| cell_char(self.cell(col, row)))
                    .collect::<String>(),
            );
        }
        rows.push((0..games_connect4::COLS).map(|c| c.to_string()).collect());
        rows.join("\n")
    }
}

fn cell_char(cell: u8) -> char {
    match cell {
        1 => 'X',
        2 => 'O',
        _ => '.',
    }
}

/// One engine decision.
#[derive(Debug, Clone)]
pub struct Decision {
    /// Ply the decision was made at, counted from the start position
    pub ply: usize,
    pub participant: u8,
    pub result: SearchResult<u8>,
}

/// Everything the binary prints.
#[derive(Debug, Clone)]
pub struct Report {
    pub decisions: Vec<Decision>,
    /// Final board after the chosen actions were played
    pub board: String,
    pub winner: u8,
}

/// Play `moves` from the start of `game`, then let the engine choose.
///
/// With `play_out` the engine keeps choosing for whichever side is to move
/// until the game ends.
pub fn run(game: Game, moves: &[u8], config: SearchConfig, play_out: bool) -> Result<Report> {
    match game {
        Game::TicTacToe => {
            let mut engine = SearchEngine::new(LineEvaluator, config)?;
            drive(&mut engine, &games_tictactoe::State::new(), moves, play_out)
        }
        Game::Connect4 => {
            let mut engine =
                SearchEngine::new(Connect4Evaluator, config)?.with_ordering(CenterOrdering);
            drive(&mut engine, &games_connect4::State::new(), moves, play_out)
        }
    }
}

fn drive<S, E, M>(
    engine: &mut SearchEngine<S, E, M>,
    start: &S,
    moves: &[u8],
    play_out: bool,
) -> Result<Report>
where
    S: Board,
    E: Evaluator<S> + Clone,
    M: MoveOrdering<S> + Clone,
{
    let mut state = play_sequence(start, moves)?;
    let mut decisions = Vec::new();

    loop {
        let participant = state.acting_participant();
        let result = engine.choose_action(&state)?;
        let action = result
            .action
            .ok_or_else(|| anyhow!("engine returned no action for a live position"))?;

        let ply = moves.len() + decisions.len();
        info!(
            ply,
            participant,
            action,
            value = result.value,
            nodes = result.stats.nodes,
            simulations = result.stats.simulations,
            "Move chosen"
        );
        decisions.push(Decision {
            ply,
            participant,
            result,
        });

        if !play_out {
            break;
        }
        state.apply(&action);
        if state.is_terminal() {
            break;
        }
    }

    Ok(Report {
        decisions,
        board: state.render(),
        winner: state.winner_code(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use clap::Parser;
    use engine_search::Algorithm;
    use mcts::ValuePerspective;

    #[test]
    fn game_names() {
        assert_eq!("TicTacToe".parse::<Game>().unwrap(), Game::TicTacToe);
        assert_eq!("connect-four".parse::<Game>().unwrap(), Game::Connect4);
        assert!("go".parse::<Game>().is_err());
        assert_eq!(Game::Connect4.to_string(), "connect4");
    }

    #[test]
    fn tictactoe_takes_the_win() {
        let config = SearchConfig::default().with_max_depth(3);
        let report = run(Game::TicTacToe, &[0, 3, 1, 4], config, false).unwrap();
        assert_eq!(report.decisions.len(), 1);
        assert_eq!(report.decisions[0].ply, 4);
        assert_eq!(report.decisions[0].participant, 1);
        assert_eq!(report.decisions[0].result.action, Some(2));
        assert_eq!(report.winner, 0);
    }

    #[test]
    fn connect4_takes_the_win() {
        // Red holds columns 0-2 on the bottom row
        for algorithm in [Algorithm::AlphaBeta, Algorithm::IterativeDeepening] {
            let config = SearchConfig::new(algorithm).with_max_depth(4);
            let report = run(Game::Connect4, &[0, 6, 1, 6, 2, 5], config, false).unwrap();
            assert_eq!(report.decisions[0].result.action, Some(3), "{algorithm}");
        }
    }

    #[test]
    fn mcts_blocks_a_threat_with_the_shipped_config() {
        // O O . / X . . / . . X with X to move: only square 2 stops O
        for seed in 0..20u64 {
            let seed = seed.to_string();
            let config =
                Config::try_parse_from(["gametree", "--algorithm", "mcts", "--seed", &seed])
                    .unwrap();
            let search = config.search_config().unwrap();
            assert_eq!(search.value_perspective, ValuePerspective::Mover);

            let report = run(Game::TicTacToe, &[3, 0, 8, 1], search, false).unwrap();
            assert_eq!(
                report.decisions[0].result.action,
                Some(2),
                "seed {seed} let O win"
            );
        }
    }

    #[test]
    fn perfect_tictactoe_is_a_draw() {
        let config = SearchConfig::default().with_max_depth(9);
        let report = run(Game::TicTacToe, &[], config, true).unwrap();
        assert_eq!(report.decisions.len(), 9);
        assert_eq!(report.winner, 3);
    }

    #[test]
    fn play_out_finishes_a_won_position() {
        let config = SearchConfig::default().with_max_depth(3);
        let report = run(Game::TicTacToe, &[0, 3, 1, 4], config, true).unwrap();
        assert_eq!(report.decisions.len(), 1);
        assert_eq!(report.winner, 1);
        assert_eq!(report.board, "XXX\nOO.\n...");
    }

    #[test]
    fn illegal_moves_are_reported() {
        let err = run(Game::TicTacToe, &[4, 4], SearchConfig::default(), false).unwrap_err();
        assert!(err.to_string().contains("not legal"));
    }

    #[test]
    fn finished_game_is_an_error() {
        let err = run(
            Game::TicTacToe,
            &[0, 3, 1, 4, 2],
            SearchConfig::default(),
            false,
        )
        .unwrap_err();
        assert!(err.to_string().contains("No legal actions"));
    }

    #[test]
    fn connect4_render() {
        let state = play_sequence(&games_connect4::State::new(), &[3, 3]).unwrap();
        let rendered = state.render();
        let lines: Vec<_> = rendered.lines().collect();
        assert_eq!(lines.len(), games_connect4::ROWS + 1);
        assert_eq!(lines[4], "...O...");
        assert_eq!(lines[5], "...X...");
        assert_eq!(lines[6], "0123456");
    }
}
