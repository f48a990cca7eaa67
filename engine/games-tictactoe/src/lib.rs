//! TicTacToe for the game-tree search engines
//!
//! A small, fully solvable game used as the reference [`GameState`]
//! implementation and as a fixture for engine tests.
//!
//! # Rewards
//!
//! Two-player zero-sum: a finished game is `Win` for one participant and
//! `Loss` for the other (rewards +1 / -1), or `Draw` (0) for both. Tree
//! search should store values with `ValuePerspective::Mover` so that each
//! side picks the child that is best for itself; the shipped
//! config.defaults.toml does this.
//!
//! # Usage
//!
//! ```rust
//! use engine_core::GameState;
//! use games_tictactoe::State;
//!
//! let state = State::new().make_move(4);
//! assert_eq!(state.legal_actions().len(), 8);
//! assert_eq!(state.acting_participant(), 2);
//! ```

use engine_core::game_utils::{other_player, two_player_outcome};
use engine_core::{Evaluator, GameState, Outcome};

/// Winning positions (rows, columns, diagonals)
pub const LINES: [[usize; 3]; 8] = [
    [0, 1, 2],
    [3, 4, 5],
    [6, 7, 8], // rows
    [0, 3, 6],
    [1, 4, 7],
    [2, 5, 8], // columns
    [0, 4, 8],
    [2, 4, 6], // diagonals
];

/// TicTacToe game state
///
/// Actions are board positions 0-8, participants are 1 (X) and 2 (O).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct State {
    /// Board representation: 0=empty, 1=X, 2=O
    board: [u8; 9],
    /// Current player: 1=X, 2=O
    current_player: u8,
    /// Winner: 0=none/ongoing, 1=X, 2=O, 3=draw
    winner: u8,
}

impl State {
    /// Create a new initial game state
    pub fn new() -> Self {
        Self {
            board: [0; 9],
            current_player: 1, // X goes first
            winner: 0,
        }
    }

    /// Build a position from a board, e.g. for puzzles.
    ///
    /// The side to move is derived from the piece counts and the winner is
    /// recomputed, so the result is always self-consistent.
    pub fn from_board(board: [u8; 9]) -> Self {
        let xs = board.iter().filter(|&&c| c == 1).count();
        let os = board.iter().filter(|&&c| c == 2).count();
        Self {
            board,
            current_player: if xs > os { 2 } else { 1 },
            winner: Self::check_winner(&board),
        }
    }

    pub fn board(&self) -> &[u8; 9] {
        &self.board
    }

    pub fn current_player(&self) -> u8 {
        self.current_player
    }

    pub fn winner(&self) -> u8 {
        self.winner
    }

    /// Check if the game is over
    pub fn is_done(&self) -> bool {
        self.winner != 0
    }

    /// Get legal moves (empty positions)
    pub fn legal_moves(&self) -> Vec<u8> {
        if self.is_done() {
            return Vec::new();
        }

        (0..9u8)
            .filter(|&pos| self.board[pos as usize] == 0)
            .collect()
    }

    /// Make a move and return the new state
    pub fn make_move(&self, position: u8) -> State {
        if self.is_done() || position >= 9 || self.board[position as usize] != 0 {
            return *self; // Invalid move, return unchanged state
        }

        let mut new_state = *self;
        new_state.board[position as usize] = self.current_player;

        new_state.winner = Self::check_winner(&new_state.board);

        // Switch player if game not over
        if new_state.winner == 0 {
            new_state.current_player = other_player(self.current_player);
        }

        new_state
    }

    /// Check for winner on the board
    fn check_winner(board: &[u8; 9]) -> u8 {
        for line in &LINES {
            let [a, b, c] = *line;
            if board[a] != 0 && board[a] == board[b] && board[b] == board[c] {
                return board[a];
            }
        }

        if board.iter().all(|&cell| cell != 0) {
            return 3; // Draw
        }

        0 // Game ongoing
    }
}

impl Default for State {
    fn default() -> Self {
        Self::new()
    }
}

impl GameState for State {
    type Action = u8;
    type Participant = u8;

    fn legal_actions(&self) -> Vec<u8> {
        self.legal_moves()
    }

    fn apply(&mut self, action: &u8) {
        *self = self.make_move(*action);
    }

    fn is_terminal(&self) -> bool {
        self.is_done()
    }

    fn outcome(&self, participant: u8) -> Option<Outcome> {
        two_player_outcome(self.winner, participant)
    }

    fn acting_participant(&self) -> u8 {
        self.current_player
    }
}

/// Open-line heuristic.
///
/// Each line not yet blocked by the opponent scores the square of the
/// participant's pieces on it; the opponent's open lines count against.
#[derive(Debug, Clone, Copy, Default)]
pub struct LineEvaluator;

impl Evaluator<State> for LineEvaluator {
    fn score(&self, state: &State, participant: u8) -> f64 {
        let opponent = other_player(participant);
        LINES
            .iter()
            .map(|line| {
                let mine = line.iter().filter(|&&i| state.board[i] == participant).count();
                let theirs = line.iter().filter(|&&i| state.board[i] == opponent).count();
                match (mine, theirs) {
                    (m, 0) => (m * m) as f64,
                    (0, t) => -((t * t) as f64),
                    _ => 0.0,
                }
            })
            .sum()
    }
}

#[cfg(test)]
mod tests;
