//! Connect 4 for the game-tree search engines
//!
//! Connect 4 is a two-player connection game where players drop colored discs
//! into a 7-column, 6-row vertically suspended grid. The objective is to be
//! the first to form a horizontal, vertical, or diagonal line of four discs.
//!
//! # Board Layout
//!
//! The board is stored in row-major order, with row 0 at the bottom:
//! ```text
//! Row 5: [35][36][37][38][39][40][41]  <- Top
//! Row 4: [28][29][30][31][32][33][34]
//! Row 3: [21][22][23][24][25][26][27]
//! Row 2: [14][15][16][17][18][19][20]
//! Row 1: [ 7][ 8][ 9][10][11][12][13]
//! Row 0: [ 0][ 1][ 2][ 3][ 4][ 5][ 6]  <- Bottom
//!         Col 0  1  2  3  4  5  6
//! ```
//!
//! Actions are column indices, participants are 1 (Red) and 2 (Yellow).
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
//! use engine_core::{Evaluator, GameState};
//! use games_connect4::{Connect4Evaluator, State};
//!
//! let state = State::new().drop_piece(3);
//! assert_eq!(state.acting_participant(), 2);
//! assert!(Connect4Evaluator.score(&state, 1) > 0.0);
//! ```

use engine_core::game_utils::{other_player, two_player_outcome};
use engine_core::{Evaluator, GameState, MoveOrdering, Outcome};

/// Board dimensions
pub const COLS: usize = 7;
pub const ROWS: usize = 6;
pub const BOARD_SIZE: usize = COLS * ROWS; // 42

/// Connect4 game state
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct State {
    /// Board representation: 0=empty, 1=Red (player 1), 2=Yellow (player 2)
    /// Stored in row-major order with row 0 at the bottom
    board: [u8; BOARD_SIZE],
    /// Current player: 1=Red, 2=Yellow
    current_player: u8,
    /// Winner: 0=none/ongoing, 1=Red, 2=Yellow, 3=draw
    winner: u8,
    /// Height of each column (0-6 means number of pieces in column)
    column_heights: [u8; COLS],
}

impl State {
    /// Create a new initial game state
    pub fn new() -> Self {
        Self {
            board: [0; BOARD_SIZE],
            current_player: 1, // Red goes first
            winner: 0,
            column_heights: [0; COLS],
        }
    }

    pub fn current_player(&self) -> u8 {
        self.current_player
    }

    pub fn winner(&self) -> u8 {
        self.winner
    }

    /// Piece at `(col, row)`, row 0 being the bottom.
    pub fn cell(&self, col: usize, row: usize) -> u8 {
        self.board[Self::pos(col, row)]
    }

    /// Check if the game is over
    pub fn is_done(&self) -> bool {
        self.winner != 0
    }

    /// Get legal moves (columns that are not full)
    pub fn legal_moves(&self) -> Vec<u8> {
        if self.is_done() {
            return Vec::new();
        }

        (0..COLS as u8)
            .filter(|&col| self.column_heights[col as usize] < ROWS as u8)
            .collect()
    }

    /// Convert column and row to board index
    #[inline]
    fn pos(col: usize, row: usize) -> usize {
        row * COLS + col
    }

    /// Drop a piece in the given column and return the new state
    pub fn drop_piece(&self, column: u8) -> State {
        let mut new_state = self.clone();
        new_state.drop_in_place(column);
        new_state
    }

    /// Drop a piece in place. Invalid moves leave the state unchanged.
    fn drop_in_place(&mut self, column: u8) {
        let col = column as usize;
        if self.is_done() || col >= COLS || self.column_heights[col] >= ROWS as u8 {
            return;
        }

        let row = self.column_heights[col] as usize;
        self.board[Self::pos(col, row)] = self.current_player;
        self.column_heights[col] += 1;

        self.winner = self.check_winner_at(col, row);

        // Switch player if game not over
        if self.winner == 0 {
            self.current_player = other_player(self.current_player);
        }
    }

    /// Check if the piece at (col, row) creates a winning line
    fn check_winner_at(&self, col: usize, row: usize) -> u8 {
        let player = self.board[Self::pos(col, row)];
        if player == 0 {
            return 0;
        }

        // Direction vectors: horizontal, vertical, diagonal /, diagonal \
        let directions: [(i32, i32); 4] = [(1, 0), (0, 1), (1, 1), (1, -1)];

        for (dc, dr) in directions {
            let count = 1
                + self.run_length(col, row, dc, dr, player)
                + self.run_length(col, row, -dc, -dr, player);
            if count >= 4 {
                return player;
            }
        }

        // Check for draw (board full but no winner)
        if self.column_heights.iter().all(|&h| h >= ROWS as u8) {
            return 3;
        }

        0
    }

    /// Consecutive `player` pieces starting one step from (col, row).
    fn run_length(&self, col: usize, row: usize, dc: i32, dr: i32, player: u8) -> usize {
        let mut count = 0;
        let (mut c, mut r) = (col as i32 + dc, row as i32 + dr);
        while c >= 0 && c < COLS as i32 && r >= 0 && r < ROWS as i32 {
            if self.board[Self::pos(c as usize, r as usize)] != player {
                break;
            }
            count += 1;
            c += dc;
            r += dr;
        }
        count
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
        self.drop_in_place(*action);
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

/// Window scores indexed by the number of own pieces in an otherwise empty
/// window of four.
const WINDOW_WEIGHTS: [f64; 5] = [0.0, 1.0, 4.0, 16.0, 1000.0];

/// Bonus per piece in the center column.
const CENTER_WEIGHT: f64 = 3.0;

/// Window-counting heuristic with a center-column bias.
///
/// Every window of four cells containing pieces of only one side scores for
/// that side; the result is the participant's total minus the opponent's.
#[derive(Debug, Clone, Copy, Default)]
pub struct Connect4Evaluator;

impl Connect4Evaluator {
    fn window_score(state: &State, cells: [(usize, usize); 4], participant: u8) -> f64 {
        let opponent = other_player(participant);
        let mut mine = 0;
        let mut theirs = 0;
        for (c, r) in cells {
            match state.cell(c, r) {
                p if p == participant => mine += 1,
                p if p == opponent => theirs += 1,
                _ => {}
            }
        }
        match (mine, theirs) {
            (m, 0) => WINDOW_WEIGHTS[m],
            (0, t) => -WINDOW_WEIGHTS[t],
            _ => 0.0,
        }
    }
}

impl Evaluator<State> for Connect4Evaluator {
    fn score(&self, state: &State, participant: u8) -> f64 {
        let mut score = 0.0;

        let center = COLS / 2;
        for row in 0..ROWS {
            match state.cell(center, row) {
                0 => {}
                p if p == participant => score += CENTER_WEIGHT,
                _ => score -= CENTER_WEIGHT,
            }
        }

        for row in 0..ROWS {
            for col in 0..COLS {
                if col + 3 < COLS {
                    let cells = [(col, row), (col + 1, row), (col + 2, row), (col + 3, row)];
                    score += Self::window_score(state, cells, participant);
                }
                if row + 3 < ROWS {
                    let cells = [(col, row), (col, row + 1), (col, row + 2), (col, row + 3)];
                    score += Self::window_score(state, cells, participant);
                }
                if col + 3 < COLS && row + 3 < ROWS {
                    let cells = [
                        (col, row),
                        (col + 1, row + 1),
                        (col + 2, row + 2),
                        (col + 3, row + 3),
                    ];
                    score += Self::window_score(state, cells, participant);
                }
                if col + 3 < COLS && row >= 3 {
                    let cells = [
                        (col, row),
                        (col + 1, row - 1),
                        (col + 2, row - 2),
                        (col + 3, row - 3),
                    ];
                    score += Self::window_score(state, cells, participant);
                }
            }
        }

        score
    }
}

/// Tries central columns first.
///
/// A central drop is good for whoever makes it, so the priority is positive
/// when `perspective` is the side to move and negative otherwise.
#[derive(Debug, Clone, Copy, Default)]
pub struct CenterOrdering;

impl MoveOrdering<State> for CenterOrdering {
    fn priority(&self, state: &State, action: &u8, perspective: u8) -> f64 {
        let distance = (*action as i32 - (COLS / 2) as i32).abs();
        let centrality = (COLS as i32 - distance) as f64;
        if state.acting_participant() == perspective {
            centrality
        } else {
            -centrality
        }
    }
}
