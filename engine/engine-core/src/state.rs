//! The game state contract every search engine is written against.
//!
//! Games implement [`GameState`] with their own strongly-typed action and
//! participant types. The engines never look inside a state: they clone it,
//! apply actions to the clone, enumerate legal actions and read the outcome
//! once the game is over.

use std::collections::hash_map::DefaultHasher;
use std::fmt::Debug;
use std::hash::{Hash, Hasher};

/// Result of a finished game from one participant's point of view.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Outcome {
    Win,
    Loss,
    Draw,
    /// Continuous payoff (chips won, points scored, ...).
    Score(f64),
}

impl Outcome {
    /// Reward used by the stochastic engines.
    ///
    /// Win/loss/draw map onto `+1 / -1 / 0`; continuous scores pass through
    /// unchanged.
    #[inline]
    pub fn reward(self) -> f64 {
        match self {
            Outcome::Win => 1.0,
            Outcome::Loss => -1.0,
            Outcome::Draw => 0.0,
            Outcome::Score(score) => score,
        }
    }

    /// The same result seen from the other side of a two-sided zero-sum game.
    pub fn flipped(self) -> Self {
        match self {
            Outcome::Win => Outcome::Loss,
            Outcome::Loss => Outcome::Win,
            Outcome::Draw => Outcome::Draw,
            Outcome::Score(score) => Outcome::Score(-score),
        }
    }
}

/// Immutable-view abstraction over one game position.
///
/// # Contract
///
/// * Cloning produces an independent value: mutating the clone never affects
///   the original.
/// * Applying the same action sequence to equal states yields equal states.
/// * `legal_actions` is empty only when `is_terminal` is true.
/// * `outcome` returns `Some` only when `is_terminal` is true.
///
/// # Example
///
/// ```rust
/// use engine_core::{GameState, Outcome};
///
/// /// Players alternately take one or two stones; taking the last one wins.
/// #[derive(Debug, Clone, Hash, PartialEq, Eq)]
/// struct Nim {
///     stones: u8,
///     to_move: u8,
/// }
///
/// impl GameState for Nim {
///     type Action = u8;
///     type Participant = u8;
///
///     fn legal_actions(&self) -> Vec<u8> {
///         (1..=2).filter(|&n| n <= self.stones).collect()
///     }
///
///     fn apply(&mut self, action: &u8) {
///         self.stones -= action;
///         self.to_move = 1 - self.to_move;
///     }
///
///     fn is_terminal(&self) -> bool {
///         self.stones == 0
///     }
///
///     fn outcome(&self, participant: u8) -> Option<Outcome> {
///         if !self.is_terminal() {
///             return None;
///         }
///         // The player who just moved took the last stone.
///         Some(if participant != self.to_move { Outcome::Win } else { Outcome::Loss })
///     }
///
///     fn acting_participant(&self) -> u8 {
///         self.to_move
///     }
/// }
///
/// let start = Nim { stones: 3, to_move: 0 };
/// let next = start.successor(&2);
/// assert_eq!(start.stones, 3);
/// assert_eq!(next.stones, 1);
/// ```
pub trait GameState: Clone + Hash + Debug + Send + Sync + 'static {
    /// One legal move from a given state.
    type Action: Clone + Eq + Hash + Debug + Send + Sync;

    /// Identifies a side of the game (player index, seat, color).
    type Participant: Copy + Eq + Hash + Debug + Send + Sync;

    /// Legal actions in a fixed, reproducible order.
    fn legal_actions(&self) -> Vec<Self::Action>;

    /// Apply `action` in place. Engines only ever call this on clones.
    fn apply(&mut self, action: &Self::Action);

    /// Whether the game is over.
    fn is_terminal(&self) -> bool;

    /// Final result for `participant`. `None` while the game is in progress.
    fn outcome(&self, participant: Self::Participant) -> Option<Outcome>;

    /// The participant whose decision this state is waiting for.
    fn acting_participant(&self) -> Self::Participant;

    /// Probability distribution over nature's moves when this is a chance node.
    ///
    /// The default marks every state as a decision node.
    fn chance_distribution(&self) -> Option<Vec<(Self::Action, f64)>> {
        None
    }

    /// Canonical 64-bit key of this position.
    ///
    /// The default hashes the whole state with `DefaultHasher::new()`. Keys are
    /// deterministic within one build, but the algorithm may change between
    /// Rust releases, so they must not be persisted across builds. Games with
    /// incremental hashing (e.g. Zobrist) may override it.
    fn position_key(&self) -> u64 {
        let mut hasher = DefaultHasher::new();
        self.hash(&mut hasher);
        hasher.finish()
    }

    /// Clone the state and apply `action` to the clone.
    fn successor(&self, action: &Self::Action) -> Self {
        let mut next = self.clone();
        next.apply(action);
        next
    }
}
