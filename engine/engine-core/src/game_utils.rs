//! Shared helpers for game implementations and engine callers.

use crate::error::SearchError;
use crate::state::{GameState, Outcome};

/// Outcome for a two-player game encoded with the usual winner byte.
///
/// `winner`: 0 = ongoing, 1 = player one, 2 = player two, 3 = draw.
///
/// # Example
/// ```
/// use engine_core::game_utils::two_player_outcome;
/// use engine_core::Outcome;
///
/// assert_eq!(two_player_outcome(1, 1), Some(Outcome::Win));
/// assert_eq!(two_player_outcome(1, 2), Some(Outcome::Loss));
/// assert_eq!(two_player_outcome(3, 1), Some(Outcome::Draw));
/// assert_eq!(two_player_outcome(0, 1), None);
/// ```
#[inline]
pub fn two_player_outcome(winner: u8, participant: u8) -> Option<Outcome> {
    match winner {
        0 => None,
        3 => Some(Outcome::Draw),
        w if w == participant => Some(Outcome::Win),
        _ => Some(Outcome::Loss),
    }
}

/// The other seat of a two-player game using seats 1 and 2.
#[inline]
pub fn other_player(player: u8) -> u8 {
    if player == 1 {
        2
    } else {
        1
    }
}

/// Play `actions` from `start`, checking each one is legal when played.
pub fn play_sequence<S: GameState>(start: &S, actions: &[S::Action]) -> Result<S, SearchError> {
    let mut state = start.clone();
    for (ply, action) in actions.iter().enumerate() {
        if !state.legal_actions().contains(action) {
            return Err(SearchError::contract(format!(
                "action {action:?} at ply {ply} is not legal in {state:?}"
            )));
        }
        state.apply(action);
    }
    Ok(state)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, Hash, PartialEq, Eq)]
    struct Line {
        pos: i8,
    }

    impl GameState for Line {
        type Action = i8;
        type Participant = u8;

        fn legal_actions(&self) -> Vec<i8> {
            if self.is_terminal() {
                Vec::new()
            } else {
                vec![-1, 1]
            }
        }
        fn apply(&mut self, action: &i8) {
            self.pos += action;
        }
        fn is_terminal(&self) -> bool {
            self.pos.abs() >= 2
        }
        fn outcome(&self, _participant: u8) -> Option<Outcome> {
            self.is_terminal().then_some(Outcome::Draw)
        }
        fn acting_participant(&self) -> u8 {
            1
        }
    }

    #[test]
    fn test_other_player() {
        assert_eq!(other_player(1), 2);
        assert_eq!(other_player(2), 1);
    }

    #[test]
    fn test_play_sequence() {
        let end = play_sequence(&Line { pos: 0 }, &[1, -1, 1]).unwrap();
        assert_eq!(end.pos, 1);
    }

    #[test]
    fn test_play_sequence_rejects_moves_after_game_over() {
        let err = play_sequence(&Line { pos: 0 }, &[1, 1, 1]).unwrap_err();
        assert!(matches!(err, SearchError::ContractViolation(_)));
    }
}
