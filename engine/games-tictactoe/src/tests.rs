use super::*;
use engine_core::game_utils::play_sequence;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha20Rng;

#[test]
fn test_initial_state() {
    let state = State::new();
    assert_eq!(state.board, [0; 9]);
    assert_eq!(state.current_player, 1);
    assert_eq!(state.winner, 0);
    assert!(!state.is_done());
    assert_eq!(state.acting_participant(), 1);
}

#[test]
fn test_legal_moves() {
    let state = State::new();
    assert_eq!(state.legal_actions(), (0..9).collect::<Vec<_>>());

    // After one move
    let state = state.make_move(4); // Center
    let legal = state.legal_actions();
    assert_eq!(legal.len(), 8);
    assert!(!legal.contains(&4));
}

#[test]
fn test_apply_switches_player() {
    let mut state = State::new();
    state.apply(&4);

    assert_eq!(state.board[4], 1);
    assert_eq!(state.acting_participant(), 2);
    assert!(!state.is_terminal());
    assert_eq!(state.outcome(1), None);
}

#[test]
fn test_successor_leaves_original_untouched() {
    let state = State::new();
    let next = state.successor(&0);
    assert_eq!(state, State::new());
    assert_eq!(next.board[0], 1);
}

#[test]
fn test_invalid_move() {
    let state = State::new().make_move(4);
    let invalid_state = state.make_move(4);
    assert_eq!(invalid_state, state);
}

#[test]
fn test_winning_game() {
    let state = play_sequence(&State::new(), &[0, 3, 1, 4, 2]).unwrap();

    assert_eq!(state.winner, 1);
    assert!(state.is_terminal());
    assert!(state.legal_actions().is_empty());
    assert_eq!(state.outcome(1), Some(Outcome::Win));
    assert_eq!(state.outcome(2), Some(Outcome::Loss));
}

#[test]
fn test_draw_game() {
    // X O X / O X O / O X O
    let state = State::from_board([1, 2, 1, 2, 1, 2, 2, 1, 2]);
    assert_eq!(state.winner, 3);
    assert!(state.is_terminal());
    assert_eq!(state.outcome(1), Some(Outcome::Draw));
    assert_eq!(state.outcome(2), Some(Outcome::Draw));
}

#[test]
fn test_all_winning_lines() {
    for (line_idx, line) in LINES.iter().enumerate() {
        for player in [1u8, 2] {
            let mut board = [0u8; 9];
            for &pos in line {
                board[pos] = player;
            }
            assert_eq!(
                State::check_winner(&board),
                player,
                "player {} should win on line {}: {:?}",
                player,
                line_idx,
                line
            );
        }
    }
}

#[test]
fn test_from_board_derives_side_to_move() {
    assert_eq!(State::from_board([1, 0, 0, 0, 0, 0, 0, 0, 0]).current_player(), 2);
    assert_eq!(State::from_board([1, 2, 0, 0, 0, 0, 0, 0, 0]).current_player(), 1);
    assert_eq!(State::from_board([1, 1, 1, 2, 2, 0, 0, 0, 0]).winner(), 1);
}

#[test]
fn test_position_key_distinguishes_side_to_move() {
    let a = State::new().make_move(0).make_move(1);
    let b = State::new().make_move(1).make_move(0);
    // Same squares, different owners
    assert_ne!(a.position_key(), b.position_key());

    let c = State::new().make_move(0).make_move(1).make_move(2).make_move(3);
    let d = State::new().make_move(2).make_move(3).make_move(0).make_move(1);
    assert_eq!(c.position_key(), d.position_key());
}

#[test]
fn test_line_evaluator_is_antisymmetric() {
    let state = State::new().make_move(4).make_move(0).make_move(8);
    let x = LineEvaluator.score(&state, 1);
    let o = LineEvaluator.score(&state, 2);
    assert!(x > 0.0);
    assert_eq!(x, -o);
    assert_eq!(LineEvaluator.score(&State::new(), 1), 0.0);
}

/// Play many random games and verify invariants hold
#[test]
fn test_random_games_invariants() {
    for seed in 0..50 {
        let mut rng = ChaCha20Rng::seed_from_u64(seed);
        let mut state = State::new();
        let mut move_count = 0;

        while !state.is_terminal() {
            let legal = state.legal_actions();
            assert!(
                !legal.is_empty(),
                "Non-terminal game must have legal moves (seed={})",
                seed
            );

            let prev_player = state.acting_participant();
            state.apply(&legal[rng.gen_range(0..legal.len())]);
            move_count += 1;

            if state.is_terminal() {
                assert!(state.legal_actions().is_empty());
                let outcome = state.outcome(prev_player);
                assert!(
                    matches!(outcome, Some(Outcome::Win) | Some(Outcome::Draw)),
                    "the mover cannot lose on their own move (seed={})",
                    seed
                );
            } else {
                assert_ne!(state.acting_participant(), prev_player);
                assert_eq!(state.outcome(1), None);
            }
        }

        assert!(move_count <= 9, "Game should finish within 9 moves (seed={})", seed);
    }
}
