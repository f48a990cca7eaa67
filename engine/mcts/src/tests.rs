use std::sync::atomic::AtomicBool;
use std::sync::Arc;

use engine_core::game_utils::play_sequence;
use engine_core::{Cancellation, GameState, Outcome, SearchError};
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;

use crate::{
    run_mcts, ExpansionOrder, FinalSelection, FlatMonteCarlo, MctsConfig, MctsSearch,
    RandomRollout, ValuePerspective,
};

/// X to move with X at 0 and 1, O at 3 and 4: square 2 wins.
fn tictactoe_win_in_one() -> games_tictactoe::State {
    games_tictactoe::State::from_board([1, 1, 0, 2, 2, 0, 0, 0, 0])
}

fn search_with(
    state: &games_tictactoe::State,
    config: MctsConfig,
) -> engine_core::SearchResult<u8> {
    run_mcts(state, &RandomRollout::new(), config, &Cancellation::none()).unwrap()
}

// =============================================================================
// Visit accounting
// =============================================================================

#[test]
fn test_root_visits_equal_budget() {
    let state = games_tictactoe::State::new();
    let config = MctsConfig::for_testing().with_simulations(300).with_seed(5);
    let rollout = RandomRollout::new();
    let mut search = MctsSearch::new(&state, &rollout, config).unwrap();
    let mut rng = ChaCha20Rng::seed_from_u64(5);

    let result = search.run(&mut rng, &Cancellation::none()).unwrap();

    let tree = search.tree();
    let root = tree.get(tree.root());
    assert_eq!(root.visit_count, 300);
    let child_visits: u32 = root.children.iter().map(|id| tree.get(*id).visit_count).sum();
    assert_eq!(child_visits, 300);
    assert_eq!(result.stats.simulations, 300);
    assert_eq!(result.stats.nodes, tree.len() as u64);
    assert!(!result.stats.cancelled);
}

#[test]
fn test_every_node_visits_match_its_children() {
    let state = play_sequence(&games_tictactoe::State::new(), &[4, 0]).unwrap();
    let rollout = RandomRollout::new();
    let mut search = MctsSearch::new(&state, &rollout, MctsConfig::for_testing()).unwrap();
    let mut rng = ChaCha20Rng::seed_from_u64(17);
    search.run(&mut rng, &Cancellation::none()).unwrap();

    // Each visit either stops at the node or continues into exactly one child
    let tree = search.tree();
    for node in tree.arena() {
        let below: u32 = node.children.iter().map(|id| tree.get(*id).visit_count).sum();
        assert!(below <= node.visit_count);
        if !node.children.is_empty() && !node.is_terminal {
            assert!(node.visit_count - below <= 1);
        }
    }
}

#[test]
fn test_in_order_expansion_follows_legal_order() {
    let state = games_tictactoe::State::new();
    let config = MctsConfig::for_testing()
        .with_simulations(9)
        .with_expansion_order(ExpansionOrder::InOrder);
    let rollout = RandomRollout::new();
    let mut search = MctsSearch::new(&state, &rollout, config).unwrap();
    let mut rng = ChaCha20Rng::seed_from_u64(0);
    search.run(&mut rng, &Cancellation::none()).unwrap();

    let actions: Vec<u8> = search
        .tree()
        .root_summary()
        .into_iter()
        .map(|(action, visits, _)| {
            assert_eq!(visits, 1);
            action
        })
        .collect();
    assert_eq!(actions, (0..9).collect::<Vec<u8>>());
}

// =============================================================================
// Decisions
// =============================================================================

#[test]
fn test_finds_winning_move() {
    let result = search_with(
        &tictactoe_win_in_one(),
        MctsConfig::default().with_simulations(1000).with_seed(42),
    );
    assert_eq!(result.action, Some(2));
    // The winning child only ever sees wins
    assert!((result.value - 1.0).abs() < 1e-12);
}

#[test]
fn test_finds_winning_move_with_every_policy() {
    for selection in [FinalSelection::MostVisited, FinalSelection::HighestMean] {
        for perspective in [ValuePerspective::Root, ValuePerspective::Mover] {
            let config = MctsConfig::default()
                .with_simulations(1000)
                .with_seed(3)
                .with_final_selection(selection)
                .with_value_perspective(perspective);
            let result = search_with(&tictactoe_win_in_one(), config);
            assert_eq!(
                result.action,
                Some(2),
                "{selection:?} / {perspective:?} missed the win"
            );
        }
    }
}

#[test]
fn test_mover_perspective_blocks_a_threat() {
    // O O . / X . . / . . X with X to move: only square 2 stops O
    let state = play_sequence(&games_tictactoe::State::new(), &[3, 0, 8, 1]).unwrap();
    for seed in 0..20 {
        let config = MctsConfig::default()
            .with_value_perspective(ValuePerspective::Mover)
            .with_seed(seed);
        let result = search_with(&state, config);
        assert_eq!(result.action, Some(2), "seed {seed} let O win");
    }
}

#[test]
fn test_connect4_completes_four() {
    // Red holds columns 0-2 on the bottom row
    let state = play_sequence(&games_connect4::State::new(), &[0, 6, 1, 6, 2, 5]).unwrap();
    let result = run_mcts(
        &state,
        &RandomRollout::new(),
        MctsConfig::default().with_simulations(2000).with_seed(11),
        &Cancellation::none(),
    )
    .unwrap();
    assert_eq!(result.action, Some(3));
}

#[test]
fn test_same_seed_same_search() {
    let state = games_tictactoe::State::new();
    let config = MctsConfig::for_testing().with_seed(7);

    let first = search_with(&state, config.clone());
    let second = search_with(&state.clone(), config);
    assert_eq!(first, second);
}

#[test]
fn test_search_leaves_root_untouched() {
    let state = play_sequence(&games_tictactoe::State::new(), &[4]).unwrap();
    let before = state.clone();
    search_with(&state, MctsConfig::for_testing());
    assert_eq!(state, before);
}

#[test]
fn test_single_action_skips_search() {
    // Only square 8 is free; playing it draws
    let state = games_tictactoe::State::from_board([1, 2, 1, 1, 2, 2, 2, 1, 0]);
    let result = search_with(&state, MctsConfig::default());
    assert_eq!(result.action, Some(8));
    assert_eq!(result.value, 0.0);
    assert_eq!(result.stats.simulations, 0);
}

// =============================================================================
// Chance nodes
// =============================================================================

/// Bank a sure 1 or roll a die and score `face - offset`.
#[derive(Debug, Clone, Hash, PartialEq, Eq)]
enum Dice {
    Choose { offset: i32 },
    Rolling { offset: i32 },
    Done { payoff: i32 },
}

impl GameState for Dice {
    type Action = i32;
    type Participant = u8;

    fn legal_actions(&self) -> Vec<i32> {
        match self {
            Dice::Choose { .. } => vec![0, 1],
            Dice::Rolling { .. } => (1..=6).collect(),
            Dice::Done { .. } => Vec::new(),
        }
    }
    fn apply(&mut self, action: &i32) {
        *self = match *self {
            Dice::Choose { .. } if *action == 0 => Dice::Done { payoff: 1 },
            Dice::Choose { offset } => Dice::Rolling { offset },
            Dice::Rolling { offset } => Dice::Done {
                payoff: action - offset,
            },
            Dice::Done { payoff } => Dice::Done { payoff },
        };
    }
    fn is_terminal(&self) -> bool {
        matches!(self, Dice::Done { .. })
    }
    fn outcome(&self, _participant: u8) -> Option<Outcome> {
        match self {
            Dice::Done { payoff } => Some(Outcome::Score(*payoff as f64)),
            _ => None,
        }
    }
    fn acting_participant(&self) -> u8 {
        0
    }
    fn chance_distribution(&self) -> Option<Vec<(i32, f64)>> {
        match self {
            Dice::Rolling { .. } => Some((1..=6).map(|face| (face, 1.0 / 6.0)).collect()),
            _ => None,
        }
    }
}

#[test]
fn test_chance_nodes_are_sampled() {
    let config = MctsConfig::default()
        .with_simulations(2000)
        .with_seed(21)
        .with_final_selection(FinalSelection::HighestMean);
    let rollout = RandomRollout::new();

    // Rolling is worth 3.5 - offset against a sure 1
    let mut bold = MctsSearch::new(&Dice::Choose { offset: 2 }, &rollout, config.clone()).unwrap();
    let mut rng = ChaCha20Rng::seed_from_u64(21);
    let result = bold.run(&mut rng, &Cancellation::none()).unwrap();
    assert_eq!(result.action, Some(1));

    let tree = bold.tree();
    let roll = tree.find_child(tree.root(), &1).unwrap();
    let roll_node = tree.get(roll);
    assert!(roll_node.is_chance());
    assert!(roll_node.children.len() <= 6);
    // Every visit after the one that created the node samples a face
    let faces: u32 = roll_node.children.iter().map(|id| tree.get(*id).visit_count).sum();
    assert_eq!(faces + 1, roll_node.visit_count);

    let mut cautious = MctsSearch::new(&Dice::Choose { offset: 3 }, &rollout, config).unwrap();
    let mut rng = ChaCha20Rng::seed_from_u64(21);
    let result = cautious.run(&mut rng, &Cancellation::none()).unwrap();
    assert_eq!(result.action, Some(0));
    assert_eq!(result.value, 1.0);
}

#[test]
fn test_chance_root_is_rejected() {
    let err = run_mcts(
        &Dice::Rolling { offset: 0 },
        &RandomRollout::new(),
        MctsConfig::default(),
        &Cancellation::none(),
    )
    .unwrap_err();
    assert!(matches!(err, SearchError::ContractViolation(_)));
}

// =============================================================================
// Errors and cancellation
// =============================================================================

#[test]
fn test_invalid_config_is_rejected_before_search() {
    let err = run_mcts(
        &games_tictactoe::State::new(),
        &RandomRollout::new(),
        MctsConfig::default().with_simulations(0),
        &Cancellation::none(),
    )
    .unwrap_err();
    assert!(matches!(err, SearchError::InvalidConfig(_)));
}

#[test]
fn test_terminal_root_has_no_action() {
    // X completed the top row
    let state = games_tictactoe::State::from_board([1, 1, 1, 2, 2, 0, 0, 0, 0]);
    let err = run_mcts(
        &state,
        &RandomRollout::new(),
        MctsConfig::default(),
        &Cancellation::none(),
    )
    .unwrap_err();
    assert_eq!(err, SearchError::NoLegalActions);
}

#[test]
fn test_raised_stop_flag_runs_one_simulation() {
    let cancel = Cancellation::none().with_stop_flag(Arc::new(AtomicBool::new(true)));
    let result = run_mcts(
        &games_tictactoe::State::new(),
        &RandomRollout::new(),
        MctsConfig::default(),
        &cancel,
    )
    .unwrap();
    assert_eq!(result.stats.simulations, 1);
    assert!(result.stats.cancelled);
    assert!(result.action.is_some());
}

// =============================================================================
// Flat Monte-Carlo
// =============================================================================

#[test]
fn test_flat_finds_winning_move() {
    let flat = FlatMonteCarlo::new(500).with_seed(1);
    let result = flat
        .search(&tictactoe_win_in_one(), &RandomRollout::new(), &Cancellation::none())
        .unwrap();
    assert_eq!(result.action, Some(2));
    assert_eq!(result.value, 1.0);
    assert_eq!(result.stats.simulations, 500);
}

#[test]
fn test_flat_weighs_chance_outcomes() {
    let flat = FlatMonteCarlo::new(1200).with_seed(4);
    let rollout = RandomRollout::new();

    let bold = flat
        .search(&Dice::Choose { offset: 2 }, &rollout, &Cancellation::none())
        .unwrap();
    assert_eq!(bold.action, Some(1));

    let cautious = flat
        .search(&Dice::Choose { offset: 3 }, &rollout, &Cancellation::none())
        .unwrap();
    assert_eq!(cautious.action, Some(0));
    assert_eq!(cautious.value, 1.0);
}

#[test]
fn test_flat_is_deterministic() {
    let state = games_tictactoe::State::new();
    let flat = FlatMonteCarlo::new(180).with_seed(8);
    let rollout = RandomRollout::new();
    let a = flat.search(&state, &rollout, &Cancellation::none()).unwrap();
    let b = flat.search(&state, &rollout, &Cancellation::none()).unwrap();
    assert_eq!(a, b);
}

#[test]
fn test_flat_stop_flag_samples_first_action_only() {
    let cancel = Cancellation::none().with_stop_flag(Arc::new(AtomicBool::new(true)));
    let result = FlatMonteCarlo::new(100)
        .search(&games_tictactoe::State::new(), &RandomRollout::new(), &cancel)
        .unwrap();
    assert_eq!(result.action, Some(0));
    assert_eq!(result.stats.simulations, 1);
    assert!(result.stats.cancelled);
}

#[test]
fn test_flat_rejects_bad_input() {
    let rollout = RandomRollout::new();
    let err = FlatMonteCarlo::new(0)
        .search(&games_tictactoe::State::new(), &rollout, &Cancellation::none())
        .unwrap_err();
    assert!(matches!(err, SearchError::InvalidConfig(_)));

    let err = FlatMonteCarlo::new(10)
        .search(&Dice::Done { payoff: 0 }, &rollout, &Cancellation::none())
        .unwrap_err();
    assert_eq!(err, SearchError::NoLegalActions);
}
