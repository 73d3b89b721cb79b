//! Property tests for the movement, turn and AI invariants.

use mirchi_ludo::config::HOME_INDEX;
use mirchi_ludo::{
    GameMode, GameState, MoveOutcome, PawnPosition, PlayerColor, Rejection, StrategyKind,
};
use proptest::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;

fn any_color() -> impl Strategy<Value = PlayerColor> {
    prop::sample::select(PlayerColor::ALL.to_vec())
}

fn any_mode() -> impl Strategy<Value = GameMode> {
    prop::sample::select(vec![GameMode::Classic, GameMode::Mirchi])
}

/// A game where `color` is up and holds no roll yet.
fn state_for(color: PlayerColor, mode: GameMode) -> GameState {
    let mut state = GameState::new(mode);
    while state.current_player != color {
        state.next_turn(true);
    }
    state
}

proptest! {
    #[test]
    fn prop_pawn_leaves_yard_only_on_six(
        color in any_color(),
        pawn_id in 0usize..4,
        steps in 1u32..=6,
    ) {
        let mut state = state_for(color, GameMode::Classic);
        // Keep a pawn on the board so every roll is live
        let anchor = (pawn_id + 1) % 4;
        state.set_pawn_position(color, anchor, PawnPosition::OnPath(10)).unwrap();
        state.test_roll_dice(steps);

        let outcome = state.move_pawn(color, pawn_id, steps);
        let position = state.pawns_of(color)[pawn_id].position;
        if steps == 6 {
            prop_assert!(outcome.is_applied());
            prop_assert_eq!(position, PawnPosition::OnPath(0));
        } else {
            prop_assert_eq!(outcome, MoveOutcome::Rejected(Rejection::PawnNotEligible(pawn_id)));
            prop_assert_eq!(position, PawnPosition::AtHome);
        }
    }

    #[test]
    fn prop_overshoot_never_moves_pawn(
        color in any_color(),
        index in 50usize..HOME_INDEX,
        steps in 1u32..=6,
    ) {
        let mut state = state_for(color, GameMode::Classic);
        state.set_pawn_position(color, 0, PawnPosition::OnPath(index)).unwrap();
        prop_assert_eq!(state.is_valid_move(color, 0, steps), index + steps as usize <= HOME_INDEX);

        state.test_roll_dice(steps);
        if state.eligible_pawns.contains(&0) {
            // Bypass eligibility with a longer step count than the roll
            let outcome = state.move_pawn(color, 0, (HOME_INDEX - index) as u32 + 1);
            let overshoot = matches!(outcome, MoveOutcome::Rejected(Rejection::Overshoot { .. }));
            prop_assert!(overshoot, "expected an overshoot rejection, got {:?}", outcome);
        } else {
            prop_assert!(index + steps as usize > HOME_INDEX);
        }
        prop_assert_eq!(state.pawns_of(color)[0].position, PawnPosition::OnPath(index));
    }

    #[test]
    fn prop_validity_helper_agrees_with_move(
        color in any_color(),
        index in 0usize..HOME_INDEX,
        steps in 0u32..=10,
    ) {
        let mut state = state_for(color, GameMode::Classic);
        state.set_pawn_position(color, 0, PawnPosition::OnPath(index)).unwrap();
        state.test_roll_dice(HOME_INDEX as u32 - index as u32);
        prop_assert!(state.eligible_pawns.contains(&0));

        let valid = state.is_valid_move(color, 0, steps);
        let applied = state.move_pawn(color, 0, steps).is_applied();
        prop_assert_eq!(valid, applied);
        if !applied {
            prop_assert_eq!(state.pawns_of(color)[0].position, PawnPosition::OnPath(index));
        }
    }

    #[test]
    fn prop_quiet_move_advances_turn_by_one(
        color in any_color(),
        index in 14usize..40,
        steps in 1u32..=5,
    ) {
        let mut state = state_for(color, GameMode::Classic);
        state.set_pawn_position(color, 0, PawnPosition::OnPath(index)).unwrap();
        state.test_roll_dice(steps);

        let report = state.move_pawn(color, 0, steps).report().cloned();
        prop_assert!(report.is_some());
        prop_assert_eq!(state.current_player, color.next());
        prop_assert_eq!(state.current_roll_player, None);
        prop_assert!(state.eligible_pawns.is_empty());
    }

    #[test]
    fn prop_six_keeps_the_turn(color in any_color(), index in 0usize..40) {
        let mut state = state_for(color, GameMode::Classic);
        state.set_pawn_position(color, 0, PawnPosition::OnPath(index)).unwrap();
        state.test_roll_dice(6);

        prop_assert!(state.move_pawn(color, 0, 6).is_applied());
        prop_assert_eq!(state.current_player, color);
        prop_assert_eq!(state.current_roll_player, None);
        prop_assert!(state.eligible_pawns.is_empty());
        prop_assert!(!state.test_roll_dice(3).is_rejected());
    }

    #[test]
    fn prop_only_the_roll_owner_moves(
        color in any_color(),
        intruder in any_color(),
        pawn_id in 0usize..4,
    ) {
        let mut state = state_for(color, GameMode::Classic);
        state.test_roll_dice(6);

        let outcome = state.move_pawn(intruder, pawn_id, 6);
        if intruder == color {
            prop_assert!(outcome.is_applied());
        } else {
            prop_assert_eq!(outcome, MoveOutcome::Rejected(Rejection::NotYourTurn(intruder)));
            prop_assert!(state.pawns_of(intruder).iter().all(|p| p.is_at_home()));
        }
    }

    #[test]
    fn prop_strategies_pick_from_eligible_set(
        seed in any::<u64>(),
        mode in any_mode(),
        dice in 1u32..=6,
        tokens in 0u32..3,
        indexes in prop::collection::vec(prop::option::of(0usize..HOME_INDEX), 4),
        rivals in prop::collection::vec(0usize..51, 0..4),
    ) {
        let mut state = GameState::new(mode);
        for (id, index) in indexes.iter().enumerate() {
            if let Some(index) = index {
                state.set_pawn_position(PlayerColor::Red, id, PawnPosition::OnPath(*index)).unwrap();
            }
        }
        for (id, index) in rivals.iter().enumerate() {
            state.set_pawn_position(PlayerColor::Green, id, PawnPosition::OnPath(*index)).unwrap();
        }
        state.mirchi_moves_remaining.insert(PlayerColor::Red, tokens);
        state.dice_value = dice;

        let eligible = state.compute_eligible_pawns(PlayerColor::Red, dice);
        let mut rng = StdRng::seed_from_u64(seed);
        for kind in StrategyKind::ALL {
            let choice = kind.build().select_move(&eligible, PlayerColor::Red, &state, &mut rng);
            match choice {
                None => prop_assert!(eligible.is_empty()),
                Some(choice) => {
                    prop_assert!(eligible.contains(&choice.pawn_id));
                    if choice.move_backwards {
                        prop_assert!(state.is_valid_backward_move(PlayerColor::Red, choice.pawn_id, dice));
                    }
                    if kind == StrategyKind::Random {
                        prop_assert!(!choice.move_backwards);
                    }
                }
            }
        }
    }
}
