//! # Random Strategy
//!
//! Picks any eligible pawn with equal probability and always moves forward.

use super::tactics::random_pick;
use super::{AiStrategy, MoveChoice, StrategyKind};
use crate::{GameState, PlayerColor};
use rand::RngCore;
use std::collections::BTreeSet;

#[derive(Debug, Clone, Copy, Default)]
pub struct RandomStrategy;

impl AiStrategy for RandomStrategy {
    fn kind(&self) -> StrategyKind {
        StrategyKind::Random
    }

    fn select_move(
        &self,
        eligible: &BTreeSet<usize>,
        _player: PlayerColor,
        _state: &GameState,
        rng: &mut dyn RngCore,
    ) -> Option<MoveChoice> {
        random_pick(eligible, rng).map(MoveChoice::forward)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{GameMode, PawnPosition};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_random_never_moves_backward() {
        let mut rng = StdRng::seed_from_u64(5);
        let mut state = GameState::new(GameMode::Mirchi);
        state.mirchi_moves_remaining.insert(PlayerColor::Red, 4);
        state.dice_value = 2;
        for id in 0..4 {
            state
                .set_pawn_position(PlayerColor::Red, id, PawnPosition::OnPath(10 + id))
                .unwrap();
        }
        let eligible = BTreeSet::from([0, 1, 2, 3]);
        let mut seen = BTreeSet::new();
        for _ in 0..200 {
            let choice = RandomStrategy
                .select_move(&eligible, PlayerColor::Red, &state, &mut rng)
                .unwrap();
            assert!(!choice.move_backwards);
            seen.insert(choice.pawn_id);
        }
        assert_eq!(seen, eligible);
    }
}
