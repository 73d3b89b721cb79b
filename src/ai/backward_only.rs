//! # Backward-Only Strategy
//!
//! Deterministic strategy for reproducible mirchi tests: the first eligible pawn
//! that can move backward does, otherwise the first eligible pawn moves forward.

use super::{AiStrategy, MoveChoice, StrategyKind};
use crate::{GameMode, GameState, PlayerColor};
use rand::RngCore;
use std::collections::BTreeSet;

#[derive(Debug, Clone, Copy, Default)]
pub struct BackwardOnlyStrategy;

impl AiStrategy for BackwardOnlyStrategy {
    fn kind(&self) -> StrategyKind {
        StrategyKind::BackwardOnly
    }

    fn select_move(
        &self,
        eligible: &BTreeSet<usize>,
        player: PlayerColor,
        state: &GameState,
        _rng: &mut dyn RngCore,
    ) -> Option<MoveChoice> {
        if state.mode == GameMode::Mirchi {
            let backward = eligible
                .iter()
                .copied()
                .find(|&id| state.is_valid_backward_move(player, id, state.dice_value));
            if let Some(id) = backward {
                return Some(MoveChoice::backward(id));
            }
        }
        eligible.iter().next().copied().map(MoveChoice::forward)
    }
}
