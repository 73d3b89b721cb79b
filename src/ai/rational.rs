//! # Rational Strategy
//!
//! Prefers captures, then protects exposed pawns, then gets pawns out of the yard,
//! then plays safe, then makes progress.
//!
//! Tiers, first match wins:
//! 0. (mirchi) backward move that captures
//! 1. forward move that captures
//! 2. most advanced pawn standing on an unsafe cell
//! 3. on a six, a pawn leaving the yard
//! 4. (mirchi, more than one token) backward retreat onto a safe cell
//! 5. forward move onto a safe cell
//! 6. most advanced pawn on the board
//! 7. random eligible pawn

use super::tactics::{captures, is_exposed, is_in_yard, lands_safe, most_advanced, random_pick};
use super::{AiStrategy, MoveChoice, StrategyKind};
use crate::config::HOME_EXIT_ROLL;
use crate::{GameMode, GameState, PlayerColor};
use rand::RngCore;
use std::collections::BTreeSet;

#[derive(Debug, Clone, Copy, Default)]
pub struct RationalStrategy;

impl AiStrategy for RationalStrategy {
    fn kind(&self) -> StrategyKind {
        StrategyKind::Rational
    }

    fn select_move(
        &self,
        eligible: &BTreeSet<usize>,
        player: PlayerColor,
        state: &GameState,
        rng: &mut dyn RngCore,
    ) -> Option<MoveChoice> {
        if eligible.is_empty() {
            return None;
        }
        let mirchi = state.mode == GameMode::Mirchi;
        let find = |pred: &dyn Fn(usize) -> bool| eligible.iter().copied().find(|&id| pred(id));

        let choice = mirchi
            .then(|| find(&|id| captures(state, player, id, true)))
            .flatten()
            .map(MoveChoice::backward)
            .or_else(|| find(&|id| captures(state, player, id, false)).map(MoveChoice::forward))
            .or_else(|| {
                let exposed = eligible
                    .iter()
                    .copied()
                    .filter(|&id| is_exposed(state, player, id));
                most_advanced(state, player, exposed).map(MoveChoice::forward)
            })
            .or_else(|| {
                (state.dice_value == HOME_EXIT_ROLL)
                    .then(|| find(&|id| is_in_yard(state, player, id)))
                    .flatten()
                    .map(MoveChoice::forward)
            })
            .or_else(|| {
                (mirchi && state.mirchi_tokens(player) > 1)
                    .then(|| find(&|id| lands_safe(state, player, id, true)))
                    .flatten()
                    .map(MoveChoice::backward)
            })
            .or_else(|| find(&|id| lands_safe(state, player, id, false)).map(MoveChoice::forward))
            .or_else(|| {
                let on_board = eligible
                    .iter()
                    .copied()
                    .filter(|&id| state.pawn(player, id).is_some_and(|p| p.path_index().is_some()));
                most_advanced(state, player, on_board).map(MoveChoice::forward)
            })
            .or_else(|| random_pick(eligible, rng).map(MoveChoice::forward));

        log::trace!("rational {} picked {:?}", player, choice);
        choice
    }
}
