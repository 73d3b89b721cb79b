//! # Aggressive Strategy
//!
//! Captures whenever it can and otherwise hunts the nearest opponent.
//!
//! Tiers, first match wins:
//! 1. a capture, checked per pawn: forward first, then (mirchi) backward
//! 2. on a six, leave the yard with probability `home_exit_probability`
//! 3. forward move ending closest (Manhattan) to any opponent pawn
//! 4. (mirchi) backward retreat onto a safe cell
//! 5. most advanced pawn, yard pawns ranking lowest
//! 6. random eligible pawn

use super::tactics::{
    captures, destination_cell, is_in_yard, lands_safe, most_advanced, opponent_cells,
    random_pick,
};
use super::{AiStrategy, MoveChoice, StrategyKind};
use crate::config::{AGGRESSIVE_HOME_EXIT_PROBABILITY, HOME_EXIT_ROLL};
use crate::{GameMode, GameState, PlayerColor};
use rand::{Rng, RngCore};
use std::collections::BTreeSet;

#[derive(Debug, Clone, Copy)]
pub struct AggressiveStrategy {
    /// Chance of taking an available home exit on a six
    pub home_exit_probability: f64,
}

impl AggressiveStrategy {
    pub fn new(home_exit_probability: f64) -> Self {
        Self {
            home_exit_probability: home_exit_probability.clamp(0.0, 1.0),
        }
    }

    fn capture(&self, eligible: &BTreeSet<usize>, player: PlayerColor, state: &GameState) -> Option<MoveChoice> {
        let mirchi = state.mode == GameMode::Mirchi;
        eligible.iter().copied().find_map(|id| {
            if captures(state, player, id, false) {
                Some(MoveChoice::forward(id))
            } else if mirchi && captures(state, player, id, true) {
                Some(MoveChoice::backward(id))
            } else {
                None
            }
        })
    }

    fn chase(&self, eligible: &BTreeSet<usize>, player: PlayerColor, state: &GameState) -> Option<MoveChoice> {
        let targets = opponent_cells(state, player);
        if targets.is_empty() {
            return None;
        }

        let mut best: Option<(usize, u32)> = None;
        for &id in eligible {
            if captures(state, player, id, false) {
                continue;
            }
            let Some(cell) = destination_cell(state, player, id, false) else {
                continue;
            };
            let Some(distance) = targets.iter().map(|t| cell.manhattan_distance(*t)).min() else {
                continue;
            };
            if best.map_or(true, |(_, closest)| distance < closest) {
                best = Some((id, distance));
            }
        }
        best.map(|(id, _)| MoveChoice::forward(id))
    }
}

impl Default for AggressiveStrategy {
    fn default() -> Self {
        Self::new(AGGRESSIVE_HOME_EXIT_PROBABILITY)
    }
}

impl AiStrategy for AggressiveStrategy {
    fn kind(&self) -> StrategyKind {
        StrategyKind::Aggressive
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

        if let Some(choice) = self.capture(eligible, player, state) {
            return Some(choice);
        }

        if state.dice_value == HOME_EXIT_ROLL {
            if let Some(id) = eligible.iter().copied().find(|&id| is_in_yard(state, player, id)) {
                if rng.gen_bool(self.home_exit_probability) {
                    return Some(MoveChoice::forward(id));
                }
            }
        }

        if let Some(choice) = self.chase(eligible, player, state) {
            return Some(choice);
        }

        if state.mode == GameMode::Mirchi {
            if let Some(id) = eligible.iter().copied().find(|&id| lands_safe(state, player, id, true)) {
                return Some(MoveChoice::backward(id));
            }
        }

        most_advanced(state, player, eligible.iter().copied())
            .or_else(|| random_pick(eligible, rng))
            .map(MoveChoice::forward)
    }
}
