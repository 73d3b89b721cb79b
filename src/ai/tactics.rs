//! # Tactics
//!
//! Read-only move evaluations shared by the strategies. All of them use the live
//! dice value and the same validity helpers the state machine enforces.

use crate::{is_safe_position, path_for, GameState, PlayerColor, Position};
use rand::seq::SliceRandom;
use rand::RngCore;
use std::collections::BTreeSet;

/// Cell a pawn would land on with the current dice value.
///
/// Backward destinations also require the move to be affordable.
pub fn destination_cell(
    state: &GameState,
    player: PlayerColor,
    pawn_id: usize,
    backwards: bool,
) -> Option<Position> {
    if backwards && !state.is_valid_backward_move(player, pawn_id, state.dice_value) {
        return None;
    }
    let index = state.get_destination_index(player, pawn_id, state.dice_value, backwards)?;
    path_for(player).get(index).copied()
}

/// Whether moving the pawn would capture an opponent.
pub fn captures(state: &GameState, player: PlayerColor, pawn_id: usize, backwards: bool) -> bool {
    destination_cell(state, player, pawn_id, backwards)
        .is_some_and(|cell| state.would_capture(player, cell))
}

/// Whether moving the pawn would end on a safe cell.
pub fn lands_safe(state: &GameState, player: PlayerColor, pawn_id: usize, backwards: bool) -> bool {
    destination_cell(state, player, pawn_id, backwards).is_some_and(is_safe_position)
}

/// Whether the pawn stands on the board outside any safe cell.
pub fn is_exposed(state: &GameState, player: PlayerColor, pawn_id: usize) -> bool {
    state
        .pawn_cell(player, pawn_id)
        .is_some_and(|cell| !is_safe_position(cell))
}

/// Whether the pawn is still waiting in its yard.
pub fn is_in_yard(state: &GameState, player: PlayerColor, pawn_id: usize) -> bool {
    state.pawn(player, pawn_id).is_some_and(|p| p.is_at_home())
}

/// The candidate with the greatest progress; the first one wins ties.
pub fn most_advanced(
    state: &GameState,
    player: PlayerColor,
    candidates: impl IntoIterator<Item = usize>,
) -> Option<usize> {
    let mut best: Option<(usize, i64)> = None;
    for id in candidates {
        let Some(progress) = state.pawn(player, id).map(|p| p.progress()) else {
            continue;
        };
        if best.map_or(true, |(_, top)| progress > top) {
            best = Some((id, progress));
        }
    }
    best.map(|(id, _)| id)
}

/// Grid cells of every opponent pawn on the board.
pub fn opponent_cells(state: &GameState, player: PlayerColor) -> Vec<Position> {
    player
        .opponents()
        .flat_map(|color| {
            state
                .pawns_of(color)
                .iter()
                .filter_map(move |pawn| state.pawn_cell(color, pawn.id))
        })
        .collect()
}

/// Uniformly random member of the set.
pub fn random_pick(eligible: &BTreeSet<usize>, rng: &mut dyn RngCore) -> Option<usize> {
    let ids: Vec<usize> = eligible.iter().copied().collect();
    ids.choose(rng).copied()
}
