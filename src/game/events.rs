//! # Game Events
//!
//! Observational notices emitted by the state machine for the presentation layer
//! (animation, sound, end-of-game screens). Events never feed back into legality or
//! scoring; the state queues them and the owner drains the queue.

use crate::{PawnPosition, PlayerColor};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Something that happened during a turn step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum GameEvent {
    /// A die was rolled (or forced by a test roll)
    DiceRolled { color: PlayerColor, value: u32 },
    /// A pawn changed position
    PawnMoved {
        color: PlayerColor,
        pawn_id: usize,
        from: PawnPosition,
        to: PawnPosition,
        backwards: bool,
    },
    /// An opponent pawn was sent back to its yard
    PawnCaptured {
        color: PlayerColor,
        pawn_id: usize,
        by: PlayerColor,
    },
    /// First capture of the game, by any color
    FirstBlood { color: PlayerColor },
    /// A capture achieved with a backward move
    MirchiBackwardCapture { color: PlayerColor },
    /// A pawn reached its home cell
    PawnReachedHome {
        color: PlayerColor,
        pawn_id: usize,
        completed_all_four: bool,
    },
    /// A color brought all four pawns home
    PlayerFinished { color: PlayerColor, bonus_points: u32 },
    /// A roll had no legal move and the turn moved on
    TurnPassed { from: PlayerColor, to: PlayerColor },
    /// No further turns will be played
    GameOver { rankings: Vec<PlayerColor> },
}

/// Per-game statistics consumed by end-of-game presentation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameStatistics {
    /// Opponent pawns captured, per capturing color
    pub kill_counts: BTreeMap<PlayerColor, u32>,
    /// Every dice value rolled, per color, in order
    pub dice_roll_history: BTreeMap<PlayerColor, Vec<u32>>,
    /// Color that made the first capture of the game
    pub first_kill_player: Option<PlayerColor>,
    /// Captures made with backward moves, per color
    pub backward_captures: BTreeMap<PlayerColor, u32>,
    /// Pawn moves applied, per color
    pub moves_made: BTreeMap<PlayerColor, u32>,
}

impl GameStatistics {
    /// Creates new empty statistics.
    pub fn new() -> Self {
        Self::default()
    }

    /// Updates statistics based on a game event.
    pub fn update_from_event(&mut self, event: &GameEvent) {
        match event {
            GameEvent::DiceRolled { color, value } => {
                self.dice_roll_history
                    .entry(*color)
                    .or_default()
                    .push(*value);
            }
            GameEvent::PawnMoved { color, .. } => {
                *self.moves_made.entry(*color).or_default() += 1;
            }
            GameEvent::PawnCaptured { by, .. } => {
                *self.kill_counts.entry(*by).or_default() += 1;
            }
            GameEvent::FirstBlood { color } => {
                self.first_kill_player.get_or_insert(*color);
            }
            GameEvent::MirchiBackwardCapture { color } => {
                *self.backward_captures.entry(*color).or_default() += 1;
            }
            _ => {}
        }
    }

    /// Captures made by a color.
    pub fn kills(&self, color: PlayerColor) -> u32 {
        self.kill_counts.get(&color).copied().unwrap_or(0)
    }

    /// Number of sixes a color rolled.
    pub fn sixes_rolled(&self, color: PlayerColor) -> usize {
        self.dice_roll_history
            .get(&color)
            .map(|rolls| rolls.iter().filter(|&&v| v == 6).count())
            .unwrap_or(0)
    }
}
