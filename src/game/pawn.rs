//! # Pawns
//!
//! A pawn belongs to one color, has a stable id in `0..4` and is either waiting in
//! its yard, somewhere on its color's path, or finished.

use crate::config::HOME_INDEX;
use crate::PlayerColor;
use serde::{Deserialize, Serialize};

/// Where a pawn currently is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum PawnPosition {
    /// Waiting in the yard, not yet entered
    #[default]
    AtHome,
    /// On the path at this index; always below the home index
    OnPath(usize),
    /// Reached the home cell and left play
    Finished,
}

/// A single pawn.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pawn {
    pub id: usize,
    pub color: PlayerColor,
    pub position: PawnPosition,
}

impl Pawn {
    /// Creates a pawn waiting in its yard.
    pub fn new(color: PlayerColor, id: usize) -> Self {
        Self {
            id,
            color,
            position: PawnPosition::AtHome,
        }
    }

    /// Path index if the pawn is on the board.
    pub fn path_index(&self) -> Option<usize> {
        match self.position {
            PawnPosition::OnPath(index) => Some(index),
            _ => None,
        }
    }

    pub fn is_at_home(&self) -> bool {
        self.position == PawnPosition::AtHome
    }

    pub fn is_finished(&self) -> bool {
        self.position == PawnPosition::Finished
    }

    /// Progress used to rank pawns: yard pawns sort below every pawn on the board,
    /// finished pawns above.
    pub fn progress(&self) -> i64 {
        match self.position {
            PawnPosition::AtHome => -1,
            PawnPosition::OnPath(index) => index as i64,
            PawnPosition::Finished => HOME_INDEX as i64,
        }
    }
}
