//! # Game Module
//!
//! Board geometry, pawns, the turn state machine and the session that drives it.
//!
//! This module contains the fundamental building blocks of the engine:
//! - Grid positions and player colors
//! - Static per-color paths and safe squares
//! - The game state machine (rolls, moves, captures, scoring)
//! - Events emitted for the presentation layer
//! - Game setup and the owning session handle

pub mod board;
pub mod events;
pub mod pawn;
pub mod session;
pub mod setup;
pub mod state;

pub use board::*;
pub use events::*;
pub use pawn::*;
pub use session::*;
pub use setup::*;
pub use state::*;

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// A cell on the 15x15 board grid.
///
/// # Examples
///
/// ```
/// use mirchi_ludo::Position;
///
/// let pos = Position::new(6, 1);
/// assert_eq!(pos.row, 6);
/// assert_eq!(pos.col, 1);
/// assert!(pos.is_adjacent(Position::new(7, 2)));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Position {
    pub row: i32,
    pub col: i32,
}

impl Position {
    /// Creates a new position with the given coordinates.
    pub const fn new(row: i32, col: i32) -> Self {
        Self { row, col }
    }

    /// Calculates the Manhattan distance to another position.
    ///
    /// # Examples
    ///
    /// ```
    /// use mirchi_ludo::Position;
    ///
    /// let pos1 = Position::new(0, 0);
    /// let pos2 = Position::new(3, 4);
    /// assert_eq!(pos1.manhattan_distance(pos2), 7);
    /// ```
    pub fn manhattan_distance(self, other: Position) -> u32 {
        ((self.row - other.row).abs() + (self.col - other.col).abs()) as u32
    }

    /// Whether `other` touches this cell, diagonals included.
    pub fn is_adjacent(self, other: Position) -> bool {
        self != other && (self.row - other.row).abs() <= 1 && (self.col - other.col).abs() <= 1
    }

    /// Whether the position lies on the board grid.
    pub fn is_on_board(self) -> bool {
        let size = crate::config::BOARD_SIZE;
        (0..size).contains(&self.row) && (0..size).contains(&self.col)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// The four seats, in fixed turn order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlayerColor {
    Red,
    Green,
    Yellow,
    Blue,
}

impl PlayerColor {
    /// All colors in turn order.
    pub const ALL: [PlayerColor; 4] = [
        PlayerColor::Red,
        PlayerColor::Green,
        PlayerColor::Yellow,
        PlayerColor::Blue,
    ];

    /// Position of this color in the turn order.
    pub fn index(self) -> usize {
        match self {
            PlayerColor::Red => 0,
            PlayerColor::Green => 1,
            PlayerColor::Yellow => 2,
            PlayerColor::Blue => 3,
        }
    }

    /// The color that follows this one in the cyclic turn order.
    ///
    /// # Examples
    ///
    /// ```
    /// use mirchi_ludo::PlayerColor;
    ///
    /// assert_eq!(PlayerColor::Red.next(), PlayerColor::Green);
    /// assert_eq!(PlayerColor::Blue.next(), PlayerColor::Red);
    /// ```
    pub fn next(self) -> PlayerColor {
        Self::ALL[(self.index() + 1) % Self::ALL.len()]
    }

    /// Every other color, in turn order starting after this one.
    pub fn opponents(self) -> impl Iterator<Item = PlayerColor> {
        (1..Self::ALL.len()).map(move |offset| Self::ALL[(self.index() + offset) % Self::ALL.len()])
    }
}

impl fmt::Display for PlayerColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PlayerColor::Red => "red",
            PlayerColor::Green => "green",
            PlayerColor::Yellow => "yellow",
            PlayerColor::Blue => "blue",
        };
        f.write_str(name)
    }
}

impl std::str::FromStr for PlayerColor {
    type Err = crate::LudoError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "red" => Ok(PlayerColor::Red),
            "green" => Ok(PlayerColor::Green),
            "yellow" => Ok(PlayerColor::Yellow),
            "blue" => Ok(PlayerColor::Blue),
            other => Err(crate::LudoError::InvalidConfig(format!(
                "unknown player color '{}'",
                other
            ))),
        }
    }
}

/// Rule set chosen when a game starts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum GameMode {
    /// Plain Ludo
    #[default]
    Classic,
    /// Captures earn tokens that pay for backward moves
    Mirchi,
}

/// Unique identifier for a game session.
pub type SessionId = Uuid;

/// Creates a new unique session ID.
pub fn new_session_id() -> SessionId {
    Uuid::new_v4()
}
