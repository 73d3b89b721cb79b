//! # Mirchi Ludo
//!
//! A rules engine for four-player Ludo with the optional "Mirchi" house rule, where
//! capturing an opponent earns tokens that pay for backward moves.
//!
//! ## Architecture Overview
//!
//! The crate is the game core only. Rendering, animation and sound live in whatever
//! presentation layer drives it. The core revolves around a few concepts:
//!
//! - **Board Geometry**: static per-color paths over a 15x15 grid plus safe squares
//! - **Game State**: the turn/roll/move state machine for one game
//! - **Events**: observational notices (captures, finishes) drained by the presentation layer
//! - **AI Strategies**: greedy rule tables that pick a pawn for computer-controlled seats
//! - **Session**: the single owning handle that ties state, dice and AI together
//!
//! ## Example
//!
//! ```
//! use mirchi_ludo::{GameConfig, GameSession};
//!
//! let mut session = GameSession::new(GameConfig::for_testing(7)).unwrap();
//! let summary = session.run_to_completion().unwrap();
//! assert!(!summary.rankings.is_empty());
//! ```

pub mod ai;
pub mod game;

// Core module re-exports
pub use ai::*;
pub use game::*;

/// Core error type for the Mirchi Ludo engine.
///
/// Rule violations during play are not errors; they come back as
/// [`Rejection`] inside the roll and move outcomes.
#[derive(thiserror::Error, Debug)]
pub enum LudoError {
    /// I/O operation failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),

    /// Game configuration is unusable
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Game state is invalid
    #[error("Invalid game state: {0}")]
    InvalidState(String),
}

/// Result type used throughout the Mirchi Ludo codebase.
pub type LudoResult<T> = Result<T, LudoError>;

/// Version information for the engine.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Game rule constants.
pub mod config {
    /// Width and height of the square board grid
    pub const BOARD_SIZE: i32 = 15;

    /// Cells on the shared outer loop
    pub const COMMON_TRACK_LENGTH: usize = 52;

    /// Cells each color walks on the shared loop before turning into its lane
    pub const COMMON_CELLS_PER_PATH: usize = 51;

    /// Cells in each color's private safe lane
    pub const SAFE_LANE_LENGTH: usize = 5;

    /// Full path length per color: common cells, safe lane and the home cell
    pub const PATH_LENGTH: usize = COMMON_CELLS_PER_PATH + SAFE_LANE_LENGTH + 1;

    /// Index of the home (finish) cell on every path
    pub const HOME_INDEX: usize = PATH_LENGTH - 1;

    /// Pawns owned by each player
    pub const PAWNS_PER_PLAYER: usize = 4;

    /// Faces on the die
    pub const DICE_SIDES: u32 = 6;

    /// Roll needed to bring a pawn out of its yard
    pub const HOME_EXIT_ROLL: u32 = 6;

    /// Points for every captured opponent pawn
    pub const CAPTURE_POINTS: u32 = 3;

    /// Bonus for a pawn reaching the home cell
    pub const FINISH_BONUS: u32 = 16;

    /// Chance that the aggressive strategy takes a home exit on a six
    pub const AGGRESSIVE_HOME_EXIT_PROBABILITY: f64 = 0.6;

    /// Turn steps after which a simulated game is abandoned
    pub const DEFAULT_MAX_TURNS: u32 = 5_000;
}
