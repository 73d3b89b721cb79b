//! # AI Module
//!
//! Move selection for computer-controlled seats.
//!
//! Every strategy is a greedy, ordered rule table: the first tier that produces a
//! candidate wins and later tiers are never consulted. Strategies read the game
//! state but never change it, and only ever pick pawns from the eligible set they
//! are given. Randomness comes from the caller so games can be replayed from a seed.

pub mod aggressive;
pub mod backward_only;
pub mod random;
pub mod rational;
pub mod tactics;

pub use aggressive::*;
pub use backward_only::*;
pub use random::*;
pub use rational::*;

use crate::{GameState, PlayerColor};
use rand::RngCore;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

/// A pawn to move and the direction to move it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MoveChoice {
    pub pawn_id: usize,
    pub move_backwards: bool,
}

impl MoveChoice {
    pub fn forward(pawn_id: usize) -> Self {
        Self {
            pawn_id,
            move_backwards: false,
        }
    }

    pub fn backward(pawn_id: usize) -> Self {
        Self {
            pawn_id,
            move_backwards: true,
        }
    }
}

/// A move-selection policy for an AI seat.
pub trait AiStrategy: fmt::Debug + Send {
    /// Which built-in strategy this is.
    fn kind(&self) -> StrategyKind;

    /// Picks a move for `player` from `eligible`, or `None` when the set is empty.
    ///
    /// The returned pawn id is always a member of `eligible`.
    fn select_move(
        &self,
        eligible: &BTreeSet<usize>,
        player: PlayerColor,
        state: &GameState,
        rng: &mut dyn RngCore,
    ) -> Option<MoveChoice>;
}

/// The built-in strategies.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "snake_case")]
pub enum StrategyKind {
    /// Uniformly random eligible pawn
    Random,
    /// Captures first, then safety, then progress
    #[default]
    Rational,
    /// Captures and chases opponents
    Aggressive,
    /// Deterministic backward mover for tests
    BackwardOnly,
}

impl StrategyKind {
    /// All built-in strategies.
    pub const ALL: [StrategyKind; 4] = [
        StrategyKind::Random,
        StrategyKind::Rational,
        StrategyKind::Aggressive,
        StrategyKind::BackwardOnly,
    ];

    /// Creates the strategy with its default parameters.
    pub fn build(self) -> Box<dyn AiStrategy> {
        match self {
            StrategyKind::Random => Box::new(RandomStrategy),
            StrategyKind::Rational => Box::new(RationalStrategy),
            StrategyKind::Aggressive => Box::new(AggressiveStrategy::default()),
            StrategyKind::BackwardOnly => Box::new(BackwardOnlyStrategy),
        }
    }
}

impl fmt::Display for StrategyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            StrategyKind::Random => "random",
            StrategyKind::Rational => "rational",
            StrategyKind::Aggressive => "aggressive",
            StrategyKind::BackwardOnly => "backward_only",
        };
        f.write_str(name)
    }
}
