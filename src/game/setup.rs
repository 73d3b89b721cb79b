//! # Game Setup
//!
//! Configuration chosen before a game starts: who is seated, which seats are
//! computer controlled and with which strategy, the rule mode and the RNG seed.

use crate::config::{DEFAULT_MAX_TURNS, FINISH_BONUS, PAWNS_PER_PLAYER};
use crate::{GameMode, LudoError, LudoResult, PlayerColor, StrategyKind};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

/// How the pawn-finish bonus is computed.
///
/// The long-standing house scoring awards the full bonus for every pawn that
/// reaches home. `Tiered` is the alternative reading where a color's 1st to 4th
/// finishing pawn earn 16, 15, 14 and 13.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FinishBonusPolicy {
    #[default]
    Flat,
    Tiered,
}

impl FinishBonusPolicy {
    /// Bonus for a pawn finish, given how many pawns of that color finished before it.
    ///
    /// # Examples
    ///
    /// ```
    /// use mirchi_ludo::FinishBonusPolicy;
    ///
    /// assert_eq!(FinishBonusPolicy::Flat.bonus(3), 16);
    /// assert_eq!(FinishBonusPolicy::Tiered.bonus(3), 13);
    /// ```
    pub fn bonus(self, previously_finished: usize) -> u32 {
        match self {
            FinishBonusPolicy::Flat => FINISH_BONUS,
            FinishBonusPolicy::Tiered => {
                let rank = previously_finished.min(PAWNS_PER_PLAYER - 1) as u32;
                FINISH_BONUS - rank
            }
        }
    }
}

/// Everything needed to start a game.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Seats taking part, any order
    pub players: Vec<PlayerColor>,
    /// Seats driven by an AI strategy; must be a subset of `players`
    pub ai_players: Vec<PlayerColor>,
    /// Rule set
    pub mode: GameMode,
    /// Strategy for AI seats without an override
    pub default_strategy: StrategyKind,
    /// Per-seat strategy overrides
    pub strategies: BTreeMap<PlayerColor, StrategyKind>,
    /// Seed for dice and AI randomness
    pub seed: u64,
    /// Pawn-finish scoring
    pub finish_bonus: FinishBonusPolicy,
    /// Turn steps before a simulated game is abandoned
    pub max_turns: u32,
}

impl GameConfig {
    /// Creates a four-seat classic configuration with every seat human.
    pub fn new(seed: u64) -> Self {
        Self {
            players: PlayerColor::ALL.to_vec(),
            ai_players: Vec::new(),
            mode: GameMode::Classic,
            default_strategy: StrategyKind::Rational,
            strategies: BTreeMap::new(),
            seed,
            finish_bonus: FinishBonusPolicy::Flat,
            max_turns: DEFAULT_MAX_TURNS,
        }
    }

    /// Creates a configuration suitable for tests: four AI seats, classic rules.
    pub fn for_testing(seed: u64) -> Self {
        Self {
            ai_players: PlayerColor::ALL.to_vec(),
            ..Self::new(seed)
        }
    }

    /// Switches the rule mode.
    pub fn with_mode(mut self, mode: GameMode) -> Self {
        self.mode = mode;
        self
    }

    /// Overrides the strategy for one seat.
    pub fn with_strategy(mut self, color: PlayerColor, kind: StrategyKind) -> Self {
        self.strategies.insert(color, kind);
        self
    }

    /// Strategy an AI seat will use.
    pub fn strategy_for(&self, color: PlayerColor) -> StrategyKind {
        self.strategies
            .get(&color)
            .copied()
            .unwrap_or(self.default_strategy)
    }

    /// Checks that the seating makes sense.
    pub fn validate(&self) -> LudoResult<()> {
        validate_seating(&self.players, &self.ai_players)?;
        if self.max_turns == 0 {
            return Err(LudoError::InvalidConfig(
                "max_turns must be positive".to_string(),
            ));
        }
        Ok(())
    }

    /// Serializes the configuration to pretty JSON.
    pub fn to_json(&self) -> LudoResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Parses and validates a configuration from JSON.
    pub fn from_json(json: &str) -> LudoResult<Self> {
        let config: GameConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads a JSON configuration file.
    pub fn load_from_file(path: impl AsRef<Path>) -> LudoResult<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::new(12345)
    }
}

/// Checks a seat selection: at least one seat, no duplicates, AI seats seated.
pub fn validate_seating(players: &[PlayerColor], ai_players: &[PlayerColor]) -> LudoResult<()> {
    if players.is_empty() {
        return Err(LudoError::InvalidConfig(
            "at least one player must be seated".to_string(),
        ));
    }
    for (i, color) in players.iter().enumerate() {
        if players[..i].contains(color) {
            return Err(LudoError::InvalidConfig(format!(
                "{} is seated twice",
                color
            )));
        }
    }
    if let Some(stray) = ai_players.iter().find(|c| !players.contains(c)) {
        return Err(LudoError::InvalidConfig(format!(
            "AI seat {} is not a selected player",
            stray
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = GameConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.players.len(), 4);
        assert!(config.ai_players.is_empty());
    }

    #[test]
    fn test_testing_config_is_all_ai() {
        let config = GameConfig::for_testing(1);
        assert_eq!(config.ai_players, PlayerColor::ALL.to_vec());
        assert_eq!(config.mode, GameMode::Classic);
    }

    #[test]
    fn test_strategy_overrides() {
        let config = GameConfig::for_testing(1)
            .with_strategy(PlayerColor::Blue, StrategyKind::Aggressive);
        assert_eq!(config.strategy_for(PlayerColor::Blue), StrategyKind::Aggressive);
        assert_eq!(config.strategy_for(PlayerColor::Red), StrategyKind::Rational);
    }

    #[test]
    fn test_seating_validation() {
        assert!(validate_seating(&[], &[]).is_err());
        assert!(validate_seating(&[PlayerColor::Red, PlayerColor::Red], &[]).is_err());
        assert!(validate_seating(&[PlayerColor::Red], &[PlayerColor::Green]).is_err());
        assert!(validate_seating(
            &[PlayerColor::Red, PlayerColor::Green],
            &[PlayerColor::Green]
        )
        .is_ok());
    }

    #[test]
    fn test_tiered_bonus() {
        let bonuses: Vec<u32> = (0..4).map(|n| FinishBonusPolicy::Tiered.bonus(n)).collect();
        assert_eq!(bonuses, vec![16, 15, 14, 13]);
        assert!((0..4).all(|n| FinishBonusPolicy::Flat.bonus(n) == 16));
    }

    #[test]
    fn test_json_round_trip_with_partial_input() {
        let config = GameConfig::from_json(
            r#"{ "players": ["red", "blue"], "ai_players": ["blue"], "mode": "mirchi", "seed": 9 }"#,
        )
        .unwrap();
        assert_eq!(config.players, vec![PlayerColor::Red, PlayerColor::Blue]);
        assert_eq!(config.mode, GameMode::Mirchi);
        assert_eq!(config.max_turns, DEFAULT_MAX_TURNS);

        let json = config.to_json().unwrap();
        assert_eq!(GameConfig::from_json(&json).unwrap(), config);
    }

    #[test]
    fn test_invalid_json_config_is_rejected() {
        let err = GameConfig::from_json(r#"{ "players": [] }"#).unwrap_err();
        assert!(matches!(err, LudoError::InvalidConfig(_)));
    }
}
