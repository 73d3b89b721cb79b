//! # Game Session
//!
//! The single owning handle for one game: the state machine, the seeded random
//! source used for dice and AI choices, and the strategy behind every AI seat.
//!
//! Presentation layers call [`GameSession::roll`] and [`GameSession::submit_move`]
//! for human seats and [`GameSession::step`] to let AI seats play. Nothing here
//! waits on timers; every call applies immediately.

use crate::{
    AiStrategy, GameConfig, GameEvent, GameMode, GameState, GameStatistics, LudoError,
    LudoResult, MoveChoice, MoveOutcome, MoveReport, PlayerColor, RollOutcome, SessionId,
    StrategyKind,
};
use log::{debug, info, warn};
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};

/// What a call to [`GameSession::step`] did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StepOutcome {
    /// The roll had no legal move and the turn passed
    NoLegalMove { color: PlayerColor, value: u32 },
    /// A pawn moved
    Moved(MoveReport),
    /// A human seat has to roll
    AwaitingRoll(PlayerColor),
    /// A human seat has to choose among several pawns
    AwaitingMove {
        color: PlayerColor,
        eligible: BTreeSet<usize>,
    },
    /// No further turns
    GameOver,
}

/// End-of-game report.
#[derive(Debug, Clone, Serialize)]
pub struct GameSummary {
    pub session_id: SessionId,
    pub mode: GameMode,
    pub seed: u64,
    /// Whether the game reached its end rather than the turn limit
    pub completed: bool,
    pub steps: u32,
    pub rankings: Vec<PlayerColor>,
    pub scores: BTreeMap<PlayerColor, u32>,
    pub statistics: GameStatistics,
}

/// Owns one game and everything needed to play it.
#[derive(Debug)]
pub struct GameSession {
    id: SessionId,
    config: GameConfig,
    state: GameState,
    rng: StdRng,
    strategies: BTreeMap<PlayerColor, Box<dyn AiStrategy>>,
    steps: u32,
}

impl GameSession {
    /// Creates a session and starts a game from the configuration.
    pub fn new(config: GameConfig) -> LudoResult<Self> {
        config.validate()?;
        let mut session = Self {
            id: crate::new_session_id(),
            rng: StdRng::seed_from_u64(config.seed),
            state: GameState::new(config.mode),
            strategies: BTreeMap::new(),
            config,
            steps: 0,
        };
        session.restart()?;
        Ok(session)
    }

    /// Starts a fresh game with new seats, keeping the random source running.
    pub fn start_game(
        &mut self,
        players: &[PlayerColor],
        ai_players: &[PlayerColor],
        mode: GameMode,
    ) -> LudoResult<()> {
        crate::validate_seating(players, ai_players)?;
        self.config.players = players.to_vec();
        self.config.ai_players = ai_players.to_vec();
        self.config.mode = mode;
        self.restart()
    }

    fn restart(&mut self) -> LudoResult<()> {
        self.state.finish_bonus = self.config.finish_bonus;
        self.state
            .start_game(&self.config.players, &self.config.ai_players, self.config.mode)?;
        self.strategies = self
            .config
            .ai_players
            .iter()
            .map(|&color| (color, self.config.strategy_for(color).build()))
            .collect();
        self.steps = 0;
        info!(
            "Session {} started (seed {}, strategies {:?})",
            self.id,
            self.config.seed,
            self.strategies
                .iter()
                .map(|(c, s)| (*c, s.kind()))
                .collect::<Vec<_>>()
        );
        Ok(())
    }

    pub fn id(&self) -> SessionId {
        self.id
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Read access to the game for rendering and AI.
    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Direct access for admin tools and test setup.
    pub fn state_mut(&mut self) -> &mut GameState {
        &mut self.state
    }

    /// Hands a seat to a built-in strategy, making it an AI seat.
    pub fn select_ai_strategy(&mut self, color: PlayerColor, kind: StrategyKind) -> LudoResult<()> {
        self.set_strategy(color, kind.build())?;
        self.config.strategies.insert(color, kind);
        Ok(())
    }

    /// Hands a seat to any strategy, making it an AI seat.
    pub fn set_strategy(&mut self, color: PlayerColor, strategy: Box<dyn AiStrategy>) -> LudoResult<()> {
        if !self.state.is_seated(color) {
            return Err(LudoError::InvalidConfig(format!(
                "{} is not seated in this game",
                color
            )));
        }
        if !self.config.ai_players.contains(&color) {
            self.config.ai_players.push(color);
        }
        self.state.ai_players.insert(color);
        self.strategies.insert(color, strategy);
        Ok(())
    }

    /// Rolls for the current player.
    pub fn roll(&mut self) -> RollOutcome {
        self.state.roll_dice(&mut self.rng)
    }

    /// Moves one of the current player's pawns by the live dice value.
    pub fn submit_move(&mut self, pawn_id: usize, backwards: bool) -> MoveOutcome {
        let color = self.state.current_player;
        let steps = self.state.dice_value;
        if backwards {
            self.state.move_pawn_backward(color, pawn_id, steps)
        } else {
            self.state.move_pawn(color, pawn_id, steps)
        }
    }

    /// Moves the only eligible pawn forward when there is exactly one.
    pub fn auto_move_single(&mut self) -> Option<MoveOutcome> {
        if !self.state.has_live_roll() || self.state.eligible_pawns.len() != 1 {
            return None;
        }
        let pawn_id = *self.state.eligible_pawns.iter().next()?;
        Some(self.submit_move(pawn_id, false))
    }

    /// Plays one step for the current seat.
    ///
    /// AI seats roll and move in a single step. Human seats only get the
    /// single-pawn convenience move; otherwise the step reports what they owe.
    pub fn step(&mut self) -> LudoResult<StepOutcome> {
        if self.state.is_game_over() {
            return Ok(StepOutcome::GameOver);
        }
        let color = self.state.current_player;

        if !self.strategies.contains_key(&color) {
            if !self.state.has_live_roll() {
                return Ok(StepOutcome::AwaitingRoll(color));
            }
            return match self.auto_move_single() {
                Some(outcome) => self.applied(outcome),
                None => Ok(StepOutcome::AwaitingMove {
                    color,
                    eligible: self.state.eligible_pawns.clone(),
                }),
            };
        }

        self.steps += 1;
        if !self.state.has_live_roll() {
            match self.roll() {
                RollOutcome::Rolled { .. } => {}
                RollOutcome::NoLegalMove { value, .. } => {
                    return Ok(StepOutcome::NoLegalMove { color, value });
                }
                RollOutcome::Rejected(reason) => {
                    return Err(LudoError::InvalidState(format!(
                        "{} could not roll: {}",
                        color, reason
                    )));
                }
            }
        }

        let choice = self.choose_for(color)?;
        debug!("{} ({}) chose {:?}", color, self.strategy_name(color), choice);
        let outcome = self.submit_move(choice.pawn_id, choice.move_backwards);
        self.applied(outcome)
    }

    fn choose_for(&mut self, color: PlayerColor) -> LudoResult<MoveChoice> {
        let strategy = self
            .strategies
            .get(&color)
            .ok_or_else(|| LudoError::InvalidState(format!("{} has no strategy", color)))?;
        let eligible = &self.state.eligible_pawns;
        let choice = strategy
            .select_move(eligible, color, &self.state, &mut self.rng)
            .ok_or_else(|| {
                LudoError::InvalidState(format!("{} strategy found no move", color))
            })?;
        if !eligible.contains(&choice.pawn_id) {
            return Err(LudoError::InvalidState(format!(
                "{} strategy picked ineligible pawn {}",
                color, choice.pawn_id
            )));
        }
        Ok(choice)
    }

    fn applied(&self, outcome: MoveOutcome) -> LudoResult<StepOutcome> {
        match outcome {
            MoveOutcome::Applied(report) => Ok(StepOutcome::Moved(report)),
            MoveOutcome::Rejected(reason) => Err(LudoError::InvalidState(format!(
                "move rejected: {}",
                reason
            ))),
        }
    }

    fn strategy_name(&self, color: PlayerColor) -> String {
        self.strategies
            .get(&color)
            .map(|s| s.kind().to_string())
            .unwrap_or_else(|| "human".to_string())
    }

    /// Plays AI seats until the game ends or the turn limit is hit.
    ///
    /// Fails if a human seat needs input.
    pub fn run_to_completion(&mut self) -> LudoResult<GameSummary> {
        while self.steps < self.config.max_turns {
            match self.step()? {
                StepOutcome::GameOver => break,
                StepOutcome::AwaitingRoll(color) | StepOutcome::AwaitingMove { color, .. } => {
                    return Err(LudoError::InvalidState(format!(
                        "{} is a human seat and cannot be simulated",
                        color
                    )));
                }
                StepOutcome::NoLegalMove { .. } | StepOutcome::Moved(_) => {}
            }
        }
        if !self.state.is_game_over() {
            warn!("Turn limit {} reached before the game ended", self.config.max_turns);
        }
        Ok(self.summary())
    }

    /// Current standings as a report.
    pub fn summary(&self) -> GameSummary {
        GameSummary {
            session_id: self.id,
            mode: self.state.mode,
            seed: self.config.seed,
            completed: self.state.is_game_over(),
            steps: self.steps,
            rankings: self.state.final_rankings(),
            scores: self.state.scores.clone(),
            statistics: self.state.statistics.clone(),
        }
    }

    /// Takes all events queued since the last drain.
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        self.state.drain_events()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{AggressiveStrategy, PawnPosition};

    use PlayerColor::{Blue, Green, Red, Yellow};

    #[test]
    fn test_session_starts_from_config() {
        let config = GameConfig::for_testing(1).with_strategy(Green, StrategyKind::Random);
        let session = GameSession::new(config).unwrap();
        assert_eq!(session.state().current_player, Red);
        assert_eq!(session.strategy_name(Green), "random");
        assert_eq!(session.strategy_name(Red), "rational");
    }

    #[test]
    fn test_invalid_config_is_rejected() {
        let mut config = GameConfig::for_testing(1);
        config.players = vec![Red];
        assert!(GameSession::new(config).is_err());
    }

    #[test]
    fn test_human_seat_waits_for_input() {
        let mut session = GameSession::new(GameConfig::new(4)).unwrap();
        assert_eq!(session.step().unwrap(), StepOutcome::AwaitingRoll(Red));

        session.state_mut().test_roll_dice(6);
        match session.step().unwrap() {
            StepOutcome::AwaitingMove { color, eligible } => {
                assert_eq!(color, Red);
                assert_eq!(eligible.len(), 4);
            }
            other => panic!("unexpected step outcome {:?}", other),
        }
        assert!(session.submit_move(2, false).is_applied());
    }

    #[test]
    fn test_single_eligible_pawn_moves_automatically() {
        let mut session = GameSession::new(GameConfig::new(4)).unwrap();
        session
            .state_mut()
            .set_pawn_position(Red, 1, PawnPosition::OnPath(10))
            .unwrap();
        session.state_mut().test_roll_dice(3);
        match session.step().unwrap() {
            StepOutcome::Moved(report) => {
                assert_eq!(report.pawn_id, 1);
                assert_eq!(report.to, PawnPosition::OnPath(13));
            }
            other => panic!("unexpected step outcome {:?}", other),
        }
        assert_eq!(session.state().current_player, Green);
    }

    #[test]
    fn test_select_ai_strategy_turns_seat_into_ai() {
        let mut session = GameSession::new(GameConfig::new(4)).unwrap();
        session
            .select_ai_strategy(Red, StrategyKind::Aggressive)
            .unwrap();
        assert!(session.state().is_ai(Red));
        assert!(!matches!(session.step().unwrap(), StepOutcome::AwaitingRoll(_)));
    }

    #[test]
    fn test_strategy_for_unseated_color_fails() {
        let mut config = GameConfig::for_testing(2);
        config.players = vec![Red, Blue];
        config.ai_players = vec![Red, Blue];
        let mut session = GameSession::new(config).unwrap();
        assert!(session
            .set_strategy(Yellow, Box::new(AggressiveStrategy::new(1.0)))
            .is_err());
    }

    #[test]
    fn test_failed_strategy_selection_leaves_config_alone() {
        let mut config = GameConfig::for_testing(2);
        config.players = vec![Red, Blue];
        config.ai_players = vec![Red, Blue];
        let mut session = GameSession::new(config).unwrap();

        assert!(session.select_ai_strategy(Yellow, StrategyKind::Random).is_err());
        assert!(session.config().strategies.is_empty());
        assert!(!session.config().ai_players.contains(&Yellow));

        session.select_ai_strategy(Blue, StrategyKind::Random).unwrap();
        assert_eq!(session.config().strategy_for(Blue), StrategyKind::Random);
    }

    #[test]
    fn test_all_ai_game_finishes() {
        let mut config = GameConfig::for_testing(2024);
        config.max_turns = 20_000;
        let mut session = GameSession::new(config).unwrap();
        let summary = session.run_to_completion().unwrap();
        assert!(summary.completed);
        assert_eq!(summary.rankings.len(), 4);
        assert_eq!(session.step().unwrap(), StepOutcome::GameOver);

        let events = session.drain_events();
        assert!(events.iter().any(|e| matches!(e, GameEvent::GameOver { .. })));
    }

    #[test]
    fn test_same_seed_replays_identically() {
        let config = GameConfig::for_testing(99)
            .with_mode(GameMode::Mirchi)
            .with_strategy(Blue, StrategyKind::Aggressive)
            .with_strategy(Green, StrategyKind::Random);
        let mut first = GameSession::new(config.clone()).unwrap();
        let mut second = GameSession::new(config).unwrap();

        let a = first.run_to_completion().unwrap();
        let b = second.run_to_completion().unwrap();
        assert_eq!(a.rankings, b.rankings);
        assert_eq!(a.scores, b.scores);
        assert_eq!(a.steps, b.steps);
        assert_eq!(first.drain_events(), second.drain_events());
    }

    #[test]
    fn test_restart_clears_the_board() {
        let mut session = GameSession::new(GameConfig::for_testing(8)).unwrap();
        for _ in 0..50 {
            session.step().unwrap();
        }
        session.start_game(&[Green, Yellow], &[Green], GameMode::Mirchi).unwrap();
        let state = session.state();
        assert_eq!(state.current_player, Green);
        assert_eq!(state.mode, GameMode::Mirchi);
        assert!(PlayerColor::ALL
            .iter()
            .all(|c| state.pawns_of(*c).iter().all(|p| p.is_at_home())));
        assert_eq!(session.strategy_name(Yellow), "human");
    }
}
