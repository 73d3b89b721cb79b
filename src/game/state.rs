//! # Game State Module
//!
//! The turn state machine for one game: dice rolls, eligibility, forward and
//! backward moves, captures, scoring and completion.
//!
//! A game alternates between two phases. While no roll is live the current player
//! may roll; the roll fixes the dice value and the set of eligible pawns. A move
//! then consumes the roll and either keeps the turn (capture, finish or a six) or
//! hands it to the next seated color. A roll with no eligible pawn passes the turn
//! at once.
//!
//! Invalid commands never panic and never error: they come back as
//! [`Rejection`]s with the state untouched.

use crate::config::{
    CAPTURE_POINTS, DICE_SIDES, HOME_EXIT_ROLL, HOME_INDEX, PAWNS_PER_PLAYER,
};
use crate::{
    is_safe_position, path_for, validate_seating, FinishBonusPolicy, GameEvent, GameMode,
    GameStatistics, LudoResult, LudoError, Pawn, PawnPosition, PlayerColor, Position,
};
use log::{debug, info};
use rand::Rng;
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};

/// Why a roll or move command was refused.
#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Rejection {
    #[error("the game is over")]
    GameOver,
    #[error("it is not {0}'s turn")]
    NotYourTurn(PlayerColor),
    #[error("the live roll does not belong to {0}")]
    StaleRoll(PlayerColor),
    #[error("a roll is still waiting for a move")]
    RollPending,
    #[error("pawn {0} is not eligible for this roll")]
    PawnNotEligible(usize),
    #[error("there is no pawn {0}")]
    UnknownPawn(usize),
    #[error("a pawn needs a six to leave the yard, got {0}")]
    CannotLeaveHome(u32),
    #[error("moving {steps} from index {from} overshoots the home cell")]
    Overshoot { from: usize, steps: u32 },
    #[error("backward moves are only allowed in mirchi mode")]
    NotMirchiMode,
    #[error("{0} has no mirchi tokens left")]
    NoMirchiTokens(PlayerColor),
    #[error("pawn {0} cannot move backward that far")]
    InvalidBackwardMove(usize),
    #[error("dice value {0} is out of range")]
    InvalidDiceValue(u32),
}

/// Result of a roll command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RollOutcome {
    /// The roll is live and at least one pawn can move
    Rolled {
        value: u32,
        eligible: BTreeSet<usize>,
    },
    /// Nothing could move; the turn already passed to `next_player`
    NoLegalMove { value: u32, next_player: PlayerColor },
    Rejected(Rejection),
}

impl RollOutcome {
    /// The rolled value, unless the roll was refused.
    pub fn value(&self) -> Option<u32> {
        match self {
            RollOutcome::Rolled { value, .. } | RollOutcome::NoLegalMove { value, .. } => {
                Some(*value)
            }
            RollOutcome::Rejected(_) => None,
        }
    }

    pub fn has_no_legal_move(&self) -> bool {
        matches!(self, RollOutcome::NoLegalMove { .. })
    }

    pub fn is_rejected(&self) -> bool {
        matches!(self, RollOutcome::Rejected(_))
    }
}

/// What an applied move did.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MoveReport {
    pub color: PlayerColor,
    pub pawn_id: usize,
    pub from: PawnPosition,
    pub to: PawnPosition,
    pub backwards: bool,
    /// Opponent pawns sent home, as (color, pawn id)
    pub captured: Vec<(PlayerColor, usize)>,
    pub finished: bool,
    /// Points the mover gained from this move
    pub points: u32,
    /// Whether the mover rolls again
    pub extra_turn: bool,
}

/// Result of a move command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MoveOutcome {
    Applied(MoveReport),
    Rejected(Rejection),
}

impl MoveOutcome {
    pub fn is_applied(&self) -> bool {
        matches!(self, MoveOutcome::Applied(_))
    }

    pub fn report(&self) -> Option<&MoveReport> {
        match self {
            MoveOutcome::Applied(report) => Some(report),
            MoveOutcome::Rejected(_) => None,
        }
    }

    pub fn rejection(&self) -> Option<Rejection> {
        match self {
            MoveOutcome::Applied(_) => None,
            MoveOutcome::Rejected(reason) => Some(*reason),
        }
    }
}

/// Central state for one game.
///
/// Fields are public for presentation and test setup; mutate through the
/// command methods to keep the invariants.
#[derive(Debug, Clone, Serialize)]
pub struct GameState {
    /// Rule set, fixed at game start
    pub mode: GameMode,
    /// Seated colors in turn order
    pub players: Vec<PlayerColor>,
    /// Seats driven by an AI strategy
    pub ai_players: BTreeSet<PlayerColor>,
    /// Whose turn it is
    pub current_player: PlayerColor,
    /// Owner of the live roll, if any
    pub current_roll_player: Option<PlayerColor>,
    /// Last rolled value
    pub dice_value: u32,
    /// Pawns of the current player that can move forward with `dice_value`
    pub eligible_pawns: BTreeSet<usize>,
    /// Four pawns per color, for every color whether seated or not
    pub pawns: BTreeMap<PlayerColor, Vec<Pawn>>,
    pub scores: BTreeMap<PlayerColor, u32>,
    /// Colors in the order they brought all four pawns home
    pub home_completion_order: Vec<PlayerColor>,
    /// Pawns each color has brought home so far
    pub finished_pawn_counts: BTreeMap<PlayerColor, usize>,
    /// Backward-move tokens earned by capturing in mirchi mode
    pub mirchi_moves_remaining: BTreeMap<PlayerColor, u32>,
    /// Presentation flag: the current player armed a backward move
    pub mirchi_arrow_activated: bool,
    /// Pawn-finish scoring
    pub finish_bonus: FinishBonusPolicy,
    pub statistics: GameStatistics,
    /// Rolls applied so far
    pub turn_number: u64,
    #[serde(skip)]
    pending_events: Vec<GameEvent>,
    #[serde(skip)]
    game_over_announced: bool,
}

impl GameState {
    /// Creates a four-player game in the given mode with every pawn in its yard.
    ///
    /// # Examples
    ///
    /// ```
    /// use mirchi_ludo::{GameMode, GameState, PlayerColor};
    ///
    /// let state = GameState::new(GameMode::Classic);
    /// assert_eq!(state.current_player, PlayerColor::Red);
    /// assert!(state.eligible_pawns.is_empty());
    /// assert!(state.pawns_of(PlayerColor::Blue).iter().all(|p| p.is_at_home()));
    /// ```
    pub fn new(mode: GameMode) -> Self {
        let mut state = Self {
            mode,
            players: PlayerColor::ALL.to_vec(),
            ai_players: BTreeSet::new(),
            current_player: PlayerColor::Red,
            current_roll_player: None,
            dice_value: 1,
            eligible_pawns: BTreeSet::new(),
            pawns: BTreeMap::new(),
            scores: BTreeMap::new(),
            home_completion_order: Vec::new(),
            finished_pawn_counts: BTreeMap::new(),
            mirchi_moves_remaining: BTreeMap::new(),
            mirchi_arrow_activated: false,
            finish_bonus: FinishBonusPolicy::Flat,
            statistics: GameStatistics::new(),
            turn_number: 0,
            pending_events: Vec::new(),
            game_over_announced: false,
        };
        state.reset_board();
        state
    }

    /// Resets everything for a new game with the given seats.
    ///
    /// The first seated color in turn order starts. The finish bonus policy is kept.
    pub fn start_game(
        &mut self,
        players: &[PlayerColor],
        ai_players: &[PlayerColor],
        mode: GameMode,
    ) -> LudoResult<()> {
        validate_seating(players, ai_players)?;

        self.mode = mode;
        self.players = PlayerColor::ALL
            .into_iter()
            .filter(|c| players.contains(c))
            .collect();
        self.ai_players = ai_players.iter().copied().collect();
        self.reset_board();

        let first = self.players.first().copied().ok_or_else(|| {
            LudoError::InvalidState("no seated players after reset".to_string())
        })?;
        self.current_player = first;

        info!(
            "Starting {:?} game with {:?} (AI: {:?})",
            self.mode, self.players, self.ai_players
        );
        Ok(())
    }

    fn reset_board(&mut self) {
        self.pawns = PlayerColor::ALL
            .into_iter()
            .map(|color| {
                let pawns: Vec<Pawn> =
                    (0..PAWNS_PER_PLAYER).map(|id| Pawn::new(color, id)).collect();
                (color, pawns)
            })
            .collect();
        self.scores = PlayerColor::ALL.into_iter().map(|c| (c, 0)).collect();
        self.finished_pawn_counts = PlayerColor::ALL.into_iter().map(|c| (c, 0)).collect();
        self.mirchi_moves_remaining = PlayerColor::ALL.into_iter().map(|c| (c, 0)).collect();
        self.home_completion_order.clear();
        self.current_player = PlayerColor::Red;
        self.current_roll_player = None;
        self.dice_value = 1;
        self.eligible_pawns.clear();
        self.mirchi_arrow_activated = false;
        self.statistics = GameStatistics::new();
        self.turn_number = 0;
        self.pending_events.clear();
        self.game_over_announced = false;
    }

    // ---------------------------------------------------------------------
    // Queries
    // ---------------------------------------------------------------------

    /// All pawns of a color.
    pub fn pawns_of(&self, color: PlayerColor) -> &[Pawn] {
        self.pawns.get(&color).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn pawn(&self, color: PlayerColor, pawn_id: usize) -> Option<&Pawn> {
        self.pawns_of(color).get(pawn_id)
    }

    /// Grid cell of a pawn that is on the board.
    pub fn pawn_cell(&self, color: PlayerColor, pawn_id: usize) -> Option<Position> {
        let index = self.pawn(color, pawn_id)?.path_index()?;
        path_for(color).get(index).copied()
    }

    pub fn score(&self, color: PlayerColor) -> u32 {
        self.scores.get(&color).copied().unwrap_or(0)
    }

    pub fn mirchi_tokens(&self, color: PlayerColor) -> u32 {
        self.mirchi_moves_remaining.get(&color).copied().unwrap_or(0)
    }

    pub fn is_seated(&self, color: PlayerColor) -> bool {
        self.players.contains(&color)
    }

    pub fn is_ai(&self, color: PlayerColor) -> bool {
        self.ai_players.contains(&color)
    }

    /// Whether the current player holds a roll that still needs a move.
    pub fn has_live_roll(&self) -> bool {
        self.current_roll_player == Some(self.current_player) && !self.eligible_pawns.is_empty()
    }

    /// Whether a forward move of `steps` is legal for the pawn, ignoring whose turn it is.
    pub fn is_valid_move(&self, color: PlayerColor, pawn_id: usize, steps: u32) -> bool {
        self.get_destination_index(color, pawn_id, steps, false).is_some()
    }

    /// Whether a backward move of `steps` is legal for the pawn, ignoring whose turn it is.
    ///
    /// Requires mirchi mode, at least one token, and a pawn on the path that would
    /// not go below index 0.
    pub fn is_valid_backward_move(&self, color: PlayerColor, pawn_id: usize, steps: u32) -> bool {
        self.mode == GameMode::Mirchi
            && self.mirchi_tokens(color) > 0
            && self.get_destination_index(color, pawn_id, steps, true).is_some()
    }

    /// Path index the pawn would land on, or `None` if the move is impossible.
    ///
    /// A forward move from the yard lands on index 0 and needs a six. Landing on the
    /// home index is allowed; passing it is not. Backward moves only consider
    /// geometry, see [`GameState::is_valid_backward_move`] for the token rules.
    pub fn get_destination_index(
        &self,
        color: PlayerColor,
        pawn_id: usize,
        steps: u32,
        backwards: bool,
    ) -> Option<usize> {
        let pawn = self.pawn(color, pawn_id)?;
        if steps == 0 {
            return None;
        }
        let steps = steps as usize;
        match (pawn.position, backwards) {
            (PawnPosition::AtHome, false) => (steps == HOME_EXIT_ROLL as usize).then_some(0),
            (PawnPosition::OnPath(index), false) => {
                (index + steps <= HOME_INDEX).then_some(index + steps)
            }
            (PawnPosition::OnPath(index), true) => index.checked_sub(steps),
            _ => None,
        }
    }

    /// Pawns of `color` that can move forward `dice` steps.
    pub fn compute_eligible_pawns(&self, color: PlayerColor, dice: u32) -> BTreeSet<usize> {
        (0..PAWNS_PER_PLAYER)
            .filter(|&id| self.is_valid_move(color, id, dice))
            .collect()
    }

    /// Opponent pawns standing on a grid cell, as (color, pawn id).
    pub fn opponents_at(&self, mover: PlayerColor, cell: Position) -> Vec<(PlayerColor, usize)> {
        mover
            .opponents()
            .flat_map(|color| {
                self.pawns_of(color)
                    .iter()
                    .filter(move |pawn| {
                        pawn.path_index()
                            .and_then(|i| path_for(color).get(i))
                            .is_some_and(|&p| p == cell)
                    })
                    .map(move |pawn| (color, pawn.id))
            })
            .collect()
    }

    /// Whether landing on `cell` would capture at least one opponent.
    pub fn would_capture(&self, mover: PlayerColor, cell: Position) -> bool {
        !is_safe_position(cell) && !self.opponents_at(mover, cell).is_empty()
    }

    /// Whether all four pawns of a color are home.
    pub fn has_completed_game(&self, color: PlayerColor) -> bool {
        let pawns = self.pawns_of(color);
        !pawns.is_empty() && pawns.iter().all(Pawn::is_finished)
    }

    /// Whether no further turns can be played.
    ///
    /// With two or more seats the game ends when at most one seat is unfinished;
    /// a solo game ends when that seat finishes.
    pub fn is_game_over(&self) -> bool {
        let unfinished = self
            .players
            .iter()
            .filter(|&&c| !self.has_completed_game(c))
            .count();
        if self.players.len() >= 2 {
            unfinished <= 1
        } else {
            unfinished == 0
        }
    }

    /// Finishing order first, then the remaining seats by score (ties by turn order).
    pub fn final_rankings(&self) -> Vec<PlayerColor> {
        let mut rankings = self.home_completion_order.clone();
        let mut rest: Vec<PlayerColor> = self
            .players
            .iter()
            .copied()
            .filter(|c| !rankings.contains(c))
            .collect();
        rest.sort_by(|a, b| self.score(*b).cmp(&self.score(*a)));
        rankings.extend(rest);
        rankings
    }

    /// Events queued since the last drain.
    pub fn events(&self) -> &[GameEvent] {
        &self.pending_events
    }

    /// Takes all queued events.
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.pending_events)
    }

    // ---------------------------------------------------------------------
    // Commands
    // ---------------------------------------------------------------------

    /// Rolls the die for the current player.
    pub fn roll_dice<R: Rng + ?Sized>(&mut self, rng: &mut R) -> RollOutcome {
        if let Some(reason) = self.roll_guard() {
            return RollOutcome::Rejected(reason);
        }
        let value = rng.gen_range(1..=DICE_SIDES);
        self.apply_roll(value)
    }

    /// Forces a dice value. Values above six fast-forward pawns for testing;
    /// anything past the home index is refused.
    pub fn test_roll_dice(&mut self, value: u32) -> RollOutcome {
        if value == 0 || value as usize > HOME_INDEX {
            return RollOutcome::Rejected(Rejection::InvalidDiceValue(value));
        }
        if let Some(reason) = self.roll_guard() {
            return RollOutcome::Rejected(reason);
        }
        self.apply_roll(value)
    }

    fn roll_guard(&self) -> Option<Rejection> {
        if self.is_game_over() {
            Some(Rejection::GameOver)
        } else if !self.eligible_pawns.is_empty() {
            Some(Rejection::RollPending)
        } else {
            None
        }
    }

    fn apply_roll(&mut self, value: u32) -> RollOutcome {
        let color = self.current_player;
        self.dice_value = value;
        self.current_roll_player = Some(color);
        self.turn_number += 1;
        self.emit(GameEvent::DiceRolled { color, value });

        self.eligible_pawns = self.compute_eligible_pawns(color, value);
        debug!("{} rolled {}, eligible {:?}", color, value, self.eligible_pawns);

        if self.eligible_pawns.is_empty() {
            self.next_turn(true);
            let next_player = self.current_player;
            self.emit(GameEvent::TurnPassed {
                from: color,
                to: next_player,
            });
            return RollOutcome::NoLegalMove { value, next_player };
        }

        RollOutcome::Rolled {
            value,
            eligible: self.eligible_pawns.clone(),
        }
    }

    /// Arms the backward-move arrow for the current player.
    ///
    /// Returns whether the arrow is now active.
    pub fn activate_mirchi_arrow(&mut self) -> bool {
        if self.mode == GameMode::Mirchi
            && self.has_live_roll()
            && self.mirchi_tokens(self.current_player) > 0
        {
            self.mirchi_arrow_activated = true;
        }
        self.mirchi_arrow_activated
    }

    /// Moves a pawn forward `steps` cells using the live roll.
    ///
    /// # Examples
    ///
    /// ```
    /// use mirchi_ludo::{GameMode, GameState, PawnPosition, PlayerColor};
    ///
    /// let mut state = GameState::new(GameMode::Classic);
    /// state.test_roll_dice(6);
    /// let outcome = state.move_pawn(PlayerColor::Red, 0, 6);
    /// assert!(outcome.is_applied());
    /// assert_eq!(state.pawns_of(PlayerColor::Red)[0].position, PawnPosition::OnPath(0));
    /// assert_eq!(state.current_player, PlayerColor::Red); // a six rolls again
    /// ```
    pub fn move_pawn(&mut self, color: PlayerColor, pawn_id: usize, steps: u32) -> MoveOutcome {
        if let Some(reason) = self.move_guard(color, pawn_id) {
            return MoveOutcome::Rejected(reason);
        }
        if steps == 0 {
            return MoveOutcome::Rejected(Rejection::InvalidDiceValue(steps));
        }
        let Some(from) = self.pawn(color, pawn_id).map(|p| p.position) else {
            return MoveOutcome::Rejected(Rejection::UnknownPawn(pawn_id));
        };

        let mut report = MoveReport {
            color,
            pawn_id,
            from,
            to: from,
            backwards: false,
            captured: Vec::new(),
            finished: false,
            points: 0,
            extra_turn: false,
        };

        match from {
            PawnPosition::AtHome => {
                if steps != HOME_EXIT_ROLL {
                    return MoveOutcome::Rejected(Rejection::CannotLeaveHome(steps));
                }
                // The entry square is safe, so leaving the yard never captures.
                report.to = PawnPosition::OnPath(0);
            }
            PawnPosition::OnPath(index) => {
                let target = index + steps as usize;
                if target > HOME_INDEX {
                    return MoveOutcome::Rejected(Rejection::Overshoot { from: index, steps });
                }
                if target == HOME_INDEX {
                    report.to = PawnPosition::Finished;
                    report.finished = true;
                } else {
                    report.to = PawnPosition::OnPath(target);
                    let cell = path_for(color)[target];
                    report.captured = self.resolve_captures(color, cell);
                    report.points += CAPTURE_POINTS * report.captured.len() as u32;
                }
            }
            PawnPosition::Finished => {
                return MoveOutcome::Rejected(Rejection::PawnNotEligible(pawn_id));
            }
        }

        self.place(color, pawn_id, report.to);
        self.emit(GameEvent::PawnMoved {
            color,
            pawn_id,
            from,
            to: report.to,
            backwards: false,
        });
        if report.finished {
            report.points += self.finish_pawn(color, pawn_id);
        }

        self.finish_move(report)
    }

    /// Moves a pawn backward `steps` cells using the live roll and one mirchi token.
    pub fn move_pawn_backward(
        &mut self,
        color: PlayerColor,
        pawn_id: usize,
        steps: u32,
    ) -> MoveOutcome {
        if self.mode != GameMode::Mirchi {
            return MoveOutcome::Rejected(Rejection::NotMirchiMode);
        }
        if let Some(reason) = self.move_guard(color, pawn_id) {
            return MoveOutcome::Rejected(reason);
        }
        if self.mirchi_tokens(color) == 0 {
            return MoveOutcome::Rejected(Rejection::NoMirchiTokens(color));
        }
        let Some(target) = self.get_destination_index(color, pawn_id, steps, true) else {
            return MoveOutcome::Rejected(Rejection::InvalidBackwardMove(pawn_id));
        };
        let Some(from) = self.pawn(color, pawn_id).map(|p| p.position) else {
            return MoveOutcome::Rejected(Rejection::UnknownPawn(pawn_id));
        };

        if let Some(tokens) = self.mirchi_moves_remaining.get_mut(&color) {
            *tokens -= 1;
        }

        let cell = path_for(color)[target];
        let captured = self.resolve_captures(color, cell);
        let to = PawnPosition::OnPath(target);
        self.place(color, pawn_id, to);
        self.emit(GameEvent::PawnMoved {
            color,
            pawn_id,
            from,
            to,
            backwards: true,
        });
        if !captured.is_empty() {
            self.emit(GameEvent::MirchiBackwardCapture { color });
        }

        let points = CAPTURE_POINTS * captured.len() as u32;
        self.finish_move(MoveReport {
            color,
            pawn_id,
            from,
            to,
            backwards: true,
            captured,
            finished: false,
            points,
            extra_turn: false,
        })
    }

    fn move_guard(&self, color: PlayerColor, pawn_id: usize) -> Option<Rejection> {
        if self.is_game_over() {
            Some(Rejection::GameOver)
        } else if color != self.current_player {
            Some(Rejection::NotYourTurn(color))
        } else if self.current_roll_player != Some(color) {
            Some(Rejection::StaleRoll(color))
        } else if pawn_id >= PAWNS_PER_PLAYER {
            Some(Rejection::UnknownPawn(pawn_id))
        } else if !self.eligible_pawns.contains(&pawn_id) {
            Some(Rejection::PawnNotEligible(pawn_id))
        } else {
            None
        }
    }

    /// Sends every opponent on an unsafe cell home and credits the mover.
    ///
    /// Runs before the mover's own pawn is placed.
    fn resolve_captures(&mut self, mover: PlayerColor, cell: Position) -> Vec<(PlayerColor, usize)> {
        if is_safe_position(cell) {
            return Vec::new();
        }
        let victims = self.opponents_at(mover, cell);
        for &(color, pawn_id) in &victims {
            self.place(color, pawn_id, PawnPosition::AtHome);
            *self.scores.entry(mover).or_default() += CAPTURE_POINTS;
            if self.mode == GameMode::Mirchi {
                *self.mirchi_moves_remaining.entry(mover).or_default() += 1;
            }
            if self.statistics.first_kill_player.is_none() {
                self.emit(GameEvent::FirstBlood { color: mover });
            }
            self.emit(GameEvent::PawnCaptured {
                color,
                pawn_id,
                by: mover,
            });
            debug!("{} captured {} pawn {} at {}", mover, color, pawn_id, cell);
        }
        victims
    }

    /// Scores a pawn that just reached home and records a completed color.
    fn finish_pawn(&mut self, color: PlayerColor, pawn_id: usize) -> u32 {
        let count = self.finished_pawn_counts.entry(color).or_default();
        let bonus = self.finish_bonus.bonus(*count);
        *count += 1;
        *self.scores.entry(color).or_default() += bonus;

        let completed_all_four = self.has_completed_game(color);
        self.emit(GameEvent::PawnReachedHome {
            color,
            pawn_id,
            completed_all_four,
        });
        if completed_all_four && !self.home_completion_order.contains(&color) {
            self.home_completion_order.push(color);
            info!(
                "{} brought all pawns home in place {}",
                color,
                self.home_completion_order.len()
            );
            self.emit(GameEvent::PlayerFinished {
                color,
                bonus_points: bonus,
            });
        }
        bonus
    }

    /// Consumes the roll and decides who moves next.
    fn finish_move(&mut self, mut report: MoveReport) -> MoveOutcome {
        let color = report.color;
        report.extra_turn = (!report.captured.is_empty()
            || report.finished
            || self.dice_value == HOME_EXIT_ROLL)
            && !self.has_completed_game(color);

        debug!(
            "{} pawn {} {:?} -> {:?} (+{}, extra turn: {})",
            color, report.pawn_id, report.from, report.to, report.points, report.extra_turn
        );

        if report.extra_turn {
            self.eligible_pawns.clear();
            self.current_roll_player = None;
            self.mirchi_arrow_activated = false;
        } else {
            self.next_turn(true);
        }

        if self.is_game_over() && !self.game_over_announced {
            self.game_over_announced = true;
            let rankings = self.final_rankings();
            info!("Game over, rankings {:?}", rankings);
            self.emit(GameEvent::GameOver { rankings });
        }

        MoveOutcome::Applied(report)
    }

    /// Hands the turn to the next seated color that still has pawns to play.
    pub fn next_turn(&mut self, clear_roll: bool) {
        self.eligible_pawns.clear();
        self.mirchi_arrow_activated = false;
        if clear_roll {
            self.current_roll_player = None;
        }

        let mut candidate = self.current_player;
        for _ in 0..PlayerColor::ALL.len() {
            candidate = candidate.next();
            if self.is_seated(candidate) && !self.has_completed_game(candidate) {
                self.current_player = candidate;
                return;
            }
        }
    }

    /// Puts a pawn anywhere, bypassing the rules. Scores and counters are untouched.
    pub fn set_pawn_position(
        &mut self,
        color: PlayerColor,
        pawn_id: usize,
        position: PawnPosition,
    ) -> LudoResult<()> {
        if pawn_id >= PAWNS_PER_PLAYER {
            return Err(LudoError::InvalidState(format!("no pawn {}", pawn_id)));
        }
        if let PawnPosition::OnPath(index) = position {
            if index >= HOME_INDEX {
                return Err(LudoError::InvalidState(format!(
                    "path index {} is not below the home index",
                    index
                )));
            }
        }
        self.place(color, pawn_id, position);
        Ok(())
    }

    fn place(&mut self, color: PlayerColor, pawn_id: usize, position: PawnPosition) {
        if let Some(pawn) = self.pawns.get_mut(&color).and_then(|p| p.get_mut(pawn_id)) {
            pawn.position = position;
        }
    }

    fn emit(&mut self, event: GameEvent) {
        self.statistics.update_from_event(&event);
        self.pending_events.push(event);
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new(GameMode::Classic)
    }
}
