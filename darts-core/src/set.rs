//! The scoring engine: a two-player countdown set and every operation that
//! mutates it.

use crate::config::SetConfig;
use crate::leg::{Leg, Turn};
use crate::{GameType, Player, PlayerId, DEFAULT_MAX_LEGS, NO_PLAYER};
use log::{debug, info};
use serde::Serialize;
use std::fmt;

/// Why `add_turn` refused to record anything.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Rejection {
    /// No set has been started, or it was reset.
    NoLeg,
    /// The set already has a winner.
    SetFinished,
    /// The current leg is over; start the next one first.
    LegFinished,
    /// The points would take the player below zero.
    Bust { remaining: u32 },
}

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Rejection::NoLeg => write!(f, "no set in progress"),
            Rejection::SetFinished => write!(f, "the set is finished"),
            Rejection::LegFinished => write!(f, "the leg is finished"),
            Rejection::Bust { .. } => {
                write!(f, "this score would make the remaining points negative")
            }
        }
    }
}

/// Result of `Set::add_turn`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum TurnOutcome {
    /// The turn was recorded and play passed to the next player.
    Recorded { player_id: PlayerId, remaining: u32 },
    /// The turn checked out and won the leg.
    LegFinished { winner: PlayerId, set_finished: bool },
    /// Nothing was recorded.
    Rejected(Rejection),
}

/// Where the set is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SetPhase {
    /// Not started, or reset.
    Empty,
    LegInProgress,
    /// The leg is won and another one may be started.
    LegFinished,
    /// Every allowed leg has been played without anyone reaching the
    /// required number of legs. Nothing further can happen until a reset.
    Stalemate,
    Finished,
}

/// A two-player countdown set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Set {
    players: Vec<Player>,
    game_type: GameType,
    max_legs: u32,
    current_leg: Option<Leg>,
    finished: bool,
    winner_id: Option<PlayerId>,
}

impl Default for Set {
    fn default() -> Self {
        Self {
            players: Vec::new(),
            game_type: GameType::default(),
            max_legs: DEFAULT_MAX_LEGS,
            current_leg: None,
            finished: false,
            winner_id: None,
        }
    }
}

impl Set {
    /// Start a set from a loaded configuration.
    pub fn from_config(config: &SetConfig) -> Self {
        let mut set = Self::default();
        set.start_new_set(
            &config.player1,
            &config.player2,
            config.game_type,
            config.max_legs,
        );
        set
    }

    /// Replace all state with a fresh set and open leg 1.
    ///
    /// Blank names fall back to "Player 1"/"Player 2", a zero game type to
    /// 501 and zero max legs to 5.
    pub fn start_new_set(
        &mut self,
        player1_name: &str,
        player2_name: &str,
        game_type: u32,
        max_legs: u32,
    ) {
        let game_type = GameType::new(game_type);
        let max_legs = if max_legs == 0 {
            DEFAULT_MAX_LEGS
        } else {
            max_legs
        };

        *self = Self {
            players: vec![
                Player::new(1, player1_name),
                Player::new(2, player2_name),
            ],
            game_type,
            max_legs,
            current_leg: Some(Leg::new(1, game_type.starting_score())),
            finished: false,
            winner_id: None,
        };

        debug!(
            "set started: {} vs {}, {}, best of {}",
            self.players[0].name, self.players[1].name, game_type, max_legs
        );
    }

    pub fn players(&self) -> &[Player] {
        &self.players
    }

    pub fn player(&self, id: PlayerId) -> Option<&Player> {
        self.players.iter().find(|p| p.id == id)
    }

    pub fn game_type(&self) -> GameType {
        self.game_type
    }

    pub fn max_legs(&self) -> u32 {
        self.max_legs
    }

    /// Legs a player must win to take the set.
    pub fn legs_needed(&self) -> u32 {
        self.max_legs / 2 + 1
    }

    pub fn current_leg(&self) -> Option<&Leg> {
        self.current_leg.as_ref()
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    pub fn winner_id(&self) -> Option<PlayerId> {
        self.winner_id
    }

    pub fn winner(&self) -> Option<&Player> {
        self.winner_id.and_then(|id| self.player(id))
    }

    /// Record a visit for the player whose turn it is.
    ///
    /// Only the arithmetic is checked here: a visit that would take the
    /// player below zero is refused. Range checks on the raw input belong to
    /// the caller.
    pub fn add_turn(&mut self, points: u32) -> TurnOutcome {
        let finished = self.finished;
        let player_count = self.players.len();

        let leg = match self.current_leg.as_mut() {
            None => return Self::reject(Rejection::NoLeg),
            Some(_) if finished => return Self::reject(Rejection::SetFinished),
            Some(leg) if leg.is_finished() => return Self::reject(Rejection::LegFinished),
            Some(leg) => leg,
        };

        let Some(player_id) = self
            .players
            .get(leg.current_player_index())
            .map(|p| p.id)
        else {
            return Self::reject(Rejection::NoLeg);
        };

        let before = leg.remaining_score(player_id);
        let Some(remaining) = before.checked_sub(points) else {
            return Self::reject(Rejection::Bust { remaining: before });
        };

        leg.push_turn(Turn {
            player_id,
            points,
            remaining,
        });

        if remaining > 0 {
            leg.advance(player_count);
            debug!("player {} scored {}, {} left", player_id, points, remaining);
            return TurnOutcome::Recorded {
                player_id,
                remaining,
            };
        }

        leg.finish();
        let leg_number = leg.number();
        if let Some(winner) = self.players.iter_mut().find(|p| p.id == player_id) {
            winner.legs_won += 1;
            info!(
                "leg {} won by {} ({} legs)",
                leg_number, winner.name, winner.legs_won
            );
        }
        self.update_set_winner();

        TurnOutcome::LegFinished {
            winner: player_id,
            set_finished: self.finished,
        }
    }

    /// Undo the latest turn of an open leg. Returns whether anything changed.
    pub fn remove_last_turn(&mut self) -> bool {
        let order: Vec<PlayerId> = self.players.iter().map(|p| p.id).collect();
        let Some(leg) = self.current_leg.as_mut() else {
            return false;
        };
        if leg.is_finished() {
            return false;
        }

        match leg.pop_turn(&order) {
            Some(turn) => {
                debug!(
                    "removed {} points by player {}, {} turns left",
                    turn.points,
                    turn.player_id,
                    leg.turns().len()
                );
                true
            }
            None => false,
        }
    }

    pub fn can_start_next_leg(&self) -> bool {
        matches!(&self.current_leg, Some(leg) if leg.is_finished()) && !self.finished
    }

    /// Open the next leg if the current one is won, the set is undecided and
    /// the leg limit allows it. Returns whether a leg was started.
    pub fn start_next_leg(&mut self) -> bool {
        if !self.can_start_next_leg() {
            return false;
        }
        let Some(leg) = self.current_leg.as_ref() else {
            return false;
        };
        let next = leg.number() + 1;
        if next > self.max_legs {
            debug!("leg {} would exceed best of {}", next, self.max_legs);
            return false;
        }

        self.current_leg = Some(Leg::new(next, self.game_type.starting_score()));
        debug!("leg {} started", next);
        true
    }

    /// Clear legs won, the winner and the current leg. Players keep their
    /// ids and names.
    pub fn reset(&mut self) {
        for player in &mut self.players {
            player.legs_won = 0;
        }
        self.finished = false;
        self.winner_id = None;
        self.current_leg = None;
        debug!("set reset");
    }

    /// Remaining score of a player in the current leg.
    pub fn remaining_score(&self, player_id: PlayerId) -> Option<u32> {
        self.current_leg
            .as_ref()
            .map(|leg| leg.remaining_score(player_id))
    }

    pub fn current_player(&self) -> Option<&Player> {
        let leg = self.current_leg.as_ref()?;
        self.players.get(leg.current_player_index())
    }

    /// Name of whoever throws next, or "–" when there is no leg.
    pub fn current_player_name(&self) -> &str {
        self.current_player()
            .map(|p| p.name.as_str())
            .unwrap_or(NO_PLAYER)
    }

    pub fn phase(&self) -> SetPhase {
        match &self.current_leg {
            None => SetPhase::Empty,
            Some(_) if self.finished => SetPhase::Finished,
            Some(leg) if !leg.is_finished() => SetPhase::LegInProgress,
            Some(leg) if leg.number() >= self.max_legs => SetPhase::Stalemate,
            Some(_) => SetPhase::LegFinished,
        }
    }

    fn update_set_winner(&mut self) {
        let needed = self.legs_needed();
        if let Some(player) = self.players.iter().find(|p| p.legs_won >= needed) {
            self.finished = true;
            self.winner_id = Some(player.id);
            info!("set won by {}", player.name);
        }
    }

    fn reject(reason: Rejection) -> TurnOutcome {
        debug!("turn rejected: {}", reason);
        TurnOutcome::Rejected(reason)
    }
}
