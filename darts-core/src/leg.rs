//! A single countdown leg and its turn history.

use crate::PlayerId;
use serde::Serialize;
use std::collections::HashMap;

/// One scoring visit by one player.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Turn {
    /// Player who threw this turn.
    pub player_id: PlayerId,
    /// Points scored (0-180).
    pub points: u32,
    /// The player's remaining score right after this turn.
    pub remaining: u32,
}

/// One countdown game from the starting score to exactly zero.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Leg {
    number: u32,
    starting_score: u32,
    turns: Vec<Turn>,
    finished: bool,
    current_player_index: usize,
}

impl Leg {
    pub(crate) fn new(number: u32, starting_score: u32) -> Self {
        Self {
            number,
            starting_score,
            turns: Vec::new(),
            finished: false,
            current_player_index: 0,
        }
    }

    /// 1-based leg number within the set.
    pub fn number(&self) -> u32 {
        self.number
    }

    pub fn starting_score(&self) -> u32 {
        self.starting_score
    }

    /// Turns in the order they were thrown.
    pub fn turns(&self) -> &[Turn] {
        &self.turns
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// Index into the set's player list of whoever throws next.
    pub fn current_player_index(&self) -> usize {
        self.current_player_index
    }

    /// Starting score minus everything the player has scored in this leg.
    pub fn remaining_score(&self, player_id: PlayerId) -> u32 {
        let scored: u32 = self
            .turns
            .iter()
            .filter(|t| t.player_id == player_id)
            .map(|t| t.points)
            .sum();
        self.starting_score.saturating_sub(scored)
    }

    pub(crate) fn push_turn(&mut self, turn: Turn) {
        self.turns.push(turn);
    }

    pub(crate) fn finish(&mut self) {
        self.finished = true;
    }

    pub(crate) fn advance(&mut self, player_count: usize) {
        self.current_player_index = (self.current_player_index + 1) % player_count;
    }

    /// Drop the latest turn and rebuild every cached running score from the
    /// starting score. `players` is the set's player order, used to work out
    /// who throws next.
    pub(crate) fn pop_turn(&mut self, players: &[PlayerId]) -> Option<Turn> {
        let removed = self.turns.pop()?;
        self.replay();

        self.current_player_index = match self.turns.last() {
            None => 0,
            Some(last) => players
                .iter()
                .position(|id| *id == last.player_id)
                .map(|idx| (idx + 1) % players.len())
                .unwrap_or(0),
        };

        Some(removed)
    }

    fn replay(&mut self) {
        let starting_score = self.starting_score;
        let mut scored: HashMap<PlayerId, u32> = HashMap::new();

        for turn in &mut self.turns {
            let total = scored.entry(turn.player_id).or_insert(0);
            *total += turn.points;
            turn.remaining = starting_score.saturating_sub(*total);
        }
    }
}
