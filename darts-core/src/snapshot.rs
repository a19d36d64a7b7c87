//! Render-ready view of a set, produced after every mutation.

use crate::set::{Set, SetPhase};
use crate::stats::LegStats;
use crate::{PlayerId, NO_PLAYER};
use serde::Serialize;

/// A row of the players table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlayerRow {
    pub id: PlayerId,
    pub name: String,
    pub legs_won: u32,
    pub remaining: u32,
    pub stats: LegStats,
}

/// A row of the turn history table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TurnRow {
    /// 1-based position in the leg.
    pub index: usize,
    pub player: String,
    pub points: u32,
    pub remaining: u32,
}

/// Which commands make sense right now.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Controls {
    pub can_add_turn: bool,
    pub can_undo: bool,
    pub can_start_next_leg: bool,
}

/// Everything a presentation layer needs to draw the current set.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SetSnapshot {
    pub game: String,
    pub format: String,
    pub leg_number: String,
    pub current_player: String,
    pub phase: SetPhase,
    pub players: Vec<PlayerRow>,
    pub turns: Vec<TurnRow>,
    pub controls: Controls,
}

impl SetSnapshot {
    pub fn capture(set: &Set) -> Self {
        let phase = set.phase();
        let Some(leg) = set.current_leg() else {
            return Self {
                game: NO_PLAYER.to_string(),
                format: NO_PLAYER.to_string(),
                leg_number: NO_PLAYER.to_string(),
                current_player: NO_PLAYER.to_string(),
                phase,
                players: Vec::new(),
                turns: Vec::new(),
                controls: Controls {
                    can_add_turn: false,
                    can_undo: false,
                    can_start_next_leg: false,
                },
            };
        };

        let current_player = if set.is_finished() {
            "Set finished".to_string()
        } else {
            set.current_player_name().to_string()
        };

        let players = set
            .players()
            .iter()
            .map(|p| PlayerRow {
                id: p.id,
                name: p.name.clone(),
                legs_won: p.legs_won,
                remaining: leg.remaining_score(p.id),
                stats: LegStats::for_player(leg, p.id),
            })
            .collect();

        let turns = leg
            .turns()
            .iter()
            .enumerate()
            .map(|(idx, turn)| TurnRow {
                index: idx + 1,
                player: set
                    .player(turn.player_id)
                    .map(|p| p.name.clone())
                    .unwrap_or_else(|| "?".to_string()),
                points: turn.points,
                remaining: turn.remaining,
            })
            .collect();

        let open = !set.is_finished() && !leg.is_finished();

        Self {
            game: format!("{} down", set.game_type()),
            format: format!("Best of {}", set.max_legs()),
            leg_number: leg.number().to_string(),
            current_player,
            phase,
            players,
            turns,
            controls: Controls {
                can_add_turn: open,
                can_undo: open && !leg.turns().is_empty(),
                can_start_next_leg: set.can_start_next_leg(),
            },
        }
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

impl Set {
    pub fn snapshot(&self) -> SetSnapshot {
        SetSnapshot::capture(self)
    }
}
