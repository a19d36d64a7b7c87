//! Per-player statistics for a leg.

use crate::leg::{Leg, Turn};
use crate::{PlayerId, MAX_TURN_POINTS};
use serde::Serialize;

/// What one player has done so far in a leg.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct LegStats {
    /// Visits thrown.
    pub turns: u32,
    /// Total points scored.
    pub points: u32,
    /// Average points per visit of three darts.
    pub average: f64,
    /// Highest single visit.
    pub best_turn: u32,
    /// Visits of 180.
    pub maximums: u32,
}

impl LegStats {
    /// Collect stats for one player from the leg's turn history.
    pub fn for_player(leg: &Leg, player_id: PlayerId) -> Self {
        let mut stats = Self::default();
        for turn in leg.turns().iter().filter(|t| t.player_id == player_id) {
            stats.record(turn);
        }
        stats
    }

    fn record(&mut self, turn: &Turn) {
        self.turns += 1;
        self.points += turn.points;
        self.best_turn = self.best_turn.max(turn.points);
        if turn.points == MAX_TURN_POINTS {
            self.maximums += 1;
        }
        self.average = f64::from(self.points) / f64::from(self.turns);
    }

    pub fn describe(&self) -> String {
        format!(
            "avg {:.1}, best {}, 180s {}",
            self.average, self.best_turn, self.maximums
        )
    }
}
