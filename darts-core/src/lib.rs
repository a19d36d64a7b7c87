use serde::Serialize;
use std::fmt;

pub mod config;
pub mod leg;
pub mod set;
pub mod shared;
pub mod snapshot;
pub mod stats;

pub use config::{ConfigError, SetConfig};
pub use leg::{Leg, Turn};
pub use set::{Rejection, Set, SetPhase, TurnOutcome};
pub use shared::Scoreboard;
pub use snapshot::SetSnapshot;
pub use stats::LegStats;

/// Re-export for throwers to use.
pub use rand::RngCore;

/// Stable identifier of a player within a set.
pub type PlayerId = u32;

pub const DEFAULT_GAME_TYPE: u32 = 501;
pub const DEFAULT_MAX_LEGS: u32 = 5;
/// Most a single visit of three darts can score.
pub const MAX_TURN_POINTS: u32 = 180;
/// Shown wherever there is no value to display.
pub const NO_PLAYER: &str = "–";

/// One of the two players in a set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Player {
    pub id: PlayerId,
    pub name: String,
    pub legs_won: u32,
}

impl Player {
    /// Create a player with no legs won. The name is trimmed and a blank one
    /// becomes "Player <id>".
    pub fn new(id: PlayerId, name: &str) -> Self {
        let name = match name.trim() {
            "" => format!("Player {}", id),
            trimmed => trimmed.to_string(),
        };
        Self {
            id,
            name,
            legs_won: 0,
        }
    }
}

/// The score every leg of a set counts down from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct GameType(u32);

impl GameType {
    /// A zero starting score is not playable and falls back to 501.
    pub fn new(starting_score: u32) -> Self {
        if starting_score == 0 {
            Self(DEFAULT_GAME_TYPE)
        } else {
            Self(starting_score)
        }
    }

    pub fn starting_score(&self) -> u32 {
        self.0
    }
}

impl Default for GameType {
    fn default() -> Self {
        Self(DEFAULT_GAME_TYPE)
    }
}

impl fmt::Display for GameType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// What a thrower knows when it steps up to the oche.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ThrowContext {
    pub leg: u32,
    pub remaining: u32,
    pub opponent_remaining: u32,
}

/// Anything that can produce the score of a visit: a bot, a replay, a test
/// script.
pub trait Thrower {
    fn name(&self) -> &'static str;

    /// Points for this visit. Values above 180 are clamped by the simulator.
    fn throw(&self, ctx: &ThrowContext, rng: &mut dyn RngCore) -> u32;
}

/// How one thrower fared in a simulated set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ThrowerSummary {
    pub name: &'static str,
    pub player_id: PlayerId,
    pub legs_won: u32,
    pub busts: u32,
}

/// Aggregated results for a simulated set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SimulationReport {
    pub legs_played: u32,
    pub turns_recorded: u32,
    pub busts: u32,
    pub winner: Option<PlayerId>,
    pub phase: SetPhase,
    pub throwers: Vec<ThrowerSummary>,
}

impl SimulationReport {
    pub fn describe(&self) -> String {
        format!(
            "legs: {}, turns: {}, busts: {}, phase: {:?}",
            self.legs_played, self.turns_recorded, self.busts, self.phase
        )
    }
}

/// Play a started set to its end with two throwers, one per player in seat
/// order. Busts are scored as a zero visit. Stops when the set is won, a
/// stalemate is reached or `max_turns` visits have been thrown.
pub fn simulate_set(
    set: &mut Set,
    throwers: [&dyn Thrower; 2],
    rng: &mut dyn RngCore,
    max_turns: u32,
) -> SimulationReport {
    let mut summaries: Vec<ThrowerSummary> = throwers
        .iter()
        .zip(set.players())
        .map(|(thrower, player)| ThrowerSummary {
            name: thrower.name(),
            player_id: player.id,
            legs_won: 0,
            busts: 0,
        })
        .collect();

    let mut legs_played = 0;
    let mut turns_recorded = 0;
    let mut busts = 0;
    let mut thrown = 0;

    while thrown < max_turns {
        match set.phase() {
            SetPhase::LegInProgress => {}
            SetPhase::LegFinished => {
                if set.start_next_leg() {
                    continue;
                }
                break;
            }
            SetPhase::Empty | SetPhase::Stalemate | SetPhase::Finished => break,
        }

        let Some(leg) = set.current_leg() else {
            break;
        };
        let seat = leg.current_player_index();
        let (Some(thrower), Some(me)) = (throwers.get(seat), set.players().get(seat)) else {
            break;
        };
        let opponent_remaining = set
            .players()
            .iter()
            .find(|p| p.id != me.id)
            .map(|p| leg.remaining_score(p.id))
            .unwrap_or(0);
        let ctx = ThrowContext {
            leg: leg.number(),
            remaining: leg.remaining_score(me.id),
            opponent_remaining,
        };

        let points = thrower.throw(&ctx, rng).min(MAX_TURN_POINTS);
        thrown += 1;

        match set.add_turn(points) {
            TurnOutcome::Recorded { .. } => turns_recorded += 1,
            TurnOutcome::LegFinished { winner, .. } => {
                turns_recorded += 1;
                legs_played += 1;
                if let Some(summary) = summaries.iter_mut().find(|s| s.player_id == winner) {
                    summary.legs_won += 1;
                }
            }
            TurnOutcome::Rejected(Rejection::Bust { .. }) => {
                busts += 1;
                if let Some(summary) = summaries.get_mut(seat) {
                    summary.busts += 1;
                }
                if matches!(set.add_turn(0), TurnOutcome::Recorded { .. }) {
                    turns_recorded += 1;
                }
            }
            TurnOutcome::Rejected(_) => break,
        }
    }

    SimulationReport {
        legs_played,
        turns_recorded,
        busts,
        winner: set.winner_id(),
        phase: set.phase(),
        throwers: summaries,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    /// Always throws the same score, or the checkout when it is smaller.
    struct FixedThrower(u32);

    impl Thrower for FixedThrower {
        fn name(&self) -> &'static str {
            "fixed"
        }

        fn throw(&self, ctx: &ThrowContext, _rng: &mut dyn RngCore) -> u32 {
            self.0.min(ctx.remaining)
        }
    }

    /// Throws a fixed score regardless of what is left.
    struct Reckless(u32);

    impl Thrower for Reckless {
        fn name(&self) -> &'static str {
            "reckless"
        }

        fn throw(&self, _ctx: &ThrowContext, _rng: &mut dyn RngCore) -> u32 {
            self.0
        }
    }

    fn started(game_type: u32, max_legs: u32) -> Set {
        let mut set = Set::default();
        set.start_new_set("Ann", "Bob", game_type, max_legs);
        set
    }

    #[test]
    fn player_names_default_by_position() {
        assert_eq!(Player::new(1, " ").name, "Player 1");
        assert_eq!(Player::new(2, "").name, "Player 2");
        assert_eq!(Player::new(2, " Bob ").name, "Bob");
        assert_eq!(Player::new(1, "Ann").legs_won, 0);
    }

    #[test]
    fn game_type_rejects_zero() {
        assert_eq!(GameType::new(0).starting_score(), 501);
        assert_eq!(GameType::new(301).starting_score(), 301);
        assert_eq!(GameType::new(701).to_string(), "701");
    }

    #[test]
    fn faster_thrower_wins_the_set() {
        let mut set = started(100, 3);
        let fast = FixedThrower(50);
        let slow = FixedThrower(10);
        let mut rng = StdRng::seed_from_u64(7);

        let report = simulate_set(&mut set, [&fast, &slow], &mut rng, 1_000);

        assert_eq!(report.winner, Some(1));
        assert_eq!(report.phase, SetPhase::Finished);
        assert_eq!(report.legs_played, 2);
        // Each leg: Ann 50, Bob 10, Ann 50.
        assert_eq!(report.turns_recorded, 6);
        assert_eq!(report.throwers[0].legs_won, 2);
        assert_eq!(report.throwers[1].legs_won, 0);
        assert!(set.is_finished());
    }

    #[test]
    fn busts_are_scored_as_zero() {
        let mut set = started(100, 1);
        let reckless = Reckless(60);
        let steady = FixedThrower(25);
        let mut rng = StdRng::seed_from_u64(1);

        let report = simulate_set(&mut set, [&reckless, &steady], &mut rng, 1_000);

        // Ann: 60 (40 left) then busts every visit; Bob needs four 25s.
        assert_eq!(report.winner, Some(2));
        assert_eq!(report.busts, 3);
        assert_eq!(report.throwers[0].busts, 3);
        assert!(report.describe().contains("busts: 3"));
    }

    #[test]
    fn turn_cap_stops_the_simulation() {
        let mut set = started(501, 5);
        let idle = FixedThrower(0);
        let mut rng = StdRng::seed_from_u64(3);

        let report = simulate_set(&mut set, [&idle, &idle], &mut rng, 10);

        assert_eq!(report.turns_recorded, 10);
        assert_eq!(report.winner, None);
        assert_eq!(report.phase, SetPhase::LegInProgress);
    }

    /// Checks out on odd legs and misses everything on even ones.
    struct OddLegsOnly;

    impl Thrower for OddLegsOnly {
        fn name(&self) -> &'static str {
            "odd-legs"
        }

        fn throw(&self, ctx: &ThrowContext, _rng: &mut dyn RngCore) -> u32 {
            if ctx.leg % 2 == 1 {
                ctx.remaining
            } else {
                0
            }
        }
    }

    #[test]
    fn simulation_stops_at_stalemate() {
        let mut set = started(50, 2);
        let odd = OddLegsOnly;
        let closer = FixedThrower(50);
        let mut rng = StdRng::seed_from_u64(3);

        let report = simulate_set(&mut set, [&odd, &closer], &mut rng, 100);

        assert_eq!(report.phase, SetPhase::Stalemate);
        assert_eq!(report.winner, None);
        assert_eq!(report.legs_played, 2);
        assert_eq!(report.throwers[0].legs_won, 1);
        assert_eq!(report.throwers[1].legs_won, 1);
    }

    #[test]
    fn context_reports_both_scores() {
        struct Recorder(std::cell::RefCell<Vec<ThrowContext>>);

        impl Thrower for Recorder {
            fn name(&self) -> &'static str {
                "recorder"
            }

            fn throw(&self, ctx: &ThrowContext, _rng: &mut dyn RngCore) -> u32 {
                self.0.borrow_mut().push(*ctx);
                20
            }
        }

        let mut set = started(100, 1);
        let recorder = Recorder(std::cell::RefCell::new(Vec::new()));
        let mut rng = StdRng::seed_from_u64(9);

        simulate_set(&mut set, [&recorder, &recorder], &mut rng, 3);

        let seen = recorder.0.borrow();
        assert_eq!(
            seen[2],
            ThrowContext {
                leg: 1,
                remaining: 80,
                opponent_remaining: 80,
            }
        );
        assert_eq!(seen[1].opponent_remaining, 80);
        assert_eq!(seen[1].remaining, 100);
    }

    #[test]
    fn simulation_does_nothing_on_empty_set() {
        let mut set = Set::default();
        let a = FixedThrower(50);
        let mut rng = StdRng::seed_from_u64(3);

        let report = simulate_set(&mut set, [&a, &a], &mut rng, 100);

        assert_eq!(report.turns_recorded, 0);
        assert_eq!(report.phase, SetPhase::Empty);
        assert!(report.throwers.is_empty());
    }
}
