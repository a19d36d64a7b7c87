use crate::session::{Message, Tone};
use darts_core::{SetPhase, SetSnapshot, SimulationReport};
use std::fmt::Write;

pub fn status(snapshot: &SetSnapshot) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "Game: {}  |  {}  |  Leg: {}  |  Up: {}  |  {}",
        snapshot.game,
        snapshot.format,
        snapshot.leg_number,
        snapshot.current_player,
        phase_label(snapshot.phase)
    );

    if !snapshot.players.is_empty() {
        let _ = writeln!(out, "{:<16} {:>5} {:>9}  {}", "Player", "Legs", "Remaining", "Leg stats");
        for row in &snapshot.players {
            let _ = writeln!(
                out,
                "{:<16} {:>5} {:>9}  {}",
                row.name,
                row.legs_won,
                row.remaining,
                row.stats.describe()
            );
        }
    }

    if !snapshot.turns.is_empty() {
        let _ = writeln!(out, "{:>3} {:<16} {:>6} {:>9}", "#", "Player", "Points", "Remaining");
        for turn in &snapshot.turns {
            let _ = writeln!(
                out,
                "{:>3} {:<16} {:>6} {:>9}",
                turn.index, turn.player, turn.points, turn.remaining
            );
        }
    }

    out
}

fn phase_label(phase: SetPhase) -> &'static str {
    match phase {
        SetPhase::Empty => "No set",
        SetPhase::LegInProgress => "Leg in progress",
        SetPhase::LegFinished => "Leg finished",
        SetPhase::Stalemate => "Stalemate",
        SetPhase::Finished => "Set finished",
    }
}

pub fn message(message: &Message) -> String {
    let tag = match message.tone {
        Tone::Info => "info",
        Tone::Warning => "warn",
        Tone::Success => "done",
    };
    format!("[{}] {}", tag, message.text)
}

pub fn report(report: &SimulationReport, snapshot: &SetSnapshot) -> String {
    let mut out = String::new();
    for thrower in &report.throwers {
        let _ = writeln!(
            out,
            "{:<12} legs: {}, busts: {}",
            thrower.name, thrower.legs_won, thrower.busts
        );
    }
    let _ = writeln!(out, "{}", report.describe());
    out.push_str(&status(snapshot));
    out
}

pub fn help() -> &'static str {
    "Commands:
  <points>                      record a visit (0-180) for the current player
  start [p1] [p2] [game] [legs] start a new set
  undo                          remove the last turn of the current leg
  next                          start the next leg
  reset                         clear the set
  show                          print the current state
  json                          print the current state as JSON
  help                          show this text
  quit                          leave"
}
