//! Applies commands to the set and words the feedback shown to the user.

use crate::input::Command;
use darts_core::{Leg, Rejection, Set, SetConfig, TurnOutcome};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    Info,
    Warning,
    Success,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    pub tone: Tone,
    pub text: String,
}

impl Message {
    pub fn info(text: impl Into<String>) -> Self {
        Self {
            tone: Tone::Info,
            text: text.into(),
        }
    }

    pub fn warning(text: impl Into<String>) -> Self {
        Self {
            tone: Tone::Warning,
            text: text.into(),
        }
    }

    pub fn success(text: impl Into<String>) -> Self {
        Self {
            tone: Tone::Success,
            text: text.into(),
        }
    }
}

/// What the caller should do after a command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reaction {
    /// Redraw the set and show the message.
    Redraw(Message),
    /// Only show the message.
    Notify(Message),
    ShowJson,
    ShowHelp,
    Quit,
}

/// Owns the set for an interactive session.
pub struct Session {
    config: SetConfig,
    set: Set,
}

impl Session {
    pub fn new(config: SetConfig) -> Self {
        Self {
            config,
            set: Set::default(),
        }
    }

    pub fn set(&self) -> &Set {
        &self.set
    }

    pub fn apply(&mut self, command: Command) -> Reaction {
        match command {
            Command::Start {
                player1,
                player2,
                game_type,
                max_legs,
            } => {
                self.set.start_new_set(
                    player1.as_deref().unwrap_or(&self.config.player1),
                    player2.as_deref().unwrap_or(&self.config.player2),
                    game_type.unwrap_or(self.config.game_type),
                    max_legs.unwrap_or(self.config.max_legs),
                );
                Reaction::Redraw(Message::info(
                    "Set started. Enter points for the current player.",
                ))
            }
            Command::Points(points) => self.add_turn(points),
            Command::Undo => {
                if self.set.current_leg().is_some_and(Leg::is_finished) {
                    Reaction::Notify(Message::warning(
                        "The leg is won. A finished leg cannot be undone; reset to correct it.",
                    ))
                } else if self.set.remove_last_turn() {
                    Reaction::Redraw(Message::info("Last turn removed."))
                } else {
                    Reaction::Notify(Message::warning("There is no turn to remove."))
                }
            }
            Command::NextLeg => {
                if self.set.start_next_leg() {
                    Reaction::Redraw(Message::info("New leg started. Continue scoring."))
                } else if self.set.can_start_next_leg() {
                    Reaction::Notify(Message::warning(
                        "All legs have been played without a winner. Reset to start again.",
                    ))
                } else {
                    Reaction::Notify(Message::warning("The current leg is not finished yet."))
                }
            }
            Command::Reset => {
                self.set.reset();
                Reaction::Redraw(Message::info("All data cleared. Start a new set."))
            }
            Command::Show => Reaction::Redraw(Message::info(format!(
                "Current player: {}",
                self.set.current_player_name()
            ))),
            Command::Json => Reaction::ShowJson,
            Command::Help => Reaction::ShowHelp,
            Command::Quit => Reaction::Quit,
        }
    }

    fn add_turn(&mut self, points: u32) -> Reaction {
        match self.set.add_turn(points) {
            TurnOutcome::Recorded { .. } if points == 0 => Reaction::Redraw(Message::info(
                "No score this turn. Next player's turn.",
            )),
            TurnOutcome::Recorded { .. } => {
                Reaction::Redraw(Message::info("Turn recorded. Next player's turn."))
            }
            TurnOutcome::LegFinished {
                winner,
                set_finished,
            } => {
                let name = self
                    .set
                    .player(winner)
                    .map(|p| p.name.clone())
                    .unwrap_or_default();
                let text = if set_finished {
                    format!(
                        "Leg won by {}. The set is finished. Overall winner: {}.",
                        name, name
                    )
                } else {
                    format!("Leg won by {}. Start the next leg when ready.", name)
                };
                Reaction::Redraw(Message::success(text))
            }
            TurnOutcome::Rejected(Rejection::Bust { .. }) => Reaction::Notify(Message::warning(
                "This score would make the remaining points negative.",
            )),
            TurnOutcome::Rejected(Rejection::NoLeg) => {
                Reaction::Notify(Message::warning("Start a set first."))
            }
            TurnOutcome::Rejected(Rejection::LegFinished) => Reaction::Notify(Message::warning(
                "The leg is finished. Start the next leg to continue.",
            )),
            TurnOutcome::Rejected(Rejection::SetFinished) => {
                Reaction::Notify(Message::warning("The set is finished."))
            }
        }
    }
}
