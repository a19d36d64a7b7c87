//! Parsing of raw input lines into commands.

use darts_core::MAX_TURN_POINTS;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PointsError {
    #[error("Please enter the points for this turn.")]
    Empty,
    #[error("Points must be an integer between 0 and {max}.", max = MAX_TURN_POINTS)]
    OutOfRange,
    #[error("The {name} must be a whole number, got {value:?}.")]
    InvalidArgument { name: &'static str, value: String },
}

/// Parse the points of a visit, accepting only whole numbers in 0..=180.
pub fn parse_points(raw: &str) -> Result<u32, PointsError> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err(PointsError::Empty);
    }
    match raw.parse::<u32>() {
        Ok(points) if points <= MAX_TURN_POINTS => Ok(points),
        _ => Err(PointsError::OutOfRange),
    }
}

/// Something the user asked for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Start a new set; missing values come from the configuration.
    Start {
        player1: Option<String>,
        player2: Option<String>,
        game_type: Option<u32>,
        max_legs: Option<u32>,
    },
    Points(u32),
    Undo,
    NextLeg,
    Reset,
    Show,
    Json,
    Help,
    Quit,
}

/// Turn an input line into a command. Anything that is not a keyword is
/// treated as the points of a visit.
pub fn parse_command(line: &str) -> Result<Command, PointsError> {
    let mut words = line.split_whitespace();
    let Some(first) = words.next() else {
        return Err(PointsError::Empty);
    };

    let command = match first.to_ascii_lowercase().as_str() {
        "start" | "new" => Command::Start {
            player1: words.next().map(str::to_string),
            player2: words.next().map(str::to_string),
            game_type: number_argument(words.next(), "game type")?,
            max_legs: number_argument(words.next(), "number of legs")?,
        },
        "undo" | "u" => Command::Undo,
        "next" | "n" => Command::NextLeg,
        "reset" => Command::Reset,
        "show" | "s" => Command::Show,
        "json" => Command::Json,
        "help" | "?" => Command::Help,
        "quit" | "q" | "exit" => Command::Quit,
        _ => Command::Points(parse_points(line)?),
    };
    Ok(command)
}

fn number_argument(word: Option<&str>, name: &'static str) -> Result<Option<u32>, PointsError> {
    word.map(|w| {
        w.parse().map_err(|_| PointsError::InvalidArgument {
            name,
            value: w.to_string(),
        })
    })
    .transpose()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn points_in_range_parse() {
        assert_eq!(parse_points("0"), Ok(0));
        assert_eq!(parse_points(" 60 "), Ok(60));
        assert_eq!(parse_points("180"), Ok(180));
    }

    #[test]
    fn blank_points_ask_for_input() {
        assert_eq!(parse_points("   "), Err(PointsError::Empty));
        assert_eq!(
            PointsError::Empty.to_string(),
            "Please enter the points for this turn."
        );
    }

    #[test]
    fn bad_points_are_out_of_range() {
        for raw in ["181", "-1", "12.5", "sixty", "1e2"] {
            assert_eq!(parse_points(raw), Err(PointsError::OutOfRange), "{raw}");
        }
        assert_eq!(
            PointsError::OutOfRange.to_string(),
            "Points must be an integer between 0 and 180."
        );
    }

    #[test]
    fn keywords_become_commands() {
        assert_eq!(parse_command("undo"), Ok(Command::Undo));
        assert_eq!(parse_command("N"), Ok(Command::NextLeg));
        assert_eq!(parse_command("reset"), Ok(Command::Reset));
        assert_eq!(parse_command("q"), Ok(Command::Quit));
        assert_eq!(parse_command("45"), Ok(Command::Points(45)));
        assert_eq!(parse_command(""), Err(PointsError::Empty));
        assert_eq!(parse_command("200"), Err(PointsError::OutOfRange));
    }

    #[test]
    fn start_takes_optional_arguments() {
        assert_eq!(
            parse_command("start Ann Bob 301 3"),
            Ok(Command::Start {
                player1: Some("Ann".to_string()),
                player2: Some("Bob".to_string()),
                game_type: Some(301),
                max_legs: Some(3),
            })
        );
        assert_eq!(
            parse_command("new"),
            Ok(Command::Start {
                player1: None,
                player2: None,
                game_type: None,
                max_legs: None,
            })
        );
    }

    #[test]
    fn start_reports_malformed_numbers() {
        assert_eq!(
            parse_command("start Ann Bob abc 3"),
            Err(PointsError::InvalidArgument {
                name: "game type",
                value: "abc".to_string(),
            })
        );
        assert_eq!(
            parse_command("start Ann Bob 301 -1"),
            Err(PointsError::InvalidArgument {
                name: "number of legs",
                value: "-1".to_string(),
            })
        );
        assert_eq!(
            parse_command("start Ann Bob abc 3")
                .unwrap_err()
                .to_string(),
            "The game type must be a whole number, got \"abc\"."
        );
    }
}
