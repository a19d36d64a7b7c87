mod input;
mod render;
mod session;

use crate::input::parse_command;
use crate::session::{Message, Reaction, Session};
use anyhow::Context as _;
use clap::Parser;
use darts_core::{simulate_set, Set, SetConfig};
use log::{debug, info};
use rand::rngs::StdRng;
use rand::SeedableRng;
use random_bot::RandomBot;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use treble_bot::TrebleBot;

/// Live scorer for two-player countdown darts.
#[derive(Debug, Parser)]
#[command(version)]
struct Args {
    /// JSON file with player names, game type and max legs
    #[arg(long)]
    config: Option<PathBuf>,
    #[arg(long)]
    player1: Option<String>,
    #[arg(long)]
    player2: Option<String>,
    /// Starting score of every leg, e.g. 501
    #[arg(long)]
    game_type: Option<u32>,
    /// Best-of leg count
    #[arg(long)]
    max_legs: Option<u32>,
    /// Play treble-bot against random-bot instead of reading input
    #[arg(long)]
    simulate: bool,
    /// Seed for the simulation
    #[arg(long, default_value_t = 0)]
    seed: u64,
    /// Hit rate of random-bot on its finishing double
    #[arg(long, default_value_t = 0.3, value_parser = parse_accuracy)]
    accuracy: f64,
    /// Stop a simulation after this many visits
    #[arg(long, default_value_t = 10_000)]
    max_turns: u32,
}

impl Args {
    fn apply_to(&self, mut config: SetConfig) -> SetConfig {
        if let Some(name) = &self.player1 {
            config.player1 = name.clone();
        }
        if let Some(name) = &self.player2 {
            config.player2 = name.clone();
        }
        if let Some(game_type) = self.game_type {
            config.game_type = game_type;
        }
        if let Some(max_legs) = self.max_legs {
            config.max_legs = max_legs;
        }
        config
    }
}

fn parse_accuracy(raw: &str) -> Result<f64, String> {
    let accuracy: f64 = raw.parse().map_err(|_| format!("`{raw}` is not a number"))?;
    if (0.0..=1.0).contains(&accuracy) {
        Ok(accuracy)
    } else {
        Err(format!("accuracy must be between 0 and 1, got {raw}"))
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let args = Args::parse();
    let config = SetConfig::load(args.config.as_deref()).context("loading set configuration")?;
    let config = args.apply_to(config);
    debug!("configuration: {:?}", config);

    if args.simulate {
        return run_simulation(&args, &config);
    }
    run_interactive(config)
}

fn run_simulation(args: &Args, config: &SetConfig) -> anyhow::Result<()> {
    let mut set = Set::from_config(config);
    let random = RandomBot::new(args.accuracy);
    let mut rng = StdRng::seed_from_u64(args.seed);

    info!("simulating with seed {}", args.seed);
    let report = simulate_set(&mut set, [&TrebleBot, &random], &mut rng, args.max_turns);

    print!("{}", render::report(&report, &set.snapshot()));
    Ok(())
}

fn run_interactive(config: SetConfig) -> anyhow::Result<()> {
    let mut session = Session::new(config);
    let stdin = io::stdin();
    let mut stdout = io::stdout();

    writeln!(stdout, "{}", render::help())?;
    print!("{}", render::status(&session.set().snapshot()));

    for line in stdin.lock().lines() {
        let line = line.context("reading input")?;

        let reaction = match parse_command(&line) {
            Ok(command) => session.apply(command),
            Err(err) => Reaction::Notify(Message::warning(err.to_string())),
        };

        match reaction {
            Reaction::Redraw(message) => {
                write!(stdout, "{}", render::status(&session.set().snapshot()))?;
                writeln!(stdout, "{}", render::message(&message))?;
            }
            Reaction::Notify(message) => writeln!(stdout, "{}", render::message(&message))?,
            Reaction::ShowJson => {
                let json = session
                    .set()
                    .snapshot()
                    .to_json()
                    .context("serializing snapshot")?;
                writeln!(stdout, "{}", json)?;
            }
            Reaction::ShowHelp => writeln!(stdout, "{}", render::help())?,
            Reaction::Quit => break,
        }
        stdout.flush()?;
    }

    Ok(())
}
