//! Impossible TTT - terminal front end
//!
//! Hosts the in-memory data service and renders the grid to stdout.

#![warn(missing_docs)]

mod cli;

use anyhow::{Context, Result};
use clap::Parser;
use cli::{Cli, Command, GameArgs};
use impossible_ttt::{ComputerPlayer, GameConfig, Location, PlaySession, SessionStatus};
use std::io::{BufRead, Write};
use tracing::{info, instrument, warn};
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Play(args) => run_play(load_config(&args)?),
        Command::Simulate { game, human_seed } => run_simulate(load_config(&game)?, human_seed),
    }
}

/// Loads the config file (if any) and applies command-line overrides.
#[instrument]
fn load_config(args: &GameArgs) -> Result<GameConfig> {
    let mut config = match &args.config {
        Some(path) => GameConfig::from_file(path)?,
        None => GameConfig::default(),
    };
    if let Some(rounds) = args.rounds {
        config = config.with_num_rounds(rounds);
    }
    if args.seed.is_some() {
        config = config.with_seed(args.seed);
    }
    if let (Some(human), Some(computer)) = (&args.human_token, &args.computer_token) {
        config = config.with_tokens(human.as_str(), computer.as_str());
    }
    Ok(config)
}

/// Run an interactive game on stdin/stdout
fn run_play(config: GameConfig) -> Result<()> {
    info!(rounds = config.num_rounds(), "Starting interactive game");

    let mut session = PlaySession::from_config(&config)?;
    let mut status = session.settle()?;
    let stdin = std::io::stdin();
    let mut lines = stdin.lock().lines();
    let mut rounds_seen = 0;

    loop {
        match status {
            SessionStatus::Finished(record) => {
                println!("\nGame over: {}", record.winner());
                println!("{}", serde_json::to_string_pretty(&record)?);
                return Ok(());
            }
            SessionStatus::NoGame => anyhow::bail!("No game in progress"),
            SessionStatus::AwaitingHuman => {}
        }

        let game = session.game().context("Game disappeared mid-session")?;
        if game.rounds().len() > rounds_seen {
            rounds_seen = game.rounds().len();
            if let Some(round) = game.rounds().last() {
                println!("\n{}\nRound {} winner: {}", round.board, rounds_seen, round.winner);
            }
            println!("Score: {}", game.score());
        }

        println!(
            "\nRound {} of {} - you are {}\n{}",
            game.rounds().len() + 1,
            game.num_rounds(),
            game.tokens().human(),
            game.current_squares()
        );
        print!("Your move (1-9 or row col): ");
        std::io::stdout().flush()?;

        let Some(line) = lines.next() else {
            info!("Input closed, leaving game unfinished");
            return Ok(());
        };
        let Some(location) = Location::parse(&line?) else {
            println!("Enter a square number 1-9, or a row and a column, each 0-2.");
            continue;
        };

        status = match session.human_move(location) {
            Ok(status) => status,
            Err(e) => {
                warn!(error = %e, "Move rejected");
                println!("{}", e);
                SessionStatus::AwaitingHuman
            }
        };
    }
}

/// Play both sides at random and print the final record
fn run_simulate(config: GameConfig, human_seed: Option<u64>) -> Result<()> {
    info!(rounds = config.num_rounds(), "Starting simulated game");

    let mut stand_in = match human_seed {
        Some(seed) => ComputerPlayer::seeded(seed),
        None => ComputerPlayer::from_entropy(),
    };
    let mut session = PlaySession::from_config(&config)?;
    let mut status = session.settle()?;

    loop {
        match status {
            SessionStatus::Finished(record) => {
                println!("{}", serde_json::to_string_pretty(&record)?);
                return Ok(());
            }
            SessionStatus::NoGame => anyhow::bail!("No game in progress"),
            SessionStatus::AwaitingHuman => {
                let grid = session
                    .game()
                    .context("Game disappeared mid-session")?
                    .current_squares();
                let location = stand_in.choose_move(grid)?;
                status = session.human_move(location)?;
            }
        }
    }
}
