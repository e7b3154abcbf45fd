//! Command-line interface for impossible_ttt.

use clap::{Args, Parser, Subcommand};

/// Impossible TTT - tic-tac-toe against a random computer opponent
#[derive(Parser, Debug)]
#[command(name = "impossible_ttt")]
#[command(about = "Play multi-round tic-tac-toe against the computer", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Play interactively, entering moves as "row col"
    Play(GameArgs),

    /// Let a random stand-in play the human side and print the final record as JSON
    Simulate {
        /// Shared game options
        #[command(flatten)]
        game: GameArgs,

        /// Seed for the stand-in human's moves
        #[arg(long)]
        human_seed: Option<u64>,
    },
}

/// Options shared by every command
#[derive(Args, Debug)]
pub struct GameArgs {
    /// Path to a TOML game config
    #[arg(short, long)]
    pub config: Option<std::path::PathBuf>,

    /// Override the number of rounds
    #[arg(short, long)]
    pub rounds: Option<usize>,

    /// Override the computer's random seed
    #[arg(long)]
    pub seed: Option<u64>,

    /// Override the human's token (requires --computer-token)
    #[arg(long, requires = "computer_token")]
    pub human_token: Option<String>,

    /// Override the computer's token (requires --human-token)
    #[arg(long, requires = "human_token")]
    pub computer_token: Option<String>,
}
