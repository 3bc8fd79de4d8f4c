//! Terminal Reversi against the computer.

use std::io;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use rustversi::cli::Session;
use rustversi::config::{EngineConfig, Strategy};
use rustversi::types::Color;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum ColorArg {
    /// `O`, moves first
    White,
    /// `#`
    Black,
}

impl From<ColorArg> for Color {
    fn from(arg: ColorArg) -> Self {
        match arg {
            ColorArg::White => Color::White,
            ColorArg::Black => Color::Black,
        }
    }
}

#[derive(Debug, Parser)]
#[command(name = "rustversi", version, about = "Play Reversi against the computer")]
struct Cli {
    /// Play this color in the first game instead of being asked
    #[arg(long, value_enum)]
    color: Option<ColorArg>,

    /// How the computer picks its moves
    #[arg(long, value_enum, default_value_t = Strategy::Greedy)]
    strategy: Strategy,

    /// Seed for the computer's tie-breaks
    #[arg(long)]
    seed: Option<u64>,

    /// Log turn handling to stderr
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_filter = if cli.verbose { "rustversi=debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)),
        )
        .with_writer(io::stderr)
        .init();

    let config = EngineConfig {
        strategy: cli.strategy,
        seed: cli.seed,
    };
    info!(?config, "starting");

    let stdin = io::stdin();
    let mut session = Session::new(config.build(), stdin.lock(), io::stdout())
        .with_first_color(cli.color.map(Color::from));
    session.run().context("session ended")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn arguments_are_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn flags_parse() {
        let cli = Cli::parse_from([
            "rustversi",
            "--color",
            "black",
            "--strategy",
            "first-legal",
            "--seed",
            "7",
            "-v",
        ]);

        assert_eq!(cli.color.map(Color::from), Some(Color::Black));
        assert_eq!(cli.strategy, Strategy::FirstLegal);
        assert_eq!(cli.seed, Some(7));
        assert!(cli.verbose);
    }
}
