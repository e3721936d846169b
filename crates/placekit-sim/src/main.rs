//! Replay a scripted placement session and print what ended up in the scene.
//!
//! Usage:
//!   placekit-sim run demos/scenarios/surface_drag.toml
//!   placekit-sim --verbose run session.toml --config placekit.toml
//!   placekit-sim config

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use placekit::EngineConfig;
use placekit_sim::{replay, Scenario};

#[derive(Parser, Debug)]
#[command(name = "placekit-sim", version, about = "Replay scripted placement sessions")]
struct Cli {
    /// Log engine decisions at debug level
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Engine config file (defaults to the platform config location)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Replay a scenario and print a JSON report
    Run {
        /// Scenario TOML file
        scenario: PathBuf,
        /// Compact single-line JSON
        #[arg(long)]
        compact: bool,
    },
    /// Print the effective engine configuration
    Config,
}

fn load_config(path: Option<&PathBuf>) -> Result<EngineConfig> {
    match path {
        Some(path) => EngineConfig::load(path)
            .with_context(|| format!("Failed to load config {}", path.display())),
        None => EngineConfig::load_or_default().context("Failed to load default config"),
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = load_config(cli.config.as_ref())?;

    match cli.command {
        Command::Run { scenario, compact } => {
            let scenario = Scenario::load(&scenario)?;
            let report = replay(&scenario, config);
            let json = if compact {
                serde_json::to_string(&report)?
            } else {
                serde_json::to_string_pretty(&report)?
            };
            println!("{}", json);
        }
        Command::Config => {
            print!("{}", toml::to_string_pretty(&config)?);
        }
    }

    Ok(())
}
