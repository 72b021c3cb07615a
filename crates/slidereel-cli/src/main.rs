use std::fs::{self, OpenOptions};
use std::path::PathBuf;
use std::sync::Mutex;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use slidereel_core::AppConfig;

mod commands;

#[derive(Parser)]
#[command(name = "slidereel")]
#[command(author, version, about = "A carousel slide engine with a terminal presenter")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Override a setting, e.g. `--set replayStrategy=loop` (repeatable)
    #[arg(long = "set", value_name = "KEY=VALUE", global = true, value_parser = parse_override)]
    overrides: Vec<(String, String)>,
}

#[derive(Subcommand)]
enum Commands {
    /// Present a deck in the terminal
    Run {
        /// Deck file; slides are separated by `---` lines
        deck: Option<PathBuf>,
    },
    /// Drive the engine without a terminal and print every step
    Simulate(commands::simulate::SimulateArgs),
    /// Print the effective configuration
    Config {
        /// Also write it to the config file
        #[arg(long)]
        save: bool,
    },
}

fn parse_override(s: &str) -> Result<(String, String), String> {
    s.split_once('=')
        .map(|(key, value)| (key.trim().to_string(), value.to_string()))
        .filter(|(key, _)| !key.is_empty())
        .ok_or_else(|| format!("expected KEY=VALUE, got '{}'", s))
}

/// Log to stderr, or to a file while the terminal UI owns the screen
fn init_logging(config: &AppConfig, to_file: bool) -> Result<()> {
    let filter = tracing_subscriber::EnvFilter::new(
        std::env::var("RUST_LOG").unwrap_or_else(|_| config.general.log_level.clone()),
    );

    let (stderr_layer, file_layer) = if to_file {
        let dir = config.log_dir();
        fs::create_dir_all(&dir)
            .with_context(|| format!("Failed to create log directory {}", dir.display()))?;
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(dir.join("slidereel.log"))?;
        let layer = tracing_subscriber::fmt::layer()
            .with_writer(Mutex::new(file))
            .with_ansi(false)
            .with_target(false);
        (None, Some(layer))
    } else {
        let layer = tracing_subscriber::fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(false);
        (Some(layer), None)
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(stderr_layer)
        .with(file_layer)
        .init();

    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = AppConfig::load()?;
    for (key, value) in &cli.overrides {
        config.apply_override(key, value)?;
    }

    let runs_tui = matches!(cli.command, Some(Commands::Run { .. }) | None);
    init_logging(&config, runs_tui)?;

    match cli.command {
        Some(Commands::Run { deck }) => commands::run::run(config, deck).await,
        None => commands::run::run(config, None).await,
        Some(Commands::Simulate(args)) => commands::simulate::run(&args, config),
        Some(Commands::Config { save }) => commands::config::run(&config, save),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_override() {
        assert_eq!(
            parse_override("replayStrategy=loop"),
            Ok(("replayStrategy".to_string(), "loop".to_string()))
        );
        assert_eq!(
            parse_override("data-slidereel-swipe=true"),
            Ok(("data-slidereel-swipe".to_string(), "true".to_string()))
        );
        assert!(parse_override("swipe").is_err());
        assert!(parse_override("=true").is_err());
    }

    #[test]
    fn test_cli_definition() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn test_global_overrides() {
        let cli = Cli::try_parse_from([
            "slidereel",
            "simulate",
            "--set",
            "replayStrategy=loop",
            "--set",
            "rtl=true",
            "+1",
        ])
        .unwrap();

        assert_eq!(cli.overrides.len(), 2);
        assert!(matches!(cli.command, Some(Commands::Simulate(_))));
    }
}
