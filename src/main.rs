//! Spotsearch CLI entry point
//!
//! Replays scripted overlay sessions and inspects configuration.
//!
//! # Usage
//!
//! ```bash
//! # Replay a timeline, printing every step
//! spotsearch replay session.json
//!
//! # Only the summary
//! spotsearch -q replay session.json
//!
//! # Show the effective configuration
//! spotsearch config show
//!
//! # Verbose session logs
//! RUST_LOG=spotsearch=debug spotsearch replay session.json
//! ```
//!
//! # Configuration
//!
//! Read from the user's config directory (`~/.config/spotsearch/config.toml`
//! on Linux) unless `--config` is given. A missing file means defaults.

use spotsearch::{
    SpotsearchError,
    cli::{Cli, Commands, ConfigCommands, ModeArg},
    config::SpotsearchConfig,
    replay::{self, ReplayScript},
};
use std::path::Path;
use tracing_subscriber::EnvFilter;

type Result<T> = std::result::Result<T, SpotsearchError>;

fn load_config(cli: &Cli) -> Result<SpotsearchConfig> {
    let config = match &cli.config {
        Some(path) => SpotsearchConfig::load_from(path)?,
        None => SpotsearchConfig::load()?,
    };
    Ok(config)
}

fn handle_replay(script: &Path, mode: Option<ModeArg>, quiet: bool, config: &SpotsearchConfig) -> Result<()> {
    let mut script = ReplayScript::load(script)?;
    if let Some(mode) = mode {
        script.initial_mode = Some(mode.into());
    }

    let report = replay::run(&script, config)?;
    if !quiet {
        for step in &report.steps {
            println!("{}", replay::render_step(step));
        }
        println!();
    }
    println!("{}", replay::render_summary(&report));
    Ok(())
}

fn handle_config_command(cli: &Cli, command: ConfigCommands, config: &SpotsearchConfig) -> Result<()> {
    match command {
        ConfigCommands::Show => print!("{}", config.to_toml()?),
        ConfigCommands::Path => {
            let path = match &cli.config {
                Some(path) => path.clone(),
                None => SpotsearchConfig::config_path()?,
            };
            println!("{}", path.display());
        }
    }
    Ok(())
}

fn main() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse_args();
    let config = load_config(&cli)?;

    match &cli.command {
        Commands::Replay { script, mode } => handle_replay(script, *mode, cli.quiet, &config),
        Commands::Config { command } => handle_config_command(&cli, *command, &config),
    }
}
