//! Command-line interface definitions and parsing
//!
//! # Commands
//!
//! - **replay**: run a JSON event script through a search session
//! - **config**: show the effective configuration or its file location
//!
//! # Examples
//!
//! ```bash
//! spotsearch replay session.json
//! spotsearch replay session.json --mode users --config ./spotsearch.toml
//! spotsearch config show
//! spotsearch -q config path
//! ```

use crate::models::SearchMode;
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Search tab, as accepted on the command line
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModeArg {
    Spots,
    Users,
}

impl From<ModeArg> for SearchMode {
    fn from(arg: ModeArg) -> Self {
        match arg {
            ModeArg::Spots => Self::Spots,
            ModeArg::Users => Self::Users,
        }
    }
}

/// Main CLI structure for parsing command-line arguments
#[derive(Parser, Debug)]
#[command(name = "spotsearch")]
#[command(about = "Search overlay core: debounced dispatch and optimistic follows", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Suppress per-step output (only print the summary)
    #[arg(short = 'q', long = "quiet", global = true)]
    pub quiet: bool,

    /// Read configuration from this TOML file instead of the default location
    #[arg(long = "config", value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,
}

/// Available CLI commands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Replay a scripted timeline through a session
    #[command(visible_alias = "r")]
    Replay {
        /// JSON script to replay
        #[arg(value_name = "SCRIPT")]
        script: PathBuf,

        /// Open the overlay on this tab (overrides script and config)
        #[arg(short = 'm', long = "mode", value_enum)]
        mode: Option<ModeArg>,
    },

    /// Inspect configuration
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

#[derive(Subcommand, Debug, Clone, Copy)]
pub enum ConfigCommands {
    /// Print the effective configuration as TOML
    Show,
    /// Print the default configuration file location
    Path,
}

impl Cli {
    /// Parse command-line arguments
    #[must_use]
    pub fn parse_args() -> Self {
        Self::parse()
    }
}
