//! Command line interface.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// CLI arguments for Credential Gate
#[derive(Parser, Debug)]
#[command(name = "credential-gate")]
#[command(about = "Credential Gate - username/password check over HTTP or a terminal form")]
#[command(version)]
#[command(long_about = "
Credential Gate - username/password check over HTTP or a terminal form

Configuration priority (highest to lowest):
1. Command-line arguments
2. Environment variables (CREDGATE__SERVER__PORT, ...)
3. Configuration file given with --config
4. config/local.yaml, config/default.yaml
5. Built-in defaults
")]
pub struct CliArgs {
    /// Configuration file path
    #[arg(short, long, help = "Path to an extra configuration file")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Run the HTTP login endpoint (default)
    Serve {
        /// Port to bind to (overrides config file)
        #[arg(short, long)]
        port: Option<u16>,
    },
    /// Prompt for credentials on the terminal and check them once
    Form,
}

impl CliArgs {
    /// Selected command, falling back to `serve` with no overrides.
    pub fn command(&self) -> Command {
        self.command.clone().unwrap_or(Command::Serve { port: None })
    }
}
