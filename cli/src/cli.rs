//! CLI argument parsing with clap derive

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

use crate::app::{AppContext, AppFlags};
use crate::commands;
use crate::infra::config::CONFIG_ENV;

/// Fetch, unpack and launch the Night's Watch Ranger agent
#[derive(Parser)]
#[command(name = "ranger-bootstrap", version, propagate_version = true)]
pub struct Cli {
    /// Output in JSON format
    #[arg(long, global = true)]
    pub json: bool,

    /// Suppress non-error output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(
        long,
        global = true,
        env = "NO_COLOR",
        value_parser = clap::builder::FalseyValueParser::new()
    )]
    pub no_color: bool,

    /// Config file (YAML)
    #[arg(long, global = true, env = CONFIG_ENV, value_name = "PATH")]
    pub config: Option<PathBuf>,

    #[command(flatten)]
    pub sources: commands::SourceArgs,

    // `provision` when omitted, so user-data can run the bare binary.
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Download both packages, unpack them, and replace this process with Ranger
    Provision,

    /// Download and unpack both packages without launching Ranger
    Install,

    /// Inspect configuration
    #[command(subcommand)]
    Config(commands::config::ConfigCommand),

    /// Show version
    Version,
}

impl Cli {
    /// Execute the CLI command.
    ///
    /// # Errors
    ///
    /// Returns an error if the command fails. `provision` only returns on
    /// failure.
    pub fn run(self) -> Result<()> {
        let Cli {
            json,
            quiet,
            no_color,
            config,
            sources,
            command,
        } = self;
        let app = AppContext::new(AppFlags {
            no_color,
            quiet,
            json,
            config,
            sources: sources.into_overrides(),
        });

        match command.unwrap_or(Command::Provision) {
            Command::Provision => commands::provision::run(&app),
            Command::Install => commands::install::run(&app),
            Command::Config(cmd) => commands::config::run(&app, &cmd),
            Command::Version => {
                commands::version::run(app.is_json());
                Ok(())
            }
        }
    }
}
