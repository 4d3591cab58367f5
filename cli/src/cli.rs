//! CLI argument parsing with clap derive.

use std::process::ExitCode;

use anyhow::Result;
use clap::{Parser, Subcommand};

use crate::app::{AppContext, AppFlags};
use crate::commands;
use crate::infra::runner::StdCommandRunner;

/// Manage a Jenkins remoting agent on this machine
#[derive(Parser)]
#[command(
    name = "jagent",
    version,
    propagate_version = true,
    subcommand_required = true,
    arg_required_else_help = true
)]
pub struct Cli {
    /// Output in JSON format
    #[arg(long, global = true)]
    pub json: bool,

    /// Suppress non-error output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true, env = "NO_COLOR")]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Download the remoting jar and lay out the installation
    Install(commands::install::InstallArgs),

    /// Write the active agent configuration (JNLP URL and secret)
    Configure(commands::configure::ConfigureArgs),

    /// Manage the background service definition
    #[command(subcommand)]
    Service(commands::service::ServiceCommand),

    /// Launch the agent in the foreground (what the service executes)
    Run,

    /// Show install, configuration, and service state
    Status,

    /// Tail the agent log files
    Logs(commands::logs::LogsArgs),

    /// Manage launcher settings
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
    /// Returns an error if the command fails.
    pub fn run(self) -> Result<ExitCode> {
        let Cli {
            json,
            quiet,
            no_color,
            command,
        } = self;

        if let Command::Version = command {
            commands::version::run(json);
            return Ok(ExitCode::SUCCESS);
        }

        let app = AppContext::new(&AppFlags { no_color, quiet })?;
        match command {
            Command::Install(args) => commands::install::run(&app, &args),
            Command::Configure(args) => commands::configure::run(&app, &args),
            Command::Service(cmd) => commands::service::run(&app, &cmd, &StdCommandRunner),
            Command::Run => commands::run::run(&app, &StdCommandRunner),
            Command::Status => commands::status::run(&app, json),
            Command::Logs(args) => commands::logs::run(&app, &args),
            Command::Config(cmd) => commands::config::run(&app, &cmd),
            Command::Version => unreachable!("handled above"),
        }
    }
}
