//! `jagent config` — show and set launcher settings.

use std::process::ExitCode;

use anyhow::Result;
use clap::Subcommand;

use crate::app::AppContext;
use crate::domain::config::{validate_config_key, validate_config_value};

/// Config subcommands.
#[derive(Subcommand)]
pub enum ConfigCommand {
    /// Show current settings
    Show,
    /// Set a settings value
    Set {
        /// Settings key
        key: String,
        /// Settings value
        value: String,
    },
}

/// Run the config command.
///
/// # Errors
///
/// Returns an error on unknown keys, invalid values, or store I/O failures.
pub fn run(app: &AppContext, cmd: &ConfigCommand) -> Result<ExitCode> {
    match cmd {
        ConfigCommand::Show => show(app),
        ConfigCommand::Set { key, value } => set(app, key, value),
    }
}

fn show(app: &AppContext) -> Result<ExitCode> {
    let config = app.config_store.load()?;
    let path = app.config_store.path();

    println!();
    app.output
        .header(&format!("Settings ({})", path.display()));
    println!();
    println!("  {:<20} {}", "java.bin:", config.java.bin);
    println!("  {:<20} {}", "service.path-env:", config.service.path_env);
    println!();
    app.output.header("Environment:");
    for var in ["JAGENT_HOME", "JAGENT_CONFIG", "NO_COLOR"] {
        println!(
            "    {:<16} {}",
            format!("{var}:"),
            std::env::var(var).unwrap_or_else(|_| "(not set)".to_string())
        );
    }
    println!();
    Ok(ExitCode::SUCCESS)
}

fn set(app: &AppContext, key: &str, value: &str) -> Result<ExitCode> {
    validate_config_key(key)?;
    validate_config_value(key, value)?;

    let mut config = app.config_store.load()?;
    match key {
        "java.bin" => config.java.bin = value.to_string(),
        "service.path-env" => config.service.path_env = value.to_string(),
        _ => anyhow::bail!("Unknown setting: {key}"),
    }
    app.config_store.save(&config)?;

    app.output.success(&format!("Set {key} = {value}"));
    if key == "service.path-env" {
        app.output
            .info("Re-run 'jagent service install' to apply it to the service.");
    }
    Ok(ExitCode::SUCCESS)
}
