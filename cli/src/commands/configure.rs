//! `jagent configure` — write the active agent configuration.
//!
//! Builds the two-field option record and serializes the 4-line argument
//! file in a single atomic write. The install-time template is never touched,
//! so a failed or partial invocation cannot corrupt it.

use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Args;

use crate::app::AppContext;
use crate::domain::options::{parse_option_value, AgentOptions};
use crate::infra::fs::write_atomic;

/// Arguments for the configure command.
#[derive(Args)]
pub struct ConfigureArgs {
    /// JNLP endpoint of the agent on the controller
    #[arg(
        short = 'u',
        long,
        value_name = "URL",
        allow_hyphen_values = true,
        value_parser = parse_option_value
    )]
    pub url: String,

    /// Secret authenticating the agent against the controller
    #[arg(
        short = 's',
        long,
        value_name = "SECRET",
        allow_hyphen_values = true,
        value_parser = parse_option_value
    )]
    pub secret: String,

    /// PATH exported to the service environment (stored in settings)
    #[arg(
        short = 'p',
        long,
        value_name = "PATH",
        allow_hyphen_values = true,
        value_parser = parse_option_value
    )]
    pub path: Option<String>,
}

/// Run `jagent configure`.
///
/// # Errors
///
/// Returns an error if the option file or the settings file cannot be
/// written.
pub fn run(app: &AppContext, args: &ConfigureArgs) -> Result<ExitCode> {
    // clap already validated the values; AgentOptions::new re-checks the
    // line-format invariants so non-CLI callers get the same guarantees.
    let options = AgentOptions::new(&args.url, &args.secret)?;

    let target = app.paths.active_options();
    write_atomic(&target, options.render().as_bytes(), 0o600)
        .with_context(|| format!("writing {}", target.display()))?;
    app.output
        .success(&format!("Wrote {}", target.display()));

    if let Some(path_env) = &args.path {
        let mut config = app.config_store.load()?;
        config.service.path_env = path_env.clone();
        app.config_store.save(&config)?;
        app.output
            .success(&format!("Set service.path-env = {path_env}"));
    }

    app.output.kv("Register service", "jagent service install");
    app.output.kv("Inspect", "jagent status");

    Ok(ExitCode::SUCCESS)
}
