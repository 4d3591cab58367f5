//! `jagent run` — launch the agent process in the foreground.
//!
//! This is what the service definition executes: the java launcher with the
//! active configuration file as its sole `@file` argument. The child's exit
//! status is propagated.

use std::process::ExitCode;

use anyhow::{Context, Result};

use crate::app::AppContext;
use crate::domain::options::AgentOptions;
use crate::infra::runner::CommandRunner;

/// Run `jagent run`.
///
/// # Errors
///
/// Returns an error when the jar is missing, the configuration is absent or
/// still holds placeholders, or the launcher cannot be spawned.
pub fn run(app: &AppContext, runner: &impl CommandRunner) -> Result<ExitCode> {
    let jar = app.paths.remoting_jar();
    anyhow::ensure!(
        jar.exists(),
        "agent jar not found at {}. Run 'jagent install' first.",
        jar.display()
    );

    let cfg = app.paths.active_options();
    anyhow::ensure!(
        cfg.exists(),
        "no configuration at {}. Run 'jagent configure' first.",
        cfg.display()
    );
    let content = std::fs::read_to_string(&cfg)
        .with_context(|| format!("reading {}", cfg.display()))?;
    let options = AgentOptions::parse(&content)?;
    anyhow::ensure!(
        !options.is_placeholder(),
        "configuration at {} still holds placeholder values. Run 'jagent configure'.",
        cfg.display()
    );

    let config = app.config_store.load()?;
    let jar_arg = jar.display().to_string();
    let argfile = format!("@{}", cfg.display());
    let status = runner.run_status(&config.java.bin, &["-jar", &jar_arg, &argfile])?;

    if status.success() {
        Ok(ExitCode::SUCCESS)
    } else {
        let code = status
            .code()
            .and_then(|c| u8::try_from(c).ok())
            .unwrap_or(1);
        Ok(ExitCode::from(code))
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
