//! Subprocess seam for the host service manager and the java launcher.
//!
//! The trait exists so command handlers can be exercised with canned results
//! instead of spawning `launchctl`/`systemctl`/`java` in tests. The tool is
//! synchronous end to end, so the production implementation is plain
//! `std::process`.

use std::process::{Command, ExitStatus, Output, Stdio};

use anyhow::{Context, Result};

/// Run external commands, capturing or inheriting stdio.
pub trait CommandRunner {
    /// Run a command to completion, capturing stdout/stderr.
    ///
    /// # Errors
    ///
    /// Returns an error if the process fails to spawn.
    fn run(&self, program: &str, args: &[&str]) -> Result<Output>;

    /// Run a command with inherited stdio (foreground pass-through).
    ///
    /// # Errors
    ///
    /// Returns an error if the process fails to spawn.
    fn run_status(&self, program: &str, args: &[&str]) -> Result<ExitStatus>;
}

/// Production runner using `std::process::Command`.
pub struct StdCommandRunner;

impl CommandRunner for StdCommandRunner {
    fn run(&self, program: &str, args: &[&str]) -> Result<Output> {
        Command::new(program)
            .args(args)
            .stdin(Stdio::null())
            .output()
            .with_context(|| format!("failed to run {program}"))
    }

    fn run_status(&self, program: &str, args: &[&str]) -> Result<ExitStatus> {
        Command::new(program)
            .args(args)
            .status()
            .with_context(|| format!("failed to run {program}"))
    }
}

/// Render a failed command's stderr for error messages.
#[must_use]
pub fn stderr_excerpt(output: &Output) -> String {
    let text = String::from_utf8_lossy(&output.stderr);
    let trimmed = text.trim();
    if trimmed.is_empty() {
        format!("exit status {}", output.status)
    } else {
        trimmed.to_string()
    }
}
