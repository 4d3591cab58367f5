//! `jagent service` — manage the host service definition.
//!
//! Renders the launchd plist / systemd user unit from the domain template,
//! writes it into the user service directory, and drives
//! `launchctl`/`systemctl --user` through the command-runner seam.

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Subcommand;

use crate::app::AppContext;
use crate::domain::error::ServiceError;
use crate::domain::service::{ServiceDefinition, ServiceKind, SERVICE_LABEL};
use crate::infra::fs::write_atomic;
use crate::infra::runner::{stderr_excerpt, CommandRunner};

/// Service subcommands.
#[derive(Subcommand)]
pub enum ServiceCommand {
    /// Write the service definition and load it
    Install,
    /// Unload the service and remove its definition
    Uninstall,
    /// Print the rendered service definition without writing
    Show,
    /// Start the registered service
    Start,
    /// Stop the registered service
    Stop,
}

/// Run the service command.
///
/// # Errors
///
/// Returns an error if rendering, writing, or the service manager call
/// fails.
pub fn run(app: &AppContext, cmd: &ServiceCommand, runner: &impl CommandRunner) -> Result<ExitCode> {
    match cmd {
        ServiceCommand::Install => install(app, runner),
        ServiceCommand::Uninstall => uninstall(app, runner),
        ServiceCommand::Show => show(app),
        ServiceCommand::Start => start(app, runner),
        ServiceCommand::Stop => stop(app, runner),
    }
}

fn definition(app: &AppContext) -> Result<(ServiceKind, String)> {
    let kind = ServiceKind::detect()?;
    let exec_path = std::env::current_exe().context("resolving the jagent executable path")?;
    let config = app.config_store.load()?;
    let rendered = ServiceDefinition {
        exec_path: exec_path.display().to_string(),
        stdout_log: app.paths.stdout_log().display().to_string(),
        stderr_log: app.paths.stderr_log().display().to_string(),
        path_env: config.service.path_env,
    }
    .render(kind);
    Ok((kind, rendered))
}

fn definition_path(app: &AppContext, kind: ServiceKind) -> PathBuf {
    app.paths.service_dir().join(kind.file_name())
}

fn install(app: &AppContext, runner: &impl CommandRunner) -> Result<ExitCode> {
    let (kind, rendered) = definition(app)?;
    let path = definition_path(app, kind);
    write_atomic(&path, rendered.as_bytes(), 0o644)
        .with_context(|| format!("writing {}", path.display()))?;
    app.output.success(&format!("Wrote {}", path.display()));

    let path_str = path.display().to_string();
    match kind {
        ServiceKind::Launchd => {
            manager_call(runner, "launchctl", &["load", "-w", &path_str])?;
        }
        ServiceKind::Systemd => {
            manager_call(runner, "systemctl", &["--user", "daemon-reload"])?;
            manager_call(
                runner,
                "systemctl",
                &["--user", "enable", &kind.file_name()],
            )?;
        }
    }

    app.output.success("Service registered");
    app.output.kv("Start", "jagent service start");
    Ok(ExitCode::SUCCESS)
}

fn uninstall(app: &AppContext, runner: &impl CommandRunner) -> Result<ExitCode> {
    let kind = ServiceKind::detect()?;
    let path = definition_path(app, kind);
    if !path.exists() {
        return Err(ServiceError::NotInstalled.into());
    }

    let confirmed = app.confirm("Unload and remove the service definition?", true)?;
    if !confirmed {
        app.output.info("Uninstall cancelled.");
        return Ok(ExitCode::SUCCESS);
    }

    let path_str = path.display().to_string();
    match kind {
        ServiceKind::Launchd => {
            manager_call(runner, "launchctl", &["unload", "-w", &path_str])?;
        }
        ServiceKind::Systemd => {
            manager_call(
                runner,
                "systemctl",
                &["--user", "disable", "--now", &kind.file_name()],
            )?;
        }
    }

    std::fs::remove_file(&path).with_context(|| format!("removing {}", path.display()))?;
    app.output.success("Service removed");
    Ok(ExitCode::SUCCESS)
}

fn show(app: &AppContext) -> Result<ExitCode> {
    let (_, rendered) = definition(app)?;
    print!("{rendered}");
    Ok(ExitCode::SUCCESS)
}

fn start(app: &AppContext, runner: &impl CommandRunner) -> Result<ExitCode> {
    let kind = ServiceKind::detect()?;
    if !definition_path(app, kind).exists() {
        return Err(ServiceError::NotInstalled.into());
    }
    match kind {
        ServiceKind::Launchd => {
            manager_call(runner, "launchctl", &["start", SERVICE_LABEL])?;
        }
        ServiceKind::Systemd => {
            manager_call(runner, "systemctl", &["--user", "start", &kind.file_name()])?;
        }
    }
    app.output.success("Service started");
    app.output.kv("Logs", "jagent logs --follow");
    Ok(ExitCode::SUCCESS)
}

fn stop(app: &AppContext, runner: &impl CommandRunner) -> Result<ExitCode> {
    let kind = ServiceKind::detect()?;
    if !definition_path(app, kind).exists() {
        return Err(ServiceError::NotInstalled.into());
    }
    match kind {
        ServiceKind::Launchd => {
            manager_call(runner, "launchctl", &["stop", SERVICE_LABEL])?;
        }
        ServiceKind::Systemd => {
            manager_call(runner, "systemctl", &["--user", "stop", &kind.file_name()])?;
        }
    }
    app.output.success("Service stopped");
    Ok(ExitCode::SUCCESS)
}

fn manager_call(runner: &impl CommandRunner, program: &str, args: &[&str]) -> Result<()> {
    let output = runner.run(program, args)?;
    anyhow::ensure!(
        output.status.success(),
        "{program} {} failed: {}",
        args.join(" "),
        stderr_excerpt(&output)
    );
    Ok(())
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::process::Output;

    use tempfile::TempDir;

    use crate::infra::config::YamlConfigStore;
    use crate::infra::paths::InstallPaths;
    use crate::infra::state::StateManager;
    use crate::output::OutputContext;

    /// Runner that records every invocation and always succeeds.
    struct RecordingRunner {
        calls: RefCell<Vec<String>>,
    }

    impl RecordingRunner {
        fn new() -> Self {
            Self {
                calls: RefCell::new(Vec::new()),
            }
        }

        fn calls(&self) -> Vec<String> {
            self.calls.borrow().clone()
        }
    }

    impl CommandRunner for RecordingRunner {
        fn run(&self, program: &str, args: &[&str]) -> Result<Output> {
            self.calls
                .borrow_mut()
                .push(format!("{program} {}", args.join(" ")));
            // A successful no-op; `true` exists everywhere the tests run.
            crate::infra::runner::StdCommandRunner.run("true", &[])
        }

        fn run_status(&self, _: &str, _: &[&str]) -> Result<std::process::ExitStatus> {
            anyhow::bail!("not expected in service tests")
        }
    }

    /// Runner whose every call fails with stderr text.
    struct FailingRunner;

    impl CommandRunner for FailingRunner {
        fn run(&self, _: &str, _: &[&str]) -> Result<Output> {
            crate::infra::runner::StdCommandRunner.run("sh", &["-c", "echo denied >&2; exit 1"])
        }

        fn run_status(&self, _: &str, _: &[&str]) -> Result<std::process::ExitStatus> {
            anyhow::bail!("not expected in service tests")
        }
    }

    fn test_app(dir: &TempDir) -> AppContext {
        let paths = InstallPaths::with_root(dir.path().to_path_buf());
        AppContext {
            output: OutputContext::new(true, true),
            config_store: YamlConfigStore::new(paths.config_file()),
            state: StateManager::with_path(paths.state_file()),
            paths,
            non_interactive: true,
        }
    }

    #[test]
    fn test_install_writes_definition_and_calls_manager() {
        let dir = TempDir::new().expect("tempdir");
        let app = test_app(&dir);
        let runner = RecordingRunner::new();

        run(&app, &ServiceCommand::Install, &runner).expect("install");

        let kind = ServiceKind::detect().expect("supported platform");
        let path = app.paths.service_dir().join(kind.file_name());
        let rendered = std::fs::read_to_string(&path).expect("definition written");
        assert!(!rendered.contains("{{"), "unsubstituted placeholder");
        assert!(!runner.calls().is_empty(), "service manager not invoked");
    }

    #[test]
    fn test_install_surfaces_manager_failure() {
        let dir = TempDir::new().expect("tempdir");
        let app = test_app(&dir);

        let err = run(&app, &ServiceCommand::Install, &FailingRunner)
            .expect_err("manager failure should propagate");
        assert!(err.to_string().contains("denied"), "got: {err}");
    }

    #[test]
    fn test_start_without_definition_reports_not_installed() {
        let dir = TempDir::new().expect("tempdir");
        let app = test_app(&dir);

        let err = run(&app, &ServiceCommand::Start, &RecordingRunner::new())
            .expect_err("start before install should fail");
        assert!(err.to_string().contains("service install"), "got: {err}");
    }

    #[test]
    fn test_uninstall_removes_definition() {
        let dir = TempDir::new().expect("tempdir");
        let app = test_app(&dir);
        let runner = RecordingRunner::new();

        run(&app, &ServiceCommand::Install, &runner).expect("install");
        run(&app, &ServiceCommand::Uninstall, &runner).expect("uninstall");

        let kind = ServiceKind::detect().expect("supported platform");
        assert!(!app.paths.service_dir().join(kind.file_name()).exists());
    }

    #[test]
    fn test_stop_after_install_targets_the_service() {
        let dir = TempDir::new().expect("tempdir");
        let app = test_app(&dir);
        let runner = RecordingRunner::new();

        run(&app, &ServiceCommand::Install, &runner).expect("install");
        run(&app, &ServiceCommand::Stop, &runner).expect("stop");

        let calls = runner.calls();
        assert!(
            calls.iter().any(|c| c.contains("io.jagent.agent")),
            "no call names the service: {calls:?}"
        );
    }
}
