//! Service definition rendering for the host service manager.
//!
//! Pure functions only — templates in, rendered text out. Writing the file
//! and driving `launchctl`/`systemctl` happens in the command layer.

use crate::domain::error::ServiceError;

/// launchd job label / systemd unit basename.
pub const SERVICE_LABEL: &str = "io.jagent.agent";

const LAUNCHD_TEMPLATE: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<!DOCTYPE plist PUBLIC "-//Apple//DTD PLIST 1.0//EN" "http://www.apple.com/DTDs/PropertyList-1.0.dtd">
<plist version="1.0">
<dict>
    <key>Label</key>
    <string>{{LABEL}}</string>
    <key>ProgramArguments</key>
    <array>
        <string>{{EXEC_PATH}}</string>
        <string>run</string>
    </array>
    <key>KeepAlive</key>
    <true/>
    <key>RunAtLoad</key>
    <true/>
    <key>ProcessType</key>
    <string>Background</string>
    <key>StandardOutPath</key>
    <string>{{STDOUT_LOG}}</string>
    <key>StandardErrorPath</key>
    <string>{{STDERR_LOG}}</string>
    <key>EnvironmentVariables</key>
    <dict>
        <key>PATH</key>
        <string>{{PATH_ENV}}</string>
    </dict>
</dict>
</plist>
"#;

const SYSTEMD_TEMPLATE: &str = r#"[Unit]
Description=Jenkins remoting agent
After=network.target

[Service]
ExecStart={{EXEC_PATH}} run
Restart=on-failure
RestartSec=10
Environment=PATH={{PATH_ENV}}
StandardOutput=append:{{STDOUT_LOG}}
StandardError=append:{{STDERR_LOG}}

[Install]
WantedBy=default.target
"#;

/// Which host service manager the definition targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ServiceKind {
    /// macOS launchd user agent.
    Launchd,
    /// systemd user unit.
    Systemd,
}

impl ServiceKind {
    /// Detect the service manager for the current platform.
    ///
    /// # Errors
    ///
    /// Returns an error on platforms without launchd or systemd.
    pub fn detect() -> Result<Self, ServiceError> {
        match std::env::consts::OS {
            "macos" => Ok(Self::Launchd),
            "linux" => Ok(Self::Systemd),
            other => Err(ServiceError::UnsupportedPlatform(other.to_string())),
        }
    }

    /// File name of the installed definition.
    #[must_use]
    pub fn file_name(self) -> String {
        match self {
            Self::Launchd => format!("{SERVICE_LABEL}.plist"),
            Self::Systemd => format!("{SERVICE_LABEL}.service"),
        }
    }
}

/// The values substituted into the service template.
#[derive(Debug, Clone)]
pub struct ServiceDefinition {
    /// Absolute path of the `jagent` executable.
    pub exec_path: String,
    /// Stdout log file path.
    pub stdout_log: String,
    /// Stderr log file path.
    pub stderr_log: String,
    /// `PATH` exported to the agent process.
    pub path_env: String,
}

impl ServiceDefinition {
    /// Render the definition for the given service manager.
    #[must_use]
    pub fn render(&self, kind: ServiceKind) -> String {
        let template = match kind {
            ServiceKind::Launchd => LAUNCHD_TEMPLATE,
            ServiceKind::Systemd => SYSTEMD_TEMPLATE,
        };
        template
            .replace("{{LABEL}}", SERVICE_LABEL)
            .replace("{{EXEC_PATH}}", &self.exec_path)
            .replace("{{STDOUT_LOG}}", &self.stdout_log)
            .replace("{{STDERR_LOG}}", &self.stderr_log)
            .replace("{{PATH_ENV}}", &self.path_env)
    }
}

// ── Unit tests ───────────────────────────────────────────────────────────────
