//! Fixed installation layout.
//!
//! Everything lives under `~/.jagent` (override: `$JAGENT_HOME`). When the
//! override is set, the service definition directory is redirected under the
//! same root so tests never touch the real user service directory.

use std::path::{Path, PathBuf};

use anyhow::Result;

/// Resolved installation paths.
#[derive(Debug, Clone)]
pub struct InstallPaths {
    root: PathBuf,
    service_dir: PathBuf,
}

impl InstallPaths {
    /// Resolve the layout from the environment.
    ///
    /// # Errors
    ///
    /// Returns an error if no override is set and the home directory cannot
    /// be determined.
    pub fn resolve() -> Result<Self> {
        if let Ok(val) = std::env::var("JAGENT_HOME") {
            return Ok(Self::with_root(PathBuf::from(val)));
        }
        let home =
            dirs::home_dir().ok_or_else(|| anyhow::anyhow!("cannot determine home directory"))?;
        let service_dir = if cfg!(target_os = "macos") {
            home.join("Library").join("LaunchAgents")
        } else {
            home.join(".config").join("systemd").join("user")
        };
        Ok(Self {
            root: home.join(".jagent"),
            service_dir,
        })
    }

    /// Layout rooted at an explicit directory (tests, `$JAGENT_HOME`).
    #[must_use]
    pub fn with_root(root: PathBuf) -> Self {
        let service_dir = root.join("service");
        Self { root, service_dir }
    }

    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Directory holding the installed jar.
    #[must_use]
    pub fn libexec_dir(&self) -> PathBuf {
        self.root.join("libexec")
    }

    /// The downloaded artifact.
    #[must_use]
    pub fn agent_jar(&self) -> PathBuf {
        self.libexec_dir().join("agent.jar")
    }

    /// Stable name the launcher uses; a symlink to `agent.jar`.
    #[must_use]
    pub fn remoting_jar(&self) -> PathBuf {
        self.libexec_dir().join("remoting.jar")
    }

    /// Template with placeholder values, written once at install time.
    #[must_use]
    pub fn options_template(&self) -> PathBuf {
        self.root.join("agent_options.cfg.template")
    }

    /// Active configuration file consumed by the agent as `@file`.
    #[must_use]
    pub fn active_options(&self) -> PathBuf {
        self.root.join("agent_options.cfg")
    }

    #[must_use]
    pub fn log_dir(&self) -> PathBuf {
        self.root.join("log")
    }

    #[must_use]
    pub fn stdout_log(&self) -> PathBuf {
        self.log_dir().join("std_out.log")
    }

    #[must_use]
    pub fn stderr_log(&self) -> PathBuf {
        self.log_dir().join("std_error.log")
    }

    /// Install record (`state.json`).
    #[must_use]
    pub fn state_file(&self) -> PathBuf {
        self.root.join("state.json")
    }

    /// Default settings file (`config.yaml`).
    #[must_use]
    pub fn config_file(&self) -> PathBuf {
        self.root.join("config.yaml")
    }

    /// Directory the service definition is installed into.
    #[must_use]
    pub fn service_dir(&self) -> &Path {
        &self.service_dir
    }
}
