//! Install-state store.
//!
//! Atomic write (temp file + rename) so a crash never leaves a truncated
//! record behind.

use std::path::PathBuf;

use anyhow::{Context, Result};

use crate::domain::artifact::InstallState;

/// JSON install record at `~/.jagent/state.json`.
pub struct StateManager {
    path: PathBuf,
}

impl StateManager {
    #[must_use]
    pub fn with_path(path: PathBuf) -> Self {
        Self { path }
    }

    /// Load the install record, `None` when never installed.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load(&self) -> Result<Option<InstallState>> {
        if !self.path.exists() {
            return Ok(None);
        }
        let content = std::fs::read_to_string(&self.path)
            .with_context(|| format!("reading state file {}", self.path.display()))?;
        let state: InstallState = serde_json::from_str(&content)
            .with_context(|| format!("parsing state file {}", self.path.display()))?;
        Ok(Some(state))
    }

    /// Persist the install record.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or any write step fails.
    pub fn save(&self, state: &InstallState) -> Result<()> {
        let content = serde_json::to_string_pretty(state).context("serializing state")?;
        crate::infra::fs::write_atomic(&self.path, content.as_bytes(), 0o600)
            .with_context(|| format!("writing state file {}", self.path.display()))
    }

    /// Remove the record.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be removed.
    pub fn clear(&self) -> Result<()> {
        if self.path.exists() {
            std::fs::remove_file(&self.path)
                .with_context(|| format!("removing state file {}", self.path.display()))?;
        }
        Ok(())
    }
}
