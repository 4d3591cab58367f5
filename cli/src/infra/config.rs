//! On-disk settings store.

use std::path::PathBuf;

use anyhow::{Context, Result};

use crate::domain::config::JagentConfig;

/// YAML settings store at `~/.jagent/config.yaml` (override: `$JAGENT_CONFIG`).
pub struct YamlConfigStore {
    default_path: PathBuf,
}

impl YamlConfigStore {
    #[must_use]
    pub fn new(default_path: PathBuf) -> Self {
        Self { default_path }
    }

    /// Load settings, falling back to defaults when the file is absent.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load(&self) -> Result<JagentConfig> {
        let path = self.path();
        if !path.exists() {
            return Ok(JagentConfig::default());
        }
        let content = std::fs::read_to_string(&path)
            .with_context(|| format!("cannot read {}", path.display()))?;
        serde_yaml::from_str(&content).with_context(|| format!("cannot parse {}", path.display()))
    }

    /// Persist settings with 0600 permissions.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or any write step fails.
    pub fn save(&self, config: &JagentConfig) -> Result<()> {
        let path = self.path();
        let content = serde_yaml::to_string(config).context("cannot serialize settings")?;
        crate::infra::fs::write_atomic(&path, content.as_bytes(), 0o600)
            .with_context(|| format!("cannot write {}", path.display()))
    }

    /// Effective settings file path.
    #[must_use]
    pub fn path(&self) -> PathBuf {
        if let Ok(val) = std::env::var("JAGENT_CONFIG") {
            return PathBuf::from(val);
        }
        self.default_path.clone()
    }
}
