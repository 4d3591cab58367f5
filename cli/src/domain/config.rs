//! Domain types and validators for launcher settings.
//!
//! Pure functions only — no I/O, no filesystem access.

use serde::{Deserialize, Serialize};

use crate::domain::error::ConfigError;

// ── Constants ────────────────────────────────────────────────────────────────

pub const VALID_CONFIG_KEYS: &[&str] = &["java.bin", "service.path-env"];

/// Default `PATH` exported to the service environment.
pub const DEFAULT_PATH_ENV: &str = "/usr/bin:/bin:/usr/sbin:/sbin";

// ── Settings schema ──────────────────────────────────────────────────────────

/// Top-level settings stored in `~/.jagent/config.yaml`.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct JagentConfig {
    /// Java launcher settings.
    #[serde(default)]
    pub java: JavaConfig,
    /// Service environment settings.
    #[serde(default)]
    pub service: ServiceConfig,
}

/// Java launcher settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JavaConfig {
    /// Java executable used by `jagent run`. Defaults to `java` on `PATH`.
    #[serde(default = "default_java_bin")]
    pub bin: String,
}

impl Default for JavaConfig {
    fn default() -> Self {
        Self {
            bin: default_java_bin(),
        }
    }
}

/// Service environment settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceConfig {
    /// `PATH` exported to the agent process by the service definition.
    #[serde(default = "default_path_env", rename = "path-env")]
    pub path_env: String,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            path_env: default_path_env(),
        }
    }
}

fn default_java_bin() -> String {
    "java".to_string()
}

fn default_path_env() -> String {
    DEFAULT_PATH_ENV.to_string()
}

// ── Validators ───────────────────────────────────────────────────────────────

/// Validates a settings key against the whitelist.
///
/// # Errors
///
/// Returns an error if the key is not in the allowed list.
pub fn validate_config_key(key: &str) -> Result<(), ConfigError> {
    if !VALID_CONFIG_KEYS.contains(&key) {
        return Err(ConfigError::UnknownKey {
            key: key.to_string(),
            valid: VALID_CONFIG_KEYS.join(", "),
        });
    }
    Ok(())
}

/// Validates a settings value for the given key.
///
/// # Errors
///
/// Returns an error if the value is empty or spans multiple lines.
pub fn validate_config_value(key: &str, value: &str) -> Result<(), ConfigError> {
    if value.is_empty() {
        return Err(ConfigError::InvalidValue {
            key: key.to_string(),
            value: value.to_string(),
            reason: "value must not be empty".to_string(),
        });
    }
    if value.contains('\n') {
        return Err(ConfigError::InvalidValue {
            key: key.to_string(),
            value: value.to_string(),
            reason: "value must be a single line".to_string(),
        });
    }
    Ok(())
}

// ── Unit tests ───────────────────────────────────────────────────────────────

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used)]
mod tests {
    use super::*;

    // ── JagentConfig serde ───────────────────────────────────────────────────

    #[test]
    fn test_config_defaults() {
        let cfg = JagentConfig::default();
        assert_eq!(cfg.java.bin, "java");
        assert_eq!(cfg.service.path_env, DEFAULT_PATH_ENV);
    }

    #[test]
    fn test_config_deserialize_full_yaml() {
        let yaml = "java:\n  bin: /opt/java/bin/java\nservice:\n  path-env: /usr/local/bin:/usr/bin\n";
        let cfg: JagentConfig = serde_yaml::from_str(yaml).expect("valid yaml");
        assert_eq!(cfg.java.bin, "/opt/java/bin/java");
        assert_eq!(cfg.service.path_env, "/usr/local/bin:/usr/bin");
    }

    #[test]
    fn test_config_deserialize_empty_yaml_uses_defaults() {
        let cfg: JagentConfig = serde_yaml::from_str("{}").expect("empty yaml");
        assert_eq!(cfg.java.bin, "java");
        assert_eq!(cfg.service.path_env, DEFAULT_PATH_ENV);
    }

    #[test]
    fn test_config_deserialize_partial_yaml_fills_missing_section() {
        let yaml = "java:\n  bin: java17\n";
        let cfg: JagentConfig = serde_yaml::from_str(yaml).expect("valid yaml");
        assert_eq!(cfg.java.bin, "java17");
        assert_eq!(cfg.service.path_env, DEFAULT_PATH_ENV);
    }

    #[test]
    fn test_config_serialize_deserialize_roundtrip() {
        let mut cfg = JagentConfig::default();
        cfg.service.path_env = "/usr/local/bin:/usr/bin:/bin".to_string();

        let yaml = serde_yaml::to_string(&cfg).expect("serialize");
        let back: JagentConfig = serde_yaml::from_str(&yaml).expect("deserialize");

        assert_eq!(back.service.path_env, "/usr/local/bin:/usr/bin:/bin");
    }

    // ── validate_config_key ──────────────────────────────────────────────────

    #[test]
    fn test_validate_config_key_java_bin_ok() {
        assert!(validate_config_key("java.bin").is_ok());
    }

    #[test]
    fn test_validate_config_key_path_env_ok() {
        assert!(validate_config_key("service.path-env").is_ok());
    }

    #[test]
    fn test_validate_config_key_unknown_returns_error() {
        let err = validate_config_key("unknown.key").unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("Unknown setting"), "got: {msg}");
    }

    #[test]
    fn test_validate_config_key_error_lists_valid_keys() {
        let err = validate_config_key("bad").unwrap_err().to_string();
        assert!(err.contains("java.bin"), "got: {err}");
        assert!(err.contains("service.path-env"), "got: {err}");
    }

    // ── validate_config_value ────────────────────────────────────────────────

    #[test]
    fn test_validate_config_value_ordinary_path_ok() {
        assert!(validate_config_value("service.path-env", "/usr/bin:/bin").is_ok());
    }

    #[test]
    fn test_validate_config_value_empty_rejected() {
        let err = validate_config_value("java.bin", "").unwrap_err().to_string();
        assert!(err.contains("empty"), "got: {err}");
    }

    #[test]
    fn test_validate_config_value_multiline_rejected() {
        assert!(validate_config_value("java.bin", "java\n-evil").is_err());
    }
}
