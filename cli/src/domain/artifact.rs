//! Agent artifact domain types and pure helpers.
//!
//! This module is intentionally free of I/O; download and file layout live
//! in `infra` and the `install` command.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Path of the agent jar on a Jenkins controller, relative to its base URL.
const CONTROLLER_JAR_PATH: &str = "jnlpJars/agent.jar";

/// Install record persisted to `~/.jagent/state.json`.
///
/// Secrets never appear here; the record only describes the jar.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InstallState {
    /// When the jar was installed.
    pub installed_at: DateTime<Utc>,
    /// SHA-256 hex digest of the installed jar.
    pub jar_sha256: String,
    /// URL the jar was downloaded from.
    pub source_url: String,
}

/// Derive the agent jar URL from a controller base URL.
///
/// Trailing slashes on the base are tolerated.
#[must_use]
pub fn jar_url_for_controller(base: &str) -> String {
    format!("{}/{CONTROLLER_JAR_PATH}", base.trim_end_matches('/'))
}

/// Encode bytes as lowercase hex string.
#[must_use]
pub fn hex_encode(bytes: &[u8]) -> String {
    const HEX: &[u8; 16] = b"0123456789abcdef";
    let mut out = String::with_capacity(bytes.len() * 2);
    for &b in bytes {
        out.push(char::from(HEX[(b >> 4) as usize]));
        out.push(char::from(HEX[(b & 0xf) as usize]));
    }
    out
}

/// First 12 hex characters of a digest, for display.
#[must_use]
pub fn short_digest(hex: &str) -> &str {
    hex.get(..12).unwrap_or(hex)
}

// ── Unit tests ───────────────────────────────────────────────────────────────

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_jar_url_for_controller_appends_jnlp_jars_path() {
        assert_eq!(
            jar_url_for_controller("https://my-jenkins.example"),
            "https://my-jenkins.example/jnlpJars/agent.jar"
        );
    }

    #[test]
    fn test_jar_url_for_controller_tolerates_trailing_slash() {
        assert_eq!(
            jar_url_for_controller("https://my-jenkins.example/"),
            "https://my-jenkins.example/jnlpJars/agent.jar"
        );
    }

    #[test]
    fn test_hex_encode_empty_returns_empty() {
        assert_eq!(hex_encode(&[]), "");
    }

    #[test]
    fn test_hex_encode_single_byte() {
        assert_eq!(hex_encode(&[0x00]), "00");
        assert_eq!(hex_encode(&[0xff]), "ff");
        assert_eq!(hex_encode(&[0xab]), "ab");
    }

    #[test]
    fn test_hex_encode_multiple_bytes() {
        assert_eq!(hex_encode(&[0xde, 0xad, 0xbe, 0xef]), "deadbeef");
    }

    #[test]
    fn test_short_digest_truncates_long_digest() {
        let digest = "2066d2c91d2be5dbe5a191b0d48cbb04";
        assert_eq!(short_digest(digest), "2066d2c91d2b");
    }

    #[test]
    fn test_short_digest_keeps_short_input() {
        assert_eq!(short_digest("abc"), "abc");
    }

    #[test]
    fn test_install_state_json_roundtrip() {
        let state = InstallState {
            installed_at: Utc::now(),
            jar_sha256: "deadbeef".to_string(),
            source_url: "https://h/jnlpJars/agent.jar".to_string(),
        };
        let json = serde_json::to_string(&state).expect("serialize");
        let back: InstallState = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(back.jar_sha256, "deadbeef");
        assert_eq!(back.source_url, "https://h/jnlpJars/agent.jar");
    }
}
