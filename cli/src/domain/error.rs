//! Typed domain error enums.
//!
//! This module has zero imports from `crate::infra`, `crate::commands`,
//! `std::fs`, `std::process`, or `std::net`. All error types implement
//! `thiserror::Error` and convert to `anyhow::Error` via the `?` operator.

use thiserror::Error;

// ── Agent option errors ───────────────────────────────────────────────────────

/// Errors related to the `-jnlpUrl`/`-secret` option values and file layout.
#[derive(Debug, Error)]
pub enum OptionsError {
    #[error("value must not be empty")]
    Empty,

    #[error("value '{0}' looks like a flag (starts with '-')")]
    LooksLikeFlag(String),

    #[error("value must not contain newlines (the option file is line-oriented)")]
    ContainsNewline,

    #[error("option file is not in the expected 4-line layout (-jnlpUrl / <url> / -secret / <secret>)")]
    MalformedFile,
}

// ── Settings errors ───────────────────────────────────────────────────────────

/// Errors related to settings key/value validation.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Unknown setting: {key}\n\nValid settings: {valid}")]
    UnknownKey { key: String, valid: String },

    #[error("Invalid value for {key}: {value}\n\n{reason}")]
    InvalidValue {
        key: String,
        value: String,
        reason: String,
    },
}

// ── Service errors ────────────────────────────────────────────────────────────

/// Errors related to the host service manager integration.
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("no supported service manager on this platform ({0}); expected macOS (launchd) or Linux (systemd)")]
    UnsupportedPlatform(String),

    #[error("service definition not installed. Run 'jagent service install' first.")]
    NotInstalled,
}
