//! Agent option record and validators.
//!
//! Pure functions only — no I/O, no filesystem access. The on-disk format is
//! the 4-line argument file consumed by the remoting agent:
//!
//! ```text
//! -jnlpUrl
//! <url>
//! -secret
//! <secret>
//! ```
//!
//! Lines 1 and 3 are static literals; lines 2 and 4 carry the values. The
//! record is rendered in one pass — the template file is never rewritten as
//! scratch space, so a partial update cannot corrupt it.

use crate::domain::error::OptionsError;

/// Line 2 value written into the template at install time.
pub const URL_PLACEHOLDER: &str = "<jnlp url>";
/// Line 4 value written into the template at install time.
pub const SECRET_PLACEHOLDER: &str = "<secret key>";

const JNLP_URL_FLAG: &str = "-jnlpUrl";
const SECRET_FLAG: &str = "-secret";

/// The two fields the agent needs to reach its controller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AgentOptions {
    /// JNLP endpoint of the agent on the controller.
    pub jnlp_url: String,
    /// Shared token authenticating the agent to the controller.
    pub secret: String,
}

impl AgentOptions {
    /// Build a validated option record.
    ///
    /// # Errors
    ///
    /// Returns an error if either value is empty, starts with `-`, or
    /// contains a newline.
    pub fn new(jnlp_url: &str, secret: &str) -> Result<Self, OptionsError> {
        validate_option_value(jnlp_url)?;
        validate_option_value(secret)?;
        Ok(Self {
            jnlp_url: jnlp_url.to_string(),
            secret: secret.to_string(),
        })
    }

    /// The record written into the template at install time.
    #[must_use]
    pub fn placeholder() -> Self {
        Self {
            jnlp_url: URL_PLACEHOLDER.to_string(),
            secret: SECRET_PLACEHOLDER.to_string(),
        }
    }

    /// Render the 4-line argument file.
    #[must_use]
    pub fn render(&self) -> String {
        format!(
            "{JNLP_URL_FLAG}\n{url}\n{SECRET_FLAG}\n{secret}\n",
            url = self.jnlp_url,
            secret = self.secret,
        )
    }

    /// Parse an argument file back into a record.
    ///
    /// # Errors
    ///
    /// Returns an error unless the content has the fixed 4-line layout with
    /// the static literals on lines 1 and 3.
    pub fn parse(content: &str) -> Result<Self, OptionsError> {
        let lines: Vec<&str> = content.lines().collect();
        if lines.len() < 4 || lines[0] != JNLP_URL_FLAG || lines[2] != SECRET_FLAG {
            return Err(OptionsError::MalformedFile);
        }
        Ok(Self {
            jnlp_url: lines[1].to_string(),
            secret: lines[3].to_string(),
        })
    }

    /// `true` while the record still holds the install-time placeholders.
    #[must_use]
    pub fn is_placeholder(&self) -> bool {
        self.jnlp_url == URL_PLACEHOLDER || self.secret == SECRET_PLACEHOLDER
    }
}

/// Validate a single option value for the line-oriented file.
///
/// # Errors
///
/// Returns an error if the value is empty, starts with `-` (it would shadow
/// a flag), or contains a newline (it would break the 4-line layout).
pub fn validate_option_value(value: &str) -> Result<(), OptionsError> {
    if value.is_empty() {
        return Err(OptionsError::Empty);
    }
    if value.starts_with('-') {
        return Err(OptionsError::LooksLikeFlag(value.to_string()));
    }
    if value.contains('\n') || value.contains('\r') {
        return Err(OptionsError::ContainsNewline);
    }
    Ok(())
}

/// clap `value_parser` wrapper around [`validate_option_value`].
///
/// # Errors
///
/// Returns the validation message for clap to report (exit code 1).
pub fn parse_option_value(value: &str) -> Result<String, String> {
    validate_option_value(value).map_err(|e| e.to_string())?;
    Ok(value.to_string())
}

// ── Unit tests ───────────────────────────────────────────────────────────────
