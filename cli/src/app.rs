//! Application context — unified state passed to every command handler.

use anyhow::Result;

use crate::infra::config::YamlConfigStore;
use crate::infra::paths::InstallPaths;
use crate::infra::state::StateManager;
use crate::output::OutputContext;

/// Flags passed from the top-level CLI to `AppContext::new`.
pub struct AppFlags {
    /// Disable ANSI color output.
    pub no_color: bool,
    /// Suppress non-error output.
    pub quiet: bool,
}

/// Unified application context passed to every command handler.
///
/// Constructed once in `Cli::run()` and passed as `&AppContext`, replacing
/// per-command construction of loose output/path/store instances.
pub struct AppContext {
    /// Terminal output context (colors, quiet mode).
    pub output: OutputContext,
    /// Resolved installation layout.
    pub paths: InstallPaths,
    /// Settings store (`config.yaml`).
    pub config_store: YamlConfigStore,
    /// Install record store (`state.json`).
    pub state: StateManager,
    /// When `true`, skip interactive prompts and use defaults.
    ///
    /// Set by the `CI` or `JAGENT_YES` environment variables.
    pub non_interactive: bool,
}

impl AppContext {
    /// Construct an `AppContext` from top-level CLI flags.
    ///
    /// # Errors
    ///
    /// Returns an error if the installation layout cannot be resolved (home
    /// directory not found).
    pub fn new(flags: &AppFlags) -> Result<Self> {
        let non_interactive =
            std::env::var("CI").is_ok() || std::env::var("JAGENT_YES").is_ok();
        let paths = InstallPaths::resolve()?;
        let config_store = YamlConfigStore::new(paths.config_file());
        let state = StateManager::with_path(paths.state_file());

        Ok(Self {
            output: OutputContext::new(flags.no_color, flags.quiet),
            paths,
            config_store,
            state,
            non_interactive,
        })
    }

    /// Ask the user for confirmation.
    ///
    /// When `non_interactive` is `true` (CI or `JAGENT_YES` env), returns
    /// `default` immediately without prompting.
    ///
    /// # Errors
    ///
    /// Returns an error if the terminal prompt fails (e.g. no TTY available).
    pub fn confirm(&self, prompt: &str, default: bool) -> Result<bool> {
        if self.non_interactive {
            return Ok(default);
        }
        let confirmed = dialoguer::Confirm::new()
            .with_prompt(prompt)
            .default(default)
            .interact()?;
        Ok(confirmed)
    }
}
