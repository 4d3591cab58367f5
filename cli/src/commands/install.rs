//! `jagent install` — download the remoting jar and lay out the install.
//!
//! Downloads from a controller (`<base>/jnlpJars/agent.jar`) or a direct
//! artifact URL, optionally verifies a SHA-256 digest, writes
//! `libexec/agent.jar` plus the `remoting.jar` symlink, seeds the option
//! template with placeholders, and records install state. Nothing is
//! installed when the checksum does not match.

use std::process::ExitCode;

use anyhow::{Context, Result};
use chrono::Utc;
use clap::Args;

use crate::app::AppContext;
use crate::domain::artifact::{jar_url_for_controller, short_digest, InstallState};
use crate::domain::options::AgentOptions;
use crate::infra::download;
use crate::infra::fs::write_atomic;
use crate::output::progress;

/// Arguments for the install command.
#[derive(Args)]
pub struct InstallArgs {
    /// Jenkins controller base URL; the jar is fetched from <URL>/jnlpJars/agent.jar
    #[arg(
        long,
        value_name = "URL",
        conflicts_with = "jar_url",
        required_unless_present = "jar_url"
    )]
    pub controller: Option<String>,

    /// Direct URL of a remoting jar artifact
    #[arg(long, value_name = "URL")]
    pub jar_url: Option<String>,

    /// Expected SHA-256 hex digest of the jar
    #[arg(long, value_name = "HEX")]
    pub sha256: Option<String>,

    /// Replace an existing jar without prompting
    #[arg(long)]
    pub force: bool,
}

/// Run `jagent install`.
///
/// # Errors
///
/// Returns an error if the download, checksum verification, or any layout
/// step fails.
pub fn run(app: &AppContext, args: &InstallArgs) -> Result<ExitCode> {
    let url = match (&args.controller, &args.jar_url) {
        (Some(base), None) => jar_url_for_controller(base),
        (None, Some(direct)) => direct.clone(),
        // clap enforces exactly one of the two.
        _ => anyhow::bail!("either --controller or --jar-url must be given"),
    };

    let jar = app.paths.agent_jar();
    if jar.exists() && !args.force {
        let replace = app.confirm(
            &format!("{} already exists. Replace it?", jar.display()),
            true,
        )?;
        if !replace {
            app.output.info("Install cancelled.");
            return Ok(ExitCode::SUCCESS);
        }
    }

    let downloaded = fetch_with_progress(app, &url)?;
    if let Some(expected) = &args.sha256 {
        download::verify_sha256(&downloaded.sha256, expected)
            .context("jar checksum verification failed")?;
        app.output
            .success(&format!("SHA-256 verified ({})", short_digest(&downloaded.sha256)));
    }

    write_atomic(&jar, &downloaded.bytes, 0o644)
        .with_context(|| format!("writing {}", jar.display()))?;
    refresh_launcher_link(app)?;

    std::fs::create_dir_all(app.paths.log_dir())
        .with_context(|| format!("creating {}", app.paths.log_dir().display()))?;

    let template = app.paths.options_template();
    if !template.exists() {
        write_atomic(&template, AgentOptions::placeholder().render().as_bytes(), 0o600)
            .with_context(|| format!("writing {}", template.display()))?;
    }

    app.state.save(&InstallState {
        installed_at: Utc::now(),
        jar_sha256: downloaded.sha256,
        source_url: url,
    })?;

    app.output
        .success(&format!("Installed {}", jar.display()));
    print_next_steps(app);
    Ok(ExitCode::SUCCESS)
}

fn fetch_with_progress(app: &AppContext, url: &str) -> Result<download::Download> {
    if !app.output.show_progress() {
        if !app.output.quiet {
            println!("Downloading {url}...");
        }
        return download::fetch(url, None);
    }

    let pb = match download::content_length(url) {
        Some(len) => progress::bar(len, &format!("Downloading {url}")),
        None => progress::spinner(&format!("Downloading {url}")),
    };
    match download::fetch(url, Some(&pb)) {
        Ok(downloaded) => {
            progress::finish_success(&pb, "Download complete");
            Ok(downloaded)
        }
        Err(e) => {
            progress::finish_error(&pb, "Download failed");
            Err(e)
        }
    }
}

/// Point `remoting.jar` at the freshly installed `agent.jar`.
fn refresh_launcher_link(app: &AppContext) -> Result<()> {
    let link = app.paths.remoting_jar();
    if link.symlink_metadata().is_ok() {
        std::fs::remove_file(&link)
            .with_context(|| format!("removing {}", link.display()))?;
    }
    #[cfg(unix)]
    std::os::unix::fs::symlink(app.paths.agent_jar(), &link)
        .with_context(|| format!("linking {}", link.display()))?;
    #[cfg(not(unix))]
    std::fs::copy(app.paths.agent_jar(), &link)
        .with_context(|| format!("copying to {}", link.display()))?;
    Ok(())
}

fn print_next_steps(app: &AppContext) {
    if app.output.quiet {
        return;
    }
    println!();
    app.output.header("Next steps:");
    app.output.kv(
        "1. Configure",
        "jagent configure --url https://<controller>/computer/<node>/slave-agent.jnlp --secret <token>",
    );
    app.output.kv("2. Register service", "jagent service install");
    app.output.kv("3. Start", "jagent service start");
    app.output.kv("4. Watch logs", "jagent logs --follow");
}
