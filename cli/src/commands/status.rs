//! `jagent status` — report the install, configuration, service, and logs.
//!
//! The secret never appears in either output mode.

use std::process::ExitCode;

use anyhow::Result;
use serde::Serialize;

use crate::app::AppContext;
use crate::domain::artifact::short_digest;
use crate::domain::options::AgentOptions;
use crate::domain::service::ServiceKind;
use crate::infra::fs::file_len;

/// Machine-readable status report.
#[derive(Debug, Serialize)]
pub struct StatusReport {
    pub jar: JarStatus,
    pub configuration: ConfigurationStatus,
    pub service: ServiceStatus,
    pub logs: LogsStatus,
}

#[derive(Debug, Serialize)]
pub struct JarStatus {
    pub installed: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sha256: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub installed_at: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_url: Option<String>,
}

/// How far configuration has progressed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ConfigurationState {
    Missing,
    Placeholders,
    Configured,
}

#[derive(Debug, Serialize)]
pub struct ConfigurationStatus {
    pub state: ConfigurationState,
    /// JNLP URL; the secret is deliberately not reported.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ServiceStatus {
    pub registered: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub definition: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct LogsStatus {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stdout_bytes: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stderr_bytes: Option<u64>,
}

/// Run `jagent status`.
///
/// # Errors
///
/// Returns an error if stored state exists but cannot be read.
pub fn run(app: &AppContext, json: bool) -> Result<ExitCode> {
    let report = collect(app)?;
    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        render(app, &report);
    }
    Ok(ExitCode::SUCCESS)
}

fn collect(app: &AppContext) -> Result<StatusReport> {
    let installed = app.paths.agent_jar().exists();
    let state = app.state.load()?;
    let jar = JarStatus {
        installed,
        sha256: state.as_ref().map(|s| s.jar_sha256.clone()),
        installed_at: state.as_ref().map(|s| s.installed_at.to_rfc3339()),
        source_url: state.map(|s| s.source_url),
    };

    let configuration = configuration_status(app);

    let service = match ServiceKind::detect() {
        Ok(kind) => {
            let path = app.paths.service_dir().join(kind.file_name());
            ServiceStatus {
                registered: path.exists(),
                definition: path.exists().then(|| path.display().to_string()),
            }
        }
        Err(_) => ServiceStatus {
            registered: false,
            definition: None,
        },
    };

    let logs = LogsStatus {
        stdout_bytes: file_len(&app.paths.stdout_log()),
        stderr_bytes: file_len(&app.paths.stderr_log()),
    };

    Ok(StatusReport {
        jar,
        configuration,
        service,
        logs,
    })
}

fn configuration_status(app: &AppContext) -> ConfigurationStatus {
    let path = app.paths.active_options();
    let Ok(content) = std::fs::read_to_string(&path) else {
        return ConfigurationStatus {
            state: ConfigurationState::Missing,
            url: None,
        };
    };
    match AgentOptions::parse(&content) {
        Ok(options) if options.is_placeholder() => ConfigurationStatus {
            state: ConfigurationState::Placeholders,
            url: None,
        },
        Ok(options) => ConfigurationStatus {
            state: ConfigurationState::Configured,
            url: Some(options.jnlp_url),
        },
        Err(_) => ConfigurationStatus {
            state: ConfigurationState::Missing,
            url: None,
        },
    }
}

fn render(app: &AppContext, report: &StatusReport) {
    let ctx = &app.output;

    ctx.header("Agent:");
    if report.jar.installed {
        let digest = report
            .jar
            .sha256
            .as_deref()
            .map_or_else(|| "unknown digest".to_string(), |d| {
                format!("sha256 {}", short_digest(d))
            });
        ctx.success(&format!("jar installed ({digest})"));
        if let Some(at) = &report.jar.installed_at {
            ctx.kv("Installed", at);
        }
    } else {
        ctx.warn("jar not installed");
        ctx.kv("Install", "jagent install --controller <URL>");
    }

    ctx.header("Configuration:");
    match report.configuration.state {
        ConfigurationState::Configured => {
            ctx.success("configured (secret redacted)");
            if let Some(url) = &report.configuration.url {
                ctx.kv("JNLP URL", url);
            }
        }
        ConfigurationState::Placeholders => {
            ctx.warn("template placeholders still in place");
            ctx.kv("Configure", "jagent configure --url <URL> --secret <SECRET>");
        }
        ConfigurationState::Missing => {
            ctx.warn("no configuration written");
            ctx.kv("Configure", "jagent configure --url <URL> --secret <SECRET>");
        }
    }

    ctx.header("Service:");
    if report.service.registered {
        ctx.success("definition registered");
        if let Some(path) = &report.service.definition {
            ctx.kv("Definition", path);
        }
    } else {
        ctx.warn("not registered");
        ctx.kv("Register", "jagent service install");
    }

    ctx.header("Logs:");
    match (report.logs.stdout_bytes, report.logs.stderr_bytes) {
        (None, None) => ctx.info("no log files yet"),
        (out, err) => {
            if let Some(bytes) = out {
                ctx.kv("std_out.log", &format!("{bytes} bytes"));
            }
            if let Some(bytes) = err {
                ctx.kv("std_error.log", &format!("{bytes} bytes"));
            }
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
