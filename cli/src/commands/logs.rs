//! `jagent logs` — tail the agent's stdout/stderr log files.

use std::io::Write as _;
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;

use anyhow::Result;
use clap::Args;

use crate::app::AppContext;
use crate::infra::fs::{file_len, read_appended, tail_lines};

const POLL_INTERVAL: Duration = Duration::from_millis(500);

/// Arguments for the logs command.
#[derive(Args)]
pub struct LogsArgs {
    /// Number of trailing lines to print per file
    #[arg(short = 'n', long, default_value_t = 50, value_name = "LINES")]
    pub lines: usize,

    /// Keep polling for appended output
    #[arg(long)]
    pub follow: bool,

    /// Only show the error log
    #[arg(long)]
    pub stderr: bool,
}

/// Run `jagent logs`.
///
/// Missing log files are reported but not fatal; the agent may simply not
/// have run yet.
///
/// # Errors
///
/// Returns an error if an existing log file cannot be read.
pub fn run(app: &AppContext, args: &LogsArgs) -> Result<ExitCode> {
    let files: Vec<PathBuf> = if args.stderr {
        vec![app.paths.stderr_log()]
    } else {
        vec![app.paths.stdout_log(), app.paths.stderr_log()]
    };

    for path in &files {
        if !path.exists() {
            app.output
                .warn(&format!("no log yet at {}", path.display()));
            continue;
        }
        app.output.header(&format!("{}:", path.display()));
        for line in tail_lines(path, args.lines)? {
            println!("{line}");
        }
    }

    if args.follow {
        follow(&files)?;
    }
    Ok(ExitCode::SUCCESS)
}

/// Poll the files and print whatever gets appended.
///
/// Runs until interrupted; files that appear later are picked up from their
/// beginning.
fn follow(files: &[PathBuf]) -> Result<()> {
    let mut offsets: Vec<u64> = files.iter().map(|p| file_len(p).unwrap_or(0)).collect();
    loop {
        for (offset, path) in offsets.iter_mut().zip(files) {
            if !path.exists() {
                continue;
            }
            let (delta, new_offset) = read_appended(path, *offset)?;
            *offset = new_offset;
            if !delta.is_empty() {
                let mut stdout = std::io::stdout();
                stdout.write_all(&delta)?;
                stdout.flush()?;
            }
        }
        std::thread::sleep(POLL_INTERVAL);
    }
}
