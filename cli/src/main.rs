//! jagent — install, configure and run a Jenkins remoting agent.

use std::process::ExitCode;

use clap::error::ErrorKind;
use clap::Parser;

use jagent_cli::cli::Cli;

fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => return parse_exit_code(&e),
    };
    match cli.run() {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

/// Exit-code contract: 0 help/version, 2 missing required argument,
/// 1 everything malformed (unknown flag, missing or invalid flag value).
fn parse_exit_code(err: &clap::Error) -> ExitCode {
    let _ = err.print();
    match err.kind() {
        ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => ExitCode::SUCCESS,
        ErrorKind::MissingRequiredArgument
        | ErrorKind::DisplayHelpOnMissingArgumentOrSubcommand => ExitCode::from(2),
        _ => ExitCode::FAILURE,
    }
}
