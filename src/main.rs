mod adapters;
mod cli;
mod config;
mod core;

use std::process::ExitCode;

use clap::Parser;
use clap::error::ErrorKind;
use log::LevelFilter;

use cli::Cli;

fn main() -> ExitCode {
    let args = match Cli::try_parse() {
        Ok(args) => args,
        Err(e) if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            let _ = e.print();
            return ExitCode::SUCCESS;
        }
        Err(e) => {
            let reason = e.kind().as_str().unwrap_or("invalid arguments");
            cli::output::error(&format!("error: {reason}"));
            cli::output::usage();
            return ExitCode::FAILURE;
        }
    };

    init_logging(args.verbose, args.quiet);
    if !args.operands.is_empty() {
        log::debug!("ignoring operands {:?}", args.operands);
    }

    let Some(env) = args.env_name() else {
        cli::output::usage();
        return ExitCode::FAILURE;
    };

    if let Err(e) = cli::commands::materialize::execute(env, &args) {
        cli::output::error(&format!("Error: {e}"));
        return ExitCode::FAILURE;
    }

    ExitCode::SUCCESS
}

/// Diagnostics go to stderr; the level comes from flags only.
fn init_logging(verbose: bool, quiet: bool) {
    let level = if quiet {
        LevelFilter::Off
    } else if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Warn
    };

    env_logger::Builder::new()
        .filter_level(level)
        .format_timestamp(None)
        .format_target(false)
        .init();
}
