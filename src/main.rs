//! paintstripper binary entry point.

use std::process::ExitCode;

use paintstripper::cli;
use paintstripper::config::Config;
use paintstripper::{app, logging};
use tracing::debug;

fn main() -> ExitCode {
    let args = match cli::parse_args() {
        Ok(args) => args,
        Err(e) => {
            eprintln!("Error: {}\n\n---\n", e);
            eprint!("{}", cli::help_text());
            return ExitCode::FAILURE;
        }
    };

    if args.help {
        cli::print_help();
        return ExitCode::SUCCESS;
    }

    if args.version {
        cli::print_version();
        return ExitCode::SUCCESS;
    }

    let config = match Config::load(&args) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    logging::init_with_filter(config.log_filter());
    debug!(?config, "configuration loaded");

    match app::run(&args, &config) {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            debug!(category = ?e.category(), "run failed");
            eprintln!("Error: {}", e);
            if e.shows_usage() {
                eprint!("\n---\n\n{}", cli::help_text());
            }
            ExitCode::FAILURE
        }
    }
}
