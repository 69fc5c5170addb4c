//! # Spar CLI
//!
//! Command-line front end for `spar_core`: list materials, analyse a single
//! metal/composite pairing, or sweep every pairing of a task variant stored
//! in a study file.
//!
//! ```text
//! spar init lab1.spar --group 402
//! spar compare --study lab1.spar --task 7 --group 402 --format csv --output lab1.csv
//! spar pair -m 1 -c 1 --moment 180 --height 220 --method joint
//! ```

mod cli;
mod commands;
mod error;
mod logging;
mod report;

use std::process::ExitCode;

use clap::Parser;

use crate::cli::{Cli, Commands};
use crate::error::Result;

fn main() -> ExitCode {
    let cli = Cli::parse();
    logging::setup_logging(cli.verbose, cli.quiet);

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("Command failed: {}", e);
            eprintln!("Error: {}", e);
            ExitCode::from(e.exit_code())
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    log::debug!("Parsed arguments: {:?}", cli);
    match cli.command {
        Commands::Materials(args) => commands::materials(args),
        Commands::Pair(args) => commands::pair(args),
        Commands::Compare(args) => commands::compare_task(args),
        Commands::Init(args) => commands::init(args),
    }
}
