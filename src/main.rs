//! aunet CLI
//!
//! Entry point for run-spec tooling.
//!
//! # Usage
//!
//! ```bash
//! # Validate a run spec
//! aunet validate run.yaml
//!
//! # Show spec details
//! aunet info run.yaml --format json
//!
//! # Inspect the latest checkpoint in a directory
//! aunet inspect ckpt/au12-fold0
//! ```

use aunet::cli::{run_command, Cli};
use clap::Parser;
use std::process::ExitCode;

fn main() -> ExitCode {
    let cli = Cli::parse();

    match run_command(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}
