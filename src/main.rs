//! Driftcheck CLI
//!
//! Batch distribution drift between a baseline and a target date window,
//! per group.
//!
//! # Usage
//!
//! ```bash
//! # Drift report with default windows (target = last 90 days)
//! driftcheck drift -x data.csv -t dischargeDate -g hospitalID -f avgHGB,dxGroup -i 7
//!
//! # Explicit windows from a run spec, flags override
//! driftcheck drift --config drift.yaml --target-end 2017-10-21
//!
//! # Check which groups can use the windows
//! driftcheck windows -x data.csv -t dischargeDate -g hospitalID
//!
//! # Check input values against the run spec's schema rules
//! driftcheck validate --config drift.yaml -i 7
//! ```

use clap::Parser;
use driftcheck::cli::{run_command, Cli};
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
