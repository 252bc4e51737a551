//! CLI argument parsing
//!
//! # Usage
//!
//! ```bash
//! driftcheck drift -i 1 -x data.csv -f dxGroup,avgHGB -t hospitalDischargeDate -g hospitalID
//! driftcheck drift --config run.yaml --p-value 0.01 --format json
//! driftcheck windows -x data.csv -t hospitalDischargeDate -g hospitalID
//! driftcheck validate --config run.yaml -i 1
//! ```

mod core;
mod types;

#[cfg(test)]
mod tests;

pub use self::core::{
    apply_overrides, apply_source_overrides, apply_validate_overrides, parse_args, Cli, Command, DriftArgs,
    SourceArgs, ValidateArgs, WindowsArgs,
};
pub use self::types::OutputFormat;
