//! Run configuration: command line, YAML run spec and validation.

pub mod cli;
mod features;
mod loader;
mod schema;
pub mod validate;

pub use cli::{
    apply_overrides, apply_source_overrides, apply_validate_overrides, parse_args, Cli, Command, DriftArgs, OutputFormat,
    SourceArgs, ValidateArgs, WindowsArgs,
};
pub use features::parse_feature_list;
pub use loader::load_spec;
pub use schema::DriftSpec;
pub use validate::{validate_schema_spec, validate_source, validate_spec, ValidationError};
