//! Input schema validation.
//!
//! Each feature named in the run spec's `schema` section gets a rule (float,
//! integer or category). Rules run per group over distinct values, and the
//! results are written as a nested JSON document plus a flat CSV. Any status
//! other than a plain `valid` fails the run.

mod report;
mod rules;
mod validator;

pub use report::{default_schema_paths, SchemaCheck, SchemaReport, SCHEMA_CSV_HEADER};
pub use rules::{CategoryRule, FeatureRule, FeatureValidator, FloatRule, IntegerRule, SchemaStatus};
pub use validator::validate_schema;
