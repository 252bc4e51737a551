//! Run spec validation
//!
//! Validates drift run specs before any data is read.

mod error;
mod validator;


pub use error::ValidationError;
pub use validator::{validate_schema_spec, validate_source, validate_spec};
