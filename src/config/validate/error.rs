//! Validation error types
//!
//! Defines the validation error variants for drift run specs.

/// Validation error type
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ValidationError {
    #[error("No data path given (use --data or `data:` in the run spec)")]
    MissingDataPath,

    #[error("No features to monitor (use --features or `features:` in the run spec)")]
    NoFeatures,

    #[error("Datetime column name cannot be empty")]
    EmptyDatetimeColumn,

    #[error("Invalid p-value: {0} (must be > 0.0 and <= 1.0)")]
    InvalidPValue(f64),

    #[error("Invalid {field}: '{value}' (must be YYYY-MM-DD)")]
    InvalidDate { field: String, value: String },

    #[error("Feature '{0}' is listed more than once")]
    DuplicateFeature(String),

    #[error("Feature '{0}' is the datetime or group column")]
    FeatureIsKeyColumn(String),

    #[error("No schema rules to check (add a `schema:` section to the run spec)")]
    NoSchemaRules,

    #[error("Feature '{0}' has no rule in the `schema:` section")]
    MissingSchemaRule(String),

    #[error("Schema rule for '{feature}' has min {min} above max {max}")]
    InvalidRuleRange { feature: String, min: f64, max: f64 },
}
