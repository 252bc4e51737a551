//! Error types with actionable diagnostics.
//!
//! Only data-contract and configuration violations are errors. Conditions the
//! pipeline tolerates (an invalid date window for one group, an empty target
//! sample) are returned as outcome values instead.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for driftcheck operations.
pub type Result<T> = std::result::Result<T, DriftError>;

/// Errors that abort a drift run.
#[derive(Error, Debug)]
pub enum DriftError {
    /// Requested column is not present in the dataset.
    #[error("Column not found: '{column}'\n  → Available columns: {available}")]
    MissingColumn { column: String, available: String },

    /// A value in the datetime column could not be parsed.
    #[error("Malformed date in column '{column}' at row {row}: '{value}'\n  → Use YYYY-MM-DD or YYYY-MM-DD HH:MM:SS")]
    MalformedDate { column: String, row: usize, value: String },

    /// The datetime column has no parseable dates in the selected rows.
    #[error("No dates found in column '{column}'\n  → Check that the datetime column is populated")]
    NoDates { column: String },

    /// An explicit window boundary could not be parsed.
    #[error("Invalid boundary date '{value}' for {field}\n  → Use YYYY-MM-DD (e.g. 2018-01-01)")]
    InvalidBoundary { field: String, value: String },

    /// A row does not have the same width as the header.
    #[error("Row {row} has {actual} values, expected {expected}\n  → Every row must carry the full column set")]
    RaggedRow { row: usize, expected: usize, actual: usize },

    /// Feature names and p-values are not index-aligned.
    #[error("Feature count mismatch: {features} features but {p_values} p-values\n  → Ensure the test is run with all features")]
    FeatureCountMismatch { features: usize, p_values: usize },

    /// The baseline sample is empty after dropping rows with nulls.
    #[error("Empty baseline sample for {group}\n  → Widen the baseline window or check the features for nulls")]
    EmptyBaseline { group: String },

    /// The distribution test produced no usable p-values.
    #[error("{test} failed for feature '{feature}': {message}\n  → Check the feature for constant or non-comparable values")]
    StatisticalTest { test: String, feature: String, message: String },

    /// At least one (group, feature) failed schema validation.
    #[error("Input schema invalid for {} feature(s): {}\n  → See the schema validation report for each status", .failures.len(), .failures.join("; "))]
    SchemaInvalid { failures: Vec<String> },

    /// Configuration file not found at expected path.
    #[error("Configuration file not found: {path}\n  → Create a run spec or drop --config")]
    ConfigNotFound { path: PathBuf },

    /// Configuration file has invalid syntax.
    #[error("Invalid configuration syntax in {path}:\n  {message}\n  → Check YAML syntax at the indicated line")]
    ConfigParsing { path: PathBuf, message: String },

    /// Configuration value is invalid.
    #[error("Invalid configuration value for '{field}': {message}\n  → {suggestion}")]
    ConfigValue { field: String, message: String, suggestion: String },

    /// The run spec failed validation.
    #[error("Invalid run spec: {0}\n  → Fix the flag or the run spec entry")]
    InvalidSpec(#[from] crate::config::ValidationError),

    /// IO error with context.
    #[error("IO error: {context}\n  Cause: {source}")]
    Io {
        context: String,
        #[source]
        source: std::io::Error,
    },

    /// CSV reading or writing failed.
    #[error("CSV error: {context}\n  Cause: {source}")]
    Csv {
        context: String,
        #[source]
        source: csv::Error,
    },

    /// Serialization error.
    #[error("Serialization error: {message}")]
    Serialization { message: String },
}

impl DriftError {
    /// Create an IO error with context.
    pub fn io(context: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io { context: context.into(), source }
    }

    /// Create a CSV error with context.
    pub fn csv(context: impl Into<String>, source: csv::Error) -> Self {
        Self::Csv { context: context.into(), source }
    }

    /// Create a configuration value error.
    pub fn config_value(
        field: impl Into<String>,
        message: impl Into<String>,
        suggestion: impl Into<String>,
    ) -> Self {
        Self::ConfigValue {
            field: field.into(),
            message: message.into(),
            suggestion: suggestion.into(),
        }
    }

    /// Check if this error is caused by the input data or configuration.
    pub fn is_user_error(&self) -> bool {
        !matches!(self, Self::FeatureCountMismatch { .. } | Self::Serialization { .. })
    }

    /// Get the error code for structured output.
    pub fn code(&self) -> &'static str {
        match self {
            Self::MissingColumn { .. } => "E001",
            Self::MalformedDate { .. } => "E002",
            Self::NoDates { .. } => "E003",
            Self::InvalidBoundary { .. } => "E004",
            Self::RaggedRow { .. } => "E005",
            Self::FeatureCountMismatch { .. } => "E010",
            Self::EmptyBaseline { .. } => "E011",
            Self::StatisticalTest { .. } => "E012",
            Self::SchemaInvalid { .. } => "E013",
            Self::ConfigNotFound { .. } => "E020",
            Self::ConfigParsing { .. } => "E021",
            Self::ConfigValue { .. } => "E022",
            Self::InvalidSpec(_) => "E023",
            Self::Io { .. } => "E030",
            Self::Csv { .. } => "E031",
            Self::Serialization { .. } => "E032",
        }
    }
}
