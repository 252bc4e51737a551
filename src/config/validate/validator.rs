//! Run spec validation logic

use std::collections::HashSet;

use super::error::ValidationError;
use crate::config::schema::DriftSpec;
use crate::data::dates::parse_boundary;

/// Validate what every command needs: data path, datetime column and dates
pub fn validate_source(spec: &DriftSpec) -> Result<(), ValidationError> {
    if spec.data.is_none() {
        return Err(ValidationError::MissingDataPath);
    }

    if spec.datetime_col.trim().is_empty() {
        return Err(ValidationError::EmptyDatetimeColumn);
    }

    let dates = [
        ("baseline_start", &spec.baseline_start),
        ("baseline_end", &spec.baseline_end),
        ("target_start", &spec.target_start),
        ("target_end", &spec.target_end),
    ];
    for (field, value) in dates {
        if let Some(value) = value.as_deref().map(str::trim).filter(|v| !v.is_empty()) {
            if parse_boundary(field, value).is_err() {
                return Err(ValidationError::InvalidDate { field: field.to_string(), value: value.to_string() });
            }
        }
    }

    Ok(())
}

/// Validate a drift run spec
///
/// Checks:
/// - Data path and datetime column are set
/// - Explicit dates parse
/// - At least one feature, none repeated, none a key column
/// - p-value in (0, 1]
pub fn validate_spec(spec: &DriftSpec) -> Result<(), ValidationError> {
    validate_source(spec)?;

    if spec.features.is_empty() {
        return Err(ValidationError::NoFeatures);
    }

    let mut seen = HashSet::new();
    for feature in &spec.features {
        if !seen.insert(feature.as_str()) {
            return Err(ValidationError::DuplicateFeature(feature.clone()));
        }
        if *feature == spec.datetime_col || (!spec.group_col.is_empty() && *feature == spec.group_col) {
            return Err(ValidationError::FeatureIsKeyColumn(feature.clone()));
        }
    }

    if !(spec.p_value > 0.0 && spec.p_value <= 1.0) {
        return Err(ValidationError::InvalidPValue(spec.p_value));
    }

    Ok(())
}

/// Validate a run spec for the schema check
///
/// Checks:
/// - Data path is set
/// - At least one rule; every listed feature has one
/// - Numeric bounds are ordered
pub fn validate_schema_spec(spec: &DriftSpec) -> Result<(), ValidationError> {
    if spec.data.is_none() {
        return Err(ValidationError::MissingDataPath);
    }

    if spec.schema.is_empty() {
        return Err(ValidationError::NoSchemaRules);
    }

    if let Some(missing) = spec.features.iter().find(|f| !spec.schema.contains_key(*f)) {
        return Err(ValidationError::MissingSchemaRule(missing.clone()));
    }

    for (feature, rule) in &spec.schema {
        if let (Some(min), Some(max)) = rule.bounds() {
            if min > max {
                return Err(ValidationError::InvalidRuleRange { feature: feature.clone(), min, max });
            }
        }
    }

    Ok(())
}
