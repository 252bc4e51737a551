//! Per-feature schema rules.
//!
//! Each rule inspects the distinct non-missing values of one feature within
//! one group and stops at the first value that breaks it.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

use crate::data::Value;

/// Result of checking one feature in one group.
///
/// Rendered as `valid`, `valid: warning <msg>` or `invalid: <msg>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SchemaStatus {
    Valid,
    Warning(String),
    Invalid(String),
}

impl SchemaStatus {
    /// Whether the values are usable at all (warnings included).
    pub fn is_valid(&self) -> bool {
        !matches!(self, SchemaStatus::Invalid(_))
    }

    /// Whether the status lets a run through the schema gate.
    ///
    /// Only a plain `valid` passes; a warning still fails the gate.
    pub fn passes_gate(&self) -> bool {
        matches!(self, SchemaStatus::Valid)
    }

    /// Parse a rendered status message.
    pub fn parse(message: &str) -> Self {
        let trimmed = message.trim();
        if trimmed.eq_ignore_ascii_case("valid") {
            return SchemaStatus::Valid;
        }
        if let Some(warning) = trimmed.strip_prefix("valid: warning ") {
            return SchemaStatus::Warning(warning.to_string());
        }
        match trimmed.strip_prefix("invalid: ") {
            Some(reason) => SchemaStatus::Invalid(reason.to_string()),
            None => SchemaStatus::Invalid(trimmed.to_string()),
        }
    }
}

impl fmt::Display for SchemaStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SchemaStatus::Valid => f.write_str("valid"),
            SchemaStatus::Warning(msg) => write!(f, "valid: warning {msg}"),
            SchemaStatus::Invalid(msg) => write!(f, "invalid: {msg}"),
        }
    }
}

impl Serialize for SchemaStatus {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for SchemaStatus {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let message = String::deserialize(deserializer)?;
        Ok(SchemaStatus::parse(&message))
    }
}

/// A check over the distinct values of one feature.
pub trait FeatureValidator {
    /// Check non-missing values, in order of first appearance.
    fn check(&self, values: &[&Value]) -> SchemaStatus;
}

/// Range violation message, if `x` falls outside `[min, max]`.
fn range_violation(x: f64, min: Option<f64>, max: Option<f64>) -> Option<String> {
    match (min, max) {
        (Some(lo), Some(hi)) if x < lo || x > hi => Some(format!("range value not in scale range ({lo}-{hi})")),
        (Some(lo), None) if x < lo && lo == 0.0 => Some("value must be non-negative".to_string()),
        (Some(lo), None) if x < lo => Some(format!("value below minimum {lo}")),
        (None, Some(hi)) if x > hi => Some(format!("value above maximum {hi}")),
        _ => None,
    }
}

/// Continuous numeric feature.
///
/// A group whose values are all whole numbers reads as an integer column and
/// gets a warning.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FloatRule {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max: Option<f64>,
}

impl FeatureValidator for FloatRule {
    fn check(&self, values: &[&Value]) -> SchemaStatus {
        let mut all_whole = !values.is_empty();
        for value in values {
            let Some(x) = value.as_number() else {
                return SchemaStatus::Invalid("value not a float".to_string());
            };
            if let Some(msg) = range_violation(x, self.min, self.max) {
                return SchemaStatus::Invalid(msg);
            }
            all_whole &= x.fract() == 0.0;
        }
        if all_whole {
            SchemaStatus::Warning("value is int but expected float".to_string())
        } else {
            SchemaStatus::Valid
        }
    }
}

/// Whole-number feature, such as a score on a fixed scale.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct IntegerRule {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max: Option<f64>,
}

impl FeatureValidator for IntegerRule {
    fn check(&self, values: &[&Value]) -> SchemaStatus {
        for value in values {
            let x = match value.as_number() {
                Some(x) if x.fract() == 0.0 => x,
                _ => return SchemaStatus::Invalid("values in range are not integers".to_string()),
            };
            if let Some(msg) = range_violation(x, self.min, self.max) {
                return SchemaStatus::Invalid(msg);
            }
        }
        SchemaStatus::Valid
    }
}

/// Text feature drawn from an optional closed vocabulary.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CategoryRule {
    /// Accepted values; empty accepts any text
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub allowed: Vec<String>,
}

impl FeatureValidator for CategoryRule {
    fn check(&self, values: &[&Value]) -> SchemaStatus {
        for value in values {
            let Some(text) = value.as_text() else {
                return SchemaStatus::Invalid("at least one value not a string".to_string());
            };
            if !self.allowed.is_empty() && !self.allowed.iter().any(|a| a == text) {
                return SchemaStatus::Invalid("at least one value not in list of acceptable values".to_string());
            }
        }
        SchemaStatus::Valid
    }
}

/// Schema rule for one feature, as written in the run spec.
///
/// ```yaml
/// schema:
///   avgHGB: { kind: float, min: 0 }
///   gcsTotalLast: { kind: integer, min: 3, max: 15 }
///   dxGroup: { kind: category, allowed: [ACS, CHF] }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum FeatureRule {
    Float(FloatRule),
    Integer(IntegerRule),
    Category(CategoryRule),
}

impl FeatureRule {
    /// Numeric bounds, if the rule has any.
    pub fn bounds(&self) -> (Option<f64>, Option<f64>) {
        match self {
            FeatureRule::Float(r) => (r.min, r.max),
            FeatureRule::Integer(r) => (r.min, r.max),
            FeatureRule::Category(_) => (None, None),
        }
    }
}

impl FeatureValidator for FeatureRule {
    fn check(&self, values: &[&Value]) -> SchemaStatus {
        match self {
            FeatureRule::Float(rule) => rule.check(values),
            FeatureRule::Integer(rule) => rule.check(values),
            FeatureRule::Category(rule) => rule.check(values),
        }
    }
}
