//! YAML run spec.

use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;
use std::path::PathBuf;

use super::cli::OutputFormat;
use super::features::parse_feature_list;
use crate::data::dates::parse_boundary;
use crate::error::Result;
use crate::report::DEFAULT_P_VALUE;
use crate::schema::FeatureRule;
use crate::window::WindowBounds;

/// Deserialize features from either a YAML sequence or a comma separated string.
fn deserialize_features_lenient<'de, D>(deserializer: D) -> std::result::Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum ListOrString {
        List(Vec<String>),
        Str(String),
    }

    Ok(match ListOrString::deserialize(deserializer)? {
        ListOrString::List(items) => items.into_iter().map(|f| f.trim().to_string()).filter(|f| !f.is_empty()).collect(),
        ListOrString::Str(s) => parse_feature_list(&s),
    })
}

fn default_p_value() -> f64 {
    DEFAULT_P_VALUE
}

/// Complete drift run configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DriftSpec {
    /// Model ID, used in the default output file name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model_id: Option<u32>,

    /// CSV dataset path
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<PathBuf>,

    /// Features to monitor
    #[serde(default, deserialize_with = "deserialize_features_lenient")]
    pub features: Vec<String>,

    /// Column holding the datetime of each row
    #[serde(default)]
    pub datetime_col: String,

    /// Column to group by; empty for a single group
    #[serde(default)]
    pub group_col: String,

    /// Window boundaries (YYYY-MM-DD); unset or empty means "derive from data"
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub baseline_start: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub baseline_end: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_start: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_end: Option<String>,

    /// Significance threshold
    #[serde(default = "default_p_value")]
    pub p_value: f64,

    /// Report path
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output: Option<PathBuf>,

    /// Report format
    #[serde(default)]
    pub format: OutputFormat,

    /// Schema rules per feature, used by `driftcheck validate`
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub schema: BTreeMap<String, FeatureRule>,
}

impl Default for DriftSpec {
    fn default() -> Self {
        Self {
            model_id: None,
            data: None,
            features: Vec::new(),
            datetime_col: String::new(),
            group_col: String::new(),
            baseline_start: None,
            baseline_end: None,
            target_start: None,
            target_end: None,
            p_value: DEFAULT_P_VALUE,
            output: None,
            format: OutputFormat::default(),
            schema: BTreeMap::new(),
        }
    }
}

impl DriftSpec {
    /// Parse the explicit window boundaries; unset and empty ones stay `None`.
    pub fn bounds(&self) -> Result<WindowBounds> {
        let parse = |field: &str, raw: &Option<String>| -> Result<_> {
            match raw.as_deref().map(str::trim) {
                None | Some("") => Ok(None),
                Some(value) => parse_boundary(field, value).map(Some),
            }
        };
        Ok(WindowBounds {
            baseline_start: parse("baseline_start", &self.baseline_start)?,
            baseline_end: parse("baseline_end", &self.baseline_end)?,
            target_start: parse("target_start", &self.target_start)?,
            target_end: parse("target_end", &self.target_end)?,
        })
    }
}
