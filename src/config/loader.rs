//! Run spec loading

use std::fs;
use std::path::Path;

use super::schema::DriftSpec;
use crate::error::{DriftError, Result};

/// Read and parse a YAML run spec. Validation is left to the caller, since
/// command-line overrides are applied first.
pub fn load_spec(path: impl AsRef<Path>) -> Result<DriftSpec> {
    let path = path.as_ref();
    if !path.exists() {
        return Err(DriftError::ConfigNotFound { path: path.to_path_buf() });
    }

    let yaml = fs::read_to_string(path).map_err(|e| DriftError::io(format!("reading {}", path.display()), e))?;

    serde_yaml::from_str(&yaml)
        .map_err(|e| DriftError::ConfigParsing { path: path.to_path_buf(), message: e.to_string() })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_load_spec_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "features: dxGroup,avgHGB\ndatetime_col: hospitalDischargeDate").unwrap();
        let spec = load_spec(file.path()).unwrap();
        assert_eq!(spec.features, vec!["dxGroup", "avgHGB"]);
    }

    #[test]
    fn test_missing_file() {
        let err = load_spec("/nonexistent/run.yaml").unwrap_err();
        assert!(matches!(err, DriftError::ConfigNotFound { .. }));
        assert_eq!(err.code(), "E020");
    }

    #[test]
    fn test_bad_yaml() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "features: [unclosed").unwrap();
        let err = load_spec(file.path()).unwrap_err();
        assert!(matches!(err, DriftError::ConfigParsing { .. }));
    }

    #[test]
    fn test_wrong_type() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "p_value: lots").unwrap();
        assert!(load_spec(file.path()).is_err());
    }
}
