//! CLI command tests

use super::*;
use crate::cli::LogLevel;
use crate::config::*;
use super::validate;
use crate::data::load_csv;
use crate::error::DriftError;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

const DISCHARGES: &str = "\
dxGroup,avgHGB,hospitalID,hospitalDischargeDate
InfectionGenitourinary,9.7,exampleHospital01,2017-04-04
InfectionGenitourinary,9.7,exampleHospital01,2017-04-04
CHF,11.7,exampleHospital02,2017-10-20
CHF,11.7,exampleHospital02,2017-10-20
Aneurysm,11.8,exampleHospital03,2008-08-12
ValveReplacement,12.45,exampleHospital03,2013-07-23
ValveReplacement,12.45,exampleHospital03,2013-07-23
ACS,13.3,exampleHospital03,2012-07-4
Seizures,11.9,exampleHospital01,2015-11-10
Seizures,11.9,exampleHospital01,2015-11-10
";

fn write_data(dir: &TempDir) -> PathBuf {
    let path = dir.path().join("discharges.csv");
    std::fs::write(&path, DISCHARGES).unwrap();
    path
}

fn source(data: &Path) -> SourceArgs {
    SourceArgs {
        data: Some(data.to_path_buf()),
        datetime_col: Some("hospitalDischargeDate".to_string()),
        group_col: Some("hospitalID".to_string()),
        baseline_start: Some("2008-08-12".to_string()),
        baseline_end: Some("2016-12-31".to_string()),
        target_start: Some("2017-01-01".to_string()),
        target_end: Some("2017-10-21".to_string()),
        ..Default::default()
    }
}

fn drift_args(data: &Path, output: PathBuf) -> DriftArgs {
    DriftArgs {
        source: source(data),
        features: Some("dxGroup,avgHGB".to_string()),
        output: Some(output),
        ..Default::default()
    }
}

#[test]
fn test_drift_command_writes_csv() {
    let dir = TempDir::new().unwrap();
    let data = write_data(&dir);
    let output = dir.path().join("report.csv");

    drift::run_drift(drift_args(&data, output.clone()), LogLevel::Quiet).unwrap();

    // Only exampleHospital01 has both windows; one row per feature
    let report = load_csv(&output).unwrap();
    assert_eq!(report.len(), 2);
    assert_eq!(report.columns()[0], "group_col");
    let features: Vec<String> = report.column("feature").unwrap().iter().map(|v| v.to_string()).collect();
    assert!(features.contains(&"dxGroup".to_string()));
    assert!(features.contains(&"avgHGB".to_string()));
}

#[test]
fn test_drift_command_json_format() {
    let dir = TempDir::new().unwrap();
    let data = write_data(&dir);
    let output = dir.path().join("report.json");
    let mut args = drift_args(&data, output.clone());
    args.format = Some(OutputFormat::Json);

    drift::run_drift(args, LogLevel::Quiet).unwrap();

    let rows: serde_json::Value = serde_json::from_str(&std::fs::read_to_string(&output).unwrap()).unwrap();
    let rows = rows.as_array().unwrap();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0]["group_value"], "exampleHospital01");
}

#[test]
fn test_drift_command_from_config_file() {
    let dir = TempDir::new().unwrap();
    let data = write_data(&dir);
    let output = dir.path().join("from_config.csv");
    let config_path = dir.path().join("drift.yaml");
    let config = format!(
        r#"
data: {}
features: [dxGroup, avgHGB]
datetime_col: hospitalDischargeDate
group_col: hospitalID
baseline_start: "2008-08-12"
baseline_end: "2016-12-31"
target_start: "2017-01-01"
target_end: "2017-10-21"
output: {}
"#,
        data.display(),
        output.display()
    );
    std::fs::write(&config_path, config).unwrap();

    let args = DriftArgs {
        source: SourceArgs { config: Some(config_path), ..Default::default() },
        ..Default::default()
    };
    drift::run_drift(args, LogLevel::Quiet).unwrap();
    assert!(output.exists());
}

#[test]
fn test_drift_command_requires_output_or_model_id() {
    let dir = TempDir::new().unwrap();
    let data = write_data(&dir);
    let mut args = drift_args(&data, PathBuf::new());
    args.output = None;

    let err = drift::run_drift(args, LogLevel::Quiet).unwrap_err();
    assert!(matches!(err, DriftError::ConfigValue { .. }));
}

#[test]
fn test_drift_command_rejects_bad_p_value() {
    let dir = TempDir::new().unwrap();
    let data = write_data(&dir);
    let mut args = drift_args(&data, dir.path().join("out.csv"));
    args.p_value = Some(1.5);

    let err = drift::run_drift(args, LogLevel::Quiet).unwrap_err();
    assert!(matches!(err, DriftError::InvalidSpec(ValidationError::InvalidPValue(_))));
}

#[test]
fn test_drift_command_missing_feature_column() {
    let dir = TempDir::new().unwrap();
    let data = write_data(&dir);
    let mut args = drift_args(&data, dir.path().join("out.csv"));
    args.features = Some("bmi".to_string());

    assert!(drift::run_drift(args, LogLevel::Quiet).is_err());
}

#[test]
fn test_windows_command() {
    let dir = TempDir::new().unwrap();
    let data = write_data(&dir);
    let args = WindowsArgs { source: source(&data) };

    windows::run_windows(args, LogLevel::Quiet).unwrap();
}

#[test]
fn test_windows_command_missing_data() {
    let args = WindowsArgs { source: SourceArgs::default() };
    let err = windows::run_windows(args, LogLevel::Quiet).unwrap_err();
    assert!(matches!(err, DriftError::InvalidSpec(ValidationError::MissingDataPath)));
}

#[test]
fn test_run_command_reports_error_code() {
    let cli = parse_args(["driftcheck", "-q", "windows", "--config", "/nonexistent/drift.yaml"]).unwrap();
    let err = run_command(cli).unwrap_err();
    assert!(err.starts_with("[E"));
}

#[test]
fn test_run_command_drift() {
    let dir = TempDir::new().unwrap();
    let data = write_data(&dir);
    let output = dir.path().join("cli.csv");
    let cli = parse_args([
        "driftcheck",
        "drift",
        "-q",
        "-x",
        data.to_str().unwrap(),
        "-t",
        "hospitalDischargeDate",
        "-g",
        "hospitalID",
        "-f",
        "dxGroup",
        "-o",
        output.to_str().unwrap(),
    ])
    .unwrap();

    run_command(cli).unwrap();
    assert!(output.exists());
}

fn write_schema_config(dir: &TempDir, data: &Path, dx_rule: &str) -> PathBuf {
    let path = dir.path().join("schema.yaml");
    let config = format!(
        r#"
data: {}
group_col: hospitalID
model_id: 5
schema:
  avgHGB: {{ kind: float, min: 0 }}
  dxGroup: {dx_rule}
"#,
        data.display()
    );
    std::fs::write(&path, config).unwrap();
    path
}

fn validate_args(config: PathBuf, output: PathBuf) -> ValidateArgs {
    ValidateArgs { config: Some(config), output: Some(output), ..Default::default() }
}

#[test]
fn test_validate_command_writes_json_and_csv() {
    let dir = TempDir::new().unwrap();
    let data = write_data(&dir);
    let config = write_schema_config(&dir, &data, "{ kind: category }");
    let output = dir.path().join("schema_results");

    validate::run_validate(validate_args(config, output.clone()), LogLevel::Quiet).unwrap();

    let json: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(output.with_extension("json")).unwrap()).unwrap();
    assert_eq!(json["metadata"]["modelID"], 5);
    assert_eq!(json["schema_validation"]["hospitalID"]["exampleHospital03"]["avgHGB"]["status"], "valid");
    assert_eq!(json["schema_validation"]["hospitalID"]["exampleHospital03"]["dxGroup"]["n_vals"], 3);

    let csv = load_csv(output.with_extension("csv")).unwrap();
    assert_eq!(csv.columns()[0], "modelID");
    // Three hospitals, two features
    assert_eq!(csv.len(), 6);
}

#[test]
fn test_validate_command_fails_on_invalid_values() {
    let dir = TempDir::new().unwrap();
    let data = write_data(&dir);
    let config = write_schema_config(&dir, &data, "{ kind: category, allowed: [CHF, ACS, Aneurysm] }");
    let output = dir.path().join("schema_results");

    let err = validate::run_validate(validate_args(config, output.clone()), LogLevel::Quiet).unwrap_err();
    match err {
        DriftError::SchemaInvalid { failures } => assert_eq!(
            failures,
            vec!["hospitalID: exampleHospital01, dxGroup invalid", "hospitalID: exampleHospital03, dxGroup invalid"]
        ),
        other => panic!("Expected SchemaInvalid, got {other:?}"),
    }
    // Results are written before the gate
    assert!(output.with_extension("json").exists());
    assert!(output.with_extension("csv").exists());
}

#[test]
fn test_validate_command_merges_earlier_results() {
    let dir = TempDir::new().unwrap();
    let data = write_data(&dir);
    let config = write_schema_config(&dir, &data, "{ kind: category }");
    let output = dir.path().join("schema_results");

    let mut args = validate_args(config.clone(), output.clone());
    args.features = Some("avgHGB".to_string());
    validate::run_validate(args, LogLevel::Quiet).unwrap();

    let mut args = validate_args(config, output.clone());
    args.features = Some("dxGroup".to_string());
    validate::run_validate(args, LogLevel::Quiet).unwrap();

    let report = crate::schema::SchemaReport::from_json(&std::fs::read_to_string(output.with_extension("json")).unwrap())
        .unwrap();
    assert_eq!(report.len(), 6);
}

#[test]
fn test_validate_command_without_rules() {
    let dir = TempDir::new().unwrap();
    let data = write_data(&dir);
    let args = ValidateArgs { data: Some(data), group_col: Some("hospitalID".into()), ..Default::default() };

    let err = validate::run_validate(args, LogLevel::Quiet).unwrap_err();
    assert!(matches!(err, DriftError::InvalidSpec(ValidationError::NoSchemaRules)));
}

#[test]
fn test_run_command_validate_reports_schema_code() {
    let dir = TempDir::new().unwrap();
    let data = write_data(&dir);
    let config = write_schema_config(&dir, &data, "{ kind: category, allowed: [CHF] }");
    let output = dir.path().join("cli_schema");
    let cli = parse_args([
        "driftcheck",
        "-q",
        "validate",
        "--config",
        config.to_str().unwrap(),
        "-o",
        output.to_str().unwrap(),
    ])
    .unwrap();

    let err = run_command(cli).unwrap_err();
    assert!(err.starts_with("[E013]"));
}
