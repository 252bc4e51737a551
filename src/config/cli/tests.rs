//! Tests for CLI argument parsing

use super::*;
use crate::config::DriftSpec;
use std::path::PathBuf;

#[test]
fn test_parse_drift_command() {
    let cli = parse_args([
        "driftcheck",
        "drift",
        "-i",
        "3",
        "-x",
        "discharges.csv",
        "-f",
        "dxGroup,avgHGB",
        "-t",
        "hospitalDischargeDate",
        "-g",
        "hospitalID",
    ])
    .unwrap();

    match cli.command {
        Command::Drift(args) => {
            assert_eq!(args.model_id, Some(3));
            assert_eq!(args.source.data, Some(PathBuf::from("discharges.csv")));
            assert_eq!(args.features.as_deref(), Some("dxGroup,avgHGB"));
            assert_eq!(args.source.datetime_col.as_deref(), Some("hospitalDischargeDate"));
            assert_eq!(args.source.group_col.as_deref(), Some("hospitalID"));
            assert_eq!(args.p_value, None);
            assert_eq!(args.format, None);
        }
        _ => panic!("Expected Drift command"),
    }
}

#[test]
fn test_parse_drift_dates_and_threshold() {
    let cli = parse_args([
        "driftcheck",
        "drift",
        "--baseline-start",
        "2015-01-01",
        "-b",
        "2016-12-31",
        "-c",
        "2017-01-01",
        "--target-end",
        "2017-12-31",
        "-p",
        "0.01",
        "--format",
        "json",
    ])
    .unwrap();

    match cli.command {
        Command::Drift(args) => {
            assert_eq!(args.source.baseline_start.as_deref(), Some("2015-01-01"));
            assert_eq!(args.source.baseline_end.as_deref(), Some("2016-12-31"));
            assert_eq!(args.source.target_start.as_deref(), Some("2017-01-01"));
            assert_eq!(args.source.target_end.as_deref(), Some("2017-12-31"));
            assert!((args.p_value.unwrap() - 0.01).abs() < 1e-12);
            assert_eq!(args.format, Some(OutputFormat::Json));
        }
        _ => panic!("Expected Drift command"),
    }
}

#[test]
fn test_parse_windows_command() {
    let cli = parse_args(["driftcheck", "windows", "-x", "d.csv", "-t", "ts", "--config", "run.yaml"]).unwrap();
    match cli.command {
        Command::Windows(args) => {
            assert_eq!(args.source.data, Some(PathBuf::from("d.csv")));
            assert_eq!(args.source.config, Some(PathBuf::from("run.yaml")));
        }
        _ => panic!("Expected Windows command"),
    }
}

#[test]
fn test_invalid_format_rejected() {
    assert!(parse_args(["driftcheck", "drift", "--format", "parquet"]).is_err());
}

#[test]
fn test_invalid_model_id_rejected() {
    assert!(parse_args(["driftcheck", "drift", "-i", "abc"]).is_err());
}

#[test]
fn test_unknown_command() {
    assert!(parse_args(["driftcheck", "unknown"]).is_err());
}

#[test]
fn test_verbose_and_quiet_flags() {
    let cli = parse_args(["driftcheck", "--verbose", "windows"]).unwrap();
    assert!(cli.verbose);
    assert!(!cli.quiet);

    let cli = parse_args(["driftcheck", "windows", "-q"]).unwrap();
    assert!(!cli.verbose);
    assert!(cli.quiet);
}

#[test]
fn test_apply_overrides_keeps_unset_fields() {
    let mut spec = DriftSpec {
        features: vec!["dxGroup".into()],
        datetime_col: "hospitalDischargeDate".into(),
        group_col: "hospitalID".into(),
        p_value: 0.01,
        ..Default::default()
    };
    let args = DriftArgs { model_id: Some(9), ..Default::default() };
    apply_overrides(&mut spec, &args);

    assert_eq!(spec.model_id, Some(9));
    assert_eq!(spec.features, vec!["dxGroup"]);
    assert_eq!(spec.group_col, "hospitalID");
    assert!((spec.p_value - 0.01).abs() < 1e-12);
}

#[test]
fn test_apply_overrides_all() {
    let mut spec = DriftSpec::default();
    let args = DriftArgs {
        source: SourceArgs {
            config: None,
            data: Some(PathBuf::from("d.csv")),
            datetime_col: Some("ts".into()),
            group_col: Some("site".into()),
            baseline_start: Some("2015-01-01".into()),
            baseline_end: Some("2016-01-01".into()),
            target_start: Some("2016-01-02".into()),
            target_end: Some("2017-01-01".into()),
        },
        model_id: Some(1),
        features: Some("['a', 'b']".into()),
        p_value: Some(0.1),
        output: Some(PathBuf::from("out.json")),
        format: Some(OutputFormat::Json),
    };
    apply_overrides(&mut spec, &args);

    assert_eq!(spec.data, Some(PathBuf::from("d.csv")));
    assert_eq!(spec.datetime_col, "ts");
    assert_eq!(spec.group_col, "site");
    assert_eq!(spec.baseline_start.as_deref(), Some("2015-01-01"));
    assert_eq!(spec.target_end.as_deref(), Some("2017-01-01"));
    assert_eq!(spec.features, vec!["a", "b"]);
    assert!((spec.p_value - 0.1).abs() < 1e-12);
    assert_eq!(spec.output, Some(PathBuf::from("out.json")));
    assert_eq!(spec.format, OutputFormat::Json);
}

#[test]
fn test_output_format_roundtrip() {
    for format in [OutputFormat::Csv, OutputFormat::Json, OutputFormat::Text] {
        assert_eq!(format.to_string().parse::<OutputFormat>().unwrap(), format);
    }
    assert_eq!(OutputFormat::Text.extension(), "txt");
}

#[test]
fn test_parse_validate_command() {
    let cli = parse_args(["driftcheck", "validate", "--config", "run.yaml", "-i", "4", "-f", "avgHGB"]).unwrap();

    match cli.command {
        Command::Validate(args) => {
            assert_eq!(args.config, Some(PathBuf::from("run.yaml")));
            assert_eq!(args.model_id, Some(4));
            assert_eq!(args.features.as_deref(), Some("avgHGB"));
            assert_eq!(args.output, None);
        }
        _ => panic!("Expected Validate command"),
    }
}

#[test]
fn test_validate_has_no_datetime_flag() {
    assert!(parse_args(["driftcheck", "validate", "-t", "hospitalDischargeDate"]).is_err());
}

#[test]
fn test_apply_validate_overrides() {
    let mut spec = DriftSpec { group_col: "hospitalID".into(), features: vec!["dxGroup".into()], ..Default::default() };
    let args = ValidateArgs {
        data: Some(PathBuf::from("d.csv")),
        model_id: Some(2),
        output: Some(PathBuf::from("schema")),
        ..Default::default()
    };
    apply_validate_overrides(&mut spec, &args);

    assert_eq!(spec.data, Some(PathBuf::from("d.csv")));
    assert_eq!(spec.model_id, Some(2));
    assert_eq!(spec.output, Some(PathBuf::from("schema")));
    assert_eq!(spec.group_col, "hospitalID");
    assert_eq!(spec.features, vec!["dxGroup"]);
}
