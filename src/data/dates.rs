//! Date parsing for the datetime column and window boundaries.

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime};

use super::value::Value;
use crate::error::{DriftError, Result};

/// Format used for window boundaries and report output.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

const DATETIME_FORMATS: [&str; 4] =
    ["%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M", "%Y/%m/%d %H:%M:%S"];

const DATE_FORMATS: [&str; 3] = [DATE_FORMAT, "%Y/%m/%d", "%m/%d/%Y"];

/// Parse a timestamp as found in a dataset cell.
///
/// Date-only values map to midnight. Single-digit months and days are accepted
/// (`2012-07-4`).
pub fn parse_datetime(raw: &str) -> Option<NaiveDateTime> {
    let raw = raw.trim();
    for fmt in DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(raw, fmt) {
            return Some(dt);
        }
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.naive_utc());
    }
    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(raw, fmt).ok())
        .map(midnight)
}

/// Parse a window boundary (`YYYY-MM-DD`).
pub fn parse_boundary(field: &str, raw: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(raw.trim(), DATE_FORMAT).map_err(|_| DriftError::InvalidBoundary {
        field: field.to_string(),
        value: raw.to_string(),
    })
}

/// Start of the given day.
pub fn midnight(date: NaiveDate) -> NaiveDateTime {
    date.and_time(NaiveTime::MIN)
}

/// Interpret a cell of the datetime column. Missing cells yield `None`.
pub fn cell_datetime(value: &Value, column: &str, row: usize) -> Result<Option<NaiveDateTime>> {
    if value.is_null() {
        return Ok(None);
    }
    value
        .as_text()
        .and_then(parse_datetime)
        .map(Some)
        .ok_or_else(|| DriftError::MalformedDate {
            column: column.to_string(),
            row,
            value: value.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_parse_plain_date() {
        assert_eq!(parse_datetime("2017-04-04"), Some(midnight(date(2017, 4, 4))));
    }

    #[test]
    fn test_parse_unpadded_day() {
        assert_eq!(parse_datetime("2012-07-4"), Some(midnight(date(2012, 7, 4))));
    }

    #[test]
    fn test_parse_with_time() {
        let dt = parse_datetime("2017-04-04 13:30:00").unwrap();
        assert_eq!(dt.date(), date(2017, 4, 4));
        assert_eq!(dt.time(), NaiveTime::from_hms_opt(13, 30, 0).unwrap());
        assert!(parse_datetime("2017-04-04T13:30:00").is_some());
        assert!(parse_datetime("2017-04-04T13:30:00Z").is_some());
    }

    #[test]
    fn test_parse_garbage() {
        assert_eq!(parse_datetime("yesterday"), None);
        assert_eq!(parse_datetime(""), None);
    }

    #[test]
    fn test_parse_boundary_strict() {
        assert_eq!(parse_boundary("baseline_start", "2016-01-01").unwrap(), date(2016, 1, 1));
        let err = parse_boundary("baseline_start", "01/01/2016").unwrap_err();
        assert!(matches!(err, DriftError::InvalidBoundary { .. }));
    }

    #[test]
    fn test_cell_datetime() {
        assert_eq!(cell_datetime(&Value::Null, "d", 0).unwrap(), None);
        assert!(cell_datetime(&Value::from("2015-11-10"), "d", 0).unwrap().is_some());
        let err = cell_datetime(&Value::Number(20151110.0), "d", 3).unwrap_err();
        assert!(matches!(err, DriftError::MalformedDate { row: 3, .. }));
    }
}
