//! Shared test fixtures.

use crate::data::{Dataset, Value};

fn texts(values: &[&str]) -> Vec<Value> {
    values.iter().map(|v| Value::from(*v)).collect()
}

/// Ten discharges across three hospitals of one health system.
///
/// exampleHospital01 spans 2015-11-10 to 2017-04-04, the whole set spans
/// 2008-08-12 to 2017-10-20.
pub fn discharge_fixture() -> Dataset {
    Dataset::from_columns(vec![
        (
            "dxGroup",
            texts(&[
                "InfectionGenitourinary",
                "InfectionGenitourinary",
                "CHF",
                "CHF",
                "Aneurysm",
                "ValveReplacement",
                "ValveReplacement",
                "ACS",
                "Seizures (primary-no structural brain disease)",
                "Seizures (primary-no structural brain disease)",
            ]),
        ),
        (
            "avgHGB",
            [9.7, 9.7, 11.7, 11.7, 11.8, 12.45, 12.45, 13.3, 11.9, 11.9]
                .iter()
                .map(|v| Value::Number(*v))
                .collect(),
        ),
        ("gcsTotalLast", texts(&["15", "15", "15", "15", "15", "10", "10", "15", "11", "11"])),
        ("healthSystemID", texts(&["exampleHealthSystem01"; 10])),
        (
            "hospitalID",
            texts(&[
                "exampleHospital01",
                "exampleHospital01",
                "exampleHospital02",
                "exampleHospital02",
                "exampleHospital03",
                "exampleHospital03",
                "exampleHospital03",
                "exampleHospital03",
                "exampleHospital01",
                "exampleHospital01",
            ]),
        ),
        (
            "hospitalDischargeDate",
            texts(&[
                "2017-04-04",
                "2017-04-04",
                "2017-10-20",
                "2017-10-20",
                "2008-08-12",
                "2013-07-23",
                "2013-07-23",
                "2012-07-4",
                "2015-11-10",
                "2015-11-10",
            ]),
        ),
    ])
    .expect("fixture columns have equal length")
}
