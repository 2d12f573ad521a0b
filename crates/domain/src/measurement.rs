use std::fmt;

use chrono::NaiveDate;

use crate::decimal;

/// One row of the body measurement log. Numeric fields keep the text as entered.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct MeasurementRecord {
    pub date: Option<NaiveDate>,
    pub weight: String,
    pub waist: String,
    pub hips: String,
    pub notes: String,
    pub photo: String,
}

impl MeasurementRecord {
    #[must_use]
    pub fn blank(date: NaiveDate) -> Self {
        Self {
            date: Some(date),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn value(&self, field: MeasurementField) -> &str {
        match field {
            MeasurementField::Weight => &self.weight,
            MeasurementField::Waist => &self.waist,
            MeasurementField::Hips => &self.hips,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MeasurementField {
    Weight,
    Waist,
    Hips,
}

impl MeasurementField {
    #[must_use]
    pub fn unit(self) -> &'static str {
        match self {
            MeasurementField::Weight => "kg",
            MeasurementField::Waist | MeasurementField::Hips => "cm",
        }
    }
}

/// Change of a measurement relative to the baseline, rounded to 0.1.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Delta {
    pub value: Option<f32>,
    pub unit: &'static str,
}

impl Delta {
    /// Compares `current` against `baseline`. Missing, non-numeric or zero values yield no data.
    #[must_use]
    pub fn new(current: &str, baseline: &str, field: MeasurementField) -> Self {
        let value = match (valid(current), valid(baseline)) {
            (Some(a), Some(b)) => Some(((a - b) * 10.).round() / 10.),
            _ => None,
        };
        Self {
            value,
            unit: field.unit(),
        }
    }
}

impl fmt::Display for Delta {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.value {
            None => write!(f, "— {}", self.unit),
            Some(v) if v > 0. => write!(f, "+{v} {}", self.unit),
            Some(v) if v == 0. => write!(f, "0 {}", self.unit),
            Some(v) => write!(f, "{v} {}", self.unit),
        }
    }
}

fn valid(value: &str) -> Option<f32> {
    decimal(value).filter(|v| *v != 0.)
}

/// Delta of the latest record against the first one.
#[must_use]
pub fn latest_delta(records: &[MeasurementRecord], field: MeasurementField) -> Delta {
    match (records.first(), records.last()) {
        (Some(first), Some(last)) => Delta::new(last.value(field), first.value(field), field),
        _ => Delta {
            value: None,
            unit: field.unit(),
        },
    }
}

/// Delta of record `idx` against the first one.
#[must_use]
pub fn delta(records: &[MeasurementRecord], idx: usize, field: MeasurementField) -> Delta {
    match (records.first(), records.get(idx)) {
        (Some(first), Some(record)) => Delta::new(record.value(field), first.value(field), field),
        _ => Delta {
            value: None,
            unit: field.unit(),
        },
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    use super::*;

    fn record(weight: &str, waist: &str, hips: &str) -> MeasurementRecord {
        MeasurementRecord {
            date: NaiveDate::from_ymd_opt(2025, 1, 1),
            weight: weight.to_string(),
            waist: waist.to_string(),
            hips: hips.to_string(),
            notes: String::new(),
            photo: String::new(),
        }
    }

    #[rstest]
    #[case("64.0", "65.2", MeasurementField::Weight, Some(-1.2), "-1.2 kg")]
    #[case("71", "70", MeasurementField::Waist, Some(1.0), "+1 cm")]
    #[case("96,5", "96.5", MeasurementField::Hips, Some(0.0), "0 cm")]
    #[case("70.04", "70", MeasurementField::Waist, Some(0.0), "0 cm")]
    #[case("", "70", MeasurementField::Waist, None, "— cm")]
    #[case("70", "", MeasurementField::Waist, None, "— cm")]
    #[case("abc", "70", MeasurementField::Waist, None, "— cm")]
    #[case("0", "70", MeasurementField::Weight, None, "— kg")]
    fn test_delta(
        #[case] current: &str,
        #[case] baseline: &str,
        #[case] field: MeasurementField,
        #[case] value: Option<f32>,
        #[case] display: &str,
    ) {
        let delta = Delta::new(current, baseline, field);
        assert_eq!(delta.value, value);
        assert_eq!(delta.to_string(), display);
    }

    #[test]
    fn test_latest_delta() {
        let records = vec![
            record("65.2", "70", ""),
            record("64.8", "", "96"),
            record("64.0", "68.5", "95"),
        ];
        assert_eq!(
            latest_delta(&records, MeasurementField::Weight).value,
            Some(-1.2)
        );
        assert_eq!(
            latest_delta(&records, MeasurementField::Waist).value,
            Some(-1.5)
        );
        assert_eq!(latest_delta(&records, MeasurementField::Hips).value, None);
        assert_eq!(delta(&records, 1, MeasurementField::Waist).value, None);
        assert_eq!(delta(&records, 1, MeasurementField::Weight).value, Some(-0.4));
        assert_eq!(delta(&records, 5, MeasurementField::Weight).value, None);
    }

    #[test]
    fn test_latest_delta_without_records() {
        assert_eq!(
            latest_delta(&[], MeasurementField::Weight).to_string(),
            "— kg"
        );
    }

    #[test]
    fn test_blank() {
        let date = NaiveDate::from_ymd_opt(2025, 3, 1).unwrap();
        assert_eq!(
            MeasurementRecord::blank(date),
            MeasurementRecord {
                date: Some(date),
                ..MeasurementRecord::default()
            }
        );
    }
}
