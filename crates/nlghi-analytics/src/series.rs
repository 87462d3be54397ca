use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use ts_rs::TS;

use nlghi_core::DOMAIN_COUNT;
use nlghi_core::models::patient::Patient;
use nlghi_core::models::visit::{VisitRecord, coerce_f64};

/// Which scalar of a visit record to chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum RecordField {
    Ghi,
    /// Sum of the DSAV vector.
    DsavTotal,
    /// Sum of the impairment vector.
    ImpairmentTotal,
    /// DSAV of one domain.
    Dsav(usize),
    /// Impairment level of one domain.
    Impairment(usize),
}

/// One chart point. `value` is NaN when the stored field is present but not
/// numeric, which keeps the point aligned with its date.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct SeriesPoint {
    pub session_date: String,
    pub value: f64,
}

/// Extract `field` from every record of `patient`, in entry order.
///
/// Records where the field is absent are skipped. Points are not sorted by
/// date.
pub fn series(patient: &Patient, field: RecordField) -> Vec<SeriesPoint> {
    patient
        .records
        .iter()
        .filter_map(|record| {
            field.select(record).map(|value| SeriesPoint {
                session_date: record.session_date.clone(),
                value,
            })
        })
        .collect()
}

impl RecordField {
    /// `None` when the field is absent from `record`; NaN when it is there
    /// but does not coerce to a number.
    pub fn select(self, record: &VisitRecord) -> Option<f64> {
        match self {
            RecordField::Ghi => record.ghi.as_ref().map(number_or_nan),
            RecordField::DsavTotal => record.dsavs.as_ref().map(total),
            RecordField::ImpairmentTotal => record.impairments.as_ref().map(total),
            RecordField::Dsav(i) => record.dsav_list().get(i).map(number_or_nan),
            RecordField::Impairment(i) => record.impairment_list().get(i).map(number_or_nan),
        }
    }
}

fn number_or_nan(value: &Value) -> f64 {
    coerce_f64(value).unwrap_or(f64::NAN)
}

/// Sum of a stored list; an empty list is 0. NaN if any entry, or the
/// value itself when it is not a list, fails to coerce.
fn total(value: &Value) -> f64 {
    match value {
        Value::Array(items) => items
            .iter()
            .map(coerce_f64)
            .sum::<Option<f64>>()
            .unwrap_or(f64::NAN),
        other => number_or_nan(other),
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown record field '{0}' (expected ghi, dsav-total, impairment-total, dsav:<i> or impairment:<i>)")]
pub struct UnknownField(String);

impl FromStr for RecordField {
    type Err = UnknownField;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let unknown = || UnknownField(s.to_string());
        let domain = |raw: &str| -> Result<usize, UnknownField> {
            raw.parse::<usize>()
                .ok()
                .filter(|&i| i < DOMAIN_COUNT)
                .ok_or_else(unknown)
        };

        match s.trim().to_lowercase().as_str() {
            "ghi" => Ok(RecordField::Ghi),
            "dsav-total" | "dsav_total" => Ok(RecordField::DsavTotal),
            "impairment-total" | "impairment_total" => Ok(RecordField::ImpairmentTotal),
            other => match other.split_once(':') {
                Some(("dsav", i)) => Ok(RecordField::Dsav(domain(i)?)),
                Some(("impairment", i)) => Ok(RecordField::Impairment(domain(i)?)),
                _ => Err(unknown()),
            },
        }
    }
}

impl fmt::Display for RecordField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecordField::Ghi => write!(f, "ghi"),
            RecordField::DsavTotal => write!(f, "dsav-total"),
            RecordField::ImpairmentTotal => write!(f, "impairment-total"),
            RecordField::Dsav(i) => write!(f, "dsav:{i}"),
            RecordField::Impairment(i) => write!(f, "impairment:{i}"),
        }
    }
}
