use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;
use ts_rs::TS;

use nlghi_core::DOMAIN_COUNT;
use nlghi_core::models::dataset::Dataset;
use nlghi_core::models::visit::{VisitRecord, coerce_f64, coerce_i64, scalar_label};
use nlghi_scoring::{SeverityScore, compute};

/// Largest allowed difference between a stored and a recomputed value.
pub const TOLERANCE: f64 = 1e-6;

/// What is wrong with one stored visit record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS, Error)]
#[serde(tag = "kind", rename_all = "snake_case")]
#[ts(export)]
pub enum MalformedRecord {
    #[error("impairments len={actual} != {expected}")]
    ImpairmentLength { expected: usize, actual: usize },

    #[error("dsavs len={actual} != {expected}")]
    DsavLength { expected: usize, actual: usize },

    #[error("GHI mismatch {stored} vs {recomputed}")]
    GhiMismatch { stored: f64, recomputed: f64 },

    #[error("GHI is not numeric: {value}")]
    GhiNotNumeric { value: String },

    #[error("DSAV mismatch for domain {domain}: {stored} vs {expected}")]
    DsavMismatch {
        domain: usize,
        stored: String,
        expected: u32,
    },

    #[error("error recomputing GHI: {reason}")]
    Recompute { reason: String },
}

/// One finding, located by patient and record position.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Issue {
    pub mcp: String,
    pub record_index: usize,
    pub problem: MalformedRecord,
}

impl fmt::Display for Issue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] record {}: {}", self.mcp, self.record_index, self.problem)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ValidationReport {
    pub patients: usize,
    pub records: usize,
    pub issues: Vec<Issue>,
}

impl ValidationReport {
    pub fn issue_count(&self) -> usize {
        self.issues.len()
    }

    pub fn is_clean(&self) -> bool {
        self.issues.is_empty()
    }

    /// Diagnostic lines: patient count, one line per issue, then the total.
    pub fn lines(&self) -> Vec<String> {
        let mut lines = Vec::with_capacity(self.issues.len() + 2);
        lines.push(format!("Patients: {}", self.patients));
        lines.extend(self.issues.iter().map(ToString::to_string));
        lines.push(format!("Issues found: {}", self.issue_count()));
        lines
    }
}

/// Recompute every stored record of every patient and report where the
/// stored impairments, DSAVs or GHI disagree with the recomputation.
///
/// Never stops early: each record is checked on its own.
pub fn validate(dataset: &Dataset) -> ValidationReport {
    let mut report = ValidationReport {
        patients: dataset.len(),
        ..ValidationReport::default()
    };

    for (mcp, patient) in dataset.iter() {
        for (record_index, record) in patient.records.iter().enumerate() {
            report.records += 1;
            report
                .issues
                .extend(check_record(record).into_iter().map(|problem| Issue {
                    mcp: mcp.to_string(),
                    record_index,
                    problem,
                }));
        }
    }

    tracing::debug!(
        patients = report.patients,
        records = report.records,
        issues = report.issue_count(),
        "validation finished"
    );
    report
}

/// All problems with a single record, in a fixed order: vector lengths
/// first, then the recomputation checks.
pub fn check_record(record: &VisitRecord) -> Vec<MalformedRecord> {
    let mut problems = Vec::new();

    let impairments = record.impairment_list();
    let dsavs = record.dsav_list();

    if impairments.len() != DOMAIN_COUNT {
        problems.push(MalformedRecord::ImpairmentLength {
            expected: DOMAIN_COUNT,
            actual: impairments.len(),
        });
    }
    if dsavs.len() != DOMAIN_COUNT {
        problems.push(MalformedRecord::DsavLength {
            expected: DOMAIN_COUNT,
            actual: dsavs.len(),
        });
    }

    let score = match recompute(impairments) {
        Ok(score) => score,
        Err(problem) => {
            problems.push(problem);
            return problems;
        }
    };

    // A record without a GHI key is compared as 0.
    let stored_ghi = match &record.ghi {
        None => Some(0.0),
        Some(value) => coerce_f64(value),
    };
    match stored_ghi {
        Some(stored) if (stored - score.ghi).abs() > TOLERANCE => {
            problems.push(MalformedRecord::GhiMismatch {
                stored,
                recomputed: score.ghi,
            });
        }
        Some(_) => {}
        None => problems.push(MalformedRecord::GhiNotNumeric {
            value: record.ghi_label(),
        }),
    }

    if dsavs.len() == DOMAIN_COUNT {
        let mismatch = dsavs
            .iter()
            .zip(&score.dsavs)
            .enumerate()
            .find(|(_, (stored, expected))| {
                coerce_f64(stored).is_none_or(|s| (s - f64::from(**expected)).abs() > TOLERANCE)
            });
        if let Some((domain, (stored, &expected))) = mismatch {
            problems.push(MalformedRecord::DsavMismatch {
                domain,
                stored: scalar_label(stored),
                expected,
            });
        }
    }

    problems
}

/// Re-run the calculator on the stored levels. Only the first
/// `DOMAIN_COUNT` entries are used, so an over-long vector is still scored
/// (its length is reported separately).
fn recompute(impairments: &[Value]) -> Result<SeverityScore, MalformedRecord> {
    let levels = impairments
        .iter()
        .take(DOMAIN_COUNT)
        .enumerate()
        .map(|(index, value)| {
            coerce_i64(value).ok_or_else(|| MalformedRecord::Recompute {
                reason: format!(
                    "impairment {index} is not an integer: {}",
                    scalar_label(value)
                ),
            })
        })
        .collect::<Result<Vec<i64>, _>>()?;

    compute(levels.as_slice()).map_err(|e| MalformedRecord::Recompute {
        reason: e.to_string(),
    })
}
