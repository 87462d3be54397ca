use serde::{Deserialize, Serialize};
use ts_rs::TS;

use nlghi_core::models::visit::VisitRecord;
use nlghi_core::{DOMAIN_COUNT, DOMAIN_WEIGHTS, ImpairmentLevel};

use crate::error::InvalidImpairmentVector;

/// Decimal places the GHI is rounded to.
pub const GHI_DECIMALS: i32 = 4;

/// Scores for one visit: the validated impairment levels, the per-domain
/// severity adjusted values (DSAV) and the Geriatric Health Index.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct SeverityScore {
    pub impairments: Vec<u8>,
    pub dsavs: Vec<u32>,
    pub ghi: f64,
}

impl SeverityScore {
    pub fn dsav_total(&self) -> u32 {
        self.dsavs.iter().sum()
    }

    /// Turn the score into a visit record ready to append to a patient.
    pub fn into_record(self, timestamp: String, session_date: String) -> VisitRecord {
        VisitRecord::new(
            timestamp,
            session_date,
            &self.impairments,
            &self.dsavs,
            self.ghi,
        )
    }
}

/// Compute DSAVs and GHI for one visit.
///
/// `impairments` must hold exactly one level in `[0, 5]` per domain. The GHI
/// is the mean DSAV over the domain count (not over the weight total),
/// rounded to [`GHI_DECIMALS`] places.
pub fn compute<T>(impairments: &[T]) -> Result<SeverityScore, InvalidImpairmentVector>
where
    T: Copy + Into<i64>,
{
    if impairments.len() != DOMAIN_COUNT {
        return Err(InvalidImpairmentVector::WrongLength {
            expected: DOMAIN_COUNT,
            actual: impairments.len(),
        });
    }

    let mut levels = Vec::with_capacity(DOMAIN_COUNT);
    for (index, &raw) in impairments.iter().enumerate() {
        let value: i64 = raw.into();
        let level = ImpairmentLevel::try_from(value)
            .map_err(|_| InvalidImpairmentVector::OutOfRange { index, value })?;
        levels.push(level.value());
    }

    Ok(score(levels))
}

/// Same as [`compute`] for already-typed levels; cannot fail.
pub fn compute_levels(levels: &[ImpairmentLevel; DOMAIN_COUNT]) -> SeverityScore {
    score(levels.iter().map(|l| l.value()).collect())
}

fn score(levels: Vec<u8>) -> SeverityScore {
    let dsavs: Vec<u32> = levels
        .iter()
        .zip(DOMAIN_WEIGHTS)
        .map(|(&level, weight)| u32::from(level) * weight)
        .collect();
    let total: u32 = dsavs.iter().sum();
    SeverityScore {
        impairments: levels,
        dsavs,
        ghi: round_ghi(f64::from(total) / DOMAIN_COUNT as f64),
    }
}

/// Round to [`GHI_DECIMALS`] places, ties to even.
///
/// A GHI is always `k / 27` for an integer `k`, which never lands exactly
/// on a half at the fourth decimal, so the tie rule only matters for
/// values that did not come from [`compute`].
pub fn round_ghi(value: f64) -> f64 {
    let scale = 10f64.powi(GHI_DECIMALS);
    (value * scale).round_ties_even() / scale
}
