use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::CoreError;

/// Impairment level a clinician assigns to one domain at one visit.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize, TS,
)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum ImpairmentLevel {
    #[default]
    None,
    /// Suspected but not yet diagnosed.
    Suspected,
    Mild,
    Moderate,
    Severe,
    Critical,
}

impl ImpairmentLevel {
    pub const ALL: [ImpairmentLevel; 6] = [
        ImpairmentLevel::None,
        ImpairmentLevel::Suspected,
        ImpairmentLevel::Mild,
        ImpairmentLevel::Moderate,
        ImpairmentLevel::Severe,
        ImpairmentLevel::Critical,
    ];

    pub const MAX: u8 = 5;

    pub fn value(self) -> u8 {
        self as u8
    }

    pub fn label(self) -> &'static str {
        match self {
            ImpairmentLevel::None => "None",
            ImpairmentLevel::Suspected => "Suspected/Undiagnosed",
            ImpairmentLevel::Mild => "Diagnosed but Mild",
            ImpairmentLevel::Moderate => "Diagnosed and Moderate",
            ImpairmentLevel::Severe => "Diagnosed and Severe",
            ImpairmentLevel::Critical => "Diagnosed and Critical",
        }
    }
}

impl TryFrom<i64> for ImpairmentLevel {
    type Error = CoreError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        usize::try_from(value)
            .ok()
            .and_then(|v| Self::ALL.get(v).copied())
            .ok_or(CoreError::InvalidImpairmentLevel(value))
    }
}

impl From<ImpairmentLevel> for i64 {
    fn from(level: ImpairmentLevel) -> Self {
        i64::from(level.value())
    }
}
