use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use ts_rs::TS;

use super::classification::ClassificationResult;

/// A saved run of the symptom classifier: the text as typed and what the
/// classifier suggested at the time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct SymptomSnapshot {
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub result: ClassificationResult,
    #[serde(default)]
    pub timestamp: String,
    #[serde(flatten)]
    #[ts(skip)]
    pub extra: Map<String, Value>,
}
