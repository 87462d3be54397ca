use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use ts_rs::TS;

/// One assessment session for one patient.
///
/// The impairment, DSAV and GHI fields keep the raw JSON exactly as stored,
/// so records written by older or hand-edited data files still load and
/// can be reported on by the validator instead of failing the whole
/// dataset. `None` means the key is absent; an explicit `null` is kept as
/// `Some(Value::Null)` and written back.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct VisitRecord {
    /// Creation timestamp (`YYYY-MM-DD HH:MM:SS`).
    #[serde(default)]
    pub timestamp: String,
    /// Clinical date of the session (`YYYY-MM-DD`).
    #[serde(default)]
    pub session_date: String,
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub impairments: Option<Value>,
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub dsavs: Option<Value>,
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub ghi: Option<Value>,
    #[serde(flatten)]
    #[ts(skip)]
    pub extra: Map<String, Value>,
}

impl VisitRecord {
    pub fn new(
        timestamp: String,
        session_date: String,
        impairments: &[u8],
        dsavs: &[u32],
        ghi: f64,
    ) -> Self {
        Self {
            timestamp,
            session_date,
            impairments: Some(impairments.iter().map(|&v| Value::from(v)).collect()),
            dsavs: Some(dsavs.iter().map(|&v| Value::from(v)).collect()),
            ghi: Some(Value::from(ghi)),
            extra: Map::new(),
        }
    }

    /// Stored impairment entries. Empty when absent or not a list.
    pub fn impairment_list(&self) -> &[Value] {
        list(&self.impairments)
    }

    /// Stored DSAV entries. Empty when absent or not a list.
    pub fn dsav_list(&self) -> &[Value] {
        list(&self.dsavs)
    }

    /// Stored GHI as a number, if it is one.
    pub fn ghi_value(&self) -> Option<f64> {
        self.ghi.as_ref().and_then(coerce_f64)
    }

    /// Stored GHI for display: the value, or `N/A` when absent or null.
    pub fn ghi_label(&self) -> String {
        self.ghi
            .as_ref()
            .map(scalar_label)
            .unwrap_or_else(|| "N/A".to_string())
    }
}

fn list(value: &Option<Value>) -> &[Value] {
    match value {
        Some(Value::Array(items)) => items,
        _ => &[],
    }
}

/// Deserialize a key that is present, so that `null` becomes
/// `Some(Value::Null)` instead of `None`. Pair with `#[serde(default)]`.
pub(crate) fn present<'de, D>(deserializer: D) -> Result<Option<Value>, D::Error>
where
    D: Deserializer<'de>,
{
    Value::deserialize(deserializer).map(Some)
}

/// Numeric coercion of a stored scalar: numbers, and strings that parse as
/// numbers. Everything else is `None`.
pub fn coerce_f64(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }
}

/// Integer coercion of a stored scalar. Accepts integral numbers and
/// integer strings; fractional values are rejected.
pub fn coerce_i64(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64().or_else(|| {
            n.as_f64()
                .filter(|f| f.fract() == 0.0 && f.abs() < i64::MAX as f64)
                .map(|f| f as i64)
        }),
        Value::String(s) => s.trim().parse::<i64>().ok(),
        _ => None,
    }
}

/// Render a stored scalar the way it reads in the data file, with `N/A`
/// standing in for a missing value.
pub fn scalar_label(value: &Value) -> String {
    match value {
        Value::Null => "N/A".to_string(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
