use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use ts_rs::TS;

/// Follow-up reminder with a due date.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct FutureRef {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub details: String,
    /// Due date (`YYYY-MM-DD`).
    #[serde(default)]
    pub due: String,
    #[serde(default)]
    pub done: bool,
    #[serde(default)]
    pub timestamp: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub done_at: Option<String>,
    #[serde(flatten)]
    #[ts(skip)]
    pub extra: Map<String, Value>,
}

impl FutureRef {
    pub fn status(&self) -> &'static str {
        if self.done { "DONE" } else { "PENDING" }
    }
}
