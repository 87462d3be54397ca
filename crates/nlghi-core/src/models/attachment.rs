use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use ts_rs::TS;

/// Reference to a file on disk. Only the path is recorded; the file itself
/// is never copied or opened by the core.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Attachment {
    #[serde(default)]
    pub path: String,
    #[serde(default, rename = "desc")]
    pub description: String,
    #[serde(default)]
    pub timestamp: String,
    #[serde(flatten)]
    #[ts(skip)]
    pub extra: Map<String, Value>,
}
