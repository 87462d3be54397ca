use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("impairment level {0} is outside [0, 5]")]
    InvalidImpairmentLevel(i64),

    #[error("invalid date '{value}': {reason}")]
    InvalidDate { value: String, reason: String },

    #[error("missing required field: {0}")]
    MissingField(String),

    #[error("patient not found: {0}")]
    PatientNotFound(String),

    #[error("no {kind} entry at position {index}")]
    EntryNotFound { kind: &'static str, index: usize },
}
