use thiserror::Error;

/// An impairment vector rejected at data-entry time.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvalidImpairmentVector {
    #[error("invalid impairment vector: expected {expected} levels, got {actual}")]
    WrongLength { expected: usize, actual: usize },

    #[error("invalid impairment vector: level {value} for domain {index} is outside [0, 5]")]
    OutOfRange { index: usize, value: i64 },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LexiconError {
    #[error("lexicon phrase is empty")]
    EmptyPhrase,

    #[error("lexicon phrase '{phrase}' maps to unknown domain {index}")]
    UnknownDomain { phrase: String, index: usize },

    #[error("lexicon phrase '{0}' maps to no domain")]
    NoDomain(String),
}
