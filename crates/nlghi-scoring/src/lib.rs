//! nlghi-scoring
//!
//! Severity index computation and the advisory keyword classifier. Pure
//! functions over the fixed domain registry.

pub mod classify;
pub mod error;
pub mod lexicon;
pub mod scoring;

pub use classify::classify;
pub use error::{InvalidImpairmentVector, LexiconError};
pub use scoring::{SeverityScore, compute};
