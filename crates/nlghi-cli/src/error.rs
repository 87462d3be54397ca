use thiserror::Error;

use nlghi_core::CoreError;
use nlghi_export::ExportError;
use nlghi_scoring::InvalidImpairmentVector;
use nlghi_storage::StorageError;

/// Anything a service operation can fail with.
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error(transparent)]
    Core(#[from] CoreError),

    #[error(transparent)]
    InvalidImpairments(#[from] InvalidImpairmentVector),

    #[error(transparent)]
    Storage(#[from] StorageError),

    #[error(transparent)]
    Export(#[from] ExportError),
}
