//! nlghi-storage
//!
//! Local persistence for the patient dataset. Thin layer over a single
//! JSON file, with timestamped backups rotated before each write.

pub mod backup;
pub mod error;
pub mod state;
pub mod store;

pub use error::StorageError;
pub use store::{JsonStore, MemoryStore, PatientStore, StoreConfig};
