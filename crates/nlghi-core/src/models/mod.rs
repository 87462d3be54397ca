pub mod attachment;
pub mod classification;
pub mod dataset;
pub mod future_ref;
pub mod history;
pub mod note;
pub mod patient;
pub mod snapshot;
pub mod visit;
