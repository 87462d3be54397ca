//! nlghi-export
//!
//! Plain-text reports rendered from embedded templates, and CSV export of
//! a patient's visit records.

pub mod error;
pub mod output;
pub mod records;
pub mod render;
pub mod report;

pub use error::ExportError;
pub use output::{ReportKind, write_output};
pub use records::{csv_header, records_csv};
pub use report::{lifetime_summary, timeline_markdown, visit_summary};
