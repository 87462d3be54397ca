//! nlghi-analytics
//!
//! Longitudinal views over a patient's visits (trend series, DSAV heatmap,
//! merged timeline) and the population-wide consistency validator. Stored
//! data is read leniently: a malformed record degrades the output for that
//! record only.

pub mod heatmap;
pub mod series;
pub mod timeline;
pub mod validate;

pub use heatmap::{Heatmap, heatmap_matrix};
pub use series::{RecordField, SeriesPoint, series};
pub use timeline::{EventKind, TimelineEvent, timeline};
pub use validate::{Issue, MalformedRecord, ValidationReport, validate};
