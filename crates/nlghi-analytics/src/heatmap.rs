use serde::{Deserialize, Serialize};
use ts_rs::TS;

use nlghi_core::models::patient::Patient;
use nlghi_core::models::visit::coerce_f64;
use nlghi_core::{DOMAIN_COUNT, DOMAIN_NAMES};

/// DSAV grid for one patient: `cells[domain][session]`.
///
/// Always `DOMAIN_COUNT` rows and one column per record, whatever shape the
/// stored DSAV vectors have.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Heatmap {
    /// Row labels.
    pub domains: Vec<String>,
    /// Column labels, in record entry order.
    pub session_dates: Vec<String>,
    pub cells: Vec<Vec<f64>>,
}

impl Heatmap {
    pub fn rows(&self) -> usize {
        self.cells.len()
    }

    pub fn columns(&self) -> usize {
        self.session_dates.len()
    }
}

/// Build the DSAV heatmap. Cells a short DSAV vector does not reach are 0;
/// non-numeric stored values are NaN.
pub fn heatmap_matrix(patient: &Patient) -> Heatmap {
    let records = &patient.records;
    let mut cells = vec![vec![0.0; records.len()]; DOMAIN_COUNT];
    for (j, record) in records.iter().enumerate() {
        for (i, row) in cells.iter_mut().enumerate() {
            row[j] = match record.dsav_list().get(i) {
                Some(v) => coerce_f64(v).unwrap_or(f64::NAN),
                None => 0.0,
            };
        }
    }

    Heatmap {
        domains: DOMAIN_NAMES.iter().map(|n| n.to_string()).collect(),
        session_dates: records.iter().map(|r| r.session_date.clone()).collect(),
        cells,
    }
}
