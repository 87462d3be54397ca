use serde_json::Value;

use nlghi_core::DOMAIN_COUNT;
use nlghi_core::models::patient::Patient;

use crate::error::ExportError;

/// Column names: `timestamp,session_date,ghi,dsav_0..dsav_26`.
pub fn csv_header() -> Vec<String> {
    ["timestamp", "session_date", "ghi"]
        .into_iter()
        .map(str::to_string)
        .chain((0..DOMAIN_COUNT).map(|i| format!("dsav_{i}")))
        .collect()
}

/// One row per visit record, in stored order.
///
/// A short DSAV vector leaves the trailing cells empty; entries beyond the
/// domain count are dropped. A patient without records is an error, since
/// a header-only file is almost always a mistake.
pub fn records_csv(mcp: &str, patient: &Patient) -> Result<String, ExportError> {
    if patient.records.is_empty() {
        return Err(ExportError::NoRecords {
            mcp: mcp.to_string(),
        });
    }

    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(csv_header())?;

    for record in &patient.records {
        let mut row = Vec::with_capacity(3 + DOMAIN_COUNT);
        row.push(record.timestamp.clone());
        row.push(record.session_date.clone());
        row.push(record.ghi.as_ref().map(cell).unwrap_or_default());
        row.extend((0..DOMAIN_COUNT).map(|i| record.dsav_list().get(i).map(cell).unwrap_or_default()));
        writer.write_record(&row)?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| ExportError::Csv(e.to_string()))?;
    String::from_utf8(bytes).map_err(|e| ExportError::Csv(e.to_string()))
}

fn cell(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
