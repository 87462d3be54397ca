use std::path::Path;

use crate::error::ExportError;

/// The documents a patient can be exported to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportKind {
    Visit,
    Lifetime,
    Timeline,
    Csv,
}

impl ReportKind {
    /// Default file name inside the export directory.
    pub fn file_name(self, mcp: &str) -> String {
        match self {
            ReportKind::Visit => format!("report_{mcp}.md"),
            ReportKind::Lifetime => format!("report_{mcp}_lifetime.md"),
            ReportKind::Timeline => format!("timeline_{mcp}.md"),
            ReportKind::Csv => format!("records_{mcp}.csv"),
        }
    }
}

/// Write a rendered document, creating the parent directory if needed.
pub fn write_output(path: &Path, body: &str) -> Result<(), ExportError> {
    let write_err = |source| ExportError::Write {
        path: path.to_path_buf(),
        source,
    };
    if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
        std::fs::create_dir_all(dir).map_err(write_err)?;
    }
    std::fs::write(path, body).map_err(write_err)?;
    tracing::info!(path = %path.display(), bytes = body.len(), "wrote export");
    Ok(())
}
