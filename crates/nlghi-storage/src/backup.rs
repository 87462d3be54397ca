//! Timestamped copies of the data file.
//!
//! Backups live in one directory as `patients_<YYYYmmdd_HHMMSS>.json`, so
//! name order is age order and rotation can drop from the front. Other
//! files in the directory, the data file included, are never listed or
//! removed.

use std::path::{Path, PathBuf};

use jiff::civil::DateTime;

use crate::error::StorageError;

const BACKUP_PREFIX: &str = "patients_";
const BACKUP_STAMP: &str = "%Y%m%d_%H%M%S";

pub fn backup_file_name(at: DateTime) -> String {
    format!("{BACKUP_PREFIX}{}.json", at.strftime(BACKUP_STAMP))
}

/// Copy `data_file` into `backup_dir` and prune old backups down to `keep`.
///
/// Returns `None` without touching anything when there is no data file yet.
pub fn make_backup(
    data_file: &Path,
    backup_dir: &Path,
    keep: usize,
    at: DateTime,
) -> Result<Option<PathBuf>, StorageError> {
    if !data_file.exists() {
        return Ok(None);
    }

    std::fs::create_dir_all(backup_dir).map_err(|source| StorageError::Backup {
        path: backup_dir.to_path_buf(),
        source,
    })?;

    let dst = backup_dir.join(backup_file_name(at));
    std::fs::copy(data_file, &dst).map_err(|source| StorageError::Backup {
        path: dst.clone(),
        source,
    })?;

    prune(backup_dir, keep, Some(data_file))?;
    Ok(Some(dst))
}

/// Delete the oldest backups until at most `keep` remain. Returns the
/// paths removed. A file that cannot be removed is logged and skipped.
pub fn rotate(backup_dir: &Path, keep: usize) -> Result<Vec<PathBuf>, StorageError> {
    prune(backup_dir, keep, None)
}

fn prune(
    backup_dir: &Path,
    keep: usize,
    protect: Option<&Path>,
) -> Result<Vec<PathBuf>, StorageError> {
    let mut files = list_backups(backup_dir)?;
    if let Some(protect) = protect {
        files.retain(|path| !same_file(path, protect));
    }
    let excess = files.len().saturating_sub(keep);

    let mut removed = Vec::with_capacity(excess);
    for old in files.drain(..excess) {
        match std::fs::remove_file(&old) {
            Ok(()) => removed.push(old),
            Err(e) => tracing::warn!(path = %old.display(), error = %e, "failed to remove old backup"),
        }
    }
    Ok(removed)
}

/// All `patients_*.json` files in `backup_dir`, oldest first. A missing
/// directory has no backups.
pub fn list_backups(backup_dir: &Path) -> Result<Vec<PathBuf>, StorageError> {
    let entries = match std::fs::read_dir(backup_dir) {
        Ok(entries) => entries,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
        Err(source) => {
            return Err(StorageError::Backup {
                path: backup_dir.to_path_buf(),
                source,
            });
        }
    };

    let mut files = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|source| StorageError::Backup {
            path: backup_dir.to_path_buf(),
            source,
        })?;
        let path = entry.path();
        if is_backup_name(&path) && path.is_file() {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

fn is_backup_name(path: &Path) -> bool {
    path.file_name()
        .and_then(|name| name.to_str())
        .is_some_and(|name| name.starts_with(BACKUP_PREFIX) && name.ends_with(".json"))
}

fn same_file(a: &Path, b: &Path) -> bool {
    match (a.canonicalize(), b.canonicalize()) {
        (Ok(a), Ok(b)) => a == b,
        _ => a == b,
    }
}

/// Overwrite `data_file` with the contents of `backup`.
pub fn restore_backup(backup: &Path, data_file: &Path) -> Result<(), StorageError> {
    if !backup.is_file() {
        return Err(StorageError::NotFound {
            path: backup.to_path_buf(),
        });
    }
    std::fs::copy(backup, data_file).map_err(|source| StorageError::Write {
        path: data_file.to_path_buf(),
        source,
    })?;
    Ok(())
}
