use std::cell::{Cell, RefCell};
use std::path::{Path, PathBuf};

use nlghi_core::models::dataset::Dataset;

use crate::backup;
use crate::error::StorageError;
use crate::state::{load_state, save_state};

/// Where and how the dataset is persisted. Resolved once at startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    pub data_file: PathBuf,
    pub backup_dir: PathBuf,
    pub backups_to_keep: usize,
    /// Back up the current file before every save.
    pub auto_backup: bool,
    /// Name recorded in audit events.
    pub operator: String,
}

impl StoreConfig {
    pub fn new(data_file: impl Into<PathBuf>, backup_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_file: data_file.into(),
            backup_dir: backup_dir.into(),
            backups_to_keep: 10,
            auto_backup: true,
            operator: "doctor".to_string(),
        }
    }
}

/// The persistence seam: the whole dataset is read and written as a unit.
pub trait PatientStore {
    fn load_all_patients(&self) -> Result<Dataset, StorageError>;

    fn save_all_patients(&self, dataset: &Dataset) -> Result<(), StorageError>;
}

/// Dataset stored as one pretty-printed JSON object keyed by MCP.
#[derive(Debug, Clone)]
pub struct JsonStore {
    config: StoreConfig,
}

impl JsonStore {
    pub fn new(config: StoreConfig) -> Result<Self, StorageError> {
        if config.backups_to_keep == 0 {
            return Err(StorageError::Config(
                "backups_to_keep must be at least 1".to_string(),
            ));
        }
        Ok(Self { config })
    }

    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    /// Back up the data file now. `None` when there is nothing to back up.
    pub fn make_backup(&self) -> Result<Option<PathBuf>, StorageError> {
        let created = backup::make_backup(
            &self.config.data_file,
            &self.config.backup_dir,
            self.config.backups_to_keep,
            jiff::Zoned::now().datetime(),
        )?;
        if let Some(path) = &created {
            tracing::info!(
                target: "audit",
                operator = %self.config.operator,
                "created backup: {}",
                path.display()
            );
        }
        Ok(created)
    }

    pub fn list_backups(&self) -> Result<Vec<PathBuf>, StorageError> {
        backup::list_backups(&self.config.backup_dir)
    }

    pub fn restore_backup(&self, path: &Path) -> Result<(), StorageError> {
        backup::restore_backup(path, &self.config.data_file)?;
        tracing::info!(
            target: "audit",
            operator = %self.config.operator,
            "restored backup: {}",
            path.display()
        );
        Ok(())
    }
}

impl PatientStore for JsonStore {
    /// A missing data file is an empty dataset; an unreadable or corrupt
    /// one is an error.
    fn load_all_patients(&self) -> Result<Dataset, StorageError> {
        let dataset = load_state::<Dataset>(&self.config.data_file)?.unwrap_or_default();
        tracing::debug!(
            path = %self.config.data_file.display(),
            patients = dataset.len(),
            "loaded dataset"
        );
        Ok(dataset)
    }

    fn save_all_patients(&self, dataset: &Dataset) -> Result<(), StorageError> {
        if self.config.auto_backup {
            self.make_backup()?;
        }
        save_state(&self.config.data_file, dataset)?;
        tracing::info!(
            target: "audit",
            operator = %self.config.operator,
            "wrote data file ({} patients)",
            dataset.len()
        );
        Ok(())
    }
}

/// In-memory store for front ends that keep nothing on disk, and for tests.
#[derive(Debug, Default)]
pub struct MemoryStore {
    dataset: RefCell<Dataset>,
    saves: Cell<usize>,
}

impl MemoryStore {
    pub fn new(dataset: Dataset) -> Self {
        Self {
            dataset: RefCell::new(dataset),
            saves: Cell::new(0),
        }
    }

    /// Number of completed saves.
    pub fn saves(&self) -> usize {
        self.saves.get()
    }

    pub fn snapshot(&self) -> Dataset {
        self.dataset.borrow().clone()
    }
}

impl PatientStore for MemoryStore {
    fn load_all_patients(&self) -> Result<Dataset, StorageError> {
        Ok(self.dataset.borrow().clone())
    }

    fn save_all_patients(&self, dataset: &Dataset) -> Result<(), StorageError> {
        *self.dataset.borrow_mut() = dataset.clone();
        self.saves.set(self.saves.get() + 1);
        Ok(())
    }
}
