use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use nlghi_storage::StoreConfig;

/// Current settings version. Bump this when adding fields or changing
/// shape, and add the matching step to [`migrate`].
const CURRENT_VERSION: u32 = 1;

const SETTINGS_FILE: &str = "settings.json";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

/// User preferences. Every field has a default, so a partial file loads.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Schema version. Missing or 0 = file written before versioning.
    pub settings_version: u32,
    pub theme: Theme,
    pub auto_backup: bool,
    pub backup_dir: PathBuf,
    pub backups_to_keep: usize,
    pub export_dir: PathBuf,
    pub data_file: PathBuf,
    /// Name written into audit events.
    pub operator: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            settings_version: CURRENT_VERSION,
            theme: Theme::Light,
            auto_backup: true,
            backup_dir: PathBuf::from("backups"),
            backups_to_keep: 10,
            export_dir: PathBuf::from("exports"),
            data_file: PathBuf::from("nlghi_patient_data.json"),
            operator: "doctor".to_string(),
        }
    }
}

impl Settings {
    pub fn validate(&self) -> eyre::Result<()> {
        if self.backups_to_keep == 0 {
            return Err(eyre::eyre!("backups_to_keep must be at least 1"));
        }
        if self.operator.trim().is_empty() {
            return Err(eyre::eyre!("operator must not be empty"));
        }
        Ok(())
    }

    /// Change one setting by key, parsing `value` for its type.
    pub fn set(&mut self, key: &str, value: &str) -> eyre::Result<()> {
        let value = value.trim();
        match key {
            "theme" => {
                self.theme = match value {
                    "light" => Theme::Light,
                    "dark" => Theme::Dark,
                    other => return Err(eyre::eyre!("unknown theme '{other}' (light or dark)")),
                }
            }
            "auto_backup" => {
                self.auto_backup = value
                    .parse()
                    .map_err(|_| eyre::eyre!("auto_backup must be true or false"))?;
            }
            "backups_to_keep" => {
                self.backups_to_keep = value
                    .parse()
                    .map_err(|_| eyre::eyre!("backups_to_keep must be a positive integer"))?;
            }
            "backup_dir" => self.backup_dir = non_empty_path(value, "backups"),
            "export_dir" => self.export_dir = non_empty_path(value, "exports"),
            "data_file" => self.data_file = non_empty_path(value, "nlghi_patient_data.json"),
            "operator" => self.operator = value.to_string(),
            other => return Err(eyre::eyre!("unknown setting '{other}'")),
        }
        self.validate()
    }

    pub fn store_config(&self) -> StoreConfig {
        StoreConfig {
            data_file: self.data_file.clone(),
            backup_dir: self.backup_dir.clone(),
            backups_to_keep: self.backups_to_keep,
            auto_backup: self.auto_backup,
            operator: self.operator.clone(),
        }
    }
}

fn non_empty_path(value: &str, fallback: &str) -> PathBuf {
    if value.is_empty() {
        PathBuf::from(fallback)
    } else {
        PathBuf::from(value)
    }
}

/// `<platform config dir>/nlghi/settings.json`.
pub fn default_settings_path() -> eyre::Result<PathBuf> {
    let base = dirs::config_dir().ok_or_else(|| eyre::eyre!("no config directory found"))?;
    Ok(base.join("nlghi").join(SETTINGS_FILE))
}

/// Load settings from `path`. A missing file gives the defaults.
pub fn load_settings(path: &Path) -> eyre::Result<Settings> {
    let contents = match std::fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            tracing::debug!(path = %path.display(), "no settings file, using defaults");
            return Ok(Settings::default());
        }
        Err(e) => return Err(eyre::eyre!("failed to read settings at {}: {e}", path.display())),
    };

    // Parse as raw JSON so migrations run before deserializing.
    let json: serde_json::Value = serde_json::from_str(&contents)?;
    let on_disk_version = json
        .get("settings_version")
        .and_then(|v| v.as_u64())
        .unwrap_or(0) as u32;

    let migrated = migrate(json, on_disk_version)?;
    let settings: Settings = serde_json::from_value(migrated)?;
    settings.validate()?;
    Ok(settings)
}

/// Run sequential migrations from `from_version` up to [`CURRENT_VERSION`].
fn migrate(mut json: serde_json::Value, from_version: u32) -> eyre::Result<serde_json::Value> {
    if from_version > CURRENT_VERSION {
        return Err(eyre::eyre!(
            "settings_version {from_version} is newer than this build supports ({CURRENT_VERSION})"
        ));
    }

    // v0 → v1: backups_to_keep was free-form; make it an integer >= 1.
    if from_version < 1 {
        let obj = json
            .as_object_mut()
            .ok_or_else(|| eyre::eyre!("settings file is not a JSON object"))?;
        if let Some(raw) = obj.get("backups_to_keep") {
            let keep = match raw {
                serde_json::Value::Number(n) => n.as_f64(),
                serde_json::Value::String(s) => s.trim().parse::<f64>().ok(),
                _ => None,
            }
            .map(|f| f.max(1.0) as u64)
            .unwrap_or(10);
            obj.insert("backups_to_keep".to_string(), keep.into());
        }
        obj.insert("settings_version".to_string(), 1.into());
        tracing::info!("migrated settings v0 → v1 (normalized backups_to_keep)");
    }

    Ok(json)
}

/// Write settings atomically, owner-only on unix.
pub fn save_settings(path: &Path, settings: &Settings) -> eyre::Result<()> {
    settings.validate()?;
    if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
        std::fs::create_dir_all(dir)?;
    }

    // Always write the current version, regardless of what was loaded.
    let mut stamped = settings.clone();
    stamped.settings_version = CURRENT_VERSION;
    let json = serde_json::to_string_pretty(&stamped)?;

    let mut tmp = path.as_os_str().to_owned();
    tmp.push(".tmp");
    let tmp_path = PathBuf::from(tmp);
    std::fs::write(&tmp_path, json.as_bytes())?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        std::fs::set_permissions(&tmp_path, std::fs::Permissions::from_mode(0o600))?;
    }

    std::fs::rename(&tmp_path, path)?;

    tracing::info!(path = %path.display(), "settings saved");
    Ok(())
}
