//! Dispatch of parsed commands to the service layer.

use std::path::{Path, PathBuf};

use jiff::civil::DateTime;
use serde::Serialize;
use serde_json::{Value, json};

use nlghi_core::all_domains;
use nlghi_export::{ReportKind, write_output};
use nlghi_storage::{JsonStore, PatientStore};

use crate::cli::{
    AttachAction, BackupAction, Command, FollowupAction, HistoryAction, NoteAction, ReportArgs,
    SettingsAction,
};
use crate::config::{Settings, load_settings, save_settings};
use crate::service::{NewVisit, Service};

/// What a command prints on stdout.
#[derive(Debug, Clone, PartialEq)]
pub enum Output {
    Json(Value),
    Text(String),
}

impl Output {
    fn json<T: Serialize>(value: &T) -> eyre::Result<Self> {
        Ok(Output::Json(serde_json::to_value(value)?))
    }

    pub fn render(&self) -> eyre::Result<String> {
        match self {
            Output::Json(value) => Ok(serde_json::to_string_pretty(value)?),
            Output::Text(text) => Ok(text.clone()),
        }
    }
}

/// Run one command against the settings at `settings_path`.
pub fn run(command: Command, settings_path: &Path) -> eyre::Result<Output> {
    let mut settings = load_settings(settings_path)?;
    match command {
        Command::Settings { action } => settings_command(action, &mut settings, settings_path),
        Command::Backup { action } => {
            let store = JsonStore::new(settings.store_config())?;
            backup_command(action, &store)
        }
        other => {
            let store = JsonStore::new(settings.store_config())?;
            let service = Service::new(store, settings.operator.clone());
            let now = jiff::Zoned::now().datetime();
            execute(&service, other, &settings.export_dir, now)
        }
    }
}

/// Run a data command through `service`. Settings and backup commands
/// need the concrete file store and go through [`run`] instead.
pub fn execute<S: PatientStore>(
    service: &Service<S>,
    command: Command,
    export_dir: &Path,
    now: DateTime,
) -> eyre::Result<Output> {
    let output = match command {
        Command::Domains => Output::json(&all_domains())?,
        Command::Visit(args) => {
            let visit = NewVisit {
                mcp: args.mcp,
                name: args.name,
                dob: args.dob,
                gender: args.gender,
                session_date: args.date.unwrap_or_else(|| now.date()),
                impairments: args.levels,
            };
            Output::json(&service.record_visit(&visit, now)?)?
        }
        Command::Patients { query } => Output::json(&service.list_patients(&query)?)?,
        Command::Show { mcp } => Output::json(&service.patient(&mcp)?)?,
        Command::Delete { mcp } => {
            service.delete_patient(&mcp)?;
            Output::Json(json!({ "deleted": mcp }))
        }
        Command::Tags { mcp, tags } => Output::json(&service.set_tags(&mcp, &tags)?)?,
        Command::Classify { text, save, mcp } => {
            let save_for = if save { mcp.as_deref() } else { None };
            Output::json(&service.classify_symptoms(&text, save_for, now)?)?
        }
        Command::Series { mcp, field } => Output::json(&service.series(&mcp, field)?)?,
        Command::Heatmap { mcp } => Output::json(&service.heatmap(&mcp)?)?,
        Command::Timeline { mcp } => Output::json(&service.timeline(&mcp)?)?,
        Command::Validate => Output::json(&service.validate()?)?,
        Command::History { action } => history_command(service, action, now)?,
        Command::Note { action } => note_command(service, action, now)?,
        Command::Followup { action } => followup_command(service, action, now)?,
        Command::Attach { action } => attach_command(service, action, now)?,
        Command::Report(args) => report_command(service, args, export_dir)?,
        Command::Backup { .. } | Command::Settings { .. } => {
            return Err(eyre::eyre!("backup and settings commands need the file store"));
        }
    };
    Ok(output)
}

fn index_output(index: usize) -> Output {
    Output::Json(json!({ "index": index }))
}

fn ok_output() -> Output {
    Output::Json(json!({ "ok": true }))
}

fn history_command<S: PatientStore>(
    service: &Service<S>,
    action: HistoryAction,
    now: DateTime,
) -> eyre::Result<Output> {
    Ok(match action {
        HistoryAction::Add { mcp, title, body } => {
            index_output(service.add_history(&mcp, &title, &body, now)?)
        }
        HistoryAction::Update {
            mcp,
            index,
            title,
            body,
        } => {
            service.update_history(&mcp, index, &title, &body, now)?;
            ok_output()
        }
        HistoryAction::Remove { mcp, index } => {
            service.remove_history(&mcp, index)?;
            ok_output()
        }
    })
}

fn note_command<S: PatientStore>(
    service: &Service<S>,
    action: NoteAction,
    now: DateTime,
) -> eyre::Result<Output> {
    Ok(match action {
        NoteAction::Add {
            mcp,
            title,
            body,
            attach_latest,
        } => index_output(service.add_note(&mcp, &title, &body, attach_latest, now)?),
        NoteAction::Update {
            mcp,
            index,
            title,
            body,
            attach_latest,
        } => {
            service.update_note(&mcp, index, &title, &body, attach_latest, now)?;
            ok_output()
        }
        NoteAction::Remove { mcp, index } => {
            service.remove_note(&mcp, index)?;
            ok_output()
        }
    })
}

fn followup_command<S: PatientStore>(
    service: &Service<S>,
    action: FollowupAction,
    now: DateTime,
) -> eyre::Result<Output> {
    Ok(match action {
        FollowupAction::Add {
            mcp,
            title,
            details,
            due,
        } => index_output(service.add_followup(&mcp, &title, &details, due, now)?),
        FollowupAction::Done { mcp, index } => {
            service.complete_followup(&mcp, index, now)?;
            ok_output()
        }
        FollowupAction::Remove { mcp, index } => {
            service.remove_followup(&mcp, index)?;
            ok_output()
        }
    })
}

fn attach_command<S: PatientStore>(
    service: &Service<S>,
    action: AttachAction,
    now: DateTime,
) -> eyre::Result<Output> {
    Ok(match action {
        AttachAction::Add { mcp, path, desc } => {
            index_output(service.add_attachment(&mcp, &path, &desc, now)?)
        }
        AttachAction::Remove { mcp, index } => {
            service.remove_attachment(&mcp, index)?;
            ok_output()
        }
    })
}

fn report_command<S: PatientStore>(
    service: &Service<S>,
    args: ReportArgs,
    export_dir: &Path,
) -> eyre::Result<Output> {
    let kind = ReportKind::from(args.format);
    let body = service.report(&args.mcp, kind)?;
    let Some(out) = args.out else {
        return Ok(Output::Text(body));
    };

    let path = if out.trim().is_empty() {
        export_dir.join(kind.file_name(&args.mcp))
    } else {
        PathBuf::from(out)
    };
    write_output(&path, &body)?;
    Ok(Output::Json(json!({ "written": path.display().to_string() })))
}

fn backup_command(action: BackupAction, store: &JsonStore) -> eyre::Result<Output> {
    Ok(match action {
        BackupAction::Make => {
            let made = store.make_backup()?;
            Output::Json(json!({ "backup": made.map(|p| p.display().to_string()) }))
        }
        BackupAction::List => {
            let paths: Vec<String> = store
                .list_backups()?
                .iter()
                .map(|p| p.display().to_string())
                .collect();
            Output::json(&paths)?
        }
        BackupAction::Restore { path } => {
            store.restore_backup(&path)?;
            Output::Json(json!({ "restored": path.display().to_string() }))
        }
    })
}

fn settings_command(
    action: SettingsAction,
    settings: &mut Settings,
    path: &Path,
) -> eyre::Result<Output> {
    match action {
        SettingsAction::Show => Output::json(&*settings),
        SettingsAction::Set { key, value } => {
            settings.set(&key, &value)?;
            save_settings(path, settings)?;
            Output::json(&*settings)
        }
    }
}
