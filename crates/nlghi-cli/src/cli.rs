use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use jiff::civil::Date;

use nlghi_analytics::RecordField;
use nlghi_export::ReportKind;

/// Geriatric health index records from the command line.
///
/// Results are printed to stdout as JSON, except reports which print as
/// text. Logs go to stderr.
#[derive(Debug, Parser)]
#[command(name = "nlghi", version, about)]
pub struct Cli {
    /// Settings file. Defaults to `<config dir>/nlghi/settings.json`.
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Emit logs as JSON lines.
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// List the 27 domains with their weights.
    Domains,
    /// Score a visit and save it.
    Visit(VisitArgs),
    /// List patients, optionally filtered by MCP, name or tag.
    Patients {
        #[arg(long, default_value = "")]
        query: String,
    },
    /// Print one patient's full record.
    Show { mcp: String },
    /// Delete a patient and everything attached to it.
    Delete { mcp: String },
    /// Replace a patient's tags.
    Tags {
        mcp: String,
        /// Comma-separated tags. Empty clears them.
        #[arg(value_delimiter = ',')]
        tags: Vec<String>,
    },
    /// Suggest domains for free-text symptoms.
    Classify {
        text: String,
        /// Store the result as a symptom snapshot.
        #[arg(long, requires = "mcp")]
        save: bool,
        #[arg(long)]
        mcp: Option<String>,
    },
    /// One value per visit, e.g. `ghi`, `dsav-total`, `dsav:3`.
    Series {
        #[arg(long)]
        mcp: String,
        #[arg(long, default_value = "ghi")]
        field: RecordField,
    },
    /// DSAV grid, domains by session.
    Heatmap { mcp: String },
    /// Visits, history, notes and future references in date order.
    Timeline { mcp: String },
    /// Report stored records whose scores do not add up.
    Validate,
    History {
        #[command(subcommand)]
        action: HistoryAction,
    },
    Note {
        #[command(subcommand)]
        action: NoteAction,
    },
    /// Future references (follow-ups).
    Followup {
        #[command(subcommand)]
        action: FollowupAction,
    },
    /// File references. Files are never read or copied.
    Attach {
        #[command(subcommand)]
        action: AttachAction,
    },
    Report(ReportArgs),
    Backup {
        #[command(subcommand)]
        action: BackupAction,
    },
    Settings {
        #[command(subcommand)]
        action: SettingsAction,
    },
}

#[derive(Debug, Args)]
pub struct VisitArgs {
    #[arg(long)]
    pub mcp: String,
    #[arg(long, default_value = "")]
    pub name: String,
    #[arg(long)]
    pub dob: Option<Date>,
    #[arg(long, default_value = "")]
    pub gender: String,
    /// Session date; today when omitted.
    #[arg(long)]
    pub date: Option<Date>,
    /// 27 comma-separated levels in domain order.
    #[arg(long, value_delimiter = ',', required = true, allow_negative_numbers = true)]
    pub levels: Vec<i64>,
}

#[derive(Debug, Subcommand)]
pub enum HistoryAction {
    Add {
        #[arg(long)]
        mcp: String,
        #[arg(long, default_value = "")]
        title: String,
        #[arg(long)]
        body: String,
    },
    Update {
        #[arg(long)]
        mcp: String,
        #[arg(long)]
        index: usize,
        #[arg(long, default_value = "")]
        title: String,
        #[arg(long)]
        body: String,
    },
    Remove {
        #[arg(long)]
        mcp: String,
        #[arg(long)]
        index: usize,
    },
}

#[derive(Debug, Subcommand)]
pub enum NoteAction {
    Add {
        #[arg(long)]
        mcp: String,
        #[arg(long, default_value = "")]
        title: String,
        #[arg(long)]
        body: String,
        /// Link the note to the latest visit.
        #[arg(long)]
        attach_latest: bool,
    },
    Update {
        #[arg(long)]
        mcp: String,
        #[arg(long)]
        index: usize,
        #[arg(long, default_value = "")]
        title: String,
        #[arg(long)]
        body: String,
        #[arg(long)]
        attach_latest: bool,
    },
    Remove {
        #[arg(long)]
        mcp: String,
        #[arg(long)]
        index: usize,
    },
}

#[derive(Debug, Subcommand)]
pub enum FollowupAction {
    Add {
        #[arg(long)]
        mcp: String,
        #[arg(long, default_value = "")]
        title: String,
        #[arg(long, default_value = "")]
        details: String,
        #[arg(long)]
        due: Date,
    },
    Done {
        #[arg(long)]
        mcp: String,
        #[arg(long)]
        index: usize,
    },
    Remove {
        #[arg(long)]
        mcp: String,
        #[arg(long)]
        index: usize,
    },
}

#[derive(Debug, Subcommand)]
pub enum AttachAction {
    Add {
        #[arg(long)]
        mcp: String,
        #[arg(long)]
        path: String,
        #[arg(long, default_value = "")]
        desc: String,
    },
    Remove {
        #[arg(long)]
        mcp: String,
        #[arg(long)]
        index: usize,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ReportFormat {
    Visit,
    Lifetime,
    Timeline,
    Csv,
}

impl From<ReportFormat> for ReportKind {
    fn from(format: ReportFormat) -> Self {
        match format {
            ReportFormat::Visit => ReportKind::Visit,
            ReportFormat::Lifetime => ReportKind::Lifetime,
            ReportFormat::Timeline => ReportKind::Timeline,
            ReportFormat::Csv => ReportKind::Csv,
        }
    }
}

#[derive(Debug, Args)]
pub struct ReportArgs {
    #[arg(value_enum)]
    pub format: ReportFormat,
    #[arg(long)]
    pub mcp: String,
    /// Write to a file instead of stdout. Without a path, writes to the
    /// export directory under the default name.
    #[arg(long, num_args = 0..=1, default_missing_value = "")]
    pub out: Option<String>,
}

#[derive(Debug, Subcommand)]
pub enum BackupAction {
    /// Back up the data file now.
    Make,
    List,
    /// Replace the data file with a backup.
    Restore { path: PathBuf },
}

#[derive(Debug, Subcommand)]
pub enum SettingsAction {
    Show,
    /// Change one setting, e.g. `set backups_to_keep 5`.
    Set { key: String, value: String },
}
