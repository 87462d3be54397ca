use jiff::civil::{Date, DateTime};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use ts_rs::TS;

use super::attachment::Attachment;
use super::classification::ClassificationResult;
use super::future_ref::FutureRef;
use super::history::HistoryEntry;
use super::note::Note;
use super::snapshot::SymptomSnapshot;
use super::visit::{VisitRecord, coerce_i64, present};
use crate::error::CoreError;
use crate::time::{format_date, format_timestamp};

const UNTITLED: &str = "(untitled)";

/// A patient and everything recorded about them. Keyed externally by MCP
/// number; see [`super::dataset::Dataset`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Patient {
    #[serde(default)]
    pub name: String,
    /// Date of birth (`YYYY-MM-DD`), empty when unknown.
    #[serde(default)]
    pub dob: String,
    /// Age in years as stored. Kept raw; see [`Patient::age_years`].
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub age: Option<Value>,
    #[serde(default)]
    pub gender: String,
    /// Visits in entry order, which need not be session-date order.
    #[serde(default)]
    pub records: Vec<VisitRecord>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub history: Vec<HistoryEntry>,
    #[serde(default)]
    pub notes: Vec<Note>,
    #[serde(default)]
    pub future_refs: Vec<FutureRef>,
    #[serde(default)]
    pub symptom_snapshots: Vec<SymptomSnapshot>,
    #[serde(default)]
    pub attachments: Vec<Attachment>,
    #[serde(flatten)]
    #[ts(skip)]
    pub extra: Map<String, Value>,
}

impl Patient {
    pub fn new(name: &str, dob: &str, age: i64, gender: &str) -> Self {
        Self {
            name: name.to_string(),
            dob: dob.to_string(),
            age: Some(Value::from(age)),
            gender: gender.to_string(),
            ..Self::default()
        }
    }

    /// Stored age as whole years: integers, integral floats and integer
    /// strings.
    pub fn age_years(&self) -> Option<i64> {
        self.age.as_ref().and_then(coerce_i64)
    }

    pub fn latest_record(&self) -> Option<&VisitRecord> {
        self.records.last()
    }

    /// Visits are append-only.
    pub fn append_record(&mut self, record: VisitRecord) {
        self.records.push(record);
    }

    /// Replace the tag set. Tags are trimmed, empties dropped, and the
    /// result kept sorted and unique.
    pub fn set_tags<I, S>(&mut self, tags: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut cleaned: Vec<String> = tags
            .into_iter()
            .map(|t| t.as_ref().trim().to_string())
            .filter(|t| !t.is_empty())
            .collect();
        cleaned.sort();
        cleaned.dedup();
        self.tags = cleaned;
    }

    /// Case-insensitive match of `query` against the MCP, the name, or the
    /// joined tag list. An empty query matches every patient.
    pub fn matches_query(&self, mcp: &str, query: &str) -> bool {
        let q = query.trim().to_lowercase();
        if q.is_empty() {
            return true;
        }
        mcp.to_lowercase().contains(&q)
            || self.name.to_lowercase().contains(&q)
            || self.tags.join(",").to_lowercase().contains(&q)
    }

    // History

    pub fn add_history(&mut self, title: &str, body: &str, at: DateTime) -> Result<usize, CoreError> {
        let body = required_body(body)?;
        self.history.push(HistoryEntry {
            title: title_or_untitled(title),
            body,
            timestamp: format_timestamp(at),
            edited_at: None,
            extra: Map::new(),
        });
        Ok(self.history.len() - 1)
    }

    pub fn update_history(
        &mut self,
        index: usize,
        title: &str,
        body: &str,
        at: DateTime,
    ) -> Result<(), CoreError> {
        let body = required_body(body)?;
        let entry = self
            .history
            .get_mut(index)
            .ok_or(CoreError::EntryNotFound { kind: "history", index })?;
        entry.title = title_or_untitled(title);
        entry.body = body;
        entry.edited_at = Some(format_timestamp(at));
        Ok(())
    }

    pub fn remove_history(&mut self, index: usize) -> Result<HistoryEntry, CoreError> {
        take(&mut self.history, index, "history")
    }

    // Notes

    /// Add a note. With `attach_latest`, the note remembers the session
    /// date of the current latest visit (if any).
    pub fn add_note(
        &mut self,
        title: &str,
        body: &str,
        attach_latest: bool,
        at: DateTime,
    ) -> Result<usize, CoreError> {
        let body = required_body(body)?;
        let context_session_date = if attach_latest {
            self.latest_record().map(|r| r.session_date.clone())
        } else {
            None
        };
        self.notes.push(Note {
            title: title_or_untitled(title),
            body,
            attach_latest,
            context_session_date,
            timestamp: format_timestamp(at),
            edited_at: None,
            extra: Map::new(),
        });
        Ok(self.notes.len() - 1)
    }

    pub fn update_note(
        &mut self,
        index: usize,
        title: &str,
        body: &str,
        attach_latest: bool,
        at: DateTime,
    ) -> Result<(), CoreError> {
        let body = required_body(body)?;
        let note = self
            .notes
            .get_mut(index)
            .ok_or(CoreError::EntryNotFound { kind: "note", index })?;
        note.title = title_or_untitled(title);
        note.body = body;
        note.attach_latest = attach_latest;
        note.edited_at = Some(format_timestamp(at));
        Ok(())
    }

    pub fn remove_note(&mut self, index: usize) -> Result<Note, CoreError> {
        take(&mut self.notes, index, "note")
    }

    // Future references

    pub fn add_future_ref(&mut self, title: &str, details: &str, due: Date, at: DateTime) -> usize {
        self.future_refs.push(FutureRef {
            title: title_or_untitled(title),
            details: details.trim().to_string(),
            due: format_date(due),
            done: false,
            timestamp: format_timestamp(at),
            done_at: None,
            extra: Map::new(),
        });
        self.future_refs.len() - 1
    }

    pub fn mark_future_ref_done(&mut self, index: usize, at: DateTime) -> Result<(), CoreError> {
        let item = self
            .future_refs
            .get_mut(index)
            .ok_or(CoreError::EntryNotFound { kind: "future reference", index })?;
        item.done = true;
        item.done_at = Some(format_timestamp(at));
        Ok(())
    }

    pub fn remove_future_ref(&mut self, index: usize) -> Result<FutureRef, CoreError> {
        take(&mut self.future_refs, index, "future reference")
    }

    // Symptom snapshots

    pub fn add_symptom_snapshot(
        &mut self,
        text: &str,
        result: ClassificationResult,
        at: DateTime,
    ) -> Result<usize, CoreError> {
        let text = text.trim();
        if text.is_empty() {
            return Err(CoreError::MissingField("text".to_string()));
        }
        self.symptom_snapshots.push(SymptomSnapshot {
            text: text.to_string(),
            result,
            timestamp: format_timestamp(at),
            extra: Map::new(),
        });
        Ok(self.symptom_snapshots.len() - 1)
    }

    // Attachments

    pub fn add_attachment(
        &mut self,
        path: &str,
        description: &str,
        at: DateTime,
    ) -> Result<usize, CoreError> {
        if path.trim().is_empty() {
            return Err(CoreError::MissingField("path".to_string()));
        }
        self.attachments.push(Attachment {
            path: path.to_string(),
            description: description.to_string(),
            timestamp: format_timestamp(at),
            extra: Map::new(),
        });
        Ok(self.attachments.len() - 1)
    }

    pub fn remove_attachment(&mut self, index: usize) -> Result<Attachment, CoreError> {
        take(&mut self.attachments, index, "attachment")
    }
}

fn title_or_untitled(title: &str) -> String {
    let title = title.trim();
    if title.is_empty() {
        UNTITLED.to_string()
    } else {
        title.to_string()
    }
}

fn required_body(body: &str) -> Result<String, CoreError> {
    let body = body.trim();
    if body.is_empty() {
        return Err(CoreError::MissingField("body".to_string()));
    }
    Ok(body.to_string())
}

fn take<T>(items: &mut Vec<T>, index: usize, kind: &'static str) -> Result<T, CoreError> {
    if index < items.len() {
        Ok(items.remove(index))
    } else {
        Err(CoreError::EntryNotFound { kind, index })
    }
}
