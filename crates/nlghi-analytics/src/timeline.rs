use serde::{Deserialize, Serialize};
use ts_rs::TS;

use nlghi_core::models::patient::Patient;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum EventKind {
    Visit,
    History,
    Note,
    Future,
}

impl EventKind {
    pub fn as_str(self) -> &'static str {
        match self {
            EventKind::Visit => "Visit",
            EventKind::History => "History",
            EventKind::Note => "Note",
            EventKind::Future => "Future",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct TimelineEvent {
    /// Session date, entry timestamp, or due date depending on `kind`.
    pub when: String,
    pub kind: EventKind,
    pub label: String,
}

/// Merge visits, history entries, notes and future references into one
/// list ordered by `when`.
///
/// Ordering is plain string comparison, so it is chronological only for
/// ISO-formatted dates. Events with equal `when` keep source order: visits,
/// history, notes, then future references.
pub fn timeline(patient: &Patient) -> Vec<TimelineEvent> {
    let visits = patient.records.iter().map(|r| TimelineEvent {
        when: r.session_date.clone(),
        kind: EventKind::Visit,
        label: format!("GHI={}", r.ghi_label()),
    });
    let history = patient.history.iter().map(|h| TimelineEvent {
        when: h.timestamp.clone(),
        kind: EventKind::History,
        label: h.title.clone(),
    });
    let notes = patient.notes.iter().map(|n| TimelineEvent {
        when: n.timestamp.clone(),
        kind: EventKind::Note,
        label: n.title.clone(),
    });
    let future = patient.future_refs.iter().map(|f| TimelineEvent {
        when: f.due.clone(),
        kind: EventKind::Future,
        label: format!("{}: {}", f.status(), f.title),
    });

    let mut events: Vec<TimelineEvent> = visits.chain(history).chain(notes).chain(future).collect();
    events.sort_by(|a, b| a.when.cmp(&b.when));
    events
}
