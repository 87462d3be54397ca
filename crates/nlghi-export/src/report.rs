//! Patient reports.
//!
//! Each report flattens the patient into a small serializable context and
//! renders one of the templates under `templates/`.

use serde::Serialize;

use nlghi_analytics::timeline;
use nlghi_core::DOMAIN_NAMES;
use nlghi_core::models::patient::Patient;
use nlghi_core::models::visit::scalar_label;

use crate::error::ExportError;
use crate::render::render_template;

const VISIT_SUMMARY: &str = include_str!("../templates/visit_summary.md.tera");
const LIFETIME_SUMMARY: &str = include_str!("../templates/lifetime_summary.md.tera");
const TIMELINE: &str = include_str!("../templates/timeline.md.tera");

#[derive(Serialize)]
struct Header<'a> {
    mcp: &'a str,
    name: &'a str,
    gender: &'a str,
    dob: &'a str,
}

impl<'a> Header<'a> {
    fn new(mcp: &'a str, patient: &'a Patient) -> Self {
        Self {
            mcp,
            name: &patient.name,
            gender: &patient.gender,
            dob: &patient.dob,
        }
    }
}

#[derive(Serialize)]
struct DomainValue {
    name: &'static str,
    value: String,
}

#[derive(Serialize)]
struct VisitSummary<'a> {
    #[serde(flatten)]
    header: Header<'a>,
    session_date: String,
    ghi: String,
    dsavs: Vec<DomainValue>,
}

/// Summary of the latest visit: header, session date, GHI and the DSAV of
/// every domain. A patient with no visits renders `N/A` fields.
pub fn visit_summary(mcp: &str, patient: &Patient) -> Result<String, ExportError> {
    let latest = patient.latest_record();
    let context = VisitSummary {
        header: Header::new(mcp, patient),
        session_date: latest
            .map(|r| r.session_date.clone())
            .unwrap_or_else(|| "N/A".to_string()),
        ghi: latest.map(|r| r.ghi_label()).unwrap_or_else(|| "N/A".to_string()),
        dsavs: latest
            .map(|r| {
                DOMAIN_NAMES
                    .iter()
                    .zip(r.dsav_list())
                    .map(|(&name, value)| DomainValue {
                        name,
                        value: scalar_label(value),
                    })
                    .collect()
            })
            .unwrap_or_default(),
    };
    render_template("visit_summary.md", VISIT_SUMMARY, &context)
}

#[derive(Serialize)]
struct HistoryLine<'a> {
    timestamp: &'a str,
    title: &'a str,
}

#[derive(Serialize)]
struct NoteLine<'a> {
    timestamp: &'a str,
    title: &'a str,
    attach_latest: bool,
}

#[derive(Serialize)]
struct FutureLine<'a> {
    due: &'a str,
    title: &'a str,
    status: &'static str,
}

#[derive(Serialize)]
struct RecordLine<'a> {
    session_date: &'a str,
    ghi: String,
}

#[derive(Serialize)]
struct LifetimeSummary<'a> {
    #[serde(flatten)]
    header: Header<'a>,
    history: Vec<HistoryLine<'a>>,
    notes: Vec<NoteLine<'a>>,
    future_refs: Vec<FutureLine<'a>>,
    records: Vec<RecordLine<'a>>,
}

/// Everything on file for a patient. Empty sections are left out.
pub fn lifetime_summary(mcp: &str, patient: &Patient) -> Result<String, ExportError> {
    let context = LifetimeSummary {
        header: Header::new(mcp, patient),
        history: patient
            .history
            .iter()
            .map(|h| HistoryLine {
                timestamp: &h.timestamp,
                title: &h.title,
            })
            .collect(),
        notes: patient
            .notes
            .iter()
            .map(|n| NoteLine {
                timestamp: &n.timestamp,
                title: &n.title,
                attach_latest: n.attach_latest,
            })
            .collect(),
        future_refs: patient
            .future_refs
            .iter()
            .map(|f| FutureLine {
                due: &f.due,
                title: &f.title,
                status: f.status(),
            })
            .collect(),
        records: patient
            .records
            .iter()
            .map(|r| RecordLine {
                session_date: &r.session_date,
                ghi: r.ghi_label(),
            })
            .collect(),
    };
    render_template("lifetime_summary.md", LIFETIME_SUMMARY, &context)
}

#[derive(Serialize)]
struct EventLine {
    when: String,
    kind: &'static str,
    label: String,
}

#[derive(Serialize)]
struct TimelineReport<'a> {
    #[serde(flatten)]
    header: Header<'a>,
    events: Vec<EventLine>,
}

/// The merged timeline as a Markdown bullet list.
pub fn timeline_markdown(mcp: &str, patient: &Patient) -> Result<String, ExportError> {
    let events = timeline(patient)
        .into_iter()
        .map(|e| EventLine {
            when: e.when,
            kind: e.kind.as_str(),
            label: e.label,
        })
        .collect();
    let context = TimelineReport {
        header: Header::new(mcp, patient),
        events,
    };
    render_template("timeline.md", TIMELINE, &context)
}
