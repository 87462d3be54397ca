//! Operations behind every command.
//!
//! Each mutation reads the whole dataset, changes it in memory and writes
//! it back through the [`PatientStore`]. Data-changing operations emit an
//! audit event naming the operator.

use jiff::civil::{Date, DateTime};
use serde::Serialize;
use serde_json::Value;

use nlghi_analytics::{
    Heatmap, RecordField, SeriesPoint, TimelineEvent, ValidationReport, heatmap_matrix, series,
    timeline, validate,
};
use nlghi_core::CoreError;
use nlghi_core::models::classification::ClassificationResult;
use nlghi_core::models::dataset::Dataset;
use nlghi_core::models::patient::Patient;
use nlghi_core::time::{age_on, format_date, format_timestamp};
use nlghi_export::{ReportKind, lifetime_summary, records_csv, timeline_markdown, visit_summary};
use nlghi_scoring::{SeverityScore, classify, compute};
use nlghi_storage::PatientStore;

use crate::error::ServiceError;

/// Input for one visit submission.
#[derive(Debug, Clone)]
pub struct NewVisit {
    pub mcp: String,
    pub name: String,
    pub dob: Option<Date>,
    pub gender: String,
    pub session_date: Date,
    /// One level per domain, in domain order.
    pub impairments: Vec<i64>,
}

/// One line of the patient registry.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PatientSummary {
    pub mcp: String,
    pub name: String,
    pub gender: String,
    pub dob: String,
    pub age: Option<i64>,
    pub visits: usize,
    pub latest_ghi: Value,
    pub tags: Vec<String>,
}

impl PatientSummary {
    fn new(mcp: &str, patient: &Patient) -> Self {
        Self {
            mcp: mcp.to_string(),
            name: patient.name.clone(),
            gender: patient.gender.clone(),
            dob: patient.dob.clone(),
            age: patient.age_years(),
            visits: patient.records.len(),
            latest_ghi: patient
                .latest_record()
                .and_then(|r| r.ghi.clone())
                .unwrap_or(Value::Null),
            tags: patient.tags.clone(),
        }
    }
}

/// Score a visit and append it to the patient, creating the patient first
/// if the MCP is new.
///
/// Scoring happens before the dataset is touched, so an invalid vector
/// leaves it unchanged. Demographics of an existing patient are kept.
pub fn record_visit(
    dataset: &mut Dataset,
    visit: &NewVisit,
    now: DateTime,
) -> Result<SeverityScore, ServiceError> {
    let mcp = visit.mcp.trim();
    if mcp.is_empty() {
        return Err(CoreError::MissingField("mcp".to_string()).into());
    }
    let score = compute(visit.impairments.as_slice())?;

    if !dataset.contains(mcp) {
        let (dob, age) = match visit.dob {
            Some(dob) => (format_date(dob), age_on(dob, now.date())),
            None => (String::new(), 0),
        };
        dataset.insert(
            mcp,
            Patient::new(visit.name.trim(), &dob, age, visit.gender.trim()),
        );
    }
    let patient = dataset
        .get_mut(mcp)
        .ok_or_else(|| CoreError::PatientNotFound(mcp.to_string()))?;

    patient.append_record(
        score
            .clone()
            .into_record(format_timestamp(now), format_date(visit.session_date)),
    );
    Ok(score)
}

pub struct Service<S> {
    store: S,
    operator: String,
}

impl<S: PatientStore> Service<S> {
    pub fn new(store: S, operator: impl Into<String>) -> Self {
        Self {
            store,
            operator: operator.into(),
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    fn load(&self) -> Result<Dataset, ServiceError> {
        Ok(self.store.load_all_patients()?)
    }

    fn load_patient(&self, mcp: &str) -> Result<Patient, ServiceError> {
        let mut dataset = self.load()?;
        dataset
            .remove_patient(mcp)
            .ok_or_else(|| CoreError::PatientNotFound(mcp.to_string()).into())
    }

    /// Load, apply `change` to one patient, save.
    fn update_patient<T>(
        &self,
        mcp: &str,
        change: impl FnOnce(&mut Patient) -> Result<T, CoreError>,
    ) -> Result<T, ServiceError> {
        let mut dataset = self.load()?;
        let patient = dataset
            .get_mut(mcp)
            .ok_or_else(|| CoreError::PatientNotFound(mcp.to_string()))?;
        let out = change(patient)?;
        self.store.save_all_patients(&dataset)?;
        Ok(out)
    }

    fn audit(&self, action: &str, mcp: &str) {
        tracing::info!(target: "audit", operator = %self.operator, mcp = %mcp, "{action}");
    }

    // Patients

    pub fn record_visit(&self, visit: &NewVisit, now: DateTime) -> Result<SeverityScore, ServiceError> {
        let mut dataset = self.load()?;
        let score = record_visit(&mut dataset, visit, now)?;
        self.store.save_all_patients(&dataset)?;
        self.audit(&format!("saved record for MCP={}", visit.mcp.trim()), visit.mcp.trim());
        Ok(score)
    }

    pub fn list_patients(&self, query: &str) -> Result<Vec<PatientSummary>, ServiceError> {
        let dataset = self.load()?;
        Ok(dataset
            .search(query)
            .into_iter()
            .filter_map(|mcp| dataset.get(mcp).map(|p| PatientSummary::new(mcp, p)))
            .collect())
    }

    pub fn patient(&self, mcp: &str) -> Result<Patient, ServiceError> {
        self.load_patient(mcp)
    }

    /// Remove the patient and everything attached to it.
    pub fn delete_patient(&self, mcp: &str) -> Result<Patient, ServiceError> {
        let mut dataset = self.load()?;
        let removed = dataset
            .remove_patient(mcp)
            .ok_or_else(|| CoreError::PatientNotFound(mcp.to_string()))?;
        self.store.save_all_patients(&dataset)?;
        self.audit(&format!("deleted patient MCP={mcp}"), mcp);
        Ok(removed)
    }

    pub fn set_tags(&self, mcp: &str, tags: &[String]) -> Result<Vec<String>, ServiceError> {
        let tags = self.update_patient(mcp, |p| {
            p.set_tags(tags);
            Ok(p.tags.clone())
        })?;
        self.audit(&format!("updated tags for MCP={mcp}"), mcp);
        Ok(tags)
    }

    /// Classify `text`. With `save_for`, the result is also stored as a
    /// symptom snapshot on that patient.
    pub fn classify_symptoms(
        &self,
        text: &str,
        save_for: Option<&str>,
        now: DateTime,
    ) -> Result<ClassificationResult, ServiceError> {
        let result = classify(text);
        if let Some(mcp) = save_for {
            let saved = result.clone();
            self.update_patient(mcp, |p| p.add_symptom_snapshot(text, saved, now))?;
            self.audit(&format!("saved symptom snapshot for MCP={mcp}"), mcp);
        }
        Ok(result)
    }

    // History

    pub fn add_history(&self, mcp: &str, title: &str, body: &str, now: DateTime) -> Result<usize, ServiceError> {
        let index = self.update_patient(mcp, |p| p.add_history(title, body, now))?;
        self.audit(&format!("added history entry for MCP={mcp}"), mcp);
        Ok(index)
    }

    pub fn update_history(
        &self,
        mcp: &str,
        index: usize,
        title: &str,
        body: &str,
        now: DateTime,
    ) -> Result<(), ServiceError> {
        self.update_patient(mcp, |p| p.update_history(index, title, body, now))?;
        self.audit(&format!("edited history entry {index} for MCP={mcp}"), mcp);
        Ok(())
    }

    pub fn remove_history(&self, mcp: &str, index: usize) -> Result<(), ServiceError> {
        self.update_patient(mcp, |p| p.remove_history(index))?;
        self.audit(&format!("removed history entry {index} for MCP={mcp}"), mcp);
        Ok(())
    }

    // Notes

    pub fn add_note(
        &self,
        mcp: &str,
        title: &str,
        body: &str,
        attach_latest: bool,
        now: DateTime,
    ) -> Result<usize, ServiceError> {
        let index = self.update_patient(mcp, |p| p.add_note(title, body, attach_latest, now))?;
        self.audit(&format!("added note for MCP={mcp}"), mcp);
        Ok(index)
    }

    pub fn update_note(
        &self,
        mcp: &str,
        index: usize,
        title: &str,
        body: &str,
        attach_latest: bool,
        now: DateTime,
    ) -> Result<(), ServiceError> {
        self.update_patient(mcp, |p| p.update_note(index, title, body, attach_latest, now))?;
        self.audit(&format!("edited note {index} for MCP={mcp}"), mcp);
        Ok(())
    }

    pub fn remove_note(&self, mcp: &str, index: usize) -> Result<(), ServiceError> {
        self.update_patient(mcp, |p| p.remove_note(index))?;
        self.audit(&format!("removed note {index} for MCP={mcp}"), mcp);
        Ok(())
    }

    // Future references

    pub fn add_followup(
        &self,
        mcp: &str,
        title: &str,
        details: &str,
        due: Date,
        now: DateTime,
    ) -> Result<usize, ServiceError> {
        let index = self.update_patient(mcp, |p| Ok(p.add_future_ref(title, details, due, now)))?;
        self.audit(&format!("added future reference for MCP={mcp}"), mcp);
        Ok(index)
    }

    pub fn complete_followup(&self, mcp: &str, index: usize, now: DateTime) -> Result<(), ServiceError> {
        self.update_patient(mcp, |p| p.mark_future_ref_done(index, now))?;
        self.audit(&format!("marked future reference {index} done for MCP={mcp}"), mcp);
        Ok(())
    }

    pub fn remove_followup(&self, mcp: &str, index: usize) -> Result<(), ServiceError> {
        self.update_patient(mcp, |p| p.remove_future_ref(index))?;
        self.audit(&format!("removed future reference {index} for MCP={mcp}"), mcp);
        Ok(())
    }

    // Attachments

    pub fn add_attachment(
        &self,
        mcp: &str,
        path: &str,
        description: &str,
        now: DateTime,
    ) -> Result<usize, ServiceError> {
        let index = self.update_patient(mcp, |p| p.add_attachment(path, description, now))?;
        self.audit(&format!("attached {path} for MCP={mcp}"), mcp);
        Ok(index)
    }

    pub fn remove_attachment(&self, mcp: &str, index: usize) -> Result<(), ServiceError> {
        self.update_patient(mcp, |p| p.remove_attachment(index))?;
        self.audit(&format!("removed attachment {index} for MCP={mcp}"), mcp);
        Ok(())
    }

    // Read-only views

    pub fn series(&self, mcp: &str, field: RecordField) -> Result<Vec<SeriesPoint>, ServiceError> {
        Ok(series(&self.load_patient(mcp)?, field))
    }

    pub fn heatmap(&self, mcp: &str) -> Result<Heatmap, ServiceError> {
        Ok(heatmap_matrix(&self.load_patient(mcp)?))
    }

    pub fn timeline(&self, mcp: &str) -> Result<Vec<TimelineEvent>, ServiceError> {
        Ok(timeline(&self.load_patient(mcp)?))
    }

    pub fn validate(&self) -> Result<ValidationReport, ServiceError> {
        Ok(validate(&self.load()?))
    }

    pub fn report(&self, mcp: &str, kind: ReportKind) -> Result<String, ServiceError> {
        let patient = self.load_patient(mcp)?;
        let body = match kind {
            ReportKind::Visit => visit_summary(mcp, &patient)?,
            ReportKind::Lifetime => lifetime_summary(mcp, &patient)?,
            ReportKind::Timeline => timeline_markdown(mcp, &patient)?,
            ReportKind::Csv => records_csv(mcp, &patient)?,
        };
        Ok(body)
    }
}
