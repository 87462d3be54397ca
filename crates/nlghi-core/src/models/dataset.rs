use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::patient::Patient;

/// Every patient in the system, keyed by MCP number.
///
/// Callers read the whole dataset, change it in memory and hand it back to
/// the persistence layer in one piece.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Dataset {
    patients: BTreeMap<String, Patient>,
}

impl Dataset {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.patients.len()
    }

    pub fn is_empty(&self) -> bool {
        self.patients.is_empty()
    }

    pub fn contains(&self, mcp: &str) -> bool {
        self.patients.contains_key(mcp)
    }

    pub fn get(&self, mcp: &str) -> Option<&Patient> {
        self.patients.get(mcp)
    }

    pub fn get_mut(&mut self, mcp: &str) -> Option<&mut Patient> {
        self.patients.get_mut(mcp)
    }

    pub fn insert(&mut self, mcp: impl Into<String>, patient: Patient) -> Option<Patient> {
        self.patients.insert(mcp.into(), patient)
    }

    pub fn remove_patient(&mut self, mcp: &str) -> Option<Patient> {
        self.patients.remove(mcp)
    }

    /// Return the patient for `mcp`, creating an empty one with the given
    /// name and gender if none exists yet.
    pub fn ensure_patient(&mut self, mcp: &str, name: &str, gender: &str) -> &mut Patient {
        self.patients
            .entry(mcp.to_string())
            .or_insert_with(|| Patient::new(name, "", 0, gender))
    }

    /// Patients in MCP order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Patient)> {
        self.patients.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn mcps(&self) -> impl Iterator<Item = &str> {
        self.patients.keys().map(String::as_str)
    }

    /// MCPs of patients matching `query` (see [`Patient::matches_query`]).
    pub fn search(&self, query: &str) -> Vec<&str> {
        self.iter()
            .filter(|(mcp, p)| p.matches_query(mcp, query))
            .map(|(mcp, _)| mcp)
            .collect()
    }

    pub fn record_count(&self) -> usize {
        self.patients.values().map(|p| p.records.len()).sum()
    }
}

impl FromIterator<(String, Patient)> for Dataset {
    fn from_iter<I: IntoIterator<Item = (String, Patient)>>(iter: I) -> Self {
        Self {
            patients: iter.into_iter().collect(),
        }
    }
}
