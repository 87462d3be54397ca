use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Advisory output of the keyword classifier. Never applied to a visit's
/// impairment levels automatically.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ClassificationResult {
    /// Matched lexicon phrases, sorted and de-duplicated.
    #[serde(default)]
    pub keywords_found: Vec<String>,
    /// Domains with at least one vote, most votes first.
    #[serde(default)]
    pub suggestions: Vec<DomainSuggestion>,
}

impl ClassificationResult {
    pub fn is_empty(&self) -> bool {
        self.keywords_found.is_empty() && self.suggestions.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct DomainSuggestion {
    pub domain_index: usize,
    pub domain_name: String,
    #[serde(rename = "votes")]
    pub vote_count: u32,
}
