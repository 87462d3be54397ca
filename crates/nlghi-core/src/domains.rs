use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Number of clinical domains every visit is scored across.
pub const DOMAIN_COUNT: usize = 27;

/// Display names, ordered by domain index.
pub const DOMAIN_NAMES: [&str; DOMAIN_COUNT] = [
    "Cardiovascular",
    "Respiratory/Cardiopulmonary",
    "Neurological/Neurodegenerative/Brain Injury",
    "Musculoskeletal/Physical Trauma",
    "Renal",
    "Hepatic",
    "Gastrointestinal",
    "Dermatologic",
    "Urogenital and Reproductive",
    "Oncologic",
    "Hematologic",
    "Genetic/Hereditary",
    "Endocrinologic",
    "Immunodeficiency",
    "Nutritional deficiency",
    "Autoimmune",
    "Opthalmic",
    "Otolaryngologic",
    "Psychiatric/Psychological/Mental/Behavioral",
    "Oral/Dental",
    "Disability - Physical/Mental/Neurodevelopmental",
    "Dependence on Supportive Aids",
    "Social well-being",
    "Economic well-being",
    "Abuse/Neglect",
    "Risk factors",
    "Other",
];

/// Severity weight of each domain (1–5), parallel to [`DOMAIN_NAMES`].
pub const DOMAIN_WEIGHTS: [u32; DOMAIN_COUNT] = [
    5, 5, 5, 4, 4, 4, 4, 3, 3, 5, 4, 1, 2, 2, 2, 2, 2, 2, 2, 2, 1, 1, 1, 5, 3, 1, 1,
];

/// One entry of the domain registry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Domain {
    pub index: usize,
    pub name: String,
    pub weight: u32,
}

/// Return the full registry in index order.
pub fn all_domains() -> Vec<Domain> {
    (0..DOMAIN_COUNT).filter_map(get_domain).collect()
}

/// Look up a domain by index.
pub fn get_domain(index: usize) -> Option<Domain> {
    let name = DOMAIN_NAMES.get(index)?;
    Some(Domain {
        index,
        name: name.to_string(),
        weight: DOMAIN_WEIGHTS[index],
    })
}

/// Display name for `index`, or `None` past the end of the registry.
pub fn domain_name(index: usize) -> Option<&'static str> {
    DOMAIN_NAMES.get(index).copied()
}

/// Sum of all domain weights.
pub fn total_weight() -> u32 {
    DOMAIN_WEIGHTS.iter().sum()
}
