use std::collections::{BTreeMap, BTreeSet};
use std::sync::LazyLock;

use nlghi_core::DOMAIN_COUNT;

use crate::error::LexiconError;

/// Curated symptom phrases, grouped by the domain index they vote for.
const BUILTIN: &[(usize, &[&str])] = &[
    (
        0,
        &[
            "chest pain",
            "angina",
            "palpitations",
            "tachycardia",
            "bradycardia",
            "shortness of breath on exertion",
            "orthopnea",
            "paroxysmal nocturnal dyspnea",
            "edema legs",
            "leg swelling",
            "syncope",
            "fainting",
            "dyspnea on exertion",
            "hypertension",
            "high blood pressure",
            "bp high",
            "heart failure",
            "cyanosis",
        ],
    ),
    (
        1,
        &[
            "cough",
            "productive cough",
            "dry cough",
            "wheeze",
            "wheezing",
            "asthma",
            "breathlessness",
            "shortness of breath",
            "dyspnea",
            "hemoptysis",
            "coughing blood",
            "pneumonia",
            "choking",
        ],
    ),
    (
        2,
        &[
            "headache",
            "migraine",
            "dizziness",
            "vertigo",
            "seizure",
            "fits",
            "weakness one side",
            "hemiplegia",
            "stroke",
            "tremor",
            "parkinsonism",
            "confusion",
            "memory loss",
            "mci",
            "dementia",
            "numbness",
            "tingling",
            "loss of consciousness",
            "blackout",
        ],
    ),
    (
        3,
        &[
            "joint pain",
            "back pain",
            "knee pain",
            "hip pain",
            "fracture",
            "sprain",
            "muscle weakness",
            "stiffness",
            "falls",
            "gait problem",
            "arthritis",
            "osteoporosis",
        ],
    ),
    (
        4,
        &[
            "flank pain",
            "hematuria",
            "blood in urine",
            "urine foamy",
            "edema",
            "reduced urine output",
            "kidney stones",
            "renal colic",
        ],
    ),
    (
        5,
        &[
            "jaundice",
            "yellow eyes",
            "hepatitis",
            "liver disease",
            "ascites",
            "abdominal swelling",
            "pruritus",
            "itching",
            "alcohol use",
        ],
    ),
    (
        6,
        &[
            "abdominal pain",
            "diarrhea",
            "constipation",
            "vomiting",
            "nausea",
            "blood in stool",
            "melena",
            "hematemesis",
            "acid reflux",
            "heartburn",
            "dysphagia",
            "bloating",
            "ibs",
        ],
    ),
    (
        7,
        &[
            "rash",
            "itchy rash",
            "hives",
            "psoriasis",
            "eczema",
            "skin lesion",
            "ulcer",
            "wound",
            "cellulitis",
        ],
    ),
    (
        8,
        &[
            "dysuria",
            "painful urination",
            "frequency urination",
            "urgency",
            "urinary incontinence",
            "pelvic pain",
            "vaginal discharge",
            "erectile dysfunction",
            "testicular pain",
        ],
    ),
    (
        9,
        &[
            "unintentional weight loss",
            "night sweats",
            "lymph node swelling",
            "mass",
            "lump",
            "fatigue cancer",
            "cachexia",
        ],
    ),
    (
        10,
        &[
            "easy bruising",
            "bleeding gums",
            "petechiae",
            "anemia",
            "pallor",
            "thrombosis",
            "clot",
        ],
    ),
    (11, &["family history genetic", "known mutation", "consanguinity"]),
    (
        12,
        &[
            "polyuria",
            "polydipsia",
            "polyphagia",
            "weight gain",
            "weight loss",
            "cold intolerance",
            "heat intolerance",
            "thyroid",
            "diabetes",
            "hyperglycemia",
            "hypoglycemia",
        ],
    ),
    (13, &["recurrent infections", "opportunistic infection", "low immunity"]),
    (
        14,
        &[
            "malnutrition",
            "underweight",
            "scurvy",
            "vitamin deficiency",
            "vitamin d deficiency",
            "b12 deficiency",
        ],
    ),
    (
        15,
        &["autoimmune", "sle", "lupus", "sjogren", "ra", "rheumatoid", "vasculitis"],
    ),
    (
        16,
        &[
            "blurry vision",
            "double vision",
            "eye pain",
            "red eye",
            "conjunctivitis",
            "glaucoma",
            "cataract",
            "vision loss",
        ],
    ),
    (
        17,
        &[
            "ear pain",
            "tinnitus",
            "hearing loss",
            "sore throat",
            "hoarseness",
            "sinusitis",
            "nasal discharge",
            "epistaxis",
        ],
    ),
    (
        18,
        &[
            "depression",
            "anxiety",
            "panic attack",
            "hallucinations",
            "delusions",
            "insomnia",
            "addiction",
            "substance use",
            "suicidal ideation",
        ],
    ),
    (
        19,
        &["toothache", "dental pain", "gum swelling", "oral ulcer", "bad breath"],
    ),
    (
        20,
        &[
            "wheelchair",
            "mobility aid",
            "intellectual disability",
            "autism",
            "adhd",
            "developmental delay",
        ],
    ),
    (
        21,
        &["walker", "cane", "oxygen therapy", "hearing aid", "prosthesis"],
    ),
    (
        22,
        &["lonely", "isolation", "no caregiver", "housing instability"],
    ),
    (23, &["financial stress", "job loss", "low income"]),
    (
        24,
        &["neglect", "physical abuse", "emotional abuse", "financial abuse"],
    ),
    (
        25,
        &[
            "smoking",
            "alcohol",
            "sedentary",
            "high salt",
            "high sugar",
            "obesity",
            "family history heart",
            "family history stroke",
        ],
    ),
    (
        26,
        &["fever", "chills", "fatigue", "malaise", "pain", "weight change"],
    ),
];

static BUILTIN_LEXICON: LazyLock<Lexicon> = LazyLock::new(|| {
    let mut entries: BTreeMap<String, BTreeSet<usize>> = BTreeMap::new();
    for &(domain, phrases) in BUILTIN {
        for phrase in phrases {
            entries.entry(phrase.to_string()).or_default().insert(domain);
        }
    }
    Lexicon { entries }
});

/// Immutable table from lowercase phrase to the domains it votes for.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Lexicon {
    entries: BTreeMap<String, BTreeSet<usize>>,
}

impl Lexicon {
    /// The curated lexicon shipped with the application.
    pub fn builtin() -> &'static Lexicon {
        &BUILTIN_LEXICON
    }

    /// Build a lexicon from `(phrase, domains)` pairs. A phrase listed more
    /// than once votes for the union of its domains.
    pub fn from_entries<I, P, D>(entries: I) -> Result<Self, LexiconError>
    where
        I: IntoIterator<Item = (P, D)>,
        P: AsRef<str>,
        D: IntoIterator<Item = usize>,
    {
        let mut lexicon = Lexicon::default();
        for (phrase, domains) in entries {
            lexicon.insert(phrase.as_ref(), domains)?;
        }
        Ok(lexicon)
    }

    fn insert<D>(&mut self, phrase: &str, domains: D) -> Result<(), LexiconError>
    where
        D: IntoIterator<Item = usize>,
    {
        let phrase = phrase.trim().to_lowercase();
        if phrase.is_empty() {
            return Err(LexiconError::EmptyPhrase);
        }
        let domains: BTreeSet<usize> = domains.into_iter().collect();
        if domains.is_empty() {
            return Err(LexiconError::NoDomain(phrase));
        }
        if let Some(&index) = domains.iter().find(|&&d| d >= DOMAIN_COUNT) {
            return Err(LexiconError::UnknownDomain { phrase, index });
        }
        self.entries.entry(phrase).or_default().extend(domains);
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Domains `phrase` votes for, if it is in the lexicon.
    pub fn domains_for(&self, phrase: &str) -> Option<&BTreeSet<usize>> {
        self.entries.get(phrase)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &BTreeSet<usize>)> {
        self.entries.iter().map(|(p, d)| (p.as_str(), d))
    }
}
