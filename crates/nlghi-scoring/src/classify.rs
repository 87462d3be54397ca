use std::collections::BTreeSet;

use nlghi_core::models::classification::{ClassificationResult, DomainSuggestion};
use nlghi_core::{DOMAIN_COUNT, DOMAIN_NAMES};

use crate::lexicon::Lexicon;

/// Classify free text against the built-in lexicon.
pub fn classify(text: &str) -> ClassificationResult {
    Lexicon::builtin().classify(text)
}

impl Lexicon {
    /// Match every phrase as a plain substring of the trimmed, lowercased
    /// text and tally one vote per matched phrase for each of its domains.
    ///
    /// Suggestions are ordered by votes, highest first; equal counts keep
    /// domain index order. No match gives an empty result.
    pub fn classify(&self, text: &str) -> ClassificationResult {
        let normalized = text.trim().to_lowercase();

        let mut keywords = BTreeSet::new();
        let mut votes = [0u32; DOMAIN_COUNT];
        for (phrase, domains) in self.iter() {
            if normalized.contains(phrase) {
                keywords.insert(phrase.to_string());
                for &d in domains {
                    votes[d] += 1;
                }
            }
        }

        let mut suggestions: Vec<DomainSuggestion> = votes
            .iter()
            .enumerate()
            .filter(|(_, count)| **count > 0)
            .map(|(domain_index, &vote_count)| DomainSuggestion {
                domain_index,
                domain_name: DOMAIN_NAMES[domain_index].to_string(),
                vote_count,
            })
            .collect();
        // stable: ties stay in domain order
        suggestions.sort_by(|a, b| b.vote_count.cmp(&a.vote_count));

        ClassificationResult {
            keywords_found: keywords.into_iter().collect(),
            suggestions,
        }
    }
}
