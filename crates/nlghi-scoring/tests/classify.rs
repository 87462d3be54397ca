use nlghi_scoring::classify;
use nlghi_scoring::lexicon::Lexicon;
use nlghi_scoring::LexiconError;

fn suggested(text: &str) -> Vec<(usize, u32)> {
    classify(text)
        .suggestions
        .iter()
        .map(|s| (s.domain_index, s.vote_count))
        .collect()
}

#[test]
fn no_lexicon_phrase_gives_empty_result() {
    let result = classify("patient feels fine today");
    assert!(result.keywords_found.is_empty());
    assert!(result.suggestions.is_empty());
    assert!(result.is_empty());
    assert!(classify("").is_empty());
}

#[test]
fn chest_pain_and_shortness_of_breath() {
    let result = classify("chest pain and shortness of breath");
    assert_eq!(
        result.keywords_found,
        vec!["chest pain", "pain", "shortness of breath"]
    );
    // equal votes keep domain order
    assert_eq!(suggested("chest pain and shortness of breath"), vec![(0, 1), (1, 1), (26, 1)]);
    assert_eq!(result.suggestions[0].domain_name, "Cardiovascular");
}

#[test]
fn input_is_trimmed_and_lowercased() {
    let result = classify("  Severe HEADACHE with dizziness and nausea  ");
    assert_eq!(result.keywords_found, vec!["dizziness", "headache", "nausea"]);
    assert_eq!(suggested("  Severe HEADACHE with dizziness and nausea  "), vec![(2, 2), (6, 1)]);
}

#[test]
fn more_votes_rank_first() {
    assert_eq!(suggested("depression and insomnia, smoking"), vec![(18, 2), (25, 1)]);
    assert_eq!(suggested("fever chills malaise"), vec![(26, 3)]);
}

#[test]
fn overlapping_phrases_both_match() {
    let result = classify("leg swelling and edema");
    assert_eq!(result.keywords_found, vec!["edema", "leg swelling"]);
    assert_eq!(suggested("leg swelling and edema"), vec![(0, 1), (4, 1)]);
}

#[test]
fn repeated_phrase_counts_once() {
    assert_eq!(suggested("cough cough cough"), vec![(1, 1)]);
}

#[test]
fn classification_is_idempotent() {
    let text = "wheelchair user, lonely, financial stress";
    assert_eq!(classify(text), classify(text));
    assert_eq!(suggested(text), vec![(20, 1), (22, 1), (23, 1)]);
}

#[test]
fn builtin_lexicon_size() {
    assert_eq!(Lexicon::builtin().len(), 220);
    let domains = Lexicon::builtin().domains_for("heartburn").unwrap();
    assert_eq!(domains.iter().copied().collect::<Vec<_>>(), vec![6]);
}

#[test]
fn phrase_may_vote_for_several_domains() {
    let lexicon = Lexicon::from_entries([
        ("falls", vec![3]),
        ("Falls", vec![20]),
        ("confusion", vec![2, 18]),
    ])
    .unwrap();
    assert_eq!(lexicon.len(), 2);

    let result = lexicon.classify("recent falls and confusion");
    let votes: Vec<(usize, u32)> = result
        .suggestions
        .iter()
        .map(|s| (s.domain_index, s.vote_count))
        .collect();
    assert_eq!(votes, vec![(2, 1), (3, 1), (18, 1), (20, 1)]);
}

#[test]
fn custom_lexicon_is_validated() {
    assert_eq!(
        Lexicon::from_entries([("  ", vec![1])]).unwrap_err(),
        LexiconError::EmptyPhrase
    );
    assert!(matches!(
        Lexicon::from_entries([("gout", vec![27])]).unwrap_err(),
        LexiconError::UnknownDomain { index: 27, .. }
    ));
    assert!(matches!(
        Lexicon::from_entries([("gout", Vec::<usize>::new())]).unwrap_err(),
        LexiconError::NoDomain(_)
    ));
}
