use nlghi_core::domains::{domain_name, total_weight};
use nlghi_core::{DOMAIN_COUNT, DOMAIN_NAMES, DOMAIN_WEIGHTS, ImpairmentLevel, all_domains, get_domain};

#[test]
fn registry_has_27_parallel_entries() {
    assert_eq!(DOMAIN_COUNT, 27);
    assert_eq!(DOMAIN_NAMES.len(), DOMAIN_WEIGHTS.len());
    assert_eq!(
        DOMAIN_WEIGHTS,
        [5, 5, 5, 4, 4, 4, 4, 3, 3, 5, 4, 1, 2, 2, 2, 2, 2, 2, 2, 2, 1, 1, 1, 5, 3, 1, 1]
    );
}

#[test]
fn weights_are_between_one_and_five() {
    assert!(DOMAIN_WEIGHTS.iter().all(|w| (1..=5).contains(w)));
    assert_eq!(total_weight(), 76);
}

#[test]
fn all_domains_is_index_ordered() {
    let domains = all_domains();
    assert_eq!(domains.len(), DOMAIN_COUNT);
    for (i, d) in domains.iter().enumerate() {
        assert_eq!(d.index, i);
        assert_eq!(d.weight, DOMAIN_WEIGHTS[i]);
    }
    assert_eq!(domains[0].name, "Cardiovascular");
    assert_eq!(domains[26].name, "Other");
}

#[test]
fn lookup_past_the_end_is_none() {
    assert!(get_domain(27).is_none());
    assert!(domain_name(100).is_none());
    assert_eq!(domain_name(1), Some("Respiratory/Cardiopulmonary"));
}

#[test]
fn impairment_levels_convert_from_integers() {
    assert_eq!(ImpairmentLevel::try_from(0_i64).unwrap(), ImpairmentLevel::None);
    assert_eq!(ImpairmentLevel::try_from(5_i64).unwrap(), ImpairmentLevel::Critical);
    assert!(ImpairmentLevel::try_from(6_i64).is_err());
    assert!(ImpairmentLevel::try_from(-1_i64).is_err());
    assert_eq!(ImpairmentLevel::Moderate.value(), 3);
    assert_eq!(ImpairmentLevel::Suspected.label(), "Suspected/Undiagnosed");
}
