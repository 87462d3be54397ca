use nlghi_core::{DOMAIN_COUNT, DOMAIN_WEIGHTS, ImpairmentLevel};
use nlghi_scoring::scoring::{compute_levels, round_ghi};
use nlghi_scoring::{InvalidImpairmentVector, compute};

#[test]
fn all_zero_gives_zero_index() {
    let score = compute(&[0u8; DOMAIN_COUNT]).unwrap();
    assert_eq!(score.dsavs, vec![0; DOMAIN_COUNT]);
    assert_eq!(score.ghi, 0.0);
}

#[test]
fn all_critical_gives_mean_of_five_times_weights() {
    let score = compute(&[5u8; DOMAIN_COUNT]).unwrap();
    // weights sum to 76, so 380 / 27
    assert_eq!(score.dsav_total(), 380);
    assert_eq!(score.ghi, 14.0741);
}

#[test]
fn first_two_domains_only() {
    let mut levels = [0i64; DOMAIN_COUNT];
    levels[0] = 2;
    levels[1] = 1;
    let score = compute(&levels).unwrap();
    assert_eq!(score.dsavs[0], 10);
    assert_eq!(score.dsavs[1], 5);
    assert!(score.dsavs[2..].iter().all(|&d| d == 0));
    assert_eq!(score.ghi, 0.5556);
}

#[test]
fn dsav_is_level_times_weight() {
    let levels: Vec<i32> = (0..DOMAIN_COUNT as i32).map(|i| i % 6).collect();
    let score = compute(&levels).unwrap();
    for i in 0..DOMAIN_COUNT {
        assert_eq!(score.dsavs[i], levels[i] as u32 * DOMAIN_WEIGHTS[i]);
    }
    assert_eq!(compute(&levels).unwrap(), score);
}

#[test]
fn mixed_visit_matches_hand_computation() {
    let levels: [u8; DOMAIN_COUNT] = [
        3, 2, 1, 0, 4, 5, 0, 1, 2, 3, 0, 0, 1, 1, 1, 1, 0, 0, 2, 0, 0, 0, 1, 0, 0, 1, 5,
    ];
    let score = compute(&levels).unwrap();
    assert_eq!(score.dsav_total(), 109);
    assert_eq!(score.ghi, 4.037);
}

#[test]
fn wrong_length_is_rejected() {
    let err = compute(&[1u8; 26]).unwrap_err();
    assert_eq!(
        err,
        InvalidImpairmentVector::WrongLength {
            expected: 27,
            actual: 26
        }
    );
    assert!(compute(&[0u8; 28]).is_err());
    assert!(compute::<u8>(&[]).is_err());
}

#[test]
fn out_of_range_level_is_rejected_not_clamped() {
    let mut levels = [0i64; DOMAIN_COUNT];
    levels[7] = 6;
    assert_eq!(
        compute(&levels).unwrap_err(),
        InvalidImpairmentVector::OutOfRange { index: 7, value: 6 }
    );
    levels[7] = -1;
    assert_eq!(
        compute(&levels).unwrap_err(),
        InvalidImpairmentVector::OutOfRange { index: 7, value: -1 }
    );
}

#[test]
fn typed_levels_agree_with_raw_levels() {
    let mut typed = [ImpairmentLevel::None; DOMAIN_COUNT];
    typed[0] = ImpairmentLevel::Mild;
    typed[1] = ImpairmentLevel::Suspected;
    let mut raw = [0u8; DOMAIN_COUNT];
    raw[0] = 2;
    raw[1] = 1;
    assert_eq!(compute_levels(&typed), compute(&raw).unwrap());
}

#[test]
fn rounding_to_four_places() {
    assert_eq!(round_ghi(1.0 / 3.0), 0.3333);
    assert_eq!(round_ghi(2.0 / 3.0), 0.6667);
    assert_eq!(round_ghi(5.0), 5.0);
}

#[test]
fn score_becomes_a_record() {
    let score = compute(&[1u8; DOMAIN_COUNT]).unwrap();
    let ghi = score.ghi;
    let record = score.into_record("2025-03-01 09:00:00".into(), "2025-03-01".into());
    assert_eq!(record.impairment_list().len(), DOMAIN_COUNT);
    assert_eq!(record.dsav_list().len(), DOMAIN_COUNT);
    assert_eq!(record.ghi_value(), Some(ghi));
    assert_eq!(record.session_date, "2025-03-01");
}
