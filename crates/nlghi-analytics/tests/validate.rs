use serde_json::{Value, json};

use nlghi_analytics::validate::check_record;
use nlghi_analytics::{MalformedRecord, validate};
use nlghi_core::DOMAIN_COUNT;
use nlghi_core::models::dataset::Dataset;
use nlghi_core::models::patient::Patient;
use nlghi_core::models::visit::VisitRecord;
use nlghi_scoring::compute;

fn good_record() -> VisitRecord {
    let mut levels = [1u8; DOMAIN_COUNT];
    levels[0] = 4;
    compute(&levels)
        .unwrap()
        .into_record("2025-01-01 09:00:00".into(), "2025-01-01".into())
}

fn list_mut(slot: &mut Option<Value>) -> &mut Vec<Value> {
    slot.as_mut().and_then(Value::as_array_mut).unwrap()
}

fn dataset_of(records: Vec<VisitRecord>) -> Dataset {
    let mut p = Patient::new("Test", "", 0, "");
    for r in records {
        p.append_record(r);
    }
    let mut d = Dataset::new();
    d.insert("NL-1", p);
    d
}

#[test]
fn computed_records_validate_clean() {
    let report = validate(&dataset_of(vec![good_record(), good_record()]));
    assert!(report.is_clean());
    assert_eq!(report.patients, 1);
    assert_eq!(report.records, 2);
    assert_eq!(report.lines(), vec!["Patients: 1", "Issues found: 0"]);
}

#[test]
fn clean_after_json_round_trip() {
    let d = dataset_of(vec![good_record()]);
    let text = serde_json::to_string(&d).unwrap();
    let back: Dataset = serde_json::from_str(&text).unwrap();
    assert!(validate(&back).is_clean());
}

#[test]
fn tampered_ghi_gives_exactly_one_issue() {
    let mut r = good_record();
    let stored = r.ghi_value().unwrap();
    r.ghi = Some(json!(stored + 0.01));
    let report = validate(&dataset_of(vec![good_record(), r]));
    assert_eq!(report.issue_count(), 1);
    let issue = &report.issues[0];
    assert_eq!(issue.mcp, "NL-1");
    assert_eq!(issue.record_index, 1);
    assert!(matches!(issue.problem, MalformedRecord::GhiMismatch { .. }));
}

#[test]
fn ghi_within_tolerance_is_accepted() {
    let mut r = good_record();
    r.ghi = Some(json!(r.ghi_value().unwrap() + 1e-9));
    assert!(check_record(&r).is_empty());
}

#[test]
fn length_problems_are_reported() {
    let mut short = good_record();
    list_mut(&mut short.impairments).truncate(26);
    let problems = check_record(&short);
    assert_eq!(
        problems[0],
        MalformedRecord::ImpairmentLength {
            expected: 27,
            actual: 26
        }
    );
    assert!(matches!(problems[1], MalformedRecord::Recompute { .. }));
    assert_eq!(problems.len(), 2);

    let mut long_dsavs = good_record();
    list_mut(&mut long_dsavs.dsavs).push(json!(0));
    assert_eq!(
        check_record(&long_dsavs),
        vec![MalformedRecord::DsavLength {
            expected: 27,
            actual: 28
        }]
    );
}

#[test]
fn over_long_impairments_are_scored_on_the_first_27() {
    let mut r = good_record();
    list_mut(&mut r.impairments).push(json!(3));
    assert_eq!(
        check_record(&r),
        vec![MalformedRecord::ImpairmentLength {
            expected: 27,
            actual: 28
        }]
    );
}

#[test]
fn non_numeric_entries_do_not_abort_the_scan() {
    let mut bad_level = good_record();
    list_mut(&mut bad_level.impairments)[3] = json!("severe");
    let mut bad_ghi = good_record();
    bad_ghi.ghi = Some(json!("n/a"));
    let mut bad_dsav = good_record();
    list_mut(&mut bad_dsav.dsavs)[0] = json!(99);

    let mut d = dataset_of(vec![bad_level, good_record()]);
    let mut other = Patient::default();
    other.append_record(bad_ghi);
    other.append_record(bad_dsav);
    d.insert("NL-2", other);

    let report = validate(&d);
    assert_eq!(report.records, 4);
    assert_eq!(report.issue_count(), 3);
    assert!(matches!(report.issues[0].problem, MalformedRecord::Recompute { .. }));
    assert_eq!(report.issues[0].record_index, 0);
    assert!(matches!(report.issues[1].problem, MalformedRecord::GhiNotNumeric { .. }));
    assert_eq!(
        report.issues[2].problem,
        MalformedRecord::DsavMismatch {
            domain: 0,
            stored: "99".to_string(),
            expected: 20
        }
    );

    let lines = report.lines();
    assert_eq!(lines.len(), 5);
    assert_eq!(lines[0], "Patients: 2");
    assert!(lines[1].starts_with("[NL-1] record 0: error recomputing GHI"));
    assert_eq!(lines[2], "[NL-2] record 0: GHI is not numeric: n/a");
    assert_eq!(lines[4], "Issues found: 3");
}

#[test]
fn out_of_range_stored_level_is_a_recompute_issue() {
    let mut r = good_record();
    list_mut(&mut r.impairments)[0] = json!(9);
    let problems = check_record(&r);
    assert_eq!(problems.len(), 1);
    assert!(matches!(&problems[0], MalformedRecord::Recompute { reason } if reason.contains("outside")));
}

#[test]
fn empty_population_is_clean() {
    let report = validate(&Dataset::new());
    assert_eq!(report.lines(), vec!["Patients: 0", "Issues found: 0"]);
}

#[test]
fn missing_ghi_key_is_compared_as_zero() {
    let zero = compute(&[0u8; DOMAIN_COUNT])
        .unwrap()
        .into_record("2025-01-01 09:00:00".into(), "2025-01-01".into());

    let mut absent = zero.clone();
    absent.ghi = None;
    assert!(check_record(&absent).is_empty());

    let mut nulled = zero;
    nulled.ghi = Some(Value::Null);
    assert_eq!(
        check_record(&nulled),
        vec![MalformedRecord::GhiNotNumeric {
            value: "N/A".to_string()
        }]
    );

    let mut scored = good_record();
    scored.ghi = None;
    assert!(matches!(
        check_record(&scored).as_slice(),
        [MalformedRecord::GhiMismatch { stored, .. }] if *stored == 0.0
    ));
}

#[test]
fn missing_or_wrong_shaped_lists_are_length_issues() {
    let mut r = good_record();
    r.dsavs = None;
    assert_eq!(
        check_record(&r),
        vec![MalformedRecord::DsavLength {
            expected: 27,
            actual: 0
        }]
    );

    let mut r = good_record();
    r.impairments = Some(json!("1,1,1"));
    let problems = check_record(&r);
    assert_eq!(
        problems[0],
        MalformedRecord::ImpairmentLength {
            expected: 27,
            actual: 0
        }
    );
    assert!(matches!(problems[1], MalformedRecord::Recompute { .. }));
}
