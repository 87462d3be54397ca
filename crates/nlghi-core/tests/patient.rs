use jiff::civil::{date, datetime};
use serde_json::json;

use nlghi_core::CoreError;
use nlghi_core::models::classification::ClassificationResult;
use nlghi_core::models::dataset::Dataset;
use nlghi_core::models::patient::Patient;
use nlghi_core::models::visit::{VisitRecord, coerce_f64, coerce_i64};
use nlghi_core::time::{age_on, parse_date};

fn visit(session_date: &str) -> VisitRecord {
    VisitRecord::new(
        "2025-01-01 10:00:00".to_string(),
        session_date.to_string(),
        &[0; 27],
        &[0; 27],
        0.0,
    )
}

#[test]
fn loads_minimal_patient_with_empty_auxiliaries() {
    let raw = json!({
        "name": "Jane Roe",
        "dob": "1940-02-03",
        "age": 85,
        "gender": "Female",
        "records": []
    });
    let p: Patient = serde_json::from_value(raw).unwrap();
    assert_eq!(p.name, "Jane Roe");
    assert!(p.tags.is_empty());
    assert!(p.history.is_empty());
    assert!(p.notes.is_empty());
    assert!(p.future_refs.is_empty());
    assert!(p.symptom_snapshots.is_empty());
    assert!(p.attachments.is_empty());
}

#[test]
fn unknown_keys_survive_a_round_trip() {
    let raw = json!({
        "name": "A",
        "dob": "",
        "age": 0,
        "gender": "",
        "records": [{
            "timestamp": "2025-01-01 10:00:00",
            "session_date": "2025-01-01",
            "impairments": [1, "x"],
            "dsavs": [5],
            "ghi": "bad",
            "reviewer": "dr. b"
        }],
        "ward": "3B"
    });
    let p: Patient = serde_json::from_value(raw.clone()).unwrap();
    assert_eq!(p.extra.get("ward"), Some(&json!("3B")));
    assert_eq!(p.records[0].extra.get("reviewer"), Some(&json!("dr. b")));
    assert_eq!(p.records[0].impairment_list()[1], json!("x"));

    let back = serde_json::to_value(&p).unwrap();
    assert_eq!(back["ward"], json!("3B"));
    assert_eq!(back["records"][0]["ghi"], json!("bad"));
    assert_eq!(back["records"][0]["reviewer"], json!("dr. b"));
}

#[test]
fn missing_ghi_is_not_written_back() {
    let r: VisitRecord = serde_json::from_value(json!({
        "timestamp": "t",
        "session_date": "2025-01-01",
        "impairments": [],
        "dsavs": []
    }))
    .unwrap();
    assert_eq!(r.ghi_label(), "N/A");
    let back = serde_json::to_value(&r).unwrap();
    assert!(back.get("ghi").is_none());
}

#[test]
fn explicit_null_ghi_is_written_back() {
    let raw = json!({
        "timestamp": "t",
        "session_date": "2025-01-01",
        "impairments": [],
        "dsavs": [],
        "ghi": null
    });
    let r: VisitRecord = serde_json::from_value(raw.clone()).unwrap();
    assert_eq!(r.ghi, Some(json!(null)));
    assert_eq!(r.ghi_value(), None);
    assert_eq!(serde_json::to_value(&r).unwrap(), raw);
}

#[test]
fn malformed_containers_still_load() {
    let raw = json!({
        "timestamp": "t",
        "session_date": "2025-01-01",
        "impairments": "none recorded",
        "dsavs": null
    });
    let r: VisitRecord = serde_json::from_value(raw.clone()).unwrap();
    assert!(r.impairment_list().is_empty());
    assert!(r.dsav_list().is_empty());
    assert_eq!(r.dsavs, Some(json!(null)));
    assert_eq!(serde_json::to_value(&r).unwrap(), raw);
}

#[test]
fn absent_and_empty_lists_differ() {
    let empty: VisitRecord =
        serde_json::from_value(json!({ "session_date": "2025-01-01", "dsavs": [] })).unwrap();
    let absent: VisitRecord = serde_json::from_value(json!({ "session_date": "2025-01-01" })).unwrap();
    assert_eq!(empty.dsavs, Some(json!([])));
    assert_eq!(absent.dsavs, None);
}

#[test]
fn age_is_read_leniently() {
    for (stored, years) in [(json!(70), Some(70)), (json!(70.0), Some(70)), (json!("70"), Some(70)), (json!("old"), None)] {
        let p: Patient = serde_json::from_value(json!({ "name": "A", "age": stored.clone() })).unwrap();
        assert_eq!(p.age_years(), years, "age {stored}");
        assert_eq!(serde_json::to_value(&p).unwrap()["age"], stored);
    }
    assert_eq!(Patient::new("A", "", 85, "").age_years(), Some(85));
}

#[test]
fn scalar_coercion() {
    assert_eq!(coerce_f64(&json!(1.5)), Some(1.5));
    assert_eq!(coerce_f64(&json!("2.25")), Some(2.25));
    assert_eq!(coerce_f64(&json!("abc")), None);
    assert_eq!(coerce_f64(&json!(null)), None);
    assert_eq!(coerce_i64(&json!(3)), Some(3));
    assert_eq!(coerce_i64(&json!(3.0)), Some(3));
    assert_eq!(coerce_i64(&json!("4")), Some(4));
    assert_eq!(coerce_i64(&json!(2.5)), None);
    assert_eq!(coerce_i64(&json!([1])), None);
}

#[test]
fn tags_are_trimmed_sorted_and_unique() {
    let mut p = Patient::default();
    p.set_tags(" frailty, diabetes,,frailty ".split(','));
    assert_eq!(p.tags, vec!["diabetes", "frailty"]);
}

#[test]
fn query_matches_mcp_name_or_tag() {
    let mut p = Patient::new("Mary Major", "1938-05-01", 87, "Female");
    p.set_tags(["Frailty"]);
    assert!(p.matches_query("NL-1001", ""));
    assert!(p.matches_query("NL-1001", "nl-10"));
    assert!(p.matches_query("NL-1001", "MARY"));
    assert!(p.matches_query("NL-1001", "frail"));
    assert!(!p.matches_query("NL-1001", "diabetes"));
}

#[test]
fn history_crud() {
    let at = datetime(2025, 3, 1, 9, 0, 0, 0);
    let mut p = Patient::default();
    assert!(matches!(
        p.add_history("t", "   ", at),
        Err(CoreError::MissingField(_))
    ));

    let idx = p.add_history("  ", "Hip fracture 2019", at).unwrap();
    assert_eq!(idx, 0);
    assert_eq!(p.history[0].title, "(untitled)");
    assert_eq!(p.history[0].timestamp, "2025-03-01 09:00:00");
    assert!(p.history[0].edited_at.is_none());

    let later = datetime(2025, 3, 2, 8, 30, 0, 0);
    p.update_history(0, "Surgery", "Hip fracture 2019, ORIF", later).unwrap();
    assert_eq!(p.history[0].title, "Surgery");
    assert_eq!(p.history[0].edited_at.as_deref(), Some("2025-03-02 08:30:00"));

    assert!(matches!(
        p.update_history(5, "x", "y", later),
        Err(CoreError::EntryNotFound { index: 5, .. })
    ));
    let removed = p.remove_history(0).unwrap();
    assert_eq!(removed.title, "Surgery");
    assert!(p.history.is_empty());
}

#[test]
fn note_attached_to_latest_visit_records_its_session_date() {
    let at = datetime(2025, 3, 1, 9, 0, 0, 0);
    let mut p = Patient::default();

    p.add_note("No visit yet", "body", true, at).unwrap();
    assert_eq!(p.notes[0].context_session_date, None);

    p.append_record(visit("2025-02-01"));
    p.append_record(visit("2025-01-15"));
    p.add_note("Follow-up", "body", true, at).unwrap();
    assert_eq!(p.notes[1].context_session_date.as_deref(), Some("2025-01-15"));

    p.add_note("Loose", "body", false, at).unwrap();
    assert_eq!(p.notes[2].context_session_date, None);
}

#[test]
fn future_refs_can_be_completed() {
    let at = datetime(2025, 3, 1, 9, 0, 0, 0);
    let mut p = Patient::default();
    let idx = p.add_future_ref("Bloodwork", "CBC, lytes", date(2025, 6, 1), at);
    assert_eq!(p.future_refs[idx].due, "2025-06-01");
    assert_eq!(p.future_refs[idx].status(), "PENDING");

    p.mark_future_ref_done(idx, datetime(2025, 6, 2, 11, 0, 0, 0)).unwrap();
    assert!(p.future_refs[idx].done);
    assert_eq!(p.future_refs[idx].status(), "DONE");
    assert_eq!(p.future_refs[idx].done_at.as_deref(), Some("2025-06-02 11:00:00"));
    assert!(p.mark_future_ref_done(3, at).is_err());
}

#[test]
fn snapshots_and_attachments() {
    let at = datetime(2025, 3, 1, 9, 0, 0, 0);
    let mut p = Patient::default();
    assert!(p.add_symptom_snapshot("  ", ClassificationResult::default(), at).is_err());
    p.add_symptom_snapshot(" cough ", ClassificationResult::default(), at).unwrap();
    assert_eq!(p.symptom_snapshots[0].text, "cough");

    p.add_attachment("/scans/xray.png", "CXR", at).unwrap();
    let json = serde_json::to_value(&p.attachments[0]).unwrap();
    assert_eq!(json["desc"], "CXR");
    assert!(p.remove_attachment(1).is_err());
    assert_eq!(p.remove_attachment(0).unwrap().path, "/scans/xray.png");
}

#[test]
fn dataset_ensure_and_search() {
    let mut d = Dataset::new();
    d.ensure_patient("200", "Bob", "Male");
    d.ensure_patient("100", "Alice", "Female").set_tags(["copd"]);
    // existing patient is returned untouched
    assert_eq!(d.ensure_patient("200", "Other", "").name, "Bob");

    assert_eq!(d.len(), 2);
    assert_eq!(d.mcps().collect::<Vec<_>>(), vec!["100", "200"]);
    assert_eq!(d.search("copd"), vec!["100"]);
    assert_eq!(d.search(""), vec!["100", "200"]);

    let json = serde_json::to_value(&d).unwrap();
    assert_eq!(json["200"]["name"], "Bob");
    assert!(d.remove_patient("200").is_some());
    assert!(!d.contains("200"));
}

#[test]
fn age_counts_whole_years() {
    let dob = parse_date("1940-06-15").unwrap();
    assert_eq!(age_on(dob, date(2025, 6, 14)), 84);
    assert_eq!(age_on(dob, date(2025, 6, 15)), 85);
    assert!(parse_date("15/06/1940").is_err());
}
