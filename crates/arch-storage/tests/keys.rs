use arch_core::s3_keys;
use arch_storage::readings::{resolve_existing_assessment, select_prior_keys, ExistingAssessment};
use uuid::Uuid;

fn ts(s: &str) -> jiff::Timestamp {
    s.parse().unwrap()
}

fn keys_for(patient: Uuid, times: &[&str]) -> Vec<String> {
    let mut keys: Vec<String> = times
        .iter()
        .map(|t| s3_keys::patient_reading(patient, ts(t), Uuid::new_v4()))
        .collect();
    keys.sort();
    keys
}

#[test]
fn picks_newest_prior_keys_newest_first() {
    let patient = Uuid::new_v4();
    let prefix = s3_keys::patient_readings_prefix(patient);
    let keys = keys_for(
        patient,
        &[
            "2025-03-01T08:00:00Z",
            "2025-03-02T08:00:00Z",
            "2025-03-03T08:00:00Z",
            "2025-03-04T08:00:00Z",
            "2025-03-05T08:00:00Z",
            "2025-03-06T08:00:00Z",
            "2025-03-07T08:00:00Z",
        ],
    );

    let selected = select_prior_keys(&keys, &prefix, ts("2025-03-06T08:00:00Z"), 3);
    let expected = vec![keys[4].as_str(), keys[3].as_str(), keys[2].as_str()];
    assert_eq!(selected, expected);
}

#[test]
fn reading_at_reference_time_is_not_prior() {
    let patient = Uuid::new_v4();
    let prefix = s3_keys::patient_readings_prefix(patient);
    let keys = keys_for(patient, &["2025-03-01T08:00:00Z"]);

    assert!(select_prior_keys(&keys, &prefix, ts("2025-03-01T08:00:00Z"), 5).is_empty());
    assert_eq!(
        select_prior_keys(&keys, &prefix, ts("2025-03-01T08:00:00.001Z"), 5).len(),
        1
    );
}

#[test]
fn ignores_keys_outside_the_patient_prefix() {
    let patient = Uuid::new_v4();
    let prefix = s3_keys::patient_readings_prefix(patient);
    let mut keys = keys_for(Uuid::new_v4(), &["2025-03-01T08:00:00Z"]);
    keys.push(format!("{prefix}not-a-reading"));

    assert!(select_prior_keys(&keys, &prefix, ts("2025-04-01T00:00:00Z"), 5).is_empty());
}

#[test]
fn stored_assessment_is_final_once_the_reading_is_written() {
    assert_eq!(resolve_existing_assessment(true), ExistingAssessment::Final);
    assert_eq!(resolve_existing_assessment(false), ExistingAssessment::Interrupted);
}
